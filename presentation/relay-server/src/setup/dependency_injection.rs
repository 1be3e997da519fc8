use std::sync::Arc;

use business::application::bootstrap::shared_database::SharedDatabase;
use business::domain::bootstrap::errors::BootstrapError;
use business::domain::bootstrap::use_cases::initialize::InitializeDatabaseUseCase;
use business::domain::database::repository::DatabaseHandle;
use logger::TracingLogger;

use crate::config::database_config::database_initializer;
use crate::config::firebase_config::FirebaseConfig;

/// Application context handed to every component at startup.
///
/// Owns the one database handle of the process. `database()` may be called
/// any number of times and always yields the same instance.
pub struct DependencyContainer {
    shared_database: SharedDatabase,
    database_initializer: Arc<dyn InitializeDatabaseUseCase>,
    pub health_api: crate::api::health::routes::Api,
}

impl DependencyContainer {
    /// Initializes the database handle eagerly so that bad credentials stop
    /// the process before the listener is bound.
    pub async fn new(firebase: &FirebaseConfig) -> anyhow::Result<Self> {
        let logger = Arc::new(TracingLogger::new("bootstrap"));

        let initializer = database_initializer(firebase, logger);
        let shared_database = SharedDatabase::new();
        let database = shared_database
            .get_or_initialize(initializer.as_ref())
            .await?;

        let health_api = crate::api::health::routes::Api::new(database);

        Ok(Self {
            shared_database,
            database_initializer: initializer,
            health_api,
        })
    }

    pub async fn database(&self) -> Result<DatabaseHandle, BootstrapError> {
        self.shared_database
            .get_or_initialize(self.database_initializer.as_ref())
            .await
    }
}
