use std::sync::Arc;

use business::application::bootstrap::initialize::InitializeDatabaseUseCaseImpl;
use business::domain::bootstrap::use_cases::initialize::InitializeDatabaseUseCase;
use business::domain::logger::Logger;
use firebase::connector::FirebaseConnector;
use firebase::credentials::file_source::ServiceAccountFile;

use super::firebase_config::FirebaseConfig;

/// Build the use case that produces the Firestore handle
///
/// Reads the service account key from `config.credentials_path` and connects
/// with the options derived from the environment (see [`FirebaseConfig::from_env`]).
pub fn database_initializer(
    config: &FirebaseConfig,
    logger: Arc<dyn Logger>,
) -> Arc<dyn InitializeDatabaseUseCase> {
    Arc::new(InitializeDatabaseUseCaseImpl {
        credentials: Arc::new(ServiceAccountFile::new(&config.credentials_path)),
        connector: Arc::new(FirebaseConnector::new(config.options())),
        logger,
    })
}
