use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::bootstrap::errors::BootstrapError;
use crate::domain::bootstrap::services::DatabaseConnector;
use crate::domain::bootstrap::use_cases::initialize::InitializeDatabaseUseCase;
use crate::domain::credentials::source::CredentialSource;
use crate::domain::database::repository::DatabaseHandle;
use crate::domain::logger::Logger;

pub struct InitializeDatabaseUseCaseImpl {
    pub credentials: Arc<dyn CredentialSource>,
    pub connector: Arc<dyn DatabaseConnector>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl InitializeDatabaseUseCase for InitializeDatabaseUseCaseImpl {
    async fn execute(&self) -> Result<DatabaseHandle, BootstrapError> {
        self.logger.info("Loading service account credentials");
        let key = self.credentials.load().await.inspect_err(|e| {
            self.logger
                .error(&format!("Failed to load service account credentials: {e}"));
        })?;

        let project_id = key.project_id.clone();
        self.logger.info(&format!(
            "Connecting to document database for project: {project_id}"
        ));

        let handle = self.connector.connect(key).await.inspect_err(|e| {
            self.logger.error(&format!(
                "Failed to connect to document database for project {project_id}: {e}"
            ));
        })?;

        self.logger.info(&format!(
            "Document database ready: project={}, database={}",
            handle.project_id(),
            handle.database_id()
        ));
        Ok(handle)
    }
}
