use async_trait::async_trait;

use crate::domain::bootstrap::errors::BootstrapError;
use crate::domain::database::repository::DatabaseHandle;

#[async_trait]
pub trait InitializeDatabaseUseCase: Send + Sync {
    async fn execute(&self) -> Result<DatabaseHandle, BootstrapError>;
}
