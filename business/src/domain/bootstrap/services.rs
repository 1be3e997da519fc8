use async_trait::async_trait;

use crate::domain::credentials::model::ServiceAccountKey;
use crate::domain::database::repository::DatabaseHandle;

use super::errors::BootstrapError;

/// Turns a validated credential into a ready database handle.
///
/// Implementations perform the provider's authentication check before
/// returning, so a rejected credential fails here rather than on first use.
#[async_trait]
pub trait DatabaseConnector: Send + Sync {
    async fn connect(&self, key: ServiceAccountKey) -> Result<DatabaseHandle, BootstrapError>;
}
