use async_trait::async_trait;

use super::errors::CredentialError;
use super::model::ServiceAccountKey;

/// Where the service-account key comes from (file, secret store, ...).
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn load(&self) -> Result<ServiceAccountKey, CredentialError>;
}
