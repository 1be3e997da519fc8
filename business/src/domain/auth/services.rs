use async_trait::async_trait;

use super::errors::AuthError;
use super::model::AccessToken;

/// Supplies a currently valid access token for outbound database calls.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<AccessToken, AuthError>;
}
