use async_trait::async_trait;

use business::domain::auth::errors::AuthError;
use business::domain::auth::model::AccessToken;
use business::domain::auth::services::AccessTokenProvider;

/// The Firestore emulator accepts the fixed `owner` bearer and bypasses
/// security rules with it.
pub const EMULATOR_TOKEN: &str = "owner";

pub struct EmulatorTokenProvider;

#[async_trait]
impl AccessTokenProvider for EmulatorTokenProvider {
    async fn access_token(&self) -> Result<AccessToken, AuthError> {
        Ok(AccessToken::non_expiring(EMULATOR_TOKEN))
    }
}
