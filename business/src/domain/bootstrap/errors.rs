use crate::domain::auth::errors::AuthError;
use crate::domain::credentials::errors::CredentialError;

/// Startup failures while producing the database handle.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("bootstrap.credentials: {0}")]
    Credentials(#[from] CredentialError),
    #[error("bootstrap.authentication: {0}")]
    Authentication(#[from] AuthError),
    #[error("bootstrap.connection: {0}")]
    Connection(String),
}
