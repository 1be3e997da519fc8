/// Errors raised while loading or validating a service-account credential.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("credentials.file_not_found: {0}")]
    FileNotFound(String),
    #[error("credentials.unreadable: {0}")]
    Unreadable(String),
    #[error("credentials.malformed: {0}")]
    Malformed(String),
    #[error("credentials.missing_field: {0}")]
    MissingField(&'static str),
    #[error("credentials.invalid_type: {0}")]
    InvalidType(String),
    #[error("credentials.invalid_private_key")]
    InvalidPrivateKey,
    #[error("credentials.invalid_token_uri: {0}")]
    InvalidTokenUri(String),
}
