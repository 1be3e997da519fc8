/// Errors raised while exchanging a credential for an access token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("auth.invalid_private_key: {0}")]
    InvalidPrivateKey(String),
    #[error("auth.signing_failed: {0}")]
    Signing(String),
    #[error("auth.request_failed: {0}")]
    Request(String),
    #[error("auth.token_rejected: {status} {message}")]
    Rejected { status: u16, message: String },
    #[error("auth.malformed_response: {0}")]
    MalformedResponse(String),
}
