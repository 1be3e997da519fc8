/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.invalid_path: {0}")]
    InvalidPath(String),
    #[error("repository.unauthorized")]
    Unauthorized,
    #[error("repository.database_error: {0}")]
    DatabaseError(String),
    #[error("repository.malformed_document: {0}")]
    MalformedDocument(String),
}

impl RepositoryError {
    pub fn invalid_path(path: impl Into<String>) -> Self {
        RepositoryError::InvalidPath(path.into())
    }
    pub fn database_error(message: impl Into<String>) -> Self {
        RepositoryError::DatabaseError(message.into())
    }
    pub fn malformed_document(message: impl Into<String>) -> Self {
        RepositoryError::MalformedDocument(message.into())
    }
}
