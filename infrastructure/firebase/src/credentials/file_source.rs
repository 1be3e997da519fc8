use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use business::domain::credentials::errors::CredentialError;
use business::domain::credentials::model::ServiceAccountKey;
use business::domain::credentials::source::CredentialSource;

/// Service-account key stored as a JSON file on local disk.
pub struct ServiceAccountFile {
    path: PathBuf,
}

impl ServiceAccountFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialSource for ServiceAccountFile {
    async fn load(&self) -> Result<ServiceAccountKey, CredentialError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CredentialError::FileNotFound(self.path.display().to_string()),
                _ => CredentialError::Unreadable(format!("{}: {e}", self.path.display())),
            })?;

        let key = ServiceAccountKey::from_json(&contents)?;
        info!(
            path = %self.path.display(),
            project_id = %key.project_id,
            client_email = %key.client_email,
            "service account credentials loaded"
        );
        Ok(key)
    }
}
