use serde::Deserialize;
use url::Url;

use super::errors::CredentialError;

pub const SERVICE_ACCOUNT_TYPE: &str = "service_account";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Service-account key issued by the cloud provider.
///
/// Only the fields needed to authenticate a backend process are kept; the
/// certificate URLs and other descriptive entries of the key file are ignored.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    pub client_id: Option<String>,
    pub token_uri: String,
}

#[derive(Deserialize)]
struct RawServiceAccountKey {
    #[serde(rename = "type")]
    key_type: Option<String>,
    project_id: Option<String>,
    private_key_id: Option<String>,
    private_key: Option<String>,
    client_email: Option<String>,
    client_id: Option<String>,
    token_uri: Option<String>,
}

impl ServiceAccountKey {
    /// Parses and validates the JSON content of a key file.
    pub fn from_json(contents: &str) -> Result<Self, CredentialError> {
        let raw: RawServiceAccountKey = serde_json::from_str(contents)
            .map_err(|e| CredentialError::Malformed(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawServiceAccountKey) -> Result<Self, CredentialError> {
        let key_type = required(raw.key_type, "type")?;
        if key_type != SERVICE_ACCOUNT_TYPE {
            return Err(CredentialError::InvalidType(key_type));
        }

        let project_id = required(raw.project_id, "project_id")?;
        let private_key = required(raw.private_key, "private_key")?;
        let client_email = required(raw.client_email, "client_email")?;

        if !is_pem_private_key(&private_key) {
            return Err(CredentialError::InvalidPrivateKey);
        }

        let token_uri = raw
            .token_uri
            .filter(|uri| !uri.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string());
        validate_token_uri(&token_uri)?;

        Ok(Self {
            project_id,
            private_key_id: raw.private_key_id.filter(|id| !id.is_empty()),
            private_key,
            client_email,
            client_id: raw.client_id.filter(|id| !id.is_empty()),
            token_uri,
        })
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"<redacted>")
            .field("client_email", &self.client_email)
            .field("client_id", &self.client_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, CredentialError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CredentialError::MissingField(field)),
    }
}

fn is_pem_private_key(key: &str) -> bool {
    let key = key.trim();
    key.starts_with("-----BEGIN") && key.contains("PRIVATE KEY-----") && key.ends_with("-----")
}

fn validate_token_uri(uri: &str) -> Result<(), CredentialError> {
    let parsed = Url::parse(uri).map_err(|_| CredentialError::InvalidTokenUri(uri.to_string()))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host().is_some() => Ok(()),
        _ => Err(CredentialError::InvalidTokenUri(uri.to_string())),
    }
}
