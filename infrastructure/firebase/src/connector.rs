use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;
use url::Url;

use business::domain::auth::services::AccessTokenProvider;
use business::domain::bootstrap::errors::BootstrapError;
use business::domain::bootstrap::services::DatabaseConnector;
use business::domain::credentials::model::ServiceAccountKey;
use business::domain::database::repository::DatabaseHandle;

use crate::auth::emulator::EmulatorTokenProvider;
use crate::auth::service_account::ServiceAccountTokenProvider;
use crate::firestore::client::{DEFAULT_DATABASE_ID, FIRESTORE_BASE_URL, FirestoreClient};

/// Connection settings for the Firestore handle.
#[derive(Debug, Clone)]
pub struct FirebaseOptions {
    pub database_id: String,
    /// `host:port` of a local Firestore emulator. When set, no token
    /// exchange takes place.
    pub emulator_host: Option<String>,
    /// Fetch one access token while connecting so rejected credentials fail
    /// at startup.
    pub verify_credentials: bool,
}

impl Default for FirebaseOptions {
    fn default() -> Self {
        Self {
            database_id: DEFAULT_DATABASE_ID.to_string(),
            emulator_host: None,
            verify_credentials: true,
        }
    }
}

pub struct FirebaseConnector {
    options: FirebaseOptions,
    http: Client,
}

impl FirebaseConnector {
    pub fn new(options: FirebaseOptions) -> Self {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self { options, http }
    }
}

#[async_trait]
impl DatabaseConnector for FirebaseConnector {
    async fn connect(&self, key: ServiceAccountKey) -> Result<DatabaseHandle, BootstrapError> {
        let (base_url, tokens): (String, Arc<dyn AccessTokenProvider>) =
            match &self.options.emulator_host {
                Some(host) => {
                    info!(%host, project_id = %key.project_id, "using firestore emulator");
                    let tokens: Arc<dyn AccessTokenProvider> = Arc::new(EmulatorTokenProvider);
                    (format!("http://{host}/v1"), tokens)
                }
                None => {
                    let provider = ServiceAccountTokenProvider::new(&key, self.http.clone())?;
                    if self.options.verify_credentials {
                        provider.access_token().await?;
                        info!(
                            client_email = %key.client_email,
                            "service account credentials accepted"
                        );
                    }
                    let tokens: Arc<dyn AccessTokenProvider> = Arc::new(provider);
                    (FIRESTORE_BASE_URL.to_string(), tokens)
                }
            };

        let base_url = Url::parse(&base_url)
            .map_err(|e| BootstrapError::Connection(format!("{base_url}: {e}")))?;

        Ok(Arc::new(FirestoreClient::new(
            self.http.clone(),
            base_url,
            key.project_id,
            self.options.database_id.clone(),
            tokens,
        )))
    }
}
