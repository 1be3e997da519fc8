use std::path::PathBuf;

use firebase::connector::FirebaseOptions;
use firebase::firestore::client::DEFAULT_DATABASE_ID;

const DEFAULT_CREDENTIALS_PATH: &str = "firebase-service-account.json";

/// Firebase / Firestore configuration
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub credentials_path: PathBuf,
    pub database_id: String,
    pub emulator_host: Option<String>,
    pub verify_credentials: bool,
}

impl FirebaseConfig {
    /// Load Firebase configuration from environment variables
    ///
    /// Environment variables:
    /// - FIREBASE_CREDENTIALS_PATH: Service account key file
    ///   (fallback: GOOGLE_APPLICATION_CREDENTIALS, then "firebase-service-account.json")
    /// - FIRESTORE_DATABASE_ID: Database id (default: "(default)")
    /// - FIRESTORE_EMULATOR_HOST: host:port of a local emulator (optional)
    /// - FIREBASE_VERIFY_CREDENTIALS: Fetch a token at startup (default: "true")
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let credentials_path = non_empty("FIREBASE_CREDENTIALS_PATH")
            .or_else(|| non_empty("GOOGLE_APPLICATION_CREDENTIALS"))
            .unwrap_or_else(|| DEFAULT_CREDENTIALS_PATH.to_string());

        let verify_credentials = non_empty("FIREBASE_VERIFY_CREDENTIALS")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);

        Self {
            credentials_path: PathBuf::from(credentials_path),
            database_id: non_empty("FIRESTORE_DATABASE_ID")
                .unwrap_or_else(|| DEFAULT_DATABASE_ID.to_string()),
            emulator_host: non_empty("FIRESTORE_EMULATOR_HOST"),
            verify_credentials,
        }
    }

    pub fn options(&self) -> FirebaseOptions {
        FirebaseOptions {
            database_id: self.database_id.clone(),
            emulator_host: self.emulator_host.clone(),
            verify_credentials: self.verify_credentials,
        }
    }
}
