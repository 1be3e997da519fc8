use chrono::Utc;
use poem_openapi::{Object, OpenApi, payload::Json};
use serde::{Deserialize, Serialize};

use business::domain::database::repository::DatabaseHandle;

use crate::api::tags::ApiTags;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct HealthCheckResponse {
    /// Service status
    pub status: String,
    /// Current server timestamp
    pub timestamp: String,
    /// Service version
    pub version: String,
    /// Firestore project the relay writes to
    pub project_id: String,
    /// Firestore database id
    pub database_id: String,
}

/// Health API for monitoring and infrastructure checks
///
/// The server only starts listening after the database handle has been
/// initialized, so a response here implies the handle is available.
pub struct Api {
    database: DatabaseHandle,
}

impl Api {
    pub fn new(database: DatabaseHandle) -> Self {
        Self { database }
    }

    fn report(&self) -> HealthCheckResponse {
        HealthCheckResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            project_id: self.database.project_id().to_string(),
            database_id: self.database.database_id().to_string(),
        }
    }
}

#[OpenApi]
impl Api {
    /// Health check endpoint
    ///
    /// Returns the current status of the service and the Firestore database
    /// it is bound to. Public, no authentication.
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health_check(&self) -> Json<HealthCheckResponse> {
        Json(self.report())
    }
}
