use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::errors::RepositoryError;

use super::document::Document;
use super::path::DocumentPath;

/// Handle to the managed document database.
///
/// One instance is created at startup and shared by every component that
/// needs database access.
#[async_trait]
pub trait DocumentDatabase: Send + Sync {
    fn project_id(&self) -> &str;
    fn database_id(&self) -> &str;

    /// Returns `None` when no document exists at `path`.
    async fn get_document(&self, path: &DocumentPath) -> Result<Option<Document>, RepositoryError>;

    /// Creates or fully overwrites the document at `path`.
    async fn set_document(
        &self,
        path: &DocumentPath,
        fields: &Map<String, Value>,
    ) -> Result<(), RepositoryError>;

    /// Deleting a missing document is not an error.
    async fn delete_document(&self, path: &DocumentPath) -> Result<(), RepositoryError>;
}

pub type DatabaseHandle = Arc<dyn DocumentDatabase>;
