use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::path::DocumentPath;

/// A stored document with its fields decoded to plain JSON values.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: DocumentPath,
    pub fields: Map<String, Value>,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
}

impl Document {
    pub fn id(&self) -> &str {
        self.path.id()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}
