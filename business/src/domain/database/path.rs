use crate::domain::errors::RepositoryError;

const MAX_SEGMENT_BYTES: usize = 1500;

/// Path of a document inside the database: alternating collection and
/// document ids, e.g. `notes/0x1f/indexes/42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    /// Top level document `collection/id`.
    pub fn new(collection: &str, id: &str) -> Result<Self, RepositoryError> {
        Self::from_segments(vec![collection.to_string(), id.to_string()])
    }

    /// Parses a slash separated path. Leading and trailing slashes are ignored.
    pub fn parse(path: &str) -> Result<Self, RepositoryError> {
        let segments = path
            .trim_matches('/')
            .split('/')
            .map(str::to_string)
            .collect();
        Self::from_segments(segments)
    }

    /// Document `collection/id` nested under this one.
    pub fn child(&self, collection: &str, id: &str) -> Result<Self, RepositoryError> {
        let mut segments = self.segments.clone();
        segments.push(collection.to_string());
        segments.push(id.to_string());
        Self::from_segments(segments)
    }

    fn from_segments(segments: Vec<String>) -> Result<Self, RepositoryError> {
        if segments.is_empty() || segments.len() % 2 != 0 {
            return Err(RepositoryError::invalid_path(segments.join("/")));
        }
        if let Some(bad) = segments.iter().find(|s| !is_valid_segment(s)) {
            return Err(RepositoryError::invalid_path(bad.clone()));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Id of the addressed document (last segment).
    pub fn id(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Collection containing the addressed document.
    pub fn collection(&self) -> &str {
        self.segments
            .get(self.segments.len().saturating_sub(2))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl std::str::FromStr for DocumentPath {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    if segment.is_empty() || segment.len() > MAX_SEGMENT_BYTES {
        return false;
    }
    if segment == "." || segment == ".." || segment.contains('/') {
        return false;
    }
    // Ids of the form __name__ are reserved by the database.
    let reserved = segment.len() >= 4 && segment.starts_with("__") && segment.ends_with("__");
    !reserved
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn should_build_top_level_document_path() {
        // Act
        let path = DocumentPath::new("notes", "0x1f").unwrap();

        // Assert
        assert_eq!(path.to_string(), "notes/0x1f");
        assert_eq!(path.collection(), "notes");
        assert_eq!(path.id(), "0x1f");
    }

    #[test]
    fn should_build_nested_document_path() {
        let path = DocumentPath::new("notes", "0x1f")
            .unwrap()
            .child("indexes", "42")
            .unwrap();

        assert_eq!(path.to_string(), "notes/0x1f/indexes/42");
        assert_eq!(path.collection(), "indexes");
        assert_eq!(path.id(), "42");
    }

    #[test]
    fn should_ignore_surrounding_slashes_when_parsing() {
        let path: DocumentPath = "/positions/7/".parse().unwrap();

        assert_eq!(path.segments(), &["positions".to_string(), "7".to_string()]);
    }

    #[test]
    fn should_reject_collection_path() {
        let result = DocumentPath::parse("notes/0x1f/indexes");

        assert!(matches!(result, Err(RepositoryError::InvalidPath(_))));
    }

    #[test]
    fn should_reject_empty_segments() {
        assert!(DocumentPath::parse("").is_err());
        assert!(DocumentPath::parse("notes//indexes/1").is_err());
        assert!(DocumentPath::new("notes", "").is_err());
    }

    #[test]
    fn should_reject_dot_and_reserved_ids() {
        assert!(DocumentPath::new("notes", ".").is_err());
        assert!(DocumentPath::new("notes", "..").is_err());
        assert!(DocumentPath::new("notes", "__name__").is_err());
        assert!(DocumentPath::new("notes", "__partial").is_ok());
    }

    #[test]
    fn should_only_reserve_ids_wrapped_in_double_underscores() {
        assert!(DocumentPath::new("notes", "____").is_err());
        assert!(DocumentPath::new("notes", "__x__").is_err());
        assert!(DocumentPath::new("notes", "__").is_ok());
        assert!(DocumentPath::new("notes", "___").is_ok());
        assert!(DocumentPath::new("notes", "partial__").is_ok());
    }

    #[test]
    fn should_reject_slash_inside_id() {
        let result = DocumentPath::new("notes", "a/b");

        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn should_parse_back_any_valid_rendered_path(
            segments in prop::collection::vec("[a-zA-Z0-9_-]{1,20}", 1..4)
                .prop_map(|ids| ids.iter().flat_map(|id| ["col".to_string(), format!("d{id}")]).collect::<Vec<_>>())
        ) {
            let rendered = segments.join("/");

            let path = DocumentPath::parse(&rendered).unwrap();

            prop_assert_eq!(path.segments(), segments.as_slice());
            prop_assert_eq!(path.to_string(), rendered);
        }
    }
}
