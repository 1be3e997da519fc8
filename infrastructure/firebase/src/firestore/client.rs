use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};
use url::Url;

use business::domain::auth::services::AccessTokenProvider;
use business::domain::database::document::Document;
use business::domain::database::path::DocumentPath;
use business::domain::database::repository::DocumentDatabase;
use business::domain::errors::RepositoryError;

use super::value::{decode_fields, encode_fields};

pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_DATABASE_ID: &str = "(default)";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentPayload {
    #[serde(default)]
    fields: Map<String, Value>,
    create_time: Option<DateTime<Utc>>,
    update_time: Option<DateTime<Utc>>,
}

/// Firestore REST v1 client. Cloning the surrounding `Arc` shares the
/// connection pool and the token provider.
pub struct FirestoreClient {
    http: Client,
    base_url: Url,
    project_id: String,
    database_id: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl FirestoreClient {
    pub fn new(
        http: Client,
        base_url: Url,
        project_id: String,
        database_id: String,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            http,
            base_url,
            project_id,
            database_id,
            tokens,
        }
    }

    /// `{base}/projects/{project}/databases/{database}/documents/{path}`
    pub fn document_url(&self, path: &DocumentPath) -> Result<Url, RepositoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RepositoryError::database_error("firestore.invalid_base_url"))?
            .pop_if_empty()
            .extend([
                "projects",
                self.project_id.as_str(),
                "databases",
                self.database_id.as_str(),
                "documents",
            ])
            .extend(path.segments());
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, RepositoryError> {
        let token = self.tokens.access_token().await.map_err(|e| {
            warn!(project_id = %self.project_id, "could not obtain access token: {e}");
            RepositoryError::Unauthorized
        })?;

        request
            .header(reqwest::header::AUTHORIZATION, token.authorization_header())
            .send()
            .await
            .map_err(|e| RepositoryError::database_error(e.to_string()))
    }
}

async fn failure(response: Response, path: &DocumentPath) -> RepositoryError {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        warn!(%path, status = status.as_u16(), "firestore denied access");
        return RepositoryError::Unauthorized;
    }
    let body = response.text().await.unwrap_or_default();
    warn!(%path, status = status.as_u16(), "firestore request failed");
    RepositoryError::database_error(format!("{}: {}", status.as_u16(), body.trim()))
}

#[async_trait]
impl DocumentDatabase for FirestoreClient {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn database_id(&self) -> &str {
        &self.database_id
    }

    async fn get_document(&self, path: &DocumentPath) -> Result<Option<Document>, RepositoryError> {
        let url = self.document_url(path)?;
        let response = self.send(self.http.get(url)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(%path, "document not found");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(failure(response, path).await);
        }

        let payload: DocumentPayload = response
            .json()
            .await
            .map_err(|e| RepositoryError::malformed_document(e.to_string()))?;

        Ok(Some(Document {
            path: path.clone(),
            fields: decode_fields(&payload.fields)?,
            create_time: payload.create_time,
            update_time: payload.update_time,
        }))
    }

    async fn set_document(
        &self,
        path: &DocumentPath,
        fields: &Map<String, Value>,
    ) -> Result<(), RepositoryError> {
        let url = self.document_url(path)?;
        let body = json!({ "fields": encode_fields(fields) });
        let response = self.send(self.http.patch(url).json(&body)).await?;

        if !response.status().is_success() {
            return Err(failure(response, path).await);
        }
        debug!(%path, fields = fields.len(), "document written");
        Ok(())
    }

    async fn delete_document(&self, path: &DocumentPath) -> Result<(), RepositoryError> {
        let url = self.document_url(path)?;
        let response = self.send(self.http.delete(url)).await?;

        if !response.status().is_success() && response.status() != StatusCode::NOT_FOUND {
            return Err(failure(response, path).await);
        }
        debug!(%path, "document deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::emulator::EmulatorTokenProvider;
    use crate::test_support::serve;
    use business::domain::auth::errors::AuthError;
    use business::domain::auth::model::AccessToken;

    struct FailingTokens;

    #[async_trait]
    impl AccessTokenProvider for FailingTokens {
        async fn access_token(&self) -> Result<AccessToken, AuthError> {
            Err(AuthError::Rejected {
                status: 400,
                message: "invalid_grant".to_string(),
            })
        }
    }

    fn client_for(base: &str) -> FirestoreClient {
        FirestoreClient::new(
            Client::new(),
            Url::parse(&format!("{base}/v1")).unwrap(),
            "invisibl333".to_string(),
            DEFAULT_DATABASE_ID.to_string(),
            Arc::new(EmulatorTokenProvider),
        )
    }

    fn note_path() -> DocumentPath {
        DocumentPath::new("notes", "0x1f")
            .unwrap()
            .child("indexes", "42")
            .unwrap()
    }

    #[test]
    fn should_build_document_url() {
        // Arrange
        let client = FirestoreClient::new(
            Client::new(),
            Url::parse(FIRESTORE_BASE_URL).unwrap(),
            "invisibl333".to_string(),
            DEFAULT_DATABASE_ID.to_string(),
            Arc::new(EmulatorTokenProvider),
        );

        // Act
        let url = client.document_url(&note_path()).unwrap();

        // Assert
        assert_eq!(
            url.as_str(),
            "https://firestore.googleapis.com/v1/projects/invisibl333/databases/(default)/documents/notes/0x1f/indexes/42"
        );
    }

    #[tokio::test]
    async fn should_return_none_when_document_is_missing() {
        let (base, server) = serve(vec![(404, r#"{"error":{"code":404}}"#.to_string())]).await;
        let client = client_for(&base);

        let result = client.get_document(&note_path()).await.unwrap();

        assert!(result.is_none());
        let requests = server.await.unwrap();
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].header("authorization"), Some("Bearer owner"));
    }

    #[tokio::test]
    async fn should_decode_existing_document() {
        let body = json!({
            "name": "projects/invisibl333/databases/(default)/documents/notes/0x1f/indexes/42",
            "fields": {
                "amount": { "integerValue": "1000" },
                "token": { "integerValue": "54321" },
                "hash": { "stringValue": "0xabc" }
            },
            "createTime": "2023-05-01T12:00:00.123456Z",
            "updateTime": "2023-05-02T08:30:00Z"
        })
        .to_string();
        let (base, server) = serve(vec![(200, body)]).await;
        let client = client_for(&base);

        let document = client.get_document(&note_path()).await.unwrap().unwrap();

        assert_eq!(document.id(), "42");
        assert_eq!(document.get("amount"), Some(&json!(1000)));
        assert_eq!(document.get("hash"), Some(&json!("0xabc")));
        assert!(document.create_time.is_some());
        assert!(document.update_time.is_some());
        let requests = server.await.unwrap();
        assert_eq!(
            requests[0].path,
            "/v1/projects/invisibl333/databases/(default)/documents/notes/0x1f/indexes/42"
        );
    }

    #[tokio::test]
    async fn should_write_document_with_encoded_fields() {
        let (base, server) = serve(vec![(200, "{}".to_string())]).await;
        let client = client_for(&base);
        let fields = json!({ "address": "0x1f", "index": 42 });

        client
            .set_document(&note_path(), fields.as_object().unwrap())
            .await
            .unwrap();

        let requests = server.await.unwrap();
        assert_eq!(requests[0].method, "PATCH");
        let sent: Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(
            sent,
            json!({ "fields": {
                "address": { "stringValue": "0x1f" },
                "index": { "integerValue": "42" }
            } })
        );
    }

    #[tokio::test]
    async fn should_treat_deleting_missing_document_as_success() {
        let (base, server) = serve(vec![(404, "{}".to_string())]).await;
        let client = client_for(&base);

        let result = client.delete_document(&note_path()).await;

        assert!(result.is_ok());
        assert_eq!(server.await.unwrap()[0].method, "DELETE");
    }

    #[tokio::test]
    async fn should_map_permission_denied_to_unauthorized() {
        let (base, _server) = serve(vec![(403, r#"{"error":{"status":"PERMISSION_DENIED"}}"#.to_string())]).await;
        let client = client_for(&base);

        let result = client.get_document(&note_path()).await;

        assert!(matches!(result, Err(RepositoryError::Unauthorized)));
    }

    #[tokio::test]
    async fn should_surface_server_errors() {
        let (base, _server) = serve(vec![(500, r#"{"error":"internal"}"#.to_string())]).await;
        let client = client_for(&base);

        let result = client.delete_document(&note_path()).await;

        match result {
            Err(RepositoryError::DatabaseError(message)) => assert!(message.starts_with("500")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_not_send_request_without_access_token() {
        let client = FirestoreClient::new(
            Client::new(),
            Url::parse("http://127.0.0.1:9/v1").unwrap(),
            "invisibl333".to_string(),
            DEFAULT_DATABASE_ID.to_string(),
            Arc::new(FailingTokens),
        );

        let result = client.get_document(&note_path()).await;

        assert!(matches!(result, Err(RepositoryError::Unauthorized)));
    }
}
