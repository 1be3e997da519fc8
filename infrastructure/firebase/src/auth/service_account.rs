use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use business::domain::auth::errors::AuthError;
use business::domain::auth::model::AccessToken;
use business::domain::auth::services::AccessTokenProvider;
use business::domain::credentials::model::ServiceAccountKey;

pub const FIRESTORE_SCOPES: &str =
    "https://www.googleapis.com/auth/datastore https://www.googleapis.com/auth/cloud-platform";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_MINUTES: i64 = 5;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AssertionClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub scope: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

/// Exchanges a signed service-account assertion for OAuth2 access tokens
/// (JWT bearer grant) and reuses each token until it is close to expiry.
pub struct ServiceAccountTokenProvider {
    http: Client,
    client_email: String,
    token_uri: String,
    key_id: Option<String>,
    signing_key: EncodingKey,
    cached: Mutex<Option<AccessToken>>,
}

impl ServiceAccountTokenProvider {
    pub fn new(key: &ServiceAccountKey, http: Client) -> Result<Self, AuthError> {
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| AuthError::InvalidPrivateKey(e.to_string()))?;

        Ok(Self {
            http,
            client_email: key.client_email.clone(),
            token_uri: key.token_uri.clone(),
            key_id: key.private_key_id.clone(),
            signing_key,
            cached: Mutex::new(None),
        })
    }

    pub(crate) fn signed_assertion(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();

        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            sub: self.client_email.clone(),
            aud: self.token_uri.clone(),
            scope: FIRESTORE_SCOPES.to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        encode(&header, &claims, &self.signing_key).map_err(|e| AuthError::Signing(e.to_string()))
    }

    async fn request_token(&self) -> Result<AccessToken, AuthError> {
        let now = Utc::now();
        let assertion = self.signed_assertion(now)?;

        let response = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = rejection_message(&body);
            warn!(
                client_email = %self.client_email,
                status = status.as_u16(),
                "token endpoint rejected service account assertion: {message}"
            );
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        let lifetime = token.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
        let expires_at = expiry(now, lifetime)?;
        debug!(
            client_email = %self.client_email,
            expires_in = lifetime,
            "access token issued"
        );

        Ok(AccessToken::new(token.access_token, expires_at))
    }
}

fn expiry(issued_at: DateTime<Utc>, lifetime: i64) -> Result<DateTime<Utc>, AuthError> {
    if lifetime <= 0 {
        return Err(AuthError::MalformedResponse(format!(
            "expires_in must be positive, got {lifetime}"
        )));
    }
    Duration::try_seconds(lifetime)
        .and_then(|delta| issued_at.checked_add_signed(delta))
        .ok_or_else(|| {
            AuthError::MalformedResponse(format!("expires_in out of range: {lifetime}"))
        })
}

#[async_trait]
impl AccessTokenProvider for ServiceAccountTokenProvider {
    async fn access_token(&self) -> Result<AccessToken, AuthError> {
        // Held across the request so concurrent callers share one refresh.
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref()
            && !token.expires_within(Utc::now(), Duration::minutes(REFRESH_MARGIN_MINUTES))
        {
            return Ok(token.clone());
        }

        let token = self.request_token().await?;
        *cached = Some(token.clone());
        Ok(token)
    }
}

fn rejection_message(body: &str) -> String {
    match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(TokenErrorResponse {
            error_description: Some(description),
            ..
        }) => description,
        Ok(TokenErrorResponse {
            error: Some(error), ..
        }) => error,
        _ => body.trim().to_string(),
    }
}
