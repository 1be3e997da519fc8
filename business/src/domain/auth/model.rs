use chrono::{DateTime, Duration, Utc};

/// Bearer token obtained from the provider's token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    /// `None` for tokens that never expire (emulator).
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at: Some(expires_at),
        }
    }

    pub fn non_expiring(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expires_at: None,
        }
    }

    /// True when the token expires before `now + margin`.
    pub fn expires_within(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at <= now + margin,
            None => false,
        }
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
