//! Summary of a completed login check.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::login::LoginResponse;

/// Outcome of one successful login check.
///
/// The access token itself is never carried here.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckReport {
    /// Endpoint that was checked.
    pub endpoint: String,
    /// Whether a mock expectation was seeded first.
    pub seeded: bool,
    /// User identifier returned by the endpoint.
    pub id: String,
    /// Token type tag.
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: f64,
    /// When the check started.
    pub checked_at: DateTime<Utc>,
    /// `checked_at` plus the token lifetime.
    pub expires_at: DateTime<Utc>,
    /// Wall time spent on the login request.
    pub elapsed_ms: u64,
}

impl CheckReport {
    /// Build a report from a validated response.
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        seeded: bool,
        response: &LoginResponse,
        checked_at: DateTime<Utc>,
        elapsed: std::time::Duration,
    ) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let lifetime_ms = (response.expires_in * 1000.0) as i64;
        Self {
            endpoint: endpoint.into(),
            seeded,
            id: response.id.clone(),
            token_type: response.token_type.clone(),
            expires_in: response.expires_in,
            checked_at,
            expires_at: checked_at
                .checked_add_signed(Duration::milliseconds(lifetime_ms))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// One-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "login ok: endpoint={} id={} token_type={} expires_in={}s expires_at={} elapsed={}ms{}",
            self.endpoint,
            self.id,
            self.token_type,
            self.expires_in,
            self.expires_at.to_rfc3339(),
            self.elapsed_ms,
            if self.seeded { " (mock seeded)" } else { "" },
        )
    }
}
