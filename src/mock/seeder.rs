//! Submits expectations to a mock server's administrative endpoint.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use tracing::{debug, info, warn};

use crate::errors::SeedError;
use crate::models::credentials::JSON_CONTENT_TYPE;
use crate::models::expectation::MockExpectation;

/// Encode an expectation to the JSON document the mock server consumes.
///
/// # Errors
///
/// Returns `SeedError::SerializationFailed` if encoding fails.
pub fn encode(expectation: &MockExpectation) -> Result<Vec<u8>, SeedError> {
    serde_json::to_vec(expectation).map_err(|err| SeedError::SerializationFailed(err.to_string()))
}

/// Seeds one expectation per call; never retries.
#[derive(Debug, Clone, Default)]
pub struct MockSeeder {
    client: Client,
}

impl MockSeeder {
    /// Seeder sending through `client`.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// `PUT` the expectation to `admin_endpoint` and wait for the reply.
    ///
    /// The reply is not parsed. A non-success status is logged and
    /// otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::SerializationFailed` if the expectation cannot be
    /// encoded, or `SeedError::TransportFailed` if the request cannot be
    /// delivered.
    pub async fn seed(
        &self,
        expectation: &MockExpectation,
        admin_endpoint: &Url,
    ) -> Result<(), SeedError> {
        let body = encode(expectation)?;
        debug!(
            %admin_endpoint,
            method = %expectation.http_request.method,
            path = %expectation.http_request.path,
            "seeding mock expectation"
        );

        let resp = self
            .client
            .put(admin_endpoint.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|err| SeedError::TransportFailed(err.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            info!(%admin_endpoint, status = status.as_u16(), "mock expectation seeded");
        } else {
            warn!(
                %admin_endpoint,
                status = status.as_u16(),
                "mock server did not acknowledge expectation"
            );
        }
        Ok(())
    }
}
