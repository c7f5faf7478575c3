//! Sends one login request and checks the reply against the contract.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, info};

use crate::errors::LoginError;
use crate::models::credentials::{
    LoginCredentials, APP_ID_HEADER, APP_KEY_HEADER, JSON_CONTENT_TYPE,
};
use crate::models::login::LoginResponse;

/// One-shot login checker. No retries, transport-default timeouts.
#[derive(Debug, Clone, Default)]
pub struct LoginChecker {
    client: Client,
}

impl LoginChecker {
    /// Checker sending through `client`.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// `POST` the credentials to `endpoint` and validate the reply.
    ///
    /// The body is read in full before the status is inspected; a status
    /// other than `200 OK` stops the check before any JSON parsing.
    ///
    /// # Errors
    ///
    /// - `LoginError::TransportFailed` if the request or body read fails.
    /// - `LoginError::UnexpectedStatus` for any status other than `200`.
    /// - `LoginError::MalformedBody` if the body is not the expected JSON.
    /// - `LoginError::ContractViolation` for the first invalid field.
    pub async fn check(
        &self,
        creds: &LoginCredentials,
        endpoint: &Url,
    ) -> Result<LoginResponse, LoginError> {
        let resp = self
            .client
            .post(endpoint.clone())
            .header(APP_ID_HEADER, creds.app_id.as_str())
            .header(APP_KEY_HEADER, creds.app_key.as_str())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(&creds.body())
            .send()
            .await
            .map_err(|err| LoginError::TransportFailed(err.to_string()))?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .await
            .map_err(|err| LoginError::TransportFailed(format!("failed to read body: {err}")))?;

        debug!(status = %status, "login response status");
        debug!(?headers, "login response headers");
        debug!(body = %String::from_utf8_lossy(&body), "login response body");

        if status != StatusCode::OK {
            return Err(LoginError::UnexpectedStatus(status.as_u16()));
        }

        let login = LoginResponse::from_body(&body)?;
        info!(%endpoint, id = %login.id, expires_in = login.expires_in, "login contract satisfied");
        Ok(login)
    }
}
