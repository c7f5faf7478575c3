//! Mock server expectation model.
//!
//! Field names and nesting follow the mock server's `/expectation` API:
//! an `httpRequest` matcher paired with an `httpResponse` template.

use serde::{Deserialize, Serialize};

use super::credentials::{LoginCredentials, APP_ID_HEADER, APP_KEY_HEADER, JSON_CONTENT_TYPE};
use super::login::BEARER;
use crate::errors::SeedError;

/// A named multi-value entry, used for both headers and query parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyToMultiValue {
    /// Header or parameter name.
    pub name: String,
    /// Accepted values.
    pub values: Vec<String>,
}

impl KeyToMultiValue {
    /// Entry with exactly one value.
    #[must_use]
    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }
}

/// How the mock server compares an incoming body with [`BodyMatcher::value`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BodyMatcherKind {
    /// Semantic JSON equality; whitespace and key order are ignored.
    Json,
    /// Exact text equality.
    String,
}

/// Request body matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BodyMatcher {
    /// Matcher kind.
    #[serde(rename = "type")]
    pub kind: BodyMatcherKind,
    /// Expected body text.
    pub value: String,
}

impl BodyMatcher {
    /// JSON matcher over the encoded form of `value`.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::SerializationFailed` if `value` cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, SeedError> {
        let value = serde_json::to_string(value)
            .map_err(|err| SeedError::SerializationFailed(err.to_string()))?;
        Ok(Self {
            kind: BodyMatcherKind::Json,
            value,
        })
    }
}

/// Incoming request pattern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestMatcher {
    /// HTTP method, e.g. `POST`.
    pub method: String,
    /// Request path without query string.
    pub path: String,
    /// Expected query parameters.
    #[serde(default)]
    pub query_string_parameters: Vec<KeyToMultiValue>,
    /// Expected headers.
    #[serde(default)]
    pub headers: Vec<KeyToMultiValue>,
    /// Expected body; any body matches when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyMatcher>,
}

/// Canned response returned on a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponseTemplate {
    /// Status code, e.g. `200`.
    pub status_code: u16,
    /// Response headers.
    #[serde(default)]
    pub headers: Vec<KeyToMultiValue>,
    /// Response body text.
    #[serde(default)]
    pub body: String,
}

/// A rule telling the mock server which request to match and what to return.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MockExpectation {
    /// Request pattern.
    pub http_request: HttpRequestMatcher,
    /// Response returned for a matching request.
    pub http_response: HttpResponseTemplate,
}

/// Login payload the mock server hands back, encoded with wire field names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CannedLogin {
    /// User identifier.
    pub id: String,
    /// Access token.
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    /// Token type tag.
    pub token_type: String,
}

impl Default for CannedLogin {
    fn default() -> Self {
        Self {
            id: "dummyID".into(),
            access_token: "dummyToken".into(),
            expires_in: 24 * 3600,
            token_type: BEARER.into(),
        }
    }
}

impl MockExpectation {
    /// Expectation answering a login `POST` to `path` made with `creds`.
    ///
    /// Matches on method, path, the `content-type`, `x-kii-appid`, and
    /// `x-kii-appkey` headers, and a JSON body equal to the credentials body.
    /// The canned response is `200` with a JSON body built from `canned`.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::SerializationFailed` if either body cannot be
    /// encoded.
    pub fn for_login(
        creds: &LoginCredentials,
        path: &str,
        canned: &CannedLogin,
    ) -> Result<Self, SeedError> {
        let response_body = serde_json::to_string(canned)
            .map_err(|err| SeedError::SerializationFailed(err.to_string()))?;

        Ok(Self {
            http_request: HttpRequestMatcher {
                method: "POST".into(),
                path: path.into(),
                query_string_parameters: Vec::new(),
                headers: vec![
                    KeyToMultiValue::single("content-type", JSON_CONTENT_TYPE),
                    KeyToMultiValue::single(APP_ID_HEADER, creds.app_id.as_str()),
                    KeyToMultiValue::single(APP_KEY_HEADER, creds.app_key.as_str()),
                ],
                body: Some(BodyMatcher::json(&creds.body())?),
            },
            http_response: HttpResponseTemplate {
                status_code: 200,
                headers: vec![KeyToMultiValue::single("content-type", JSON_CONTENT_TYPE)],
                body: response_body,
            },
        })
    }
}
