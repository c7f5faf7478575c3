//! Login response model and its contract.

use serde::{Deserialize, Deserializer};

use crate::errors::LoginError;

/// The only token type the login contract accepts.
pub const BEARER: &str = "Bearer";

/// Successful login payload.
///
/// Absent and `null` fields decode to their empty value so that
/// [`LoginResponse::validate`] reports them as contract violations instead of
/// parse failures.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LoginResponse {
    /// User identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Opaque bearer credential.
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_token: String,
    /// Token lifetime in seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub expires_in: f64,
    /// Token type tag; must be `Bearer`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub token_type: String,
}

impl LoginResponse {
    /// Parse a response body and check it against the login contract.
    ///
    /// # Errors
    ///
    /// Returns `LoginError::MalformedBody` if the body is not a JSON object
    /// of the expected shape, or `LoginError::ContractViolation` for the
    /// first field that breaks the contract.
    pub fn from_body(body: &[u8]) -> Result<Self, LoginError> {
        let response: Self = serde_json::from_slice(body)
            .map_err(|err| LoginError::MalformedBody(err.to_string()))?;
        response.validate()?;
        Ok(response)
    }

    /// Check every contract rule, in field order.
    ///
    /// # Errors
    ///
    /// Returns `LoginError::ContractViolation` naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), LoginError> {
        if self.id.is_empty() {
            return Err(violation("id", "login id must not be empty".into()));
        }
        if self.access_token.is_empty() {
            return Err(violation(
                "accessToken",
                "access token must not be empty".into(),
            ));
        }
        if self.expires_in.is_nan() || self.expires_in <= 0.0 {
            return Err(violation(
                "expiresIn",
                format!("token expiration must be positive, got {}", self.expires_in),
            ));
        }
        if self.token_type != BEARER {
            return Err(violation(
                "tokenType",
                format!("expected token type {BEARER:?}, got {:?}", self.token_type),
            ));
        }
        Ok(())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn violation(field: &'static str, detail: String) -> LoginError {
    LoginError::ContractViolation { field, detail }
}
