//! Login credentials and the request body derived from them.

use std::fmt::{Debug, Formatter};

use serde::Serialize;

/// Header carrying the application identifier.
pub const APP_ID_HEADER: &str = "x-kii-appid";

/// Header carrying the application key.
pub const APP_KEY_HEADER: &str = "x-kii-appkey";

/// Content type sent with every login and expectation request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Immutable credential set used for one login check.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    /// Application identifier sent as `x-kii-appid`.
    pub app_id: String,
    /// Application key sent as `x-kii-appkey`.
    pub app_key: String,
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl LoginCredentials {
    /// Construct a credential set.
    #[must_use]
    pub fn new(
        app_id: impl Into<String>,
        app_key: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// JSON body of the login request.
    #[must_use]
    pub fn body(&self) -> LoginBody<'_> {
        LoginBody {
            username: &self.username,
            password: &self.password,
        }
    }
}

impl Debug for LoginCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Wire body of a login request: `{"username", "password"}` and nothing else.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct LoginBody<'a> {
    /// Account username.
    pub username: &'a str,
    /// Account password.
    pub password: &'a str,
}
