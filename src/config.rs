//! Global configuration parsing, validation, and credential loading.

use std::env;
use std::fs;
use std::path::Path;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::credentials::LoginCredentials;
use crate::models::expectation::CannedLogin;
use crate::{AppError, Result};

/// OS keychain service holding secrets that are not kept in the config file.
pub const KEYRING_SERVICE: &str = "login-contract";

/// Environment fallback for [`CredentialsConfig::app_key`].
pub const APP_KEY_ENV: &str = "LOGIN_CONTRACT_APP_KEY";

/// Environment fallback for [`CredentialsConfig::password`].
pub const PASSWORD_ENV: &str = "LOGIN_CONTRACT_PASSWORD";

/// Credentials section.
///
/// `app_key` and `password` may be left out of the TOML file and loaded at
/// runtime via [`GlobalConfig::load_credentials`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CredentialsConfig {
    /// Application identifier.
    pub app_id: String,
    /// Application key.
    #[serde(default)]
    pub app_key: String,
    /// Account username.
    pub username: String,
    /// Account password.
    #[serde(default)]
    pub password: String,
}

/// Mock server section. Its presence enables expectation seeding.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MockConfig {
    /// Administrative expectation endpoint, e.g. `http://localhost:12345/expectation`.
    pub admin_url: String,
    /// Canned login id.
    #[serde(default = "default_canned_id")]
    pub id: String,
    /// Canned access token.
    #[serde(default = "default_canned_token")]
    pub access_token: String,
    /// Canned token lifetime in seconds.
    #[serde(default = "default_canned_expires_in")]
    pub expires_in: u64,
    /// Canned token type.
    #[serde(default = "default_canned_token_type")]
    pub token_type: String,
}

fn default_canned_id() -> String {
    CannedLogin::default().id
}

fn default_canned_token() -> String {
    CannedLogin::default().access_token
}

fn default_canned_expires_in() -> u64 {
    CannedLogin::default().expires_in
}

fn default_canned_token_type() -> String {
    CannedLogin::default().token_type
}

impl MockConfig {
    /// Parsed administrative endpoint.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `admin_url` is not an absolute HTTP URL.
    pub fn admin_endpoint(&self) -> Result<Url> {
        parse_http_url("mock.admin_url", &self.admin_url)
    }

    /// Login payload the seeded expectation answers with.
    #[must_use]
    pub fn canned_login(&self) -> CannedLogin {
        CannedLogin {
            id: self.id.clone(),
            access_token: self.access_token.clone(),
            expires_in: self.expires_in,
            token_type: self.token_type.clone(),
        }
    }
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Login endpoint, scheme + host + path, no query string.
    pub login_url: String,
    /// Login credentials.
    pub credentials: CredentialsConfig,
    /// Optional mock server settings.
    #[serde(default)]
    pub mock: Option<MockConfig>,
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Fill in secrets missing from the file.
    ///
    /// Tries the `login-contract` OS keychain service first, then falls back
    /// to `LOGIN_CONTRACT_APP_KEY` / `LOGIN_CONTRACT_PASSWORD`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if neither keychain nor env vars provide
    /// a missing secret.
    pub async fn load_credentials(&mut self) -> Result<()> {
        self.load_credentials_from(KEYRING_SERVICE).await
    }

    /// Same as [`GlobalConfig::load_credentials`] with a custom keychain
    /// service name.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if neither keychain nor env vars provide
    /// a missing secret.
    pub async fn load_credentials_from(&mut self, service: &str) -> Result<()> {
        if self.credentials.app_key.is_empty() {
            self.credentials.app_key = load_credential(service, "app_key", APP_KEY_ENV).await?;
        }
        if self.credentials.password.is_empty() {
            self.credentials.password = load_credential(service, "password", PASSWORD_ENV).await?;
        }
        Ok(())
    }

    /// Parsed login endpoint.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `login_url` is not an absolute HTTP URL.
    pub fn login_endpoint(&self) -> Result<Url> {
        parse_http_url("login_url", &self.login_url)
    }

    /// Immutable credential set for a check.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a secret is still empty, which means
    /// [`GlobalConfig::load_credentials`] has not run or found nothing.
    pub fn credentials(&self) -> Result<LoginCredentials> {
        let creds = &self.credentials;
        if creds.app_key.is_empty() {
            return Err(AppError::Config("credentials.app_key is not set".into()));
        }
        if creds.password.is_empty() {
            return Err(AppError::Config("credentials.password is not set".into()));
        }
        Ok(LoginCredentials::new(
            creds.app_id.as_str(),
            creds.app_key.as_str(),
            creds.username.as_str(),
            creds.password.as_str(),
        ))
    }

    fn validate(&self) -> Result<()> {
        let login = self.login_endpoint()?;
        if login.query().is_some() {
            return Err(AppError::Config(
                "login_url must not carry a query string".into(),
            ));
        }

        if self.credentials.app_id.is_empty() {
            return Err(AppError::Config("credentials.app_id must not be empty".into()));
        }
        if self.credentials.username.is_empty() {
            return Err(AppError::Config(
                "credentials.username must not be empty".into(),
            ));
        }

        if let Some(mock) = &self.mock {
            mock.admin_endpoint()?;
            if mock.expires_in == 0 {
                return Err(AppError::Config(
                    "mock.expires_in must be greater than zero".into(),
                ));
            }
        }

        Ok(())
    }
}

fn parse_http_url(key: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|err| AppError::Config(format!("{key} invalid: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::Config(format!(
            "{key} must use http or https, got {other}"
        ))),
    }
}

/// Load a single credential from OS keychain with env-var fallback.
async fn load_credential(service: &str, keyring_key: &str, env_key: &str) -> Result<String> {
    let service_name = service.to_owned();
    let key = keyring_key.to_owned();

    // keyring is synchronous I/O.
    let keychain_result = tokio::task::spawn_blocking(move || {
        keyring::Entry::new(&service_name, &key).and_then(|entry| entry.get_password())
    })
    .await
    .map_err(|err| AppError::Config(format!("keychain task panicked: {err}")))?;

    match keychain_result {
        Ok(value) if !value.is_empty() => return Ok(value),
        Ok(_) => {
            warn!(key = keyring_key, "keychain entry is empty, trying env var");
        }
        Err(keyring::Error::NoEntry) => {
            debug!(service, key = keyring_key, "no keychain entry, trying env var");
        }
        Err(err) => {
            warn!(
                key = keyring_key,
                ?err,
                "keychain lookup failed, trying env var"
            );
        }
    }

    match env::var(env_key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::Config(format!(
            "credential {keyring_key} not found in keychain service {service} or {env_key} env var"
        ))),
    }
}
