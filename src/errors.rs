//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure while submitting a mock server expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    /// The expectation could not be encoded to its JSON wire form.
    SerializationFailed(String),
    /// The PUT could not be delivered or the server is unreachable.
    TransportFailed(String),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SerializationFailed(msg) => write!(f, "expectation serialization failed: {msg}"),
            Self::TransportFailed(msg) => write!(f, "expectation transport failed: {msg}"),
        }
    }
}

impl std::error::Error for SeedError {}

/// Failure while performing or validating a login request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// The request could not be sent or the body could not be read.
    TransportFailed(String),
    /// The endpoint answered with something other than `200 OK`.
    UnexpectedStatus(u16),
    /// The body is not a JSON document of the expected shape.
    MalformedBody(String),
    /// A response field breaks the login contract.
    ContractViolation {
        /// Model field name, e.g. `accessToken`.
        field: &'static str,
        /// Human-readable description of the violation.
        detail: String,
    },
}

impl LoginError {
    /// Field name carried by a [`LoginError::ContractViolation`].
    #[must_use]
    pub fn violated_field(&self) -> Option<&'static str> {
        match self {
            Self::ContractViolation { field, .. } => Some(*field),
            _ => None,
        }
    }
}

impl Display for LoginError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransportFailed(msg) => write!(f, "login transport failed: {msg}"),
            Self::UnexpectedStatus(status) => write!(f, "unexpected login status: {status}"),
            Self::MalformedBody(msg) => write!(f, "malformed login body: {msg}"),
            Self::ContractViolation { field, detail } => {
                write!(f, "contract violation on {field}: {detail}")
            }
        }
    }
}

impl std::error::Error for LoginError {}

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// File-system or I/O operation failure.
    Io(String),
    /// Mock expectation seeding failure.
    Seed(SeedError),
    /// Login request or contract failure.
    Login(LoginError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
            Self::Seed(err) => write!(f, "seed: {err}"),
            Self::Login(err) => write!(f, "login: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Seed(err) => Some(err),
            Self::Login(err) => Some(err),
            Self::Config(_) | Self::Io(_) => None,
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<SeedError> for AppError {
    fn from(err: SeedError) -> Self {
        Self::Seed(err)
    }
}

impl From<LoginError> for AppError {
    fn from(err: LoginError) -> Self {
        Self::Login(err)
    }
}
