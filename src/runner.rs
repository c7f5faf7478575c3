//! Unified login check flow: seed the mock server when configured, then
//! check the login endpoint.

use std::time::Instant;

use chrono::Utc;
use reqwest::Client;
use tracing::info;

use crate::config::GlobalConfig;
use crate::login::LoginChecker;
use crate::mock::MockSeeder;
use crate::models::expectation::MockExpectation;
use crate::models::report::CheckReport;
use crate::{AppError, Result};

/// Per-run switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Seed the mock expectation before checking, when `[mock]` is configured.
    pub seed: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { seed: true }
    }
}

/// Seeder and checker sharing a single HTTP client.
#[derive(Debug, Clone)]
pub struct Runner {
    seeder: MockSeeder,
    checker: LoginChecker,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl Runner {
    /// Runner sending every request through `client`.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            seeder: MockSeeder::new(client.clone()),
            checker: LoginChecker::new(client),
        }
    }

    /// Run the full sequence and summarize the outcome.
    ///
    /// The first failure aborts the sequence.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for unusable configuration,
    /// `AppError::Seed` if seeding fails, or `AppError::Login` if the
    /// login check fails.
    pub async fn run(&self, config: &GlobalConfig, options: RunOptions) -> Result<CheckReport> {
        let creds = config.credentials()?;
        let endpoint = config.login_endpoint()?;

        let seeded = if options.seed && config.mock.is_some() {
            self.seed(config).await?;
            true
        } else {
            false
        };

        let checked_at = Utc::now();
        let started = Instant::now();
        let response = self.checker.check(&creds, &endpoint).await?;
        let report = CheckReport::new(
            endpoint.as_str(),
            seeded,
            &response,
            checked_at,
            started.elapsed(),
        );
        info!(endpoint = %report.endpoint, elapsed_ms = report.elapsed_ms, "login check passed");
        Ok(report)
    }

    /// Seed the configured mock server with the login expectation.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `[mock]` is absent or invalid, or
    /// `AppError::Seed` if the expectation cannot be delivered.
    pub async fn seed(&self, config: &GlobalConfig) -> Result<MockExpectation> {
        let mock = config
            .mock
            .as_ref()
            .ok_or_else(|| AppError::Config("no [mock] section configured".into()))?;
        let expectation = build_expectation(config)?;
        self.seeder
            .seed(&expectation, &mock.admin_endpoint()?)
            .await?;
        Ok(expectation)
    }
}

/// Expectation matching the configured login request.
///
/// # Errors
///
/// Returns `AppError::Config` if `[mock]` is absent or the configuration is
/// unusable, or `AppError::Seed` if a body cannot be encoded.
pub fn build_expectation(config: &GlobalConfig) -> Result<MockExpectation> {
    let mock = config
        .mock
        .as_ref()
        .ok_or_else(|| AppError::Config("no [mock] section configured".into()))?;
    let creds = config.credentials()?;
    let endpoint = config.login_endpoint()?;
    MockExpectation::for_login(&creds, endpoint.path(), &mock.canned_login())
        .map_err(AppError::from)
}
