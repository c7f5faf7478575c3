#![forbid(unsafe_code)]

//! `login-contract` — checks a login endpoint against its response contract.
//!
//! Loads configuration, optionally seeds a mock server expectation, then
//! issues one login request and validates the reply.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use login_contract::config::GlobalConfig;
use login_contract::runner::{build_expectation, RunOptions, Runner};
use login_contract::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "login-contract", about = "HTTP login contract checker", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: PathBuf,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Seed the mock server when configured, then check the login endpoint.
    Check {
        /// Do not seed the mock server even when `[mock]` is configured.
        #[arg(long)]
        skip_seed: bool,

        /// Report format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Seed the mock server expectation only.
    Seed,

    /// Print the mock expectation JSON without sending it.
    Expectation,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
        .inspect_err(|err| error!(%err, "login-contract failed"))
}

async fn run(args: Cli) -> Result<()> {
    let mut config = GlobalConfig::load_from_path(&args.config)?;
    config.load_credentials().await?;
    info!(login_url = %config.login_url, mock = config.mock.is_some(), "configuration loaded");

    let runner = Runner::default();
    let command = args.command.unwrap_or(Command::Check {
        skip_seed: false,
        output: OutputFormat::Text,
    });

    match command {
        Command::Check { skip_seed, output } => {
            let report = runner.run(&config, RunOptions { seed: !skip_seed }).await?;
            match output {
                OutputFormat::Text => println!("{}", report.summary()),
                OutputFormat::Json => println!("{}", to_json(&report)?),
            }
        }
        Command::Seed => {
            runner.seed(&config).await?;
            println!("mock expectation seeded");
        }
        Command::Expectation => {
            println!("{}", to_json(&build_expectation(&config)?)?);
        }
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Io(format!("failed to encode output: {err}")))
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter).with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
