#![forbid(unsafe_code)]

//! HTTP login contract checking with optional mock server seeding.

pub mod config;
pub mod errors;
pub mod login;
pub mod mock;
pub mod models;
pub mod runner;

pub use config::GlobalConfig;
pub use errors::{AppError, LoginError, Result, SeedError};
