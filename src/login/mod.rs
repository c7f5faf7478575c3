//! Login contract checking.

pub mod checker;

pub use checker::LoginChecker;
