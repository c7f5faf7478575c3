//! Domain model module declarations.

pub mod credentials;
pub mod expectation;
pub mod login;
pub mod report;
