//! Error types for the bondkey SDK
//!
//! Engine failures are carried through unchanged so callers can still match on
//! the exact [`LedgerError`] or [`CurveError`] variant. Failures the SDK adds on
//! top, such as file loading or scenario parsing, get their own variants.

use bondkey_protocol::{CurveError, LedgerError};
use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

/// Error types that can occur when using the SDK
#[derive(Error, Debug)]
pub enum SdkError {
    /// Error raised by the issuance ledger
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Error raised while building or evaluating a curve
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Error from serde JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reading a config or scenario file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Deployment configuration is missing or inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Scenario parses but cannot be run
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
}
