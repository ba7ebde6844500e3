//! Bondkey SDK - tooling around the bonding-curve issuance ledger
//!
//! This crate provides utilities for:
//!
//! - Loading and validating deployment configs from JSON files or `BONDKEY_CONFIG`
//! - Building ledgers on the in-memory registry and payment asset
//! - Quoting prices and batch costs straight from a curve
//! - Replaying scripted scenarios and reporting the final state
//! - Rendering fixed-point amounts and fee rates
//!
//! # Example Usage
//!
//! ```no_run
//! use bondkey_sdk::{cost_to_buy, DeploymentConfig, FeeSchedule};
//! use std::path::Path;
//!
//! # fn main() -> bondkey_sdk::Result<()> {
//! let config = DeploymentConfig::load(Path::new("deployment.json"))?;
//! let curve = config.curve.build()?;
//!
//! // Cost of the first ten units after launch
//! let quote = cost_to_buy(&curve, FeeSchedule::from_args(&config.ledger), 0, 10)?;
//! println!("{}", bondkey_sdk::format::format_amount(quote.total_cost()?, 6));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod format;
pub mod quote;
pub mod simulator;
pub mod validation;

// Re-export commonly used items
pub use config::{DeploymentConfig, CONFIG_ENV_VAR, DEFAULT_CUSTODY};
pub use error::{Result, SdkError};
pub use quote::{cost_to_buy, price_table, proceeds_of_selling, FeeSchedule, PriceRow};
pub use simulator::{run_scenario, Action, Scenario, SimulationReport, StepOutcome};
pub use validation::validate_deployment_config;
