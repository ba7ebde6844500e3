//! Bondkey CLI - pricing, quoting and scenario replay for bondkey deployments
//!
//! The binary in `main.rs` is a thin clap front end over these modules.

#![forbid(unsafe_code)]

pub mod commands;
pub mod config;
pub mod utils;

pub use commands::*;
pub use config::*;
