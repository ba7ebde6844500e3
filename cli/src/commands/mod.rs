//! Command implementations for the bondkey CLI
//!
//! Each command lives in its own file and returns its rendered output; `main`
//! decides how to print it.

pub mod fees;
pub mod price;
pub mod quote;
pub mod simulate;
pub mod table;

use clap::ValueEnum;

// Re-export command execution functions for easy access
pub use fees::execute as execute_fees;
pub use price::execute as execute_price;
pub use quote::execute as execute_quote;
pub use simulate::execute as execute_simulate;
pub use table::execute as execute_table;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}
