//! Price table command implementation

use crate::commands::OutputFormat;
use crate::config::BondkeyCliConfig;
use crate::utils::formatting::{format_table_human, to_json};
use anyhow::Result;
use bondkey_sdk::{price_table, DeploymentConfig, FeeSchedule};
use tracing::info;

/// Range of curve positions to tabulate
#[derive(Debug, Clone, Copy)]
pub struct TableRequest {
    pub from: u64,
    pub to: u64,
    pub step: u64,
}

/// Execute the table command
///
/// # Errors
/// Returns error if the range is invalid or a price overflows
pub fn execute(
    deployment: &DeploymentConfig,
    request: TableRequest,
    output_format: OutputFormat,
    config: &BondkeyCliConfig,
) -> Result<String> {
    info!(
        "Building price table for units {}..={} step {}",
        request.from, request.to, request.step
    );

    let curve = deployment.curve.build()?;
    let fees = FeeSchedule::from_args(&deployment.ledger);
    let rows = price_table(&curve, fees, request.from, request.to, request.step)?;

    match output_format {
        OutputFormat::Human => Ok(format_table_human(&rows, config)),
        OutputFormat::Json => to_json(&rows),
    }
}
