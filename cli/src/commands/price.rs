//! Price command implementation

use crate::commands::OutputFormat;
use crate::config::BondkeyCliConfig;
use crate::utils::formatting::{format_price_human, to_json};
use anyhow::Result;
use bondkey_sdk::{price_table, DeploymentConfig, FeeSchedule};
use tracing::info;

/// Execute the price command
///
/// # Errors
/// Returns error if the curve cannot be built or the price overflows
pub fn execute(
    deployment: &DeploymentConfig,
    unit: u64,
    output_format: OutputFormat,
    config: &BondkeyCliConfig,
) -> Result<String> {
    info!("Pricing unit {}", unit);

    let curve = deployment.curve.build()?;
    let fees = FeeSchedule::from_args(&deployment.ledger);
    let rows = price_table(&curve, fees, unit, unit, 1)?;
    let row = rows
        .first()
        .ok_or_else(|| anyhow::anyhow!("No price computed for unit {unit}"))?;

    match output_format {
        OutputFormat::Human => Ok(format_price_human(row, fees, config)),
        OutputFormat::Json => to_json(row),
    }
}
