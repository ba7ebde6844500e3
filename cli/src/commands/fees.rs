//! Fee split command implementation

use crate::commands::OutputFormat;
use crate::config::BondkeyCliConfig;
use crate::utils::formatting::{format_quote_human, to_json};
use anyhow::{anyhow, Result};
use bondkey_sdk::{DeploymentConfig, FeeSchedule};
use serde::Serialize;
use tracing::info;

/// Fee rates to split a price with
#[derive(Debug, Clone, Copy, Default)]
pub struct FeeOverrides {
    pub creator_fee_bps: Option<u16>,
    pub admin_fee_bps: Option<u16>,
}

#[derive(Serialize)]
struct FeeSplit {
    price: u128,
    creator_fee_bps: u16,
    creator_fee: u128,
    admin_fee_bps: u16,
    admin_fee: u128,
    buyer_pays: u128,
    seller_receives: u128,
}

/// Resolve the fee schedule from overrides, falling back to the deployment
///
/// # Errors
/// Returns error if a rate is missing from both sources or exceeds the cap
pub fn resolve_schedule(
    overrides: FeeOverrides,
    deployment: Option<&DeploymentConfig>,
) -> Result<FeeSchedule> {
    let configured = deployment.map(|d| FeeSchedule::from_args(&d.ledger));
    let creator_fee_bps = overrides
        .creator_fee_bps
        .or(configured.map(|f| f.creator_fee_bps))
        .ok_or_else(|| anyhow!("Creator fee rate required: pass --creator-fee-bps or --config"))?;
    let admin_fee_bps = overrides
        .admin_fee_bps
        .or(configured.map(|f| f.admin_fee_bps))
        .ok_or_else(|| anyhow!("Admin fee rate required: pass --admin-fee-bps or --config"))?;

    Ok(FeeSchedule::new(creator_fee_bps, admin_fee_bps)?)
}

/// Execute the fees command
///
/// # Errors
/// Returns error if the fee computation overflows
pub fn execute(
    fees: FeeSchedule,
    price: u128,
    output_format: OutputFormat,
    config: &BondkeyCliConfig,
) -> Result<String> {
    info!("Splitting price {} at {:?}", price, fees);

    let quote = fees.quote(price)?;
    let buyer_pays = quote.total_cost()?;
    let seller_receives = quote.net_proceeds()?;

    match output_format {
        OutputFormat::Human => Ok(format!(
            "{}\n  Seller receives: {}",
            format_quote_human("Fee split", &quote, buyer_pays, config),
            config.format_amount(seller_receives)
        )),
        OutputFormat::Json => to_json(&FeeSplit {
            price,
            creator_fee_bps: fees.creator_fee_bps,
            creator_fee: quote.creator_fee,
            admin_fee_bps: fees.admin_fee_bps,
            admin_fee: quote.admin_fee,
            buyer_pays,
            seller_receives,
        }),
    }
}
