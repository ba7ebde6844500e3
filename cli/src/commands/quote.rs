//! Quote command implementation

use crate::commands::OutputFormat;
use crate::config::BondkeyCliConfig;
use crate::utils::formatting::{format_quote_human, to_json};
use anyhow::{anyhow, Result};
use bondkey_protocol::constants::{CREATOR_PRE_MINT, REFERRER_PRE_MINT};
use bondkey_protocol::Quote;
use bondkey_sdk::{cost_to_buy, proceeds_of_selling, DeploymentConfig, FeeSchedule};
use serde::Serialize;
use tracing::info;

/// Batch to quote against a given supply
#[derive(Debug, Clone, Copy)]
pub struct QuoteRequest {
    /// Current total supply, pre-minted units included
    pub supply: u64,
    pub count: u64,
    /// Quote redemption proceeds instead of purchase cost
    pub sell: bool,
}

#[derive(Serialize)]
struct QuoteOutput {
    side: &'static str,
    supply: u64,
    count: u64,
    quote: Quote,
    settled: u128,
}

fn pre_mint_offset(deployment: &DeploymentConfig) -> Result<u64> {
    if deployment.ledger.referrer.is_some() {
        CREATOR_PRE_MINT
            .checked_add(REFERRER_PRE_MINT)
            .ok_or_else(|| anyhow!("Pre-mint count overflows"))
    } else {
        Ok(CREATOR_PRE_MINT)
    }
}

/// Execute the quote command
///
/// # Errors
/// Returns error if `supply` is below the pre-minted units, a sale would cross
/// the supply floor, or a price overflows
pub fn execute(
    deployment: &DeploymentConfig,
    request: QuoteRequest,
    output_format: OutputFormat,
    config: &BondkeyCliConfig,
) -> Result<String> {
    let offset = pre_mint_offset(deployment)?;
    let sold = request.supply.checked_sub(offset).ok_or_else(|| {
        anyhow!(
            "Supply {} is below the {offset} pre-minted units of this deployment",
            request.supply
        )
    })?;
    info!(
        "Quoting {} units at supply {} ({} sold from the curve)",
        request.count, request.supply, sold
    );

    let curve = deployment.curve.build()?;
    let fees = FeeSchedule::from_args(&deployment.ledger);
    let (side, quote, settled) = if request.sell {
        let quote = proceeds_of_selling(&curve, fees, sold, request.count)?;
        ("sell", quote, quote.net_proceeds()?)
    } else {
        let quote = cost_to_buy(&curve, fees, sold, request.count)?;
        ("buy", quote, quote.total_cost()?)
    };

    match output_format {
        OutputFormat::Human => {
            let title = format!(
                "{} {} units at supply {}",
                if request.sell { "Sell" } else { "Buy" },
                request.count,
                request.supply
            );
            Ok(format_quote_human(&title, &quote, settled, config))
        }
        OutputFormat::Json => to_json(&QuoteOutput {
            side,
            supply: request.supply,
            count: request.count,
            quote,
            settled,
        }),
    }
}
