//! Output formatting utilities for the bondkey CLI

use crate::config::BondkeyCliConfig;
use anyhow::Result;
use bondkey_protocol::{LedgerEvent, Quote};
use bondkey_sdk::format::format_timestamp;
use bondkey_sdk::quote::FeeSchedule;
use bondkey_sdk::{PriceRow, SimulationReport};
use serde::Serialize;
use serde_json::value::RawValue;

/// Pretty JSON for any serializable command result
///
/// # Errors
///
/// Returns an error if JSON serialization fails
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[derive(Serialize)]
struct SuccessEnvelope<'a> {
    success: bool,
    data: &'a RawValue,
}

/// Wrap a command's JSON output as `{ "success": true, "data": ... }`
///
/// The output is embedded verbatim, so amounts above `u64::MAX` keep every
/// digit.
///
/// # Errors
///
/// Returns an error if `output` is not valid JSON
pub fn success_envelope(output: &str) -> Result<String> {
    let data = RawValue::from_string(output.to_string())?;
    Ok(serde_json::to_string_pretty(&SuccessEnvelope {
        success: true,
        data: &data,
    })?)
}

/// Format a single priced unit for human-readable output
#[must_use]
pub fn format_price_human(
    row: &PriceRow,
    fees: FeeSchedule,
    config: &BondkeyCliConfig,
) -> String {
    format!(
        "Unit {}\n  Price:       {}\n  Creator fee: {} ({})\n  Admin fee:   {} ({})\n  Total:       {}",
        row.unit,
        config.format_amount(row.price),
        config.format_amount(row.creator_fee),
        config.format_fee_percentage(fees.creator_fee_bps),
        config.format_amount(row.admin_fee),
        config.format_fee_percentage(fees.admin_fee_bps),
        config.format_amount(row.total),
    )
}

/// Format a price table for human-readable output
#[must_use]
pub fn format_table_human(rows: &[PriceRow], config: &BondkeyCliConfig) -> String {
    if rows.is_empty() {
        return "No units in range".to_string();
    }

    let mut output = format!(
        "{:<10} {:>20} {:>20} {:>20} {:>20}\n",
        "Unit", "Price", "Creator fee", "Admin fee", "Total"
    );
    output.push_str(&"-".repeat(94));
    output.push('\n');

    for row in rows {
        output.push_str(&format!(
            "{:<10} {:>20} {:>20} {:>20} {:>20}\n",
            row.unit,
            config.format_amount(row.price),
            config.format_amount(row.creator_fee),
            config.format_amount(row.admin_fee),
            config.format_amount(row.total),
        ));
    }

    output.push_str(&format!("\nRows: {}", rows.len()));
    output
}

/// Format a fee split or batch quote for human-readable output
#[must_use]
pub fn format_quote_human(
    title: &str,
    quote: &Quote,
    settled: u128,
    config: &BondkeyCliConfig,
) -> String {
    format!(
        "{title}\n  Price:       {}\n  Creator fee: {}\n  Admin fee:   {}\n  Settled:     {}",
        config.format_amount(quote.price),
        config.format_amount(quote.creator_fee),
        config.format_amount(quote.admin_fee),
        config.format_amount(settled),
    )
}

fn describe_event(event: &LedgerEvent, config: &BondkeyCliConfig) -> String {
    match event {
        LedgerEvent::LedgerInitialized(init) => format!(
            "initialized: creator {} admin {} pre-minted {} at {}",
            init.creator,
            init.admin,
            init.pre_minted,
            format_timestamp(init.timestamp)
        ),
        LedgerEvent::UnitBought(bought) => format!(
            "bought: unit {} by {} for {} (fees {} / {})",
            bought.token_id,
            bought.receiver,
            config.format_amount(bought.price),
            config.format_amount(bought.creator_fee),
            config.format_amount(bought.admin_fee)
        ),
        LedgerEvent::UnitSold(sold) => format!(
            "sold: unit {} by {} for {} (fees {} / {})",
            sold.token_id,
            sold.seller,
            config.format_amount(sold.price),
            config.format_amount(sold.creator_fee),
            config.format_amount(sold.admin_fee)
        ),
        LedgerEvent::PauseToggled(toggled) => {
            format!("pause: {} -> {} by {}", toggled.old, toggled.new, toggled.caller)
        }
        LedgerEvent::CreatorUpdated(updated) => {
            format!("creator: {} -> {}", updated.old, updated.new)
        }
        LedgerEvent::AdminUpdated(updated) => format!("admin: {} -> {}", updated.old, updated.new),
    }
}

/// Format a simulation report for human-readable output
#[must_use]
pub fn format_report_human(report: &SimulationReport, config: &BondkeyCliConfig) -> String {
    let mut output = String::from("Steps\n");
    for step in &report.steps {
        let status = if step.success { "ok" } else { "FAILED" };
        output.push_str(&format!("  {:>3}. {:<15} {:<7}", step.index, step.action, status));
        if !step.token_ids.is_empty() {
            output.push_str(&format!(" units {:?}", step.token_ids));
        }
        if let Some(settled) = step.settled {
            output.push_str(&format!(" settled {}", config.format_amount(settled)));
        }
        if let Some(error) = &step.error {
            output.push_str(&format!(" {error}"));
        }
        output.push('\n');
    }

    output.push_str("\nEvents\n");
    for event in &report.events {
        output.push_str(&format!("  {}\n", describe_event(event, config)));
    }

    output.push_str("\nBalances\n");
    for row in &report.balances {
        output.push_str(&format!(
            "  {} {:>20}\n",
            row.account,
            config.format_amount(row.balance)
        ));
    }

    output.push_str(&format!(
        "\nTotal supply: {}  Last id: {}  Paused: {}  Clock: {}\nFailed steps: {}",
        report.total_supply,
        report.last_id,
        if report.paused { "Yes" } else { "No" },
        format_timestamp(report.finished_at),
        report.failures()
    ));
    output
}
