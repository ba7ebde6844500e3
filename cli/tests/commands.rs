//! Integration tests for the bondkey CLI commands
//!
//! Commands are driven through the library with a deployment written to a
//! temporary file, the same way `main` loads it from `--config`.
//!
//! Test coverage:
//! - Unit pricing in human and JSON output
//! - Price tables over a stepped range
//! - Buy and sell quotes relative to the pre-minted supply
//! - Scenario replay from a file with a fallback deployment
//! - JSON envelope keeps amounts above `u64::MAX` exact

use bondkey_cli::commands::quote::QuoteRequest;
use bondkey_cli::commands::table::TableRequest;
use bondkey_cli::utils::formatting::success_envelope;
use bondkey_cli::{
    execute_fees, execute_price, execute_quote, execute_simulate, execute_table,
    BondkeyCliConfig, OutputFormat,
};
use bondkey_sdk::{DeploymentConfig, FeeSchedule};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const DEPLOYMENT: &str = r#"{
    "ledger": {
        "name": "Bond Keys",
        "symbol": "BKEY",
        "creator": "0x1111111111111111111111111111111111111111",
        "creator_fee_bps": 700,
        "admin": "0x2222222222222222222222222222222222222222",
        "admin_fee_bps": 300
    },
    "curve": {
        "kind": "sigmoid",
        "base_price": 1000000,
        "linear_slope": 100000,
        "inflection_price": 845000000,
        "inflection_point": 2000
    }
}"#;

fn cli_config() -> BondkeyCliConfig {
    BondkeyCliConfig {
        default_config_path: None,
        default_output_format: "human".to_string(),
        asset_decimals: 6,
    }
}

fn deployment() -> (TempDir, DeploymentConfig) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deployment.json");
    fs::write(&path, DEPLOYMENT).unwrap();
    let deployment = cli_config().load_deployment(Some(&path)).unwrap();
    (dir, deployment)
}

fn json(output: &str) -> Value {
    serde_json::from_str(output).unwrap()
}

/// Test pricing the first curve unit as JSON
#[test]
fn test_price_json() {
    let (_dir, deployment) = deployment();

    let output = execute_price(&deployment, 1, OutputFormat::Json, &cli_config()).unwrap();
    let row = json(&output);

    assert_eq!(row["unit"], 1);
    assert_eq!(row["price"], 1_100_211);
    assert_eq!(row["creator_fee"], 77_014);
    assert_eq!(row["admin_fee"], 33_006);
    assert_eq!(row["total"], 1_210_231);
}

/// Test pricing in human output uses the display decimals
#[test]
fn test_price_human() {
    let (_dir, deployment) = deployment();

    let output = execute_price(&deployment, 100, OutputFormat::Human, &cli_config()).unwrap();

    assert!(output.starts_with("Unit 100"));
    assert!(output.contains("13.110000"));
}

/// Test a stepped table includes both ends of the range
#[test]
fn test_table_rows() {
    let (_dir, deployment) = deployment();
    let request = TableRequest {
        from: 1,
        to: 21,
        step: 10,
    };

    let output = execute_table(&deployment, request, OutputFormat::Json, &cli_config()).unwrap();
    let rows = json(&output);
    let units: Vec<u64> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["unit"].as_u64().unwrap())
        .collect();

    assert_eq!(units, vec![1, 11, 21]);
}

/// Test a zero step is rejected
#[test]
fn test_table_rejects_zero_step() {
    let (_dir, deployment) = deployment();
    let request = TableRequest {
        from: 1,
        to: 10,
        step: 0,
    };

    assert!(execute_table(&deployment, request, OutputFormat::Json, &cli_config()).is_err());
}

/// Test the first buy after launch prices curve position one
#[test]
fn test_quote_first_buy() {
    let (_dir, deployment) = deployment();
    let request = QuoteRequest {
        supply: 1,
        count: 1,
        sell: false,
    };

    let output = execute_quote(&deployment, request, OutputFormat::Json, &cli_config()).unwrap();
    let quote = json(&output);

    assert_eq!(quote["side"], "buy");
    assert_eq!(quote["quote"]["price"], 1_100_211);
    assert_eq!(quote["settled"], 1_210_231);
}

/// Test selling the only curve unit returns its price net of fees
#[test]
fn test_quote_sell_back() {
    let (_dir, deployment) = deployment();
    let request = QuoteRequest {
        supply: 2,
        count: 1,
        sell: true,
    };

    let output = execute_quote(&deployment, request, OutputFormat::Json, &cli_config()).unwrap();
    let quote = json(&output);

    assert_eq!(quote["side"], "sell");
    assert_eq!(quote["settled"], 990_191);
}

/// Test quotes below or across the pre-minted floor fail
#[test]
fn test_quote_respects_floor() {
    let (_dir, deployment) = deployment();

    let below = QuoteRequest {
        supply: 0,
        count: 1,
        sell: false,
    };
    assert!(execute_quote(&deployment, below, OutputFormat::Json, &cli_config()).is_err());

    let across = QuoteRequest {
        supply: 1,
        count: 1,
        sell: true,
    };
    assert!(execute_quote(&deployment, across, OutputFormat::Json, &cli_config()).is_err());
}

fn write_scenario(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("scenario.json");
    fs::write(
        &path,
        r#"{
            "start_time": 1704067200,
            "steps": [
                { "action": "fund", "account": "0xa1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1", "amount": 10000000 },
                { "action": "approve", "account": "0xa1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1", "amount": 10000000 },
                { "action": "buy", "caller": "0xa1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1" },
                { "action": "sell", "caller": "0xa1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1", "token_id": 1 }
            ]
        }"#,
    )
    .unwrap();
    path
}

/// Test replaying a scenario against the fallback deployment
#[test]
fn test_simulate_with_fallback_deployment() {
    let (dir, deployment) = deployment();
    let scenario = write_scenario(dir.path());

    let output = execute_simulate(
        &scenario,
        Some(&deployment),
        OutputFormat::Json,
        &cli_config(),
    )
    .unwrap();
    let report = json(&output);

    assert_eq!(report["total_supply"], 2);
    assert_eq!(report["last_id"], 2);
    assert_eq!(report["steps"][2]["success"], true);
    // Alice bought unit 2; unit 1 is the creator's
    assert_eq!(report["steps"][3]["success"], false);
}

/// Test a scenario without any deployment is an error
#[test]
fn test_simulate_without_deployment() {
    let dir = tempdir().unwrap();
    let scenario = write_scenario(dir.path());

    assert!(execute_simulate(&scenario, None, OutputFormat::Human, &cli_config()).is_err());
}

/// Test a fee split above `u64::MAX` survives the JSON envelope digit for digit
#[test]
fn test_fees_json_keeps_large_amounts() {
    let fees = FeeSchedule::new(700, 300).unwrap();

    let output = execute_fees(
        fees,
        100_000_000_000_000_000_003,
        OutputFormat::Json,
        &cli_config(),
    )
    .unwrap();
    let envelope = success_envelope(&output).unwrap();

    assert!(envelope.contains("\"price\": 100000000000000000003"));
    assert!(envelope.contains("\"creator_fee\": 7000000000000000000"));
    assert!(envelope.contains("\"admin_fee\": 3000000000000000000"));
    assert!(envelope.contains("\"buyer_pays\": 110000000000000000003"));
    assert!(envelope.contains("\"seller_receives\": 90000000000000000003"));
    assert!(!envelope.contains("e+"));
}
