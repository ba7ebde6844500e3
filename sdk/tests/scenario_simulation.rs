//! Integration tests for deployment loading and scenario simulation
//!
//! This test suite drives the SDK the way the CLI does: files on disk in, a
//! report out.
//!
//! Test coverage:
//! - Deployment config files resolved from an explicit path
//! - Self-contained scenario files with an embedded deployment
//! - Referrer deployments and the two-unit supply floor
//! - Holding-period rejections and recovery after time advances
//! - Report serialization for JSON output

use bondkey_protocol::{Address, LedgerEvent};
use bondkey_sdk::{run_scenario, DeploymentConfig, Scenario};
use std::fs;
use tempfile::tempdir;

const CREATOR: &str = "0x1111111111111111111111111111111111111111";
const ADMIN: &str = "0x2222222222222222222222222222222222222222";
const REFERRER: &str = "0x3333333333333333333333333333333333333333";
const ALICE: &str = "0xa1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1";

fn deployment_json(referrer: Option<&str>, min_holding_secs: u64) -> String {
    let referrer = referrer.map_or_else(|| "null".to_string(), |r| format!("\"{r}\""));
    format!(
        r#"{{
            "ledger": {{
                "name": "Bond Keys",
                "symbol": "BKEY",
                "creator": "{CREATOR}",
                "creator_fee_bps": 700,
                "admin": "{ADMIN}",
                "admin_fee_bps": 300,
                "referrer": {referrer},
                "min_holding_secs": {min_holding_secs}
            }},
            "curve": {{
                "kind": "sigmoid",
                "base_price": 1000000,
                "linear_slope": 100000,
                "inflection_price": 845000000,
                "inflection_point": 2000
            }}
        }}"#
    )
}

/// Test resolving a config from an explicit path
#[test]
fn test_resolve_explicit_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deployment.json");
    fs::write(&path, deployment_json(None, 0)).unwrap();

    let config = DeploymentConfig::resolve(Some(&path)).unwrap();

    assert_eq!(config.ledger.creator, CREATOR.parse::<Address>().unwrap());
    assert_eq!(config.ledger.creator_fee_bps, 700);
}

/// Test a scenario file with an embedded deployment and a referrer
#[test]
fn test_referrer_floor_scenario() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scenario.json");
    let scenario = format!(
        r#"{{
            "deployment": {deployment},
            "start_time": 1704067200,
            "steps": [
                {{ "action": "fund", "account": "{ALICE}", "amount": 10000000 }},
                {{ "action": "buy", "caller": "{ALICE}" }},
                {{ "action": "sell", "caller": "{ALICE}", "token_id": 3 }},
                {{ "action": "sell", "caller": "{REFERRER}", "token_id": 2 }}
            ]
        }}"#,
        deployment = deployment_json(Some(REFERRER), 0)
    );
    fs::write(&path, scenario).unwrap();

    let report = run_scenario(&Scenario::load(&path).unwrap(), None).unwrap();

    assert_eq!(report.steps[1].token_ids, vec![3]);
    assert!(report.steps[2].success);
    assert!(!report.steps[3].success, "referrer unit sits on the floor");
    assert!(report.steps[3]
        .error
        .as_deref()
        .is_some_and(|error| error.contains("supply floor of 2")));
    assert_eq!(report.total_supply, 2);
}

/// Test that holding-period rejections clear once time advances
#[test]
fn test_holding_period_scenario() {
    let config = DeploymentConfig::from_json(&deployment_json(None, 86_400)).unwrap();
    let scenario = Scenario::from_json(&format!(
        r#"{{
            "steps": [
                {{ "action": "fund", "account": "{ALICE}", "amount": 10000000 }},
                {{ "action": "buy", "caller": "{ALICE}" }},
                {{ "action": "sell", "caller": "{ALICE}", "token_id": 2 }},
                {{ "action": "advance_time", "secs": 86400 }},
                {{ "action": "sell", "caller": "{ALICE}", "token_id": 2 }}
            ]
        }}"#
    ))
    .unwrap();

    let report = run_scenario(&scenario, Some(&config)).unwrap();

    assert!(!report.steps[2].success);
    assert!(report.steps[4].success);
    assert_eq!(report.failures(), 1);

    let sold = report
        .events
        .iter()
        .filter(|event| matches!(event, LedgerEvent::UnitSold(_)))
        .count();
    assert_eq!(sold, 1);
}

/// Test that reports serialize with the event tags and string addresses
#[test]
fn test_report_serializes() {
    let config = DeploymentConfig::from_json(&deployment_json(None, 0)).unwrap();
    let scenario = Scenario::from_json(&format!(
        r#"{{ "steps": [ {{ "action": "pause", "caller": "{ADMIN}", "paused": true }} ] }}"#
    ))
    .unwrap();

    let report = run_scenario(&scenario, Some(&config)).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["paused"], true);
    assert_eq!(json["events"][0]["type"], "ledger_initialized");
    assert_eq!(json["events"][1]["type"], "pause_toggled");
    assert_eq!(json["events"][1]["caller"], ADMIN);
}
