//! Scenario simulation command implementation

use crate::commands::OutputFormat;
use crate::config::BondkeyCliConfig;
use crate::utils::formatting::{format_report_human, to_json};
use anyhow::{anyhow, Result};
use bondkey_sdk::{run_scenario, DeploymentConfig, Scenario};
use std::path::Path;
use tracing::info;

/// Execute the simulate command
///
/// The scenario's own deployment wins over `deployment`.
///
/// # Errors
/// Returns error if the scenario cannot be read or no deployment is available.
/// Failing steps are part of the report, not errors.
pub fn execute(
    scenario_path: &Path,
    deployment: Option<&DeploymentConfig>,
    output_format: OutputFormat,
    config: &BondkeyCliConfig,
) -> Result<String> {
    info!("Loading scenario from {}", scenario_path.display());

    let scenario = Scenario::load(scenario_path)
        .map_err(|e| anyhow!("Failed to load scenario {}: {e}", scenario_path.display()))?;
    let report = run_scenario(&scenario, deployment)?;

    info!(
        "Scenario finished with {} of {} steps failed",
        report.failures(),
        report.steps.len()
    );

    match output_format {
        OutputFormat::Human => Ok(format_report_human(&report, config)),
        OutputFormat::Json => to_json(&report),
    }
}
