//! Configuration management for the bondkey CLI
//!
//! Defaults come from environment variables with sensible fallbacks; command
//! line flags override them.

use anyhow::{anyhow, Result};
use bondkey_sdk::format::{format_amount, format_bps};
use bondkey_sdk::DeploymentConfig;
use std::env;
use std::path::{Path, PathBuf};

/// Centralized configuration for the bondkey CLI
#[derive(Debug, Clone)]
pub struct BondkeyCliConfig {
    /// Deployment config used when `--config` is not given
    pub default_config_path: Option<PathBuf>,

    /// Default output format for CLI commands
    pub default_output_format: String,

    /// Decimals of the payment asset, for display
    pub asset_decimals: u8,
}

impl BondkeyCliConfig {
    /// Create a new configuration instance with values from environment variables
    /// or sensible defaults if not set
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_config_path: env::var(bondkey_sdk::CONFIG_ENV_VAR)
                .ok()
                .map(PathBuf::from),

            default_output_format: env::var("BONDKEY_OUTPUT_FORMAT")
                .unwrap_or_else(|_| "human".to_string()),

            asset_decimals: env::var("BONDKEY_ASSET_DECIMALS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(6),
        }
    }

    /// Same configuration with the display decimals overridden
    #[must_use]
    pub fn with_decimals(mut self, decimals: Option<u8>) -> Self {
        if let Some(decimals) = decimals {
            self.asset_decimals = decimals;
        }
        self
    }

    /// Render a base-unit amount in display units
    #[must_use]
    pub fn format_amount(&self, amount: u128) -> String {
        format_amount(amount, self.asset_decimals)
    }

    /// Render fee basis points as a percentage
    #[must_use]
    pub fn format_fee_percentage(&self, fee_bps: u16) -> String {
        format_bps(fee_bps)
    }

    /// Load the deployment from `explicit`, falling back to the configured default
    ///
    /// # Errors
    /// Returns an error if no path is available or the file is not a valid
    /// deployment
    pub fn load_deployment(&self, explicit: Option<&Path>) -> Result<DeploymentConfig> {
        let path = explicit
            .or(self.default_config_path.as_deref())
            .ok_or_else(|| {
                anyhow!(
                    "No deployment config: pass --config or set {}",
                    bondkey_sdk::CONFIG_ENV_VAR
                )
            })?;

        DeploymentConfig::load(path)
            .map_err(|e| anyhow!("Failed to load deployment config {}: {e}", path.display()))
    }
}

impl Default for BondkeyCliConfig {
    fn default() -> Self {
        Self::new()
    }
}
