//! Deployment configuration
//!
//! A deployment is the full set of construction inputs for one ledger: the
//! roles and fee rates, the curve, and the custody account that holds
//! principal. It is kept as JSON so the same file drives the CLI, the simulator
//! and tests.
//!
//! ```json
//! {
//!   "ledger": {
//!     "name": "Bond Keys",
//!     "symbol": "BKEY",
//!     "creator": "0x1111111111111111111111111111111111111111",
//!     "creator_fee_bps": 700,
//!     "admin": "0x2222222222222222222222222222222222222222",
//!     "admin_fee_bps": 300
//!   },
//!   "curve": {
//!     "kind": "sigmoid",
//!     "base_price": 1000000,
//!     "linear_slope": 100000,
//!     "inflection_price": 845000000,
//!     "inflection_point": 2000
//!   }
//! }
//! ```

use bondkey_protocol::{
    Address, Clock, ConfiguredCurve, CurveConfig, InMemoryAsset, InMemoryLedger,
    InMemoryRegistry, InitLedgerArgs, IssuanceLedger,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Result, SdkError};
use crate::validation::validate_deployment_config;

/// Environment variable naming the deployment config file
pub const CONFIG_ENV_VAR: &str = "BONDKEY_CONFIG";

/// Custody account used when a config does not name one
pub const DEFAULT_CUSTODY: Address = Address::repeat_byte(0xcc);

const fn default_custody() -> Address {
    DEFAULT_CUSTODY
}

/// Construction inputs of one ledger deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Roles, fee rates and toggles
    pub ledger: InitLedgerArgs,
    /// Pricing curve selection
    pub curve: CurveConfig,
    /// Account that holds principal and funds redemptions
    #[serde(default = "default_custody")]
    pub custody: Address,
}

impl DeploymentConfig {
    /// Parses a config from JSON text without validating it
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Renders the config as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads and validates a config file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not a valid config, or
    /// fails [`validate_deployment_config`].
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading deployment config");
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        validate_deployment_config(&config)?;
        info!(
            path = %path.display(),
            creator = %config.ledger.creator,
            "deployment config loaded"
        );
        Ok(config)
    }

    /// Loads the config named by `BONDKEY_CONFIG`
    pub fn load_from_env() -> Result<Self> {
        let path = env::var(CONFIG_ENV_VAR).map_err(|_| {
            SdkError::InvalidConfig(format!("{CONFIG_ENV_VAR} is not set"))
        })?;
        Self::load(Path::new(&path))
    }

    /// Loads from `explicit` when given, otherwise from `BONDKEY_CONFIG`
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        explicit.map_or_else(Self::load_from_env, Self::load)
    }

    /// Path a config would be loaded from, without reading it
    #[must_use]
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from))
    }

    /// Builds a ledger backed by the in-memory registry and payment asset
    ///
    /// # Errors
    /// Returns an error if validation fails or the ledger rejects the
    /// construction arguments.
    pub fn build_in_memory<K: Clock>(&self, clock: K) -> Result<InMemoryLedger<ConfiguredCurve, K>> {
        validate_deployment_config(self)?;
        let curve = self.curve.build()?;
        let ledger = IssuanceLedger::new(
            self.ledger.clone(),
            curve,
            InMemoryRegistry::new(),
            InMemoryAsset::new(self.custody),
            clock,
        )?;
        Ok(ledger)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use bondkey_protocol::{CurveParams, ManualClock, PricingCurve};
    use std::io::Write;
    use tempfile::NamedTempFile;

    pub(crate) const CREATOR: Address = Address::repeat_byte(0x11);
    pub(crate) const ADMIN: Address = Address::repeat_byte(0x22);

    pub(crate) fn sample_config() -> DeploymentConfig {
        DeploymentConfig {
            ledger: InitLedgerArgs {
                name: "Bond Keys".to_string(),
                symbol: "BKEY".to_string(),
                uri: String::new(),
                creator: CREATOR,
                creator_fee_bps: 700,
                creator_royalty_bps: 500,
                admin: ADMIN,
                admin_fee_bps: 300,
                referrer: None,
                min_holding_secs: 0,
            },
            curve: CurveConfig::Sigmoid(CurveParams {
                base_price: 1_000_000,
                linear_slope: 100_000,
                inflection_price: 845_000_000,
                inflection_point: 2_000,
            }),
            custody: DEFAULT_CUSTODY,
        }
    }

    #[test]
    fn test_parse_documented_example() {
        let json = r#"{
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

        let config = DeploymentConfig::from_json(json).unwrap();
        assert_eq!(config.ledger.creator, CREATOR);
        assert_eq!(config.custody, DEFAULT_CUSTODY);
        assert_eq!(config.curve.build().unwrap().price_for_unit(1).unwrap(), 1_100_211);
    }

    #[test]
    fn test_load_round_trips_through_file() {
        let config = sample_config();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(config.to_json_pretty().unwrap().as_bytes())
            .unwrap();

        let loaded = DeploymentConfig::load(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_fee() {
        let mut config = sample_config();
        config.ledger.admin_fee_bps = 3_000;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(config.to_json_pretty().unwrap().as_bytes())
            .unwrap();

        let result = DeploymentConfig::load(file.path());
        assert!(matches!(result, Err(SdkError::Ledger(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = DeploymentConfig::load(Path::new("/nonexistent/bondkey.json"));
        assert!(matches!(result, Err(SdkError::Io(_))));
    }

    #[test]
    fn test_build_in_memory() {
        let ledger = sample_config()
            .build_in_memory(ManualClock::new(1_700_000_000))
            .unwrap();

        assert_eq!(ledger.owner_of(1), Some(CREATOR));
        assert_eq!(ledger.state().custody, DEFAULT_CUSTODY);
        assert_eq!(ledger.price_to_buy_next().unwrap().price, 1_100_211);
    }
}
