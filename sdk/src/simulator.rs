//! Scenario simulation
//!
//! Replays a scripted sequence of ledger actions against an in-memory
//! deployment. A failing step is recorded with its error text and the run
//! continues, which makes scenarios useful for checking rejections as well as
//! the happy path.
//!
//! ```json
//! {
//!   "start_time": 1704067200,
//!   "steps": [
//!     { "action": "fund", "account": "0xa1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1", "amount": 100000000 },
//!     { "action": "buy", "caller": "0xa1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1" },
//!     { "action": "advance_time", "secs": 3600 },
//!     { "action": "sell", "caller": "0xa1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1", "token_id": 2 }
//!   ]
//! }
//! ```

use bondkey_protocol::{
    Address, Clock, ConfiguredCurve, InMemoryLedger, LedgerEvent, ManualClock, Receipt,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::config::DeploymentConfig;
use crate::error::{Result, SdkError};

const fn unlimited() -> u128 {
    u128::MAX
}

/// One scripted ledger action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Credit `amount` to `account` and approve custody to pull it
    Fund { account: Address, amount: u128 },
    /// Set the custody allowance of `account`
    Approve { account: Address, amount: u128 },
    Buy {
        caller: Address,
        #[serde(default)]
        to: Option<Address>,
        #[serde(default = "unlimited")]
        max_payment: u128,
    },
    BulkBuy {
        caller: Address,
        #[serde(default)]
        to: Option<Address>,
        count: u64,
        #[serde(default = "unlimited")]
        max_payment: u128,
    },
    Sell {
        caller: Address,
        token_id: u64,
        #[serde(default)]
        min_accepted: u128,
    },
    BulkSell {
        caller: Address,
        token_ids: Vec<u64>,
        #[serde(default)]
        min_accepted: u128,
    },
    Pause { caller: Address, paused: bool },
    /// Move the simulation clock forward
    AdvanceTime { secs: u64 },
    UpdateCreator { caller: Address, new_creator: Address },
    UpdateAdmin { caller: Address, new_admin: Address },
    TransferUnit {
        caller: Address,
        to: Address,
        token_id: u64,
    },
}

impl Action {
    /// Snake-case action name as it appears in scenario files
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fund { .. } => "fund",
            Self::Approve { .. } => "approve",
            Self::Buy { .. } => "buy",
            Self::BulkBuy { .. } => "bulk_buy",
            Self::Sell { .. } => "sell",
            Self::BulkSell { .. } => "bulk_sell",
            Self::Pause { .. } => "pause",
            Self::AdvanceTime { .. } => "advance_time",
            Self::UpdateCreator { .. } => "update_creator",
            Self::UpdateAdmin { .. } => "update_admin",
            Self::TransferUnit { .. } => "transfer_unit",
        }
    }
}

/// A scripted run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Deployment to run against; falls back to the caller's config when absent
    #[serde(default)]
    pub deployment: Option<DeploymentConfig>,
    /// Clock value at construction
    #[serde(default)]
    pub start_time: i64,
    pub steps: Vec<Action>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

/// What happened at one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Zero-based position in the scenario
    pub index: usize,
    pub action: String,
    pub success: bool,
    /// Error text for failed steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Units minted or burned
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub token_ids: Vec<u64>,
    /// Amount paid or received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settled: Option<u128>,
}

/// Balance of one account at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub account: Address,
    pub balance: u128,
}

/// Final state of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub steps: Vec<StepOutcome>,
    pub total_supply: u64,
    pub last_id: u64,
    pub paused: bool,
    pub finished_at: i64,
    pub balances: Vec<BalanceRow>,
    pub events: Vec<LedgerEvent>,
}

impl SimulationReport {
    /// Number of steps that failed
    #[must_use]
    pub fn failures(&self) -> usize {
        self.steps.iter().filter(|step| !step.success).count()
    }
}

/// Runs `scenario` against its own deployment, or `fallback` when it has none
///
/// # Errors
/// Returns an error if no deployment is available or the deployment cannot be
/// built. Failing steps are reported in the result, not as errors.
pub fn run_scenario(
    scenario: &Scenario,
    fallback: Option<&DeploymentConfig>,
) -> Result<SimulationReport> {
    let deployment = scenario
        .deployment
        .as_ref()
        .or(fallback)
        .ok_or_else(|| {
            SdkError::InvalidScenario(
                "scenario has no deployment and no config was provided".to_string(),
            )
        })?;

    let clock = ManualClock::new(scenario.start_time);
    let mut ledger = deployment.build_in_memory(clock.clone())?;

    info!(steps = scenario.steps.len(), "running scenario");

    let mut steps = Vec::with_capacity(scenario.steps.len());
    for (index, action) in scenario.steps.iter().enumerate() {
        let outcome = match apply(&mut ledger, &clock, action) {
            Ok(receipt) => StepOutcome {
                index,
                action: action.name().to_string(),
                success: true,
                error: None,
                settled: receipt.as_ref().map(|receipt| receipt.settled),
                token_ids: receipt.map(|receipt| receipt.token_ids).unwrap_or_default(),
            },
            Err(error) => {
                warn!(index, action = action.name(), %error, "scenario step failed");
                StepOutcome {
                    index,
                    action: action.name().to_string(),
                    success: false,
                    error: Some(error.to_string()),
                    token_ids: Vec::new(),
                    settled: None,
                }
            }
        };
        steps.push(outcome);
    }

    let state = ledger.state();
    let report = SimulationReport {
        total_supply: state.total_supply,
        last_id: state.last_id,
        paused: state.paused,
        finished_at: clock.now(),
        balances: ledger
            .payment()
            .balances()
            .into_iter()
            .map(|(account, balance)| BalanceRow { account, balance })
            .collect(),
        events: ledger.take_events(),
        steps,
    };

    info!(
        total_supply = report.total_supply,
        failures = report.failures(),
        "scenario finished"
    );

    Ok(report)
}

fn apply(
    ledger: &mut InMemoryLedger<ConfiguredCurve>,
    clock: &ManualClock,
    action: &Action,
) -> Result<Option<Receipt>> {
    let receipt = match *action {
        Action::Fund { account, amount } => {
            ledger.payment_mut().mint(account, amount).map_err(|error| {
                SdkError::InvalidScenario(format!("cannot fund {account}: {error}"))
            })?;
            let allowance = ledger.payment().allowance(account).saturating_add(amount);
            ledger.payment_mut().approve(account, allowance);
            None
        }
        Action::Approve { account, amount } => {
            ledger.payment_mut().approve(account, amount);
            None
        }
        Action::Buy {
            caller,
            to,
            max_payment,
        } => Some(ledger.buy_to(caller, to.unwrap_or(caller), max_payment)?),
        Action::BulkBuy {
            caller,
            to,
            count,
            max_payment,
        } => Some(ledger.bulk_buy_to(caller, to.unwrap_or(caller), count, max_payment)?),
        Action::Sell {
            caller,
            token_id,
            min_accepted,
        } => Some(ledger.sell_with_min(caller, token_id, min_accepted)?),
        Action::BulkSell {
            caller,
            ref token_ids,
            min_accepted,
        } => Some(ledger.bulk_sell_with_min(caller, token_ids, min_accepted)?),
        Action::Pause { caller, paused } => {
            ledger.pause(caller, paused)?;
            None
        }
        Action::AdvanceTime { secs } => {
            clock.advance(secs);
            None
        }
        Action::UpdateCreator {
            caller,
            new_creator,
        } => {
            ledger.update_creator(caller, new_creator)?;
            None
        }
        Action::UpdateAdmin { caller, new_admin } => {
            ledger.update_admin(caller, new_admin)?;
            None
        }
        Action::TransferUnit {
            caller,
            to,
            token_id,
        } => {
            ledger.transfer_unit(caller, to, token_id)?;
            None
        }
    };
    Ok(receipt)
}
