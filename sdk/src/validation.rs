//! Validation utilities for deployments and CLI inputs

use bondkey_protocol::constants::MAX_FEE_BPS;
use bondkey_protocol::LedgerError;

use crate::config::DeploymentConfig;
use crate::error::{Result, SdkError};

/// Validate a deployment before anything is built from it
///
/// Runs the ledger's own construction checks and the curve's parameter checks,
/// then the checks only a deployment can make: the custody account must be set
/// and must not double as a fee recipient or pre-mint holder.
///
/// # Errors
/// Returns an error if any check fails
pub fn validate_deployment_config(config: &DeploymentConfig) -> Result<()> {
    config.ledger.validate()?;
    config.curve.build()?;

    if config.custody.is_zero() {
        return Err(SdkError::InvalidConfig(
            "custody account must not be the zero address".to_string(),
        ));
    }

    let roles = [
        ("creator", Some(config.ledger.creator)),
        ("admin", Some(config.ledger.admin)),
        ("referrer", config.ledger.referrer),
    ];
    for (role, address) in roles {
        if address == Some(config.custody) {
            return Err(SdkError::InvalidConfig(format!(
                "custody account {} is also the {role}",
                config.custody
            )));
        }
    }

    Ok(())
}

/// Validate a fee rate in basis points
///
/// # Errors
/// Returns an error if the rate exceeds the ledger's cap
pub fn validate_fee_bps(fee_bps: u16) -> Result<()> {
    if fee_bps > MAX_FEE_BPS {
        return Err(SdkError::Ledger(LedgerError::MaxFeeExceeded {
            value: fee_bps,
            max: MAX_FEE_BPS,
        }));
    }
    Ok(())
}

/// Validate a price table range
///
/// # Errors
/// Returns an error if the range is empty or the step is zero
pub fn validate_table_range(from: u64, to: u64, step: u64) -> Result<()> {
    if step == 0 {
        return Err(SdkError::InvalidConfig(
            "table step must be greater than 0".to_string(),
        ));
    }
    if from > to {
        return Err(SdkError::InvalidConfig(format!(
            "table range start ({from}) is after its end ({to})"
        )));
    }
    Ok(())
}
