//! Payment asset collaborator
//!
//! Payments move a fungible asset between accounts. The ledger pulls from buyers
//! with [`PaymentAsset::transfer_from`] and pushes from its own custody account
//! with [`PaymentAsset::transfer`].

use crate::checkpoint::Checkpoint;
use crate::errors::PaymentError;
use crate::state::Address;

/// Fungible-asset transfer primitives consumed by the issuance ledger
pub trait PaymentAsset: Checkpoint {
    /// Account holding the ledger's principal; the spender for pulls
    fn custody(&self) -> Address;

    /// Pulls `amount` from `from` to `to` using the allowance `from` granted custody
    ///
    /// # Errors
    /// Fails on insufficient balance or allowance.
    fn transfer_from(&mut self, from: Address, to: Address, amount: u128) -> Result<(), PaymentError>;

    /// Pushes `amount` from custody to `to`
    ///
    /// # Errors
    /// Fails if custody does not hold `amount`.
    fn transfer(&mut self, to: Address, amount: u128) -> Result<(), PaymentError>;
}
