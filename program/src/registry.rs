//! Ownership registry collaborator
//!
//! The ledger never stores who owns which unit. It asks the registry to mint,
//! burn and transfer, and reads ownership back from it.

use crate::checkpoint::Checkpoint;
use crate::errors::RegistryError;
use crate::state::Address;

/// Token-standard primitives consumed by the issuance ledger
pub trait OwnershipRegistry: Checkpoint {
    /// Creates unit `id` owned by `to`
    ///
    /// # Errors
    /// Fails if `id` was ever minted before or `to` is the zero address.
    fn mint(&mut self, to: Address, id: u64) -> Result<(), RegistryError>;

    /// Destroys unit `id`
    ///
    /// # Errors
    /// Fails if the unit does not exist.
    fn burn(&mut self, id: u64) -> Result<(), RegistryError>;

    /// Moves unit `id` from `from` to `to`
    ///
    /// # Errors
    /// Fails if `from` does not own the unit or `to` is the zero address.
    fn transfer(&mut self, from: Address, to: Address, id: u64) -> Result<(), RegistryError>;

    /// Current owner of unit `id`, `None` if it does not exist
    fn owner_of(&self, id: u64) -> Option<Address>;

    /// Publishes the royalty receiver and rate for secondary sales
    ///
    /// # Errors
    /// Implementation-defined; the in-memory registry never fails.
    fn set_royalty_receiver(&mut self, receiver: Address, bps: u16) -> Result<(), RegistryError>;
}
