//! In-memory collaborators
//!
//! Reference implementations of [`OwnershipRegistry`] and [`PaymentAsset`] that
//! keep everything in maps. They back the test suites and the SDK simulator, and
//! show the contract a production collaborator has to honour, in particular the
//! [`Checkpoint`] undo semantics.

use std::collections::{BTreeMap, BTreeSet};

use crate::checkpoint::Checkpoint;
use crate::constants::FEE_BASIS_POINTS_DIVISOR;
use crate::errors::{PaymentError, RegistryError};
use crate::payment::PaymentAsset;
use crate::registry::OwnershipRegistry;
use crate::state::Address;

#[derive(Debug, Clone)]
enum RegistryChange {
    Minted(u64),
    Burned { id: u64, owner: Address },
    Transferred { id: u64, from: Address },
    Royalty(Option<(Address, u16)>),
}

/// Sparse id → owner map with burn tracking
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    owners: BTreeMap<u64, Address>,
    burned: BTreeSet<u64>,
    royalty: Option<(Address, u16)>,
    journal: Option<Vec<RegistryChange>>,
}

impl InMemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live units owned by `owner`
    #[must_use]
    pub fn balance_of(&self, owner: Address) -> usize {
        self.owners.values().filter(|o| **o == owner).count()
    }

    /// Ids of live units owned by `owner`, ascending
    #[must_use]
    pub fn units_of(&self, owner: Address) -> Vec<u64> {
        self.owners
            .iter()
            .filter(|(_, o)| **o == owner)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Whether unit `id` was minted and later burned
    #[must_use]
    pub fn is_burned(&self, id: u64) -> bool {
        self.burned.contains(&id)
    }

    /// Royalty receiver and amount owed on a secondary sale of `sale_price`
    #[must_use]
    pub fn royalty_info(&self, sale_price: u128) -> Option<(Address, u128)> {
        let (receiver, bps) = self.royalty?;
        let amount = sale_price
            .checked_mul(u128::from(bps))?
            .checked_div(FEE_BASIS_POINTS_DIVISOR)?;
        Some((receiver, amount))
    }

    fn record(&mut self, change: RegistryChange) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(change);
        }
    }
}

impl Checkpoint for InMemoryRegistry {
    fn begin(&mut self) {
        self.journal = Some(Vec::new());
    }

    fn commit(&mut self) {
        self.journal = None;
    }

    fn rollback(&mut self) {
        let Some(journal) = self.journal.take() else {
            return;
        };
        for change in journal.into_iter().rev() {
            match change {
                RegistryChange::Minted(id) => {
                    self.owners.remove(&id);
                }
                RegistryChange::Burned { id, owner } => {
                    self.burned.remove(&id);
                    self.owners.insert(id, owner);
                }
                RegistryChange::Transferred { id, from } => {
                    self.owners.insert(id, from);
                }
                RegistryChange::Royalty(previous) => {
                    self.royalty = previous;
                }
            }
        }
    }
}

impl OwnershipRegistry for InMemoryRegistry {
    fn mint(&mut self, to: Address, id: u64) -> Result<(), RegistryError> {
        if to.is_zero() {
            return Err(RegistryError::ZeroRecipient);
        }
        if self.owners.contains_key(&id) || self.burned.contains(&id) {
            return Err(RegistryError::AlreadyMinted(id));
        }
        self.owners.insert(id, to);
        self.record(RegistryChange::Minted(id));
        Ok(())
    }

    fn burn(&mut self, id: u64) -> Result<(), RegistryError> {
        let owner = self
            .owners
            .remove(&id)
            .ok_or(RegistryError::UnknownUnit(id))?;
        self.burned.insert(id);
        self.record(RegistryChange::Burned { id, owner });
        Ok(())
    }

    fn transfer(&mut self, from: Address, to: Address, id: u64) -> Result<(), RegistryError> {
        if to.is_zero() {
            return Err(RegistryError::ZeroRecipient);
        }
        let owner = *self.owners.get(&id).ok_or(RegistryError::UnknownUnit(id))?;
        if owner != from {
            return Err(RegistryError::NotOwner {
                token_id: id,
                owner,
                from,
            });
        }
        self.owners.insert(id, to);
        self.record(RegistryChange::Transferred { id, from });
        Ok(())
    }

    fn owner_of(&self, id: u64) -> Option<Address> {
        self.owners.get(&id).copied()
    }

    fn set_royalty_receiver(&mut self, receiver: Address, bps: u16) -> Result<(), RegistryError> {
        let previous = self.royalty.replace((receiver, bps));
        self.record(RegistryChange::Royalty(previous));
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum AssetChange {
    Moved {
        from: Address,
        to: Address,
        amount: u128,
    },
    AllowanceSpent {
        owner: Address,
        amount: u128,
    },
}

/// Balance and allowance book for a single fungible asset
///
/// Allowances are always granted to the custody account, which is the only
/// spender the ledger ever uses.
#[derive(Debug, Clone)]
pub struct InMemoryAsset {
    custody: Address,
    balances: BTreeMap<Address, u128>,
    allowances: BTreeMap<Address, u128>,
    journal: Option<Vec<AssetChange>>,
}

impl InMemoryAsset {
    #[must_use]
    pub const fn new(custody: Address) -> Self {
        Self {
            custody,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            journal: None,
        }
    }

    /// Credits `amount` to `account` out of thin air (test faucet)
    ///
    /// # Errors
    /// Fails if the balance would overflow.
    pub fn mint(&mut self, account: Address, amount: u128) -> Result<(), PaymentError> {
        let balance = self.balances.entry(account).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(PaymentError::Overflow(account))?;
        Ok(())
    }

    /// Sets how much custody may pull from `owner`
    pub fn approve(&mut self, owner: Address, amount: u128) {
        self.allowances.insert(owner, amount);
    }

    #[must_use]
    pub fn balance_of(&self, account: Address) -> u128 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn allowance(&self, owner: Address) -> u128 {
        self.allowances.get(&owner).copied().unwrap_or_default()
    }

    /// All non-zero balances, ordered by account
    #[must_use]
    pub fn balances(&self) -> Vec<(Address, u128)> {
        self.balances
            .iter()
            .filter(|(_, balance)| **balance > 0)
            .map(|(account, balance)| (*account, *balance))
            .collect()
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: u128) -> Result<(), PaymentError> {
        let available = self.balance_of(from);
        let remaining = available
            .checked_sub(amount)
            .ok_or(PaymentError::InsufficientBalance {
                account: from,
                required: amount,
                available,
            })?;
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(PaymentError::Overflow(to))?;

        self.balances.insert(from, remaining);
        // from == to leaves the balance unchanged
        let credited = if from == to { available } else { credited };
        self.balances.insert(to, credited);
        self.record(AssetChange::Moved { from, to, amount });
        Ok(())
    }

    fn record(&mut self, change: AssetChange) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(change);
        }
    }
}

impl Checkpoint for InMemoryAsset {
    fn begin(&mut self) {
        self.journal = Some(Vec::new());
    }

    fn commit(&mut self) {
        self.journal = None;
    }

    fn rollback(&mut self) {
        let Some(journal) = self.journal.take() else {
            return;
        };
        for change in journal.into_iter().rev() {
            match change {
                AssetChange::Moved { from, to, amount } => {
                    // Reversing a recorded move: `to` was credited `amount`, so the
                    // subtraction and the matching addition cannot fail.
                    if from != to {
                        let to_balance = self.balance_of(to).saturating_sub(amount);
                        let from_balance = self.balance_of(from).saturating_add(amount);
                        self.balances.insert(to, to_balance);
                        self.balances.insert(from, from_balance);
                    }
                }
                AssetChange::AllowanceSpent { owner, amount } => {
                    let restored = self.allowance(owner).saturating_add(amount);
                    self.allowances.insert(owner, restored);
                }
            }
        }
    }
}

impl PaymentAsset for InMemoryAsset {
    fn custody(&self) -> Address {
        self.custody
    }

    fn transfer_from(&mut self, from: Address, to: Address, amount: u128) -> Result<(), PaymentError> {
        if from != self.custody {
            let approved = self.allowance(from);
            let remaining = approved
                .checked_sub(amount)
                .ok_or(PaymentError::InsufficientAllowance {
                    owner: from,
                    required: amount,
                    approved,
                })?;
            // Check the balance before spending the allowance so a failed pull
            // changes nothing
            let available = self.balance_of(from);
            if available < amount {
                return Err(PaymentError::InsufficientBalance {
                    account: from,
                    required: amount,
                    available,
                });
            }
            self.allowances.insert(from, remaining);
            self.record(AssetChange::AllowanceSpent {
                owner: from,
                amount,
            });
        }
        self.move_balance(from, to, amount)
    }

    fn transfer(&mut self, to: Address, amount: u128) -> Result<(), PaymentError> {
        let custody = self.custody;
        self.move_balance(custody, to, amount)
    }
}
