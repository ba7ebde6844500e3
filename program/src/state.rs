use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::{LedgerError, Result};

/// Account identifier used for callers, role holders and payment accounts
///
/// Rendered as `0x`-prefixed lowercase hex; serde uses the same string form so
/// configuration files stay readable.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; 20]);

impl Address {
    /// The null address
    pub const ZERO: Self = Self([0u8; 20]);

    /// Wraps raw address bytes
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Address whose 20 bytes all equal `byte`, handy for fixtures
    #[must_use]
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    /// Returns true for the null address
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Raw address bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

/// Error returned when parsing an [`Address`] from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid address '{0}': expected 0x followed by 40 hex characters")]
pub struct ParseAddressError(pub String);

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| ParseAddressError(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = ParseAddressError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

/// Ledger state owned by one issuance ledger
///
/// Counters, role holders, fee rates and the pause flag all live here; nothing is
/// global. The struct is only written after every collaborator call of an
/// operation succeeded, so a failed operation never leaves a trace in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerState {
    /// Collection name (opaque to the engine)
    pub name: String,
    /// Collection symbol (opaque to the engine)
    pub symbol: String,
    /// Metadata URI (opaque to the engine)
    pub uri: String,
    /// Payment account of the ledger itself, holding principal
    pub custody: Address,
    /// Issuer, receives the creator fee and royalties
    pub creator: Address,
    /// Platform operator, receives the admin fee
    pub admin: Address,
    /// Optional referrer, pre-minted a unit at construction
    pub referrer: Option<Address>,
    /// Creator fee in basis points (0-2500)
    pub creator_fee_bps: u16,
    /// Admin fee in basis points (0-2500)
    pub admin_fee_bps: u16,
    /// Creator royalty in basis points (0-2500), published to the registry
    pub creator_royalty_bps: u16,
    /// Minimum seconds between purchase and sale (0 disables the check)
    pub min_holding_secs: u64,
    /// Whether buy and sell are disabled
    pub paused: bool,
    /// Last assigned unit id; never decreases
    pub last_id: u64,
    /// Units currently in existence
    pub total_supply: u64,
    /// Unix timestamp at which each live unit was minted
    pub purchase_times: HashMap<u64, i64>,
}

impl LedgerState {
    /// Number of units minted at construction (1, or 2 with a referrer)
    #[must_use]
    pub const fn pre_mint_offset(&self) -> u64 {
        if self.referrer.is_some() {
            2
        } else {
            1
        }
    }

    /// Sequence number priced for the `index`-th next purchase (0-based)
    pub fn buy_sequence(&self, index: u64) -> Result<u64> {
        self.total_supply
            .checked_add(1)
            .and_then(|n| n.checked_add(index))
            .and_then(|n| n.checked_sub(self.pre_mint_offset()))
            .ok_or(LedgerError::ArithmeticError)
    }

    /// Sequence number priced for the `index`-th next sale (0-based)
    ///
    /// Redemptions always price the top of the curve, whichever physical unit
    /// is burned.
    pub fn sell_sequence(&self, index: u64) -> Result<u64> {
        let floor = self.pre_mint_offset();
        let remaining = self
            .total_supply
            .checked_sub(index)
            .filter(|supply| *supply > floor)
            .ok_or(LedgerError::LastTokensCannotBeSold {
                total_supply: self.total_supply,
                floor,
            })?;
        remaining
            .checked_sub(floor)
            .ok_or(LedgerError::ArithmeticError)
    }
}

/// Price and fee breakdown for one or more units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Curve price (principal)
    pub price: u128,
    /// Creator fee stream
    pub creator_fee: u128,
    /// Admin fee stream
    pub admin_fee: u128,
}

impl Quote {
    /// Adds another quote stream by stream
    pub fn checked_add(self, other: Self) -> Result<Self> {
        Ok(Self {
            price: self
                .price
                .checked_add(other.price)
                .ok_or(LedgerError::ArithmeticError)?,
            creator_fee: self
                .creator_fee
                .checked_add(other.creator_fee)
                .ok_or(LedgerError::ArithmeticError)?,
            admin_fee: self
                .admin_fee
                .checked_add(other.admin_fee)
                .ok_or(LedgerError::ArithmeticError)?,
        })
    }

    /// Amount a buyer pays: price plus both fees
    pub fn total_cost(&self) -> Result<u128> {
        self.price
            .checked_add(self.creator_fee)
            .and_then(|v| v.checked_add(self.admin_fee))
            .ok_or(LedgerError::ArithmeticError)
    }

    /// Amount a seller receives: price minus both fees
    pub fn net_proceeds(&self) -> Result<u128> {
        self.price
            .checked_sub(self.creator_fee)
            .and_then(|v| v.checked_sub(self.admin_fee))
            .ok_or(LedgerError::ArithmeticError)
    }
}

/// Outcome of a successful buy or sell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Units minted or burned, in processing order
    pub token_ids: Vec<u64>,
    /// Aggregated price and fee streams
    pub quote: Quote,
    /// Total paid (buy) or net received (sell)
    pub settled: u128,
}
