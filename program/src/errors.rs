//! Error types for the issuance engine
//!
//! Every failure the engine can report is a distinct variant carrying the numbers
//! a caller needs to adjust and retry. Errors fall into four groups:
//!
//! - **Construction**: `AddressZeroNotAllowed`, `MaxFeeExceeded`, invalid curve
//!   parameters. No ledger exists when these are returned.
//! - **Caller protection**: `MaxPaymentExceeded`, `MinAcceptedPriceExceeded`.
//! - **Authorization**: `Unauthorized`, `CallerIsNotOwner`.
//! - **State invariants**: `Paused`, `MinHoldingTimeNotReached`,
//!   `LastTokensCannotBeSold`.
//!
//! None of them leave partial state behind: checks run before any collaborator
//! call, and collaborator failures roll the whole operation back.

use crate::state::Address;
use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors raised by pricing curves
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// The inflection point must be a positive unit count
    #[error("Inflection point must be greater than zero")]
    InvalidInflectionPoint,

    /// The inflection price must be at least `inflection_point²`
    #[error("Inflection price {inflection_price} is below the minimum {minimum} for this inflection point")]
    InflectionPriceTooLow {
        inflection_price: u128,
        minimum: u128,
    },

    /// Evaluating the curve overflowed `u128`
    #[error("Price computation overflowed for unit {unit}")]
    Overflow { unit: u64 },
}

/// Errors raised by an ownership registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A unit with this id has already been minted (ids are never reused)
    #[error("Unit {0} has already been minted")]
    AlreadyMinted(u64),

    /// No live unit exists with this id
    #[error("Unit {0} does not exist")]
    UnknownUnit(u64),

    /// The transfer source does not own the unit
    #[error("Unit {token_id} is owned by {owner}, not {from}")]
    NotOwner {
        token_id: u64,
        owner: Address,
        from: Address,
    },

    /// Units cannot be minted or transferred to the null address
    #[error("Units cannot be assigned to the zero address")]
    ZeroRecipient,
}

/// Errors raised by a payment asset
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The paying account does not hold enough of the asset
    #[error("Insufficient balance for {account}: required {required}, available {available}")]
    InsufficientBalance {
        account: Address,
        required: u128,
        available: u128,
    },

    /// The custody account is not approved to pull this much from the owner
    #[error("Insufficient allowance from {owner}: required {required}, approved {approved}")]
    InsufficientAllowance {
        owner: Address,
        required: u128,
        approved: u128,
    },

    /// A balance would exceed `u128::MAX`
    #[error("Balance overflow for {0}")]
    Overflow(Address),
}

/// Errors raised by the issuance ledger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A role address (creator, admin, new role holder) is the null address
    #[error("The zero address is not allowed")]
    AddressZeroNotAllowed,

    /// A fee or royalty rate exceeds the cap
    #[error("Fee of {value} bps exceeds the maximum of {max} bps")]
    MaxFeeExceeded { value: u16, max: u16 },

    /// Total owed by a purchase is above the caller's ceiling
    #[error("Payment of {actual} exceeds the maximum payment of {max_payment}")]
    MaxPaymentExceeded { actual: u128, max_payment: u128 },

    /// Net proceeds of a sale are below the caller's floor
    #[error("Net proceeds of {actual} are below the minimum accepted price of {min_accepted}")]
    MinAcceptedPriceExceeded { actual: u128, min_accepted: u128 },

    /// Caller does not hold the role required by the operation
    #[error("Unauthorized caller {caller}")]
    Unauthorized { caller: Address },

    /// Buy and sell are disabled while the ledger is paused
    #[error("Ledger is paused")]
    Paused,

    /// Caller tried to sell or move a unit it does not own
    #[error("Caller {caller} is not the owner of unit {token_id} (owner: {owner})")]
    CallerIsNotOwner {
        token_id: u64,
        owner: Address,
        caller: Address,
    },

    /// Unit was bought too recently to be sold
    #[error("Unit {token_id} bought at {purchased_at} cannot be sold before {sellable_at}")]
    MinHoldingTimeNotReached {
        token_id: u64,
        purchased_at: i64,
        sellable_at: i64,
    },

    /// Selling would take total supply below the pre-minted floor
    #[error("Cannot sell below the supply floor of {floor} (total supply {total_supply})")]
    LastTokensCannotBeSold { total_supply: u64, floor: u64 },

    /// Batch operations need at least one unit
    #[error("Quantity must be greater than zero")]
    ZeroQuantity,

    /// Batch covers more units than one call may price
    #[error("Batch of {count} units exceeds the maximum of {max}")]
    BatchTooLarge { count: u64, max: u64 },

    /// The same unit id appears twice in one batch sale
    #[error("Unit {token_id} appears more than once in the batch")]
    DuplicateUnit { token_id: u64 },

    /// Arithmetic operation would result in overflow or underflow
    #[error("Arithmetic operation would result in overflow or underflow")]
    ArithmeticError,

    /// Pricing curve failure
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Ownership registry failure
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Payment asset failure
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),
}
