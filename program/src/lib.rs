//! Bonding-Curve Issuance Ledger
//!
//! Issues sequentially numbered units whose price is a deterministic function
//! of circulating supply, and buys them back along the same curve.
//!
//! ## Core Features
//! - Sigmoid pricing curve (quadratic ramp into a square-root tail) behind a
//!   swappable [`PricingCurve`] trait
//! - Single and bulk purchases with a caller-supplied payment ceiling
//! - Single and bulk redemptions with a minimum-proceeds floor, holding period
//!   and a supply floor that keeps the pre-minted units in circulation
//! - Creator and admin fee streams split in basis points on every trade
//! - Pause switch and role handover for the creator and admin
//! - All-or-nothing operations over the registry and payment collaborators
//!
//! The ledger owns only its counters, roles and flags. Unit ownership, payment
//! custody and time are injected collaborators; [`memory`] provides in-process
//! implementations of the first two and [`clock`] provides both clocks.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod checkpoint;
pub mod clock;
pub mod constants;
pub mod curve;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod memory;
pub mod payment;
pub mod registry;
pub mod state;

mod buy;
mod init_ledger;
mod pause;
mod quote;
mod sell;
mod transfer_unit;
mod update_admin;
mod update_creator;

pub use checkpoint::Checkpoint;
pub use clock::{Clock, ManualClock, SystemClock};
pub use curve::{
    ConfiguredCurve, CurveConfig, CurveParams, LinearCurve, PricingCurve, SigmoidCurve,
};
pub use errors::{CurveError, LedgerError, PaymentError, RegistryError, Result};
pub use events::LedgerEvent;
pub use init_ledger::InitLedgerArgs;
pub use ledger::IssuanceLedger;
pub use memory::{InMemoryAsset, InMemoryRegistry};
pub use payment::PaymentAsset;
pub use quote::{ensure_batch_size, fee_for};
pub use registry::OwnershipRegistry;
pub use state::{Address, LedgerState, Quote, Receipt};

/// Ledger wired to the in-process collaborators
pub type InMemoryLedger<C, K = ManualClock> = IssuanceLedger<C, InMemoryRegistry, InMemoryAsset, K>;
