use serde::{Deserialize, Serialize};

use crate::state::Address;

/// Event emitted when a ledger is constructed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerInitialized {
    /// Issuer, owner of the first pre-minted unit
    pub creator: Address,
    /// Platform operator
    pub admin: Address,
    /// Referrer, owner of the second pre-minted unit when configured
    pub referrer: Option<Address>,
    /// Creator fee in basis points
    pub creator_fee_bps: u16,
    /// Admin fee in basis points
    pub admin_fee_bps: u16,
    /// Creator royalty in basis points
    pub creator_royalty_bps: u16,
    /// Units minted at construction
    pub pre_minted: u64,
    /// Unix timestamp of construction
    pub timestamp: i64,
}

/// Event emitted for every unit minted by a purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitBought {
    /// Account that paid
    pub payer: Address,
    /// Account that received the unit
    pub receiver: Address,
    /// Id of the minted unit
    pub token_id: u64,
    /// Curve price of this unit
    pub price: u128,
    /// Creator fee charged on this unit
    pub creator_fee: u128,
    /// Admin fee charged on this unit
    pub admin_fee: u128,
}

/// Event emitted for every unit burned by a sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSold {
    /// Account that sold and received the proceeds
    pub seller: Address,
    /// Id of the burned unit
    pub token_id: u64,
    /// Curve price of this redemption
    pub price: u128,
    /// Creator fee withheld
    pub creator_fee: u128,
    /// Admin fee withheld
    pub admin_fee: u128,
}

/// Event emitted when the pause flag is set, even if unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseToggled {
    pub old: bool,
    pub new: bool,
    /// Creator or admin who called `pause`
    pub caller: Address,
}

/// Event emitted when the creator role moves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorUpdated {
    pub old: Address,
    pub new: Address,
}

/// Event emitted when the admin role moves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUpdated {
    pub old: Address,
    pub new: Address,
}

/// Every event a ledger records, in emission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    LedgerInitialized(LedgerInitialized),
    UnitBought(UnitBought),
    UnitSold(UnitSold),
    PauseToggled(PauseToggled),
    CreatorUpdated(CreatorUpdated),
    AdminUpdated(AdminUpdated),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = LedgerEvent::PauseToggled(PauseToggled {
            old: false,
            new: true,
            caller: Address::repeat_byte(1),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "pause_toggled");
        assert_eq!(json["new"], true);

        let back: LedgerEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
