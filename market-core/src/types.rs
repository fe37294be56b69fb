use serde::{Deserialize, Serialize};
use thiserror::Error;
use tsify_next::Tsify;

// ============================================================================
// Categories - The 8 slices of the tradeable catalog
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Materials,
    Tools,
    Weapons,
    Armor,
    Food,
    Potions,
    Decorations,
    Rare,
}

impl Category {
    /// Returns an iterator over all categories
    pub fn all() -> impl Iterator<Item = Category> {
        [
            Category::Materials,
            Category::Tools,
            Category::Weapons,
            Category::Armor,
            Category::Food,
            Category::Potions,
            Category::Decorations,
            Category::Rare,
        ]
        .into_iter()
    }
}

// ============================================================================
// Trend - Discrete classification of a price-history window
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Falling,
    Volatile,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Rising => "rising",
            Trend::Falling => "falling",
            Trend::Volatile => "volatile",
            Trend::Stable => "stable",
        }
    }
}

// ============================================================================
// Item definitions - Static catalog rows
// ============================================================================

/// A tradeable item definition. Invariant: `min_price <= base_price <= max_price`.
#[derive(Debug, Clone, Copy)]
pub struct ItemDef {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub base_price: u32,
    pub min_price: u32,
    pub max_price: u32,
    /// Noise amplitude, fraction in (0, 1].
    pub volatility: f64,
    /// Baseline unit count; seeds both supply and demand on initialization.
    pub base_supply: f64,
    /// Per-tick fractional decay of accumulated demand, in (0, 1).
    pub demand_decay: f64,
}

/// A merchant-exclusive item. No supply/demand tracking, ever.
#[derive(Debug, Clone, Copy)]
pub struct MerchantItemDef {
    pub id: &'static str,
    pub name: &'static str,
    pub base_price: u32,
    pub min_price: u32,
    pub max_price: u32,
}

// ============================================================================
// Purchase errors - Structured reasons for merchant-purchase failures
// ============================================================================

/// Why a merchant purchase did not go through. Serialized as a snake_case
/// reason code so callers branch on the code rather than catching anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseError {
    #[error("merchant not found")]
    MerchantNotFound,
    #[error("item not in inventory")]
    ItemNotInInventory,
    #[error("insufficient stock")]
    InsufficientStock,
    #[error("invalid quantity")]
    InvalidQuantity,
    #[error("market not initialized")]
    MarketNotInitialized,
}

impl PurchaseError {
    pub fn code(&self) -> &'static str {
        match self {
            PurchaseError::MerchantNotFound => "merchant_not_found",
            PurchaseError::ItemNotInInventory => "item_not_in_inventory",
            PurchaseError::InsufficientStock => "insufficient_stock",
            PurchaseError::InvalidQuantity => "invalid_quantity",
            PurchaseError::MarketNotInitialized => "market_not_initialized",
        }
    }
}
