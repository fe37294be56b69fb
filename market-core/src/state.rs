use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::catalog::{self, CATALOG};
use crate::types::Category;

/// Rolling price-history cap per item. Oldest samples are evicted first.
pub const HISTORY_CAP: usize = 100;

/// Spread quoted to the HUD on top of the raw market price.
pub const BUY_MARKUP: f64 = 1.10;
pub const SELL_MARKDOWN: f64 = 0.90;

// ============================================================================
// Price history
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct PricePoint {
    pub tick: u64,
    pub price: u32,
}

// ============================================================================
// Merchants - time-limited wandering vendors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct MerchantStock {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Merchant {
    pub id: String,
    pub name: String,
    pub zone: String,
    pub inventory: Vec<MerchantStock>,
    pub spawned_at: u64,
    pub expires_at: u64,
    pub seed: u32,
}

impl Merchant {
    pub fn is_active(&self, tick: u64) -> bool {
        self.expires_at > tick
    }
}

// ============================================================================
// Market State - The complete mutable per-zone state
// ============================================================================

/// Mutable market state for one zone. One logical owner advances it per
/// tick; every mutating method takes `&mut self` and mutates in place.
/// Serialized verbatim by the host's persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    pub zone: String,
    pub prices: HashMap<String, u32>,
    pub supply: HashMap<String, f64>,
    pub demand: HashMap<String, f64>,
    pub history: HashMap<String, VecDeque<PricePoint>>,
    /// Append-only: expired merchants stay in the list; readers filter by
    /// tick via [`MarketState::active_merchants`].
    pub merchants: Vec<Merchant>,
    pub last_update: u64,
}

impl MarketState {
    pub fn new(zone: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            prices: HashMap::new(),
            supply: HashMap::new(),
            demand: HashMap::new(),
            history: HashMap::new(),
            merchants: Vec::new(),
            last_update: 0,
        }
    }

    /// Fill in missing per-item entries from the catalog. Idempotent: an
    /// already-populated entry is never reset, so this is safe to call on a
    /// partially-populated or freshly-deserialized state.
    pub fn initialize(&mut self) {
        for def in &CATALOG {
            self.prices
                .entry(def.id.to_string())
                .or_insert(def.base_price);
            self.supply
                .entry(def.id.to_string())
                .or_insert(def.base_supply);
            self.demand
                .entry(def.id.to_string())
                .or_insert(def.base_supply);
            self.history.entry(def.id.to_string()).or_default();
        }
    }

    pub fn is_initialized(&self) -> bool {
        !self.prices.is_empty()
    }

    // === Read-only getters (UI/HUD surface) ===

    /// Current price of an item. Falls back to the catalog base price for an
    /// initialized-but-missing entry; `None` for an id unknown to the catalog.
    pub fn price(&self, item_id: &str) -> Option<u32> {
        if let Some(&price) = self.prices.get(item_id) {
            return Some(price);
        }
        catalog::item(item_id).map(|def| def.base_price)
    }

    /// What a player pays to buy one unit at the market stall.
    pub fn buy_price(&self, item_id: &str) -> Option<u32> {
        self.price(item_id)
            .map(|p| (p as f64 * BUY_MARKUP).round() as u32)
    }

    /// What a player receives selling one unit at the market stall.
    pub fn sell_price(&self, item_id: &str) -> Option<u32> {
        self.price(item_id)
            .map(|p| (p as f64 * SELL_MARKDOWN).round() as u32)
    }

    /// Current (supply, demand) for a catalog item.
    pub fn supply_demand(&self, item_id: &str) -> Option<(f64, f64)> {
        let def = catalog::item(item_id)?;
        let supply = self
            .supply
            .get(item_id)
            .copied()
            .unwrap_or(def.base_supply);
        let demand = self
            .demand
            .get(item_id)
            .copied()
            .unwrap_or(def.base_supply);
        Some((supply, demand))
    }

    /// All prices in a category, in catalog order.
    pub fn category_prices(&self, category: Category) -> Vec<CategoryPrice> {
        catalog::items_in(category)
            .map(|def| CategoryPrice {
                id: def.id.to_string(),
                name: def.name.to_string(),
                price: self.price(def.id).unwrap_or(def.base_price),
            })
            .collect()
    }

    /// History window for an item, oldest first. Empty slice view for
    /// unknown or never-updated items.
    pub fn price_history(&self, item_id: &str) -> impl Iterator<Item = &PricePoint> {
        self.history.get(item_id).into_iter().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct CategoryPrice {
    pub id: String,
    pub name: String,
    pub price: u32,
}
