use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

mod analysis;
mod catalog;
mod merchant;
mod pricing;
mod rng;
mod state;
mod types;

pub use analysis::*;
pub use catalog::*;
pub use merchant::*;
pub use pricing::*;
pub use rng::*;
pub use state::*;
pub use types::*;

// ============================================================================
// WASM API - Market simulation for one zone
// ============================================================================

/// Per-item view assembled for the HUD.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct ItemSnapshot {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub price: u32,
    pub buy_price: u32,
    pub sell_price: u32,
    pub supply: f64,
    pub demand: f64,
    pub trend: Trend,
}

/// Full snapshot of the zone market for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct MarketSnapshot {
    pub zone: String,
    pub tick: u64,
    pub items: Vec<ItemSnapshot>,
    pub merchants: Vec<Merchant>,
}

/// Supply/demand pair for a single item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct SupplyDemand {
    pub supply: f64,
    pub demand: f64,
}

/// JS-facing result of a merchant purchase; mirrors the engine's
/// `Result<Purchase, PurchaseError>` as a `{success, ...}` object.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct PurchaseOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<PurchaseError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<MerchantStock>,
}

/// One zone's market simulation, exposed across the wasm boundary.
/// Owns the [`MarketState`] exclusively; the host game loop supplies the
/// tick counter and calls each mutation at most once per tick.
#[wasm_bindgen]
pub struct MarketSim {
    state: MarketState,
}

#[wasm_bindgen]
impl MarketSim {
    #[wasm_bindgen(constructor)]
    pub fn new(zone: String) -> Self {
        // Better panic messages in browser console
        console_error_panic_hook::set_once();

        let mut state = MarketState::new(zone);
        state.initialize();
        Self { state }
    }

    /// Restore a market from a previously saved JSON blob. Runs the
    /// idempotent initializer afterwards so items added to the catalog
    /// since the save get their baseline entries.
    pub fn from_json(json: &str) -> Result<MarketSim, JsValue> {
        let mut state: MarketState =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        state.initialize();
        Ok(Self { state })
    }

    /// Serialize the market verbatim for the host's persistence layer.
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    // === Mutations (one logical owner, once per tick) ===

    pub fn update_prices(&mut self, tick: u64) {
        self.state.update_prices(tick);
    }

    pub fn record_transaction(&mut self, item_id: &str, quantity: u32, is_buy: bool) {
        self.state.record_transaction(item_id, quantity, is_buy);
    }

    pub fn apply_event_effect(&mut self, event: &str, multiplier: f64) {
        self.state.apply_event_effect(event, multiplier);
    }

    /// Spawns a wandering merchant; returns its id.
    pub fn spawn_merchant(&mut self, seed: u32, tick: u64) -> String {
        self.state.spawn_merchant(seed, tick).id.clone()
    }

    pub fn buy_from_merchant(
        &mut self,
        player_id: &str,
        merchant_id: &str,
        item_id: &str,
        quantity: u32,
    ) -> PurchaseOutcome {
        match self
            .state
            .buy_from_merchant(player_id, merchant_id, item_id, quantity)
        {
            Ok(purchase) => PurchaseOutcome {
                success: true,
                reason: None,
                cost: Some(purchase.cost),
                item: Some(purchase.item),
            },
            Err(err) => PurchaseOutcome {
                success: false,
                reason: Some(err),
                cost: None,
                item: None,
            },
        }
    }

    // === Read-only getters ===

    pub fn get_price(&self, item_id: &str) -> Option<u32> {
        self.state.price(item_id)
    }

    pub fn get_buy_price(&self, item_id: &str) -> Option<u32> {
        self.state.buy_price(item_id)
    }

    pub fn get_sell_price(&self, item_id: &str) -> Option<u32> {
        self.state.sell_price(item_id)
    }

    pub fn get_supply_demand(&self, item_id: &str) -> JsValue {
        let view = self
            .state
            .supply_demand(item_id)
            .map(|(supply, demand)| SupplyDemand { supply, demand });
        serde_wasm_bindgen::to_value(&view).unwrap_or(JsValue::NULL)
    }

    pub fn get_category_prices(&self, category: Category) -> JsValue {
        serde_wasm_bindgen::to_value(&self.state.category_prices(category))
            .unwrap_or(JsValue::NULL)
    }

    pub fn get_active_merchants(&self, tick: u64) -> JsValue {
        serde_wasm_bindgen::to_value(&self.state.active_merchants(tick))
            .unwrap_or(JsValue::NULL)
    }

    // === Derived views ===

    pub fn get_price_trend(&self, item_id: &str) -> Trend {
        self.state.price_trend(item_id)
    }

    pub fn predict_price(&self, item_id: &str, ticks_ahead: u64) -> Option<u32> {
        self.state.predict_price(item_id, ticks_ahead)
    }

    pub fn get_top_movers(&self, count: u32) -> JsValue {
        serde_wasm_bindgen::to_value(&self.state.top_movers(count as usize))
            .unwrap_or(JsValue::NULL)
    }

    pub fn get_market_stats(&self) -> MarketStats {
        self.state.market_stats()
    }

    /// Snapshot of the whole zone market for rendering. Merchants are
    /// filtered to those active at the last price update.
    pub fn get_snapshot(&self) -> MarketSnapshot {
        let tick = self.state.last_update;
        let items = CATALOG
            .iter()
            .map(|def| {
                let price = self.state.price(def.id).unwrap_or(def.base_price);
                let (supply, demand) = self
                    .state
                    .supply_demand(def.id)
                    .unwrap_or((def.base_supply, def.base_supply));
                ItemSnapshot {
                    id: def.id.to_string(),
                    name: def.name.to_string(),
                    category: def.category,
                    price,
                    buy_price: self.state.buy_price(def.id).unwrap_or(price),
                    sell_price: self.state.sell_price(def.id).unwrap_or(price),
                    supply,
                    demand,
                    trend: self.state.price_trend(def.id),
                }
            })
            .collect();

        MarketSnapshot {
            zone: self.state.zone.clone(),
            tick,
            items,
            merchants: self
                .state
                .active_merchants(tick)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

impl MarketSim {
    /// Direct access for native embedders (tests, host simulation).
    pub fn state(&self) -> &MarketState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MarketState {
        &mut self.state
    }
}
