//! The tick-driven price engine: supply/demand ratio pricing with bounded
//! multiplicative noise, demand decay, transaction feedback, and one-shot
//! world-event shocks.

use crate::catalog::{self, CATALOG};
use crate::rng::NoiseStream;
use crate::state::{HISTORY_CAP, MarketState, PricePoint};
use crate::types::Category;

/// Supply/demand impact per traded unit.
pub const TRANSACTION_IMPACT: f64 = 0.5;

/// Supply and demand never drop below this, keeping demand/supply finite.
const LEVEL_FLOOR: f64 = 1.0;

/// Fraction of the gap pulled back up when demand decays below supply.
const REVERSION_PULL: f64 = 0.1;

/// Which category a world event shocks. Unknown events hit every item.
pub fn event_target(event: &str) -> Option<Category> {
    match event {
        "harvest_festival" => Some(Category::Food),
        "iron_shortage" => Some(Category::Materials),
        "bandit_raid" => Some(Category::Weapons),
        "war_declaration" => Some(Category::Armor),
        "plague_outbreak" => Some(Category::Potions),
        "festival_of_lights" => Some(Category::Decorations),
        "artifact_discovery" => Some(Category::Rare),
        "tool_shortage" => Some(Category::Tools),
        _ => None,
    }
}

impl MarketState {
    /// Advance every catalog item one tick.
    ///
    /// For each item, in catalog order:
    /// `raw = base_price * (demand/supply) * (1 + volatility * noise)`,
    /// clamped to `[min, max]` and rounded. One noise draw per item from a
    /// single tick-seeded stream, so the whole pass is reproducible from
    /// `(state, tick)` alone. Afterwards demand decays toward equilibrium:
    /// demand below supply is pulled 10% of the gap back up, demand above
    /// supply only ever shrinks by its decay rate. The asymmetry is
    /// deliberate.
    ///
    /// Caller contract: invoke once per tick. A second call for the same
    /// tick double-applies noise and decay.
    pub fn update_prices(&mut self, tick: u64) {
        let mut noise = NoiseStream::for_tick(tick);

        for def in &CATALOG {
            let supply = self
                .supply
                .get(def.id)
                .copied()
                .unwrap_or(def.base_supply)
                .max(LEVEL_FLOOR);
            let demand = self
                .demand
                .get(def.id)
                .copied()
                .unwrap_or(def.base_supply)
                .max(LEVEL_FLOOR);

            let ratio = demand / supply;
            let n = noise.noise();
            let raw = def.base_price as f64 * ratio * (1.0 + def.volatility * n);
            let price = raw
                .clamp(def.min_price as f64, def.max_price as f64)
                .round() as u32;

            self.prices.insert(def.id.to_string(), price);

            let hist = self.history.entry(def.id.to_string()).or_default();
            hist.push_back(PricePoint { tick, price });
            while hist.len() > HISTORY_CAP {
                hist.pop_front();
            }

            // Demand decay with asymmetric mean reversion.
            let decayed = demand * (1.0 - def.demand_decay);
            let next = if decayed < supply {
                decayed + (supply - decayed) * REVERSION_PULL
            } else {
                decayed
            };
            self.demand.insert(def.id.to_string(), next.max(LEVEL_FLOOR));
        }

        self.last_update = tick;

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "market",
            tick = tick,
            zone = %self.zone,
            items = CATALOG.len(),
            "prices updated"
        );
    }

    /// Feed an executed player trade back into supply/demand. This is the
    /// only sanctioned channel for trade volume to reach the price ratio;
    /// it never touches prices or history directly.
    ///
    /// No-op for an unknown item id or a zero quantity.
    pub fn record_transaction(&mut self, item_id: &str, quantity: u32, is_buy: bool) {
        let Some(def) = catalog::item(item_id) else {
            return;
        };
        if quantity == 0 {
            return;
        }

        let impact = quantity as f64 * TRANSACTION_IMPACT;
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

        let (supply, demand) = if is_buy {
            ((supply - impact).max(LEVEL_FLOOR), demand + impact)
        } else {
            (supply + impact, (demand - impact).max(LEVEL_FLOOR))
        };

        self.supply.insert(item_id.to_string(), supply);
        self.demand.insert(item_id.to_string(), demand);

        #[cfg(feature = "instrument")]
        tracing::debug!(
            target: "market",
            zone = %self.zone,
            item = item_id,
            quantity = quantity,
            is_buy = is_buy,
            supply = supply,
            demand = demand,
            "transaction recorded"
        );
    }

    /// Apply a one-shot multiplicative shock to every item in the event's
    /// target category (every item, for an unrecognized event). The change
    /// is immediate and permanent: the next `update_prices` continues from
    /// the shocked price, there is no decay of the effect itself.
    pub fn apply_event_effect(&mut self, event: &str, multiplier: f64) {
        let target = event_target(event);

        for def in &CATALOG {
            if let Some(category) = target {
                if def.category != category {
                    continue;
                }
            }
            let current = self.prices.get(def.id).copied().unwrap_or(def.base_price);
            let shocked = (current as f64 * multiplier)
                .clamp(def.min_price as f64, def.max_price as f64)
                .round() as u32;
            self.prices.insert(def.id.to_string(), shocked);
        }

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "market",
            zone = %self.zone,
            event = event,
            multiplier = multiplier,
            "event effect applied"
        );
    }
}
