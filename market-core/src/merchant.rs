//! Wandering-merchant lifecycle: time-limited NPC vendors with randomized
//! inventories drawn from the merchant-exclusive catalog. Merchant stock is
//! independent of the main catalog's supply/demand tracking; purchases here
//! never go through the transaction recorder.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::catalog::MERCHANT_CATALOG;
use crate::rng::MerchantStream;
use crate::state::{MarketState, Merchant, MerchantStock};
use crate::types::PurchaseError;

/// Ticks a merchant stays in the zone after spawning.
pub const MERCHANT_LIFETIME_TICKS: u64 = 100;

const MIN_STOCK_LINES: usize = 3;
const MAX_STOCK_LINES: usize = 6;

/// Name pools. Draw order is given name first, then epithet — part of the
/// determinism contract for a given spawn seed.
const GIVEN_NAMES: [&str; 8] = [
    "Aldric", "Bryn", "Casca", "Dorian", "Elva", "Fenn", "Greta", "Hobb",
];
const EPITHETS: [&str; 8] = [
    "Wandering", "Cheerful", "Mysterious", "Grumpy", "Lucky", "Shrewd", "Dusty", "Jolly",
];

/// A completed merchant sale. `item` is the post-decrement stock line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Purchase {
    pub cost: u64,
    pub item: MerchantStock,
}

impl MarketState {
    /// Spawn a wandering merchant from a seed. The merchant rolls come from
    /// their own seeded stream, so spawning never perturbs price noise.
    ///
    /// Inventory: 3-6 unique items drawn without replacement from the
    /// merchant catalog, each with quantity 1-5 and a price uniform within
    /// that item's range. Lifetime is 100 ticks from `tick`.
    pub fn spawn_merchant(&mut self, seed: u32, tick: u64) -> &Merchant {
        let mut rng = MerchantStream::new(seed);

        let given = GIVEN_NAMES[rng.random_range(0..GIVEN_NAMES.len())];
        let epithet = EPITHETS[rng.random_range(0..EPITHETS.len())];
        let name = format!("{given} the {epithet}");

        let count = rng.random_range(MIN_STOCK_LINES..=MAX_STOCK_LINES);
        let mut pool: Vec<usize> = (0..MERCHANT_CATALOG.len()).collect();
        let mut inventory = Vec::with_capacity(count);
        for _ in 0..count {
            let pick = rng.random_range(0..pool.len());
            let def = &MERCHANT_CATALOG[pool.swap_remove(pick)];
            let quantity = rng.random_range(1..=5u32);
            let price = rng.random_range(def.min_price..=def.max_price);
            inventory.push(MerchantStock {
                id: def.id.to_string(),
                name: def.name.to_string(),
                quantity,
                price,
            });
        }

        let merchant = Merchant {
            id: format!("merchant_{seed}_{tick}"),
            name,
            zone: self.zone.clone(),
            inventory,
            spawned_at: tick,
            expires_at: tick + MERCHANT_LIFETIME_TICKS,
            seed,
        };

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "merchant",
            zone = %self.zone,
            merchant = %merchant.id,
            name = %merchant.name,
            items = merchant.inventory.len(),
            expires_at = merchant.expires_at,
            "merchant spawned"
        );

        let idx = self.merchants.len();
        self.merchants.push(merchant);
        &self.merchants[idx]
    }

    /// Merchants still present at `tick`. Expired entries stay in the
    /// underlying list; this only filters the view.
    pub fn active_merchants(&self, tick: u64) -> Vec<&Merchant> {
        self.merchants.iter().filter(|m| m.is_active(tick)).collect()
    }

    /// Buy from a wandering merchant, decrementing their stock in place.
    /// Fails with a machine-readable reason rather than panicking; callers
    /// branch on the result. Has no effect on catalog supply/demand.
    pub fn buy_from_merchant(
        &mut self,
        player_id: &str,
        merchant_id: &str,
        item_id: &str,
        quantity: u32,
    ) -> Result<Purchase, PurchaseError> {
        if !self.is_initialized() {
            return Err(PurchaseError::MarketNotInitialized);
        }
        if quantity == 0 {
            return Err(PurchaseError::InvalidQuantity);
        }

        let merchant = self
            .merchants
            .iter_mut()
            .find(|m| m.id == merchant_id)
            .ok_or(PurchaseError::MerchantNotFound)?;

        let stock = merchant
            .inventory
            .iter_mut()
            .find(|s| s.id == item_id)
            .ok_or(PurchaseError::ItemNotInInventory)?;

        if stock.quantity < quantity {
            return Err(PurchaseError::InsufficientStock);
        }

        stock.quantity -= quantity;
        let cost = stock.price as u64 * quantity as u64;
        let purchase = Purchase {
            cost,
            item: stock.clone(),
        };

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "merchant",
            zone = %self.zone,
            player = player_id,
            merchant = merchant_id,
            item = item_id,
            quantity = quantity,
            cost = cost,
            "merchant sale"
        );
        #[cfg(not(feature = "instrument"))]
        let _ = player_id;

        Ok(purchase)
    }
}
