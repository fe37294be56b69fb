//! Smoke coverage for the wasm boundary. Runs only under a wasm test
//! runner; native `cargo test` skips this file entirely.

#![cfg(target_arch = "wasm32")]

use market_core::MarketSim;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn market_sim_initializes_over_the_boundary() {
    let mut sim = MarketSim::new("verdant_vale".to_string());
    sim.update_prices(1);
    assert_eq!(sim.get_price("iron_ore").is_some(), true);

    let snapshot = sim.get_snapshot();
    assert_eq!(snapshot.items.len(), 30);
    assert_eq!(snapshot.tick, 1);
}

#[wasm_bindgen_test]
fn merchant_purchase_outcome_crosses_the_boundary() {
    let mut sim = MarketSim::new("verdant_vale".to_string());
    let merchant_id = sim.spawn_merchant(1, 0);
    let outcome = sim.buy_from_merchant("player_1", &merchant_id, "no_such_item", 1);
    assert!(!outcome.success);
}
