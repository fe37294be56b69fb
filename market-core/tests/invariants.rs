//! Invariant tests for the market engine.
//!
//! These verify the properties that must hold after any call sequence:
//! determinism, price bounds, supply/demand floors, the bounded history
//! window, idempotent initialization, and the asymmetric demand reversion.

use market_core::{CATALOG, MarketState};

// === TEST FIXTURES ===

fn fresh_market() -> MarketState {
    let mut state = MarketState::new("verdant_vale");
    state.initialize();
    state
}

fn assert_approx(actual: f64, expected: f64, label: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{}: expected {}, got {}",
        label,
        expected,
        actual
    );
}

// === DETERMINISM ===

#[test]
fn test_update_is_deterministic_for_a_tick() {
    let mut a = fresh_market();
    a.record_transaction("iron_ore", 20, true);
    a.record_transaction("bread", 40, false);
    let mut b = a.clone();

    a.update_prices(7);
    b.update_prices(7);

    assert_eq!(a.prices, b.prices);
    assert_eq!(a.history, b.history);
    assert_eq!(a.last_update, b.last_update);
}

#[test]
fn test_merchant_spawn_does_not_perturb_price_noise() {
    let mut a = fresh_market();
    let mut b = a.clone();

    // Spawning merchants draws from an independent stream; the next price
    // update must be unaffected.
    b.spawn_merchant(99, 0);
    b.spawn_merchant(100, 0);

    a.update_prices(3);
    b.update_prices(3);
    assert_eq!(a.prices, b.prices);
}

// === BOUNDS ===

#[test]
fn test_prices_stay_in_bounds_under_stress() {
    let mut state = fresh_market();

    for tick in 1..=150u64 {
        // Lopsided trade pressure to push ratios to extremes.
        state.record_transaction("iron_ore", 500, true);
        state.record_transaction("bread", 500, false);
        if tick % 10 == 0 {
            state.apply_event_effect("iron_shortage", 3.0);
        }
        if tick % 17 == 0 {
            state.apply_event_effect("some_unknown_event", 0.1);
        }
        state.update_prices(tick);

        for def in &CATALOG {
            let price = state.price(def.id).unwrap();
            assert!(
                (def.min_price..=def.max_price).contains(&price),
                "tick {}: {} price {} outside [{}, {}]",
                tick,
                def.id,
                price,
                def.min_price,
                def.max_price
            );
        }
    }
}

#[test]
fn test_event_effect_clamps_to_bounds() {
    let mut state = fresh_market();
    state.apply_event_effect("iron_shortage", 1000.0);
    assert_eq!(state.price("iron_ore"), Some(30)); // max_price

    let mut state = fresh_market();
    state.apply_event_effect("iron_shortage", 0.0001);
    assert_eq!(state.price("iron_ore"), Some(4)); // min_price
}

// === SUPPLY/DEMAND FLOOR ===

#[test]
fn test_supply_and_demand_never_drop_below_one() {
    let mut state = fresh_market();

    // Massive one-sided volume would push levels negative without the floor.
    state.record_transaction("iron_ore", 100_000, true);
    state.record_transaction("bread", 100_000, false);

    for tick in 1..=50u64 {
        state.update_prices(tick);
        for def in &CATALOG {
            let (supply, demand) = state.supply_demand(def.id).unwrap();
            assert!(supply >= 1.0, "{}: supply {} < 1", def.id, supply);
            assert!(demand >= 1.0, "{}: demand {} < 1", def.id, demand);
        }
    }
}

// === BOUNDED HISTORY ===

#[test]
fn test_history_is_a_rolling_window_of_100() {
    let mut state = fresh_market();
    for tick in 1..=120u64 {
        state.update_prices(tick);
    }

    for def in &CATALOG {
        let hist: Vec<_> = state.price_history(def.id).collect();
        assert_eq!(hist.len(), 100, "{}: history not capped", def.id);
        // Oldest 20 samples evicted: window now starts at tick 21.
        assert_eq!(hist[0].tick, 21, "{}: wrong oldest tick", def.id);
        for pair in hist.windows(2) {
            assert!(
                pair[0].tick < pair[1].tick,
                "{}: history not strictly tick-ascending",
                def.id
            );
        }
    }

    // One more update advances the window by exactly one.
    state.update_prices(121);
    let hist: Vec<_> = state.price_history("iron_ore").collect();
    assert_eq!(hist.len(), 100);
    assert_eq!(hist[0].tick, 22);
}

// === IDEMPOTENT INITIALIZATION ===

#[test]
fn test_initialize_never_resets_populated_entries() {
    let mut state = fresh_market();
    state.record_transaction("iron_ore", 50, true);
    state.update_prices(1);

    let before = state.clone();
    state.initialize();

    assert_eq!(state.prices, before.prices);
    assert_eq!(state.history, before.history);
    assert_eq!(state.supply, before.supply);
    assert_eq!(state.demand, before.demand);
}

#[test]
fn test_initialize_fills_only_missing_entries() {
    let mut state = MarketState::new("verdant_vale");
    state.prices.insert("iron_ore".to_string(), 25);
    state.initialize();

    // Pre-existing entry kept, the rest filled with catalog baselines.
    assert_eq!(state.price("iron_ore"), Some(25));
    assert_eq!(state.price("wood"), Some(5));
    assert_eq!(state.prices.len(), CATALOG.len());
}

// === ASYMMETRIC DEMAND REVERSION ===

#[test]
fn test_demand_above_supply_only_decays() {
    let mut state = fresh_market();
    // iron_ore: base supply 120, demand_decay 0.10
    state.demand.insert("iron_ore".to_string(), 200.0);

    state.update_prices(1);

    // decayed = 200 * 0.9 = 180, still above supply: no pull-down beyond decay
    let (_, demand) = state.supply_demand("iron_ore").unwrap();
    assert_approx(demand, 180.0, "elevated demand");
}

#[test]
fn test_demand_below_supply_is_pulled_up() {
    let mut state = fresh_market();
    state.demand.insert("iron_ore".to_string(), 50.0);

    state.update_prices(1);

    // decayed = 50 * 0.9 = 45; below supply 120, pulled 10% of the gap back:
    // 45 + (120 - 45) * 0.1 = 52.5
    let (_, demand) = state.supply_demand("iron_ore").unwrap();
    assert_approx(demand, 52.5, "depressed demand");
}

// === MERCHANT LIST IS APPEND-ONLY ===

#[test]
fn test_expired_merchants_stay_in_the_list() {
    let mut state = fresh_market();
    state.spawn_merchant(1, 0);

    assert_eq!(state.active_merchants(99).len(), 1);
    assert_eq!(state.active_merchants(100).len(), 0); // expires_at == 100
    assert_eq!(
        state.merchants.len(),
        1,
        "reading active merchants must never prune the underlying list"
    );
}

// === OPAQUE PERSISTENCE ===

#[test]
fn test_state_survives_a_serde_round_trip() {
    let mut state = fresh_market();
    state.record_transaction("iron_ore", 10, true);
    state.spawn_merchant(5, 2);
    for tick in 1..=20u64 {
        state.update_prices(tick);
    }

    let json = serde_json::to_string(&state).unwrap();
    let restored: MarketState = serde_json::from_str(&json).unwrap();
    assert_eq!(state, restored);
}
