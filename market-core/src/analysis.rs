//! Read-only derived views over the market state: trend classification,
//! short-horizon price forecasts, top movers, and aggregate health stats.
//! Nothing in this module mutates state.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::catalog::{self, CATALOG};
use crate::state::MarketState;
use crate::types::Trend;

/// Default history window for trend classification.
pub const TREND_WINDOW: usize = 10;

/// Forecast window: the last N samples feed the linear extrapolation.
const FORECAST_WINDOW: usize = 10;

/// Relative first-half/second-half divergence that counts as a direction.
const TREND_CHANGE_THRESHOLD: f64 = 0.03;

/// Coefficient of variation above which a directionless window is volatile.
const VOLATILITY_THRESHOLD: f64 = 0.15;

/// Number of items reported as "most traded" in the aggregate stats.
const MOST_TRADED_COUNT: usize = 5;

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

// ============================================================================
// Derived-view DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Mover {
    pub id: String,
    pub name: String,
    /// Percent change from the oldest to the newest stored sample.
    pub change_pct: f64,
    pub from: u32,
    pub to: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct TradeActivity {
    pub id: String,
    pub name: String,
    /// |demand - supply|, a proxy for trade pressure, not a true count.
    pub imbalance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct MarketStats {
    /// Mean of price/base across the whole catalog; 1.0 = at baseline.
    pub price_index: f64,
    /// Sum of |demand - supply| across the catalog.
    pub trade_volume: f64,
    pub most_traded: Vec<TradeActivity>,
}

impl MarketState {
    /// Classify the recent price history of an item with the default window.
    pub fn price_trend(&self, item_id: &str) -> Trend {
        self.price_trend_with_window(item_id, TREND_WINDOW)
    }

    /// Classify the last `window` history samples of an item.
    ///
    /// Split the window in half and compare half-averages; a relative change
    /// beyond ±3% is a direction. Direction always wins over volatility: a
    /// noisy window whose halves diverge enough is still a clean trend.
    /// Fewer than 2 samples is `Stable`.
    pub fn price_trend_with_window(&self, item_id: &str, window: usize) -> Trend {
        let Some(hist) = self.history.get(item_id) else {
            return Trend::Stable;
        };
        if hist.len() < 2 || window < 2 {
            return Trend::Stable;
        }

        let start = hist.len().saturating_sub(window);
        let recent: Vec<f64> = hist.iter().skip(start).map(|p| p.price as f64).collect();

        let half = recent.len() / 2;
        let first_avg = mean(&recent[..half]);
        let second_avg = mean(&recent[half..]);
        if first_avg > 0.0 {
            let change = (second_avg - first_avg) / first_avg;
            if change > TREND_CHANGE_THRESHOLD {
                return Trend::Rising;
            }
            if change < -TREND_CHANGE_THRESHOLD {
                return Trend::Falling;
            }
        }

        let window_mean = mean(&recent);
        if window_mean > 0.0 && std_dev(&recent, window_mean) / window_mean > VOLATILITY_THRESHOLD
        {
            return Trend::Volatile;
        }
        Trend::Stable
    }

    /// Short-horizon forecast: linear slope from the oldest to the newest of
    /// the last 10 samples, extrapolated `ticks_ahead` and clamped to the
    /// item's price range. A currently-volatile item gets a damped estimate
    /// (`0.7 * current + 0.3 * base`) instead of the extrapolation.
    pub fn predict_price(&self, item_id: &str, ticks_ahead: u64) -> Option<u32> {
        let def = catalog::item(item_id)?;
        let current = self.price(item_id)? as f64;
        let (min, max) = (def.min_price as f64, def.max_price as f64);

        if self.price_trend(item_id) == Trend::Volatile {
            let damped = 0.7 * current + 0.3 * def.base_price as f64;
            return Some(damped.clamp(min, max).round() as u32);
        }

        let recent: Vec<f64> = self
            .history
            .get(item_id)
            .map(|hist| {
                let start = hist.len().saturating_sub(FORECAST_WINDOW);
                hist.iter().skip(start).map(|p| p.price as f64).collect()
            })
            .unwrap_or_default();

        let slope = if recent.len() >= 2 {
            (recent[recent.len() - 1] - recent[0]) / (recent.len() - 1) as f64
        } else {
            0.0
        };

        let predicted = current + slope * ticks_ahead as f64;
        Some(predicted.clamp(min, max).round() as u32)
    }

    /// Items ranked by absolute percent change across their *entire* stored
    /// history (not a fixed window). Items with fewer than 2 samples are
    /// skipped.
    pub fn top_movers(&self, count: usize) -> Vec<Mover> {
        let mut movers: Vec<Mover> = CATALOG
            .iter()
            .filter_map(|def| {
                let hist = self.history.get(def.id)?;
                let oldest = hist.front()?;
                let newest = hist.back()?;
                if hist.len() < 2 || oldest.price == 0 {
                    return None;
                }
                let change_pct = (newest.price as f64 - oldest.price as f64)
                    / oldest.price as f64
                    * 100.0;
                Some(Mover {
                    id: def.id.to_string(),
                    name: def.name.to_string(),
                    change_pct,
                    from: oldest.price,
                    to: newest.price,
                })
            })
            .collect();

        movers.sort_by(|a, b| {
            b.change_pct
                .abs()
                .partial_cmp(&a.change_pct.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        movers.truncate(count);
        movers
    }

    /// Aggregate market health: a price-level index, a trade-volume proxy,
    /// and the 5 items with the largest supply/demand imbalance.
    pub fn market_stats(&self) -> MarketStats {
        let mut index_sum = 0.0;
        let mut volume = 0.0;
        let mut activity: Vec<TradeActivity> = Vec::with_capacity(CATALOG.len());

        for def in &CATALOG {
            let price = self.price(def.id).unwrap_or(def.base_price) as f64;
            index_sum += price / def.base_price as f64;

            let (supply, demand) = self
                .supply_demand(def.id)
                .unwrap_or((def.base_supply, def.base_supply));
            let imbalance = (demand - supply).abs();
            volume += imbalance;
            activity.push(TradeActivity {
                id: def.id.to_string(),
                name: def.name.to_string(),
                imbalance,
            });
        }

        activity.sort_by(|a, b| {
            b.imbalance
                .partial_cmp(&a.imbalance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        activity.truncate(MOST_TRADED_COUNT);

        MarketStats {
            price_index: index_sum / CATALOG.len() as f64,
            trade_volume: volume,
            most_traded: activity,
        }
    }
}
