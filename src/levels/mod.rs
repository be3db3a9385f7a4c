//! Support/resistance level engine.
//!
//! A single forward pass over the candle series: volume baseline -> swing
//! pivot detection -> proximity clustering -> touch-confirmed scoring. Pure
//! and stateless; every invocation owns its pivot and cluster lists and
//! nothing survives the call.

pub mod cluster;
pub mod pivot;
pub mod score;
pub mod volume;

use std::collections::BTreeMap;

use crate::config::LevelSettings;
use crate::model::candle::Candle;
use crate::model::level::{LevelKind, LevelsResult, TechnicalLevel};

/// Algorithm family identifier reported in result metadata, so downstream
/// consumers can detect algorithm changes.
pub const METHOD: &str = "pivot-cluster-touch-score";

fn empty_result(settings: &LevelSettings) -> LevelsResult {
    LevelsResult {
        support_levels: Vec::new(),
        resistance_levels: Vec::new(),
        method: METHOD.to_string(),
        confidence: 0,
        touch_counts: BTreeMap::new(),
        support_details: Vec::new(),
        resistance_details: Vec::new(),
        last_updated: chrono::Utc::now(),
        settings: settings.clone(),
    }
}

fn aggregate_confidence(support: &[TechnicalLevel], resistance: &[TechnicalLevel]) -> u8 {
    let total = support.len() + resistance.len();
    if total == 0 {
        return 0;
    }
    let sum: u32 = support
        .iter()
        .chain(resistance.iter())
        .map(|l| l.confidence as u32)
        .sum();
    (sum as f64 / total as f64).round() as u8
}

/// Compute support and resistance levels for an oldest-first candle series.
///
/// Settings are assumed validated (positive proximity, nonzero lookback and
/// cap); a series shorter than `2 * swing_lookback + 1` degrades to an
/// empty-but-valid result rather than an error.
pub fn compute_levels(candles: &[Candle], settings: &LevelSettings) -> LevelsResult {
    if candles.len() < 2 * settings.swing_lookback + 1 {
        tracing::debug!(
            candles = candles.len(),
            swing_lookback = settings.swing_lookback,
            "Not enough candles for pivot detection, returning empty result"
        );
        return empty_result(settings);
    }

    let avg_volume = volume::average_volume(candles);
    let pivots = pivot::detect_pivots(candles, settings.swing_lookback, avg_volume);

    let support_clusters = cluster::cluster_pivots(
        &pivots,
        LevelKind::Support,
        settings.proximity_percent,
        settings.use_volume_confirmation,
    );
    let resistance_clusters = cluster::cluster_pivots(
        &pivots,
        LevelKind::Resistance,
        settings.proximity_percent,
        settings.use_volume_confirmation,
    );

    let support_details = score::score_and_select(
        &support_clusters,
        candles,
        settings.proximity_percent,
        settings.max_levels_per_side,
    );
    let resistance_details = score::score_and_select(
        &resistance_clusters,
        candles,
        settings.proximity_percent,
        settings.max_levels_per_side,
    );

    tracing::debug!(
        pivots = pivots.len(),
        support_clusters = support_clusters.len(),
        resistance_clusters = resistance_clusters.len(),
        support_levels = support_details.len(),
        resistance_levels = resistance_details.len(),
        "Level pipeline finished"
    );

    let mut touch_counts = BTreeMap::new();
    for level in support_details.iter().chain(resistance_details.iter()) {
        touch_counts.insert(format!("{:.2}", level.price), level.touches);
    }

    LevelsResult {
        support_levels: support_details.iter().map(|l| l.price).collect(),
        resistance_levels: resistance_details.iter().map(|l| l.price).collect(),
        method: METHOD.to_string(),
        confidence: aggregate_confidence(&support_details, &resistance_details),
        touch_counts,
        support_details,
        resistance_details,
        last_updated: chrono::Utc::now(),
        settings: settings.clone(),
    }
}
