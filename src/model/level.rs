use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::LevelSettings;

/// Which side of price a level sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelKind {
    Support,
    Resistance,
}

/// One reported level: price rounded to cents, confidence in [0, 100],
/// touches counted over the full candle history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalLevel {
    pub price: f64,
    pub confidence: u8,
    pub touches: usize,
}

/// Output of one `compute_levels` invocation. `support_levels` and
/// `resistance_levels` are each ascending and capped at
/// `settings.max_levels_per_side`; the remaining fields are audit metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelsResult {
    pub support_levels: Vec<f64>,
    pub resistance_levels: Vec<f64>,
    /// Algorithm family identifier, bumped only when the scoring model changes.
    pub method: String,
    /// Unweighted mean confidence across all retained levels, 0 if none.
    pub confidence: u8,
    /// Formatted price -> touch count, both sides combined.
    pub touch_counts: BTreeMap<String, usize>,
    pub support_details: Vec<TechnicalLevel>,
    pub resistance_details: Vec<TechnicalLevel>,
    /// Wall-clock time of computation, not a candle time.
    pub last_updated: DateTime<Utc>,
    /// Effective settings after defaults were applied.
    pub settings: LevelSettings,
}
