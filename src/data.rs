//! Candle file loading for the CLI boundary.
//!
//! The engine trusts its input: it does not re-sort and does not re-validate.
//! Ordering and shape checks belong here, on the caller side of the contract.

use std::path::Path;

use crate::error::AppError;
use crate::model::candle::Candle;

/// Validate a single candle has usable values.
pub fn validate_candle(candle: &Candle) -> bool {
    candle.open.is_finite()
        && candle.high.is_finite()
        && candle.low.is_finite()
        && candle.close.is_finite()
        && candle.high >= candle.low
        && candle.open > 0.0
        && candle.high > 0.0
        && candle.low > 0.0
        && candle.close > 0.0
        && candle.volume.map_or(true, |v| v.is_finite() && v >= 0.0)
}

/// Load a JSON array of candles and check it is fit to feed the engine:
/// every candle well-formed and `time` strictly ascending (oldest first).
pub fn load_candles(path: &Path) -> Result<Vec<Candle>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let candles: Vec<Candle> = serde_json::from_str(&raw)?;

    for (i, candle) in candles.iter().enumerate() {
        if !validate_candle(candle) {
            return Err(AppError::Data(format!(
                "candle {} has malformed OHLCV values",
                i
            )));
        }
    }
    if let Some(w) = candles.windows(2).position(|w| w[1].time <= w[0].time) {
        return Err(AppError::Data(format!(
            "candles must be strictly ascending by time (violation at index {})",
            w + 1
        )));
    }

    Ok(candles)
}
