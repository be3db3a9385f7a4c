use crate::model::candle::Candle;
use crate::model::level::LevelKind;

/// A detected swing extremum. Lives only for the duration of one
/// `compute_levels` call; clustering consumes these immediately.
#[derive(Debug, Clone, Copy)]
pub struct PivotPoint {
    pub price: f64,
    pub time: i64,
    /// Candle volume relative to the series average, 1.0 when volume is
    /// unavailable or the baseline is zero.
    pub normalized_volume: f64,
    pub kind: LevelKind,
}

fn is_swing_high(candles: &[Candle], i: usize, k: usize) -> bool {
    let hi = candles[i].high;
    // A neighbor matching the extreme exactly disqualifies the candidate, so
    // plateaus produce no pivot at all.
    candles[i - k..i].iter().all(|c| c.high < hi)
        && candles[i + 1..=i + k].iter().all(|c| c.high < hi)
}

fn is_swing_low(candles: &[Candle], i: usize, k: usize) -> bool {
    let lo = candles[i].low;
    candles[i - k..i].iter().all(|c| c.low > lo)
        && candles[i + 1..=i + k].iter().all(|c| c.low > lo)
}

fn normalized_volume(candle: &Candle, avg_volume: f64) -> f64 {
    match candle.volume {
        Some(v) if v.is_finite() && avg_volume > 0.0 => v / avg_volume,
        _ => 1.0,
    }
}

/// Scan for swing highs (resistance pivots) and swing lows (support pivots)
/// confirmed by `swing_lookback` candles on both sides. A candle may be both
/// at once and then emits two pivots. Series shorter than
/// `2 * swing_lookback + 1` yield no pivots.
pub fn detect_pivots(candles: &[Candle], swing_lookback: usize, avg_volume: f64) -> Vec<PivotPoint> {
    let k = swing_lookback;
    if candles.len() < 2 * k + 1 {
        return Vec::new();
    }

    let mut pivots = Vec::new();
    for i in k..candles.len() - k {
        let candle = &candles[i];
        if is_swing_high(candles, i, k) {
            pivots.push(PivotPoint {
                price: candle.high,
                time: candle.time,
                normalized_volume: normalized_volume(candle, avg_volume),
                kind: LevelKind::Resistance,
            });
        }
        if is_swing_low(candles, i, k) {
            pivots.push(PivotPoint {
                price: candle.low,
                time: candle.time,
                normalized_volume: normalized_volume(candle, avg_volume),
                kind: LevelKind::Support,
            });
        }
    }
    pivots
}
