use crate::model::candle::Candle;

/// Arithmetic mean of volume over candles that carry a finite volume value.
/// Returns 0.0 when no candle has volume, which later turns volume
/// confirmation into a no-op multiplier of 1.
pub fn average_volume(candles: &[Candle]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for candle in candles {
        if let Some(v) = candle.volume {
            if v.is_finite() {
                sum += v;
                count += 1;
            }
        }
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
