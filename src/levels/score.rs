use crate::model::candle::Candle;
use crate::model::level::TechnicalLevel;

use super::cluster::LevelCluster;

const PIVOT_WEIGHT: f64 = 20.0;
const TOUCH_WEIGHT: f64 = 8.0;
const VOLUME_WEIGHT: f64 = 6.0;

/// Round a price for emission. Internally everything runs at full precision.
pub fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Count candles whose [low, high] range crosses the tolerance band around
/// `price`. Scans the whole history, not just pivot candles, so quiet
/// consolidation around a level still confirms it.
fn count_touches(candles: &[Candle], price: f64, proximity_percent: f64) -> usize {
    let tolerance = price * proximity_percent;
    candles
        .iter()
        .filter(|c| c.intersects_band(price - tolerance, price + tolerance))
        .count()
}

fn confidence(pivot_count: usize, touches: usize, volume_score: f64) -> u8 {
    let raw = (pivot_count as f64 * PIVOT_WEIGHT
        + touches as f64 * TOUCH_WEIGHT
        + volume_score * VOLUME_WEIGHT)
        / 2.0;
    raw.round().min(100.0) as u8
}

/// Turn finalized clusters into at most `max_levels_per_side` reported levels:
/// recount touches over the full history, score, keep the most confident,
/// and present the survivors in ascending price order.
pub fn score_and_select(
    clusters: &[LevelCluster],
    candles: &[Candle],
    proximity_percent: f64,
    max_levels_per_side: usize,
) -> Vec<TechnicalLevel> {
    let mut levels: Vec<TechnicalLevel> = clusters
        .iter()
        .map(|cluster| {
            let touches = count_touches(candles, cluster.avg_price, proximity_percent);
            TechnicalLevel {
                price: cluster.avg_price,
                confidence: confidence(cluster.pivot_count, touches, cluster.volume_score),
                touches,
            }
        })
        .collect();

    // Stable sort keeps cluster-formation order between equal confidences.
    levels.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    levels.truncate(max_levels_per_side);
    levels.sort_by(|a, b| a.price.total_cmp(&b.price));

    for level in &mut levels {
        level.price = round_price(level.price);
    }
    levels
}
