use crate::model::level::LevelKind;

use super::pivot::PivotPoint;

const VOLUME_WEIGHT_MIN: f64 = 0.5;
const VOLUME_WEIGHT_MAX: f64 = 3.0;

/// Accumulator for nearby same-kind pivots. `avg_price` is a volume-weighted
/// running mean, so it drifts as pivots merge in.
#[derive(Debug, Clone)]
pub struct LevelCluster {
    pub kind: LevelKind,
    pub avg_price: f64,
    pub total_weight: f64,
    pub touches: usize,
    pub pivot_count: usize,
    pub volume_score: f64,
}

impl LevelCluster {
    fn open(kind: LevelKind, price: f64, weight: f64) -> Self {
        Self {
            kind,
            avg_price: price,
            total_weight: weight,
            touches: 1,
            pivot_count: 1,
            volume_score: weight,
        }
    }

    fn absorb(&mut self, price: f64, weight: f64) {
        self.avg_price =
            (self.avg_price * self.total_weight + price * weight) / (self.total_weight + weight);
        self.total_weight += weight;
        self.touches += 1;
        self.pivot_count += 1;
        self.volume_score += weight;
    }
}

/// Weight a pivot contributes to its cluster. A missing or zero normalized
/// volume counts as exactly 1, while present volume clamps into
/// [0.5, 3.0] -- intentional asymmetry, kept for output compatibility.
fn volume_multiplier(pivot: &PivotPoint, use_volume_confirmation: bool) -> f64 {
    if !use_volume_confirmation {
        return 1.0;
    }
    let nv = if pivot.normalized_volume > 0.0 {
        pivot.normalized_volume
    } else {
        1.0
    };
    nv.clamp(VOLUME_WEIGHT_MIN, VOLUME_WEIGHT_MAX)
}

/// Merge pivots of `kind` into price clusters, first fit in detection order:
/// the earliest cluster whose current average lies within
/// `avg_price * proximity_percent` of the pivot absorbs it. First-fit against
/// a drifting average is order-sensitive by design; earlier clusters win
/// nearby pivots. Do not replace with a nearest-cluster merge.
pub fn cluster_pivots(
    pivots: &[PivotPoint],
    kind: LevelKind,
    proximity_percent: f64,
    use_volume_confirmation: bool,
) -> Vec<LevelCluster> {
    let mut clusters: Vec<LevelCluster> = Vec::new();

    for pivot in pivots.iter().filter(|p| p.kind == kind) {
        let weight = volume_multiplier(pivot, use_volume_confirmation);
        let found = clusters
            .iter_mut()
            .find(|c| (pivot.price - c.avg_price).abs() <= c.avg_price * proximity_percent);
        match found {
            Some(cluster) => cluster.absorb(pivot.price, weight),
            None => clusters.push(LevelCluster::open(kind, pivot.price, weight)),
        }
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pivot(price: f64, normalized_volume: f64, kind: LevelKind) -> PivotPoint {
        PivotPoint {
            price,
            time: 0,
            normalized_volume,
            kind,
        }
    }

    #[test]
    fn multiplier_clamps_present_volume() {
        let p = pivot(100.0, 10.0, LevelKind::Support);
        assert!((volume_multiplier(&p, true) - 3.0).abs() < f64::EPSILON);

        let p = pivot(100.0, 0.1, LevelKind::Support);
        assert!((volume_multiplier(&p, true) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn multiplier_is_one_for_zero_volume() {
        // Zero normalized volume maps to 1.0, not to the 0.5 clamp floor.
        let p = pivot(100.0, 0.0, LevelKind::Support);
        assert!((volume_multiplier(&p, true) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn multiplier_is_one_when_confirmation_disabled() {
        let p = pivot(100.0, 10.0, LevelKind::Support);
        assert!((volume_multiplier(&p, false) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn weighted_average_update() {
        let pivots = vec![
            pivot(100.0, 1.0, LevelKind::Support),
            pivot(100.4, 3.0, LevelKind::Support),
        ];
        let clusters = cluster_pivots(&pivots, LevelKind::Support, 0.006, true);
        assert_eq!(clusters.len(), 1);
        let c = &clusters[0];
        assert_eq!(c.pivot_count, 2);
        assert_eq!(c.touches, 2);
        assert!((c.total_weight - 4.0).abs() < f64::EPSILON);
        // (100.0 * 1 + 100.4 * 3) / 4
        assert!((c.avg_price - 100.3).abs() < 1e-9);
    }

    #[test]
    fn distant_pivot_opens_new_cluster() {
        let pivots = vec![
            pivot(100.0, 1.0, LevelKind::Support),
            pivot(105.0, 1.0, LevelKind::Support),
        ];
        let clusters = cluster_pivots(&pivots, LevelKind::Support, 0.006, true);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn first_fit_prefers_earliest_cluster() {
        // Third pivot is within proximity of both clusters; the first one
        // formed must absorb it.
        let pivots = vec![
            pivot(100.0, 1.0, LevelKind::Resistance),
            pivot(100.9, 1.0, LevelKind::Resistance),
            pivot(100.45, 1.0, LevelKind::Resistance),
        ];
        let clusters = cluster_pivots(&pivots, LevelKind::Resistance, 0.005, true);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].pivot_count, 2);
        assert_eq!(clusters[1].pivot_count, 1);
    }

    #[test]
    fn kinds_never_mix() {
        let pivots = vec![
            pivot(100.0, 1.0, LevelKind::Support),
            pivot(100.1, 1.0, LevelKind::Resistance),
        ];
        let clusters = cluster_pivots(&pivots, LevelKind::Support, 0.006, true);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].pivot_count, 1);
    }
}
