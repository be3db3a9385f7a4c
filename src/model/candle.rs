use serde::{Deserialize, Serialize};

/// One OHLCV bar. `time` is a millisecond timestamp in practice, but the
/// engine only relies on the caller supplying bars oldest first. `volume` is
/// optional; feeds without volume still produce levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl Candle {
    /// Whether this candle's trading range crosses the band `[lo, hi]`.
    pub fn intersects_band(&self, lo: f64, hi: f64) -> bool {
        self.low <= hi && self.high >= lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(low: f64, high: f64) -> Candle {
        Candle {
            time: 0,
            open: low,
            high,
            low,
            close: high,
            volume: None,
        }
    }

    #[test]
    fn band_intersection() {
        let c = candle(99.0, 101.0);
        assert!(c.intersects_band(100.0, 100.5));
        assert!(c.intersects_band(98.0, 99.0));
        assert!(c.intersects_band(101.0, 102.0));
        assert!(!c.intersects_band(101.1, 103.0));
        assert!(!c.intersects_band(95.0, 98.9));
    }

    #[test]
    fn volume_defaults_to_none_when_absent() {
        let c: Candle =
            serde_json::from_str(r#"{"time":1,"open":1.0,"high":2.0,"low":0.5,"close":1.5}"#)
                .unwrap();
        assert_eq!(c.volume, None);
    }
}
