use std::path::PathBuf;

use sr_levels::data::load_candles;
use sr_levels::error::AppError;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("sr-levels-{}-{}.json", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_ordered_series() {
    let path = write_temp(
        "ok",
        r#"[
            {"time": 1, "open": 100.0, "high": 101.0, "low": 99.0, "close": 100.5, "volume": 12.0},
            {"time": 2, "open": 100.5, "high": 102.0, "low": 100.0, "close": 101.0}
        ]"#,
    );
    let candles = load_candles(&path).unwrap();
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].volume, Some(12.0));
    assert_eq!(candles[1].volume, None);
    std::fs::remove_file(&path).ok();
}

#[test]
fn rejects_out_of_order_series() {
    let path = write_temp(
        "unordered",
        r#"[
            {"time": 2, "open": 100.0, "high": 101.0, "low": 99.0, "close": 100.5},
            {"time": 1, "open": 100.5, "high": 102.0, "low": 100.0, "close": 101.0}
        ]"#,
    );
    let err = load_candles(&path).unwrap_err();
    assert!(matches!(err, AppError::Data(_)), "got {err}");
    std::fs::remove_file(&path).ok();
}

#[test]
fn rejects_malformed_candle() {
    let path = write_temp(
        "malformed",
        r#"[{"time": 1, "open": 100.0, "high": 98.0, "low": 99.0, "close": 100.5}]"#,
    );
    let err = load_candles(&path).unwrap_err();
    assert!(matches!(err, AppError::Data(_)), "got {err}");
    std::fs::remove_file(&path).ok();
}

#[test]
fn rejects_invalid_json() {
    let path = write_temp("badjson", "not json");
    let err = load_candles(&path).unwrap_err();
    assert!(matches!(err, AppError::Json(_)), "got {err}");
    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_file_is_io_error() {
    let err = load_candles(&PathBuf::from("/nonexistent/candles.json")).unwrap_err();
    assert!(matches!(err, AppError::Io(_)), "got {err}");
}
