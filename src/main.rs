use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use sr_levels::config::Config;
use sr_levels::data::load_candles;
use sr_levels::levels::compute_levels;

fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            std::process::exit(1);
        }
    };

    // Logs go to stderr so stdout stays machine-readable JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap())
            }),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .json()
        .init();

    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        bail!("usage: sr-levels <candles.json>");
    };

    let candles = load_candles(&path)
        .with_context(|| format!("failed to load candles from {}", path.display()))?;
    tracing::info!(
        count = candles.len(),
        path = %path.display(),
        "Loaded candle series"
    );

    let result = compute_levels(&candles, &config.engine);
    tracing::info!(
        support = result.support_levels.len(),
        resistance = result.resistance_levels.len(),
        confidence = result.confidence,
        "Computed levels"
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
