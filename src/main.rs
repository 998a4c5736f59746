use anyhow::{Context, Result};

use leverage_engine::config::Config;
use leverage_engine::runner::{read_inputs, run_with_timeout, write_document};
use leverage_engine::LeverageEngine;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::load(args.first().map(String::as_str)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            }),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .json()
        .init();

    tracing::info!(
        symbol = %config.data.symbol,
        input = %config.data.input_path.display(),
        window = config.leverage.window_trading_days,
        "Starting leverage-engine"
    );

    let mut inputs = read_inputs(&config.data.input_path)
        .with_context(|| format!("failed to read {}", config.data.input_path.display()))?;
    if inputs.symbol.trim().is_empty() {
        inputs.symbol = config.data.normalized_symbol();
    }

    let engine = LeverageEngine::new(config.leverage.clone())?;
    let doc = run_with_timeout(engine, inputs, config.runtime.timeout()).await?;

    write_document(&config.data.output_path, &doc)
        .with_context(|| format!("failed to write {}", config.data.output_path.display()))?;

    tracing::info!(
        as_of = %doc.leverage.as_of,
        output = %config.data.output_path.display(),
        l_blend = doc.leverage.suggested.l_blend,
        "Updated metrics"
    );
    Ok(())
}
