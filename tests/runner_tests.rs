use std::time::Duration;

use chrono::NaiveDate;
use leverage_engine::runner::{read_inputs, run_with_timeout, write_document};
use leverage_engine::{LeverageEngine, LeverageParams, MarketInputs, Observation};

fn inputs(n: usize) -> MarketInputs {
    let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
    let dates: Vec<NaiveDate> = start.iter_days().take(n).collect();
    MarketInputs {
        symbol: "QQQ".to_string(),
        price: dates
            .iter()
            .enumerate()
            .map(|(i, d)| Observation::new(*d, 100.0 + (i as f64 * 0.9).sin()))
            .collect(),
        risk_free: dates.iter().map(|d| Observation::new(*d, 0.0001)).collect(),
        benchmark: None,
    }
}

#[test]
fn runs_engine_under_deadline() {
    let engine = LeverageEngine::new(LeverageParams::default()).unwrap();
    let doc = tokio_test::block_on(run_with_timeout(
        engine,
        inputs(40),
        Duration::from_secs(30),
    ))
    .unwrap();
    assert_eq!(doc.leverage.series.len(), 39);
}

#[tokio::test]
async fn engine_errors_surface_through_runner() {
    let engine = LeverageEngine::new(LeverageParams::default()).unwrap();
    let err = run_with_timeout(engine, inputs(1), Duration::from_secs(30))
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("data error"));
}

#[tokio::test]
async fn document_round_trips_through_files() {
    let dir = std::env::temp_dir().join(format!("leverage-engine-{}", std::process::id()));
    let input_path = dir.join("inputs.json");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(&input_path, serde_json::to_string(&inputs(30)).unwrap()).unwrap();

    let loaded = read_inputs(&input_path).unwrap();
    assert_eq!(loaded.price.len(), 30);

    let engine = LeverageEngine::new(LeverageParams::default()).unwrap();
    let doc = run_with_timeout(engine, loaded, Duration::from_secs(30))
        .await
        .unwrap();

    let out_path = dir.join("nested").join("metrics.json");
    write_document(&out_path, &doc).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(written["leverage"]["series"].as_array().unwrap().len(), 29);

    std::fs::remove_dir_all(&dir).ok();
}
