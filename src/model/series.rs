use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// A single dated value. Non-finite values are treated as missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Raw daily series handed over by the data collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketInputs {
    #[serde(default)]
    pub symbol: String,
    pub price: Vec<Observation>,
    pub risk_free: Vec<Observation>,
    #[serde(default)]
    pub benchmark: Option<Vec<Observation>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedRow {
    pub date: NaiveDate,
    pub price: f64,
    pub risk_free_rate: f64,
    pub benchmark_price: Option<f64>,
}

/// Date-intersected, gap-free rows in strictly increasing date order.
#[derive(Debug, Clone)]
pub struct AlignedSeries {
    rows: Vec<AlignedRow>,
    has_benchmark: bool,
}

impl AlignedSeries {
    pub fn from_inputs(inputs: &MarketInputs) -> AnalyticsResult<Self> {
        if inputs.price.is_empty() {
            return Err(AnalyticsError::Data("price series is absent".to_string()));
        }
        if inputs.risk_free.is_empty() {
            return Err(AnalyticsError::Data(
                "risk-free rate series is absent".to_string(),
            ));
        }

        let price = index_by_date(&inputs.price);
        let risk_free = index_by_date(&inputs.risk_free);
        let benchmark = inputs.benchmark.as_deref().map(index_by_date);

        let rows: Vec<AlignedRow> = price
            .iter()
            .filter_map(|(date, &p)| {
                let rf = *risk_free.get(date)?;
                let bench = match &benchmark {
                    Some(b) => Some(*b.get(date)?),
                    None => None,
                };
                let complete = p.is_finite()
                    && rf.is_finite()
                    && bench.map(f64::is_finite).unwrap_or(true);
                complete.then_some(AlignedRow {
                    date: *date,
                    price: p,
                    risk_free_rate: rf,
                    benchmark_price: bench,
                })
            })
            .collect();

        tracing::debug!(
            price_rows = inputs.price.len(),
            aligned_rows = rows.len(),
            dropped = inputs.price.len().saturating_sub(rows.len()),
            benchmark = benchmark.is_some(),
            "Aligned input series"
        );

        if rows.len() < 2 {
            return Err(AnalyticsError::Data(format!(
                "need at least 2 aligned rows to compute a return, got {}",
                rows.len()
            )));
        }

        Ok(Self {
            rows,
            has_benchmark: benchmark.is_some(),
        })
    }

    pub fn rows(&self) -> &[AlignedRow] {
        &self.rows
    }

    pub fn log_returns(&self) -> ReturnSeries {
        let points = self
            .rows
            .windows(2)
            .map(|w| {
                let (prev, cur) = (&w[0], &w[1]);
                let benchmark = match (prev.benchmark_price, cur.benchmark_price) {
                    (Some(b0), Some(b1)) => Some((b1 / b0).ln()),
                    _ => None,
                };
                ReturnPoint {
                    date: cur.date,
                    price_close: cur.price,
                    risk_free_rate: cur.risk_free_rate,
                    log_return: (cur.price / prev.price).ln(),
                    benchmark_return: benchmark,
                }
            })
            .collect();
        ReturnSeries {
            points,
            has_benchmark: self.has_benchmark,
        }
    }
}

/// Later duplicates win, mirroring a last-write date index.
fn index_by_date(obs: &[Observation]) -> BTreeMap<NaiveDate, f64> {
    obs.iter().map(|o| (o.date, o.value)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub price_close: f64,
    pub risk_free_rate: f64,
    pub log_return: f64,
    pub benchmark_return: Option<f64>,
}

/// Log returns keyed to the day each return ends on.
#[derive(Debug, Clone)]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
    has_benchmark: bool,
}

impl ReturnSeries {
    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn returns(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.log_return).collect()
    }

    /// Benchmark returns, present only when every point carries one.
    pub fn benchmark_returns(&self) -> Option<Vec<f64>> {
        if !self.has_benchmark {
            return None;
        }
        self.points.iter().map(|p| p.benchmark_return).collect()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn intersects_dates_and_drops_missing_values() {
        let inputs = MarketInputs {
            symbol: "QQQ".to_string(),
            price: vec![
                Observation::new(d(2), 100.0),
                Observation::new(d(3), 101.0),
                Observation::new(d(4), f64::NAN),
                Observation::new(d(5), 102.0),
            ],
            risk_free: vec![
                Observation::new(d(2), 0.01),
                Observation::new(d(4), 0.01),
                Observation::new(d(5), 0.01),
            ],
            benchmark: None,
        };
        let aligned = AlignedSeries::from_inputs(&inputs).unwrap();
        let dates: Vec<NaiveDate> = aligned.rows().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(2), d(5)]);

        let returns = aligned.log_returns();
        assert_eq!(returns.len(), 1);
        assert!((returns.points()[0].log_return - (102.0f64 / 100.0).ln()).abs() < 1e-15);
    }

    #[test]
    fn unsorted_input_is_ordered_by_date() {
        let inputs = MarketInputs {
            symbol: String::new(),
            price: vec![
                Observation::new(d(3), 110.0),
                Observation::new(d(2), 100.0),
            ],
            risk_free: vec![
                Observation::new(d(2), 0.0),
                Observation::new(d(3), 0.0),
            ],
            benchmark: None,
        };
        let aligned = AlignedSeries::from_inputs(&inputs).unwrap();
        assert_eq!(aligned.rows()[0].date, d(2));
        assert!(aligned.log_returns().points()[0].log_return > 0.0);
    }

    #[test]
    fn single_row_is_a_data_error() {
        let inputs = MarketInputs {
            symbol: String::new(),
            price: vec![Observation::new(d(2), 100.0)],
            risk_free: vec![Observation::new(d(2), 0.0)],
            benchmark: None,
        };
        assert!(matches!(
            AlignedSeries::from_inputs(&inputs),
            Err(AnalyticsError::Data(_))
        ));
    }
}
