pub mod series;

pub use series::{AlignedRow, AlignedSeries, MarketInputs, Observation, ReturnPoint, ReturnSeries};
