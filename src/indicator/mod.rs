pub mod ewma;
pub mod rolling_std;

pub use ewma::{ewma_vol_scan, EwmaVariance};
pub use rolling_std::{rolling_vol_series, RollingStd};
