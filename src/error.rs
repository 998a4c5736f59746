use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("data error: {0}")]
    Data(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
