use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("candle data error: {0}")]
    Data(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
