use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalesPerfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid forecast window: {0} (expected 6M, 12M, 24M or all)")]
    InvalidWindow(String),
}

pub type Result<T> = std::result::Result<T, SalesPerfError>;
