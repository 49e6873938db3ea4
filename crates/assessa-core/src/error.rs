use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid settings path: {0}")]
    InvalidSettingPath(String),

    #[error("invalid value for setting '{path}': {reason}")]
    InvalidSettingValue { path: String, reason: String },
}
