use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} must be within 0..=1, got {value}")]
    Threshold { name: &'static str, value: f64 },
    #[error("selector {name} is empty")]
    Selector { name: &'static str },
}
