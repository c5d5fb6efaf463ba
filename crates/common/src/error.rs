use thiserror::Error;

/// Common error types used across the shipping crates.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
}
