//! Error types for fleetload

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Vehicle with ID {0} not found")]
    VehicleNotFound(String),

    #[error("Item with ID {0} not found")]
    ItemNotFound(String),

    #[error("Order with ID {0} not found")]
    OrderNotFound(String),

    #[error("Vehicle with ID {0} is currently in use")]
    VehicleInUse(String),

    #[error("Cannot change order status from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
