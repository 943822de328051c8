//! Error types for configuration loading and policy renewal

use thiserror::Error;

/// Errors surfaced by the game engine and its configuration layer.
///
/// Bankruptcy is not represented here: it is a session outcome, see
/// [`crate::simulation::SessionOutcome`].
#[derive(Debug, Error)]
pub enum GameError {
    /// Renewal input could not be parsed or failed validation
    #[error("invalid renewal input: {0}")]
    InvalidRenewalInput(String),

    /// Renewal requested for a product line that does not exist
    #[error("unknown product line '{0}'")]
    UnknownProduct(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
