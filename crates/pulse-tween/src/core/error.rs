//! Error types for tween creation and configuration.
//!
//! Runtime failures of the tween core never cross into the broadcast channel:
//! creation APIs return [`Result`], request APIs return `bool`, and queries
//! return `Option`.

use thiserror::Error;

/// Everything that can reject a tween request.
#[derive(Error, Debug)]
pub enum TweenError {
    /// Forward duration must be finite and strictly positive; reverse
    /// duration must be finite and non-negative.
    #[error("invalid tween duration: {0}")]
    InvalidDuration(f32),

    /// Delays must be finite and non-negative.
    #[error("invalid tween delay: {0}")]
    InvalidDelay(f32),

    /// A sequence needs at least one leg.
    #[error("tween sequence has no legs")]
    EmptySequence,

    /// Malformed JSON configuration or parameters.
    #[error("tween configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Alias for `std::result::Result<T, TweenError>`.
pub type Result<T> = std::result::Result<T, TweenError>;
