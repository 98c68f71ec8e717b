//! Library error types.

/// A tunable that cannot produce a playable round.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive (got {value})")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must be finite")]
    NotFinite { name: &'static str },

    #[error("{name} must be at least 1.0 (got {value})")]
    BelowOne { name: &'static str, value: f32 },

    #[error("{name} must be a non-zero duration")]
    ZeroDuration { name: &'static str },

    #[error("ship ({ship}) is wider than the viewport ({viewport})")]
    ShipTooWide { ship: f32, viewport: f32 },
}
