//! Error types shared across the core crate
//!
//! None of these are fatal: callers log them and degrade (skip a card, fall
//! back to an empty collection, keep default settings).

use thiserror::Error;

/// Problems with the catalog dataset itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A record was defined without an id.
    #[error("game record has an empty id")]
    EmptyId,
    /// Two records share an id.
    #[error("duplicate game id: {0}")]
    DuplicateId(String),
}

/// Failures of the key-value store behind the persistence adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store is missing or disabled (private browsing, blocked cookies).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Reading a key failed.
    #[error("storage read failed: {0}")]
    Read(String),
    /// Writing a key failed, usually because the quota is exhausted.
    #[error("storage write failed: {0}")]
    Write(String),
    /// The stored value is not the JSON we wrote.
    #[error("malformed stored value: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A record that cannot be turned into a card.
#[derive(Debug, Error, PartialEq)]
pub enum CardError {
    #[error("rating {rating} for '{id}' is outside 0..=5")]
    RatingOutOfRange { id: String, rating: f32 },
    #[error("difficulty {difficulty} for '{id}' is outside 1..=5")]
    DifficultyOutOfRange { id: String, difficulty: u8 },
}

/// Invalid runtime configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("batch_size must be at least 1")]
    ZeroBatchSize,
    #[error("recent_limit must be at least 1")]
    ZeroRecentLimit,
    #[error("storage key '{0}' must not be empty")]
    EmptyKey(&'static str),
    #[error("could not decode config: {0}")]
    Decode(String),
}
