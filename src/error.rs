//! Error types for the relation fixer.

use thiserror::Error;

/// Result type for relation fixer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fixing doclet relations.
#[derive(Debug, Error)]
pub enum Error {
    /// An entity reaches itself through `augments`/`implements`/`mixes`.
    #[error("relation cycle detected: {}", chain.join(" -> "))]
    RelationCycle {
        /// Longnames along the loop, starting and ending with the same entity.
        chain: Vec<String>,
    },

    /// Unknown value for an output format name.
    #[error("unknown format: {0}. Use json, pretty, or lines")]
    UnknownFormat(String),

    #[error("failed to serialize doclets: {0}")]
    Serialize(#[from] serde_json::Error),
}
