//! # Core Error Types
//!
//! All errors that can occur while maintaining a token's state.
//!
//! Every variant describes a bug in the calling board logic or a broken
//! configuration file. None of them is a condition a player can trigger.

use thiserror::Error;

/// Errors that can occur in the board bookkeeping.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A tower would grow beyond the board's maximum height.
    #[error("tower height would exceed maximum height {max_height}")]
    HeightOverflow {
        /// The largest allowed height.
        max_height: u32,
    },

    /// A plain stone's height would drop below zero.
    #[error("entity height would drop below 0")]
    HeightUnderflow,

    /// The step range would grow beyond the largest distance the index holds.
    #[error("step range would exceed maximum range {max_range}")]
    RangeOverflow {
        /// The largest allowed range.
        max_range: u32,
    },

    /// The step range would drop below zero.
    #[error("step range would drop below 0")]
    RangeUnderflow,

    /// A distance argument addresses a bucket the index does not have.
    #[error("distance {distance} is outside the move index (max {max_range})")]
    DistanceOutOfBounds {
        /// The distance that was requested.
        distance: u32,
        /// The largest valid distance.
        max_range: u32,
    },

    /// A bulk move-state commit failed its consistency check.
    #[error("inconsistent move state: {reason}")]
    InconsistentMoveState {
        /// What did not add up.
        reason: String,
    },

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file is not valid TOML for a board config.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("configuration read error: {0}")]
    ConfigIo(#[from] std::io::Error),
}

/// Result type for board bookkeeping operations.
pub type CoreResult<T> = Result<T, CoreError>;
