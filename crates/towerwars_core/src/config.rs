//! # Board Configuration
//!
//! Board size is the only tunable. Everything an [`Entity`](crate::Entity)
//! bounds itself by is derived from it:
//!
//! - `max_height = size / 3`
//! - `max_range = 6 * max_height + 2`
//!
//! ```toml
//! [board]
//! size = 9
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// Smallest supported board.
pub const MIN_BOARD_SIZE: u32 = 4;

/// Largest supported board (one letter per column).
pub const MAX_BOARD_SIZE: u32 = 26;

/// Board size used when no configuration is supplied.
pub const DEFAULT_BOARD_SIZE: u32 = 8;

/// Largest tower height on a board of the given size.
#[inline]
#[must_use]
pub const fn max_height_for(board_size: u32) -> u32 {
    board_size / 3
}

/// Largest step range a token can reach on a board of the given size.
#[inline]
#[must_use]
pub const fn max_range_for(board_size: u32) -> u32 {
    6 * max_height_for(board_size) + 2
}

/// Board configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Number of columns and rows.
    pub size: u32,
}

#[derive(Deserialize)]
struct ConfigFile {
    board: BoardConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
        }
    }
}

impl BoardConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if `size` is outside
    /// [`MIN_BOARD_SIZE`]`..=`[`MAX_BOARD_SIZE`].
    pub fn new(size: u32) -> CoreResult<Self> {
        let config = Self { size };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a TOML document with a `[board]` table.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or the size is invalid.
    pub fn from_toml_str(source: &str) -> CoreResult<Self> {
        let file: ConfigFile = toml::from_str(source)?;
        file.board.validate()?;
        Ok(file.board)
    }

    /// Loads a configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or
    /// holds an invalid size.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks the size bounds.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] on an unsupported size.
    pub fn validate(&self) -> CoreResult<()> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.size) {
            return Err(CoreError::InvalidConfig(format!(
                "board size {} is outside {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}",
                self.size
            )));
        }
        Ok(())
    }

    /// Largest tower height on this board.
    #[inline]
    #[must_use]
    pub const fn max_height(&self) -> u32 {
        max_height_for(self.size)
    }

    /// Largest step range on this board.
    #[inline]
    #[must_use]
    pub const fn max_range(&self) -> u32 {
        max_range_for(self.size)
    }
}
