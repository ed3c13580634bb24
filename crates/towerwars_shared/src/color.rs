//! # Player Colors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ownership tag of a token. Exactly two players take part in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerColor {
    /// The player who moves first.
    Red = 0,
    /// The player who moves second.
    Blue = 1,
}

impl PlayerColor {
    /// Both colors in turn order.
    pub const ALL: [Self; 2] = [Self::Red, Self::Blue];

    /// Returns the other player's color.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => f.write_str("red"),
            Self::Blue => f.write_str("blue"),
        }
    }
}
