//! # Board Coordinates
//!
//! Cells are addressed by a column letter and a row number, both 1-based:
//! `A1` is `Position::new(1, 1)`. Boards never exceed 26 columns, so a
//! single letter always suffices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    letter: u8,
    number: u8,
}

impl Position {
    /// Creates a position from 1-based column letter index and row number.
    #[inline]
    #[must_use]
    pub const fn new(letter: u8, number: u8) -> Self {
        Self { letter, number }
    }

    /// 1-based column index (`1` is column `A`).
    #[inline]
    #[must_use]
    pub const fn letter(self) -> u8 {
        self.letter
    }

    /// 1-based row number.
    #[inline]
    #[must_use]
    pub const fn number(self) -> u8 {
        self.number
    }

    /// Checks whether the cell lies on a board with `size` columns and rows.
    #[inline]
    #[must_use]
    pub const fn is_on_board(self, size: u32) -> bool {
        self.letter >= 1
            && self.number >= 1
            && (self.letter as u32) <= size
            && (self.number as u32) <= size
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.letter {
            1..=26 => write!(f, "{}{}", char::from(b'A' + self.letter - 1), self.number),
            _ => write!(f, "#{}:{}", self.letter, self.number),
        }
    }
}

/// Relocation of a token from `start` to `end`.
///
/// Two moves are the same move exactly when both endpoints match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Move {
    start: Position,
    end: Position,
}

impl Move {
    /// Creates a move between two cells.
    #[inline]
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Cell the token leaves.
    #[inline]
    #[must_use]
    pub const fn start(self) -> Position {
        self.start
    }

    /// Cell the token arrives at.
    #[inline]
    #[must_use]
    pub const fn end(self) -> Position {
        self.end
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.start, self.end)
    }
}
