//! # TowerWars Shared
//!
//! Value types every TowerWars component agrees on.
//!
//! ## CRITICAL RULE
//!
//! This crate holds data, not rules. A [`Move`] here is only an ordered
//! pair of cells; whether it is legal is decided by the board.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod position;

pub use color::PlayerColor;
pub use position::{Move, Position};
