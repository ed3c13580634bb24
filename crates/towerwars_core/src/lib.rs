//! # TowerWars Core
//!
//! Incremental move bookkeeping for a single TowerWars token.
//!
//! The board's move generator decides which cells a token may reach and at
//! which distance. It then pushes those facts into the token's [`Entity`]
//! through [`Entity::add_move`], [`Entity::remove_move`],
//! [`Entity::inc_range`] and [`Entity::dec_range`]. The entity only stores,
//! counts and serves them.
//!
//! ## Example
//!
//! ```rust
//! use towerwars_core::{Entity, PlayerColor, Position};
//!
//! let mut stone = Entity::new(Position::new(2, 2), PlayerColor::Red, 9);
//! stone.add_move(Position::new(3, 2), 1)?;
//! assert!(stone.is_movable());
//! assert_eq!(stone.moves_as_list().len(), 1);
//! # Ok::<(), towerwars_core::CoreError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod board;
pub mod config;
pub mod error;

pub use board::{Entity, MoveBucket, MoveIndex, MoveState, SharedEntity};
pub use config::BoardConfig;
pub use error::{CoreError, CoreResult};
pub use towerwars_shared::{Move, PlayerColor, Position};

/// Tracing target used for every diagnostic emitted by the board bookkeeping.
pub const LOG_TARGET: &str = "towerwars::board";
