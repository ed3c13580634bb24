//! # Board Tokens
//!
//! Per-token state and its incremental move bookkeeping.
//!
//! ## Design Philosophy
//!
//! - The index is sized once from the board and never reallocated
//! - Moves are bucketed by the exact distance needed to reach them
//! - The move counter is kept in step with the visible buckets
//! - Bulk commits go through a verified [`MoveState`]

mod entity;
mod move_index;
mod shared;

pub use entity::Entity;
pub use move_index::{MoveBucket, MoveIndex, MoveState};
pub use shared::SharedEntity;
