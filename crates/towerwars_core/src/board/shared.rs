//! # Shared Entity Handle
//!
//! An [`Entity`] behind a per-entity lock, for boards that let several
//! threads touch the same token (move generation on one, move application
//! on another).
//!
//! Every call takes the lock for its full duration, so each operation is
//! atomic with respect to every other operation on the same token. No call
//! waits on anything but this lock.
//!
//! Boards that mutate all their tokens under one coarse lock should hold
//! plain [`Entity`] values instead.

use std::sync::Arc;

use parking_lot::Mutex;
use towerwars_shared::{Move, PlayerColor, Position};

use super::entity::Entity;
use super::move_index::{MoveBucket, MoveState};
use crate::error::CoreResult;

/// Cloneable, thread-safe handle to one token.
///
/// Cloning the handle shares the token. Use [`SharedEntity::snapshot`] or
/// [`SharedEntity::deep_clone`] for an independent copy.
#[derive(Clone, Debug)]
pub struct SharedEntity {
    inner: Arc<Mutex<Entity>>,
}

impl SharedEntity {
    /// Wraps an entity.
    #[must_use]
    pub fn new(entity: Entity) -> Self {
        Self {
            inner: Arc::new(Mutex::new(entity)),
        }
    }

    /// Runs `f` with the entity locked.
    pub fn with<R>(&self, f: impl FnOnce(&Entity) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Runs `f` with the entity locked for writing.
    ///
    /// Use for compound updates that must not interleave with other calls.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Entity) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Independent deep copy of the entity, taken under the lock.
    #[must_use]
    pub fn snapshot(&self) -> Entity {
        self.inner.lock().clone()
    }

    /// New handle over an independent deep copy.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        Self::new(self.snapshot())
    }

    /// Whether both handles point at the same token.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Current cell.
    #[must_use]
    pub fn position(&self) -> Position {
        self.inner.lock().position()
    }

    /// Owning player.
    #[must_use]
    pub fn color(&self) -> PlayerColor {
        self.inner.lock().color()
    }

    /// Stack height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.inner.lock().height()
    }

    /// Current step range.
    #[must_use]
    pub fn range(&self) -> u32 {
        self.inner.lock().range()
    }

    /// Whether the token's moves are hidden.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.inner.lock().is_blocked()
    }

    /// Whether the token is a base.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.inner.lock().is_base()
    }

    /// Number of moves through the current range.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.inner.lock().move_count()
    }

    /// Whether stones are stacked on this token.
    #[must_use]
    pub fn is_tower(&self) -> bool {
        self.inner.lock().is_tower()
    }

    /// Whether the tower cannot grow further.
    #[must_use]
    pub fn is_at_max_height(&self) -> bool {
        self.inner.lock().is_at_max_height()
    }

    /// Whether the token can be moved.
    #[must_use]
    pub fn is_movable(&self) -> bool {
        self.inner.lock().is_movable()
    }

    /// See [`Entity::has_move`].
    ///
    /// # Errors
    ///
    /// Fails if `distance` is past the index.
    pub fn has_move(&self, end: Position, distance: u32) -> CoreResult<bool> {
        self.inner.lock().has_move(end, distance)
    }

    /// See [`Entity::moves_as_list`].
    #[must_use]
    pub fn moves_as_list(&self) -> Vec<Move> {
        self.inner.lock().moves_as_list()
    }

    /// Copy of the raw bucket at `distance`.
    ///
    /// # Errors
    ///
    /// Fails if `distance` is past the index.
    pub fn moves_at_distance(&self, distance: u32) -> CoreResult<MoveBucket> {
        self.inner.lock().moves_at_distance(distance).cloned()
    }

    /// See [`Entity::move_state`].
    #[must_use]
    pub fn move_state(&self) -> MoveState {
        self.inner.lock().move_state()
    }

    // ------------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------------

    /// See [`Entity::add_move`].
    ///
    /// # Errors
    ///
    /// Fails if `distance` is past the index.
    pub fn add_move(&self, end: Position, distance: u32) -> CoreResult<bool> {
        self.inner.lock().add_move(end, distance)
    }

    /// See [`Entity::remove_move`].
    ///
    /// # Errors
    ///
    /// Fails if `distance` is past the index.
    pub fn remove_move(&self, end: Position, distance: u32) -> CoreResult<bool> {
        self.inner.lock().remove_move(end, distance)
    }

    /// See [`Entity::inc_height`].
    ///
    /// # Errors
    ///
    /// Fails at the maximum height.
    pub fn inc_height(&self) -> CoreResult<()> {
        self.inner.lock().inc_height()
    }

    /// See [`Entity::dec_height`].
    ///
    /// # Errors
    ///
    /// Fails at height 0.
    pub fn dec_height(&self) -> CoreResult<()> {
        self.inner.lock().dec_height()
    }

    /// See [`Entity::inc_range`].
    ///
    /// # Errors
    ///
    /// Fails at the maximum range.
    pub fn inc_range(&self) -> CoreResult<()> {
        self.inner.lock().inc_range()
    }

    /// See [`Entity::inc_range_with_moves`].
    ///
    /// # Errors
    ///
    /// Fails at the maximum range.
    pub fn inc_range_with_moves(&self, bucket: MoveBucket) -> CoreResult<()> {
        self.inner.lock().inc_range_with_moves(bucket)
    }

    /// See [`Entity::dec_range`].
    ///
    /// # Errors
    ///
    /// Fails at range 0.
    pub fn dec_range(&self) -> CoreResult<()> {
        self.inner.lock().dec_range()
    }

    /// See [`Entity::set_blocked`].
    pub fn set_blocked(&self, blocked: bool) {
        self.inner.lock().set_blocked(blocked);
    }

    /// See [`Entity::set_position`].
    pub fn set_position(&self, position: Position) {
        self.inner.lock().set_position(position);
    }

    /// See [`Entity::clear_all_moves`].
    pub fn clear_all_moves(&self) {
        self.inner.lock().clear_all_moves();
    }

    /// See [`Entity::replace_move_state`].
    ///
    /// # Errors
    ///
    /// Fails if the state was built for a different board.
    pub fn replace_move_state(&self, state: MoveState) -> CoreResult<()> {
        self.inner.lock().replace_move_state(state)
    }
}

impl From<Entity> for SharedEntity {
    fn from(entity: Entity) -> Self {
        Self::new(entity)
    }
}
