//! # Token Entity
//!
//! A single token on the board: a plain stone, a tower of stacked stones,
//! or a player's base.
//!
//! The entity owns a [`MoveIndex`] and a running `move_count`. The count
//! always equals the number of moves at distances `1..=range`; every
//! mutator below keeps it that way or fails without touching anything.

use towerwars_shared::{Move, PlayerColor, Position};

use super::move_index::{MoveBucket, MoveIndex, MoveState};
use crate::config::{max_height_for, max_range_for, BoardConfig};
use crate::error::{CoreError, CoreResult};
use crate::LOG_TARGET;

/// A token with its cached legal moves.
///
/// `Clone` is a deep copy: the clone owns its own index and can be mutated
/// independently of the original.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    /// Owner of the token.
    color: PlayerColor,
    /// Bases never move and never stack.
    is_base: bool,
    /// Board size the bounds were derived from.
    board_size: u32,
    /// Largest tower height.
    max_height: u32,
    /// Largest step range.
    max_range: u32,
    /// Current cell.
    position: Position,
    /// 0 for a plain stone, > 0 for a tower.
    height: u32,
    /// Current step range.
    range: u32,
    /// Visibility mask over the moves.
    is_blocked: bool,
    /// Moves by exact distance.
    index: MoveIndex,
    /// Moves at distances `1..=range`.
    move_count: usize,
}

impl Entity {
    /// Creates a plain stone with range 1 and no moves.
    ///
    /// # Arguments
    ///
    /// * `position` - The cell the token stands on
    /// * `color` - The owning player
    /// * `board_size` - Number of columns and rows of the board
    #[must_use]
    pub fn new(position: Position, color: PlayerColor, board_size: u32) -> Self {
        Self::with_role(position, color, board_size, false)
    }

    /// Creates a player's base.
    #[must_use]
    pub fn base(position: Position, color: PlayerColor, board_size: u32) -> Self {
        Self::with_role(position, color, board_size, true)
    }

    /// Creates a token, choosing between stone and base.
    #[must_use]
    pub fn with_role(position: Position, color: PlayerColor, board_size: u32, is_base: bool) -> Self {
        let max_height = max_height_for(board_size);
        let max_range = max_range_for(board_size);
        Self {
            color,
            is_base,
            board_size,
            max_height,
            max_range,
            position,
            height: 0,
            range: 1,
            is_blocked: false,
            index: MoveIndex::new(max_range),
            move_count: 0,
        }
    }

    /// Creates a plain stone sized from a board configuration.
    #[must_use]
    pub fn from_config(position: Position, color: PlayerColor, config: &BoardConfig) -> Self {
        Self::new(position, color, config.size)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Current cell.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Owning player.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> PlayerColor {
        self.color
    }

    /// Stack height.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Current step range.
    #[inline]
    #[must_use]
    pub const fn range(&self) -> u32 {
        self.range
    }

    /// Whether the token's moves are currently hidden.
    #[inline]
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.is_blocked
    }

    /// Whether the token is a base.
    #[inline]
    #[must_use]
    pub const fn is_base(&self) -> bool {
        self.is_base
    }

    /// Number of moves at distances `1..=range`, ignoring the block mask.
    #[inline]
    #[must_use]
    pub const fn move_count(&self) -> usize {
        self.move_count
    }

    /// Board size the bounds were derived from.
    #[inline]
    #[must_use]
    pub const fn board_size(&self) -> u32 {
        self.board_size
    }

    /// Largest tower height on this board.
    #[inline]
    #[must_use]
    pub const fn max_height(&self) -> u32 {
        self.max_height
    }

    /// Largest step range on this board.
    #[inline]
    #[must_use]
    pub const fn max_range(&self) -> u32 {
        self.max_range
    }

    /// Whether stones are stacked on this token.
    #[inline]
    #[must_use]
    pub const fn is_tower(&self) -> bool {
        self.height > 0
    }

    /// Whether the tower cannot grow any further.
    #[inline]
    #[must_use]
    pub const fn is_at_max_height(&self) -> bool {
        self.height == self.max_height
    }

    /// Whether the token can be moved this turn.
    #[inline]
    #[must_use]
    pub const fn is_movable(&self) -> bool {
        !self.is_base && !self.is_blocked && self.move_count > 0
    }

    /// Checks for a move to `end` at exactly `distance`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DistanceOutOfBounds`] past `max_range`.
    pub fn has_move(&self, end: Position, distance: u32) -> CoreResult<bool> {
        Ok(self
            .index
            .bucket(distance)?
            .contains(&Move::new(self.position, end)))
    }

    /// Legal moves at the current range, nearest first.
    ///
    /// Empty while the token is blocked. Order within one distance is
    /// unspecified.
    #[must_use]
    pub fn moves_as_list(&self) -> Vec<Move> {
        if self.is_blocked {
            return Vec::new();
        }
        let mut moves = Vec::with_capacity(self.move_count);
        moves.extend(self.index.iter_through(self.range).copied());
        moves
    }

    /// Raw bucket at `distance`, regardless of range and block mask.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DistanceOutOfBounds`] past `max_range`.
    #[inline]
    pub fn moves_at_distance(&self, distance: u32) -> CoreResult<&MoveBucket> {
        self.index.bucket(distance)
    }

    /// Raw view of every bucket.
    #[inline]
    #[must_use]
    pub fn move_index(&self) -> &MoveIndex {
        &self.index
    }

    /// Deep copy of the current `(index, range, move_count)` triple.
    #[must_use]
    pub fn move_state(&self) -> MoveState {
        MoveState::from_parts_unchecked(self.index.clone(), self.range, self.move_count)
    }

    // ========================================================================
    // Moves
    // ========================================================================

    /// Records a move to `end` at `distance`.
    ///
    /// Distance 0 is ignored. The counter only moves for distances within
    /// the current range; moves stored further out become visible when the
    /// range grows to reach them.
    ///
    /// Returns whether the move was new.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DistanceOutOfBounds`] past `max_range`.
    pub fn add_move(&mut self, end: Position, distance: u32) -> CoreResult<bool> {
        if distance == 0 {
            return Ok(false);
        }
        let mv = Move::new(self.position, end);
        let inserted = self.index.bucket_mut(distance)?.insert(mv);
        if inserted && distance <= self.range {
            self.move_count += 1;
        }
        Ok(inserted)
    }

    /// Forgets the move to `end` at `distance`.
    ///
    /// Distance 0 is ignored. Returns whether the move was present.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DistanceOutOfBounds`] past `max_range`.
    pub fn remove_move(&mut self, end: Position, distance: u32) -> CoreResult<bool> {
        if distance == 0 {
            return Ok(false);
        }
        let mv = Move::new(self.position, end);
        let removed = self.index.bucket_mut(distance)?.remove(&mv);
        if removed && distance <= self.range {
            self.move_count -= 1;
        }
        Ok(removed)
    }

    /// Drops every move and resets the range to 1.
    pub fn clear_all_moves(&mut self) {
        self.index.clear();
        self.range = 1;
        self.move_count = 0;
        tracing::debug!(target: LOG_TARGET, position = %self.position, "move index cleared");
    }

    /// Commits a verified move state in one step.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InconsistentMoveState`] if the state was built
    /// for a different board; the entity is left unchanged.
    pub fn replace_move_state(&mut self, state: MoveState) -> CoreResult<()> {
        if state.index().max_range() != self.max_range {
            let error = CoreError::InconsistentMoveState {
                reason: format!(
                    "index max range {} does not match entity max range {}",
                    state.index().max_range(),
                    self.max_range
                ),
            };
            tracing::warn!(target: LOG_TARGET, position = %self.position, "{error}");
            return Err(error);
        }
        let (index, range, move_count) = state.into_parts();
        self.index = index;
        self.range = range;
        self.move_count = move_count;
        tracing::debug!(
            target: LOG_TARGET,
            position = %self.position,
            range,
            move_count,
            "move state replaced"
        );
        Ok(())
    }

    // ========================================================================
    // Height & range
    // ========================================================================

    /// Stacks one more stone on the token.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::HeightOverflow`] at `max_height`.
    pub fn inc_height(&mut self) -> CoreResult<()> {
        if self.height >= self.max_height {
            return Err(self.violation(CoreError::HeightOverflow {
                max_height: self.max_height,
            }));
        }
        self.height += 1;
        Ok(())
    }

    /// Removes one stone from the token.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::HeightUnderflow`] at height 0.
    pub fn dec_height(&mut self) -> CoreResult<()> {
        if self.height == 0 {
            return Err(self.violation(CoreError::HeightUnderflow));
        }
        self.height -= 1;
        Ok(())
    }

    /// Widens the range by one step.
    ///
    /// Moves already stored at the new distance become visible and are
    /// counted. The board is expected to add the rest with [`add_move`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RangeOverflow`] at `max_range`.
    ///
    /// [`add_move`]: Self::add_move
    pub fn inc_range(&mut self) -> CoreResult<()> {
        let next = self.next_range()?;
        self.move_count += self.index.bucket(next)?.len();
        self.range = next;
        Ok(())
    }

    /// Widens the range by one step and grafts a precomputed bucket there.
    ///
    /// Whatever the index held at the new distance is discarded; the new
    /// bucket's moves are counted.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RangeOverflow`] at `max_range`.
    pub fn inc_range_with_moves(&mut self, bucket: MoveBucket) -> CoreResult<()> {
        let next = self.next_range()?;
        let added = bucket.len();
        let _ = self.index.replace_bucket(next, bucket)?;
        self.move_count += added;
        self.range = next;
        Ok(())
    }

    /// Narrows the range by one step, dropping the moves at the old range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RangeUnderflow`] at range 0.
    pub fn dec_range(&mut self) -> CoreResult<()> {
        if self.range == 0 {
            return Err(self.violation(CoreError::RangeUnderflow));
        }
        let dropped = self.index.replace_bucket(self.range, MoveBucket::new())?;
        self.move_count -= dropped.len();
        self.range -= 1;
        Ok(())
    }

    // ========================================================================
    // Plain state
    // ========================================================================

    /// Hides or reveals the token's moves. The index is left untouched.
    #[inline]
    pub fn set_blocked(&mut self, blocked: bool) {
        self.is_blocked = blocked;
    }

    /// Moves the token to another cell.
    ///
    /// Stored moves keep the start they were recorded with; the board
    /// clears and recomputes them after a relocation.
    #[inline]
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn next_range(&self) -> CoreResult<u32> {
        if self.range >= self.max_range {
            return Err(self.violation(CoreError::RangeOverflow {
                max_range: self.max_range,
            }));
        }
        Ok(self.range + 1)
    }

    /// Reports an invariant violation to the diagnostic sink.
    fn violation(&self, error: CoreError) -> CoreError {
        tracing::error!(
            target: LOG_TARGET,
            position = %self.position,
            color = %self.color,
            height = self.height,
            range = self.range,
            "{error}"
        );
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Position = Position::new(2, 2);
    const B: Position = Position::new(3, 2);
    const C: Position = Position::new(4, 2);
    const D: Position = Position::new(2, 4);

    #[test]
    fn test_fresh_entity() {
        let entity = Entity::new(A, PlayerColor::Red, 9);
        assert_eq!(entity.position(), A);
        assert_eq!(entity.color(), PlayerColor::Red);
        assert_eq!(entity.max_height(), 3);
        assert_eq!(entity.max_range(), 20);
        assert_eq!(entity.range(), 1);
        assert_eq!(entity.height(), 0);
        assert_eq!(entity.move_count(), 0);
        assert!(!entity.is_blocked());
        assert!(!entity.is_base());
        assert!(!entity.is_tower());
        assert!(!entity.is_movable());
        assert_eq!(entity.move_index().max_range(), 20);
    }

    #[test]
    fn test_walkthrough_on_nine_board() {
        let mut entity = Entity::new(A, PlayerColor::Red, 9);

        entity.add_move(B, 1).unwrap();
        assert_eq!(entity.move_count(), 1);
        assert!(entity.has_move(B, 1).unwrap());

        entity.inc_range().unwrap();
        assert_eq!(entity.range(), 2);

        entity.add_move(C, 2).unwrap();
        assert_eq!(entity.move_count(), 2);

        entity.dec_range().unwrap();
        assert_eq!(entity.range(), 1);
        assert_eq!(entity.move_count(), 1);
        assert!(entity.moves_at_distance(2).unwrap().is_empty());
        assert!(entity.has_move(B, 1).unwrap());
    }

    #[test]
    fn test_add_move_is_idempotent() {
        let mut entity = Entity::new(A, PlayerColor::Blue, 9);
        assert!(entity.add_move(B, 1).unwrap());
        assert!(!entity.add_move(B, 1).unwrap());
        assert_eq!(entity.move_count(), 1);

        assert!(entity.remove_move(B, 1).unwrap());
        assert!(!entity.remove_move(B, 1).unwrap());
        assert_eq!(entity.move_count(), 0);
    }

    #[test]
    fn test_distance_zero_is_ignored() {
        let mut entity = Entity::new(A, PlayerColor::Red, 9);
        assert!(!entity.add_move(B, 0).unwrap());
        assert!(!entity.remove_move(B, 0).unwrap());
        assert_eq!(entity.move_count(), 0);
        assert!(entity.moves_at_distance(0).unwrap().is_empty());
    }

    #[test]
    fn test_distance_out_of_bounds() {
        let mut entity = Entity::new(A, PlayerColor::Red, 9);
        assert!(matches!(
            entity.add_move(B, 21),
            Err(CoreError::DistanceOutOfBounds { distance: 21, max_range: 20 })
        ));
        assert!(entity.remove_move(B, 21).is_err());
        assert!(entity.has_move(B, 21).is_err());
        assert!(entity.moves_at_distance(21).is_err());
        assert_eq!(entity.move_count(), 0);
    }

    #[test]
    fn test_moves_beyond_range_count_once_visible() {
        let mut entity = Entity::new(A, PlayerColor::Red, 9);
        entity.add_move(D, 2).unwrap();
        assert_eq!(entity.move_count(), 0);
        assert!(entity.moves_as_list().is_empty());
        assert!(entity.has_move(D, 2).unwrap());

        entity.inc_range().unwrap();
        assert_eq!(entity.move_count(), 1);
        assert_eq!(entity.moves_as_list(), vec![Move::new(A, D)]);
    }

    #[test]
    fn test_moves_as_list_nearest_first() {
        let mut entity = Entity::new(A, PlayerColor::Red, 9);
        entity.inc_range().unwrap();
        entity.add_move(C, 2).unwrap();
        entity.add_move(B, 1).unwrap();

        let moves = entity.moves_as_list();
        assert_eq!(moves, vec![Move::new(A, B), Move::new(A, C)]);
    }

    #[test]
    fn test_blocked_hides_moves_without_touching_them() {
        let mut entity = Entity::new(A, PlayerColor::Red, 9);
        entity.add_move(B, 1).unwrap();
        entity.set_blocked(true);

        assert!(entity.is_blocked());
        assert!(!entity.is_movable());
        assert!(entity.moves_as_list().is_empty());
        assert_eq!(entity.move_count(), 1);
        assert!(entity.has_move(B, 1).unwrap());

        entity.set_blocked(false);
        assert!(entity.is_movable());
        assert_eq!(entity.moves_as_list().len(), 1);
    }

    #[test]
    fn test_base_is_never_movable() {
        let mut base = Entity::base(A, PlayerColor::Blue, 9);
        assert!(base.is_base());
        base.add_move(B, 1).unwrap();
        assert!(!base.is_movable());
    }

    #[test]
    fn test_height_bounds() {
        let mut entity = Entity::new(A, PlayerColor::Red, 9);
        assert!(matches!(entity.dec_height(), Err(CoreError::HeightUnderflow)));
        assert_eq!(entity.height(), 0);

        for _ in 0..3 {
            entity.inc_height().unwrap();
        }
        assert!(entity.is_tower());
        assert!(entity.is_at_max_height());
        assert!(matches!(
            entity.inc_height(),
            Err(CoreError::HeightOverflow { max_height: 3 })
        ));
        assert_eq!(entity.height(), 3);

        entity.dec_height().unwrap();
        assert_eq!(entity.height(), 2);
        assert!(!entity.is_at_max_height());
    }

    #[test]
    fn test_range_bounds_on_smallest_board() {
        let mut entity = Entity::new(A, PlayerColor::Red, 2);
        assert_eq!(entity.max_height(), 0);
        assert_eq!(entity.max_range(), 2);
        assert!(entity.is_at_max_height());

        entity.inc_range().unwrap();
        assert_eq!(entity.range(), 2);
        assert!(matches!(
            entity.inc_range(),
            Err(CoreError::RangeOverflow { max_range: 2 })
        ));
        assert_eq!(entity.range(), 2);

        entity.dec_range().unwrap();
        entity.dec_range().unwrap();
        assert_eq!(entity.range(), 0);
        assert!(matches!(entity.dec_range(), Err(CoreError::RangeUnderflow)));
        assert_eq!(entity.range(), 0);
    }

    #[test]
    fn test_dec_range_only_touches_top_bucket() {
        let mut entity = Entity::new(A, PlayerColor::Red, 9);
        entity.add_move(B, 1).unwrap();
        entity.inc_range().unwrap();
        entity.add_move(C, 2).unwrap();
        entity.add_move(D, 3).unwrap();

        entity.dec_range().unwrap();
        assert_eq!(entity.moves_at_distance(1).unwrap().len(), 1);
        assert!(entity.moves_at_distance(2).unwrap().is_empty());
        assert_eq!(entity.moves_at_distance(3).unwrap().len(), 1);
        assert_eq!(entity.move_count(), 1);
    }

    #[test]
    fn test_inc_range_with_moves_counts_graft() {
        let mut entity = Entity::new(A, PlayerColor::Red, 9);
        entity.add_move(B, 1).unwrap();
        entity.add_move(D, 2).unwrap();

        let bucket: MoveBucket = [Move::new(A, C), Move::new(A, Position::new(5, 2))]
            .into_iter()
            .collect();
        entity.inc_range_with_moves(bucket).unwrap();

        assert_eq!(entity.range(), 2);
        assert_eq!(entity.move_count(), 3);
        assert!(entity.has_move(C, 2).unwrap());
        assert!(!entity.has_move(D, 2).unwrap());
    }

    #[test]
    fn test_inc_range_with_moves_respects_bound() {
        let mut entity = Entity::new(A, PlayerColor::Red, 2);
        entity.inc_range().unwrap();
        let bucket: MoveBucket = std::iter::once(Move::new(A, B)).collect();
        assert!(entity.inc_range_with_moves(bucket).is_err());
        assert_eq!(entity.move_count(), 0);
    }

    #[test]
    fn test_clear_all_moves() {
        let mut entity = Entity::new(A, PlayerColor::Red, 9);
        entity.add_move(B, 1).unwrap();
        entity.inc_range().unwrap();
        entity.inc_range().unwrap();
        entity.add_move(C, 3).unwrap();

        entity.clear_all_moves();
        assert_eq!(entity.range(), 1);
        assert_eq!(entity.move_count(), 0);
        assert!(entity.move_index().iter().all(|(_, bucket)| bucket.is_empty()));
    }

    #[test]
    fn test_replace_move_state() {
        let mut source = Entity::new(B, PlayerColor::Red, 9);
        source.add_move(C, 1).unwrap();
        source.inc_range().unwrap();
        source.add_move(D, 2).unwrap();

        let mut target = Entity::new(B, PlayerColor::Red, 9);
        target.replace_move_state(source.move_state()).unwrap();
        assert_eq!(target.range(), 2);
        assert_eq!(target.move_count(), 2);
        assert_eq!(target.move_index(), source.move_index());

        let foreign = Entity::new(B, PlayerColor::Red, 12).move_state();
        assert!(matches!(
            target.replace_move_state(foreign),
            Err(CoreError::InconsistentMoveState { .. })
        ));
        assert_eq!(target.range(), 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Entity::new(A, PlayerColor::Red, 9);
        original.add_move(B, 1).unwrap();
        original.inc_height().unwrap();

        let mut copy = original.clone();
        assert_eq!(copy, original);
        assert_eq!(copy.moves_as_list(), original.moves_as_list());

        copy.add_move(C, 1).unwrap();
        copy.remove_move(B, 1).unwrap();
        assert_eq!(original.move_count(), 1);
        assert!(original.has_move(B, 1).unwrap());
        assert!(!original.has_move(C, 1).unwrap());
    }

    #[test]
    fn test_set_position_changes_move_start() {
        let mut entity = Entity::new(A, PlayerColor::Red, 9);
        entity.add_move(B, 1).unwrap();

        entity.set_position(C);
        assert_eq!(entity.position(), C);
        assert!(!entity.has_move(B, 1).unwrap());

        entity.clear_all_moves();
        entity.add_move(B, 1).unwrap();
        assert!(entity.has_move(B, 1).unwrap());
        assert_eq!(entity.moves_as_list(), vec![Move::new(C, B)]);
    }

    #[test]
    fn test_from_config() {
        let config = BoardConfig::new(12).unwrap();
        let entity = Entity::from_config(A, PlayerColor::Blue, &config);
        assert_eq!(entity.board_size(), 12);
        assert_eq!(entity.max_height(), config.max_height());
        assert_eq!(entity.max_range(), config.max_range());
    }
}
