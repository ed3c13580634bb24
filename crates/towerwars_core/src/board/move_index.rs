//! # Move Index
//!
//! Legal moves of one token, bucketed by the exact distance needed to
//! reach them.
//!
//! The index is sized once from the board and never grows:
//! - Bucket `d` holds every move that needs exactly `d` steps
//! - Bucket `0` exists so distances index directly, but stays empty
//! - Buckets beyond the token's current range may hold moves that are not
//!   visible yet

use std::collections::HashSet;

use towerwars_shared::Move;

use crate::error::{CoreError, CoreResult};

/// Unique moves reachable at one distance.
pub type MoveBucket = HashSet<Move>;

/// Pre-allocated, distance-indexed move storage.
///
/// Holds `max_range + 1` buckets so that every reachable range has a bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveIndex {
    buckets: Box<[MoveBucket]>,
}

impl MoveIndex {
    /// Creates an empty index for distances `0..=max_range`.
    ///
    /// Bucket `d` is pre-sized for the `6 * d` cells of a hex ring.
    #[must_use]
    pub fn new(max_range: u32) -> Self {
        let buckets = (0..=max_range as usize)
            .map(|distance| HashSet::with_capacity(distance * 6 + 1))
            .collect();
        Self { buckets }
    }

    /// Largest distance this index can address.
    #[inline]
    #[must_use]
    pub fn max_range(&self) -> u32 {
        // `buckets` always holds at least bucket 0
        (self.buckets.len() - 1) as u32
    }

    /// Bucket for `distance`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DistanceOutOfBounds`] past `max_range`.
    #[inline]
    pub fn bucket(&self, distance: u32) -> CoreResult<&MoveBucket> {
        self.buckets
            .get(distance as usize)
            .ok_or_else(|| self.out_of_bounds(distance))
    }

    /// Mutable bucket for `distance`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DistanceOutOfBounds`] past `max_range`.
    #[inline]
    pub fn bucket_mut(&mut self, distance: u32) -> CoreResult<&mut MoveBucket> {
        let error = self.out_of_bounds(distance);
        self.buckets.get_mut(distance as usize).ok_or(error)
    }

    /// Replaces the bucket at `distance`, returning the old one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DistanceOutOfBounds`] past `max_range`.
    pub fn replace_bucket(&mut self, distance: u32, bucket: MoveBucket) -> CoreResult<MoveBucket> {
        let slot = self.bucket_mut(distance)?;
        Ok(std::mem::replace(slot, bucket))
    }

    /// Number of moves stored at distances `1..=range`.
    ///
    /// Distances past `max_range` are ignored.
    #[must_use]
    pub fn count_through(&self, range: u32) -> usize {
        self.buckets
            .iter()
            .take(range as usize + 1)
            .skip(1)
            .map(HashSet::len)
            .sum()
    }

    /// Iterates the moves at distances `1..=range` in increasing distance order.
    pub fn iter_through(&self, range: u32) -> impl Iterator<Item = &Move> {
        self.buckets
            .iter()
            .take(range as usize + 1)
            .skip(1)
            .flat_map(HashSet::iter)
    }

    /// Iterates all buckets with their distances.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u32, &MoveBucket)> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(distance, bucket)| (distance as u32, bucket))
    }

    /// Empties every bucket, keeping their allocations.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
    }

    fn out_of_bounds(&self, distance: u32) -> CoreError {
        CoreError::DistanceOutOfBounds {
            distance,
            max_range: self.max_range(),
        }
    }
}

/// A verified `(index, range, move_count)` triple for bulk commits.
///
/// The only ways to build one either compute the count or check it, so a
/// `MoveState` handed to [`Entity::replace_move_state`] is always
/// self-consistent.
///
/// [`Entity::replace_move_state`]: crate::Entity::replace_move_state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveState {
    index: MoveIndex,
    range: u32,
    move_count: usize,
}

impl MoveState {
    /// Builds a state, counting the visible moves itself.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InconsistentMoveState`] if `range` exceeds the
    /// index's `max_range`.
    pub fn from_index(index: MoveIndex, range: u32) -> CoreResult<Self> {
        if range > index.max_range() {
            return Err(CoreError::InconsistentMoveState {
                reason: format!(
                    "range {range} exceeds index max range {}",
                    index.max_range()
                ),
            });
        }
        let move_count = index.count_through(range);
        Ok(Self {
            index,
            range,
            move_count,
        })
    }

    /// Builds a state from a precomputed count, checking it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InconsistentMoveState`] if the count does not
    /// match the moves at distances `1..=range`, or `range` is too large.
    pub fn with_count(index: MoveIndex, range: u32, move_count: usize) -> CoreResult<Self> {
        let state = Self::from_index(index, range)?;
        if state.move_count != move_count {
            return Err(CoreError::InconsistentMoveState {
                reason: format!(
                    "claimed {move_count} moves through range {range}, index holds {}",
                    state.move_count
                ),
            });
        }
        Ok(state)
    }

    /// Wraps a triple the entity already keeps consistent.
    pub(crate) const fn from_parts_unchecked(index: MoveIndex, range: u32, move_count: usize) -> Self {
        Self {
            index,
            range,
            move_count,
        }
    }

    /// The move index.
    #[inline]
    #[must_use]
    pub fn index(&self) -> &MoveIndex {
        &self.index
    }

    /// The step range.
    #[inline]
    #[must_use]
    pub const fn range(&self) -> u32 {
        self.range
    }

    /// Number of moves visible through `range`.
    #[inline]
    #[must_use]
    pub const fn move_count(&self) -> usize {
        self.move_count
    }

    /// Splits the state into its parts.
    #[must_use]
    pub fn into_parts(self) -> (MoveIndex, u32, usize) {
        (self.index, self.range, self.move_count)
    }
}
