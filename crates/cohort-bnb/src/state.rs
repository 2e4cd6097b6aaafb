// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Search State
//!
//! The mutable assignment state threaded through the depth-first search.
//! Placements are applied and undone in strict LIFO order; `place` and
//! `remove` are exact inverses, so the state after a full backtrack is
//! bit-identical to the state before the descent.
//!
//! Besides the raw assignment the state tracks two running objective
//! accumulators:
//!
//! * `gained`: the pair weight already locked in by co-located pairs.
//! * `forgone`: the pair weight irrevocably lost by pairs split across
//!   different groups.
//!
//! Both only ever cover pairs whose two entities are assigned, so
//! `total_pair_weight - forgone` is an admissible upper bound on the best
//! objective reachable below the current node.
//!
//! Groups are opened in prefix order: a placement may target an already open
//! group or the first closed one. Because the search undoes placements in
//! reverse order, the set of open groups is always a prefix of `0..G`.

use crate::num::SolverNumeric;
use cohort_model::{
    index::{EntityIndex, GroupIndex},
    model::Model,
    solution::Solution,
};

/// Sentinel marking an entity without a group.
const UNASSIGNED: usize = usize::MAX;

/// The mutable assignment state of one search run.
#[derive(Debug, Clone)]
pub struct SearchState<T> {
    // assignment[i] = group of entity i, UNASSIGNED if not placed yet.
    assignment: Vec<usize>,
    group_loads: Vec<usize>,
    open_groups: usize,
    num_assigned: usize,
    gained: T,
    forgone: T,
}

impl<T> SearchState<T>
where
    T: SolverNumeric,
{
    /// Creates an empty state for the given problem dimensions.
    pub fn new(num_entities: usize, num_groups: usize) -> Self {
        Self {
            assignment: vec![UNASSIGNED; num_entities],
            group_loads: vec![0; num_groups],
            open_groups: 0,
            num_assigned: 0,
            gained: T::zero(),
            forgone: T::zero(),
        }
    }

    /// Returns the number of placed entities.
    #[inline]
    pub fn num_assigned(&self) -> usize {
        self.num_assigned
    }

    /// Returns `true` if every entity has a group.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.num_assigned == self.assignment.len()
    }

    /// Returns the number of groups holding at least one entity. Open groups
    /// always form a prefix of the group range.
    #[inline]
    pub fn open_groups(&self) -> usize {
        self.open_groups
    }

    /// Returns the current load of the given group.
    ///
    /// # Panics
    ///
    /// Panics if `group` is out of bounds.
    #[inline]
    pub fn group_load(&self, group: GroupIndex) -> usize {
        debug_assert!(
            group.get() < self.group_loads.len(),
            "called `SearchState::group_load` with group index out of bounds: the len is {} but the index is {}",
            self.group_loads.len(),
            group.get()
        );

        self.group_loads[group.get()]
    }

    /// Returns the group of the given entity, if placed.
    #[inline]
    pub fn group_of(&self, entity: EntityIndex) -> Option<GroupIndex> {
        let raw = self.assignment[entity.get()];
        (raw != UNASSIGNED).then(|| GroupIndex::new(raw))
    }

    /// Returns the pair weight locked in so far.
    #[inline]
    pub fn gained(&self) -> T {
        self.gained
    }

    /// Returns the pair weight irrevocably lost so far.
    #[inline]
    pub fn forgone(&self) -> T {
        self.forgone
    }

    /// Computes the objective deltas of placing `entity` into `group`
    /// without mutating the state: the pair weight gained against current
    /// co-members and the pair weight forgone against entities in other
    /// groups.
    pub fn placement_deltas(
        &self,
        model: &Model<T>,
        entity: EntityIndex,
        group: GroupIndex,
    ) -> (T, T) {
        let mut gained = T::zero();
        let mut forgone = T::zero();
        for (i, &assigned) in self.assignment.iter().enumerate() {
            if assigned == UNASSIGNED || i == entity.get() {
                continue;
            }
            let pair = model.pair_weight(entity, EntityIndex::new(i));
            if assigned == group.get() {
                gained = gained.saturating_add(pair);
            } else {
                forgone = forgone.saturating_add(pair);
            }
        }
        (gained, forgone)
    }

    /// Places `entity` into `group`, applying the deltas previously computed
    /// by [`placement_deltas`](Self::placement_deltas).
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the entity is already placed, the group is
    /// full, or the group would break the open-prefix invariant.
    pub fn place(&mut self, model: &Model<T>, entity: EntityIndex, group: GroupIndex, deltas: (T, T)) {
        debug_assert!(
            self.assignment[entity.get()] == UNASSIGNED,
            "called `SearchState::place` with already placed entity: {}",
            entity
        );
        debug_assert!(
            group.get() <= self.open_groups && group.get() < self.group_loads.len(),
            "called `SearchState::place` with group {} outside the open prefix (open: {})",
            group.get(),
            self.open_groups
        );
        debug_assert!(
            self.group_loads[group.get()] < model.capacity(),
            "called `SearchState::place` with full group: {}",
            group
        );

        let (gained, forgone) = deltas;
        self.assignment[entity.get()] = group.get();
        self.group_loads[group.get()] += 1;
        if group.get() == self.open_groups {
            self.open_groups += 1;
        }
        self.num_assigned += 1;
        self.gained = self.gained.saturating_add(gained);
        self.forgone = self.forgone.saturating_add(forgone);
    }

    /// Undoes the most recent [`place`](Self::place) of `entity` with the
    /// same deltas.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `entity` is not the most recent placement
    /// into `group`.
    pub fn remove(&mut self, entity: EntityIndex, group: GroupIndex, deltas: (T, T)) {
        debug_assert!(
            self.assignment[entity.get()] == group.get(),
            "called `SearchState::remove` for entity {} which is not in group {}",
            entity,
            group
        );

        let (gained, forgone) = deltas;
        self.assignment[entity.get()] = UNASSIGNED;
        self.group_loads[group.get()] -= 1;
        if self.group_loads[group.get()] == 0 && group.get() == self.open_groups - 1 {
            self.open_groups -= 1;
        }
        self.num_assigned -= 1;
        self.gained = self.gained.saturating_sub(gained);
        self.forgone = self.forgone.saturating_sub(forgone);
    }

    /// Converts a complete state into a solution. The objective is the
    /// accumulated gained pair weight.
    ///
    /// # Panics
    ///
    /// Panics if the state is not complete.
    pub fn to_solution(&self) -> Solution<T> {
        assert!(
            self.is_complete(),
            "called `SearchState::to_solution` on an incomplete state: {} of {} entities placed",
            self.num_assigned,
            self.assignment.len()
        );

        let assignment = self.assignment.iter().map(|&g| GroupIndex::new(g)).collect();
        Solution::new(self.gained, assignment)
    }
}

impl<T> std::fmt::Display for SearchState<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState({}/{} placed, {} open groups, gained: {}, forgone: {})",
            self.num_assigned,
            self.assignment.len(),
            self.open_groups,
            self.gained,
            self.forgone
        )
    }
}
