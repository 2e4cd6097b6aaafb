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

//! # Group Listing
//!
//! Decoding of solved assignment-variable levels into the final, name-based
//! group listing. Decoding re-verifies the partition invariants instead of
//! trusting the backend: every entity in exactly one group and no group
//! above capacity. A violation surfaces as a [`GroupingError`] naming the
//! offending entity or group.

use crate::{
    error::GroupingError, index::GroupIndex, model::Model, program::LEVEL_THRESHOLD,
    solution::Solution,
};
use num_traits::{PrimInt, Signed};

/// The final partition: one list of member names per group, in group order.
/// Members appear in roster order within their group. Trailing groups may be
/// empty when the capacities leave them unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping {
    groups: Vec<Vec<String>>,
}

impl Grouping {
    /// Decodes assignment-variable levels into a verified group listing.
    ///
    /// `levels` holds one value per `(entity, group)` pair in row-major
    /// order; a level above `0.5` counts as assigned.
    ///
    /// # Errors
    ///
    /// - `GroupingError::UnassignedEntity` if no level of an entity is active.
    /// - `GroupingError::MultiplyAssignedEntity` if more than one is.
    /// - `GroupingError::GroupOverCapacity` if a group exceeds the capacity.
    ///
    /// # Panics
    ///
    /// Panics if `levels` does not have one entry per `(entity, group)` pair.
    pub fn from_levels<T>(model: &Model<T>, levels: &[f64]) -> Result<Self, GroupingError>
    where
        T: PrimInt + Signed,
    {
        let n = model.num_entities();
        let num_groups = model.num_groups();
        assert_eq!(
            levels.len(),
            n * num_groups,
            "level vector has {} entries but the model has {} assignment variables",
            levels.len(),
            n * num_groups
        );

        let mut groups: Vec<Vec<String>> = vec![Vec::new(); num_groups];
        for (entity, name) in model.roster().iter() {
            let row = entity.get() * num_groups;
            let mut assigned_group = None;
            for g in 0..num_groups {
                if levels[row + g] > LEVEL_THRESHOLD {
                    if assigned_group.is_some() {
                        return Err(GroupingError::MultiplyAssignedEntity {
                            name: name.to_string(),
                        });
                    }
                    assigned_group = Some(g);
                }
            }
            let Some(g) = assigned_group else {
                return Err(GroupingError::UnassignedEntity {
                    name: name.to_string(),
                });
            };
            groups[g].push(name.to_string());
        }

        for (g, members) in groups.iter().enumerate() {
            if members.len() > model.capacity() {
                return Err(GroupingError::GroupOverCapacity {
                    group: GroupIndex::new(g),
                    size: members.len(),
                    capacity: model.capacity(),
                });
            }
        }

        Ok(Self { groups })
    }

    /// Decodes a solution into a verified group listing.
    pub fn from_solution<T>(model: &Model<T>, solution: &Solution<T>) -> Result<Self, GroupingError>
    where
        T: PrimInt + Signed,
    {
        Self::from_levels(model, &solution.to_levels(model.num_groups()))
    }

    /// Returns the number of groups, including empty ones.
    #[inline]
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Returns the members of the given group in roster order.
    ///
    /// # Panics
    ///
    /// Panics if `group` is out of bounds.
    #[inline]
    pub fn members(&self, group: GroupIndex) -> &[String] {
        let index = group.get();
        debug_assert!(
            index < self.groups.len(),
            "called `Grouping::members` with group index out of bounds: the len is {} but the index is {}",
            self.groups.len(),
            index
        );

        &self.groups[index]
    }

    /// Returns all groups as slices of member names.
    #[inline]
    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    /// Returns the group holding the entity with the given name, if any.
    pub fn group_of(&self, name: &str) -> Option<GroupIndex> {
        self.groups
            .iter()
            .position(|members| members.iter().any(|member| member == name))
            .map(GroupIndex::new)
    }

    /// Iterates over `(GroupIndex, members)` pairs in group order.
    pub fn iter(&self) -> impl Iterator<Item = (GroupIndex, &[String])> {
        self.groups
            .iter()
            .enumerate()
            .map(|(g, members)| (GroupIndex::new(g), members.as_slice()))
    }
}

impl std::fmt::Display for Grouping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (g, members) in self.groups.iter().enumerate() {
            if g > 0 {
                writeln!(f)?;
            }
            write!(f, "Group {}: {}", g + 1, members.join(", "))?;
        }
        Ok(())
    }
}
