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

//! # Partition Solution
//!
//! A complete assignment of every entity to a group, together with its
//! objective value. Solutions are produced by the solving engine and decoded
//! into a verified group listing by the `grouping` module.

use crate::index::{EntityIndex, GroupIndex};

/// A complete assignment of entities to groups with its objective value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<T> {
    objective: T,
    // assignment[i] = group of entity i.
    assignment: Vec<GroupIndex>,
}

impl<T> Solution<T>
where
    T: Copy,
{
    /// Creates a new solution from an objective value and a per-entity group
    /// assignment.
    #[inline]
    pub fn new(objective: T, assignment: Vec<GroupIndex>) -> Self {
        Self {
            objective,
            assignment,
        }
    }

    /// Returns the objective value of this solution, the number of satisfied
    /// directed preferences.
    #[inline]
    pub fn objective(&self) -> T {
        self.objective
    }

    /// Returns the number of assigned entities.
    #[inline]
    pub fn num_entities(&self) -> usize {
        self.assignment.len()
    }

    /// Returns the group of the given entity.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is out of bounds.
    #[inline]
    pub fn group_of(&self, entity: EntityIndex) -> GroupIndex {
        let index = entity.get();
        debug_assert!(
            index < self.assignment.len(),
            "called `Solution::group_of` with entity index out of bounds: the len is {} but the index is {}",
            self.assignment.len(),
            index
        );

        self.assignment[index]
    }

    /// Returns the full per-entity group assignment.
    #[inline]
    pub fn assignment(&self) -> &[GroupIndex] {
        &self.assignment
    }

    /// Expands the assignment into assignment-variable levels, one value per
    /// `(entity, group)` pair in row-major order. The level of `x[i][g]` is
    /// `1.0` iff entity `i` sits in group `g`.
    ///
    /// This is the interchange format shared with the `grouping` decoder and
    /// the binary-program objective oracle.
    pub fn to_levels(&self, num_groups: usize) -> Vec<f64> {
        let mut levels = vec![0.0; self.assignment.len() * num_groups];
        for (i, group) in self.assignment.iter().enumerate() {
            debug_assert!(
                group.get() < num_groups,
                "solution assigns entity {} to group {} but the model has only {} groups",
                i,
                group.get(),
                num_groups
            );
            levels[i * num_groups + group.get()] = 1.0;
        }
        levels
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solution(objective {}, {} entities)",
            self.objective,
            self.assignment.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gi(g: usize) -> GroupIndex {
        GroupIndex::new(g)
    }

    #[test]
    fn test_accessors() {
        let solution = Solution::new(4i64, vec![gi(0), gi(0), gi(1), gi(1)]);
        assert_eq!(solution.objective(), 4);
        assert_eq!(solution.num_entities(), 4);
        assert_eq!(solution.group_of(EntityIndex::new(0)), gi(0));
        assert_eq!(solution.group_of(EntityIndex::new(3)), gi(1));
        assert_eq!(solution.assignment(), &[gi(0), gi(0), gi(1), gi(1)]);
    }

    #[test]
    fn test_to_levels() {
        let solution = Solution::new(0i64, vec![gi(1), gi(0)]);
        assert_eq!(solution.to_levels(2), vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_display() {
        let solution = Solution::new(2i64, vec![gi(0), gi(0)]);
        assert_eq!(format!("{}", solution), "Solution(objective 2, 2 entities)");
    }
}
