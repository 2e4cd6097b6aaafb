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

//! # Binary Program Formulation
//!
//! The partition problem as a 0/1 optimization program over two variable
//! families:
//!
//! * `x[i][g]` is `1` iff entity `i` sits in group `g`.
//! * `y[i][j][g]` (for ordered pairs `i != j`) is `1` iff `i` and `j` share
//!   group `g`. Each `y` is the AND of two `x` variables, linearized the
//!   standard way:
//!
//!   ```text
//!   y[i][j][g] <= x[i][g]
//!   y[i][j][g] <= x[j][g]
//!   y[i][j][g] >= x[i][g] + x[j][g] - 1
//!   ```
//!
//! Subject to `sum_g x[i][g] = 1` for every entity and
//! `sum_i x[i][g] <= capacity` for every group, the objective maximizes
//! `sum w[i][j] * y[i][j][g]`.
//!
//! The search engine branches on the assignment structure directly rather
//! than on the raw variable array, so this module does not drive the search.
//! It is the port contract for external 0/1 solvers and the independent
//! oracle the tests use: [`PartitionProgram::objective_value`] and
//! [`PartitionProgram::is_feasible`] evaluate candidate assignment levels
//! straight from the formulation, with no knowledge of how the search
//! computes its incremental objective.

use crate::{index::EntityIndex, model::Model};
use num_traits::{PrimInt, Signed};

/// Threshold above which a relaxed binary variable level counts as `1`.
pub const LEVEL_THRESHOLD: f64 = 0.5;

/// The 0/1 program view of a partition model.
#[derive(Debug, Clone, Copy)]
pub struct PartitionProgram<'a, T> {
    model: &'a Model<T>,
}

impl<'a, T> PartitionProgram<'a, T>
where
    T: PrimInt + Signed,
{
    /// Creates the program view of the given model.
    #[inline]
    pub fn new(model: &'a Model<T>) -> Self {
        Self { model }
    }

    /// Returns the underlying model.
    #[inline]
    pub fn model(&self) -> &'a Model<T> {
        self.model
    }

    /// Returns the number of assignment variables `x[i][g]`.
    #[inline]
    pub fn num_assignment_vars(&self) -> usize {
        self.model.num_entities() * self.model.num_groups()
    }

    /// Returns the number of co-membership variables `y[i][j][g]`, one per
    /// ordered entity pair and group.
    #[inline]
    pub fn num_pair_vars(&self) -> usize {
        let n = self.model.num_entities();
        n * (n - 1) * self.model.num_groups()
    }

    /// Returns the total variable count of the program.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.num_assignment_vars() + self.num_pair_vars()
    }

    /// Returns the total constraint count: one exactly-one row per entity,
    /// one capacity row per group, and three linearization rows per pair
    /// variable.
    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.model.num_entities() + self.model.num_groups() + 3 * self.num_pair_vars()
    }

    /// Returns the flat index of `x[entity][group]` in the variable array.
    /// Assignment variables occupy the first block, row-major by entity.
    #[inline]
    pub fn assignment_var(&self, entity: usize, group: usize) -> usize {
        debug_assert!(
            entity < self.model.num_entities() && group < self.model.num_groups(),
            "called `PartitionProgram::assignment_var` out of bounds: ({}, {}) in a {}x{} program",
            entity,
            group,
            self.model.num_entities(),
            self.model.num_groups()
        );

        entity * self.model.num_groups() + group
    }

    /// Returns the flat index of `y[i][j][g]` for an ordered pair `i != j`.
    /// Pair variables follow the assignment block, ordered by `i`, then `j`
    /// with the diagonal skipped, then `g`.
    pub fn pair_var(&self, i: usize, j: usize, group: usize) -> usize {
        let n = self.model.num_entities();
        let num_groups = self.model.num_groups();
        debug_assert!(
            i < n && j < n && i != j && group < num_groups,
            "called `PartitionProgram::pair_var` with invalid indices ({}, {}, {})",
            i,
            j,
            group
        );

        let pair = i * (n - 1) + if j < i { j } else { j - 1 };
        self.num_assignment_vars() + pair * num_groups + group
    }

    /// Evaluates the objective `sum w[i][j] * y[i][j][g]` for the given
    /// assignment-variable levels, deriving each `y` as the AND of its two
    /// `x` levels.
    ///
    /// `levels` holds one value per `(entity, group)` pair in row-major
    /// order, as produced by `Solution::to_levels`.
    ///
    /// # Panics
    ///
    /// Panics if `levels` does not have `num_assignment_vars()` entries.
    pub fn objective_value(&self, levels: &[f64]) -> T {
        assert_eq!(
            levels.len(),
            self.num_assignment_vars(),
            "level vector has {} entries but the program has {} assignment variables",
            levels.len(),
            self.num_assignment_vars()
        );

        let n = self.model.num_entities();
        let num_groups = self.model.num_groups();
        let weights = self.model.weights();

        let mut objective = T::zero();
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                for g in 0..num_groups {
                    let xi = levels[self.assignment_var(i, g)] > LEVEL_THRESHOLD;
                    let xj = levels[self.assignment_var(j, g)] > LEVEL_THRESHOLD;
                    if xi && xj {
                        objective = objective.saturating_add(
                            weights.weight(EntityIndex::new(i), EntityIndex::new(j)),
                        );
                    }
                }
            }
        }
        objective
    }

    /// Checks the assignment constraints against the given levels: every
    /// entity in exactly one group and no group above capacity.
    pub fn is_feasible(&self, levels: &[f64]) -> bool {
        if levels.len() != self.num_assignment_vars() {
            return false;
        }

        let n = self.model.num_entities();
        let num_groups = self.model.num_groups();

        let mut group_loads = vec![0usize; num_groups];
        for i in 0..n {
            let mut assigned = 0usize;
            for g in 0..num_groups {
                if levels[self.assignment_var(i, g)] > LEVEL_THRESHOLD {
                    assigned += 1;
                    group_loads[g] += 1;
                }
            }
            if assigned != 1 {
                return false;
            }
        }
        group_loads
            .iter()
            .all(|&load| load <= self.model.capacity())
    }
}

impl<T> std::fmt::Display for PartitionProgram<'_, T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PartitionProgram({} variables, {} constraints)",
            self.num_variables(),
            self.num_constraints()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        index::GroupIndex,
        roster::Roster,
        solution::Solution,
        weights::{PreferenceLists, WeightMatrix},
    };

    fn prefs(pairs: &[(&str, &[&str])]) -> PreferenceLists {
        pairs
            .iter()
            .map(|(owner, list)| {
                (
                    owner.to_string(),
                    list.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect()
    }

    fn model() -> Model<i64> {
        let roster = Roster::new(["A", "B", "C", "D"]).unwrap();
        let preferences = prefs(&[
            ("A", &["B"]),
            ("B", &["A"]),
            ("C", &["D"]),
            ("D", &["C"]),
        ]);
        let weights = WeightMatrix::build(&roster, &preferences);
        Model::new(roster, weights, 2).unwrap()
    }

    #[test]
    fn test_variable_and_constraint_counts() {
        let m = model();
        let program = PartitionProgram::new(&m);

        // n = 4, G = 2.
        assert_eq!(program.num_assignment_vars(), 8);
        assert_eq!(program.num_pair_vars(), 24);
        assert_eq!(program.num_variables(), 32);
        // 4 exactly-one rows + 2 capacity rows + 3 * 24 linearization rows.
        assert_eq!(program.num_constraints(), 78);
    }

    #[test]
    fn test_variable_indices_are_distinct_and_dense() {
        let m = model();
        let program = PartitionProgram::new(&m);

        let mut seen = vec![false; program.num_variables()];
        for i in 0..4 {
            for g in 0..2 {
                let var = program.assignment_var(i, g);
                assert!(!seen[var]);
                seen[var] = true;
            }
        }
        for i in 0..4 {
            for j in 0..4 {
                if i == j {
                    continue;
                }
                for g in 0..2 {
                    let var = program.pair_var(i, j, g);
                    assert!(!seen[var]);
                    seen[var] = true;
                }
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_objective_value_counts_both_directions() {
        let m = model();
        let program = PartitionProgram::new(&m);

        // {A, B} and {C, D}: both mutual pairs satisfied.
        let paired = Solution::new(
            0i64,
            vec![
                GroupIndex::new(0),
                GroupIndex::new(0),
                GroupIndex::new(1),
                GroupIndex::new(1),
            ],
        );
        assert_eq!(program.objective_value(&paired.to_levels(2)), 4);

        // {A, C} and {B, D}: nothing satisfied.
        let split = Solution::new(
            0i64,
            vec![
                GroupIndex::new(0),
                GroupIndex::new(1),
                GroupIndex::new(0),
                GroupIndex::new(1),
            ],
        );
        assert_eq!(program.objective_value(&split.to_levels(2)), 0);
    }

    #[test]
    fn test_is_feasible() {
        let m = model();
        let program = PartitionProgram::new(&m);

        let ok = Solution::new(
            0i64,
            vec![
                GroupIndex::new(0),
                GroupIndex::new(0),
                GroupIndex::new(1),
                GroupIndex::new(1),
            ],
        );
        assert!(program.is_feasible(&ok.to_levels(2)));

        // Three entities in a group of capacity two.
        let over = Solution::new(
            0i64,
            vec![
                GroupIndex::new(0),
                GroupIndex::new(0),
                GroupIndex::new(0),
                GroupIndex::new(1),
            ],
        );
        assert!(!program.is_feasible(&over.to_levels(2)));

        // An unassigned entity.
        let mut levels = ok.to_levels(2);
        levels[0] = 0.0;
        levels[1] = 0.0;
        assert!(!program.is_feasible(&levels));

        // A doubly assigned entity.
        let mut levels = ok.to_levels(2);
        levels[1] = 1.0;
        assert!(!program.is_feasible(&levels));
    }
}
