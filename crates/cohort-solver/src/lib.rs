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

//! # Cohort Solver
//!
//! **The front door of the Cohort Group Partition Solver.**
//!
//! Give it a roster of names, each entity's preference list, and a group
//! capacity; it builds the preference weight matrix, splits the roster into
//! the minimum number of capacity-bounded groups, and maximizes the number
//! of satisfied preferences, exactly. The search runs a parallel portfolio
//! of branch-and-bound sessions from `cohort_bnb` and returns a verified
//! group listing.
//!
//! ## Usage
//!
//! ```rust
//! use cohort_model::weights::PreferenceLists;
//! use cohort_solver::partition;
//!
//! let mut preferences = PreferenceLists::default();
//! preferences.insert("Ada".to_string(), vec!["Ben".to_string()]);
//! preferences.insert("Ben".to_string(), vec!["Ada".to_string()]);
//! preferences.insert("Cleo".to_string(), vec!["Dan".to_string()]);
//! preferences.insert("Dan".to_string(), vec!["Cleo".to_string()]);
//!
//! let outcome = partition(["Ada", "Ben", "Cleo", "Dan"], &preferences, 2).unwrap();
//! assert!(outcome.proven_optimal());
//! assert_eq!(outcome.solution().objective(), 4);
//! ```

pub mod error;
pub mod solver;

use crate::{
    error::SolveError,
    solver::{PartitionOutcome, PartitionSolver},
};
use cohort_model::{
    model::Model,
    roster::Roster,
    weights::{self, PreferenceLists, WeightMatrix},
};

/// Partitions the named entities into capacity-bounded groups, maximizing
/// the number of satisfied preferences. Runs without limits until global
/// optimality is proven.
///
/// Preference entries naming unknown entities are dropped silently; use
/// [`partition_checked`] to enforce a fixed list length instead.
///
/// # Errors
///
/// Returns `SolveError::Model` for invalid rosters or a zero capacity.
pub fn partition<I, S>(
    names: I,
    preferences: &PreferenceLists,
    capacity: usize,
) -> Result<PartitionOutcome<i64>, SolveError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let roster = Roster::new(names)?;
    let matrix = WeightMatrix::<i64>::build(&roster, preferences);
    let model = Model::new(roster, matrix, capacity)?;
    PartitionSolver::new().solve(&model)
}

/// Like [`partition`], but first checks that every entity has exactly
/// `list_length` preference entries and that nobody lists themselves.
pub fn partition_checked<I, S>(
    names: I,
    preferences: &PreferenceLists,
    capacity: usize,
    list_length: usize,
) -> Result<PartitionOutcome<i64>, SolveError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let roster = Roster::new(names)?;
    weights::validate_preferences(&roster, preferences, list_length)?;
    let matrix = WeightMatrix::<i64>::build(&roster, preferences);
    let model = Model::new(roster, matrix, capacity)?;
    PartitionSolver::new().solve(&model)
}
