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

//! # Shared Incumbent (Best Solution Holder)
//!
//! A concurrent container for the best solution discovered so far during
//! search. It exposes a fast, lock-free lower bound via an atomic and stores
//! the actual `Solution<T>` behind a `Mutex` as the source of truth, so
//! multiple search threads can propose improvements concurrently.
//!
//! The atomic bound is a heuristic short-circuit: a candidate that cannot
//! beat it is rejected without locking. All correctness-sensitive state goes
//! through the mutex, which re-checks against the actual stored solution.
//!
//! The partition objective is maximized, so the sentinel for "no incumbent
//! yet" is `i64::MIN` and only strictly greater objectives install.

use crate::num::SolverNumeric;
use cohort_model::solution::Solution;
use std::sync::{Mutex, atomic::AtomicI64};

/// A concurrent holder for the best (incumbent) solution found during search.
///
/// The lower bound is loaded and stored with `Ordering::Relaxed`. That is
/// sufficient because the atomic only serves to skip hopeless lock attempts;
/// the mutex-held solution decides every install.
#[derive(Debug)]
pub struct SharedIncumbent<T> {
    // Objective of the incumbent stored as i64 for atomic access.
    lower_bound: AtomicI64,
    solution: Mutex<Option<Solution<T>>>,
}

impl<T> Default for SharedIncumbent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Display for SharedIncumbent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Incumbent(lower_bound: {})", self.lower_bound())
    }
}

impl<T> SharedIncumbent<T> {
    /// Creates a new shared incumbent with no solution installed.
    /// The initial lower bound is `i64::MIN`.
    #[inline]
    pub fn new() -> Self {
        SharedIncumbent {
            lower_bound: AtomicI64::new(i64::MIN),
            solution: Mutex::new(None),
        }
    }

    /// Returns the current lower bound.
    #[inline]
    pub fn lower_bound(&self) -> i64 {
        self.lower_bound.load(std::sync::atomic::Ordering::Relaxed)
    }

    /// Returns a snapshot of the current incumbent solution, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Solution<T>>
    where
        T: Clone,
    {
        let guard = self.solution.lock().unwrap();
        guard.clone()
    }

    /// Attempts to install the given candidate solution as the new incumbent.
    /// Returns `true` if the candidate was installed, `false` otherwise.
    #[inline]
    pub fn try_install(&self, candidate: &Solution<T>) -> bool
    where
        T: SolverNumeric,
    {
        let candidate_objective: i64 = candidate.objective().into();

        // Maximizing, so higher is better.
        if candidate_objective <= self.lower_bound() {
            return false;
        }

        let mut guard = self.solution.lock().unwrap();
        // Another thread might have installed a better solution while we were
        // waiting for the lock. Compare against the actual solution in the
        // mutex, not the atomic hint read earlier.
        if let Some(current) = guard.as_ref() {
            let current_objective: i64 = current.objective().into();
            if candidate_objective <= current_objective {
                return false;
            }
        }

        *guard = Some(candidate.clone());
        self.lower_bound
            .store(candidate_objective, std::sync::atomic::Ordering::Relaxed);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::SharedIncumbent;
    use cohort_model::{index::GroupIndex, solution::Solution};
    use std::sync::Arc;
    use std::thread;

    fn make_solution(objective: i64, n: usize) -> Solution<i64> {
        let assignment = (0..n).map(|_| GroupIndex::new(0)).collect();
        Solution::new(objective, assignment)
    }

    #[test]
    fn test_initial_state() {
        let inc: SharedIncumbent<i64> = SharedIncumbent::new();
        assert_eq!(inc.lower_bound(), i64::MIN);
        assert!(inc.snapshot().is_none());
    }

    #[test]
    fn test_install_better_solution_updates_bound_and_snapshot() {
        let inc: SharedIncumbent<i64> = SharedIncumbent::new();
        assert!(inc.try_install(&make_solution(10, 3)));
        assert_eq!(inc.lower_bound(), 10);

        let snap = inc.snapshot().expect("snapshot should be Some");
        assert_eq!(snap.objective(), 10);
        assert_eq!(snap.num_entities(), 3);
    }

    #[test]
    fn test_reject_worse_or_equal_candidates() {
        let inc: SharedIncumbent<i64> = SharedIncumbent::new();
        assert!(inc.try_install(&make_solution(10, 2)));

        assert!(!inc.try_install(&make_solution(5, 2)));
        assert!(!inc.try_install(&make_solution(10, 2)));
        assert_eq!(inc.lower_bound(), 10);
        assert_eq!(inc.snapshot().unwrap().objective(), 10);
    }

    #[test]
    fn test_zero_objective_beats_sentinel() {
        let inc: SharedIncumbent<i64> = SharedIncumbent::new();
        assert!(inc.try_install(&make_solution(0, 2)));
        assert_eq!(inc.lower_bound(), 0);
    }

    #[test]
    fn test_concurrent_installs_maximum_wins() {
        let inc = Arc::new(SharedIncumbent::<i64>::new());
        let objectives = vec![3, 20, 4, 50, 12, 7, 5, 60, 9];

        let mut handles = Vec::new();
        for obj in objectives.iter().cloned() {
            let inc_cloned = Arc::clone(&inc);
            handles.push(thread::spawn(move || {
                inc_cloned.try_install(&make_solution(obj, 4))
            }));
        }

        let results = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>();
        assert!(
            results.iter().any(|&r| r),
            "at least one install should succeed"
        );

        let max_obj = *objectives.iter().max().unwrap();
        assert_eq!(inc.lower_bound(), max_obj);
        assert_eq!(inc.snapshot().unwrap().objective(), max_obj);
    }
}
