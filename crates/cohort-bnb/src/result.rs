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

//! Outcome types of a branch-and-bound run.
//!
//! Every partition model has a feasible assignment by construction (the
//! group count is derived from the capacity), so there is no infeasible
//! outcome. A run either exhausts the tree and proves optimality, or gets
//! aborted by a monitor with whatever solution it has found so far.

use crate::stats::SearchStatistics;
use cohort_model::solution::Solution;

/// The solution-quality classification of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult<T> {
    /// A solution with proven global optimality.
    Optimal(Solution<T>),
    /// A feasible solution without an optimality proof.
    Feasible(Solution<T>),
    /// The run terminated before finding any solution.
    Unknown,
}

impl<T> SolveResult<T> {
    /// Returns the contained solution, if any.
    #[inline]
    pub fn solution(&self) -> Option<&Solution<T>> {
        match self {
            SolveResult::Optimal(solution) | SolveResult::Feasible(solution) => Some(solution),
            SolveResult::Unknown => None,
        }
    }
}

impl<T> std::fmt::Display for SolveResult<T>
where
    T: Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveResult::Optimal(solution) => {
                write!(f, "Optimal(objective={})", solution.objective())
            }
            SolveResult::Feasible(solution) => {
                write!(f, "Feasible(objective={})", solution.objective())
            }
            SolveResult::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The search tree was exhausted; the best solution is globally optimal.
    OptimalityProven,
    /// A monitor terminated the search. The string carries the reason.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// The complete outcome of one branch-and-bound run: classification,
/// termination reason, and statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbOutcome<T> {
    result: SolveResult<T>,
    reason: TerminationReason,
    statistics: SearchStatistics,
}

impl<T> BnbOutcome<T> {
    /// An outcome proving the given solution optimal.
    #[inline]
    pub fn optimal(solution: Solution<T>, statistics: SearchStatistics) -> Self {
        Self {
            result: SolveResult::Optimal(solution),
            reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    /// An aborted outcome carrying the best solution found so far, if any.
    #[inline]
    pub fn aborted(
        solution: Option<Solution<T>>,
        reason: String,
        statistics: SearchStatistics,
    ) -> Self {
        Self {
            result: match solution {
                Some(solution) => SolveResult::Feasible(solution),
                None => SolveResult::Unknown,
            },
            reason: TerminationReason::Aborted(reason),
            statistics,
        }
    }

    #[inline]
    pub fn result(&self) -> &SolveResult<T> {
        &self.result
    }

    #[inline]
    pub fn reason(&self) -> &TerminationReason {
        &self.reason
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolveResult::Optimal(_))
    }

    #[inline]
    pub fn has_solution(&self) -> bool {
        matches!(
            self.result,
            SolveResult::Optimal(_) | SolveResult::Feasible(_)
        )
    }
}

impl<T> std::fmt::Display for BnbOutcome<T>
where
    T: Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BnbOutcome({}, {})", self.result, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_model::index::GroupIndex;

    fn solution(objective: i64) -> Solution<i64> {
        Solution::new(objective, vec![GroupIndex::new(0), GroupIndex::new(0)])
    }

    #[test]
    fn test_optimal_outcome() {
        let outcome = BnbOutcome::optimal(solution(4), SearchStatistics::default());
        assert!(outcome.is_optimal());
        assert!(outcome.has_solution());
        assert_eq!(outcome.reason(), &TerminationReason::OptimalityProven);
        assert_eq!(outcome.result().solution().unwrap().objective(), 4);
    }

    #[test]
    fn test_aborted_with_solution_is_feasible() {
        let outcome = BnbOutcome::aborted(
            Some(solution(2)),
            "time limit reached".to_string(),
            SearchStatistics::default(),
        );
        assert!(!outcome.is_optimal());
        assert!(outcome.has_solution());
        assert_eq!(
            outcome.reason(),
            &TerminationReason::Aborted("time limit reached".to_string())
        );
    }

    #[test]
    fn test_aborted_without_solution_is_unknown() {
        let outcome: BnbOutcome<i64> =
            BnbOutcome::aborted(None, "node limit reached".to_string(), SearchStatistics::default());
        assert!(!outcome.has_solution());
        assert_eq!(outcome.result(), &SolveResult::Unknown);
    }

    #[test]
    fn test_display() {
        let outcome = BnbOutcome::optimal(solution(4), SearchStatistics::default());
        assert_eq!(
            format!("{}", outcome),
            "BnbOutcome(Optimal(objective=4), Optimality Proven)"
        );
    }
}
