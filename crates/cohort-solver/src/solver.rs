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

//! # Portfolio-Orchestrated Partition Solver
//!
//! Runs one branch-and-bound session per branching strategy in parallel,
//! sharing a single incumbent so the sessions prune against each other's
//! best solutions. Each thread carries a composite monitor with an interrupt
//! hook and the configured limits; the first session to prove optimality
//! raises the stop signal for the rest.
//!
//! The aggregated outcome decodes the best solution into a verified group
//! listing. Optimality is claimed iff at least one session exhausted its
//! tree.

use crate::error::SolveError;
use cohort_bnb::{
    bnb::BnbSolver,
    branching::{BranchingStrategy, DegreeOrder, RosterOrder},
    incumbent::SharedIncumbent,
    monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor, log::LogMonitor,
        node_limit::NodeLimitMonitor, time_limit::TimeLimitMonitor,
    },
    num::SolverNumeric,
    result::{BnbOutcome, TerminationReason},
};
use cohort_model::{grouping::Grouping, model::Model, solution::Solution};
use std::sync::atomic::{AtomicBool, Ordering};

/// Aggregate statistics of one portfolio run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolveStatistics {
    /// Nodes explored, summed over all sessions.
    pub nodes_explored: u64,
    /// Improving solutions found, summed over all sessions.
    pub solutions_found: u64,
    /// Parallel sessions used.
    pub used_threads: usize,
    /// Wall-clock duration of the whole run.
    pub solve_duration: std::time::Duration,
}

impl std::fmt::Display for SolveStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolveStatistics(nodes: {}, solutions: {}, threads: {}, duration: {:.2?})",
            self.nodes_explored, self.solutions_found, self.used_threads, self.solve_duration
        )
    }
}

/// The result of a successful partition run: the verified group listing,
/// the raw solution behind it, and how the run went.
#[derive(Debug, Clone)]
pub struct PartitionOutcome<T> {
    grouping: Grouping,
    solution: Solution<T>,
    proven_optimal: bool,
    statistics: SolveStatistics,
}

impl<T> PartitionOutcome<T> {
    /// Returns the decoded, verified group listing.
    #[inline]
    pub fn grouping(&self) -> &Grouping {
        &self.grouping
    }

    /// Returns the raw solution the grouping was decoded from.
    #[inline]
    pub fn solution(&self) -> &Solution<T> {
        &self.solution
    }

    /// Returns `true` if global optimality was proven.
    #[inline]
    pub fn proven_optimal(&self) -> bool {
        self.proven_optimal
    }

    #[inline]
    pub fn statistics(&self) -> &SolveStatistics {
        &self.statistics
    }
}

/// Builder for [`PartitionSolver`].
#[derive(Debug, Clone, Default)]
pub struct PartitionSolverBuilder {
    time_limit: Option<std::time::Duration>,
    node_limit: Option<u64>,
    log_progress: bool,
}

impl PartitionSolverBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the wall-clock time of every session. Without a limit the solver
    /// runs until optimality is proven.
    #[inline]
    pub fn with_time_limit(mut self, time_limit: std::time::Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Caps the number of explored nodes per session.
    #[inline]
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    /// Prints a line to stdout for every improving solution of every session.
    #[inline]
    pub fn with_progress_logging(mut self) -> Self {
        self.log_progress = true;
        self
    }

    #[inline]
    pub fn build(self) -> PartitionSolver {
        PartitionSolver {
            time_limit: self.time_limit,
            node_limit: self.node_limit,
            log_progress: self.log_progress,
        }
    }
}

/// The high-level solver: a portfolio of branch-and-bound sessions over the
/// built-in branching strategies, aggregated into one verified outcome.
#[derive(Debug, Clone, Default)]
pub struct PartitionSolver {
    time_limit: Option<std::time::Duration>,
    node_limit: Option<u64>,
    log_progress: bool,
}

impl PartitionSolver {
    /// Creates a solver without limits; it runs until optimality is proven.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Solves the given model and decodes the best solution into a verified
    /// group listing.
    ///
    /// # Errors
    ///
    /// - `SolveError::SolverFailure` if every session terminated without a
    ///   solution (only possible under very tight limits).
    /// - `SolveError::Grouping` if the winning solution violates a partition
    ///   invariant. This indicates an engine bug and is never auto-corrected.
    pub fn solve<T>(&self, model: &Model<T>) -> Result<PartitionOutcome<T>, SolveError>
    where
        T: SolverNumeric,
    {
        let start_time = std::time::Instant::now();

        let strategies: Vec<Box<dyn BranchingStrategy<T> + Send + Sync>> =
            vec![Box::new(RosterOrder::new()), Box::new(DegreeOrder::new())];

        let incumbent = SharedIncumbent::<T>::new();
        let stop_signal = AtomicBool::new(false);
        let outcomes = self.run_portfolio(model, &strategies, &incumbent, &stop_signal);

        let statistics = SolveStatistics {
            nodes_explored: outcomes
                .iter()
                .map(|o| o.statistics().nodes_explored)
                .sum(),
            solutions_found: outcomes
                .iter()
                .map(|o| o.statistics().solutions_found)
                .sum(),
            used_threads: outcomes.len(),
            solve_duration: start_time.elapsed(),
        };

        let proven_optimal = outcomes.iter().any(|o| o.is_optimal());
        let best_solution = Self::find_best_solution(&outcomes, &incumbent);

        let Some(solution) = best_solution else {
            let reason = outcomes
                .iter()
                .find_map(|o| match o.reason() {
                    TerminationReason::Aborted(reason) => Some(reason.clone()),
                    TerminationReason::OptimalityProven => None,
                })
                .unwrap_or_else(|| "no session produced a solution".to_string());
            return Err(SolveError::SolverFailure { reason });
        };

        let grouping = Grouping::from_solution(model, &solution)?;

        Ok(PartitionOutcome {
            grouping,
            solution,
            proven_optimal,
            statistics,
        })
    }

    /// Spawns one scoped thread per strategy and collects the outcomes.
    fn run_portfolio<T>(
        &self,
        model: &Model<T>,
        strategies: &[Box<dyn BranchingStrategy<T> + Send + Sync>],
        incumbent: &SharedIncumbent<T>,
        stop_signal: &AtomicBool,
    ) -> Vec<BnbOutcome<T>>
    where
        T: SolverNumeric,
    {
        let time_limit = self.time_limit;
        let node_limit = self.node_limit;
        let log_progress = self.log_progress;

        let mut outcomes = Vec::with_capacity(strategies.len());
        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(strategies.len());

            for strategy in strategies {
                let handle = scope.spawn(move || {
                    let mut monitor = CompositeMonitor::<T>::new();
                    // Always add the interrupt monitor so this thread stops
                    // once another one proves optimality.
                    monitor.add_monitor(InterruptMonitor::new(stop_signal));
                    if let Some(limit) = time_limit {
                        monitor.add_monitor(TimeLimitMonitor::new(limit));
                    }
                    if let Some(limit) = node_limit {
                        monitor.add_monitor(NodeLimitMonitor::new(limit));
                    }
                    if log_progress {
                        monitor.add_monitor(LogMonitor::default());
                    }

                    let solver = BnbSolver::<T>::new();
                    let outcome =
                        solver.solve_with_incumbent(model, strategy.as_ref(), monitor, incumbent);

                    if outcome.is_optimal() {
                        stop_signal.store(true, Ordering::Relaxed);
                    }
                    outcome
                });
                handles.push(handle);
            }

            for handle in handles {
                outcomes.push(handle.join().expect("portfolio solver thread panicked"));
            }
        });

        outcomes
    }

    /// Finds the best solution among all session outcomes and the shared
    /// incumbent.
    fn find_best_solution<T>(
        outcomes: &[BnbOutcome<T>],
        incumbent: &SharedIncumbent<T>,
    ) -> Option<Solution<T>>
    where
        T: SolverNumeric,
    {
        let session_solutions = outcomes.iter().filter_map(|o| o.result().solution());
        let snapshot = incumbent.snapshot();

        session_solutions
            .chain(snapshot.as_ref())
            .max_by_key(|s| {
                let objective: i64 = s.objective().into();
                objective
            })
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_model::{
        roster::Roster,
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

    fn build_model(
        names: &[&str],
        preferences: &[(&str, &[&str])],
        capacity: usize,
    ) -> Model<i64> {
        let roster = Roster::new(names.iter().copied()).unwrap();
        let weights = WeightMatrix::build(&roster, &prefs(preferences));
        Model::new(roster, weights, capacity).unwrap()
    }

    #[test]
    fn test_portfolio_proves_optimality() {
        let model = build_model(
            &["A", "B", "C", "D"],
            &[("A", &["B"]), ("B", &["A"]), ("C", &["D"]), ("D", &["C"])],
            2,
        );

        let outcome = PartitionSolver::new().solve(&model).unwrap();
        assert!(outcome.proven_optimal());
        assert_eq!(outcome.solution().objective(), 4);
        assert_eq!(outcome.statistics().used_threads, 2);
    }

    #[test]
    fn test_grouping_is_verified() {
        let model = build_model(&["A", "B", "C"], &[("A", &["B"])], 2);
        let outcome = PartitionSolver::new().solve(&model).unwrap();

        let grouping = outcome.grouping();
        assert_eq!(grouping.num_groups(), 2);
        let total_members: usize = grouping.groups().iter().map(|g| g.len()).sum();
        assert_eq!(total_members, 3);
        assert_eq!(grouping.group_of("A"), grouping.group_of("B"));
    }

    #[test]
    fn test_zero_node_limit_is_a_solver_failure() {
        let model = build_model(&["A", "B", "C", "D"], &[], 2);
        let solver = PartitionSolverBuilder::new().with_node_limit(0).build();

        match solver.solve(&model) {
            Err(SolveError::SolverFailure { reason }) => {
                assert_eq!(reason, "node limit reached");
            }
            other => panic!("expected SolverFailure, got {:?}", other.map(|o| o.proven_optimal())),
        }
    }

    #[test]
    fn test_degenerate_capacity_yields_single_group() {
        let model = build_model(
            &["A", "B", "C", "D"],
            &[("A", &["B", "C"]), ("B", &["A"]), ("C", &["D"]), ("D", &["C"])],
            10,
        );

        let outcome = PartitionSolver::new().solve(&model).unwrap();
        assert!(outcome.proven_optimal());
        assert_eq!(outcome.grouping().num_groups(), 1);
        assert_eq!(outcome.grouping().members(0.into()).len(), 4);
        // Every preference is satisfiable when everyone shares a group.
        assert_eq!(outcome.solution().objective(), model.total_pair_weight());
    }

    #[test]
    fn test_unknown_names_are_dropped() {
        let model = build_model(
            &["A", "B", "C", "D"],
            &[
                ("A", &["B", "Ghost"]),
                ("B", &["A"]),
                ("Phantom", &["A", "B"]),
                ("C", &["D"]),
                ("D", &["C"]),
            ],
            2,
        );

        let outcome = PartitionSolver::new().solve(&model).unwrap();
        assert_eq!(outcome.solution().objective(), 4);
    }

    /// A random instance solved with capacity `c` stays feasible for any
    /// larger capacity, so the optimal objective is monotone in `c`.
    #[test]
    fn test_objective_is_monotone_in_capacity() {
        use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

        let mut rng = StdRng::seed_from_u64(7);
        let names: Vec<String> = (0..8).map(|i| format!("E{}", i)).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();

        let mut preferences = PreferenceLists::default();
        for i in 0..names.len() {
            let mut others: Vec<&String> =
                names.iter().enumerate().filter(|&(j, _)| j != i).map(|(_, n)| n).collect();
            others.shuffle(&mut rng);
            preferences.insert(
                names[i].clone(),
                others[..3].iter().map(|n| n.to_string()).collect(),
            );
        }

        let mut previous = i64::MIN;
        for capacity in [2usize, 4, 8] {
            let roster = Roster::new(name_refs.iter().copied()).unwrap();
            let weights = WeightMatrix::build(&roster, &preferences);
            let model = Model::new(roster, weights, capacity).unwrap();

            let outcome = PartitionSolver::new().solve(&model).unwrap();
            assert!(outcome.proven_optimal());
            assert!(outcome.solution().objective() >= previous);
            previous = outcome.solution().objective();
        }
    }

    /// The search objective must agree with the binary program the model
    /// formalizes, evaluated on the decoded variable levels.
    #[test]
    fn test_objective_matches_program_on_random_instance() {
        use cohort_model::program::PartitionProgram;
        use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

        let mut rng = StdRng::seed_from_u64(11);
        let names: Vec<String> = (0..9).map(|i| format!("E{}", i)).collect();

        let mut preferences = PreferenceLists::default();
        for i in 0..names.len() {
            let mut others: Vec<&String> =
                names.iter().enumerate().filter(|&(j, _)| j != i).map(|(_, n)| n).collect();
            others.shuffle(&mut rng);
            preferences.insert(
                names[i].clone(),
                others[..2].iter().map(|n| n.to_string()).collect(),
            );
        }

        let roster = Roster::new(names.iter().cloned()).unwrap();
        let weights = WeightMatrix::<i64>::build(&roster, &preferences);
        let model = Model::new(roster, weights, 3).unwrap();

        let outcome = PartitionSolver::new().solve(&model).unwrap();
        let program = PartitionProgram::new(&model);
        let levels = outcome.solution().to_levels(model.num_groups());

        assert!(program.is_feasible(&levels));
        assert_eq!(program.objective_value(&levels), outcome.solution().objective());
    }

    #[test]
    fn test_node_limited_run_is_not_proven_optimal() {
        // Four mutual triangles under capacity 2: every group splits at
        // least one pair, so the total pair weight (24) never matches the
        // optimum (8) and the bound stays loose. No pruning can collapse
        // the tree, and the unprunable prefix alone exceeds the node limit,
        // while the first leaf sits well below it. Neither session can
        // exhaust, whatever the shared incumbent does.
        let names = [
            "E0", "E1", "E2", "E3", "E4", "E5", "E6", "E7", "E8", "E9", "E10", "E11",
        ];
        let triangles: &[(&str, &[&str])] = &[
            ("E0", &["E1", "E2"]),
            ("E1", &["E0", "E2"]),
            ("E2", &["E0", "E1"]),
            ("E3", &["E4", "E5"]),
            ("E4", &["E3", "E5"]),
            ("E5", &["E3", "E4"]),
            ("E6", &["E7", "E8"]),
            ("E7", &["E6", "E8"]),
            ("E8", &["E6", "E7"]),
            ("E9", &["E10", "E11"]),
            ("E10", &["E9", "E11"]),
            ("E11", &["E9", "E10"]),
        ];
        let model = build_model(&names, triangles, 2);

        let solver = PartitionSolverBuilder::new().with_node_limit(200).build();
        let outcome = solver.solve(&model).unwrap();
        assert!(!outcome.proven_optimal());
        assert!(outcome.solution().objective() >= 2);
    }
}
