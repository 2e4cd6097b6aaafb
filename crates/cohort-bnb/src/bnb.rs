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

//! # Branch-and-Bound Engine for the Group Partition Problem
//!
//! A depth-first search over complete group assignments. Each tree level
//! places one entity, in the order chosen by the branching strategy; a leaf
//! is a complete partition and its objective is the accumulated gained pair
//! weight.
//!
//! Two structural properties keep the tree small:
//!
//! * **Symmetry breaking.** Group labels are interchangeable, so a placement
//!   may target any open group or the first closed one, never a later group.
//!   Every partition is still reachable up to relabeling, but each unordered
//!   partition is visited exactly once.
//! * **Forgone-weight bound.** Placing two related entities in different
//!   groups loses their pair weight for good. No completion of the current
//!   node can score more than `total_pair_weight - forgone`, so a node whose
//!   potential cannot strictly beat the incumbent is cut.
//!
//! Every node has at least one admissible placement (the group count is
//! derived from the capacity), so the search never dead-ends and a full
//! exhaustion proves global optimality. A shared incumbent lets several
//! sessions with different branching strategies prune against each other's
//! best solutions.

use crate::{
    branching::BranchingStrategy,
    incumbent::SharedIncumbent,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    num::SolverNumeric,
    result::BnbOutcome,
    state::SearchState,
    stats::SearchStatistics,
};
use cohort_model::{
    index::{EntityIndex, GroupIndex},
    model::Model,
    solution::Solution,
};

/// The exact branch-and-bound solver. Stateless; all per-run state lives in
/// a search session, so one solver value can serve any number of solves.
#[derive(Debug, Clone, Copy, Default)]
pub struct BnbSolver<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> BnbSolver<T>
where
    T: SolverNumeric,
{
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }

    /// Solves the given model to proven optimality, unless the monitor
    /// terminates the run first. Standalone variant with a private
    /// incumbent.
    #[inline]
    pub fn solve<B, S>(&self, model: &Model<T>, strategy: &B, monitor: S) -> BnbOutcome<T>
    where
        B: BranchingStrategy<T> + ?Sized,
        S: SearchMonitor<T>,
    {
        let incumbent = SharedIncumbent::new();
        self.solve_with_incumbent(model, strategy, monitor, &incumbent)
    }

    /// Solves the given model, sharing the best known solution with other
    /// sessions through `incumbent`. The search prunes against the shared
    /// bound and installs every improvement it finds.
    pub fn solve_with_incumbent<B, S>(
        &self,
        model: &Model<T>,
        strategy: &B,
        mut monitor: S,
        incumbent: &SharedIncumbent<T>,
    ) -> BnbOutcome<T>
    where
        B: BranchingStrategy<T> + ?Sized,
        S: SearchMonitor<T>,
    {
        let order = strategy.entity_order(model);
        debug_assert_eq!(
            order.len(),
            model.num_entities(),
            "branching strategy '{}' returned {} entities but the model has {}",
            strategy.name(),
            order.len(),
            model.num_entities()
        );

        let session = SearchSession {
            model,
            order,
            state: SearchState::new(model.num_entities(), model.num_groups()),
            monitor: &mut monitor,
            incumbent,
            best_objective: incumbent.lower_bound(),
            best_solution: None,
            stats: SearchStatistics::default(),
            start_time: std::time::Instant::now(),
        };
        session.run()
    }
}

/// Per-run state of one branch-and-bound search.
struct SearchSession<'a, T, S> {
    model: &'a Model<T>,
    order: Vec<EntityIndex>,
    state: SearchState<T>,
    monitor: &'a mut S,
    incumbent: &'a SharedIncumbent<T>,
    // Best known objective in i64 space, synced with the shared incumbent.
    best_objective: i64,
    best_solution: Option<Solution<T>>,
    stats: SearchStatistics,
    start_time: std::time::Instant,
}

impl<T, S> SearchSession<'_, T, S>
where
    T: SolverNumeric,
    S: SearchMonitor<T>,
{
    fn run(mut self) -> BnbOutcome<T> {
        self.monitor.on_enter_search(self.model);

        let aborted = self.dfs(0).err();

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search();

        match aborted {
            Some(reason) => BnbOutcome::aborted(self.best_solution, reason, self.stats),
            None => {
                // The tree is exhausted: nothing beats the best known bound,
                // so the strongest solution seen anywhere is optimal. The
                // shared incumbent may hold a better solution than this
                // session's own, installed by a sibling session.
                let own = self.best_solution.take();
                let shared = self.incumbent.snapshot();
                let best = match (own, shared) {
                    (Some(own), Some(shared)) => {
                        let own_objective: i64 = own.objective().into();
                        let shared_objective: i64 = shared.objective().into();
                        Some(if own_objective >= shared_objective {
                            own
                        } else {
                            shared
                        })
                    }
                    (own, shared) => own.or(shared),
                };
                match best {
                    Some(solution) => BnbOutcome::optimal(solution, self.stats),
                    None => BnbOutcome::aborted(
                        None,
                        "search exhausted without a solution".to_string(),
                        self.stats,
                    ),
                }
            }
        }
    }

    /// Explores the subtree that places `order[depth..]`. Returns `Err` with
    /// the termination reason if a monitor aborted the run.
    fn dfs(&mut self, depth: usize) -> Result<(), String> {
        self.stats.on_node_explored();
        self.stats.on_depth_update(depth as u64);
        self.monitor.on_step();
        if let SearchCommand::Terminate(reason) = self.monitor.search_command() {
            return Err(reason);
        }

        if depth == self.order.len() {
            self.handle_leaf();
            return Ok(());
        }

        // Pick up improvements installed by other sessions.
        self.best_objective = self.best_objective.max(self.incumbent.lower_bound());

        let potential: i64 = self
            .model
            .total_pair_weight()
            .saturating_sub(self.state.forgone())
            .into();
        if potential <= self.best_objective {
            self.stats.on_pruning_bound();
            return Ok(());
        }

        let entity = self.order[depth];
        // Any open group, plus the first closed one if there is one.
        let group_limit = (self.state.open_groups() + 1).min(self.model.num_groups());
        for g in 0..group_limit {
            let group = GroupIndex::new(g);
            if self.state.group_load(group) >= self.model.capacity() {
                continue;
            }

            let deltas = self.state.placement_deltas(self.model, entity, group);
            self.state.place(self.model, entity, group, deltas);
            let result = self.dfs(depth + 1);
            self.state.remove(entity, group, deltas);
            result?;
        }

        self.stats.on_backtrack();
        Ok(())
    }

    /// Records a complete assignment if it strictly improves on the best
    /// known objective.
    fn handle_leaf(&mut self) {
        let objective: i64 = self.state.gained().into();
        if objective > self.best_objective {
            let solution = self.state.to_solution();
            self.best_objective = objective;
            self.incumbent.try_install(&solution);
            self.stats.on_solution_found();
            self.monitor.on_solution_found(&solution);
            self.best_solution = Some(solution);
        }
    }
}
