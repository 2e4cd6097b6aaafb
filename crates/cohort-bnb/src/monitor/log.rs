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

//! # Log Monitor
//!
//! Prints a fixed-width progress line at a configurable interval, plus a
//! header per run. Reading the clock at every step would dominate the cheap
//! node processing, so steps are filtered through a bitmask first, exactly
//! like the time limit monitor. Intended for interactive use and debugging;
//! wrap it in a composite next to the limit monitors.

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    num::SolverNumeric,
};
use cohort_model::{model::Model, solution::Solution};
use std::time::{Duration, Instant};

/// Default bitmask for the clock check. The clock is read every 4096 steps.
pub const DEFAULT_LOG_CLOCK_CHECK_MASK: u64 = 0xFFF;

/// A monitor that logs search progress to stdout.
#[derive(Debug, Clone)]
pub struct LogMonitor<T> {
    steps: u64,
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_objective: Option<T>,
}

impl<T> Default for LogMonitor<T> {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), DEFAULT_LOG_CLOCK_CHECK_MASK)
    }
}

impl<T> LogMonitor<T> {
    #[inline]
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            steps: 0,
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_objective: None,
        }
    }
}

impl<T> LogMonitor<T>
where
    T: SolverNumeric,
{
    fn print_header(&self) {
        println!("{:<9} | {:<14} | {:<14}", "Elapsed", "Steps", "Best");
        println!("{}", "-".repeat(42));
    }

    fn log_line(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();
        let best = match &self.best_objective {
            Some(objective) => format!("{}", objective),
            None => "-".to_string(),
        };
        println!("{:<9} | {:<14} | {:<14}", format!("{:.1}s", elapsed), self.steps, best);
        self.last_log_time = now;
    }
}

impl<T> SearchMonitor<T> for LogMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, model: &Model<T>) {
        self.steps = 0;
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_objective = None;
        println!(
            "Search started: {} entities, {} groups, capacity {}",
            model.num_entities(),
            model.num_groups(),
            model.capacity()
        );
        self.print_header();
    }

    fn on_exit_search(&mut self) {
        self.log_line();
    }

    fn on_solution_found(&mut self, solution: &Solution<T>) {
        self.best_objective = Some(solution.objective());
    }

    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
        if self.steps & self.clock_check_mask != 0 {
            return;
        }
        if self.last_log_time.elapsed() >= self.log_interval {
            self.log_line();
        }
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_terminates() {
        let mut monitor = LogMonitor::<i64>::default();
        for _ in 0..10_000 {
            monitor.on_step();
        }
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_tracks_best_objective() {
        let mut monitor = LogMonitor::<i64>::default();
        assert_eq!(monitor.best_objective, None);
        monitor.on_solution_found(&Solution::new(3, vec![]));
        assert_eq!(monitor.best_objective, Some(3));
    }
}
