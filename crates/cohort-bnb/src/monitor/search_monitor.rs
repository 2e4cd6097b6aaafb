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

//! # Monitor Contract
//!
//! The engine is observable but not steerable: monitors see the run start,
//! every node entry, every improving partition, and the run end, and their
//! only lever is [`SearchCommand::Terminate`]. The lifecycle hooks default
//! to no-ops so a limit monitor only implements the one or two it needs.

use crate::num::SolverNumeric;
use cohort_model::{model::Model, solution::Solution};

/// The monitor's verdict, polled by the engine before every descent.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    /// Stop the run. The string becomes the outcome's termination reason.
    Terminate(String),
}

impl SearchCommand {
    /// Returns `true` if this command stops the run.
    #[inline]
    pub fn is_terminate(&self) -> bool {
        matches!(self, SearchCommand::Terminate(_))
    }
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// An observer of one search run that may request termination.
pub trait SearchMonitor<T>
where
    T: SolverNumeric,
{
    /// A human readable name for logs and diagnostics.
    fn name(&self) -> &str;

    /// Called once before the root node, with the instance about to be
    /// solved. Stateful monitors reset here so one value can serve many
    /// runs.
    fn on_enter_search(&mut self, _model: &Model<T>) {}

    /// Called once after the run, exhausted or terminated alike.
    fn on_exit_search(&mut self) {}

    /// Called for every partition that improves on the session's best.
    fn on_solution_found(&mut self, _solution: &Solution<T>) {}

    /// Called on every node entry, before the command poll.
    fn on_step(&mut self) {}

    /// Polled after every [`on_step`](Self::on_step).
    fn search_command(&self) -> SearchCommand;
}

impl<T> std::fmt::Debug for dyn SearchMonitor<T> + '_
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SearchMonitor<T> + '_
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct VerdictOnly(SearchCommand);

    impl SearchMonitor<i64> for VerdictOnly {
        fn name(&self) -> &str {
            "VerdictOnly"
        }

        fn search_command(&self) -> SearchCommand {
            self.0.clone()
        }
    }

    #[test]
    fn test_lifecycle_hooks_default_to_no_ops() {
        let mut monitor = VerdictOnly(SearchCommand::Continue);
        monitor.on_exit_search();
        monitor.on_step();
        assert!(!monitor.search_command().is_terminate());
    }

    #[test]
    fn test_is_terminate() {
        assert!(!SearchCommand::Continue.is_terminate());
        assert!(SearchCommand::Terminate("why".to_string()).is_terminate());
    }

    #[test]
    fn test_display() {
        let command = SearchCommand::Terminate("time limit reached".to_string());
        assert_eq!(format!("{}", command), "Terminate: time limit reached");
    }
}
