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

//! # Interrupt Monitor
//!
//! Terminates a session when a shared stop signal is raised. The portfolio
//! solver hands every session the same `AtomicBool`; the first session to
//! prove optimality raises it and the remaining sessions wind down at their
//! next node entry instead of searching a tree whose answer is known.

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    num::SolverNumeric,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// A monitor polling a shared stop signal.
#[derive(Debug, Clone)]
pub struct InterruptMonitor<'a, T> {
    signal: &'a AtomicBool,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T> InterruptMonitor<'a, T> {
    /// Creates a monitor terminating the session once `signal` is raised.
    #[inline]
    pub fn new(signal: &'a AtomicBool) -> Self {
        Self {
            signal,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns `true` if the stop signal has been raised.
    #[inline(always)]
    pub fn interrupted(&self) -> bool {
        // Relaxed suffices: the signal is a latch, raised once and never
        // cleared, and reacting a few nodes late is harmless.
        self.signal.load(Ordering::Relaxed)
    }
}

impl<T> SearchMonitor<T> for InterruptMonitor<'_, T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn search_command(&self) -> SearchCommand {
        if self.interrupted() {
            SearchCommand::Terminate("interrupt signal received".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    #[test]
    fn test_continues_while_signal_is_down() {
        let signal = AtomicBool::new(false);
        let monitor = InterruptMonitor::<IntegerType>::new(&signal);
        assert!(!monitor.interrupted());
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_terminates_once_signal_is_raised() {
        let signal = AtomicBool::new(false);
        let monitor = InterruptMonitor::<IntegerType>::new(&signal);

        signal.store(true, Ordering::Relaxed);
        assert!(monitor.interrupted());
        match monitor.search_command() {
            SearchCommand::Terminate(reason) => {
                assert_eq!(reason, "interrupt signal received");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_raising_the_signal_later_is_observed() {
        let signal = AtomicBool::new(false);
        let monitor = InterruptMonitor::<IntegerType>::new(&signal);
        assert_eq!(monitor.search_command(), SearchCommand::Continue);

        signal.store(true, Ordering::Relaxed);
        assert!(monitor.search_command().is_terminate());
    }
}
