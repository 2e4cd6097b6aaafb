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

//! The error surface of the high-level solver: input validation failures
//! from the model layer, post-solve consistency failures from decoding, and
//! runs that ended without producing any assignment.

use cohort_model::error::{GroupingError, ModelError};

/// Any failure of a full partition run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The input failed validation before any search started.
    Model(ModelError),
    /// A solving backend returned levels violating the partition invariants.
    Grouping(GroupingError),
    /// The run terminated without any solution.
    SolverFailure { reason: String },
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::Model(err) => write!(f, "invalid input: {}", err),
            SolveError::Grouping(err) => write!(f, "inconsistent assignment: {}", err),
            SolveError::SolverFailure { reason } => {
                write!(f, "solver failed to produce an assignment: {}", reason)
            }
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::Model(err) => Some(err),
            SolveError::Grouping(err) => Some(err),
            SolveError::SolverFailure { .. } => None,
        }
    }
}

impl From<ModelError> for SolveError {
    fn from(err: ModelError) -> Self {
        SolveError::Model(err)
    }
}

impl From<GroupingError> for SolveError {
    fn from(err: GroupingError) -> Self {
        SolveError::Grouping(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_wraps_inner_errors() {
        let err: SolveError = ModelError::InvalidCapacity.into();
        assert_eq!(
            format!("{}", err),
            "invalid input: group capacity must be a positive integer"
        );

        let err = SolveError::SolverFailure {
            reason: "time limit reached".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "solver failed to produce an assignment: time limit reached"
        );
    }

    #[test]
    fn test_source_chains_to_inner_error() {
        use std::error::Error;
        let err: SolveError = ModelError::InvalidCapacity.into();
        assert!(err.source().is_some());

        let err = SolveError::SolverFailure {
            reason: "x".to_string(),
        };
        assert!(err.source().is_none());
    }
}
