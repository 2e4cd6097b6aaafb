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

//! Structured failures of the model layer.
//!
//! `ModelError` covers input validation: malformed rosters, invalid
//! capacities, and preference lists that violate their declared contract.
//! These are rejected before any model is built; there is no recovery path.
//!
//! `GroupingError` covers post-solve consistency: an entity with zero or
//! multiple group assignments, or a group exceeding its capacity, in the
//! variable levels returned by a solving backend. These indicate a solver or
//! formulation bug and are always surfaced, never auto-corrected.

use crate::index::GroupIndex;

/// Validation failure while constructing a roster, weight matrix, or model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The group capacity is zero. Capacity must be a positive integer.
    InvalidCapacity,
    /// The roster holds fewer than two entities; there is nothing to partition.
    TooFewEntities { count: usize },
    /// A roster entry at the given position is the empty string.
    EmptyName { position: usize },
    /// The same display name occurs twice in the roster.
    DuplicateName { name: String },
    /// A preference list does not have the declared number of entries.
    InvalidPreferenceListLength {
        name: String,
        expected: usize,
        actual: usize,
    },
    /// A preference list names its own owner.
    SelfPreference { name: String },
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidCapacity => {
                write!(f, "group capacity must be a positive integer")
            }
            ModelError::TooFewEntities { count } => {
                write!(f, "a roster needs at least 2 entities, got {}", count)
            }
            ModelError::EmptyName { position } => {
                write!(f, "roster entry at position {} is empty", position)
            }
            ModelError::DuplicateName { name } => {
                write!(f, "duplicate roster entry: '{}'", name)
            }
            ModelError::InvalidPreferenceListLength {
                name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "preference list of '{}' has {} entries, expected exactly {}",
                    name, actual, expected
                )
            }
            ModelError::SelfPreference { name } => {
                write!(f, "preference list of '{}' names its own owner", name)
            }
        }
    }
}

impl std::error::Error for ModelError {}

/// Post-solve consistency failure found while decoding variable levels into
/// a group listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupingError {
    /// No assignment variable of the entity is active.
    UnassignedEntity { name: String },
    /// More than one assignment variable of the entity is active.
    MultiplyAssignedEntity { name: String },
    /// A group holds more members than its capacity allows.
    GroupOverCapacity {
        group: GroupIndex,
        size: usize,
        capacity: usize,
    },
}

impl std::fmt::Display for GroupingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupingError::UnassignedEntity { name } => {
                write!(f, "entity '{}' is not assigned to any group", name)
            }
            GroupingError::MultiplyAssignedEntity { name } => {
                write!(f, "entity '{}' is assigned to more than one group", name)
            }
            GroupingError::GroupOverCapacity {
                group,
                size,
                capacity,
            } => {
                write!(
                    f,
                    "{} holds {} members but the capacity is {}",
                    group, size, capacity
                )
            }
        }
    }
}

impl std::error::Error for GroupingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display() {
        let err = ModelError::InvalidPreferenceListLength {
            name: "Ada".to_string(),
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            format!("{}", err),
            "preference list of 'Ada' has 3 entries, expected exactly 2"
        );

        assert_eq!(
            format!("{}", ModelError::InvalidCapacity),
            "group capacity must be a positive integer"
        );
    }

    #[test]
    fn test_grouping_error_display() {
        let err = GroupingError::GroupOverCapacity {
            group: GroupIndex::new(1),
            size: 4,
            capacity: 3,
        };
        assert_eq!(
            format!("{}", err),
            "GroupIndex(1) holds 4 members but the capacity is 3"
        );
    }

    #[test]
    fn test_errors_are_std_errors() {
        fn assert_error<E: std::error::Error>(_e: &E) {}
        assert_error(&ModelError::InvalidCapacity);
        assert_error(&GroupingError::UnassignedEntity {
            name: "Ada".to_string(),
        });
    }
}
