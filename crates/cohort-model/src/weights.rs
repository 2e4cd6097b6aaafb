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

//! # Preference Weight Matrix
//!
//! The dense, directed 0/1 adjacency structure over entity indices:
//! `w[i][j] = 1` iff entity `i` listed entity `j` as a preference. The matrix
//! is stored as a single flattened row-major vector.
//!
//! Construction is a pure function of the roster and the preference lists.
//! Names that do not resolve to a roster entry are dropped silently, an
//! entity without a recorded list contributes an all-zero row, and repeating
//! a name within a list has no effect beyond setting the same cell once.
//! The diagonal is never set.

use crate::{error::ModelError, index::EntityIndex, roster::Roster};
use num_traits::{PrimInt, Signed};
use rustc_hash::FxHashMap;

/// Per-entity preference lists, keyed by the owner's display name.
pub type PreferenceLists = FxHashMap<String, Vec<String>>;

#[inline(always)]
fn flatten_index(num_entities: usize, source: EntityIndex, target: EntityIndex) -> usize {
    source.get() * num_entities + target.get()
}

/// The directed preference weight matrix over entity indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightMatrix<T> {
    num_entities: usize,
    weights: Vec<T>, // len = num_entities * num_entities, row-major
}

impl<T> WeightMatrix<T>
where
    T: PrimInt + Signed,
{
    /// Builds the weight matrix from the given roster and preference lists.
    ///
    /// Lists keyed by names outside the roster are skipped entirely, targets
    /// outside the roster are skipped individually, and a target equal to the
    /// owner leaves the diagonal untouched. None of these raise; rejecting
    /// malformed lists is the job of [`validate_preferences`].
    pub fn build(roster: &Roster, preferences: &PreferenceLists) -> Self {
        let n = roster.len();
        let mut weights = vec![T::zero(); n * n];

        for (owner, list) in preferences {
            let Some(source) = roster.index_of(owner) else {
                continue;
            };
            for target_name in list {
                if let Some(target) = roster.index_of(target_name) {
                    if target != source {
                        weights[flatten_index(n, source, target)] = T::one();
                    }
                }
            }
        }

        Self {
            num_entities: n,
            weights,
        }
    }

    /// Returns the number of entities (rows) of the matrix.
    #[inline]
    pub fn num_entities(&self) -> usize {
        self.num_entities
    }

    /// Returns `w[source][target]`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn weight(&self, source: EntityIndex, target: EntityIndex) -> T {
        debug_assert!(
            source.get() < self.num_entities && target.get() < self.num_entities,
            "called `WeightMatrix::weight` with index out of bounds: the len is {} but the indices are ({}, {})",
            self.num_entities,
            source.get(),
            target.get()
        );

        self.weights[flatten_index(self.num_entities, source, target)]
    }

    /// Returns `true` iff `source` listed `target` as a preference.
    #[inline]
    pub fn prefers(&self, source: EntityIndex, target: EntityIndex) -> bool {
        !self.weight(source, target).is_zero()
    }

    /// Returns the sum of all directed weights, i.e. the objective value of
    /// placing every entity in a single group.
    pub fn total_weight(&self) -> T {
        self.weights
            .iter()
            .fold(T::zero(), |acc, w| acc.saturating_add(*w))
    }
}

/// Validates preference lists against their declared fixed length.
///
/// Every roster entity must map to exactly `expected_len` entries (a missing
/// list counts as zero entries), and no list may name its own owner. Targets
/// outside the roster are tolerated here as well; they count towards the
/// declared length but never towards the matrix.
///
/// # Errors
///
/// - `ModelError::InvalidPreferenceListLength` on the first list with a
///   different number of entries.
/// - `ModelError::SelfPreference` on the first list naming its owner.
pub fn validate_preferences(
    roster: &Roster,
    preferences: &PreferenceLists,
    expected_len: usize,
) -> Result<(), ModelError> {
    static EMPTY: Vec<String> = Vec::new();

    for (_, name) in roster.iter() {
        let list = preferences.get(name).unwrap_or(&EMPTY);
        if list.len() != expected_len {
            return Err(ModelError::InvalidPreferenceListLength {
                name: name.to_string(),
                expected: expected_len,
                actual: list.len(),
            });
        }
        if list.iter().any(|target| target == name) {
            return Err(ModelError::SelfPreference {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ei(i: usize) -> EntityIndex {
        EntityIndex::new(i)
    }

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

    fn roster() -> Roster {
        Roster::new(["A", "B", "C", "D"]).unwrap()
    }

    #[test]
    fn test_build_sets_directed_weights() {
        let preferences = prefs(&[("A", &["B", "C"]), ("B", &["A"])]);
        let matrix = WeightMatrix::<i64>::build(&roster(), &preferences);

        assert_eq!(matrix.num_entities(), 4);
        assert_eq!(matrix.weight(ei(0), ei(1)), 1);
        assert_eq!(matrix.weight(ei(0), ei(2)), 1);
        assert_eq!(matrix.weight(ei(1), ei(0)), 1);
        // Directed: C never listed anyone.
        assert_eq!(matrix.weight(ei(2), ei(0)), 0);
        assert_eq!(matrix.weight(ei(0), ei(3)), 0);
        assert!(matrix.prefers(ei(0), ei(1)));
        assert!(!matrix.prefers(ei(1), ei(2)));
    }

    #[test]
    fn test_unknown_targets_and_owners_dropped_silently() {
        let preferences = prefs(&[("A", &["B", "Zoe"]), ("Zoe", &["A"])]);
        let matrix = WeightMatrix::<i64>::build(&roster(), &preferences);

        assert_eq!(matrix.weight(ei(0), ei(1)), 1);
        assert_eq!(matrix.total_weight(), 1);
    }

    #[test]
    fn test_missing_lists_give_zero_rows() {
        let preferences = prefs(&[("A", &["B"])]);
        let matrix = WeightMatrix::<i64>::build(&roster(), &preferences);

        for j in 0..4 {
            assert_eq!(matrix.weight(ei(1), ei(j)), 0);
            assert_eq!(matrix.weight(ei(2), ei(j)), 0);
        }
    }

    #[test]
    fn test_repeated_targets_are_idempotent() {
        let preferences = prefs(&[("A", &["B", "B", "B"])]);
        let matrix = WeightMatrix::<i64>::build(&roster(), &preferences);

        assert_eq!(matrix.weight(ei(0), ei(1)), 1);
        assert_eq!(matrix.total_weight(), 1);
    }

    #[test]
    fn test_self_target_never_sets_diagonal() {
        let preferences = prefs(&[("A", &["A", "B"])]);
        let matrix = WeightMatrix::<i64>::build(&roster(), &preferences);

        assert_eq!(matrix.weight(ei(0), ei(0)), 0);
        assert_eq!(matrix.weight(ei(0), ei(1)), 1);
    }

    #[test]
    fn test_total_weight_counts_both_directions() {
        let preferences = prefs(&[("A", &["B"]), ("B", &["A"]), ("C", &["D"])]);
        let matrix = WeightMatrix::<i64>::build(&roster(), &preferences);
        assert_eq!(matrix.total_weight(), 3);
    }

    #[test]
    fn test_validate_preferences_accepts_exact_lengths() {
        let preferences = prefs(&[
            ("A", &["B", "C"]),
            ("B", &["A", "D"]),
            ("C", &["D", "A"]),
            ("D", &["C", "B"]),
        ]);
        assert!(validate_preferences(&roster(), &preferences, 2).is_ok());
    }

    #[test]
    fn test_validate_preferences_rejects_wrong_length() {
        let preferences = prefs(&[
            ("A", &["B", "C"]),
            ("B", &["A"]),
            ("C", &["D", "A"]),
            ("D", &["C", "B"]),
        ]);
        assert_eq!(
            validate_preferences(&roster(), &preferences, 2).unwrap_err(),
            ModelError::InvalidPreferenceListLength {
                name: "B".to_string(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_validate_preferences_counts_missing_list_as_empty() {
        let preferences = prefs(&[("A", &["B"])]);
        assert_eq!(
            validate_preferences(&roster(), &preferences, 1).unwrap_err(),
            ModelError::InvalidPreferenceListLength {
                name: "B".to_string(),
                expected: 1,
                actual: 0,
            }
        );
    }

    #[test]
    fn test_validate_preferences_rejects_self_reference() {
        let preferences = prefs(&[
            ("A", &["A"]),
            ("B", &["A"]),
            ("C", &["D"]),
            ("D", &["C"]),
        ]);
        assert_eq!(
            validate_preferences(&roster(), &preferences, 1).unwrap_err(),
            ModelError::SelfPreference {
                name: "A".to_string()
            }
        );
    }
}
