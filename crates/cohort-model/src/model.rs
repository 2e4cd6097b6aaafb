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

//! # Partition Model
//!
//! The immutable problem instance handed to the solving engine: a validated
//! roster, its preference weight matrix, the per-group capacity, and the
//! derived group count `ceil(n / capacity)`. Using the minimum number of
//! groups is what forces the partition to actually spread entities out
//! instead of parking everyone in one group.
//!
//! The model also precomputes the symmetric pair weights
//! `pair_weight(i, j) = w[i][j] + w[j][i]` as a flattened matrix. The
//! objective of a partition is the sum of directed weights over all co-member
//! pairs, which is exactly the sum of `pair_weight` over each unordered pair
//! sharing a group.

use crate::{error::ModelError, index::EntityIndex, roster::Roster, weights::WeightMatrix};
use num_traits::{PrimInt, Signed};

#[inline(always)]
fn flatten_index(num_entities: usize, a: EntityIndex, b: EntityIndex) -> usize {
    a.get() * num_entities + b.get()
}

/// An immutable, validated instance of the capacity-bounded group partition
/// problem.
#[derive(Debug, Clone)]
pub struct Model<T> {
    roster: Roster,
    weights: WeightMatrix<T>,
    capacity: usize,
    num_groups: usize,
    // pair_weights[i * n + j] = w[i][j] + w[j][i], zero on the diagonal.
    pair_weights: Vec<T>,
    total_pair_weight: T,
}

impl<T> Model<T>
where
    T: PrimInt + Signed,
{
    /// Builds a model from a roster, its weight matrix, and the group
    /// capacity.
    ///
    /// The number of groups is not a free parameter. It is always
    /// `ceil(num_entities / capacity)`, the minimum count that can hold the
    /// whole roster.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidCapacity` if `capacity` is zero.
    ///
    /// # Panics
    ///
    /// Panics if the weight matrix was built for a different roster size.
    pub fn new(
        roster: Roster,
        weights: WeightMatrix<T>,
        capacity: usize,
    ) -> Result<Self, ModelError> {
        if capacity == 0 {
            return Err(ModelError::InvalidCapacity);
        }
        assert_eq!(
            roster.len(),
            weights.num_entities(),
            "weight matrix size {} does not match roster size {}",
            weights.num_entities(),
            roster.len()
        );

        let n = roster.len();
        let num_groups = n.div_ceil(capacity);

        let mut pair_weights = vec![T::zero(); n * n];
        let mut total_pair_weight = T::zero();
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let a = EntityIndex::new(i);
                let b = EntityIndex::new(j);
                let pair = weights.weight(a, b).saturating_add(weights.weight(b, a));
                pair_weights[flatten_index(n, a, b)] = pair;
                if i < j {
                    total_pair_weight = total_pair_weight.saturating_add(pair);
                }
            }
        }

        Ok(Self {
            roster,
            weights,
            capacity,
            num_groups,
            pair_weights,
            total_pair_weight,
        })
    }

    /// Returns the roster of this model.
    #[inline]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns the directed weight matrix of this model.
    #[inline]
    pub fn weights(&self) -> &WeightMatrix<T> {
        &self.weights
    }

    /// Returns the number of entities.
    #[inline]
    pub fn num_entities(&self) -> usize {
        self.roster.len()
    }

    /// Returns the per-group capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of groups, `ceil(num_entities / capacity)`.
    #[inline]
    pub fn num_groups(&self) -> usize {
        self.num_groups
    }

    /// Returns the symmetric pair weight `w[a][b] + w[b][a]`.
    ///
    /// This is the objective gain of placing `a` and `b` in the same group.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn pair_weight(&self, a: EntityIndex, b: EntityIndex) -> T {
        let n = self.num_entities();
        debug_assert!(
            a.get() < n && b.get() < n,
            "called `Model::pair_weight` with index out of bounds: the len is {} but the indices are ({}, {})",
            n,
            a.get(),
            b.get()
        );

        self.pair_weights[flatten_index(n, a, b)]
    }

    /// Returns the sum of pair weights over all unordered entity pairs,
    /// equal to the total directed weight of the matrix. This is the
    /// objective value of the (usually infeasible) single-group partition;
    /// no partition can score higher.
    #[inline]
    pub fn total_pair_weight(&self) -> T {
        self.total_pair_weight
    }

    /// Returns the summed pair weight between `entity` and every other
    /// entity. Used by branching strategies to order high-connectivity
    /// entities first.
    pub fn entity_degree(&self, entity: EntityIndex) -> T {
        let n = self.num_entities();
        debug_assert!(
            entity.get() < n,
            "called `Model::entity_degree` with entity index out of bounds: the len is {} but the index is {}",
            n,
            entity.get()
        );

        let row = entity.get() * n;
        self.pair_weights[row..row + n]
            .iter()
            .fold(T::zero(), |acc, w| acc.saturating_add(*w))
    }
}

impl<T> std::fmt::Display for Model<T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model({} entities, {} groups, capacity {})",
            self.num_entities(),
            self.num_groups(),
            self.capacity()
        )
    }
}
