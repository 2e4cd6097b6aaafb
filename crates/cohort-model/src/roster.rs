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

//! # Entity Roster
//!
//! The ordered list of entities to partition. Every entity is identified by a
//! unique, non-empty display name; its position in the roster defines its
//! `EntityIndex`. The roster owns the name-to-index lookup used when turning
//! preference lists into weight matrix entries.
//!
//! Validation is eager: an invalid roster is rejected at construction and no
//! downstream component ever sees it.

use crate::{error::ModelError, index::EntityIndex};
use rustc_hash::FxHashMap;

/// An ordered, validated list of unique entity names.
#[derive(Debug, Clone)]
pub struct Roster {
    names: Vec<String>,
    lookup: FxHashMap<String, EntityIndex>,
}

impl Roster {
    /// Builds a roster from the given names.
    ///
    /// # Errors
    ///
    /// - `ModelError::TooFewEntities` if fewer than two names are given.
    /// - `ModelError::EmptyName` if any name is the empty string.
    /// - `ModelError::DuplicateName` if the same name occurs twice.
    pub fn new<I, S>(names: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.len() < 2 {
            return Err(ModelError::TooFewEntities { count: names.len() });
        }

        let mut lookup = FxHashMap::default();
        lookup.reserve(names.len());
        for (position, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(ModelError::EmptyName { position });
            }
            if lookup
                .insert(name.clone(), EntityIndex::new(position))
                .is_some()
            {
                return Err(ModelError::DuplicateName { name: name.clone() });
            }
        }

        Ok(Self { names, lookup })
    }

    /// Returns the number of entities in the roster.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the roster holds no entities.
    ///
    /// A successfully constructed roster is never empty; this exists to
    /// satisfy the usual `len`/`is_empty` pairing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the display name of the given entity.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is out of bounds.
    #[inline]
    pub fn name(&self, entity: EntityIndex) -> &str {
        let index = entity.get();
        debug_assert!(
            index < self.len(),
            "called `Roster::name` with entity index out of bounds: the len is {} but the index is {}",
            self.len(),
            index
        );

        &self.names[index]
    }

    /// Returns the index of the entity with the given name, if present.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<EntityIndex> {
        self.lookup.get(name).copied()
    }

    /// Returns a slice of all names in roster order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterates over `(EntityIndex, name)` pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityIndex, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (EntityIndex::new(i), name.as_str()))
    }
}

impl std::fmt::Display for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Roster({} entities)", self.len())
    }
}
