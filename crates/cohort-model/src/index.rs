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

//! # Strongly Typed Indices (Zero-Cost)
//!
//! Transparent wrappers around `usize` that keep the two index spaces of the
//! partition problem apart: entities (rows of the weight matrix) and groups
//! (slots of the partition). Mixing them up is a compile error instead of a
//! hard-to-trace wrong answer.

/// A zero-based index into the entity roster.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityIndex(usize);

impl EntityIndex {
    /// Creates a new `EntityIndex` from a raw `usize`.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Debug for EntityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntityIndex({})", self.0)
    }
}

impl std::fmt::Display for EntityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntityIndex({})", self.0)
    }
}

impl From<usize> for EntityIndex {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<EntityIndex> for usize {
    fn from(index: EntityIndex) -> Self {
        index.0
    }
}

/// A zero-based index identifying one group of the partition.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupIndex(usize);

impl GroupIndex {
    /// Creates a new `GroupIndex` from a raw `usize`.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Debug for GroupIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GroupIndex({})", self.0)
    }
}

impl std::fmt::Display for GroupIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GroupIndex({})", self.0)
    }
}

impl From<usize> for GroupIndex {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<GroupIndex> for usize {
    fn from(index: GroupIndex) -> Self {
        index.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_get() {
        let e = EntityIndex::new(7);
        assert_eq!(e.get(), 7);
        let g = GroupIndex::new(3);
        assert_eq!(g.get(), 3);
    }

    #[test]
    fn test_conversions() {
        let e: EntityIndex = 42.into();
        assert_eq!(e.get(), 42);
        let raw: usize = e.into();
        assert_eq!(raw, 42);

        let g: GroupIndex = 5.into();
        let raw: usize = g.into();
        assert_eq!(raw, 5);
    }

    #[test]
    fn test_debug_and_display() {
        let e = EntityIndex::new(2);
        assert_eq!(format!("{}", e), "EntityIndex(2)");
        assert_eq!(format!("{:?}", e), "EntityIndex(2)");

        let g = GroupIndex::new(0);
        assert_eq!(format!("{}", g), "GroupIndex(0)");
        assert_eq!(format!("{:?}", g), "GroupIndex(0)");
    }

    #[test]
    fn test_ordering() {
        assert!(EntityIndex::new(1) < EntityIndex::new(2));
        assert!(GroupIndex::new(0) < GroupIndex::new(1));
    }
}
