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

//! # Cohort Model
//!
//! **The Core Domain Model for the Cohort Group Partition Solver.**
//!
//! This crate defines the data structures used to represent the
//! **capacity-bounded group partition problem**: given a roster of named
//! entities and their directed pairwise preferences, split the roster into
//! the minimum number of capacity-bounded groups while maximizing the number
//! of satisfied preferences. It serves as the data interchange layer between
//! the problem definition (caller input) and the solving engine
//! (`cohort_bnb`).
//!
//! ## Architecture
//!
//! The crate is designed around a strict separation of concerns between
//! **construction** and **solving**:
//!
//! * **`index`**: Strongly-typed wrappers (`EntityIndex`, `GroupIndex`) to prevent logical indexing errors.
//! * **`roster`**: The ordered, validated list of entity names and the name-to-index lookup.
//! * **`weights`**: The dense directed 0/1 preference weight matrix built from per-entity preference lists.
//! * **`model`**: The immutable `Model` tying roster, weights, and group capacity together.
//! * **`program`**: The binary-program formulation of the partition problem (assignment and
//!   co-membership variables with the standard AND-linearization), used as the solver-port
//!   contract and as an independent objective oracle.
//! * **`solution`**: The output format: objective value plus a group for every entity.
//! * **`grouping`**: Decoding of solved variable levels into a verified group listing.
//! * **`error`**: Structured validation and consistency failures.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Indices are distinct types. You cannot accidentally use an `EntityIndex` to access a group.
//! 2.  **Memory Layout**: The weight matrix is stored as a flattened row-major vector rather than
//!     nested vectors to maximize cache locality during the branch-and-bound search.
//! 3.  **Fail-Fast**: Constructors validate inputs eagerly to ensure the solver never encounters
//!     an invalid state; post-solve decoding re-verifies the partition invariants.

pub mod error;
pub mod grouping;
pub mod index;
pub mod model;
pub mod program;
pub mod roster;
pub mod solution;
pub mod weights;
