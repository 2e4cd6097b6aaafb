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

//! # Cohort BnB
//!
//! **The exact search engine of the Cohort Group Partition Solver.**
//!
//! This crate explores the space of capacity-bounded partitions with a
//! depth-first branch-and-bound search and proves global optimality of the
//! returned assignment. It consumes the immutable problem instance from
//! `cohort_model` and produces `Solution` values from the same crate.
//!
//! ## Architecture
//!
//! * **`bnb`**: The search engine and its per-run session.
//! * **`state`**: The mutable assignment state with exact LIFO undo.
//! * **`branching`**: Strategies choosing the entity placement order.
//! * **`incumbent`**: The thread-shared best solution holder.
//! * **`monitor`**: Pluggable observers that can terminate a run (time
//!   limit, node limit, external interrupt, logging), composable into one.
//! * **`result`** / **`stats`**: Outcome classification and run statistics.
//! * **`num`**: The numeric contract of objective types.

pub mod bnb;
pub mod branching;
pub mod incumbent;
pub mod monitor;
pub mod num;
pub mod result;
pub mod state;
pub mod stats;
