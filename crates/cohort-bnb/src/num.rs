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

//! Numeric bound for objective types usable by the search engine.
//!
//! The engine compares objectives across threads through an `i64` atomic, so
//! the objective type must convert into `i64` losslessly. All primitive
//! signed integers up to `i64` qualify.

use num_traits::{PrimInt, Signed};

/// The numeric contract of the search engine: a primitive signed integer that
/// widens losslessly into `i64` and can cross thread boundaries.
pub trait SolverNumeric:
    PrimInt + Signed + Into<i64> + Send + Sync + std::fmt::Debug + std::fmt::Display
{
}

impl<T> SolverNumeric for T where
    T: PrimInt + Signed + Into<i64> + Send + Sync + std::fmt::Debug + std::fmt::Display
{
}
