// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types shared by the crate.

use thiserror::Error;

/// An error raised by polynomial construction, arithmetic or refinement.
///
/// Running out of iterations is not an error: refinement reports it with a
/// NaN result and isolation with a partial interval list.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A polynomial was built from an empty coefficient list.
    #[error("a polynomial needs at least one coefficient")]
    EmptyCoefficients,
    /// A coefficient was NaN.
    #[error("coefficient {index} is NaN")]
    NanCoefficient {
        /// Position of the offending coefficient.
        index: usize,
    },
    /// An interval bound, or a value tested against an interval, was NaN.
    #[error("interval bound is NaN")]
    NanBound,
    /// A coefficient index outside the polynomial.
    #[error("coefficient index {index} is out of range for {len} coefficients")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of coefficients.
        len: usize,
    },
    /// Division by a polynomial whose coefficients are all (numerically) zero.
    #[error("division by the zero polynomial")]
    DivideByZero,
    /// A refinement was started on an interval without a sign change.
    #[error("function does not change sign on [{left}, {right}]")]
    NotBracketing {
        /// Left end of the interval.
        left: f64,
        /// Right end of the interval.
        right: f64,
    },
    /// A refinement tolerance that is zero, negative or NaN.
    #[error("tolerance must be positive")]
    NonPositiveTolerance,
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
