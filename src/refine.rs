// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shrinking a bracketing interval onto a root.
//!
//! Both methods here accept any continuous function, not just polynomials.

use crate::interval::signum;
use crate::{different_signs, Error, Result, Scalar};

/// The iteration limit used for bisection when none is given.
pub const DEFAULT_BISECTION_ITERATIONS: usize = 100;

/// More halvings than any float range can take.
const MAX_ITP_HALVINGS: usize = 2200;

/// How a refinement starts out.
enum Start<T> {
    /// The right bound is exactly a root.
    Root(T),
    /// A bracket with a strict sign change.
    Bracket {
        left: T,
        right: T,
        f_left: T,
        f_right: T,
    },
}

/// Checks the bracket shared by both methods.
fn start<T: Scalar>(f: &mut impl FnMut(T) -> T, a: T, b: T, tolerance: T) -> Result<Start<T>> {
    if tolerance.is_nan() || tolerance <= T::zero() {
        return Err(Error::NonPositiveTolerance);
    }
    let (mut left, right) = if a <= b { (a, b) } else { (b, a) };
    let mut f_left = f(left);
    if f_left.is_zero() {
        left = left + tolerance;
        f_left = f(left);
    }
    let f_right = f(right);
    if f_right.is_zero() {
        return Ok(Start::Root(right));
    }
    if !different_signs(f_left, f_right) {
        return Err(Error::NotBracketing {
            left: left.as_f64(),
            right: right.as_f64(),
        });
    }
    Ok(Start::Bracket {
        left,
        right,
        f_left,
        f_right,
    })
}

/// Finds a root of `f` between `left` and `right` by bisection.
///
/// The bounds may be given in either order, and `f` must take values of
/// opposite sign at them. As special cases, an exact zero at the right
/// bound is returned immediately, and an exact zero at the left bound
/// moves that bound right by `tolerance` (the left bound is excluded by the
/// `(left, right]` convention of isolating intervals).
///
/// The result is the midpoint of the first bracket narrower than
/// `2 * tolerance`, or a midpoint where `f` is exactly zero, so it lies
/// within `tolerance` of a root. If the bracket shrinks to adjacent floats
/// first, the tolerance is finer than the float spacing near the root and
/// the midpoint is returned as the closest answer available. If
/// `max_iterations` halvings are not enough, the result is NaN: this
/// signals that the root could not be refined, and is not treated as an
/// error.
///
/// # Errors
///
/// Returns [`Error::NonPositiveTolerance`] if `tolerance` is not positive
/// and [`Error::NotBracketing`] if there is no sign change.
pub fn refine_bisection<T: Scalar>(
    mut f: impl FnMut(T) -> T,
    left: T,
    right: T,
    tolerance: T,
    max_iterations: usize,
) -> Result<T> {
    let (mut left, mut right, mut f_left) = match start(&mut f, left, right, tolerance)? {
        Start::Root(root) => return Ok(root),
        Start::Bracket {
            left,
            right,
            f_left,
            ..
        } => (left, right, f_left),
    };
    let two = T::lit(2.0);
    for _ in 0..max_iterations {
        let half_width = (right - left) / two;
        let mid = left + half_width;
        if mid <= left || mid >= right {
            // No float lies strictly inside the bracket.
            log::debug!("bisection reached float resolution at {mid:?}");
            return Ok(mid);
        }
        let f_mid = f(mid);
        if f_mid.is_zero() || half_width < tolerance {
            return Ok(mid);
        }
        if signum(f_mid) == signum(f_left) {
            left = mid;
            f_left = f_mid;
        } else {
            right = mid;
        }
    }
    log::debug!(
        "bisection stopped after {max_iterations} iterations on [{:?}, {:?}]",
        left,
        right
    );
    Ok(T::nan())
}

/// Tuning parameters for [`refine_itp`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ItpParams<T> {
    /// The result is within this distance of a root.
    pub tolerance: T,
    /// The truncation factor `k1`; `None` means `0.2 / (right - left)`.
    pub truncation_factor: Option<T>,
    /// The truncation exponent `k2`, between 1 and about 2.6.
    pub truncation_exponent: T,
    /// The slack `n0` in the iteration budget over plain bisection.
    pub initial_offset: usize,
}

impl<T: Scalar> Default for ItpParams<T> {
    fn default() -> Self {
        Self::new(T::lit(1e-5))
    }
}

impl<T: Scalar> ItpParams<T> {
    /// Parameters with the given tolerance and the usual tuning: `k1`
    /// chosen from the bracket width, `k2 = 2` and `n0 = 0`.
    pub fn new(tolerance: T) -> Self {
        ItpParams {
            tolerance,
            truncation_factor: None,
            truncation_exponent: T::lit(2.0),
            initial_offset: 0,
        }
    }

    /// Sets the truncation factor `k1`.
    #[must_use]
    pub fn with_truncation_factor(mut self, k1: T) -> Self {
        self.truncation_factor = Some(k1);
        self
    }

    /// Sets the truncation exponent `k2`.
    #[must_use]
    pub fn with_truncation_exponent(mut self, k2: T) -> Self {
        self.truncation_exponent = k2;
        self
    }

    /// Sets the iteration slack `n0`.
    #[must_use]
    pub fn with_initial_offset(mut self, n0: usize) -> Self {
        self.initial_offset = n0;
        self
    }
}

/// Finds a root of `f` between `left` and `right` with the ITP method.
///
/// This is the method from the paper [An Enhancement of the Bisection Method
/// Average Performance Preserving Minmax Optimality]: each step starts from
/// the regula falsi point, truncates it towards the midpoint by
/// `k1 * width^k2`, and projects it into a radius around the midpoint that
/// shrinks so that no more than `ceil(log2(width / (2 * tolerance))) + n0`
/// steps are ever taken. On smooth functions this converges superlinearly,
/// and it is never slower than bisection by more than `n0` steps.
///
/// The bracket conventions (either order, exact zeros at the ends) are the
/// same as for [`refine_bisection`]. The result is the midpoint of the
/// final bracket, of width less than `2 * tolerance`, or a point where `f`
/// is exactly zero. The loop never runs more than the step bound above plus
/// one; a tolerance below the float spacing near the root ends it early,
/// at the narrowest bracket the floats allow.
///
/// # Errors
///
/// Returns [`Error::NonPositiveTolerance`] if the tolerance is not positive
/// and [`Error::NotBracketing`] if there is no sign change.
///
/// [An Enhancement of the Bisection Method Average Performance Preserving Minmax Optimality]: https://dl.acm.org/doi/10.1145/3423597
pub fn refine_itp<T: Scalar>(
    mut f: impl FnMut(T) -> T,
    left: T,
    right: T,
    params: &ItpParams<T>,
) -> Result<T> {
    let tolerance = params.tolerance;
    let (mut a, mut b, mut ya, mut yb) = match start(&mut f, left, right, tolerance)? {
        Start::Root(root) => return Ok(root),
        Start::Bracket {
            left,
            right,
            f_left,
            f_right,
        } => (left, right, f_left, f_right),
    };
    let two = T::lit(2.0);
    let k1 = params
        .truncation_factor
        .unwrap_or_else(|| T::lit(0.2) / (b - a));
    let k2 = params.truncation_exponent;

    let ratio = (b - a) / (two * tolerance);
    let n_half = if ratio > T::one() {
        ratio
            .log2()
            .ceil()
            .to_usize()
            .unwrap_or(MAX_ITP_HALVINGS)
            .min(MAX_ITP_HALVINGS)
    } else {
        0
    };
    let n_max = n_half.saturating_add(params.initial_offset);
    let mut scaled_tolerance = tolerance * two.powi(i32::try_from(n_max).unwrap_or(i32::MAX));
    for _ in 0..=n_max {
        if b - a < two * tolerance {
            break;
        }
        let mid = (a + b) / two;
        if mid <= a || mid >= b {
            log::debug!("ITP reached float resolution at {mid:?}");
            break;
        }
        let radius = (scaled_tolerance - (b - a) / two).max(T::zero());
        let x_f = (b * ya - a * yb) / (ya - yb);
        let sigma = T::lit(f64::from(signum(mid - x_f)));
        let delta = k1 * (b - a).powf(k2);
        let x_t = if (mid - x_f).abs() >= delta {
            x_f + sigma * delta
        } else {
            mid
        };
        let mut x_itp = if (x_t - mid).abs() <= radius {
            x_t
        } else {
            mid - sigma * radius
        };
        if !(x_itp > a && x_itp < b) {
            // Rounding put the step on the bracket; take the midpoint instead.
            x_itp = mid;
        }
        let y_itp = f(x_itp);
        if y_itp.is_zero() {
            return Ok(x_itp);
        }
        if signum(y_itp) == signum(ya) {
            a = x_itp;
            ya = y_itp;
        } else {
            b = x_itp;
            yb = y_itp;
        }
        scaled_tolerance = scaled_tolerance / two;
    }
    Ok((a + b) / two)
}
