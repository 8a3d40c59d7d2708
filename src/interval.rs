// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed intervals of the real line.

use core::fmt;

use crate::{refine_bisection, refine_itp, Error, ItpParams, Poly, Result, Scalar};

/// An interval `[left, right]` with `left <= right`.
///
/// Isolating intervals produced by a [`RootIsolator`](crate::RootIsolator)
/// follow the convention of Budan's theorem and should be read as `(left,
/// right]`; a degenerate interval (`left == right`) marks a root found
/// exactly. Containment queries treat both ends as included.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "IntervalRepr<T>",
        bound(deserialize = "T: Scalar + serde::Deserialize<'de>")
    )
)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Interval<T> {
    left: T,
    right: T,
}

/// The serialized shape of an [`Interval`], checked by [`Interval::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct IntervalRepr<T> {
    left: T,
    right: T,
}

#[cfg(feature = "serde")]
impl<T: Scalar> TryFrom<IntervalRepr<T>> for Interval<T> {
    type Error = Error;

    fn try_from(repr: IntervalRepr<T>) -> Result<Self> {
        Interval::new(repr.left, repr.right)
    }
}

impl<T: Scalar> Interval<T> {
    /// Creates an interval from two bounds, in either order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NanBound`] if either bound is NaN.
    pub fn new(a: T, b: T) -> Result<Self> {
        if a.is_nan() || b.is_nan() {
            return Err(Error::NanBound);
        }
        Ok(if a <= b {
            Interval { left: a, right: b }
        } else {
            Interval { left: b, right: a }
        })
    }

    /// The degenerate interval `[x, x]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NanBound`] if `x` is NaN.
    pub fn point(x: T) -> Result<Self> {
        Self::new(x, x)
    }

    /// `[0, inf)`.
    pub(crate) fn positive_reals() -> Self {
        Interval {
            left: T::zero(),
            right: T::infinity(),
        }
    }

    /// The lower bound.
    #[inline]
    pub fn left(&self) -> T {
        self.left
    }

    /// The upper bound.
    #[inline]
    pub fn right(&self) -> T {
        self.right
    }

    /// The distance between the bounds.
    #[inline]
    pub fn width(&self) -> T {
        self.right - self.left
    }

    /// The point halfway between the bounds.
    #[inline]
    pub fn midpoint(&self) -> T {
        self.left + (self.right - self.left) / T::lit(2.0)
    }

    /// Whether both bounds are equal.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.left == self.right
    }

    /// Whether `x` lies in the closed interval.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NanBound`] if `x` is NaN.
    pub fn contains(&self, x: T) -> Result<bool> {
        if x.is_nan() {
            return Err(Error::NanBound);
        }
        Ok(self.left <= x && x <= self.right)
    }

    /// Whether `other` lies entirely within this interval.
    pub fn contains_interval(&self, other: &Self) -> bool {
        self.left <= other.left && other.right <= self.right
    }

    /// Whether `poly` takes values of different sign at the two bounds.
    ///
    /// A zero at one end and a nonzero value at the other also counts. This
    /// is the necessary condition for the interval to hold a root that
    /// refinement relies on; evaluation is compensated so that the test is
    /// trustworthy close to roots.
    pub fn contains_single_root(&self, poly: &Poly<T>) -> bool {
        let at_left = poly.eval_accurate(self.left);
        let at_right = poly.eval_accurate(self.right);
        signum(at_left) != signum(at_right)
    }

    /// Shrinks this interval onto a root of `f` by bisection.
    ///
    /// See [`refine_bisection`].
    ///
    /// # Errors
    ///
    /// As for [`refine_bisection`].
    pub fn refine_bisection(
        &self,
        f: impl FnMut(T) -> T,
        tolerance: T,
        max_iterations: usize,
    ) -> Result<T> {
        refine_bisection(f, self.left, self.right, tolerance, max_iterations)
    }

    /// Shrinks this interval onto a root of `f` with the ITP method.
    ///
    /// See [`refine_itp`].
    ///
    /// # Errors
    ///
    /// As for [`refine_itp`].
    pub fn refine_itp(&self, f: impl FnMut(T) -> T, params: &ItpParams<T>) -> Result<T> {
        refine_itp(f, self.left, self.right, params)
    }
}

impl<T: fmt::Debug> fmt::Debug for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "[{:#?}, {:#?}]", self.left, self.right)
        } else {
            write!(f, "[{:?}, {:?}]", self.left, self.right)
        }
    }
}

/// The sign of `x` as -1, 0 or 1.
pub(crate) fn signum<T: Scalar>(x: T) -> i8 {
    if x > T::zero() {
        1
    } else if x < T::zero() {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn construction() {
        let iv = Interval::new(3.0, 1.0).unwrap();
        assert_eq!((iv.left(), iv.right()), (1.0, 3.0));
        assert_eq!(iv.width(), 2.0);
        assert_eq!(iv.midpoint(), 2.0);
        assert!(!iv.is_degenerate());
        assert!(Interval::point(1.5).unwrap().is_degenerate());
        assert_eq!(Interval::new(f64::NAN, 1.0), Err(Error::NanBound));
        assert_eq!(Interval::new(0.0, f32::NAN), Err(Error::NanBound));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_orders_bounds() {
        let iv: Interval<f64> = serde_json::from_str(r#"{"left":3.0,"right":1.0}"#).unwrap();
        assert_eq!((iv.left(), iv.right()), (1.0, 3.0));
        let json = serde_json::to_string(&iv).unwrap();
        assert_eq!(serde_json::from_str::<Interval<f64>>(&json).unwrap(), iv);
        assert!(serde_json::from_str::<Interval<f64>>(r#"{"left":3.0}"#).is_err());
    }

    #[test]
    fn infinite_bounds() {
        let iv = Interval::new(0.0, f64::INFINITY).unwrap();
        assert_eq!(iv.contains(1e300), Ok(true));
        assert_eq!(iv.contains(-1.0), Ok(false));
    }

    #[test]
    fn containment() {
        let iv = Interval::new(1.0, 2.0).unwrap();
        assert_eq!(iv.contains(1.0), Ok(true));
        assert_eq!(iv.contains(2.0), Ok(true));
        assert_eq!(iv.contains(2.5), Ok(false));
        assert_eq!(iv.contains(f64::NAN), Err(Error::NanBound));
        assert!(iv.contains_interval(&Interval::new(1.25, 2.0).unwrap()));
        assert!(!iv.contains_interval(&Interval::new(0.5, 1.5).unwrap()));
    }

    #[test]
    fn single_root() {
        let p = Poly::from_f64(&[-6.0, 11.0, -6.0, 1.0]).unwrap();
        assert!(Interval::new(0.5, 1.5).unwrap().contains_single_root(&p));
        assert!(!Interval::new(0.5, 2.5).unwrap().contains_single_root(&p));
        assert!(Interval::new(1.0, 1.5).unwrap().contains_single_root(&p));
    }

    #[test]
    fn debug() {
        let iv = Interval::new(1.0, 2.5).unwrap();
        assert_eq!(format!("{iv:?}"), "[1.0, 2.5]");
    }
}
