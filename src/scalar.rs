// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The floating-point capability every numeric type is generic over.

use core::fmt::Debug;

use num_traits::{Float, FromPrimitive};

/// A floating-point scalar usable as a polynomial coefficient.
///
/// This is implemented for every type with the required capabilities,
/// which in practice means `f32` and `f64`.
pub trait Scalar: Float + FromPrimitive + Debug + Send + Sync + 'static {
    /// Converts an `f64` constant into this type.
    ///
    /// Values that cannot be represented become NaN.
    #[inline]
    fn lit(x: f64) -> Self {
        Self::from_f64(x).unwrap_or_else(Self::nan)
    }

    /// Converts a count (a degree, an index, a factor of a derivative).
    ///
    /// Counts beyond the range of this type saturate to infinity.
    #[inline]
    fn from_count(n: usize) -> Self {
        Self::from_usize(n).unwrap_or_else(Self::infinity)
    }

    /// Widens to `f64`, for diagnostics.
    #[inline]
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl<T> Scalar for T where T: Float + FromPrimitive + Debug + Send + Sync + 'static {}

/// Error-free transformation of a product: `a * b == p + e` exactly.
#[inline]
pub(crate) fn two_prod<T: Scalar>(a: T, b: T) -> (T, T) {
    let p = a * b;
    (p, a.mul_add(b, -p))
}

/// Error-free transformation of a sum: `a + b == s + e` exactly.
#[inline]
pub(crate) fn two_sum<T: Scalar>(a: T, b: T) -> (T, T) {
    let s = a + b;
    let z = s - a;
    (s, (a - (s - z)) + (b - z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_free_transformations() {
        let (s, e) = two_sum(1.0_f64, 1e-20);
        assert_eq!(s, 1.0);
        assert_eq!(e, 1e-20);

        let a = 1.0 + f64::EPSILON;
        let (p, e) = two_prod(a, a);
        assert_eq!(p, 1.0 + 2.0 * f64::EPSILON);
        assert_eq!(e, f64::EPSILON * f64::EPSILON);
    }

    #[test]
    fn conversions() {
        assert_eq!(f32::lit(0.5), 0.5);
        assert_eq!(f64::from_count(7), 7.0);
        assert_eq!(2.5_f32.as_f64(), 2.5);
    }
}
