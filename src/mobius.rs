// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Möbius transformations, for tracking coordinate changes during isolation.

use crate::{Interval, Scalar};

/// The rational map `x -> (a x + b) / (c x + d)`.
///
/// While a root isolator works on transformed polynomials whose region of
/// interest is always `(0, 1)` or `(0, inf)`, a `Mobius` remembers how that
/// region relates to the domain of the original polynomial. Every method
/// that transforms the input composes a substitution *into* the map: if
/// `m` maps working coordinates to original ones, `m.scale_input(k)` maps
/// `x` to `m(k x)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Mobius<T> {
    /// Coefficient of `x` in the numerator.
    pub a: T,
    /// Constant term of the numerator.
    pub b: T,
    /// Coefficient of `x` in the denominator.
    pub c: T,
    /// Constant term of the denominator.
    pub d: T,
}

impl<T: Scalar> Default for Mobius<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Scalar> Mobius<T> {
    /// Creates the map `(a x + b) / (c x + d)`.
    #[inline]
    pub fn new(a: T, b: T, c: T, d: T) -> Self {
        Mobius { a, b, c, d }
    }

    /// The identity map.
    #[inline]
    pub fn identity() -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::one())
    }

    /// Substitutes `k x` for `x`.
    #[must_use]
    pub fn scale_input(&self, k: T) -> Self {
        Self::new(self.a * k, self.b, self.c * k, self.d)
    }

    /// Substitutes `x + s` for `x`.
    #[must_use]
    pub fn taylor_shift(&self, s: T) -> Self {
        Self::new(self.a, self.b + s * self.a, self.c, self.d + s * self.c)
    }

    /// Substitutes `x + 1` for `x`.
    #[must_use]
    pub fn taylor_shift_by_1(&self) -> Self {
        Self::new(self.a, self.a + self.b, self.c, self.c + self.d)
    }

    /// Substitutes `1 / x` for `x`.
    #[must_use]
    pub fn reciprocal_input(&self) -> Self {
        Self::new(self.b, self.a, self.d, self.c)
    }

    /// Substitutes `1 / (x + 1)` for `x`.
    ///
    /// This maps `(0, inf)` onto `(0, 1)`, so it is the transformation used
    /// when descending into the unit interval.
    #[must_use]
    pub fn process_unit_interval(&self) -> Self {
        Self::new(self.b, self.a + self.b, self.d, self.c + self.d)
    }

    /// Substitutes `s / (x + 1)` for `x`, mapping `(0, inf)` onto `(0, s)`.
    #[must_use]
    pub fn transformed_for_lower_interval(&self, s: T) -> Self {
        Self::new(self.b, self.b + s * self.a, self.d, self.d + s * self.c)
    }

    /// Evaluates the map at `x`.
    ///
    /// A denominator smaller in magnitude than the smallest positive normal
    /// value is treated as zero, and gives an infinity with the sign of the
    /// numerator (NaN if that is zero too).
    pub fn eval(&self, x: T) -> T {
        ratio(self.a * x + self.b, self.c * x + self.d)
    }

    /// The image of `(0, inf)`, as an ordered interval.
    ///
    /// The ends are `b / d` and `a / c`. A map with `c = d = 0`, or any
    /// other map without a well-defined image, gives `[0, inf)`.
    pub fn positive_domain_image(&self) -> Interval<T> {
        self.image(ratio(self.b, self.d), ratio(self.a, self.c))
    }

    /// The image of `(0, 1)`, as an ordered interval.
    ///
    /// The ends are `b / d` and `(a + b) / (c + d)`, with the same
    /// degenerate case as [`positive_domain_image`](Self::positive_domain_image).
    pub fn unit_interval_image(&self) -> Interval<T> {
        self.image(ratio(self.b, self.d), ratio(self.a + self.b, self.c + self.d))
    }

    fn image(&self, from: T, to: T) -> Interval<T> {
        if self.c.is_zero() && self.d.is_zero() {
            return Interval::positive_reals();
        }
        Interval::new(from, to).unwrap_or_else(|_| Interval::positive_reals())
    }
}

/// `num / den`, with signed infinity for a vanishing denominator.
fn ratio<T: Scalar>(num: T, den: T) -> T {
    if den.abs() < T::min_positive_value() {
        if num > T::zero() {
            T::infinity()
        } else if num < T::zero() {
            T::neg_infinity()
        } else {
            T::nan()
        }
    } else {
        num / den
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::arbitrary::float_in_range;

    #[test]
    fn identity_and_scale() {
        let id = Mobius::<f64>::identity();
        assert_eq!(id.eval(3.5), 3.5);
        assert_eq!(id.scale_input(4.0).eval(0.25), 1.0);
        assert_eq!(Mobius::<f64>::default(), id);
    }

    #[test]
    fn closed_forms() {
        let m = Mobius::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.scale_input(2.0), Mobius::new(2.0, 2.0, 6.0, 4.0));
        assert_eq!(m.taylor_shift(2.0), Mobius::new(1.0, 4.0, 3.0, 10.0));
        assert_eq!(m.taylor_shift_by_1(), m.taylor_shift(1.0));
        assert_eq!(m.reciprocal_input(), Mobius::new(2.0, 1.0, 4.0, 3.0));
        assert_eq!(m.process_unit_interval(), Mobius::new(2.0, 3.0, 4.0, 7.0));
        assert_eq!(
            m.transformed_for_lower_interval(2.0),
            Mobius::new(2.0, 4.0, 4.0, 10.0)
        );
        assert_eq!(
            m.transformed_for_lower_interval(1.0),
            m.process_unit_interval()
        );
    }

    #[test]
    fn vanishing_denominator() {
        let m = Mobius::new(1.0, 1.0, 1.0, -1.0);
        assert_eq!(m.eval(1.0), f64::INFINITY);
        let m = Mobius::new(-1.0, 0.0, 1.0, -1.0);
        assert_eq!(m.eval(1.0), f64::NEG_INFINITY);
        assert!(Mobius::<f64>::new(0.0, 0.0, 0.0, 0.0).eval(1.0).is_nan());
    }

    #[test]
    fn images() {
        let id = Mobius::<f64>::identity();
        let pos = id.positive_domain_image();
        assert_eq!((pos.left(), pos.right()), (0.0, f64::INFINITY));
        let unit = id.unit_interval_image();
        assert_eq!((unit.left(), unit.right()), (0.0, 1.0));

        // x -> 1 / (x + 1) flips the order of the ends.
        let flipped = id.process_unit_interval().positive_domain_image();
        assert_eq!((flipped.left(), flipped.right()), (0.0, 1.0));

        let lower = id.transformed_for_lower_interval(3.0).unit_interval_image();
        assert_eq!((lower.left(), lower.right()), (1.5, 3.0));

        let degenerate = Mobius::new(1.0, 2.0, 0.0, 0.0).unit_interval_image();
        assert_eq!((degenerate.left(), degenerate.right()), (0.0, f64::INFINITY));
    }

    #[derive(Clone, Copy, Debug)]
    enum Op {
        Scale(f64),
        Shift(f64),
        Reciprocal,
        Unit,
        Lower(f64),
    }

    impl Op {
        fn apply(self, x: f64) -> f64 {
            match self {
                Op::Scale(k) => k * x,
                Op::Shift(s) => x + s,
                Op::Reciprocal => 1.0 / x,
                Op::Unit => 1.0 / (x + 1.0),
                Op::Lower(s) => s / (x + 1.0),
            }
        }

        fn compose(self, m: Mobius<f64>) -> Mobius<f64> {
            match self {
                Op::Scale(k) => m.scale_input(k),
                Op::Shift(s) => m.taylor_shift(s),
                Op::Reciprocal => m.reciprocal_input(),
                Op::Unit => m.process_unit_interval(),
                Op::Lower(s) => m.transformed_for_lower_interval(s),
            }
        }
    }

    #[test]
    fn composition_matches_substitution() {
        arbtest::arbtest(|u| {
            let n = u.int_in_range(0..=6)?;
            let mut ops = Vec::with_capacity(n);
            for _ in 0..n {
                let arg = float_in_range(u, 0.5, 4.0)?;
                ops.push(match u.int_in_range(0..=4)? {
                    0 => Op::Scale(arg),
                    1 => Op::Shift(arg),
                    2 => Op::Reciprocal,
                    3 => Op::Unit,
                    _ => Op::Lower(arg),
                });
            }
            let m = ops
                .iter()
                .fold(Mobius::identity(), |m, op| op.compose(m));
            let x = float_in_range(u, 0.1, 5.0)?;
            let direct = ops.iter().rev().fold(x, |x, op| op.apply(x));
            let via_map = m.eval(x);
            assert!(
                (via_map - direct).abs() <= 1e-9 * direct.abs().max(1.0),
                "{ops:?}: {via_map} vs {direct}"
            );
            Ok(())
        })
        .budget_ms(1_000);
    }
}
