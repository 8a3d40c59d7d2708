// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Laurent polynomials: polynomials with negative exponents.

use smallvec::{smallvec, SmallVec};

use crate::poly::Coeffs;
use crate::{Poly, Result, Scalar};

/// A polynomial in `x` and `1 / x`.
///
/// The terms are split in two coefficient lists, both in increasing order of
/// exponent. The negative part runs from the most negative exponent up to
/// `x^-1`, so its first entry is the coefficient of `x^-neg().len()`; the
/// non-negative part runs from `x^0` upwards, as in [`Poly`].
///
/// For example `neg = [1, 2]`, `pos = [3]` is `x^-2 + 2 x^-1 + 3`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct LaurentPoly<T> {
    neg: Coeffs<T>,
    pos: Coeffs<T>,
}

impl<T: Scalar> From<Poly<T>> for LaurentPoly<T> {
    fn from(poly: Poly<T>) -> Self {
        LaurentPoly {
            neg: SmallVec::new(),
            pos: poly.coeffs().iter().copied().collect(),
        }
    }
}

impl<T: Scalar> LaurentPoly<T> {
    /// Creates a Laurent polynomial from its negative and non-negative parts.
    pub fn new(neg: &[T], pos: &[T]) -> Self {
        LaurentPoly {
            neg: neg.iter().copied().collect(),
            pos: pos.iter().copied().collect(),
        }
    }

    /// Coefficients of `x^-n` through `x^-1`.
    pub fn neg(&self) -> &[T] {
        &self.neg
    }

    /// Coefficients of `x^0` upwards.
    pub fn pos(&self) -> &[T] {
        &self.pos
    }

    /// Multiplies by `x^power`.
    ///
    /// Terms move between the two parts as their exponents change sign, and
    /// a part that is too short to reach zero is padded with zero
    /// coefficients, so no term is ever lost.
    #[must_use]
    pub fn mul_x_power(&self, power: i32) -> Self {
        let shift = power.unsigned_abs() as usize;
        let (neg, pos) = if power >= 0 {
            // The top `shift` negative exponents become non-negative.
            let keep = self.neg.len().saturating_sub(shift);
            let mut pos: Coeffs<T> = smallvec![T::zero(); shift.saturating_sub(self.neg.len())];
            pos.extend_from_slice(&self.neg[keep..]);
            pos.extend_from_slice(&self.pos);
            (self.neg[..keep].into(), pos)
        } else {
            let moved = shift.min(self.pos.len());
            let mut neg = self.neg.clone();
            neg.extend_from_slice(&self.pos[..moved]);
            neg.extend(core::iter::repeat(T::zero()).take(shift - moved));
            (neg, self.pos[moved..].into())
        };
        LaurentPoly { neg, pos }
    }

    /// Returns the derivative.
    ///
    /// The negative part grows by one entry, the new `x^-1` coefficient,
    /// which is always zero. An empty negative part stays empty.
    #[must_use]
    pub fn deriv(&self) -> Self {
        let m = self.neg.len();
        let mut neg: Coeffs<T> = self
            .neg
            .iter()
            .enumerate()
            .map(|(i, &c)| -T::from_count(m - i) * c)
            .collect();
        if m > 0 {
            neg.push(T::zero());
        }
        let pos = self
            .pos
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| T::from_count(i) * c)
            .collect();
        LaurentPoly { neg, pos }
    }

    /// Evaluates at `x`, which should be nonzero if there are negative
    /// exponents.
    pub fn eval(&self, x: T) -> T {
        let mut pos = T::zero();
        for &c in self.pos.iter().rev() {
            pos = pos * x + c;
        }
        if self.neg.is_empty() {
            return pos;
        }
        let recip = x.recip();
        let mut neg = T::zero();
        for &c in &self.neg {
            neg = neg * recip + c;
        }
        pos + neg * recip
    }

    /// The polynomial `x^neg().len() * L(x)`.
    ///
    /// Its coefficients are the negative part followed by the non-negative
    /// part. It has the same nonzero roots as this Laurent polynomial.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCoefficients`](crate::Error::EmptyCoefficients)
    /// if both parts are empty.
    pub fn numerator_poly(&self) -> Result<Poly<T>> {
        Poly::new(self.neg.iter().chain(&self.pos).copied())
    }
}
