// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dense univariate polynomials.

use core::ops::Mul;

use smallvec::{smallvec, SmallVec};

use crate::scalar::{two_prod, two_sum};
use crate::{BinomialCache, Error, Interval, Result, Scalar};

pub(crate) type Coeffs<T> = SmallVec<[T; 8]>;

/// A polynomial with floating-point coefficients.
///
/// Coefficients are stored in increasing order of degree: `coeffs()[0]` is
/// the constant term. There is always at least one coefficient and none of
/// them is NaN; the zero polynomial is `[0]`.
///
/// Operations return new polynomials. The only mutating method is
/// [`set_coeff`](Self::set_coeff).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "PolyRepr<T>",
        bound(deserialize = "T: Scalar + serde::Deserialize<'de>")
    )
)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Poly<T> {
    coeffs: Coeffs<T>,
}

/// The serialized shape of a [`Poly`], checked by [`Poly::new`] on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PolyRepr<T> {
    coeffs: Coeffs<T>,
}

#[cfg(feature = "serde")]
impl<T: Scalar> TryFrom<PolyRepr<T>> for Poly<T> {
    type Error = Error;

    fn try_from(repr: PolyRepr<T>) -> Result<Self> {
        Poly::new(repr.coeffs)
    }
}

impl<'a, T: Scalar> Mul<&'a Poly<T>> for &'a Poly<T> {
    type Output = Poly<T>;

    fn mul(self, rhs: &Poly<T>) -> Poly<T> {
        let mut coeffs: Coeffs<T> = smallvec![T::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, &c) in self.coeffs.iter().enumerate() {
            for (j, &d) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] = coeffs[i + j] + c * d;
            }
        }
        Poly { coeffs }
    }
}

impl<T: Scalar> Mul<&Poly<T>> for Poly<T> {
    type Output = Poly<T>;

    fn mul(self, rhs: &Poly<T>) -> Poly<T> {
        (&self) * rhs
    }
}

impl<T: Scalar> Poly<T> {
    /// Creates a polynomial from coefficients, constant term first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCoefficients`] if no coefficient is given and
    /// [`Error::NanCoefficient`] if any coefficient is NaN.
    pub fn new(coeffs: impl IntoIterator<Item = T>) -> Result<Self> {
        let coeffs: Coeffs<T> = coeffs.into_iter().collect();
        if coeffs.is_empty() {
            return Err(Error::EmptyCoefficients);
        }
        if let Some(index) = coeffs.iter().position(|c| c.is_nan()) {
            return Err(Error::NanCoefficient { index });
        }
        Ok(Poly { coeffs })
    }

    /// Creates a polynomial from `f64` coefficients, converting them to `T`.
    ///
    /// # Errors
    ///
    /// As for [`Poly::new`].
    pub fn from_f64(coeffs: &[f64]) -> Result<Self> {
        Self::new(coeffs.iter().map(|&c| T::lit(c)))
    }

    /// The zero polynomial, `[0]`.
    pub fn zero() -> Self {
        Poly {
            coeffs: smallvec![T::zero()],
        }
    }

    /// Wraps coefficients produced by arithmetic on a valid polynomial.
    pub(crate) fn from_raw(mut coeffs: Coeffs<T>) -> Self {
        if coeffs.is_empty() {
            coeffs.push(T::zero());
        }
        Poly { coeffs }
    }

    /// The coefficients of this polynomial.
    ///
    /// In the returned slice, the coefficient of `x^i` is at index `i`.
    pub fn coeffs(&self) -> &[T] {
        &self.coeffs
    }

    /// The degree of this polynomial.
    ///
    /// This only looks at the number of coefficients, so `[1, 0, 0]` has
    /// degree 2.
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// The coefficient of the highest power.
    pub fn leading(&self) -> T {
        self.coeffs[self.coeffs.len() - 1]
    }

    /// Whether every coefficient is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_zero())
    }

    /// Replaces a single coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index > self.degree()` and
    /// [`Error::NanCoefficient`] if `value` is NaN.
    pub fn set_coeff(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.coeffs.len();
        let slot = self
            .coeffs
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        if value.is_nan() {
            return Err(Error::NanCoefficient { index });
        }
        *slot = value;
        Ok(())
    }

    /// The largest coefficient magnitude.
    pub fn magnitude(&self) -> T {
        self.coeffs
            .iter()
            .fold(T::zero(), |acc, c| acc.max(c.abs()))
    }

    /// Evaluates this polynomial at a point using Horner's method.
    pub fn eval(&self, x: T) -> T {
        let mut acc = T::zero();
        for &c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    /// Evaluates this polynomial using compensated Horner summation.
    ///
    /// The rounding error of every multiply and add is captured exactly and
    /// accumulated in a second Horner pass, so the result is as accurate as
    /// if it had been computed in twice the working precision. This costs a
    /// few times more than [`eval`](Self::eval), and is what every sign
    /// decision near a root should use.
    pub fn eval_accurate(&self, x: T) -> T {
        let mut iter = self.coeffs.iter().rev();
        let Some(&leading) = iter.next() else {
            return T::zero();
        };
        let mut sum = leading;
        let mut err = T::zero();
        for &c in iter {
            let (p, p_err) = two_prod(sum, x);
            let (s, s_err) = two_sum(p, c);
            sum = s;
            err = err * x + (p_err + s_err);
        }
        sum + err
    }

    /// A bound on the rounding error of evaluating at `x`.
    ///
    /// Values of magnitude at most this are indistinguishable from zero.
    pub(crate) fn eval_error_bound(&self, x: T) -> T {
        let x = x.abs();
        let mut abs_sum = T::zero();
        for &c in self.coeffs.iter().rev() {
            abs_sum = abs_sum * x + c.abs();
        }
        let n = T::from_count(self.coeffs.len());
        (n + n) * T::epsilon() * abs_sum
    }

    /// Returns the derivative of this polynomial.
    ///
    /// The derivative of a constant is `[0]`.
    pub fn deriv(&self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| c * T::from_count(i))
            .collect();
        Self::from_raw(coeffs)
    }

    /// Returns `x * P'(x)`, which keeps the degree of `P`.
    pub fn deriv_times_x(&self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .map(|(i, &c)| c * T::from_count(i))
            .collect();
        Self::from_raw(coeffs)
    }

    /// Drops the constant term, dividing by `x`.
    ///
    /// This is exact when the constant term is zero, i.e. when `x = 0` is a
    /// root. Polynomials of degree 0 become `[0]`.
    pub fn divide_by_x(&self) -> Self {
        Self::from_raw(self.coeffs.iter().skip(1).copied().collect())
    }

    /// Returns the monic polynomial with the same roots.
    ///
    /// Exactly zero leading coefficients are dropped first; the zero
    /// polynomial stays `[0]`.
    pub fn normalized(&self) -> Self {
        let trimmed = trim_zeros(&self.coeffs);
        let lead = trimmed[trimmed.len() - 1];
        if lead.is_zero() {
            return Self::zero();
        }
        Self::from_raw(trimmed.iter().map(|&c| c / lead).collect())
    }

    /// Divides by `divisor`, returning `(quotient, remainder)`.
    ///
    /// Exactly zero leading coefficients of the divisor are ignored. Leading
    /// coefficients of the remainder that are negligible relative to the
    /// dividend are dropped, so the remainder always has a lower degree
    /// than the divisor. If the dividend has the lower degree, the quotient
    /// is `[0]` and the remainder is the dividend itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivideByZero`] if every coefficient of `divisor` is
    /// smaller in magnitude than the smallest positive normal value.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        let divisor = trim_zeros(&divisor.coeffs);
        if divisor.iter().all(|c| c.abs() < T::min_positive_value()) {
            return Err(Error::DivideByZero);
        }
        if self.coeffs.len() < divisor.len() {
            return Ok((Self::zero(), self.clone()));
        }

        let lead = divisor[divisor.len() - 1];
        let mut rem = self.coeffs.clone();
        let mut quot: Coeffs<T> = smallvec![T::zero(); self.coeffs.len() - divisor.len() + 1];
        for q_ix in (0..quot.len()).rev() {
            let Some(top) = rem.pop() else {
                break;
            };
            let q = top / lead;
            quot[q_ix] = q;
            let offset = rem.len() + 1 - divisor.len();
            for (r, &d) in rem[offset..].iter_mut().zip(divisor.iter()) {
                *r = *r - q * d;
            }
        }

        let tolerance = T::epsilon() * self.magnitude();
        while rem.len() > 1 && rem[rem.len() - 1].abs() <= tolerance {
            rem.pop();
        }
        Ok((Self::from_raw(quot), Self::from_raw(rem)))
    }

    /// The monic greatest common divisor of two polynomials.
    ///
    /// This is the Euclidean algorithm. A remainder counts as zero once all
    /// its coefficients are below `sqrt(epsilon)` times the larger magnitude
    /// of the two inputs. The candidate is then checked against both inputs:
    /// if either leaves a remainder above that tolerance relative to its own
    /// magnitude, the inputs are taken to be coprime and the result is `[1]`.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::DivideByZero`] from [`div_rem`](Self::div_rem),
    /// which cannot happen for finite inputs.
    pub fn gcd(&self, other: &Self) -> Result<Self> {
        let scale = self.magnitude().max(other.magnitude());
        let mut a = self.clone();
        let mut b = other.clone();
        while !is_negligible(&b, scale) {
            let (_, r) = a.div_rem(&b)?;
            a = b;
            b = r;
        }
        let g = a.normalized();
        if g.degree() == 0 {
            return Ok(g);
        }
        for p in [self, other] {
            let (_, r) = p.div_rem(&g)?;
            if !is_negligible(&r, p.magnitude()) {
                log::trace!("rejected common factor {g:?}");
                return Ok(Self::from_raw(smallvec![T::one()]));
            }
        }
        Ok(g)
    }

    /// Removes repeated roots.
    ///
    /// Returns `self` unchanged when `gcd(P, P')` is constant, and
    /// `P / gcd(P, P')` otherwise.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`gcd`](Self::gcd).
    pub fn make_squarefree(&self) -> Result<Self> {
        let g = self.gcd(&self.deriv())?;
        if g.degree() == 0 {
            return Ok(self.clone());
        }
        let (q, _) = self.div_rem(&g)?;
        Ok(q)
    }

    /// Divides out the factor `x - root` by synthetic division.
    ///
    /// The remainder is discarded, so this is only meaningful when `root`
    /// is (close to) a root.
    pub fn deflate(&self, root: T) -> Self {
        let n = self.coeffs.len();
        let mut out: Coeffs<T> = smallvec![T::zero(); n - 1];
        let mut acc = T::zero();
        for i in (1..n).rev() {
            acc = acc * root + self.coeffs[i];
            out[i - 1] = acc;
        }
        Self::from_raw(out)
    }

    /// Returns `P(x + s)`.
    pub fn taylor_shift(&self, s: T) -> Self {
        self.taylor_shift_with(&mut BinomialCache::new(), s)
    }

    /// Returns `P(x + 1)`.
    pub fn taylor_shift_by_1(&self) -> Self {
        self.taylor_shift_with(&mut BinomialCache::new(), T::one())
    }

    /// Returns `P(x + s)`, using (and growing) `cache`.
    ///
    /// Coefficient `k` of the result is `sum(c_i * C(i, k) * s^(i - k))`,
    /// which takes quadratic time in the degree.
    pub fn taylor_shift_with(&self, cache: &mut BinomialCache<T>, s: T) -> Self {
        let n = self.coeffs.len();
        let mut pows: Coeffs<T> = SmallVec::with_capacity(n);
        let mut pow = T::one();
        for _ in 0..n {
            pows.push(pow);
            pow = pow * s;
        }
        let mut out = self.coeffs.clone();
        for (i, &c) in self.coeffs.iter().enumerate().skip(1) {
            if c.is_zero() {
                continue;
            }
            let row = cache.row(i);
            for k in 0..i {
                out[k] = out[k] + c * row[k] * pows[i - k];
            }
        }
        Self::from_raw(out)
    }

    /// Returns `P(s * x)`: coefficient `i` is scaled by `s^i`.
    pub fn scale_input(&self, s: T) -> Self {
        let mut pow = T::one();
        let coeffs = self
            .coeffs
            .iter()
            .map(|&c| {
                let scaled = c * pow;
                pow = pow * s;
                scaled
            })
            .collect();
        Self::from_raw(coeffs)
    }

    /// Scales coefficient `i` by `s^(degree - i)`.
    ///
    /// This is `s^degree * P(x / s)`, so it has the same sign pattern as
    /// `P(x / s)` for positive `s` without dividing.
    pub fn scale_input_reversed(&self, s: T) -> Self {
        let mut coeffs = self.coeffs.clone();
        let mut pow = T::one();
        for c in coeffs.iter_mut().rev() {
            *c = *c * pow;
            pow = pow * s;
        }
        Self::from_raw(coeffs)
    }

    /// Reverses the coefficients, giving `x^degree * P(1 / x)`.
    pub fn reversed(&self) -> Self {
        Self::from_raw(self.coeffs.iter().rev().copied().collect())
    }

    /// Maps the roots in `(0, 1)` to roots in `(0, inf)`.
    ///
    /// This is `(x + 1)^degree * P(1 / (x + 1))`.
    pub fn map_unit_interval_to_positive_reals(&self) -> Self {
        self.map_unit_interval_to_positive_reals_with(&mut BinomialCache::new())
    }

    pub(crate) fn map_unit_interval_to_positive_reals_with(
        &self,
        cache: &mut BinomialCache<T>,
    ) -> Self {
        self.reversed().taylor_shift_with(cache, T::one())
    }

    /// Maps the roots in `(a, b)` to roots in `(0, inf)`.
    pub fn map_interval_to_positive_reals(&self, interval: &Interval<T>) -> Self {
        let mut cache = BinomialCache::new();
        self.taylor_shift_with(&mut cache, interval.left())
            .scale_input(interval.width())
            .map_unit_interval_to_positive_reals_with(&mut cache)
    }

    /// Returns `(x + 1)^degree * P(s / (x + 1))`.
    ///
    /// Roots in `(0, s)` become roots in `(0, inf)`.
    pub fn transformed_for_lower_interval(&self, s: T) -> Self {
        self.transformed_for_lower_interval_with(&mut BinomialCache::new(), s)
    }

    pub(crate) fn transformed_for_lower_interval_with(
        &self,
        cache: &mut BinomialCache<T>,
        s: T,
    ) -> Self {
        self.scale_input(s)
            .map_unit_interval_to_positive_reals_with(cache)
    }
}

/// Drops exactly zero leading coefficients, keeping at least one.
fn trim_zeros<T: Scalar>(coeffs: &[T]) -> &[T] {
    let len = coeffs
        .iter()
        .rposition(|c| !c.is_zero())
        .map_or(1, |ix| ix + 1);
    &coeffs[..len.min(coeffs.len())]
}

/// Whether `p` is zero up to a relative tolerance of `sqrt(epsilon)`.
fn is_negligible<T: Scalar>(p: &Poly<T>, scale: T) -> bool {
    let tolerance = T::epsilon().sqrt() * scale.max(T::min_positive_value());
    p.coeffs.iter().all(|c| c.abs() <= tolerance)
}
