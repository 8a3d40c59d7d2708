// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimum initial velocity for intercepting a moving target.
//!
//! The motions of a target and a shooter are given as polynomials in time
//! with vector coefficients, constant term first. A projectile launched at
//! time 0 with constant velocity `v` meets the target at time `t` when `v t`
//! equals the relative position `r(t)` of the target, so
//!
//! ```text
//! |v(t)|^2 = |r(t)|^2 / t^2
//! ```
//!
//! The numerator `|r(t)|^2` is a polynomial, and the minimum over positive
//! `t` is among the positive roots of the derivative's numerator, which the
//! root finder locates.
//!
//! ```
//! use realroot::velocity::minimized_initial_velocity;
//! use realroot::Vec2;
//!
//! // A target 10 units away, moving at (-2, 1); a stationary shooter.
//! let target = [Vec2::new(10.0, 0.0), Vec2::new(-2.0, 1.0)];
//! let shooter = [Vec2::ZERO];
//! let (t, v) = minimized_initial_velocity(&target, &shooter, 1e-9)
//!     .unwrap()
//!     .unwrap();
//! assert!((t - 5.0).abs() < 1e-8);
//! assert!((v - Vec2::new(0.0, 1.0)).hypot() < 1e-8);
//! ```

use alloc::vec::Vec;

use crate::{find_all_roots, Error, LaurentPoly, Poly, Result, Scalar};

/// The operations the velocity solver needs from a vector type.
pub trait VectorSpace: Copy {
    /// The type of the components.
    type Scalar: Scalar;

    /// The zero vector.
    fn zero() -> Self;

    /// Vector sum.
    fn add(self, other: Self) -> Self;

    /// Vector difference.
    fn sub(self, other: Self) -> Self;

    /// Multiplication by a scalar.
    fn scale(self, factor: Self::Scalar) -> Self;

    /// Dot product.
    fn dot(self, other: Self) -> Self::Scalar;

    /// The squared length.
    fn magnitude_squared(self) -> Self::Scalar {
        self.dot(self)
    }
}

/// The coefficients of `target - shooter`.
///
/// The shorter list is padded with zero vectors.
pub fn relative_vectors<T: Scalar, V: VectorSpace<Scalar = T>>(target: &[V], shooter: &[V]) -> Vec<V> {
    let len = target.len().max(shooter.len());
    (0..len)
        .map(|k| match (target.get(k), shooter.get(k)) {
            (Some(&t), Some(&s)) => t.sub(s),
            (Some(&t), None) => t,
            (None, Some(&s)) => s.scale(-T::one()),
            (None, None) => V::zero(),
        })
        .collect()
}

/// Expands `|r(t)|^2` for `r(t) = sum(vectors[k] t^k)`.
///
/// Coefficient `k` of the result is the sum of `vectors[j] . vectors[l]`
/// over `j + l = k`, so `n` vectors give `2n - 1` coefficients.
///
/// # Errors
///
/// Returns [`Error::EmptyCoefficients`] if `vectors` is empty and
/// [`Error::NanCoefficient`] if a dot product is NaN.
pub fn expand_velocity_numerator<T: Scalar, V: VectorSpace<Scalar = T>>(vectors: &[V]) -> Result<Poly<T>> {
    if vectors.is_empty() {
        return Err(Error::EmptyCoefficients);
    }
    let n = vectors.len();
    let two = T::lit(2.0);
    Poly::new((0..2 * n - 1).map(|k| {
        let lo = k.saturating_sub(n - 1);
        let mut sum = T::zero();
        // Pairs below the diagonal count twice.
        for j in lo..k.div_ceil(2) {
            sum = sum + vectors[j].dot(vectors[k - j]);
        }
        sum = sum * two;
        if k % 2 == 0 {
            sum = sum + vectors[k / 2].magnitude_squared();
        }
        sum
    }))
}

/// Divides entry `k` by `k!`.
///
/// This turns the derivatives of a motion at time 0 (position, velocity,
/// acceleration, ...) into the coefficients of its Taylor polynomial.
pub fn scale_taylor_coefficients<T: Scalar, V: VectorSpace<Scalar = T>>(derivatives: &[V]) -> Vec<V> {
    let mut factorial = T::one();
    derivatives
        .iter()
        .enumerate()
        .map(|(k, &d)| {
            if k > 1 {
                factorial = factorial * T::from_count(k);
            }
            d.scale(factorial.recip())
        })
        .collect()
}

/// `|v(t)|^2`, given the expanded numerator `|r(t)|^2`.
pub fn velocity_squared_magnitude<T: Scalar>(numerator: &Poly<T>, t: T) -> T {
    numerator.eval(t) / (t * t)
}

/// The launch velocity `r(t) / t` that reaches the target at time `t`.
pub fn initial_velocity<T: Scalar, V: VectorSpace<Scalar = T>>(relative: &[V], t: T) -> V {
    relative
        .iter()
        .rev()
        .fold(V::zero(), |acc, &r| acc.scale(t).add(r))
        .scale(t.recip())
}

/// Finds the interception time with the smallest launch speed.
///
/// `target` and `shooter` are the coefficients of the two motions, constant
/// term first; use [`scale_taylor_coefficients`] to get them from
/// derivatives. Returns the time and the launch velocity, or `None` if the
/// speed has no positive critical point (for example when the target moves
/// directly away faster than any finite time allows).
///
/// # Errors
///
/// Returns [`Error::EmptyCoefficients`] if both motions are empty, and
/// propagates root-finding errors, such as
/// [`Error::NonPositiveTolerance`] for a bad `precision`.
pub fn minimized_initial_velocity<T: Scalar, V: VectorSpace<Scalar = T>>(
    target: &[V],
    shooter: &[V],
    precision: T,
) -> Result<Option<(T, V)>> {
    let relative = relative_vectors(target, shooter);
    let numerator = expand_velocity_numerator(&relative)?;
    let derivative = LaurentPoly::from(numerator.clone())
        .mul_x_power(-2)
        .deriv()
        .numerator_poly()?;
    let critical = find_all_roots(&derivative, precision)?;
    log::trace!("critical times {critical:?}");

    let best = critical
        .into_iter()
        .filter(|&t| t > T::zero())
        .map(|t| (t, velocity_squared_magnitude(&numerator, t)))
        .fold(None, |best: Option<(T, T)>, (t, speed)| match best {
            Some((_, best_speed)) if best_speed <= speed => best,
            _ => Some((t, speed)),
        });
    Ok(best.map(|(t, _)| (t, initial_velocity(&relative, t))))
}
