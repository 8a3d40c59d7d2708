// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds on positive roots, and Descartes' rule of signs.

use smallvec::SmallVec;

use crate::{Interval, Poly, Scalar};

/// Counts the sign changes in a coefficient sequence.
///
/// Zero coefficients are skipped without breaking a run of equal signs, so
/// `[1, 0, -1]` has one variation. By Descartes' rule of signs, this bounds
/// the number of positive roots, and has the same parity.
///
/// NaN entries, which a [`Poly`] never contains, are skipped like zeros.
pub fn sign_variations<T: Scalar>(coeffs: &[T]) -> usize {
    let mut count = 0;
    let mut last_negative = None;
    for &c in coeffs {
        let negative = if c < T::zero() {
            true
        } else if c > T::zero() {
            false
        } else {
            continue;
        };
        if last_negative.is_some_and(|last| last != negative) {
            count += 1;
        }
        last_negative = Some(negative);
    }
    count
}

/// An upper bound on the positive roots, by the Local-Max-Quadratic method.
///
/// See Akritas, Strzeboński and Vigklas, "Improving the performance of the
/// continued fractions method using new bounds of positive roots" (2008).
///
/// Each negative coefficient `a_i` is paired with every positive
/// coefficient `a_j` of higher degree, giving the radical
/// `(-2^t_j * a_i / a_j)^(1 / (j - i))`. The usage count `t_j` starts at 1
/// and grows every time `a_j` is paired, across all `i`; the bound is the
/// largest over `i` of the smallest radical for that `i`.
///
/// If the leading coefficient is negative, the bound is computed for the
/// negated polynomial. Returns `None` when there is no negative coefficient
/// to pair, in which case there are no positive roots.
pub fn lmq_upper_bound<T: Scalar>(coeffs: &[T]) -> Option<T> {
    let &leading = coeffs.last()?;
    let sign = if leading < T::zero() {
        -T::one()
    } else {
        T::one()
    };
    let two = T::lit(2.0);
    let mut uses: SmallVec<[i32; 16]> = SmallVec::from_elem(1, coeffs.len());
    let mut bound: Option<T> = None;
    for i in (0..coeffs.len().saturating_sub(1)).rev() {
        let a_i = sign * coeffs[i];
        if a_i >= T::zero() {
            continue;
        }
        let mut best: Option<T> = None;
        for j in i + 1..coeffs.len() {
            let a_j = sign * coeffs[j];
            if a_j <= T::zero() {
                continue;
            }
            let base = -two.powi(uses[j]) * a_i / a_j;
            let radical = base.powf(T::from_count(j - i).recip());
            uses[j] = uses[j].saturating_add(1);
            best = Some(best.map_or(radical, |b| b.min(radical)));
        }
        if let Some(best) = best {
            bound = Some(bound.map_or(best, |b| b.max(best)));
        }
    }
    bound
}

/// A lower bound on the positive roots, by the Local-Max-Quadratic method.
///
/// This is the reciprocal of [`lmq_upper_bound`] applied to the reversed
/// coefficients, whose positive roots are the reciprocals of the original
/// ones. The polynomial is negated first if its constant term is negative.
pub fn lmq_lower_bound<T: Scalar>(coeffs: &[T]) -> Option<T> {
    let reversed: SmallVec<[T; 8]> = coeffs.iter().rev().copied().collect();
    lmq_upper_bound(&reversed).map(T::recip)
}

impl<T: Scalar> Poly<T> {
    /// The number of sign changes in the coefficients.
    ///
    /// See [`sign_variations`].
    pub fn sign_variations(&self) -> usize {
        sign_variations(self.coeffs())
    }

    /// A bound on the number of roots in `(0, 1)`.
    pub fn sign_variations_in_unit_interval(&self) -> usize {
        self.map_unit_interval_to_positive_reals().sign_variations()
    }

    /// A bound on the number of roots strictly inside `interval`.
    pub fn sign_variations_in_interval(&self, interval: &Interval<T>) -> usize {
        self.map_interval_to_positive_reals(interval)
            .sign_variations()
    }

    /// An upper bound on the positive roots. See [`lmq_upper_bound`].
    pub fn lmq_upper_bound(&self) -> Option<T> {
        lmq_upper_bound(self.coeffs())
    }

    /// A lower bound on the positive roots. See [`lmq_lower_bound`].
    pub fn lmq_lower_bound(&self) -> Option<T> {
        lmq_lower_bound(self.coeffs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbitrary::{poly_from_roots, separated_roots};

    fn poly(coeffs: &[f64]) -> Poly<f64> {
        Poly::from_f64(coeffs).unwrap()
    }

    #[test]
    fn variations() {
        assert_eq!(sign_variations(&[1.0, 2.0, 3.0]), 0);
        assert_eq!(sign_variations(&[-1.0, -2.0]), 0);
        assert_eq!(sign_variations(&[1.0, -1.0, 1.0, -1.0, 1.0]), 4);
        assert_eq!(sign_variations(&[1.0, 0.0, 0.0, -1.0]), 1);
        assert_eq!(sign_variations(&[0.0, 1.0, 0.0, 1.0]), 0);
        assert_eq!(sign_variations::<f32>(&[]), 0);
    }

    #[test]
    fn variations_in_regions() {
        let p = poly(&[-6.0, 11.0, -6.0, 1.0]);
        assert_eq!(p.sign_variations(), 3);
        assert_eq!(p.sign_variations_in_unit_interval(), 0);
        let iv = Interval::new(1.5, 2.5).unwrap();
        assert_eq!(p.sign_variations_in_interval(&iv), 1);
        let iv = Interval::new(0.5, 3.5).unwrap();
        assert_eq!(p.sign_variations_in_interval(&iv), 3);
    }

    #[test]
    fn upper_bounds() {
        assert_eq!(lmq_upper_bound(&[-6.0, 11.0, -6.0, 1.0]), Some(12.0));
        assert_eq!(lmq_upper_bound(&[-1.0, -100.0, 100.0, 1.0]), Some(2.0));
        let b = lmq_upper_bound::<f64>(&[1.0, -4.0, -1.0, 2.0, 3.0]).unwrap();
        assert!((b - 1.74716093).abs() < 1e-8);
        assert_eq!(lmq_upper_bound(&[1.0, 2.0, 3.0]), None);
        // Negative leading coefficient: bound of the negation.
        assert_eq!(lmq_upper_bound(&[6.0, -11.0, 6.0, -1.0]), Some(12.0));
        assert_eq!(lmq_upper_bound(&[-1.0, -2.0, -3.0]), None);
    }

    #[test]
    fn lower_bounds() {
        assert_eq!(lmq_lower_bound(&[1.0, 100.0, -100.0, -1.0]), Some(0.5));
        let b = lmq_lower_bound::<f64>(&[1.0, -6.0, 11.0, -6.0]).unwrap();
        assert!((b - 1.0 / 12.0).abs() < 1e-15);
        let b = lmq_lower_bound::<f64>(&[3.0, 2.0, -1.0, -4.0, 1.0]).unwrap();
        assert!((b - 0.57236).abs() < 1e-5);
        assert_eq!(lmq_lower_bound(&[-1.0, 2.0]), Some(0.25));
    }

    #[test]
    fn bounds_enclose_roots() {
        arbtest::arbtest(|u| {
            let roots = separated_roots(u, 1..=7, 0.01, 50.0, 0.01)?;
            let p = poly_from_roots(&roots);
            let upper = p.lmq_upper_bound().unwrap();
            let lower = p.lmq_lower_bound().unwrap();
            let (first, last) = (roots[0], roots[roots.len() - 1]);
            assert!(upper >= last * (1.0 - 1e-9), "{roots:?}: upper {upper}");
            assert!(lower <= first * (1.0 + 1e-9), "{roots:?}: lower {lower}");
            Ok(())
        })
        .budget_ms(1_000);
    }

    #[test]
    fn single_precision() {
        let p = Poly::<f32>::from_f64(&[-6.0, 11.0, -6.0, 1.0]).unwrap();
        assert_eq!(p.lmq_upper_bound(), Some(12.0));
    }
}
