// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The root-finding pipeline: squarefree part, isolation, refinement.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::{
    refine_bisection, refine_itp, Error, ItpParams, Poly, Result, RootIsolator, Scalar, Strategy,
    DEFAULT_BISECTION_ITERATIONS, DEFAULT_ISOLATION_ITERATIONS,
};

/// The precision [`Poly::find_global_minimum`] locates critical points to.
pub const DEFAULT_PRECISION: f64 = 1e-5;

/// How isolating intervals are shrunk onto their roots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[non_exhaustive]
pub enum Refiner {
    /// Plain bisection, see [`refine_bisection`].
    #[default]
    Bisection,
    /// Interpolate-truncate-project, see [`refine_itp`].
    Itp,
}

/// Configuration for finding the positive real roots of a polynomial.
///
/// The default uses continued-fraction isolation and bisection, which is
/// what [`find_all_roots`] does.
///
/// ```
/// use realroot::{Poly, Refiner, RootFinder, Strategy};
///
/// let finder = RootFinder {
///     strategy: Strategy::Bisection,
///     refiner: Refiner::Itp,
///     ..RootFinder::default()
/// };
/// // (x - 1)(x - 2)(x - 3)
/// let p = Poly::<f64>::from_f64(&[-6.0, 11.0, -6.0, 1.0]).unwrap();
/// let roots = finder.find_roots(&p, 1e-10).unwrap();
/// assert_eq!(roots.len(), 3);
/// assert!((roots[1] - 2.0).abs() < 1e-10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct RootFinder {
    /// How roots are separated.
    pub strategy: Strategy,
    /// How each isolating interval is refined.
    pub refiner: Refiner,
    /// The cap passed to [`RootIsolator::with_max_iterations`].
    pub max_isolation_iterations: usize,
    /// The bisection iteration limit. ITP bounds its own iterations.
    pub max_refine_iterations: usize,
}

impl Default for RootFinder {
    fn default() -> Self {
        RootFinder {
            strategy: Strategy::ContinuedFractions,
            refiner: Refiner::Bisection,
            max_isolation_iterations: DEFAULT_ISOLATION_ITERATIONS,
            max_refine_iterations: DEFAULT_BISECTION_ITERATIONS,
        }
    }
}

impl RootFinder {
    /// Finds the positive real roots of `poly`, each within `precision`.
    ///
    /// Repeated roots are reported once, and a root at zero is included.
    /// The result is sorted, and roots closer than `precision` to the
    /// previous one are dropped.
    ///
    /// Roots that isolation hits exactly, and isolating bounds at which
    /// `poly` is zero up to rounding, are reported as they are and divided
    /// out before the remaining intervals are refined. An interval whose
    /// only sign change was such a bound is then skipped.
    ///
    /// The zero polynomial has no isolated roots and gives an empty list.
    /// An interval that cannot be refined within the iteration limit is
    /// left out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveTolerance`] if `precision` is not
    /// positive, and [`Error::NotBracketing`] if an isolating interval
    /// turns out not to bracket a root.
    pub fn find_roots<T: Scalar>(&self, poly: &Poly<T>, precision: T) -> Result<Vec<T>> {
        if precision.is_nan() || precision <= T::zero() {
            return Err(Error::NonPositiveTolerance);
        }
        let squarefree = poly.make_squarefree()?;
        if squarefree.is_zero() {
            log::debug!("zero polynomial, no roots to isolate");
            return Ok(Vec::new());
        }
        let intervals = RootIsolator::new(self.strategy)
            .with_max_iterations(self.max_isolation_iterations)
            .isolate(&squarefree)?;

        let mut exact: Vec<T> = Vec::new();
        for interval in &intervals {
            if interval.is_degenerate() {
                if !exact.contains(&interval.left()) {
                    exact.push(interval.left());
                }
                continue;
            }
            for bound in [interval.left(), interval.right()] {
                if bound.is_finite()
                    && !exact.contains(&bound)
                    && squarefree.eval_accurate(bound).abs() <= squarefree.eval_error_bound(bound)
                {
                    log::debug!("isolating bound {bound:?} is a root up to rounding");
                    exact.push(bound);
                }
            }
        }
        let deflated = exact
            .iter()
            .fold(squarefree, |poly, &root| poly.deflate(root));
        let f = |x| deflated.eval_accurate(x);

        let mut roots = exact.clone();
        for interval in intervals.iter().filter(|iv| !iv.is_degenerate()) {
            let (left, right) = (interval.left(), interval.right());
            if f(left) * f(right) > T::zero()
                && (exact.contains(&left) || exact.contains(&right))
            {
                continue;
            }
            let root = match self.refiner {
                Refiner::Bisection => {
                    refine_bisection(f, left, right, precision, self.max_refine_iterations)?
                }
                Refiner::Itp => refine_itp(f, left, right, &ItpParams::new(precision))?,
            };
            if !root.is_nan() {
                roots.push(root);
            }
        }

        roots.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        roots.dedup_by(|next, prev| (*next - *prev).abs() <= precision);
        Ok(roots)
    }

    /// The lowest value of `poly` over its positive critical points.
    ///
    /// Returns `(x, poly(x))`, or `None` if the derivative has no positive
    /// root. The critical points are located to within `precision`; the
    /// ends of the domain and the behaviour towards infinity are not
    /// considered.
    ///
    /// # Errors
    ///
    /// As for [`find_roots`](Self::find_roots), applied to the derivative.
    pub fn find_global_minimum<T: Scalar>(
        &self,
        poly: &Poly<T>,
        precision: T,
    ) -> Result<Option<(T, T)>> {
        let critical = self.find_roots(&poly.deriv(), precision)?;
        Ok(critical
            .into_iter()
            .map(|x| (x, poly.eval_accurate(x)))
            .fold(None, |best: Option<(T, T)>, (x, y)| match best {
                Some((_, best_y)) if best_y <= y => best,
                _ => Some((x, y)),
            }))
    }
}

/// Finds the positive real roots of `poly`, each within `precision`.
///
/// This uses the default [`RootFinder`]; see
/// [`RootFinder::find_roots`] for the details.
///
/// # Errors
///
/// As for [`RootFinder::find_roots`].
pub fn find_all_roots<T: Scalar>(poly: &Poly<T>, precision: T) -> Result<Vec<T>> {
    RootFinder::default().find_roots(poly, precision)
}

impl<T: Scalar> Poly<T> {
    /// The lowest value over the positive critical points.
    ///
    /// Critical points are found to [`DEFAULT_PRECISION`] with the default
    /// [`RootFinder`]; see [`RootFinder::find_global_minimum`].
    ///
    /// ```
    /// use realroot::Poly;
    ///
    /// // (x - 2)^2 + 1
    /// let p = Poly::<f64>::from_f64(&[5.0, -4.0, 1.0]).unwrap();
    /// let (x, y) = p.find_global_minimum().unwrap().unwrap();
    /// assert!((x - 2.0).abs() < 1e-5);
    /// assert!((y - 1.0).abs() < 1e-9);
    /// ```
    ///
    /// # Errors
    ///
    /// As for [`RootFinder::find_global_minimum`].
    pub fn find_global_minimum(&self) -> Result<Option<(T, T)>> {
        RootFinder::default().find_global_minimum(self, T::lit(DEFAULT_PRECISION))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::arbitrary::{poly_from_roots, separated_roots};

    fn poly(coeffs: &[f64]) -> Poly<f64> {
        Poly::from_f64(coeffs).unwrap()
    }

    fn assert_roots(actual: &[f64], expected: &[f64], tolerance: f64) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() <= tolerance, "{actual:?} vs {expected:?}");
        }
    }

    fn finders() -> [RootFinder; 4] {
        let base = RootFinder::default();
        [
            base,
            RootFinder {
                refiner: Refiner::Itp,
                ..base
            },
            RootFinder {
                strategy: Strategy::Bisection,
                ..base
            },
            RootFinder {
                strategy: Strategy::Bisection,
                refiner: Refiner::Itp,
                ..base
            },
        ]
    }

    #[test]
    fn cubic_with_distinct_roots() {
        let p = poly(&[84.9837, -74.5816, 21.3423, -2.0]);
        let roots = find_all_roots(&p, 1e-4).unwrap();
        assert_roots(&roots, &[2.64986, 3.78754, 4.23375], 1e-4);
    }

    #[test]
    fn repeated_root() {
        // (x - 1)^2 (x - 2)
        let p = poly(&[-2.0, 5.0, -4.0, 1.0]);
        let roots = find_all_roots(&p, 1e-5).unwrap();
        assert_roots(&roots, &[1.0, 2.0], 1e-4);
    }

    #[test]
    fn quartic() {
        let p = poly(&[-3.0, 40.0, -1.0, 0.0, -3.0]);
        let roots = find_all_roots(&p, 1e-6).unwrap();
        assert_roots(&roots, &[0.0751399, 2.2978], 1e-4);
    }

    #[test]
    fn every_configuration() {
        let p = poly(&[-6.0, 11.0, -6.0, 1.0]);
        for finder in finders() {
            let roots = finder.find_roots(&p, 1e-9).unwrap();
            assert_roots(&roots, &[1.0, 2.0, 3.0], 1e-8);
        }
    }

    #[test]
    fn roots_at_zero() {
        assert_roots(&find_all_roots(&poly(&[0.0, 0.0, 1.0]), 1e-6).unwrap(), &[0.0], 0.0);
        assert_roots(
            &find_all_roots(&poly(&[0.0, -1.0, 1.0]), 1e-6).unwrap(),
            &[0.0, 1.0],
            1e-6,
        );
    }

    #[test]
    fn no_roots() {
        assert!(find_all_roots(&poly(&[1.0, 0.0, 1.0]), 1e-6)
            .unwrap()
            .is_empty());
        assert!(find_all_roots(&poly(&[3.0]), 1e-6).unwrap().is_empty());
        assert!(find_all_roots(&poly(&[0.0]), 1e-6).unwrap().is_empty());
    }

    #[test]
    fn bad_precision() {
        let p = poly(&[-1.0, 1.0]);
        assert_eq!(find_all_roots(&p, 0.0), Err(Error::NonPositiveTolerance));
        assert_eq!(find_all_roots(&p, f64::NAN), Err(Error::NonPositiveTolerance));
    }

    /// Roots at 0.02, 0.2346, 0.5, 3 and 11; tightly packed roots have
    /// broken earlier versions of the bounds.
    #[test]
    fn close_roots() {
        let p = poly(&[-0.077418, 4.38858, -26.752, 43.6964, -14.7546, 1.0]);
        for finder in finders() {
            let roots = finder.find_roots(&p, 1e-5).unwrap();
            assert_roots(&roots, &[0.02, 0.2346, 0.5, 3.0, 11.0], 1e-4);
        }
    }

    #[test]
    fn precision_below_float_spacing() {
        let p = poly(&[84.9837, -74.5816, 21.3423, -2.0]);
        for finder in finders() {
            let roots = finder.find_roots(&p, 1e-17).unwrap();
            assert_roots(&roots, &[2.64986, 3.78754, 4.23375], 1e-4);
        }
    }

    #[test]
    fn mixed_sign_roots_with_complex_pair() {
        let real = [-6.97, -0.3455, 5.1413, 10.9998, 14.613, 16.3015];
        let p = &poly_from_roots(&real) * &poly(&[1.0, 0.0, 1.0]);
        for finder in finders() {
            let roots = finder.find_roots(&p, 1e-9).unwrap();
            assert_roots(&roots, &real[2..], 1e-6);
        }
    }

    #[test]
    fn single_precision() {
        let p = Poly::<f32>::from_f64(&[-6.0, 11.0, -6.0, 1.0]).unwrap();
        let roots = find_all_roots(&p, 1e-4).unwrap();
        assert_eq!(roots.len(), 3);
        for (r, e) in roots.iter().zip([1.0, 2.0, 3.0]) {
            assert!((r - e).abs() <= 1e-4, "{roots:?}");
        }
    }

    #[test]
    fn global_minimum() {
        let cases: [(&[f64], f64, f64); 5] = [
            (&[4.0, -4.0, 1.0], 2.0, 0.0),
            (&[22.0, -10.0, -4.0, 2.0], 2.11963, 1.87865),
            // The lower local minimum on the whole line is at a negative x.
            (&[174.0, -215.0, 91.0, -16.0, 1.0], 2.37105, -5.85539),
            // 2 (x - 1)^3 (x - 2) + 1
            (&[5.0, -14.0, 18.0, -10.0, 2.0], 1.75, 0.789063),
            (&[5.0, -4.0, 1.0], 2.0, 1.0),
        ];
        for (coeffs, x, y) in cases {
            let (min_x, min_y) = poly(coeffs).find_global_minimum().unwrap().unwrap();
            assert!((min_x - x).abs() < 1e-4, "{coeffs:?}: {min_x}");
            assert!((min_y - y).abs() < 1e-4, "{coeffs:?}: {min_y}");
        }
    }

    #[test]
    fn no_critical_point() {
        assert_eq!(poly(&[1.0, 2.0, 3.0]).find_global_minimum(), Ok(None));
        assert_eq!(poly(&[7.0]).find_global_minimum(), Ok(None));
    }

    #[test]
    fn planted_roots_are_found() {
        arbtest::arbtest(|u| {
            let roots = separated_roots(u, 1..=6, 0.1, 20.0, 0.05)?;
            let p = poly_from_roots(&roots);
            for finder in finders() {
                let found = finder.find_roots(&p, 1e-6).unwrap();
                assert_roots(&found, &roots, 1e-5);
            }
            Ok(())
        })
        .budget_ms(1_000);
    }

    #[test]
    fn seeded_sweep() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let n = rng.random_range(1..=5);
            let mut roots: Vec<f64> = (0..n).map(|_| rng.random_range(0.05..30.0)).collect();
            roots.sort_by(f64::total_cmp);
            if roots.windows(2).any(|w| w[1] - w[0] < 0.05) {
                continue;
            }
            let p = poly_from_roots(&roots);
            let found = find_all_roots(&p, 1e-7).unwrap();
            assert_roots(&found, &roots, 1e-5);
        }
    }

    #[test]
    fn seeded_mixed_sign_sweep() {
        let mut rng = StdRng::seed_from_u64(0xc0ffee);
        let complex_pair = poly(&[1.0, 0.0, 1.0]);
        for _ in 0..500 {
            let n = rng.random_range(2..=7);
            let mut roots: Vec<f64> = (0..n).map(|_| rng.random_range(-20.0..20.0)).collect();
            roots.sort_by(f64::total_cmp);
            if roots.windows(2).any(|w| w[1] - w[0] < 0.05) || roots.iter().any(|r| r.abs() < 0.05)
            {
                continue;
            }
            let mut p = poly_from_roots(&roots);
            if rng.random_bool(0.5) {
                p = &p * &complex_pair;
            }
            assert_eq!(p.make_squarefree().unwrap().degree(), p.degree(), "{roots:?}");
            let positive: Vec<f64> = roots.iter().copied().filter(|&r| r > 0.0).collect();
            for finder in finders() {
                let found = finder.find_roots(&p, 1e-7).unwrap();
                assert_roots(&found, &positive, 1e-5);
            }
        }
    }
}
