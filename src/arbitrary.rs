// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generators for property tests using `arbitrary`.

use alloc::vec::Vec;
use core::ops::RangeInclusive;

use arbitrary::Unstructured;

use crate::Poly;

/// A float in `[lo, hi]`, on a grid fine enough to look continuous.
pub(crate) fn float_in_range(
    u: &mut Unstructured<'_>,
    lo: f64,
    hi: f64,
) -> Result<f64, arbitrary::Error> {
    let steps: u32 = u.int_in_range(0..=1_000_000)?;
    Ok(lo + (hi - lo) * f64::from(steps) / 1_000_000.0)
}

/// Between `len.start()` and `len.end()` floats, each in `[lo, hi]`.
pub(crate) fn coeffs_in_range(
    u: &mut Unstructured<'_>,
    len: RangeInclusive<usize>,
    lo: f64,
    hi: f64,
) -> Result<Vec<f64>, arbitrary::Error> {
    let n = u.int_in_range(len)?;
    (0..n).map(|_| float_in_range(u, lo, hi)).collect()
}

/// Sorted roots in `[lo, hi]`, each at least `gap` away from its neighbours.
pub(crate) fn separated_roots(
    u: &mut Unstructured<'_>,
    count: RangeInclusive<usize>,
    lo: f64,
    hi: f64,
    gap: f64,
) -> Result<Vec<f64>, arbitrary::Error> {
    let n = u.int_in_range(count)?;
    let slack = hi - lo - gap * n.saturating_sub(1) as f64;
    if slack < 0.0 {
        return Err(arbitrary::Error::IncorrectFormat);
    }
    let mut offsets = (0..n)
        .map(|_| float_in_range(u, 0.0, slack))
        .collect::<Result<Vec<_>, _>>()?;
    offsets.sort_by(f64::total_cmp);
    Ok(offsets
        .iter()
        .enumerate()
        .map(|(i, off)| lo + off + gap * i as f64)
        .collect())
}

/// The monic polynomial with exactly the given roots.
pub(crate) fn poly_from_roots(roots: &[f64]) -> Poly<f64> {
    let mut coeffs = alloc::vec![1.0];
    for &r in roots {
        coeffs.insert(0, 0.0);
        for i in 0..coeffs.len() - 1 {
            coeffs[i] -= r * coeffs[i + 1];
        }
    }
    Poly::from_f64(&coeffs).unwrap()
}

#[test]
fn roots_are_separated() {
    arbtest::arbtest(|u| {
        let roots = separated_roots(u, 0..=6, 0.1, 10.0, 0.5)?;
        for w in roots.windows(2) {
            assert!(w[1] - w[0] >= 0.5 - 1e-12, "{roots:?}");
        }
        assert!(roots.iter().all(|r| (0.1..=10.0 + 1e-12).contains(r)));
        Ok(())
    });
}

#[test]
fn planted_roots() {
    let p = poly_from_roots(&[1.0, 2.0, 3.0]);
    assert_eq!(p.coeffs(), &[-6.0, 11.0, -6.0, 1.0]);
}
