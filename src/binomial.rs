// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoized binomial coefficients for Taylor shifts.

use alloc::vec::Vec;

use crate::Scalar;

/// Rows 0 through 10 of Pascal's triangle.
const PASCAL: [[u16; 11]; 11] = [
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 3, 3, 1, 0, 0, 0, 0, 0, 0, 0],
    [1, 4, 6, 4, 1, 0, 0, 0, 0, 0, 0],
    [1, 5, 10, 10, 5, 1, 0, 0, 0, 0, 0],
    [1, 6, 15, 20, 15, 6, 1, 0, 0, 0, 0],
    [1, 7, 21, 35, 35, 21, 7, 1, 0, 0, 0],
    [1, 8, 28, 56, 70, 56, 28, 8, 1, 0, 0],
    [1, 9, 36, 84, 126, 126, 84, 36, 9, 1, 0],
    [1, 10, 45, 120, 210, 252, 210, 120, 45, 10, 1],
];

/// A lazily grown table of binomial coefficients `C(n, k)`.
///
/// The first eleven rows come from a fixed table; later rows are derived
/// from their predecessor by Pascal's rule the first time they are needed
/// and kept for the lifetime of the cache.
///
/// The cache is an ordinary owned value. A [`RootIsolator`](crate::RootIsolator)
/// keeps one across calls; the convenience methods on [`Poly`](crate::Poly)
/// that do not take a cache build a fresh one.
#[derive(Clone, Debug)]
pub struct BinomialCache<T> {
    rows: Vec<Vec<T>>,
}

impl<T: Scalar> Default for BinomialCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> BinomialCache<T> {
    /// Creates a cache holding the precomputed rows.
    pub fn new() -> Self {
        let rows = PASCAL
            .iter()
            .enumerate()
            .map(|(n, row)| row[..=n].iter().map(|&c| T::lit(f64::from(c))).collect())
            .collect();
        BinomialCache { rows }
    }

    /// The binomial coefficient `C(n, k)`, zero when `k > n`.
    pub fn get(&mut self, n: usize, k: usize) -> T {
        if k > n {
            return T::zero();
        }
        self.row(n)[k]
    }

    /// Row `n` of Pascal's triangle, `C(n, 0)` through `C(n, n)`.
    pub fn row(&mut self, n: usize) -> &[T] {
        while self.rows.len() <= n {
            let next = match self.rows.last() {
                Some(prev) => {
                    let mut next = Vec::with_capacity(prev.len() + 1);
                    next.push(T::one());
                    next.extend(prev.windows(2).map(|w| w[0] + w[1]));
                    next.push(T::one());
                    next
                }
                None => alloc::vec![T::one()],
            };
            self.rows.push(next);
        }
        &self.rows[n]
    }

    /// The number of rows computed so far.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows are cached. Never true for a cache built by [`new`](Self::new).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
