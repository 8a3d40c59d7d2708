// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Isolation of positive real roots using Descartes' rule of signs.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::{BinomialCache, Interval, Mobius, Poly, Result, Scalar};

/// The default cap on the number of search tasks an isolator processes.
pub const DEFAULT_ISOLATION_ITERATIONS: usize = 50;

/// How a [`RootIsolator`] subdivides the positive real line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[non_exhaustive]
pub enum Strategy {
    /// Scale all roots into `(0, 1]`, then halve intervals until each holds
    /// at most one root.
    Bisection,
    /// Vincent-Akritas-Strzeboński continued fractions: skip ahead by the
    /// lower root bound, then split at 1.
    #[default]
    ContinuedFractions,
}

/// Finds isolating intervals for the positive real roots of a polynomial.
///
/// Each returned interval holds exactly one root of the squarefree part of
/// the input. Non-degenerate intervals are half-open on the left, `(left,
/// right]`; a degenerate interval is a root that was hit exactly.
///
/// The isolator owns a [`BinomialCache`] that is reused across calls, which
/// is why [`isolate`](Self::isolate) takes `&mut self`.
///
/// ```
/// use realroot::{Poly, RootIsolator, Strategy};
///
/// // (x - 1)(x - 2)(x - 3)
/// let p = Poly::<f64>::from_f64(&[-6.0, 11.0, -6.0, 1.0]).unwrap();
/// let mut isolator = RootIsolator::new(Strategy::Bisection);
/// let intervals = isolator.isolate(&p).unwrap();
/// assert_eq!(intervals.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct RootIsolator<T> {
    cache: BinomialCache<T>,
    strategy: Strategy,
    max_iterations: usize,
}

impl<T: Scalar> Default for RootIsolator<T> {
    fn default() -> Self {
        Self::new(Strategy::default())
    }
}

struct SearchTask<T> {
    poly: Poly<T>,
    mobius: Mobius<T>,
    variations: usize,
}

impl<T: Scalar> RootIsolator<T> {
    /// Creates an isolator using `strategy`.
    pub fn new(strategy: Strategy) -> Self {
        RootIsolator {
            cache: BinomialCache::new(),
            strategy,
            max_iterations: DEFAULT_ISOLATION_ITERATIONS,
        }
    }

    /// Sets the maximum number of search tasks processed per call.
    ///
    /// When the cap is reached, [`isolate`](Self::isolate) returns the
    /// intervals found so far.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// The subdivision strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The maximum number of search tasks processed per call.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Isolates the positive real roots of `poly`.
    ///
    /// The polynomial is made squarefree first, so repeated roots get a
    /// single interval. A root at zero is reported as the degenerate
    /// interval `[0, 0]`. The intervals are in discovery order; they are
    /// pairwise disjoint apart from shared endpoints.
    ///
    /// The zero polynomial gives the single interval `[0, inf)` with either
    /// strategy.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::DivideByZero`](crate::Error::DivideByZero) from
    /// the squarefree computation, which cannot happen for finite inputs.
    pub fn isolate(&mut self, poly: &Poly<T>) -> Result<Vec<Interval<T>>> {
        if poly.coeffs().iter().all(|&c| c > T::zero()) {
            return Ok(Vec::new());
        }
        let squarefree = poly.make_squarefree()?;
        if squarefree.is_zero() {
            // Every point is a root.
            return Ok(alloc::vec![Interval::positive_reals()]);
        }
        let mut found = IsolatingIntervals::default();
        match self.strategy {
            Strategy::Bisection => self.bisection(squarefree, &mut found),
            Strategy::ContinuedFractions => self.continued_fractions(squarefree, &mut found),
        }
        Ok(found.intervals)
    }

    fn continued_fractions(&mut self, poly: Poly<T>, found: &mut IsolatingIntervals<T>) {
        let upper = poly.lmq_upper_bound();
        let mut queue = VecDeque::new();
        queue.push_back(SearchTask {
            variations: poly.sign_variations(),
            poly,
            mobius: Mobius::identity(),
        });

        let mut iterations = 0;
        while let Some(task) = queue.pop_front() {
            if iterations == self.max_iterations {
                self.log_exhausted(found, queue.len() + 1);
                break;
            }
            iterations += 1;
            let SearchTask {
                mut poly,
                mut mobius,
                mut variations,
            } = task;
            if poly.is_zero() {
                found.insert(Interval::positive_reals());
                break;
            }

            let mut changed = false;
            if let Some(lower) = poly.lmq_lower_bound() {
                if lower >= T::one() {
                    poly = poly
                        .scale_input(lower)
                        .taylor_shift_with(&mut self.cache, T::one());
                    mobius = mobius.scale_input(lower).taylor_shift_by_1();
                    changed = true;
                }
            }
            if strip_root_at_zero(&mut poly, &mobius, found) || changed {
                variations = poly.sign_variations();
            }
            match variations {
                0 => continue,
                1 => {
                    found.finish(mobius.positive_domain_image(), upper);
                    continue;
                }
                _ => {}
            }

            // (1, inf)
            let mut right = poly.taylor_shift_with(&mut self.cache, T::one());
            let right_mobius = mobius.taylor_shift_by_1();
            let root_at_one = strip_root_at_zero(&mut right, &right_mobius, found);
            let right_variations = right.sign_variations();
            match right_variations {
                0 => {}
                1 => found.finish(right_mobius.positive_domain_image(), upper),
                _ => queue.push_back(SearchTask {
                    poly: right,
                    mobius: right_mobius,
                    variations: right_variations,
                }),
            }

            // (0, 1)
            let left_variations =
                variations.saturating_sub(right_variations + usize::from(root_at_one));
            log::trace!(
                "split {:?}: {variations} variations, {right_variations} above 1",
                mobius.positive_domain_image(),
            );
            if left_variations == 0 {
                continue;
            }
            let left_mobius = mobius.transformed_for_lower_interval(T::one());
            if left_variations == 1 {
                found.finish(left_mobius.positive_domain_image(), upper);
                continue;
            }
            let mut left = poly.transformed_for_lower_interval_with(&mut self.cache, T::one());
            if root_at_one {
                left = left.divide_by_x();
            }
            queue.push_back(SearchTask {
                poly: left,
                mobius: left_mobius,
                variations: left_variations,
            });
        }
    }

    fn bisection(&mut self, mut poly: Poly<T>, found: &mut IsolatingIntervals<T>) {
        if is_root_at_zero(&poly) {
            found.insert_point(T::zero());
            poly = poly.divide_by_x();
        }
        let Some(upper) = poly.lmq_upper_bound() else {
            return;
        };
        let seed = poly.scale_input(upper);
        let mut queue = VecDeque::new();
        queue.push_back(SearchTask {
            variations: self.unit_interval_variations(&seed),
            poly: seed,
            mobius: Mobius::new(upper, T::zero(), T::zero(), T::one()),
        });

        let half = T::lit(0.5);
        let mut iterations = 0;
        while let Some(task) = queue.pop_front() {
            if iterations == self.max_iterations {
                self.log_exhausted(found, queue.len() + 1);
                break;
            }
            iterations += 1;
            let SearchTask {
                mut poly,
                mobius,
                variations,
            } = task;
            match variations {
                0 => continue,
                1 => {
                    found.finish(mobius.unit_interval_image(), Some(upper));
                    continue;
                }
                _ => {}
            }

            if is_root_at_midpoint(&poly) {
                found.insert_point(mobius.eval(half));
                poly = poly.deflate(half);
            }
            let left = poly.scale_input_reversed(T::lit(2.0));
            let left_mobius = mobius.scale_input(half);
            let right = left.taylor_shift_with(&mut self.cache, T::one());
            let right_mobius = left_mobius.taylor_shift_by_1();
            log::trace!(
                "split {:?}: {variations} variations",
                mobius.unit_interval_image(),
            );
            for (child, child_mobius) in [(left, left_mobius), (right, right_mobius)] {
                let child_variations = self.unit_interval_variations(&child);
                match child_variations {
                    0 => {}
                    1 => found.finish(child_mobius.unit_interval_image(), Some(upper)),
                    _ => queue.push_back(SearchTask {
                        poly: child,
                        mobius: child_mobius,
                        variations: child_variations,
                    }),
                }
            }
        }
    }

    fn unit_interval_variations(&mut self, poly: &Poly<T>) -> usize {
        poly.map_unit_interval_to_positive_reals_with(&mut self.cache)
            .sign_variations()
    }

    fn log_exhausted(&self, found: &IsolatingIntervals<T>, pending: usize) {
        log::debug!(
            "{:?} isolation stopped after {} iterations with {} intervals and {pending} pending tasks",
            self.strategy,
            self.max_iterations,
            found.intervals.len(),
        );
    }
}

/// Whether the constant term is negligible, so that 0 is a root.
fn is_root_at_zero<T: Scalar>(poly: &Poly<T>) -> bool {
    let n = T::from_count(poly.coeffs().len());
    poly.coeffs()[0].abs() <= n * T::epsilon() * poly.magnitude()
}

/// Whether `poly(1/2)` is indistinguishable from zero.
fn is_root_at_midpoint<T: Scalar>(poly: &Poly<T>) -> bool {
    let half = T::lit(0.5);
    let mut scale = T::zero();
    for &c in poly.coeffs().iter().rev() {
        scale = scale * half + c.abs();
    }
    let n = T::from_count(poly.coeffs().len());
    poly.eval_accurate(half).abs() <= n * T::epsilon() * scale
}

/// Records and divides out a root at 0 of a task polynomial.
fn strip_root_at_zero<T: Scalar>(
    poly: &mut Poly<T>,
    mobius: &Mobius<T>,
    found: &mut IsolatingIntervals<T>,
) -> bool {
    if !is_root_at_zero(poly) {
        return false;
    }
    found.insert_point(mobius.eval(T::zero()));
    *poly = poly.divide_by_x();
    true
}

/// The intervals found so far, without duplicates or nested pairs.
struct IsolatingIntervals<T> {
    intervals: Vec<Interval<T>>,
}

impl<T> Default for IsolatingIntervals<T> {
    fn default() -> Self {
        IsolatingIntervals {
            intervals: Vec::new(),
        }
    }
}

impl<T: Scalar> IsolatingIntervals<T> {
    /// Records an interval known to hold a single root.
    ///
    /// An unbounded image is capped at `upper`, the root bound of the
    /// squarefree polynomial.
    fn finish(&mut self, image: Interval<T>, upper: Option<T>) {
        let interval = match upper {
            Some(upper) if image.right().is_infinite() => {
                Interval::new(image.left(), upper).unwrap_or(image)
            }
            _ => image,
        };
        self.insert(interval);
    }

    fn insert_point(&mut self, x: T) {
        if let Ok(point) = Interval::point(x) {
            self.insert(point);
        }
    }

    /// Adds `new` unless it duplicates or contains a recorded interval of
    /// the same kind, dropping recorded intervals that contain it.
    fn insert(&mut self, new: Interval<T>) {
        let degenerate = new.is_degenerate();
        let mut i = 0;
        while i < self.intervals.len() {
            let old = self.intervals[i];
            if old == new {
                return;
            }
            if old.is_degenerate() == degenerate {
                if old.left() > new.left() && old.right() <= new.right() {
                    return;
                }
                if new.left() > old.left() && new.right() <= old.right() {
                    self.intervals.remove(i);
                    continue;
                }
            }
            i += 1;
        }
        self.intervals.push(new);
    }
}
