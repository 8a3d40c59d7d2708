// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Real-root isolation and refinement for univariate polynomials.
//!
//! The realroot library finds the positive real roots of polynomials with
//! floating-point coefficients. A polynomial is first made squarefree, then
//! its roots are separated into isolating intervals using Descartes' rule of
//! signs (either by continued fractions or by bisection), and finally each
//! interval is shrunk to the requested precision by bisection or by the
//! [ITP method].
//!
//! # Examples
//!
//! Finding the roots of `(x - 1)(x - 2)(x - 3)`:
//! ```
//! use realroot::{find_all_roots, Poly};
//!
//! let p = Poly::<f64>::from_f64(&[-6.0, 11.0, -6.0, 1.0]).unwrap();
//! let roots = find_all_roots(&p, 1e-9).unwrap();
//! assert_eq!(roots.len(), 3);
//! for (root, expected) in roots.iter().zip([1.0, 2.0, 3.0]) {
//!     assert!((root - expected).abs() < 1e-8);
//! }
//! ```
//!
//! Repeated roots are collapsed, and the bounds used to size the search are
//! available on their own:
//! ```
//! use realroot::{find_all_roots, Poly};
//!
//! // (x - 1)^2 (x - 2)
//! let p = Poly::from_f64(&[-2.0, 5.0, -4.0, 1.0]).unwrap();
//! assert_eq!(find_all_roots(&p, 1e-6).unwrap().len(), 2);
//!
//! let q = Poly::from_f64(&[-6.0, 11.0, -6.0, 1.0]).unwrap();
//! assert_eq!(q.lmq_upper_bound(), Some(12.0));
//! ```
//!
//! The [`velocity`] module builds a minimum-initial-velocity solver for
//! targeting problems on top of the root finder.
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate (through
//! `num-traits`) for math functionality. The `std` feature is enabled by
//! default, but can be disabled, as long as the `libm` feature is enabled.
//! This is useful for `no_std` environments. This crate still uses the
//! `alloc` crate regardless.
//!
//! [ITP method]: https://en.wikipedia.org/wiki/ITP_Method
//! [`libm`]: https://docs.rs/libm

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    reason = "numeric code with textbook variable names and literal constants"
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("realroot requires either the `std` or `libm` feature");

extern crate alloc;

mod binomial;
mod bounds;
mod error;
mod interval;
mod isolate;
mod laurent;
mod mobius;
mod poly;
mod refine;
mod roots;
mod scalar;
mod vec2;
pub mod velocity;

#[cfg(test)]
mod arbitrary;

pub use crate::binomial::*;
pub use crate::bounds::*;
pub use crate::error::*;
pub use crate::interval::*;
pub use crate::isolate::*;
pub use crate::laurent::*;
pub use crate::mobius::*;
pub use crate::poly::*;
pub use crate::refine::*;
pub use crate::roots::*;
pub use crate::scalar::*;
pub use crate::vec2::*;

/// Whether `x` and `y` lie strictly on opposite sides of zero.
#[inline]
fn different_signs<T: Scalar>(x: T, y: T) -> bool {
    (x < T::zero() && y > T::zero()) || (x > T::zero() && y < T::zero())
}
