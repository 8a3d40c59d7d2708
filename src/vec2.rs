// Copyright 2025 the Realroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A plane vector for the velocity solver.

use core::ops::{Add, Mul, Sub};

use num_traits::Float;

use crate::velocity::VectorSpace;

/// A 2D vector of `f64` components, for targeting problems in the plane.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Vec2 {
    /// The x component.
    pub x: f64,
    /// The y component.
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2::new(0., 0.);

    /// Creates a vector from its components.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Vec2 {
        Vec2 { x, y }
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length.
    #[inline]
    pub fn hypot(self) -> f64 {
        Float::hypot(self.x, self.y)
    }

    /// Squared length, without the square root.
    #[inline]
    pub fn hypot2(self) -> f64 {
        self.dot(self)
    }
}

impl VectorSpace for Vec2 {
    type Scalar = f64;

    #[inline]
    fn zero() -> Self {
        Vec2::ZERO
    }

    #[inline]
    fn add(self, other: Self) -> Self {
        self + other
    }

    #[inline]
    fn sub(self, other: Self) -> Self {
        self - other
    }

    #[inline]
    fn scale(self, factor: f64) -> Self {
        self * factor
    }

    #[inline]
    fn dot(self, other: Self) -> f64 {
        Vec2::dot(self, other)
    }

    #[inline]
    fn magnitude_squared(self) -> f64 {
        self.hypot2()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    #[inline]
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    #[inline]
    fn mul(self, factor: f64) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        v * self
    }
}

#[cfg(feature = "mint")]
impl From<Vec2> for mint::Vector2<f64> {
    #[inline]
    fn from(v: Vec2) -> mint::Vector2<f64> {
        mint::Vector2 { x: v.x, y: v.y }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Vector2<f64>> for Vec2 {
    #[inline]
    fn from(v: mint::Vector2<f64>) -> Vec2 {
        Vec2::new(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::new(-1.0, 2.0);
        assert_eq!(a + b, Vec2::new(2.0, 6.0));
        assert_eq!(a - b, Vec2::new(4.0, 2.0));
        assert_eq!(2.0 * b, b * 2.0);
        assert_eq!(a.hypot(), 5.0);
        assert_eq!(a.hypot2(), 25.0);
    }

    #[test]
    fn vector_space() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::new(-1.0, 2.0);
        assert_eq!(VectorSpace::add(a, b), a + b);
        assert_eq!(VectorSpace::sub(a, b), a - b);
        assert_eq!(a.scale(0.5), Vec2::new(1.5, 2.0));
        assert_eq!(VectorSpace::dot(a, b), 5.0);
        assert_eq!(a.magnitude_squared(), 25.0);
        assert_eq!(<Vec2 as VectorSpace>::zero(), Vec2::ZERO);
    }

    #[cfg(feature = "mint")]
    #[test]
    fn mint_round_trip() {
        let v = Vec2::new(1.5, -2.0);
        let m: mint::Vector2<f64> = v.into();
        assert_eq!(Vec2::from(m), v);
    }
}
