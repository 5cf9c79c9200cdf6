//! Small value types shared across the engine
//!
//! This module provides a minimal 3D vector plus an RGB color type.
//! Both are plain `Copy` structs with inline arithmetic; the engine
//! deliberately avoids pulling in a linear-algebra crate for what
//! amounts to a handful of component-wise operations.

use serde::{Deserialize, Serialize};

/// Simple 3D vector in simulation space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
    #[inline]
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
    #[inline]
    pub fn add(&self, other: Vec3) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
    #[inline]
    pub fn sub(&self, other: Vec3) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
    #[inline]
    pub fn scale(&self, f: f32) -> Self {
        Self::new(self.x * f, self.y * f, self.z * f)
    }
    #[inline]
    pub fn length_sq(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_sq().sqrt()
    }
    #[inline]
    pub fn distance_sq(&self, other: Vec3) -> f32 {
        self.sub(other).length_sq()
    }
    #[inline]
    pub fn distance(&self, other: Vec3) -> f32 {
        self.distance_sq(other).sqrt()
    }
    /// Midpoint between two points.
    #[inline]
    pub fn midpoint(&self, other: Vec3) -> Self {
        self.add(other).scale(0.5)
    }
    #[inline]
    pub fn lerp(&self, other: Vec3, t: f32) -> Self {
        self.add(other.sub(*self).scale(t))
    }
}

/// Linear RGB color with components in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
    #[inline]
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
    #[inline]
    pub fn lerp(&self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Convert from HSV (hue in [0, 1), full wrap-around) to RGB.
    ///
    /// Used for the randomized solid-object hue; saturation and value
    /// are usually fixed so spawned objects stay in one palette family.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let h = h.rem_euclid(1.0) * 6.0;
        let i = h.floor();
        let f = h - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match i as u32 % 6 {
            0 => Self::new(v, t, p),
            1 => Self::new(q, v, p),
            2 => Self::new(p, v, t),
            3 => Self::new(p, q, v),
            4 => Self::new(t, p, v),
            _ => Self::new(v, p, q),
        }
    }
}
