//! Geometry types shared by the layout and motion code
//!
//! Everything is expressed in virtual pixels. Three-component types are
//! indexable by axis (`0` = horizontal, `1` = vertical, `2` = depth) so that
//! per-axis loops read the same way for every dimension.

use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::axis::Axis;

// ─────────────────────────────────────────────────────────────────────────────
// Vectors
// ─────────────────────────────────────────────────────────────────────────────

/// 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(v: [f32; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<Vec2> for [f32; 2] {
    fn from(v: Vec2) -> Self {
        [v.x, v.y]
    }
}

impl Index<usize> for Vec2 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vec2 index out of range: {index}"),
        }
    }
}

/// 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    pub const INFINITY: Vec3 = Vec3 {
        x: f32::INFINITY,
        y: f32::INFINITY,
        z: f32::INFINITY,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Vector with `value` on `axis` and zero elsewhere
    pub fn along(axis: Axis, value: f32) -> Self {
        let mut v = Self::ZERO;
        v[axis] = value;
        v
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn dot(&self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Component-wise maximum
    pub fn max(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    /// Component-wise minimum
    pub fn min(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl Index<usize> for Vec3 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 index out of range: {index}"),
        }
    }
}

impl Index<Axis> for Vec3 {
    type Output = f32;

    fn index(&self, axis: Axis) -> &f32 {
        &self[axis.index()]
    }
}

impl IndexMut<Axis> for Vec3 {
    fn index_mut(&mut self, axis: Axis) -> &mut f32 {
        &mut self[axis.index()]
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Thickness
// ─────────────────────────────────────────────────────────────────────────────

/// Margins or padding around a 3D box
///
/// Leading sides are `left`, `top` and `front`; trailing sides are `right`,
/// `bottom` and `back`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thickness {
    pub left: f32,
    pub top: f32,
    pub front: f32,
    pub right: f32,
    pub bottom: f32,
    pub back: f32,
}

impl Thickness {
    pub const ZERO: Thickness = Thickness {
        left: 0.0,
        top: 0.0,
        front: 0.0,
        right: 0.0,
        bottom: 0.0,
        back: 0.0,
    };

    /// Same thickness on the four 2D sides, none in depth
    pub const fn uniform(v: f32) -> Self {
        Self {
            left: v,
            top: v,
            front: 0.0,
            right: v,
            bottom: v,
            back: 0.0,
        }
    }

    pub const fn new(left: f32, top: f32, front: f32, right: f32, bottom: f32, back: f32) -> Self {
        Self {
            left,
            top,
            front,
            right,
            bottom,
            back,
        }
    }

    /// The left/top/front corner
    pub fn leading(&self) -> Vec3 {
        Vec3::new(self.left, self.top, self.front)
    }

    /// The right/bottom/back corner
    pub fn trailing(&self) -> Vec3 {
        Vec3::new(self.right, self.bottom, self.back)
    }

    /// Total thickness per axis
    pub fn size(&self) -> Vec3 {
        self.leading() + self.trailing()
    }

    /// `size` grown by this thickness
    pub fn inflate(&self, size: Vec3) -> Vec3 {
        size + self.size()
    }

    /// `size` shrunk by this thickness, never below zero
    pub fn deflate(&self, size: Vec3) -> Vec3 {
        (size - self.size()).max(Vec3::ZERO)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color (linear space)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array(c: [f32; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }

    /// Every channel multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self::rgba(
            self.r * factor,
            self.g * factor,
            self.b * factor,
            self.a * factor,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::from_array(c)
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transform
// ─────────────────────────────────────────────────────────────────────────────

/// 4x4 transformation matrix (column-major)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn translation(v: Vec3) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [v.x, v.y, v.z, 1.0],
            ],
        }
    }

    /// The translation part of the matrix
    pub fn translation_vector(&self) -> Vec3 {
        Vec3::new(self.cols[3][0], self.cols[3][1], self.cols[3][2])
    }

    /// Copy of the matrix with its translation moved by `delta`
    pub fn translated(&self, delta: Vec3) -> Self {
        let mut m = *self;
        m.cols[3][0] += delta.x;
        m.cols[3][1] += delta.y;
        m.cols[3][2] += delta.z;
        m
    }

    /// Multiply two matrices
    pub fn mul(&self, other: &Mat4) -> Mat4 {
        let mut result = [[0.0f32; 4]; 4];
        for (i, col) in result.iter_mut().enumerate() {
            for (j, cell) in col.iter_mut().enumerate() {
                for k in 0..4 {
                    *cell += self.cols[k][j] * other.cols[i][k];
                }
            }
        }
        Mat4 { cols: result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thickness_inflate_deflate() {
        let padding = Thickness::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(padding.size(), Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(padding.inflate(Vec3::ZERO), Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(
            padding.deflate(Vec3::new(10.0, 5.0, 100.0)),
            Vec3::new(5.0, 0.0, 91.0)
        );
    }

    #[test]
    fn test_infinite_size_stays_infinite_after_deflate() {
        let padding = Thickness::uniform(8.0);
        let size = padding.deflate(Vec3::new(f32::INFINITY, 50.0, 0.0));
        assert!(size.x.is_infinite());
        assert_eq!(size.y, 34.0);
    }

    #[test]
    fn test_vec3_axis_indexing() {
        let mut v = Vec3::ZERO;
        v[Axis::Depth] = 3.0;
        v[1] = 2.0;
        assert_eq!(v, Vec3::new(0.0, 2.0, 3.0));
        assert_eq!(Vec3::along(Axis::Horizontal, 5.0), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_mat4_translation_compose() {
        let a = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        let b = Mat4::translation(Vec3::new(10.0, 0.0, 0.0));
        let c = a.mul(&b);
        assert_eq!(c.translation_vector(), Vec3::new(11.0, 2.0, 3.0));
        assert_eq!(
            a.translated(Vec3::ONE).translation_vector(),
            Vec3::new(2.0, 3.0, 4.0)
        );
    }

    #[test]
    fn test_vec3_serde_as_array() {
        let v: Vec3 = serde_json::from_str("[1.0, -2.5, 0.0]").unwrap();
        assert_eq!(v, Vec3::new(1.0, -2.5, 0.0));
    }
}
