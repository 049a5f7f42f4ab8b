// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Affine 4x3 transforms: a 3x3 linear block plus a translation row.

use approx::{AbsDiffEq, RelativeEq};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{
    EulerAngles, MathError, Quaternion, Result, RotationMatrix, Vec3,
    SINGULAR_DETERMINANT_EPSILON, UNIT_AXIS_TOLERANCE,
};
use std::ops::{Add, Mul, MulAssign, Sub};

/// One of the three cardinal axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// The lateral axis (+X).
    X,
    /// The vertical axis (+Y).
    Y,
    /// The forward axis (+Z).
    Z,
}

/// A 4x3 affine transform for row vectors.
///
/// The implicit fourth column is `[0, 0, 0, 1]`, so only the 3x3 linear block
/// and the translation row are stored. A point is transformed as
/// `p' = p * M + t`, and `a * b` applies `a` first, then `b`.
///
/// Constructors that take an orientation follow the naming of the frames
/// they connect: [`AffineTransform::local_to_parent`] maps object space into
/// its parent (inertial) space, [`AffineTransform::parent_to_local`] maps the
/// other way.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct AffineTransform {
    /// Row 1, column 1 of the linear block.
    pub m11: f32,
    /// Row 1, column 2 of the linear block.
    pub m12: f32,
    /// Row 1, column 3 of the linear block.
    pub m13: f32,
    /// Row 2, column 1 of the linear block.
    pub m21: f32,
    /// Row 2, column 2 of the linear block.
    pub m22: f32,
    /// Row 2, column 3 of the linear block.
    pub m23: f32,
    /// Row 3, column 1 of the linear block.
    pub m31: f32,
    /// Row 3, column 2 of the linear block.
    pub m32: f32,
    /// Row 3, column 3 of the linear block.
    pub m33: f32,
    /// Translation along X.
    pub tx: f32,
    /// Translation along Y.
    pub ty: f32,
    /// Translation along Z.
    pub tz: f32,
}

impl AffineTransform {
    /// The identity transform, which results in no change.
    pub const IDENTITY: Self = Self::from_rows(Vec3::X, Vec3::Y, Vec3::Z, Vec3::ZERO);

    // --- CONSTRUCTORS ---

    /// Creates a transform from the three rows of its linear block and its
    /// translation.
    #[inline]
    pub const fn from_rows(r1: Vec3, r2: Vec3, r3: Vec3, translation: Vec3) -> Self {
        Self {
            m11: r1.x,
            m12: r1.y,
            m13: r1.z,
            m21: r2.x,
            m22: r2.y,
            m23: r2.z,
            m31: r3.x,
            m32: r3.y,
            m33: r3.z,
            tx: translation.x,
            ty: translation.y,
            tz: translation.z,
        }
    }

    /// Creates a pure translation.
    ///
    /// # Arguments
    ///
    /// * `v` - The translation vector to apply
    ///
    /// # Example
    ///
    /// ```rust
    /// use orient_core::math::{AffineTransform, Vec3};
    ///
    /// let transform = AffineTransform::from_translation(Vec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(transform.translation(), Vec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(Vec3::ONE * transform, Vec3::new(2.0, 3.0, 4.0));
    /// ```
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        Self::IDENTITY.with_translation(v)
    }

    /// Builds the object-to-parent transform of an object placed at
    /// `position` with the given orientation.
    ///
    /// Points are rotated from object space into inertial space, then moved
    /// by `position`.
    pub fn local_to_parent(position: Vec3, orientation: &EulerAngles) -> Self {
        Self::from_euler(orientation).with_translation(position)
    }

    /// Builds the parent-to-object transform of an object placed at
    /// `position` with the given orientation.
    ///
    /// This is the inverse of [`AffineTransform::local_to_parent`]: points
    /// are moved by `-position`, then rotated from inertial space into object
    /// space.
    pub fn parent_to_local(position: Vec3, orientation: &EulerAngles) -> Self {
        let mut m = Self::from(RotationMatrix::from_euler(orientation));
        m.tx = -(position.x * m.m11 + position.y * m.m21 + position.z * m.m31);
        m.ty = -(position.x * m.m12 + position.y * m.m22 + position.z * m.m32);
        m.tz = -(position.x * m.m13 + position.y * m.m23 + position.z * m.m33);
        m
    }

    /// Builds the object-to-inertial rotation of an orientation, with no
    /// translation.
    ///
    /// The result equals
    /// `from_axis_rotation(Z, bank) * from_axis_rotation(X, pitch) * from_axis_rotation(Y, heading)`.
    pub fn from_euler(orientation: &EulerAngles) -> Self {
        let (sh, ch) = orientation.heading.sin_cos();
        let (sp, cp) = orientation.pitch.sin_cos();
        let (sb, cb) = orientation.bank.sin_cos();

        Self {
            m11: ch * cb + sh * sp * sb,
            m12: sb * cp,
            m13: -sh * cb + ch * sp * sb,

            m21: -ch * sb + sh * sp * cb,
            m22: cb * cp,
            m23: sb * sh + ch * sp * cb,

            m31: sh * cp,
            m32: -sp,
            m33: ch * cp,

            tx: 0.0,
            ty: 0.0,
            tz: 0.0,
        }
    }

    /// Creates a rotation of `theta` radians about a cardinal axis.
    ///
    /// Looking along the positive axis towards the origin, a positive angle
    /// is a clockwise rotation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use orient_core::math::{AffineTransform, Axis, Vec3, FRAC_PI_2};
    ///
    /// let m = AffineTransform::from_axis_rotation(Axis::Y, FRAC_PI_2);
    /// let v = Vec3::Z * m;
    /// assert!((v.x - 1.0).abs() < 1e-6);
    /// ```
    pub fn from_axis_rotation(axis: Axis, theta: f32) -> Self {
        let (s, c) = theta.sin_cos();
        let (r1, r2, r3) = match axis {
            Axis::X => (
                Vec3::X,
                Vec3::new(0.0, c, s),
                Vec3::new(0.0, -s, c),
            ),
            Axis::Y => (
                Vec3::new(c, 0.0, -s),
                Vec3::Y,
                Vec3::new(s, 0.0, c),
            ),
            Axis::Z => (
                Vec3::new(c, s, 0.0),
                Vec3::new(-s, c, 0.0),
                Vec3::Z,
            ),
        };
        Self::from_rows(r1, r2, r3, Vec3::ZERO)
    }

    /// Creates a rotation of `theta` radians about an arbitrary axis through
    /// the origin.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidAxis`] if `axis` is not unit length
    /// (within [`UNIT_AXIS_TOLERANCE`] on its squared length).
    pub fn from_axis_angle(axis: Vec3, theta: f32) -> Result<Self> {
        let length_squared = axis.length_squared();
        if (length_squared - 1.0).abs() >= UNIT_AXIS_TOLERANCE {
            let length = length_squared.sqrt();
            log::warn!("Rejected non-unit rotation axis {axis:?} (length {length})");
            return Err(MathError::InvalidAxis { length });
        }

        let (s, c) = theta.sin_cos();
        let a = 1.0 - c;
        let (ax, ay, az) = (a * axis.x, a * axis.y, a * axis.z);

        Ok(Self {
            m11: ax * axis.x + c,
            m12: ax * axis.y + axis.z * s,
            m13: ax * axis.z - axis.y * s,

            m21: ay * axis.x - axis.z * s,
            m22: ay * axis.y + c,
            m23: ay * axis.z + axis.x * s,

            m31: az * axis.x + axis.y * s,
            m32: az * axis.y - axis.x * s,
            m33: az * axis.z + c,

            tx: 0.0,
            ty: 0.0,
            tz: 0.0,
        })
    }

    /// Creates the rotation performed by an object-to-inertial quaternion.
    ///
    /// For every vector `v`, `v * AffineTransform::from_quat(&q)` equals
    /// `q.rotate_vec3(v)`.
    pub fn from_quat(q: &Quaternion) -> Self {
        let (w, x, y, z) = (q.w, q.x, q.y, q.z);

        Self {
            m11: 1.0 - 2.0 * (y * y + z * z),
            m12: 2.0 * (x * y + w * z),
            m13: 2.0 * (x * z - w * y),

            m21: 2.0 * (x * y - w * z),
            m22: 1.0 - 2.0 * (x * x + z * z),
            m23: 2.0 * (y * z + w * x),

            m31: 2.0 * (x * z + w * y),
            m32: 2.0 * (y * z - w * x),
            m33: 1.0 - 2.0 * (x * x + y * y),

            tx: 0.0,
            ty: 0.0,
            tz: 0.0,
        }
    }

    // --- TRANSLATION ---

    /// Returns the translation row.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.tx, self.ty, self.tz)
    }

    /// Replaces the translation row, keeping the linear block.
    #[inline]
    pub fn set_translation(&mut self, v: Vec3) {
        self.tx = v.x;
        self.ty = v.y;
        self.tz = v.z;
    }

    /// Returns a copy with the translation row replaced.
    #[inline]
    pub fn with_translation(mut self, v: Vec3) -> Self {
        self.set_translation(v);
        self
    }

    /// Clears the translation row, keeping the linear block.
    #[inline]
    pub fn zero_translation(&mut self) {
        self.set_translation(Vec3::ZERO);
    }

    /// Recovers the object position from a parent-to-local transform.
    ///
    /// Assumes the linear block is a rotation.
    pub fn position_from_parent_to_local(&self) -> Vec3 {
        -Vec3::new(
            self.tx * self.m11 + self.ty * self.m12 + self.tz * self.m13,
            self.tx * self.m21 + self.ty * self.m22 + self.tz * self.m23,
            self.tx * self.m31 + self.ty * self.m32 + self.tz * self.m33,
        )
    }

    /// Recovers the object position from a local-to-parent transform.
    #[inline]
    pub fn position_from_local_to_parent(&self) -> Vec3 {
        self.translation()
    }

    // --- LINEAR BLOCK ---

    /// Copies a rotation matrix into the linear block as-is, keeping the
    /// translation.
    pub fn set_rotation_block(&mut self, m: &RotationMatrix) {
        self.m11 = m.m11;
        self.m12 = m.m12;
        self.m13 = m.m13;
        self.m21 = m.m21;
        self.m22 = m.m22;
        self.m23 = m.m23;
        self.m31 = m.m31;
        self.m32 = m.m32;
        self.m33 = m.m33;
    }

    /// Returns the linear block, without any orthonormality check.
    pub fn rotation_block(&self) -> RotationMatrix {
        RotationMatrix::from_rows(
            Vec3::new(self.m11, self.m12, self.m13),
            Vec3::new(self.m21, self.m22, self.m23),
            Vec3::new(self.m31, self.m32, self.m33),
        )
    }

    /// Computes the determinant of the linear block.
    pub fn determinant(&self) -> f32 {
        self.m11 * (self.m22 * self.m33 - self.m23 * self.m32)
            + self.m12 * (self.m23 * self.m31 - self.m21 * self.m33)
            + self.m13 * (self.m21 * self.m32 - self.m22 * self.m31)
    }

    /// Computes the inverse transform.
    ///
    /// The linear block is inverted through its adjugate, then the
    /// translation is carried through the inverted block.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::SingularMatrix`] if the determinant is within
    /// [`SINGULAR_DETERMINANT_EPSILON`] of zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use orient_core::math::{AffineTransform, Vec3};
    ///
    /// let transform = AffineTransform::from_translation(Vec3::new(1.0, 2.0, 3.0));
    /// let inverse = transform.inverse().unwrap();
    /// assert_eq!(inverse.translation(), Vec3::new(-1.0, -2.0, -3.0));
    /// ```
    pub fn inverse(&self) -> Result<Self> {
        let determinant = self.determinant();
        if determinant.abs() <= SINGULAR_DETERMINANT_EPSILON {
            log::warn!("Cannot invert singular transform (determinant {determinant})");
            return Err(MathError::SingularMatrix { determinant });
        }

        let inv_det = 1.0 / determinant;
        let mut r = Self {
            m11: (self.m22 * self.m33 - self.m23 * self.m32) * inv_det,
            m12: (self.m13 * self.m32 - self.m12 * self.m33) * inv_det,
            m13: (self.m12 * self.m23 - self.m13 * self.m22) * inv_det,

            m21: (self.m23 * self.m31 - self.m21 * self.m33) * inv_det,
            m22: (self.m11 * self.m33 - self.m13 * self.m31) * inv_det,
            m23: (self.m13 * self.m21 - self.m11 * self.m23) * inv_det,

            m31: (self.m21 * self.m32 - self.m22 * self.m31) * inv_det,
            m32: (self.m12 * self.m31 - self.m11 * self.m32) * inv_det,
            m33: (self.m11 * self.m22 - self.m12 * self.m21) * inv_det,

            tx: 0.0,
            ty: 0.0,
            tz: 0.0,
        };

        r.tx = -(self.tx * r.m11 + self.ty * r.m21 + self.tz * r.m31);
        r.ty = -(self.tx * r.m12 + self.ty * r.m22 + self.tz * r.m32);
        r.tz = -(self.tx * r.m13 + self.ty * r.m23 + self.tz * r.m33);

        Ok(r)
    }

    /// Transforms a point: `p * M + t`.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3 {
            x: p.x * self.m11 + p.y * self.m21 + p.z * self.m31 + self.tx,
            y: p.x * self.m12 + p.y * self.m22 + p.z * self.m32 + self.ty,
            z: p.x * self.m13 + p.y * self.m23 + p.z * self.m33 + self.tz,
        }
    }
}

// --- Operator Overloads ---

impl Default for AffineTransform {
    /// Returns the identity `AffineTransform`.
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<RotationMatrix> for AffineTransform {
    /// Uses the rotation matrix as the linear block, with no translation.
    #[inline]
    fn from(m: RotationMatrix) -> Self {
        let mut transform = Self::IDENTITY;
        transform.set_rotation_block(&m);
        transform
    }
}

impl Mul<AffineTransform> for AffineTransform {
    type Output = Self;
    /// Concatenates two transforms: `a * b` applies `a` first, then `b`.
    fn mul(self, rhs: Self) -> Self::Output {
        let a = self;
        let b = rhs;
        Self {
            m11: a.m11 * b.m11 + a.m12 * b.m21 + a.m13 * b.m31,
            m12: a.m11 * b.m12 + a.m12 * b.m22 + a.m13 * b.m32,
            m13: a.m11 * b.m13 + a.m12 * b.m23 + a.m13 * b.m33,

            m21: a.m21 * b.m11 + a.m22 * b.m21 + a.m23 * b.m31,
            m22: a.m21 * b.m12 + a.m22 * b.m22 + a.m23 * b.m32,
            m23: a.m21 * b.m13 + a.m22 * b.m23 + a.m23 * b.m33,

            m31: a.m31 * b.m11 + a.m32 * b.m21 + a.m33 * b.m31,
            m32: a.m31 * b.m12 + a.m32 * b.m22 + a.m33 * b.m32,
            m33: a.m31 * b.m13 + a.m32 * b.m23 + a.m33 * b.m33,

            tx: a.tx * b.m11 + a.ty * b.m21 + a.tz * b.m31 + b.tx,
            ty: a.tx * b.m12 + a.ty * b.m22 + a.tz * b.m32 + b.ty,
            tz: a.tx * b.m13 + a.ty * b.m23 + a.tz * b.m33 + b.tz,
        }
    }
}

impl MulAssign<AffineTransform> for AffineTransform {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<f32> for AffineTransform {
    type Output = Self;
    /// Scales every element, translation included.
    fn mul(self, scalar: f32) -> Self::Output {
        let mut r = self;
        bytemuck::cast_mut::<_, [f32; 12]>(&mut r)
            .iter_mut()
            .for_each(|e| *e *= scalar);
        r
    }
}

impl Add<AffineTransform> for AffineTransform {
    type Output = Self;
    /// Adds element-wise, translation included.
    fn add(self, rhs: Self) -> Self::Output {
        let mut r = self;
        bytemuck::cast_mut::<_, [f32; 12]>(&mut r)
            .iter_mut()
            .zip(bytemuck::cast_ref::<_, [f32; 12]>(&rhs))
            .for_each(|(e, o)| *e += o);
        r
    }
}

impl Sub<AffineTransform> for AffineTransform {
    type Output = Self;
    /// Subtracts element-wise, translation included.
    fn sub(self, rhs: Self) -> Self::Output {
        let mut r = self;
        bytemuck::cast_mut::<_, [f32; 12]>(&mut r)
            .iter_mut()
            .zip(bytemuck::cast_ref::<_, [f32; 12]>(&rhs))
            .for_each(|(e, o)| *e -= o);
        r
    }
}

impl Mul<AffineTransform> for Vec3 {
    type Output = Vec3;
    /// Transforms the vector as a point.
    #[inline]
    fn mul(self, rhs: AffineTransform) -> Self::Output {
        rhs.transform_point(self)
    }
}

impl MulAssign<AffineTransform> for Vec3 {
    #[inline]
    fn mul_assign(&mut self, rhs: AffineTransform) {
        *self = rhs.transform_point(*self);
    }
}

// --- Approximate Comparison ---

impl AbsDiffEq for AffineTransform {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        bytemuck::cast_ref::<_, [f32; 12]>(self)
            .iter()
            .zip(bytemuck::cast_ref::<_, [f32; 12]>(other))
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for AffineTransform {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        bytemuck::cast_ref::<_, [f32; 12]>(self)
            .iter()
            .zip(bytemuck::cast_ref::<_, [f32; 12]>(other))
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EPSILON, FRAC_PI_2, FRAC_PI_4};
    use approx::assert_relative_eq;

    fn sample_transform() -> AffineTransform {
        AffineTransform::local_to_parent(
            Vec3::new(3.0, -1.5, 8.0),
            &EulerAngles::new(0.6, 0.25, -1.3),
        )
    }

    #[test]
    fn test_identity() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(AffineTransform::default(), AffineTransform::IDENTITY);
        assert_eq!(p * AffineTransform::IDENTITY, p);
        assert_eq!(AffineTransform::IDENTITY.determinant(), 1.0);
    }

    #[test]
    fn test_translation_helpers() {
        let mut m = AffineTransform::from_axis_rotation(Axis::X, 0.4);
        let block = m.rotation_block();

        m.set_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.translation(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.position_from_local_to_parent(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.rotation_block(), block);

        m.zero_translation();
        assert_eq!(m.translation(), Vec3::ZERO);
        assert_eq!(m.rotation_block(), block);
    }

    #[test]
    fn test_set_rotation_block_keeps_translation() {
        let mut m = AffineTransform::from_translation(Vec3::new(4.0, 5.0, 6.0));
        let r = RotationMatrix::from_euler(&EulerAngles::new(0.3, 0.2, 0.1));
        m.set_rotation_block(&r);

        assert_eq!(m.rotation_block(), r);
        assert_eq!(m.translation(), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(AffineTransform::from(r).rotation_block(), r);
        assert_eq!(AffineTransform::from(r).translation(), Vec3::ZERO);
    }

    #[test]
    fn test_from_euler_is_bank_pitch_heading() {
        let e = EulerAngles::new(0.6, 0.25, -1.3);
        let composed = AffineTransform::from_axis_rotation(Axis::Z, e.bank)
            * AffineTransform::from_axis_rotation(Axis::X, e.pitch)
            * AffineTransform::from_axis_rotation(Axis::Y, e.heading);
        assert_relative_eq!(AffineTransform::from_euler(&e), composed, epsilon = EPSILON);
    }

    #[test]
    fn test_from_euler_matches_quaternion() {
        let e = EulerAngles::new(-2.0, 0.9, 0.35);
        let q = Quaternion::from_object_to_inertial_euler(&e);
        assert_relative_eq!(AffineTransform::from_quat(&q), AffineTransform::from_euler(&e), epsilon = EPSILON);
    }

    #[test]
    fn test_axis_rotation_directions() {
        let y = AffineTransform::from_axis_rotation(Axis::Y, FRAC_PI_2);
        assert_relative_eq!(Vec3::X * y, -Vec3::Z, epsilon = EPSILON);

        let x = AffineTransform::from_axis_rotation(Axis::X, FRAC_PI_2);
        assert_relative_eq!(Vec3::Y * x, Vec3::Z, epsilon = EPSILON);

        let z = AffineTransform::from_axis_rotation(Axis::Z, FRAC_PI_2);
        assert_relative_eq!(Vec3::X * z, Vec3::Y, epsilon = EPSILON);
    }

    #[test]
    fn test_axis_angle_matches_cardinal_axes() {
        let theta = 1.234;
        for (axis, v) in [(Axis::X, Vec3::X), (Axis::Y, Vec3::Y), (Axis::Z, Vec3::Z)] {
            assert_relative_eq!(
                AffineTransform::from_axis_angle(v, theta).unwrap(),
                AffineTransform::from_axis_rotation(axis, theta),
                epsilon = EPSILON
            );
        }
    }

    #[test]
    fn test_axis_angle_matches_quaternion() {
        let axis = Vec3::new(2.0, -1.0, 0.5).normalize();
        let theta = -0.8;
        let q = Quaternion::from_axis_angle(axis, theta).unwrap();
        assert_relative_eq!(
            AffineTransform::from_axis_angle(axis, theta).unwrap(),
            AffineTransform::from_quat(&q),
            epsilon = EPSILON
        );

        // The axis itself is left in place.
        assert_relative_eq!(axis * AffineTransform::from_axis_angle(axis, theta).unwrap(), axis, epsilon = EPSILON);
    }

    #[test]
    fn test_axis_angle_rejects_non_unit_axis() {
        assert_eq!(
            AffineTransform::from_axis_angle(Vec3::new(0.0, 0.0, 2.0), 1.0),
            Err(MathError::InvalidAxis { length: 2.0 })
        );
    }

    #[test]
    fn test_from_quat_composition() {
        let a = Quaternion::from_axis_angle(Vec3::new(0.0, 0.6, 0.8), 0.7).unwrap();
        let b = Quaternion::from_rotation_x(-1.1);
        assert_relative_eq!(
            AffineTransform::from_quat(&(a * b)),
            AffineTransform::from_quat(&a) * AffineTransform::from_quat(&b),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_from_quat_rotates_like_quaternion() {
        let q = Quaternion::from_axis_angle(Vec3::new(0.0, 0.6, 0.8), 2.4).unwrap();
        let v = Vec3::new(1.0, -2.0, 0.5);
        assert_relative_eq!(v * AffineTransform::from_quat(&q), q.rotate_vec3(v), epsilon = EPSILON);
    }

    #[test]
    fn test_local_to_parent_places_origin() {
        let position = Vec3::new(3.0, -1.5, 8.0);
        let e = EulerAngles::new(FRAC_PI_4, 0.0, 0.0);
        let m = AffineTransform::local_to_parent(position, &e);

        assert_eq!(Vec3::ZERO * m, position);
        assert_relative_eq!(
            Vec3::X * m,
            position + Vec3::new(FRAC_PI_4.cos(), 0.0, -FRAC_PI_4.sin()),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_parent_to_local_inverts_local_to_parent() {
        let position = Vec3::new(3.0, -1.5, 8.0);
        let e = EulerAngles::new(0.6, 0.25, -1.3);
        let to_parent = AffineTransform::local_to_parent(position, &e);
        let to_local = AffineTransform::parent_to_local(position, &e);

        assert_relative_eq!(to_parent * to_local, AffineTransform::IDENTITY, epsilon = EPSILON);
        assert_relative_eq!(to_local * to_parent, AffineTransform::IDENTITY, epsilon = EPSILON);
        assert_relative_eq!(position * to_local, Vec3::ZERO, epsilon = EPSILON);
        assert_relative_eq!(to_parent.inverse().unwrap(), to_local, epsilon = EPSILON);
    }

    #[test]
    fn test_position_recovery() {
        let position = Vec3::new(-7.0, 0.5, 2.25);
        let e = EulerAngles::new(1.1, -0.4, 0.3);

        let to_local = AffineTransform::parent_to_local(position, &e);
        assert_relative_eq!(to_local.position_from_parent_to_local(), position, epsilon = 1e-5);

        let to_parent = AffineTransform::local_to_parent(position, &e);
        assert_eq!(to_parent.position_from_local_to_parent(), position);
    }

    #[test]
    fn test_inverse() {
        let m = AffineTransform::from_rows(
            Vec3::new(2.0, 0.0, 1.0),
            Vec3::new(0.5, 3.0, 0.0),
            Vec3::new(0.0, -1.0, 1.5),
            Vec3::new(4.0, -2.0, 7.0),
        );
        let inv = m.inverse().unwrap();

        assert_relative_eq!(inv * m, AffineTransform::IDENTITY, epsilon = EPSILON);
        assert_relative_eq!(m * inv, AffineTransform::IDENTITY, epsilon = EPSILON);
        assert_relative_eq!(inv.determinant(), 1.0 / m.determinant(), epsilon = EPSILON);

        let p = Vec3::new(1.0, 1.0, -3.0);
        assert_relative_eq!((p * m) * inv, p, epsilon = 1e-4);
    }

    #[test]
    fn test_inverse_of_singular_matrix_fails() {
        let m = AffineTransform::from_rows(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(2.0, 4.0, 6.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::ONE,
        );
        assert_eq!(m.determinant(), 0.0);
        assert_eq!(
            m.inverse(),
            Err(MathError::SingularMatrix { determinant: 0.0 })
        );
    }

    #[test]
    fn test_composition_is_associative() {
        let a = sample_transform();
        let b = AffineTransform::from_axis_rotation(Axis::Z, 0.7).with_translation(Vec3::new(1.0, 0.0, -2.0));
        let c = AffineTransform::parent_to_local(Vec3::new(0.0, 5.0, 1.0), &EulerAngles::new(-0.2, 1.0, 0.4));
        assert_relative_eq!((a * b) * c, a * (b * c), epsilon = 1e-4);

        let p = Vec3::new(0.3, 0.2, 0.1);
        assert_relative_eq!(p * (a * b), (p * a) * b, epsilon = 1e-4);

        let mut accumulated = a;
        accumulated *= b;
        assert_eq!(accumulated, a * b);
    }

    #[test]
    fn test_composition_is_not_commutative() {
        let a = AffineTransform::from_axis_rotation(Axis::Y, 0.5);
        let b = AffineTransform::from_translation(Vec3::X);
        assert_ne!(a * b, b * a);
    }

    #[test]
    fn test_element_wise_arithmetic() {
        let a = sample_transform();
        let b = AffineTransform::from_translation(Vec3::new(1.0, 2.0, 3.0));

        assert_relative_eq!((a + b) - b, a, epsilon = EPSILON);
        assert_relative_eq!(a * 2.0, a + a, epsilon = EPSILON);
        assert_eq!((b * 2.0).translation(), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!((b * 2.0).m11, 2.0);
    }

    #[test]
    fn test_point_mul_assign() {
        let m = sample_transform();
        let mut p = Vec3::new(1.0, 2.0, 3.0);
        let expected = p * m;
        p *= m;
        assert_eq!(p, expected);
    }
}
