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

//! Provides a Quaternion type for representing 3D rotations.

use approx::{AbsDiffEq, RelativeEq};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{safe_acos, EulerAngles, MathError, Result, Vec3, UNIT_AXIS_TOLERANCE};
use std::ops::{Add, Mul, MulAssign, Neg, Sub};

/// Represents a rotation as a unit quaternion.
///
/// Stored as `(w, x, y, z)`, where `w` is the scalar part and `[x, y, z]` the
/// vector part. A rotation of `theta` about the unit axis `n` is
/// `(cos(theta/2), n * sin(theta/2))`.
///
/// # Double cover
///
/// `q` and `-q` describe the same rotation. The derived `PartialEq` and the
/// `approx` comparisons are component-wise and therefore treat them as
/// different values; use [`Quaternion::is_same_rotation`] to compare
/// rotations. [`Quaternion::slerp`] resolves the ambiguity by always taking
/// the shorter arc.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Quaternion {
    /// The scalar (real) part.
    pub w: f32,
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// The zero quaternion. Not a rotation; this is what a failed
    /// [`Quaternion::normalize`] leaves behind.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new quaternion from its raw components.
    ///
    /// Note: This does not guarantee a unit quaternion.
    #[inline]
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Creates a rotation of `theta` radians about the X axis.
    #[inline]
    pub fn from_rotation_x(theta: f32) -> Self {
        let (s, c) = (theta * 0.5).sin_cos();
        Self::new(c, s, 0.0, 0.0)
    }

    /// Creates a rotation of `theta` radians about the Y axis.
    #[inline]
    pub fn from_rotation_y(theta: f32) -> Self {
        let (s, c) = (theta * 0.5).sin_cos();
        Self::new(c, 0.0, s, 0.0)
    }

    /// Creates a rotation of `theta` radians about the Z axis.
    #[inline]
    pub fn from_rotation_z(theta: f32) -> Self {
        let (s, c) = (theta * 0.5).sin_cos();
        Self::new(c, 0.0, 0.0, s)
    }

    /// Creates a rotation of `theta` radians about an arbitrary axis.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidAxis`] if `axis` is not unit length
    /// (within [`UNIT_AXIS_TOLERANCE`]). The axis is not normalized for the
    /// caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use orient_core::math::{MathError, Quaternion, Vec3, FRAC_PI_2, FRAC_PI_4};
    ///
    /// let q = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2).unwrap();
    /// assert!((q.y - FRAC_PI_4.sin()).abs() < 1e-6);
    ///
    /// let err = Quaternion::from_axis_angle(Vec3::new(0.0, 2.0, 0.0), 1.0).unwrap_err();
    /// assert_eq!(err, MathError::InvalidAxis { length: 2.0 });
    /// ```
    pub fn from_axis_angle(axis: Vec3, theta: f32) -> Result<Self> {
        let length = axis.length();
        if (length - 1.0).abs() >= UNIT_AXIS_TOLERANCE {
            log::warn!("Rejected non-unit rotation axis {axis:?} (length {length})");
            return Err(MathError::InvalidAxis { length });
        }

        let (s, c) = (theta * 0.5).sin_cos();
        Ok(Self::new(c, axis.x * s, axis.y * s, axis.z * s))
    }

    /// Builds the quaternion that rotates object space into inertial space
    /// for the given orientation.
    ///
    /// # Examples
    ///
    /// ```
    /// use orient_core::math::{EulerAngles, Quaternion, FRAC_PI_4, FRAC_PI_8};
    ///
    /// let q = Quaternion::from_object_to_inertial_euler(&EulerAngles::new(FRAC_PI_4, 0.0, 0.0));
    /// assert!((q.w - FRAC_PI_8.cos()).abs() < 1e-6);
    /// assert!((q.y - FRAC_PI_8.sin()).abs() < 1e-6);
    /// ```
    pub fn from_object_to_inertial_euler(orientation: &EulerAngles) -> Self {
        let (sh, ch) = (orientation.heading * 0.5).sin_cos();
        let (sp, cp) = (orientation.pitch * 0.5).sin_cos();
        let (sb, cb) = (orientation.bank * 0.5).sin_cos();

        Self {
            w: ch * cp * cb + sh * sp * sb,
            x: ch * sp * cb + sh * cp * sb,
            y: -ch * sp * sb + sh * cp * cb,
            z: -sh * sp * cb + ch * cp * sb,
        }
    }

    /// Builds the quaternion that rotates inertial space into object space
    /// for the given orientation.
    ///
    /// This is the conjugate of [`Quaternion::from_object_to_inertial_euler`].
    pub fn from_inertial_to_object_euler(orientation: &EulerAngles) -> Self {
        let (sh, ch) = (orientation.heading * 0.5).sin_cos();
        let (sp, cp) = (orientation.pitch * 0.5).sin_cos();
        let (sb, cb) = (orientation.bank * 0.5).sin_cos();

        Self {
            w: ch * cp * cb + sh * sp * sb,
            x: -ch * sp * cb - sh * cp * sb,
            y: ch * sp * sb - sh * cp * cb,
            z: sh * sp * cb - ch * cp * sb,
        }
    }

    /// Calculates the squared length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Calculates the length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Scales the quaternion to unit length in place.
    ///
    /// # Errors
    ///
    /// A zero quaternion has no direction. It is left zeroed and
    /// [`MathError::ZeroNormQuaternion`] is returned; no substitute rotation
    /// is invented.
    pub fn normalize(&mut self) -> Result<()> {
        let mag = self.magnitude();
        if mag > 0.0 {
            let inv_mag = 1.0 / mag;
            self.w *= inv_mag;
            self.x *= inv_mag;
            self.y *= inv_mag;
            self.z *= inv_mag;
            Ok(())
        } else {
            log::warn!("Attempted to normalize a zero-norm quaternion {self:?}");
            *self = Self::ZERO;
            Err(MathError::ZeroNormQuaternion)
        }
    }

    /// Returns a unit-length copy of the quaternion.
    ///
    /// # Errors
    ///
    /// See [`Quaternion::normalize`].
    #[inline]
    pub fn normalized(mut self) -> Result<Self> {
        self.normalize()?;
        Ok(self)
    }

    /// Returns the rotation angle in radians, in `[0, 2*PI]`.
    #[inline]
    pub fn rotation_angle(&self) -> f32 {
        safe_acos(self.w) * 2.0
    }

    /// Returns the unit rotation axis.
    ///
    /// When the rotation angle is (numerically) zero every axis is valid and
    /// `Vec3::X` is returned.
    pub fn rotation_axis(&self) -> Vec3 {
        // sin^2(theta / 2)
        let sin_sq = 1.0 - self.w * self.w;
        if sin_sq <= 0.0 {
            return Vec3::X;
        }

        let inv_sin = 1.0 / sin_sq.sqrt();
        Vec3::new(self.x * inv_sin, self.y * inv_sin, self.z * inv_sin)
    }

    /// Rotates a vector by this quaternion, treated as an object-to-inertial
    /// displacement.
    ///
    /// Agrees with `v * AffineTransform::from_quat(q)`.
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let s = self.w;
        2.0 * u.dot(v) * u + (s * s - u.dot(u)) * v + 2.0 * s * u.cross(v)
    }

    /// Returns `true` if both quaternions describe the same rotation, taking
    /// the double cover into account.
    #[inline]
    pub fn is_same_rotation(&self, other: &Self, epsilon: f32) -> bool {
        self.dot(other).abs() >= 1.0 - epsilon
    }
}

// --- Operator Overloads ---

impl Default for Quaternion {
    /// Returns the identity quaternion, representing no rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;
    /// Concatenates two rotations: `a * b` applies `a` first, then `b`.
    ///
    /// This is the Hamilton product `b ⊗ a`, chosen so that quaternion
    /// composition reads in the same order as row-vector matrix composition.
    /// Not commutative.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.z * rhs.y - self.y * rhs.z,
            y: self.w * rhs.y + self.y * rhs.w + self.x * rhs.z - self.z * rhs.x,
            z: self.w * rhs.z + self.z * rhs.w + self.y * rhs.x - self.x * rhs.y,
        }
    }
}

impl MulAssign<Quaternion> for Quaternion {
    /// Appends `rhs` to this rotation.
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;
    /// Rotates a `Vec3` by this quaternion.
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.rotate_vec3(rhs)
    }
}

impl Add<Quaternion> for Quaternion {
    type Output = Self;
    /// Adds two quaternions component-wise.
    /// Note: This is not a rotation operation.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.w + rhs.w, self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub<Quaternion> for Quaternion {
    type Output = Self;
    /// Subtracts two quaternions component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.w - rhs.w, self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    /// Scales all components of the quaternion by a scalar.
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        Self::new(self.w * scalar, self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Neg for Quaternion {
    type Output = Self;
    /// Negates all components. The result is the same rotation.
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl From<EulerAngles> for Quaternion {
    /// Builds the object-to-inertial quaternion.
    #[inline]
    fn from(orientation: EulerAngles) -> Self {
        Self::from_object_to_inertial_euler(&orientation)
    }
}

// --- Approximate Comparison ---

impl AbsDiffEq for Quaternion {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.w.relative_eq(&other.w, epsilon, max_relative)
            && self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
