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

//! Defines the orthonormal `RotationMatrix` and its direction-typed wrappers.

use approx::{AbsDiffEq, RelativeEq};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{EulerAngles, Quaternion, Vec3};
use std::ops::Mul;

// --- RotationMatrix ---

/// A pure 3x3 rotation matrix, stored row-major.
///
/// The matrix always holds the **inertial-to-object** transform of an
/// orientation; a row vector in inertial space is taken to object space by
/// `v * M`. The opposite direction uses the transpose, which for an
/// orthonormal matrix is also its inverse.
///
/// Prefer [`InertialToObjectMatrix`] and [`ObjectToInertialMatrix`] when the
/// direction should be checked by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct RotationMatrix {
    /// Row 1, column 1.
    pub m11: f32,
    /// Row 1, column 2.
    pub m12: f32,
    /// Row 1, column 3.
    pub m13: f32,
    /// Row 2, column 1.
    pub m21: f32,
    /// Row 2, column 2.
    pub m22: f32,
    /// Row 2, column 3.
    pub m23: f32,
    /// Row 3, column 1.
    pub m31: f32,
    /// Row 3, column 2.
    pub m32: f32,
    /// Row 3, column 3.
    pub m33: f32,
}

impl RotationMatrix {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::from_rows(Vec3::X, Vec3::Y, Vec3::Z);

    /// Creates a matrix from its three rows.
    ///
    /// No orthonormality check is performed.
    #[inline]
    pub const fn from_rows(r1: Vec3, r2: Vec3, r3: Vec3) -> Self {
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
        }
    }

    /// Builds the inertial-to-object matrix of an orientation.
    ///
    /// # Examples
    ///
    /// ```
    /// use orient_core::math::{EulerAngles, RotationMatrix, Vec3, FRAC_PI_4};
    ///
    /// let m = RotationMatrix::from_euler(&EulerAngles::new(FRAC_PI_4, 0.0, 0.0));
    /// let v = m.object_to_inertial(Vec3::X);
    /// assert!((v.x - FRAC_PI_4.cos()).abs() < 1e-6);
    /// assert!((v.z + FRAC_PI_4.sin()).abs() < 1e-6);
    /// ```
    pub fn from_euler(orientation: &EulerAngles) -> Self {
        let (sh, ch) = orientation.heading.sin_cos();
        let (sp, cp) = orientation.pitch.sin_cos();
        let (sb, cb) = orientation.bank.sin_cos();

        Self {
            m11: ch * cb + sh * sp * sb,
            m12: -ch * sb + sh * sp * cb,
            m13: sh * cp,

            m21: sb * cp,
            m22: cb * cp,
            m23: -sp,

            m31: -sh * cb + ch * sp * sb,
            m32: sb * sh + ch * sp * cb,
            m33: ch * cp,
        }
    }

    /// Builds the matrix from a quaternion that rotates object space into
    /// inertial space.
    pub fn from_object_to_inertial_quat(q: &Quaternion) -> Self {
        let (w, x, y, z) = (q.w, q.x, q.y, q.z);

        Self {
            m11: 1.0 - 2.0 * (y * y + z * z),
            m12: 2.0 * (x * y - w * z),
            m13: 2.0 * (x * z + w * y),

            m21: 2.0 * (x * y + w * z),
            m22: 1.0 - 2.0 * (x * x + z * z),
            m23: 2.0 * (y * z - w * x),

            m31: 2.0 * (x * z - w * y),
            m32: 2.0 * (y * z + w * x),
            m33: 1.0 - 2.0 * (x * x + y * y),
        }
    }

    /// Builds the matrix from a quaternion that rotates inertial space into
    /// object space.
    pub fn from_inertial_to_object_quat(q: &Quaternion) -> Self {
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
        }
    }

    /// Rotates a vector from inertial space into object space (`v * M`).
    #[inline]
    pub fn inertial_to_object(&self, v: Vec3) -> Vec3 {
        Vec3 {
            x: self.m11 * v.x + self.m21 * v.y + self.m31 * v.z,
            y: self.m12 * v.x + self.m22 * v.y + self.m32 * v.z,
            z: self.m13 * v.x + self.m23 * v.y + self.m33 * v.z,
        }
    }

    /// Rotates a vector from object space into inertial space (`v * M^T`).
    #[inline]
    pub fn object_to_inertial(&self, v: Vec3) -> Vec3 {
        Vec3 {
            x: self.m11 * v.x + self.m12 * v.y + self.m13 * v.z,
            y: self.m21 * v.x + self.m22 * v.y + self.m23 * v.z,
            z: self.m31 * v.x + self.m32 * v.y + self.m33 * v.z,
        }
    }

    /// Returns the transpose, which is the rotation in the opposite direction.
    pub fn transpose(&self) -> Self {
        Self {
            m11: self.m11,
            m12: self.m21,
            m13: self.m31,
            m21: self.m12,
            m22: self.m22,
            m23: self.m32,
            m31: self.m13,
            m32: self.m23,
            m33: self.m33,
        }
    }

    /// Computes the determinant. `1.0` for a proper rotation.
    pub fn determinant(&self) -> f32 {
        self.m11 * (self.m22 * self.m33 - self.m23 * self.m32)
            + self.m12 * (self.m23 * self.m31 - self.m21 * self.m33)
            + self.m13 * (self.m21 * self.m32 - self.m22 * self.m31)
    }

    /// Returns `true` if the rows are unit length and mutually orthogonal
    /// within `epsilon`.
    pub fn is_orthonormal(&self, epsilon: f32) -> bool {
        let r1 = Vec3::new(self.m11, self.m12, self.m13);
        let r2 = Vec3::new(self.m21, self.m22, self.m23);
        let r3 = Vec3::new(self.m31, self.m32, self.m33);

        [r1, r2, r3]
            .iter()
            .all(|r| (r.length_squared() - 1.0).abs() <= epsilon)
            && r1.dot(r2).abs() <= epsilon
            && r2.dot(r3).abs() <= epsilon
            && r3.dot(r1).abs() <= epsilon
    }

    /// Extracts the Euler angles of the orientation.
    #[inline]
    pub fn to_euler(&self) -> EulerAngles {
        EulerAngles::from_rotation_matrix(self)
    }
}

// --- Operator Overloads ---

impl Default for RotationMatrix {
    /// Returns the identity rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<RotationMatrix> for RotationMatrix {
    type Output = Self;
    /// Concatenates two rotations: `a * b` applies `a` first, then `b`.
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
        }
    }
}

impl Mul<RotationMatrix> for Vec3 {
    type Output = Vec3;
    /// Row-vector product `v * M`, i.e. inertial to object.
    #[inline]
    fn mul(self, rhs: RotationMatrix) -> Self::Output {
        rhs.inertial_to_object(self)
    }
}

impl From<EulerAngles> for RotationMatrix {
    #[inline]
    fn from(orientation: EulerAngles) -> Self {
        Self::from_euler(&orientation)
    }
}

// --- Approximate Comparison ---

impl AbsDiffEq for RotationMatrix {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        bytemuck::cast_ref::<_, [f32; 9]>(self)
            .iter()
            .zip(bytemuck::cast_ref::<_, [f32; 9]>(other))
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for RotationMatrix {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        bytemuck::cast_ref::<_, [f32; 9]>(self)
            .iter()
            .zip(bytemuck::cast_ref::<_, [f32; 9]>(other))
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

// --- Direction Wrappers ---

/// An orientation used to take vectors from inertial space into object space.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct InertialToObjectMatrix(pub RotationMatrix);

/// An orientation used to take vectors from object space into inertial space.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct ObjectToInertialMatrix(pub RotationMatrix);

impl InertialToObjectMatrix {
    /// Builds the wrapper from Euler angles.
    #[inline]
    pub fn from_euler(orientation: &EulerAngles) -> Self {
        Self(RotationMatrix::from_euler(orientation))
    }

    /// Builds the wrapper from an inertial-to-object quaternion.
    #[inline]
    pub fn from_quat(q: &Quaternion) -> Self {
        Self(RotationMatrix::from_inertial_to_object_quat(q))
    }

    /// Rotates an inertial-space vector into object space.
    #[inline]
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        self.0.inertial_to_object(v)
    }

    /// Returns the same orientation, used in the opposite direction.
    #[inline]
    pub fn inverse(&self) -> ObjectToInertialMatrix {
        ObjectToInertialMatrix(self.0)
    }

    /// Extracts the Euler angles of the orientation.
    #[inline]
    pub fn to_euler(&self) -> EulerAngles {
        self.0.to_euler()
    }

    /// Returns the underlying matrix.
    #[inline]
    pub fn matrix(&self) -> &RotationMatrix {
        &self.0
    }
}

impl ObjectToInertialMatrix {
    /// Builds the wrapper from Euler angles.
    #[inline]
    pub fn from_euler(orientation: &EulerAngles) -> Self {
        Self(RotationMatrix::from_euler(orientation))
    }

    /// Builds the wrapper from an object-to-inertial quaternion.
    #[inline]
    pub fn from_quat(q: &Quaternion) -> Self {
        Self(RotationMatrix::from_object_to_inertial_quat(q))
    }

    /// Rotates an object-space vector into inertial space.
    #[inline]
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        self.0.object_to_inertial(v)
    }

    /// Returns the same orientation, used in the opposite direction.
    #[inline]
    pub fn inverse(&self) -> InertialToObjectMatrix {
        InertialToObjectMatrix(self.0)
    }

    /// Extracts the Euler angles of the orientation.
    #[inline]
    pub fn to_euler(&self) -> EulerAngles {
        self.0.to_euler()
    }

    /// Returns the underlying matrix.
    #[inline]
    pub fn matrix(&self) -> &RotationMatrix {
        &self.0
    }
}

impl Mul<InertialToObjectMatrix> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: InertialToObjectMatrix) -> Self::Output {
        rhs.rotate(self)
    }
}

impl Mul<ObjectToInertialMatrix> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: ObjectToInertialMatrix) -> Self::Output {
        rhs.rotate(self)
    }
}

// --- Tests ---
