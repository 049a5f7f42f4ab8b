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

//! Orientation primitives and the conversions between them.
//!
//! Four encodings of the same rotation live here: [`EulerAngles`],
//! [`Quaternion`], [`RotationMatrix`] and the rotation block of an
//! [`AffineTransform`]. Every conversion is a pure function of its input.
//!
//! Conventions shared by the whole module:
//!
//! * Left-handed frame, +Y up, +X right, +Z forward.
//! * Row vectors: a point is transformed as `p * M`, so `a * b` applies `a`
//!   first. Quaternion composition follows the same order.
//! * All angles are in **radians**.

// --- Fundamental Constants ---

/// A small constant for general floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

/// Distance from ±π/2 under which a pitch is treated as gimbal-locked.
pub const GIMBAL_LOCK_EPSILON: f32 = 1e-4;

/// `|sin(pitch)|` at or above which a matrix or quaternion is treated as
/// gimbal-locked when extracting Euler angles.
pub const GIMBAL_LOCK_SIN_THRESHOLD: f32 = 0.9999;

/// Cosine above which [`Quaternion::slerp`] falls back to linear weights.
pub const SLERP_LINEAR_THRESHOLD: f32 = 0.9999;

/// `|w|` above which [`Quaternion::pow`] returns its input unchanged.
pub const POW_IDENTITY_THRESHOLD: f32 = 0.9999;

/// Accepted deviation from unit length for rotation axes.
pub const UNIT_AXIS_TOLERANCE: f32 = 0.01;

/// `|det|` at or below which a matrix is considered singular.
pub const SINGULAR_DETERMINANT_EPSILON: f32 = 1e-6;

// Re-export standard mathematical constants for convenience.
pub use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, PI, TAU};

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;
/// The factor to convert radians to degrees (180.0 / PI).
pub const RAD_TO_DEG: f32 = 180.0 / PI;

// --- Declare Sub-Modules ---

pub mod affine_transform;
pub mod error;
pub mod euler;
pub mod interpolation;
pub mod quaternion;
pub mod rotation_matrix;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::affine_transform::{AffineTransform, Axis};
pub use self::error::{MathError, Result};
pub use self::euler::EulerAngles;
pub use self::quaternion::Quaternion;
pub use self::rotation_matrix::{InertialToObjectMatrix, ObjectToInertialMatrix, RotationMatrix};
pub use self::vector::Vec3;

// --- Utility Functions ---

/// Converts an angle from degrees to radians.
///
/// # Examples
///
/// ```
/// use orient_core::math::{degrees_to_radians, PI};
/// assert_eq!(degrees_to_radians(180.0), PI);
/// ```
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

/// Converts an angle from radians to degrees.
///
/// # Examples
///
/// ```
/// use orient_core::math::{radians_to_degrees, PI};
/// assert_eq!(radians_to_degrees(PI), 180.0);
/// ```
#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * RAD_TO_DEG
}

/// Wraps an angle into the `(-PI, PI]` range by adding a multiple of `TAU`.
///
/// # Examples
///
/// ```
/// use orient_core::math::{wrap_pi, FRAC_PI_2, PI};
/// assert!((wrap_pi(3.0 * FRAC_PI_2) + FRAC_PI_2).abs() < 1e-5);
/// assert_eq!(wrap_pi(-PI), PI);
/// ```
#[inline]
pub fn wrap_pi(theta: f32) -> f32 {
    let wrapped = theta - TAU * ((theta + PI) / TAU).floor();
    // The floor can land one period off when `theta + PI` rounds onto a multiple of TAU.
    if wrapped <= -PI {
        wrapped + TAU
    } else if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Arc cosine that clamps its input to `[-1, 1]` instead of returning NaN.
///
/// # Examples
///
/// ```
/// use orient_core::math::{safe_acos, PI};
/// assert_eq!(safe_acos(1.0000001), 0.0);
/// assert_eq!(safe_acos(-2.0), PI);
/// ```
#[inline]
pub fn safe_acos(x: f32) -> f32 {
    if x <= -1.0 {
        PI
    } else if x >= 1.0 {
        0.0
    } else {
        x.acos()
    }
}
