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

//! Provides heading-pitch-bank Euler angles and their extraction from the
//! other orientation encodings.

use approx::{AbsDiffEq, RelativeEq};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{
    wrap_pi, AffineTransform, Quaternion, RotationMatrix, FRAC_PI_2, GIMBAL_LOCK_EPSILON,
    GIMBAL_LOCK_SIN_THRESHOLD, PI,
};

/// An orientation expressed as three sequential rotations.
///
/// Going from the object frame to the inertial frame, the object is first
/// banked about its forward axis (+Z), then pitched about its lateral axis
/// (+X), and finally headed about the vertical axis (+Y).
///
/// Many triples describe the same orientation. [`EulerAngles::canonize`]
/// reduces a triple to the canonical set:
///
/// * `pitch` in `[-PI/2, PI/2]`
/// * `heading` and `bank` in `(-PI, PI]`
/// * `bank == 0` when gimbal-locked (`|pitch|` within
///   [`GIMBAL_LOCK_EPSILON`] of `PI/2`)
#[derive(Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct EulerAngles {
    /// Rotation about the vertical axis, in radians.
    pub heading: f32,
    /// Rotation about the lateral axis, in radians.
    pub pitch: f32,
    /// Rotation about the forward axis, in radians.
    pub bank: f32,
}

impl EulerAngles {
    /// The identity orientation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new triple from raw angles. No canonicalization is applied.
    #[inline]
    pub const fn new(heading: f32, pitch: f32, bank: f32) -> Self {
        Self {
            heading,
            pitch,
            bank,
        }
    }

    /// Returns `true` if the pitch is close enough to ±π/2 that heading and
    /// bank rotate about the same axis.
    #[inline]
    pub fn is_gimbal_locked(&self) -> bool {
        self.pitch.abs() >= FRAC_PI_2 - GIMBAL_LOCK_EPSILON
    }

    /// Returns `true` if the triple is already in canonical form.
    pub fn is_canonical(&self) -> bool {
        let in_pi_range = |a: f32| a > -PI && a <= PI;
        (-FRAC_PI_2..=FRAC_PI_2).contains(&self.pitch)
            && in_pi_range(self.heading)
            && in_pi_range(self.bank)
            && (!self.is_gimbal_locked() || self.bank == 0.0)
    }

    /// Reduces the triple to its canonical representative in place.
    ///
    /// The represented orientation is unchanged. Applying it twice is a no-op
    /// up to floating-point rounding.
    ///
    /// # Examples
    ///
    /// ```
    /// use orient_core::math::{EulerAngles, PI};
    ///
    /// let mut e = EulerAngles::new(0.0, PI * 0.75, 0.0);
    /// e.canonize();
    /// assert!((e.pitch - PI * 0.25).abs() < 1e-5);
    /// assert!((e.heading - PI).abs() < 1e-5);
    /// assert!((e.bank - PI).abs() < 1e-5);
    /// ```
    pub fn canonize(&mut self) {
        self.pitch = wrap_pi(self.pitch);

        // Fold pitch into [-pi/2, pi/2] through (h, p, b) == (h + pi, pi - p, b + pi).
        if self.pitch < -FRAC_PI_2 {
            self.pitch = -PI - self.pitch;
            self.heading += PI;
            self.bank += PI;
        } else if self.pitch > FRAC_PI_2 {
            self.pitch = PI - self.pitch;
            self.heading += PI;
            self.bank += PI;
        }

        if self.is_gimbal_locked() {
            log::trace!(
                "Gimbal lock at pitch {}: folding bank {} into heading {}",
                self.pitch,
                self.bank,
                self.heading
            );
            // Looking straight up only heading - bank is observable, straight down heading + bank.
            if self.pitch > 0.0 {
                self.heading -= self.bank;
            } else {
                self.heading += self.bank;
            }
            self.bank = 0.0;
        } else {
            self.bank = wrap_pi(self.bank);
        }

        self.heading = wrap_pi(self.heading);
    }

    /// Returns the canonical representative of this triple.
    #[inline]
    pub fn canonized(mut self) -> Self {
        self.canonize();
        self
    }

    /// Extracts the angles from a quaternion that rotates object space into
    /// inertial space.
    pub fn from_object_to_inertial_quat(q: &Quaternion) -> Self {
        let sin_pitch = -2.0 * (q.y * q.z - q.w * q.x);

        if is_locked(sin_pitch) {
            Self {
                heading: (-q.x * q.z + q.w * q.y).atan2(0.5 - q.y * q.y - q.z * q.z),
                pitch: FRAC_PI_2.copysign(sin_pitch),
                bank: 0.0,
            }
        } else {
            Self {
                heading: (q.x * q.z + q.w * q.y).atan2(0.5 - q.x * q.x - q.y * q.y),
                pitch: sin_pitch.asin(),
                bank: (q.x * q.y + q.w * q.z).atan2(0.5 - q.x * q.x - q.z * q.z),
            }
        }
    }

    /// Extracts the angles from a quaternion that rotates inertial space into
    /// object space.
    ///
    /// This is the conjugate of [`EulerAngles::from_object_to_inertial_quat`]:
    /// only the sign of the `w` cross terms differs.
    pub fn from_inertial_to_object_quat(q: &Quaternion) -> Self {
        let sin_pitch = -2.0 * (q.y * q.z + q.w * q.x);

        if is_locked(sin_pitch) {
            Self {
                heading: (-q.x * q.z - q.w * q.y).atan2(0.5 - q.y * q.y - q.z * q.z),
                pitch: FRAC_PI_2.copysign(sin_pitch),
                bank: 0.0,
            }
        } else {
            Self {
                heading: (q.x * q.z - q.w * q.y).atan2(0.5 - q.x * q.x - q.y * q.y),
                pitch: sin_pitch.asin(),
                bank: (q.x * q.y - q.w * q.z).atan2(0.5 - q.x * q.x - q.z * q.z),
            }
        }
    }

    /// Extracts the angles from the rotation block of an object-to-world
    /// (local-to-parent) transform. Translation is ignored.
    pub fn from_object_to_world_matrix(m: &AffineTransform) -> Self {
        let sin_pitch = -m.m32;

        if is_locked(sin_pitch) {
            Self {
                heading: (-m.m13).atan2(m.m11),
                pitch: FRAC_PI_2.copysign(sin_pitch),
                bank: 0.0,
            }
        } else {
            Self {
                heading: m.m31.atan2(m.m33),
                pitch: sin_pitch.asin(),
                bank: m.m12.atan2(m.m22),
            }
        }
    }

    /// Extracts the angles from the rotation block of a world-to-object
    /// (parent-to-local) transform. Translation is ignored.
    pub fn from_world_to_object_matrix(m: &AffineTransform) -> Self {
        Self::from_inertial_to_object_block(
            [m.m11, m.m13, m.m21, m.m22, m.m23, m.m31, m.m33],
        )
    }

    /// Extracts the angles from a rotation matrix.
    ///
    /// [`RotationMatrix`] stores the inertial-to-object transform, so this
    /// shares its layout with [`EulerAngles::from_world_to_object_matrix`].
    pub fn from_rotation_matrix(m: &RotationMatrix) -> Self {
        Self::from_inertial_to_object_block(
            [m.m11, m.m13, m.m21, m.m22, m.m23, m.m31, m.m33],
        )
    }

    fn from_inertial_to_object_block([m11, m13, m21, m22, m23, m31, m33]: [f32; 7]) -> Self {
        let sin_pitch = -m23;

        if is_locked(sin_pitch) {
            Self {
                heading: (-m31).atan2(m11),
                pitch: FRAC_PI_2.copysign(sin_pitch),
                bank: 0.0,
            }
        } else {
            Self {
                heading: m13.atan2(m33),
                pitch: sin_pitch.asin(),
                bank: m21.atan2(m22),
            }
        }
    }
}

#[inline]
fn is_locked(sin_pitch: f32) -> bool {
    let locked = sin_pitch.abs() >= GIMBAL_LOCK_SIN_THRESHOLD;
    if locked {
        log::trace!("Gimbal lock while extracting angles (sin pitch {sin_pitch})");
    }
    locked
}

impl From<Quaternion> for EulerAngles {
    /// Treats the quaternion as an object-to-inertial rotation.
    #[inline]
    fn from(q: Quaternion) -> Self {
        Self::from_object_to_inertial_quat(&q)
    }
}

impl From<RotationMatrix> for EulerAngles {
    #[inline]
    fn from(m: RotationMatrix) -> Self {
        Self::from_rotation_matrix(&m)
    }
}

// --- Approximate Comparison ---

impl AbsDiffEq for EulerAngles {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.heading.abs_diff_eq(&other.heading, epsilon)
            && self.pitch.abs_diff_eq(&other.pitch, epsilon)
            && self.bank.abs_diff_eq(&other.bank, epsilon)
    }
}

impl RelativeEq for EulerAngles {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.heading.relative_eq(&other.heading, epsilon, max_relative)
            && self.pitch.relative_eq(&other.pitch, epsilon, max_relative)
            && self.bank.relative_eq(&other.bank, epsilon, max_relative)
    }
}
