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

//! Quaternion algebra used for blending rotations: dot product, conjugate,
//! spherical linear interpolation and exponentiation.

use super::{Quaternion, POW_IDENTITY_THRESHOLD, SLERP_LINEAR_THRESHOLD};

impl Quaternion {
    /// Computes the 4D dot product of two quaternions.
    ///
    /// For unit quaternions this is the cosine of half the angle between the
    /// two rotations.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the conjugate `(w, -x, -y, -z)`.
    ///
    /// For a unit quaternion this is the inverse rotation.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Performs a Spherical Linear Interpolation (SLERP) between two
    /// quaternions.
    ///
    /// The parameter `t` is clamped: `t <= 0` returns `q0` and `t >= 1`
    /// returns `q1`, both exactly. In between, the shorter of the two arcs
    /// is followed, so the result may be the negation of what a naive blend
    /// would give. Nearly parallel inputs fall back to linear weights to
    /// avoid dividing by a vanishing sine. The result is not renormalized.
    ///
    /// # Examples
    ///
    /// ```
    /// use orient_core::math::{Quaternion, FRAC_PI_2, FRAC_PI_4};
    ///
    /// let a = Quaternion::IDENTITY;
    /// let b = Quaternion::from_rotation_y(FRAC_PI_2);
    /// let mid = Quaternion::slerp(a, b, 0.5);
    /// assert!((mid.rotation_angle() - FRAC_PI_4).abs() < 1e-5);
    /// assert_eq!(Quaternion::slerp(a, b, 1.5), b);
    /// ```
    pub fn slerp(q0: Self, q1: Self, t: f32) -> Self {
        if t <= 0.0 {
            if t < 0.0 {
                log::trace!("Slerp parameter {t} clamped to 0");
            }
            return q0;
        }
        if t >= 1.0 {
            if t > 1.0 {
                log::trace!("Slerp parameter {t} clamped to 1");
            }
            return q1;
        }

        let mut cos_omega = q0.dot(&q1);
        let mut q1 = q1;

        // Negating one input keeps the interpolation on the shorter arc.
        if cos_omega < 0.0 {
            q1 = -q1;
            cos_omega = -cos_omega;
        }

        let (k0, k1) = if cos_omega > SLERP_LINEAR_THRESHOLD {
            (1.0 - t, t)
        } else {
            let sin_omega = (1.0 - cos_omega * cos_omega).sqrt();
            let omega = sin_omega.atan2(cos_omega);
            let inv_sin_omega = 1.0 / sin_omega;
            (
                ((1.0 - t) * omega).sin() * inv_sin_omega,
                (t * omega).sin() * inv_sin_omega,
            )
        };

        q0 * k0 + q1 * k1
    }

    /// Raises a unit quaternion to a real power, scaling its rotation angle
    /// by `exponent` while keeping the axis.
    ///
    /// An (almost) identity quaternion has no meaningful axis and is returned
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use orient_core::math::{Quaternion, FRAC_PI_2, PI};
    ///
    /// let q = Quaternion::from_rotation_x(PI);
    /// let half = q.pow(0.5);
    /// assert!((half.rotation_angle() - FRAC_PI_2).abs() < 1e-5);
    /// ```
    pub fn pow(&self, exponent: f32) -> Self {
        if self.w.abs() > POW_IDENTITY_THRESHOLD {
            return *self;
        }

        let alpha = self.w.acos();
        let new_alpha = alpha * exponent;
        let mult = new_alpha.sin() / alpha.sin();

        Self::new(
            new_alpha.cos(),
            self.x * mult,
            self.y * mult,
            self.z * mult,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::math::{EulerAngles, Quaternion, Vec3, EPSILON, FRAC_PI_2, FRAC_PI_4, PI};
    use approx::assert_relative_eq;

    fn sample_pair() -> (Quaternion, Quaternion) {
        (
            Quaternion::from_object_to_inertial_euler(&EulerAngles::new(0.2, -0.4, 0.1)),
            Quaternion::from_object_to_inertial_euler(&EulerAngles::new(1.3, 0.5, -0.8)),
        )
    }

    #[test]
    fn test_dot_and_conjugate() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.dot(&q), 30.0);
        assert_eq!(q.conjugate(), Quaternion::new(1.0, -2.0, -3.0, -4.0));
        assert_eq!(q.conjugate().conjugate(), q);
    }

    #[test]
    fn test_slerp_endpoints_are_exact() {
        let (a, b) = sample_pair();
        assert_eq!(Quaternion::slerp(a, b, 0.0), a);
        assert_eq!(Quaternion::slerp(a, b, 1.0), b);
    }

    #[test]
    fn test_slerp_clamps_parameter() {
        let (a, b) = sample_pair();
        assert_eq!(Quaternion::slerp(a, b, -0.5), a);
        assert_eq!(Quaternion::slerp(a, b, 3.0), b);

        // The far endpoint is returned as given, even when it lies on the
        // other hemisphere.
        assert_eq!(Quaternion::slerp(a, -b, 1.0), -b);
    }

    #[test]
    fn test_slerp_midpoint() {
        let start = Quaternion::IDENTITY;
        let end = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2).unwrap();
        let half = Quaternion::slerp(start, end, 0.5);

        assert_relative_eq!(half, Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_4).unwrap(), epsilon = EPSILON);
        assert_relative_eq!(half.magnitude(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_has_constant_angular_velocity() {
        let (a, b) = sample_pair();
        let total = a.conjugate() * b;
        let total_angle = total.rotation_angle();

        for i in 1..10 {
            let t = i as f32 / 10.0;
            let q = Quaternion::slerp(a, b, t);
            let travelled = (a.conjugate() * q).rotation_angle();
            assert_relative_eq!(travelled, total_angle * t, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_slerp_with_itself() {
        let (a, _) = sample_pair();
        for &t in &[0.1, 0.5, 0.9] {
            assert_relative_eq!(Quaternion::slerp(a, a, t), a, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_slerp_takes_shortest_path() {
        let a = Quaternion::from_rotation_y(0.2);
        let b = Quaternion::from_rotation_y(0.6);
        let direct = Quaternion::slerp(a, b, 0.5);
        let flipped = Quaternion::slerp(a, -b, 0.5);

        assert_relative_eq!(direct, Quaternion::from_rotation_y(0.4), epsilon = EPSILON);
        assert!(flipped.is_same_rotation(&direct, EPSILON));
        assert_relative_eq!(flipped, direct, epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_nearly_parallel_is_finite() {
        let a = Quaternion::from_rotation_x(0.3);
        let b = Quaternion::from_rotation_x(0.3 + 1e-4);
        let q = Quaternion::slerp(a, b, 0.5);

        assert!(q.w.is_finite() && q.x.is_finite());
        assert_relative_eq!(q, Quaternion::from_rotation_x(0.3 + 5e-5), epsilon = EPSILON);
    }

    #[test]
    fn test_pow_scales_angle() {
        let axis = Vec3::new(0.0, 0.6, 0.8);
        let q = Quaternion::from_axis_angle(axis, 1.2).unwrap();

        let half = q.pow(0.5);
        assert_relative_eq!(half.rotation_angle(), 0.6, epsilon = 1e-5);
        assert_relative_eq!(half.rotation_axis(), axis, epsilon = 1e-5);
        assert_relative_eq!(half * half, q, epsilon = 1e-5);

        assert_relative_eq!(q.pow(2.0), q * q, epsilon = 1e-5);
        assert_relative_eq!(q.pow(1.0), q, epsilon = 1e-5);
        assert_relative_eq!(q.pow(0.0), Quaternion::IDENTITY, epsilon = 1e-5);
    }

    #[test]
    fn test_pow_negative_exponent_inverts() {
        let q = Quaternion::from_rotation_z(PI / 3.0);
        assert_relative_eq!(q.pow(-1.0), q.conjugate(), epsilon = 1e-5);
    }

    #[test]
    fn test_pow_near_identity_is_unchanged() {
        let q = Quaternion::from_rotation_y(1e-3);
        assert_eq!(q.pow(10.0), q);
        assert_eq!(Quaternion::IDENTITY.pow(0.5), Quaternion::IDENTITY);
        assert_eq!((-Quaternion::IDENTITY).pow(3.0), -Quaternion::IDENTITY);
    }
}
