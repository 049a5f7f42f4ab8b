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

//! # Orient Core
//!
//! Orientation representations for 3D: heading-pitch-bank Euler angles,
//! unit quaternions, pure rotation matrices and 4x3 affine transforms,
//! together with the conversions and interpolation between them.

#![warn(missing_docs)]

pub mod math;

pub use math::{
    AffineTransform, Axis, EulerAngles, InertialToObjectMatrix, MathError,
    ObjectToInertialMatrix, Quaternion, RotationMatrix, Vec3,
};
