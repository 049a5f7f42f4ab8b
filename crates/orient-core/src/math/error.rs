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

//! Defines the error type for violated numerical preconditions.

use thiserror::Error;

/// A precondition of an orientation operation was not met.
///
/// These are caller bugs rather than runtime conditions: a rotation axis
/// that is not unit length, a quaternion with zero norm, or a matrix that
/// cannot be inverted. They are reported instead of silently replaced by a
/// plausible-looking value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    /// A rotation axis was expected to be unit length.
    #[error("rotation axis must be unit length, got length {length}")]
    InvalidAxis {
        /// The length of the rejected axis.
        length: f32,
    },
    /// A quaternion with a norm of zero cannot be normalized.
    #[error("cannot normalize a quaternion with zero norm")]
    ZeroNormQuaternion,
    /// The rotation block of a matrix has a (near) zero determinant.
    #[error("matrix is singular (determinant {determinant})")]
    SingularMatrix {
        /// The determinant that was found.
        determinant: f32,
    },
}

/// A specialized `Result` for orientation operations.
pub type Result<T> = std::result::Result<T, MathError>;
