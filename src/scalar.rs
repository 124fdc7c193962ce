// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

pub const SCALAR_NEARLY_ZERO: f32 = 1.0 / (1 << 12) as f32;
pub const SCALAR_ROOT_2_OVER_2: f32 = 0.707_106_781;

pub trait Scalar {
    fn half(self) -> Self;
    fn sqr(self) -> Self;
    fn invert(self) -> Self;
    fn is_nearly_equal(self, other: Self) -> bool;
    fn is_nearly_equal_within_tolerance(self, other: Self, tolerance: Self) -> bool;
    fn is_nearly_zero(self) -> bool;
    fn is_nearly_zero_within_tolerance(self, tolerance: Self) -> bool;
    fn is_integer(self) -> bool;
}

impl Scalar for f32 {
    fn half(self) -> f32 {
        self * 0.5
    }

    fn sqr(self) -> f32 {
        self * self
    }

    fn invert(self) -> f32 {
        1.0 / self
    }

    fn is_nearly_equal(self, other: Self) -> bool {
        (self - other).abs() <= SCALAR_NEARLY_ZERO
    }

    fn is_nearly_equal_within_tolerance(self, other: Self, tolerance: Self) -> bool {
        (self - other).abs() <= tolerance
    }

    fn is_nearly_zero(self) -> bool {
        self.is_nearly_zero_within_tolerance(SCALAR_NEARLY_ZERO)
    }

    fn is_nearly_zero_within_tolerance(self, tolerance: Self) -> bool {
        debug_assert!(tolerance >= 0.0);
        self.abs() <= tolerance
    }

    fn is_integer(self) -> bool {
        self == self.floor()
    }
}

/// Returns `sin(radians)`, snapping values within nearly-zero to exactly zero.
pub fn sin_snap_to_zero(radians: f32) -> f32 {
    let v = radians.sin();
    if v.is_nearly_zero() {
        0.0
    } else {
        v
    }
}

/// Returns `cos(radians)`, snapping values within nearly-zero to exactly zero.
pub fn cos_snap_to_zero(radians: f32) -> f32 {
    let v = radians.cos();
    if v.is_nearly_zero() {
        0.0
    } else {
        v
    }
}

/// Rounds half up, like `SkScalarRoundToScalar`.
pub fn round_to_scalar(v: f32) -> f32 {
    (v + 0.5).floor()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub trait FloatExt {
    fn abs(self) -> Self;
    fn sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn atan2(self, other: Self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f32 {
    fn abs(self) -> Self {
        libm::fabsf(self)
    }

    fn sqrt(self) -> Self {
        libm::sqrtf(self)
    }

    fn sin(self) -> Self {
        libm::sinf(self)
    }

    fn cos(self) -> Self {
        libm::cosf(self)
    }

    fn tan(self) -> Self {
        libm::tanf(self)
    }

    fn atan2(self, other: Self) -> Self {
        libm::atan2f(self, other)
    }

    fn floor(self) -> Self {
        libm::floorf(self)
    }

    fn ceil(self) -> Self {
        libm::ceilf(self)
    }
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    fn abs(self) -> Self {
        libm::fabs(self)
    }

    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }

    fn sin(self) -> Self {
        libm::sin(self)
    }

    fn cos(self) -> Self {
        libm::cos(self)
    }

    fn tan(self) -> Self {
        libm::tan(self)
    }

    fn atan2(self, other: Self) -> Self {
        libm::atan2(self, other)
    }

    fn floor(self) -> Self {
        libm::floor(self)
    }

    fn ceil(self) -> Self {
        libm::ceil(self)
    }
}
