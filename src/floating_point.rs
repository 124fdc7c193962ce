// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// An immutable, finite `f32`.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Debug)]
#[repr(transparent)]
pub struct FiniteF32(f32);

impl FiniteF32 {
    pub const ZERO: Self = FiniteF32(0.0);

    /// Creates a finite `f32` number.
    ///
    /// Returns `None` for NaN and infinity.
    #[inline]
    pub fn new(n: f32) -> Option<Self> {
        if n.is_finite() {
            Some(FiniteF32(n))
        } else {
            None
        }
    }

    /// Returns the value as a primitive type.
    #[inline]
    pub const fn get(&self) -> f32 {
        self.0
    }
}

/// An immutable, finite `f32` in a 0..1 range.
///
/// Used for curve parameters found by root solvers.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Debug)]
#[repr(transparent)]
pub struct NormalizedF32Exclusive(FiniteF32);

impl NormalizedF32Exclusive {
    /// A placeholder value for buffers that are filled later.
    pub const ANY: Self = Self::HALF;
    /// A `0.5` value.
    pub const HALF: Self = NormalizedF32Exclusive(FiniteF32(0.5));

    /// Creates a normalized `f32`.
    ///
    /// Returns `None` when the value is outside of the `0 <= n < 1` range.
    #[inline]
    pub fn new(n: f32) -> Option<Self> {
        if n >= 0.0 && n < 1.0 {
            // `n` is guarantee to be finite after the bounds check.
            Some(NormalizedF32Exclusive(FiniteF32(n)))
        } else {
            None
        }
    }

    /// Returns the value as a primitive type.
    #[inline]
    pub const fn get(self) -> f32 {
        self.0.get()
    }
}
