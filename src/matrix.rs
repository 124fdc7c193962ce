// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::scalar::{cos_snap_to_zero, sin_snap_to_zero, Scalar, SCALAR_NEARLY_ZERO};
use crate::{Point, Rect};

#[cfg(all(not(feature = "std"), feature = "libm"))]
use crate::scalar::FloatExt;

/// A matrix type classification.
///
/// Computed from the matrix values on every request.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct TypeMask(u8);

impl TypeMask {
    /// An identity matrix.
    pub const IDENTITY: Self = TypeMask(0x00);
    /// A matrix with a non-zero translation.
    pub const TRANSLATE: Self = TypeMask(0x01);
    /// A matrix with a non-unit scale.
    pub const SCALE: Self = TypeMask(0x02);
    /// A matrix with a skew or a rotation.
    pub const AFFINE: Self = TypeMask(0x04);
    /// A matrix with perspective. Always accompanied by all other bits.
    pub const PERSPECTIVE: Self = TypeMask(0x08);

    /// Returns raw bits.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Checks that all bits of `other` are set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Checks that any bit of `other` is set.
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl core::ops::BitOr for TypeMask {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        TypeMask(self.0 | other.0)
    }
}

/// How [`Matrix::set_rect_to_rect`] fits a source rect into a destination one.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ScaleToFit {
    /// Scales each axis independently to fill the destination.
    Fill,
    /// Keeps the aspect ratio, aligns to the left/top edge.
    Start,
    /// Keeps the aspect ratio, centers inside the destination.
    Center,
    /// Keeps the aspect ratio, aligns to the right/bottom edge.
    End,
}

/// A 3x3 transformation matrix with perspective.
///
/// Values are stored in row-major order:
///
/// ```text
/// | sx       kx       tx      |
/// | ky       sy       ty      |
/// | persp_0  persp_1  persp_2 |
/// ```
///
/// which is also the order of [`get_9`](Matrix::get_9).
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Matrix {
    pub sx: f32,
    pub kx: f32,
    pub tx: f32,
    pub ky: f32,
    pub sy: f32,
    pub ty: f32,
    pub persp_0: f32,
    pub persp_1: f32,
    pub persp_2: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix {
            sx: 1.0,
            kx: 0.0,
            tx: 0.0,
            ky: 0.0,
            sy: 1.0,
            ty: 0.0,
            persp_0: 0.0,
            persp_1: 0.0,
            persp_2: 1.0,
        }
    }
}

impl Matrix {
    /// Creates an identity matrix.
    pub fn identity() -> Self {
        Matrix::default()
    }

    /// Creates a new `Matrix` from 9 values in row-major order.
    pub fn from_row(
        sx: f32,
        kx: f32,
        tx: f32,
        ky: f32,
        sy: f32,
        ty: f32,
        persp_0: f32,
        persp_1: f32,
        persp_2: f32,
    ) -> Self {
        Matrix {
            sx,
            kx,
            tx,
            ky,
            sy,
            ty,
            persp_0,
            persp_1,
            persp_2,
        }
    }

    /// Creates a new affine `Matrix` from 6 values in row-major order.
    pub fn from_affine(sx: f32, kx: f32, tx: f32, ky: f32, sy: f32, ty: f32) -> Self {
        Matrix::from_row(sx, kx, tx, ky, sy, ty, 0.0, 0.0, 1.0)
    }

    /// Creates a new `Matrix` from a row-major array.
    pub fn from_9(values: &[f32; 9]) -> Self {
        let mut m = Matrix::identity();
        m.set_9(values);
        m
    }

    /// Creates a new translating `Matrix`.
    pub fn from_translate(tx: f32, ty: f32) -> Self {
        Matrix::from_affine(1.0, 0.0, tx, 0.0, 1.0, ty)
    }

    /// Creates a new scaling `Matrix`.
    pub fn from_scale(sx: f32, sy: f32) -> Self {
        Matrix::from_affine(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    /// Creates a new scaling `Matrix` around a pivot point.
    pub fn from_scale_at(sx: f32, sy: f32, px: f32, py: f32) -> Self {
        Matrix::from_scale_translate(sx, sy, px - sx * px, py - sy * py)
    }

    /// Creates a new scale and translate `Matrix`.
    pub fn from_scale_translate(sx: f32, sy: f32, tx: f32, ty: f32) -> Self {
        Matrix::from_affine(sx, 0.0, tx, 0.0, sy, ty)
    }

    /// Creates a new skewing `Matrix`.
    pub fn from_skew(kx: f32, ky: f32) -> Self {
        Matrix::from_affine(1.0, kx, 0.0, ky, 1.0, 0.0)
    }

    /// Creates a new rotating `Matrix`.
    ///
    /// `degrees` are clockwise in a Y-down coordinate system.
    pub fn from_rotate(degrees: f32) -> Self {
        let mut m = Matrix::identity();
        m.set_rotate(degrees);
        m
    }

    /// Creates a new rotating `Matrix` at the specified position.
    pub fn from_rotate_at(degrees: f32, px: f32, py: f32) -> Self {
        let mut m = Matrix::identity();
        m.set_rotate_at(degrees, px, py);
        m
    }

    /// Creates a new rotating `Matrix` from a sine and a cosine.
    pub fn from_sin_cos(sin: f32, cos: f32) -> Self {
        Matrix::from_affine(cos, -sin, 0.0, sin, cos, 0.0)
    }

    /// Returns the matrix type.
    ///
    /// Always computed from the current values.
    pub fn type_mask(&self) -> TypeMask {
        if self.persp_0 != 0.0 || self.persp_1 != 0.0 || self.persp_2 != 1.0 {
            return TypeMask::TRANSLATE | TypeMask::SCALE | TypeMask::AFFINE | TypeMask::PERSPECTIVE;
        }

        let mut mask = TypeMask::IDENTITY;
        if self.tx != 0.0 || self.ty != 0.0 {
            mask = mask | TypeMask::TRANSLATE;
        }

        if self.sx != 1.0 || self.sy != 1.0 {
            mask = mask | TypeMask::SCALE;
        }

        if self.kx != 0.0 || self.ky != 0.0 {
            mask = mask | TypeMask::AFFINE;
        }

        mask
    }

    /// Checks that matrix is identity.
    pub fn is_identity(&self) -> bool {
        self.type_mask() == TypeMask::IDENTITY
    }

    /// Checks that matrix is translate-only or identity.
    pub fn is_translate(&self) -> bool {
        self.type_mask().0 & !TypeMask::TRANSLATE.0 == 0
    }

    /// Checks that matrix contains only scale and translate, or is identity.
    pub fn is_scale_translate(&self) -> bool {
        self.type_mask().0 & !(TypeMask::SCALE.0 | TypeMask::TRANSLATE.0) == 0
    }

    /// Checks that matrix contains a skew part.
    pub fn has_skew(&self) -> bool {
        self.type_mask().intersects(TypeMask::AFFINE)
    }

    /// Checks that matrix has perspective.
    pub fn has_perspective(&self) -> bool {
        self.type_mask().intersects(TypeMask::PERSPECTIVE)
    }

    /// Checks that all values are finite.
    pub fn is_finite(&self) -> bool {
        self.get_9().iter().all(|v| v.is_finite())
    }

    /// Checks that a mapped rect will still be an axis-aligned rect.
    ///
    /// True for scale/translate with non-zero scale, and for
    /// 90/270 degree rotations.
    pub fn rect_stays_rect(&self) -> bool {
        let mask = self.type_mask();
        if mask.intersects(TypeMask::PERSPECTIVE) {
            return false;
        }

        if !mask.intersects(TypeMask::AFFINE) {
            self.sx != 0.0 && self.sy != 0.0
        } else {
            self.sx == 0.0 && self.sy == 0.0 && self.kx != 0.0 && self.ky != 0.0
        }
    }

    /// Same as [`rect_stays_rect`](Matrix::rect_stays_rect).
    pub fn preserves_axis_alignment(&self) -> bool {
        self.rect_stays_rect()
    }

    /// Checks that the matrix maps perpendicular vectors to perpendicular vectors.
    pub fn preserves_right_angles(&self, tolerance: f32) -> bool {
        let mask = self.type_mask();
        if mask.0 <= TypeMask::TRANSLATE.0 {
            return true;
        }

        if mask.intersects(TypeMask::PERSPECTIVE) {
            return false;
        }

        if is_degenerate_2x2(self.sx, self.kx, self.ky, self.sy) {
            return false;
        }

        let v0 = Point::from_xy(self.sx, self.ky);
        let v1 = Point::from_xy(self.kx, self.sy);
        v0.dot(v1).is_nearly_zero_within_tolerance(tolerance.sqr())
    }

    /// Checks that the matrix is a uniform scale, rotation and translation.
    pub fn is_similarity(&self, tolerance: f32) -> bool {
        let mask = self.type_mask();
        if mask.0 <= TypeMask::TRANSLATE.0 {
            return true;
        }

        if mask.intersects(TypeMask::PERSPECTIVE) {
            return false;
        }

        if is_degenerate_2x2(self.sx, self.kx, self.ky, self.sy) {
            return false;
        }

        if !mask.intersects(TypeMask::AFFINE) {
            return !self.sx.is_nearly_zero()
                && self
                    .sx
                    .abs()
                    .is_nearly_equal_within_tolerance(self.sy.abs(), tolerance);
        }

        self.sx.is_nearly_equal_within_tolerance(self.sy, tolerance)
            && self.kx.is_nearly_equal_within_tolerance(-self.ky, tolerance)
    }

    /// Returns all 9 values in row-major order.
    pub fn get_9(&self) -> [f32; 9] {
        [
            self.sx,
            self.kx,
            self.tx,
            self.ky,
            self.sy,
            self.ty,
            self.persp_0,
            self.persp_1,
            self.persp_2,
        ]
    }

    /// Sets all 9 values from a row-major array.
    pub fn set_9(&mut self, values: &[f32; 9]) -> &mut Self {
        self.set_all(
            values[0], values[1], values[2], values[3], values[4], values[5], values[6],
            values[7], values[8],
        )
    }

    /// Returns a value at the specified row and column.
    ///
    /// Equals to `get_9()[row * 3 + col]`.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        debug_assert!(row < 3 && col < 3);
        self.get_9()[row * 3 + col]
    }

    /// Sets all 9 values in row-major order.
    pub fn set_all(
        &mut self,
        sx: f32,
        kx: f32,
        tx: f32,
        ky: f32,
        sy: f32,
        ty: f32,
        persp_0: f32,
        persp_1: f32,
        persp_2: f32,
    ) -> &mut Self {
        *self = Matrix::from_row(sx, kx, tx, ky, sy, ty, persp_0, persp_1, persp_2);
        self
    }

    /// Resets the matrix to identity.
    pub fn set_identity(&mut self) -> &mut Self {
        *self = Matrix::identity();
        self
    }

    /// Sets the matrix to translate.
    pub fn set_translate(&mut self, tx: f32, ty: f32) -> &mut Self {
        *self = Matrix::from_translate(tx, ty);
        self
    }

    /// Sets the matrix to scale.
    pub fn set_scale(&mut self, sx: f32, sy: f32) -> &mut Self {
        *self = Matrix::from_scale(sx, sy);
        self
    }

    /// Sets the matrix to scale around a pivot point.
    pub fn set_scale_at(&mut self, sx: f32, sy: f32, px: f32, py: f32) -> &mut Self {
        *self = Matrix::from_scale_at(sx, sy, px, py);
        self
    }

    /// Sets the matrix to scale and translate.
    pub fn set_scale_translate(&mut self, sx: f32, sy: f32, tx: f32, ty: f32) -> &mut Self {
        *self = Matrix::from_scale_translate(sx, sy, tx, ty);
        self
    }

    /// Sets the matrix to skew.
    pub fn set_skew(&mut self, kx: f32, ky: f32) -> &mut Self {
        *self = Matrix::from_skew(kx, ky);
        self
    }

    /// Sets the matrix to skew around a pivot point.
    pub fn set_skew_at(&mut self, kx: f32, ky: f32, px: f32, py: f32) -> &mut Self {
        *self = Matrix::from_affine(1.0, kx, -kx * py, ky, 1.0, -ky * px);
        self
    }

    /// Sets the matrix to rotate by `degrees` around the origin.
    pub fn set_rotate(&mut self, degrees: f32) -> &mut Self {
        self.set_rotate_at(degrees, 0.0, 0.0)
    }

    /// Sets the matrix to rotate by `degrees` around a pivot point.
    pub fn set_rotate_at(&mut self, degrees: f32, px: f32, py: f32) -> &mut Self {
        let rad = degrees.to_radians();
        self.set_sin_cos_at(sin_snap_to_zero(rad), cos_snap_to_zero(rad), px, py)
    }

    /// Sets the matrix to rotate by sine and cosine values.
    pub fn set_sin_cos(&mut self, sin: f32, cos: f32) -> &mut Self {
        *self = Matrix::from_sin_cos(sin, cos);
        self
    }

    /// Sets the matrix to rotate by sine and cosine values around a pivot point.
    pub fn set_sin_cos_at(&mut self, sin: f32, cos: f32, px: f32, py: f32) -> &mut Self {
        let one_minus_cos = 1.0 - cos;
        *self = Matrix::from_affine(
            cos,
            -sin,
            dot(sin, py, one_minus_cos, px),
            sin,
            cos,
            dot(-sin, px, one_minus_cos, py),
        );
        self
    }

    /// Sets the matrix to `a * b`.
    pub fn set_concat(&mut self, a: &Matrix, b: &Matrix) -> &mut Self {
        *self = concat(a, b);
        self
    }

    /// Sets the matrix to map `src` onto `dst`.
    ///
    /// Returns `false` and resets to identity when `src` is empty.
    /// An empty `dst` produces a matrix that collapses everything into a point.
    pub fn set_rect_to_rect(&mut self, src: &Rect, dst: &Rect, fit: ScaleToFit) -> bool {
        if src.is_empty() {
            self.set_identity();
            return false;
        }

        if dst.is_empty() {
            *self = Matrix::from_affine(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
            return true;
        }

        let mut sx = dst.width() / src.width();
        let mut sy = dst.height() / src.height();
        let mut x_larger = false;

        if fit != ScaleToFit::Fill {
            if sx > sy {
                x_larger = true;
                sx = sy;
            } else {
                sy = sx;
            }
        }

        let mut tx = dst.left() - src.left() * sx;
        let mut ty = dst.top() - src.top() * sy;
        if fit == ScaleToFit::Center || fit == ScaleToFit::End {
            let mut diff = if x_larger {
                dst.width() - src.width() * sy
            } else {
                dst.height() - src.height() * sy
            };

            if fit == ScaleToFit::Center {
                diff = diff.half();
            }

            if x_larger {
                tx += diff;
            } else {
                ty += diff;
            }
        }

        self.set_scale_translate(sx, sy, tx, ty);
        true
    }

    /// Pre-translates the current matrix.
    pub fn pre_translate(&mut self, tx: f32, ty: f32) -> &mut Self {
        self.pre_concat(&Matrix::from_translate(tx, ty))
    }

    /// Post-translates the current matrix.
    pub fn post_translate(&mut self, tx: f32, ty: f32) -> &mut Self {
        self.post_concat(&Matrix::from_translate(tx, ty))
    }

    /// Pre-scales the current matrix.
    pub fn pre_scale(&mut self, sx: f32, sy: f32) -> &mut Self {
        self.pre_concat(&Matrix::from_scale(sx, sy))
    }

    /// Post-scales the current matrix.
    pub fn post_scale(&mut self, sx: f32, sy: f32) -> &mut Self {
        self.post_concat(&Matrix::from_scale(sx, sy))
    }

    /// Pre-skews the current matrix.
    pub fn pre_skew(&mut self, kx: f32, ky: f32) -> &mut Self {
        self.pre_concat(&Matrix::from_skew(kx, ky))
    }

    /// Post-skews the current matrix.
    pub fn post_skew(&mut self, kx: f32, ky: f32) -> &mut Self {
        self.post_concat(&Matrix::from_skew(kx, ky))
    }

    /// Pre-rotates the current matrix.
    pub fn pre_rotate(&mut self, degrees: f32) -> &mut Self {
        self.pre_concat(&Matrix::from_rotate(degrees))
    }

    /// Post-rotates the current matrix.
    pub fn post_rotate(&mut self, degrees: f32) -> &mut Self {
        self.post_concat(&Matrix::from_rotate(degrees))
    }

    /// Sets the matrix to `self * other`.
    ///
    /// `other` is applied to points first.
    pub fn pre_concat(&mut self, other: &Matrix) -> &mut Self {
        *self = concat(self, other);
        self
    }

    /// Sets the matrix to `other * self`.
    ///
    /// `other` is applied to points last.
    pub fn post_concat(&mut self, other: &Matrix) -> &mut Self {
        *self = concat(other, self);
        self
    }

    /// Returns an inverted matrix.
    ///
    /// Returns `None` when the matrix is singular or when the inverse
    /// cannot be represented by finite values.
    pub fn invert(&self) -> Option<Matrix> {
        let mask = self.type_mask();
        if mask == TypeMask::IDENTITY {
            return Some(Matrix::identity());
        }

        if self.is_scale_translate() {
            if mask.intersects(TypeMask::SCALE) {
                let inv_x = self.sx.invert();
                let inv_y = self.sy.invert();
                if !inv_x.is_finite() || !inv_y.is_finite() {
                    log::debug!("matrix is not invertible: a scale factor is zero or denormal");
                    return None;
                }

                let inv = Matrix::from_scale_translate(
                    inv_x,
                    inv_y,
                    -self.tx * inv_x,
                    -self.ty * inv_y,
                );
                return if inv.is_finite() { Some(inv) } else { None };
            }

            let inv = Matrix::from_translate(-self.tx, -self.ty);
            return if inv.is_finite() { Some(inv) } else { None };
        }

        let is_persp = mask.intersects(TypeMask::PERSPECTIVE);
        let inv_det = match inv_determinant(self, is_persp) {
            Some(v) => v,
            None => {
                log::debug!("matrix is not invertible: determinant is nearly zero");
                return None;
            }
        };

        let inv = compute_inv(self, inv_det, is_persp);
        if inv.is_finite() {
            Some(inv)
        } else {
            log::debug!("matrix is not invertible: inverse is not finite");
            None
        }
    }

    /// Maps a single point.
    pub fn map_point(&self, pt: Point) -> Point {
        let mut pts = [pt];
        self.map_points(&mut pts);
        pts[0]
    }

    /// Maps a single point given by its coordinates.
    pub fn map_xy(&self, x: f32, y: f32) -> Point {
        self.map_point(Point::from_xy(x, y))
    }

    /// Transforms a slice of points in-place.
    pub fn map_points(&self, points: &mut [Point]) {
        if points.is_empty() {
            return;
        }

        let mask = self.type_mask();
        if mask == TypeMask::IDENTITY {
            // Do nothing.
        } else if mask == TypeMask::TRANSLATE {
            for p in points {
                p.x += self.tx;
                p.y += self.ty;
            }
        } else if self.is_scale_translate() {
            for p in points {
                p.x = p.x * self.sx + self.tx;
                p.y = p.y * self.sy + self.ty;
            }
        } else if !mask.intersects(TypeMask::PERSPECTIVE) {
            for p in points {
                let x = p.x * self.sx + p.y * self.kx + self.tx;
                let y = p.x * self.ky + p.y * self.sy + self.ty;
                p.x = x;
                p.y = y;
            }
        } else {
            for p in points {
                let x = p.x * self.sx + p.y * self.kx + self.tx;
                let y = p.x * self.ky + p.y * self.sy + self.ty;
                let mut z = p.x * self.persp_0 + p.y * self.persp_1 + self.persp_2;
                if z != 0.0 {
                    z = z.invert();
                }

                p.x = x * z;
                p.y = y * z;
            }
        }
    }

    /// Transforms `src` points into `dst`.
    ///
    /// Both slices must have the same length.
    pub fn map_points_to(&self, src: &[Point], dst: &mut [Point]) {
        debug_assert_eq!(src.len(), dst.len());
        dst.copy_from_slice(src);
        self.map_points(dst);
    }

    /// Transforms a slice of vectors in-place.
    ///
    /// Translation is ignored.
    pub fn map_vectors(&self, vectors: &mut [Point]) {
        if self.has_perspective() {
            let origin = self.map_xy(0.0, 0.0);
            for v in vectors {
                *v = self.map_point(*v) - origin;
            }
        } else {
            let mut linear = *self;
            linear.tx = 0.0;
            linear.ty = 0.0;
            linear.map_points(vectors);
        }
    }

    /// Maps a rect and returns the bounds of the result.
    ///
    /// Returns `None` when the result is not finite.
    pub fn map_rect(&self, rect: &Rect) -> Option<Rect> {
        let mask = self.type_mask();
        if mask == TypeMask::IDENTITY {
            Some(*rect)
        } else if mask == TypeMask::TRANSLATE {
            rect.translate(self.tx, self.ty)
        } else if self.is_scale_translate() {
            // A negative scale flips the edges order.
            let l = rect.left() * self.sx + self.tx;
            let r = rect.right() * self.sx + self.tx;
            let t = rect.top() * self.sy + self.ty;
            let b = rect.bottom() * self.sy + self.ty;
            Rect::from_ltrb(l.min(r), t.min(b), l.max(r), t.max(b))
        } else {
            let mut quad = rect.to_quad();
            self.map_points(&mut quad);
            Rect::from_points(&quad)
        }
    }

    /// Returns the mean radius of a circle after mapping.
    ///
    /// Ignores translation and perspective.
    pub fn map_radius(&self, radius: f32) -> f32 {
        let mut vectors = [Point::from_xy(radius, 0.0), Point::from_xy(0.0, radius)];
        self.map_vectors(&mut vectors);
        let d0 = vectors[0].length();
        let d1 = vectors[1].length();
        (d0 * d1).sqrt()
    }

    /// Returns the minimum and maximum scale factors along any direction.
    ///
    /// Returns `None` for perspective matrices or on numeric overflow.
    pub fn compute_min_max_scales(&self) -> Option<(f32, f32)> {
        let mask = self.type_mask();
        if mask.intersects(TypeMask::PERSPECTIVE) {
            return None;
        }

        if mask == TypeMask::IDENTITY || mask == TypeMask::TRANSLATE {
            return Some((1.0, 1.0));
        }

        if !mask.intersects(TypeMask::AFFINE) {
            let a = self.sx.abs();
            let b = self.sy.abs();
            return Some((a.min(b), a.max(b)));
        }

        // Eigenvalues of M^T * M, a symmetric [a b; b c] matrix.
        let a = self.sx * self.sx + self.ky * self.ky;
        let b = self.sx * self.kx + self.sy * self.ky;
        let c = self.kx * self.kx + self.sy * self.sy;
        let b_sqd = b * b;

        let (mut min, mut max) = if b_sqd <= SCALAR_NEARLY_ZERO.sqr() {
            (a.min(c), a.max(c))
        } else {
            let a_minus_c = a - c;
            let a_plus_c_div_2 = (a + c).half();
            let x = (a_minus_c * a_minus_c + 4.0 * b_sqd).sqrt().half();
            (a_plus_c_div_2 - x, a_plus_c_div_2 + x)
        };

        if !min.is_finite() || !max.is_finite() {
            return None;
        }

        // Can be slightly negative due to rounding.
        min = min.max(0.0);
        max = max.max(0.0);
        Some((min.sqrt(), max.sqrt()))
    }

    /// Returns the maximum scale factor or `None` for perspective matrices.
    pub fn max_scale(&self) -> Option<f32> {
        self.compute_min_max_scales().map(|(_, max)| max)
    }

    /// Returns the minimum scale factor or `None` for perspective matrices.
    pub fn min_scale(&self) -> Option<f32> {
        self.compute_min_max_scales().map(|(min, _)| min)
    }
}

fn concat(a: &Matrix, b: &Matrix) -> Matrix {
    let a_mask = a.type_mask();
    let b_mask = b.type_mask();
    let mask = a_mask | b_mask;

    if a_mask == TypeMask::IDENTITY {
        *b
    } else if b_mask == TypeMask::IDENTITY {
        *a
    } else if mask.0 & !(TypeMask::SCALE.0 | TypeMask::TRANSLATE.0) == 0 {
        // just scale and translate
        Matrix::from_scale_translate(
            a.sx * b.sx,
            a.sy * b.sy,
            a.sx * b.tx + a.tx,
            a.sy * b.ty + a.ty,
        )
    } else if mask.intersects(TypeMask::PERSPECTIVE) {
        let a = a.get_9();
        let b = b.get_9();
        let mut m = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                m[row * 3 + col] = row_col_3(&a, row, &b, col);
            }
        }

        Matrix::from_9(&m)
    } else {
        Matrix::from_affine(
            mul_add_mul(a.sx, b.sx, a.kx, b.ky),
            mul_add_mul(a.sx, b.kx, a.kx, b.sy),
            mul_add_mul(a.sx, b.tx, a.kx, b.ty) + a.tx,
            mul_add_mul(a.ky, b.sx, a.sy, b.ky),
            mul_add_mul(a.ky, b.kx, a.sy, b.sy),
            mul_add_mul(a.ky, b.tx, a.sy, b.ty) + a.ty,
        )
    }
}

fn row_col_3(a: &[f32; 9], row: usize, b: &[f32; 9], col: usize) -> f32 {
    let r = row * 3;
    (f64::from(a[r]) * f64::from(b[col])
        + f64::from(a[r + 1]) * f64::from(b[col + 3])
        + f64::from(a[r + 2]) * f64::from(b[col + 6])) as f32
}

fn mul_add_mul(a: f32, b: f32, c: f32, d: f32) -> f32 {
    (f64::from(a) * f64::from(b) + f64::from(c) * f64::from(d)) as f32
}

fn dot(a: f32, b: f32, c: f32, d: f32) -> f32 {
    a * b + c * d
}

// a * b - c * d, in doubles
fn dcross(a: f32, b: f32, c: f32, d: f32) -> f64 {
    f64::from(a) * f64::from(b) - f64::from(c) * f64::from(d)
}

fn dcross_dscale(a: f32, b: f32, c: f32, d: f32, scale: f64) -> f32 {
    (dcross(a, b, c, d) * scale) as f32
}

fn is_degenerate_2x2(scale_x: f32, skew_x: f32, skew_y: f32, scale_y: f32) -> bool {
    let perp_dot = scale_x * scale_y - skew_x * skew_y;
    perp_dot.is_nearly_zero_within_tolerance(SCALAR_NEARLY_ZERO.sqr())
}

fn inv_determinant(m: &Matrix, is_persp: bool) -> Option<f64> {
    let det = if is_persp {
        f64::from(m.sx) * dcross(m.sy, m.persp_2, m.ty, m.persp_1)
            + f64::from(m.kx) * dcross(m.ty, m.persp_0, m.ky, m.persp_2)
            + f64::from(m.tx) * dcross(m.ky, m.persp_1, m.sy, m.persp_0)
    } else {
        dcross(m.sx, m.sy, m.kx, m.ky)
    };

    // Since the determinant is on the order of the cube of the matrix members,
    // compare to the cube of the default nearly-zero constant.
    let tolerance = SCALAR_NEARLY_ZERO * SCALAR_NEARLY_ZERO * SCALAR_NEARLY_ZERO;
    if (det as f32).is_nearly_zero_within_tolerance(tolerance) {
        None
    } else {
        Some(1.0 / det)
    }
}

fn compute_inv(m: &Matrix, inv_det: f64, is_persp: bool) -> Matrix {
    if is_persp {
        Matrix::from_row(
            dcross_dscale(m.sy, m.persp_2, m.ty, m.persp_1, inv_det),
            dcross_dscale(m.tx, m.persp_1, m.kx, m.persp_2, inv_det),
            dcross_dscale(m.kx, m.ty, m.tx, m.sy, inv_det),
            dcross_dscale(m.ty, m.persp_0, m.ky, m.persp_2, inv_det),
            dcross_dscale(m.sx, m.persp_2, m.tx, m.persp_0, inv_det),
            dcross_dscale(m.tx, m.ky, m.sx, m.ty, inv_det),
            dcross_dscale(m.ky, m.persp_1, m.sy, m.persp_0, inv_det),
            dcross_dscale(m.kx, m.persp_0, m.sx, m.persp_1, inv_det),
            dcross_dscale(m.sx, m.sy, m.kx, m.ky, inv_det),
        )
    } else {
        Matrix::from_affine(
            (f64::from(m.sy) * inv_det) as f32,
            (f64::from(-m.kx) * inv_det) as f32,
            dcross_dscale(m.kx, m.ty, m.sy, m.tx, inv_det),
            (f64::from(-m.ky) * inv_det) as f32,
            (f64::from(m.sx) * inv_det) as f32,
            dcross_dscale(m.ky, m.tx, m.sx, m.ty, inv_det),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1.0 / 200000.0;

    fn nearly_equal(a: &Matrix, b: &Matrix) -> bool {
        a.get_9()
            .iter()
            .zip(b.get_9().iter())
            .all(|(a, b)| (a - b).abs() <= TOLERANCE)
    }

    fn is_identity(m: &Matrix) -> bool {
        nearly_equal(m, &Matrix::identity())
    }

    fn check_invert_round_trip(m: &Matrix) {
        let inv = m.invert().unwrap();
        let mut a = Matrix::identity();
        a.set_concat(m, &inv);
        assert!(is_identity(&a), "{:?} * {:?} = {:?}", m, inv, a);
        a.set_concat(&inv, m);
        assert!(is_identity(&a), "{:?} * {:?} = {:?}", inv, m, a);
    }

    #[test]
    fn type_mask() {
        assert_eq!(Matrix::identity().type_mask(), TypeMask::IDENTITY);
        assert_eq!(Matrix::from_translate(1.0, 0.0).type_mask(), TypeMask::TRANSLATE);
        assert_eq!(Matrix::from_scale(2.0, 1.0).type_mask(), TypeMask::SCALE);
        assert_eq!(Matrix::from_skew(0.0, 0.5).type_mask(), TypeMask::AFFINE);
        assert_eq!(
            Matrix::from_row(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0).type_mask().bits(),
            0x0F
        );

        let ts = Matrix::from_affine(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(
            ts.type_mask(),
            TypeMask::TRANSLATE | TypeMask::SCALE | TypeMask::AFFINE
        );

        assert_eq!(Matrix::from_scale(1.0, 1.0).type_mask(), TypeMask::IDENTITY);
        assert_eq!(Matrix::from_skew(0.0, 0.0).type_mask(), TypeMask::IDENTITY);
        assert_eq!(Matrix::from_translate(0.0, 0.0).type_mask(), TypeMask::IDENTITY);
    }

    #[test]
    fn type_queries() {
        let ts = Matrix::identity();
        assert!(ts.is_identity());
        assert!(ts.is_translate());
        assert!(ts.is_scale_translate());
        assert!(!ts.has_perspective());
        assert!(ts.rect_stays_rect());

        let ts = Matrix::from_translate(2.0, 3.0);
        assert!(!ts.is_identity());
        assert!(ts.is_translate());
        assert!(ts.is_scale_translate());

        let ts = Matrix::from_scale(2.0, 3.0);
        assert!(!ts.is_translate());
        assert!(ts.is_scale_translate());
        assert!(ts.rect_stays_rect());

        let ts = Matrix::from_scale(0.0, 3.0);
        assert!(!ts.rect_stays_rect());

        let ts = Matrix::from_rotate(90.0);
        assert!(ts.rect_stays_rect());
        assert!(ts.preserves_right_angles(SCALAR_NEARLY_ZERO));
        assert!(ts.is_similarity(SCALAR_NEARLY_ZERO));

        let ts = Matrix::from_rotate(30.0);
        assert!(!ts.rect_stays_rect());
        assert!(ts.preserves_right_angles(SCALAR_NEARLY_ZERO));
        assert!(ts.is_similarity(SCALAR_NEARLY_ZERO));

        let ts = Matrix::from_skew(0.5, 0.0);
        assert!(!ts.preserves_right_angles(SCALAR_NEARLY_ZERO));
        assert!(!ts.is_similarity(SCALAR_NEARLY_ZERO));

        let ts = Matrix::from_scale(2.0, 3.0);
        assert!(ts.preserves_right_angles(SCALAR_NEARLY_ZERO));
        assert!(!ts.is_similarity(SCALAR_NEARLY_ZERO));

        let ts = Matrix::from_row(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.01, 0.0, 1.0);
        assert!(ts.has_perspective());
        assert!(!ts.rect_stays_rect());
        assert!(!ts.is_scale_translate());
    }

    #[test]
    fn interchange() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let ts = Matrix::from_9(&values);
        assert_eq!(ts.get_9(), values);
        assert_eq!(ts.sx, 1.0);
        assert_eq!(ts.kx, 2.0);
        assert_eq!(ts.tx, 3.0);
        assert_eq!(ts.ky, 4.0);
        assert_eq!(ts.persp_2, 9.0);
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(ts.get(row, col), values[row * 3 + col]);
            }
        }
    }

    #[test]
    fn rotate() {
        let ts = Matrix::from_rotate(90.0);
        assert_eq!(ts, Matrix::from_affine(0.0, -1.0, 0.0, 1.0, 0.0, 0.0));
        assert_eq!(ts.map_xy(1.0, 0.0), Point::from_xy(0.0, 1.0));

        let ts = Matrix::from_rotate_at(180.0, 10.0, 10.0);
        assert_eq!(ts.map_xy(0.0, 0.0), Point::from_xy(20.0, 20.0));
    }

    #[test]
    fn concat() {
        let mut ts = Matrix::from_affine(1.2, -5.6, 1.2, 3.4, -7.8, 3.4);
        ts.pre_scale(2.0, -4.0);
        assert_eq!(ts, Matrix::from_affine(2.4, 22.4, 1.2, 6.8, 31.2, 3.4));

        let mut ts = Matrix::from_affine(1.2, -5.6, 1.2, 3.4, -7.8, 3.4);
        ts.post_scale(2.0, -4.0);
        assert_eq!(ts, Matrix::from_affine(2.4, -11.2, 2.4, -13.6, 31.2, -13.6));
    }

    #[test]
    fn concat_scale_translate() {
        let mut ts = Matrix::identity();
        ts.set_scale(2.0, 3.0);
        ts.post_translate(1.0, 4.0);
        assert_eq!(ts, Matrix::from_scale_translate(2.0, 3.0, 1.0, 4.0));

        let mut ts = Matrix::from_scale(2.0, 3.0);
        ts.pre_translate(1.0, 4.0);
        assert_eq!(ts, Matrix::from_scale_translate(2.0, 3.0, 2.0, 12.0));
    }

    #[test]
    fn concat_perspective() {
        let p = Matrix::from_row(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.5, 0.0, 1.0);
        let mut ts = Matrix::from_translate(10.0, 0.0);
        ts.pre_concat(&p);
        assert!(ts.has_perspective());
        // Translation is applied after the perspective divide.
        let pt = ts.map_xy(2.0, 0.0);
        assert_eq!(pt, Point::from_xy(11.0, 0.0));
    }

    #[test]
    fn concat_associativity() {
        let a = Matrix::from_rotate_at(30.0, 5.0, 7.0);
        let b = Matrix::from_scale_translate(2.0, 0.5, -3.0, 4.0);
        let c = Matrix::from_skew(0.25, -0.125);

        let mut ab = Matrix::identity();
        ab.set_concat(&a, &b);
        let mut ab_c = Matrix::identity();
        ab_c.set_concat(&ab, &c);

        let mut bc = Matrix::identity();
        bc.set_concat(&b, &c);
        let mut a_bc = Matrix::identity();
        a_bc.set_concat(&a, &bc);

        let max_diff = ab_c
            .get_9()
            .iter()
            .zip(a_bc.get_9().iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        assert!(max_diff < 1e-5);
    }

    #[test]
    fn invert_identity_and_translate() {
        assert_eq!(Matrix::identity().invert(), Some(Matrix::identity()));
        assert_eq!(
            Matrix::from_translate(10.0, -5.0).invert(),
            Some(Matrix::from_translate(-10.0, 5.0))
        );
        assert_eq!(
            Matrix::from_scale_translate(2.0, 4.0, 10.0, 20.0).invert(),
            Some(Matrix::from_scale_translate(0.5, 0.25, -5.0, -5.0))
        );
    }

    #[test]
    fn invert_round_trip() {
        let mut m = Matrix::from_translate(1.0, 1.0);
        check_invert_round_trip(&m);

        m.set_scale(2.0, 4.0);
        check_invert_round_trip(&m);

        m.set_scale(1.5, 4.0);
        m.post_rotate(35.0);
        m.post_translate(1.0, 1.0);
        check_invert_round_trip(&m);

        m.set_skew(0.5, -0.25);
        m.post_scale(2.0, 1.0);
        check_invert_round_trip(&m);

        m.set_rotate(90.0);
        check_invert_round_trip(&m);

        let m = Matrix::from_row(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.01, 0.02, 1.0);
        check_invert_round_trip(&m);
    }

    #[test]
    fn non_invertible() {
        assert_eq!(Matrix::from_scale(0.0, 1.0).invert(), None);
        assert_eq!(Matrix::from_scale(1.0, 0.0).invert(), None);

        let denorm = f32::from_bits(1);
        assert_eq!(Matrix::from_scale(denorm, denorm).invert(), None);
        assert_eq!(Matrix::from_scale(denorm, 1.0).invert(), None);

        // Rank 1 matrix.
        assert_eq!(Matrix::from_affine(1.0, 2.0, 0.0, 2.0, 4.0, 0.0).invert(), None);

        // Perspective with a zero determinant.
        let m = Matrix::from_row(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0);
        assert_eq!(m.invert(), None);

        let m = Matrix::from_translate(core::f32::INFINITY, 0.0);
        assert_eq!(m.invert(), None);
    }

    #[test]
    fn map_rect_scale_translate() {
        let mut ts = Matrix::identity();
        ts.set_scale(2.0, 3.0);
        ts.post_translate(1.0, 4.0);
        let r = Rect::from_ltrb(10.0, 20.0, 30.0, 40.0).unwrap();
        assert_eq!(ts.map_rect(&r), Rect::from_ltrb(21.0, 64.0, 61.0, 124.0));
    }

    #[test]
    fn map_rect_negative_scale() {
        let ts = Matrix::from_scale(-1.0, -2.0);
        let r = Rect::from_ltrb(10.0, 20.0, 30.0, 40.0).unwrap();
        assert_eq!(ts.map_rect(&r), Rect::from_ltrb(-30.0, -80.0, -10.0, -40.0));
    }

    #[test]
    fn map_rect_matches_mapped_corners() {
        let r = Rect::from_ltrb(-5.0, 2.0, 7.0, 13.0).unwrap();
        let matrices = [
            Matrix::from_translate(3.0, -4.0),
            Matrix::from_scale(-2.0, 0.5),
            Matrix::from_rotate_at(33.0, 1.0, 2.0),
            Matrix::from_skew(0.3, -0.7),
            Matrix::from_row(1.0, 0.2, 3.0, -0.1, 2.0, 1.0, 0.001, 0.002, 1.0),
        ];

        for ts in &matrices {
            let mut quad = r.to_quad();
            ts.map_points(&mut quad);
            assert_eq!(ts.map_rect(&r), Rect::from_points(&quad), "{:?}", ts);
        }
    }

    #[test]
    fn map_perspective() {
        let ts = Matrix::from_row(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0);
        assert_eq!(ts.map_xy(4.0, 6.0), Point::from_xy(2.0, 3.0));

        // A zero w keeps the unprojected point.
        let ts = Matrix::from_row(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0);
        assert_eq!(ts.map_xy(0.0, 5.0), Point::from_xy(0.0, 5.0));
    }

    #[test]
    fn map_vectors_ignores_translation() {
        let ts = Matrix::from_scale_translate(2.0, 3.0, 100.0, 100.0);
        let mut v = [Point::from_xy(1.0, 1.0)];
        ts.map_vectors(&mut v);
        assert_eq!(v[0], Point::from_xy(2.0, 3.0));
        assert_eq!(ts.map_radius(1.0), 6.0f32.sqrt());
    }

    #[test]
    fn min_max_scales() {
        assert_eq!(Matrix::from_scale(2.0, -5.0).compute_min_max_scales(), Some((2.0, 5.0)));
        assert_eq!(Matrix::from_translate(2.0, 5.0).max_scale(), Some(1.0));

        let mut ts = Matrix::from_scale(2.0, 3.0);
        ts.post_rotate(45.0);
        let (min, max) = ts.compute_min_max_scales().unwrap();
        assert!((min - 2.0).abs() < 1e-4);
        assert!((max - 3.0).abs() < 1e-4);

        let ts = Matrix::from_row(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.1, 0.0, 1.0);
        assert_eq!(ts.min_scale(), None);
    }

    #[test]
    fn rect_to_rect() {
        let src = Rect::from_ltrb(0.0, 0.0, 10.0, 20.0).unwrap();
        let dst = Rect::from_ltrb(0.0, 0.0, 40.0, 40.0).unwrap();

        let mut ts = Matrix::identity();
        assert!(ts.set_rect_to_rect(&src, &dst, ScaleToFit::Fill));
        assert_eq!(ts, Matrix::from_scale(4.0, 2.0));

        assert!(ts.set_rect_to_rect(&src, &dst, ScaleToFit::Start));
        assert_eq!(ts, Matrix::from_scale(2.0, 2.0));

        assert!(ts.set_rect_to_rect(&src, &dst, ScaleToFit::Center));
        assert_eq!(ts, Matrix::from_scale_translate(2.0, 2.0, 10.0, 0.0));

        assert!(ts.set_rect_to_rect(&src, &dst, ScaleToFit::End));
        assert_eq!(ts, Matrix::from_scale_translate(2.0, 2.0, 20.0, 0.0));

        assert!(!ts.set_rect_to_rect(&Rect::zero(), &dst, ScaleToFit::Fill));
        assert!(ts.is_identity());
    }
}
