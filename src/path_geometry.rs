// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Curve evaluation, extrema and unit arc construction.

use arrayref::array_mut_ref;

use crate::floating_point::NormalizedF32Exclusive;
use crate::path::PathDirection;
use crate::scalar::{Scalar, SCALAR_NEARLY_ZERO, SCALAR_ROOT_2_OVER_2};
use crate::wide::f32x2;
use crate::{Matrix, Point};

#[cfg(all(not(feature = "std"), feature = "libm"))]
use crate::scalar::FloatExt;

/// The maximum number of conics a single arc can produce.
pub const MAX_CONICS_FOR_ARC: usize = 5;

/// Returns `numer / denom` when the result lies in the `0 < t < 1` range.
///
/// Rejects zero, NaN, out of range results and results that underflow to zero.
pub fn valid_unit_divide(mut numer: f32, mut denom: f32) -> Option<NormalizedF32Exclusive> {
    if numer < 0.0 {
        numer = -numer;
        denom = -denom;
    }

    if denom == 0.0 || numer == 0.0 || numer >= denom {
        return None;
    }

    let r = numer / denom;
    // Catch underflow if numer <<<< denom.
    if r == 0.0 {
        return None;
    }

    NormalizedF32Exclusive::new(r)
}

/// Finds the roots of `A*t^2 + B*t + C = 0` that lie inside the `0 < t < 1` range.
///
/// Roots are written sorted and deduplicated. Returns the number of roots.
pub fn find_unit_quad_roots(
    a: f32,
    b: f32,
    c: f32,
    roots: &mut [NormalizedF32Exclusive; 2],
) -> usize {
    if a == 0.0 {
        return match valid_unit_divide(-c, b) {
            Some(r) => {
                roots[0] = r;
                1
            }
            None => 0,
        };
    }

    // Use doubles so we don't overflow temporarily trying to compute R.
    let mut dr = f64::from(b) * f64::from(b) - 4.0 * f64::from(a) * f64::from(c);
    if dr < 0.0 {
        return 0;
    }
    dr = dr.sqrt();
    let r = dr as f32;
    if !r.is_finite() {
        return 0;
    }

    let q = if b < 0.0 { -(b - r) / 2.0 } else { -(b + r) / 2.0 };

    let mut n = 0;
    if let Some(root) = valid_unit_divide(q, a) {
        roots[n] = root;
        n += 1;
    }

    if let Some(root) = valid_unit_divide(c, q) {
        roots[n] = root;
        n += 1;
    }

    if n == 2 {
        if roots[0].get() > roots[1].get() {
            roots.swap(0, 1);
        } else if roots[0] == roots[1] {
            // Skip the double root.
            n -= 1;
        }
    }

    n
}

/// Returns the parameter at which a quadratic coordinate reaches its extremum.
pub(crate) fn find_quad_extrema(a: f32, b: f32, c: f32) -> Option<NormalizedF32Exclusive> {
    valid_unit_divide(a - b, a - b - b + c)
}

/// Finds up to two parameters at which a cubic coordinate reaches its extrema.
pub(crate) fn find_cubic_extrema(
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    t_values: &mut [NormalizedF32Exclusive; 2],
) -> usize {
    // we divide A,B,C by 3 to simplify
    let aa = d - a + 3.0 * (b - c);
    let bb = 2.0 * (a - b - b + c);
    let cc = b - a;

    find_unit_quad_roots(aa, bb, cc, t_values)
}

pub(crate) fn eval_quad_at(src: &[Point; 3], t: f32) -> Point {
    Point::from_f32x2(QuadCoeff::from_points(src).eval(f32x2::splat(t)))
}

pub(crate) fn eval_cubic_at(src: &[Point; 4], t: f32) -> Point {
    Point::from_f32x2(CubicCoeff::from_points(src).eval(f32x2::splat(t)))
}

/// Writes the quad extrema followed by the end point. Returns the number of points written.
pub(crate) fn compute_quad_extremas(src: &[Point; 3], extremas: &mut [Point; 5]) -> usize {
    let mut ts = [NormalizedF32Exclusive::ANY; 2];
    let mut n = 0;
    if let Some(t) = find_quad_extrema(src[0].x, src[1].x, src[2].x) {
        ts[n] = t;
        n += 1;
    }
    if let Some(t) = find_quad_extrema(src[0].y, src[1].y, src[2].y) {
        ts[n] = t;
        n += 1;
    }

    for i in 0..n {
        extremas[i] = eval_quad_at(src, ts[i].get());
    }
    extremas[n] = src[2];
    n + 1
}

/// Writes the conic extrema followed by the end point. Returns the number of points written.
pub(crate) fn compute_conic_extremas(src: &[Point; 3], w: f32, extremas: &mut [Point; 5]) -> usize {
    let conic = Conic::new(src[0], src[1], src[2], w);
    let mut ts = [NormalizedF32Exclusive::ANY; 2];
    let mut n = 0;
    if let Some(t) = conic.find_x_extrema() {
        ts[n] = t;
        n += 1;
    }
    if let Some(t) = conic.find_y_extrema() {
        ts[n] = t;
        n += 1;
    }

    for i in 0..n {
        extremas[i] = conic.eval_at(ts[i].get());
    }
    extremas[n] = src[2];
    n + 1
}

/// Writes the cubic extrema followed by the end point. Returns the number of points written.
pub(crate) fn compute_cubic_extremas(src: &[Point; 4], extremas: &mut [Point; 5]) -> usize {
    let mut ts = [NormalizedF32Exclusive::ANY; 4];
    let mut n = find_cubic_extrema(src[0].x, src[1].x, src[2].x, src[3].x, array_mut_ref![ts, 0, 2]);
    n += find_cubic_extrema(src[0].y, src[1].y, src[2].y, src[3].y, array_mut_ref![ts, n, 2]);

    for i in 0..n {
        extremas[i] = eval_cubic_at(src, ts[i].get());
    }
    extremas[n] = src[3];
    n + 1
}

fn times_2(value: f32x2) -> f32x2 {
    value + value
}

struct QuadCoeff {
    a: f32x2,
    b: f32x2,
    c: f32x2,
}

impl QuadCoeff {
    fn from_points(points: &[Point; 3]) -> Self {
        let p0 = points[0].to_f32x2();
        let p1 = points[1].to_f32x2();
        let p2 = points[2].to_f32x2();
        let b = times_2(p1 - p0);
        let a = p2 - times_2(p1) + p0;

        QuadCoeff { a, b, c: p0 }
    }

    fn eval(&self, t: f32x2) -> f32x2 {
        (self.a * t + self.b) * t + self.c
    }
}

struct CubicCoeff {
    a: f32x2,
    b: f32x2,
    c: f32x2,
    d: f32x2,
}

impl CubicCoeff {
    fn from_points(points: &[Point; 4]) -> Self {
        let p0 = points[0].to_f32x2();
        let p1 = points[1].to_f32x2();
        let p2 = points[2].to_f32x2();
        let p3 = points[3].to_f32x2();
        let three = f32x2::splat(3.0);

        CubicCoeff {
            a: p3 + three * (p1 - p2) - p0,
            b: three * (p2 - times_2(p1) + p0),
            c: three * (p1 - p0),
            d: p0,
        }
    }

    fn eval(&self, t: f32x2) -> f32x2 {
        ((self.a * t + self.b) * t + self.c) * t + self.d
    }
}

/// A rational quadratic Bézier.
#[allow(missing_docs)]
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct Conic {
    pub points: [Point; 3],
    pub weight: f32,
}

impl Conic {
    /// Creates a new `Conic`.
    pub fn new(pt0: Point, pt1: Point, pt2: Point, weight: f32) -> Self {
        Conic {
            points: [pt0, pt1, pt2],
            weight,
        }
    }

    /// Creates a new `Conic` from the first three points of a slice.
    pub fn from_points(points: &[Point], weight: f32) -> Self {
        Conic {
            points: *arrayref::array_ref![points, 0, 3],
            weight,
        }
    }

    /// Evaluates the curve at `t`.
    pub fn eval_at(&self, t: f32) -> Point {
        let p0 = self.points[0].to_f32x2();
        let p1 = self.points[1].to_f32x2();
        let p2 = self.points[2].to_f32x2();
        let ww = f32x2::splat(self.weight);
        let one = f32x2::splat(1.0);

        let p1w = p1 * ww;
        let numer = QuadCoeff {
            a: p2 - times_2(p1w) + p0,
            b: times_2(p1w - p0),
            c: p0,
        };

        let denom_b = times_2(ww - one);
        let denom = QuadCoeff {
            a: f32x2::splat(0.0) - denom_b,
            b: denom_b,
            c: one,
        };

        let tt = f32x2::splat(t);
        Point::from_f32x2(numer.eval(tt) / denom.eval(tt))
    }

    fn find_x_extrema(&self) -> Option<NormalizedF32Exclusive> {
        conic_find_extrema(
            &[self.points[0].x, self.points[1].x, self.points[2].x],
            self.weight,
        )
    }

    fn find_y_extrema(&self) -> Option<NormalizedF32Exclusive> {
        conic_find_extrema(
            &[self.points[0].y, self.points[1].y, self.points[2].y],
            self.weight,
        )
    }

    /// Builds up to five conics approximating a unit circle arc.
    ///
    /// The arc goes from `u_start` to `u_stop`, both unit vectors, in the
    /// `dir` direction. Every produced conic is mapped by `user_matrix`.
    ///
    /// Returns `None` when the vectors coincide and no arc is needed.
    pub fn build_unit_arc<'a>(
        u_start: Point,
        u_stop: Point,
        dir: PathDirection,
        user_matrix: &Matrix,
        dst: &'a mut [Conic; MAX_CONICS_FOR_ARC],
    ) -> Option<&'a [Conic]> {
        // rotate by x,y so that u_start is (1.0)
        let x = u_start.dot(u_stop);
        let mut y = u_start.cross(u_stop);
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        let abs_y = y.abs();

        // check for (effectively) coincident vectors
        // this can happen if our angle is nearly 0 or nearly 180 (y == 0)
        // ... we use the dot-prod to distinguish between 0 and 180 (x > 0)
        if abs_y <= SCALAR_NEARLY_ZERO
            && x > 0.0
            && ((y >= 0.0 && dir == PathDirection::Cw) || (y <= 0.0 && dir == PathDirection::Ccw))
        {
            return None;
        }

        if dir == PathDirection::Ccw {
            y = -y;
        }

        // We decide to use 1-conic per quadrant of a circle. What quadrant does [xy] lie in?
        let mut quadrant = 0;
        if y == 0.0 {
            quadrant = 2; // 180
            debug_assert!((x + 1.0).abs() <= SCALAR_NEARLY_ZERO);
        } else if x == 0.0 {
            debug_assert!(abs_y - 1.0 <= SCALAR_NEARLY_ZERO);
            quadrant = if y > 0.0 { 1 } else { 3 }; // 90 / 270
        } else {
            if y < 0.0 {
                quadrant += 2;
            }

            if (x < 0.0) != (y < 0.0) {
                quadrant += 1;
            }
        }

        let quadrant_points = [
            Point::from_xy(1.0, 0.0),
            Point::from_xy(1.0, 1.0),
            Point::from_xy(0.0, 1.0),
            Point::from_xy(-1.0, 1.0),
            Point::from_xy(-1.0, 0.0),
            Point::from_xy(-1.0, -1.0),
            Point::from_xy(0.0, -1.0),
            Point::from_xy(1.0, -1.0),
        ];

        let mut conic_count = quadrant;
        for i in 0..conic_count {
            dst[i] = Conic::from_points(&quadrant_points[i * 2..], SCALAR_ROOT_2_OVER_2);
        }

        // Now compute any remaining (sub-90-degree) arc for the last conic.
        let final_pt = Point::from_xy(x, y);
        let last_q = quadrant_points[quadrant * 2]; // will already be a unit-vector
        let dot = last_q.dot(final_pt);
        debug_assert!(0.0 <= dot && dot <= 1.0 + SCALAR_NEARLY_ZERO);

        if dot < 1.0 {
            let mut off_curve = Point::from_xy(last_q.x + x, last_q.y + y);
            // compute the bisector vector, and then rescale to be the off-curve point.
            // we compute its length from cos(theta/2) = length / 1, using half-angle identity we get
            // length = sqrt(2 / (1 + cos(theta)). We already have cos() when to computed the dot.
            // This is nice, since our computed weight is cos(theta/2) as well!
            let cos_theta_over_2 = ((1.0 + dot) / 2.0).sqrt();
            off_curve.set_length(cos_theta_over_2.invert());
            if !last_q.almost_equal(off_curve) {
                dst[conic_count] = Conic::new(last_q, off_curve, final_pt, cos_theta_over_2);
                conic_count += 1;
            }
        }

        // now build the matrix
        let mut matrix = Matrix::from_sin_cos(u_start.y, u_start.x);
        if dir == PathDirection::Ccw {
            matrix.pre_scale(1.0, -1.0);
        }
        matrix.post_concat(user_matrix);

        for conic in dst.iter_mut().take(conic_count) {
            matrix.map_points(&mut conic.points);
        }

        if conic_count == 0 {
            None
        } else {
            Some(&dst[0..conic_count])
        }
    }
}

fn conic_find_extrema(src: &[f32; 3], w: f32) -> Option<NormalizedF32Exclusive> {
    let p20 = src[2] - src[0];
    let p10 = src[1] - src[0];
    let w_p10 = w * p10;
    let coeff = [w * p20 - p20, p20 - 2.0 * w_p10, w_p10];

    let mut t_values = [NormalizedF32Exclusive::ANY; 2];
    let n = find_unit_quad_roots(coeff[0], coeff[1], coeff[2], &mut t_values);
    debug_assert!(n <= 1);
    if n >= 1 {
        Some(t_values[0])
    } else {
        None
    }
}
