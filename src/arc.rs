// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Conversion of circular and elliptical arcs into conics.

use core::f32::consts::PI;

use crate::path::{Path, PathDirection};
use crate::path_geometry::{Conic, MAX_CONICS_FOR_ARC};
use crate::scalar::{cos_snap_to_zero, round_to_scalar, sin_snap_to_zero, Scalar};
use crate::{Matrix, Point, Rect};

#[cfg(all(not(feature = "std"), feature = "libm"))]
use crate::scalar::FloatExt;

/// Selects which of the two possible elliptical arcs to draw.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ArcSize {
    /// The smaller of the two arcs.
    Small,
    /// The larger of the two arcs.
    Large,
}

impl Path {
    /// Appends an arc of an ellipse inscribed in `oval`.
    ///
    /// Angles are in degrees, starting at the positive X axis and growing clockwise.
    /// A positive `sweep_angle` sweeps clockwise.
    ///
    /// When `force_move_to` is set, or the path is empty, the arc starts a new contour.
    /// Otherwise a line joins the last point and the arc start.
    pub fn arc_to(&mut self, oval: &Rect, start_angle: f32, sweep_angle: f32, force_move_to: bool) {
        if !start_angle.is_finite() || !sweep_angle.is_finite() {
            log::debug!("arc angles are not finite");
            return;
        }

        let start_angle = start_angle % 360.0;
        let force_move_to = force_move_to || self.verbs.is_empty();

        if let Some(pt) = arc_lone_point(oval, start_angle, sweep_angle) {
            log::trace!("arc collapses to a point");
            self.add_arc_point(pt, force_move_to);
            return;
        }

        let (start_v, stop_v, dir) = angles_to_unit_vectors(start_angle, sweep_angle);

        // Adding the arc will not add any conics when the vectors match.
        // Reproduce the end point exactly, without snapping sin and cos.
        if start_v == stop_v {
            let end_angle = (start_angle + sweep_angle).to_radians();
            let radius_x = oval.width() / 2.0;
            let radius_y = oval.height() / 2.0;
            let single_pt = Point::from_xy(
                oval.center_x() + radius_x * end_angle.cos(),
                oval.center_y() + radius_y * end_angle.sin(),
            );
            self.add_arc_point(single_pt, force_move_to);
            return;
        }

        let mut matrix = Matrix::from_scale(oval.width() * 0.5, oval.height() * 0.5);
        matrix.post_translate(oval.center_x(), oval.center_y());

        let mut conics = [Conic::default(); MAX_CONICS_FOR_ARC];
        match Conic::build_unit_arc(start_v, stop_v, dir, &matrix, &mut conics) {
            Some(conics) => {
                self.inc_reserve(conics.len() * 2 + 1);
                self.add_arc_point(conics[0].points[0], force_move_to);
                for conic in conics {
                    self.conic_points_to(conic.points[1], conic.points[2], conic.weight);
                }
            }
            None => {
                let single_pt = matrix.map_point(stop_v);
                self.add_arc_point(single_pt, force_move_to);
            }
        }
    }

    fn add_arc_point(&mut self, pt: Point, force_move_to: bool) {
        if force_move_to {
            self.move_to(pt.x, pt.y);
            return;
        }

        let is_near_last = match self.last_point() {
            Some(last) => last.x.is_nearly_equal(pt.x) && last.y.is_nearly_equal(pt.y),
            None => false,
        };

        if !is_near_last {
            self.line_to(pt.x, pt.y);
        }
    }

    /// Appends a circular arc tangent to the lines from the last point to `(x1, y1)`
    /// and from `(x1, y1)` to `(x2, y2)`.
    ///
    /// A line to `(x1, y1)` connects the last point and the arc start.
    /// When the lines are parallel or `radius` is zero, only the line is added.
    pub fn arc_to_tangent(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
        self.inject_move_to_if_needed();

        if radius == 0.0 {
            self.line_to(x1, y1);
            return;
        }

        // need to know our prev pt so we can construct tangent vectors
        let start = self.last_point().unwrap_or_default();

        // need double precision for these calcs.
        let before = normalize_f64(x1 as f64 - start.x as f64, y1 as f64 - start.y as f64);
        let after = normalize_f64(x2 as f64 - x1 as f64, y2 as f64 - y1 as f64);
        let cosh = before.0 * after.0 + before.1 * after.1;
        let sinh = before.0 * after.1 - before.1 * after.0;

        let is_finite =
            before.0.is_finite() && before.1.is_finite() && after.0.is_finite() && after.1.is_finite();
        if !is_finite || (sinh as f32).is_nearly_zero() {
            // angle is too tight
            log::trace!("tangent arc degenerates to a line");
            self.line_to(x1, y1);
            return;
        }

        // safe to convert back to floats now
        let before = Point::from_xy(before.0 as f32, before.1 as f32);
        let mut after = Point::from_xy(after.0 as f32, after.1 as f32);

        let dist = ((radius as f64 * (1.0 - cosh) / sinh) as f32).abs();
        let xx = x1 - dist * before.x;
        let yy = y1 - dist * before.y;
        after.set_length(dist);

        self.line_to(xx, yy);
        let weight = (0.5 + cosh * 0.5).sqrt() as f32;
        self.conic_to(x1, y1, x1 + after.x, y1 + after.y, weight);
    }

    /// Appends an elliptical arc in the SVG endpoint parameterization.
    ///
    /// The ellipse has radii `rx` and `ry` and is rotated by `x_axis_rotate` degrees.
    /// The arc ends at `(x, y)`. Radii too small to reach the end point are scaled up.
    /// Zero radii or a zero length arc produce a line.
    pub fn arc_to_rotated(
        &mut self,
        rx: f32,
        ry: f32,
        x_axis_rotate: f32,
        arc_size: ArcSize,
        sweep: PathDirection,
        x: f32,
        y: f32,
    ) {
        self.inject_move_to_if_needed();

        let src_pts = [self.last_point().unwrap_or_default(), Point::from_xy(x, y)];

        // If rx = 0 or ry = 0 then this arc is treated as a straight line segment (a "lineto")
        // joining the endpoints.
        if rx == 0.0 || ry == 0.0 {
            self.line_to(x, y);
            return;
        }

        // If the current point and target point for the arc are identical,
        // it should be treated as a zero length path.
        if src_pts[0] == src_pts[1] {
            self.line_to(x, y);
            return;
        }

        let mut rx = rx.abs();
        let mut ry = ry.abs();

        let mid_point_distance = (src_pts[0] - src_pts[1]).scaled(0.5);
        let transformed_mid_point = Matrix::from_rotate(-x_axis_rotate).map_point(mid_point_distance);

        let square_x = transformed_mid_point.x * transformed_mid_point.x;
        let square_y = transformed_mid_point.y * transformed_mid_point.y;

        // Check if the radii are big enough to draw the arc, scale radii if not.
        let radii_scale = square_x / (rx * rx) + square_y / (ry * ry);
        if radii_scale > 1.0 {
            let radii_scale = radii_scale.sqrt();
            rx *= radii_scale;
            ry *= radii_scale;
        }

        let mut point_transform = Matrix::from_scale(1.0 / rx, 1.0 / ry);
        point_transform.pre_rotate(-x_axis_rotate);

        let mut unit_pts = src_pts;
        point_transform.map_points(&mut unit_pts);

        let mut delta = unit_pts[1] - unit_pts[0];
        let d = delta.x * delta.x + delta.y * delta.y;
        let scale_factor_squared = (1.0 / d - 0.25).max(0.0);
        let mut scale_factor = scale_factor_squared.sqrt();
        if (sweep == PathDirection::Ccw) != (arc_size == ArcSize::Large) {
            scale_factor = -scale_factor;
        }

        delta.scale(scale_factor);
        let mut center_point = (unit_pts[0] + unit_pts[1]).scaled(0.5);
        center_point.offset(-delta.y, delta.x);
        unit_pts[0] -= center_point;
        unit_pts[1] -= center_point;

        let theta1 = unit_pts[0].y.atan2(unit_pts[0].x);
        let theta2 = unit_pts[1].y.atan2(unit_pts[1].x);
        let mut theta_arc = theta2 - theta1;
        if theta_arc < 0.0 && sweep == PathDirection::Cw {
            theta_arc += PI * 2.0;
        } else if theta_arc > 0.0 && sweep != PathDirection::Cw {
            theta_arc -= PI * 2.0;
        }

        // Very tiny angles cause our subsequent math to go wonky,
        // so we do a line instead.
        if theta_arc.abs() < PI / (1000.0 * 1000.0) {
            log::trace!("elliptical arc sweep is too small, adding a line");
            self.line_to(x, y);
            return;
        }

        point_transform.set_rotate(x_axis_rotate);
        point_transform.pre_scale(rx, ry);

        // the arc may be slightly bigger than 1/4 circle, so allow up to 1/3rd
        let segments = (theta_arc / (2.0 * PI / 3.0)).abs().ceil();
        let theta_width = theta_arc / segments;
        let t = (0.5 * theta_width).tan();
        if !t.is_finite() {
            log::debug!("elliptical arc segment tangent is not finite");
            return;
        }

        let mut start_theta = theta1;
        let w = (0.5 + theta_width.cos() * 0.5).sqrt();
        let expect_integers = (PI / 2.0 - theta_width.abs()).is_nearly_zero()
            && rx.is_integer()
            && ry.is_integer()
            && x.is_integer()
            && y.is_integer();

        self.inc_reserve(segments as usize * 2);
        for _ in 0..segments as usize {
            let end_theta = start_theta + theta_width;
            let sin_end_theta = sin_snap_to_zero(end_theta);
            let cos_end_theta = cos_snap_to_zero(end_theta);

            unit_pts[1] = Point::from_xy(cos_end_theta, sin_end_theta) + center_point;
            unit_pts[0] = unit_pts[1];
            unit_pts[0].offset(t * sin_end_theta, -t * cos_end_theta);

            let mut mapped = unit_pts;
            point_transform.map_points(&mut mapped);
            if expect_integers {
                for p in &mut mapped {
                    p.x = round_to_scalar(p.x);
                    p.y = round_to_scalar(p.y);
                }
            }

            self.conic_points_to(mapped[0], mapped[1], w);
            start_theta = end_theta;
        }

        // The final point should match the input point (by definition); replace it to
        // ensure that rounding errors in the above math don't cause any problems.
        self.set_last_point(x, y);
    }

    /// Same as `arc_to_rotated`, but the end point is relative to the last point.
    pub fn r_arc_to(
        &mut self,
        rx: f32,
        ry: f32,
        x_axis_rotate: f32,
        arc_size: ArcSize,
        sweep: PathDirection,
        dx: f32,
        dy: f32,
    ) {
        let current_point = self.last_point().unwrap_or_default();
        self.arc_to_rotated(
            rx,
            ry,
            x_axis_rotate,
            arc_size,
            sweep,
            current_point.x + dx,
            current_point.y + dy,
        );
    }

    /// Appends an arc of an ellipse inscribed in `oval` as a new contour.
    ///
    /// A sweep of at least 360 degrees starting at a multiple of 90 degrees adds a full oval.
    pub fn add_arc(&mut self, oval: &Rect, start_angle: f32, sweep_angle: f32) {
        if oval.is_empty() || sweep_angle == 0.0 {
            return;
        }

        if !start_angle.is_finite() || !sweep_angle.is_finite() {
            log::debug!("arc angles are not finite");
            return;
        }

        const FULL_CIRCLE_ANGLE: f32 = 360.0;

        if sweep_angle >= FULL_CIRCLE_ANGLE || sweep_angle <= -FULL_CIRCLE_ANGLE {
            // We can treat the arc as an oval if it begins at one of our legal starting positions.
            let start_over_90 = start_angle / 90.0;
            let start_over_90_i = round_to_scalar(start_over_90);
            let error = start_over_90 - start_over_90_i;
            if error.is_nearly_equal(0.0) {
                // Index 1 is at start_angle == 0.
                let mut start_index = (start_over_90_i + 1.0) % 4.0;
                if start_index < 0.0 {
                    start_index += 4.0;
                }

                let dir = if sweep_angle > 0.0 {
                    PathDirection::Cw
                } else {
                    PathDirection::Ccw
                };

                self.add_oval(oval, dir, start_index as usize);
                return;
            }
        }

        self.arc_to(oval, start_angle, sweep_angle, true);
    }
}

fn arc_lone_point(oval: &Rect, start_angle: f32, sweep_angle: f32) -> Option<Point> {
    if sweep_angle == 0.0 && (start_angle == 0.0 || start_angle == 360.0) {
        // This path can be used to move into and out of ovals. If not
        // treated as a special case the moveTo/lineTo would be rejected.
        return Some(Point::from_xy(oval.right(), oval.center_y()));
    }

    if oval.width() == 0.0 && oval.height() == 0.0 {
        // Degenerate, but a point is still the answer.
        return Some(Point::from_xy(oval.right(), oval.top()));
    }

    None
}

// Returns the unit start and stop vectors and the sweep direction.
fn angles_to_unit_vectors(start_angle: f32, sweep_angle: f32) -> (Point, Point, PathDirection) {
    let start_rad = start_angle.to_radians();
    let mut stop_rad = (start_angle + sweep_angle).to_radians();

    let start_v = Point::from_xy(cos_snap_to_zero(start_rad), sin_snap_to_zero(start_rad));
    let mut stop_v = Point::from_xy(cos_snap_to_zero(stop_rad), sin_snap_to_zero(stop_rad));

    // If the sweep angle is nearly (but less than) 360, then due to precision
    // loss in radians-conversion and/or sin/cos, we may end up with coincident
    // vectors, which would produce no conics instead of a nearly complete circle.
    // Detect this edge case and tweak the stop vector.
    if start_v == stop_v {
        let sw = sweep_angle.abs();
        if sw < 360.0 && sw > 359.0 {
            // make a guess at a tiny angle (in radians) to tweak by
            let delta_rad = if sweep_angle < 0.0 {
                -1.0 / 512.0
            } else {
                1.0 / 512.0
            };

            loop {
                stop_rad -= delta_rad;
                stop_v = Point::from_xy(cos_snap_to_zero(stop_rad), sin_snap_to_zero(stop_rad));
                if start_v != stop_v {
                    break;
                }
            }
        }
    }

    let dir = if sweep_angle > 0.0 {
        PathDirection::Cw
    } else {
        PathDirection::Ccw
    };

    (start_v, stop_v, dir)
}

fn normalize_f64(x: f64, y: f64) -> (f64, f64) {
    let scale = 1.0 / (x * x + y * y).sqrt();
    (x * scale, y * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{PathSegment, PathVerb};

    fn oval() -> Rect {
        Rect::from_ltrb(0.0, 0.0, 20.0, 10.0).unwrap()
    }

    fn assert_near(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 0.001 && (a.y - b.y).abs() < 0.001,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn zero_sweep_is_a_single_point() {
        let mut path = Path::new();
        path.arc_to(&oval(), 0.0, 0.0, true);
        assert_eq!(path.count_points(), 1);
        assert_eq!(path.verbs(), &[PathVerb::Move]);
        assert_eq!(path.points()[0], Point::from_xy(20.0, 5.0));
    }

    #[test]
    fn empty_path_forces_move() {
        let mut path = Path::new();
        path.arc_to(&oval(), 0.0, 90.0, false);
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Conic]);
        assert_near(path.points()[0], Point::from_xy(20.0, 5.0));
        assert_near(path.points()[1], Point::from_xy(20.0, 10.0));
        assert_near(path.points()[2], Point::from_xy(10.0, 10.0));
    }

    #[test]
    fn joining_line() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.arc_to(&oval(), 0.0, 90.0, false);
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line, PathVerb::Conic]);

        // Already at the arc start.
        let mut path = Path::new();
        path.move_to(20.0, 5.0);
        path.arc_to(&oval(), 0.0, 90.0, false);
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Conic]);
    }

    #[test]
    fn counter_clockwise() {
        let mut path = Path::new();
        path.arc_to(&oval(), 0.0, -90.0, true);
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Conic]);
        assert_near(path.last_point().unwrap(), Point::from_xy(10.0, 0.0));
    }

    #[test]
    fn nearly_full_sweep() {
        let mut path = Path::new();
        path.arc_to(&oval(), 0.0, 359.99, true);
        assert!(path.conic_weights().len() >= 4);
        let bounds = path.bounds();
        assert!(bounds.left() < 0.01 && bounds.right() > 19.99);
    }

    #[test]
    fn add_arc_full_circle_is_oval() {
        let mut arc = Path::new();
        arc.add_arc(&oval(), 0.0, 360.0);

        let mut oval_path = Path::new();
        oval_path.add_oval(&oval(), PathDirection::Cw, 1);
        assert_eq!(arc, oval_path);

        let mut arc = Path::new();
        arc.add_arc(&oval(), -90.0, -360.0);
        let mut oval_path = Path::new();
        oval_path.add_oval(&oval(), PathDirection::Ccw, 0);
        assert_eq!(arc, oval_path);
    }

    #[test]
    fn add_arc_degenerate() {
        let mut path = Path::new();
        path.add_arc(&oval(), 0.0, 0.0);
        path.add_arc(&Rect::from_ltrb(0.0, 0.0, 0.0, 10.0).unwrap(), 0.0, 90.0);
        assert!(path.is_empty());
    }

    #[test]
    fn non_finite_angles() {
        let mut path = Path::new();
        path.arc_to(&oval(), 0.0, f32::INFINITY, true);
        path.arc_to(&oval(), f32::NAN, 90.0, false);
        path.add_arc(&oval(), f32::NAN, 90.0);
        path.add_arc(&oval(), 0.0, f32::NEG_INFINITY);
        assert!(path.is_empty());
        assert!(path.is_finite());
    }

    #[test]
    fn tangent() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.arc_to_tangent(10.0, 0.0, 10.0, 10.0, 5.0);
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line, PathVerb::Conic]);
        assert_near(path.points()[1], Point::from_xy(5.0, 0.0));
        assert_near(path.points()[2], Point::from_xy(10.0, 0.0));
        assert_near(path.points()[3], Point::from_xy(10.0, 5.0));
        let w = path.conic_weights()[0];
        assert!((w - core::f32::consts::FRAC_1_SQRT_2).abs() < 0.0001);
    }

    #[test]
    fn tangent_degenerate() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.arc_to_tangent(10.0, 0.0, 20.0, 0.0, 5.0);
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line]);
        assert_eq!(path.last_point(), Some(Point::from_xy(10.0, 0.0)));

        let mut path = Path::new();
        path.arc_to_tangent(10.0, 0.0, 10.0, 10.0, 0.0);
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line]);

        // Same point as the current one.
        let mut path = Path::new();
        path.move_to(10.0, 0.0);
        path.arc_to_tangent(10.0, 0.0, 10.0, 10.0, 5.0);
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line]);
    }

    #[test]
    fn svg_arc_half_circle() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.arc_to_rotated(10.0, 10.0, 0.0, ArcSize::Small, PathDirection::Cw, 20.0, 0.0);
        assert_eq!(path.last_point(), Some(Point::from_xy(20.0, 0.0)));
        assert_eq!(path.conic_weights().len(), 2);

        // Clockwise in Y-down goes through the top.
        let bounds = path.bounds();
        assert!((bounds.top() + 10.0).abs() < 0.001);
        assert!(bounds.bottom().abs() < 0.001);
    }

    #[test]
    fn svg_arc_scales_small_radii() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.arc_to_rotated(1.0, 1.0, 0.0, ArcSize::Small, PathDirection::Cw, 20.0, 0.0);
        assert_eq!(path.last_point(), Some(Point::from_xy(20.0, 0.0)));

        let bounds = path.compute_tight_bounds();
        assert!(bounds.left().abs() < 0.001);
        assert!((bounds.right() - 20.0).abs() < 0.001);
        assert!((bounds.top() + 10.0).abs() < 0.001);
        assert!(bounds.bottom().abs() < 0.001);
    }

    #[test]
    fn svg_arc_rotated() {
        // Rotating a circle does not change the arc.
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.arc_to_rotated(10.0, 10.0, 30.0, ArcSize::Small, PathDirection::Cw, 20.0, 0.0);
        assert_eq!(path.last_point(), Some(Point::from_xy(20.0, 0.0)));

        let bounds = path.compute_tight_bounds();
        assert!(bounds.left().abs() < 0.01);
        assert!((bounds.right() - 20.0).abs() < 0.01);
        assert!((bounds.top() + 10.0).abs() < 0.01);
        assert!(bounds.bottom().abs() < 0.01);

        // The major axis of a rotated ellipse becomes vertical.
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.arc_to_rotated(20.0, 10.0, 90.0, ArcSize::Small, PathDirection::Cw, 0.0, 40.0);
        assert_eq!(path.last_point(), Some(Point::from_xy(0.0, 40.0)));

        let bounds = path.compute_tight_bounds();
        assert!((bounds.width() - 10.0).abs() < 0.01);
        assert!((bounds.height() - 40.0).abs() < 0.01);
    }

    #[test]
    fn svg_arc_quarter_snaps_to_integers() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.arc_to_rotated(10.0, 10.0, 0.0, ArcSize::Small, PathDirection::Cw, 10.0, 10.0);
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Conic]);
        assert_eq!(path.points()[1], Point::from_xy(10.0, 0.0));
        assert_eq!(path.points()[2], Point::from_xy(10.0, 10.0));
    }

    #[test]
    fn svg_arc_large() {
        let mut small = Path::new();
        small.move_to(0.0, 0.0);
        small.arc_to_rotated(10.0, 10.0, 0.0, ArcSize::Small, PathDirection::Cw, 10.0, 10.0);

        let mut large = Path::new();
        large.move_to(0.0, 0.0);
        large.arc_to_rotated(10.0, 10.0, 0.0, ArcSize::Large, PathDirection::Cw, 10.0, 10.0);
        assert!(large.conic_weights().len() > small.conic_weights().len());
        assert_eq!(large.last_point(), Some(Point::from_xy(10.0, 10.0)));
    }

    #[test]
    fn svg_arc_degenerate() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.arc_to_rotated(0.0, 10.0, 0.0, ArcSize::Small, PathDirection::Cw, 20.0, 0.0);
        path.arc_to_rotated(10.0, 10.0, 0.0, ArcSize::Small, PathDirection::Cw, 20.0, 0.0);
        let segments: alloc::vec::Vec<_> = path.segments().collect();
        assert_eq!(
            segments,
            alloc::vec![
                PathSegment::MoveTo(Point::zero()),
                PathSegment::LineTo(Point::zero(), Point::from_xy(20.0, 0.0)),
                PathSegment::LineTo(Point::from_xy(20.0, 0.0), Point::from_xy(20.0, 0.0)),
            ]
        );
    }

    #[test]
    fn relative_svg_arc() {
        let mut path = Path::new();
        path.move_to(5.0, 5.0);
        path.r_arc_to(10.0, 10.0, 0.0, ArcSize::Small, PathDirection::Cw, 20.0, 0.0);
        assert_eq!(path.last_point(), Some(Point::from_xy(25.0, 5.0)));
    }
}
