// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;
use core::cell::Cell;

use arrayref::array_ref;

use crate::path_geometry;
use crate::{Point, Rect};

const INITIAL_LAST_MOVE_TO_INDEX: isize = !0;

/// A path verb.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PathVerb {
    Move,
    Line,
    Quad,
    Conic,
    Cubic,
    Close,
}

impl PathVerb {
    /// Returns the number of points stored for this verb.
    pub fn points_count(self) -> usize {
        match self {
            PathVerb::Move => 1,
            PathVerb::Line => 1,
            PathVerb::Quad => 2,
            PathVerb::Conic => 2,
            PathVerb::Cubic => 3,
            PathVerb::Close => 0,
        }
    }
}

/// A path filling rule.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FillType {
    /// Specifies that "inside" is computed by a non-zero sum of signed edge crossings.
    Winding,
    /// Specifies that "inside" is computed by an odd number of edge crossings.
    EvenOdd,
    /// Same as `Winding`, but draws outside of the path, rather than inside.
    InverseWinding,
    /// Same as `EvenOdd`, but draws outside of the path, rather than inside.
    InverseEvenOdd,
}

impl Default for FillType {
    fn default() -> Self {
        FillType::Winding
    }
}

impl FillType {
    /// Checks that the fill type fills outside of the path.
    pub fn is_inverse(self) -> bool {
        match self {
            FillType::InverseWinding | FillType::InverseEvenOdd => true,
            FillType::Winding | FillType::EvenOdd => false,
        }
    }

    /// Checks that the fill type uses the even-odd rule.
    pub fn is_even_odd(self) -> bool {
        match self {
            FillType::EvenOdd | FillType::InverseEvenOdd => true,
            FillType::Winding | FillType::InverseWinding => false,
        }
    }

    /// Returns the fill type with the inverse flag toggled.
    pub fn toggle_inverse(self) -> Self {
        match self {
            FillType::Winding => FillType::InverseWinding,
            FillType::EvenOdd => FillType::InverseEvenOdd,
            FillType::InverseWinding => FillType::Winding,
            FillType::InverseEvenOdd => FillType::EvenOdd,
        }
    }
}

/// A contour direction.
///
/// Clockwise in a Y-down coordinate system.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PathDirection {
    Cw,
    Ccw,
}

impl Default for PathDirection {
    fn default() -> Self {
        PathDirection::Cw
    }
}

/// A path convexity classification.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Convexity {
    /// Not computed yet.
    Unknown,
    /// Convex, turning clockwise.
    ConvexCw,
    /// Convex, turning counterclockwise.
    ConvexCcw,
    /// Convex without a turning direction, like a point or a line.
    ConvexDegenerate,
    /// Concave, self-intersecting or has multiple contours.
    Concave,
}

impl Convexity {
    /// Checks that the classification is one of the convex ones.
    pub fn is_convex(self) -> bool {
        match self {
            Convexity::ConvexCw | Convexity::ConvexCcw | Convexity::ConvexDegenerate => true,
            Convexity::Unknown | Convexity::Concave => false,
        }
    }

    /// Returns the turning direction of a convex path.
    pub fn direction(self) -> Option<PathDirection> {
        match self {
            Convexity::ConvexCw => Some(PathDirection::Cw),
            Convexity::ConvexCcw => Some(PathDirection::Ccw),
            _ => None,
        }
    }
}

/// A set of segment kinds present in a path.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct SegmentMask(u8);

impl SegmentMask {
    /// No segments.
    pub const EMPTY: Self = SegmentMask(0);
    /// Line segments.
    pub const LINE: Self = SegmentMask(1 << 0);
    /// Quadratic segments.
    pub const QUAD: Self = SegmentMask(1 << 1);
    /// Conic segments.
    pub const CONIC: Self = SegmentMask(1 << 2);
    /// Cubic segments.
    pub const CUBIC: Self = SegmentMask(1 << 3);

    /// Returns raw bits.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Checks that all bits of `other` are set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for SegmentMask {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        SegmentMask(self.0 | other.0)
    }
}

impl core::ops::BitOrAssign for SegmentMask {
    fn bitor_assign(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub(crate) struct BoundsInfo {
    rect: Rect,
    is_finite: bool,
}

/// A mutable vector path.
///
/// Stores points, verbs and conic weights. Bounds and convexity
/// are computed lazily and cached until the next mutation.
///
/// # Guarantees
///
/// - The first verb is always `Move`, unless the path is empty.
/// - There are no two consecutive `Move` verbs.
/// - There is exactly one weight per `Conic` verb.
#[derive(Clone, Debug)]
pub struct Path {
    pub(crate) points: Vec<Point>,
    pub(crate) verbs: Vec<PathVerb>,
    pub(crate) conic_weights: Vec<f32>,
    pub(crate) fill_type: FillType,
    // A bitwise complement indicates that the contour was closed
    // and the next drawing verb must re-open it.
    pub(crate) last_move_to_index: isize,
    pub(crate) segment_mask: SegmentMask,
    bounds: Cell<Option<BoundsInfo>>,
    pub(crate) convexity: Cell<Convexity>,
}

impl Default for Path {
    fn default() -> Self {
        Path::new()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.fill_type == other.fill_type
            && self.verbs == other.verbs
            && self.points == other.points
            && self.conic_weights == other.conic_weights
    }
}

impl Path {
    /// Creates a new, empty `Path`.
    pub fn new() -> Self {
        Path::with_capacity(0, 0)
    }

    /// Creates a new, empty `Path` with preallocated storage.
    pub fn with_capacity(verbs_capacity: usize, points_capacity: usize) -> Self {
        Path {
            points: Vec::with_capacity(points_capacity),
            verbs: Vec::with_capacity(verbs_capacity),
            conic_weights: Vec::new(),
            fill_type: FillType::default(),
            last_move_to_index: INITIAL_LAST_MOVE_TO_INDEX,
            segment_mask: SegmentMask::EMPTY,
            bounds: Cell::new(None),
            convexity: Cell::new(Convexity::Unknown),
        }
    }

    /// Returns the fill type.
    pub fn fill_type(&self) -> FillType {
        self.fill_type
    }

    /// Sets the fill type.
    pub fn set_fill_type(&mut self, fill_type: FillType) {
        self.fill_type = fill_type;
    }

    /// Checks that the fill type fills outside of the path.
    pub fn is_inverse_fill_type(&self) -> bool {
        self.fill_type.is_inverse()
    }

    /// Toggles the inverse flag of the fill type.
    pub fn toggle_inverse_fill_type(&mut self) {
        self.fill_type = self.fill_type.toggle_inverse();
    }

    /// Checks that the path has no verbs.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Returns the number of points.
    pub fn count_points(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of verbs.
    pub fn count_verbs(&self) -> usize {
        self.verbs.len()
    }

    /// Returns all points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns all verbs.
    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    /// Returns all conic weights, one per `Conic` verb.
    pub fn conic_weights(&self) -> &[f32] {
        &self.conic_weights
    }

    /// Returns a point at the specified index.
    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).cloned()
    }

    /// Returns the last point.
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().cloned()
    }

    /// Replaces the last point.
    ///
    /// Starts a new contour when the path is empty.
    pub fn set_last_point(&mut self, x: f32, y: f32) {
        match self.points.last_mut() {
            Some(last) => {
                *last = Point::from_xy(x, y);
                self.dirty_after_edit();
            }
            None => self.move_to(x, y),
        }
    }

    /// Returns the kinds of segments present in the path.
    pub fn segment_masks(&self) -> SegmentMask {
        self.segment_mask
    }

    /// Returns line points when the path is a single line.
    pub fn is_line(&self) -> Option<[Point; 2]> {
        if self.verbs.len() == 2 && self.verbs[0] == PathVerb::Move && self.verbs[1] == PathVerb::Line {
            debug_assert_eq!(self.points.len(), 2);
            Some([self.points[0], self.points[1]])
        } else {
            None
        }
    }

    /// Checks that the last contour ends with `Close`.
    pub fn is_last_contour_closed(&self) -> bool {
        self.verbs.last() == Some(&PathVerb::Close)
    }

    /// Checks that all points are finite.
    pub fn is_finite(&self) -> bool {
        self.bounds_info().is_finite
    }

    /// Returns the bounds of all points, including curve control points.
    ///
    /// Returns a zero rect for empty and non-finite paths.
    /// Also returns a zero rect when the width or height of finite points
    /// overflows `f32`, while `is_finite` stays `true`.
    pub fn bounds(&self) -> Rect {
        self.bounds_info().rect
    }

    fn bounds_info(&self) -> BoundsInfo {
        if let Some(info) = self.bounds.get() {
            return info;
        }

        let info = match Rect::from_points(&self.points) {
            Some(rect) => BoundsInfo {
                rect,
                is_finite: true,
            },
            None => BoundsInfo {
                rect: Rect::zero(),
                is_finite: self.points.iter().all(|p| p.is_finite()),
            },
        };

        self.bounds.set(Some(info));
        info
    }

    /// Returns the bounds of the path geometry, including curve extrema
    /// but not curve control points.
    ///
    /// Trailing `Move` verbs are ignored.
    /// Returns a zero rect for empty and non-finite paths.
    pub fn compute_tight_bounds(&self) -> Rect {
        let verbs_count = self.trimmed_verbs_count();
        if verbs_count == 0 || !self.is_finite() {
            return Rect::zero();
        }

        if self.segment_mask == SegmentMask::LINE && verbs_count == self.verbs.len() {
            return self.bounds();
        }

        let mut extremas = [Point::zero(); 5];
        let mut min = self.points[0];
        let mut max = min;
        for segment in self.segments().take(verbs_count) {
            let count = match segment {
                PathSegment::MoveTo(p) | PathSegment::LineTo(_, p) => {
                    extremas[0] = p;
                    1
                }
                PathSegment::QuadTo(p0, p1, p2) => {
                    path_geometry::compute_quad_extremas(&[p0, p1, p2], &mut extremas)
                }
                PathSegment::ConicTo(p0, p1, p2, w) => {
                    path_geometry::compute_conic_extremas(&[p0, p1, p2], w, &mut extremas)
                }
                PathSegment::CubicTo(p0, p1, p2, p3) => {
                    path_geometry::compute_cubic_extremas(&[p0, p1, p2, p3], &mut extremas)
                }
                PathSegment::Close(..) => 0,
            };

            for p in &extremas[..count] {
                min.x = min.x.min(p.x);
                min.y = min.y.min(p.y);
                max.x = max.x.max(p.x);
                max.y = max.y.max(p.y);
            }
        }

        Rect::from_ltrb(min.x, min.y, max.x, max.y).unwrap_or_else(Rect::zero)
    }

    /// Returns the number of verbs without the trailing `Move` ones.
    pub(crate) fn trimmed_verbs_count(&self) -> usize {
        let mut count = self.verbs.len();
        while count > 0 && self.verbs[count - 1] == PathVerb::Move {
            count -= 1;
        }
        count
    }

    /// Returns an iterator over path segments.
    pub fn segments(&self) -> PathSegmentsIter {
        PathSegmentsIter {
            path: self,
            verb_index: 0,
            points_index: 0,
            weights_index: 0,
            is_auto_close: false,
            contour_open: false,
            last_move_to: Point::zero(),
            last_point: Point::zero(),
        }
    }

    /// Reserves storage for at least `extra_points` more points and verbs.
    pub fn inc_reserve(&mut self, extra_points: usize) {
        self.points.reserve(extra_points);
        self.verbs.reserve(extra_points);
    }

    /// Clears the path and releases its storage.
    ///
    /// Resets the fill type.
    pub fn reset(&mut self) {
        *self = Path::new();
    }

    /// Clears the path, but keeps the allocated storage.
    ///
    /// Resets the fill type.
    pub fn rewind(&mut self) {
        self.points.clear();
        self.verbs.clear();
        self.conic_weights.clear();
        self.fill_type = FillType::default();
        self.last_move_to_index = INITIAL_LAST_MOVE_TO_INDEX;
        self.segment_mask = SegmentMask::EMPTY;
        self.dirty_after_edit();
    }

    /// Offsets all points.
    pub fn offset(&mut self, dx: f32, dy: f32) {
        for p in &mut self.points {
            p.offset(dx, dy);
        }

        self.dirty_after_edit();
    }

    /// Starts a new contour.
    ///
    /// Replaces the point of the previous `Move` when no segments were added after it.
    pub fn move_to(&mut self, x: f32, y: f32) {
        let pt = Point::from_xy(x, y);
        if self.verbs.last() == Some(&PathVerb::Move) {
            let last_idx = self.points.len() - 1;
            self.points[last_idx] = pt;
            self.last_move_to_index = last_idx as isize;
        } else {
            self.last_move_to_index = self.points.len() as isize;
            self.verbs.push(PathVerb::Move);
            self.points.push(pt);
        }

        self.dirty_after_edit();
    }

    pub(crate) fn inject_move_to_if_needed(&mut self) {
        if self.last_move_to_index < 0 {
            let pt = if self.verbs.is_empty() {
                Point::zero()
            } else {
                self.points[!self.last_move_to_index as usize]
            };

            self.move_to(pt.x, pt.y);
        }
    }

    /// Adds a line from the last point.
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.inject_move_to_if_needed();

        self.verbs.push(PathVerb::Line);
        self.points.push(Point::from_xy(x, y));
        self.segment_mask |= SegmentMask::LINE;

        self.dirty_after_edit();
    }

    /// Adds a quad curve from the last point.
    pub fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.inject_move_to_if_needed();

        self.verbs.push(PathVerb::Quad);
        self.points.push(Point::from_xy(x1, y1));
        self.points.push(Point::from_xy(x, y));
        self.segment_mask |= SegmentMask::QUAD;

        self.dirty_after_edit();
    }

    /// Adds a conic curve from the last point.
    ///
    /// A non-positive or NaN weight produces a line to the end point,
    /// an infinite weight produces two lines through the control point
    /// and a unit weight produces a quad.
    pub fn conic_to(&mut self, x1: f32, y1: f32, x: f32, y: f32, weight: f32) {
        // check for <= 0 or NaN with this test
        if !(weight > 0.0) {
            log::trace!("conic weight {} is not positive, adding a line", weight);
            self.line_to(x, y);
        } else if !weight.is_finite() {
            log::trace!("conic weight is infinite, adding two lines");
            self.line_to(x1, y1);
            self.line_to(x, y);
        } else if weight == 1.0 {
            self.quad_to(x1, y1, x, y);
        } else {
            self.inject_move_to_if_needed();

            self.verbs.push(PathVerb::Conic);
            self.points.push(Point::from_xy(x1, y1));
            self.points.push(Point::from_xy(x, y));
            self.conic_weights.push(weight);
            self.segment_mask |= SegmentMask::CONIC;

            self.dirty_after_edit();
        }
    }

    pub(crate) fn conic_points_to(&mut self, pt1: Point, pt2: Point, weight: f32) {
        self.conic_to(pt1.x, pt1.y, pt2.x, pt2.y, weight);
    }

    /// Adds a cubic curve from the last point.
    pub fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.inject_move_to_if_needed();

        self.verbs.push(PathVerb::Cubic);
        self.points.push(Point::from_xy(x1, y1));
        self.points.push(Point::from_xy(x2, y2));
        self.points.push(Point::from_xy(x, y));
        self.segment_mask |= SegmentMask::CUBIC;

        self.dirty_after_edit();
    }

    /// Closes the current contour.
    ///
    /// Does nothing on an empty path or when the contour is already closed.
    pub fn close(&mut self) {
        if let Some(last) = self.verbs.last() {
            if *last != PathVerb::Close {
                self.verbs.push(PathVerb::Close);
            }
        }

        // signal that we need a moveTo to follow us (unless we're done)
        if self.last_move_to_index >= 0 {
            self.last_move_to_index = !self.last_move_to_index;
        }

        self.dirty_after_edit();
    }

    /// Starts a new contour relative to the last point.
    ///
    /// After `close` the offset is relative to the start of the closed contour.
    pub fn r_move_to(&mut self, dx: f32, dy: f32) {
        let pt = if self.points.is_empty() {
            Point::zero()
        } else if self.last_move_to_index >= 0 {
            self.points[self.points.len() - 1]
        } else {
            self.points[!self.last_move_to_index as usize]
        };

        self.move_to(pt.x + dx, pt.y + dy);
    }

    fn current_point(&mut self) -> Point {
        self.inject_move_to_if_needed();
        self.last_point().unwrap_or_default()
    }

    /// Adds a line relative to the last point.
    pub fn r_line_to(&mut self, dx: f32, dy: f32) {
        let pt = self.current_point();
        self.line_to(pt.x + dx, pt.y + dy);
    }

    /// Adds a quad curve relative to the last point.
    pub fn r_quad_to(&mut self, dx1: f32, dy1: f32, dx: f32, dy: f32) {
        let pt = self.current_point();
        self.quad_to(pt.x + dx1, pt.y + dy1, pt.x + dx, pt.y + dy);
    }

    /// Adds a conic curve relative to the last point.
    pub fn r_conic_to(&mut self, dx1: f32, dy1: f32, dx: f32, dy: f32, weight: f32) {
        let pt = self.current_point();
        self.conic_to(pt.x + dx1, pt.y + dy1, pt.x + dx, pt.y + dy, weight);
    }

    /// Adds a cubic curve relative to the last point.
    pub fn r_cubic_to(&mut self, dx1: f32, dy1: f32, dx2: f32, dy2: f32, dx: f32, dy: f32) {
        let pt = self.current_point();
        self.cubic_to(
            pt.x + dx1,
            pt.y + dy1,
            pt.x + dx2,
            pt.y + dy2,
            pt.x + dx,
            pt.y + dy,
        );
    }

    pub(crate) fn dirty_after_edit(&mut self) {
        self.bounds.set(None);
        self.convexity.set(Convexity::Unknown);
    }
}

/// A path segment.
///
/// Every drawing segment carries its start point.
/// `Close` carries the last point and the start point of the contour,
/// forming an implicit line.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point, Point),
    QuadTo(Point, Point, Point),
    ConicTo(Point, Point, Point, f32),
    CubicTo(Point, Point, Point, Point),
    Close(Point, Point),
}

impl PathSegment {
    /// Returns the segment verb.
    pub fn verb(&self) -> PathVerb {
        match self {
            PathSegment::MoveTo(..) => PathVerb::Move,
            PathSegment::LineTo(..) => PathVerb::Line,
            PathSegment::QuadTo(..) => PathVerb::Quad,
            PathSegment::ConicTo(..) => PathVerb::Conic,
            PathSegment::CubicTo(..) => PathVerb::Cubic,
            PathSegment::Close(..) => PathVerb::Close,
        }
    }
}

/// A path segments iterator.
#[allow(missing_copy_implementations)]
#[derive(Clone, Debug)]
pub struct PathSegmentsIter<'a> {
    path: &'a Path,
    verb_index: usize,
    points_index: usize,
    weights_index: usize,
    is_auto_close: bool,
    contour_open: bool,
    last_move_to: Point,
    last_point: Point,
}

impl<'a> PathSegmentsIter<'a> {
    /// Emits `Close` for contours that were not closed explicitly.
    pub fn set_auto_close(&mut self, flag: bool) {
        self.is_auto_close = flag;
    }

    fn close_segment(&mut self) -> PathSegment {
        let segment = PathSegment::Close(self.last_point, self.last_move_to);
        self.last_point = self.last_move_to;
        self.contour_open = false;
        segment
    }
}

impl<'a> Iterator for PathSegmentsIter<'a> {
    type Item = PathSegment;

    fn next(&mut self) -> Option<Self::Item> {
        let verb = match self.path.verbs.get(self.verb_index) {
            Some(verb) => *verb,
            None => {
                if self.is_auto_close && self.contour_open {
                    return Some(self.close_segment());
                }

                return None;
            }
        };

        if verb == PathVerb::Move && self.is_auto_close && self.contour_open {
            return Some(self.close_segment());
        }

        self.verb_index += 1;

        let path = self.path;
        let points = &path.points;
        let start = self.last_point;
        let segment = match verb {
            PathVerb::Move => {
                let p = points[self.points_index];
                self.points_index += 1;
                self.last_move_to = p;
                self.last_point = p;
                return Some(PathSegment::MoveTo(p));
            }
            PathVerb::Line => {
                let p = points[self.points_index];
                self.points_index += 1;
                self.last_point = p;
                PathSegment::LineTo(start, p)
            }
            PathVerb::Quad => {
                let pts = array_ref![points, self.points_index, 2];
                self.points_index += 2;
                self.last_point = pts[1];
                PathSegment::QuadTo(start, pts[0], pts[1])
            }
            PathVerb::Conic => {
                let pts = array_ref![points, self.points_index, 2];
                let weight = path.conic_weights[self.weights_index];
                self.points_index += 2;
                self.weights_index += 1;
                self.last_point = pts[1];
                PathSegment::ConicTo(start, pts[0], pts[1], weight)
            }
            PathVerb::Cubic => {
                let pts = array_ref![points, self.points_index, 3];
                self.points_index += 3;
                self.last_point = pts[2];
                PathSegment::CubicTo(start, pts[0], pts[1], pts[2])
            }
            PathVerb::Close => return Some(self.close_segment()),
        };

        self.contour_open = true;
        Some(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn pt(x: f32, y: f32) -> Point {
        Point::from_xy(x, y)
    }

    #[test]
    fn empty() {
        let path = Path::new();
        assert!(path.is_empty());
        assert_eq!(path.count_points(), 0);
        assert_eq!(path.count_verbs(), 0);
        assert_eq!(path.last_point(), None);
        assert_eq!(path.bounds(), Rect::zero());
        assert_eq!(path.compute_tight_bounds(), Rect::zero());
        assert!(path.is_finite());
        assert_eq!(path.segments().next(), None);
    }

    #[test]
    fn move_to_collapses() {
        let mut path = Path::new();
        path.move_to(1.0, 1.0);
        path.move_to(2.0, 2.0);
        assert_eq!(path.verbs(), &[PathVerb::Move]);
        assert_eq!(path.points(), &[pt(2.0, 2.0)]);

        path.line_to(3.0, 3.0);
        path.move_to(4.0, 4.0);
        path.move_to(5.0, 5.0);
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line, PathVerb::Move]);
        assert_eq!(path.points(), &[pt(2.0, 2.0), pt(3.0, 3.0), pt(5.0, 5.0)]);
    }

    #[test]
    fn inject_move_on_empty() {
        let mut path = Path::new();
        path.line_to(10.0, 20.0);
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line]);
        assert_eq!(path.points(), &[pt(0.0, 0.0), pt(10.0, 20.0)]);
    }

    #[test]
    fn inject_move_after_close() {
        let mut path = Path::new();
        path.move_to(1.0, 1.0);
        path.line_to(2.0, 2.0);
        path.close();
        path.line_to(3.0, 3.0);
        assert_eq!(
            path.verbs(),
            &[
                PathVerb::Move,
                PathVerb::Line,
                PathVerb::Close,
                PathVerb::Move,
                PathVerb::Line
            ]
        );
        assert_eq!(
            path.points(),
            &[pt(1.0, 1.0), pt(2.0, 2.0), pt(1.0, 1.0), pt(3.0, 3.0)]
        );
    }

    #[test]
    fn close() {
        let mut path = Path::new();
        path.close();
        assert!(path.is_empty());

        path.move_to(1.0, 1.0);
        path.close();
        path.close();
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Close]);
        assert!(path.is_last_contour_closed());
    }

    #[test]
    fn conic_weight_one_is_quad() {
        let mut a = Path::new();
        a.move_to(0.0, 0.0);
        a.conic_to(1.0, 2.0, 3.0, 4.0, 1.0);

        let mut b = Path::new();
        b.move_to(0.0, 0.0);
        b.quad_to(1.0, 2.0, 3.0, 4.0);

        assert_eq!(a.verbs(), b.verbs());
        assert_eq!(a.points(), b.points());
        assert!(a.conic_weights().is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn conic_weight_zero_is_line() {
        let mut a = Path::new();
        a.move_to(0.0, 0.0);
        a.conic_to(1.0, 2.0, 3.0, 4.0, 0.0);

        let mut b = Path::new();
        b.move_to(0.0, 0.0);
        b.line_to(3.0, 4.0);

        assert_eq!(a.verbs(), b.verbs());
        assert_eq!(a.points(), b.points());

        let mut c = Path::new();
        c.move_to(0.0, 0.0);
        c.conic_to(1.0, 2.0, 3.0, 4.0, core::f32::NAN);
        assert_eq!(c, b);

        let mut d = Path::new();
        d.move_to(0.0, 0.0);
        d.conic_to(1.0, 2.0, 3.0, 4.0, -1.0);
        assert_eq!(d, b);
    }

    #[test]
    fn conic_weight_infinite_is_two_lines() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.conic_to(1.0, 2.0, 3.0, 4.0, core::f32::INFINITY);
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line, PathVerb::Line]);
        assert_eq!(path.points(), &[pt(0.0, 0.0), pt(1.0, 2.0), pt(3.0, 4.0)]);
    }

    #[test]
    fn conic() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.conic_to(1.0, 2.0, 3.0, 4.0, 0.5);
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Conic]);
        assert_eq!(path.conic_weights(), &[0.5]);
        assert!(path.segment_masks().contains(SegmentMask::CONIC));
        assert!(!path.segment_masks().contains(SegmentMask::LINE));
    }

    #[test]
    fn relative() {
        let mut path = Path::new();
        path.r_line_to(1.0, 2.0);
        assert_eq!(path.points(), &[pt(0.0, 0.0), pt(1.0, 2.0)]);

        path.r_quad_to(1.0, 0.0, 2.0, 2.0);
        assert_eq!(path.last_point(), Some(pt(3.0, 4.0)));

        path.r_cubic_to(1.0, 1.0, 2.0, 2.0, 3.0, 3.0);
        assert_eq!(path.last_point(), Some(pt(6.0, 7.0)));

        path.r_conic_to(1.0, 1.0, 2.0, 0.0, 0.5);
        assert_eq!(path.last_point(), Some(pt(8.0, 7.0)));

        path.close();
        path.r_move_to(5.0, 5.0);
        assert_eq!(path.last_point(), Some(pt(5.0, 5.0)));
    }

    #[test]
    fn set_last_point() {
        let mut path = Path::new();
        path.set_last_point(1.0, 2.0);
        assert_eq!(path.verbs(), &[PathVerb::Move]);

        path.line_to(3.0, 4.0);
        path.set_last_point(5.0, 6.0);
        assert_eq!(path.points(), &[pt(1.0, 2.0), pt(5.0, 6.0)]);
        assert_eq!(path.bounds(), Rect::from_ltrb(1.0, 2.0, 5.0, 6.0).unwrap());
    }

    #[test]
    fn is_line() {
        let mut path = Path::new();
        path.move_to(1.0, 2.0);
        path.line_to(3.0, 4.0);
        assert_eq!(path.is_line(), Some([pt(1.0, 2.0), pt(3.0, 4.0)]));

        path.line_to(5.0, 6.0);
        assert_eq!(path.is_line(), None);
    }

    #[test]
    fn fill_type() {
        let mut path = Path::new();
        assert_eq!(path.fill_type(), FillType::Winding);
        path.toggle_inverse_fill_type();
        assert_eq!(path.fill_type(), FillType::InverseWinding);
        assert!(path.is_inverse_fill_type());
        path.set_fill_type(FillType::EvenOdd);
        path.toggle_inverse_fill_type();
        assert!(path.fill_type().is_even_odd());
        assert!(path.is_inverse_fill_type());
    }

    #[test]
    fn bounds_cache() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 10.0);
        assert_eq!(path.bounds(), Rect::from_ltrb(0.0, 0.0, 10.0, 10.0).unwrap());

        path.line_to(-5.0, 20.0);
        assert_eq!(path.bounds(), Rect::from_ltrb(-5.0, 0.0, 10.0, 20.0).unwrap());

        let copy = path.clone();
        path.offset(1.0, 1.0);
        assert_eq!(path.bounds(), Rect::from_ltrb(-4.0, 1.0, 11.0, 21.0).unwrap());
        assert_eq!(copy.bounds(), Rect::from_ltrb(-5.0, 0.0, 10.0, 20.0).unwrap());
    }

    #[test]
    fn not_finite() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(core::f32::INFINITY, 10.0);
        assert!(!path.is_finite());
        assert_eq!(path.bounds(), Rect::zero());

        path.set_last_point(5.0, 5.0);
        assert!(path.is_finite());
    }

    #[test]
    fn tight_bounds() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.quad_to(1.0, 2.0, 2.0, 0.0);
        assert_eq!(path.bounds(), Rect::from_ltrb(0.0, 0.0, 2.0, 2.0).unwrap());
        assert_eq!(
            path.compute_tight_bounds(),
            Rect::from_ltrb(0.0, 0.0, 2.0, 1.0).unwrap()
        );

        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.cubic_to(0.0, 1.0, 1.0, 1.0, 1.0, 0.0);
        assert_eq!(
            path.compute_tight_bounds(),
            Rect::from_ltrb(0.0, 0.0, 1.0, 0.75).unwrap()
        );
    }

    #[test]
    fn tight_bounds_non_finite() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(f32::NAN, 5.0);
        path.quad_to(1.0, 2.0, 3.0, 4.0);
        assert!(!path.is_finite());
        assert_eq!(path.bounds(), Rect::zero());
        assert_eq!(path.compute_tight_bounds(), Rect::zero());
    }

    #[test]
    fn bounds_overflowing_extent() {
        let mut path = Path::new();
        path.move_to(-3e38, 0.0);
        path.line_to(3e38, 10.0);
        assert!(path.is_finite());
        assert_eq!(path.bounds(), Rect::zero());
    }

    #[test]
    fn tight_bounds_lines_and_trailing_move() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 5.0);
        assert_eq!(path.compute_tight_bounds(), path.bounds());

        path.move_to(100.0, 100.0);
        assert_eq!(
            path.compute_tight_bounds(),
            Rect::from_ltrb(0.0, 0.0, 10.0, 5.0).unwrap()
        );
        assert_eq!(path.bounds(), Rect::from_ltrb(0.0, 0.0, 100.0, 100.0).unwrap());
    }

    #[test]
    fn segments() {
        let mut path = Path::new();
        path.move_to(1.0, 1.0);
        path.line_to(2.0, 1.0);
        path.quad_to(3.0, 2.0, 2.0, 3.0);
        path.close();

        let segments: Vec<_> = path.segments().collect();
        assert_eq!(
            segments,
            vec![
                PathSegment::MoveTo(pt(1.0, 1.0)),
                PathSegment::LineTo(pt(1.0, 1.0), pt(2.0, 1.0)),
                PathSegment::QuadTo(pt(2.0, 1.0), pt(3.0, 2.0), pt(2.0, 3.0)),
                PathSegment::Close(pt(2.0, 3.0), pt(1.0, 1.0)),
            ]
        );
    }

    #[test]
    fn segments_auto_close() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(1.0, 0.0);
        path.close();
        path.move_to(5.0, 5.0);
        path.cubic_to(6.0, 5.0, 7.0, 6.0, 7.0, 7.0);
        path.move_to(10.0, 10.0);
        path.conic_to(11.0, 10.0, 11.0, 11.0, 0.5);

        let mut iter = path.segments();
        iter.set_auto_close(true);
        let verbs: Vec<_> = iter.map(|s| s.verb()).collect();
        assert_eq!(
            verbs,
            vec![
                PathVerb::Move,
                PathVerb::Line,
                PathVerb::Close,
                PathVerb::Move,
                PathVerb::Cubic,
                PathVerb::Close,
                PathVerb::Move,
                PathVerb::Conic,
                PathVerb::Close,
            ]
        );

        let mut iter = path.segments();
        iter.set_auto_close(true);
        let last = iter.last();
        assert_eq!(last, Some(PathSegment::Close(pt(11.0, 11.0), pt(10.0, 10.0))));
    }

    #[test]
    fn reset_and_rewind() {
        let mut path = Path::new();
        path.set_fill_type(FillType::EvenOdd);
        path.move_to(1.0, 1.0);
        path.line_to(2.0, 2.0);
        path.close();
        path.rewind();
        assert!(path.is_empty());
        assert_eq!(path.fill_type(), FillType::Winding);
        assert_eq!(path.bounds(), Rect::zero());

        path.line_to(1.0, 1.0);
        assert_eq!(path.points(), &[pt(0.0, 0.0), pt(1.0, 1.0)]);

        path.reset();
        assert_eq!(path, Path::new());
    }
}
