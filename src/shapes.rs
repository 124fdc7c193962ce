// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::path::{Path, PathDirection};
use crate::rrect::{Corner, RRect};
use crate::scalar::SCALAR_ROOT_2_OVER_2;
use crate::{Point, Rect};

// Walks a closed ring of up to eight points starting at a given index.
#[derive(Copy, Clone, Debug)]
struct PointIterator {
    points: [Point; 8],
    len: usize,
    current: usize,
    advance: usize,
}

impl PointIterator {
    fn new(ring: &[Point], dir: PathDirection, start_index: usize) -> Self {
        debug_assert!(!ring.is_empty() && ring.len() <= 8);

        let len = ring.len();
        let mut points = [Point::zero(); 8];
        points[..len].copy_from_slice(ring);

        PointIterator {
            points,
            len,
            current: start_index % len,
            advance: if dir == PathDirection::Cw { 1 } else { len - 1 },
        }
    }

    fn current(&self) -> Point {
        debug_assert!(self.current < self.len);
        self.points[self.current]
    }

    fn next(&mut self) -> Point {
        self.current = (self.current + self.advance) % self.len;
        self.current()
    }
}

fn rect_point_iter(rect: &Rect, dir: PathDirection, start_index: usize) -> PointIterator {
    PointIterator::new(&rect.to_quad(), dir, start_index)
}

fn oval_point_iter(oval: &Rect, dir: PathDirection, start_index: usize) -> PointIterator {
    let cx = oval.center_x();
    let cy = oval.center_y();
    let points = [
        Point::from_xy(cx, oval.top()),
        Point::from_xy(oval.right(), cy),
        Point::from_xy(cx, oval.bottom()),
        Point::from_xy(oval.left(), cy),
    ];

    PointIterator::new(&points, dir, start_index)
}

fn rrect_point_iter(rrect: &RRect, dir: PathDirection, start_index: usize) -> PointIterator {
    let bounds = rrect.rect();
    let l = bounds.left();
    let t = bounds.top();
    let r = bounds.right();
    let b = bounds.bottom();

    let ul = rrect.radii(Corner::UpperLeft);
    let ur = rrect.radii(Corner::UpperRight);
    let lr = rrect.radii(Corner::LowerRight);
    let ll = rrect.radii(Corner::LowerLeft);

    let points = [
        Point::from_xy(l + ul.x, t),
        Point::from_xy(r - ur.x, t),
        Point::from_xy(r, t + ur.y),
        Point::from_xy(r, b - lr.y),
        Point::from_xy(r - lr.x, b),
        Point::from_xy(l + ll.x, b),
        Point::from_xy(l, b - ll.y),
        Point::from_xy(l, t + ul.y),
    ];

    PointIterator::new(&points, dir, start_index)
}

impl Path {
    /// Adds a rectangle as a new closed contour.
    ///
    /// `start_index` selects the first corner: 0 is top-left, 1 is top-right,
    /// 2 is bottom-right and 3 is bottom-left.
    pub fn add_rect(&mut self, rect: &Rect, dir: PathDirection, start_index: usize) {
        let mut iter = rect_point_iter(rect, dir, start_index);
        self.inc_reserve(4);

        let pt = iter.current();
        self.move_to(pt.x, pt.y);
        for _ in 0..3 {
            let pt = iter.next();
            self.line_to(pt.x, pt.y);
        }
        self.close();
    }

    /// Adds an ellipse inscribed in `oval` as a new closed contour.
    ///
    /// The ellipse is built from four quarter conics.
    /// `start_index` selects the first point: 0 is the top, 1 is the right
    /// (angle 0), 2 is the bottom and 3 is the left.
    pub fn add_oval(&mut self, oval: &Rect, dir: PathDirection, start_index: usize) {
        let mut oval_iter = oval_point_iter(oval, dir, start_index);
        let rect_start_index = start_index + if dir == PathDirection::Cw { 0 } else { 1 };
        let mut rect_iter = rect_point_iter(oval, dir, rect_start_index);
        self.inc_reserve(9);

        let pt = oval_iter.current();
        self.move_to(pt.x, pt.y);
        for _ in 0..4 {
            self.conic_points_to(rect_iter.next(), oval_iter.next(), SCALAR_ROOT_2_OVER_2);
        }
        self.close();
    }

    /// Adds a circle as a new closed contour, starting at the right-most point.
    ///
    /// Does nothing for a non-positive radius.
    pub fn add_circle(&mut self, x: f32, y: f32, radius: f32, dir: PathDirection) {
        if !(radius > 0.0) {
            log::trace!("circle radius {} is not positive", radius);
            return;
        }

        if let Some(oval) = Rect::from_ltrb(x - radius, y - radius, x + radius, y + radius) {
            self.add_oval(&oval, dir, 1);
        }
    }

    /// Adds a rounded rectangle as a new closed contour.
    ///
    /// `start_index` selects one of the eight points where the straight
    /// edges meet the corners, starting at the top edge after the
    /// upper-left corner.
    pub fn add_rrect(&mut self, rrect: &RRect, dir: PathDirection, start_index: usize) {
        let bounds = rrect.rect();
        if rrect.is_rect() || rrect.is_empty() {
            // degenerate(rect) => radii points are collapsing
            self.add_rect(&bounds, dir, (start_index + 1) / 2);
            return;
        }

        if rrect.is_oval() {
            // degenerate(oval) => line points are collapsing
            self.add_oval(&bounds, dir, start_index / 2);
            return;
        }

        let starts_with_conic = (start_index & 1 == 1) == (dir == PathDirection::Cw);
        let weight = SCALAR_ROOT_2_OVER_2;

        let mut rrect_iter = rrect_point_iter(rrect, dir, start_index);
        // Corner iterator indices follow the collapsed radii model,
        // adjusted such that the start point is "behind" the radii start point.
        let rect_start_index = start_index / 2 + if dir == PathDirection::Cw { 0 } else { 1 };
        let mut rect_iter = rect_point_iter(&bounds, dir, rect_start_index);
        self.inc_reserve(17);

        let pt = rrect_iter.current();
        self.move_to(pt.x, pt.y);
        if starts_with_conic {
            for _ in 0..3 {
                self.conic_points_to(rect_iter.next(), rrect_iter.next(), weight);
                let pt = rrect_iter.next();
                self.line_to(pt.x, pt.y);
            }
            // The final line is handled by close.
            self.conic_points_to(rect_iter.next(), rrect_iter.next(), weight);
        } else {
            for _ in 0..4 {
                let pt = rrect_iter.next();
                self.line_to(pt.x, pt.y);
                self.conic_points_to(rect_iter.next(), rrect_iter.next(), weight);
            }
        }
        self.close();
    }

    /// Adds a polyline as a new contour.
    ///
    /// Does nothing for an empty slice.
    pub fn add_poly(&mut self, points: &[Point], close: bool) {
        let (first, rest) = match points.split_first() {
            Some(v) => v,
            None => return,
        };

        self.inc_reserve(points.len());
        self.move_to(first.x, first.y);
        for p in rest {
            self.line_to(p.x, p.y);
        }

        if close {
            self.close();
        }
    }
}
