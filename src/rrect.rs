// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::scalar::Scalar;
use crate::{Point, Rect};

/// A rounded rectangle corner.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Corner {
    UpperLeft = 0,
    UpperRight = 1,
    LowerRight = 2,
    LowerLeft = 3,
}

/// A rounded rectangle kind.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RRectType {
    /// Zero width or height.
    Empty,
    /// All corners are square.
    Rect,
    /// Radii fill the whole rectangle.
    Oval,
    /// All corners share the same non-zero radii.
    Simple,
    /// Corners form a grid: left and right radii match vertically,
    /// top and bottom radii match horizontally.
    NinePatch,
    /// Any other radii combination.
    Complex,
}

/// A rectangle with elliptical corners.
///
/// Radii are stored in the `Corner` order and are always non-negative.
/// A corner with a zero radius along one axis is square along both.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RRect {
    rect: Rect,
    radii: [Point; 4],
}

impl Default for RRect {
    fn default() -> Self {
        RRect {
            rect: Rect::zero(),
            radii: [Point::zero(); 4],
        }
    }
}

impl RRect {
    /// Creates a rounded rectangle with square corners.
    pub fn from_rect(rect: Rect) -> Self {
        RRect {
            rect,
            radii: [Point::zero(); 4],
        }
    }

    /// Creates a rounded rectangle filled by an ellipse inscribed in `oval`.
    pub fn from_oval(oval: Rect) -> Self {
        let rx = oval.width().half();
        let ry = oval.height().half();
        if rx == 0.0 || ry == 0.0 {
            return RRect::from_rect(oval);
        }

        RRect {
            rect: oval,
            radii: [Point::from_xy(rx, ry); 4],
        }
    }

    /// Creates a rounded rectangle with the same radii at every corner.
    ///
    /// Radii that do not fit are scaled down proportionally.
    /// Non-finite radii produce square corners.
    pub fn from_rect_xy(rect: Rect, mut rx: f32, mut ry: f32) -> Self {
        if rect.is_empty() {
            return RRect::from_rect(rect);
        }

        if !(rx.is_finite() && ry.is_finite()) {
            rx = 0.0;
            ry = 0.0;
        }

        if rect.width() < rx + rx || rect.height() < ry + ry {
            // At most one of these two divides will be by zero, and neither numerator is zero.
            let scale = (rect.width() / (rx + rx)).min(rect.height() / (ry + ry));
            rx *= scale;
            ry *= scale;
        }

        if rx <= 0.0 || ry <= 0.0 {
            return RRect::from_rect(rect);
        }

        RRect {
            rect,
            radii: [Point::from_xy(rx, ry); 4],
        }
    }

    /// Creates a rounded rectangle with individual corner radii.
    ///
    /// A corner with a non-positive radius becomes square.
    /// When radii on a side overlap, all radii are scaled down by the same factor.
    pub fn from_rect_radii(rect: Rect, radii: &[Point; 4]) -> Self {
        if rect.is_empty() || !radii.iter().all(|r| r.is_finite()) {
            return RRect::from_rect(rect);
        }

        let mut rrect = RRect {
            rect,
            radii: *radii,
        };

        if clamp_to_zero(&mut rrect.radii) {
            return RRect::from_rect(rect);
        }

        rrect.scale_radii();
        rrect
    }

    fn scale_radii(&mut self) {
        // The sides of the rectangle may be larger than a float.
        let width = self.rect.right() as f64 - self.rect.left() as f64;
        let height = self.rect.bottom() as f64 - self.rect.top() as f64;

        let mut scale = 1.0;
        scale = compute_min_scale(self.radii[0].x, self.radii[1].x, width, scale);
        scale = compute_min_scale(self.radii[1].y, self.radii[2].y, height, scale);
        scale = compute_min_scale(self.radii[2].x, self.radii[3].x, width, scale);
        scale = compute_min_scale(self.radii[3].y, self.radii[0].y, height, scale);

        let [ul, ur, lr, ll] = &mut self.radii;
        flush_to_zero(&mut ul.x, &mut ur.x);
        flush_to_zero(&mut ur.y, &mut lr.y);
        flush_to_zero(&mut lr.x, &mut ll.x);
        flush_to_zero(&mut ll.y, &mut ul.y);

        if scale < 1.0 {
            adjust_radii(width, scale, &mut ul.x, &mut ur.x);
            adjust_radii(height, scale, &mut ur.y, &mut lr.y);
            adjust_radii(width, scale, &mut lr.x, &mut ll.x);
            adjust_radii(height, scale, &mut ll.y, &mut ul.y);
        }

        // Adjusting may zero one of the coordinates.
        clamp_to_zero(&mut self.radii);
    }

    /// Returns the bounds.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Returns the corner radii.
    pub fn radii(&self, corner: Corner) -> Point {
        self.radii[corner as usize]
    }

    /// Returns all radii in the `Corner` order.
    pub fn radii_array(&self) -> &[Point; 4] {
        &self.radii
    }

    /// Returns the upper-left radii, which are shared by all corners
    /// for `Simple` and `Oval` kinds.
    pub fn simple_radii(&self) -> Point {
        self.radii[0]
    }

    /// Returns the bounds width.
    pub fn width(&self) -> f32 {
        self.rect.width()
    }

    /// Returns the bounds height.
    pub fn height(&self) -> f32 {
        self.rect.height()
    }

    /// Classifies the rounded rectangle.
    pub fn rrect_type(&self) -> RRectType {
        if self.rect.is_empty() {
            return RRectType::Empty;
        }

        let r = &self.radii;
        let mut all_radii_equal = true;
        let mut all_corners_square = r[0].x == 0.0 || r[0].y == 0.0;
        for i in 1..4 {
            if r[i].x != 0.0 && r[i].y != 0.0 {
                // if either radius is zero the corner is square so both have to be non-zero
                // to have a rounded corner
                all_corners_square = false;
            }

            if r[i] != r[i - 1] {
                all_radii_equal = false;
            }
        }

        if all_corners_square {
            return RRectType::Rect;
        }

        if all_radii_equal {
            if r[0].x >= self.rect.width().half() && r[0].y >= self.rect.height().half() {
                return RRectType::Oval;
            }

            return RRectType::Simple;
        }

        if radii_are_nine_patch(r) {
            RRectType::NinePatch
        } else {
            RRectType::Complex
        }
    }

    /// Checks that the kind is `Empty`.
    pub fn is_empty(&self) -> bool {
        self.rrect_type() == RRectType::Empty
    }

    /// Checks that the kind is `Rect`.
    pub fn is_rect(&self) -> bool {
        self.rrect_type() == RRectType::Rect
    }

    /// Checks that the kind is `Oval`.
    pub fn is_oval(&self) -> bool {
        self.rrect_type() == RRectType::Oval
    }

    /// Checks that the kind is `Simple`.
    pub fn is_simple(&self) -> bool {
        self.rrect_type() == RRectType::Simple
    }

    /// Checks that the kind is `NinePatch`.
    pub fn is_nine_patch(&self) -> bool {
        self.rrect_type() == RRectType::NinePatch
    }

    /// Checks that the kind is `Complex`.
    pub fn is_complex(&self) -> bool {
        self.rrect_type() == RRectType::Complex
    }
}

// Makes a corner square along both axes when either radius is not positive.
// Returns true when all corners are square.
fn clamp_to_zero(radii: &mut [Point; 4]) -> bool {
    let mut all_corners_square = true;
    for r in radii.iter_mut() {
        if r.x <= 0.0 || r.y <= 0.0 {
            *r = Point::zero();
        } else {
            all_corners_square = false;
        }
    }

    all_corners_square
}

fn compute_min_scale(rad1: f32, rad2: f32, limit: f64, cur_min: f64) -> f64 {
    let sum = rad1 as f64 + rad2 as f64;
    if sum > limit {
        cur_min.min(limit / sum)
    } else {
        cur_min
    }
}

fn flush_to_zero(a: &mut f32, b: &mut f32) {
    debug_assert!(*a >= 0.0 && *b >= 0.0);
    if *a + *b == *a {
        *b = 0.0;
    } else if *a + *b == *b {
        *a = 0.0;
    }
}

// Scales a pair of radii sharing a side, then shrinks the larger one
// until the pair fits the side exactly.
fn adjust_radii(limit: f64, scale: f64, a: &mut f32, b: &mut f32) {
    *a = (*a as f64 * scale) as f32;
    *b = (*b as f64 * scale) as f32;

    if (*a + *b) as f64 > limit {
        let (min_radius, max_radius) = if *a > *b { (b, a) } else { (a, b) };
        let new_min_radius = *min_radius;
        let mut new_max_radius = (limit - new_min_radius as f64) as f32;

        // Usually never happens, but in pathological cases can take a dozen steps.
        while (new_max_radius + new_min_radius) as f64 > limit && new_max_radius > 0.0 {
            new_max_radius = next_toward_zero(new_max_radius);
        }

        *max_radius = new_max_radius;
    }
}

fn next_toward_zero(v: f32) -> f32 {
    debug_assert!(v > 0.0);
    f32::from_bits(v.to_bits() - 1)
}

fn radii_are_nine_patch(radii: &[Point; 4]) -> bool {
    let ul = radii[Corner::UpperLeft as usize];
    let ur = radii[Corner::UpperRight as usize];
    let lr = radii[Corner::LowerRight as usize];
    let ll = radii[Corner::LowerLeft as usize];
    ul.x == ll.x && ul.y == ur.y && ur.x == lr.x && ll.y == lr.y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::from_ltrb(0.0, 0.0, 100.0, 50.0).unwrap()
    }

    #[test]
    fn empty() {
        let rrect = RRect::from_rect_xy(Rect::from_ltrb(10.0, 10.0, 10.0, 20.0).unwrap(), 5.0, 5.0);
        assert_eq!(rrect.rrect_type(), RRectType::Empty);
        assert_eq!(rrect.simple_radii(), Point::zero());
        assert!(RRect::default().is_empty());
    }

    #[test]
    fn from_rect() {
        let rrect = RRect::from_rect(rect());
        assert!(rrect.is_rect());
        assert_eq!(rrect.rect(), rect());
    }

    #[test]
    fn from_oval() {
        let rrect = RRect::from_oval(rect());
        assert!(rrect.is_oval());
        assert_eq!(rrect.radii(Corner::LowerLeft), Point::from_xy(50.0, 25.0));
    }

    #[test]
    fn simple() {
        let rrect = RRect::from_rect_xy(rect(), 10.0, 5.0);
        assert!(rrect.is_simple());
        assert_eq!(rrect.radii(Corner::LowerRight), Point::from_xy(10.0, 5.0));
    }

    #[test]
    fn xy_radii_are_scaled_down() {
        let rrect = RRect::from_rect_xy(rect(), 100.0, 100.0);
        // Height limits the scale to 0.25.
        assert_eq!(rrect.simple_radii(), Point::from_xy(25.0, 25.0));
        assert!(rrect.is_simple());

        let rrect = RRect::from_rect_xy(rect(), 100.0, 50.0);
        assert!(rrect.is_oval());
    }

    #[test]
    fn xy_non_finite_or_negative_radii() {
        assert!(RRect::from_rect_xy(rect(), core::f32::NAN, 5.0).is_rect());
        assert!(RRect::from_rect_xy(rect(), -5.0, 5.0).is_rect());
        assert!(RRect::from_rect_xy(rect(), 5.0, 0.0).is_rect());
    }

    #[test]
    fn radii_clamp_to_zero() {
        let radii = [
            Point::from_xy(-5.0, 10.0),
            Point::from_xy(10.0, 10.0),
            Point::from_xy(10.0, 10.0),
            Point::from_xy(10.0, 10.0),
        ];
        let rrect = RRect::from_rect_radii(rect(), &radii);
        assert_eq!(rrect.radii(Corner::UpperLeft), Point::zero());
        assert!(rrect.is_complex());

        let radii = [Point::from_xy(-1.0, 1.0); 4];
        assert!(RRect::from_rect_radii(rect(), &radii).is_rect());
    }

    #[test]
    fn radii_are_scaled_uniformly() {
        let radii = [
            Point::from_xy(80.0, 10.0),
            Point::from_xy(40.0, 10.0),
            Point::from_xy(10.0, 10.0),
            Point::from_xy(10.0, 10.0),
        ];
        let rrect = RRect::from_rect_radii(rect(), &radii);
        let r = rrect.radii_array();
        assert!(r[0].x + r[1].x <= 100.0);
        assert!((r[0].x - 66.666_67).abs() < 0.001);
        assert!((r[1].x - 33.333_33).abs() < 0.001);
        assert!((r[2].y - 8.333_333).abs() < 0.001);
    }

    #[test]
    fn nine_patch() {
        let radii = [
            Point::from_xy(10.0, 5.0),
            Point::from_xy(20.0, 5.0),
            Point::from_xy(20.0, 8.0),
            Point::from_xy(10.0, 8.0),
        ];
        assert!(RRect::from_rect_radii(rect(), &radii).is_nine_patch());
    }

    #[test]
    fn flush() {
        let mut a = 1e20;
        let mut b = 1.0;
        flush_to_zero(&mut a, &mut b);
        assert_eq!(b, 0.0);
    }
}
