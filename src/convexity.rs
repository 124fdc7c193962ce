// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::path::{Convexity, Path, PathDirection, PathSegment};
use crate::Point;

const VALUE_NEVER_RETURNED_BY_SIGN: u32 = 2;

fn sign(x: f32) -> u32 {
    (x < 0.0) as u32
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum DirChange {
    Unknown,
    Left,
    Right,
    Straight,
    Backwards,
    Invalid,
}

/// A turn direction state machine for a single contour.
#[derive(Copy, Clone, Debug)]
struct Convexicator {
    // The first point of the contour, e.g. move_to(x, y).
    first_pt: Point,
    // The direction leaving first_pt to the next vertex.
    first_vec: Point,
    // The last point passed to add_pt().
    last_pt: Point,
    // The direction that brought the path to last_pt.
    last_vec: Point,
    expected_dir: DirChange,
    first_direction: Option<PathDirection>,
    reversals: u32,
}

impl Default for Convexicator {
    fn default() -> Self {
        Convexicator {
            first_pt: Point::zero(),
            first_vec: Point::zero(),
            last_pt: Point::zero(),
            last_vec: Point::zero(),
            expected_dir: DirChange::Invalid,
            first_direction: None,
            reversals: 0,
        }
    }
}

impl Convexicator {
    fn set_move_pt(&mut self, pt: Point) {
        self.first_pt = pt;
        self.last_pt = pt;
        self.expected_dir = DirChange::Invalid;
    }

    fn add_pt(&mut self, pt: Point) -> bool {
        if self.last_pt == pt {
            return true;
        }

        // Should only be true for the first non-zero vector after set_move_pt was called.
        // It is possible we doubled back at the start, so last_vec must be zero as well.
        if self.first_pt == self.last_pt
            && self.expected_dir == DirChange::Invalid
            && self.last_vec.is_zero()
        {
            self.last_vec = pt - self.last_pt;
            self.first_vec = self.last_vec;
        } else if !self.add_vec(pt - self.last_pt) {
            return false;
        }

        self.last_pt = pt;
        true
    }

    fn close(&mut self) -> bool {
        // An explicit close already has a line to first_pt, so add_pt() is a no-op.
        // Otherwise it closes the contour implicitly. Either way, the turn onto
        // the first vector has to be checked.
        let first_pt = self.first_pt;
        let first_vec = self.first_vec;
        self.add_pt(first_pt) && self.add_vec(first_vec)
    }

    fn direction_change(&self, cur_vec: Point) -> DirChange {
        let cross = self.last_vec.cross(cur_vec);
        if !cross.is_finite() {
            return DirChange::Unknown;
        }

        if cross == 0.0 {
            return if self.last_vec.dot(cur_vec) < 0.0 {
                DirChange::Backwards
            } else {
                DirChange::Straight
            };
        }

        if cross > 0.0 {
            DirChange::Right
        } else {
            DirChange::Left
        }
    }

    fn add_vec(&mut self, cur_vec: Point) -> bool {
        let dir = self.direction_change(cur_vec);
        match dir {
            DirChange::Left | DirChange::Right => {
                if self.expected_dir == DirChange::Invalid {
                    self.expected_dir = dir;
                    self.first_direction = Some(if dir == DirChange::Right {
                        PathDirection::Cw
                    } else {
                        PathDirection::Ccw
                    });
                } else if dir != self.expected_dir {
                    self.first_direction = None;
                    return false;
                }

                self.last_vec = cur_vec;
            }
            DirChange::Straight => {}
            DirChange::Backwards => {
                // Allow the path to reverse direction twice.
                //   Given move_to(0, 0); line_to(1, 1);
                //   - 1st reversal: direction change formed by line (0,0 1,1), line (1,1 0,0)
                //   - 2nd reversal: direction change formed by line (1,1 0,0), line (0,0 1,1)
                self.last_vec = cur_vec;
                self.reversals += 1;
                return self.reversals < 3;
            }
            DirChange::Unknown => return false,
            DirChange::Invalid => {
                debug_assert!(false, "invalid direction change");
                return false;
            }
        }

        true
    }
}

/// Counts sign changes of edge vectors per axis.
///
/// Walks the points starting from index 1, then makes one extra
/// wrapped step back to the first point. More than three changes
/// in either axis cannot be convex.
fn is_concave_by_sign(points: &[Point]) -> bool {
    // point, line, or triangle are always convex
    if points.len() <= 3 {
        return false;
    }

    let first_pt = points[0];
    let mut curr_pt = first_pt;
    let mut dxes = 0;
    let mut dyes = 0;
    let mut last_sx = VALUE_NEVER_RETURNED_BY_SIGN;
    let mut last_sy = VALUE_NEVER_RETURNED_BY_SIGN;

    let wrapped_step = core::iter::once(&first_pt);
    for &pt in points[1..].iter().chain(wrapped_step) {
        let vec = pt - curr_pt;
        if !vec.is_zero() {
            // give up if vector construction failed
            if !vec.is_finite() {
                return true;
            }

            let sx = sign(vec.x);
            let sy = sign(vec.y);
            dxes += (sx != last_sx) as u32;
            dyes += (sy != last_sy) as u32;
            if dxes > 3 || dyes > 3 {
                return true;
            }

            last_sx = sx;
            last_sy = sy;
        }

        curr_pt = pt;
    }

    false
}

impl Path {
    /// Returns the path convexity.
    ///
    /// Computed on first request and cached until the next mutation.
    pub fn convexity(&self) -> Convexity {
        let convexity = self.convexity.get();
        if convexity != Convexity::Unknown {
            return convexity;
        }

        let convexity = self.compute_convexity();
        self.convexity.set(convexity);
        convexity
    }

    /// Checks that the path is convex.
    pub fn is_convex(&self) -> bool {
        self.convexity().is_convex()
    }

    /// Returns the turning direction of a convex path.
    ///
    /// Returns `None` for concave and degenerate paths.
    pub fn first_direction(&self) -> Option<PathDirection> {
        self.convexity().direction()
    }

    fn compute_convexity(&self) -> Convexity {
        if !self.is_finite() {
            log::trace!("path is concave: not finite");
            return Convexity::Concave;
        }

        // Moves are never consecutive, so only trailing moves
        // and moves between contours have to be handled.
        let mut points_count = self.points.len();
        if self.last_move_to_index >= 0 {
            let last_move_to_index = self.last_move_to_index as usize;
            if last_move_to_index + 1 == points_count {
                // Find the last real verb that affects convexity.
                let mut verbs_count = self.verbs.len();
                while verbs_count > 1 && self.verbs[verbs_count - 1] == crate::PathVerb::Move {
                    verbs_count -= 1;
                    points_count -= 1;
                }
            } else if last_move_to_index != 0 {
                // There's an additional move_to between two blocks of other verbs,
                // so the path must have more than one contour and cannot be convex.
                log::trace!("path is concave: multiple contours");
                return Convexity::Concave;
            }
        }

        // Check to see if path changes direction more than three times as quick concave test.
        if is_concave_by_sign(&self.points[..points_count]) {
            log::trace!("path is concave: too many sign changes");
            return Convexity::Concave;
        }

        let mut contour_count = 0;
        let mut needs_close = false;
        let mut state = Convexicator::default();

        for segment in self.segments() {
            // Looking for the last move_to before non-move verbs start.
            if contour_count == 0 {
                if let PathSegment::MoveTo(p) = segment {
                    state.set_move_pt(p);
                } else {
                    // Starting the actual contour, fall through to add the points.
                    contour_count += 1;
                    needs_close = true;
                }
            }

            // Accumulating points until we hit a close or another move.
            if contour_count == 1 {
                let ok = match segment {
                    PathSegment::MoveTo(..) | PathSegment::Close(..) => {
                        needs_close = false;
                        contour_count += 1;
                        state.close()
                    }
                    PathSegment::LineTo(_, p1) => state.add_pt(p1),
                    PathSegment::QuadTo(_, p1, p2) | PathSegment::ConicTo(_, p1, p2, _) => {
                        state.add_pt(p1) && state.add_pt(p2)
                    }
                    PathSegment::CubicTo(_, p1, p2, p3) => {
                        state.add_pt(p1) && state.add_pt(p2) && state.add_pt(p3)
                    }
                };

                if !ok {
                    log::trace!("path is concave: inconsistent turns");
                    return Convexity::Concave;
                }
            } else if !matches!(segment, PathSegment::MoveTo(..)) {
                // The first contour has closed and anything other than spurious
                // trailing moves means there are multiple contours.
                log::trace!("path is concave: multiple contours");
                return Convexity::Concave;
            }
        }

        // If the path isn't explicitly closed, do so implicitly.
        if needs_close && !state.close() {
            log::trace!("path is concave: inconsistent turns");
            return Convexity::Concave;
        }

        match state.first_direction {
            Some(PathDirection::Cw) => Convexity::ConvexCw,
            Some(PathDirection::Ccw) => Convexity::ConvexCcw,
            None => {
                if !self.bounds().is_empty() && state.reversals >= 3 {
                    Convexity::Concave
                } else {
                    Convexity::ConvexDegenerate
                }
            }
        }
    }
}
