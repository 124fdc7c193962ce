// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::path::{Path, PathSegment, PathVerb};
use crate::{Matrix, Point};

/// Specifies how `Path::add_path` joins the source with the destination.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AddPathMode {
    /// Source contours are added as new contours.
    Append,
    /// The first source contour continues the last destination contour
    /// through a line.
    Extend,
}

impl Default for AddPathMode {
    fn default() -> Self {
        AddPathMode::Append
    }
}

impl Path {
    /// Appends `src` transformed by `matrix`.
    ///
    /// The destination fill type is preserved.
    pub fn add_path(&mut self, src: &Path, matrix: &Matrix, mode: AddPathMode) {
        if src.is_empty() {
            return;
        }

        if self.is_empty() && matrix.is_identity() {
            let fill_type = self.fill_type;
            *self = src.clone();
            self.fill_type = fill_type;
            return;
        }

        if mode == AddPathMode::Append && !matrix.has_perspective() {
            self.append_mapped(src, matrix);
        } else {
            self.replay_mapped(src, matrix, mode);
        }
    }

    /// Appends a copy of this path transformed by `matrix`.
    pub fn add_path_self(&mut self, matrix: &Matrix, mode: AddPathMode) {
        let src = self.clone();
        self.add_path(&src, matrix, mode);
    }

    fn append_mapped(&mut self, src: &Path, matrix: &Matrix) {
        // A source always starts with a move, which replaces a trailing one.
        if self.verbs.last() == Some(&PathVerb::Move) {
            self.verbs.pop();
            self.points.pop();
        }

        let points_count = self.points.len() as isize;
        self.last_move_to_index = if src.last_move_to_index >= 0 {
            src.last_move_to_index + points_count
        } else {
            src.last_move_to_index - points_count
        };

        self.verbs.extend_from_slice(&src.verbs);

        let start = self.points.len();
        self.points.resize(start + src.points.len(), Point::zero());
        matrix.map_points_to(&src.points, &mut self.points[start..]);

        self.conic_weights.extend_from_slice(&src.conic_weights);
        self.segment_mask |= src.segment_mask;

        self.dirty_after_edit();
    }

    fn replay_mapped(&mut self, src: &Path, matrix: &Matrix, mode: AddPathMode) {
        let mut first_verb = true;
        for segment in src.segments() {
            match segment {
                PathSegment::MoveTo(p) => {
                    let p = matrix.map_point(p);
                    if first_verb && mode == AddPathMode::Extend && !self.is_empty() {
                        // In case the last contour is closed.
                        self.inject_move_to_if_needed();
                        // don't add a line if it is degenerate
                        if self.last_point() != Some(p) {
                            self.line_to(p.x, p.y);
                        }
                    } else {
                        self.move_to(p.x, p.y);
                    }
                }
                PathSegment::LineTo(_, p) => {
                    let p = matrix.map_point(p);
                    self.line_to(p.x, p.y);
                }
                PathSegment::QuadTo(_, p1, p) => {
                    let p1 = matrix.map_point(p1);
                    let p = matrix.map_point(p);
                    self.quad_to(p1.x, p1.y, p.x, p.y);
                }
                PathSegment::ConicTo(_, p1, p, weight) => {
                    self.conic_points_to(matrix.map_point(p1), matrix.map_point(p), weight);
                }
                PathSegment::CubicTo(_, p1, p2, p) => {
                    let p1 = matrix.map_point(p1);
                    let p2 = matrix.map_point(p2);
                    let p = matrix.map_point(p);
                    self.cubic_to(p1.x, p1.y, p2.x, p2.y, p.x, p.y);
                }
                PathSegment::Close(..) => self.close(),
            }

            first_verb = false;
        }
    }

    /// Appends the contours of `src` with every segment reversed.
    ///
    /// Contours are added last to first.
    pub fn reverse_add_path(&mut self, src: &Path) {
        let points = &src.points;
        let mut pts_index = points.len() as isize;
        let mut weights_index = src.conic_weights.len();
        let mut need_move = true;
        let mut need_close = false;

        for verb in src.verbs.iter().rev() {
            if need_move {
                pts_index -= 1;
                let p = points[pts_index as usize];
                self.move_to(p.x, p.y);
                need_move = false;
            }

            pts_index -= verb.points_count() as isize;
            let i = pts_index.max(0) as usize;
            match verb {
                PathVerb::Move => {
                    if need_close {
                        self.close();
                        need_close = false;
                    }

                    need_move = true;
                    // so the start point is taken by the next move
                    pts_index += 1;
                }
                PathVerb::Line => self.line_to(points[i].x, points[i].y),
                PathVerb::Quad => {
                    self.quad_to(points[i + 1].x, points[i + 1].y, points[i].x, points[i].y)
                }
                PathVerb::Conic => {
                    weights_index -= 1;
                    self.conic_points_to(points[i + 1], points[i], src.conic_weights[weights_index]);
                }
                PathVerb::Cubic => self.cubic_to(
                    points[i + 2].x,
                    points[i + 2].y,
                    points[i + 1].x,
                    points[i + 1].y,
                    points[i].x,
                    points[i].y,
                ),
                PathVerb::Close => need_close = true,
            }
        }
    }

    /// Transforms every point of the path in place.
    pub fn transform(&mut self, matrix: &Matrix) {
        if matrix.is_identity() {
            return;
        }

        matrix.map_points(&mut self.points);
        self.dirty_after_edit();
    }

    /// Returns a copy of the path transformed by `matrix`.
    pub fn transformed(&self, matrix: &Matrix) -> Path {
        let mut path = self.clone();
        path.transform(matrix);
        path
    }
}
