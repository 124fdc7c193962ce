/*!
`tiny-skia-geometry` is the path and matrix geometry kernel of [Skia](https://skia.org/) ported to Rust.

It provides an affine and perspective 3x3 `Matrix`, a `Path` made of lines,
quads, conics and cubics, shape and arc builders, bounds and convexity queries.

There is no rendering here. A `Path` is a plain geometry container
that can be iterated via `Path::segments`.
*/

#![no_std]
#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]

#![allow(clippy::approx_constant)]
#![allow(clippy::clone_on_copy)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::eq_op)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::float_cmp)]
#![allow(clippy::identity_op)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::too_many_arguments)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("You have to activate either the `std` or the `libm` feature.");

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod arc;
mod convexity;
mod floating_point;
mod geom;
mod matrix;
mod path;
mod path_combine;
mod path_geometry;
mod rrect;
mod scalar;
mod shapes;
mod wide;

pub use arc::ArcSize;
pub use floating_point::NormalizedF32Exclusive;
pub use geom::{Point, Rect};
pub use matrix::{Matrix, ScaleToFit, TypeMask};
pub use path::{
    Convexity, FillType, Path, PathDirection, PathSegment, PathSegmentsIter, PathVerb, SegmentMask,
};
pub use path_combine::AddPathMode;
pub use path_geometry::{find_unit_quad_roots, valid_unit_divide, Conic, MAX_CONICS_FOR_ARC};
pub use rrect::{Corner, RRect, RRectType};
