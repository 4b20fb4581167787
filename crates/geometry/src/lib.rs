//! Affine geometry primitives: points, rectangles, matrices and quads.
//!
//! Every type here is plain `Copy` data. Operations never mutate in place;
//! each transform returns a new value, so the types are freely shareable
//! across threads. The only fallible operation in the whole crate is
//! [`Matrix::invert`].

mod error;
mod matrix;
mod point;
mod quad;
mod rect;

pub use error::GeometryError;
pub use matrix::Matrix;
pub use point::Point;
pub use quad::Quad;
pub use rect::{IRect, Rect};
