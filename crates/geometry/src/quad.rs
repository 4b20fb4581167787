use crate::{Matrix, Point, Rect};
use serde::{Deserialize, Serialize};

/// A four-corner quadrilateral. Unlike [`Rect`] it survives rotation and
/// shear intact; [`Quad::to_rect`] is a deliberately lossy projection back
/// to the axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quad {
    pub ul: Point,
    pub ur: Point,
    pub ll: Point,
    pub lr: Point,
}

impl Quad {
    pub fn new(ul: Point, ur: Point, ll: Point, lr: Point) -> Self {
        Self { ul, ur, ll, lr }
    }

    pub fn from_rect(r: &Rect) -> Self {
        Self {
            ul: Point::new(r.x0, r.y0),
            ur: Point::new(r.x1, r.y0),
            ll: Point::new(r.x0, r.y1),
            lr: Point::new(r.x1, r.y1),
        }
    }

    /// Bounding box of the four corners. The round trip
    /// `Quad::from_rect(r).to_rect() == r` holds for normalized `r`; after a
    /// rotation the box covers the rotated shape and the rotation is lost.
    pub fn to_rect(&self) -> Rect {
        let xs = [self.ul.x, self.ur.x, self.ll.x, self.lr.x];
        let ys = [self.ul.y, self.ur.y, self.ll.y, self.lr.y];
        Rect {
            x0: xs.iter().copied().fold(f64::INFINITY, f64::min),
            y0: ys.iter().copied().fold(f64::INFINITY, f64::min),
            x1: xs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            y1: ys.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }

    /// Transforms each corner independently; no axis alignment is re-derived.
    pub fn transform(&self, m: &Matrix) -> Self {
        Self {
            ul: self.ul.transform(m),
            ur: self.ur.transform(m),
            ll: self.ll.transform(m),
            lr: self.lr.transform(m),
        }
    }
}
