use crate::{Matrix, Point};
use serde::{Deserialize, Serialize};

/// An axis-aligned box with floating-point corners.
///
/// A rect is not required to be normalized: `x0 > x1` denotes a degenerate
/// (empty) box, which is how [`Rect::intersect`] reports disjoint inputs.
/// [`Rect::width`] and [`Rect::height`] are absolute differences, so use
/// [`Rect::is_empty`] (which looks at the pre-abs ordering) to detect
/// emptiness.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).abs()
    }

    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Re-orders the corners so that `x0 <= x1` and `y0 <= y1`.
    pub fn normalize(&self) -> Rect {
        Rect {
            x0: self.x0.min(self.x1),
            y0: self.y0.min(self.y1),
            x1: self.x0.max(self.x1),
            y1: self.y0.max(self.y1),
        }
    }

    /// Inclusive bounds test on both axes. Only meaningful for normalized
    /// rects; call [`Rect::normalize`] first if the corners may be swapped.
    pub fn contains(&self, p: Point) -> bool {
        self.x0 <= p.x && p.x <= self.x1 && self.y0 <= p.y && p.y <= self.y1
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Never fails; disjoint inputs yield an inverted (empty) rect.
    pub fn intersect(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    /// Transforms all four corners and returns their axis-aligned bounding
    /// box. Rotation or shear can move the extremes to any corner, so a
    /// two-corner shortcut would be wrong here.
    pub fn transform(&self, m: &Matrix) -> Rect {
        let corners = [
            Point::new(self.x0, self.y0).transform(m),
            Point::new(self.x1, self.y0).transform(m),
            Point::new(self.x0, self.y1).transform(m),
            Point::new(self.x1, self.y1).transform(m),
        ];
        let mut out = Rect::new(corners[0].x, corners[0].y, corners[0].x, corners[0].y);
        for p in &corners[1..] {
            out.x0 = out.x0.min(p.x);
            out.y0 = out.y0.min(p.y);
            out.x1 = out.x1.max(p.x);
            out.y1 = out.y1.max(p.y);
        }
        out
    }

    /// Smallest integer rect containing `self`: floor the lower corner,
    /// ceil the upper. The containment-preserving rounding policy.
    pub fn round_out(&self) -> IRect {
        IRect {
            x0: self.x0.floor() as i32,
            y0: self.y0.floor() as i32,
            x1: self.x1.ceil() as i32,
            y1: self.y1.ceil() as i32,
        }
    }

    /// Largest integer rect contained in `self`: ceil the lower corner,
    /// floor the upper. May come out inverted for thin rects.
    pub fn round_in(&self) -> IRect {
        IRect {
            x0: self.x0.ceil() as i32,
            y0: self.y0.ceil() as i32,
            x1: self.x1.floor() as i32,
            y1: self.y1.floor() as i32,
        }
    }
}

/// [`Rect`] with integer coordinates. Conversions from `Rect` are explicit
/// ([`Rect::round_out`] / [`Rect::round_in`]); there is no implicit rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl IRect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> i32 {
        (self.x1 - self.x0).abs()
    }

    pub fn height(&self) -> i32 {
        (self.y1 - self.y0).abs()
    }

    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    pub fn to_rect(&self) -> Rect {
        Rect {
            x0: f64::from(self.x0),
            y0: f64::from(self.y0),
            x1: f64::from(self.x1),
            y1: f64::from(self.y1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_covers_both() {
        let u = Rect::new(0.0, 0.0, 100.0, 100.0).union(&Rect::new(50.0, 50.0, 150.0, 150.0));
        assert_eq!(u, Rect::new(0.0, 0.0, 150.0, 150.0));
    }

    #[test]
    fn test_intersect_overlapping() {
        let i = Rect::new(0.0, 0.0, 100.0, 100.0).intersect(&Rect::new(50.0, 50.0, 150.0, 150.0));
        assert_eq!(i, Rect::new(50.0, 50.0, 100.0, 100.0));
        assert!(!i.is_empty());
    }

    #[test]
    fn test_intersect_disjoint_is_empty() {
        let i = Rect::new(0.0, 0.0, 100.0, 100.0).intersect(&Rect::new(200.0, 200.0, 300.0, 300.0));
        assert!(i.is_empty());
        assert!(i.x1 < i.x0);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(100.0, 100.0)));
        assert!(!r.contains(Point::new(100.1, 50.0)));
    }

    #[test]
    fn test_transform_under_rotation_grows_bounds() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        let rotated = r.transform(&Matrix::rotate(45.0));
        assert!(rotated.width() > r.width());
        assert!(rotated.height() > r.height());
    }

    #[test]
    fn test_transform_translate_only_shifts() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).transform(&Matrix::translate(5.0, -5.0));
        assert_eq!(r, Rect::new(5.0, -5.0, 15.0, 5.0));
    }

    #[test]
    fn test_normalize_swapped_corners() {
        let r = Rect::new(10.0, 10.0, 0.0, 0.0).normalize();
        assert_eq!(r, Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_round_out_contains_round_in() {
        let r = Rect::new(0.4, 0.6, 9.2, 9.8);
        assert_eq!(r.round_out(), IRect::new(0, 0, 10, 10));
        assert_eq!(r.round_in(), IRect::new(1, 1, 9, 9));
    }

    #[test]
    fn test_irect_widening() {
        let r = IRect::new(0, 0, 5, 5).to_rect();
        assert_eq!(r, Rect::new(0.0, 0.0, 5.0, 5.0));
    }
}
