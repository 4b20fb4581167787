use crate::GeometryError;
use serde::{Deserialize, Serialize};

/// Determinant magnitude below which a matrix is treated as singular.
const DET_EPSILON: f64 = 1e-14;

/// A 2D affine transform: the linear part `[[a, b], [c, d]]` plus the
/// translation `[e, f]`.
///
/// Points are row vectors, so transforms compose left to right:
/// `m1.concat(m2)` applied to a point is "apply `m1`, then `m2`".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self { a: sx, b: 0.0, c: 0.0, d: sy, e: 0.0, f: 0.0 }
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: tx, f: ty }
    }

    /// Rotation by `degrees`, counter-clockwise in the y-up PDF coordinate
    /// space under the row-vector convention used by [`Point::transform`].
    ///
    /// [`Point::transform`]: crate::Point::transform
    pub fn rotate(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 }
    }

    /// Composes `self` with `other` so that applying the result equals
    /// applying `self` first, then `other`.
    pub fn concat(&self, other: &Matrix) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    pub fn det(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Returns the analytic inverse, or [`GeometryError::NonInvertible`]
    /// when the determinant magnitude falls below a fixed `1e-14` epsilon.
    pub fn invert(&self) -> Result<Matrix, GeometryError> {
        let det = self.det();
        if det.abs() < DET_EPSILON {
            return Err(GeometryError::NonInvertible { det });
        }
        let rd = 1.0 / det;
        let a = self.d * rd;
        let b = -self.b * rd;
        let c = -self.c * rd;
        let d = self.a * rd;
        Ok(Matrix {
            a,
            b,
            c,
            d,
            e: -(self.e * a + self.f * c),
            f: -(self.e * b + self.f * d),
        })
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}
