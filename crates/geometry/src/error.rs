use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("matrix is not invertible (determinant {det:e})")]
    NonInvertible { det: f64 },
}
