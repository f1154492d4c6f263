use thiserror::Error;

/// Failures raised by the geometry kernel.
///
/// Degenerate polygons are not an error: a polygon with fewer than three vertices has no
/// interior and simply classifies every point as outside.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeomError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("matrix is singular (det = {0})")]
    SingularMatrix(f64),
    #[error("matrix is not affine (last column is not (0, 0, 1))")]
    NotAffine,
    #[error("invalid dimensions: {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("border scale must be in (0, 1], got {0}")]
    InvalidBorderScale(f64),
}
