#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::gg_float;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// A 2D point or direction in homogeneous form.
///
/// `x` and `y` are the usual coordinates. `w` only takes part in multiplication by a
/// [`Mat3x3`]: points have `w = 1` and are moved by translations, free directions have `w = 0`
/// and are not. None of the arithmetic on [`Vec2`] itself (addition, scaling, rotation, ...)
/// touches `w`; results inherit the `w` of the left-hand operand.
///
/// Rotations follow the mathematical convention: a positive angle turns `+x` towards `+y`.
///
/// # Examples
///
/// ```
/// use ggkernel::util::linalg::{Mat3x3, Vec2};
///
/// let p = Vec2::new(1.0, 0.0);
/// let d = Vec2::direction(1.0, 0.0);
/// let m = Mat3x3::translation(5.0, 0.0);
/// assert_eq!(p * m, Vec2::new(6.0, 0.0));
/// assert_eq!(d * m, Vec2::direction(1.0, 0.0));
/// ```
///
/// # Equality
/// Two vectors are equal if every component (including `w`) differs by less than
/// [`EPSILON`](crate::core::config::EPSILON).
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
    pub w: f64,
}

impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON
            && (self.y - other.y).abs() < EPSILON
            && (self.w - other.w).abs() < EPSILON
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Self::zero()
    }
}

impl Vec2 {
    /// A point (`w = 1`).
    #[must_use]
    pub fn new(x: f64, y: f64) -> Vec2 {
        Vec2 { x, y, w: 1.0 }
    }
    /// Same as [`Vec2::new`]; reads better next to [`Vec2::direction`].
    #[must_use]
    pub fn point(x: f64, y: f64) -> Vec2 {
        Self::new(x, y)
    }
    /// A free direction (`w = 0`), unaffected by translation.
    #[must_use]
    pub fn direction(x: f64, y: f64) -> Vec2 {
        Vec2 { x, y, w: 0.0 }
    }

    #[must_use]
    pub fn right() -> Vec2 {
        Self::new(1.0, 0.0)
    }
    /// Positive y. World space grows upwards; screen space is the one that flips.
    #[must_use]
    pub fn up() -> Vec2 {
        Self::new(0.0, 1.0)
    }
    #[must_use]
    pub fn left() -> Vec2 {
        Self::new(-1.0, 0.0)
    }
    #[must_use]
    pub fn down() -> Vec2 {
        Self::new(0.0, -1.0)
    }
    #[must_use]
    pub fn one() -> Vec2 {
        Self::new(1.0, 1.0)
    }
    #[must_use]
    pub fn zero() -> Vec2 {
        Self::new(0.0, 0.0)
    }

    /// Constructs a point from polar form. Inverse of `(len(), angle())`, up to the wraparound of
    /// the angle into `(-π, π]`.
    #[must_use]
    pub fn from_polar(angle: f64, radius: f64) -> Vec2 {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    /// Returns the squared length of the vector.
    ///
    /// Use this instead of [`len`](Vec2::len) when comparing lengths to avoid the square root.
    #[must_use]
    pub fn len_squared(&self) -> f64 {
        self.dot(*self)
    }
    /// Euclidean length, without overflow or underflow in the intermediate squares.
    #[must_use]
    pub fn len(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Divides both coordinates by `k`, failing instead of producing infinities.
    ///
    /// # Errors
    /// [`GeomError::DivisionByZero`] when `k` is zero (of either sign).
    pub fn div(&self, k: f64) -> Result<Vec2, GeomError> {
        if k.is_zero() {
            return Err(GeomError::DivisionByZero);
        }
        Ok(Vec2 {
            x: self.x / k,
            y: self.y / k,
            w: self.w,
        })
    }

    /// Returns a unit vector in the same direction.
    ///
    /// # Errors
    /// [`GeomError::DivisionByZero`] for the zero vector.
    ///
    /// ```
    /// use ggkernel::util::linalg::Vec2;
    /// assert_eq!(Vec2::new(3.0, 4.0).normed().unwrap(), Vec2::new(0.6, 0.8));
    /// assert!(Vec2::zero().normed().is_err());
    /// ```
    pub fn normed(&self) -> Result<Vec2, GeomError> {
        let mut rv = self.div(self.len())?;
        rv.x = gg_float::force_positive_zero(rv.x);
        rv.y = gg_float::force_positive_zero(rv.y);
        Ok(rv)
    }

    #[must_use]
    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }
    /// The z-component of the 3D cross product; positive when `other` is counterclockwise from
    /// `self`.
    #[must_use]
    pub fn cross(&self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }
    #[must_use]
    pub fn dist(&self, other: Vec2) -> f64 {
        (*self - other).len()
    }

    /// Angle with the positive x-axis, in `(-π, π]`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Rotates counterclockwise by `radians`.
    #[must_use]
    pub fn rotated(&self, radians: f64) -> Vec2 {
        let (sin, cos) = radians.sin_cos();
        Vec2 {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
            w: self.w,
        }
    }
    /// 90 degree counterclockwise rotation, `(-y, x)`.
    #[must_use]
    pub fn perpendicular(&self) -> Vec2 {
        Vec2 {
            x: -self.y,
            y: self.x,
            w: self.w,
        }
    }

    #[must_use]
    pub fn translated(&self, tx: f64, ty: f64) -> Vec2 {
        Vec2 {
            x: self.x + tx,
            y: self.y + ty,
            w: self.w,
        }
    }
    #[must_use]
    pub fn scaled(&self, sx: f64, sy: f64) -> Vec2 {
        Vec2 {
            x: self.x * sx,
            y: self.y * sy,
            w: self.w,
        }
    }
    /// `x' = x + sx * y`, `y' = y + sy * x`; matches [`Mat3x3::shear`].
    #[must_use]
    pub fn sheared(&self, sx: f64, sy: f64) -> Vec2 {
        Vec2 {
            x: self.x + sx * self.y,
            y: self.y + sy * self.x,
            w: self.w,
        }
    }

    #[must_use]
    pub fn almost_eq(&self, rhs: Vec2) -> bool {
        (*self - rhs).len() < EPSILON
    }

    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn as_vec2i_lossy(&self) -> Vec2i {
        Vec2i {
            x: self.x as i32,
            y: self.y as i32,
        }
    }
}

impl Zero for Vec2 {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_zero(&self) -> bool {
        self.almost_eq(Self::zero())
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from(value: [f64; 2]) -> Self {
        Vec2::new(value[0], value[1])
    }
}
impl From<(f64, f64)> for Vec2 {
    fn from(value: (f64, f64)) -> Self {
        Vec2::new(value.0, value.1)
    }
}
impl From<Vec2> for [f64; 2] {
    fn from(value: Vec2) -> Self {
        [value.x, value.y]
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(p) = f.precision() {
            write!(f, "vec({:.*}, {:.*})", p, self.x, p, self.y)
        } else {
            write!(f, "vec({}, {})", self.x, self.y)
        }
    }
}

impl Add<Vec2> for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            w: self.w,
        }
    }
}
impl AddAssign<Vec2> for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub<Vec2> for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            w: self.w,
        }
    }
}
impl SubAssign<Vec2> for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scaled(rhs, rhs)
    }
}
impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Self::Output {
        rhs.scaled(self, self)
    }
}
impl MulAssign<f64> for Vec2 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        Vec2 {
            x: -self.x,
            y: -self.y,
            w: self.w,
        }
    }
}

/// Integer pixel coordinates, e.g. a pointer position. Screen space: origin at the top-left,
/// y grows downwards.
#[derive(Default, Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Serialize, Deserialize)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    #[must_use]
    pub fn zero() -> Vec2i {
        Vec2i { x: 0, y: 0 }
    }
    /// The corresponding point (`w = 1`).
    #[must_use]
    pub fn as_vec2(&self) -> Vec2 {
        Into::<Vec2>::into(*self)
    }
}

impl From<Vec2i> for Vec2 {
    fn from(value: Vec2i) -> Self {
        Vec2::new(f64::from(value.x), f64::from(value.y))
    }
}
impl From<[i32; 2]> for Vec2i {
    fn from(value: [i32; 2]) -> Self {
        Vec2i {
            x: value[0],
            y: value[1],
        }
    }
}
impl From<(i32, i32)> for Vec2i {
    fn from(value: (i32, i32)) -> Self {
        Vec2i {
            x: value.0,
            y: value.1,
        }
    }
}

impl fmt::Display for Vec2i {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vec({}, {})", self.x, self.y)
    }
}

impl Sub<Vec2i> for Vec2i {
    type Output = Vec2i;

    fn sub(self, rhs: Vec2i) -> Self::Output {
        Vec2i {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// A 3x3 homogeneous matrix for 2D affine transformations, in row-vector convention.
///
/// A vector is the row `(x, y, w)` and is transformed as `v * M`. The field names give
/// `<row><column>`, where the row is the input axis and the column the output axis:
/// ```text
/// | xx xy xw |
/// | yx yy yw |
/// | wx wy ww |
/// ```
/// The translation lives in the bottom row (`wx`, `wy`). Every constructor here leaves the last
/// column as `(0, 0, 1)`, so results stay affine.
///
/// # Composition order
/// `a * b` applies `a` first and `b` second: `(v * a) * b == v * (a * b)`. To place an object,
/// scale, then rotate, then translate:
///
/// ```
/// use ggkernel::util::linalg::{Mat3x3, Vec2};
/// use std::f64::consts::FRAC_PI_2;
///
/// let placement = Mat3x3::scale(2.0, 2.0) * Mat3x3::rotation(FRAC_PI_2) * Mat3x3::translation(5.0, 0.0);
/// assert_eq!(Vec2::new(1.0, 0.0) * placement, Vec2::new(5.0, 2.0));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Mat3x3 {
    pub xx: f64,
    pub xy: f64,
    pub xw: f64,
    pub yx: f64,
    pub yy: f64,
    pub yw: f64,
    pub wx: f64,
    pub wy: f64,
    pub ww: f64,
}

impl Mat3x3 {
    pub fn one() -> Mat3x3 {
        Mat3x3 {
            xx: 1.0,
            xy: 0.0,
            xw: 0.0,
            yx: 0.0,
            yy: 1.0,
            yw: 0.0,
            wx: 0.0,
            wy: 0.0,
            ww: 1.0,
        }
    }
    pub fn identity() -> Mat3x3 {
        Self::one()
    }

    /// All zeroes. Not affine; mostly useful as an accumulator.
    pub fn zero() -> Mat3x3 {
        Mat3x3 {
            xx: 0.0,
            xy: 0.0,
            xw: 0.0,
            yx: 0.0,
            yy: 0.0,
            yw: 0.0,
            wx: 0.0,
            wy: 0.0,
            ww: 0.0,
        }
    }

    /// ```text
    /// | 1  0  0 |
    /// | 0  1  0 |
    /// | dx dy 1 |
    /// ```
    pub fn translation(dx: f64, dy: f64) -> Mat3x3 {
        Mat3x3 {
            wx: dx,
            wy: dy,
            ..Self::one()
        }
    }
    pub fn translation_vec2(vec2: Vec2) -> Mat3x3 {
        Self::translation(vec2.x, vec2.y)
    }

    pub fn scale(sx: f64, sy: f64) -> Mat3x3 {
        Mat3x3 {
            xx: sx,
            yy: sy,
            ..Self::one()
        }
    }
    pub fn scale_vec2(vec2: Vec2) -> Mat3x3 {
        Self::scale(vec2.x, vec2.y)
    }

    /// `x' = x + sx * y`, `y' = y + sy * x`:
    /// ```text
    /// | 1  sy 0 |
    /// | sx 1  0 |
    /// | 0  0  1 |
    /// ```
    pub fn shear(sx: f64, sy: f64) -> Mat3x3 {
        Mat3x3 {
            xy: sy,
            yx: sx,
            ..Self::one()
        }
    }
    pub fn shear_vec2(vec2: Vec2) -> Mat3x3 {
        Self::shear(vec2.x, vec2.y)
    }

    /// Counterclockwise rotation by `radians`:
    /// ```text
    /// |  cos(θ)  sin(θ)  0 |
    /// | -sin(θ)  cos(θ)  0 |
    /// |  0       0       1 |
    /// ```
    pub fn rotation(radians: f64) -> Mat3x3 {
        let (sin, cos) = radians.sin_cos();
        Mat3x3 {
            xx: cos,
            xy: sin,
            yx: -sin,
            yy: cos,
            ..Self::one()
        }
    }

    /// Applies `self` first, then `next`. Same as `self * next`.
    pub fn then(self, next: Mat3x3) -> Mat3x3 {
        self * next
    }

    /// Transforms `v` as the row vector `v * self`.
    ///
    /// `x` and `y` come from the first two columns; `w` is recomputed from the third column, so
    /// an affine matrix maps points to points and directions to directions.
    #[must_use]
    pub fn apply(&self, v: Vec2) -> Vec2 {
        Vec2 {
            x: v.x * self.xx + v.y * self.yx + v.w * self.wx,
            y: v.x * self.xy + v.y * self.yy + v.w * self.wy,
            w: v.x * self.xw + v.y * self.yw + v.w * self.ww,
        }
    }

    #[must_use]
    pub fn det(&self) -> f64 {
        self.xx * (self.yy * self.ww - self.yw * self.wy)
            - self.xy * (self.yx * self.ww - self.yw * self.wx)
            + self.xw * (self.yx * self.wy - self.yy * self.wx)
    }

    pub fn transposed(&self) -> Mat3x3 {
        Mat3x3 {
            xx: self.xx,
            xy: self.yx,
            xw: self.wx,
            yx: self.xy,
            yy: self.yy,
            yw: self.wy,
            wx: self.xw,
            wy: self.yw,
            ww: self.ww,
        }
    }

    /// Whether the last column is `(0, 0, 1)`.
    #[must_use]
    pub fn is_affine(&self) -> bool {
        self.xw.abs() < EPSILON && self.yw.abs() < EPSILON && (self.ww - 1.0).abs() < EPSILON
    }

    /// Inverse of an affine matrix: invert the linear 2x2 block, then undo the translation.
    ///
    /// # Errors
    /// [`GeomError::NotAffine`] unless the last column is `(0, 0, 1)`, and
    /// [`GeomError::SingularMatrix`] when the linear block has (nearly) zero determinant.
    pub fn try_inverse(&self) -> Result<Mat3x3, GeomError> {
        if !self.is_affine() {
            return Err(GeomError::NotAffine);
        }
        let det = self.xx * self.yy - self.xy * self.yx;
        if det.abs() < EPSILON {
            return Err(GeomError::SingularMatrix(det));
        }
        let (xx, xy) = (self.yy / det, -self.xy / det);
        let (yx, yy) = (-self.yx / det, self.xx / det);
        Ok(Mat3x3 {
            xx,
            xy,
            xw: 0.0,
            yx,
            yy,
            yw: 0.0,
            wx: -(self.wx * xx + self.wy * yx),
            wy: -(self.wx * xy + self.wy * yy),
            ww: 1.0,
        })
    }

    #[must_use]
    pub fn almost_eq(&self, rhs: Mat3x3) -> bool {
        f64::abs(self.xx - rhs.xx) < EPSILON
            && f64::abs(self.xy - rhs.xy) < EPSILON
            && f64::abs(self.xw - rhs.xw) < EPSILON
            && f64::abs(self.yx - rhs.yx) < EPSILON
            && f64::abs(self.yy - rhs.yy) < EPSILON
            && f64::abs(self.yw - rhs.yw) < EPSILON
            && f64::abs(self.wx - rhs.wx) < EPSILON
            && f64::abs(self.wy - rhs.wy) < EPSILON
            && f64::abs(self.ww - rhs.ww) < EPSILON
    }
}

impl Default for Mat3x3 {
    fn default() -> Self {
        Self::one()
    }
}

impl One for Mat3x3 {
    fn one() -> Self {
        Self::one()
    }
}

impl Zero for Mat3x3 {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_zero(&self) -> bool {
        self.almost_eq(Self::zero())
    }
}

impl fmt::Display for Mat3x3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}, {}, {}]", self.xx, self.xy, self.xw)?;
        writeln!(f, "[{}, {}, {}]", self.yx, self.yy, self.yw)?;
        write!(f, "[{}, {}, {}]", self.wx, self.wy, self.ww)
    }
}

impl Add<Mat3x3> for Mat3x3 {
    type Output = Mat3x3;

    fn add(self, rhs: Mat3x3) -> Self::Output {
        Mat3x3 {
            xx: self.xx + rhs.xx,
            xy: self.xy + rhs.xy,
            xw: self.xw + rhs.xw,
            yx: self.yx + rhs.yx,
            yy: self.yy + rhs.yy,
            yw: self.yw + rhs.yw,
            wx: self.wx + rhs.wx,
            wy: self.wy + rhs.wy,
            ww: self.ww + rhs.ww,
        }
    }
}

impl Sub<Mat3x3> for Mat3x3 {
    type Output = Mat3x3;

    fn sub(self, rhs: Mat3x3) -> Self::Output {
        Mat3x3 {
            xx: self.xx - rhs.xx,
            xy: self.xy - rhs.xy,
            xw: self.xw - rhs.xw,
            yx: self.yx - rhs.yx,
            yy: self.yy - rhs.yy,
            yw: self.yw - rhs.yw,
            wx: self.wx - rhs.wx,
            wy: self.wy - rhs.wy,
            ww: self.ww - rhs.ww,
        }
    }
}

impl Mul<f64> for Mat3x3 {
    type Output = Mat3x3;

    fn mul(self, rhs: f64) -> Self::Output {
        Mat3x3 {
            xx: rhs * self.xx,
            xy: rhs * self.xy,
            xw: rhs * self.xw,
            yx: rhs * self.yx,
            yy: rhs * self.yy,
            yw: rhs * self.yw,
            wx: rhs * self.wx,
            wy: rhs * self.wy,
            ww: rhs * self.ww,
        }
    }
}

impl Mul<Mat3x3> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: Mat3x3) -> Self::Output {
        rhs.apply(self)
    }
}
impl MulAssign<Mat3x3> for Vec2 {
    fn mul_assign(&mut self, rhs: Mat3x3) {
        *self = rhs.apply(*self);
    }
}

impl Mul<Mat3x3> for Mat3x3 {
    type Output = Mat3x3;

    fn mul(self, rhs: Mat3x3) -> Self::Output {
        Mat3x3 {
            xx: self.xx * rhs.xx + self.xy * rhs.yx + self.xw * rhs.wx,
            xy: self.xx * rhs.xy + self.xy * rhs.yy + self.xw * rhs.wy,
            xw: self.xx * rhs.xw + self.xy * rhs.yw + self.xw * rhs.ww,
            yx: self.yx * rhs.xx + self.yy * rhs.yx + self.yw * rhs.wx,
            yy: self.yx * rhs.xy + self.yy * rhs.yy + self.yw * rhs.wy,
            yw: self.yx * rhs.xw + self.yy * rhs.yw + self.yw * rhs.ww,
            wx: self.wx * rhs.xx + self.wy * rhs.yx + self.ww * rhs.wx,
            wy: self.wx * rhs.xy + self.wy * rhs.yy + self.ww * rhs.wy,
            ww: self.wx * rhs.xw + self.wy * rhs.yw + self.ww * rhs.ww,
        }
    }
}
impl MulAssign<Mat3x3> for Mat3x3 {
    fn mul_assign(&mut self, rhs: Mat3x3) {
        *self = *self * rhs;
    }
}
