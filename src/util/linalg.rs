#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::gb_float;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use thiserror::Error;

/// Matrix inversion failed because the determinant is numerically zero
/// (|det| < [`EPSILON`](crate::core::config::EPSILON)). Carries the
/// offending determinant for diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("singular matrix: determinant = {determinant:.6e}")]
pub struct SingularMatrixError {
    pub determinant: f64,
}

/// A 2D vector with 64-bit floating point coordinates, in world space
/// (y grows upward; [`Viewport`](crate::core::view::Viewport) handles the
/// flip to screen space).
///
/// Pure operations are spelled as operators (`-v`, `v * c`, `v + w`); the
/// in-place forms are the corresponding `*Assign` operators. This keeps the
/// mutating and non-mutating variants as two distinct surfaces rather than
/// a naming convention.
///
/// # Equality
/// Two vectors are equal if their components differ by less than
/// [`EPSILON`](crate::core::config::EPSILON); non-finite vectors fall back
/// to exact comparison.
///
/// # Examples
///
/// ```
/// use gridbend::util::linalg::Vec2;
///
/// let v1 = Vec2 { x: 3.0, y: 4.0 };
/// let v2 = Vec2 { x: 1.0, y: 2.0 };
/// assert_eq!(v1 + v2, Vec2 { x: 4.0, y: 6.0 });
/// assert_eq!(v1.len(), 5.0);
/// ```
#[derive(Default, Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        if self.is_finite() || other.is_finite() {
            (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
        } else {
            self.x == other.x && self.y == other.y
        }
    }
}

impl Vec2 {
    /// Returns a unit vector pointing along the positive x-axis.
    #[must_use]
    pub fn right() -> Vec2 {
        Vec2 { x: 1.0, y: 0.0 }
    }
    /// Returns a unit vector pointing along the positive y-axis (world
    /// coordinates, y up).
    #[must_use]
    pub fn up() -> Vec2 {
        Vec2 { x: 0.0, y: 1.0 }
    }
    /// Returns a vector with both components set to 1.0.
    #[must_use]
    pub fn one() -> Vec2 {
        Vec2 { x: 1.0, y: 1.0 }
    }
    /// Returns a vector with both components set to 0.0.
    #[must_use]
    pub fn zero() -> Vec2 {
        Vec2 { x: 0.0, y: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the squared length of the vector. Cheaper than [`len`](Vec2::len)
    /// when only comparing lengths.
    #[must_use]
    pub fn len_squared(&self) -> f64 {
        self.dot(*self)
    }

    /// Returns the length of the vector, computed with [`f64::hypot`] so
    /// extreme magnitudes neither overflow nor underflow.
    #[must_use]
    pub fn len(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns a normalised (unit) vector in the same direction as this
    /// vector. A zero vector normalises to zero rather than dividing by
    /// zero; negative zeros are collapsed to positive.
    #[must_use]
    pub fn normed(&self) -> Vec2 {
        let mut rv = match self.len() {
            0.0 => Vec2::zero(),
            len => *self / len,
        };
        rv.x = gb_float::force_positive_zero(rv.x);
        rv.y = gb_float::force_positive_zero(rv.y);
        rv
    }

    /// Computes the dot product of two vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridbend::util::linalg::Vec2;
    /// let v1 = Vec2 { x: 2.0, y: 3.0 };
    /// let v2 = Vec2 { x: 4.0, y: 5.0 };
    /// assert_eq!(v1.dot(v2), 23.0); // 2*4 + 3*5
    /// ```
    #[must_use]
    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Computes the 2D cross product: the signed area of the parallelogram
    /// spanned by the two vectors.
    #[must_use]
    pub fn cross(&self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Returns a new vector rotated counterclockwise by the given angle in
    /// radians.
    #[must_use]
    pub fn rotated(&self, radians: f64) -> Vec2 {
        Mat2::rotation(radians) * *self
    }

    /// Checks approximate equality: the length of the difference is below
    /// [`EPSILON`](crate::core::config::EPSILON).
    pub fn almost_eq(&self, rhs: Vec2) -> bool {
        (*self - rhs).len() < EPSILON
    }
}

impl Zero for Vec2 {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_zero(&self) -> bool {
        self.len() < EPSILON
    }
}

/// Prints as `[x, y]`, honouring the formatter's precision, so the UI
/// collaborator controls how many digits the user sees.
///
/// ```
/// use gridbend::util::linalg::Vec2;
/// let v = Vec2 { x: 1.23456, y: 7.89012 };
/// assert_eq!(format!("{v:.2}"), "[1.23, 7.89]");
/// ```
impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = f.precision();

        write!(f, "[")?;
        if let Some(p) = precision {
            write!(f, "{0:.1$}", self.x, p)?;
            write!(f, ", {0:.1$}", self.y, p)?;
        } else {
            write!(f, "{}, {}", self.x, self.y)?;
        }
        write!(f, "]")
    }
}

impl Add<Vec2> for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
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
        }
    }
}
impl SubAssign<Vec2> for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        Vec2 {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Self::Output {
        Vec2 {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self * rhs.x,
            y: self * rhs.y,
        }
    }
}
impl MulAssign<f64> for Vec2 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f64) -> Self::Output {
        Vec2 {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}
impl DivAssign<f64> for Vec2 {
    fn div_assign(&mut self, rhs: f64) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Vec2 { x, y }
    }
}
impl From<Vec2> for [f64; 2] {
    fn from(value: Vec2) -> Self {
        [value.x, value.y]
    }
}

/// The monic characteristic polynomial λ² − trace·λ + det of a 2×2 matrix.
///
/// [`coefficients`](CharPoly::coefficients) gives the exact coefficient
/// triple; the [`Display`](fmt::Display) impl gives the human-readable form.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharPoly {
    pub trace: f64,
    pub det: f64,
}

impl CharPoly {
    /// Coefficients of λ², λ¹ and λ⁰, in that order: `(1, −trace, det)`.
    #[must_use]
    pub fn coefficients(&self) -> [f64; 3] {
        [1.0, -self.trace, self.det]
    }

    #[must_use]
    pub fn eval(&self, lambda: f64) -> f64 {
        lambda * lambda - self.trace * lambda + self.det
    }

    /// Δ = trace² − 4·det. Positive means two distinct real eigenvalues,
    /// negative a complex conjugate pair.
    #[must_use]
    pub fn discriminant(&self) -> f64 {
        self.trace * self.trace - 4.0 * self.det
    }
}

impl fmt::Display for CharPoly {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "λ²")?;
        let b = -self.trace;
        if b.abs() >= EPSILON {
            write!(f, " {} {}λ", if b < 0.0 { "-" } else { "+" }, b.abs())?;
        }
        if self.det.abs() >= EPSILON {
            write!(
                f,
                " {} {}",
                if self.det < 0.0 { "-" } else { "+" },
                self.det.abs()
            )?;
        }
        Ok(())
    }
}

/// Eigenvalues of a 2×2 real matrix: the roots of its characteristic
/// polynomial.
///
/// A negative discriminant yields an explicit complex conjugate pair; the
/// engine never coerces complex eigenvalues to NaN or an error.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum Eigenvalues {
    /// Two real roots, ordered so that λ1 ≥ λ2. A repeated root appears
    /// twice.
    Real(f64, f64),
    /// The conjugate pair re ± im·i, with im > 0.
    Complex { re: f64, im: f64 },
}

impl Eigenvalues {
    #[must_use]
    pub fn is_real(&self) -> bool {
        matches!(self, Eigenvalues::Real(_, _))
    }
}

impl fmt::Display for Eigenvalues {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Eigenvalues::Real(l1, l2) => write!(f, "λ1 = {l1}, λ2 = {l2}"),
            Eigenvalues::Complex { re, im } => write!(f, "λ = {re} ± {im}i"),
        }
    }
}

/// A 2×2 matrix over `f64`, laid out row-major:
///
/// ```text
/// | xx  xy |
/// | yx  yy |
/// ```
///
/// This is the one long-lived mutable entity in the engine: the workspace
/// mutates its entries in place as the user edits them, and
/// [`transpose`](Mat2::transpose)/[`invert`](Mat2::invert) mutate in place
/// for the corresponding UI buttons. Every destructive operation has a pure
/// counterpart ([`transposed`](Mat2::transposed), [`inverse`](Mat2::inverse))
/// for callers that must not disturb the live matrix.
///
/// # Examples
///
/// ```
/// use gridbend::util::linalg::{Mat2, Vec2};
///
/// let m = Mat2 { xx: 2.0, xy: 0.0, yx: 0.0, yy: 3.0 };
/// assert_eq!(m.det(), 6.0);
/// assert_eq!(m.trace(), 5.0);
/// assert_eq!(m * Vec2 { x: 1.0, y: 1.0 }, Vec2 { x: 2.0, y: 3.0 });
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Mat2 {
    pub xx: f64,
    pub xy: f64,
    pub yx: f64,
    pub yy: f64,
}

impl Mat2 {
    /// Creates an identity matrix.
    pub fn one() -> Mat2 {
        Mat2 {
            xx: 1.0,
            xy: 0.0,
            yx: 0.0,
            yy: 1.0,
        }
    }

    /// Creates a zero matrix.
    pub fn zero() -> Mat2 {
        Mat2 {
            xx: 0.0,
            xy: 0.0,
            yx: 0.0,
            yy: 0.0,
        }
    }

    /// Creates a matrix that rotates vectors counterclockwise by the given
    /// angle in radians.
    pub fn rotation(radians: f64) -> Mat2 {
        Mat2 {
            xx: f64::cos(radians),
            xy: -f64::sin(radians),
            yx: f64::sin(radians),
            yy: f64::cos(radians),
        }
    }

    /// Builds the matrix [v1 | v2] whose columns are the given vectors.
    /// This is the transform that maps the standard basis onto (v1, v2).
    pub fn from_columns(v1: Vec2, v2: Vec2) -> Mat2 {
        Mat2 {
            xx: v1.x,
            xy: v2.x,
            yx: v1.y,
            yy: v2.y,
        }
    }

    /// The columns of the matrix: the images of the standard basis vectors.
    #[must_use]
    pub fn columns(&self) -> (Vec2, Vec2) {
        (
            Vec2 {
                x: self.xx,
                y: self.yx,
            },
            Vec2 {
                x: self.xy,
                y: self.yy,
            },
        )
    }

    #[must_use]
    pub fn det(&self) -> f64 {
        self.xx * self.yy - self.xy * self.yx
    }

    #[must_use]
    pub fn trace(&self) -> f64 {
        self.xx + self.yy
    }

    /// The rank of the matrix: 0 if every entry is numerically zero, 1 if
    /// the determinant is numerically zero but some entry is not, 2
    /// otherwise. "Numerically zero" means the magnitude is below
    /// [`EPSILON`](crate::core::config::EPSILON) (1e-9), so e.g.
    /// `1e-12 · I` has rank 0.
    #[must_use]
    pub fn rank(&self) -> u8 {
        let zero = |v: f64| v.abs() < EPSILON;
        if zero(self.xx) && zero(self.xy) && zero(self.yx) && zero(self.yy) {
            0
        } else if zero(self.det()) {
            1
        } else {
            2
        }
    }

    /// Transposes the matrix in place, swapping the off-diagonal entries.
    pub fn transpose(&mut self) {
        std::mem::swap(&mut self.xy, &mut self.yx);
    }

    /// Returns the transpose without modifying this matrix.
    pub fn transposed(&self) -> Mat2 {
        Mat2 {
            xx: self.xx,
            xy: self.yx,
            yx: self.xy,
            yy: self.yy,
        }
    }

    /// Returns the inverse `(1/det) · [[yy, −xy], [−yx, xx]]` without
    /// modifying this matrix. Fails with [`SingularMatrixError`] when the
    /// determinant is numerically zero.
    pub fn inverse(&self) -> Result<Mat2, SingularMatrixError> {
        let det = self.det();
        if det.abs() < EPSILON {
            return Err(SingularMatrixError { determinant: det });
        }
        Ok(Mat2 {
            xx: self.yy / det,
            xy: -self.xy / det,
            yx: -self.yx / det,
            yy: self.xx / det,
        })
    }

    /// Inverts the matrix in place. On failure the matrix is left exactly
    /// as it was: the singularity check happens before any entry is
    /// assigned.
    pub fn invert(&mut self) -> Result<(), SingularMatrixError> {
        *self = self.inverse()?;
        Ok(())
    }

    /// The monic characteristic polynomial λ² − trace·λ + det.
    pub fn characteristic_polynomial(&self) -> CharPoly {
        CharPoly {
            trace: self.trace(),
            det: self.det(),
        }
    }

    /// Solves the characteristic polynomial via the quadratic formula.
    ///
    /// The discriminant check is tolerance-aware: |Δ| ≤
    /// [`EPSILON`](crate::core::config::EPSILON) counts as a repeated real
    /// root. Real roots come back ordered λ1 ≥ λ2; a negative discriminant
    /// comes back as [`Eigenvalues::Complex`].
    pub fn eigenvalues(&self) -> Eigenvalues {
        let t = self.trace();
        let disc = t * t - 4.0 * self.det();
        if disc > EPSILON {
            let root = disc.sqrt();
            Eigenvalues::Real((t + root) / 2.0, (t - root) / 2.0)
        } else if disc < -EPSILON {
            Eigenvalues::Complex {
                re: t / 2.0,
                im: (-disc).sqrt() / 2.0,
            }
        } else {
            let l = t / 2.0;
            Eigenvalues::Real(l, l)
        }
    }

    /// A unit eigenvector for the real eigenvalue λ, solving (M − λI)u = 0.
    ///
    /// The null vector is taken from `(xy, λ − xx)` when that is non-zero,
    /// falling back to `(λ − yy, yx)`. When both are zero the matrix is
    /// λ·I, every vector is an eigenvector, and the canonical choice is
    /// (1, 0). The result is normalised to unit length with its first
    /// non-zero component positive, so repeated calls and symmetric cases
    /// stay deterministic.
    pub fn eigenvector(&self, lambda: f64) -> Vec2 {
        let u = Vec2 {
            x: self.xy,
            y: lambda - self.xx,
        };
        let v = Vec2 {
            x: lambda - self.yy,
            y: self.yx,
        };
        let raw = if !u.is_zero() {
            u
        } else if !v.is_zero() {
            v
        } else {
            return Vec2::right();
        };
        let n = raw.normed();
        if n.x < -EPSILON || (n.x.abs() <= EPSILON && n.y < 0.0) {
            -n
        } else {
            n
        }
    }

    /// Compares two matrices entry-wise within
    /// [`EPSILON`](crate::core::config::EPSILON).
    pub fn almost_eq(&self, rhs: Mat2) -> bool {
        f64::abs(self.xx - rhs.xx) < EPSILON
            && f64::abs(self.xy - rhs.xy) < EPSILON
            && f64::abs(self.yx - rhs.yx) < EPSILON
            && f64::abs(self.yy - rhs.yy) < EPSILON
    }
}

impl One for Mat2 {
    fn one() -> Self {
        Self::one()
    }
}

impl Zero for Mat2 {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_zero(&self) -> bool {
        self.almost_eq(Self::zero())
    }
}

impl Add<Mat2> for Mat2 {
    type Output = Mat2;

    fn add(self, rhs: Mat2) -> Self::Output {
        Mat2 {
            xx: self.xx + rhs.xx,
            xy: self.xy + rhs.xy,
            yx: self.yx + rhs.yx,
            yy: self.yy + rhs.yy,
        }
    }
}

impl Mul<f64> for Mat2 {
    type Output = Mat2;

    fn mul(self, rhs: f64) -> Self::Output {
        Mat2 {
            xx: rhs * self.xx,
            xy: rhs * self.xy,
            yx: rhs * self.yx,
            yy: rhs * self.yy,
        }
    }
}
impl Mul<Mat2> for f64 {
    type Output = Mat2;

    fn mul(self, rhs: Mat2) -> Self::Output {
        rhs * self
    }
}

impl Mul<Vec2> for Mat2 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.xx * rhs.x + self.xy * rhs.y,
            y: self.yx * rhs.x + self.yy * rhs.y,
        }
    }
}

impl Mul<Mat2> for Mat2 {
    type Output = Mat2;

    fn mul(self, rhs: Mat2) -> Self::Output {
        Mat2 {
            xx: self.xx * rhs.xx + self.xy * rhs.yx,
            xy: self.xx * rhs.xy + self.xy * rhs.yy,
            yx: self.yx * rhs.xx + self.yy * rhs.yx,
            yy: self.yx * rhs.xy + self.yy * rhs.yy,
        }
    }
}

impl fmt::Display for Mat2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[[{}, {}], [{}, {}]]",
            self.xx, self.xy, self.yx, self.yy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::f64::consts::FRAC_PI_2;

    fn mat(xx: f64, xy: f64, yx: f64, yy: f64) -> Mat2 {
        Mat2 { xx, xy, yx, yy }
    }

    // ==================== Vec2 ====================

    #[test]
    fn vec2_arithmetic() {
        let a = Vec2 { x: 1.0, y: 2.0 };
        let b = Vec2 { x: 3.0, y: 4.0 };
        assert_eq!(a + b, Vec2 { x: 4.0, y: 6.0 });
        assert_eq!(b - a, Vec2 { x: 2.0, y: 2.0 });
        assert_eq!(-a, Vec2 { x: -1.0, y: -2.0 });
        assert_eq!(a * 2.0, Vec2 { x: 2.0, y: 4.0 });
        assert_eq!(2.0 * a, Vec2 { x: 2.0, y: 4.0 });
        assert_eq!(b / 2.0, Vec2 { x: 1.5, y: 2.0 });
    }

    #[test]
    fn vec2_assign_ops_mutate_in_place() {
        let mut a = Vec2 { x: 1.0, y: 2.0 };
        a += Vec2 { x: 3.0, y: 4.0 };
        assert_eq!(a, Vec2 { x: 4.0, y: 6.0 });
        a -= Vec2 { x: 1.0, y: 1.0 };
        assert_eq!(a, Vec2 { x: 3.0, y: 5.0 });
        a *= 2.0;
        assert_eq!(a, Vec2 { x: 6.0, y: 10.0 });
        a /= 2.0;
        assert_eq!(a, Vec2 { x: 3.0, y: 5.0 });
    }

    #[test]
    fn vec2_negation_does_not_alias() {
        let a = Vec2 { x: 1.0, y: -2.0 };
        let b = -a;
        assert_eq!(a, Vec2 { x: 1.0, y: -2.0 });
        assert_eq!(b, Vec2 { x: -1.0, y: 2.0 });
    }

    #[test]
    fn vec2_dot_and_cross() {
        let a = Vec2 { x: 2.0, y: 3.0 };
        let b = Vec2 { x: 4.0, y: 5.0 };
        assert_eq!(a.dot(b), 23.0);
        assert_eq!(a.cross(b), -2.0);
    }

    #[test]
    fn vec2_len_uses_hypot() {
        let v = Vec2 { x: 3.0, y: -4.0 };
        assert_eq!(v.len(), 5.0);
        assert_eq!(v.len_squared(), 25.0);

        // naive sqrt(x² + y²) would overflow to infinity here
        let huge = Vec2 { x: 1e200, y: 1e200 };
        assert!(huge.len().is_finite());
        assert!((huge.len() - 1e200 * std::f64::consts::SQRT_2).abs() < 1e186);

        let tiny = Vec2 { x: 1e-200, y: 1e-200 };
        assert!(tiny.len() > 0.0);
    }

    #[test]
    fn vec2_normed() {
        let v = Vec2 { x: 3.0, y: 4.0 };
        let n = v.normed();
        assert!((n.len() - 1.0).abs() < EPSILON);
        assert_eq!(n, Vec2 { x: 0.6, y: 0.8 });
        assert_eq!(Vec2::zero().normed(), Vec2::zero());
    }

    #[test]
    fn vec2_rotated() {
        let r = Vec2::right().rotated(FRAC_PI_2);
        assert!(r.almost_eq(Vec2::up()));
    }

    #[test]
    fn vec2_array_conversions() {
        let v: Vec2 = [1.0, 2.0].into();
        assert_eq!(v, Vec2 { x: 1.0, y: 2.0 });
        let arr: [f64; 2] = v.into();
        assert_eq!(arr, [1.0, 2.0]);
    }

    #[test]
    fn vec2_display() {
        let v = Vec2 { x: 1.5, y: 2.5 };
        assert_eq!(format!("{v}"), "[1.5, 2.5]");
        let v2 = Vec2 {
            x: 1.23456,
            y: 7.89012,
        };
        assert_eq!(format!("{v2:.2}"), "[1.23, 7.89]");
        assert_eq!(format!("{v2:.0}"), "[1, 8]");
    }

    // ==================== Mat2 basics ====================

    #[test]
    fn mat2_det_and_trace() {
        let m = mat(2.0, 0.0, 0.0, 3.0);
        assert_eq!(m.det(), 6.0);
        assert_eq!(m.trace(), 5.0);
    }

    #[test]
    fn mat2_rank_boundaries() {
        assert_eq!(Mat2::zero().rank(), 0);
        assert_eq!(mat(1.0, 0.0, 0.0, 0.0).rank(), 1);
        assert_eq!(Mat2::one().rank(), 2);
        // all entries below the 1e-9 tolerance count as zero
        assert_eq!(mat(1e-12, 0.0, 0.0, 1e-12).rank(), 0);
        // entries above tolerance but determinant (1e-16) below it
        assert_eq!(mat(1e-8, 0.0, 0.0, 1e-8).rank(), 1);
    }

    #[test]
    fn mat2_transpose_in_place_and_pure() {
        let m = mat(1.0, 2.0, 3.0, 4.0);
        let mut m2 = m;
        m2.transpose();
        assert_eq!(m2, mat(1.0, 3.0, 2.0, 4.0));
        assert_eq!(m.transposed(), m2);
        // the pure form leaves the original untouched
        assert_eq!(m, mat(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn mat2_transpose_preserves_determinant() {
        for m in [
            mat(1.0, 2.0, 3.0, 4.0),
            mat(-1.5, 0.25, 7.0, -3.0),
            Mat2::rotation(0.73),
        ] {
            assert!((m.det() - m.transposed().det()).abs() < EPSILON);
        }
    }

    #[test]
    fn mat2_matrix_vector_product() {
        let m = mat(1.0, 2.0, 3.0, 4.0);
        let v = Vec2 { x: 5.0, y: 6.0 };
        assert_eq!(m * v, Vec2 { x: 17.0, y: 39.0 });
    }

    #[test]
    fn mat2_matrix_product_and_identity() {
        let m = mat(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m * Mat2::one(), m);
        assert_eq!(Mat2::one() * m, m);
        let r = Mat2::rotation(0.3) * Mat2::rotation(-0.3);
        assert!(r.almost_eq(Mat2::one()));
    }

    #[test]
    fn mat2_from_columns_round_trips() {
        let v1 = Vec2 { x: 1.0, y: 3.0 };
        let v2 = Vec2 { x: 2.0, y: 4.0 };
        let m = Mat2::from_columns(v1, v2);
        assert_eq!(m, mat(1.0, 2.0, 3.0, 4.0));
        assert_eq!(m.columns(), (v1, v2));
        // the columns are the images of the standard basis
        assert_eq!(m * Vec2::right(), v1);
        assert_eq!(m * Vec2::up(), v2);
    }

    // ==================== inversion ====================

    #[test]
    fn mat2_inverse_of_diagonal() {
        let m = mat(2.0, 0.0, 0.0, 3.0);
        let inv = m.inverse().unwrap();
        assert!(inv.almost_eq(mat(0.5, 0.0, 0.0, 1.0 / 3.0)));
    }

    #[test]
    fn mat2_invert_twice_round_trips() {
        let mut m = mat(2.0, 1.0, -1.0, 3.0);
        let original = m;
        m.invert().unwrap();
        m.invert().unwrap();
        assert!(m.almost_eq(original));
    }

    #[test]
    fn mat2_inverse_round_trips_on_random_matrices() {
        let mut rng = StdRng::seed_from_u64(0x2d_2d);
        for _ in 0..200 {
            let m = mat(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            if m.det().abs() < 1e-3 {
                continue;
            }
            let round_trip = m.inverse().unwrap().inverse().unwrap();
            assert!(
                round_trip.almost_eq(m),
                "inverse round trip failed for {m}: got {round_trip}"
            );
            assert!((m * m.inverse().unwrap()).almost_eq(Mat2::one()));
        }
    }

    #[test]
    fn mat2_singular_inverse_fails() {
        let m = mat(1.0, 2.0, 2.0, 4.0);
        let err = m.inverse().unwrap_err();
        assert!(err.determinant.abs() < EPSILON);
    }

    #[test]
    fn mat2_failed_invert_leaves_matrix_untouched() {
        let mut m = mat(1.0, 2.0, 2.0, 4.0);
        assert!(m.invert().is_err());
        assert_eq!(m, mat(1.0, 2.0, 2.0, 4.0));
    }

    // ==================== characteristic polynomial ====================

    #[test]
    fn char_poly_coefficients() {
        let p = mat(2.0, 0.0, 0.0, 3.0).characteristic_polynomial();
        assert_eq!(p.coefficients(), [1.0, -5.0, 6.0]);
        assert_eq!(p.discriminant(), 1.0);
        // the eigenvalues are roots
        assert!(p.eval(2.0).abs() < EPSILON);
        assert!(p.eval(3.0).abs() < EPSILON);
    }

    #[test]
    fn char_poly_display() {
        let p = mat(2.0, 0.0, 0.0, 3.0).characteristic_polynomial();
        assert_eq!(format!("{p}"), "λ² - 5λ + 6");
        let q = mat(0.0, -1.0, 1.0, 0.0).characteristic_polynomial();
        assert_eq!(format!("{q}"), "λ² + 1");
        let z = Mat2::zero().characteristic_polynomial();
        assert_eq!(format!("{z}"), "λ²");
    }

    // ==================== eigenvalues ====================

    #[test]
    fn eigenvalues_distinct_real_ordered_descending() {
        let m = mat(2.0, 0.0, 0.0, 3.0);
        assert_eq!(m.eigenvalues(), Eigenvalues::Real(3.0, 2.0));
    }

    #[test]
    fn eigenvalues_repeated_root() {
        let m = mat(2.0, 0.0, 0.0, 2.0);
        assert_eq!(m.eigenvalues(), Eigenvalues::Real(2.0, 2.0));
    }

    #[test]
    fn eigenvalues_rotation_is_complex_pair() {
        // pure 90° rotation: det = 1, trace = 0, Δ = -4
        let m = mat(0.0, -1.0, 1.0, 0.0);
        assert_eq!(m.det(), 1.0);
        assert_eq!(m.trace(), 0.0);
        assert_eq!(m.eigenvalues(), Eigenvalues::Complex { re: 0.0, im: 1.0 });
        assert!(!m.eigenvalues().is_real());
    }

    #[test]
    fn eigenvalues_singular_matrix() {
        let m = mat(1.0, 2.0, 2.0, 4.0);
        assert_eq!(m.eigenvalues(), Eigenvalues::Real(5.0, 0.0));
        assert_eq!(m.rank(), 1);
    }

    #[test]
    fn eigenvalue_sum_is_trace_and_product_is_det() {
        // symmetric matrices always have real eigenvalues
        let mut rng = StdRng::seed_from_u64(0x51_3e);
        for _ in 0..100 {
            let (a, b, d) = (
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            );
            let m = mat(a, b, b, d);
            match m.eigenvalues() {
                Eigenvalues::Real(l1, l2) => {
                    assert!((l1 + l2 - m.trace()).abs() < 1e-6);
                    assert!((l1 * l2 - m.det()).abs() < 1e-6);
                    assert!(l1 >= l2);
                }
                Eigenvalues::Complex { .. } => panic!("symmetric {m} reported complex"),
            }
        }
    }

    // ==================== eigenvectors ====================

    #[test]
    fn eigenvectors_of_diagonal_matrix() {
        let m = mat(2.0, 0.0, 0.0, 3.0);
        assert!(m.eigenvector(3.0).almost_eq(Vec2::up()));
        assert!(m.eigenvector(2.0).almost_eq(Vec2::right()));
    }

    #[test]
    fn eigenvector_of_scaled_identity_is_canonical() {
        // M = 2I: the eigenspace is the whole plane; the choice must be
        // deterministic, not arbitrary
        let m = mat(2.0, 0.0, 0.0, 2.0);
        assert_eq!(m.eigenvector(2.0), Vec2::right());
    }

    #[test]
    fn eigenvector_satisfies_definition() {
        let m = mat(1.0, 2.0, 2.0, 4.0);
        let u1 = m.eigenvector(5.0);
        let u2 = m.eigenvector(0.0);
        assert!((m * u1).almost_eq(5.0 * u1));
        assert!((m * u2).len() < EPSILON);
        assert!((u1.len() - 1.0).abs() < EPSILON);
        assert!((u2.len() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn eigenvector_sign_is_canonical() {
        // leading non-zero component comes back positive
        let m = mat(0.0, 1.0, 1.0, 0.0);
        let u1 = m.eigenvector(1.0);
        let u2 = m.eigenvector(-1.0);
        assert!(u1.x > 0.0);
        assert!(u2.x > 0.0);
        assert!((m * u2).almost_eq(-1.0 * u2));
    }

    #[test]
    fn eigenvector_shear_fallback_row() {
        // lower-triangular shear: the first candidate row vanishes for the
        // repeated eigenvalue, forcing the fallback row
        let m = mat(3.0, 0.0, 1.0, 3.0);
        assert_eq!(m.eigenvalues(), Eigenvalues::Real(3.0, 3.0));
        let u = m.eigenvector(3.0);
        assert!(u.almost_eq(Vec2::up()));
        assert!((m * u).almost_eq(3.0 * u));
    }

    // ==================== num-traits impls ====================

    #[test]
    fn zero_and_one_impls() {
        assert!(Mat2::zero().is_zero());
        assert!(!Mat2::one().is_zero());
        assert!(Vec2::zero().is_zero());
        assert!(!Vec2::one().is_zero());
        assert_eq!(<Mat2 as One>::one(), Mat2::one());
    }
}
