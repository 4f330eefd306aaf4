use std::fmt;
use std::ops::{ Index, IndexMut, Mul };

use crate::feq;
use crate::consts::EPSILON;
use crate::error::{ Result, TraceError };
use crate::tuple::{ Tuple3D, Tuple4D };

/// A 2x2 matrix.
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Matrix2D {
    data: [f64; 4],
}

impl PartialEq for Matrix2D {
    fn eq(&self, other: &Matrix2D) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

impl From<[f64; 4]> for Matrix2D {
    fn from(data: [f64; 4]) -> Matrix2D {
        Matrix2D { data }
    }
}

impl Index<(usize, usize)> for Matrix2D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 2) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix2D {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[(index.0 * 2) + index.1]
    }
}

impl Matrix2D {
    /// Calculates the determinant of a `Matrix2D`.
    pub fn determinant(&self) -> f64 {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }
}

/// A 3x3 matrix.
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Matrix3D {
    data: [f64; 9],
}

impl PartialEq for Matrix3D {
    fn eq(&self, other: &Matrix3D) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

impl From<[f64; 9]> for Matrix3D {
    fn from(data: [f64; 9]) -> Matrix3D {
        Matrix3D { data }
    }
}

impl Index<(usize, usize)> for Matrix3D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 3) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix3D {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[(index.0 * 3) + index.1]
    }
}

impl Matrix3D {
    /// Builds a `Matrix3D` from three rows.
    pub fn from_rows(r0: Tuple3D, r1: Tuple3D, r2: Tuple3D) -> Matrix3D {
        Matrix3D {
            data: [
                r0.x, r0.y, r0.z,
                r1.x, r1.y, r1.z,
                r2.x, r2.y, r2.z,
            ]
        }
    }

    /// Returns the submatrix of a `Matrix3D`.
    ///
    /// A submatrix "eliminates" one row and one column of a larger matrix.
    /// For the following 3x3 matrix:
    ///
    /// ```text
    /// [
    ///     1.0, 0.0, 2.0,
    ///     3.0, 1.0, 0.0,
    ///     1.0, 1.0, 1.0
    /// ]
    /// ```
    ///
    /// the submatrix for `row == 1`, `col == 2` is:
    ///
    /// ```text
    /// [
    ///     1.0, 0.0,
    ///     1.0, 1.0
    /// ]
    /// ```
    pub fn submatrix(&self, row: usize, col: usize) -> Matrix2D {
        let mut buf: [f64; 4] = [0.0; 4];
        let mut count = 0;

        for r in (0..3).filter(|&r| r != row) {
            for c in (0..3).filter(|&c| c != col) {
                buf[count] = self[(r, c)];
                count += 1;
            }
        }

        Matrix2D { data: buf }
    }

    /// The determinant of the submatrix at `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    /// The minor at `row` and `col`, negated when `row + col` is odd.
    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        let m = self.minor(row, col);
        m * if (row + col) % 2 == 0 { 1.0 } else { -1.0 }
    }

    /// Calculates the determinant of a `Matrix3D` by cofactor expansion.
    pub fn determinant(&self) -> f64 {
        (0..3).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
    }
}

/// A 3x4 matrix: a `Matrix4D` with one row deleted.
///
/// Only exists as the halfway point between a 4x4 matrix and one of its 3x3
/// submatrices.
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Matrix3x4 {
    data: [f64; 12],
}

impl PartialEq for Matrix3x4 {
    fn eq(&self, other: &Matrix3x4) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

impl From<[f64; 12]> for Matrix3x4 {
    fn from(data: [f64; 12]) -> Matrix3x4 {
        Matrix3x4 { data }
    }
}

impl Index<(usize, usize)> for Matrix3x4 {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 4) + index.1]
    }
}

impl Matrix3x4 {
    /// Removes column `col`, yielding a square 3x3 matrix.
    pub fn delete_col(&self, col: usize) -> Matrix3D {
        let mut buf: [f64; 9] = [0.0; 9];
        let mut count = 0;

        for r in 0..3 {
            for c in (0..4).filter(|&c| c != col) {
                buf[count] = self[(r, c)];
                count += 1;
            }
        }

        Matrix3D { data: buf }
    }
}

/// A 4x4 matrix.
///
/// These matrices encode affine transformations in 3D space, and transform
/// both vectors and points (`w` components of `0.0` and `1.0`,
/// respectively).
///
/// Transforms compose right-to-left: for `T * S * R`, a point is rotated
/// first, then scaled, then translated.
///
/// # Examples
///
/// ```
/// # use brute_tracer::matrix::Matrix4D;
/// let mat = Matrix4D::identity();
/// assert_eq!(mat.determinant(), 1.0);
/// ```
///
/// ```
/// # use brute_tracer::tuple::Tuple4D;
/// # use brute_tracer::matrix::Matrix4D;
/// let t = Matrix4D::translation(10.0, 5.0, 7.0)
///     * Matrix4D::scaling(5.0, 5.0, 5.0)
///     * Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
///
/// assert_eq!(t * Tuple4D::point(1.0, 0.0, 1.0),
///     Tuple4D::point(15.0, 0.0, 7.0));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Matrix4D {
    data: [f64; 16],
}

/// Element-wise approximate equality.
impl PartialEq for Matrix4D {
    fn eq(&self, other: &Matrix4D) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

impl Matrix4D {
    /// Creates a new `Matrix4D`. All elements are initialized to `0.0`.
    pub fn new() -> Matrix4D {
        Matrix4D { data: [0.0; 16] }
    }

    /// Instantiates a 4x4 identity matrix.
    pub fn identity() -> Matrix4D {
        Self::diagonal(Tuple4D::tuple(1.0, 1.0, 1.0, 1.0))
    }

    /// A matrix with `d` on the diagonal and zeros elsewhere.
    pub fn diagonal(d: Tuple4D) -> Matrix4D {
        let mut buf = [0.0; 16];
        buf[0] = d.x; buf[5] = d.y; buf[10] = d.z; buf[15] = d.w;

        Matrix4D { data: buf }
    }

    /// Builds a `Matrix4D` from four rows.
    pub fn from_rows(r0: Tuple4D, r1: Tuple4D, r2: Tuple4D, r3: Tuple4D)
        -> Matrix4D {
        Matrix4D {
            data: [
                r0.x, r0.y, r0.z, r0.w,
                r1.x, r1.y, r1.z, r1.w,
                r2.x, r2.y, r2.z, r2.w,
                r3.x, r3.y, r3.z, r3.w,
            ]
        }
    }

    /// Instantiates a 4x4 translation matrix.
    ///
    /// Offsets points by `x`, `y` and `z`; vectors are left alone.
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix4D {
        let mut trans = Self::identity();
        trans[(0, 3)] = x;
        trans[(1, 3)] = y;
        trans[(2, 3)] = z;

        trans
    }

    /// Instantiates a 4x4 scaling matrix.
    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix4D {
        Self::diagonal(Tuple4D::tuple(x, y, z, 1.0))
    }

    /// Rotation about the X axis by `r` radians.
    ///
    /// ```
    /// # use brute_tracer::tuple::Tuple4D;
    /// # use brute_tracer::matrix::Matrix4D;
    /// let point = Tuple4D::point(0.0, 1.0, 0.0);
    /// let m = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    /// assert_eq!(m * point, Tuple4D::point(0.0, 0.0, 1.0));
    /// ```
    pub fn rotation_x(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(1, 1)] =  r.cos();
        rotate[(1, 2)] = -r.sin();
        rotate[(2, 1)] =  r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Rotation about the Y axis by `r` radians.
    pub fn rotation_y(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 2)] =  r.sin();
        rotate[(2, 0)] = -r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Rotation about the Z axis by `r` radians.
    pub fn rotation_z(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 1)] = -r.sin();
        rotate[(1, 0)] =  r.sin();
        rotate[(1, 1)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 shearing matrix.
    ///
    /// Each parameter moves one coordinate in proportion to another; `xy`
    /// moves `x` in proportion to `y`, `zx` moves `z` in proportion to `x`,
    /// and so on.
    ///
    /// ```
    /// # use brute_tracer::tuple::Tuple4D;
    /// # use brute_tracer::matrix::Matrix4D;
    /// let m = Matrix4D::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    /// assert_eq!(m * Tuple4D::point(2.0, 3.0, 4.0),
    ///     Tuple4D::point(5.0, 3.0, 4.0));
    /// ```
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix4D {
        let mut shear = Self::identity();
        shear[(0, 1)] = xy;
        shear[(0, 2)] = xz;
        shear[(1, 0)] = yx;
        shear[(1, 2)] = yz;
        shear[(2, 0)] = zx;
        shear[(2, 1)] = zy;

        shear
    }

    /// Generates a view transformation.
    ///
    /// `from` is where the eye is, `to` is where it looks, and `up` roughly
    /// points up. The result moves the *world* relative to the eye.
    ///
    /// Fails if `from == to`, or `up` is zero or parallel to the line of
    /// sight.
    pub fn view_transform(from: Tuple4D, to: Tuple4D, up: Tuple4D)
        -> Result<Matrix4D> {
        let forward = (to - from).normalize()?;
        let left = forward.cross(&up.normalize()?);
        let true_up = left.cross(&forward);

        if left.magnitude() < EPSILON {
            return Err(TraceError::InvalidNormalize(left));
        }

        let orientation = Matrix4D::from_rows(
            Tuple4D::tuple(left.x, left.y, left.z, 0.0),
            Tuple4D::tuple(true_up.x, true_up.y, true_up.z, 0.0),
            Tuple4D::tuple(-forward.x, -forward.y, -forward.z, 0.0),
            Tuple4D::tuple(0.0, 0.0, 0.0, 1.0),
        );

        Ok(orientation * Matrix4D::translation(-from.x, -from.y, -from.z))
    }

    /// Transposes a matrix in-place.
    pub fn transpose(&mut self) {
        for r in 0..4 {
            for c in (r+1)..4 {
                let tmp = self[(r, c)];
                self[(r, c)] = self[(c, r)];
                self[(c, r)] = tmp;
            }
        }
    }

    /// Returns the transpose of a matrix, leaving `self` untouched.
    pub fn transposition(&self) -> Matrix4D {
        let mut buf = *self;
        buf.transpose();

        buf
    }

    /// Removes row `row`, yielding a 3x4 matrix.
    pub fn delete_row(&self, row: usize) -> Matrix3x4 {
        let mut buf: [f64; 12] = [0.0; 12];
        let mut count = 0;

        for r in (0..4).filter(|&r| r != row) {
            for c in 0..4 {
                buf[count] = self[(r, c)];
                count += 1;
            }
        }

        Matrix3x4 { data: buf }
    }

    /// Returns the 3x3 submatrix with `row` and `col` removed.
    pub fn submatrix(&self, row: usize, col: usize) -> Matrix3D {
        self.delete_row(row).delete_col(col)
    }

    /// The determinant of the submatrix at `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    /// The minor at `row` and `col`, negated when `row + col` is odd.
    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        let m = self.minor(row, col);
        m * if (row + col) % 2 == 0 { 1.0 } else { -1.0 }
    }

    /// Calculates the determinant of a `Matrix4D` by cofactor expansion.
    pub fn determinant(&self) -> f64 {
        (0..4).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
    }

    /// Calculates the inverse of a `Matrix4D` as adjugate over determinant.
    ///
    /// Matrices with `|det| < EPSILON` are treated as singular and yield
    /// `TraceError::DegenerateTransform`.
    pub fn inverse(&self) -> Result<Matrix4D> {
        let det = self.determinant();
        if det.abs() < EPSILON || !det.is_finite() {
            return Err(TraceError::DegenerateTransform { det });
        }

        let mut inv = Matrix4D::new();
        for r in 0..4 {
            for c in 0..4 {
                inv[(c, r)] = self.cofactor(r, c) / det;
            }
        }

        Ok(inv)
    }
}

impl From<[f64; 16]> for Matrix4D {
    fn from(data: [f64; 16]) -> Matrix4D {
        Matrix4D { data }
    }
}

impl Index<(usize, usize)> for Matrix4D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 4) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix4D {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[(index.0 * 4) + index.1]
    }
}

/// Multiplication between two matrices.
///
/// Not commutative: `A * B` is generally not `B * A`.
///
/// ```
/// # use brute_tracer::matrix::Matrix4D;
/// let m1 = Matrix4D::scaling(2.0, 3.0, 4.0);
/// let m2 = Matrix4D::scaling(4.0, 3.0, 2.0);
/// assert_eq!(m1 * m2, Matrix4D::scaling(8.0, 9.0, 8.0));
/// ```
impl Mul<Matrix4D> for Matrix4D {
    type Output = Matrix4D;

    fn mul(self, other: Matrix4D) -> Matrix4D {
        let mut res = Matrix4D::new();

        for r in 0..4 {
            for c in 0..4 {
                res[(r, c)] = self[(r, 0)] * other[(0, c)]
                    + self[(r, 1)] * other[(1, c)]
                    + self[(r, 2)] * other[(2, c)]
                    + self[(r, 3)] * other[(3, c)]
            }
        }

        res
    }
}

/// Multiplication between a matrix and a `Tuple4D` (a 4x1 column).
impl Mul<Tuple4D> for Matrix4D {
    type Output = Tuple4D;

    fn mul(self, other: Tuple4D) -> Tuple4D {
        let mut buf: [f64; 4] = Default::default();

        for (r, slot) in buf.iter_mut().enumerate() {
            *slot = self[(r, 0)] * other.x
                + self[(r, 1)] * other.y
                + self[(r, 2)] * other.z
                + self[(r, 3)] * other.w;
        }

        Tuple4D { x: buf[0], y: buf[1], z: buf[2], w: buf[3] }
    }
}

impl fmt::Display for Matrix4D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            write!(f, "|")?;
            for c in 0..4 {
                write!(f, " {} |", self[(r, c)])?;
            }

            // Don't put a newline on the final row (allow the user to do that)
            if r != 3 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[test]
fn mat2_determinant() {
    let a: Matrix2D = [ 1.0, 5.0,
                       -3.0, 2.0 ].into();

    assert_eq!(a.determinant(), 17.0);
}

#[test]
fn mat3_from_rows() {
    let m = Matrix3D::from_rows(
        Tuple3D::new(-3.0,  5.0,  0.0),
        Tuple3D::new( 1.0, -2.0, -7.0),
        Tuple3D::new( 0.0,  1.0,  1.0),
    );

    assert_eq!(m[(0, 0)], -3.0);
    assert_eq!(m[(1, 1)], -2.0);
    assert_eq!(m[(2, 2)], 1.0);
}

#[test]
fn mat4_from_rows() {
    let m = Matrix4D::from_rows(
        Tuple4D::tuple( 1.0,  2.0,  3.0,  4.0),
        Tuple4D::tuple( 5.0,  6.0,  7.0,  8.0),
        Tuple4D::tuple( 9.0, 10.0, 11.0, 12.0),
        Tuple4D::tuple(13.0, 14.0, 15.0, 16.0),
    );

    assert_eq!(m[(0, 0)], 1.0);
    assert_eq!(m[(3, 2)], 15.0);
    assert_eq!(m[(2, 3)], 12.0);
    assert_eq!(m[(1, 2)], 7.0);
}

#[test]
fn identity() {
    let i = Matrix4D::identity();
    let a: Matrix4D = [ 0.0, 1.0,  2.0,  4.0,
                        1.0, 2.0,  4.0,  8.0,
                        2.0, 4.0,  8.0, 16.0,
                        4.0, 8.0, 16.0, 32.0, ].into();

    assert_eq!(i * a, a);
    assert_eq!(a * i, a);
    assert_eq!(i, Matrix4D::diagonal(Tuple4D::tuple(1.0, 1.0, 1.0, 1.0)));
}

#[test]
fn multiply() {
    let a: Matrix4D = [ 1.0, 2.0, 3.0, 4.0,
                        5.0, 6.0, 7.0, 8.0,
                        9.0, 8.0, 7.0, 6.0,
                        5.0, 4.0, 3.0, 2.0, ].into();

    let b: Matrix4D = [ -2.0, 1.0, 2.0,  3.0,
                         3.0, 2.0, 1.0, -1.0,
                         4.0, 3.0, 6.0,  5.0,
                         1.0, 2.0, 7.0,  8.0, ].into();

    let ab: Matrix4D = [ 20.0, 22.0,  50.0,  48.0,
                         44.0, 54.0, 114.0, 108.0,
                         40.0, 58.0, 110.0, 102.0,
                         16.0, 26.0,  46.0,  42.0, ].into();

    assert_eq!(a * b, ab);
}

#[test]
fn multiply_tuple() {
    let a: Matrix4D = [ 1.0, 2.0, 3.0, 4.0,
                        2.0, 4.0, 4.0, 2.0,
                        8.0, 6.0, 4.0, 1.0,
                        0.0, 0.0, 0.0, 1.0, ].into();

    assert_eq!(a * Tuple4D::tuple(1.0, 2.0, 3.0, 1.0),
        Tuple4D::tuple(18.0, 24.0, 33.0, 1.0));
}

#[test]
fn transpose() {
     let a: Matrix4D = [ 0.0, 9.0, 3.0, 0.0,
                         9.0, 8.0, 0.0, 8.0,
                         1.0, 8.0, 5.0, 3.0,
                         0.0, 0.0, 5.0, 8.0, ].into();

     let t: Matrix4D = [ 0.0, 9.0, 1.0, 0.0,
                         9.0, 8.0, 8.0, 0.0,
                         3.0, 0.0, 5.0, 5.0,
                         0.0, 8.0, 3.0, 8.0, ].into();

     assert_eq!(t, a.transposition());
     assert_eq!(t.transposition(), a);

     let mut in_place = a;
     in_place.transpose();
     assert_eq!(in_place, t);
}

#[test]
fn transpose_identity() {
    let i = Matrix4D::identity();
    assert_eq!(i, i.transposition());
}

#[test]
fn mat3_submatrix() {
    let a: Matrix3D = [  1.0, 5.0,  0.0,
                        -3.0, 2.0,  7.0,
                         0.0, 6.0, -3.0, ].into();

    let s: Matrix2D = [ -3.0, 2.0,
                         0.0, 6.0  ].into();

    assert_eq!(a.submatrix(0, 2), s);
    assert_eq!(a.submatrix(0, 0), Matrix2D::from([2.0, 7.0, 6.0, -3.0]));
    assert_eq!(a.submatrix(2, 2), Matrix2D::from([1.0, 5.0, -3.0, 2.0]));
}

#[test]
fn mat4_delete_row() {
    let a: Matrix4D = [  1.0, 5.0,  0.0,  6.0,
                        -3.0, 2.0,  7.0,  0.0,
                         0.0, 6.0, -3.0,  4.0,
                         0.0, 5.0,  6.0, -7.0, ].into();

    let first: Matrix3x4 = [ -3.0, 2.0,  7.0,  0.0,
                              0.0, 6.0, -3.0,  4.0,
                              0.0, 5.0,  6.0, -7.0, ].into();

    let last: Matrix3x4 = [  1.0, 5.0,  0.0, 6.0,
                            -3.0, 2.0,  7.0, 0.0,
                             0.0, 6.0, -3.0, 4.0, ].into();

    assert_eq!(a.delete_row(0), first);
    assert_eq!(a.delete_row(3), last);
}

#[test]
fn mat3x4_delete_col() {
    let a: Matrix3x4 = [  1.0, 5.0,  0.0, 6.0,
                         -3.0, 2.0,  7.0, 0.0,
                          0.0, 6.0, -3.0, 4.0, ].into();

    let first: Matrix3D = [ 5.0,  0.0, 6.0,
                            2.0,  7.0, 0.0,
                            6.0, -3.0, 4.0, ].into();

    let last: Matrix3D = [  1.0, 5.0,  0.0,
                           -3.0, 2.0,  7.0,
                            0.0, 6.0, -3.0, ].into();

    assert_eq!(a.delete_col(0), first);
    assert_eq!(a.delete_col(3), last);
}

#[test]
fn mat4_submatrix() {
     let a: Matrix4D = [ -6.0, 1.0,  1.0, 6.0,
                         -8.0, 5.0,  8.0, 6.0,
                         -1.0, 0.0,  8.0, 2.0,
                         -7.0, 1.0, -1.0, 1.0, ].into();

     let s: Matrix3D = [ -6.0,  1.0, 6.0,
                         -8.0,  8.0, 6.0,
                         -7.0, -1.0, 1.0, ].into();

     assert_eq!(a.submatrix(2, 1), s);
}

#[test]
fn mat3_cofactor() {
    let a: Matrix3D = [ 3.0,  5.0,  0.0,
                        2.0, -1.0, -7.0,
                        6.0, -1.0,  5.0, ].into();

    assert_eq!(a.minor(0, 0), -12.0);
    assert_eq!(a.cofactor(0, 0), -12.0);
    assert_eq!(a.minor(1, 0), 25.0);
    assert_eq!(a.cofactor(1, 0), -25.0);
}

#[test]
fn mat3_determinant() {
     let a: Matrix3D = [  1.0, 2.0,  6.0,
                         -5.0, 8.0, -4.0,
                          2.0, 6.0,  4.0, ].into();

     assert_eq!(a.cofactor(0, 0), 56.0);
     assert_eq!(a.cofactor(0, 1), 12.0);
     assert_eq!(a.cofactor(0, 2), -46.0);
     assert_eq!(a.determinant(), -196.0);
}

#[test]
fn mat4_determinant() {
     let a: Matrix4D = [ -2.0, -8.0,  3.0,  5.0,
                         -3.0,  1.0,  7.0,  3.0,
                          1.0,  2.0, -9.0,  6.0,
                         -6.0,  7.0,  7.0, -9.0, ].into();

     assert_eq!(a.cofactor(0, 0), 690.0);
     assert_eq!(a.cofactor(0, 1), 447.0);
     assert_eq!(a.cofactor(0, 2), 210.0);
     assert_eq!(a.cofactor(0, 3), 51.0);
     assert_eq!(a.determinant(), -4071.0);
}

#[test]
fn mat4_inverse() {
     let a: Matrix4D = [ -5.0,  2.0,  6.0, -8.0,
                          1.0, -5.0,  1.0,  8.0,
                          7.0,  7.0, -6.0, -7.0,
                          1.0, -3.0,  7.0,  4.0, ].into();

     let i: Matrix4D = [  0.21805,  0.45113,  0.24060, -0.04511,
                         -0.80827, -1.45677, -0.44361,  0.52068,
                         -0.07895, -0.22368, -0.05263,  0.19737,
                         -0.52256, -0.81391, -0.30075,  0.30639, ].into();

     assert_eq!(a.determinant(), 532.0);
     assert_eq!(a.inverse().unwrap(), i);
}

#[test]
fn mat4_singular_inverse_fails() {
     let a: Matrix4D = [ -4.0,  2.0, -2.0, -3.0,
                          9.0,  6.0,  2.0,  6.0,
                          0.0, -5.0,  1.0, -5.0,
                          0.0,  0.0,  0.0,  0.0, ].into();

     match a.inverse() {
         Err(TraceError::DegenerateTransform { det }) => assert_eq!(det, 0.0),
         other => panic!("expected DegenerateTransform, got {:?}", other),
     }

     assert!(Matrix4D::scaling(0.0, 1.0, 1.0).inverse().is_err());
}

#[test]
fn mat4_inverse_of_inverse() {
     let a: Matrix4D = [  8.0, -5.0,  9.0,  2.0,
                          7.0,  5.0,  6.0,  1.0,
                         -6.0,  0.0,  9.0,  6.0,
                         -3.0,  0.0, -9.0, -4.0, ].into();

     assert_eq!(a.inverse().unwrap().inverse().unwrap(), a);
     assert_eq!(a * a.inverse().unwrap(), Matrix4D::identity());
}

#[test]
fn mat4_inverse_mult() {
     let a: Matrix4D = [  3.0, -9.0,  7.0,  3.0,
                          3.0,  8.0,  2.0, -9.0,
                         -4.0,  4.0,  4.0,  1.0,
                         -6.0,  5.0, -1.0,  1.0, ].into();

     let b: Matrix4D = [ 8.0,  2.0, 2.0, 2.0,
                         3.0, -1.0, 7.0, 0.0,
                         7.0,  0.0, 5.0, 4.0,
                         6.0, -2.0, 0.0, 5.0  ].into();

     let c = a * b;

     assert_eq!(a, c * b.inverse().unwrap());
}

#[test]
fn mat4_translation() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let point = Tuple4D::point(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple4D::point(2.0, 1.0, 7.0));
}

#[test]
fn mat4_translation_inverse() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0).inverse().unwrap();
    let point = Tuple4D::point(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple4D::point(-8.0, 7.0, 3.0));
}

#[test]
fn mat4_translation_vector() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let vector = Tuple4D::vector(-3.0, 4.0, 5.0);

    assert_eq!(transform * vector, vector);
}

#[test]
fn mat4_scaling() {
    let transform = Matrix4D::scaling(2.0, 3.0, 4.0);
    let vector = Tuple4D::vector(-4.0, 6.0, 8.0);

    assert_eq!(transform * vector, Tuple4D::vector(-8.0, 18.0, 32.0));
    assert_eq!(transform * Tuple4D::point(-4.0, 6.0, 8.0),
        Tuple4D::point(-8.0, 18.0, 32.0));
}

#[test]
fn mat4_scaling_inverse() {
    let transform = Matrix4D::scaling(2.0, 3.0, 4.0);
    let inverse = transform.inverse().unwrap();
    let vector = Tuple4D::vector(-4.0, 6.0, 8.0);

    assert_eq!(inverse * vector, Tuple4D::vector(-2.0, 2.0, 2.0));
    assert_eq!(inverse * (transform * vector), vector);
}

#[test]
fn mat4_scaling_reflection() {
    let transform = Matrix4D::scaling(-1.0, 1.0, 1.0);
    let point = Tuple4D::point(2.0, 3.0, 4.0);

    assert_eq!(transform * point, Tuple4D::point(-2.0, 3.0, 4.0));
}

#[test]
fn mat4_rotate_x() {
    let half_quarter = Matrix4D::rotation_x(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    let point = Tuple4D::point(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(0.0, 2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn mat4_rotate_x_inverse() {
    let half_quarter = Matrix4D::rotation_x(std::f64::consts::PI / 4.0);
    let point = Tuple4D::point(0.0, 1.0, 0.0);

    assert_eq!(half_quarter.inverse().unwrap() * point,
        Tuple4D::point(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt() / 2.0)));
}

#[test]
fn mat4_rotate_y() {
    let half_quarter = Matrix4D::rotation_y(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_y(std::f64::consts::PI / 2.0);
    let point = Tuple4D::point(0.0, 0.0, 1.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(2.0f64.sqrt() / 2.0, 0.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn mat4_rotate_z() {
    let half_quarter = Matrix4D::rotation_z(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix4D::rotation_z(std::f64::consts::PI / 2.0);
    let point = Tuple4D::point(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(-1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(-2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0));
}

#[test]
fn mat4_shear() {
    let point = Tuple4D::point(2.0, 3.0, 4.0);
    let cases = [
        (Matrix4D::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0), Tuple4D::point(5.0, 3.0, 4.0)),
        (Matrix4D::shearing(0.0, 1.0, 0.0, 0.0, 0.0, 0.0), Tuple4D::point(6.0, 3.0, 4.0)),
        (Matrix4D::shearing(0.0, 0.0, 1.0, 0.0, 0.0, 0.0), Tuple4D::point(2.0, 5.0, 4.0)),
        (Matrix4D::shearing(0.0, 0.0, 0.0, 1.0, 0.0, 0.0), Tuple4D::point(2.0, 7.0, 4.0)),
        (Matrix4D::shearing(0.0, 0.0, 0.0, 0.0, 1.0, 0.0), Tuple4D::point(2.0, 3.0, 6.0)),
        (Matrix4D::shearing(0.0, 0.0, 0.0, 0.0, 0.0, 1.0), Tuple4D::point(2.0, 3.0, 7.0)),
    ];

    for (transform, expected) in cases.iter() {
        assert_eq!(*transform * point, *expected);
    }
}

#[test]
fn sequential_transforms() {
    let a = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    let b = Matrix4D::scaling(5.0, 5.0, 5.0);
    let c = Matrix4D::translation(10.0, 5.0, 7.0);
    let p = Tuple4D::point(1.0, 0.0, 1.0);

    let p2 = a * p;
    assert_eq!(p2, Tuple4D::point(1.0, -1.0, 0.0));
    let p3 = b * p2;
    assert_eq!(p3, Tuple4D::point(5.0, -5.0, 0.0));
    let p4 = c * p3;
    assert_eq!(p4, Tuple4D::point(15.0, 0.0, 7.0));

    assert_eq!((c * b * a) * p, p4);
}

#[test]
fn default_view() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let to = Tuple4D::point(0.0, 0.0, -1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::identity(),
        Matrix4D::view_transform(from, to, up).unwrap());
}

#[test]
fn positive_z_view() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let to = Tuple4D::point(0.0, 0.0, 1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, to, up).unwrap(),
        Matrix4D::scaling(-1.0, 1.0, -1.0));
}

#[test]
fn view_moves_world() {
    let from = Tuple4D::point(0.0, 0.0, 8.0);
    let to = Tuple4D::point(0.0, 0.0, 0.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, to, up).unwrap(),
        Matrix4D::translation(0.0, 0.0, -8.0));
}

#[test]
fn arbitrary_view() {
    let from = Tuple4D::point(1.0, 3.0, 2.0);
    let to = Tuple4D::point(4.0, -2.0, 8.0);
    let up = Tuple4D::vector(1.0, 1.0, 0.0);

    let a: Matrix4D = [  -0.50709, 0.50709,  0.67612, -2.36643,
                          0.76772, 0.60609,  0.12122, -2.82843,
                         -0.35857, 0.59761, -0.71714,  0.00000,
                         -0.00000, 0.00000,  0.00000,  1.00000, ].into();

    assert_eq!(Matrix4D::view_transform(from, to, up).unwrap(), a);
}

#[test]
fn degenerate_view_fails() {
    let eye = Tuple4D::point(1.0, 1.0, 1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert!(Matrix4D::view_transform(eye, eye, up).is_err());
    assert!(Matrix4D::view_transform(
        Tuple4D::point(0.0, 0.0, 0.0), Tuple4D::point(0.0, 5.0, 0.0), up
    ).is_err());
}
