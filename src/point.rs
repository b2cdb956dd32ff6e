// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The value types every map works on: a point on the real plane and
//! a 2×2 real matrix.  A point and a complex number are the same pair
//! of doubles read with different arithmetic, so points convert to
//! and from `num::Complex` without loss.

use num::Complex;
use std::ops::{Add, Mul, Neg, Sub};

/// A point (or a vector; the arithmetic is the same) on the real
/// cartesian plane.  Immutable: every operation returns a new point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    /// The horizontal component.
    pub x: f64,
    /// The vertical component.
    pub y: f64,
}

impl Point {
    /// Constructor.
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// The origin of the plane, where every random walk starts.
    pub fn origin() -> Point {
        Point { x: 0.0, y: 0.0 }
    }

    /// Treat the point as a complex number, x as the real part and y
    /// as the imaginary part.
    pub fn to_complex(self) -> Complex<f64> {
        Complex::new(self.x, self.y)
    }

    /// Multiply both components by a scalar.
    pub fn scale(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    /// Round both components to the given number of decimal places.
    pub fn round_to(self, places: i32) -> Point {
        let factor = 10.0_f64.powi(places);
        Point::new(
            (self.x * factor).round() / factor,
            (self.y * factor).round() / factor,
        )
    }

    /// True if both components are strictly smaller than the other
    /// point's.  Bounding boxes require this of their corners.
    pub fn strictly_below(self, other: Point) -> bool {
        self.x < other.x && self.y < other.y
    }

    /// True if neither component is NaN or infinite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Complex<f64>> for Point {
    fn from(c: Complex<f64>) -> Point {
        Point::new(c.re, c.im)
    }
}

impl From<Point> for Complex<f64> {
    fn from(p: Point) -> Complex<f64> {
        p.to_complex()
    }
}

impl From<(f64, f64)> for Point {
    fn from(pair: (f64, f64)) -> Point {
        Point::new(pair.0, pair.1)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, factor: f64) -> Point {
        self.scale(factor)
    }
}

/// A 2×2 matrix of reals, stored row by row:
///
/// ```text
/// | a00 a01 |
/// | a10 a11 |
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix2x2 {
    /// Row 0, column 0.
    pub a00: f64,
    /// Row 0, column 1.
    pub a01: f64,
    /// Row 1, column 0.
    pub a10: f64,
    /// Row 1, column 1.
    pub a11: f64,
}

impl Matrix2x2 {
    /// Constructor, row by row.
    pub fn new(a00: f64, a01: f64, a10: f64, a11: f64) -> Matrix2x2 {
        Matrix2x2 { a00, a01, a10, a11 }
    }

    /// Multiply the matrix by a column vector.
    pub fn multiply(&self, p: Point) -> Point {
        Point::new(
            self.a00 * p.x + self.a01 * p.y,
            self.a10 * p.x + self.a11 * p.y,
        )
    }

    /// The four entries in row-major order, the order the text format
    /// writes them in.
    pub fn entries(&self) -> [f64; 4] {
        [self.a00, self.a01, self.a10, self.a11]
    }
}

impl Mul<Point> for Matrix2x2 {
    type Output = Point;
    fn mul(self, p: Point) -> Point {
        self.multiply(p)
    }
}
