// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The maps an iterated function system is built from.
//!
//! There are two kinds.  An affine map is a linear map followed by a
//! translation; a handful of them, contracting, describe the
//! Sierpinski triangle, the Barnsley fern, and friends.  A Julia map
//! is one branch of the inverse of `z ↦ z² + c`: pulling a point
//! backwards through the quadratic map again and again, picking a
//! branch at random each time, walks the point onto the Julia set of
//! `c`.

use num::Complex;
use point::{Matrix2x2, Point};
use std::fmt;
use std::str::FromStr;

/// Which of the two square roots a Julia map takes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sign {
    /// The principal root.
    Positive,
    /// The negated principal root.
    Negative,
}

impl Sign {
    /// The sign as a multiplier.
    pub fn factor(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// The two families of maps.  A description holds only one of them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransformKind {
    /// Linear map plus translation.
    Affine,
    /// Inverse quadratic map.
    Julia,
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TransformKind::Affine => write!(f, "Affine"),
            TransformKind::Julia => write!(f, "Julia"),
        }
    }
}

impl FromStr for TransformKind {
    type Err = String;

    fn from_str(s: &str) -> Result<TransformKind, String> {
        match s.trim() {
            "Affine" => Ok(TransformKind::Affine),
            "Julia" => Ok(TransformKind::Julia),
            other => Err(other.to_string()),
        }
    }
}

/// A single map of the plane onto itself.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Transform {
    /// `p ↦ matrix·p + translation`
    Affine {
        /// The linear part.
        matrix: Matrix2x2,
        /// The translation applied after it.
        translation: Point,
    },
    /// `z ↦ ±√(z - c)`
    Julia {
        /// The Julia constant.
        c: Complex<f64>,
        /// The branch of the square root.
        sign: Sign,
    },
}

impl Transform {
    /// An affine map from its six coefficients, in the order the text
    /// format lists them.
    pub fn affine(a00: f64, a01: f64, a10: f64, a11: f64, bx: f64, by: f64) -> Transform {
        Transform::Affine {
            matrix: Matrix2x2::new(a00, a01, a10, a11),
            translation: Point::new(bx, by),
        }
    }

    /// One branch of the inverse Julia map for `c`.
    pub fn julia(c: Complex<f64>, sign: Sign) -> Transform {
        Transform::Julia { c, sign }
    }

    /// Both branches of the inverse Julia map for `c`, positive first.
    /// A single Julia line in a description file stands for this pair.
    pub fn julia_pair(c: Complex<f64>) -> [Transform; 2] {
        [
            Transform::julia(c, Sign::Positive),
            Transform::julia(c, Sign::Negative),
        ]
    }

    /// Which family this map belongs to.
    pub fn kind(&self) -> TransformKind {
        match *self {
            Transform::Affine { .. } => TransformKind::Affine,
            Transform::Julia { .. } => TransformKind::Julia,
        }
    }

    /// Map a point.
    pub fn apply(&self, p: Point) -> Point {
        match *self {
            Transform::Affine {
                ref matrix,
                translation,
            } => matrix.multiply(p) + translation,
            Transform::Julia { c, sign } => {
                Point::from(principal_sqrt(p.to_complex() - c)).scale(sign.factor())
            }
        }
    }
}

/// The principal square root, computed from the modulus so that the
/// branch cut sits on the negative real axis and a zero imaginary
/// part counts as positive.
fn principal_sqrt(w: Complex<f64>) -> Complex<f64> {
    let m = w.norm();
    let re = ((m + w.re) / 2.0).max(0.0).sqrt();
    let im = ((m - w.re) / 2.0).max(0.0).sqrt();
    if w.im < 0.0 {
        Complex::new(re, -im)
    } else {
        Complex::new(re, im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-12 && (a.y - b.y).abs() < 1e-12
    }

    #[test]
    fn affine_scales_then_translates() {
        let t = Transform::affine(0.5, 0.0, 0.0, 0.5, 0.25, 0.5);
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(0.75, 1.0));
        assert_eq!(t.apply(Point::origin()), Point::new(0.25, 0.5));
    }

    #[test]
    fn affine_rotation() {
        let t = Transform::affine(0.0, -1.0, 1.0, 0.0, 0.0, 0.0);
        assert_eq!(t.apply(Point::new(1.0, 0.0)), Point::new(0.0, 1.0));
    }

    #[test]
    fn julia_branches_are_exact_negatives() {
        let points = [
            Point::new(0.3, -0.2),
            Point::new(-1.5, 0.0),
            Point::new(2.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(-0.75, -0.1),
        ];
        let constants = [
            Complex::new(-0.4, 0.6),
            Complex::new(0.285, 0.01),
            Complex::new(0.0, 0.0),
        ];
        for &c in constants.iter() {
            let [plus, minus] = Transform::julia_pair(c);
            for &p in points.iter() {
                let a = plus.apply(p);
                let b = minus.apply(p);
                assert_eq!(a.x, -b.x);
                assert_eq!(a.y, -b.y);
            }
        }
    }

    #[test]
    fn julia_inverts_the_quadratic_map() {
        let c = Complex::new(-0.4, 0.6);
        let t = Transform::julia(c, Sign::Positive);
        let z = Point::new(0.7, -1.1);
        let root = t.apply(z).to_complex();
        assert!(close(Point::from(root * root + c), z));
    }

    #[test]
    fn julia_root_of_negative_real_is_positive_imaginary() {
        let t = Transform::julia(Complex::new(0.0, 0.0), Sign::Positive);
        assert!(close(t.apply(Point::new(-4.0, 0.0)), Point::new(0.0, 2.0)));
    }

    #[test]
    fn julia_root_follows_sign_of_imaginary_part() {
        let t = Transform::julia(Complex::new(0.0, 0.0), Sign::Positive);
        assert!(close(t.apply(Point::new(0.0, -2.0)), Point::new(1.0, -1.0)));
        assert!(close(t.apply(Point::new(0.0, 2.0)), Point::new(1.0, 1.0)));
    }

    #[test]
    fn kinds_classify_variants() {
        assert_eq!(
            Transform::affine(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).kind(),
            TransformKind::Affine
        );
        assert_eq!(
            Transform::julia(Complex::new(0.0, 0.0), Sign::Negative).kind(),
            TransformKind::Julia
        );
    }

    #[test]
    fn kind_names_round_trip() {
        assert_eq!("Affine".parse::<TransformKind>(), Ok(TransformKind::Affine));
        assert_eq!(" Julia ".parse::<TransformKind>(), Ok(TransformKind::Julia));
        assert!("Mandelbrot".parse::<TransformKind>().is_err());
        assert_eq!(TransformKind::Julia.to_string(), "Julia");
    }

    #[test]
    fn equality_is_structural() {
        let c = Complex::new(0.1, 0.2);
        assert_eq!(Transform::julia(c, Sign::Positive), Transform::julia(c, Sign::Positive));
        assert_ne!(Transform::julia(c, Sign::Positive), Transform::julia(c, Sign::Negative));
    }
}
