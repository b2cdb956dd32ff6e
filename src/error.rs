// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error types.  `FractalError` covers construction-time validation
//! and failures inside a run; `ParseError` covers reading the text
//! format.

use transform::TransformKind;

/// Everything that can go wrong building or running an engine.
#[derive(Debug, Fail, PartialEq)]
pub enum FractalError {
    /// The lower-left corner is not below and to the left of the
    /// upper-right corner.
    #[fail(display = "bounding box minimum ({}, {}) is not below its maximum ({}, {})", _0, _1, _2, _3)]
    InvalidBounds(f64, f64, f64, f64),

    /// A description needs at least one transform.
    #[fail(display = "a fractal description needs at least one transform")]
    EmptyTransforms,

    /// Transforms and weights are parallel lists.
    #[fail(display = "{} transforms but {} weights", transforms, weights)]
    WeightCountMismatch {
        /// Number of transforms supplied.
        transforms: usize,
        /// Number of weights supplied.
        weights: usize,
    },

    /// Affine and Julia maps cannot share a description.
    #[fail(display = "transform {} is {}, but the description is {}", index, found, expected)]
    MixedKinds {
        /// Position of the offending transform.
        index: usize,
        /// The kind set by the first transform.
        expected: TransformKind,
        /// The kind actually found.
        found: TransformKind,
    },

    /// Width or height of zero.
    #[fail(display = "grid dimensions {}x{} must both be positive", _0, _1)]
    InvalidDimensions(usize, usize),

    /// The escape-time iteration limit must be positive.
    #[fail(display = "maximum iterations must be positive")]
    InvalidIterations,

    /// A zoom multiplier of -1 or less would collapse or mirror the view.
    #[fail(display = "zoom multiplier must be greater than -1, got {}", _0)]
    InvalidZoom(f64),

    /// The squared escape radius must be a positive, finite number.
    #[fail(display = "escape radius squared must be positive, got {}", _0)]
    InvalidEscapeRadius(f64),

    /// An engine was handed a description of the wrong kind.
    #[fail(display = "engine needs a {} description, got {}", expected, found)]
    KindMismatch {
        /// The kind the engine renders.
        expected: TransformKind,
        /// The kind of the description it was given.
        found: TransformKind,
    },

    /// A world point outside the grid's bounding box.
    #[fail(display = "point ({}, {}) lies outside the bounding box", _0, _1)]
    PointOutOfBounds(f64, f64),

    /// A pixel index outside the grid.
    #[fail(display = "pixel ({}, {}) lies outside the grid", _0, _1)]
    PixelOutOfBounds(usize, usize),

    /// A weighted draw outside `[0, weight_sum)`.
    #[fail(display = "draw index {} is outside [0, {})", index, weight_sum)]
    DrawIndexOutOfRange {
        /// The index drawn.
        index: u32,
        /// The description's total weight.
        weight_sum: u32,
    },

    /// The weights add up to more than a `u32` can count.
    #[fail(display = "transform weights overflow a 32-bit total")]
    WeightSumOverflow,

    /// No transform at that position.
    #[fail(display = "no transform at index {} (there are {})", index, len)]
    TransformIndexOutOfRange {
        /// The index asked for.
        index: usize,
        /// The number of transforms.
        len: usize,
    },

    /// A run found the description unusable and gave up.
    #[fail(display = "invalid description: {}", _0)]
    InvalidDescription(String),
}

/// Everything that can go wrong reading a description from text.
#[derive(Debug, Fail)]
pub enum ParseError {
    /// The named file does not exist.
    #[fail(display = "file not found: {}", _0)]
    FileNotFound(String),

    /// Nothing but blank lines and comments.
    #[fail(display = "the description is empty")]
    EmptyDescription,

    /// A required line never appeared.
    #[fail(display = "missing {}", _0)]
    MissingField(&'static str),

    /// The header names a transform type we do not know.
    #[fail(display = "line {}: unknown transform type '{}'", line, name)]
    UnknownTransformType {
        /// One-based line number.
        line: usize,
        /// The word found.
        name: String,
    },

    /// A field that should be a number is not.
    #[fail(display = "line {}: '{}' is not a number", line, field)]
    NotANumber {
        /// One-based line number.
        line: usize,
        /// The text that failed to parse.
        field: String,
    },

    /// Too many or too few comma-separated fields on a line.
    #[fail(display = "line {}: expected {} fields, found {}", line, expected, found)]
    WrongFieldCount {
        /// One-based line number.
        line: usize,
        /// How many the line type requires.
        expected: usize,
        /// How many were present.
        found: usize,
    },

    /// The text parsed, but the description it describes is invalid.
    #[fail(display = "{}", _0)]
    Invalid(#[cause] FractalError),

    /// Reading or writing the file failed.
    #[fail(display = "{}", _0)]
    Io(#[cause] ::std::io::Error),
}

impl From<FractalError> for ParseError {
    fn from(err: FractalError) -> ParseError {
        ParseError::Invalid(err)
    }
}

impl From<::std::io::Error> for ParseError {
    fn from(err: ::std::io::Error) -> ParseError {
        ParseError::Io(err)
    }
}
