// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The plain-text description format.
//!
//! ```text
//! Affine              # the transform type, Affine or Julia
//! 0,0                 # lower-left corner
//! 1,1                 # upper-right corner
//! 0.5,0,0,0.5,0,0     # one transform per line
//! 0.5,0,0,0.5,0.5,0
//! 0.5,0,0,0.5,0.25,0.5
//! ```
//!
//! An affine line is `a00,a01,a10,a11,bx,by`.  A Julia line is the
//! constant `re,im` and stands for both branches of the inverse map.
//! Anything after a `#` is a comment; blank lines are skipped.
//! Weights are not stored, so everything loads with weight 1.

use description::FractalDescription;
use error::ParseError;
use num::Complex;
use point::Point;
use std::fs;
use std::io;
use std::path::Path;
use transform::{Transform, TransformKind};
use viewport::Bounds;

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(index) => &line[..index],
        None => line,
    }
}

/// Split a line on commas and parse every field, insisting on exactly
/// `expected` of them.
fn parse_fields(line: usize, text: &str, expected: usize) -> Result<Vec<f64>, ParseError> {
    let fields: Vec<&str> = text.split(',').map(|f| f.trim()).collect();
    if fields.len() != expected {
        return Err(ParseError::WrongFieldCount {
            line,
            expected,
            found: fields.len(),
        });
    }
    fields
        .iter()
        .map(|field| {
            field.parse::<f64>().map_err(|_| ParseError::NotANumber {
                line,
                field: field.to_string(),
            })
        })
        .collect()
}

fn parse_point(line: usize, text: &str) -> Result<Point, ParseError> {
    let fields = parse_fields(line, text, 2)?;
    Ok(Point::new(fields[0], fields[1]))
}

/// Read a description from text.
pub fn parse(text: &str) -> Result<FractalDescription, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, strip_comment(line).trim()))
        .filter(|&(_, line)| !line.is_empty());

    let (line, header) = lines.next().ok_or(ParseError::EmptyDescription)?;
    let kind = header
        .parse::<TransformKind>()
        .map_err(|name| ParseError::UnknownTransformType { line, name })?;

    let (line, text) = lines
        .next()
        .ok_or(ParseError::MissingField("minimum coordinates"))?;
    let min = parse_point(line, text)?;
    let (line, text) = lines
        .next()
        .ok_or(ParseError::MissingField("maximum coordinates"))?;
    let max = parse_point(line, text)?;
    let bounds = Bounds::new(min, max)?;

    let mut transforms = vec![];
    for (line, text) in lines {
        match kind {
            TransformKind::Affine => {
                let f = parse_fields(line, text, 6)?;
                transforms.push(Transform::affine(f[0], f[1], f[2], f[3], f[4], f[5]));
            }
            TransformKind::Julia => {
                let f = parse_fields(line, text, 2)?;
                transforms.extend_from_slice(&Transform::julia_pair(Complex::new(f[0], f[1])));
            }
        }
    }
    if transforms.is_empty() {
        return Err(ParseError::MissingField("transforms"));
    }

    debug!("parsed {} description with {} transforms", kind, transforms.len());
    Ok(FractalDescription::new(bounds, transforms)?)
}

/// Write a description as text.  Each pair of Julia branches becomes
/// a single line again; weights are dropped.
pub fn format(description: &FractalDescription) -> String {
    let min = description.min_coords();
    let max = description.max_coords();
    let mut lines = vec![
        description.kind().to_string(),
        format!("{},{}", min.x, min.y),
        format!("{},{}", max.x, max.y),
    ];

    let mut last_constant = None;
    for transform in description.transforms() {
        match *transform {
            Transform::Affine {
                ref matrix,
                translation,
            } => {
                let [a00, a01, a10, a11] = matrix.entries();
                lines.push(format!(
                    "{},{},{},{},{},{}",
                    a00, a01, a10, a11, translation.x, translation.y
                ));
            }
            Transform::Julia { c, .. } => {
                if last_constant != Some(c) {
                    lines.push(format!("{},{}", c.re, c.im));
                    last_constant = Some(c);
                }
            }
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Read a description from a file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<FractalDescription, ParseError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ParseError::FileNotFound(path.display().to_string()),
        _ => ParseError::Io(err),
    })?;
    parse(&text)
}

/// Write a description to a file.
pub fn save<P: AsRef<Path>>(path: P, description: &FractalDescription) -> Result<(), ParseError> {
    fs::write(path, format(description))?;
    Ok(())
}
