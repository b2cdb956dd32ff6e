// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Zoom and pan.  There are two unrelated mechanisms here and they
//! stay separate: `Bounds` rewrites the world-space box a description
//! and its grid share, while `EscapeViewport` is the escape-time
//! engine's private zoom factor and offset, measured in different
//! units and fed into a different formula.

use error::FractalError;
use point::Point;

/// Decimal places a panned box is rounded to, so repeated panning
/// cannot accumulate floating-point drift.
pub const PAN_PRECISION: i32 = 5;

/// A rectangle on the real plane, described by its lower-left and
/// upper-right corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    /// The corners must satisfy `min < max` in both components.
    pub fn new(min: Point, max: Point) -> Result<Bounds, FractalError> {
        if !min.strictly_below(max) {
            return Err(FractalError::InvalidBounds(min.x, min.y, max.x, max.y));
        }
        Ok(Bounds { min, max })
    }

    /// Lower-left corner.
    pub fn min(&self) -> Point {
        self.min
    }

    /// Upper-right corner.
    pub fn max(&self) -> Point {
        self.max
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Closed containment test; points on an edge are inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Grow (positive multiplier) or shrink (negative multiplier) the
    /// box about its center by `multiplier` times its current size.
    /// Shrinking by a whole box or more would turn it inside out, and
    /// is refused.
    pub fn change_zoom(&mut self, multiplier: f64) -> Result<(), FractalError> {
        let dx = self.width() * multiplier;
        let dy = self.height() * multiplier;
        let zoomed = Bounds::new(
            Point::new(self.min.x - dx / 2.0, self.min.y - dy / 2.0),
            Point::new(self.max.x + dx / 2.0, self.max.y + dy / 2.0),
        )?;
        trace!("zoom by {}: {:?} -> {:?}", multiplier, self, zoomed);
        *self = zoomed;
        Ok(())
    }

    /// Slide the box.  The vector is in percent of the current span,
    /// and the box moves against it: panning right by 10 shows what
    /// lay 10% further left.
    pub fn pan(&mut self, vector: Point) -> Result<(), FractalError> {
        let shift = Point::new(
            self.width() * vector.x / 100.0,
            self.height() * vector.y / 100.0,
        );
        let panned = Bounds::new(
            (self.min - shift).round_to(PAN_PRECISION),
            (self.max - shift).round_to(PAN_PRECISION),
        )?;
        trace!("pan by {:?}: {:?} -> {:?}", vector, self, panned);
        *self = panned;
        Ok(())
    }
}

/// The escape-time engine's view: a cumulative zoom factor and an
/// offset in world units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EscapeViewport {
    /// Multiplies the pixel-to-world scale; starts at 1.
    pub zoom: f64,
    /// Horizontal world offset of the grid's center.
    pub x_offset: f64,
    /// Vertical world offset of the grid's center.
    pub y_offset: f64,
}

impl Default for EscapeViewport {
    fn default() -> EscapeViewport {
        EscapeViewport {
            zoom: 1.0,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }
}

impl EscapeViewport {
    /// `zoom += zoom * multiplier`.  A multiplier of -1 or less would
    /// take the zoom to zero or below, and is refused.
    pub fn change_zoom(&mut self, multiplier: f64) -> Result<(), FractalError> {
        if !(multiplier > -1.0) {
            return Err(FractalError::InvalidZoom(multiplier));
        }
        self.zoom += self.zoom * multiplier;
        trace!("escape viewport zoom now {}", self.zoom);
        Ok(())
    }

    /// Move by a tenth of the vector, scaled by the current zoom.  The
    /// vertical axis runs downward on the grid, hence the opposite
    /// signs.
    pub fn pan(&mut self, vector: Point) {
        self.x_offset -= vector.x * self.zoom / 10.0;
        self.y_offset += vector.y * self.zoom / 10.0;
        trace!(
            "escape viewport offset now ({}, {})",
            self.x_offset,
            self.y_offset
        );
    }

}
