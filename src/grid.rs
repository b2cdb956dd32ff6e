// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PixelGrid struct, which pairs a rectangle on the
//! integral plane (the pixels) with a rectangle on the real plane
//! (the world), maps points from one to the other, and owns the
//! buffer the engines paint into.
//!
//! Row 0 is the top of the image, so the world's maximum y lands on
//! row 0 and its minimum y on the last row.  Columns run the usual
//! way.  Both mappings stretch the box's edges onto the first and
//! last pixel, not one past them.

use error::FractalError;
use point::Point;
use viewport::Bounds;

/// The ceiling of every pixel in the buffer.
pub const MAX_INTENSITY: u32 = 755;

/// A cell of the grid as (column, row), counted from the top left,
/// so `Pixel(3, 0)` is the fourth cell of the top row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pixel(pub usize, pub usize);

impl Pixel {
    /// The column.
    pub fn col(&self) -> usize {
        self.0
    }

    /// The row.
    pub fn row(&self) -> usize {
        self.1
    }
}

/// The accumulation canvas.  The buffer is row-major, `height` rows of
/// `width` values each, and starts out zeroed.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    bounds: Bounds,
    // Pixels per world unit, less one pixel, for the inverse mapping.
    grid_factors: (f64, f64),
    buffer: Vec<u32>,
}

impl PixelGrid {
    /// Constructor.  Takes the size of the integral plane and the box
    /// on the real plane it shows.
    pub fn new(width: usize, height: usize, bounds: Bounds) -> Result<PixelGrid, FractalError> {
        if width == 0 || height == 0 {
            return Err(FractalError::InvalidDimensions(width, height));
        }

        let grid_factors = (
            ((width - 1) as f64) / bounds.width(),
            ((height - 1) as f64) / bounds.height(),
        );

        Ok(PixelGrid {
            width,
            height,
            bounds,
            grid_factors,
            buffer: vec![0; width * height],
        })
    }

    /// Same grid, different size.  The buffer comes back empty.
    pub fn resized(&self, width: usize, height: usize) -> Result<PixelGrid, FractalError> {
        PixelGrid::new(width, height, self.bounds)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The world-space box the grid covers.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always false; a grid is at least one pixel.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The whole buffer, row-major.
    pub fn buffer(&self) -> &[u32] {
        &self.buffer
    }

    /// One row of the buffer.
    pub fn row(&self, row: usize) -> Option<&[u32]> {
        if row >= self.height {
            return None;
        }
        Some(&self.buffer[row * self.width..(row + 1) * self.width])
    }

    /// The brightest pixel.
    pub fn max_value(&self) -> u32 {
        self.buffer.iter().cloned().max().unwrap_or(0)
    }

    /// Given a point on the real plane, the pixel it falls in.  Points
    /// outside the box are an error, not clamped onto its edge.
    pub fn point_to_pixel(&self, point: Point) -> Result<Pixel, FractalError> {
        if !self.bounds.contains(point) {
            return Err(FractalError::PointOutOfBounds(point.x, point.y));
        }
        let max = self.bounds.max();
        let min = self.bounds.min();
        let row = ((self.height - 1) as f64) * (max.y - point.y) / self.bounds.height();
        let col = ((self.width - 1) as f64) * (point.x - min.x) / self.bounds.width();
        Ok(Pixel(col as usize, row as usize))
    }

    /// Given a pixel, the point on the real plane at its top-left
    /// corner.  Inverse of `point_to_pixel` up to truncation.
    pub fn pixel_to_point(&self, pixel: Pixel) -> Point {
        let min = self.bounds.min();
        let max = self.bounds.max();
        let x = if self.width > 1 {
            min.x + (pixel.0 as f64) / self.grid_factors.0
        } else {
            min.x
        };
        let y = if self.height > 1 {
            max.y - (pixel.1 as f64) / self.grid_factors.1
        } else {
            max.y
        };
        Point::new(x, y)
    }

    fn pixel_to_offset(&self, pixel: Pixel) -> Option<usize> {
        if pixel.0 >= self.width || pixel.1 >= self.height {
            return None;
        }
        Some(pixel.1 * self.width + pixel.0)
    }

    /// The linear offset into the buffer of the pixel a point falls
    /// in, or None if the point has wandered out of the box.
    pub fn point_to_offset(&self, point: Point) -> Option<usize> {
        self.point_to_pixel(point)
            .ok()
            .and_then(|pixel| self.pixel_to_offset(pixel))
    }

    /// Add `amount` to the pixel a point falls in, never going above
    /// `MAX_INTENSITY`.  Points outside the box are ignored; walks
    /// leave the box all the time.
    pub fn accumulate(&mut self, point: Point, amount: u32) {
        if let Some(offset) = self.point_to_offset(point) {
            let value = self.buffer[offset].saturating_add(amount);
            self.buffer[offset] = value.min(MAX_INTENSITY);
        }
    }

    /// Write a pixel by index.  Out of range is a no-op.
    pub fn set_direct(&mut self, pixel: Pixel, value: u32) {
        if let Some(offset) = self.pixel_to_offset(pixel) {
            self.buffer[offset] = value;
        }
    }

    /// Read a pixel by index.
    pub fn get_direct(&self, pixel: Pixel) -> Result<u32, FractalError> {
        self.pixel_to_offset(pixel)
            .map(|offset| self.buffer[offset])
            .ok_or(FractalError::PixelOutOfBounds(pixel.0, pixel.1))
    }

    /// Zero every pixel.
    pub fn clear(&mut self) {
        for value in self.buffer.iter_mut() {
            *value = 0;
        }
    }
}
