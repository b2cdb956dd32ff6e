// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time rendering of a Julia set.
//!
//! Every pixel is a starting point `z` on the complex plane.  Iterate
//! `z ↦ z² + c` until `z` leaves the escape radius or we run out of
//! patience; points that never leave are the filled Julia set and stay
//! black, points that leave are shaded by a smoothed count of how long
//! they took.  Unlike the chaos game this touches every pixel exactly
//! once per render, and any change of view re-renders the lot.
//!
//! The pixel-to-plane mapping scales both axes by the grid's width, so
//! a grid taller than it is wide shows more of the plane vertically
//! than horizontally.

use description::FractalDescription;
use error::FractalError;
use grid::{Pixel, PixelGrid, MAX_INTENSITY};
use itertools::iproduct;
use notify::{ChangeListener, ChangeNotifier, ListenerId};
use num::{clamp, Complex};
use point::Point;
use std::str::FromStr;
use transform::{Transform, TransformKind};
use viewport::EscapeViewport;

/// A reasonable iteration limit.
pub const DEFAULT_MAX_ITERATIONS: u32 = 300;

/// The classic escape radius of 2, squared.
pub const DEFAULT_ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Which quadratic iteration each pixel runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EscapeFormula {
    /// The pixel is the starting `z`; `c` is the description's Julia
    /// constant, the same for every pixel.
    Julia,
    /// The pixel is `c`; every orbit starts at zero.  This draws the
    /// Mandelbrot set and ignores the description's constant.
    Mandelbrot,
}

impl Default for EscapeFormula {
    fn default() -> EscapeFormula {
        EscapeFormula::Julia
    }
}

impl FromStr for EscapeFormula {
    type Err = String;

    fn from_str(s: &str) -> Result<EscapeFormula, String> {
        match s {
            "julia" => Ok(EscapeFormula::Julia),
            "mandelbrot" => Ok(EscapeFormula::Mandelbrot),
            _ => Err(format!("unknown formula '{}'; expected julia or mandelbrot", s)),
        }
    }
}

/// Iterate `z ↦ z² + c` from `z` until `|z|² ≥ escape_radius_squared`
/// or `max_iterations` is reached.  Returns the iteration count and
/// the last `z`.
pub fn escape(
    z: Complex<f64>,
    c: Complex<f64>,
    max_iterations: u32,
    escape_radius_squared: f64,
) -> (u32, Complex<f64>) {
    let (mut zx, mut zy) = (z.re, z.im);
    let mut iteration = 0;
    while zx * zx + zy * zy < escape_radius_squared && iteration < max_iterations {
        let next = zx * zx - zy * zy + c.re;
        zy = 2.0 * zx * zy + c.im;
        zx = next;
        iteration += 1;
    }
    (iteration, Complex::new(zx, zy))
}

/// Shade an orbit.  Orbits that never escaped are 0.  Escaped ones
/// get the smoothed count `v = n + 1 - log₂(ln |z|²)`, squashed so
/// that quick escapes are bright and slow ones fade towards 0.
///
/// When `|z|²` at escape is at most 1 the double logarithm does not
/// exist, and when it is large `v` goes negative; both are treated as
/// `v = 0`, the brightest shade.
pub fn escape_value(iteration: u32, z: Complex<f64>, max_iterations: u32) -> u32 {
    if iteration >= max_iterations {
        return 0;
    }
    let m = f64::from(max_iterations);
    let abs_z2 = z.re * z.re + z.im * z.im;
    let v = f64::from(iteration) + 1.0 - abs_z2.ln().ln() / 2.0_f64.ln();
    let v = if v.is_finite() && v > 0.0 { v } else { 0.0 };
    let scaled = m - m * (v / m).powf(0.2);
    let value = (scaled / m * f64::from(MAX_INTENSITY)).round();
    clamp(value, 0.0, f64::from(MAX_INTENSITY)) as u32
}

fn julia_constant(description: &FractalDescription) -> Result<Complex<f64>, FractalError> {
    match description.transforms()[0] {
        Transform::Julia { c, .. } => Ok(c),
        Transform::Affine { .. } => Err(FractalError::KindMismatch {
            expected: TransformKind::Julia,
            found: TransformKind::Affine,
        }),
    }
}

/// Renders a Julia description pixel by pixel.  Has its own zoom and
/// offset, independent of the description's box.
#[derive(Debug)]
pub struct EscapeTimeEngine {
    description: FractalDescription,
    grid: PixelGrid,
    c: Complex<f64>,
    max_iterations: u32,
    escape_radius_squared: f64,
    formula: EscapeFormula,
    viewport: EscapeViewport,
    notifier: ChangeNotifier,
}

impl EscapeTimeEngine {
    /// Requires a Julia description, a grid size, an iteration limit,
    /// and the square of the escape radius.  Nothing is rendered until
    /// `render` (or any view change) is called.
    pub fn new(
        description: FractalDescription,
        width: usize,
        height: usize,
        max_iterations: u32,
        escape_radius_squared: f64,
    ) -> Result<Self, FractalError> {
        if max_iterations == 0 {
            return Err(FractalError::InvalidIterations);
        }
        if !(escape_radius_squared > 0.0 && escape_radius_squared.is_finite()) {
            return Err(FractalError::InvalidEscapeRadius(escape_radius_squared));
        }
        let c = julia_constant(&description)?;
        let grid = PixelGrid::new(width, height, description.bounds())?;
        Ok(EscapeTimeEngine {
            description,
            grid,
            c,
            max_iterations,
            escape_radius_squared,
            formula: EscapeFormula::default(),
            viewport: EscapeViewport::default(),
            notifier: ChangeNotifier::new(),
        })
    }

    /// Pick the iteration; the default is `EscapeFormula::Julia`.
    pub fn with_formula(mut self, formula: EscapeFormula) -> Self {
        self.formula = formula;
        self
    }

    /// The description being drawn.
    pub fn description(&self) -> &FractalDescription {
        &self.description
    }

    /// The canvas.
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// The Julia constant in use.
    pub fn constant(&self) -> Complex<f64> {
        self.c
    }

    /// The iteration in use.
    pub fn formula(&self) -> EscapeFormula {
        self.formula
    }

    /// The current zoom and offset.
    pub fn viewport(&self) -> EscapeViewport {
        self.viewport
    }

    /// The iteration limit.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// The point of the complex plane a pixel stands for.
    pub fn pixel_to_plane(&self, pixel: Pixel) -> Complex<f64> {
        let w = self.grid.width();
        let h = self.grid.height();
        let width = w as f64;
        let x = (pixel.0 as f64) - ((w / 2) as f64);
        let y = (pixel.1 as f64) - ((h / 2) as f64);
        Complex::new(
            self.viewport.x_offset + self.viewport.zoom * x * 4.0 / width,
            self.viewport.y_offset + self.viewport.zoom * y * 4.0 / width,
        )
    }

    /// The shade of one pixel under the current view.
    pub fn pixel_value(&self, pixel: Pixel) -> u32 {
        let point = self.pixel_to_plane(pixel);
        let (z, c) = match self.formula {
            EscapeFormula::Julia => (point, self.c),
            EscapeFormula::Mandelbrot => (Complex::new(0.0, 0.0), point),
        };
        let (iteration, z) = escape(z, c, self.max_iterations, self.escape_radius_squared);
        escape_value(iteration, z, self.max_iterations)
    }

    /// Recompute every pixel, then tell the listeners.
    pub fn render(&mut self) {
        let (width, height) = (self.grid.width(), self.grid.height());
        for (row, col) in iproduct!(0..height, 0..width) {
            let pixel = Pixel(col, row);
            let value = self.pixel_value(pixel);
            self.grid.set_direct(pixel, value);
        }
        debug!(
            "rendered {}x{} at zoom {} offset ({}, {})",
            width, height, self.viewport.zoom, self.viewport.x_offset, self.viewport.y_offset
        );
        self.notifier.canvas_changed(&self.grid);
    }

    /// Zoom the engine's own view and re-render.  Positive multipliers
    /// widen the view; -1 or less is refused without a render.
    pub fn zoom(&mut self, multiplier: f64) -> Result<(), FractalError> {
        self.viewport.change_zoom(multiplier)?;
        self.render();
        Ok(())
    }

    /// Pan the engine's own view and re-render.
    pub fn pan(&mut self, vector: Point) {
        self.viewport.pan(vector);
        self.render();
    }

    /// A new grid size, re-rendered.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), FractalError> {
        self.grid = self.grid.resized(width, height)?;
        self.render();
        Ok(())
    }

    /// A new iteration limit, re-rendered.
    pub fn set_max_iterations(&mut self, max_iterations: u32) -> Result<(), FractalError> {
        if max_iterations == 0 {
            return Err(FractalError::InvalidIterations);
        }
        self.max_iterations = max_iterations;
        self.render();
        Ok(())
    }

    /// Draw another Julia description, keeping the current view.
    pub fn set_description(&mut self, description: FractalDescription) -> Result<(), FractalError> {
        let c = julia_constant(&description)?;
        self.grid = PixelGrid::new(self.grid.width(), self.grid.height(), description.bounds())?;
        self.description = description;
        self.c = c;
        self.notifier.description_changed(&self.description);
        self.render();
        Ok(())
    }

    /// Start hearing about changes.
    pub fn subscribe(&mut self, listener: Box<dyn ChangeListener>) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    /// Stop hearing about changes.
    pub fn unsubscribe(&mut self, id: ListenerId) -> Option<Box<dyn ChangeListener>> {
        self.notifier.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::testing::{Event, Recorder};
    use std::cell::RefCell;
    use std::rc::Rc;
    use viewport::Bounds;

    fn julia(re: f64, im: f64) -> FractalDescription {
        let bounds = Bounds::new(Point::new(-2.0, -2.0), Point::new(2.0, 2.0)).unwrap();
        FractalDescription::new(bounds, Transform::julia_pair(Complex::new(re, im)).to_vec())
            .unwrap()
    }

    fn affine() -> FractalDescription {
        let bounds = Bounds::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).unwrap();
        FractalDescription::new(bounds, vec![Transform::affine(0.5, 0.0, 0.0, 0.5, 0.0, 0.0)])
            .unwrap()
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            EscapeTimeEngine::new(julia(0.0, 0.0), 4, 4, 0, 4.0).err(),
            Some(FractalError::InvalidIterations)
        );
        assert_eq!(
            EscapeTimeEngine::new(julia(0.0, 0.0), 4, 4, 10, 0.0).err(),
            Some(FractalError::InvalidEscapeRadius(0.0))
        );
        assert!(EscapeTimeEngine::new(julia(0.0, 0.0), 4, 4, 10, -1.0).is_err());
        assert!(EscapeTimeEngine::new(julia(0.0, 0.0), 4, 4, 10, ::std::f64::NAN).is_err());
        assert_eq!(
            EscapeTimeEngine::new(julia(0.0, 0.0), 0, 4, 10, 4.0).err(),
            Some(FractalError::InvalidDimensions(0, 4))
        );
    }

    #[test]
    fn rejects_affine_descriptions() {
        assert_eq!(
            EscapeTimeEngine::new(affine(), 4, 4, 10, 4.0).err(),
            Some(FractalError::KindMismatch {
                expected: TransformKind::Julia,
                found: TransformKind::Affine
            })
        );
    }

    #[test]
    fn captive_orbits_are_background() {
        let mut engine = EscapeTimeEngine::new(julia(0.0, 0.0), 4, 4, 100, 4.0).unwrap();
        engine.render();
        assert_eq!(engine.pixel_to_plane(Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(engine.grid().get_direct(Pixel(2, 2)), Ok(0));
    }

    #[test]
    fn immediate_escape_uses_the_smoothing_formula() {
        let mut engine = EscapeTimeEngine::new(julia(0.0, 0.0), 8, 8, 100, 4.0).unwrap();
        engine.render();
        assert_eq!(engine.pixel_to_plane(Pixel(0, 4)), Complex::new(-2.0, 0.0));

        let v = 1.0 - 4.0_f64.ln().ln() / 2.0_f64.ln();
        let scaled = 100.0 - 100.0 * (v / 100.0).powf(0.2);
        let expected = (scaled / 100.0 * 755.0).round() as u32;
        assert!(expected > 0);
        assert_eq!(engine.grid().get_direct(Pixel(0, 4)), Ok(expected));
    }

    #[test]
    fn escape_counts_iterations() {
        let (n, z) = escape(Complex::new(3.0, 0.0), Complex::new(0.0, 0.0), 10, 4.0);
        assert_eq!((n, z), (0, Complex::new(3.0, 0.0)));
        let (n, z) = escape(Complex::new(1.5, 0.0), Complex::new(0.0, 0.0), 10, 4.0);
        assert_eq!((n, z), (1, Complex::new(2.25, 0.0)));
        let (n, _) = escape(Complex::new(0.5, 0.0), Complex::new(0.0, 0.0), 10, 4.0);
        assert_eq!(n, 10);
    }

    #[test]
    fn slower_escapes_are_darker() {
        let z = Complex::new(2.5, 0.0);
        let fast = escape_value(1, z, 50);
        let slow = escape_value(20, z, 50);
        assert!(fast > slow);
        assert_eq!(escape_value(50, z, 50), 0);
    }

    #[test]
    fn undefined_smoothing_is_brightest() {
        assert_eq!(escape_value(0, Complex::new(0.5, 0.0), 100), MAX_INTENSITY);
        assert_eq!(escape_value(0, Complex::new(100.0, 0.0), 100), MAX_INTENSITY);
    }

    #[test]
    fn both_axes_scale_by_width() {
        let engine = EscapeTimeEngine::new(julia(0.0, 0.0), 4, 8, 10, 4.0).unwrap();
        assert_eq!(engine.pixel_to_plane(Pixel(0, 0)), Complex::new(-2.0, -4.0));
        assert_eq!(engine.pixel_to_plane(Pixel(3, 7)), Complex::new(1.0, 3.0));
    }

    #[test]
    fn zoom_and_pan_move_the_view() {
        let mut engine = EscapeTimeEngine::new(julia(-0.4, 0.6), 8, 8, 50, 4.0).unwrap();
        engine.zoom(-0.5).unwrap();
        assert_eq!(engine.viewport().zoom, 0.5);
        assert_eq!(engine.pixel_to_plane(Pixel(0, 0)), Complex::new(-1.0, -1.0));
        engine.pan(Point::new(10.0, 10.0));
        assert_eq!(engine.viewport().x_offset, -0.5);
        assert_eq!(engine.viewport().y_offset, 0.5);
        assert_eq!(engine.pixel_to_plane(Pixel(4, 4)), Complex::new(-0.5, 0.5));
    }

    #[test]
    fn every_view_change_re_renders_once() {
        let log = Rc::new(RefCell::new(vec![]));
        let mut engine = EscapeTimeEngine::new(julia(-0.4, 0.6), 8, 8, 50, 4.0).unwrap();
        engine.subscribe(Recorder::new("ui", &log));
        engine.zoom(0.5).unwrap();
        engine.pan(Point::new(1.0, 0.0));
        engine.resize(4, 4).unwrap();
        engine.set_max_iterations(20).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![Event::Canvas(64), Event::Canvas(64), Event::Canvas(16), Event::Canvas(16)]
        );
    }

    #[test]
    fn zooming_through_zero_leaves_the_view_alone() {
        let log = Rc::new(RefCell::new(vec![]));
        let mut engine = EscapeTimeEngine::new(julia(-0.4, 0.6), 8, 8, 50, 4.0).unwrap();
        engine.subscribe(Recorder::new("ui", &log));
        assert_eq!(engine.zoom(-1.0), Err(FractalError::InvalidZoom(-1.0)));
        assert!(engine.zoom(-2.5).is_err());
        assert_eq!(engine.viewport(), EscapeViewport::default());
        assert!(log.borrow().is_empty());
        engine.pan(Point::new(10.0, 0.0));
        assert_eq!(engine.viewport().x_offset, -1.0);
    }

    #[test]
    fn set_description_swaps_the_constant() {
        let log = Rc::new(RefCell::new(vec![]));
        let mut engine = EscapeTimeEngine::new(julia(0.0, 0.0), 4, 4, 50, 4.0).unwrap();
        engine.subscribe(Recorder::new("ui", &log));
        engine.set_description(julia(0.285, 0.01)).unwrap();
        assert_eq!(engine.constant(), Complex::new(0.285, 0.01));
        assert_eq!(
            *log.borrow(),
            vec![Event::Description("ui".to_string()), Event::Canvas(16)]
        );
        assert!(engine.set_description(affine()).is_err());
        assert_eq!(engine.constant(), Complex::new(0.285, 0.01));
    }

    #[test]
    fn mandelbrot_formula_draws_the_mandelbrot_set() {
        let mut engine = EscapeTimeEngine::new(julia(0.285, 0.01), 8, 8, 100, 4.0)
            .unwrap()
            .with_formula(EscapeFormula::Mandelbrot);
        engine.render();
        // c = 0 is in the set, c = -2 - 2i is far outside it.
        assert_eq!(engine.grid().get_direct(Pixel(4, 4)), Ok(0));
        assert!(engine.grid().get_direct(Pixel(0, 0)).unwrap() > 0);
    }
}
