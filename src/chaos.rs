// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The chaos game.
//!
//! Start anywhere (we start at the origin), pick one of the
//! description's maps at random in proportion to its weight, move the
//! point through it, and mark where it lands.  Repeat a few million
//! times.  Because every map pulls points towards the attractor, the
//! walk falls onto it almost at once and then wanders all over it, so
//! the marks paint the attractor: Sierpinski's triangle, Barnsley's
//! fern, or, with the two inverse Julia branches, a Julia set.
//!
//! Each visit brightens its pixel by a stroke that grows as the view
//! zooms in, since a zoomed-in view sees fewer visits per pixel.

use description::FractalDescription;
use error::FractalError;
use grid::PixelGrid;
use notify::{ChangeListener, ChangeNotifier, ListenerId};
use point::Point;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The brightest single stroke a visit can leave.
pub const MAX_STROKE: f64 = 255.0;

/// Runs the chaos game for one description onto one grid.
#[derive(Debug)]
pub struct ChaosWalkEngine {
    description: FractalDescription,
    grid: PixelGrid,
    current: Point,
    zoom: f64,
    rng: StdRng,
    notifier: ChangeNotifier,
}

impl ChaosWalkEngine {
    /// A walker with an entropy-seeded random source, painting onto a
    /// `width`×`height` grid showing the description's box.
    pub fn new(
        description: FractalDescription,
        width: usize,
        height: usize,
    ) -> Result<Self, FractalError> {
        ChaosWalkEngine::with_rng(description, width, height, StdRng::from_entropy())
    }

    /// A walker whose every run is reproducible.
    pub fn with_seed(
        description: FractalDescription,
        width: usize,
        height: usize,
        seed: u64,
    ) -> Result<Self, FractalError> {
        ChaosWalkEngine::with_rng(description, width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        description: FractalDescription,
        width: usize,
        height: usize,
        rng: StdRng,
    ) -> Result<Self, FractalError> {
        let grid = PixelGrid::new(width, height, description.bounds())?;
        Ok(ChaosWalkEngine {
            description,
            grid,
            current: Point::origin(),
            zoom: 1.0,
            rng,
            notifier: ChangeNotifier::new(),
        })
    }

    /// The description being drawn.
    pub fn description(&self) -> &FractalDescription {
        &self.description
    }

    /// The canvas.
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Where the walk currently stands.
    pub fn current_point(&self) -> Point {
        self.current
    }

    /// The cumulative zoom factor; below 1 is zoomed in.
    pub fn zoom_level(&self) -> f64 {
        self.zoom
    }

    /// How much one visit adds to a pixel at the current zoom.
    pub fn stroke(&self) -> u32 {
        (10.0 / self.zoom + 1.0).min(MAX_STROKE) as u32
    }

    /// Take `steps` steps of the walk, then tell the listeners once.
    /// A description whose weights cannot be drawn from fails the
    /// whole run.
    pub fn run(&mut self, steps: usize) -> Result<(), FractalError> {
        let weight_sum = self.description.weight_sum();
        if weight_sum == 0 {
            return Err(FractalError::InvalidDescription(
                "transform weights sum to zero".to_string(),
            ));
        }

        let draws = Uniform::new(0, weight_sum);
        let amount = self.stroke();
        for _ in 0..steps {
            let index = draws.sample(&mut self.rng);
            let transform = self
                .description
                .transform_for_draw(index)
                .map_err(|e| FractalError::InvalidDescription(e.to_string()))?;
            self.current = transform.apply(self.current);
            self.grid.accumulate(self.current, amount);
        }

        debug!(
            "walked {} steps with stroke {}, now at ({}, {})",
            steps, amount, self.current.x, self.current.y
        );
        self.notifier.canvas_changed(&self.grid);
        Ok(())
    }

    /// Grow (positive) or shrink (negative) the description's box about
    /// its center.  The canvas is rebuilt for the new box and starts
    /// over empty.
    pub fn zoom(&mut self, multiplier: f64) -> Result<(), FractalError> {
        self.description.change_zoom(multiplier)?;
        self.zoom += self.zoom * multiplier;
        let (width, height) = (self.grid.width(), self.grid.height());
        self.rebuild(width, height)?;
        self.description_changed();
        Ok(())
    }

    /// Slide the description's box by a vector in percent of its span.
    /// The canvas starts over empty.
    pub fn pan(&mut self, vector: Point) -> Result<(), FractalError> {
        self.description.pan(vector)?;
        let (width, height) = (self.grid.width(), self.grid.height());
        self.rebuild(width, height)?;
        self.description_changed();
        Ok(())
    }

    /// A new, empty canvas of a different size over the same box.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), FractalError> {
        self.rebuild(width, height)?;
        self.notifier.canvas_changed(&self.grid);
        Ok(())
    }

    /// Draw something else.  The walk goes back to the origin, the
    /// zoom back to 1, and the canvas is rebuilt over the new box.
    pub fn set_description(&mut self, description: FractalDescription) -> Result<(), FractalError> {
        let grid = PixelGrid::new(self.grid.width(), self.grid.height(), description.bounds())?;
        self.description = description;
        self.grid = grid;
        self.current = Point::origin();
        self.zoom = 1.0;
        self.description_changed();
        Ok(())
    }

    /// Reweight one transform.  The canvas keeps what it has.
    pub fn set_weight(&mut self, index: usize, weight: u32) -> Result<(), FractalError> {
        self.description.set_weight(index, weight)?;
        self.notifier.description_changed(&self.description);
        Ok(())
    }

    /// Wipe the canvas.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.notifier.canvas_changed(&self.grid);
    }

    /// Start hearing about changes.
    pub fn subscribe(&mut self, listener: Box<dyn ChangeListener>) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    /// Stop hearing about changes.
    pub fn unsubscribe(&mut self, id: ListenerId) -> Option<Box<dyn ChangeListener>> {
        self.notifier.unsubscribe(id)
    }

    fn rebuild(&mut self, width: usize, height: usize) -> Result<(), FractalError> {
        self.grid = PixelGrid::new(width, height, self.description.bounds())?;
        Ok(())
    }

    fn description_changed(&mut self) {
        self.notifier.description_changed(&self.description);
        self.notifier.canvas_changed(&self.grid);
    }
}
