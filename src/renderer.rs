// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Picks an engine for a description and forwards the operations both
//! engines share, so a front end does not have to care which one it
//! is driving.

use chaos::ChaosWalkEngine;
use description::FractalDescription;
use error::FractalError;
use escape::{EscapeFormula, EscapeTimeEngine, DEFAULT_ESCAPE_RADIUS_SQUARED, DEFAULT_MAX_ITERATIONS};
use grid::PixelGrid;
use notify::{ChangeListener, ListenerId};
use point::Point;
use std::str::FromStr;
use transform::TransformKind;

/// How to draw a description.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Affine descriptions walk, Julia descriptions render per pixel.
    Auto,
    /// Always play the chaos game.  Works for both kinds.
    Walk,
    /// Always render per pixel.  Julia descriptions only.
    EscapeTime,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Mode, String> {
        match s {
            "auto" => Ok(Mode::Auto),
            "walk" => Ok(Mode::Walk),
            "escape" => Ok(Mode::EscapeTime),
            _ => Err(format!("unknown mode '{}'; expected auto, walk or escape", s)),
        }
    }
}

/// The knobs a front end turns.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderSettings {
    /// Grid width in pixels.
    pub width: usize,
    /// Grid height in pixels.
    pub height: usize,
    /// Engine selection.
    pub mode: Mode,
    /// Escape-time iteration.
    pub formula: EscapeFormula,
    /// Escape-time iteration limit.
    pub max_iterations: u32,
    /// Escape-time radius, squared.
    pub escape_radius_squared: f64,
    /// Seed for the chaos game; entropy if absent.
    pub seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> RenderSettings {
        RenderSettings {
            width: 800,
            height: 600,
            mode: Mode::Auto,
            formula: EscapeFormula::Julia,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            escape_radius_squared: DEFAULT_ESCAPE_RADIUS_SQUARED,
            seed: None,
        }
    }
}

/// One of the two engines.
#[derive(Debug)]
pub enum Renderer {
    /// The chaos game.
    Walk(ChaosWalkEngine),
    /// Per-pixel escape time.
    EscapeTime(EscapeTimeEngine),
}

impl Renderer {
    /// Build the engine the settings and the description's kind call
    /// for.
    pub fn new(description: FractalDescription, settings: &RenderSettings) -> Result<Self, FractalError> {
        let escape_time = match (settings.mode, description.kind()) {
            (Mode::Walk, _) => false,
            (Mode::Auto, kind) => kind == TransformKind::Julia,
            (Mode::EscapeTime, TransformKind::Julia) => true,
            (Mode::EscapeTime, found) => {
                return Err(FractalError::KindMismatch {
                    expected: TransformKind::Julia,
                    found,
                })
            }
        };

        if escape_time {
            let engine = EscapeTimeEngine::new(
                description,
                settings.width,
                settings.height,
                settings.max_iterations,
                settings.escape_radius_squared,
            )?
            .with_formula(settings.formula);
            return Ok(Renderer::EscapeTime(engine));
        }

        let engine = match settings.seed {
            Some(seed) => ChaosWalkEngine::with_seed(description, settings.width, settings.height, seed)?,
            None => ChaosWalkEngine::new(description, settings.width, settings.height)?,
        };
        Ok(Renderer::Walk(engine))
    }

    /// Walk `steps` steps, or re-render every pixel; escape-time
    /// rendering ignores the step count.
    pub fn render(&mut self, steps: usize) -> Result<(), FractalError> {
        match *self {
            Renderer::Walk(ref mut engine) => engine.run(steps),
            Renderer::EscapeTime(ref mut engine) => {
                engine.render();
                Ok(())
            }
        }
    }

    /// Zoom whichever view the engine keeps.
    pub fn zoom(&mut self, multiplier: f64) -> Result<(), FractalError> {
        match *self {
            Renderer::Walk(ref mut engine) => engine.zoom(multiplier),
            Renderer::EscapeTime(ref mut engine) => engine.zoom(multiplier),
        }
    }

    /// Pan whichever view the engine keeps.
    pub fn pan(&mut self, vector: Point) -> Result<(), FractalError> {
        match *self {
            Renderer::Walk(ref mut engine) => engine.pan(vector),
            Renderer::EscapeTime(ref mut engine) => {
                engine.pan(vector);
                Ok(())
            }
        }
    }

    /// A new grid size.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), FractalError> {
        match *self {
            Renderer::Walk(ref mut engine) => engine.resize(width, height),
            Renderer::EscapeTime(ref mut engine) => engine.resize(width, height),
        }
    }

    /// Swap the description.  An escape-time engine only takes Julia
    /// descriptions.
    pub fn set_description(&mut self, description: FractalDescription) -> Result<(), FractalError> {
        match *self {
            Renderer::Walk(ref mut engine) => engine.set_description(description),
            Renderer::EscapeTime(ref mut engine) => engine.set_description(description),
        }
    }

    /// The canvas.
    pub fn grid(&self) -> &PixelGrid {
        match *self {
            Renderer::Walk(ref engine) => engine.grid(),
            Renderer::EscapeTime(ref engine) => engine.grid(),
        }
    }

    /// The description being drawn.
    pub fn description(&self) -> &FractalDescription {
        match *self {
            Renderer::Walk(ref engine) => engine.description(),
            Renderer::EscapeTime(ref engine) => engine.description(),
        }
    }

    /// Start hearing about changes.
    pub fn subscribe(&mut self, listener: Box<dyn ChangeListener>) -> ListenerId {
        match *self {
            Renderer::Walk(ref mut engine) => engine.subscribe(listener),
            Renderer::EscapeTime(ref mut engine) => engine.subscribe(listener),
        }
    }

    /// Stop hearing about changes.
    pub fn unsubscribe(&mut self, id: ListenerId) -> Option<Box<dyn ChangeListener>> {
        match *self {
            Renderer::Walk(ref mut engine) => engine.unsubscribe(id),
            Renderer::EscapeTime(ref mut engine) => engine.unsubscribe(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial;

    const FERN: &str = "Affine\n-3,0\n3,10\n0,0,0,0.16,0,0\n0.85,0.04,-0.04,0.85,0,1.6\n0.2,-0.26,0.23,0.22,0,1.6\n-0.15,0.28,0.26,0.24,0,0.44\n";
    const JULIA: &str = "Julia\n-2,-2\n2,2\n-0.4,0.6\n";

    fn small() -> RenderSettings {
        RenderSettings {
            width: 32,
            height: 32,
            seed: Some(9),
            max_iterations: 50,
            ..RenderSettings::default()
        }
    }

    #[test]
    fn auto_mode_picks_by_kind() {
        let fern = Renderer::new(serial::parse(FERN).unwrap(), &small()).unwrap();
        assert!(match fern {
            Renderer::Walk(_) => true,
            _ => false,
        });
        let julia = Renderer::new(serial::parse(JULIA).unwrap(), &small()).unwrap();
        assert!(match julia {
            Renderer::EscapeTime(_) => true,
            _ => false,
        });
    }

    #[test]
    fn julia_descriptions_can_walk() {
        let settings = RenderSettings {
            mode: Mode::Walk,
            ..small()
        };
        let mut renderer = Renderer::new(serial::parse(JULIA).unwrap(), &settings).unwrap();
        renderer.render(2_000).unwrap();
        assert!(renderer.grid().max_value() > 0);
    }

    #[test]
    fn affine_descriptions_cannot_escape() {
        let settings = RenderSettings {
            mode: Mode::EscapeTime,
            ..small()
        };
        match Renderer::new(serial::parse(FERN).unwrap(), &settings) {
            Err(FractalError::KindMismatch { found: TransformKind::Affine, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn fern_walk_paints() {
        let mut renderer = Renderer::new(serial::parse(FERN).unwrap(), &small()).unwrap();
        renderer.render(5_000).unwrap();
        assert!(renderer.grid().max_value() > 0);
        renderer.zoom(-0.5).unwrap();
        assert_eq!(renderer.grid().max_value(), 0);
        assert_eq!(renderer.description().min_coords(), Point::new(-1.5, 2.5));
    }

    #[test]
    fn escape_render_paints() {
        let mut renderer = Renderer::new(serial::parse(JULIA).unwrap(), &small()).unwrap();
        renderer.render(0).unwrap();
        assert!(renderer.grid().max_value() > 0);
        renderer.resize(10, 12).unwrap();
        assert_eq!(renderer.grid().len(), 120);
    }

    #[test]
    fn modes_and_formulas_parse() {
        assert_eq!("escape".parse::<Mode>(), Ok(Mode::EscapeTime));
        assert!("sideways".parse::<Mode>().is_err());
        assert_eq!("mandelbrot".parse::<EscapeFormula>(), Ok(EscapeFormula::Mandelbrot));
    }
}
