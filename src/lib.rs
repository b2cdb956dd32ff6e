#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Chaos game and escape-time fractal renderer
//!
//! An iterated function system is a handful of maps of the plane,
//! each pulling points a little closer together.  Pick one of the maps
//! at random, move a point through it, and do that over and over: the
//! point falls onto the system's attractor, a self-similar shape like
//! Sierpinski's triangle or Barnsley's fern, and then hops all over
//! it.  Mark every pixel the point lands on and the attractor appears.
//! That is the chaos game, and `ChaosWalkEngine` plays it.
//!
//! The two branches of the square root that undoes `z ↦ z² + c` are
//! such a system too, and their attractor is the Julia set of `c`.
//! Julia sets can also be drawn the other way round, pixel by pixel,
//! by counting how quickly each point runs off to infinity under
//! `z ↦ z² + c`; `EscapeTimeEngine` does that.
//!
//! A `FractalDescription` says what to draw: the maps, their weights,
//! and the box of the plane to look at.  The engines paint into a
//! `PixelGrid`, which anything can read back to make an image.

#[macro_use]
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate rand;

#[cfg(test)]
extern crate tempfile;

pub mod chaos;
pub mod description;
pub mod error;
pub mod escape;
pub mod grid;
pub mod notify;
pub mod point;
pub mod renderer;
pub mod serial;
pub mod transform;
pub mod viewport;

pub use chaos::ChaosWalkEngine;
pub use description::FractalDescription;
pub use error::{FractalError, ParseError};
pub use escape::{EscapeFormula, EscapeTimeEngine};
pub use grid::{Pixel, PixelGrid, MAX_INTENSITY};
pub use notify::{ChangeListener, ChangeNotifier, ListenerId};
pub use point::{Matrix2x2, Point};
pub use renderer::{Mode, RenderSettings, Renderer};
pub use transform::{Sign, Transform, TransformKind};
pub use viewport::{Bounds, EscapeViewport};
