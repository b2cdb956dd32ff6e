// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The declarative side of a fractal: the box of the real plane we
//! look at, and the weighted list of maps whose attractor we draw.

use error::FractalError;
use point::Point;
use transform::{Transform, TransformKind};
use viewport::Bounds;

/// A bounding box plus an ordered, weighted list of transforms, all of
/// one kind.  Once built the list itself never changes; the weights
/// and the box can be edited in place.
#[derive(Clone, Debug, PartialEq)]
pub struct FractalDescription {
    bounds: Bounds,
    transforms: Vec<Transform>,
    weights: Vec<u32>,
    weight_sum: u32,
}

impl FractalDescription {
    /// Every transform gets weight 1.
    pub fn new(bounds: Bounds, transforms: Vec<Transform>) -> Result<Self, FractalError> {
        let weights = vec![1; transforms.len()];
        FractalDescription::with_weights(bounds, transforms, weights)
    }

    /// Transforms and weights are parallel lists and must be the same
    /// length.  The transforms must all be of the first one's kind.
    pub fn with_weights(
        bounds: Bounds,
        transforms: Vec<Transform>,
        weights: Vec<u32>,
    ) -> Result<Self, FractalError> {
        let expected = match transforms.first() {
            Some(t) => t.kind(),
            None => return Err(FractalError::EmptyTransforms),
        };
        if transforms.len() != weights.len() {
            return Err(FractalError::WeightCountMismatch {
                transforms: transforms.len(),
                weights: weights.len(),
            });
        }
        if let Some((index, found)) = transforms
            .iter()
            .map(|t| t.kind())
            .enumerate()
            .find(|&(_, kind)| kind != expected)
        {
            return Err(FractalError::MixedKinds {
                index,
                expected,
                found,
            });
        }

        let weight_sum = total(&weights)?;
        Ok(FractalDescription {
            bounds,
            transforms,
            weights,
            weight_sum,
        })
    }

    /// The box of the real plane being drawn.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Lower-left corner of the box.
    pub fn min_coords(&self) -> Point {
        self.bounds.min()
    }

    /// Upper-right corner of the box.
    pub fn max_coords(&self) -> Point {
        self.bounds.max()
    }

    /// The maps, in order.
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// The weights, parallel to `transforms()`.
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Total of all weights; draws are taken from `[0, weight_sum)`.
    pub fn weight_sum(&self) -> u32 {
        self.weight_sum
    }

    /// Affine or Julia, as decided by the first transform.
    pub fn kind(&self) -> TransformKind {
        self.transforms[0].kind()
    }

    /// Change one transform's weight.  A weight that would overflow the
    /// total is refused and the old one kept.
    pub fn set_weight(&mut self, index: usize, weight: u32) -> Result<(), FractalError> {
        let len = self.weights.len();
        let old = match self.weights.get(index) {
            Some(&w) => w,
            None => return Err(FractalError::TransformIndexOutOfRange { index, len }),
        };
        self.weight_sum = (self.weight_sum - old)
            .checked_add(weight)
            .ok_or(FractalError::WeightSumOverflow)?;
        self.weights[index] = weight;
        Ok(())
    }

    /// Pick the transform for a draw from `[0, weight_sum)`.  Each
    /// transform owns the half-open stretch `[previous total, previous
    /// total + its weight)` of that range, in list order.
    pub fn transform_for_draw(&self, index: u32) -> Result<&Transform, FractalError> {
        let mut cumulative = 0;
        for (transform, &weight) in self.transforms.iter().zip(self.weights.iter()) {
            cumulative += weight;
            if index < cumulative {
                return Ok(transform);
            }
        }
        Err(FractalError::DrawIndexOutOfRange {
            index,
            weight_sum: self.weight_sum,
        })
    }

    /// Grow (positive) or shrink (negative) the box about its center.
    pub fn change_zoom(&mut self, multiplier: f64) -> Result<(), FractalError> {
        self.bounds.change_zoom(multiplier)
    }

    /// Slide the box by a vector measured in percent of its span.
    pub fn pan(&mut self, vector: Point) -> Result<(), FractalError> {
        self.bounds.pan(vector)
    }
}

fn total(weights: &[u32]) -> Result<u32, FractalError> {
    weights.iter().try_fold(0u32, |sum, &w| {
        sum.checked_add(w).ok_or(FractalError::WeightSumOverflow)
    })
}
