use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::error::{GenError, Result};
use crate::grid::{Grid, validate_dimensions};
use crate::rng::{LegacyRandom, RandomStream};

// Normalized terrain elevation, row-major, every value in [0.0, 1.0]
pub type HeightField = Grid<f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub min_features: i32,
    pub max_features: i32, // inclusive
    pub min_height: f64,
    pub max_height: f64,
    pub min_radius: i32,
    pub max_radius: i32, // exclusive, unless equal to min_radius
    // Raw accumulated height below which a cell is flattened to 0.0
    pub void_level: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            min_features: 100,
            max_features: 150,
            min_height: 0.6,
            max_height: 1.0,
            min_radius: 64,
            max_radius: 90,
            void_level: 2.75,
        }
    }
}

impl TerrainConfig {
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(GenError::InvalidConfiguration(msg));

        if self.min_features < 0 || self.min_features > self.max_features {
            return invalid(format!(
                "feature count range {}..={} is empty or negative",
                self.min_features, self.max_features
            ));
        }
        // The inclusive upper bound is drawn as an exclusive max + 1
        if self.max_features == i32::MAX {
            return invalid("max_features must be below i32::MAX".into());
        }
        if !self.min_height.is_finite()
            || !self.max_height.is_finite()
            || self.min_height > self.max_height
        {
            return invalid(format!(
                "height range {}..{} is not a finite ascending pair",
                self.min_height, self.max_height
            ));
        }
        // Cones summed over one cell, and the spread between the extremes, must stay finite
        let magnitude = self.min_height.abs().max(self.max_height.abs());
        let worst_sum = magnitude * f64::from(self.max_features.max(1));
        if !(self.max_height - self.min_height).is_finite() || !(2.0 * worst_sum).is_finite() {
            return invalid(format!(
                "height range {}..{} over {} features overflows",
                self.min_height, self.max_height, self.max_features
            ));
        }
        if self.min_radius < 0 || self.min_radius > self.max_radius {
            return invalid(format!(
                "radius range {}..{} is empty or negative",
                self.min_radius, self.max_radius
            ));
        }
        if self.void_level.is_nan() {
            return invalid("void_level is NaN".into());
        }
        Ok(())
    }
}

// A radial bump: a cone of height `peak` falling to zero at `radius`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feature {
    pub center_x: i32,
    pub center_y: i32,
    pub peak: f64,
    pub radius: i32,
}

impl Feature {
    // Add this cone to the raw accumulator. Overlapping features sum, nothing is clamped.
    // The loop covers [c - r, c + r) on both axes, clipped to the grid.
    pub fn stamp(&self, acc: &mut Grid<f64>) {
        let (w, h) = (acc.width() as i64, acc.height() as i64);
        let (cx, cy) = (i64::from(self.center_x), i64::from(self.center_y));
        let r = i64::from(self.radius);
        let radius = f64::from(self.radius);

        for y in (cy - r).max(0)..(cy + r).min(h) {
            for x in (cx - r).max(0)..(cx + r).min(w) {
                let dx = (x - cx) as f64;
                let dy = (y - cy) as f64;
                let distance = (dx * dx + dy * dy).sqrt();
                // Linear falloff from the center, zero outside the radius
                let falloff = ((radius - distance) / radius).max(0.0);
                let i = (y * w + x) as usize;
                acc[i] += self.peak * falloff;
            }
        }
    }
}

pub struct HeightmapGenerator {
    config: TerrainConfig,
}

impl HeightmapGenerator {
    pub fn new(config: TerrainConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    // Generate with a fresh stream seeded from `seed`
    pub fn generate(&self, seed: i32, width: usize, height: usize) -> Result<HeightField> {
        let _span = info_span!("terrain", seed, width, height).entered();
        let mut rng = LegacyRandom::new(seed);
        self.generate_with(&mut rng, width, height)
    }

    // Generate by advancing a caller-owned stream
    pub fn generate_with(
        &self,
        rng: &mut dyn RandomStream,
        width: usize,
        height: usize,
    ) -> Result<HeightField> {
        let raw = self.accumulate(rng, width, height)?;
        let field = normalize(raw, self.config.void_level);
        let land = field.iter().filter(|&&v| v > 0.0).count();
        info!(land, total = field.len(), "heightmap normalized");
        Ok(field)
    }

    // Draw every feature and sum them into an un-normalized accumulator
    pub fn accumulate(
        &self,
        rng: &mut dyn RandomStream,
        width: usize,
        height: usize,
    ) -> Result<Grid<f64>> {
        let mut acc = Grid::filled(width, height, 0.0)?;
        // Each feature is stamped as soon as it is drawn
        for feature in self.features(rng, width, height) {
            feature.stamp(&mut acc);
        }
        Ok(acc)
    }

    // Draw every feature up front, in the order `accumulate` stamps them
    pub fn draw_features(
        &self,
        rng: &mut dyn RandomStream,
        width: usize,
        height: usize,
    ) -> Vec<Feature> {
        self.features(rng, width, height).collect()
    }

    // Draws the feature count, then lazily one feature per step.
    // Draw order per feature is peak, radius, center x, center y.
    fn features<'a>(
        &'a self,
        rng: &'a mut dyn RandomStream,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = Feature> + 'a {
        let c = &self.config;
        let count = rng.next_in_range(c.min_features, c.max_features + 1);
        debug!(count, "drawing terrain features");

        (0..count).map(move |_| {
            let peak = rng.next_f64() * (c.max_height - c.min_height) + c.min_height;
            let radius = rng.next_in_range(c.min_radius, c.max_radius);
            let center_x = rng.next_below(width as i32);
            let center_y = rng.next_below(height as i32);
            Feature {
                center_x,
                center_y,
                peak,
                radius,
            }
        })
    }
}

// Map raw accumulated heights into [0, 1].
// Cells below `void_level` (compared on the RAW value) become 0.0.
// min and max both start at 0, so min only moves for negative input.
// A flat field (max == min) collapses to all 0.0.
pub fn normalize(mut raw: Grid<f64>, void_level: f64) -> HeightField {
    let mut min = 0.0f64;
    let mut max = 0.0f64;
    for &v in raw.iter() {
        if v > max {
            max = v;
        }
        if v < min {
            min = v;
        }
    }

    let range = max - min;
    for v in raw.as_mut_slice() {
        *v = if *v < void_level || range == 0.0 {
            0.0
        } else {
            (*v - min) / range
        };
    }
    raw
}

// One-shot terrain generation from a seed
pub fn generate(
    seed: i32,
    width: usize,
    height: usize,
    config: &TerrainConfig,
) -> Result<HeightField> {
    validate_dimensions(width, height)?;
    HeightmapGenerator::new(config.clone())?.generate(seed, width, height)
}
