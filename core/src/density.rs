use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::error::{GenError, Result};
use crate::grid::Grid;
use crate::heightmap::HeightField;
use crate::rng::{LegacyRandom, RandomStream};

// `true` where a population unit may be placed; index-aligned with the HeightField
pub type DensityMask = Grid<bool>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityConfig {
    pub max_density: i32,
    // Occupancy probability of a cell at height 1.0.
    // Kept as f32 and widened at the comparison so draws stay bit-compatible.
    pub chance: f32,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            max_density: 64,
            chance: 0.1,
        }
    }
}

impl DensityConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_density <= 0 {
            return Err(GenError::InvalidConfiguration(format!(
                "max_density must be positive, got {}",
                self.max_density
            )));
        }
        if !(0.0..=1.0).contains(&self.chance) {
            return Err(GenError::InvalidConfiguration(format!(
                "density chance {} is outside [0, 1]",
                self.chance
            )));
        }
        Ok(())
    }
}

pub struct DensityGenerator {
    config: DensityConfig,
}

impl DensityGenerator {
    pub fn new(config: DensityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    // One draw per cell in row-major order.
    // A cell at height h is occupied with probability h * chance.
    pub fn generate_with(&self, rng: &mut dyn RandomStream, heights: &HeightField) -> DensityMask {
        let max_density = f64::from(self.config.max_density);
        let chance = f64::from(self.config.chance);

        let mask = heights.map(|&h| {
            let d = h * max_density;
            let c = rng.next_f64() * max_density;
            c < d * chance
        });

        let occupied = mask.iter().filter(|&&b| b).count();
        info!(occupied, total = mask.len(), "density mask generated");
        mask
    }
}

// One-shot density generation with a fresh stream seeded from `seed`
pub fn generate_density(
    heights: &HeightField,
    seed: i32,
    config: &DensityConfig,
) -> Result<DensityMask> {
    let generator = DensityGenerator::new(config.clone())?;
    let _span = info_span!("density", seed).entered();
    Ok(generator.generate_with(&mut LegacyRandom::new(seed), heights))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(width: usize, height: usize, value: f64) -> HeightField {
        Grid::filled(width, height, value).unwrap()
    }

    #[test]
    fn density_is_index_aligned() {
        let heights = flat(17, 9, 0.5);
        let mask = generate_density(&heights, 3, &DensityConfig::default()).unwrap();
        assert_eq!((mask.width(), mask.height()), (17, 9));
    }

    #[test]
    fn void_cells_are_never_occupied() {
        let heights = flat(64, 64, 0.0);
        let mask = generate_density(&heights, 11, &DensityConfig::default()).unwrap();
        assert!(mask.iter().all(|&b| !b));
    }

    #[test]
    fn full_height_occupancy_is_bounded_by_chance() {
        let heights = flat(200, 200, 1.0);
        let mask = generate_density(&heights, 42, &DensityConfig::default()).unwrap();
        let ratio = mask.iter().filter(|&&b| b).count() as f64 / mask.len() as f64;
        assert!((ratio - 0.1).abs() < 0.01, "ratio {ratio}");
    }

    #[test]
    fn density_grows_with_height() {
        // Same seed, same draws: only the heights differ
        let cfg = DensityConfig::default();
        let mut low_total = 0;
        let mut high_total = 0;
        for seed in 0..50 {
            let low = generate_density(&flat(64, 64, 0.3), seed, &cfg).unwrap();
            let high = generate_density(&flat(64, 64, 0.8), seed, &cfg).unwrap();
            for (l, h) in low.iter().zip(high.iter()) {
                // With identical draws a higher cell is occupied whenever a lower one is
                assert!(!*l || *h);
            }
            low_total += low.iter().filter(|&&b| b).count();
            high_total += high.iter().filter(|&&b| b).count();
        }
        assert!(high_total > low_total);
    }

    #[test]
    fn density_determinism() {
        let heights = flat(32, 32, 0.7);
        let cfg = DensityConfig::default();
        assert_eq!(
            generate_density(&heights, 8, &cfg).unwrap(),
            generate_density(&heights, 8, &cfg).unwrap()
        );
    }

    #[test]
    fn invalid_density_config_is_rejected() {
        let heights = flat(4, 4, 1.0);
        let bad_max = DensityConfig {
            max_density: 0,
            ..DensityConfig::default()
        };
        assert!(generate_density(&heights, 1, &bad_max).is_err());
        let bad_chance = DensityConfig {
            chance: 1.5,
            ..DensityConfig::default()
        };
        assert!(generate_density(&heights, 1, &bad_chance).is_err());
    }
}
