use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::density::{DensityConfig, DensityGenerator, DensityMask};
use crate::error::Result;
use crate::grid::validate_dimensions;
use crate::heightmap::{HeightField, HeightmapGenerator, TerrainConfig};
use crate::npc::{TypeAssigner, TypeConfig, TypeMap};
use crate::rng::LegacyRandom;

// Every knob of a run, grouped per stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub terrain: TerrainConfig,
    pub density: DensityConfig,
    pub types: TypeConfig,
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        self.terrain.validate()?;
        self.density.validate()?;
        self.types.validate()
    }
}

// Coarse progress points, reported once a stage's output is complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Terrain,
    Density,
    Types,
}

impl Stage {
    pub const COUNT: usize = 3;

    // Percentage of the run finished once this stage is done
    pub fn percent(self) -> u8 {
        match self {
            Stage::Terrain => 33,
            Stage::Density => 66,
            Stage::Types => 100,
        }
    }
}

// Notified at stage boundaries only
pub trait StageObserver {
    fn stage_done(&mut self, stage: Stage);
}

// Observer for callers that do not track progress
pub struct NoProgress;

impl StageObserver for NoProgress {
    fn stage_done(&mut self, _stage: Stage) {}
}

impl<F: FnMut(Stage)> StageObserver for F {
    fn stage_done(&mut self, stage: Stage) {
        self(stage)
    }
}

// Output of a full run; each map is an independently owned buffer
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub seed: i32,
    pub heights: HeightField,
    pub density: DensityMask,
    pub types: TypeMap,
}

pub struct WorldGenerator {
    terrain: HeightmapGenerator,
    density: DensityGenerator,
    types: TypeAssigner,
}

impl WorldGenerator {
    // Validates the whole config up front
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            terrain: HeightmapGenerator::new(config.terrain)?,
            density: DensityGenerator::new(config.density)?,
            types: TypeAssigner::new(config.types)?,
        })
    }

    // Terrain draws from its own stream. Density and types share a second
    // stream seeded identically, types continuing where density stopped.
    pub fn generate(
        &self,
        seed: i32,
        width: usize,
        height: usize,
        observer: &mut dyn StageObserver,
    ) -> Result<World> {
        validate_dimensions(width, height)?;
        let _span = info_span!("world", seed, width, height).entered();

        let heights = {
            let _stage = info_span!("terrain").entered();
            let mut terrain_rng = LegacyRandom::new(seed);
            self.terrain.generate_with(&mut terrain_rng, width, height)?
        };
        observer.stage_done(Stage::Terrain);

        let mut npc_rng = LegacyRandom::new(seed);
        let density = {
            let _stage = info_span!("density").entered();
            self.density.generate_with(&mut npc_rng, &heights)
        };
        observer.stage_done(Stage::Density);

        let types = {
            let _stage = info_span!("types").entered();
            self.types.assign_with(&mut npc_rng, &density)
        };
        observer.stage_done(Stage::Types);

        info!("world generated");
        Ok(World {
            seed,
            heights,
            density,
            types,
        })
    }
}

// Run every stage with the given config and no progress reporting
pub fn generate_world(seed: i32, width: usize, height: usize, config: &WorldConfig) -> Result<World> {
    WorldGenerator::new(config.clone())?.generate(seed, width, height, &mut NoProgress)
}
