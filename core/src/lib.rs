// worldgen holds the seeded generation pipeline:
// seed -> heightmap -> npc density -> npc types
pub mod density;
pub mod error;
pub mod grid;
pub mod heightmap;
pub mod npc;
pub mod pipeline;
pub mod preview;
pub mod rng;
pub mod seed;

pub use density::{DensityConfig, DensityGenerator, DensityMask, generate_density};
pub use error::{GenError, Result};
pub use grid::Grid;
pub use heightmap::{Feature, HeightField, HeightmapGenerator, TerrainConfig, normalize};
pub use npc::{NpcType, TypeAssigner, TypeConfig, TypeMap, assign_types};
pub use pipeline::{
    NoProgress, Stage, StageObserver, World, WorldConfig, WorldGenerator, generate_world,
};
pub use rng::{LegacyRandom, RandStream, RandomStream, random_seed};
pub use seed::derive_seed;

// heightmap::generate, named after its stage at the crate root
pub use heightmap::generate as generate_heightmap;
