use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::density::DensityMask;
use crate::error::{GenError, Result};
use crate::grid::Grid;
use crate::rng::{LegacyRandom, RandomStream};

// Population category of a cell. The discriminants are the raw labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum NpcType {
    #[default]
    None = 0,
    StorySlot = 1,
    MaliciousSingular = 2,
    MaliciousFaction = 3,
    NeutralSingular = 4,
    NeutralFaction = 5,
    HeroicSingular = 6,
    HeroicFaction = 7,
    PlayerSpawn = 8,
}

impl NpcType {
    pub const ALL: [NpcType; 9] = [
        NpcType::None,
        NpcType::StorySlot,
        NpcType::MaliciousSingular,
        NpcType::MaliciousFaction,
        NpcType::NeutralSingular,
        NpcType::NeutralFaction,
        NpcType::HeroicSingular,
        NpcType::HeroicFaction,
        NpcType::PlayerSpawn,
    ];

    pub fn label(self) -> u8 {
        self as u8
    }

    pub fn from_label(label: u8) -> Result<Self> {
        Self::ALL
            .get(label as usize)
            .copied()
            .ok_or(GenError::UnknownLabel(label))
    }

    // Labels 2..=7, the ones handed out by the random roll
    pub fn is_category(self) -> bool {
        matches!(self.label(), 2..=7)
    }

    // Even category labels are the single-unit archetypes
    pub fn is_singular(self) -> bool {
        self.is_category() && self.label() % 2 == 0
    }
}

pub type TypeMap = Grid<NpcType>;

impl TypeMap {
    pub fn labels(&self) -> Vec<u8> {
        self.iter().map(|t| t.label()).collect()
    }

    // Cell count per label, indexed by label
    pub fn histogram(&self) -> [usize; 9] {
        let mut counts = [0usize; 9];
        for t in self.iter() {
            counts[t.label() as usize] += 1;
        }
        counts
    }

    pub fn player_spawn(&self) -> Option<(usize, usize)> {
        self.iter()
            .position(|&t| t == NpcType::PlayerSpawn)
            .map(|i| (i % self.width(), i / self.width()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeConfig {
    pub spawn_story_npcs: bool,
    // Story slots filled before anything else
    pub min_story_npcs: i32,
    // Probability that a visited cell receives a category label
    pub chance: f32,
}

impl Default for TypeConfig {
    fn default() -> Self {
        Self {
            spawn_story_npcs: false,
            min_story_npcs: 0,
            chance: 0.1,
        }
    }
}

impl TypeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_story_npcs < 0 {
            return Err(GenError::InvalidConfiguration(format!(
                "min_story_npcs must not be negative, got {}",
                self.min_story_npcs
            )));
        }
        if !(0.0..=1.0).contains(&self.chance) {
            return Err(GenError::InvalidConfiguration(format!(
                "type chance {} is outside [0, 1]",
                self.chance
            )));
        }
        Ok(())
    }
}

pub struct TypeAssigner {
    config: TypeConfig,
}

impl TypeAssigner {
    pub fn new(config: TypeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    // Visit occupied cells in random order, filling story slots first,
    // then the single player spawn, then rolling for a category.
    pub fn assign_with(&self, rng: &mut dyn RandomStream, density: &DensityMask) -> TypeMap {
        let mut types = density.map(|_| NpcType::None);

        // Occupied indices in ascending order
        let mut pool: Vec<usize> = density
            .iter()
            .enumerate()
            .filter_map(|(i, &occupied)| occupied.then_some(i))
            .collect();

        let chance = f64::from(self.config.chance);
        let mut story_quota = self.config.min_story_npcs;
        let mut player_spawned = false;

        while !pool.is_empty() {
            // Draw a position in the shrinking pool; `remove` keeps the rest in order
            let pos = rng.next_below(pool.len() as i32) as usize;
            let index = pool.remove(pos);

            if self.config.spawn_story_npcs {
                if story_quota > 0 {
                    types[index] = NpcType::StorySlot;
                    story_quota -= 1;
                    continue;
                }
                if !player_spawned {
                    types[index] = NpcType::PlayerSpawn;
                    player_spawned = true;
                    continue;
                }
            }

            if rng.next_f64() > chance {
                continue;
            }
            // One of the six category labels 2..=7
            let label = rng.next_below(6) as u8 + 2;
            types[index] = NpcType::ALL[label as usize];
        }

        let histogram = types.histogram();
        let singular = types.iter().filter(|t| t.is_singular()).count();
        debug!(?histogram, singular, "npc type histogram");
        info!(
            placed = histogram[1..].iter().sum::<usize>(),
            "npc types assigned"
        );
        types
    }
}

// One-shot type assignment with a fresh stream seeded from `seed`
pub fn assign_types(density: &DensityMask, seed: i32, config: &TypeConfig) -> Result<TypeMap> {
    let assigner = TypeAssigner::new(config.clone())?;
    let _span = info_span!("types", seed).entered();
    Ok(assigner.assign_with(&mut LegacyRandom::new(seed), density))
}
