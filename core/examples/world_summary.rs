use worldgen::{NpcType, TypeConfig, WorldConfig, derive_seed, generate_world};

fn main() {
    // Generate a 128×128 world from a text seed, with three story slots
    let seed = derive_seed("peacenet");
    let config = WorldConfig {
        types: TypeConfig {
            spawn_story_npcs: true,
            min_story_npcs: 3,
            ..TypeConfig::default()
        },
        ..WorldConfig::default()
    };
    let world = generate_world(seed, 128, 128, &config).unwrap();

    // Print the top-left 16×16 corner of the height field
    for y in 0..16 {
        for x in 0..16 {
            print!("{:>6.3} ", world.heights.get(x, y).unwrap());
        }
        println!();
    }

    println!("seed {seed}");
    for (t, count) in NpcType::ALL.iter().zip(world.types.histogram()) {
        println!("{:<18} {count}", format!("{t:?}"));
    }
    if let Some((x, y)) = world.types.player_spawn() {
        println!("player spawn at ({x}, {y})");
    }
}
