use std::fs;

use glam::DVec3;
use rand::Rng;

use skyrush_core::world::WorldGeometry;
use skyrush_core::GLOBAL_CONFIG;

// Counts for the procedurally scattered fallback world.
const ISLAND_COUNT: usize = 15;
const NEBULA_COUNT: usize = 8;

// One key hovers this far over its island.
const KEY_HOVER: f64 = 6.0;

pub fn load_world() -> WorldGeometry {
    let path = &GLOBAL_CONFIG.world_file;
    if !path.is_empty() {
        let contents = fs::read_to_string(path).expect("could not read world layout file");
        let world = serde_json::from_str(&contents).expect("world layout file is not valid JSON");
        println!("loaded world layout from {}", path);
        return world;
    }
    generate_world(&mut rand::thread_rng())
}

// The shipped game scatters islands on rings around the origin with some
// height variation, hovers one key over each island, and pushes the
// nebulae out to a far shell.
pub fn generate_world(rng: &mut impl Rng) -> WorldGeometry {
    let mut islands = Vec::new();
    let mut keys = Vec::new();
    for i in 0..ISLAND_COUNT {
        let angle = (i as f64 / ISLAND_COUNT as f64) * std::f64::consts::TAU;
        let ring = rng.gen_range(60.0..140.0);
        let island = DVec3::new(
            angle.cos() * ring,
            rng.gen_range(10.0..40.0),
            angle.sin() * ring,
        );
        islands.push(island);
        keys.push(island + DVec3::new(0.0, KEY_HOVER, 0.0));
    }

    let nebulae = (0..NEBULA_COUNT)
        .map(|i| {
            let angle = (i as f64 / NEBULA_COUNT as f64) * std::f64::consts::TAU;
            let ring = rng.gen_range(150.0..250.0);
            DVec3::new(
                angle.cos() * ring,
                rng.gen_range(30.0..80.0),
                angle.sin() * ring,
            )
        })
        .collect();

    WorldGeometry {
        islands,
        keys,
        nebulae,
    }
}
