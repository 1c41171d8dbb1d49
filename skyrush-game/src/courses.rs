use glam::DVec3;
use rand::Rng;

use skyrush_core::course::{Checkpoint, CheckpointKind, Course, CourseLayout, TimeBonus};
use skyrush_core::world::WorldGeometry;
use skyrush_core::GLOBAL_CONFIG;

use crate::obstacles::Obstacle;

// The celestial dash stays shorter than the other circuits.
const CELESTIAL_MAX_CHECKPOINTS: usize = 6;
// nebula checkpoints get shuffled off-center by up to half this per axis
const CELESTIAL_JITTER: f64 = 15.0;

const TIME_BONUS_COUNT: usize = 12;
const OBSTACLE_RING_RADIUS: f64 = 40.0;

// A course's loop-back finish hangs slightly above its first checkpoint.
const FINISH_HOVER: f64 = 2.0;
// island checkpoints hover above the island surface
const ISLAND_HOVER: f64 = 5.0;

// Build the full course catalog from the world as it exists right now.
// Degenerate worlds produce degenerate (possibly empty) courses; that is
// the race director's problem, not ours.
pub fn build_courses(world: &WorldGeometry, rng: &mut impl Rng) -> Vec<Course> {
    let radius = GLOBAL_CONFIG.checkpoint_radius;

    let mut courses = vec![
        island_circuit(world, radius),
        celestial_dash(world, radius, rng),
        key_collector(world, radius),
        gauntlet(world, radius),
        time_attack(world, radius),
    ];

    // The three circuit-style courses loop back: their finish ring hangs
    // over their own starting checkpoint.
    for course in courses.iter_mut().take(3) {
        append_loop_finish(course, radius);
    }

    courses
}

fn island_circuit(world: &WorldGeometry, radius: f64) -> Course {
    let checkpoints = world
        .islands
        .iter()
        .step_by(2)
        .take(GLOBAL_CONFIG.max_checkpoints)
        .enumerate()
        .map(|(index, island)| {
            let position = *island + DVec3::new(0.0, ISLAND_HOVER, 0.0);
            Checkpoint::new(position, radius, index, CheckpointKind::Normal)
        })
        .collect();

    Course {
        id: String::from("island_circuit"),
        name: String::from("Island Circuit"),
        description: String::from("Race through the floating islands in record time!"),
        layout: CourseLayout::Circuit { checkpoints },
    }
}

fn celestial_dash(world: &WorldGeometry, radius: f64, rng: &mut impl Rng) -> Course {
    let checkpoints = world
        .nebulae
        .iter()
        .step_by(2)
        .take(CELESTIAL_MAX_CHECKPOINTS)
        .enumerate()
        .map(|(index, nebula)| {
            let jitter = DVec3::new(
                (rng.gen::<f64>() - 0.5) * CELESTIAL_JITTER,
                0.0,
                (rng.gen::<f64>() - 0.5) * CELESTIAL_JITTER,
            );
            Checkpoint::new(*nebula + jitter, radius, index, CheckpointKind::Normal)
        })
        .collect();

    Course {
        id: String::from("celestial_dash"),
        name: String::from("Celestial Dash"),
        description: String::from("Navigate through the nebulae clouds!"),
        layout: CourseLayout::Circuit { checkpoints },
    }
}

fn key_collector(world: &WorldGeometry, radius: f64) -> Course {
    let checkpoints = world
        .keys
        .iter()
        .enumerate()
        .map(|(index, key)| Checkpoint::new(*key, radius, index, CheckpointKind::KeyMarker))
        .collect();

    Course {
        id: String::from("key_collector"),
        name: String::from("Key Collector Rush"),
        description: String::from("Collect all the keys as fast as possible!"),
        layout: CourseLayout::Circuit { checkpoints },
    }
}

// Hand-placed course through the obstacle field. Only laid out when the
// world actually has islands, matching the other courses' emptiness in a
// bare world.
fn gauntlet(world: &WorldGeometry, radius: f64) -> Course {
    let mut checkpoints = Vec::new();
    if !world.islands.is_empty() {
        let line = [
            DVec3::new(0.0, 20.0, 0.0),
            DVec3::new(50.0, 30.0, 50.0),
        ];
        for (index, position) in line.iter().enumerate() {
            checkpoints.push(Checkpoint::new(*position, radius, index, CheckpointKind::Normal));
        }
        let finish_index = checkpoints.len();
        checkpoints.push(Checkpoint::new(
            DVec3::new(0.0, 30.0, 100.0),
            radius,
            finish_index,
            CheckpointKind::Finish,
        ));
    }

    Course {
        id: String::from("obstacle_course"),
        name: String::from("Obstacle Course"),
        description: String::from(
            "Navigate through a series of obstacles without hitting them!",
        ),
        layout: CourseLayout::Gauntlet { checkpoints },
    }
}

fn time_attack(world: &WorldGeometry, radius: f64) -> Course {
    let mut bonuses = Vec::new();
    if !world.islands.is_empty() {
        // bonuses sit on three interleaved rings at four heights
        for i in 0..TIME_BONUS_COUNT {
            let angle = (i as f64 / TIME_BONUS_COUNT as f64) * std::f64::consts::TAU;
            let ring = 50.0 + (i % 3) as f64 * 20.0;
            let height = 20.0 + (i % 4) as f64 * 10.0;
            let position = DVec3::new(angle.cos() * ring, height, angle.sin() * ring);
            bonuses.push(TimeBonus::new(position, radius, GLOBAL_CONFIG.time_bonus_secs));
        }
    }

    Course {
        id: String::from("time_attack"),
        name: String::from("Time Attack Challenge"),
        description: String::from(
            "Collect as many time bonuses as possible before time runs out!",
        ),
        layout: CourseLayout::TimeAttack {
            start: DVec3::new(0.0, 20.0, 0.0),
            bonuses,
            time_limit_secs: GLOBAL_CONFIG.time_attack_limit_secs,
        },
    }
}

fn append_loop_finish(course: &mut Course, radius: f64) {
    let checkpoints = match &mut course.layout {
        CourseLayout::Circuit { checkpoints } => checkpoints,
        _ => return,
    };
    if checkpoints.is_empty() {
        return;
    }

    let position = checkpoints[0].position + DVec3::new(0.0, FINISH_HOVER, 0.0);
    let index = checkpoints.len();
    checkpoints.push(Checkpoint::new(position, radius, index, CheckpointKind::Finish));
}

// The obstacle field itself: a ring of hazards around the origin, each
// with its own orbit and spin seeded from its index.
pub fn build_obstacles() -> Vec<Obstacle> {
    (0..GLOBAL_CONFIG.obstacle_count)
        .map(|i| {
            let angle = (i as f64 / GLOBAL_CONFIG.obstacle_count as f64) * std::f64::consts::TAU;
            let home = DVec3::new(
                angle.cos() * OBSTACLE_RING_RADIUS,
                20.0 + (i % 3) as f64 * 10.0,
                angle.sin() * OBSTACLE_RING_RADIUS,
            );
            Obstacle::new(
                home,
                5.0 + (i % 5) as f64,
                0.5 + (i % 3) as f64 * 0.2,
                0.01 + (i % 4) as f64 * 0.01,
            )
        })
        .collect()
}
