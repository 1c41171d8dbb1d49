use std::thread;
use std::time::{Duration, Instant};

use glam::DVec3;

use skyrush_core::effects::{Effect, UiUpdate};
use skyrush_core::entity_location::EntityLocation;
use skyrush_core::player_inputs::InputSnapshot;
use skyrush_core::world::WorldGeometry;
use skyrush_core::GLOBAL_CONFIG;

use crate::boost::BoostController;
use crate::courses;
use crate::race::RaceDirector;

// Demo autopilot speed, units per second, before the boost multiplier.
const AUTOPILOT_SPEED: f64 = 12.0;

// Headless harness around the race subsystem: an autopilot player flies
// the island circuit with boost held, and effect traffic goes to stdout.
// The real game embeds the same pieces behind a renderer.
pub struct Game {
    director: RaceDirector,
    boost: BoostController,
    player: EntityLocation,
}

impl Game {
    pub fn new(world: WorldGeometry) -> Game {
        let mut rng = rand::thread_rng();
        let courses = courses::build_courses(&world, &mut rng);
        let obstacles = courses::build_obstacles();

        println!(
            "world ready: {} islands, {} keys, {} nebulae, {} courses",
            world.islands.len(),
            world.keys.len(),
            world.nebulae.len(),
            courses.len()
        );

        Game {
            director: RaceDirector::new(courses, obstacles),
            boost: BoostController::new(),
            player: EntityLocation {
                position: DVec3::new(0.0, 20.0, 0.0),
                unit_steer_direction: DVec3::Z,
                unit_upward_direction: DVec3::Y,
            },
        }
    }

    // WARNING: runs until the demo attempt resolves
    pub fn start_loop(&mut self) {
        let tick = Duration::from_millis(GLOBAL_CONFIG.tick_ms);
        let dt = tick.as_secs_f64();
        let mut rng = rand::thread_rng();
        let mut last_status_print = Instant::now();

        // fly like a player holding the thrust and boost keys
        let input = InputSnapshot {
            thrusting: true,
            unlimited_boost: true,
            ..Default::default()
        };

        report(&[BoostController::startup_indicator()], &mut last_status_print);
        report(&self.director.start(0), &mut last_status_print);

        loop {
            let start_time = Instant::now();

            let (boosting, boost_effects) =
                self.boost.update(dt, &self.player, &input, &mut rng);
            report(&boost_effects, &mut last_status_print);

            self.steer_towards_objective(dt, boosting);

            let race_effects = self.director.update(dt, &self.player);
            report(&race_effects, &mut last_status_print);

            if self.director.is_idle() {
                println!("demo attempt resolved, shutting down");
                break;
            }

            // wait out the remainder of the tick
            if let Some(remaining) = tick.checked_sub(start_time.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }

    fn steer_towards_objective(&mut self, dt: f64, boosting: bool) {
        let objective = match self.director.current_objective(self.player.position) {
            Some(position) => position,
            None => return,
        };

        let to_target = objective - self.player.position;
        if to_target.length() < f64::EPSILON {
            return;
        }

        let direction = to_target.normalize();
        let speed = if boosting {
            AUTOPILOT_SPEED * GLOBAL_CONFIG.boost_multiplier
        } else {
            AUTOPILOT_SPEED
        };

        self.player.unit_steer_direction = direction;
        self.player.position += direction * speed * dt;
    }
}

// Print effect traffic the way the real client would render it. The
// per-frame status line is throttled to once a second to keep the log
// readable.
fn report(effects: &[Effect], last_status_print: &mut Instant) {
    for effect in effects {
        match effect {
            Effect::Sound(sound) => println!("sound: {:?}", sound),
            Effect::Ui(UiUpdate::Countdown(display)) => println!("countdown: {:?}", display),
            Effect::Ui(UiUpdate::Status { visible: true, text }) => {
                if last_status_print.elapsed() >= Duration::from_secs(1) {
                    *last_status_print = Instant::now();
                    println!("status: {}", text.replace('\n', " | "));
                }
            }
            Effect::Ui(UiUpdate::BoostIndicator { text, .. }) => println!("{}", text),
            Effect::Ui(UiUpdate::ResultDialog { text, .. }) => {
                println!("result: {}", text.replace('\n', " | "))
            }
            _ => {}
        }
    }
}
