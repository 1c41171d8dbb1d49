use glam::DVec3;
use rand::Rng;

use skyrush_core::effects::{Effect, IndicatorColor, UiUpdate};
use skyrush_core::entity_location::EntityLocation;
use skyrush_core::player_inputs::InputSnapshot;
use skyrush_core::GLOBAL_CONFIG;

const PARTICLES_PER_BURST: usize = 5;
const PARTICLE_SPREAD: f64 = 0.5;
const PARTICLE_SPEED: f64 = 0.1;
// exhaust spawns this far behind the player
const TRAIL_OFFSET: f64 = 2.0;

// Boost is wholly input-driven: it stays on exactly as long as the
// unlimited-boost flag is held. There is no charge meter and no cooldown;
// the movement system just multiplies its speed while this reports active.
pub struct BoostController {
    active: bool,
}

impl BoostController {
    pub fn new() -> Self {
        Self { active: false }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // What the boost indicator should read before the first frame.
    pub fn startup_indicator() -> Effect {
        indicator(false)
    }

    pub fn update(
        &mut self,
        _dt: f64,
        player: &EntityLocation,
        input: &InputSnapshot,
        rng: &mut impl Rng,
    ) -> (bool, Vec<Effect>) {
        let mut effects = Vec::new();
        let was_active = self.active;
        self.active = input.unlimited_boost;

        if self.active {
            if !was_active {
                effects.push(Effect::BoostTrail { visible: true });
                effects.push(indicator(true));
            }
            // occasional exhaust burst behind the player
            if rng.gen::<f64>() < GLOBAL_CONFIG.boost_particle_chance {
                effects.push(Effect::BoostParticles {
                    positions: burst_positions(player, rng),
                    velocity: player.unit_backward_direction() * PARTICLE_SPEED,
                });
            }
        } else if was_active {
            effects.push(Effect::BoostTrail { visible: false });
            effects.push(indicator(false));
        }

        (self.active, effects)
    }
}

fn indicator(active: bool) -> Effect {
    let (text, color) = if active {
        ("BOOST: UNLIMITED", IndicatorColor::Magenta)
    } else {
        ("BOOST: Ready (hold boost to engage)", IndicatorColor::Green)
    };
    Effect::Ui(UiUpdate::BoostIndicator {
        text: String::from(text),
        color,
    })
}

fn burst_positions(player: &EntityLocation, rng: &mut impl Rng) -> Vec<DVec3> {
    let behind = player.position + player.unit_backward_direction() * TRAIL_OFFSET;
    (0..PARTICLES_PER_BURST)
        .map(|_| {
            behind
                + DVec3::new(
                    (rng.gen::<f64>() - 0.5) * PARTICLE_SPREAD,
                    (rng.gen::<f64>() - 0.5) * PARTICLE_SPREAD,
                    (rng.gen::<f64>() - 0.5) * PARTICLE_SPREAD,
                )
        })
        .collect()
}
