use glam::{DVec2, DVec3};

use skyrush_core::GLOBAL_CONFIG;

// A hazard that loops around its home position while an obstacle run is
// active. Invisible obstacles neither move nor collide.
#[derive(Clone, Debug)]
pub struct Obstacle {
    pub home: DVec3,
    pub position: DVec3,
    // accumulated spin on the x and y axes, for the renderer
    pub rotation: DVec2,
    pub orbit_radius: f64,
    pub orbit_speed: f64,
    pub spin_speed: f64,
    pub visible: bool,
    clock: f64,
}

impl Obstacle {
    pub fn new(home: DVec3, orbit_radius: f64, orbit_speed: f64, spin_speed: f64) -> Self {
        Self {
            home,
            position: home,
            rotation: DVec2::ZERO,
            orbit_radius,
            orbit_speed,
            spin_speed,
            visible: false,
            clock: 0.0,
        }
    }

    // Advance the orbit and spin by one frame. The orbit is a 3D loop:
    // a circle in the horizontal plane with a vertical bob at half the
    // frequency and amplitude.
    pub fn update(&mut self, dt: f64) {
        if !self.visible {
            return;
        }

        self.clock += dt;
        let t = self.clock * self.orbit_speed;
        let r = self.orbit_radius;
        self.position = self.home + DVec3::new(t.cos() * r, (t * 0.5).sin() * r * 0.5, t.sin() * r);

        self.rotation.x += self.spin_speed * dt;
        self.rotation.y += self.spin_speed * 1.5 * dt;
    }

    pub fn is_hitting(&self, point: DVec3) -> bool {
        self.visible && self.position.distance(point) < GLOBAL_CONFIG.obstacle_collision_radius
    }
}

// Drive every active obstacle one frame and report whether the player is
// inside any of them.
pub fn update_obstacles(obstacles: &mut [Obstacle], dt: f64, player: DVec3) -> bool {
    let mut hit = false;
    for obstacle in obstacles.iter_mut() {
        obstacle.update(dt);
        hit |= obstacle.is_hitting(player);
    }
    hit
}
