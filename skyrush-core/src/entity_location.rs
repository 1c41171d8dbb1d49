use glam::DVec3;

// EntityLocation is where the player currently is. The movement system
// (outside this crate) writes it every frame; the race and boost systems
// only ever read it.
#[derive(Copy, Clone)]
pub struct EntityLocation {
    pub position: DVec3,
    pub unit_steer_direction: DVec3, // should be a normalized vector
    pub unit_upward_direction: DVec3,
}

impl EntityLocation {
    // Unit vector pointing out the back of the entity; trailing effects
    // (boost exhaust) spawn along this direction.
    pub fn unit_backward_direction(&self) -> DVec3 {
        -self.unit_steer_direction
    }
}
