use glam::DVec3;
use serde::{Deserialize, Serialize};

// WorldGeometry is the snapshot of world-object positions the course
// catalog gets built from. The world generator produces it once at load
// time; courses never react to later changes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorldGeometry {
    pub islands: Vec<DVec3>,
    pub keys: Vec<DVec3>,
    pub nebulae: Vec<DVec3>,
}
