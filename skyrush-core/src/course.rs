use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::CheckpointIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckpointKind {
    Normal,
    // marks a key's resting place in the key-collector course
    KeyMarker,
    Finish,
}

// A ring the player has to fly through. Sequential courses only ever act
// on the checkpoint whose index matches the attempt's progress counter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    pub position: DVec3,
    pub radius: f64,
    pub index: CheckpointIndex,
    pub kind: CheckpointKind,
    pub collected: bool,
    // markers only render during an attempt; the race director owns this
    pub visible: bool,
    // glow weight for the renderer: the current target pulses, others dim
    pub emphasis: f64,
}

impl Checkpoint {
    pub fn new(position: DVec3, radius: f64, index: CheckpointIndex, kind: CheckpointKind) -> Self {
        Self {
            position,
            radius,
            index,
            kind,
            collected: false,
            visible: false,
            emphasis: 0.0,
        }
    }

    pub fn contains(&self, point: DVec3) -> bool {
        self.position.distance(point) < self.radius
    }
}

// A floating pickup that adds seconds to the time-attack clock. Unordered:
// every uncollected bonus is eligible at all times.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeBonus {
    pub position: DVec3,
    pub radius: f64,
    pub bonus_secs: f64,
    pub collected: bool,
    pub visible: bool,
}

impl TimeBonus {
    pub fn new(position: DVec3, radius: f64, bonus_secs: f64) -> Self {
        Self {
            position,
            radius,
            bonus_secs,
            collected: false,
            visible: false,
        }
    }

    pub fn contains(&self, point: DVec3) -> bool {
        self.position.distance(point) < self.radius
    }
}

// Which rules a course runs under. The shapes differ: sequential kinds
// carry an ordered checkpoint list (contiguous indices from 0, last one
// always Finish), a time attack carries a bag of bonuses and a clock.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CourseLayout {
    Circuit {
        checkpoints: Vec<Checkpoint>,
    },
    // like a circuit, but the obstacle set is live while running
    Gauntlet {
        checkpoints: Vec<Checkpoint>,
    },
    TimeAttack {
        start: DVec3,
        bonuses: Vec<TimeBonus>,
        time_limit_secs: f64,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub description: String,
    pub layout: CourseLayout,
}

impl Course {
    pub fn checkpoints(&self) -> &[Checkpoint] {
        match &self.layout {
            CourseLayout::Circuit { checkpoints } | CourseLayout::Gauntlet { checkpoints } => {
                checkpoints
            }
            CourseLayout::TimeAttack { .. } => &[],
        }
    }
}
