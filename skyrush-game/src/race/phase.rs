use std::time::Instant;

use skyrush_core::effects::CountdownDisplay;
use skyrush_core::CheckpointIndex;

// What the race subsystem is doing right now. Everything an attempt needs
// lives inside the phase value, so leaving a phase destroys its deadline
// and progress with it; a cancelled countdown cannot fire later.
pub enum RacePhase {
    // free flight, no attempt; the course menu may be open
    Idle,
    // a course was picked; controls are live but checks are not; promotes
    // itself to Running once the deadline passes
    Countdown {
        attempt: ActiveAttempt,
        deadline: Instant,
        announced: CountdownDisplay,
    },
    // the attempt proper: clocks and proximity checks run every frame
    Running { attempt: ActiveAttempt },
}

pub struct ActiveAttempt {
    pub course_index: usize,
    pub progress: Progress,
    // counts up for sequential courses, down for a time attack
    pub timer_secs: f64,
}

// Sequential courses chase one index at a time; a time attack only tracks
// per-bonus collected flags, so it carries no index at all.
pub enum Progress {
    Sequential { current_checkpoint: CheckpointIndex },
    TimeAttack,
}
