use std::time::Duration;

use glam::DVec3;

use crate::sound_effect::SoundEffect;

// Effects are the one-way traffic from the game systems out to the
// presentation layer (particles, audio, HUD). The producer never waits on
// a result; a consumer with no renderer attached just drops the batch.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    CollectionBurst { position: DVec3, tag: CollectionTag },
    BoostParticles { positions: Vec<DVec3>, velocity: DVec3 },
    BoostTrail { visible: bool },
    Sound(SoundEffect),
    Ui(UiUpdate),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionTag {
    Checkpoint,
    TimeBonus,
    Celebration,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiUpdate {
    // the in-race status panel (course name, progress, timer)
    Status { visible: bool, text: String },
    BoostIndicator { text: String, color: IndicatorColor },
    Countdown(CountdownDisplay),
    CourseMenu { visible: bool, entries: Vec<CourseMenuEntry> },
    // auto_dismiss is honored by the UI layer; the game never schedules
    // its own callback to hide the dialog
    ResultDialog { text: String, auto_dismiss: Duration },
}

// "GO!" is expected to fade out client-side; Hidden clears the digits early
// (e.g. when a countdown gets cancelled).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownDisplay {
    Three,
    Two,
    One,
    Go,
    Hidden,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorColor {
    Green,
    Magenta,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CourseMenuEntry {
    pub index: usize,
    pub name: String,
    pub description: String,
}
