use std::mem;
use std::time::{Duration, Instant};

use glam::DVec3;

use skyrush_core::course::{CheckpointKind, Course, CourseLayout};
use skyrush_core::effects::{
    CollectionTag, CountdownDisplay, CourseMenuEntry, Effect, UiUpdate,
};
use skyrush_core::entity_location::EntityLocation;
use skyrush_core::player_inputs::InputSnapshot;
use skyrush_core::sound_effect::SoundEffect;
use skyrush_core::GLOBAL_CONFIG;

use crate::obstacles::{self, Obstacle};

use self::phase::*;

pub mod phase;
mod results;
#[cfg(test)]
mod tests;

pub use self::results::{BestResults, Score};

// Glow weights for the renderer: the current target pulses on the course
// clock, everything else dims.
const TARGET_EMPHASIS: f64 = 2.0;
const TARGET_PULSE_AMPLITUDE: f64 = 0.5;
const TARGET_PULSE_RATE: f64 = 5.0;
const DIMMED_EMPHASIS: f64 = 0.5;

// Owns the catalog, the obstacle field, and the lifecycle of at most one
// attempt at a time. All mutation funnels through here; the renderer reads
// marker state through the accessors and plays back the returned effects.
pub struct RaceDirector {
    courses: Vec<Course>,
    obstacles: Vec<Obstacle>,
    phase: RacePhase,
    best_results: BestResults,
    menu_open: bool,
}

impl RaceDirector {
    pub fn new(courses: Vec<Course>, obstacles: Vec<Obstacle>) -> RaceDirector {
        RaceDirector {
            courses,
            obstacles,
            phase: RacePhase::Idle,
            best_results: BestResults::new(),
            menu_open: false,
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn best_results(&self) -> &BestResults {
        &self.best_results
    }

    pub fn phase(&self) -> &RacePhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, RacePhase::Idle)
    }

    // Where the player should fly next: the active sequential target, or
    // the nearest uncollected bonus in a time attack.
    pub fn current_objective(&self, from: DVec3) -> Option<DVec3> {
        let attempt = match &self.phase {
            RacePhase::Countdown { attempt, .. } | RacePhase::Running { attempt } => attempt,
            RacePhase::Idle => return None,
        };
        let course = &self.courses[attempt.course_index];

        match (&course.layout, &attempt.progress) {
            (
                CourseLayout::Circuit { checkpoints } | CourseLayout::Gauntlet { checkpoints },
                Progress::Sequential { current_checkpoint },
            ) => checkpoints
                .iter()
                .find(|c| c.index == *current_checkpoint)
                .map(|c| c.position),
            (CourseLayout::TimeAttack { bonuses, .. }, _) => bonuses
                .iter()
                .filter(|b| !b.collected)
                .min_by(|a, b| {
                    a.position
                        .distance_squared(from)
                        .total_cmp(&b.position.distance_squared(from))
                })
                .map(|b| b.position),
            (_, _) => None,
        }
    }

    // The keyboard surface: menu toggle while idle, cancel while an
    // attempt is live, and a menu pick starts that course.
    pub fn handle_input(&mut self, input: &InputSnapshot) -> Vec<Effect> {
        let mut effects = Vec::new();

        if input.cancel_pressed && !self.is_idle() {
            self.finish_attempt(false, None, &mut effects);
            return effects;
        }

        if input.menu_toggle_pressed && self.is_idle() {
            self.menu_open = !self.menu_open;
            effects.push(Effect::Ui(UiUpdate::CourseMenu {
                visible: self.menu_open,
                entries: self.menu_entries(),
            }));
        }

        if let Some(index) = input.menu_selection {
            if self.menu_open && self.is_idle() {
                self.menu_open = false;
                effects.push(Effect::Ui(UiUpdate::CourseMenu {
                    visible: false,
                    entries: Vec::new(),
                }));
                effects.extend(self.start(index));
            }
        }

        effects
    }

    // Begin an attempt at the given course. A second start while an
    // attempt is live must leave the running attempt untouched, so it is
    // rejected outright, as is an unknown index or a sequential course
    // with nothing to fly through.
    pub fn start(&mut self, course_index: usize) -> Vec<Effect> {
        let mut effects = Vec::new();

        if !self.is_idle() {
            return effects;
        }
        let course = match self.courses.get_mut(course_index) {
            Some(course) => course,
            None => return effects,
        };

        let timer_secs;
        let progress;
        match &mut course.layout {
            CourseLayout::Circuit { checkpoints } | CourseLayout::Gauntlet { checkpoints } => {
                // an empty sequential course can never finish
                if checkpoints.is_empty() {
                    return effects;
                }
                for checkpoint in checkpoints.iter_mut() {
                    checkpoint.collected = false;
                    checkpoint.visible = true;
                    checkpoint.emphasis = if checkpoint.index == 0 {
                        TARGET_EMPHASIS
                    } else {
                        DIMMED_EMPHASIS
                    };
                }
                timer_secs = 0.0;
                progress = Progress::Sequential {
                    current_checkpoint: 0,
                };
            }
            CourseLayout::TimeAttack {
                bonuses,
                time_limit_secs,
                ..
            } => {
                for bonus in bonuses.iter_mut() {
                    bonus.collected = false;
                    bonus.visible = true;
                }
                timer_secs = *time_limit_secs;
                progress = Progress::TimeAttack;
            }
        }

        if matches!(
            self.courses[course_index].layout,
            CourseLayout::Gauntlet { .. }
        ) {
            for obstacle in self.obstacles.iter_mut() {
                obstacle.visible = true;
            }
        }

        let attempt = ActiveAttempt {
            course_index,
            progress,
            timer_secs,
        };

        effects.push(Effect::Ui(UiUpdate::Status {
            visible: true,
            text: status_text(&self.courses[course_index], &attempt),
        }));
        effects.push(Effect::Sound(SoundEffect::CountdownTick));
        effects.push(Effect::Ui(UiUpdate::Countdown(CountdownDisplay::Three)));

        self.phase = RacePhase::Countdown {
            attempt,
            deadline: Instant::now() + Duration::from_secs_f64(GLOBAL_CONFIG.countdown_secs),
            announced: CountdownDisplay::Three,
        };

        effects
    }

    // Abort the current attempt, from Countdown or Running. Nothing is
    // recorded.
    pub fn cancel(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.finish_attempt(false, None, &mut effects);
        effects
    }

    // One frame of race logic. Gameplay checks only run while Running;
    // during Countdown this just advances the 3-2-1 announcements.
    pub fn update(&mut self, dt: f64, player: &EntityLocation) -> Vec<Effect> {
        let mut effects = Vec::new();
        match &self.phase {
            RacePhase::Idle => {}
            RacePhase::Countdown { .. } => self.update_countdown(&mut effects),
            RacePhase::Running { .. } => self.update_running(dt, player, &mut effects),
        }
        effects
    }

    fn update_countdown(&mut self, effects: &mut Vec<Effect>) {
        let now = Instant::now();
        let deadline = match &self.phase {
            RacePhase::Countdown { deadline, .. } => *deadline,
            _ => return,
        };

        if now < deadline {
            let remaining = (deadline - now).as_secs_f64();
            let display = if remaining > 2.0 {
                CountdownDisplay::Three
            } else if remaining > 1.0 {
                CountdownDisplay::Two
            } else {
                CountdownDisplay::One
            };
            if let RacePhase::Countdown { announced, .. } = &mut self.phase {
                if *announced != display {
                    *announced = display;
                    effects.push(Effect::Sound(SoundEffect::CountdownTick));
                    effects.push(Effect::Ui(UiUpdate::Countdown(display)));
                }
            }
            return;
        }

        // deadline passed: the attempt goes live
        let phase = mem::replace(&mut self.phase, RacePhase::Idle);
        if let RacePhase::Countdown { attempt, .. } = phase {
            self.phase = RacePhase::Running { attempt };
        }
        effects.push(Effect::Sound(SoundEffect::CountdownGo));
        effects.push(Effect::Ui(UiUpdate::Countdown(CountdownDisplay::Go)));
    }

    fn update_running(&mut self, dt: f64, player: &EntityLocation, effects: &mut Vec<Effect>) {
        let attempt = match &mut self.phase {
            RacePhase::Running { attempt } => attempt,
            _ => return,
        };
        let course = &mut self.courses[attempt.course_index];

        // Completed or failed, decided this frame; the two are mutually
        // exclusive because the first decision wins.
        let mut outcome: Option<bool> = None;

        // Clock first: a time attack bleeds time, everything else accrues
        // it. Running dry is a *completed* time attack, with the bonus
        // count frozen as-is.
        match &course.layout {
            CourseLayout::TimeAttack { .. } => {
                attempt.timer_secs -= dt;
                if attempt.timer_secs <= 0.0 {
                    attempt.timer_secs = 0.0;
                    outcome = Some(true);
                }
            }
            _ => attempt.timer_secs += dt,
        }

        // Hazards next: slamming into one overrides checkpoint progress.
        if outcome.is_none() && matches!(course.layout, CourseLayout::Gauntlet { .. }) {
            if obstacles::update_obstacles(&mut self.obstacles, dt, player.position) {
                effects.push(Effect::Sound(SoundEffect::ObstacleHit));
                outcome = Some(false);
            }
        }

        let course = &mut self.courses[attempt.course_index];
        if outcome.is_none() {
            match &mut course.layout {
                CourseLayout::TimeAttack { bonuses, .. } => {
                    // every uncollected bonus is eligible, in any order
                    for bonus in bonuses.iter_mut() {
                        if !bonus.collected && bonus.contains(player.position) {
                            bonus.collected = true;
                            bonus.visible = false;
                            attempt.timer_secs += bonus.bonus_secs;
                            effects.push(Effect::CollectionBurst {
                                position: bonus.position,
                                tag: CollectionTag::TimeBonus,
                            });
                            effects.push(Effect::Sound(SoundEffect::BonusCollect));
                        }
                    }
                }
                CourseLayout::Circuit { checkpoints } | CourseLayout::Gauntlet { checkpoints } => {
                    if let Progress::Sequential { current_checkpoint } = &mut attempt.progress {
                        let last_index = checkpoints.len() - 1;

                        // Only the checkpoint matching the progress index is
                        // actionable; anything else the player grazes stays
                        // inert until its turn.
                        for checkpoint in checkpoints.iter_mut() {
                            if checkpoint.index != *current_checkpoint
                                || !checkpoint.contains(player.position)
                            {
                                continue;
                            }
                            if checkpoint.kind == CheckpointKind::Finish
                                && checkpoint.index == last_index
                            {
                                outcome = Some(true);
                            } else {
                                checkpoint.collected = true;
                                *current_checkpoint += 1;
                                effects.push(Effect::CollectionBurst {
                                    position: checkpoint.position,
                                    tag: CollectionTag::Checkpoint,
                                });
                                effects.push(Effect::Sound(SoundEffect::CheckpointCollect));
                            }
                            break;
                        }

                        for checkpoint in checkpoints.iter_mut() {
                            checkpoint.emphasis = if checkpoint.index == *current_checkpoint {
                                TARGET_EMPHASIS
                                    + (attempt.timer_secs * TARGET_PULSE_RATE).sin()
                                        * TARGET_PULSE_AMPLITUDE
                            } else {
                                DIMMED_EMPHASIS
                            };
                        }
                    }
                }
            }
        }

        if outcome.is_none() {
            effects.push(Effect::Ui(UiUpdate::Status {
                visible: true,
                text: status_text(&self.courses[attempt.course_index], attempt),
            }));
            return;
        }

        let completed = outcome.unwrap_or(false);
        self.finish_attempt(completed, Some(player.position), effects);
    }

    // Terminal transition shared by completion, failure, and cancellation.
    // Always hides every marker and returns to Idle; records a score only
    // on completion, and only if it beats the stored best.
    fn finish_attempt(
        &mut self,
        completed: bool,
        celebrate_at: Option<DVec3>,
        effects: &mut Vec<Effect>,
    ) {
        let phase = mem::replace(&mut self.phase, RacePhase::Idle);
        let attempt = match phase {
            RacePhase::Countdown { attempt, .. } | RacePhase::Running { attempt } => attempt,
            RacePhase::Idle => return,
        };

        let course = &mut self.courses[attempt.course_index];
        match &mut course.layout {
            CourseLayout::Circuit { checkpoints } | CourseLayout::Gauntlet { checkpoints } => {
                for checkpoint in checkpoints.iter_mut() {
                    checkpoint.visible = false;
                    checkpoint.emphasis = DIMMED_EMPHASIS;
                }
            }
            CourseLayout::TimeAttack { bonuses, .. } => {
                for bonus in bonuses.iter_mut() {
                    bonus.visible = false;
                }
            }
        }
        for obstacle in self.obstacles.iter_mut() {
            obstacle.visible = false;
        }

        effects.push(Effect::Ui(UiUpdate::Status {
            visible: false,
            text: String::new(),
        }));
        effects.push(Effect::Ui(UiUpdate::Countdown(CountdownDisplay::Hidden)));

        if !completed {
            effects.push(Effect::Sound(SoundEffect::RaceFailed));
            return;
        }

        let course = &self.courses[attempt.course_index];
        let score = match &course.layout {
            CourseLayout::TimeAttack { bonuses, .. } => {
                Score::Bonuses(bonuses.iter().filter(|b| b.collected).count() as u32)
            }
            _ => Score::Time(Duration::from_secs_f64(attempt.timer_secs)),
        };

        let new_record = self.best_results.record(&course.id, score);
        let best = self.best_results.get(&course.id).unwrap_or(score);

        effects.push(Effect::Sound(SoundEffect::RaceComplete));
        if new_record {
            effects.push(Effect::Sound(SoundEffect::NewRecord));
        }
        if let Some(position) = celebrate_at {
            effects.push(Effect::CollectionBurst {
                position,
                tag: CollectionTag::Celebration,
            });
        }
        effects.push(Effect::Ui(UiUpdate::ResultDialog {
            text: result_text(course, score, best, new_record),
            auto_dismiss: Duration::from_secs_f64(GLOBAL_CONFIG.result_display_secs),
        }));
    }

    fn menu_entries(&self) -> Vec<CourseMenuEntry> {
        self.courses
            .iter()
            .enumerate()
            .map(|(index, course)| CourseMenuEntry {
                index,
                name: course.name.clone(),
                description: course.description.clone(),
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn skip_countdown(&mut self) {
        if let RacePhase::Countdown { deadline, .. } = &mut self.phase {
            *deadline = Instant::now();
        }
    }
}

fn status_text(course: &Course, attempt: &ActiveAttempt) -> String {
    match (&course.layout, &attempt.progress) {
        (CourseLayout::TimeAttack { bonuses, .. }, _) => {
            let collected = bonuses.iter().filter(|b| b.collected).count();
            format!(
                "{}\nTime Remaining: {:.2}s\nBonuses Collected: {}/{}",
                course.name,
                attempt.timer_secs,
                collected,
                bonuses.len()
            )
        }
        (
            CourseLayout::Gauntlet { checkpoints },
            Progress::Sequential { current_checkpoint },
        ) => format!(
            "{}\nCheckpoint: {}/{}\nTime: {:.2}s\nAvoid the obstacles!",
            course.name,
            current_checkpoint,
            checkpoints.len().saturating_sub(1),
            attempt.timer_secs
        ),
        (
            CourseLayout::Circuit { checkpoints },
            Progress::Sequential { current_checkpoint },
        ) => format!(
            "{}\nCheckpoint: {}/{}\nTime: {:.2}s",
            course.name,
            current_checkpoint,
            checkpoints.len().saturating_sub(1),
            attempt.timer_secs
        ),
        (_, _) => course.name.clone(),
    }
}

fn result_text(course: &Course, score: Score, best: Score, new_record: bool) -> String {
    let mut text = match score {
        Score::Bonuses(count) => format!(
            "Time Attack Complete!\n{}\nTime Bonuses Collected: {}",
            course.name, count
        ),
        Score::Time(time) => format!(
            "Speed Run Complete!\n{}\nTime: {:.2}s",
            course.name,
            time.as_secs_f64()
        ),
    };
    if new_record {
        text.push_str("\nNEW RECORD!");
    }
    match best {
        Score::Bonuses(count) => text.push_str(&format!("\nBest Score: {} bonuses", count)),
        Score::Time(time) => text.push_str(&format!("\nBest Time: {:.2}s", time.as_secs_f64())),
    }
    text
}
