use std::time::Duration;

use glam::DVec3;

use skyrush_core::course::{Checkpoint, CheckpointKind, Course, CourseLayout, TimeBonus};
use skyrush_core::effects::{Effect, UiUpdate};
use skyrush_core::entity_location::EntityLocation;
use skyrush_core::player_inputs::InputSnapshot;
use skyrush_core::sound_effect::SoundEffect;

use crate::obstacles::Obstacle;
use crate::race::phase::{Progress, RacePhase};
use crate::race::{RaceDirector, Score};

const RADIUS: f64 = 3.0;

fn player_at(position: DVec3) -> EntityLocation {
    EntityLocation {
        position,
        unit_steer_direction: DVec3::Z,
        unit_upward_direction: DVec3::Y,
    }
}

fn nowhere() -> EntityLocation {
    player_at(DVec3::new(9999.0, 9999.0, 9999.0))
}

// A straight line of checkpoints along x, one every 100 units, last one
// the finish.
fn circuit_course(id: &str, count: usize) -> Course {
    let checkpoints = (0..count)
        .map(|i| {
            let kind = if i + 1 == count {
                CheckpointKind::Finish
            } else {
                CheckpointKind::Normal
            };
            Checkpoint::new(DVec3::new(i as f64 * 100.0, 20.0, 0.0), RADIUS, i, kind)
        })
        .collect();

    Course {
        id: String::from(id),
        name: String::from("Test Circuit"),
        description: String::new(),
        layout: CourseLayout::Circuit { checkpoints },
    }
}

fn time_attack_course(bonus_count: usize, time_limit_secs: f64) -> Course {
    let bonuses = (0..bonus_count)
        .map(|i| TimeBonus::new(DVec3::new(i as f64 * 100.0, 20.0, 0.0), RADIUS, 10.0))
        .collect();

    Course {
        id: String::from("time_attack"),
        name: String::from("Test Time Attack"),
        description: String::new(),
        layout: CourseLayout::TimeAttack {
            start: DVec3::new(0.0, 20.0, 0.0),
            bonuses,
            time_limit_secs,
        },
    }
}

fn gauntlet_course() -> Course {
    let checkpoints = vec![
        Checkpoint::new(DVec3::new(0.0, 20.0, 0.0), RADIUS, 0, CheckpointKind::Normal),
        Checkpoint::new(
            DVec3::new(100.0, 20.0, 0.0),
            RADIUS,
            1,
            CheckpointKind::Finish,
        ),
    ];

    Course {
        id: String::from("obstacle_course"),
        name: String::from("Test Gauntlet"),
        description: String::new(),
        layout: CourseLayout::Gauntlet { checkpoints },
    }
}

// An obstacle with a zero-radius orbit stays parked on its home position.
fn parked_obstacle(home: DVec3) -> Obstacle {
    Obstacle::new(home, 0.0, 1.0, 0.01)
}

fn start_and_go(director: &mut RaceDirector, course_index: usize) {
    director.start(course_index);
    director.skip_countdown();
    // the promotion tick runs no gameplay checks
    director.update(0.0, &nowhere());
    assert!(matches!(director.phase(), RacePhase::Running { .. }));
}

fn current_checkpoint(director: &RaceDirector) -> usize {
    match director.phase() {
        RacePhase::Running { attempt } | RacePhase::Countdown { attempt, .. } => {
            match attempt.progress {
                Progress::Sequential { current_checkpoint } => current_checkpoint,
                Progress::TimeAttack => panic!("attempt is not sequential"),
            }
        }
        RacePhase::Idle => panic!("no active attempt"),
    }
}

#[test]
fn sequential_progress_advances_in_order_only() {
    let mut director = RaceDirector::new(vec![circuit_course("island_circuit", 4)], Vec::new());
    start_and_go(&mut director, 0);

    // grazing checkpoint 2 while chasing 0 does nothing
    director.update(0.1, &player_at(DVec3::new(200.0, 20.0, 0.0)));
    assert_eq!(current_checkpoint(&director), 0);

    director.update(0.1, &player_at(DVec3::new(0.0, 20.0, 0.0)));
    assert_eq!(current_checkpoint(&director), 1);

    director.update(0.1, &player_at(DVec3::new(100.0, 20.0, 0.0)));
    assert_eq!(current_checkpoint(&director), 2);

    // revisiting an old checkpoint is inert
    director.update(0.1, &player_at(DVec3::new(0.0, 20.0, 0.0)));
    assert_eq!(current_checkpoint(&director), 2);

    let checkpoints = director.courses()[0].checkpoints();
    assert!(checkpoints[0].collected && checkpoints[1].collected);
    assert!(!checkpoints[2].collected);
}

#[test]
fn collecting_a_checkpoint_requests_effect_and_sound() {
    let mut director = RaceDirector::new(vec![circuit_course("island_circuit", 3)], Vec::new());
    start_and_go(&mut director, 0);

    let effects = director.update(0.1, &player_at(DVec3::new(0.0, 20.0, 0.0)));
    assert!(effects.contains(&Effect::Sound(SoundEffect::CheckpointCollect)));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::CollectionBurst { .. })));
}

#[test]
fn reaching_the_finish_completes_and_records_the_time() {
    let mut director = RaceDirector::new(vec![circuit_course("island_circuit", 3)], Vec::new());
    start_and_go(&mut director, 0);

    director.update(0.5, &player_at(DVec3::new(0.0, 20.0, 0.0)));
    director.update(0.5, &player_at(DVec3::new(100.0, 20.0, 0.0)));
    let effects = director.update(0.5, &player_at(DVec3::new(200.0, 20.0, 0.0)));

    assert!(director.is_idle());
    assert!(effects.contains(&Effect::Sound(SoundEffect::RaceComplete)));
    assert!(effects.contains(&Effect::Sound(SoundEffect::NewRecord)));
    // the finishing frame's dt counts toward the clock
    assert_eq!(
        director.best_results().get("island_circuit"),
        Some(Score::Time(Duration::from_secs_f64(1.5)))
    );

    // markers are hidden again
    assert!(director.courses()[0]
        .checkpoints()
        .iter()
        .all(|c| !c.visible));
}

#[test]
fn first_completion_always_flags_a_new_record() {
    let mut director = RaceDirector::new(vec![circuit_course("island_circuit", 2)], Vec::new());
    start_and_go(&mut director, 0);

    director.update(0.5, &player_at(DVec3::new(0.0, 20.0, 0.0)));
    let effects = director.update(0.5, &player_at(DVec3::new(100.0, 20.0, 0.0)));

    let dialog = effects.iter().find_map(|e| match e {
        Effect::Ui(UiUpdate::ResultDialog { text, .. }) => Some(text.clone()),
        _ => None,
    });
    assert!(dialog.expect("no result dialog").contains("NEW RECORD!"));
}

#[test]
fn worse_times_leave_the_best_result_alone() {
    let mut director = RaceDirector::new(vec![circuit_course("island_circuit", 2)], Vec::new());

    // first run: 1.0s total
    start_and_go(&mut director, 0);
    director.update(0.5, &player_at(DVec3::new(0.0, 20.0, 0.0)));
    director.update(0.5, &player_at(DVec3::new(100.0, 20.0, 0.0)));

    // second run dawdles: 3.0s total
    start_and_go(&mut director, 0);
    director.update(0.5, &player_at(DVec3::new(0.0, 20.0, 0.0)));
    director.update(2.0, &nowhere());
    let effects = director.update(0.5, &player_at(DVec3::new(100.0, 20.0, 0.0)));

    assert!(director.is_idle());
    assert!(!effects.contains(&Effect::Sound(SoundEffect::NewRecord)));
    let dialog = effects.iter().find_map(|e| match e {
        Effect::Ui(UiUpdate::ResultDialog { text, .. }) => Some(text.clone()),
        _ => None,
    });
    assert!(!dialog.expect("no result dialog").contains("NEW RECORD!"));
    assert_eq!(
        director.best_results().get("island_circuit"),
        Some(Score::Time(Duration::from_secs_f64(1.0)))
    );
}

#[test]
fn starting_twice_leaves_the_running_attempt_untouched() {
    let courses = vec![
        circuit_course("island_circuit", 3),
        circuit_course("celestial_dash", 3),
    ];
    let mut director = RaceDirector::new(courses, Vec::new());
    start_and_go(&mut director, 0);
    director.update(0.25, &player_at(DVec3::new(0.0, 20.0, 0.0)));

    let effects = director.start(1);
    assert!(effects.is_empty());

    match director.phase() {
        RacePhase::Running { attempt } => {
            assert_eq!(attempt.course_index, 0);
            assert_eq!(attempt.timer_secs, 0.25);
        }
        _ => panic!("attempt should still be running"),
    }
    assert_eq!(current_checkpoint(&director), 1);
    // the second course's markers never came on
    assert!(director.courses()[1]
        .checkpoints()
        .iter()
        .all(|c| !c.visible));
}

#[test]
fn time_bonuses_collect_at_most_once_each() {
    let mut director = RaceDirector::new(vec![time_attack_course(3, 60.0)], Vec::new());
    start_and_go(&mut director, 0);

    let at_bonus = player_at(DVec3::new(0.0, 20.0, 0.0));
    let effects = director.update(1.0, &at_bonus);
    assert!(effects.contains(&Effect::Sound(SoundEffect::BonusCollect)));

    // loitering inside the ring does not double-collect
    let effects = director.update(1.0, &at_bonus);
    assert!(!effects.contains(&Effect::Sound(SoundEffect::BonusCollect)));

    match director.phase() {
        RacePhase::Running { attempt } => {
            // 60 start, -2.0 elapsed, +10 banked once
            assert!((attempt.timer_secs - 68.0).abs() < 1e-9);
        }
        _ => panic!("attempt should still be running"),
    }
}

#[test]
fn time_attack_timeout_completes_with_the_frozen_bonus_count() {
    let mut director = RaceDirector::new(vec![time_attack_course(3, 5.0)], Vec::new());
    start_and_go(&mut director, 0);

    director.update(1.0, &player_at(DVec3::new(0.0, 20.0, 0.0)));
    director.update(1.0, &player_at(DVec3::new(100.0, 20.0, 0.0)));

    // run the clock out; completion, not failure
    let effects = director.update(30.0, &nowhere());
    assert!(director.is_idle());
    assert!(effects.contains(&Effect::Sound(SoundEffect::RaceComplete)));
    assert_eq!(
        director.best_results().get("time_attack"),
        Some(Score::Bonuses(2))
    );
}

#[test]
fn obstacle_collision_fails_the_attempt_regardless_of_progress() {
    let hit_point = DVec3::new(50.0, 20.0, 0.0);
    let mut director = RaceDirector::new(
        vec![gauntlet_course()],
        vec![parked_obstacle(hit_point)],
    );
    start_and_go(&mut director, 0);

    director.update(0.1, &player_at(DVec3::new(0.0, 20.0, 0.0)));
    assert_eq!(current_checkpoint(&director), 1);
    assert!(director.obstacles().iter().all(|o| o.visible));

    let effects = director.update(0.1, &player_at(hit_point));
    assert!(director.is_idle());
    assert!(effects.contains(&Effect::Sound(SoundEffect::ObstacleHit)));
    assert!(effects.contains(&Effect::Sound(SoundEffect::RaceFailed)));
    assert!(!effects.contains(&Effect::Sound(SoundEffect::RaceComplete)));

    // nothing recorded, obstacles put away again
    assert_eq!(director.best_results().get("obstacle_course"), None);
    assert!(director.obstacles().iter().all(|o| !o.visible));
}

#[test]
fn cancel_during_countdown_discards_the_attempt_cleanly() {
    let mut director = RaceDirector::new(vec![circuit_course("island_circuit", 3)], Vec::new());
    director.start(0);
    assert!(matches!(director.phase(), RacePhase::Countdown { .. }));

    let effects = director.cancel();
    assert!(director.is_idle());
    assert!(effects.contains(&Effect::Sound(SoundEffect::RaceFailed)));
    assert!(director.courses()[0]
        .checkpoints()
        .iter()
        .all(|c| !c.visible));

    // the dead countdown never promotes anything
    director.update(0.1, &nowhere());
    assert!(director.is_idle());
    assert_eq!(director.best_results().get("island_circuit"), None);
}

#[test]
fn escape_cancels_and_r_toggles_the_menu_only_while_idle() {
    let mut director = RaceDirector::new(vec![circuit_course("island_circuit", 3)], Vec::new());

    let menu_toggle = InputSnapshot {
        menu_toggle_pressed: true,
        ..Default::default()
    };
    let cancel = InputSnapshot {
        cancel_pressed: true,
        ..Default::default()
    };

    let effects = director.handle_input(&menu_toggle);
    assert!(effects.iter().any(|e| matches!(
        e,
        Effect::Ui(UiUpdate::CourseMenu { visible: true, .. })
    )));

    // picking an entry closes the menu and starts the countdown
    let pick = InputSnapshot {
        menu_selection: Some(0),
        ..Default::default()
    };
    director.handle_input(&pick);
    assert!(matches!(director.phase(), RacePhase::Countdown { .. }));

    // the menu toggle is ignored while an attempt is live
    let effects = director.handle_input(&menu_toggle);
    assert!(effects.is_empty());

    director.handle_input(&cancel);
    assert!(director.is_idle());
}

#[test]
fn empty_sequential_courses_refuse_to_start() {
    let mut director = RaceDirector::new(vec![circuit_course("island_circuit", 0)], Vec::new());
    let effects = director.start(0);
    assert!(director.is_idle());
    assert!(effects.is_empty());
}

#[test]
fn empty_time_attack_still_completes_at_timeout() {
    let mut director = RaceDirector::new(vec![time_attack_course(0, 1.0)], Vec::new());
    start_and_go(&mut director, 0);

    director.update(2.0, &nowhere());
    assert!(director.is_idle());
    assert_eq!(
        director.best_results().get("time_attack"),
        Some(Score::Bonuses(0))
    );
}

#[test]
fn updates_while_idle_are_no_ops() {
    let mut director = RaceDirector::new(vec![circuit_course("island_circuit", 3)], Vec::new());
    let effects = director.update(0.5, &player_at(DVec3::new(0.0, 20.0, 0.0)));
    assert!(effects.is_empty());
    assert!(director.is_idle());
}
