use std::collections::HashMap;
use std::time::Duration;

// Best scores live for the session only; nothing here touches disk.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Score {
    // completion time for sequential courses; lower wins
    Time(Duration),
    // bonuses banked in a time attack; higher wins
    Bonuses(u32),
}

impl Score {
    pub fn beats(&self, other: &Score) -> bool {
        match (self, other) {
            (Score::Time(mine), Score::Time(theirs)) => mine < theirs,
            (Score::Bonuses(mine), Score::Bonuses(theirs)) => mine > theirs,
            // a course can't change scoring kind mid-session
            (_, _) => false,
        }
    }
}

#[derive(Default)]
pub struct BestResults {
    scores: HashMap<String, Score>,
}

impl BestResults {
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
        }
    }

    pub fn get(&self, course_id: &str) -> Option<Score> {
        self.scores.get(course_id).copied()
    }

    // Store the score if it strictly beats the stored one (or there is
    // none). Returns whether this set a new record.
    pub fn record(&mut self, course_id: &str, score: Score) -> bool {
        match self.scores.get(course_id) {
            Some(best) if !score.beats(best) => false,
            _ => {
                self.scores.insert(course_id.to_string(), score);
                true
            }
        }
    }
}
