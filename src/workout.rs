//! Workout records - sessions and the sets recorded in them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bands::Band;

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;

/// One recorded set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub set_number: u32,
    pub reps: u32,
    pub band: Band,
    pub difficulty: u8,
}

impl Set {
    /// Build a set, clamping reps to >= 1 and difficulty to 1..=5
    pub fn new(set_number: u32, reps: u32, band: Band, difficulty: u8) -> Self {
        Self {
            set_number,
            reps: reps.max(1),
            band,
            difficulty: difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY),
        }
    }
}

/// Sets recorded for one exercise within a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseLog {
    pub exercise: String,
    pub sets: Vec<Set>,
}

/// Workout session for a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Option<i64>,
    pub group: String,
    pub date: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Exercises in the order they were first recorded
    pub exercises: Vec<ExerciseLog>,
}

impl Session {
    /// Start an empty in-progress session
    pub fn start(group: &str, date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            group: group.to_string(),
            date,
            finished_at: None,
            exercises: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Append a set for `exercise`, numbered after the sets already recorded for it
    pub fn record_set(&mut self, exercise: &str, reps: u32, band: Band, difficulty: u8) -> Set {
        let index = match self.exercises.iter().position(|log| log.exercise == exercise) {
            Some(index) => index,
            None => {
                self.exercises.push(ExerciseLog {
                    exercise: exercise.to_string(),
                    sets: Vec::new(),
                });
                self.exercises.len() - 1
            }
        };

        let log = &mut self.exercises[index];
        let set = Set::new(log.sets.len() as u32 + 1, reps, band, difficulty);
        log.sets.push(set.clone());
        set
    }

    /// Sets recorded for `exercise`, or `None` if it has none
    pub fn sets_for(&self, exercise: &str) -> Option<&[Set]> {
        self.exercises
            .iter()
            .find(|log| log.exercise == exercise && !log.sets.is_empty())
            .map(|log| log.sets.as_slice())
    }

    /// Total number of sets across all exercises
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|log| log.sets.len()).sum()
    }

    pub fn finish(&mut self, at: DateTime<Utc>) {
        self.finished_at = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clamps_reps_and_difficulty() {
        let set = Set::new(1, 0, Band::Green, 9);
        assert_eq!(set.reps, 1);
        assert_eq!(set.difficulty, 5);

        let set = Set::new(1, 12, Band::Green, 0);
        assert_eq!(set.reps, 12);
        assert_eq!(set.difficulty, 1);
    }

    #[test]
    fn test_record_set_numbers_are_contiguous_per_exercise() {
        let mut session = Session::start("strength", Utc::now());
        session.record_set("Squats", 15, Band::Blue, 3);
        session.record_set("Deadlifts", 10, Band::Red, 4);
        session.record_set("Squats", 15, Band::Blue, 4);
        let third = session.record_set("Squats", 12, Band::Orange, 5);

        assert_eq!(third.set_number, 3);
        let numbers: Vec<_> = session
            .sets_for("Squats")
            .unwrap()
            .iter()
            .map(|s| s.set_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(session.sets_for("Deadlifts").unwrap()[0].set_number, 1);
    }

    #[test]
    fn test_exercises_keep_first_recorded_order() {
        let mut session = Session::start("strength", Utc::now());
        session.record_set("Deadlifts", 10, Band::Red, 4);
        session.record_set("Squats", 15, Band::Blue, 3);
        session.record_set("Deadlifts", 10, Band::Red, 4);

        let names: Vec<_> = session.exercises.iter().map(|l| l.exercise.as_str()).collect();
        assert_eq!(names, vec!["Deadlifts", "Squats"]);
        assert_eq!(session.set_count(), 3);
    }

    #[test]
    fn test_sets_for_missing_exercise() {
        let mut session = Session::start("cardio", Utc::now());
        assert!(session.sets_for("Running").is_none());

        session.exercises.push(ExerciseLog {
            exercise: "Running".to_string(),
            sets: Vec::new(),
        });
        assert!(session.sets_for("Running").is_none());
    }

    #[test]
    fn test_finish() {
        let mut session = Session::start("cardio", Utc::now());
        assert!(!session.is_finished());
        session.finish(Utc::now());
        assert!(session.is_finished());
    }
}
