//! Analysis module - history queries, band recommendations and statistics
//!
//! Features:
//! - Recent sessions for a group/exercise pair
//! - Band recommendation from recent set difficulty
//! - Volume, frequency and band usage statistics

pub mod history;
pub mod recommender;

pub use history::{last_sessions_for_exercise, sessions_for_group};
pub use recommender::{BandPerformance, Recommendation, recommend, recommend_group};

use crate::bands::Band;
use crate::workout::{Session, Set};

/// Workout history statistics
pub struct Analytics {
    sessions: Vec<Session>,
}

impl Analytics {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }

    /// Sets of `exercise`, optionally only from sessions of `group`
    fn sets_of<'a>(
        &'a self,
        group: Option<&'a str>,
        exercise: &'a str,
    ) -> impl Iterator<Item = &'a Set> + 'a {
        self.sessions
            .iter()
            .filter(move |s| group.is_none_or(|g| s.group == g))
            .filter_map(move |s| s.sets_for(exercise))
            .flatten()
    }

    /// Total reps recorded for an exercise
    pub fn total_volume(&self, group: Option<&str>, exercise: &str) -> u32 {
        self.sets_of(group, exercise).map(|s| s.reps).sum()
    }

    /// Sessions per week across the span of recorded dates
    pub fn weekly_frequency(&self) -> f64 {
        if self.sessions.len() < 2 {
            return 0.0;
        }

        let dates: Vec<_> = self.sessions.iter().map(|s| s.date.date_naive()).collect();
        let (Some(first), Some(last)) = (dates.iter().min(), dates.iter().max()) else {
            return 0.0;
        };
        let days = (*last - *first).num_days() as f64;

        if days == 0.0 {
            return self.sessions.len() as f64;
        }

        (self.sessions.len() as f64 / days) * 7.0
    }

    /// Number of sets per band for an exercise, weakest band first, unused bands skipped
    pub fn band_usage(&self, group: Option<&str>, exercise: &str) -> Vec<(Band, usize)> {
        Band::all()
            .iter()
            .map(|band| {
                let count = self
                    .sets_of(group, exercise)
                    .filter(|s| s.band == *band)
                    .count();
                (*band, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap()
    }

    fn create_session(exercise: &str, sets: &[(u32, Band)]) -> Session {
        create_session_in("strength", exercise, sets, 0)
    }

    fn create_session_in(group: &str, exercise: &str, sets: &[(u32, Band)], days_ago: i64) -> Session {
        let mut session = Session::start(group, base_date() - Duration::days(days_ago));
        for (reps, band) in sets {
            session.record_set(exercise, *reps, *band, 3);
        }
        session
    }

    #[test]
    fn test_analytics_new() {
        let analytics = Analytics::new(vec![]);
        assert_eq!(analytics.sessions.len(), 0);
    }

    #[test]
    fn test_total_volume_multiple_sessions() {
        let sessions = vec![
            create_session("Squats", &[(15, Band::Green), (12, Band::Green)]),
            create_session("Squats", &[(10, Band::Blue)]),
            create_session("Deadlifts", &[(8, Band::Red)]),
        ];
        let analytics = Analytics::new(sessions);
        assert_eq!(analytics.total_volume(None, "Squats"), 37);
        assert_eq!(analytics.total_volume(None, "Deadlifts"), 8);
    }

    #[test]
    fn test_total_volume_not_found() {
        let analytics = Analytics::new(vec![create_session("Squats", &[(15, Band::Green)])]);
        assert_eq!(analytics.total_volume(None, "Yoga"), 0);
    }

    #[test]
    fn test_total_volume_by_group() {
        let sessions = vec![
            create_session_in("strength", "Squats", &[(15, Band::Green)], 1),
            create_session_in("legs", "Squats", &[(20, Band::Red), (20, Band::Red)], 0),
        ];
        let analytics = Analytics::new(sessions);
        assert_eq!(analytics.total_volume(Some("strength"), "Squats"), 15);
        assert_eq!(analytics.total_volume(Some("legs"), "Squats"), 40);
        assert_eq!(analytics.total_volume(None, "Squats"), 55);
        assert_eq!(analytics.total_volume(Some("cardio"), "Squats"), 0);
    }

    #[test]
    fn test_weekly_frequency_empty() {
        let analytics = Analytics::new(vec![]);
        assert_eq!(analytics.weekly_frequency(), 0.0);
    }

    #[test]
    fn test_weekly_frequency_single_session() {
        let analytics = Analytics::new(vec![create_session("Squats", &[(15, Band::Green)])]);
        assert_eq!(analytics.weekly_frequency(), 0.0);
    }

    #[test]
    fn test_weekly_frequency_same_day() {
        let sessions = vec![
            create_session("Squats", &[(15, Band::Green)]),
            create_session("Deadlifts", &[(10, Band::Red)]),
        ];
        let analytics = Analytics::new(sessions);
        assert_eq!(analytics.weekly_frequency(), 2.0);
    }

    #[test]
    fn test_weekly_frequency_over_week() {
        let sessions = vec![
            create_session_in("strength", "Squats", &[(15, Band::Green)], 7),
            create_session("Squats", &[(15, Band::Green)]),
        ];
        let analytics = Analytics::new(sessions);
        assert_eq!(analytics.weekly_frequency(), 2.0);
    }

    #[test]
    fn test_band_usage_in_strength_order() {
        let sessions = vec![
            create_session("Squats", &[(15, Band::Red), (15, Band::Green)]),
            create_session("Squats", &[(15, Band::Red)]),
        ];
        let analytics = Analytics::new(sessions);
        assert_eq!(
            analytics.band_usage(None, "Squats"),
            vec![(Band::Green, 1), (Band::Red, 2)]
        );
        assert!(analytics.band_usage(None, "Yoga").is_empty());
    }

    #[test]
    fn test_band_usage_by_group() {
        let sessions = vec![
            create_session_in("strength", "Squats", &[(15, Band::Blue)], 1),
            create_session_in("legs", "Squats", &[(15, Band::Purple)], 0),
        ];
        let analytics = Analytics::new(sessions);
        assert_eq!(analytics.band_usage(Some("legs"), "Squats"), vec![(Band::Purple, 1)]);
    }
}
