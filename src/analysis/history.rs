//! History queries over the session log

use crate::workout::Session;

/// How many past sessions feed a recommendation
pub const RECENT_SESSION_LIMIT: usize = 3;

/// Most recent sessions (up to 3) of `group` with at least one set for `exercise`,
/// newest first. Sessions sharing a date keep their log order.
pub fn last_sessions_for_exercise<'a>(
    history: &'a [Session],
    group: &str,
    exercise: &str,
) -> Vec<&'a Session> {
    let mut sessions: Vec<&Session> = history
        .iter()
        .filter(|s| s.group == group && s.sets_for(exercise).is_some())
        .collect();

    sessions.sort_by(|a, b| b.date.cmp(&a.date));
    sessions.truncate(RECENT_SESSION_LIMIT);
    sessions
}

/// All sessions, or only those of `group`, newest first
pub fn sessions_for_group<'a>(history: &'a [Session], group: Option<&str>) -> Vec<&'a Session> {
    let mut sessions: Vec<&Session> = history
        .iter()
        .filter(|s| group.is_none_or(|g| s.group == g))
        .collect();

    sessions.sort_by(|a, b| b.date.cmp(&a.date));
    sessions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::Band;
    use chrono::{Duration, Utc};

    fn create_session(group: &str, days_ago: i64, exercises: &[&str]) -> Session {
        let mut session = Session::start(group, Utc::now() - Duration::days(days_ago));
        for exercise in exercises {
            session.record_set(exercise, 15, Band::Green, 3);
        }
        session
    }

    #[test]
    fn test_empty_history() {
        let sessions = last_sessions_for_exercise(&[], "strength", "Squats");
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_bounded_to_three_newest_first() {
        let history = vec![
            create_session("strength", 5, &["Squats"]),
            create_session("strength", 1, &["Squats"]),
            create_session("strength", 4, &["Squats"]),
            create_session("strength", 2, &["Squats"]),
            create_session("strength", 3, &["Squats"]),
        ];

        let sessions = last_sessions_for_exercise(&history, "strength", "Squats");
        assert_eq!(sessions.len(), 3);
        assert!(sessions[0].date > sessions[1].date);
        assert!(sessions[1].date > sessions[2].date);
        assert_eq!(sessions[0].date, history[1].date);
        assert_eq!(sessions[2].date, history[4].date);
    }

    #[test]
    fn test_excludes_sessions_without_exercise() {
        let history = vec![
            create_session("strength", 3, &["Squats"]),
            create_session("strength", 2, &["Deadlifts"]),
            create_session("cardio", 1, &["Squats"]),
        ];

        let sessions = last_sessions_for_exercise(&history, "strength", "Squats");
        assert_eq!(sessions.len(), 1);
        assert!(sessions.iter().all(|s| s.sets_for("Squats").is_some()));
        assert_eq!(sessions[0].group, "strength");
    }

    #[test]
    fn test_same_date_keeps_log_order() {
        let date = Utc::now();
        let mut first = Session::start("strength", date);
        first.record_set("Squats", 10, Band::Blue, 3);
        let mut second = Session::start("strength", date);
        second.record_set("Squats", 12, Band::Red, 4);

        let history = vec![first, second];
        let sessions = last_sessions_for_exercise(&history, "strength", "Squats");
        assert_eq!(sessions[0].sets_for("Squats").unwrap()[0].band, Band::Blue);
        assert_eq!(sessions[1].sets_for("Squats").unwrap()[0].band, Band::Red);
    }

    #[test]
    fn test_sessions_for_group() {
        let history = vec![
            create_session("strength", 3, &["Squats"]),
            create_session("cardio", 1, &["Running"]),
            create_session("strength", 2, &["Deadlifts"]),
        ];

        let strength = sessions_for_group(&history, Some("strength"));
        assert_eq!(strength.len(), 2);
        assert_eq!(strength[0].exercises[0].exercise, "Deadlifts");

        let all = sessions_for_group(&history, None);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].group, "cardio");
    }
}
