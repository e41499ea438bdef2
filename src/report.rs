//! Plain-text reports for the command line

use crate::analysis::{Recommendation, last_sessions_for_exercise};
use crate::workout::Session;

/// Recommendation text with the per-band averages behind it
pub fn recommendation_report(rec: &Recommendation) -> String {
    let mut lines = vec![rec.exercise.clone(), format!("  {}", rec.message)];
    if let Some(data) = &rec.band_data {
        lines.push("  Recent band performance:".to_string());
        for d in data {
            lines.push(format!("  {} band: avg difficulty {:.2}", d.band, d.avg_difficulty));
        }
    }
    lines.join("\n")
}

/// Every set of a session, one line each
pub fn session_report(session: &Session) -> String {
    let mut lines = vec![format!(
        "{} | {}",
        session.date.format("%Y-%m-%d %H:%M"),
        session.group
    )];
    if session.exercises.is_empty() {
        lines.push("  no sets recorded".to_string());
    }
    for log in &session.exercises {
        for set in &log.sets {
            lines.push(format!(
                "  {:20} #{} | {:3} reps | {:8} | difficulty {}",
                log.exercise, set.set_number, set.reps, set.band, set.difficulty
            ));
        }
    }
    lines.join("\n")
}

/// Sets of `exercise` from the recent sessions that feed its recommendation
pub fn exercise_history_report(history: &[Session], group: &str, exercise: &str) -> String {
    let sessions = last_sessions_for_exercise(history, group, exercise);
    let mut lines = vec![format!("Last {} workout(s) for {}:", sessions.len(), exercise)];

    for session in sessions {
        lines.push(format!("  Workout on {}", session.date.format("%Y-%m-%d")));
        for set in session.sets_for(exercise).unwrap_or_default() {
            lines.push(format!(
                "    set {} | {:3} reps | {:8} | difficulty {}",
                set.set_number, set.reps, set.band, set.difficulty
            ));
        }
    }
    lines.join("\n")
}
