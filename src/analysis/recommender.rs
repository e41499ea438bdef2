//! Band recommendation based on recent set difficulty

use serde::Serialize;

use super::history::last_sessions_for_exercise;
use crate::bands::Band;
use crate::workout::{Session, Set};

/// Average difficulty above this means the band is too hard
pub const HARD_DIFFICULTY: f64 = 4.5;

pub const NO_DATA_MESSAGE: &str =
    "No previous data for this exercise. Start with your preferred band.";

/// Average difficulty of one band over the recent sets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandPerformance {
    pub band: Band,
    pub avg_difficulty: f64,
}

/// Suggested band for the next session of an exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub exercise: String,
    pub message: String,
    pub recommended_band: Option<Band>,
    pub band_data: Option<Vec<BandPerformance>>,
}

impl Recommendation {
    fn no_data(exercise: &str) -> Self {
        Self {
            exercise: exercise.to_string(),
            message: NO_DATA_MESSAGE.to_string(),
            recommended_band: None,
            band_data: None,
        }
    }
}

/// Recommend a band for `exercise` from the last three sessions of `group` that include it
pub fn recommend(history: &[Session], group: &str, exercise: &str) -> Recommendation {
    let sessions = last_sessions_for_exercise(history, group, exercise);
    if sessions.is_empty() {
        return Recommendation::no_data(exercise);
    }

    let recent_sets: Vec<&Set> = sessions
        .iter()
        .filter_map(|s| s.sets_for(exercise))
        .flatten()
        .collect();

    let band_data: Vec<BandPerformance> = most_used_bands(&recent_sets, 2)
        .into_iter()
        .map(|band| BandPerformance {
            band,
            avg_difficulty: average_difficulty(&recent_sets, band),
        })
        .collect();

    let recommended = choose_band(&band_data);
    let message = if band_data.len() == 1 {
        format!(
            "You've only used the {} band recently. Consider trying other bands to find the optimal challenge.",
            recommended
        )
    } else {
        format!(
            "Based on your recent performance, the {} band is recommended for optimal challenge.",
            recommended
        )
    };

    Recommendation {
        exercise: exercise.to_string(),
        message,
        recommended_band: Some(recommended),
        band_data: Some(band_data),
    }
}

/// One recommendation per exercise, in the given order
pub fn recommend_group(history: &[Session], group: &str, exercises: &[&str]) -> Vec<Recommendation> {
    exercises
        .iter()
        .map(|exercise| recommend(history, group, exercise))
        .collect()
}

/// Up to `limit` bands by usage count; equal counts keep first-seen order
fn most_used_bands(sets: &[&Set], limit: usize) -> Vec<Band> {
    let mut counts: Vec<(Band, usize)> = Vec::new();
    for set in sets {
        match counts.iter_mut().find(|(band, _)| *band == set.band) {
            Some((_, count)) => *count += 1,
            None => counts.push((set.band, 1)),
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(band, _)| band).collect()
}

fn average_difficulty(sets: &[&Set], band: Band) -> f64 {
    let difficulties: Vec<f64> = sets
        .iter()
        .filter(|s| s.band == band)
        .map(|s| f64::from(s.difficulty))
        .collect();

    difficulties.iter().sum::<f64>() / difficulties.len() as f64
}

/// Pick between the most used band and the runner-up.
/// `band_data` holds one or two entries, most used first.
fn choose_band(band_data: &[BandPerformance]) -> Band {
    let primary = &band_data[0];
    let Some(secondary) = band_data.get(1) else {
        return primary.band;
    };

    let primary_hard = primary.avg_difficulty > HARD_DIFFICULTY;
    let secondary_hard = secondary.avg_difficulty > HARD_DIFFICULTY;

    match (primary_hard, secondary_hard) {
        // Comfortable on both: push toward the harder one
        (false, false) => {
            if primary.avg_difficulty >= secondary.avg_difficulty {
                primary.band
            } else {
                secondary.band
            }
        }
        // Most used band is too hard: back off
        (true, false) => secondary.band,
        _ => primary.band,
    }
}
