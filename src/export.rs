//! History export - CSV rows per set, or the full history as JSON

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;
use tracing::info;

use crate::bands::Band;
use crate::workout::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

/// One exported set, flattened with its session info
#[derive(Debug, Serialize)]
struct SetRecord<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Group")]
    group: &'a str,
    #[serde(rename = "Exercise")]
    exercise: &'a str,
    #[serde(rename = "Set")]
    set_number: u32,
    #[serde(rename = "Reps")]
    reps: u32,
    #[serde(rename = "Band")]
    band: Band,
    #[serde(rename = "Difficulty")]
    difficulty: u8,
}

/// Write one CSV row per recorded set, in history order
pub fn write_csv<W: Write>(history: &[Session], writer: W) -> Result<usize> {
    let mut writer = Writer::from_writer(writer);
    let mut rows = 0;

    for session in history {
        let date = session.date.format("%Y-%m-%d").to_string();
        for log in &session.exercises {
            for set in &log.sets {
                writer
                    .serialize(SetRecord {
                        date: date.clone(),
                        group: &session.group,
                        exercise: &log.exercise,
                        set_number: set.set_number,
                        reps: set.reps,
                        band: set.band,
                        difficulty: set.difficulty,
                    })
                    .context("failed to write CSV record")?;
                rows += 1;
            }
        }
    }

    if rows == 0 {
        writer
            .write_record(["Date", "Group", "Exercise", "Set", "Reps", "Band", "Difficulty"])
            .context("failed to write CSV header")?;
    }

    writer.flush().context("failed to flush CSV")?;
    Ok(rows)
}

pub fn write_json<W: Write>(history: &[Session], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, history).context("failed to write JSON")?;
    Ok(())
}

/// Export the history to `path`
pub fn export_history(history: &[Session], path: &Path, format: Format) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create export file '{}'", path.display()))?;

    match format {
        Format::Csv => {
            let rows = write_csv(history, file)?;
            info!(path = %path.display(), rows, "history exported as CSV");
        }
        Format::Json => {
            write_json(history, file)?;
            info!(path = %path.display(), sessions = history.len(), "history exported as JSON");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_history() -> Vec<Session> {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap();
        let mut session = Session::start("strength", date);
        session.record_set("Squats", 15, Band::Green, 3);
        session.record_set("Squats", 12, Band::Blue, 4);
        session.record_set("Bench Press", 10, Band::NoBand, 2);
        session.finish(date);
        vec![session]
    }

    #[test]
    fn test_csv_rows() {
        let mut out = Vec::new();
        let rows = write_csv(&create_history(), &mut out).unwrap();
        assert_eq!(rows, 3);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Date,Group,Exercise,Set,Reps,Band,Difficulty");
        assert_eq!(lines[1], "2024-03-09,strength,Squats,1,15,Green,3");
        assert_eq!(lines[2], "2024-03-09,strength,Squats,2,12,Blue,4");
        assert_eq!(lines[3], "2024-03-09,strength,Bench Press,1,10,No Band,2");
    }

    #[test]
    fn test_csv_empty_history_has_header() {
        let mut out = Vec::new();
        let rows = write_csv(&[], &mut out).unwrap();
        assert_eq!(rows, 0);
        assert_eq!(
            String::from_utf8(out).unwrap().trim_end(),
            "Date,Group,Exercise,Set,Reps,Band,Difficulty"
        );
    }

    #[test]
    fn test_json_export_reads_back() {
        let history = create_history();
        let mut out = Vec::new();
        write_json(&history, &mut out).unwrap();

        let restored: Vec<Session> = serde_json::from_slice(&out).unwrap();
        assert_eq!(restored, history);
    }

    #[test]
    fn test_export_history_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workout_history.csv");

        export_history(&create_history(), &path, Format::Csv).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("history.json");
        assert!(export_history(&create_history(), &path, Format::Json).is_err());
    }
}
