//! Database module - SQLite storage for the catalog and workout history

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use tracing::{debug, info};

use crate::bands::Band;
use crate::catalog::Catalog;
use crate::workout::{Session, Set};

/// Session ids bound per `IN (...)` query, well under SQLite's variable limit
const SET_QUERY_BATCH: usize = 500;

/// Database wrapper
pub struct Database {
    conn: Connection,
}

/// Fixed-width RFC 3339 so stored timestamps sort as text
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("invalid timestamp '{}'", value))?
        .with_timezone(&Utc))
}

struct SetRow {
    session_id: i64,
    exercise: String,
    set_number: u32,
    reps: u32,
    band: String,
    difficulty: u8,
}

impl Database {
    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database '{}'", path))?;
        let db = Self { conn };
        db.init_schema()?;
        debug!(path, "database opened");
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS catalog (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                data TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                grp TEXT NOT NULL,
                date TEXT NOT NULL,
                finished_at TEXT
            );
            CREATE TABLE IF NOT EXISTS sets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id INTEGER NOT NULL REFERENCES sessions(id),
                exercise TEXT NOT NULL,
                set_number INTEGER NOT NULL,
                reps INTEGER NOT NULL,
                band TEXT NOT NULL,
                difficulty INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_sets_session ON sets(session_id);",
        )?;
        Ok(())
    }

    /// Stored catalog, or the default one if nothing was saved yet
    pub fn load_catalog(&self) -> Result<Catalog> {
        let data: Option<String> = self
            .conn
            .query_row("SELECT data FROM catalog WHERE id = 1", [], |row| row.get(0))
            .optional()?;

        match data {
            Some(json) => serde_json::from_str(&json).context("stored catalog is corrupt"),
            None => Ok(Catalog::default()),
        }
    }

    pub fn save_catalog(&self, catalog: &Catalog) -> Result<()> {
        let json = serde_json::to_string(catalog)?;
        self.conn.execute(
            "INSERT INTO catalog (id, data) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data",
            params![json],
        )?;
        debug!(groups = catalog.groups.len(), "catalog saved");
        Ok(())
    }

    /// Start a workout for `group`; only one workout may be in progress
    pub fn start_session(&self, group: &str) -> Result<Session> {
        if let Some(current) = self.current_session()? {
            bail!(
                "a '{}' workout started {} is still in progress, finish or discard it first",
                current.group,
                current.date.format("%Y-%m-%d %H:%M")
            );
        }

        let mut session = Session::start(group, Utc::now());
        self.conn.execute(
            "INSERT INTO sessions (grp, date) VALUES (?1, ?2)",
            params![session.group, format_timestamp(session.date)],
        )?;
        session.id = Some(self.conn.last_insert_rowid());
        info!(group, id = session.id, "workout started");
        Ok(session)
    }

    /// Workout in progress, if any
    pub fn current_session(&self) -> Result<Option<Session>> {
        let mut sessions = self.load_sessions("WHERE finished_at IS NULL")?;
        Ok(sessions.pop())
    }

    /// Record a set in the workout in progress
    pub fn record_set(&self, exercise: &str, reps: u32, band: Band, difficulty: u8) -> Result<Set> {
        let Some(mut session) = self.current_session()? else {
            bail!("no workout in progress, start one first");
        };
        let session_id = session.id.context("session without id")?;

        let set = session.record_set(exercise, reps, band, difficulty);
        self.conn.execute(
            "INSERT INTO sets (session_id, exercise, set_number, reps, band, difficulty)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                session_id,
                exercise,
                set.set_number,
                set.reps,
                set.band.label(),
                set.difficulty,
            ],
        )?;
        debug!(exercise, set_number = set.set_number, band = %set.band, "set recorded");
        Ok(set)
    }

    /// Finish the workout in progress and append it to the history
    pub fn finish_session(&self) -> Result<Session> {
        let Some(mut session) = self.current_session()? else {
            bail!("no workout in progress");
        };
        let session_id = session.id.context("session without id")?;

        session.finish(Utc::now());
        let finished_at = session.finished_at.map(format_timestamp);
        self.conn.execute(
            "UPDATE sessions SET finished_at = ?1 WHERE id = ?2",
            params![finished_at, session_id],
        )?;
        info!(group = %session.group, sets = session.set_count(), "workout finished");
        Ok(session)
    }

    /// Drop the workout in progress without keeping it
    pub fn discard_session(&self) -> Result<Option<Session>> {
        let Some(session) = self.current_session()? else {
            return Ok(None);
        };
        let session_id = session.id.context("session without id")?;

        self.conn.execute("DELETE FROM sets WHERE session_id = ?1", params![session_id])?;
        self.conn.execute("DELETE FROM sessions WHERE id = ?1", params![session_id])?;
        info!(group = %session.group, "workout discarded");
        Ok(Some(session))
    }

    /// Finished sessions in the order they were completed
    pub fn get_history(&self) -> Result<Vec<Session>> {
        self.load_sessions("WHERE finished_at IS NOT NULL ORDER BY finished_at, id")
    }

    fn load_sessions(&self, filter: &str) -> Result<Vec<Session>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT id, grp, date, finished_at FROM sessions {}", filter))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut sessions = Vec::with_capacity(rows.len());
        let mut index = HashMap::with_capacity(rows.len());
        for (id, group, date, finished_at) in rows {
            index.insert(id, sessions.len());
            sessions.push(Session {
                id: Some(id),
                group,
                date: parse_timestamp(&date)?,
                finished_at: finished_at.as_deref().map(parse_timestamp).transpose()?,
                exercises: Vec::new(),
            });
        }

        let ids: Vec<i64> = index.keys().copied().collect();
        for row in self.load_set_rows(&ids)? {
            let Some(&at) = index.get(&row.session_id) else {
                continue;
            };
            let session = &mut sessions[at];
            let band: Band = row.band.parse()?;
            let set = session.record_set(&row.exercise, row.reps, band, row.difficulty);
            if set.set_number != row.set_number {
                bail!(
                    "set numbers for '{}' in session {} are not contiguous",
                    row.exercise,
                    row.session_id
                );
            }
        }

        Ok(sessions)
    }

    /// Sets of the given sessions, in insertion order within each session
    fn load_set_rows(&self, session_ids: &[i64]) -> Result<Vec<SetRow>> {
        let mut rows = Vec::new();
        for ids in session_ids.chunks(SET_QUERY_BATCH) {
            let placeholders = vec!["?"; ids.len()].join(", ");
            let mut stmt = self.conn.prepare(&format!(
                "SELECT session_id, exercise, set_number, reps, band, difficulty
                 FROM sets WHERE session_id IN ({}) ORDER BY session_id, id",
                placeholders
            ))?;
            let batch = stmt
                .query_map(params_from_iter(ids), |row| {
                    Ok(SetRow {
                        session_id: row.get(0)?,
                        exercise: row.get(1)?,
                        set_number: row.get(2)?,
                        reps: row.get(3)?,
                        band: row.get(4)?,
                        difficulty: row.get(5)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            rows.extend(batch);
        }
        Ok(rows)
    }
}
