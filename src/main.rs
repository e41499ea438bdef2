//! bandwork - Resistance band workout tracker

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use bandwork::analysis::{Analytics, recommend, recommend_group, sessions_for_group};
use bandwork::bands::Band;
use bandwork::catalog::{Adjustment, Catalog, Group};
use bandwork::db::Database;
use bandwork::export::{self, Format};
use bandwork::report::{exercise_history_report, recommendation_report, session_report};
use bandwork::tui::App;

#[derive(Parser)]
#[command(name = "bandwork")]
#[command(author, version, about = "Resistance band workout tracker")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "BANDWORK_DB", default_value = "bandwork.db")]
    db: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// List workout groups and their exercises
    Groups,

    /// Manage workout groups
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },

    /// Manage the exercises of a group
    Exercise {
        #[command(subcommand)]
        action: ExerciseAction,
    },

    /// Start a workout for a group
    Start {
        /// Group key (e.g., "strength")
        group: String,
    },

    /// Record a set in the workout in progress
    Record {
        /// Exercise name (e.g., "Squats")
        exercise: String,

        /// Reps performed
        #[arg(short, long, default_value = "15")]
        reps: u32,

        /// Band used; defaults to the recommended band
        #[arg(short, long)]
        band: Option<Band>,

        /// Perceived difficulty, 1 (easy) to 5 (hard)
        #[arg(short, long, default_value = "3")]
        difficulty: u8,
    },

    /// Show the workout in progress
    Current,

    /// Finish the workout in progress
    Finish,

    /// Throw away the workout in progress
    Discard,

    /// Suggest bands for the next session
    Recommend {
        /// Group key
        group: String,

        /// Only this exercise
        exercise: Option<String>,
    },

    /// List workout history
    History {
        /// Filter by group key
        group: Option<String>,

        /// Number of workouts to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show training statistics
    Stats {
        /// Filter by exercise name
        exercise: Option<String>,

        /// Only count workouts of this group
        #[arg(short, long)]
        group: Option<String>,
    },

    /// Export workout history
    Export {
        /// Output file
        #[arg(default_value = "workout_history.csv")]
        path: PathBuf,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },
}

#[derive(Subcommand)]
enum GroupAction {
    /// Add a group; its key is derived from the name
    Add { name: String },
    /// Rename a group
    Rename { key: String, name: String },
    /// Delete a group
    Delete { key: String },
}

#[derive(Subcommand)]
enum ExerciseAction {
    /// Add an exercise (3 sets x 15 reps)
    Add { group: String, name: String },
    /// Rename an exercise
    Rename {
        group: String,
        exercise: String,
        name: String,
    },
    /// Delete an exercise
    Delete { group: String, exercise: String },
    /// Step target sets or reps by one
    Adjust {
        group: String,
        exercise: String,
        #[arg(value_enum)]
        adjustment: AdjustArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AdjustArg {
    MoreSets,
    FewerSets,
    MoreReps,
    FewerReps,
}

impl From<AdjustArg> for Adjustment {
    fn from(arg: AdjustArg) -> Self {
        match arg {
            AdjustArg::MoreSets => Adjustment::IncreaseSets,
            AdjustArg::FewerSets => Adjustment::DecreaseSets,
            AdjustArg::MoreReps => Adjustment::IncreaseReps,
            AdjustArg::FewerReps => Adjustment::DecreaseReps,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

impl From<ExportFormat> for Format {
    fn from(arg: ExportFormat) -> Self {
        match arg {
            ExportFormat::Csv => Format::Csv,
            ExportFormat::Json => Format::Json,
        }
    }
}

fn find_group<'a>(catalog: &'a Catalog, key: &str) -> Result<&'a Group> {
    catalog
        .group(key)
        .with_context(|| format!("unknown workout group '{}' (see `bandwork groups`)", key))
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = Database::open(&cli.db)?;

    match cli.command {
        Some(Commands::Tui) | None => {
            let mut app = App::new(db)?;
            app.run()?;
        }

        Some(Commands::Groups) => {
            let catalog = db.load_catalog()?;
            for group in &catalog.groups {
                println!("{} [{}]", group.name, group.key);
                for exercise in &group.exercises {
                    println!("  {} - {}x{}", exercise.name, exercise.sets, exercise.reps);
                }
            }
        }

        Some(Commands::Group { action }) => {
            let mut catalog = db.load_catalog()?;
            match action {
                GroupAction::Add { name } => {
                    let key = catalog.add_group(&name)?;
                    println!("Added group '{}' [{}]", name.trim(), key);
                }
                GroupAction::Rename { key, name } => {
                    catalog.rename_group(&key, &name)?;
                    println!("Renamed group [{}] to '{}'", key, name.trim());
                }
                GroupAction::Delete { key } => {
                    let removed = catalog.delete_group(&key)?;
                    println!("Deleted group '{}'", removed.name);
                }
            }
            db.save_catalog(&catalog)?;
        }

        Some(Commands::Exercise { action }) => {
            let mut catalog = db.load_catalog()?;
            match action {
                ExerciseAction::Add { group, name } => {
                    catalog.add_exercise(&group, &name)?;
                    println!("Added '{}' to [{}]", name.trim(), group);
                }
                ExerciseAction::Rename { group, exercise, name } => {
                    catalog.rename_exercise(&group, &exercise, &name)?;
                    println!("Renamed '{}' to '{}'", exercise, name.trim());
                }
                ExerciseAction::Delete { group, exercise } => {
                    catalog.delete_exercise(&group, &exercise)?;
                    println!("Deleted '{}' from [{}]", exercise, group);
                }
                ExerciseAction::Adjust { group, exercise, adjustment } => {
                    let template = catalog.adjust_exercise(&group, &exercise, adjustment.into())?;
                    println!("{}: {}x{}", template.name, template.sets, template.reps);
                }
            }
            db.save_catalog(&catalog)?;
        }

        Some(Commands::Start { group }) => {
            let catalog = db.load_catalog()?;
            let workout_group = find_group(&catalog, &group)?;
            let session = db.start_session(&group)?;
            let history = db.get_history()?;

            println!(
                "Current workout: {} ({})",
                workout_group.name,
                session.date.format("%Y-%m-%d %H:%M")
            );
            println!("{:-<60}", "");
            for rec in recommend_group(&history, &group, &workout_group.exercise_names()) {
                println!("{}", recommendation_report(&rec));
            }
        }

        Some(Commands::Record { exercise, reps, band, difficulty }) => {
            let Some(session) = db.current_session()? else {
                bail!("no workout in progress, run `bandwork start <group>` first");
            };

            let catalog = db.load_catalog()?;
            match catalog.group(&session.group) {
                Some(group) if group.exercise(&exercise).is_none() => {
                    bail!("'{}' is not an exercise of {}", exercise, group.name);
                }
                Some(_) => {}
                None => warn!(group = %session.group, "workout group no longer in catalog"),
            }

            let history = db.get_history()?;
            let band = band.unwrap_or_else(|| {
                recommend(&history, &session.group, &exercise)
                    .recommended_band
                    .unwrap_or(Band::NoBand)
            });

            let set = db.record_set(&exercise, reps, band, difficulty)?;
            println!(
                "Recorded: {} set {} - {} reps, {} band, difficulty {}",
                exercise, set.set_number, set.reps, set.band, set.difficulty
            );
            println!();
            println!("{}", exercise_history_report(&history, &session.group, &exercise));
            if let Some(current) = db.current_session()? {
                println!();
                println!("Recorded sets (current workout):");
                println!("{}", session_report(&current));
            }
        }

        Some(Commands::Current) => match db.current_session()? {
            Some(session) => {
                println!("Current workout:");
                println!("{}", session_report(&session));
            }
            None => println!("No workout in progress"),
        },

        Some(Commands::Finish) => {
            let session = db.finish_session()?;
            println!("Workout finished: {} sets recorded", session.set_count());
        }

        Some(Commands::Discard) => match db.discard_session()? {
            Some(session) => println!("Discarded {} workout", session.group),
            None => println!("No workout in progress"),
        },

        Some(Commands::Recommend { group, exercise }) => {
            let catalog = db.load_catalog()?;
            let history = db.get_history()?;
            match exercise {
                Some(exercise) => {
                    println!("{}", recommendation_report(&recommend(&history, &group, &exercise)));
                    println!();
                    println!("{}", exercise_history_report(&history, &group, &exercise));
                }
                None => {
                    let workout_group = find_group(&catalog, &group)?;
                    for rec in recommend_group(&history, &group, &workout_group.exercise_names()) {
                        println!("{}", recommendation_report(&rec));
                    }
                }
            }
        }

        Some(Commands::History { group, limit }) => {
            let history = db.get_history()?;
            let sessions = sessions_for_group(&history, group.as_deref());
            match &group {
                Some(group) => println!("Workout history for {}:", group),
                None => println!("Workout history (all workouts):"),
            }
            println!("{:-<60}", "");
            for session in sessions.into_iter().take(limit) {
                println!("{}", session_report(session));
            }
        }

        Some(Commands::Stats { exercise, group }) => {
            let history = db.get_history()?;
            let analytics = Analytics::new(history);

            println!("Training Statistics");
            println!("{:-<40}", "");

            if let Some(ex) = exercise {
                println!("Exercise: {}", ex);
                if let Some(group) = &group {
                    println!("Group: {}", group);
                }
                let group = group.as_deref();
                println!("Total volume: {} reps", analytics.total_volume(group, &ex));
                for (band, sets) in analytics.band_usage(group, &ex) {
                    println!("  {}: {} sets", band, sets);
                }
            } else {
                let freq = analytics.weekly_frequency();
                println!("Weekly frequency: {:.1} sessions/week", freq);
            }
        }

        Some(Commands::Export { path, format }) => {
            let history = db.get_history()?;
            export::export_history(&history, &path, format.into())?;
            println!("Exported {} workouts to {}", history.len(), path.display());
        }
    }

    Ok(())
}
