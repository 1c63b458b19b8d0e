#![forbid(unsafe_code)]

//! Core domain model and workout engine for Circuit.
//!
//! This crate provides:
//! - Domain types (exercises, schedules, queue steps, history entries)
//! - The built-in exercise catalog and weekly schedule
//! - Queue construction (schedule + catalog merge, round expansion)
//! - The exercise runner state machine (get-ready/work countdowns)
//! - Session control and date-keyed completion history

pub mod types;
pub mod error;
pub mod duration;
pub mod catalog;
pub mod schedule;
pub mod queue;
pub mod runner;
pub mod session;
pub mod history;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use duration::{format_elapsed, parse_duration_seconds};
pub use catalog::{build_default_catalog, default_catalog, ExerciseCatalog};
pub use schedule::{default_weekly_schedule, day_for_weekday, DayKey, WeeklySchedule};
pub use queue::{build_queue, AMRAP_QUEUE_ROUNDS};
pub use runner::{ExerciseRunner, RunnerPhase, TickOutcome};
pub use session::{Advance, WorkoutSession};
pub use history::{local_date_key, HistoryStore};
pub use config::Config;
