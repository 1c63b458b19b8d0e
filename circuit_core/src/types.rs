//! Core domain types for the Circuit workout system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise definitions (catalog entries)
//! - Schedule items and day schedules
//! - Resolved queue steps
//! - History entries and session summaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::duration::parse_duration_seconds;

// ============================================================================
// Exercise Types
// ============================================================================

/// An exercise definition (e.g., "Goblet Squat")
///
/// Catalog entries are loaded once at startup and never mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    pub id: String,
    pub name: String,
    /// Optional reference to a demonstration asset (GIF/video URL)
    pub media_ref: Option<String>,
    /// Catalog-level default duration, overridable per schedule item
    pub default_duration: Option<String>,
}

// ============================================================================
// Schedule Types
// ============================================================================

/// One entry in a day's warmup/circuit/cooldown list.
///
/// `reps` and `duration` are free-form display strings ("12-15 reps",
/// "30 sec"). A step with no parseable duration is not auto-timed.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ScheduleItem {
    pub id: String,
    #[serde(default)]
    pub reps: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
}

/// Round prescription for a day's circuit
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Rounds {
    /// Run the circuit a fixed number of times
    Fixed { count: u32 },
    /// As many rounds as possible within a time cap; the queue builder
    /// plans a fixed fallback number of rounds (see [`crate::queue`])
    AsManyAsPossible { cap_minutes: u32 },
}

impl Rounds {
    pub fn label(&self) -> String {
        match self {
            Rounds::Fixed { count } => format!("{} rounds", count),
            Rounds::AsManyAsPossible { cap_minutes } => {
                format!("AMRAP {} min", cap_minutes)
            }
        }
    }
}

/// A full day's workout definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DaySchedule {
    pub name: String,
    /// Weekday label, e.g. "Monday"
    pub day: String,
    pub focus: String,
    pub rounds: Rounds,
    /// Suggested rest between circuit exercises; informational only,
    /// the timer does not enforce it
    pub rest_between: String,
    pub warmup: Vec<ScheduleItem>,
    pub circuit: Vec<ScheduleItem>,
    pub cooldown: Vec<ScheduleItem>,
}

// ============================================================================
// Queue Types
// ============================================================================

/// Which section of the day a queue step belongs to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    WarmUp,
    Circuit,
    CoolDown,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::WarmUp => "Warm Up",
            Stage::Circuit => "Circuit",
            Stage::CoolDown => "Cool Down",
        }
    }
}

/// A fully-resolved exercise step in a workout queue.
///
/// Produced by the queue builder from a catalog entry (base fields) and a
/// schedule item (overrides); immutable once built.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueueStep {
    pub id: String,
    pub name: String,
    pub media_ref: Option<String>,
    pub reps: Option<String>,
    pub duration: Option<String>,
    pub equipment: Option<String>,
    pub stage: Stage,
    /// 1-based circuit round, 0 for warmup/cooldown
    pub round: u32,
    /// Total planned rounds, 0 for warmup/cooldown
    pub total_rounds: u32,
}

impl QueueStep {
    /// Whether this step auto-starts a countdown
    pub fn is_timed(&self) -> bool {
        parse_duration_seconds(self.duration.as_deref()) > 0
    }

    /// Parsed work-phase length in seconds (0 for untimed steps)
    pub fn work_seconds(&self) -> u32 {
        parse_duration_seconds(self.duration.as_deref())
    }

    /// Display prescription: reps if present, otherwise the duration label
    pub fn prescription(&self) -> &str {
        self.reps
            .as_deref()
            .or(self.duration.as_deref())
            .unwrap_or("")
    }
}

// ============================================================================
// History Types
// ============================================================================

/// A free-form activity logged outside the weekly plan (run, swim, ...)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedActivity {
    pub id: Uuid,
    pub activity_type: String,
    /// Display label, e.g. "30 min"
    pub duration_label: String,
    pub completed: bool,
    pub timestamp: Option<DateTime<Utc>>,
}

/// One date-keyed history record
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryEntry {
    /// A scheduled workout day was completed
    Workout { day_key: String },
    /// A custom logged activity
    Activity(LoggedActivity),
}

impl HistoryEntry {
    pub fn describe(&self) -> String {
        match self {
            HistoryEntry::Workout { day_key } => format!("workout {}", day_key),
            HistoryEntry::Activity(activity) => format!(
                "{} ({})",
                activity.activity_type, activity.duration_label
            ),
        }
    }
}

/// What the session boundary emits when a queue is exhausted.
///
/// The caller persists this; the queue builder and runner never touch
/// storage directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub day_key: String,
    /// Local calendar date in `YYYY-MM-DD` form
    pub date_key: String,
    pub elapsed_seconds: u32,
}
