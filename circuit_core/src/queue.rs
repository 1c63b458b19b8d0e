//! Workout queue construction.
//!
//! Merges a day's schedule with the exercise catalog into a flat, ordered
//! list of fully-resolved steps, expanding circuit rounds. The output is
//! deterministic and order-preserving; unresolved exercise ids are dropped
//! with a diagnostic, never fatal.

use crate::catalog::ExerciseCatalog;
use crate::types::{DaySchedule, QueueStep, Rounds, ScheduleItem, Stage};

/// Planned round count used to expand an as-many-rounds-as-possible
/// circuit. The queue is a flat plan, not a live round counter, so an
/// open-ended prescription still needs a concrete expansion.
pub const AMRAP_QUEUE_ROUNDS: u32 = 3;

/// Build the ordered queue for one day.
///
/// Order: warmup, then the circuit repeated for each round, then cooldown.
/// Warmup and cooldown steps carry `round = 0` / `total_rounds = 0`.
pub fn build_queue(day: &DaySchedule, catalog: &ExerciseCatalog) -> Vec<QueueStep> {
    let mut queue = Vec::new();

    for item in &day.warmup {
        if let Some(step) = resolve_step(item, catalog, Stage::WarmUp, 0, 0) {
            queue.push(step);
        }
    }

    let total_rounds = effective_rounds(&day.rounds);
    for round in 1..=total_rounds {
        for item in &day.circuit {
            if let Some(step) = resolve_step(item, catalog, Stage::Circuit, round, total_rounds) {
                queue.push(step);
            }
        }
    }

    for item in &day.cooldown {
        if let Some(step) = resolve_step(item, catalog, Stage::CoolDown, 0, 0) {
            queue.push(step);
        }
    }

    queue
}

/// How many circuit passes the queue plans for
fn effective_rounds(rounds: &Rounds) -> u32 {
    match rounds {
        Rounds::Fixed { count } => *count,
        Rounds::AsManyAsPossible { .. } => AMRAP_QUEUE_ROUNDS,
    }
}

/// Resolve one schedule item against the catalog.
///
/// Merge precedence: catalog fields are the base, schedule-item fields
/// always win on conflict. Concretely, the step's duration is the item's
/// duration, falling back to the catalog default.
///
/// Returns None (with a warning) when the id is unknown; the build
/// continues without it.
fn resolve_step(
    item: &ScheduleItem,
    catalog: &ExerciseCatalog,
    stage: Stage,
    round: u32,
    total_rounds: u32,
) -> Option<QueueStep> {
    let def = match catalog.get(&item.id) {
        Some(def) => def,
        None => {
            tracing::warn!("Exercise id not found in catalog, dropping step: {}", item.id);
            return None;
        }
    };

    Some(QueueStep {
        id: def.id.clone(),
        name: def.name.clone(),
        media_ref: def.media_ref.clone(),
        reps: item.reps.clone(),
        duration: item
            .duration
            .clone()
            .or_else(|| def.default_duration.clone()),
        equipment: item.equipment.clone(),
        stage,
        round,
        total_rounds,
    })
}
