//! Session control: one workout run from start to finish.
//!
//! Owns the queue (immutable once built), the cursor into it, the
//! session-wide elapsed counter, and the per-exercise runner. Both the
//! session counter and the runner countdown are driven by the caller's
//! single one-tick-per-second source.

use crate::catalog::ExerciseCatalog;
use crate::error::{Error, Result};
use crate::history::local_date_key;
use crate::queue::build_queue;
use crate::runner::{ExerciseRunner, TickOutcome};
use crate::schedule::DayKey;
use crate::types::{DaySchedule, QueueStep, SessionSummary};

/// Result of invoking `advance`
#[derive(Clone, Debug)]
pub enum Advance {
    /// Moved to the next step
    Moved,
    /// The queue was exhausted; the caller should persist the summary
    Completed(SessionSummary),
}

/// One in-progress workout run
#[derive(Clone, Debug)]
pub struct WorkoutSession {
    day_key: DayKey,
    queue: Vec<QueueStep>,
    position: usize,
    elapsed_seconds: u32,
    runner: ExerciseRunner,
}

impl WorkoutSession {
    /// Build the queue for a day and position the runner on its first
    /// step. Fails with [`Error::EmptyQueue`] when nothing resolved;
    /// callers must never enter the runner with zero steps.
    pub fn start(
        day_key: DayKey,
        day: &DaySchedule,
        catalog: &ExerciseCatalog,
        get_ready_seconds: u32,
    ) -> Result<Self> {
        let queue = build_queue(day, catalog);
        if queue.is_empty() {
            return Err(Error::EmptyQueue(day.name.clone()));
        }

        tracing::info!(
            day = %day_key,
            steps = queue.len(),
            "workout session started"
        );

        let mut runner = ExerciseRunner::new(get_ready_seconds);
        runner.load_step(&queue[0]);

        Ok(Self {
            day_key,
            queue,
            position: 0,
            elapsed_seconds: 0,
            runner,
        })
    }

    pub fn day_key(&self) -> DayKey {
        self.day_key
    }

    pub fn current_step(&self) -> &QueueStep {
        &self.queue[self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Read-only view of the full queue (queue peek)
    pub fn queue(&self) -> &[QueueStep] {
        &self.queue
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn is_last(&self) -> bool {
        self.position + 1 == self.queue.len()
    }

    /// Completion percentage of the run, counting the current step
    pub fn progress_percent(&self) -> u32 {
        ((self.position as u32 + 1) * 100) / self.queue.len() as u32
    }

    pub fn runner(&self) -> &ExerciseRunner {
        &self.runner
    }

    /// One second passed: bump the session counter and drive the runner.
    pub fn tick(&mut self) -> TickOutcome {
        self.elapsed_seconds += 1;
        self.runner.tick()
    }

    /// Move to the next step, or finish the run when already on the last
    /// step. Advancing reloads the runner, cancelling any countdown.
    pub fn advance(&mut self) -> Advance {
        if self.is_last() {
            self.runner.stop();
            let summary = SessionSummary {
                day_key: self.day_key.as_str().into(),
                date_key: local_date_key(chrono::Local::now().date_naive()),
                elapsed_seconds: self.elapsed_seconds,
            };
            tracing::info!(
                day = %self.day_key,
                elapsed = self.elapsed_seconds,
                "workout session completed"
            );
            return Advance::Completed(summary);
        }

        self.position += 1;
        self.runner.load_step(&self.queue[self.position]);
        Advance::Moved
    }

    /// Move to the previous step; floors at the first one.
    pub fn retreat(&mut self) {
        if self.position == 0 {
            return;
        }
        self.position -= 1;
        self.runner.load_step(&self.queue[self.position]);
    }

    /// Stop the current step's countdown
    pub fn stop_step(&mut self) {
        self.runner.stop();
    }

    /// Restart the current step's countdown from the top
    pub fn resume_step(&mut self) {
        self.runner.resume();
    }

    /// Discard the run without emitting a summary
    pub fn abandon(self) {
        tracing::info!(day = %self.day_key, "workout session abandoned");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;
    use crate::runner::RunnerPhase;
    use crate::schedule::default_weekly_schedule;
    use crate::types::{Rounds, ScheduleItem};

    fn start_day_a() -> WorkoutSession {
        let week = default_weekly_schedule();
        let catalog = build_default_catalog();
        WorkoutSession::start(DayKey::A, week.day(DayKey::A).unwrap(), &catalog, 3).unwrap()
    }

    #[test]
    fn test_day_a_queue_length() {
        let session = start_day_a();
        // 5 warmup + 5 circuit x 3 rounds + 4 cooldown
        assert_eq!(session.queue().len(), 24);
    }

    #[test]
    fn test_empty_queue_is_an_error() {
        let week = default_weekly_schedule();
        let empty_catalog = ExerciseCatalog::new();
        let result = WorkoutSession::start(
            DayKey::A,
            week.day(DayKey::A).unwrap(),
            &empty_catalog,
            3,
        );
        assert!(matches!(result, Err(Error::EmptyQueue(_))));
    }

    #[test]
    fn test_tick_drives_both_counters() {
        let mut session = start_day_a();
        // First step of day A is "March in Place, 60 sec": timed
        assert_eq!(session.runner().phase(), RunnerPhase::GetReady);

        session.tick();
        session.tick();
        assert_eq!(session.elapsed_seconds(), 2);
        assert_eq!(session.runner().remaining(), 1);
    }

    #[test]
    fn test_advance_reloads_runner() {
        let mut session = start_day_a();
        session.tick();
        assert!(session.runner().is_ticking());

        assert!(matches!(session.advance(), Advance::Moved));
        // Fresh step, fresh countdown state
        assert_eq!(session.position(), 1);
        assert_eq!(session.runner().phase(), RunnerPhase::GetReady);
        assert_eq!(session.runner().remaining(), 3);
    }

    #[test]
    fn test_retreat_floors_at_first_step() {
        let mut session = start_day_a();
        session.retreat();
        assert_eq!(session.position(), 0);

        session.advance();
        session.advance();
        session.retreat();
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn test_completion_emits_summary() {
        let mut session = start_day_a();
        let total = session.queue().len();
        for _ in 0..total - 1 {
            assert!(matches!(session.advance(), Advance::Moved));
        }
        assert!(session.is_last());

        session.tick();
        session.tick();

        match session.advance() {
            Advance::Completed(summary) => {
                assert_eq!(summary.day_key, "dayA");
                assert_eq!(summary.elapsed_seconds, 2);
                // Local calendar date in YYYY-MM-DD form
                assert_eq!(summary.date_key.len(), 10);
                assert_eq!(&summary.date_key[4..5], "-");
            }
            Advance::Moved => panic!("expected completion"),
        }
    }

    #[test]
    fn test_progress_percent() {
        let mut session = start_day_a();
        assert_eq!(session.progress_percent(), 100 / 24);
        for _ in 0..23 {
            session.advance();
        }
        assert_eq!(session.progress_percent(), 100);
    }

    #[test]
    fn test_reps_only_day_still_runs() {
        let catalog = build_default_catalog();
        let mut day = default_weekly_schedule().day(DayKey::A).unwrap().clone();
        day.warmup = vec![ScheduleItem {
            id: "squat_bodyweight".into(),
            reps: Some("10 reps".into()),
            ..Default::default()
        }];
        day.circuit.clear();
        day.cooldown.clear();
        day.rounds = Rounds::Fixed { count: 1 };

        let mut session = WorkoutSession::start(DayKey::A, &day, &catalog, 3).unwrap();
        assert_eq!(session.runner().phase(), RunnerPhase::Idle);

        // Session clock still counts while the step is untimed
        session.tick();
        assert_eq!(session.elapsed_seconds(), 1);
        assert_eq!(session.runner().phase(), RunnerPhase::Idle);
    }
}
