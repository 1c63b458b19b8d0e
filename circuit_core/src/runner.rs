//! Exercise runner state machine.
//!
//! Drives the per-exercise countdown: a get-ready phase, then the timed
//! work phase, then finished. The machine is tick-driven; the caller feeds
//! it one tick per second. A single `ticking` flag is the only tick-source
//! handle, and every (re)initialization clears it before arming, so two
//! countdowns can never overlap.
//!
//! Pause semantics are deliberately simple: stopping abandons the current
//! phase, and resuming always restarts the full get-ready sequence rather
//! than continuing from the remaining time.

use crate::types::QueueStep;

/// Seconds remaining in the work phase at or below which a per-tick cue
/// is signalled. Advisory feedback only; never affects transitions.
pub const WORK_CUE_WINDOW_SECONDS: u32 = 5;

/// Phase of the currently loaded step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerPhase {
    /// Not started or stopped; untimed steps stay here
    Idle,
    /// Pre-exercise countdown
    GetReady,
    /// Exercise countdown
    Work,
    /// Countdown exhausted
    Finished,
}

/// Result of feeding one tick to the runner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    pub phase: RunnerPhase,
    pub remaining: u32,
    /// A phase boundary was crossed on this tick
    pub transitioned: bool,
    /// Audible/visual near-end cue should fire
    pub cue: bool,
}

/// Per-exercise countdown state machine.
///
/// Owns its phase and remaining time exclusively; scoped to one
/// [`QueueStep`] at a time and reinitialized whenever the step changes.
#[derive(Clone, Debug)]
pub struct ExerciseRunner {
    phase: RunnerPhase,
    remaining: u32,
    /// Parsed work-phase length of the loaded step; 0 means untimed
    work_seconds: u32,
    get_ready_seconds: u32,
    /// The single tick-source handle. Cleared before every rearm.
    ticking: bool,
}

impl ExerciseRunner {
    pub fn new(get_ready_seconds: u32) -> Self {
        Self {
            phase: RunnerPhase::Idle,
            remaining: 0,
            work_seconds: 0,
            get_ready_seconds,
            ticking: false,
        }
    }

    pub fn phase(&self) -> RunnerPhase {
        self.phase
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Load a new step, unconditionally cancelling any active countdown.
    ///
    /// Timed steps auto-start the get-ready sequence; untimed steps sit
    /// in Idle until the caller moves on.
    pub fn load_step(&mut self, step: &QueueStep) {
        self.cancel();
        self.work_seconds = step.work_seconds();
        if self.work_seconds > 0 {
            self.start_sequence();
        } else {
            tracing::debug!(id = %step.id, "untimed step loaded, staying idle");
        }
    }

    /// Stop: abandon the current phase and go idle. No further ticks have
    /// any effect until resumed.
    pub fn stop(&mut self) {
        self.cancel();
    }

    /// Resume/restart: re-enter the full sequence from the top of the
    /// get-ready phase. Untimed steps remain idle.
    pub fn resume(&mut self) {
        if self.work_seconds == 0 {
            return;
        }
        self.cancel();
        self.start_sequence();
    }

    /// Advance the countdown by one second.
    ///
    /// No-op while not armed (idle, finished, or untimed). O(1).
    pub fn tick(&mut self) -> TickOutcome {
        if !self.ticking {
            return self.outcome(false);
        }

        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            match self.phase {
                RunnerPhase::GetReady => {
                    self.phase = RunnerPhase::Work;
                    self.remaining = self.work_seconds;
                    return self.outcome(true);
                }
                RunnerPhase::Work => {
                    self.phase = RunnerPhase::Finished;
                    self.ticking = false;
                    return self.outcome(true);
                }
                // Not reachable while armed
                RunnerPhase::Idle | RunnerPhase::Finished => {}
            }
        }

        self.outcome(false)
    }

    fn start_sequence(&mut self) {
        debug_assert!(!self.ticking, "tick source must be cleared before rearm");
        if self.get_ready_seconds == 0 {
            // Zero-length get-ready enters work immediately instead of
            // spending a full extra second in an empty phase
            self.phase = RunnerPhase::Work;
            self.remaining = self.work_seconds;
        } else {
            self.phase = RunnerPhase::GetReady;
            self.remaining = self.get_ready_seconds;
        }
        self.ticking = true;
    }

    fn cancel(&mut self) {
        self.ticking = false;
        self.phase = RunnerPhase::Idle;
        self.remaining = 0;
    }

    fn outcome(&self, transitioned: bool) -> TickOutcome {
        let cue = self.phase == RunnerPhase::Work
            && self.remaining > 0
            && self.remaining <= WORK_CUE_WINDOW_SECONDS;
        TickOutcome {
            phase: self.phase,
            remaining: self.remaining,
            transitioned,
            cue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{QueueStep, Stage};

    fn step(duration: Option<&str>) -> QueueStep {
        QueueStep {
            id: "test".into(),
            name: "Test".into(),
            media_ref: None,
            reps: None,
            duration: duration.map(Into::into),
            equipment: None,
            stage: Stage::Circuit,
            round: 1,
            total_rounds: 3,
        }
    }

    #[test]
    fn test_full_phase_sequence() {
        let mut runner = ExerciseRunner::new(3);
        runner.load_step(&step(Some("5 sec")));

        assert_eq!(runner.phase(), RunnerPhase::GetReady);
        assert_eq!(runner.remaining(), 3);

        // GetReady(3) -> GetReady(2) -> GetReady(1) -> Work(5) -> ... ->
        // Finished: exactly 3 + 5 ticks
        let expected = [
            (RunnerPhase::GetReady, 2),
            (RunnerPhase::GetReady, 1),
            (RunnerPhase::Work, 5),
            (RunnerPhase::Work, 4),
            (RunnerPhase::Work, 3),
            (RunnerPhase::Work, 2),
            (RunnerPhase::Work, 1),
            (RunnerPhase::Finished, 0),
        ];
        for (phase, remaining) in expected {
            let out = runner.tick();
            assert_eq!((out.phase, out.remaining), (phase, remaining));
        }
        assert!(!runner.is_ticking());
    }

    #[test]
    fn test_untimed_step_never_leaves_idle() {
        let mut runner = ExerciseRunner::new(5);
        runner.load_step(&step(Some("8-10 per side")));

        assert_eq!(runner.phase(), RunnerPhase::Idle);
        for _ in 0..10 {
            let out = runner.tick();
            assert_eq!(out.phase, RunnerPhase::Idle);
            assert_eq!(out.remaining, 0);
        }

        // Resume on an untimed step is also a no-op
        runner.resume();
        assert_eq!(runner.phase(), RunnerPhase::Idle);
        assert!(!runner.is_ticking());
    }

    #[test]
    fn test_stop_then_resume_restarts_get_ready() {
        let mut runner = ExerciseRunner::new(3);
        runner.load_step(&step(Some("10 sec")));

        // Run into the work phase
        for _ in 0..5 {
            runner.tick();
        }
        assert_eq!(runner.phase(), RunnerPhase::Work);

        runner.stop();
        assert_eq!(runner.phase(), RunnerPhase::Idle);
        assert!(!runner.is_ticking());

        // Resume restarts the full get-ready, not the remaining work time
        runner.resume();
        assert_eq!(runner.phase(), RunnerPhase::GetReady);
        assert_eq!(runner.remaining(), 3);
    }

    #[test]
    fn test_restart_after_finished() {
        let mut runner = ExerciseRunner::new(2);
        runner.load_step(&step(Some("2 sec")));
        for _ in 0..4 {
            runner.tick();
        }
        assert_eq!(runner.phase(), RunnerPhase::Finished);

        runner.resume();
        assert_eq!(runner.phase(), RunnerPhase::GetReady);
        assert_eq!(runner.remaining(), 2);
        assert!(runner.is_ticking());
    }

    #[test]
    fn test_switching_steps_cancels_prior_countdown() {
        let mut runner = ExerciseRunner::new(5);
        runner.load_step(&step(Some("30 sec")));
        for _ in 0..2 {
            runner.tick();
        }
        assert_eq!(runner.remaining(), 3);

        // Loading a new untimed step cancels; nothing decrements afterwards
        runner.load_step(&step(None));
        assert!(!runner.is_ticking());
        let out = runner.tick();
        assert_eq!(out.phase, RunnerPhase::Idle);
        assert_eq!(out.remaining, 0);

        // Loading a new timed step starts a fresh countdown
        runner.load_step(&step(Some("10 sec")));
        assert_eq!(runner.phase(), RunnerPhase::GetReady);
        assert_eq!(runner.remaining(), 5);
    }

    #[test]
    fn test_zero_get_ready_enters_work_immediately() {
        let mut runner = ExerciseRunner::new(0);
        runner.load_step(&step(Some("3 sec")));

        assert_eq!(runner.phase(), RunnerPhase::Work);
        assert_eq!(runner.remaining(), 3);

        for expected in [2, 1, 0] {
            let out = runner.tick();
            assert_eq!(out.remaining, expected);
        }
        assert_eq!(runner.phase(), RunnerPhase::Finished);
    }

    #[test]
    fn test_cue_fires_only_near_end_of_work() {
        let mut runner = ExerciseRunner::new(1);
        runner.load_step(&step(Some("8 sec")));

        let mut cues = Vec::new();
        loop {
            let out = runner.tick();
            if out.cue {
                cues.push(out.remaining);
            }
            if out.phase == RunnerPhase::Finished {
                break;
            }
        }
        assert_eq!(cues, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_get_ready_ticks_never_cue() {
        let mut runner = ExerciseRunner::new(4);
        runner.load_step(&step(Some("30 sec")));
        for _ in 0..3 {
            let out = runner.tick();
            assert_eq!(out.phase, RunnerPhase::GetReady);
            assert!(!out.cue);
        }
    }

    #[test]
    fn test_ticks_after_finished_are_inert() {
        let mut runner = ExerciseRunner::new(1);
        runner.load_step(&step(Some("1 sec")));
        runner.tick();
        runner.tick();
        assert_eq!(runner.phase(), RunnerPhase::Finished);

        let out = runner.tick();
        assert_eq!(out.phase, RunnerPhase::Finished);
        assert_eq!(out.remaining, 0);
        assert!(!out.transitioned);
    }

    #[test]
    fn test_minute_durations_parse_into_work() {
        let mut runner = ExerciseRunner::new(1);
        runner.load_step(&step(Some("1 min")));
        let out = runner.tick();
        assert_eq!(out.phase, RunnerPhase::Work);
        assert_eq!(out.remaining, 60);
        assert!(out.transitioned);
    }
}
