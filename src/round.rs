use std::time::{Duration, SystemTime};

use crate::clock::{self, TARGET_LABEL};
use crate::reaction_log::{ReactionLog, ReactionSample};

/// Result of a press
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Outcome {
    TooEarly,
    Registered,
}

/// Styling hint for the last result
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Warning,
    Success,
}

impl From<Outcome> for Status {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::TooEarly => Status::Warning,
            Outcome::Registered => Status::Success,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No outcome yet, the clock is counting toward the target
    Waiting,
    /// An outcome is on display and a reset is pending
    Settled(Outcome),
}

/// Fixed timings of a round
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundTimings {
    pub window: Duration,
    pub reset_delay: Duration,
}

impl Default for RoundTimings {
    fn default() -> Self {
        Self {
            window: clock::WINDOW,
            reset_delay: clock::RESET_DELAY,
        }
    }
}

/// Read-only snapshot of a round at a given instant
#[derive(Clone, Debug, PartialEq)]
pub struct RoundView {
    pub phase: Phase,
    pub elapsed: Duration,
    pub remaining: Duration,
    pub ready: bool,
    pub clock: String,
    pub remaining_text: String,
    pub message: Option<String>,
    pub status: Option<Status>,
}

/// Lifecycle of the current round.
///
/// Mutated only by [`RoundState::register`], [`RoundState::reset`] and
/// [`RoundState::auto_reset`]. `pending_reset_at` is set exactly when an
/// outcome is recorded.
#[derive(Clone, Debug)]
pub struct RoundState {
    timings: RoundTimings,
    started_at: SystemTime,
    last_outcome: Option<Outcome>,
    last_message: Option<String>,
    pending_reset_at: Option<SystemTime>,
}

impl RoundState {
    pub fn new(now: SystemTime, timings: RoundTimings) -> Self {
        Self {
            timings,
            started_at: now,
            last_outcome: None,
            last_message: None,
            pending_reset_at: None,
        }
    }

    pub fn timings(&self) -> RoundTimings {
        self.timings
    }

    pub fn started_at(&self) -> SystemTime {
        self.started_at
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    pub fn last_status(&self) -> Option<Status> {
        self.last_outcome.map(Status::from)
    }

    pub fn pending_reset_at(&self) -> Option<SystemTime> {
        self.pending_reset_at
    }

    pub fn phase(&self) -> Phase {
        match self.last_outcome {
            Some(outcome) => Phase::Settled(outcome),
            None => Phase::Waiting,
        }
    }

    pub fn elapsed(&self, now: SystemTime) -> Duration {
        clock::elapsed(now, self.started_at)
    }

    /// Evaluate a press at `now`.
    ///
    /// The "too early" text is formatted with whatever display mode is live at
    /// the moment of the press.
    pub fn register(
        &mut self,
        now: SystemTime,
        log: &mut ReactionLog,
        show_millis: bool,
    ) -> Outcome {
        let elapsed = self.elapsed(now);
        let window = self.timings.window;

        let outcome = if clock::is_ready(elapsed, window) {
            let sample = ReactionSample::from_lateness(elapsed - window);
            log.append(sample);
            self.last_message = Some(format!(
                "Registered {:.3}s after {TARGET_LABEL}. Nice reflexes!",
                sample.secs()
            ));
            tracing::info!(reaction_secs = sample.secs(), attempts = log.len(), "press registered");
            Outcome::Registered
        } else {
            let remaining = clock::remaining(elapsed, window);
            self.last_message = Some(format!(
                "Too early! {} remain before {TARGET_LABEL}.",
                clock::format_remaining(remaining, show_millis)
            ));
            tracing::info!(
                remaining_secs = remaining.as_secs_f64(),
                "press too early"
            );
            Outcome::TooEarly
        };

        self.last_outcome = Some(outcome);
        self.pending_reset_at = Some(now + self.timings.reset_delay);
        outcome
    }

    /// Start a fresh round at `now`; always legal
    pub fn reset(&mut self, now: SystemTime) {
        self.started_at = now;
        self.last_outcome = None;
        self.last_message = None;
        self.pending_reset_at = None;
    }

    pub fn is_reset_due(&self, now: SystemTime) -> bool {
        self.pending_reset_at.is_some_and(|at| now >= at)
    }

    /// Reset if the post-outcome delay has run out. Returns whether it fired.
    pub fn auto_reset(&mut self, now: SystemTime) -> bool {
        if !self.is_reset_due(now) {
            return false;
        }
        tracing::debug!("auto reset after outcome");
        self.reset(now);
        true
    }

    /// Snapshot at `now`. A reset that is already due is reflected as a fresh
    /// round starting at `now` without touching the state.
    pub fn view(&self, now: SystemTime, show_millis: bool) -> RoundView {
        let window = self.timings.window;
        let (elapsed, phase, message, status) = if self.is_reset_due(now) {
            (Duration::ZERO, Phase::Waiting, None, None)
        } else {
            (
                self.elapsed(now),
                self.phase(),
                self.last_message.clone(),
                self.last_status(),
            )
        };
        let remaining = clock::remaining(elapsed, window);

        RoundView {
            phase,
            elapsed,
            remaining,
            ready: clock::is_ready(elapsed, window),
            clock: clock::format_clock(elapsed, window, show_millis),
            remaining_text: clock::format_remaining(remaining, show_millis),
            message,
            status,
        }
    }
}
