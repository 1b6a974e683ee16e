use std::time::SystemTime;

use crate::reaction_log::ReactionLog;
use crate::round::{Outcome, RoundState, RoundTimings, RoundView, Status};
use crate::stats::StatsEngine;

/// Everything one training session owns: the running round, the reaction
/// log and the display mode. Callers thread it through every operation.
#[derive(Debug, Clone)]
pub struct SessionContext {
    round: RoundState,
    log: ReactionLog,
    pub show_millis: bool,
}

impl SessionContext {
    pub fn new(now: SystemTime, timings: RoundTimings, show_millis: bool) -> Self {
        tracing::debug!(
            window_secs = timings.window.as_secs_f64(),
            reset_delay_secs = timings.reset_delay.as_secs_f64(),
            "session started"
        );
        Self {
            round: RoundState::new(now, timings),
            log: ReactionLog::new(),
            show_millis,
        }
    }

    pub fn register(&mut self, now: SystemTime) -> Outcome {
        self.round.auto_reset(now);
        self.round.register(now, &mut self.log, self.show_millis)
    }

    pub fn reset(&mut self, now: SystemTime) {
        tracing::info!(attempts = self.log.len(), "manual reset");
        self.round.reset(now);
    }

    /// Run the pending auto-reset check; safe to call on every frame
    pub fn refresh(&mut self, now: SystemTime) -> bool {
        self.round.auto_reset(now)
    }

    /// Authoritative query: applies a due auto-reset, then snapshots
    pub fn current_view(&mut self, now: SystemTime) -> RoundView {
        self.refresh(now);
        self.round.view(now, self.show_millis)
    }

    pub fn toggle_millis(&mut self) {
        self.show_millis = !self.show_millis;
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn round_started_at(&self) -> SystemTime {
        self.round.started_at()
    }

    pub fn last_result(&self) -> Option<&str> {
        self.round.last_message()
    }

    pub fn last_status(&self) -> Option<Status> {
        self.round.last_status()
    }

    pub fn reaction_times(&self) -> &[f64] {
        self.log.all()
    }

    pub fn stats(&self) -> StatsEngine<'_> {
        StatsEngine::new(self.log.all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::Phase;
    use std::time::Duration;

    fn t0() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(50_000)
    }

    fn at(ms: u64) -> SystemTime {
        t0() + Duration::from_millis(ms)
    }

    fn session() -> SessionContext {
        SessionContext::new(t0(), RoundTimings::default(), false)
    }

    #[test]
    fn fresh_session_surface() {
        let s = session();
        assert_eq!(s.round_started_at(), t0());
        assert_eq!(s.last_result(), None);
        assert_eq!(s.last_status(), None);
        assert!(s.reaction_times().is_empty());
        assert!(!s.show_millis);
    }

    #[test]
    fn current_view_applies_due_reset() {
        let mut s = session();
        s.register(at(10_400));
        assert_eq!(s.last_status(), Some(Status::Success));

        let view = s.current_view(at(12_400));
        assert_eq!(view.phase, Phase::Waiting);
        assert_eq!(s.round_started_at(), at(12_400));
        assert_eq!(s.last_result(), None);

        // repeated queries stay put
        let again = s.current_view(at(12_900));
        assert_eq!(again.phase, Phase::Waiting);
        assert_eq!(s.round_started_at(), at(12_400));
        assert_eq!(again.elapsed, Duration::from_millis(500));
    }

    #[test]
    fn register_after_due_reset_starts_from_new_round() {
        let mut s = session();
        s.register(at(10_000));
        // the overdue reset restarts the round at the press itself
        assert_eq!(s.register(at(17_000)), Outcome::TooEarly);
        assert_eq!(s.round_started_at(), at(17_000));
        assert_eq!(s.reaction_times(), &[0.0]);
    }

    #[test]
    fn toggle_changes_formatting_only() {
        let mut s = session();
        let before = s.current_view(at(1_234));
        s.toggle_millis();
        let after = s.current_view(at(1_234));

        assert_eq!(before.clock, "6:59:51 AM");
        assert_eq!(after.clock, "6:59:51.234 AM");
        assert_eq!(before.phase, after.phase);
        assert_eq!(before.ready, after.ready);
    }

    #[test]
    fn stats_follow_the_log() {
        let mut s = session();
        assert_eq!(s.stats().count(), None);

        s.register(at(10_200));
        s.reset(at(20_000));
        s.register(at(30_400));

        let stats = s.stats();
        assert_eq!(stats.count(), Some(2));
        assert_eq!(stats.min(), Some(0.2));
    }
}
