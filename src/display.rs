use std::time::{Duration, SystemTime};

use crate::clock::TARGET_LABEL;
use crate::round::RoundView;
use crate::runtime::Ticker;
use crate::session::SessionContext;

/// Read-only access to the round for anything that only repaints.
/// Nothing reachable through this trait can change session state.
pub trait DisplaySource {
    fn peek(&self, now: SystemTime) -> RoundView;
}

impl DisplaySource for SessionContext {
    fn peek(&self, now: SystemTime) -> RoundView {
        self.round().view(now, self.show_millis)
    }
}

/// What the clock face shows on one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ClockFace {
    pub clock: String,
    pub ready: bool,
    pub status_line: String,
}

impl From<&RoundView> for ClockFace {
    fn from(view: &RoundView) -> Self {
        let status_line = if view.ready {
            "HIT REGISTER NOW".to_string()
        } else {
            format!("Wait for {TARGET_LABEL}")
        };
        Self {
            clock: view.clock.clone(),
            ready: view.ready,
            status_line,
        }
    }
}

/// Polls a [`DisplaySource`] at a fixed frame rate to animate the clock.
#[derive(Debug)]
pub struct DisplayDriver<T: Ticker> {
    ticker: T,
}

impl<T: Ticker> DisplayDriver<T> {
    pub fn new(ticker: T) -> Self {
        Self { ticker }
    }

    pub fn frame_interval(&self) -> Duration {
        self.ticker.interval()
    }

    pub fn frame(&self, source: &dyn DisplaySource, now: SystemTime) -> ClockFace {
        ClockFace::from(&source.peek(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::{Phase, RoundTimings};
    use crate::runtime::FixedTicker;

    fn t0() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(9_000)
    }

    #[test]
    fn frame_before_target_asks_to_wait() {
        let session = SessionContext::new(t0(), RoundTimings::default(), false);
        let driver = DisplayDriver::new(FixedTicker::new(Duration::from_millis(16)));

        let face = driver.frame(&session, t0() + Duration::from_secs(3));

        assert_eq!(face.clock, "6:59:53 AM");
        assert!(!face.ready);
        assert_eq!(face.status_line, "Wait for 7:00:00");
        assert_eq!(driver.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn frame_after_target_is_ready() {
        let session = SessionContext::new(t0(), RoundTimings::default(), true);
        let driver = DisplayDriver::new(FixedTicker::new(Duration::from_millis(16)));

        let face = driver.frame(&session, t0() + Duration::from_millis(10_500));

        assert!(face.ready);
        assert_eq!(face.status_line, "HIT REGISTER NOW");
        assert_eq!(face.clock, "7:00:00.500 AM");
    }

    #[test]
    fn polling_many_times_leaves_session_untouched() {
        let mut session = SessionContext::new(t0(), RoundTimings::default(), false);
        session.register(t0() + Duration::from_secs(11));
        let driver = DisplayDriver::new(FixedTicker::new(Duration::from_millis(1)));

        for ms in (11_000..20_000).step_by(250) {
            driver.frame(&session, t0() + Duration::from_millis(ms));
        }

        assert_eq!(session.round().phase(), Phase::Settled(crate::round::Outcome::Registered));
        assert_eq!(session.round_started_at(), t0());
        assert_eq!(session.reaction_times(), &[1.0]);
    }
}
