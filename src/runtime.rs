use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Input the main loop reacts to
#[derive(Clone, Debug)]
pub enum TockEvent {
    Key(KeyEvent),
    Resize,
    /// No input within one frame; time to run the reset check and repaint
    Tick,
    /// The input reader has gone away and no further keys can arrive
    InputClosed,
}

pub trait TockEventSource: Send + 'static {
    /// Block for up to `timeout`; `Err(Timeout)` when nothing arrived.
    fn recv_timeout(&self, timeout: Duration) -> Result<TockEvent, RecvTimeoutError>;
}

/// Terminal input read on a background thread and handed over a channel
pub struct CrosstermEventSource {
    rx: Receiver<TockEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // Windows reports releases too; one press must register once
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    tx.send(TockEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(TockEvent::Resize),
                Ok(_) => Ok(()),
                Err(err) => {
                    tracing::warn!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TockEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TockEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed source for tests
pub struct TestEventSource {
    rx: Receiver<TockEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TockEvent>) -> Self {
        Self { rx }
    }
}

impl TockEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TockEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub struct Runner<E: TockEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: TockEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Next event, or `Tick` once a frame passes without input.
    ///
    /// A disconnected source returns immediately on every call, so it is
    /// reported as `InputClosed` rather than folded into `Tick`.
    pub fn step(&self) -> TockEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => TockEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => TockEvent::InputClosed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );

        assert!(matches!(runner.step(), TockEvent::Tick));
    }

    #[test]
    fn step_passes_through_keys() {
        let (tx, rx) = mpsc::channel();
        tx.send(TockEvent::Key(KeyEvent::new(
            KeyCode::Char(' '),
            KeyModifiers::NONE,
        )))
        .unwrap();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(10)),
        );

        match runner.step() {
            TockEvent::Key(key) => assert_eq!(key.code, KeyCode::Char(' ')),
            other => panic!("expected key event, got {other:?}"),
        }
    }

    #[test]
    fn disconnected_source_reports_closed_input() {
        let (tx, rx) = mpsc::channel::<TockEvent>();
        drop(tx);
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(100)),
        );

        let ticks = (0..1_000)
            .map(|_| runner.step())
            .filter(|ev| matches!(ev, TockEvent::Tick))
            .count();
        assert_eq!(ticks, 0);
        assert!(matches!(runner.step(), TockEvent::InputClosed));
    }

    #[test]
    fn queued_events_drain_before_closed_input() {
        let (tx, rx) = mpsc::channel();
        tx.send(TockEvent::Resize).unwrap();
        drop(tx);
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(10)),
        );

        assert!(matches!(runner.step(), TockEvent::Resize));
        assert!(matches!(runner.step(), TockEvent::InputClosed));
    }
}
