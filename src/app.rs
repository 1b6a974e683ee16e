use std::time::SystemTime;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Config;
use crate::display::{ClockFace, DisplayDriver, DisplaySource};
use crate::error::Result;
use crate::round::RoundView;
use crate::runtime::FixedTicker;
use crate::session::SessionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Tab {
    Countdown,
    Stats,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Countdown, Tab::Stats];

    pub fn index(self) -> usize {
        match self {
            Tab::Countdown => 0,
            Tab::Stats => 1,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Countdown => Tab::Stats,
            Tab::Stats => Tab::Countdown,
        }
    }
}

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Register,
    Reset,
    ToggleMillis,
    SwitchTab,
    Quit,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Register),
            KeyCode::Char('r') => Some(Action::Reset),
            KeyCode::Char('m') => Some(Action::ToggleMillis),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchTab),
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub session: SessionContext,
    pub tab: Tab,
    pub histogram_bins: usize,
    pub driver: DisplayDriver<FixedTicker>,
    /// Instant the next frame is drawn for
    pub now: SystemTime,
}

impl App {
    pub fn new(config: &Config, now: SystemTime) -> Result<Self> {
        let timings = config.timings()?;
        Ok(Self {
            session: SessionContext::new(now, timings, config.show_milliseconds),
            tab: Tab::Countdown,
            histogram_bins: config.histogram_bins,
            driver: DisplayDriver::new(FixedTicker::new(config.frame_interval())),
            now,
        })
    }

    /// Advance to `now` and fire a due auto-reset
    pub fn tick(&mut self, now: SystemTime) {
        self.now = now;
        self.session.refresh(now);
    }

    pub fn apply(&mut self, action: Action, now: SystemTime) -> Flow {
        self.now = now;
        match action {
            Action::Register => {
                self.session.register(now);
            }
            Action::Reset => self.session.reset(now),
            Action::ToggleMillis => self.session.toggle_millis(),
            Action::SwitchTab => self.tab = self.tab.next(),
            Action::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    pub fn on_key(&mut self, key: KeyEvent, now: SystemTime) -> Flow {
        match Action::from_key(key) {
            Some(action) => self.apply(action, now),
            None => Flow::Continue,
        }
    }

    /// Snapshot for rendering; never mutates the session
    pub fn view(&self) -> RoundView {
        self.session.peek(self.now)
    }

    pub fn clock_face(&self) -> ClockFace {
        self.driver.frame(&self.session, self.now)
    }
}
