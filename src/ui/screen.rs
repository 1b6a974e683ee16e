use ratatui::{buffer::Buffer, layout::Rect};

use crate::{
    app::{App, Tab},
    ui::{render_countdown, render_stats},
};

/// A tab body: draws into the area below the tab bar
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Clock face, register prompt and last result
pub struct CountdownScreen;

impl Screen for CountdownScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_countdown(app, area, buf);
    }
}

/// Summary numbers, distribution and trend
pub struct StatsScreen;

impl Screen for StatsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_stats(app, area, buf);
    }
}

pub fn current_screen(tab: Tab) -> Box<dyn Screen> {
    match tab {
        Tab::Countdown => Box::new(CountdownScreen),
        Tab::Stats => Box::new(StatsScreen),
    }
}
