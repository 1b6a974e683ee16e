use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::SystemTime,
};
use tock::{
    app::{App, Flow},
    config::{Config, ConfigStore, FileConfigStore},
    logging::init_logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner, TockEvent},
};

/// reflex trainer: press right after the clock hits 7:00:00
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Practice the last seconds before 7:00:00 AM. The clock loops through a short window and records how late each successful press was, with a stats tab summarizing your reaction times."
)]
pub struct Cli {
    /// show the clock with milliseconds instead of whole seconds
    #[clap(short = 'm', long)]
    millis: bool,

    /// length of the window leading up to the target, in seconds
    #[clap(short = 'w', long)]
    window_secs: Option<f64>,

    /// pause after a result before the next round starts, in seconds
    #[clap(short = 'd', long)]
    reset_delay_secs: Option<f64>,

    /// maximum number of bars in the distribution chart
    #[clap(short = 'b', long)]
    bins: Option<usize>,

    /// redraw interval of the clock face, in milliseconds
    #[clap(long)]
    frame_ms: Option<u64>,
}

impl Cli {
    /// Layer command-line overrides on top of the stored config
    fn apply(&self, mut config: Config) -> Config {
        if self.millis {
            config.show_milliseconds = true;
        }
        if let Some(secs) = self.window_secs {
            config.window_secs = secs;
        }
        if let Some(secs) = self.reset_delay_secs {
            config.reset_delay_secs = secs;
        }
        if let Some(bins) = self.bins {
            config.histogram_bins = bins;
        }
        if let Some(ms) = self.frame_ms {
            config.frame_rate_ms = ms;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging();

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if let Err(err) = config.validate() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, err.to_string()).exit();
    }
    if let Err(err) = store.save(&config) {
        tracing::warn!(%err, path = %store.path().display(), "could not save config");
    }

    let mut app = App::new(&config, SystemTime::now())?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(
        attempts = app.session.reaction_times().len(),
        "session finished"
    );

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(app.driver.frame_interval()),
    );

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let event = runner.step();
        let now = SystemTime::now();

        match event {
            TockEvent::Tick | TockEvent::Resize => app.tick(now),
            TockEvent::Key(key) => {
                if app.on_key(key, now) == Flow::Quit {
                    break;
                }
            }
            TockEvent::InputClosed => {
                tracing::warn!("terminal input closed, leaving");
                break;
            }
        }

        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}
