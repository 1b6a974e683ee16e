// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod reaction_log;
pub mod round;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod time_series;
pub mod ui;

pub use error::{Result, TockError};
pub use session::SessionContext;
