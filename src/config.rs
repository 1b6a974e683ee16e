use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, TockError};
use crate::round::RoundTimings;

/// Default number of bars in the distribution chart
pub const DEFAULT_HISTOGRAM_BINS: usize = 12;

/// Default redraw interval of the clock face
pub const DEFAULT_FRAME_RATE_MS: u64 = 100;

/// Longest window or reset delay accepted from config (one day)
pub const MAX_PHASE_SECS: f64 = 86_400.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window_secs: f64,
    pub reset_delay_secs: f64,
    pub show_milliseconds: bool,
    pub histogram_bins: usize,
    pub frame_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_secs: crate::clock::WINDOW.as_secs_f64(),
            reset_delay_secs: crate::clock::RESET_DELAY.as_secs_f64(),
            show_milliseconds: false,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            frame_rate_ms: DEFAULT_FRAME_RATE_MS,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        positive_secs("window_secs", self.window_secs)?;
        positive_secs("reset_delay_secs", self.reset_delay_secs)?;
        if self.histogram_bins == 0 {
            return Err(TockError::InvalidConfig(
                "histogram_bins must be at least 1".into(),
            ));
        }
        if self.frame_rate_ms == 0 {
            return Err(TockError::InvalidConfig(
                "frame_rate_ms must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn timings(&self) -> Result<RoundTimings> {
        self.validate()?;
        Ok(RoundTimings {
            window: to_duration("window_secs", self.window_secs)?,
            reset_delay: to_duration("reset_delay_secs", self.reset_delay_secs)?,
        })
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_rate_ms)
    }
}

fn positive_secs(name: &str, secs: f64) -> Result<()> {
    if secs.is_finite() && secs > 0.0 && secs <= MAX_PHASE_SECS {
        Ok(())
    } else {
        Err(TockError::InvalidConfig(format!(
            "{name} must be between 0 and {MAX_PHASE_SECS} seconds, got {secs}"
        )))
    }
}

fn to_duration(name: &str, secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs)
        .map_err(|e| TockError::InvalidConfig(format!("{name}: {e}")))
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "tock") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("tock_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) if cfg.validate().is_ok() => cfg,
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "ignoring unusable config file");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
