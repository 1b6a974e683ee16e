use std::time::Duration;

use crate::error::{Result, TockError};

/// How long after the target instant a successful press landed, in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ReactionSample(f64);

impl ReactionSample {
    /// Build a sample from the lateness of a press; a `Duration` is never negative
    pub fn from_lateness(late_by: Duration) -> Self {
        Self(late_by.as_secs_f64())
    }

    pub fn secs(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ReactionSample {
    type Error = TockError;

    fn try_from(secs: f64) -> Result<Self> {
        if secs.is_finite() && secs >= 0.0 {
            Ok(Self(secs))
        } else {
            Err(TockError::InvalidSample(secs))
        }
    }
}

/// Append-only record of successful presses, oldest first
#[derive(Debug, Clone, Default)]
pub struct ReactionLog {
    samples: Vec<f64>,
}

impl ReactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, sample: ReactionSample) {
        self.samples.push(sample.secs());
    }

    pub fn all(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
