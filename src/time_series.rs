/// One point on the reaction trend line: attempt number (zero-based) and reaction in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttemptPoint {
    pub attempt: usize,
    pub reaction: f64,
}

impl AttemptPoint {
    pub fn new(attempt: usize, reaction: f64) -> Self {
        Self { attempt, reaction }
    }
}

// ratatui datasets want (x, y) as floats
impl From<AttemptPoint> for (f64, f64) {
    fn from(p: AttemptPoint) -> Self {
        (p.attempt as f64, p.reaction)
    }
}
