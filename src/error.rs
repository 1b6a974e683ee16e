use thiserror::Error;

pub type Result<T> = std::result::Result<T, TockError>;

#[derive(Debug, Error)]
pub enum TockError {
    /// A reaction sample must be a finite, non-negative number of seconds
    #[error("invalid reaction sample: {0}")]
    InvalidSample(f64),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_sample_message_names_the_value() {
        let err = TockError::InvalidSample(-0.5);
        assert_eq!(err.to_string(), "invalid reaction sample: -0.5");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TockError = io.into();
        assert!(matches!(err, TockError::Io(_)));
    }
}
