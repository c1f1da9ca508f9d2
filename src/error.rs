use thiserror::Error;

/// Main error type for the cutsync library
#[derive(Error, Debug)]
pub enum CutsyncError {
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("Transition detection error: {0}")]
    Detection(#[from] DetectionError),

    #[error("Beat error: {0}")]
    Beat(#[from] BeatError),

    #[error("Correlation error: {0}")]
    Correlation(#[from] CorrelationError),

    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Frame loading and statistics errors
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("No pixel data available for frame")]
    NoPixelData,

    #[error("Invalid frame arguments: {details}")]
    InvalidArgument { details: String },

    #[error("Failed to load frame source: {path}")]
    LoadFailed { path: String },

    #[error("No frame images found in directory: {path}")]
    NoFramesFound { path: String },
}

/// Transition detection conditions.
///
/// The detector never fails; these describe why it produced nothing.
#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("Insufficient frames for detection: {usable} usable, need at least 2")]
    InsufficientFrames { usable: usize },
}

/// Beat input errors
#[derive(Error, Debug)]
pub enum BeatError {
    #[error("Failed to parse beat file: {path} - {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("Beat file not found: {path}")]
    FileNotFound { path: String },
}

/// Beat correlation conditions
#[derive(Error, Debug)]
pub enum CorrelationError {
    #[error("No beats available for correlation")]
    NoBeatsAvailable,
}

/// Timeline editing errors
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("Transition index {index} out of range (timeline has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid timestamp: {value}")]
    InvalidTimestamp { value: f64 },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using CutsyncError
pub type Result<T> = std::result::Result<T, CutsyncError>;

impl CutsyncError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error only degrades output rather than aborting a run
    pub fn is_recoverable(&self) -> bool {
        match self {
            // A single unreadable frame is skipped
            Self::Frame(FrameError::NoPixelData) => true,
            Self::Frame(FrameError::LoadFailed { .. }) => true,
            // Both degrade to empty output
            Self::Detection(DetectionError::InsufficientFrames { .. }) => true,
            Self::Correlation(CorrelationError::NoBeatsAvailable) => true,
            Self::Io(_) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Frame(FrameError::NoFramesFound { path }) => {
                format!("No frame images found in '{}'. Expected numbered PNG, JPEG or BMP files.", path)
            }
            Self::Beat(BeatError::FileNotFound { path }) => {
                format!("Could not find beat file '{}'.", path)
            }
            Self::Beat(BeatError::ParseFailed { path, .. }) => {
                format!("Beat file '{}' is not valid beat JSON (expected \"beats\" and \"strongBeats\").", path)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        let skipped: CutsyncError = FrameError::NoPixelData.into();
        assert!(skipped.is_recoverable());

        let misuse: CutsyncError = FrameError::InvalidArgument {
            details: "buffer length 3".to_string(),
        }
        .into();
        assert!(!misuse.is_recoverable());

        let empty: CutsyncError = CorrelationError::NoBeatsAvailable.into();
        assert!(empty.is_recoverable());
    }

    #[test]
    fn test_user_message_mentions_path() {
        let err: CutsyncError = FrameError::NoFramesFound {
            path: "clips/frames".to_string(),
        }
        .into();
        assert!(err.user_message().contains("clips/frames"));
    }
}
