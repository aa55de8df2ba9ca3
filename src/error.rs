//! Error handling for the OLED status readout.

/// A specialized `Result` type for status readout operations.
pub type Result<T> = std::result::Result<T, StatusError>;

/// The main error type for the status readout.
///
/// Only [`StatusError::Transport`] is fatal: sensor failures degrade to
/// placeholder values inside the reader and never reach the refresh loop.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A sensor or system fact could not be read
    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// Opening, initializing or writing to the display failed
    #[error("Display transport error: {0}")]
    Transport(String),

    /// Command line or configuration values are unusable
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl StatusError {
    /// Create a new sensor unavailable error
    pub fn sensor_unavailable(msg: impl Into<String>) -> Self {
        Self::SensorUnavailable(msg.into())
    }

    /// Create a new transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new invalid arguments error
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Whether this error must stop the refresh loop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
