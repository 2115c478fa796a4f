use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroDimension { width: u32, height: u32 },
    InvalidFrameRate(f64),
    InvalidParam { name: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroDimension { width, height } => {
                write!(f, "frame size must be non-zero, got {width}x{height}")
            }
            ConfigError::InvalidFrameRate(fps) => {
                write!(f, "frame rate must be finite and positive, got {fps}")
            }
            ConfigError::InvalidParam { name, value } => {
                write!(f, "motion parameter {name} out of range: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub type Result<T> = std::result::Result<T, ConfigError>;
