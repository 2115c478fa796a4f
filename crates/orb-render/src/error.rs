use std::fmt;

use orb_core::ConfigError;

#[derive(Debug)]
pub enum RenderError {
    Config(ConfigError),
    Canvas { width: u32, height: u32 },
    Image(image::ImageError),
    Io(std::io::Error),
    Sink(String),
    Task(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Config(e) => write!(f, "invalid config: {e}"),
            RenderError::Canvas { width, height } => {
                write!(f, "cannot allocate {width}x{height} canvas")
            }
            RenderError::Image(e) => write!(f, "image error: {e}"),
            RenderError::Io(e) => write!(f, "I/O error: {e}"),
            RenderError::Sink(msg) => write!(f, "frame sink error: {msg}"),
            RenderError::Task(msg) => write!(f, "frame loop task failed: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Config(e) => Some(e),
            RenderError::Image(e) => Some(e),
            RenderError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for RenderError {
    fn from(e: ConfigError) -> Self {
        RenderError::Config(e)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Image(e)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
