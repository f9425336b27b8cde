use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Event loop error: {0}")]
    EventLoop(#[from] calloop::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IndicatorError>;
