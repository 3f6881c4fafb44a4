use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrismError {
    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Frame buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Reader box corner ({row}, {col}) outside frame {height}x{width}")]
    CornerOutOfBounds {
        row: i64,
        col: i64,
        height: usize,
        width: usize,
    },

    #[error("Sampling region collapsed to an empty strip")]
    EmptyStrip,

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PrismError>;
