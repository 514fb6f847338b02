use thiserror::Error;

/// Errors from the I/O-facing parts of the pipeline.
///
/// The raster stages themselves are total and never fail.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PlotError {
    #[error("failed to load image: {0}")]
    ImageLoad(String),

    #[error("failed to save image: {0}")]
    ImageSave(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize toolpath: {0}")]
    Serialize(#[from] serde_json::Error),
}
