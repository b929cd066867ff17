// One error type for the whole pipeline.
// Every variant states *where* things went wrong; the payload is the cause.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String), // Polygon is degenerate or leaves the base image
    #[error("Input decode error: {0}")]
    InputDecode(String), // Uploaded bytes are not a usable PNG/JPEG
    #[error("Dimension error: {0}")]
    Dimension(String), // A resize or crop would produce zero area
    #[error("Base image error: {0}")]
    BaseImage(String), // The flag photograph could not be loaded
    #[error("Encode error: {0}")]
    Encode(String), // Writing the result failed
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the preview window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the preview buffer failed
}

pub type Result<T> = std::result::Result<T, Error>;
