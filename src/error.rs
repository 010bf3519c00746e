// Errors of the application shell. The tracing core has no failure paths;
// everything here comes from the window, the command line or the disk.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Creating the window failed.
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Pushing a frame to the window failed.
    #[error("window update error: {0}")]
    WindowUpdate(String),

    /// Command line values that cannot describe a canvas.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Encoding or writing a snapshot failed.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] image::ImageError),
}
