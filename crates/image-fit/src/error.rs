use std::{io, path::PathBuf, result};

use image::ImageError;

/// Error types for image-fit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read image {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[from] ImageError),

    #[error("image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

pub type Result<T> = result::Result<T, Error>;
