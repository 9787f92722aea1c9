use std::{io, path::PathBuf, result};

use skrifa::raw::ReadError;

/// Error types for font-metrics.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read font {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse font {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("font size must be positive, got {0}")]
    InvalidSize(u32),
}

pub type Result<T> = result::Result<T, Error>;
