use std::result;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("box must have positive extent, got {width}x{height}")]
    EmptyBox { width: i32, height: i32 },

    #[error("box coordinate is not finite: {0}")]
    NonFinite(f64),
}

pub type Result<T> = result::Result<T, Error>;
