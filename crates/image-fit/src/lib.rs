//! Fit arbitrary images into fixed boxes without distortion.

mod error;
mod fit;

pub use error::{Error, Result};
pub use fit::{cover_size, fit, load_bytes, load_path, paste};
