//! Font loading, measurement and text rasterization.
//!
//! A [`FontFile`] owns validated font bytes and is cheap to share between
//! threads. [`FontFile::at_size`] produces a [`FontHandle`] that answers
//! measurement queries through the [`Measure`] trait and can rasterize runs
//! onto an RGBA canvas with [`draw_text`].

mod error;
mod font;
mod raster;

pub use error::{Error, Result};
pub use font::{FontFile, FontHandle, LINE_GUTTER, Measure};
pub use raster::{blend_over, draw_text, run_path};
