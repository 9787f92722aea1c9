//! Text layout for fixed boxes.
//!
//! [`wrap`] breaks a paragraph into lines, [`compose`] turns those lines into
//! positioned [`DrawRun`]s, and [`layout_text`] does both. All measurement goes
//! through [`font_metrics::Measure`], so any measurer can drive the layout.

mod compose;
mod error;
mod geometry;
mod wrap;

pub use compose::{DrawRun, LineLayout, compose, layout_text, place_line};
pub use error::{Error, Result};
pub use geometry::{Align, LayoutBox};
pub use wrap::{Budget, WrapMode, wrap};
