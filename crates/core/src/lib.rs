//! Cardsmith Core - renders card records onto template images.

pub mod batch;
pub mod card;
pub mod config;
pub mod error;
pub mod render;

pub use batch::{BatchOptions, BatchReport, CardOutcome, CardStatus, load_font, render_batch};
pub use card::{Card, CardState, Flavor, ImageSource};
pub use config::{FlavorBinding, Flavors, FontSpec, Layout, RenderConfig, TextStyle, TextStyles};
pub use error::{ConfigError, RenderError, ValidationError};
pub use font_metrics::FontFile;
pub use render::{CardFailure, CardPlan, CardRenderer, Field, Stage, output_file_name};
pub use text_layout::{Align, LayoutBox, WrapMode};
