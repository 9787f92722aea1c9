use std::{io, path::PathBuf};

use crate::card::Flavor;

/// Problems loading or saving a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("font {field} must be positive")]
    InvalidFontSize { field: &'static str },
}

/// A card rejected at ingestion. The renderer never produces these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{flavor} card #{index}: title is required")]
    MissingTitle { flavor: Flavor, index: usize },

    #[error("{flavor} card '{title}': description is required")]
    MissingDescription { flavor: Flavor, title: String },
}

/// Why a single card failed to render.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("font unavailable: {0}")]
    Font(#[from] font_metrics::Error),

    #[error("template {} unavailable: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: image_fit::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl RenderError {
    /// Missing or corrupt font or template.
    pub fn is_asset(&self) -> bool {
        matches!(self, RenderError::Font(_) | RenderError::Template { .. })
    }
}
