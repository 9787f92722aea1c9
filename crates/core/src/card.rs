//! Card records and flavors.

use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Attack or defense. Selects the template and the category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    Attack,
    Defense,
}

impl Flavor {
    pub const ALL: [Flavor; 2] = [Flavor::Attack, Flavor::Defense];

    /// Category text drawn on the card.
    pub fn label(self) -> &'static str {
        match self {
            Flavor::Attack => "Ataque",
            Flavor::Defense => "Defesa",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Flavor::Attack => "attack",
            Flavor::Defense => "defense",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Editorial state. Anything other than `"ready"` reads as a draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CardState {
    #[default]
    Draft,
    Ready,
}

impl From<String> for CardState {
    fn from(s: String) -> Self {
        if s.trim().eq_ignore_ascii_case("ready") { CardState::Ready } else { CardState::Draft }
    }
}

impl From<CardState> for String {
    fn from(state: CardState) -> Self {
        match state {
            CardState::Draft => "draft".to_string(),
            CardState::Ready => "ready".to_string(),
        }
    }
}

/// Where a portrait comes from: a path in JSON, or raw bytes handed over in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// One card. The renderer only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub deck: String,
    pub title: String,
    #[serde(default)]
    pub state: CardState,
    #[serde(default)]
    pub image: Option<ImageSource>,
    pub description: String,
    #[serde(default)]
    pub quote: Option<String>,
}

impl Card {
    pub fn new(deck: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            deck: deck.into(),
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = Some(quote.into());
        self
    }

    pub fn with_image(mut self, image: ImageSource) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_state(mut self, state: CardState) -> Self {
        self.state = state;
        self
    }

    /// The quote, if it has any visible text.
    pub fn quote_text(&self) -> Option<&str> {
        self.quote.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    pub fn is_ready(&self) -> bool {
        self.state == CardState::Ready
    }

    /// Ingestion check: title and description must be non-blank.
    pub fn validate(&self, flavor: Flavor, index: usize) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle { flavor, index });
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription { flavor, title: self.title.clone() });
        }
        Ok(())
    }
}
