//! Render configuration: the JSON contract between card authoring and rendering.

use std::{
    fs::{read_to_string, write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use text_layout::{Align, LayoutBox, WrapMode};

use crate::{
    card::{Card, Flavor, ImageSource},
    error::{ConfigError, ValidationError},
};

/// Default pixel sizes used by the card templates.
pub const TITLE_SIZE: u32 = 48;
pub const CATEGORY_SIZE: u32 = 28;
pub const DESC_SIZE: u32 = 28;

/// Template file names written by `init`.
pub const ATTACK_TEMPLATE: &str = "attackcard.png";
pub const DEFENSE_TEMPLATE: &str = "defensecard.png";

/// Default font file name written by `init`.
pub const FONT_FILENAME: &str = "Rajdhani-Regular.ttf";

/// One flavor's template and cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorBinding {
    pub base_image: PathBuf,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl FlavorBinding {
    pub fn new(base_image: impl Into<PathBuf>) -> Self {
        Self { base_image: base_image.into(), cards: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flavors {
    pub attack: FlavorBinding,
    pub defense: FlavorBinding,
}

/// One font family at three pixel sizes. The quote uses `desc_size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub path: PathBuf,
    pub title_size: u32,
    pub category_size: u32,
    pub desc_size: u32,
}

/// Named boxes on the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub title_box: LayoutBox,
    pub image_box: LayoutBox,
    pub category_box: LayoutBox,
    pub desc_box: LayoutBox,
    pub quote_box: LayoutBox,
}

/// Alignment and fill color of one text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub align: Align,
    pub color: [u8; 4],
}

impl TextStyle {
    pub const WHITE: [u8; 4] = [255, 255, 255, 255];

    pub const fn aligned(align: Align) -> Self {
        Self { align, color: Self::WHITE }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::aligned(Align::Left)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyles {
    pub title: TextStyle,
    pub category: TextStyle,
    pub description: TextStyle,
    pub quote: TextStyle,
}

impl Default for TextStyles {
    fn default() -> Self {
        Self {
            title: TextStyle::aligned(Align::Center),
            category: TextStyle::aligned(Align::Left),
            description: TextStyle::aligned(Align::Justified),
            quote: TextStyle::aligned(Align::Left),
        }
    }
}

/// Everything the renderer needs besides the asset bytes themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub flavors: Flavors,
    pub font: FontSpec,
    pub layout: Layout,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub styles: TextStyles,
    #[serde(default)]
    pub wrap: WrapMode,
}

impl RenderConfig {
    /// Read a config file. Relative asset paths resolve against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let mut config = Self::from_json(&text)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.font.check()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        write(path, self.to_json()?)
            .map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })
    }

    /// Config with the stock card template geometry and no cards.
    pub fn starter() -> Self {
        Self {
            flavors: Flavors {
                attack: FlavorBinding::new(ATTACK_TEMPLATE),
                defense: FlavorBinding::new(DEFENSE_TEMPLATE),
            },
            font: FontSpec {
                path: FONT_FILENAME.into(),
                title_size: TITLE_SIZE,
                category_size: CATEGORY_SIZE,
                desc_size: DESC_SIZE,
            },
            layout: Layout {
                title_box: LayoutBox { x: 175, y: 83, width: 400, height: 60 },
                image_box: LayoutBox { x: 107, y: 151, width: 530, height: 282 },
                category_box: LayoutBox { x: 115, y: 444, width: 300, height: 40 },
                desc_box: LayoutBox { x: 115, y: 495, width: 500, height: 180 },
                quote_box: LayoutBox { x: 115, y: 685, width: 500, height: 100 },
            },
            output_dir: "output".into(),
            styles: TextStyles::default(),
            wrap: WrapMode::default(),
        }
    }

    pub fn binding(&self, flavor: Flavor) -> &FlavorBinding {
        match flavor {
            Flavor::Attack => &self.flavors.attack,
            Flavor::Defense => &self.flavors.defense,
        }
    }

    pub fn binding_mut(&mut self, flavor: Flavor) -> &mut FlavorBinding {
        match flavor {
            Flavor::Attack => &mut self.flavors.attack,
            Flavor::Defense => &mut self.flavors.defense,
        }
    }

    /// All cards in render order: attack first, then defense.
    pub fn cards(&self) -> impl Iterator<Item = (Flavor, &Card)> {
        Flavor::ALL
            .into_iter()
            .flat_map(move |flavor| self.binding(flavor).cards.iter().map(move |card| (flavor, card)))
    }

    pub fn card_count(&self) -> usize {
        self.flavors.attack.cards.len() + self.flavors.defense.cards.len()
    }

    /// Every ingestion problem, in render order.
    pub fn validate_cards(&self) -> Vec<ValidationError> {
        Flavor::ALL
            .into_iter()
            .flat_map(|flavor| {
                self.binding(flavor)
                    .cards
                    .iter()
                    .enumerate()
                    .filter_map(move |(index, card)| card.validate(flavor, index).err())
            })
            .collect()
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() && !path.as_os_str().is_empty() {
                *path = base.join(&*path);
            }
        };

        resolve(&mut self.font.path);
        resolve(&mut self.output_dir);
        for flavor in Flavor::ALL {
            let binding = self.binding_mut(flavor);
            resolve(&mut binding.base_image);
            for card in &mut binding.cards {
                if let Some(ImageSource::Path(path)) = &mut card.image {
                    resolve(path);
                }
            }
        }
    }
}

impl FontSpec {
    fn check(&self) -> Result<(), ConfigError> {
        for (field, size) in [
            ("title_size", self.title_size),
            ("category_size", self.category_size),
            ("desc_size", self.desc_size),
        ] {
            if size == 0 {
                return Err(ConfigError::InvalidFontSize { field });
            }
        }
        Ok(())
    }
}
