//! Per-card rendering.
//!
//! A card moves through a fixed sequence of [`Stage`]s on its own canvas:
//!
//! ```text
//! Pending -> TemplateOpened -> TitleDrawn -> [ImageComposited] -> CategoryDrawn
//!         -> DescriptionDrawn -> [QuoteDrawn] -> Saved
//! ```
//!
//! The bracketed stages are skipped when the card has no portrait or quote.
//! Any font, template or write error stops the card at its current stage and
//! is reported as a [`CardFailure`]; nothing is shared between cards.

use std::{
    fmt,
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use font_metrics::{FontFile, FontHandle, draw_text};
use image::{DynamicImage, ImageError, ImageFormat, Rgba, RgbaImage};
use log::{debug, trace, warn};
use text_layout::{LayoutBox, LineLayout, layout_text};

use crate::{
    card::{Card, Flavor, ImageSource},
    config::{RenderConfig, TextStyle},
    error::RenderError,
};

/// Progress of one card through the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Pending,
    TemplateOpened,
    TitleDrawn,
    ImageComposited,
    CategoryDrawn,
    DescriptionDrawn,
    QuoteDrawn,
    Saved,
}

/// A card that stopped before `Saved`.
#[derive(Debug, thiserror::Error)]
#[error("failed after {stage:?}: {error}")]
pub struct CardFailure {
    /// Last stage the card reached.
    pub stage: Stage,
    #[source]
    pub error: RenderError,
}

/// Text fields drawn on every card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Category,
    Description,
    Quote,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Title => "title",
            Field::Category => "category",
            Field::Description => "description",
            Field::Quote => "quote",
        })
    }
}

/// Computed text placement for a card, without any pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPlan {
    pub fields: Vec<(Field, LayoutBox, LineLayout)>,
}

impl CardPlan {
    pub fn field(&self, field: Field) -> Option<&LineLayout> {
        self.fields.iter().find(|(f, _, _)| *f == field).map(|(_, _, layout)| layout)
    }
}

/// `{deck}_{title}.png` with spaces and path separators replaced by underscores.
pub fn output_file_name(card: &Card) -> String {
    format!("{}_{}.png", file_stem_part(&card.deck), file_stem_part(&card.title))
}

fn file_stem_part(text: &str) -> String {
    text.chars().map(|c| if c == ' ' || c == '/' || c == '\\' { '_' } else { c }).collect()
}

struct Fonts<'a> {
    title: FontHandle<'a>,
    category: FontHandle<'a>,
    desc: FontHandle<'a>,
}

struct Progress<'c> {
    card: &'c Card,
    stage: Stage,
}

impl<'c> Progress<'c> {
    fn new(card: &'c Card) -> Self {
        Self { card, stage: Stage::Pending }
    }

    fn advance(&mut self, stage: Stage) {
        trace!("{}/{}: {:?} -> {:?}", self.card.deck, self.card.title, self.stage, stage);
        self.stage = stage;
    }

    fn fail(&self, error: impl Into<RenderError>) -> CardFailure {
        CardFailure { stage: self.stage, error: error.into() }
    }
}

/// Renders cards against one configuration and one font.
pub struct CardRenderer<'a> {
    config: &'a RenderConfig,
    font: &'a FontFile,
}

impl<'a> CardRenderer<'a> {
    pub fn new(config: &'a RenderConfig, font: &'a FontFile) -> Self {
        Self { config, font }
    }

    /// Render a card and write it to the output directory.
    pub fn render(&self, flavor: Flavor, card: &Card) -> Result<PathBuf, CardFailure> {
        let (canvas, mut progress) = self.compose(flavor, card)?;

        let path = save_png(&canvas, &self.config.output_dir, &output_file_name(card))
            .map_err(|e| progress.fail(e))?;
        progress.advance(Stage::Saved);
        Ok(path)
    }

    /// Render a card to a canvas without saving it.
    pub fn render_canvas(&self, flavor: Flavor, card: &Card) -> Result<RgbaImage, CardFailure> {
        self.compose(flavor, card).map(|(canvas, _)| canvas)
    }

    /// Lay out every text field of a card.
    pub fn plan(&self, flavor: Flavor, card: &Card) -> Result<CardPlan, RenderError> {
        let fonts = self.fonts()?;
        let layout = &self.config.layout;
        let styles = &self.config.styles;

        let mut fields = vec![
            (
                Field::Title,
                layout.title_box,
                self.layout(&card.title, &fonts.title, &layout.title_box, styles.title),
            ),
            (
                Field::Category,
                layout.category_box,
                self.layout(flavor.label(), &fonts.category, &layout.category_box, styles.category),
            ),
            (
                Field::Description,
                layout.desc_box,
                self.layout(&card.description, &fonts.desc, &layout.desc_box, styles.description),
            ),
        ];
        if let Some(quote) = card.quote_text() {
            fields.push((
                Field::Quote,
                layout.quote_box,
                self.layout(quote, &fonts.desc, &layout.quote_box, styles.quote),
            ));
        }
        Ok(CardPlan { fields })
    }

    fn compose<'c>(
        &self,
        flavor: Flavor,
        card: &'c Card,
    ) -> Result<(RgbaImage, Progress<'c>), CardFailure> {
        let mut progress = Progress::new(card);
        let layout = &self.config.layout;
        let styles = &self.config.styles;

        let fonts = self.fonts().map_err(|e| progress.fail(e))?;
        let mut canvas = open_template(&self.config.binding(flavor).base_image)
            .map_err(|e| progress.fail(e))?;
        progress.advance(Stage::TemplateOpened);

        self.draw_field(&mut canvas, &card.title, &fonts.title, &layout.title_box, styles.title);
        progress.advance(Stage::TitleDrawn);

        if let Some(portrait) = load_portrait(card) {
            let bx = &layout.image_box;
            let fitted = image_fit::fit(&portrait, bx.width as u32, bx.height as u32);
            image_fit::paste(&mut canvas, &fitted, bx.x, bx.y);
            progress.advance(Stage::ImageComposited);
        }

        self.draw_field(
            &mut canvas,
            flavor.label(),
            &fonts.category,
            &layout.category_box,
            styles.category,
        );
        progress.advance(Stage::CategoryDrawn);

        self.draw_field(
            &mut canvas,
            &card.description,
            &fonts.desc,
            &layout.desc_box,
            styles.description,
        );
        progress.advance(Stage::DescriptionDrawn);

        if let Some(quote) = card.quote_text() {
            self.draw_field(&mut canvas, quote, &fonts.desc, &layout.quote_box, styles.quote);
            progress.advance(Stage::QuoteDrawn);
        }

        Ok((canvas, progress))
    }

    fn fonts(&self) -> Result<Fonts<'a>, RenderError> {
        let spec = &self.config.font;
        Ok(Fonts {
            title: self.font.at_size(spec.title_size)?,
            category: self.font.at_size(spec.category_size)?,
            desc: self.font.at_size(spec.desc_size)?,
        })
    }

    fn layout(&self, text: &str, font: &FontHandle<'_>, bx: &LayoutBox, style: TextStyle) -> LineLayout {
        layout_text(text, font, bx, style.align, self.config.wrap)
    }

    fn draw_field(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        font: &FontHandle<'_>,
        bx: &LayoutBox,
        style: TextStyle,
    ) {
        let layout = self.layout(text, font, bx, style);
        if layout.overflows(bx) {
            debug!(
                "{} lines of {}px text overflow box at ({}, {}) by {}px",
                layout.lines,
                font.px(),
                bx.x,
                bx.y,
                layout.bottom - bx.bottom()
            );
        }
        let color = Rgba(style.color);
        for run in &layout.runs {
            draw_text(canvas, font, run.x, run.y, &run.text, color);
        }
    }
}

fn open_template(path: &Path) -> Result<RgbaImage, RenderError> {
    image_fit::load_path(path)
        .map(DynamicImage::into_rgba8)
        .map_err(|source| RenderError::Template { path: path.to_path_buf(), source })
}

/// Decode the card's portrait. Unusable sources are treated as absent.
fn load_portrait(card: &Card) -> Option<DynamicImage> {
    let loaded = match card.image.as_ref()? {
        ImageSource::Path(path) if path.as_os_str().is_empty() || path.is_dir() => {
            debug!("No portrait for '{}': {} is not a file", card.title, path.display());
            return None;
        }
        ImageSource::Bytes(bytes) if bytes.is_empty() => return None,
        ImageSource::Path(path) => image_fit::load_path(path),
        ImageSource::Bytes(bytes) => image_fit::load_bytes(bytes),
    };

    loaded
        .inspect_err(|e| warn!("Skipping portrait for '{}': {e}", card.title))
        .ok()
}

/// Write `canvas` as `dir/name`, creating `dir` but nothing below it.
fn save_png(canvas: &RgbaImage, dir: &Path, name: &str) -> Result<PathBuf, RenderError> {
    if !dir.as_os_str().is_empty() {
        create_dir_all(dir).map_err(|source| RenderError::Io { path: dir.to_path_buf(), source })?;
    }

    let path = dir.join(name);
    canvas.save_with_format(&path, ImageFormat::Png).map_err(|e| match e {
        ImageError::IoError(source) => RenderError::Io { path: path.clone(), source },
        source => RenderError::Encode { path: path.clone(), source },
    })?;
    Ok(path)
}
