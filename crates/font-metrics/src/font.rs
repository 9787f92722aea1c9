use std::{
    fs::read,
    path::{Path, PathBuf},
};

use skrifa::{
    FontRef, GlyphId, MetadataProvider,
    charmap::Charmap,
    instance::{LocationRef, Size},
    metrics::GlyphMetrics,
    outline::OutlineGlyphCollection,
};

use crate::error::{Error, Result};

/// Fixed gap in pixels between the descent of one line and the ascent of the next.
pub const LINE_GUTTER: i32 = 6;

/// Measurement queries needed to lay out text.
pub trait Measure {
    /// Width in pixels of a single run of text with no line breaks.
    fn measure(&self, text: &str) -> i32;

    /// Vertical distance in pixels between the tops of consecutive lines.
    fn line_advance(&self) -> i32;
}

/// Validated font bytes, loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct FontFile {
    data: Vec<u8>,
    path: Option<PathBuf>,
}

impl FontFile {
    /// Read and validate a font from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = read(path).map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
        if let Err(source) = FontRef::new(&data) {
            return Err(Error::Corrupt { path: path.to_path_buf(), source });
        }
        Ok(Self { data, path: Some(path.to_path_buf()) })
    }

    /// Validate in-memory font data.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Result<Self> {
        let data = data.into();
        FontRef::new(&data)?;
        Ok(Self { data, path: None })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Instantiate the font at a pixel size.
    pub fn at_size(&self, px: u32) -> Result<FontHandle<'_>> {
        if px == 0 {
            return Err(Error::InvalidSize(px));
        }
        let font = FontRef::new(&self.data)?;
        Ok(FontHandle::new(font, px))
    }
}

/// A font instantiated at one pixel size.
pub struct FontHandle<'a> {
    px: u32,
    size: Size,
    charmap: Charmap<'a>,
    glyph_metrics: GlyphMetrics<'a>,
    outlines: OutlineGlyphCollection<'a>,
    ascent: f32,
    descent: f32,
}

impl<'a> FontHandle<'a> {
    fn new(font: FontRef<'a>, px: u32) -> Self {
        let size = Size::new(px as f32);
        let location = LocationRef::default();
        let metrics = font.metrics(size, location);
        Self {
            px,
            size,
            charmap: font.charmap(),
            glyph_metrics: font.glyph_metrics(size, location),
            outlines: font.outline_glyphs(),
            ascent: metrics.ascent,
            descent: metrics.descent,
        }
    }

    /// Pixel size this handle was created with.
    pub fn px(&self) -> u32 {
        self.px
    }

    pub(crate) fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn outlines(&self) -> &OutlineGlyphCollection<'a> {
        &self.outlines
    }

    /// Distance from the top of a line to its baseline.
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Distance from the baseline to the bottom of a line, as a positive number.
    pub fn descent(&self) -> f32 {
        self.descent.abs()
    }

    /// Width of the natural inter-word space.
    pub fn space_width(&self) -> i32 {
        self.measure(" ")
    }

    /// Glyph for a character, falling back to `.notdef`.
    pub fn glyph_id(&self, ch: char) -> GlyphId {
        self.charmap.map(ch).unwrap_or(GlyphId::new(0))
    }

    /// Horizontal advance of a glyph in fractional pixels.
    pub fn advance(&self, glyph_id: GlyphId) -> f32 {
        self.glyph_metrics.advance_width(glyph_id).unwrap_or_default()
    }

    /// Unrounded width of a run.
    pub fn measure_exact(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.advance(self.glyph_id(ch))).sum()
    }
}

impl Measure for FontHandle<'_> {
    fn measure(&self, text: &str) -> i32 {
        self.measure_exact(text).round() as i32
    }

    fn line_advance(&self) -> i32 {
        (self.ascent + self.descent.abs()).round() as i32 + LINE_GUTTER
    }
}
