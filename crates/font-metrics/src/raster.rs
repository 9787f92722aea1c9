//! Text rasterization onto RGBA canvases.
//!
//! Glyph outlines are collected into a single `tiny_skia` path per run, filled
//! into an antialiased coverage mask sized to the run's bounds, and then
//! composited source-over onto the canvas. Pixels outside the canvas are
//! dropped; nothing is clipped to the layout box.

use image::{Pixel, Rgba, RgbaImage};
use log::debug;
use skrifa::{
    instance::LocationRef,
    outline::{DrawSettings, OutlinePen},
};
use tiny_skia::{FillRule, Mask, Path, PathBuilder, Transform};

use crate::font::FontHandle;

/// Converts y-up font units already scaled to pixels into canvas space.
struct RunPen {
    builder: PathBuilder,
    origin_x: f32,
    baseline: f32,
}

impl RunPen {
    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x, self.baseline - y)
    }
}

impl OutlinePen for RunPen {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let (cx0, cy0) = self.point(cx0, cy0);
        let (x, y) = self.point(x, y);
        self.builder.quad_to(cx0, cy0, x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (cx0, cy0) = self.point(cx0, cy0);
        let (cx1, cy1) = self.point(cx1, cy1);
        let (x, y) = self.point(x, y);
        self.builder.cubic_to(cx0, cy0, cx1, cy1, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Build the outline path of a run whose top-left corner is at `(x, y)`.
///
/// Returns `None` when the run has no visible ink (empty or whitespace only).
pub fn run_path(font: &FontHandle<'_>, x: i32, y: i32, text: &str) -> Option<Path> {
    let mut pen =
        RunPen { builder: PathBuilder::new(), origin_x: x as f32, baseline: y as f32 + font.ascent() };

    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        if let Some(glyph) = font.outlines().get(glyph_id)
            && let Err(e) = glyph.draw(DrawSettings::unhinted(font.size(), LocationRef::default()), &mut pen)
        {
            debug!("Skipping outline for {ch:?}: {e:?}");
        }
        pen.origin_x += font.advance(glyph_id);
    }

    pen.builder.finish()
}

/// Draw a run of text with its top-left corner at `(x, y)`.
pub fn draw_text(
    canvas: &mut RgbaImage,
    font: &FontHandle<'_>,
    x: i32,
    y: i32,
    text: &str,
    color: Rgba<u8>,
) {
    let Some(path) = run_path(font, x, y, text) else {
        return;
    };

    let bounds = path.bounds();
    let left = bounds.left().floor() as i32;
    let top = bounds.top().floor() as i32;
    let width = (bounds.right().ceil() as i32 - left).max(1) as u32;
    let height = (bounds.bottom().ceil() as i32 - top).max(1) as u32;

    let Some(mut mask) = Mask::new(width, height) else {
        return;
    };
    mask.fill_path(
        &path,
        FillRule::Winding,
        true,
        Transform::from_translate(-left as f32, -top as f32),
    );

    composite_mask(canvas, &mask, left, top, color);
}

fn composite_mask(canvas: &mut RgbaImage, mask: &Mask, left: i32, top: i32, color: Rgba<u8>) {
    let (canvas_w, canvas_h) = (canvas.width() as i64, canvas.height() as i64);
    let mask_w = mask.width() as usize;

    for (i, &coverage) in mask.data().iter().enumerate() {
        if coverage == 0 {
            continue;
        }
        let cx = left as i64 + (i % mask_w) as i64;
        let cy = top as i64 + (i / mask_w) as i64;
        if cx < 0 || cy < 0 || cx >= canvas_w || cy >= canvas_h {
            continue;
        }
        blend_over(canvas.get_pixel_mut(cx as u32, cy as u32), color, coverage);
    }
}

/// Source-over compositing of `src` scaled by `coverage` onto a straight-alpha pixel.
pub fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: u8) {
    let alpha = (u16::from(src[3]) * u16::from(coverage) + 127) / 255;
    if alpha == 0 {
        return;
    }
    let mut src = src;
    src.0[3] = alpha as u8;
    dst.blend(&src);
}
