use std::{fs::read, path::Path};

use image::{
    DynamicImage, GenericImageView, RgbaImage,
    imageops::{self, FilterType},
};
use log::debug;

use crate::error::{Error, Result};

/// Open an image from disk.
pub fn load_path(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    let data = read(path).map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
    load_bytes(&data)
}

/// Decode an in-memory image, guessing the format from its contents.
pub fn load_bytes(data: &[u8]) -> Result<DynamicImage> {
    let image = image::load_from_memory(data)?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::Empty { width, height });
    }
    Ok(image)
}

/// Smallest size with the source aspect ratio that covers `width` x `height`.
pub fn cover_size(source: (u32, u32), width: u32, height: u32) -> (u32, u32) {
    let (sw, sh) = (f64::from(source.0.max(1)), f64::from(source.1.max(1)));
    let scale = (f64::from(width) / sw).max(f64::from(height) / sh);
    let scaled_w = ((sw * scale).round() as u32).max(width);
    let scaled_h = ((sh * scale).round() as u32).max(height);
    (scaled_w, scaled_h)
}

/// Scale `source` to cover the box, then crop the overflow evenly from both sides.
///
/// The result is exactly `width` x `height`; nothing is letterboxed.
pub fn fit(source: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    let (scaled_w, scaled_h) = cover_size(source.dimensions(), width, height);
    debug!(
        "Fitting {}x{} into {width}x{height} via {scaled_w}x{scaled_h}",
        source.width(),
        source.height()
    );

    let resized = source.resize_exact(scaled_w, scaled_h, FilterType::Lanczos3).to_rgba8();
    let x_offset = (scaled_w - width) / 2;
    let y_offset = (scaled_h - height) / 2;
    imageops::crop_imm(&resized, x_offset, y_offset, width, height).to_image()
}

/// Alpha-composite `image` onto `canvas` with its top-left corner at `(x, y)`.
pub fn paste(canvas: &mut RgbaImage, image: &RgbaImage, x: i32, y: i32) {
    imageops::overlay(canvas, image, i64::from(x), i64::from(y));
}
