//! Bitmap stage: image loading and binarization.
//!
//! Every strategy reduces the source to luminance first, then produces a
//! `GrayImage` mask where foreground is [`FOREGROUND`] and background is
//! [`BACKGROUND`].

pub mod sobel;
pub mod threshold;

use std::path::Path;

use image::{DynamicImage, GenericImageView, GrayImage, ImageReader, Luma, Pixel, Rgba};

use crate::config::BinarizeMethod;
use crate::error::PlotError;

/// Mask value for ink.
pub const FOREGROUND: u8 = 255;
/// Mask value for paper.
pub const BACKGROUND: u8 = 0;

/// Decode an image file (PNG, JPEG, ...).
pub fn load(path: &Path) -> Result<DynamicImage, PlotError> {
    ImageReader::open(path)
        .map_err(|e| PlotError::ImageLoad(e.to_string()))?
        .decode()
        .map_err(|e| PlotError::ImageLoad(e.to_string()))
}

/// Convert an image to a binary mask with the given strategy.
pub fn binarize<I>(image: &I, method: &BinarizeMethod) -> GrayImage
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let luma = luminance(image);
    match *method {
        BinarizeMethod::Threshold { level, invert } => threshold::threshold(&luma, level, invert),
        BinarizeMethod::EdgeDetect { threshold } => sobel::edge_mask(&luma, threshold),
        BinarizeMethod::Otsu { invert } => threshold::otsu(&luma, invert),
    }
}

/// Single-channel brightness of every pixel.
///
/// `Y = (299 R + 587 G + 114 B + 500) / 1000` on alpha-premultiplied
/// 8-bit channels, so the result is rounded half-up.
pub fn luminance<I>(image: &I) -> GrayImage
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        Luma([luma_of(image.get_pixel(x, y).to_rgba())])
    })
}

fn luma_of(pixel: Rgba<u8>) -> u8 {
    let [r, g, b, a] = pixel.0;
    let r = premultiply(r, a);
    let g = premultiply(g, a);
    let b = premultiply(b, a);
    ((r * 299 + g * 587 + b * 114 + 500) / 1000) as u8
}

fn premultiply(channel: u8, alpha: u8) -> u32 {
    (channel as u32 * alpha as u32 + 127) / 255
}

/// Number of foreground pixels in a mask.
pub fn count_foreground(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p.0[0] == FOREGROUND).count()
}
