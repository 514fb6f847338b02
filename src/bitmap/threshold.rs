//! Luminance thresholding.

use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;
use imageproc::map::map_colors;

use super::{BACKGROUND, FOREGROUND};

/// Binary threshold with optional inversion.
///
/// A pixel is foreground when its (possibly inverted) luminance is strictly
/// greater than `level`. A luminance equal to `level` is background.
pub fn threshold(luma: &GrayImage, level: u8, invert: bool) -> GrayImage {
    map_colors(luma, |p| {
        let mut y = p.0[0];
        if invert {
            y = 255 - y;
        }
        Luma([if y > level { FOREGROUND } else { BACKGROUND }])
    })
}

/// Threshold at the level chosen by Otsu's method.
pub fn otsu(luma: &GrayImage, invert: bool) -> GrayImage {
    if luma.width() == 0 || luma.height() == 0 {
        return GrayImage::new(luma.width(), luma.height());
    }
    let source = if invert {
        map_colors(luma, |p| Luma([255 - p.0[0]]))
    } else {
        luma.clone()
    };
    let level = otsu_level(&source);
    tracing::info!("  Threshold   Otsu = {}", level);
    threshold(&source, level, false)
}
