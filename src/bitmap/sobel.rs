//! Sobel edge mask.
//!
//! The one-pixel image border has no full 3x3 window and is left as
//! background.

use image::{GrayImage, Luma};

use super::FOREGROUND;

const GX: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const GY: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Foreground where the gradient magnitude is strictly above `threshold`.
pub fn edge_mask(luma: &GrayImage, threshold: f64) -> GrayImage {
    let (width, height) = luma.dimensions();
    let mut mask = GrayImage::new(width, height);
    if width < 3 || height < 3 {
        return mask;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if magnitude(luma, x, y) > threshold {
                mask.put_pixel(x, y, Luma([FOREGROUND]));
            }
        }
    }
    mask
}

/// Gradient magnitude at an interior pixel.
fn magnitude(luma: &GrayImage, x: u32, y: u32) -> f64 {
    let mut sum_x = 0i32;
    let mut sum_y = 0i32;
    for ky in 0..3 {
        for kx in 0..3 {
            let pix = luma.get_pixel(x + kx - 1, y + ky - 1).0[0] as i32;
            sum_x += GX[ky as usize][kx as usize] * pix;
            sum_y += GY[ky as usize][kx as usize] * pix;
        }
    }
    ((sum_x * sum_x + sum_y * sum_y) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::{count_foreground, BACKGROUND};

    #[test]
    fn flat_image_has_no_edges() {
        for value in [0u8, 77, 255] {
            let img = GrayImage::from_pixel(6, 5, Luma([value]));
            for threshold in [0.0, 1.0, 500.0] {
                assert_eq!(count_foreground(&edge_mask(&img, threshold)), 0);
            }
        }
    }

    #[test]
    fn vertical_step_is_detected_inside_border() {
        let img = GrayImage::from_fn(6, 6, |x, _| Luma([if x < 3 { 0 } else { 255 }]));
        let mask = edge_mask(&img, 100.0);
        // Columns 2 and 3 straddle the step.
        for y in 1..5 {
            assert_eq!(mask.get_pixel(2, y).0[0], FOREGROUND);
            assert_eq!(mask.get_pixel(3, y).0[0], FOREGROUND);
            assert_eq!(mask.get_pixel(1, y).0[0], BACKGROUND);
        }
        // Border rows are never processed.
        for x in 0..6 {
            assert_eq!(mask.get_pixel(x, 0).0[0], BACKGROUND);
            assert_eq!(mask.get_pixel(x, 5).0[0], BACKGROUND);
        }
    }

    #[test]
    fn magnitude_comparison_is_strict() {
        // One bright pixel: Gx at its left neighbour is 2 * 100 = 200, Gy = 0.
        let mut img = GrayImage::new(5, 5);
        img.put_pixel(2, 2, Luma([100]));
        assert_eq!(edge_mask(&img, 200.0).get_pixel(1, 2).0[0], BACKGROUND);
        assert_eq!(edge_mask(&img, 199.9).get_pixel(1, 2).0[0], FOREGROUND);
    }

    #[test]
    fn tiny_images_are_all_border() {
        let img = GrayImage::from_fn(2, 7, |x, _| Luma([(x * 255) as u8]));
        assert_eq!(count_foreground(&edge_mask(&img, 0.0)), 0);
    }
}
