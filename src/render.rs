//! Diagnostic output: stage masks, stroke overlays and SVG previews.

use std::fmt::Write as _;
use std::path::Path;

use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use kurbo::{BezPath, Point as KPoint};

use crate::error::PlotError;
use crate::strokes::{Point, Stroke};

const PAPER: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);
const TRAVEL: Rgb<u8> = Rgb([255, 170, 170]);

/// Write a stage mask (threshold, edges, skeleton) as an image file.
pub fn save_mask(mask: &GrayImage, path: &Path) -> Result<(), PlotError> {
    mask.save(path)
        .map_err(|e| PlotError::ImageSave(format!("{}: {}", path.display(), e)))
}

/// Rasterize strokes: ink for pen-down segments, a light line for each
/// pen-up move between strokes.
pub fn draw_strokes(width: u32, height: u32, strokes: &[Stroke]) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(width, height, PAPER);

    for pair in strokes.windows(2) {
        draw_line_segment_mut(&mut canvas, as_f32(pair[0].last()), as_f32(pair[1].first()), TRAVEL);
    }

    for stroke in strokes {
        let points = stroke.points();
        if let [only] = points {
            canvas.put_pixel(only.x, only.y, INK);
            continue;
        }
        for seg in points.windows(2) {
            draw_line_segment_mut(&mut canvas, as_f32(seg[0]), as_f32(seg[1]), INK);
        }
    }
    canvas
}

fn as_f32(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

/// One open polyline per stroke, in pixel coordinates.
pub fn stroke_path(stroke: &Stroke) -> BezPath {
    let mut path = BezPath::new();
    let to_k = |p: Point| KPoint::new(p.x as f64 + 0.5, p.y as f64 + 0.5);
    path.move_to(to_k(stroke.first()));
    if stroke.len() == 1 {
        // Zero-length segment so round caps render a dot.
        path.line_to(to_k(stroke.first()));
    }
    for &p in &stroke.points()[1..] {
        path.line_to(to_k(p));
    }
    path
}

/// SVG preview of a stroke set over a `width` x `height` pixel canvas.
pub fn strokes_to_svg(width: u32, height: u32, strokes: &[Stroke]) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = width,
        h = height,
    );
    let _ = writeln!(
        svg,
        r#"<g fill="none" stroke="black" stroke-width="1" stroke-linecap="round" stroke-linejoin="round">"#
    );
    for stroke in strokes {
        let _ = writeln!(svg, r#"<path d="{}"/>"#, stroke_path(stroke).to_svg());
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Write [`strokes_to_svg`] output to disk.
pub fn save_svg(width: u32, height: u32, strokes: &[Stroke], path: &Path) -> Result<(), PlotError> {
    std::fs::write(path, strokes_to_svg(width, height, strokes))?;
    Ok(())
}
