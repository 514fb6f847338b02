//! img2plot: raster image → ordered pen strokes for plotters.
//!
//! Binarizes an image, thins the foreground to a one-pixel skeleton, and
//! walks the skeleton into continuous strokes ready for a pen plotter or
//! engraver.
//!
//! # Example
//!
//! ```no_run
//! use img2plot::{trace, PlotConfig};
//! use std::path::Path;
//!
//! let config = PlotConfig::default();
//! let result = trace(Path::new("drawing.png"), &config)?;
//! // result.vector.strokes contains the ordered pen-down paths
//! # Ok::<(), img2plot::PlotError>(())
//! ```

#![forbid(unsafe_code)]

pub mod bitmap;
mod config;
pub mod error;
pub mod render;
pub mod skeleton;
pub mod strokes;
pub mod toolpath;

pub use config::{BinarizeMethod, PlotConfig, ToolpathConfig};
pub use error::PlotError;
pub use strokes::{Point, Stroke};
pub use toolpath::{Instruction, PenMode};

use std::path::Path;
use std::time::Instant;

use image::{GenericImageView, GrayImage, Pixel};

use skeleton::ThinningStats;
use strokes::StrokeStats;

/// Every intermediate of the raster → stroke pipeline.
#[derive(Debug, Clone)]
pub struct Vectorized {
    /// Binarized input.
    pub mask: GrayImage,
    /// One-pixel-wide skeleton of `mask`.
    pub skeleton: GrayImage,
    /// Ordered pen-down paths in pixel coordinates.
    pub strokes: Vec<Stroke>,
    pub thinning: ThinningStats,
}

/// The result of a full run: strokes plus the plotter instruction stream.
#[derive(Debug, Clone)]
pub struct PlotResult {
    pub vector: Vectorized,
    pub instructions: Vec<Instruction>,
}

/// Image → mask → skeleton → strokes.
pub fn vectorize<I>(image: &I, method: &BinarizeMethod) -> Vectorized
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (w, h) = image.dimensions();

    // ── Binarize ──────────────────────────────────────────
    let mask = bitmap::binarize(image, method);
    tracing::info!(
        "  Binarize    {}x{} px, {} \u{2192} {} foreground px",
        w,
        h,
        method.name(),
        bitmap::count_foreground(&mask),
    );

    // ── Skeleton ──────────────────────────────────────────
    let (skeleton, thinning) = skeleton::thin_with_stats(&mask);
    tracing::info!(
        "  Skeleton    {} passes, {} px removed, {} px left",
        thinning.passes,
        thinning.removed,
        bitmap::count_foreground(&skeleton),
    );

    // ── Strokes ───────────────────────────────────────────
    let points = strokes::extract_points(&skeleton);
    let strokes = strokes::build_strokes(&points);
    let stats = StrokeStats::of(&strokes);
    tracing::info!(
        "  Strokes     {} points \u{2192} {} strokes, {} pen lifts ({:.1} px travel)",
        stats.points,
        stats.strokes,
        stats.jumps,
        stats.jump_length,
    );

    Vectorized {
        mask,
        skeleton,
        strokes,
        thinning,
    }
}

/// Full pipeline: image file → strokes → plotter instructions.
pub fn trace(image_path: &Path, config: &PlotConfig) -> Result<PlotResult, PlotError> {
    let t_start = Instant::now();

    let image = bitmap::load(image_path)?;
    let (w, h) = image.dimensions();
    tracing::info!("  Load        {} ({}x{} px)", image_path.display(), w, h);

    let vector = vectorize(&image, &config.method);
    let instructions = plan(&vector, &config.toolpath);

    tracing::info!(
        "  Result      {} strokes \u{00b7} {} instructions  ({}ms)",
        vector.strokes.len(),
        instructions.len(),
        t_start.elapsed().as_millis(),
    );

    Ok(PlotResult {
        vector,
        instructions,
    })
}

/// Map a vectorized image onto the plotter bed.
pub fn plan(vector: &Vectorized, config: &ToolpathConfig) -> Vec<Instruction> {
    let (w, h) = vector.skeleton.dimensions();
    let frame = toolpath::Frame::new(w, h, config);
    let code = toolpath::plan(&vector.strokes, &frame, config);
    tracing::info!(
        "  Toolpath    scale \u{00d7}{:.4}, {} waypoints",
        frame.scale,
        toolpath::waypoint_count(&code),
    );
    code
}
