use serde::{Deserialize, Serialize};

/// All vectorization and plotting parameters in one struct.
/// Serializable so presets can be stored next to a plot job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    // -- Bitmap stage --
    /// How the source image is reduced to a foreground/background mask.
    pub method: BinarizeMethod,

    // -- Toolpath stage --
    /// Mapping from pixel grid to physical plotter units.
    pub toolpath: ToolpathConfig,
}

/// Strategy for converting an image into a binary mask.
///
/// Every variant produces a `GrayImage` with foreground `255` and background `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum BinarizeMethod {
    /// Luminance strictly above `level` is foreground.
    Threshold { level: u8, invert: bool },
    /// Sobel gradient magnitude strictly above `threshold` is foreground.
    EdgeDetect { threshold: f64 },
    /// Like `Threshold`, with the level picked by Otsu's method.
    Otsu { invert: bool },
}

/// Physical placement and timing of the plotted strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolpathConfig {
    /// Y position of the bottom of the image, in plotter units.
    pub y_start: f64,
    /// Height of the image in plotter units. Width follows the aspect ratio.
    pub height: f64,
    /// Toolhead speed in units per second.
    pub speed: f64,
    /// Minimum spacing between emitted waypoints inside a stroke.
    /// Stroke endpoints are always emitted.
    pub point_distance: f64,
    /// Dwell before lowering the pen at the start of each stroke.
    pub start_delay_ms: u64,
    /// Dwell before raising the pen at the end of each stroke.
    pub end_delay_ms: u64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            method: BinarizeMethod::default(),
            toolpath: ToolpathConfig::default(),
        }
    }
}

impl Default for BinarizeMethod {
    fn default() -> Self {
        BinarizeMethod::Threshold {
            level: 128,
            invert: false,
        }
    }
}

impl Default for ToolpathConfig {
    fn default() -> Self {
        Self {
            y_start: 8.0,
            height: 8.0,
            speed: 5.0,
            point_distance: 0.25,
            start_delay_ms: 1000,
            end_delay_ms: 1000,
        }
    }
}

impl BinarizeMethod {
    /// Short name used for logging and diagnostic file names.
    pub fn name(&self) -> &'static str {
        match self {
            BinarizeMethod::Threshold { .. } => "threshold",
            BinarizeMethod::EdgeDetect { .. } => "edge-detection",
            BinarizeMethod::Otsu { .. } => "otsu",
        }
    }
}
