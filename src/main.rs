use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use img2plot::{render, toolpath, BinarizeMethod, PlotConfig, ToolpathConfig};

#[derive(Parser)]
#[command(name = "img2plot", about = "Raster image to pen-plotter strokes")]
struct Cli {
    /// Input image path (PNG, JPEG)
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for diagnostic images and the toolpath
    #[arg(short, long, default_value = "result")]
    output: PathBuf,

    /// Luminance level (0-255), or gradient magnitude for edge-detect
    #[arg(long, default_value = "128")]
    threshold: u16,

    /// How to convert the image to black and white pixels
    #[arg(long, value_enum, default_value = "threshold")]
    bw_mode: BwMode,

    /// Invert luminance before thresholding
    #[arg(long)]
    invert: bool,

    /// Y position of the bottom of the image, in plotter units
    #[arg(long, default_value = "8.0", allow_hyphen_values = true)]
    y_start: f64,

    /// Height of the image in plotter units
    #[arg(long, default_value = "8.0")]
    height: f64,

    /// Toolhead speed in units/s
    #[arg(long, default_value = "5.0")]
    speed: f64,

    /// Minimum distance between waypoints
    #[arg(long, default_value = "0.25")]
    point_dist: f64,

    /// Delay in ms before lowering the pen at the start of each stroke
    #[arg(long, default_value = "1000")]
    start_delay: u64,

    /// Delay in ms before raising the pen at the end of each stroke
    #[arg(long, default_value = "1000")]
    end_delay: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum BwMode {
    Threshold,
    EdgeDetect,
    Otsu,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let method = match cli.bw_mode {
        BwMode::Threshold => BinarizeMethod::Threshold {
            level: u8::try_from(cli.threshold)
                .map_err(|_| format!("threshold {} out of range 0-255", cli.threshold))?,
            invert: cli.invert,
        },
        BwMode::EdgeDetect => BinarizeMethod::EdgeDetect {
            threshold: cli.threshold as f64,
        },
        BwMode::Otsu => BinarizeMethod::Otsu { invert: cli.invert },
    };
    let config = PlotConfig {
        method,
        toolpath: ToolpathConfig {
            y_start: cli.y_start,
            height: cli.height,
            speed: cli.speed,
            point_distance: cli.point_dist,
            start_delay_ms: cli.start_delay,
            end_delay_ms: cli.end_delay,
        },
    };

    std::fs::create_dir_all(&cli.output)?;

    let result = img2plot::trace(&cli.input, &config)?;
    let vector = &result.vector;
    let (w, h) = vector.skeleton.dimensions();

    // Diagnostics
    let mask_path = cli.output.join(format!("{}.png", config.method.name()));
    render::save_mask(&vector.mask, &mask_path)?;
    render::save_mask(&vector.skeleton, &cli.output.join("skeleton.png"))?;
    render::draw_strokes(w, h, &vector.strokes)
        .save(cli.output.join("strokes.png"))
        .map_err(|e| img2plot::PlotError::ImageSave(e.to_string()))?;
    render::save_svg(w, h, &vector.strokes, &cli.output.join("strokes.svg"))?;

    let path_file = cli.output.join("path.json");
    std::fs::write(&path_file, toolpath::to_json(&result.instructions)?)?;

    eprintln!("  \u{2713} {}", path_file.display());
    Ok(())
}
