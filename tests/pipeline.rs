use image::{Rgb, RgbImage};
use img2plot::{
    plan, trace, vectorize, BinarizeMethod, Instruction, PenMode, PlotConfig, Point,
    ToolpathConfig,
};

const DARK_ON_LIGHT: BinarizeMethod = BinarizeMethod::Threshold {
    level: 128,
    invert: true,
};

/// White canvas with black rectangles.
fn drawing(width: u32, height: u32, rects: &[(u32, u32, u32, u32)]) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let ink = rects
            .iter()
            .any(|&(x0, y0, w, h)| (x0..x0 + w).contains(&x) && (y0..y0 + h).contains(&y));
        if ink {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    })
}

fn line(y: u32, xs: std::ops::RangeInclusive<u32>) -> Vec<Point> {
    xs.map(|x| Point::new(x, y)).collect()
}

#[test]
fn thick_bar_becomes_one_centre_line() {
    let img = drawing(30, 15, &[(3, 6, 24, 3)]);
    let vector = vectorize(&img, &DARK_ON_LIGHT);
    assert_eq!(vector.strokes.len(), 1);
    assert_eq!(vector.strokes[0].points(), &line(7, 4..=24)[..]);
}

#[test]
fn separate_bars_need_a_pen_lift() {
    let img = drawing(30, 15, &[(3, 6, 9, 3), (18, 6, 9, 3)]);
    let vector = vectorize(&img, &DARK_ON_LIGHT);
    assert_eq!(vector.strokes.len(), 2);
    assert_eq!(vector.strokes[0].points(), &line(7, 4..=9)[..]);
    assert_eq!(vector.strokes[1].points(), &line(7, 19..=24)[..]);

    let code = plan(&vector, &ToolpathConfig::default());
    assert!(matches!(code[0], Instruction::Speed { .. }));
    let downs = code
        .iter()
        .filter(|ins| **ins == Instruction::Pen { mode: PenMode::Down })
        .count();
    let ups = code
        .iter()
        .filter(|ins| **ins == Instruction::Pen { mode: PenMode::Up })
        .count();
    assert_eq!((downs, ups), (2, 2));
    assert_eq!(code.last(), Some(&Instruction::Pen { mode: PenMode::Up }));
}

#[test]
fn cross_splits_into_arms() {
    let img = drawing(17, 17, &[(7, 2, 3, 13), (2, 7, 13, 3)]);
    let vector = vectorize(&img, &DARK_ON_LIGHT);
    assert_eq!(vector.strokes.len(), 3);
    let total: usize = vector.strokes.iter().map(|s| s.len()).sum();
    let skeleton_px = vector.skeleton.pixels().filter(|p| p.0[0] == 255).count();
    assert_eq!(total, skeleton_px);
    assert_eq!(vector.strokes[0].first(), Point::new(8, 3));
}

#[test]
fn single_pixel_is_a_single_stroke() {
    let img = drawing(5, 5, &[(2, 2, 1, 1)]);
    let vector = vectorize(&img, &DARK_ON_LIGHT);
    assert_eq!(vector.strokes.len(), 1);
    assert_eq!(vector.strokes[0].points(), &[Point::new(2, 2)][..]);
}

#[test]
fn empty_image_yields_nothing() {
    let img = RgbImage::new(0, 0);
    let vector = vectorize(&img, &DARK_ON_LIGHT);
    assert!(vector.strokes.is_empty());
    assert_eq!(vector.mask.dimensions(), (0, 0));
    assert_eq!(plan(&vector, &ToolpathConfig::default()).len(), 1);
}

#[test]
fn flat_image_has_no_edges() {
    let img = drawing(12, 12, &[]);
    for threshold in [0.0, 50.0] {
        let vector = vectorize(&img, &BinarizeMethod::EdgeDetect { threshold });
        assert!(vector.strokes.is_empty());
    }
}

#[test]
fn trace_reads_image_from_disk() {
    let dir = std::env::temp_dir().join(format!("img2plot-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bar.png");
    drawing(30, 15, &[(3, 6, 24, 3)]).save(&path).unwrap();

    let config = PlotConfig {
        method: DARK_ON_LIGHT,
        ..PlotConfig::default()
    };
    let result = trace(&path, &config).unwrap();
    assert_eq!(result.vector.strokes.len(), 1);
    assert_eq!(
        result.instructions.first(),
        Some(&Instruction::Speed { units_per_sec: 5.0 })
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_is_a_load_error() {
    let err = trace(
        std::path::Path::new("/nonexistent/img2plot/missing.png"),
        &PlotConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, img2plot::PlotError::ImageLoad(_)));
}
