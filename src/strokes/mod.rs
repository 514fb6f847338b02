//! Path assembly: skeleton pixels → ordered pen strokes.
//!
//! 1. Collect foreground pixels in raster order
//! 2. Greedy nearest-neighbour traversal from the first pixel
//! 3. Split the traversal wherever consecutive points are not 8-adjacent
//!
//! The raster order doubles as the tie-break order of the traversal, so
//! the output is fully determined by the skeleton.

mod traversal;

pub use traversal::Traversal;

use image::GrayImage;

/// Pixels brighter than this are taken from the skeleton.
const MIDPOINT: u8 = 128;

/// A foreground pixel position. Origin top-left, y down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// True if the pixels touch, including diagonally.
    pub fn is_adjacent(self, other: Point) -> bool {
        self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }

    /// Squared Euclidean distance. Orders exactly like [`Point::distance`].
    pub fn distance_squared(self, other: Point) -> u64 {
        let dx = self.x.abs_diff(other.x) as u64;
        let dy = self.y.abs_diff(other.y) as u64;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

/// One continuous pen-down traversal. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stroke(Vec<Point>);

impl Stroke {
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for strokes built by [`build_strokes`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Point {
        self.0[0]
    }

    pub fn last(&self) -> Point {
        self.0[self.0.len() - 1]
    }

    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

/// Summary of a stroke set, for progress reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StrokeStats {
    pub strokes: usize,
    pub points: usize,
    /// Pen lifts between strokes.
    pub jumps: usize,
    /// Total pen-up travel in pixels.
    pub jump_length: f64,
}

impl StrokeStats {
    pub fn of(strokes: &[Stroke]) -> Self {
        let jump_length = strokes
            .windows(2)
            .map(|pair| pair[0].last().distance(pair[1].first()))
            .sum();
        StrokeStats {
            strokes: strokes.len(),
            points: strokes.iter().map(Stroke::len).sum(),
            jumps: strokes.len().saturating_sub(1),
            jump_length,
        }
    }
}

/// Foreground pixels of a skeleton in row-major order (y outer, x inner).
pub fn extract_points(skeleton: &GrayImage) -> Vec<Point> {
    skeleton
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[0] > MIDPOINT)
        .map(|(x, y, _)| Point::new(x, y))
        .collect()
}

/// Order points into strokes by greedy nearest-neighbour traversal.
///
/// Every input point lands in exactly one stroke. A new stroke starts
/// whenever the next visited point is not 8-adjacent to the previous one.
pub fn build_strokes(points: &[Point]) -> Vec<Stroke> {
    let Some(mut traversal) = Traversal::new(points) else {
        return Vec::new();
    };

    let mut order = Vec::with_capacity(points.len());
    let mut breaks = Vec::new();
    order.push(traversal.current());

    while let Some(next) = traversal.step() {
        let prev = order[order.len() - 1];
        order.push(next);
        if !next.is_adjacent(prev) {
            breaks.push(order.len() - 1);
        }
    }
    breaks.push(order.len());

    let mut strokes = Vec::with_capacity(breaks.len());
    let mut start = 0;
    for end in breaks {
        strokes.push(Stroke(order[start..end].to_vec()));
        start = end;
    }
    strokes
}
