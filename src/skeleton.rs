//! Topology-preserving thinning (Guo–Hall family).
//!
//! The mask is eroded in repeated passes, each made of an even and an odd
//! sub-iteration. A sub-iteration scans a committed snapshot of the grid,
//! marks every removable pixel, and only then clears the marked pixels in
//! one batch. Clearing mid-scan would make the result depend on scan order.
//!
//! The one-pixel image border is never eroded.

use image::{GrayImage, Luma};
use rayon::prelude::*;

use crate::bitmap::{BACKGROUND, FOREGROUND};

/// Counters reported by [`thin_with_stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThinningStats {
    /// Full passes that removed at least one pixel.
    pub passes: usize,
    /// Total pixels cleared.
    pub removed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubIteration {
    Even,
    Odd,
}

/// Thin a binary mask (non-zero = foreground) to a one-pixel-wide skeleton.
pub fn thin(mask: &GrayImage) -> GrayImage {
    thin_with_stats(mask).0
}

/// Like [`thin`], also reporting how much work the fixed point took.
pub fn thin_with_stats(mask: &GrayImage) -> (GrayImage, ThinningStats) {
    let mut grid = Grid::from_mask(mask);
    let mut stats = ThinningStats::default();

    loop {
        let removed = grid.sweep(SubIteration::Even) + grid.sweep(SubIteration::Odd);
        if removed == 0 {
            break;
        }
        stats.passes += 1;
        stats.removed += removed;
        tracing::debug!("thinning pass {} removed {} pixels", stats.passes, removed);
    }

    (grid.to_mask(), stats)
}

/// Working copy with cells 0 or 1, row-major.
struct Grid {
    cells: Vec<u8>,
    width: usize,
    height: usize,
}

impl Grid {
    fn from_mask(mask: &GrayImage) -> Self {
        let (w, h) = mask.dimensions();
        Grid {
            cells: mask.pixels().map(|p| u8::from(p.0[0] > 0)).collect(),
            width: w as usize,
            height: h as usize,
        }
    }

    fn to_mask(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let set = self.cells[y as usize * self.width + x as usize] == 1;
            Luma([if set { FOREGROUND } else { BACKGROUND }])
        })
    }

    fn at(&self, x: usize, y: usize) -> u8 {
        self.cells[y * self.width + x]
    }

    /// Neighbours p2..p9, clockwise from directly above.
    fn ring(&self, x: usize, y: usize) -> [u8; 8] {
        [
            self.at(x, y - 1),
            self.at(x + 1, y - 1),
            self.at(x + 1, y),
            self.at(x + 1, y + 1),
            self.at(x, y + 1),
            self.at(x - 1, y + 1),
            self.at(x - 1, y),
            self.at(x - 1, y - 1),
        ]
    }

    fn removable(&self, x: usize, y: usize, sub: SubIteration) -> bool {
        if self.at(x, y) == 0 {
            return false;
        }
        let ring = self.ring(x, y);
        let [p2, _, p4, _, p6, _, p8, _] = ring;

        let n: u8 = ring.iter().sum();
        if !(2..=6).contains(&n) {
            return false;
        }

        // 0 -> 1 transitions around p2, p3, ..., p9, p2
        let transitions = (0..8)
            .filter(|&i| ring[i] == 0 && ring[(i + 1) % 8] == 1)
            .count();
        if transitions != 1 {
            return false;
        }

        match sub {
            SubIteration::Even => p2 * p4 * p6 == 0 && p4 * p6 * p8 == 0,
            SubIteration::Odd => p2 * p4 * p8 == 0 && p2 * p6 * p8 == 0,
        }
    }

    /// Mark removable interior pixels against the current snapshot, then
    /// clear them all. Returns the number cleared.
    fn sweep(&mut self, sub: SubIteration) -> usize {
        let (w, h) = (self.width, self.height);
        if w < 3 || h < 3 {
            return 0;
        }

        let marked: Vec<usize> = {
            let grid: &Grid = self;
            (1..h - 1)
                .into_par_iter()
                .flat_map_iter(|y| {
                    (1..w - 1)
                        .filter(move |&x| grid.removable(x, y, sub))
                        .map(move |x| y * w + x)
                })
                .collect()
        };

        for &idx in &marked {
            self.cells[idx] = 0;
        }
        marked.len()
    }
}
