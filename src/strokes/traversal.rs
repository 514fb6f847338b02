//! Greedy nearest-neighbour walk over a point set.

use super::Point;

/// Explicit state of the greedy walk: which candidates remain and where
/// the pen currently is.
///
/// Each [`step`](Traversal::step) moves to the unvisited point with the
/// strictly smallest distance to the current one. Ties go to the point that
/// appears first in the input slice. The walk ends once every point has
/// been visited, so it takes exactly `points.len() - 1` steps.
#[derive(Debug, Clone)]
pub struct Traversal<'a> {
    points: &'a [Point],
    unvisited: Vec<bool>,
    remaining: usize,
    current: usize,
}

impl<'a> Traversal<'a> {
    /// Start at `points[0]`. `None` for an empty slice.
    pub fn new(points: &'a [Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut unvisited = vec![true; points.len()];
        unvisited[0] = false;
        Some(Traversal {
            points,
            unvisited,
            remaining: points.len() - 1,
            current: 0,
        })
    }

    /// Where the pen is now.
    pub fn current(&self) -> Point {
        self.points[self.current]
    }

    /// Points not yet visited.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Index of the next point the walk would visit.
    pub fn nearest(&self) -> Option<usize> {
        let here = self.current();
        let mut best: Option<(usize, u64)> = None;
        for (i, p) in self.points.iter().enumerate() {
            if !self.unvisited[i] {
                continue;
            }
            let d = here.distance_squared(*p);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Visit the nearest unvisited point and return it.
    pub fn step(&mut self) -> Option<Point> {
        let next = self.nearest()?;
        self.unvisited[next] = false;
        self.remaining -= 1;
        self.current = next;
        Some(self.points[next])
    }
}
