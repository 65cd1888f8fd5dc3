//! Corner sets and discretized closed boundaries.
//!
//! A [`Boundary`] is four [`Edge`]s, edge `i` running from corner `i` to
//! corner `(i + 1) % 4`. Each edge holds its own copy of both endpoints, so
//! adjacent edges share a sample position and the flattened point list
//! starts and ends on the same corner.

use crate::error::WarpError;
use crate::geometry::linspace;
use glam::DVec2;

/// Number of corners and edges of a boundary.
pub const CORNERS: usize = 4;

/// The four ordered corners of a drawn rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerSet([DVec2; CORNERS]);

impl CornerSet {
    /// All four corners at `p` (the state right after a press).
    pub fn collapsed(p: DVec2) -> Self {
        Self([p; CORNERS])
    }

    /// Axis-aligned rectangle with opposite corners `start` and `end`.
    ///
    /// Order: `start`, `(end.x, start.y)`, `end`, `(start.x, end.y)`.
    pub fn spanning(start: DVec2, end: DVec2) -> Self {
        Self([
            start,
            DVec2::new(end.x, start.y),
            end,
            DVec2::new(start.x, end.y),
        ])
    }

    pub fn corners(&self) -> &[DVec2; CORNERS] {
        &self.0
    }

    /// Corner `i` and its successor, wrapping after the last.
    pub fn segment(&self, i: usize) -> (DVec2, DVec2) {
        (self.0[i % CORNERS], self.0[(i + 1) % CORNERS])
    }
}

/// One side of a boundary: `N >= 2` samples including both endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    points: Vec<DVec2>,
}

impl Edge {
    /// `n` evenly spaced samples on the segment `a → b`.
    ///
    /// Returns `WarpError::InvalidSampleCount` if `n < 2`.
    pub fn sampled(a: DVec2, b: DVec2, n: usize) -> Result<Self, WarpError> {
        if n < 2 {
            return Err(WarpError::InvalidSampleCount(n));
        }
        let xs = linspace(a.x, b.x, n);
        let ys = linspace(a.y, b.y, n);
        let points = xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| DVec2::new(x, y))
            .collect();
        Ok(Self { points })
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> DVec2 {
        self.points[0]
    }

    pub fn last(&self) -> DVec2 {
        self.points[self.points.len() - 1]
    }
}

/// Closed outline made of four sampled edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    edges: [Edge; CORNERS],
}

impl Boundary {
    /// Resamples every edge of `corners` with `n` points.
    ///
    /// Returns `WarpError::InvalidSampleCount` if `n < 2`.
    pub fn from_corners(corners: &CornerSet, n: usize) -> Result<Self, WarpError> {
        let edge = |i: usize| {
            let (a, b) = corners.segment(i);
            Edge::sampled(a, b, n)
        };
        Ok(Self {
            edges: [edge(0)?, edge(1)?, edge(2)?, edge(3)?],
        })
    }

    pub fn edges(&self) -> &[Edge; CORNERS] {
        &self.edges
    }

    /// Samples per edge; fixed for the lifetime of the boundary.
    pub fn samples_per_edge(&self) -> usize {
        self.edges[0].len()
    }

    /// Total sample count across all edges (`4 * N`).
    pub fn len(&self) -> usize {
        self.edges.iter().map(Edge::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every sample, edge by edge.
    pub fn points(&self) -> impl Iterator<Item = &DVec2> {
        self.edges.iter().flat_map(|e| e.points.iter())
    }

    /// Mutable access to every sample. Positions may change, counts may not.
    pub fn points_mut(&mut self) -> impl Iterator<Item = &mut DVec2> {
        self.edges.iter_mut().flat_map(|e| e.points.iter_mut())
    }

    /// Concatenation of all edges in order: a closed loop whose first and
    /// last points are the same corner.
    pub fn flatten(&self) -> Vec<DVec2> {
        self.points().copied().collect()
    }

    /// True when each edge ends where the next one begins.
    pub fn is_closed(&self) -> bool {
        (0..CORNERS).all(|i| self.edges[i].last() == self.edges[(i + 1) % CORNERS].first())
    }

    /// Mean of the distinct samples (the last sample of each edge repeats
    /// the next edge's first and is excluded).
    pub fn centroid(&self) -> DVec2 {
        let (sum, count) = self
            .edges
            .iter()
            .flat_map(|e| e.points[..e.points.len() - 1].iter())
            .fold((DVec2::ZERO, 0usize), |(s, c), p| (s + *p, c + 1));
        if count == 0 {
            DVec2::ZERO
        } else {
            sum / count as f64
        }
    }
}
