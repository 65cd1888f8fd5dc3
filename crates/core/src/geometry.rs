//! The square plotting domain shared by pointer input and field evaluation.

use glam::DVec2;

/// Half-width of the standard viewport.
const STANDARD_EXTENT: f64 = 5.0;

/// Axis-aligned square domain `[min, max] × [min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    min: f64,
    max: f64,
}

impl Domain {
    /// The `[-5, 5] × [-5, 5]` viewport.
    pub fn standard() -> Self {
        Self {
            min: -STANDARD_EXTENT,
            max: STANDARD_EXTENT,
        }
    }

    /// Creates a domain spanning `[min, max]` on both axes.
    ///
    /// Returns `None` unless `min < max` and both are finite.
    pub fn new(min: f64, max: f64) -> Option<Self> {
        (min.is_finite() && max.is_finite() && min < max).then_some(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Inclusive containment test. Non-finite points are never contained.
    pub fn contains(&self, p: DVec2) -> bool {
        p.is_finite()
            && (self.min..=self.max).contains(&p.x)
            && (self.min..=self.max).contains(&p.y)
    }

    /// `n` evenly spaced coordinates from `min` to `max` inclusive.
    pub fn linspace(&self, n: usize) -> Vec<f64> {
        linspace(self.min, self.max, n)
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::standard()
    }
}

/// `n` evenly spaced values from `a` to `b`; the endpoints are exact.
///
/// `n == 1` yields `[a]`, `n == 0` yields an empty vector.
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![a],
        _ => {
            let last = n - 1;
            let step = (b - a) / last as f64;
            (0..n)
                .map(|i| if i == last { b } else { a + step * i as f64 })
                .collect()
        }
    }
}
