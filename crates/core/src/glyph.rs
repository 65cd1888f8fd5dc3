//! Background quiver grid: field vectors sampled on a regular lattice.

use crate::field_source::FieldSource;
use crate::geometry::Domain;
use glam::DVec2;

/// Samples per axis of the background grid.
pub const DEFAULT_GLYPH_GRID: usize = 20;

/// One arrow of the background grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub origin: DVec2,
    pub vector: DVec2,
}

/// Samples `field` on an `n × n` lattice spanning `domain`, row by row.
///
/// Lattice points where the field is undefined are left out.
pub fn glyph_grid(field: &dyn FieldSource, domain: &Domain, n: usize) -> Vec<Glyph> {
    let coords = domain.linspace(n);
    coords
        .iter()
        .flat_map(|&y| coords.iter().map(move |&x| DVec2::new(x, y)))
        .filter_map(|origin| {
            field
                .sample_at(origin)
                .ok()
                .filter(|v| v.is_finite())
                .map(|vector| Glyph { origin, vector })
        })
        .collect()
}

/// Largest glyph magnitude, or 0 for an empty grid.
pub fn max_magnitude(glyphs: &[Glyph]) -> f64 {
    glyphs
        .iter()
        .map(|g| g.vector.length())
        .fold(0.0, f64::max)
}
