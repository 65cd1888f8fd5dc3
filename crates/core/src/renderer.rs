//! The drawing surface contract.
//!
//! The advection engine never draws directly: it hands read-only point
//! slices to a [`Renderer`] and asks it to present them.

use crate::glyph::Glyph;
use glam::DVec2;

/// A surface that can show the glyph grid and a closed boundary polygon.
pub trait Renderer {
    /// Draws the background vector-field grid. Called once per field.
    fn draw_glyphs(&mut self, glyphs: &[Glyph]);

    /// Draws `points` as a closed, filled and stroked polygon.
    fn draw_boundary(&mut self, points: &[DVec2]);

    /// Displays what has been drawn so far.
    fn present(&mut self);
}

/// Renderer that discards everything, for headless driving.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw_glyphs(&mut self, _glyphs: &[Glyph]) {}

    fn draw_boundary(&mut self, _points: &[DVec2]) {}

    fn present(&mut self) {}
}
