#![deny(unsafe_code)]
//! CPU raster renderer for field-warp, drawn with `tiny-skia`.
//!
//! [`Raster`] implements [`Renderer`]: the glyph grid is drawn once into a
//! background layer, and every boundary is filled and stroked on top of it.
//! [`Viewport`] maps domain coordinates to pixels.

#[cfg(feature = "png")]
pub mod snapshot;

pub use tiny_skia;

use field_warp_core::error::WarpError;
use field_warp_core::glyph::{max_magnitude, DEFAULT_GLYPH_GRID};
use field_warp_core::{DVec2, Domain, Glyph, Renderer};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Longest glyph as a fraction of one grid cell.
const GLYPH_CELL_FRACTION: f64 = 0.9;
/// Arrow head length as a fraction of the glyph length.
const ARROW_HEAD_FRACTION: f64 = 0.3;
/// Half-angle of the arrow head.
const ARROW_HEAD_ANGLE: f64 = 0.45;
/// Opacity of the boundary fill, out of 255.
const FILL_ALPHA: u8 = 128;
/// Stroke width of the boundary outline in pixels.
const BOUNDARY_STROKE: f32 = 2.0;
/// Stroke width of the glyph arrows in pixels.
const GLYPH_STROKE: f32 = 1.0;

/// Square mapping from a [`Domain`] to a `size × size` pixel grid, y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    domain: Domain,
    size: usize,
}

impl Viewport {
    /// Returns `WarpError::InvalidParam` for a size below 2 pixels.
    pub fn new(domain: Domain, size: usize) -> Result<Self, WarpError> {
        if size < 2 {
            return Err(WarpError::InvalidParam(format!(
                "image size must be at least 2 pixels, got {size}"
            )));
        }
        Ok(Self { domain, size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Pixel-space position of a domain point (may lie outside the image).
    pub fn to_pixel(&self, p: DVec2) -> (f64, f64) {
        let scale = (self.size - 1) as f64 / self.domain.span();
        (
            (p.x - self.domain.min()) * scale,
            (self.domain.max() - p.y) * scale,
        )
    }

    /// Domain length of one background grid cell.
    fn glyph_cell(&self) -> f64 {
        self.domain.span() / DEFAULT_GLYPH_GRID as f64
    }
}

/// Narrows a pixel-space point for the rasterizer; `None` once it has
/// diverged past `f32`.
fn narrow((x, y): (f64, f64)) -> Option<(f32, f32)> {
    let (x, y) = (x as f32, y as f32);
    (x.is_finite() && y.is_finite()).then_some((x, y))
}

fn solid(r: u8, g: u8, b: u8, a: u8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Snapshot renderer writing into `tiny-skia` pixmaps.
///
/// Drawing goes into a working frame; [`present`](Renderer::present)
/// commits it, and [`pixmap`](Raster::pixmap) always returns the last
/// committed frame.
#[derive(Debug, Clone)]
pub struct Raster {
    viewport: Viewport,
    background: Pixmap,
    frame: Pixmap,
    presented: Pixmap,
    trail: bool,
    frames: usize,
}

impl Raster {
    /// Creates a blank white `size × size` raster over `domain`.
    ///
    /// With `trail` set, every boundary stays visible; otherwise each new
    /// boundary replaces the previous one.
    pub fn new(domain: Domain, size: usize, trail: bool) -> Result<Self, WarpError> {
        let viewport = Viewport::new(domain, size)?;
        let overflow = || WarpError::InvalidParam(format!("image size {size} is too large"));
        let side = u32::try_from(size).map_err(|_| overflow())?;
        let mut background = Pixmap::new(side, side).ok_or_else(overflow)?;
        background.fill(Color::WHITE);
        Ok(Self {
            viewport,
            frame: background.clone(),
            presented: background.clone(),
            background,
            trail,
            frames: 0,
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The last presented image.
    pub fn pixmap(&self) -> &Pixmap {
        &self.presented
    }

    /// The frame being drawn, not yet presented.
    pub fn working_frame(&self) -> &Pixmap {
        &self.frame
    }

    /// Number of `present()` calls so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Appends one arrow (shaft plus two head strokes) to `pb`.
    fn push_glyph(&self, pb: &mut PathBuilder, glyph: &Glyph, scale: f64) {
        let tail = self.viewport.to_pixel(glyph.origin);
        let tip = self.viewport.to_pixel(glyph.origin + glyph.vector * scale);
        let (Some(t0), Some(t1)) = (narrow(tail), narrow(tip)) else {
            return;
        };
        pb.move_to(t0.0, t0.1);
        pb.line_to(t1.0, t1.1);

        let back = DVec2::new(tail.0 - tip.0, tail.1 - tip.1) * ARROW_HEAD_FRACTION;
        for angle in [ARROW_HEAD_ANGLE, -ARROW_HEAD_ANGLE] {
            let head = DVec2::from_angle(angle).rotate(back);
            if let Some(h) = narrow((tip.0 + head.x, tip.1 + head.y)) {
                pb.move_to(t1.0, t1.1);
                pb.line_to(h.0, h.1);
            }
        }
    }
}

impl Renderer for Raster {
    fn draw_glyphs(&mut self, glyphs: &[Glyph]) {
        self.background.fill(Color::WHITE);
        let max = max_magnitude(glyphs);
        if max > 0.0 {
            let scale = self.viewport.glyph_cell() * GLYPH_CELL_FRACTION / max;
            let mut pb = PathBuilder::new();
            for glyph in glyphs {
                self.push_glyph(&mut pb, glyph, scale);
            }
            if let Some(path) = pb.finish() {
                let stroke = Stroke {
                    width: GLYPH_STROKE,
                    ..Stroke::default()
                };
                self.background.stroke_path(
                    &path,
                    &solid(0, 0, 255, 255),
                    &stroke,
                    Transform::identity(),
                    None,
                );
            }
        }
        self.frame = self.background.clone();
        log::debug!("drew {} glyphs", glyphs.len());
    }

    fn draw_boundary(&mut self, points: &[DVec2]) {
        if !self.trail {
            self.frame = self.background.clone();
        }
        let mut finite = points
            .iter()
            .filter_map(|p| narrow(self.viewport.to_pixel(*p)));
        let Some(first) = finite.next() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(first.0, first.1);
        for (x, y) in finite {
            pb.line_to(x, y);
        }
        pb.close();
        let Some(path) = pb.finish() else {
            log::trace!("boundary of {} points has no drawable extent", points.len());
            return;
        };

        self.frame.fill_path(
            &path,
            &solid(255, 0, 0, FILL_ALPHA),
            FillRule::EvenOdd,
            Transform::identity(),
            None,
        );
        let stroke = Stroke {
            width: BOUNDARY_STROKE,
            ..Stroke::default()
        };
        self.frame.stroke_path(
            &path,
            &solid(255, 0, 0, 255),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn present(&mut self) {
        self.presented.data_mut().copy_from_slice(self.frame.data());
        self.frames += 1;
    }
}
