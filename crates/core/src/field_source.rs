//! Field sources: the analytic 2D vector fields offered by the catalog.
//!
//! A [`FieldSource`] maps a position to a (u, v) vector. Every field here is
//! a unit struct with a closed-form mapping; none of them carry state.
//!
//! All implementations are deterministic: same inputs produce the same output.

use crate::error::WarpError;
use glam::DVec2;

/// A source of 2D vector values for boundary advection.
///
/// Returns the (u, v) vector at (x, y), or `WarpError::FieldDomain` where
/// the mapping is undefined. Implementations must be pure.
pub trait FieldSource: Send + Sync {
    /// Sample the field at position (x, y).
    fn sample(&self, x: f64, y: f64) -> Result<DVec2, WarpError>;

    /// Convenience wrapper over [`FieldSource::sample`] for a point.
    fn sample_at(&self, p: DVec2) -> Result<DVec2, WarpError> {
        self.sample(p.x, p.y)
    }
}

/// `<1, 0>`: uniform flow to the right.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

/// `<x, 0>`: horizontal stretch away from the y axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShearX;

/// `<x, 1>`: horizontal stretch plus constant upward drift.
#[derive(Debug, Clone, Copy, Default)]
pub struct StretchDrift;

/// `<x, y>`: radial source at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Radial;

/// `<-y, x>`: rigid counter-clockwise rotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rotation;

/// `<1, sin(x)>`: rightward flow with a sinusoidal vertical component.
#[derive(Debug, Clone, Copy, Default)]
pub struct SineWave;

/// `<-y/(x²+y²), x/(x²+y²)>`: point vortex, singular at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointVortex;

/// `<x, -y>`: saddle with a fixed point at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Saddle;

impl FieldSource for Uniform {
    fn sample(&self, _x: f64, _y: f64) -> Result<DVec2, WarpError> {
        Ok(DVec2::new(1.0, 0.0))
    }
}

impl FieldSource for ShearX {
    fn sample(&self, x: f64, _y: f64) -> Result<DVec2, WarpError> {
        Ok(DVec2::new(x, 0.0))
    }
}

impl FieldSource for StretchDrift {
    fn sample(&self, x: f64, _y: f64) -> Result<DVec2, WarpError> {
        Ok(DVec2::new(x, 1.0))
    }
}

impl FieldSource for Radial {
    fn sample(&self, x: f64, y: f64) -> Result<DVec2, WarpError> {
        Ok(DVec2::new(x, y))
    }
}

impl FieldSource for Rotation {
    fn sample(&self, x: f64, y: f64) -> Result<DVec2, WarpError> {
        Ok(DVec2::new(-y, x))
    }
}

impl FieldSource for SineWave {
    fn sample(&self, x: f64, _y: f64) -> Result<DVec2, WarpError> {
        Ok(DVec2::new(1.0, x.sin()))
    }
}

impl FieldSource for PointVortex {
    fn sample(&self, x: f64, y: f64) -> Result<DVec2, WarpError> {
        let denom = x * x + y * y;
        if denom == 0.0 {
            return Err(WarpError::FieldDomain { x, y });
        }
        Ok(DVec2::new(-y / denom, x / denom))
    }
}

impl FieldSource for Saddle {
    fn sample(&self, x: f64, y: f64) -> Result<DVec2, WarpError> {
        Ok(DVec2::new(x, -y))
    }
}
