#![deny(unsafe_code)]
//! Boundary advection engine.
//!
//! A rectangle drawn with pointer input is discretized into four sampled
//! edges; every sample is then pushed along a vector field with one forward
//! Euler step per tick. There is no coupling between samples and no mesh
//! correction, so the outline may stretch, fold or self-intersect freely.
//!
//! [`WarpingRectangle`] owns the drawing state machine and the boundary;
//! [`step`] is the per-tick integration; [`run_ticks`] is a minimal
//! periodic driver for headless use.

mod drawing;
mod step;

pub use drawing::{SimulationState, WarpingRectangle};
pub use step::{advect_point, step, StepReport};

use field_warp_core::error::WarpError;
use field_warp_core::params::{param_f64, param_usize, require_at_least, require_positive};
use field_warp_core::{Engine, Renderer};
use serde_json::Value;

/// Default time step per tick, tuned for smooth animation rather than accuracy.
pub const DEFAULT_DT: f64 = 0.05;
/// Default number of samples on each of the four edges.
pub const DEFAULT_SAMPLES_PER_EDGE: usize = 10;

/// Tunable constants of the advection engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvectionParams {
    /// Euler time step applied on every tick.
    pub dt: f64,
    /// Samples per edge, endpoints included. At least 2.
    pub samples_per_edge: usize,
}

impl Default for AdvectionParams {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            samples_per_edge: DEFAULT_SAMPLES_PER_EDGE,
        }
    }
}

impl AdvectionParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// Returns `WarpError::InvalidParam` for a non-positive `dt` or fewer
    /// than two samples per edge.
    pub fn from_json(params: &Value) -> Result<Self, WarpError> {
        Self::from_json_unvalidated(params).validated()
    }

    /// Like [`from_json`](Self::from_json) but without validation, for
    /// callers that apply overrides first and call [`validated`](Self::validated)
    /// afterwards.
    pub fn from_json_unvalidated(params: &Value) -> Self {
        Self {
            dt: param_f64(params, "dt", DEFAULT_DT),
            samples_per_edge: param_usize(params, "samples_per_edge", DEFAULT_SAMPLES_PER_EDGE),
        }
    }

    /// Checks both constants and returns them unchanged if usable.
    pub fn validated(self) -> Result<Self, WarpError> {
        require_positive("dt", self.dt)?;
        require_at_least("samples_per_edge", self.samples_per_edge, 2)?;
        Ok(self)
    }
}

/// Calls `engine.tick()` `ticks` times, forwarding each frame to `renderer`.
///
/// Returns the number of frames that had something to draw.
pub fn run_ticks(engine: &mut dyn Engine, renderer: &mut dyn Renderer, ticks: usize) -> usize {
    let mut frames = 0;
    for _ in 0..ticks {
        if let Some(points) = engine.tick() {
            renderer.draw_boundary(&points);
            renderer.present();
            frames += 1;
        }
    }
    frames
}
