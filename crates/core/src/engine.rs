//! The `Engine` trait the periodic driver calls into.
//!
//! The trait is object-safe so a driver can hold a `dyn Engine` without
//! knowing which simulation it is animating.

use glam::DVec2;
use serde_json::Value;

/// Core trait for step-based simulations driven by an external timer.
pub trait Engine {
    /// Advance the simulation by one step if it is running.
    ///
    /// Returns the updated closed point list to draw, or `None` when there
    /// is nothing to draw yet.
    fn tick(&mut self) -> Option<Vec<DVec2>>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}
