//! Forward Euler stepping of boundary samples.

use field_warp_core::error::WarpError;
use field_warp_core::{Boundary, DVec2, FieldSource};

/// Outcome counts of one [`step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Samples moved by `F(p) * dt`.
    pub advected: usize,
    /// Samples left in place because the field was undefined there.
    pub skipped: usize,
}

/// One explicit Euler step of a single point: `p + F(p) * dt`.
///
/// Returns `WarpError::FieldDomain` if the field is undefined at `p` or
/// produces a non-finite vector.
pub fn advect_point(field: &dyn FieldSource, p: DVec2, dt: f64) -> Result<DVec2, WarpError> {
    let v = field.sample_at(p)?;
    if !v.is_finite() {
        return Err(WarpError::FieldDomain { x: p.x, y: p.y });
    }
    Ok(p + v * dt)
}

/// Advances every sample of `boundary` by one Euler step, in place.
///
/// A sample where the field is undefined keeps its position for this step;
/// all other samples are still advanced. Sample counts never change.
pub fn step(boundary: &mut Boundary, field: &dyn FieldSource, dt: f64) -> StepReport {
    let mut report = StepReport::default();
    for p in boundary.points_mut() {
        match advect_point(field, *p, dt) {
            Ok(next) => {
                *p = next;
                report.advected += 1;
            }
            Err(_) => report.skipped += 1,
        }
    }
    if report.skipped > 0 {
        log::debug!(
            "skipped {} of {} samples at field singularities",
            report.skipped,
            report.advected + report.skipped
        );
    }
    report
}
