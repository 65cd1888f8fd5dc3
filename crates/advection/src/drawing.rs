//! The drawing and advection state object.

use crate::step::{step, StepReport};
use crate::AdvectionParams;
use field_warp_core::error::WarpError;
use field_warp_core::{Boundary, CornerSet, DVec2, Domain, Engine, FieldSource, Renderer};
use serde_json::{json, Value};
use std::sync::Arc;

/// Where the rectangle is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationState {
    /// Nothing drawn yet.
    #[default]
    Idle,
    /// Pointer is down; corners follow the pointer.
    Drawing,
    /// Pointer released; the boundary advances on every tick.
    Running,
}

/// A user-drawn rectangle that deforms along a vector field.
///
/// Pointer events build the rectangle (`on_press` → `on_motion`* →
/// `on_release`); from then on every [`tick`](Engine::tick) advances its
/// boundary by one Euler step. A new press discards the old boundary and
/// starts over.
pub struct WarpingRectangle {
    field: Arc<dyn FieldSource>,
    domain: Domain,
    params: AdvectionParams,
    state: SimulationState,
    start: Option<DVec2>,
    corners: Option<CornerSet>,
    boundary: Option<Boundary>,
    ticks: usize,
    last_report: StepReport,
}

impl WarpingRectangle {
    /// Creates an idle engine advecting along `field` inside `domain`.
    ///
    /// Returns `WarpError::InvalidParam` if `params` are unusable.
    pub fn new(
        field: Arc<dyn FieldSource>,
        domain: Domain,
        params: AdvectionParams,
    ) -> Result<Self, WarpError> {
        Ok(Self {
            field,
            domain,
            params: params.validated()?,
            state: SimulationState::Idle,
            start: None,
            corners: None,
            boundary: None,
            ticks: 0,
            last_report: StepReport::default(),
        })
    }

    /// Creates an engine on the standard domain from a JSON params object.
    pub fn from_json(field: Arc<dyn FieldSource>, json_params: &Value) -> Result<Self, WarpError> {
        Self::new(
            field,
            Domain::standard(),
            AdvectionParams::from_json(json_params)?,
        )
    }

    /// Starts (or restarts) a rectangle at `p`.
    ///
    /// Returns `WarpError::PointerDomain` without touching any state if `p`
    /// is outside the domain.
    pub fn on_press(&mut self, p: DVec2) -> Result<(), WarpError> {
        self.check_domain(p)?;
        let corners = CornerSet::collapsed(p);
        self.boundary = Some(Boundary::from_corners(
            &corners,
            self.params.samples_per_edge,
        )?);
        self.corners = Some(corners);
        self.start = Some(p);
        self.ticks = 0;
        self.last_report = StepReport::default();
        if self.state != SimulationState::Drawing {
            log::debug!("{:?} -> Drawing at {p}", self.state);
        }
        self.state = SimulationState::Drawing;
        Ok(())
    }

    /// Stretches the rectangle so `p` is the corner opposite the press,
    /// resamples every edge and redraws immediately.
    ///
    /// Does nothing unless a drag is in progress. Returns
    /// `WarpError::PointerDomain` (and keeps the previous rectangle) if `p`
    /// is outside the domain.
    pub fn on_motion(&mut self, p: DVec2, renderer: &mut dyn Renderer) -> Result<(), WarpError> {
        if self.state != SimulationState::Drawing {
            return Ok(());
        }
        let Some(start) = self.start else {
            return Ok(());
        };
        self.check_domain(p)?;
        let corners = CornerSet::spanning(start, p);
        let boundary = Boundary::from_corners(&corners, self.params.samples_per_edge)?;
        renderer.draw_boundary(&boundary.flatten());
        renderer.present();
        self.corners = Some(corners);
        self.boundary = Some(boundary);
        Ok(())
    }

    /// Ends the drag. The last rectangle becomes the advected boundary.
    ///
    /// The release position is not inspected, so releasing off-canvas still
    /// ends the drag.
    pub fn on_release(&mut self, _p: DVec2) {
        if self.state == SimulationState::Drawing {
            log::debug!(
                "Drawing -> Running with {} samples",
                self.boundary.as_ref().map_or(0, Boundary::len)
            );
            self.state = SimulationState::Running;
        }
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Corners of the rectangle as last drawn. Not updated by advection.
    pub fn corners(&self) -> Option<&CornerSet> {
        self.corners.as_ref()
    }

    pub fn boundary(&self) -> Option<&Boundary> {
        self.boundary.as_ref()
    }

    /// Ticks advanced since the last press.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Counts from the most recent step.
    pub fn last_report(&self) -> StepReport {
        self.last_report
    }

    pub fn advection_params(&self) -> AdvectionParams {
        self.params
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    fn check_domain(&self, p: DVec2) -> Result<(), WarpError> {
        if self.domain.contains(p) {
            Ok(())
        } else {
            log::trace!("ignoring pointer event at {p}");
            Err(WarpError::PointerDomain { x: p.x, y: p.y })
        }
    }
}

impl Engine for WarpingRectangle {
    fn tick(&mut self) -> Option<Vec<DVec2>> {
        if self.state != SimulationState::Running {
            return None;
        }
        let boundary = self.boundary.as_mut()?;
        self.last_report = step(boundary, self.field.as_ref(), self.params.dt);
        self.ticks += 1;
        log::trace!(
            "tick {}: advected {}, skipped {}",
            self.ticks,
            self.last_report.advected,
            self.last_report.skipped
        );
        Some(boundary.flatten())
    }

    fn params(&self) -> Value {
        json!({
            "dt": self.params.dt,
            "samples_per_edge": self.params.samples_per_edge,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "dt": {
                "type": "number",
                "min": 0.0,
                "exclusive_min": true,
                "default": crate::DEFAULT_DT,
                "description": "Euler time step applied on every tick"
            },
            "samples_per_edge": {
                "type": "integer",
                "min": 2,
                "default": crate::DEFAULT_SAMPLES_PER_EDGE,
                "description": "Samples on each rectangle edge, endpoints included"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_warp_core::field_source::{PointVortex, Saddle, StretchDrift, Uniform};
    use field_warp_core::{FieldCatalog, FieldId, Glyph, NullRenderer};

    const DT: f64 = 0.05;

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<Vec<DVec2>>,
        presents: usize,
    }

    impl Renderer for RecordingRenderer {
        fn draw_glyphs(&mut self, _glyphs: &[Glyph]) {}

        fn draw_boundary(&mut self, points: &[DVec2]) {
            self.frames.push(points.to_vec());
        }

        fn present(&mut self) {
            self.presents += 1;
        }
    }

    /// Helper: idle engine on the standard domain with default params.
    fn engine(field: impl FieldSource + 'static) -> WarpingRectangle {
        WarpingRectangle::new(
            Arc::new(field),
            Domain::standard(),
            AdvectionParams::default(),
        )
        .unwrap()
    }

    /// Helper: press at `a`, drag to `b`, release at `b`.
    fn draw(e: &mut WarpingRectangle, a: (f64, f64), b: (f64, f64)) {
        let a = DVec2::new(a.0, a.1);
        let b = DVec2::new(b.0, b.1);
        e.on_press(a).unwrap();
        e.on_motion(b, &mut NullRenderer).unwrap();
        e.on_release(b);
    }

    // ---- Construction ----

    #[test]
    fn new_engine_is_idle_without_geometry() {
        let e = engine(Uniform);
        assert_eq!(e.state(), SimulationState::Idle);
        assert!(e.corners().is_none());
        assert!(e.boundary().is_none());
        assert_eq!(e.ticks(), 0);
    }

    #[test]
    fn new_rejects_invalid_params() {
        let params = AdvectionParams {
            dt: 0.05,
            samples_per_edge: 1,
        };
        assert!(WarpingRectangle::new(Arc::new(Uniform), Domain::standard(), params).is_err());
    }

    #[test]
    fn from_json_applies_overrides() {
        let e = WarpingRectangle::from_json(Arc::new(Uniform), &json!({"samples_per_edge": 5}))
            .unwrap();
        assert_eq!(e.advection_params().samples_per_edge, 5);
        assert_eq!(e.params()["samples_per_edge"], 5);
        assert!(e.param_schema().get("dt").is_some());
    }

    // ---- Pointer handling ----

    #[test]
    fn press_builds_degenerate_boundary() {
        let mut e = engine(Uniform);
        let p = DVec2::new(1.0, 2.0);
        e.on_press(p).unwrap();
        assert_eq!(e.state(), SimulationState::Drawing);
        assert_eq!(e.corners(), Some(&CornerSet::collapsed(p)));
        let b = e.boundary().unwrap();
        assert_eq!(b.len(), 40);
        assert!(b.points().all(|q| *q == p));
    }

    #[test]
    fn press_outside_domain_is_rejected_without_state_change() {
        let mut e = engine(Uniform);
        let err = e.on_press(DVec2::new(6.0, 0.0)).unwrap_err();
        assert_eq!(err, WarpError::PointerDomain { x: 6.0, y: 0.0 });
        assert_eq!(e.state(), SimulationState::Idle);
        assert!(e.boundary().is_none());
    }

    #[test]
    fn motion_redraws_rectangle_immediately() {
        let mut e = engine(Uniform);
        let mut r = RecordingRenderer::default();
        e.on_press(DVec2::new(-1.0, -1.0)).unwrap();
        e.on_motion(DVec2::new(0.0, 0.5), &mut r).unwrap();
        e.on_motion(DVec2::new(1.0, 1.0), &mut r).unwrap();
        assert_eq!(r.frames.len(), 2);
        assert_eq!(r.presents, 2);
        assert_eq!(r.frames[1], e.boundary().unwrap().flatten());
        assert_eq!(
            e.corners().unwrap().corners(),
            &[
                DVec2::new(-1.0, -1.0),
                DVec2::new(1.0, -1.0),
                DVec2::new(1.0, 1.0),
                DVec2::new(-1.0, 1.0),
            ]
        );
    }

    #[test]
    fn motion_while_idle_is_noop() {
        let mut e = engine(Uniform);
        let mut r = RecordingRenderer::default();
        e.on_motion(DVec2::new(1.0, 1.0), &mut r).unwrap();
        assert!(r.frames.is_empty());
        assert!(e.boundary().is_none());
    }

    #[test]
    fn motion_outside_domain_keeps_previous_rectangle() {
        let mut e = engine(Uniform);
        let mut r = RecordingRenderer::default();
        e.on_press(DVec2::new(0.0, 0.0)).unwrap();
        e.on_motion(DVec2::new(2.0, 2.0), &mut r).unwrap();
        let before = e.boundary().cloned();
        let err = e.on_motion(DVec2::new(2.0, 9.0), &mut r).unwrap_err();
        assert!(matches!(err, WarpError::PointerDomain { .. }));
        assert_eq!(e.boundary().cloned(), before);
        assert_eq!(r.frames.len(), 1);
        assert_eq!(e.state(), SimulationState::Drawing);
    }

    #[test]
    fn motion_after_release_does_not_reshape() {
        let mut e = engine(Uniform);
        draw(&mut e, (0.0, 0.0), (1.0, 1.0));
        let before = e.boundary().cloned();
        e.on_motion(DVec2::new(3.0, 3.0), &mut NullRenderer)
            .unwrap();
        assert_eq!(e.boundary().cloned(), before);
    }

    #[test]
    fn release_starts_running_without_changing_geometry() {
        let mut e = engine(Uniform);
        e.on_press(DVec2::new(0.0, 0.0)).unwrap();
        e.on_motion(DVec2::new(1.0, 1.0), &mut NullRenderer)
            .unwrap();
        let before = e.boundary().cloned();
        e.on_release(DVec2::new(4.0, 4.0));
        assert_eq!(e.state(), SimulationState::Running);
        assert_eq!(e.boundary().cloned(), before);
    }

    #[test]
    fn release_off_canvas_still_ends_drag() {
        let mut e = engine(Uniform);
        e.on_press(DVec2::new(0.0, 0.0)).unwrap();
        e.on_release(DVec2::new(f64::NAN, 99.0));
        assert_eq!(e.state(), SimulationState::Running);
    }

    #[test]
    fn release_while_idle_is_noop() {
        let mut e = engine(Uniform);
        e.on_release(DVec2::ZERO);
        assert_eq!(e.state(), SimulationState::Idle);
    }

    #[test]
    fn repress_discards_previous_boundary() {
        let mut e = engine(Uniform);
        draw(&mut e, (-1.0, -1.0), (1.0, 1.0));
        e.tick().unwrap();
        let p = DVec2::new(3.0, 3.0);
        e.on_press(p).unwrap();
        assert_eq!(e.state(), SimulationState::Drawing);
        assert_eq!(e.ticks(), 0);
        assert!(e.boundary().unwrap().points().all(|q| *q == p));
    }

    #[test]
    fn repress_while_dragging_restarts_rectangle() {
        let mut e = engine(Uniform);
        e.on_press(DVec2::new(-2.0, -2.0)).unwrap();
        e.on_motion(DVec2::new(2.0, 2.0), &mut NullRenderer)
            .unwrap();
        e.on_press(DVec2::new(1.0, 1.0)).unwrap();
        e.on_motion(DVec2::new(2.0, 3.0), &mut NullRenderer)
            .unwrap();
        assert_eq!(e.corners().unwrap().corners()[0], DVec2::new(1.0, 1.0));
    }

    // ---- Ticking ----

    #[test]
    fn tick_without_boundary_returns_nothing() {
        let mut e = engine(Uniform);
        assert!(e.tick().is_none());
        assert!(e.tick().is_none());
        assert_eq!(e.ticks(), 0);
    }

    #[test]
    fn tick_while_drawing_returns_nothing() {
        let mut e = engine(Uniform);
        e.on_press(DVec2::ZERO).unwrap();
        e.on_motion(DVec2::ONE, &mut NullRenderer).unwrap();
        let before = e.boundary().cloned();
        assert!(e.tick().is_none());
        assert_eq!(e.boundary().cloned(), before);
    }

    #[test]
    fn tick_returns_closed_forty_point_loop() {
        let mut e = engine(Uniform);
        draw(&mut e, (-1.0, -1.0), (1.0, 1.0));
        let pts = e.tick().unwrap();
        assert_eq!(pts.len(), 40);
        assert_eq!(pts.first(), pts.last());
        assert_eq!(e.ticks(), 1);
    }

    #[test]
    fn press_and_release_without_motion_advects_single_point() {
        let mut e = engine(Uniform);
        e.on_press(DVec2::ZERO).unwrap();
        e.on_release(DVec2::ZERO);
        let pts = e.tick().unwrap();
        assert!(pts.iter().all(|p| *p == DVec2::new(0.05, 0.0)));
    }

    #[test]
    fn uniform_field_translates_rectangle() {
        let mut e = engine(Uniform);
        draw(&mut e, (-1.0, -1.0), (1.0, 1.0));
        let start = e.boundary().unwrap().flatten();
        for _ in 0..10 {
            e.tick();
        }
        for (a, b) in start.iter().zip(e.boundary().unwrap().points()) {
            assert!((b.x - (a.x + 0.5)).abs() < 1e-12);
            assert_eq!(b.y, a.y);
        }
    }

    #[test]
    fn saddle_keeps_origin_sample_fixed() {
        let mut e = engine(Saddle);
        draw(&mut e, (0.0, 0.0), (1.0, 1.0));
        for _ in 0..25 {
            e.tick();
        }
        assert_eq!(e.boundary().unwrap().edges()[0].first(), DVec2::ZERO);
    }

    #[test]
    fn vortex_singularity_does_not_stop_ticking() {
        let mut e = engine(PointVortex);
        draw(&mut e, (0.0, 0.0), (1.0, 1.0));
        for _ in 0..5 {
            let pts = e.tick().unwrap();
            assert_eq!(pts.len(), 40);
            assert_eq!(pts[0], DVec2::ZERO);
            assert_eq!(e.last_report().skipped, 2);
            assert_eq!(e.last_report().advected, 38);
        }
    }

    #[test]
    fn stretch_drift_end_to_end_twenty_ticks() {
        let catalog = FieldCatalog::standard();
        let field = catalog.get(FieldId(3)).unwrap().source.clone();
        let mut e =
            WarpingRectangle::new(field, Domain::standard(), AdvectionParams::default()).unwrap();
        draw(&mut e, (0.0, 0.0), (1.0, 1.0));
        let start = e.boundary().unwrap().flatten();

        let ticks = 20;
        for _ in 0..ticks {
            e.tick().unwrap();
        }

        let euler_factor = (1.0 + DT).powi(ticks);
        let exact_factor = (DT * ticks as f64).exp();
        for (a, b) in start.iter().zip(e.boundary().unwrap().points()) {
            // y' = 1: twenty steps of 0.05 add exactly one unit (up to rounding).
            assert!((b.y - (a.y + 1.0)).abs() < 1e-12, "y {} -> {}", a.y, b.y);
            // x' = x: Euler gives x * 1.05^20, within 3% of x * e.
            assert!((b.x - a.x * euler_factor).abs() < 1e-12, "x {} -> {}", a.x, b.x);
            assert!(
                (b.x - a.x * exact_factor).abs() <= 0.03 * (a.x * exact_factor).abs() + 1e-12,
                "x {} -> {} too far from {}",
                a.x,
                b.x,
                a.x * exact_factor
            );
        }
    }

    #[test]
    fn stretch_drift_first_tick_moves_start_corner() {
        let mut a = engine(StretchDrift);
        draw(&mut a, (0.25, 0.25), (0.75, 0.5));
        assert_eq!(a.tick().unwrap()[0], DVec2::new(0.25 + 0.25 * DT, 0.25 + DT));
    }

    #[test]
    fn engine_is_usable_as_trait_object() {
        let mut e = engine(Uniform);
        draw(&mut e, (0.0, 0.0), (1.0, 1.0));
        let boxed: &mut dyn Engine = &mut e;
        assert!(boxed.tick().is_some());
        assert_eq!(boxed.params()["dt"], 0.05);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn coord() -> impl Strategy<Value = f64> {
            -5.0_f64..=5.0
        }

        fn outside() -> impl Strategy<Value = f64> {
            prop_oneof![-100.0_f64..-5.001, 5.001_f64..100.0]
        }

        proptest! {
            #[test]
            fn drawn_boundary_is_always_closed(
                sx in coord(), sy in coord(),
                ex in coord(), ey in coord(),
            ) {
                let mut e = engine(Uniform);
                draw(&mut e, (sx, sy), (ex, ey));
                let b = e.boundary().unwrap();
                prop_assert!(b.is_closed());
                prop_assert_eq!(b.len(), 40);
                let pts = e.tick().unwrap();
                prop_assert_eq!(pts.first(), pts.last());
            }

            #[test]
            fn out_of_domain_motion_never_changes_boundary(
                sx in coord(), sy in coord(),
                ox in outside(), oy in coord(),
            ) {
                let mut e = engine(Uniform);
                e.on_press(DVec2::new(sx, sy)).unwrap();
                let before = e.boundary().cloned();
                let result = e.on_motion(DVec2::new(ox, oy), &mut NullRenderer);
                let is_pointer_domain = matches!(result, Err(WarpError::PointerDomain { .. }));
                prop_assert!(is_pointer_domain);
                prop_assert_eq!(e.boundary().cloned(), before);
            }
        }
    }
}
