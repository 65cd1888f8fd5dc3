//! One headless animation: draw a rectangle, tick it, snapshot the result.

use crate::error::CliError;
use field_warp_advection::{run_ticks, AdvectionParams, WarpingRectangle};
use field_warp_core::glyph::{glyph_grid, DEFAULT_GLYPH_GRID};
use field_warp_core::{DVec2, Domain, FieldCatalog, FieldId, Renderer};
use field_warp_raster::snapshot::write_png;
use field_warp_raster::Raster;
use serde_json::{json, Value};
use std::path::PathBuf;

/// Everything needed to replay one drawing and animate it.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub field: FieldId,
    pub start: DVec2,
    pub end: DVec2,
    pub ticks: usize,
    pub params: AdvectionParams,
    /// Image edge length in pixels.
    pub size: usize,
    /// Keep every frame's outline in the snapshot.
    pub trail: bool,
    /// Where to write the PNG; `None` skips the snapshot.
    pub output: Option<PathBuf>,
}

/// Final state of a run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub field: FieldId,
    pub frames: usize,
    /// Samples left unmoved on the last tick.
    pub skipped: usize,
    pub centroid: DVec2,
    pub points: Vec<DVec2>,
    pub output: Option<PathBuf>,
}

impl RunOutcome {
    pub fn to_json(&self) -> Value {
        json!({
            "field": self.field.0,
            "frames": self.frames,
            "skipped": self.skipped,
            "centroid": self.centroid.to_array(),
            "points": self.points.iter().map(|p| p.to_array()).collect::<Vec<_>>(),
            "output": self.output.as_ref().map(|p| p.display().to_string()),
        })
    }
}

/// Replays press / drag / release from `config.start` to `config.end`, then
/// drives `config.ticks` ticks and optionally writes a PNG.
pub fn simulate(catalog: &FieldCatalog, config: &RunConfig) -> Result<RunOutcome, CliError> {
    let domain = Domain::standard();
    let entry = catalog.get(config.field)?;
    let mut engine = WarpingRectangle::new(entry.source.clone(), domain, config.params)?;
    let mut raster = Raster::new(domain, config.size, config.trail)?;

    raster.draw_glyphs(&glyph_grid(
        entry.source.as_ref(),
        &domain,
        DEFAULT_GLYPH_GRID,
    ));
    raster.present();

    engine.on_press(config.start)?;
    engine.on_motion(config.end, &mut raster)?;
    engine.on_release(config.end);

    let frames = run_ticks(&mut engine, &mut raster, config.ticks);
    log::info!(
        "field {} ({}): {} frames at dt={}",
        entry.id,
        entry.label,
        frames,
        config.params.dt
    );

    let boundary = engine
        .boundary()
        .ok_or_else(|| CliError::Input("no rectangle was drawn".into()))?;
    let outcome = RunOutcome {
        field: config.field,
        frames,
        skipped: engine.last_report().skipped,
        centroid: boundary.centroid(),
        points: boundary.flatten(),
        output: config.output.clone(),
    };

    if let Some(path) = &config.output {
        write_png(raster.pixmap(), path)?;
    }
    Ok(outcome)
}
