//! A headless run description: which field, which rectangle, how many ticks.
//!
//! A [`Scenario`] is read from JSON and replays the press / drag / release
//! sequence a user would have performed, then drives the engine for
//! `ticks` frames. It is input only; nothing is ever written back.

use crate::catalog::{FieldCatalog, FieldId};
use crate::error::WarpError;
use crate::geometry::Domain;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Frame count of one animation run.
pub const DEFAULT_TICKS: usize = 200;

fn default_ticks() -> usize {
    DEFAULT_TICKS
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Catalog id of the field to advect along.
    pub field: u8,
    /// Pointer-press position.
    pub start: [f64; 2],
    /// Pointer-release position.
    pub end: [f64; 2],
    #[serde(default = "default_ticks")]
    pub ticks: usize,
    /// Advection parameter overrides (`dt`, `samples_per_edge`).
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
}

impl Scenario {
    /// Creates a scenario with default params and tick count.
    pub fn new(field: u8, start: [f64; 2], end: [f64; 2]) -> Self {
        Self {
            field,
            start,
            end,
            ticks: DEFAULT_TICKS,
            params: empty_params(),
        }
    }

    /// Reads a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self, WarpError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| WarpError::Io(format!("{}: {e}", path.display())))?;
        let scenario: Self = serde_json::from_str(&text)
            .map_err(|e| WarpError::InvalidParam(format!("{}: {e}", path.display())))?;
        log::debug!(
            "loaded scenario from {}: field {}, {} ticks",
            path.display(),
            scenario.field,
            scenario.ticks
        );
        Ok(scenario)
    }

    pub fn field_id(&self) -> FieldId {
        FieldId(self.field)
    }

    pub fn start_point(&self) -> DVec2 {
        DVec2::from_array(self.start)
    }

    pub fn end_point(&self) -> DVec2 {
        DVec2::from_array(self.end)
    }

    /// Checks the field id against `catalog` and both corners against `domain`.
    pub fn validate(&self, catalog: &FieldCatalog, domain: &Domain) -> Result<(), WarpError> {
        catalog.get(self.field_id())?;
        for p in [self.start_point(), self.end_point()] {
            if !domain.contains(p) {
                return Err(WarpError::PointerDomain { x: p.x, y: p.y });
            }
        }
        Ok(())
    }
}
