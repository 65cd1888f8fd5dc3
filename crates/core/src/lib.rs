#![deny(unsafe_code)]
//! Core types and traits for the field-warp advection system.
//!
//! Provides the `FieldSource` trait and the eight analytic fields, the
//! `FieldCatalog` lookup table, the `Domain` viewport, the `CornerSet`/`Edge`/
//! `Boundary` data model, the background glyph grid, the `Engine` and
//! `Renderer` traits, and parameter helpers.

pub mod boundary;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod field_source;
pub mod geometry;
pub mod glyph;
pub mod params;
pub mod renderer;
pub mod scenario;

pub use boundary::{Boundary, CornerSet, Edge};
pub use catalog::{FieldCatalog, FieldEntry, FieldId, Selection};
pub use engine::Engine;
pub use error::WarpError;
pub use field_source::FieldSource;
pub use geometry::Domain;
pub use glam::DVec2;
pub use glyph::Glyph;
pub use renderer::{NullRenderer, Renderer};
pub use scenario::Scenario;
