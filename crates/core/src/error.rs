//! Error types for the field-warp core.

use thiserror::Error;

/// Errors produced by field evaluation, pointer handling and configuration.
///
/// Only `InputSelection` is ever shown to a user. `PointerDomain` and
/// `FieldDomain` are returned so callers can tell them apart, then dropped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WarpError {
    /// A menu selection was non-numeric or outside the catalog.
    #[error("invalid selection: {0}")]
    InputSelection(String),

    /// A field id was requested that the catalog does not contain.
    #[error("unknown field id: {0}")]
    UnknownField(u8),

    /// A pointer event landed outside the plotting domain.
    #[error("pointer position ({x}, {y}) is outside the plotting domain")]
    PointerDomain { x: f64, y: f64 },

    /// The vector field is undefined at the sampled position.
    #[error("field undefined at ({x}, {y})")]
    FieldDomain { x: f64, y: f64 },

    /// Edges need at least two samples so both endpoints are present.
    #[error("invalid sample count {0}: each edge needs at least 2 samples")]
    InvalidSampleCount(usize),

    /// A configuration value was present but unusable.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// File or stream I/O failed.
    #[error("I/O error: {0}")]
    Io(String),
}
