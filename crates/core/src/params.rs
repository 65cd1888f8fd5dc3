//! Helpers for reading typed parameters out of a `serde_json::Value` object.
//!
//! The `param_*` readers fall back to a default when the key is missing or
//! has the wrong JSON type. The `require_*` checks turn a value that parsed
//! but makes no sense into `WarpError::InvalidParam`.

use crate::error::WarpError;
use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Integers are accepted and converted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only non-negative integers are accepted.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Rejects values that are not finite and strictly positive.
pub fn require_positive(name: &str, value: f64) -> Result<f64, WarpError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WarpError::InvalidParam(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

/// Rejects counts below `min`.
pub fn require_at_least(name: &str, value: usize, min: usize) -> Result<usize, WarpError> {
    if value >= min {
        Ok(value)
    } else {
        Err(WarpError::InvalidParam(format!(
            "{name} must be at least {min}, got {value}"
        )))
    }
}
