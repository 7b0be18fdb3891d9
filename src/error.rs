//! Errors raised by the opt-in layers (`zoom`, `config`).
//!
//! The core `ViewState` conversions and mutators never fail; out-of-domain
//! numbers pass through as whatever the projection computes.

/// Errors produced by level validation and configuration loading.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewError {
    /// A requested zoom level lies outside the projection's level range.
    #[error("zoom level {level} outside [{min}, {max}]")]
    LevelOutOfRange { level: f64, min: f64, max: f64 },

    /// A configuration variable is set but could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidConfig { var: String, value: String },

    /// Only one of the center latitude/longitude variables is set.
    #[error("center requires both {lat_var} and {lng_var}")]
    IncompleteCenter { lat_var: &'static str, lng_var: &'static str },
}
