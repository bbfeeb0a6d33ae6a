//! Errors for halo configuration, derived-geometry recomputation, and
//! inversion queries.
//!
//! This module defines the unified halo error type, [`HaloError`], used
//! across the Rust core and the Python-facing API. Configuration problems
//! are checked once at construction and never recur; unit mismatches come
//! from the tagged-quantity layer; convergence failures come from the
//! bracketed root solver and are recoverable by the caller with a different
//! threshold or bracket.
//!
//! ## Conventions
//! - Numeric edge effects inside the profile formulas (`r = 0`, values
//!   straddling `r = r_s`) are **not** errors: they follow the documented
//!   limiting-value policy of [`crate::halo::profile`] or propagate as
//!   non-finite numbers, matching the source formulas.
use crate::cosmology::errors::CosmologyError;
use crate::rootfind::errors::RootError;
use crate::units::errors::UnitError;
use crate::units::quantity::Unit;

#[cfg(feature = "python-bindings")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python-bindings")]
use pyo3::PyErr;

/// Crate-wide result alias for halo operations that may produce
/// [`HaloError`].
pub type HaloResult<T> = Result<T, HaloError>;

/// Unified error type for the halo engine.
#[derive(Debug, Clone, PartialEq)]
pub enum HaloError {
    // ---- Configuration ----
    /// `size_type` must be one of `mass`, `radius`.
    InvalidSizeType { value: String },

    /// `overdensity_type` must be one of `critical`, `mean`.
    InvalidOverdensityType { value: String },

    /// Concentration must be finite and strictly positive.
    InvalidConcentration { value: f64, reason: &'static str },

    /// Redshift must be finite and non-negative.
    InvalidRedshift { value: f64, reason: &'static str },

    /// The overdensity factor must be finite and strictly positive.
    InvalidOverdensity { value: f64, reason: &'static str },

    /// The halo size (mass or radius) must be finite and strictly positive.
    InvalidSize { value: f64, reason: &'static str },

    // ---- Units ----
    /// An input's physical dimension is incompatible with the expected one.
    UnitMismatch { expected: Unit, found: Unit },

    // ---- Cosmology ----
    /// An injected cosmology model failed its own validation.
    InvalidCosmology { text: String },

    /// The cosmology returned a non-finite or non-positive critical density.
    InvalidCriticalDensity { redshift: f64, value: f64 },

    // ---- Root finding ----
    /// A mass↔radius inversion failed to bracket or converge.
    ConvergenceFailed { status: String },
}

impl std::error::Error for HaloError {}

impl std::fmt::Display for HaloError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            HaloError::InvalidSizeType { value } => {
                write!(f, "size_type must be one of 'mass', 'radius'; got '{value}'.")
            }
            HaloError::InvalidOverdensityType { value } => {
                write!(f, "overdensity_type must be one of 'critical', 'mean'; got '{value}'.")
            }
            HaloError::InvalidConcentration { value, reason } => {
                write!(f, "Concentration must be finite and > 0; got {value}. {reason}")
            }
            HaloError::InvalidRedshift { value, reason } => {
                write!(f, "Redshift must be finite and >= 0; got {value}. {reason}")
            }
            HaloError::InvalidOverdensity { value, reason } => {
                write!(f, "Overdensity factor must be finite and > 0; got {value}. {reason}")
            }
            HaloError::InvalidSize { value, reason } => {
                write!(f, "Halo size must be finite and > 0; got {value}. {reason}")
            }
            // ---- Units ----
            HaloError::UnitMismatch { expected, found } => {
                write!(f, "Expected a quantity convertible to {expected}; got {found}.")
            }
            // ---- Cosmology ----
            HaloError::InvalidCosmology { text } => {
                write!(f, "Invalid cosmology model: {text}")
            }
            HaloError::InvalidCriticalDensity { redshift, value } => {
                write!(
                    f,
                    "Cosmology returned an unusable critical density at z = {redshift}: {value}"
                )
            }
            // ---- Root finding ----
            HaloError::ConvergenceFailed { status } => {
                write!(f, "Mass-radius inversion failed: {status}")
            }
        }
    }
}

impl From<UnitError> for HaloError {
    fn from(err: UnitError) -> HaloError {
        match err {
            UnitError::DimensionMismatch { expected, found } => {
                HaloError::UnitMismatch { expected, found }
            }
        }
    }
}

impl From<CosmologyError> for HaloError {
    fn from(err: CosmologyError) -> HaloError {
        HaloError::InvalidCosmology {
            text: err.to_string(),
        }
    }
}

impl From<RootError> for HaloError {
    fn from(err: RootError) -> HaloError {
        HaloError::ConvergenceFailed {
            status: err.to_string(),
        }
    }
}

/// Convert a [`HaloError`] into a Python `ValueError` with the error message.
///
/// This is used at the Rust↔Python boundary to surface domain errors
/// cleanly.
#[cfg(feature = "python-bindings")]
impl From<HaloError> for PyErr {
    fn from(err: HaloError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
