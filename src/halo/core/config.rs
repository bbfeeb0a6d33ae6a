//! Halo configuration — validated, immutable construction inputs.
//!
//! Purpose
//! -------
//! Represent everything a halo is defined by before any cosmology is
//! consulted: a size (mass or radius), a concentration, a redshift, and an
//! overdensity definition. [`HaloConfig::new`] is the single validation
//! point; once a config exists, every invariant below holds and downstream
//! code never re-checks them.
//!
//! Invariants & assumptions
//! ------------------------
//! - `size` is canonicalized at construction: solar masses for
//!   [`SizeType::Mass`], megaparsecs for [`SizeType::Radius`]; its value is
//!   finite and strictly positive.
//! - `concentration` is finite and > 0; `redshift` is finite and >= 0;
//!   `overdensity` is finite and > 0.
//!
//! Conventions
//! -----------
//! - The typed Rust API makes invalid `size_type` / `overdensity_type`
//!   unrepresentable; the historical stringly-typed surface lives in the
//!   `FromStr` impls, which fail with the matching configuration error.
use std::str::FromStr;

use crate::halo::core::validation::{
    validate_concentration, validate_overdensity_factor, validate_redshift, validate_size_value,
};
use crate::halo::errors::{HaloError, HaloResult};
use crate::units::{check_unit, Quantity, Unit, UnitInput};

/// How the halo's size input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeType {
    /// The size is a mass (canonical unit: solar masses).
    Mass,
    /// The size is a radius (canonical unit: megaparsecs).
    Radius,
}

impl SizeType {
    /// The historical string name of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeType::Mass => "mass",
            SizeType::Radius => "radius",
        }
    }

    /// The canonical unit a size of this type is stored in.
    pub fn canonical_unit(&self) -> Unit {
        match self {
            SizeType::Mass => Unit::SolarMass,
            SizeType::Radius => Unit::Megaparsec,
        }
    }
}

impl FromStr for SizeType {
    type Err = HaloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mass" => Ok(SizeType::Mass),
            "radius" => Ok(SizeType::Radius),
            other => Err(HaloError::InvalidSizeType {
                value: other.to_string(),
            }),
        }
    }
}

/// Which reference density the overdensity factor multiplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverdensityType {
    /// Relative to the critical density ρ_c(z).
    Critical,
    /// Relative to the mean matter density ρ_c(z)·Ω_m(z).
    Mean,
}

impl OverdensityType {
    /// The historical string name of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            OverdensityType::Critical => "critical",
            OverdensityType::Mean => "mean",
        }
    }
}

impl FromStr for OverdensityType {
    type Err = HaloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(OverdensityType::Critical),
            "mean" => Ok(OverdensityType::Mean),
            other => Err(HaloError::InvalidOverdensityType {
                value: other.to_string(),
            }),
        }
    }
}

/// Validated, immutable halo construction inputs.
///
/// Fields
/// ------
/// - `size`: canonicalized size quantity (M_sun or Mpc per `size_type`).
/// - `size_type`: how `size` is interpreted.
/// - `concentration`: NFW concentration `c = r_Δ / r_s`.
/// - `redshift`: halo redshift `z`.
/// - `overdensity`: the construction threshold `Δ₀`.
/// - `overdensity_type`: reference density for `Δ₀`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaloConfig {
    pub size: Quantity,
    pub size_type: SizeType,
    pub concentration: f64,
    pub redshift: f64,
    pub overdensity: f64,
    pub overdensity_type: OverdensityType,
}

impl HaloConfig {
    /// Construct a validated halo configuration.
    ///
    /// Parameters
    /// ----------
    /// - `size`: raw number (implied canonical unit of `size_type`) or a
    ///   tagged [`Quantity`] in any compatible unit.
    /// - `size_type`: whether `size` is a mass or a radius.
    /// - `concentration`: must be finite and > 0.
    /// - `redshift`: must be finite and >= 0.
    /// - `overdensity`: the threshold `Δ₀`; must be finite and > 0.
    /// - `overdensity_type`: reference density for `Δ₀`.
    ///
    /// Returns
    /// -------
    /// `HaloResult<HaloConfig>`
    ///   - `Ok(config)` with `size` converted to its canonical unit.
    ///   - `Err(HaloError)` if any scalar is inadmissible or the size's
    ///     dimension does not match `size_type`.
    ///
    /// Errors
    /// ------
    /// - `HaloError::InvalidConcentration`, `InvalidRedshift`,
    ///   `InvalidOverdensity`, `InvalidSize` for scalar violations.
    /// - `HaloError::UnitMismatch` when a tagged size has the wrong
    ///   dimension (e.g. a length for `SizeType::Mass`).
    pub fn new(
        size: impl Into<UnitInput>,
        size_type: SizeType,
        concentration: f64,
        redshift: f64,
        overdensity: f64,
        overdensity_type: OverdensityType,
    ) -> HaloResult<Self> {
        let concentration = validate_concentration(concentration)?;
        let redshift = validate_redshift(redshift)?;
        let overdensity = validate_overdensity_factor(overdensity)?;
        let size = check_unit(size.into(), size_type.canonical_unit())?;
        validate_size_value(size.value())?;
        Ok(Self {
            size,
            size_type,
            concentration,
            redshift,
            overdensity,
            overdensity_type,
        })
    }
}
