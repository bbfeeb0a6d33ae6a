//! Derived halo geometry and its cosmology-aware cache.
//!
//! Purpose
//! -------
//! Hold the cosmology-dependent quantities of one halo — critical density,
//! overdensity radius, scale radius — and the machinery that recomputes them
//! when the tracked cosmology changes. Staleness is never partial: any
//! version mismatch recomputes all three in dependency order
//! `ρ_c → r_Δ → r_s`.
//!
//! Key behaviors
//! -------------
//! - [`compute_geometry`] derives a fresh [`DerivedGeometry`] from a
//!   validated config and a cosmology: the critical density is
//!   canonicalized to solar masses per cubic megaparsec, the overdensity
//!   radius comes from the closed cube-root form (mass input) or directly
//!   (radius input), and the scale radius is `r_Δ / c`.
//! - [`CosmologyBinding`] records whether the halo's cosmology is fixed at
//!   construction or tracks the process-wide default.
//! - [`GeometryCache`] pairs a geometry with the default-registry version it
//!   was computed under; the halo entity compares tokens on every access.
//!
//! Invariants & assumptions
//! ------------------------
//! - `r_s * c == r_Δ` holds for every geometry this module produces.
//! - A `Fixed` binding's geometry is immutable after construction; only
//!   `Tracking` bindings ever observe a version mismatch.
use std::f64::consts::PI;
use std::sync::Arc;

use crate::cosmology::model::Cosmology;
use crate::halo::core::config::{HaloConfig, OverdensityType, SizeType};
use crate::halo::errors::{HaloError, HaloResult};
use crate::units::Unit;

/// Cosmology-dependent quantities of one halo, in canonical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedGeometry {
    /// Critical density at the halo redshift, M_sun/Mpc^3.
    pub rho_c: f64,
    /// Radius enclosing the construction overdensity, Mpc.
    pub r_delta: f64,
    /// NFW scale radius `r_Δ / c`, Mpc.
    pub r_s: f64,
}

/// How a halo's cosmology was bound at construction.
#[derive(Clone)]
pub enum CosmologyBinding {
    /// An explicitly injected model; derived geometry never changes.
    Fixed(Arc<dyn Cosmology>),
    /// Track the process-wide default; derived geometry is recomputed
    /// lazily whenever the default's version differs from the cached token.
    Tracking,
}

impl std::fmt::Debug for CosmologyBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CosmologyBinding::Fixed(_) => f.write_str("Fixed(..)"),
            CosmologyBinding::Tracking => f.write_str("Tracking"),
        }
    }
}

/// A geometry together with the default-registry version it was computed
/// under. For `Fixed` bindings the token is irrelevant and never consulted.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GeometryCache {
    pub geometry: DerivedGeometry,
    pub version: u64,
}

/// The density the overdensity factor multiplies.
pub(crate) fn reference_density(
    rho_c: f64,
    overdensity_type: OverdensityType,
    redshift: f64,
    cosmology: &dyn Cosmology,
) -> f64 {
    match overdensity_type {
        OverdensityType::Critical => rho_c,
        OverdensityType::Mean => rho_c * cosmology.matter_density_fraction(redshift),
    }
}

/// Derive the full geometry of `config` under `cosmology`.
///
/// Recomputation order is `ρ_c → r_Δ → r_s`; the result is always
/// internally consistent (`r_s * c == r_Δ`).
///
/// Errors
/// ------
/// - `HaloError::UnitMismatch` if the cosmology's critical density is not a
///   density quantity.
/// - `HaloError::InvalidCriticalDensity` if the canonicalized critical
///   density is non-finite or non-positive.
pub fn compute_geometry(
    config: &HaloConfig,
    cosmology: &dyn Cosmology,
) -> HaloResult<DerivedGeometry> {
    let rho_c = cosmology
        .critical_density(config.redshift)
        .value_in(Unit::SolarMassPerMpc3)?;
    if !rho_c.is_finite() || rho_c <= 0.0 {
        return Err(HaloError::InvalidCriticalDensity {
            redshift: config.redshift,
            value: rho_c,
        });
    }

    let r_delta = match config.size_type {
        SizeType::Mass => {
            let rho_ref = reference_density(
                rho_c,
                config.overdensity_type,
                config.redshift,
                cosmology,
            );
            (3.0 * config.size.value() / (4.0 * PI * config.overdensity * rho_ref)).cbrt()
        }
        SizeType::Radius => config.size.value(),
    };
    let r_s = r_delta / config.concentration;

    Ok(DerivedGeometry { rho_c, r_delta, r_s })
}
