//! Flat ΛCDM reference cosmology.
//!
//! Purpose
//! -------
//! Provide the concrete [`Cosmology`] implementation used as the process-wide
//! default and in tests: a spatially flat model parameterized by the Hubble
//! constant `H0` and the present-day matter fraction `Ω_m0`, with
//! `Ω_Λ = 1 − Ω_m0`.
//!
//! Key behaviors
//! -------------
//! - `E²(z) = Ω_m0 (1+z)³ + (1 − Ω_m0)`.
//! - `ρ_c(z) = 3 H(z)² / (8πG)`, returned in solar masses per cubic
//!   megaparsec.
//! - `Ω_m(z) = Ω_m0 (1+z)³ / E²(z)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `H0` is finite and strictly positive; `Ω_m0` is finite and in [0, 1].
//!   Both are enforced at construction; evaluation methods assume them.
//! - Radiation and curvature terms are neglected, matching the regimes halo
//!   analyses run in (z of order a few).
use crate::cosmology::errors::{CosmologyError, CosmoResult};
use crate::cosmology::model::Cosmology;
use crate::units::{Quantity, Unit};

/// Newton's constant in Mpc (km/s)^2 / M_sun.
///
/// With `H(z)` expressed in km/s/Mpc, `3 H(z)^2 / (8 pi G)` then lands
/// directly in solar masses per cubic megaparsec, the canonical density unit
/// of this crate.
pub const G_MPC_KM2_S2_MSUN: f64 = 4.300_91e-9;

/// Spatially flat ΛCDM cosmology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatLambdaCDM {
    h0: f64,
    omega_m0: f64,
}

impl FlatLambdaCDM {
    /// Construct a validated flat ΛCDM model.
    ///
    /// Parameters
    /// ----------
    /// - `h0`: Hubble constant in km/s/Mpc. Must be finite and strictly
    ///   positive.
    /// - `omega_m0`: present-day matter density fraction. Must be finite and
    ///   in [0, 1].
    ///
    /// Returns
    /// -------
    /// `CosmoResult<FlatLambdaCDM>`
    ///   - `Ok(model)` when both parameters are admissible.
    ///   - `Err(CosmologyError)` otherwise.
    ///
    /// Errors
    /// ------
    /// - `CosmologyError::InvalidHubbleConstant` when `h0` is NaN, ±∞, or
    ///   ≤ 0.
    /// - `CosmologyError::InvalidMatterDensity` when `omega_m0` is NaN, ±∞,
    ///   or outside [0, 1].
    pub fn new(h0: f64, omega_m0: f64) -> CosmoResult<Self> {
        if !h0.is_finite() {
            return Err(CosmologyError::InvalidHubbleConstant {
                value: h0,
                reason: "The Hubble constant must be finite.",
            });
        }
        if h0 <= 0.0 {
            return Err(CosmologyError::InvalidHubbleConstant {
                value: h0,
                reason: "The Hubble constant must be strictly positive.",
            });
        }
        if !omega_m0.is_finite() {
            return Err(CosmologyError::InvalidMatterDensity {
                value: omega_m0,
                reason: "The matter density fraction must be finite.",
            });
        }
        if !(0.0..=1.0).contains(&omega_m0) {
            return Err(CosmologyError::InvalidMatterDensity {
                value: omega_m0,
                reason: "A flat model requires 0 <= Omega_m0 <= 1.",
            });
        }
        Ok(Self { h0, omega_m0 })
    }

    /// Hubble constant in km/s/Mpc.
    pub fn h0(&self) -> f64 {
        self.h0
    }

    /// Present-day matter density fraction.
    pub fn omega_m0(&self) -> f64 {
        self.omega_m0
    }

    /// Dimensionless expansion rate squared, `E²(z)`.
    pub fn efunc_sq(&self, z: f64) -> f64 {
        let a3 = (1.0 + z).powi(3);
        self.omega_m0 * a3 + (1.0 - self.omega_m0)
    }

    /// Hubble parameter `H(z)` in km/s/Mpc.
    pub fn hubble_parameter(&self, z: f64) -> f64 {
        self.h0 * self.efunc_sq(z).sqrt()
    }
}

/// The crate-wide reference parameters: `H0 = 70 km/s/Mpc`, `Ω_m0 = 0.3`.
impl Default for FlatLambdaCDM {
    fn default() -> Self {
        Self { h0: 70.0, omega_m0: 0.3 }
    }
}

impl Cosmology for FlatLambdaCDM {
    fn critical_density(&self, z: f64) -> Quantity {
        let h = self.hubble_parameter(z);
        let rho = 3.0 * h * h / (8.0 * std::f64::consts::PI * G_MPC_KM2_S2_MSUN);
        Quantity::new(rho, Unit::SolarMassPerMpc3)
    }

    fn matter_density_fraction(&self, z: f64) -> f64 {
        self.omega_m0 * (1.0 + z).powi(3) / self.efunc_sq(z)
    }
}
