//! The cosmology interface the halo engine consumes.
//!
//! Purpose
//! -------
//! Define the seam between the halo-profile engine and whatever cosmology
//! model supplies background densities. The engine needs exactly two things
//! at a halo's redshift: the critical density and the matter density
//! fraction. Anything implementing [`Cosmology`] can back a halo, either
//! injected explicitly at construction or installed as the process-wide
//! default (see [`crate::cosmology::default`]).
//!
//! Conventions
//! -----------
//! - Implementations are value-like and cheap to evaluate; the halo engine
//!   calls these methods on every derived-geometry recomputation.
//! - `critical_density` may return any density unit; the consumer
//!   canonicalizes to solar masses per cubic megaparsec and surfaces a unit
//!   mismatch as an error at the halo layer.
use crate::units::Quantity;

/// Background cosmology as seen by the halo engine.
pub trait Cosmology: Send + Sync {
    /// Critical density of the universe at redshift `z`, as a tagged density
    /// quantity (any density unit; canonicalized by the consumer).
    fn critical_density(&self, z: f64) -> Quantity;

    /// Dimensionless matter density fraction Ω_m(z).
    fn matter_density_fraction(&self, z: f64) -> f64;
}
