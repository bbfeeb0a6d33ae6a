//! halo — the NFW halo-profile engine.
//!
//! Purpose
//! -------
//! Provide the crate's main surface: a validated halo entity
//! ([`NFWHalo`]) with closed-form profile evaluations (density, enclosed
//! mass, Σ, ΔΣ, projected mass), bracketed inversions between masses and
//! radii at arbitrary overdensity thresholds, and lazy cosmology-tracking
//! derived geometry. Everything is synchronous, CPU-bound, and free of I/O.
//!
//! Key behaviors
//! -------------
//! - Configuration is validated once, at construction, via
//!   [`core::HaloConfig`]; the error taxonomy in [`errors`] separates
//!   configuration problems, unit mismatches, and convergence failures.
//! - Profile quantities are pure functions of the current derived geometry;
//!   projected quantities use the complex-continued inverse secant so radii
//!   inside the scale radius evaluate cleanly.
//! - Inversions solve the mean-density equation with the bracketed Brent
//!   solver from [`crate::rootfind`].
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. Build a [`core::HaloConfig`] (raw numbers or tagged
//!      [`crate::units::Quantity`] sizes).
//!   2. Construct an [`NFWHalo`] — tracking the default cosmology via
//!      [`NFWHalo::new`], or pinned via [`NFWHalo::with_cosmology`].
//!   3. Query profile values and inversions; results come back as tagged
//!      quantities in canonical units.
//! - Python bindings re-export this module's surface through the crate
//!   root and rely on the `HaloError → PyErr` conversion in [`errors`].

pub mod core;
pub mod errors;
pub mod profile;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{HaloConfig, OverdensityType, SizeType};
pub use self::errors::{HaloError, HaloResult};
pub use self::profile::{characteristic_overdensity, NFWHalo};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_nfw::halo::prelude::*;
//
// to import the main halo surface in a single line.

pub mod prelude {
    pub use super::core::{HaloConfig, OverdensityType, SizeType};
    pub use super::errors::{HaloError, HaloResult};
    pub use super::profile::{characteristic_overdensity, NFWHalo};
}
