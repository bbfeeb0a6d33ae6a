//! core — shared halo configuration, validation, and derived geometry.
//!
//! Purpose
//! -------
//! Collect the building blocks the halo entity is assembled from: validated
//! configuration types ([`HaloConfig`], [`SizeType`], [`OverdensityType`]),
//! scalar validation helpers, the complex-continued inverse secant used by
//! the projected-profile formulas, and the derived-geometry computation with
//! its cosmology-version cache.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed [`HaloConfig`] satisfies every documented scalar
//!   invariant and carries its size in the canonical unit of its
//!   `size_type`; downstream code never re-validates.
//! - Geometry produced by [`compute_geometry`] always satisfies
//!   `r_s · c == r_Δ`, and recomputation is never partial.
//!
//! Downstream usage
//! ----------------
//! - [`crate::halo::profile::NFWHalo`] is the consumer of everything here;
//!   external callers normally construct a [`HaloConfig`] and hand it to the
//!   entity rather than using these pieces directly.

pub mod arcsec;
pub mod config;
pub mod geometry;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::arcsec::{arcsec, arcsec_complex};
pub use self::config::{HaloConfig, OverdensityType, SizeType};
pub use self::geometry::{compute_geometry, CosmologyBinding, DerivedGeometry};
pub use self::validation::{
    validate_concentration, validate_overdensity_factor, validate_redshift, validate_size_value,
};
