//! units — tagged physical quantities and conversion at the API boundary.
//!
//! Purpose
//! -------
//! Provide the small unit layer the halo engine uses to accept raw or
//! explicitly tagged inputs and to label its outputs. Internally the engine
//! works exclusively in canonical units (solar masses, megaparsecs, and
//! densities derived from them); this module is the only place conversions
//! happen.
//!
//! Downstream usage
//! ----------------
//! - Halo operations accept `impl Into<UnitInput>` and resolve it with
//!   [`check_unit`]; cosmology implementations return [`Quantity`] densities
//!   in whatever unit is natural and let the consumer canonicalize.

pub mod errors;
pub mod quantity;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{UnitError, UnitResult};
pub use self::quantity::{check_unit, Dimension, Quantity, Unit, UnitInput, M_SUN_KG, MPC_M};
