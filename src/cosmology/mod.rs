//! cosmology — background-density models consumed by the halo engine.
//!
//! Purpose
//! -------
//! Bundle the cosmology seam of the crate: the [`Cosmology`] trait the halo
//! engine evaluates against, a flat ΛCDM reference implementation
//! ([`FlatLambdaCDM`]), and the versioned process-wide default registry that
//! halos without an explicitly injected model track
//! ([`default::current_default`] / [`default::set_default`]).
//!
//! Key behaviors
//! -------------
//! - [`Cosmology`] supplies exactly the two background quantities halo
//!   geometry depends on: critical density and matter density fraction at a
//!   redshift.
//! - [`FlatLambdaCDM`] evaluates the standard closed forms with validated
//!   parameters and is the seed value of the default registry.
//! - [`default`] replaces identity comparison against a mutable global with
//!   an explicit `{Arc, version}` slot read under a single lock.
//!
//! Downstream usage
//! ----------------
//! - Inject a model explicitly with `NFWHalo::with_cosmology` for geometry
//!   that never changes, or construct with `NFWHalo::new` to track the
//!   registry. Install a new default with [`default::set_default`]; tracking
//!   halos refresh on their next accessor call.

pub mod default;
pub mod errors;
pub mod flat_lcdm;
pub mod model;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::default::{current_default, current_version, set_default, CosmologyHandle};
pub use self::errors::{CosmologyError, CosmoResult};
pub use self::flat_lcdm::{FlatLambdaCDM, G_MPC_KM2_S2_MSUN};
pub use self::model::Cosmology;
