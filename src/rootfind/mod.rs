//! rootfind — bracketed scalar root solving with a unified error surface.
//!
//! Purpose
//! -------
//! Provide the one-dimensional inversion primitive the halo layer uses for
//! mass↔radius queries: an argmin-backed Brent search wrapped so that
//! bracket preconditions, iteration bounds, and every failure mode are
//! expressed in crate terms ([`RootError`]) rather than backend ones.
//!
//! Key behaviors
//! -------------
//! - [`ScalarAdapter`] bridges a plain `Fn(f64) -> f64` into argmin's
//!   problem traits.
//! - [`find_root`] validates the bracket, runs `BrentRoot` under an explicit
//!   iteration cap, and normalizes the outcome.
//! - [`BrentOptions`] carries the tolerance and cap with a validating
//!   constructor and crate-wide defaults.
//!
//! Conventions
//! -----------
//! - Searches are synchronous, bounded, and side-effect free; they are safe
//!   to re-issue with an adjusted bracket after a failure and are never
//!   retried internally.
//! - This module performs no I/O and no logging.

pub mod adapter;
pub mod brent;
pub mod errors;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::adapter::ScalarAdapter;
pub use self::brent::{find_root, BrentOptions, DEFAULT_MAX_ITER, DEFAULT_TOL};
pub use self::errors::{RootError, RootResult};
