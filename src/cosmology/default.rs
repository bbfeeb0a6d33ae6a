//! Process-wide default cosmology with explicit versioning.
//!
//! Purpose
//! -------
//! Hold the cosmology that halos constructed without an explicit model track.
//! The historical design compared object identity against a global; here the
//! default lives in a single locked slot alongside a monotonically increasing
//! version counter, so trackers detect replacement by comparing an integer
//! token rather than cosmology values.
//!
//! Key behaviors
//! -------------
//! - [`current_default`] returns a [`CosmologyHandle`]: the shared model and
//!   the version it was installed under, read consistently under one lock.
//! - [`set_default`] installs a new model and bumps the version; the return
//!   value is the new version.
//! - The slot is seeded lazily with a flat ΛCDM model
//!   (`H0 = 70 km/s/Mpc, Ω_m0 = 0.3`).
//!
//! Concurrency
//! -----------
//! - The Arc and its version are only ever read or written together under
//!   the slot's `RwLock`, so a reader sees either the old pair or the new
//!   pair, never a mix. Replacing the default while another thread reads a
//!   tracking halo is therefore well-defined: that read resolves against
//!   whichever version it observed.
//! - Lock poisoning is absorbed with `PoisonError::into_inner`; the slot
//!   holds only an Arc and an integer, so a panicking writer cannot leave it
//!   in a torn state.
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::cosmology::flat_lcdm::FlatLambdaCDM;
use crate::cosmology::model::Cosmology;

struct DefaultSlot {
    cosmology: Arc<dyn Cosmology>,
    version: u64,
}

/// A consistent snapshot of the process-wide default cosmology.
#[derive(Clone)]
pub struct CosmologyHandle {
    /// The shared cosmology model.
    pub cosmology: Arc<dyn Cosmology>,
    /// The version the model was installed under.
    pub version: u64,
}

fn slot() -> &'static RwLock<DefaultSlot> {
    static SLOT: OnceLock<RwLock<DefaultSlot>> = OnceLock::new();
    SLOT.get_or_init(|| {
        RwLock::new(DefaultSlot {
            cosmology: Arc::new(FlatLambdaCDM::default()),
            version: 0,
        })
    })
}

/// Read the current default cosmology and its version.
pub fn current_default() -> CosmologyHandle {
    let guard = slot().read().unwrap_or_else(PoisonError::into_inner);
    CosmologyHandle {
        cosmology: Arc::clone(&guard.cosmology),
        version: guard.version,
    }
}

/// Version of the currently installed default.
pub fn current_version() -> u64 {
    slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .version
}

/// Install a new process-wide default cosmology.
///
/// Returns the version the new model was installed under; halos in tracking
/// mode recompute their derived geometry on their next accessor call.
pub fn set_default(cosmology: Arc<dyn Cosmology>) -> u64 {
    let mut guard = slot().write().unwrap_or_else(PoisonError::into_inner);
    guard.version += 1;
    guard.cosmology = cosmology;
    guard.version
}
