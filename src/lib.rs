//! rust_nfw — Navarro-Frenk-White halo profile engine with Python bindings.
//!
//! Purpose
//! -------
//! Model the structural properties of NFW dark-matter halos — density,
//! enclosed mass, projected (cylindrical) mass, surface mass density Σ, and
//! differential surface density ΔΣ — as functions of halo concentration,
//! redshift, and a size (mass or radius) defined at an arbitrary
//! overdensity threshold. Serve as the crate root for Rust callers and as
//! the PyO3 bridge that exposes the engine to Python via the `_rust_nfw`
//! extension module when the `python-bindings` feature is enabled.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules ([`halo`], [`cosmology`], [`rootfind`],
//!   [`units`]) as the public crate surface.
//! - Define the `NFW` `#[pyclass]` wrapper and the `#[pymodule]` initializer
//!   for the `_rust_nfw` Python extension, mirroring the historical Python
//!   API (constructor defaults, properties, `__str__`).
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; the binding layer
//!   performs only argument extraction, unit-free value passing (canonical
//!   units: solar masses, megaparsecs), and error mapping.
//! - Errors from core Rust code are rich enums internally and convert to
//!   Python `ValueError`s at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on the inner modules directly and can
//!   ignore the items guarded by the `python-bindings` feature.
//! - Python callers import `_rust_nfw` (typically wrapped by a thin pure
//!   Python facade) and interact with the `NFW` class and
//!   `set_default_cosmology`.

pub mod cosmology;
pub mod halo;
pub mod rootfind;
pub mod units;
pub mod utils;

// ---- Re-exports (primary public surface) ----------------------------------

pub use crate::cosmology::{Cosmology, FlatLambdaCDM};
pub use crate::halo::{
    characteristic_overdensity, HaloConfig, HaloError, HaloResult, NFWHalo, OverdensityType,
    SizeType,
};
pub use crate::units::{Quantity, Unit};

#[cfg(feature = "python-bindings")]
use std::sync::Arc;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

#[cfg(feature = "python-bindings")]
use crate::utils::{extract_f64_array, parse_overdensity_type};

/// Python-facing NFW halo.
///
/// Scalar inputs and outputs are in canonical units: radii in Mpc, masses
/// in solar masses, densities in M_sun/Mpc^3, surface densities in
/// M_sun/Mpc^2.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "NFW")]
pub struct PyNFW {
    inner: NFWHalo,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyNFW {
    #[new]
    #[pyo3(signature = (
        size,
        c,
        z,
        size_type = "mass",
        overdensity = 200.0,
        overdensity_type = "critical",
        cosmology = None
    ))]
    fn new(
        size: f64,
        c: f64,
        z: f64,
        size_type: &str,
        overdensity: f64,
        overdensity_type: &str,
        cosmology: Option<(f64, f64)>,
    ) -> PyResult<Self> {
        let size_type: SizeType = size_type.parse()?;
        let overdensity_type: OverdensityType = overdensity_type.parse()?;
        let config = HaloConfig::new(size, size_type, c, z, overdensity, overdensity_type)?;
        let inner = match cosmology {
            Some((h0, om0)) => {
                let model = FlatLambdaCDM::new(h0, om0).map_err(HaloError::from)?;
                NFWHalo::with_cosmology(config, Arc::new(model))?
            }
            None => NFWHalo::new(config)?,
        };
        Ok(Self { inner })
    }

    // ---- Properties ----

    #[getter]
    fn c(&self) -> f64 {
        self.inner.concentration_parameter()
    }

    #[getter]
    fn z(&self) -> f64 {
        self.inner.redshift()
    }

    #[getter]
    fn overdensity(&self) -> f64 {
        self.inner.overdensity()
    }

    #[getter]
    fn overdensity_type(&self) -> &'static str {
        self.inner.overdensity_type().as_str()
    }

    #[getter]
    fn size_type(&self) -> &'static str {
        self.inner.size_type().as_str()
    }

    #[getter]
    fn var_cosmology(&self) -> bool {
        self.inner.var_cosmology()
    }

    #[getter]
    fn delta_c(&self) -> f64 {
        self.inner.delta_c()
    }

    #[getter]
    fn rho_c(&self) -> PyResult<f64> {
        Ok(self.inner.rho_c()?.value())
    }

    #[getter(r_Delta)]
    fn r_delta(&self) -> PyResult<f64> {
        Ok(self.inner.r_delta()?.value())
    }

    #[getter]
    fn r_s(&self) -> PyResult<f64> {
        Ok(self.inner.r_s()?.value())
    }

    // ---- Profile evaluations ----

    fn density(&self, r: f64) -> PyResult<f64> {
        Ok(self.inner.density(r)?.value())
    }

    fn mean_density(&self, r: f64) -> PyResult<f64> {
        Ok(self.inner.mean_density(r)?.value())
    }

    fn mass(&self, r: f64) -> PyResult<f64> {
        Ok(self.inner.mass(r)?.value())
    }

    fn sigma(&self, r: f64) -> PyResult<f64> {
        Ok(self.inner.sigma(r)?.value())
    }

    fn delta_sigma(&self, r: f64) -> PyResult<f64> {
        Ok(self.inner.delta_sigma(r)?.value())
    }

    fn projected_mass(&self, r: f64) -> PyResult<f64> {
        Ok(self.inner.projected_mass(r)?.value())
    }

    // ---- Inversions ----

    #[pyo3(name = "radius_Delta", signature = (overdensity, overdensity_type = None))]
    fn radius_delta_py(&self, overdensity: f64, overdensity_type: Option<&str>) -> PyResult<f64> {
        let od_type = parse_overdensity_type(overdensity_type)?;
        Ok(self.inner.radius_delta(overdensity, od_type)?.value())
    }

    #[pyo3(name = "mass_Delta", signature = (overdensity, overdensity_type = None))]
    fn mass_delta_py(&self, overdensity: f64, overdensity_type: Option<&str>) -> PyResult<f64> {
        let od_type = parse_overdensity_type(overdensity_type)?;
        Ok(self.inner.mass_delta(overdensity, od_type)?.value())
    }

    #[pyo3(signature = (overdensity = None, overdensity_type = None))]
    fn concentration(
        &self,
        overdensity: Option<f64>,
        overdensity_type: Option<&str>,
    ) -> PyResult<f64> {
        let od_type = parse_overdensity_type(overdensity_type)?;
        Ok(self.inner.concentration(overdensity, od_type)?)
    }

    // ---- Vectorized evaluations ----

    fn density_profile<'py>(
        &self,
        py: Python<'py>,
        radii: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let radii = extract_f64_array(py, radii)?;
        let values = self.inner.density_profile(radii.as_array())?;
        Ok(values.into_pyarray(py))
    }

    fn mean_density_profile<'py>(
        &self,
        py: Python<'py>,
        radii: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let radii = extract_f64_array(py, radii)?;
        let values = self.inner.mean_density_profile(radii.as_array())?;
        Ok(values.into_pyarray(py))
    }

    fn mass_profile<'py>(
        &self,
        py: Python<'py>,
        radii: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let radii = extract_f64_array(py, radii)?;
        let values = self.inner.mass_profile(radii.as_array())?;
        Ok(values.into_pyarray(py))
    }

    fn sigma_profile<'py>(
        &self,
        py: Python<'py>,
        radii: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let radii = extract_f64_array(py, radii)?;
        let values = self.inner.sigma_profile(radii.as_array())?;
        Ok(values.into_pyarray(py))
    }

    fn delta_sigma_profile<'py>(
        &self,
        py: Python<'py>,
        radii: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let radii = extract_f64_array(py, radii)?;
        let values = self.inner.delta_sigma_profile(radii.as_array())?;
        Ok(values.into_pyarray(py))
    }

    // ---- Diagnostics ----

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

/// Install a flat ΛCDM model as the process-wide default cosmology.
///
/// Halos constructed without an explicit cosmology recompute their derived
/// geometry against the new default on their next property access. Returns
/// the new registry version.
#[cfg(feature = "python-bindings")]
#[pyfunction]
fn set_default_cosmology(h0: f64, om0: f64) -> PyResult<u64> {
    let model = FlatLambdaCDM::new(h0, om0).map_err(HaloError::from)?;
    Ok(cosmology::set_default(Arc::new(model)))
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_nfw(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyNFW>()?;
    m.add_function(wrap_pyfunction!(set_default_cosmology, m)?)?;
    Ok(())
}
