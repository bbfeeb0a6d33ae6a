//! PyO3 extraction helpers for the `_rust_nfw` binding layer.
//!
//! Everything here is glue between Python argument conventions and the Rust
//! core: radii may arrive as numpy arrays or plain sequences, and
//! overdensity types arrive as the historical strings. Native Rust callers
//! never need this module.
#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArrayMethods, PyReadonlyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::halo::core::config::OverdensityType;

/// Extract a contiguous 1-D `f64` array from a numpy array or any sequence
/// of floats.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    let vec: Vec<f64> = raw.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Parse an optional historical overdensity-type string.
///
/// `None` passes through (the halo's own convention applies); an
/// unrecognized string surfaces the configuration error as a Python
/// `ValueError`.
#[cfg(feature = "python-bindings")]
pub fn parse_overdensity_type(value: Option<&str>) -> PyResult<Option<OverdensityType>> {
    value
        .map(|s| s.parse::<OverdensityType>())
        .transpose()
        .map_err(PyErr::from)
}
