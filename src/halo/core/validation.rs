//! Halo validation helpers — reusable checks for configuration scalars.
//!
//! Purpose
//! -------
//! Centralize the fail-fast checks the halo constructors apply to their
//! scalar inputs (concentration, redshift, overdensity factor, size value)
//! so the configuration layer can report structured errors without
//! duplicating the predicates.
//!
//! Conventions
//! -----------
//! - Validation functions return [`HaloResult`] and never panic on invalid
//!   inputs.
//! - Radii passed to profile *evaluations* are deliberately not validated
//!   here: `r = 0` and `r = r_s` are documented numeric preconditions of the
//!   formulas, not configuration errors (see [`crate::halo::profile`]).
use crate::halo::errors::{HaloError, HaloResult};

/// Validate a halo concentration parameter.
///
/// Returns
/// -------
/// `HaloResult<f64>`
///   - `Ok(c)` if `c` is finite and strictly > 0.
///   - `Err(HaloError::InvalidConcentration)` otherwise.
pub fn validate_concentration(c: f64) -> HaloResult<f64> {
    if !c.is_finite() {
        return Err(HaloError::InvalidConcentration {
            value: c,
            reason: "The concentration must be finite.",
        });
    }
    if c <= 0.0 {
        return Err(HaloError::InvalidConcentration {
            value: c,
            reason: "The concentration must be strictly positive.",
        });
    }
    Ok(c)
}

/// Validate a halo redshift.
///
/// Returns
/// -------
/// `HaloResult<f64>`
///   - `Ok(z)` if `z` is finite and >= 0.
///   - `Err(HaloError::InvalidRedshift)` otherwise.
pub fn validate_redshift(z: f64) -> HaloResult<f64> {
    if !z.is_finite() {
        return Err(HaloError::InvalidRedshift {
            value: z,
            reason: "The redshift must be finite.",
        });
    }
    if z < 0.0 {
        return Err(HaloError::InvalidRedshift {
            value: z,
            reason: "The redshift must be non-negative.",
        });
    }
    Ok(z)
}

/// Validate an overdensity factor (the Δ in `Δ·ρ_ref`).
///
/// Used both for the construction-time `Δ₀` and for the thresholds passed to
/// `radius_delta` / `mass_delta` / `concentration`.
///
/// Returns
/// -------
/// `HaloResult<f64>`
///   - `Ok(delta)` if `delta` is finite and strictly > 0.
///   - `Err(HaloError::InvalidOverdensity)` otherwise.
pub fn validate_overdensity_factor(delta: f64) -> HaloResult<f64> {
    if !delta.is_finite() {
        return Err(HaloError::InvalidOverdensity {
            value: delta,
            reason: "The overdensity factor must be finite.",
        });
    }
    if delta <= 0.0 {
        return Err(HaloError::InvalidOverdensity {
            value: delta,
            reason: "The overdensity factor must be strictly positive.",
        });
    }
    Ok(delta)
}

/// Validate a halo size value (mass or radius, already canonicalized).
///
/// Returns
/// -------
/// `HaloResult<f64>`
///   - `Ok(size)` if `size` is finite and strictly > 0.
///   - `Err(HaloError::InvalidSize)` otherwise.
pub fn validate_size_value(size: f64) -> HaloResult<f64> {
    if !size.is_finite() {
        return Err(HaloError::InvalidSize {
            value: size,
            reason: "The size must be finite.",
        });
    }
    if size <= 0.0 {
        return Err(HaloError::InvalidSize {
            value: size,
            reason: "The size must be strictly positive.",
        });
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Accept/reject behavior of each scalar validator at its boundary.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Exercise each validator on a representative valid value and the
    // boundary rejections (zero, negative, NaN, infinity).
    //
    // Given
    // -----
    // - Boundary values per validator.
    //
    // Expect
    // ------
    // - `Ok` passes the value through unchanged; failures map to the
    //   validator's own error variant.
    fn validators_accept_and_reject_at_boundaries() {
        assert_eq!(validate_concentration(5.0).unwrap(), 5.0);
        assert!(matches!(
            validate_concentration(0.0),
            Err(HaloError::InvalidConcentration { .. })
        ));
        assert!(matches!(
            validate_concentration(f64::NAN),
            Err(HaloError::InvalidConcentration { .. })
        ));

        assert_eq!(validate_redshift(0.0).unwrap(), 0.0);
        assert!(matches!(
            validate_redshift(-0.1),
            Err(HaloError::InvalidRedshift { .. })
        ));
        assert!(matches!(
            validate_redshift(f64::INFINITY),
            Err(HaloError::InvalidRedshift { .. })
        ));

        assert_eq!(validate_overdensity_factor(200.0).unwrap(), 200.0);
        assert!(matches!(
            validate_overdensity_factor(0.0),
            Err(HaloError::InvalidOverdensity { .. })
        ));

        assert_eq!(validate_size_value(1e14).unwrap(), 1e14);
        assert!(matches!(
            validate_size_value(-1.0),
            Err(HaloError::InvalidSize { .. })
        ));
        assert!(matches!(
            validate_size_value(f64::NAN),
            Err(HaloError::InvalidSize { .. })
        ));
    }
}
