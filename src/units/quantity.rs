//! Tagged physical quantities for halo inputs and outputs.
//!
//! Purpose
//! -------
//! Replace ad-hoc runtime unit checking with a small tagged union: a bare
//! `f64` carries an *implicit* unit supplied by the call site, while a
//! [`Quantity`] carries an *explicit* one. [`check_unit`] is the single
//! conversion point: it tags raw values with the expected unit and converts
//! tagged values into it, failing on dimension mismatches.
//!
//! Key behaviors
//! -------------
//! - [`Unit`] enumerates the units this crate understands, grouped by
//!   [`Dimension`]; each dimension has one canonical unit (solar masses,
//!   megaparsecs, and densities derived from the two).
//! - [`Quantity::to`] rescales within a dimension and rejects cross-dimension
//!   conversions with [`UnitError::DimensionMismatch`].
//! - [`UnitInput`] accepts either representation via `From<f64>` /
//!   `From<Quantity>` so call sites can pass `0.5` or
//!   `Quantity::new(500.0, Unit::Kiloparsec)` interchangeably.
//!
//! Conventions
//! -----------
//! - Canonical units are `M_sun` (mass), `Mpc` (length), `M_sun/Mpc^3`
//!   (density), and `M_sun/Mpc^2` (surface density). All halo-profile
//!   arithmetic happens in canonical units; other units exist only at the
//!   input/output boundary.
//! - Unit conversion never inspects the numeric value; NaN and infinity pass
//!   through unchanged.
use crate::units::errors::{UnitError, UnitResult};

/// Solar mass in kilograms.
pub const M_SUN_KG: f64 = 1.988_92e30;

/// Megaparsec in meters.
pub const MPC_M: f64 = 3.085_677_581_491_367_3e22;

/// Physical dimension of a [`Unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Mass (canonical unit: solar masses).
    Mass,
    /// Length (canonical unit: megaparsecs).
    Length,
    /// Mass per volume (canonical unit: solar masses per cubic megaparsec).
    Density,
    /// Mass per projected area (canonical unit: solar masses per square
    /// megaparsec).
    SurfaceDensity,
}

/// Units understood by the halo-profile engine.
///
/// Each unit belongs to exactly one [`Dimension`]; conversions within a
/// dimension are exact rescalings by the ratio of canonical factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Solar masses (canonical mass unit).
    SolarMass,
    /// Kilograms.
    Kilogram,
    /// Grams.
    Gram,
    /// Megaparsecs (canonical length unit).
    Megaparsec,
    /// Kiloparsecs.
    Kiloparsec,
    /// Meters.
    Meter,
    /// Solar masses per cubic megaparsec (canonical density unit).
    SolarMassPerMpc3,
    /// Kilograms per cubic meter.
    KilogramPerM3,
    /// Grams per cubic centimeter.
    GramPerCm3,
    /// Solar masses per square megaparsec (canonical surface-density unit).
    SolarMassPerMpc2,
}

impl Unit {
    /// The physical dimension this unit measures.
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::SolarMass | Unit::Kilogram | Unit::Gram => Dimension::Mass,
            Unit::Megaparsec | Unit::Kiloparsec | Unit::Meter => Dimension::Length,
            Unit::SolarMassPerMpc3 | Unit::KilogramPerM3 | Unit::GramPerCm3 => Dimension::Density,
            Unit::SolarMassPerMpc2 => Dimension::SurfaceDensity,
        }
    }

    /// Multiplicative factor taking a value in this unit to the canonical
    /// unit of its dimension.
    fn canonical_factor(&self) -> f64 {
        match self {
            Unit::SolarMass => 1.0,
            Unit::Kilogram => 1.0 / M_SUN_KG,
            Unit::Gram => 1.0e-3 / M_SUN_KG,
            Unit::Megaparsec => 1.0,
            Unit::Kiloparsec => 1.0e-3,
            Unit::Meter => 1.0 / MPC_M,
            Unit::SolarMassPerMpc3 => 1.0,
            Unit::KilogramPerM3 => MPC_M * MPC_M * MPC_M / M_SUN_KG,
            Unit::GramPerCm3 => 1.0e3 * MPC_M * MPC_M * MPC_M / M_SUN_KG,
            Unit::SolarMassPerMpc2 => 1.0,
        }
    }

    /// Conventional text symbol for the unit.
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::SolarMass => "M_sun",
            Unit::Kilogram => "kg",
            Unit::Gram => "g",
            Unit::Megaparsec => "Mpc",
            Unit::Kiloparsec => "kpc",
            Unit::Meter => "m",
            Unit::SolarMassPerMpc3 => "M_sun/Mpc^3",
            Unit::KilogramPerM3 => "kg/m^3",
            Unit::GramPerCm3 => "g/cm^3",
            Unit::SolarMassPerMpc2 => "M_sun/Mpc^2",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A numeric value tagged with an explicit [`Unit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    /// Tag `value` with `unit`.
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// The numeric value in this quantity's own unit.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The unit this quantity is expressed in.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Convert to `target`, rescaling within the shared dimension.
    ///
    /// Errors
    /// ------
    /// - `UnitError::DimensionMismatch` if `target` measures a different
    ///   dimension than this quantity's unit.
    pub fn to(&self, target: Unit) -> UnitResult<Quantity> {
        if self.unit.dimension() != target.dimension() {
            return Err(UnitError::DimensionMismatch {
                expected: target,
                found: self.unit,
            });
        }
        let value = self.value * self.unit.canonical_factor() / target.canonical_factor();
        Ok(Quantity::new(value, target))
    }

    /// Convert to `target` and return the bare numeric value.
    pub fn value_in(&self, target: Unit) -> UnitResult<f64> {
        Ok(self.to(target)?.value)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// A halo input that may or may not carry an explicit unit.
///
/// Raw numbers adopt whatever unit the receiving operation expects; tagged
/// quantities are converted (and checked) instead. This is the tagged-union
/// form of the historical "accept a float or a unitful value" convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitInput {
    /// A bare number; the expected unit is implied by the call site.
    Raw(f64),
    /// An explicitly tagged value; converted to the expected unit.
    Tagged(Quantity),
}

impl From<f64> for UnitInput {
    fn from(value: f64) -> Self {
        UnitInput::Raw(value)
    }
}

impl From<Quantity> for UnitInput {
    fn from(quantity: Quantity) -> Self {
        UnitInput::Tagged(quantity)
    }
}

/// Resolve an input against the unit an operation expects.
///
/// Parameters
/// ----------
/// - `input`: raw or tagged value.
/// - `expected`: the unit the caller's formula is written in.
///
/// Returns
/// -------
/// `UnitResult<Quantity>`
///   - Raw inputs tagged with `expected` as-is.
///   - Tagged inputs converted to `expected`.
///
/// Errors
/// ------
/// - `UnitError::DimensionMismatch` if a tagged input's dimension is
///   incompatible with `expected`.
pub fn check_unit(input: UnitInput, expected: Unit) -> UnitResult<Quantity> {
    match input {
        UnitInput::Raw(value) => Ok(Quantity::new(value, expected)),
        UnitInput::Tagged(quantity) => quantity.to(expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Within-dimension conversion factors (length, mass, density).
    // - Cross-dimension rejection.
    // - Raw-vs-tagged resolution through `check_unit`.
    //
    // These tests intentionally DO NOT cover:
    // - Halo-level use of quantities; see `halo::profile`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify kiloparsec-to-megaparsec rescaling and its round trip.
    //
    // Given
    // -----
    // - 1500 kpc.
    //
    // Expect
    // ------
    // - 1.5 Mpc, and converting back recovers 1500 kpc.
    fn kiloparsec_megaparsec_round_trip() {
        let q = Quantity::new(1500.0, Unit::Kiloparsec);
        let mpc = q.to(Unit::Megaparsec).unwrap();
        assert_relative_eq!(mpc.value(), 1.5, max_relative = 1e-15);
        let back = mpc.to(Unit::Kiloparsec).unwrap();
        assert_relative_eq!(back.value(), 1500.0, max_relative = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Verify the kilogram-to-solar-mass factor.
    //
    // Given
    // -----
    // - One solar mass expressed in kilograms.
    //
    // Expect
    // ------
    // - Exactly 1 M_sun after conversion.
    fn kilograms_convert_to_solar_masses() {
        let q = Quantity::new(M_SUN_KG, Unit::Kilogram);
        assert_relative_eq!(q.value_in(Unit::SolarMass).unwrap(), 1.0, max_relative = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Verify the composite density factor kg/m^3 -> M_sun/Mpc^3.
    //
    // Given
    // -----
    // - 1 kg/m^3.
    //
    // Expect
    // ------
    // - MPC_M^3 / M_SUN_KG solar masses per cubic megaparsec (~1.48e37).
    fn density_factor_is_composed_from_base_constants() {
        let q = Quantity::new(1.0, Unit::KilogramPerM3);
        let v = q.value_in(Unit::SolarMassPerMpc3).unwrap();
        assert_relative_eq!(v, MPC_M.powi(3) / M_SUN_KG, max_relative = 1e-15);
        assert!(v > 1.4e37 && v < 1.5e37);
    }

    #[test]
    // Purpose
    // -------
    // Ensure cross-dimension conversion is rejected with a structured error.
    //
    // Given
    // -----
    // - A length tagged in Mpc, converted to a mass unit.
    //
    // Expect
    // ------
    // - `UnitError::DimensionMismatch` naming both units.
    fn cross_dimension_conversion_is_rejected() {
        let q = Quantity::new(1.0, Unit::Megaparsec);
        let err = q.to(Unit::SolarMass).unwrap_err();
        assert_eq!(
            err,
            UnitError::DimensionMismatch {
                expected: Unit::SolarMass,
                found: Unit::Megaparsec,
            }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify `check_unit` tags raw values and converts tagged ones.
    //
    // Given
    // -----
    // - A raw 0.5 and a tagged 500 kpc, both checked against Mpc.
    //
    // Expect
    // ------
    // - The raw value adopts Mpc unchanged; the tagged value becomes 0.5 Mpc.
    fn check_unit_tags_raw_and_converts_tagged() {
        let raw = check_unit(0.5.into(), Unit::Megaparsec).unwrap();
        assert_eq!(raw, Quantity::new(0.5, Unit::Megaparsec));

        let tagged = check_unit(Quantity::new(500.0, Unit::Kiloparsec).into(), Unit::Megaparsec)
            .unwrap();
        assert_relative_eq!(tagged.value(), 0.5, max_relative = 1e-15);
        assert_eq!(tagged.unit(), Unit::Megaparsec);
    }
}
