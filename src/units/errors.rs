//! Errors for unit tagging and conversion.
//!
//! Conversions only ever fail across dimensions (e.g. a length where a mass
//! is expected); conversions within a dimension are plain rescalings and
//! cannot fail.
use crate::units::quantity::Unit;

/// Result alias for unit-tagging and conversion paths that may produce
/// [`UnitError`].
pub type UnitResult<T> = Result<T, UnitError>;

/// Error type for the unit layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitError {
    /// A tagged value's dimension is incompatible with the expected unit.
    DimensionMismatch { expected: Unit, found: Unit },
}

impl std::error::Error for UnitError {}

impl std::fmt::Display for UnitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitError::DimensionMismatch { expected, found } => {
                write!(
                    f,
                    "Cannot convert {found} ({:?}) to {expected} ({:?}): incompatible dimensions.",
                    found.dimension(),
                    expected.dimension()
                )
            }
        }
    }
}
