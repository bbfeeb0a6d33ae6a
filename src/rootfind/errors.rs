//! Errors for bracketed root finding (option validation, bracket checks,
//! and backend solver failures).
//!
//! All backend (`argmin`) errors are normalized into [`RootError`] so callers
//! never see raw solver errors. A failed search is recoverable by retrying
//! with a wider bracket or different target; nothing here is retried
//! internally.
use argmin::core::Error;

/// Result alias for root-finding operations that may produce [`RootError`].
pub type RootResult<T> = Result<T, RootError>;

/// Unified error type for the bracketed root solver.
#[derive(Debug, Clone, PartialEq)]
pub enum RootError {
    // ---- Options validation ----
    /// Tolerance must be finite and > 0.
    InvalidTol { tol: f64, reason: &'static str },

    /// Maximum iterations must be at least 1.
    InvalidMaxIter { max_iter: u64, reason: &'static str },

    // ---- Bracket validation ----
    /// Bracket endpoints must be finite with lower < upper.
    InvalidBracket { lower: f64, upper: f64 },

    /// The objective returned NaN/±inf at a bracket endpoint.
    NonFiniteEvaluation { x: f64, value: f64 },

    /// The objective has the same sign at both endpoints; no root is
    /// bracketed.
    NoSignChange {
        lower: f64,
        upper: f64,
        f_lower: f64,
        f_upper: f64,
    },

    // ---- Iteration ----
    /// The iteration budget was exhausted before the tolerance was met.
    NotConverged { max_iter: u64 },

    /// The backend terminated without producing a best parameter.
    MissingRoot,

    // ---- Backend ----
    /// Wrapper for any other argmin runtime error.
    Backend { text: String },
}

impl std::error::Error for RootError {}

impl std::fmt::Display for RootError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Options validation ----
            RootError::InvalidTol { tol, reason } => {
                write!(f, "Tolerance must be finite and > 0; got {tol}. {reason}")
            }
            RootError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Maximum iterations must be at least 1; got {max_iter}. {reason}")
            }
            // ---- Bracket validation ----
            RootError::InvalidBracket { lower, upper } => {
                write!(f, "Bracket endpoints must be finite with lower < upper; got [{lower}, {upper}].")
            }
            RootError::NonFiniteEvaluation { x, value } => {
                write!(f, "Objective is non-finite at bracket endpoint {x}: {value}")
            }
            RootError::NoSignChange {
                lower,
                upper,
                f_lower,
                f_upper,
            } => {
                write!(
                    f,
                    "No sign change over [{lower}, {upper}]: f(lower) = {f_lower}, f(upper) = {f_upper}."
                )
            }
            // ---- Iteration ----
            RootError::NotConverged { max_iter } => {
                write!(f, "Root search did not converge within {max_iter} iterations.")
            }
            RootError::MissingRoot => {
                write!(f, "Backend terminated without a best parameter.")
            }
            // ---- Backend ----
            RootError::Backend { text } => {
                write!(f, "Root-finding backend failed: {text}")
            }
        }
    }
}

/// Normalize argmin runtime errors into the crate error surface.
impl From<Error> for RootError {
    fn from(err: Error) -> RootError {
        RootError::Backend {
            text: err.to_string(),
        }
    }
}
