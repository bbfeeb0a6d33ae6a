//! Bracketed Brent root search over a scalar function.
//!
//! Purpose
//! -------
//! Run `argmin`'s Brent solver against a user-supplied continuous function
//! and bracket, with the bracket preconditions checked up front and every
//! outcome normalized into [`RootResult`]. This is the shared runner behind
//! the halo layer's mass↔radius inversions.
//!
//! Key behaviors
//! -------------
//! - Validate the bracket (finite, ordered) and the endpoint evaluations
//!   (finite) before touching the backend; a bracket without a sign change
//!   fails fast with [`RootError::NoSignChange`].
//! - Accept an exact root at either endpoint without iterating.
//! - Cap iterations explicitly via [`BrentOptions::max_iter`] so termination
//!   is guaranteed by this crate rather than by solver defaults, and map an
//!   exhausted budget to [`RootError::NotConverged`].
use argmin::core::{Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::brent::BrentRoot;

use crate::rootfind::adapter::ScalarAdapter;
use crate::rootfind::errors::{RootError, RootResult};

/// Default absolute tolerance on the root location.
///
/// Brent's interval test converges to roughly `2 eps |x| + tol / 2`, so this
/// leaves the result at machine-level precision for the O(1) Mpc radii the
/// halo layer solves for, comfortably inside the 1e-6 relative round-trip
/// tolerance its callers rely on.
pub const DEFAULT_TOL: f64 = 1e-12;

/// Default iteration cap.
///
/// Bisection alone needs ~45 halvings to resolve a (1e-6, 10) bracket at
/// `DEFAULT_TOL`; Brent does strictly better, so 100 bounds every search the
/// halo layer issues.
pub const DEFAULT_MAX_ITER: u64 = 100;

/// Validated options for a Brent search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrentOptions {
    /// Absolute tolerance on the root location.
    pub tol: f64,
    /// Hard iteration cap.
    pub max_iter: u64,
}

impl BrentOptions {
    /// Construct validated options.
    ///
    /// Errors
    /// ------
    /// - `RootError::InvalidTol` when `tol` is NaN, ±∞, or ≤ 0.
    /// - `RootError::InvalidMaxIter` when `max_iter` is 0.
    pub fn new(tol: f64, max_iter: u64) -> RootResult<Self> {
        if !tol.is_finite() {
            return Err(RootError::InvalidTol {
                tol,
                reason: "The tolerance must be finite.",
            });
        }
        if tol <= 0.0 {
            return Err(RootError::InvalidTol {
                tol,
                reason: "The tolerance must be strictly positive.",
            });
        }
        if max_iter == 0 {
            return Err(RootError::InvalidMaxIter {
                max_iter,
                reason: "At least one iteration is required.",
            });
        }
        Ok(Self { tol, max_iter })
    }
}

impl Default for BrentOptions {
    fn default() -> Self {
        Self {
            tol: DEFAULT_TOL,
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

/// Find a root of `f` inside `bracket = (lower, upper)`.
///
/// Parameters
/// ----------
/// - `f`: continuous scalar objective; evaluated twice for the pre-flight
///   checks and then driven by the Brent solver.
/// - `bracket`: search interval; must be finite with `lower < upper` and
///   must straddle a sign change of `f`.
/// - `opts`: tolerance and iteration cap (see [`BrentOptions`]).
///
/// Returns
/// -------
/// `RootResult<f64>`
///   - `Ok(x)` with `f(x) ≈ 0` within the solver's interval tolerance.
///   - `Err(RootError)` for invalid brackets, missing sign changes,
///     non-finite endpoint evaluations, an exhausted iteration budget, or a
///     backend failure.
///
/// Notes
/// -----
/// - An exact zero at an endpoint is returned immediately.
/// - The search is not retried internally; callers re-invoke with an
///   adjusted bracket when that is the right recovery.
pub fn find_root<F>(f: F, bracket: (f64, f64), opts: &BrentOptions) -> RootResult<f64>
where
    F: Fn(f64) -> f64,
{
    let (lower, upper) = bracket;
    if !lower.is_finite() || !upper.is_finite() || lower >= upper {
        return Err(RootError::InvalidBracket { lower, upper });
    }

    let f_lower = f(lower);
    if !f_lower.is_finite() {
        return Err(RootError::NonFiniteEvaluation {
            x: lower,
            value: f_lower,
        });
    }
    let f_upper = f(upper);
    if !f_upper.is_finite() {
        return Err(RootError::NonFiniteEvaluation {
            x: upper,
            value: f_upper,
        });
    }
    if f_lower == 0.0 {
        return Ok(lower);
    }
    if f_upper == 0.0 {
        return Ok(upper);
    }
    if f_lower.signum() == f_upper.signum() {
        return Err(RootError::NoSignChange {
            lower,
            upper,
            f_lower,
            f_upper,
        });
    }

    let solver = BrentRoot::new(lower, upper, opts.tol);
    let problem = ScalarAdapter::new(f);
    let result = Executor::new(problem, solver)
        .configure(|state| state.max_iters(opts.max_iter))
        .run()?;

    let state = result.state();
    if matches!(
        state.get_termination_status(),
        TerminationStatus::Terminated(TerminationReason::MaxItersReached)
    ) {
        return Err(RootError::NotConverged {
            max_iter: opts.max_iter,
        });
    }
    state.get_best_param().copied().ok_or(RootError::MissingRoot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Convergence on smooth monotone and non-monotone objectives.
    // - Endpoint-root short circuits.
    // - Structured failures: invalid bracket, no sign change, non-finite
    //   endpoint evaluation, invalid options.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify convergence to an irrational root at default options.
    //
    // Given
    // -----
    // - f(x) = x^2 - 2 over (0, 2).
    //
    // Expect
    // ------
    // - The root sqrt(2) within 1e-9.
    fn converges_to_sqrt_two() {
        let root = find_root(|x| x * x - 2.0, (0.0, 2.0), &BrentOptions::default()).unwrap();
        assert_relative_eq!(root, 2.0f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Verify convergence on a transcendental objective spanning several
    // orders of magnitude, the shape of the halo layer's mean-density
    // equations.
    //
    // Given
    // -----
    // - f(x) = ln(x) + 1 over (1e-6, 10), root at 1/e.
    //
    // Expect
    // ------
    // - The root within 1e-9 relative error.
    fn converges_on_wide_log_bracket() {
        let root = find_root(|x: f64| x.ln() + 1.0, (1e-6, 10.0), &BrentOptions::default()).unwrap();
        assert_relative_eq!(root, (-1.0f64).exp(), max_relative = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Verify that an exact root at an endpoint is returned without
    // iterating.
    //
    // Given
    // -----
    // - f(x) = x over (0, 1) and over (-1, 0).
    //
    // Expect
    // ------
    // - Exactly 0.0 from both brackets.
    fn endpoint_root_short_circuits() {
        assert_eq!(find_root(|x| x, (0.0, 1.0), &BrentOptions::default()).unwrap(), 0.0);
        assert_eq!(find_root(|x| x, (-1.0, 0.0), &BrentOptions::default()).unwrap(), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a bracket without a sign change fails fast with the endpoint
    // values attached.
    //
    // Given
    // -----
    // - f(x) = x^2 - 2 over (2, 3), where f > 0 throughout.
    //
    // Expect
    // ------
    // - `RootError::NoSignChange` carrying both endpoint evaluations.
    fn missing_sign_change_is_reported() {
        let err = find_root(|x| x * x - 2.0, (2.0, 3.0), &BrentOptions::default()).unwrap_err();
        assert_eq!(
            err,
            RootError::NoSignChange {
                lower: 2.0,
                upper: 3.0,
                f_lower: 2.0,
                f_upper: 7.0,
            }
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure malformed brackets and non-finite endpoint evaluations are
    // rejected before the backend runs.
    //
    // Given
    // -----
    // - A reversed bracket, and an objective that is NaN at an endpoint.
    //
    // Expect
    // ------
    // - `InvalidBracket` and `NonFiniteEvaluation` respectively.
    fn malformed_inputs_are_rejected() {
        assert!(matches!(
            find_root(|x| x, (2.0, 1.0), &BrentOptions::default()),
            Err(RootError::InvalidBracket { .. })
        ));
        assert!(matches!(
            find_root(|x: f64| (x - 0.5).ln(), (0.0, 1.0), &BrentOptions::default()),
            Err(RootError::NonFiniteEvaluation { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify option validation.
    //
    // Given
    // -----
    // - Non-positive / non-finite tolerances and a zero iteration cap.
    //
    // Expect
    // ------
    // - Matching `RootError` variants; valid options construct.
    fn options_are_validated() {
        assert!(matches!(
            BrentOptions::new(0.0, 100),
            Err(RootError::InvalidTol { .. })
        ));
        assert!(matches!(
            BrentOptions::new(f64::NAN, 100),
            Err(RootError::InvalidTol { .. })
        ));
        assert!(matches!(
            BrentOptions::new(1e-12, 0),
            Err(RootError::InvalidMaxIter { .. })
        ));
        assert_eq!(
            BrentOptions::new(1e-10, 50).unwrap(),
            BrentOptions { tol: 1e-10, max_iter: 50 }
        );
    }
}
