//! Analytic continuation of the inverse secant.
//!
//! The projected NFW formulas contain `arcsec(x) / sqrt(x^2 - 1)`-shaped
//! terms with `x = r / r_s`. For `x < 1` both factors leave the reals, but
//! their combination stays physically meaningful: evaluating
//! `arcsec(x) = pi/2 + i ln(sqrt(1 - 1/x^2) + i/x)` over the principal
//! complex branch and taking the real part of the full expression at the
//! call site reproduces the closed lensing formulas on both sides of the
//! scale radius.
//!
//! `x = 1` is a removable singularity of `arcsec` itself (the value is 0)
//! but not of the downstream quotients, which also divide by powers of
//! `x^2 - 1`; callers handle `x = 1` as a separate analytic limit.
use num_complex::Complex64;
use std::f64::consts::FRAC_PI_2;

/// Inverse secant of a complex argument over the principal branch.
pub fn arcsec_complex(z: Complex64) -> Complex64 {
    let val1 = Complex64::i() / z;
    let val2 = (Complex64::new(1.0, 0.0) - Complex64::new(1.0, 0.0) / (z * z)).sqrt();
    Complex64::new(FRAC_PI_2, 0.0) + Complex64::i() * (val2 + val1).ln()
}

/// Inverse secant of a real argument, continued over the complex plane.
///
/// For `x > 1` the result is real up to rounding; for `0 < x < 1` it is
/// genuinely complex and only the real part of the enclosing expression is
/// physical.
pub fn arcsec(x: f64) -> Complex64 {
    arcsec_complex(Complex64::new(x, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_3;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Real values for x > 1 against closed forms.
    // - The complex branch for 0 < x < 1.
    // - The removable point x = 1.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the real branch: arcsec(2) = pi/3 with negligible imaginary
    // part.
    //
    // Given
    // -----
    // - x = 2.
    //
    // Expect
    // ------
    // - Re = pi/3 within 1e-12; |Im| < 1e-12.
    fn real_branch_matches_closed_form() {
        let v = arcsec(2.0);
        assert_relative_eq!(v.re, FRAC_PI_3, epsilon = 1e-12);
        assert!(v.im.abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify the complex branch: arcsec(1/2) = i * ln(2 + sqrt(3)).
    //
    // Given
    // -----
    // - x = 0.5.
    //
    // Expect
    // ------
    // - |Re| < 1e-12; Im = ln(2 + sqrt(3)) within 1e-12.
    fn complex_branch_is_purely_imaginary_below_one() {
        let v = arcsec(0.5);
        assert!(v.re.abs() < 1e-12);
        assert_relative_eq!(v.im, (2.0 + 3.0f64.sqrt()).ln(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify the removable point: arcsec(1) = 0.
    //
    // Given
    // -----
    // - x = 1.
    //
    // Expect
    // ------
    // - Both parts vanish to machine precision.
    fn value_at_one_is_zero() {
        let v = arcsec(1.0);
        assert!(v.re.abs() < 1e-15);
        assert!(v.im.abs() < 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Verify sec(arcsec(x)) = x across both branches via the cosine of the
    // complex result.
    //
    // Given
    // -----
    // - x in {0.3, 0.5, 1.5, 2.0, 10.0}.
    //
    // Expect
    // ------
    // - 1 / cos(arcsec(x)) recovers x within 1e-10.
    fn secant_round_trip_holds_on_both_branches() {
        for &x in &[0.3, 0.5, 1.5, 2.0, 10.0] {
            let v = arcsec(x);
            let sec = (Complex64::new(1.0, 0.0) / v.cos()).re;
            assert_relative_eq!(sec, x, max_relative = 1e-10);
        }
    }
}
