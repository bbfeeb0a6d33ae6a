//! The NFW halo entity: profile evaluation and mass↔radius inversion.
//!
//! Purpose
//! -------
//! Tie a validated [`HaloConfig`] to a cosmology binding and expose the full
//! set of profile quantities — density, mean density, enclosed mass, surface
//! mass density Σ, differential surface density ΔΣ, projected (cylindrical)
//! mass — plus the inversions that locate radii and masses at arbitrary
//! overdensity thresholds.
//!
//! Key behaviors
//! -------------
//! - Derived geometry (`ρ_c`, `r_Δ`, `r_s`) is computed eagerly at
//!   construction and, for halos tracking the process-wide default
//!   cosmology, refreshed lazily on every accessor call whose version token
//!   is stale. Staleness always triggers a full `ρ_c → r_Δ → r_s`
//!   recompute.
//! - Every evaluation is a pure function of `(r, r_s, δ_c, ρ_c, c)` at the
//!   moment of the call; projected quantities route through the
//!   complex-continued inverse secant so radii on either side of the scale
//!   radius evaluate without leaving the API surface.
//! - Inversions (`radius_delta`, `mass_delta`, `concentration` at another
//!   threshold) solve `mean_density(r) = Δ·ρ_ref` with the bracketed Brent
//!   solver over `(1e-6, 10)` Mpc.
//!
//! Invariants & assumptions
//! ------------------------
//! - `r_s · c == r_Δ` after every recomputation.
//! - Radii are strictly positive: `r = 0` produces non-finite values
//!   (density diverges there physically), not errors. Exactly `r = r_s`
//!   (`x = 1`) is a removable singularity of the projected formulas and is
//!   special-cased to its analytic limit; see the operation docs.
//! - All arithmetic happens in canonical units (M_sun, Mpc, and densities
//!   derived from the two); unit resolution happens once per call at the
//!   boundary.
//!
//! Concurrency
//! -----------
//! - The geometry cache sits behind an `RwLock`, and the default-cosmology
//!   registry hands out `{Arc, version}` snapshots read under a single
//!   lock, so replacing the default from another thread while this halo is
//!   being read is well-defined: each operation resolves against exactly
//!   one snapshot. Lock poisoning is absorbed (`PoisonError::into_inner`);
//!   the cache holds only plain data.
use std::f64::consts::PI;
use std::fmt::Write as _;
use std::sync::{Arc, PoisonError, RwLock};

use ndarray::{Array1, ArrayView1};
use num_complex::Complex64;

use crate::cosmology::default;
use crate::cosmology::model::Cosmology;
use crate::halo::core::arcsec::arcsec;
use crate::halo::core::config::{HaloConfig, OverdensityType, SizeType};
use crate::halo::core::geometry::{
    compute_geometry, reference_density, CosmologyBinding, DerivedGeometry, GeometryCache,
};
use crate::halo::core::validation::validate_overdensity_factor;
use crate::halo::errors::HaloResult;
use crate::rootfind::brent::{find_root, BrentOptions};
use crate::units::{check_unit, Quantity, Unit, UnitInput};

/// Search bracket for overdensity-radius inversions, in Mpc.
///
/// Wide enough for any halo the mass range of interest produces (cluster
/// r_200 is O(1) Mpc) while keeping the lower end clear of the r -> 0
/// divergence of the mean density.
const RADIUS_BRACKET: (f64, f64) = (1e-6, 10.0);

/// Characteristic overdensity `δ_c` of an NFW profile.
///
/// `δ_c = Δ₀/3 · c³ / (ln(1+c) − c/(1+c))` — a cheap pure function of the
/// concentration and threshold, recomputed on demand rather than cached.
pub fn characteristic_overdensity(concentration: f64, overdensity: f64) -> f64 {
    let c = concentration;
    overdensity / 3.0 * c.powi(3) / ((1.0 + c).ln() - c / (1.0 + c))
}

/// An NFW dark-matter halo.
///
/// Construct with [`NFWHalo::new`] to track the process-wide default
/// cosmology, or [`NFWHalo::with_cosmology`] to pin an explicit model for
/// the halo's lifetime.
pub struct NFWHalo {
    config: HaloConfig,
    binding: CosmologyBinding,
    cache: RwLock<GeometryCache>,
}

impl std::fmt::Debug for NFWHalo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NFWHalo")
            .field("config", &self.config)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

impl NFWHalo {
    /// Construct a halo that tracks the process-wide default cosmology.
    ///
    /// The current default and its version are snapshotted once; derived
    /// geometry is computed eagerly and refreshed lazily whenever a later
    /// accessor observes a newer default version.
    ///
    /// Errors
    /// ------
    /// - Propagates geometry-derivation failures (unit mismatch or an
    ///   unusable critical density from the cosmology).
    pub fn new(config: HaloConfig) -> HaloResult<Self> {
        let handle = default::current_default();
        let geometry = compute_geometry(&config, handle.cosmology.as_ref())?;
        Ok(Self {
            config,
            binding: CosmologyBinding::Tracking,
            cache: RwLock::new(GeometryCache {
                geometry,
                version: handle.version,
            }),
        })
    }

    /// Construct a halo with an explicitly injected cosmology.
    ///
    /// Derived geometry is computed once here and never changes, regardless
    /// of later replacements of the process-wide default.
    pub fn with_cosmology(config: HaloConfig, cosmology: Arc<dyn Cosmology>) -> HaloResult<Self> {
        let geometry = compute_geometry(&config, cosmology.as_ref())?;
        Ok(Self {
            config,
            binding: CosmologyBinding::Fixed(cosmology),
            cache: RwLock::new(GeometryCache {
                geometry,
                version: 0,
            }),
        })
    }

    // ---- Cosmology binding and cached geometry -----------------------------

    /// A consistent `(geometry, cosmology)` snapshot for one operation.
    ///
    /// Tracking halos compare the cached version token against the default
    /// registry and, on mismatch, recompute the full geometry under the
    /// observed handle before returning it. Every public operation resolves
    /// exactly one snapshot so its internal steps cannot mix cosmologies.
    fn snapshot(&self) -> HaloResult<(DerivedGeometry, Arc<dyn Cosmology>)> {
        match &self.binding {
            CosmologyBinding::Fixed(cosmology) => {
                let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
                Ok((cache.geometry, Arc::clone(cosmology)))
            }
            CosmologyBinding::Tracking => {
                let handle = default::current_default();
                {
                    let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
                    if cache.version == handle.version {
                        return Ok((cache.geometry, handle.cosmology));
                    }
                }
                let geometry = compute_geometry(&self.config, handle.cosmology.as_ref())?;
                let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
                *cache = GeometryCache {
                    geometry,
                    version: handle.version,
                };
                Ok((geometry, handle.cosmology))
            }
        }
    }

    fn geometry(&self) -> HaloResult<DerivedGeometry> {
        self.snapshot().map(|(geometry, _)| geometry)
    }

    /// The cosmology this halo currently evaluates against.
    pub fn cosmology(&self) -> Arc<dyn Cosmology> {
        match &self.binding {
            CosmologyBinding::Fixed(cosmology) => Arc::clone(cosmology),
            CosmologyBinding::Tracking => default::current_default().cosmology,
        }
    }

    /// True if this halo tracks the process-wide default cosmology, false
    /// if the cosmology was fixed at construction.
    pub fn var_cosmology(&self) -> bool {
        matches!(self.binding, CosmologyBinding::Tracking)
    }

    // ---- Configuration accessors -------------------------------------------

    /// Halo concentration `c`.
    pub fn concentration_parameter(&self) -> f64 {
        self.config.concentration
    }

    /// Halo redshift `z`.
    pub fn redshift(&self) -> f64 {
        self.config.redshift
    }

    /// Construction overdensity threshold `Δ₀`.
    pub fn overdensity(&self) -> f64 {
        self.config.overdensity
    }

    /// Reference-density convention of `Δ₀`.
    pub fn overdensity_type(&self) -> OverdensityType {
        self.config.overdensity_type
    }

    /// How the construction size was interpreted.
    pub fn size_type(&self) -> SizeType {
        self.config.size_type
    }

    /// Characteristic overdensity `δ_c` of this halo.
    pub fn delta_c(&self) -> f64 {
        characteristic_overdensity(self.config.concentration, self.config.overdensity)
    }

    // ---- Derived-geometry accessors ----------------------------------------

    /// Critical density at the halo redshift, M_sun/Mpc^3.
    pub fn rho_c(&self) -> HaloResult<Quantity> {
        Ok(Quantity::new(self.geometry()?.rho_c, Unit::SolarMassPerMpc3))
    }

    /// Radius enclosing the construction overdensity, Mpc.
    pub fn r_delta(&self) -> HaloResult<Quantity> {
        Ok(Quantity::new(self.geometry()?.r_delta, Unit::Megaparsec))
    }

    /// NFW scale radius, Mpc.
    pub fn r_s(&self) -> HaloResult<Quantity> {
        Ok(Quantity::new(self.geometry()?.r_s, Unit::Megaparsec))
    }

    // ---- Scalar profile kernels (canonical units, pure) --------------------

    fn density_at(&self, r: f64, g: &DerivedGeometry) -> f64 {
        let x = r / g.r_s;
        g.rho_c * self.delta_c() / (x * (1.0 + x).powi(2))
    }

    fn mean_density_at(&self, r: f64, g: &DerivedGeometry) -> f64 {
        let x = r / g.r_s;
        3.0 * x.powi(-3) * self.delta_c() * g.rho_c * ((1.0 + x).ln() - x / (1.0 + x))
    }

    fn mass_at(&self, r: f64, g: &DerivedGeometry) -> f64 {
        let x = r / g.r_s;
        4.0 * PI * self.delta_c() * g.rho_c * g.r_s.powi(3) * ((1.0 + x).ln() - x / (1.0 + x))
    }

    fn sigma_at(&self, r: f64, g: &DerivedGeometry) -> f64 {
        let x = r / g.r_s;
        let prefactor = 2.0 * g.r_s * g.rho_c * self.delta_c();
        if x == 1.0 {
            // Analytic limit of the bracket below as x -> 1.
            return prefactor / 3.0;
        }
        let sqrt_x2m1 = Complex64::new(x * x - 1.0, 0.0).sqrt();
        let val1 = 1.0 / (x * x - 1.0);
        let val2 = (arcsec(x) / (sqrt_x2m1 * sqrt_x2m1 * sqrt_x2m1)).re;
        prefactor * (val1 - val2)
    }

    fn delta_sigma_at(&self, r: f64, g: &DerivedGeometry) -> f64 {
        let x = r / g.r_s;
        let prefactor = 2.0 * g.r_s * g.rho_c * self.delta_c();
        if x == 1.0 {
            // Analytic limit: 5/3 + 2 ln(1/2).
            return prefactor * (5.0 / 3.0 + 2.0 * 0.5f64.ln());
        }
        let sqrt_x2m1 = Complex64::new(x * x - 1.0, 0.0).sqrt();
        let val1 = 1.0 / (1.0 - x * x);
        let num = (3.0 * x * x - 2.0) * arcsec(x);
        let div = x * x * (sqrt_x2m1 * sqrt_x2m1 * sqrt_x2m1);
        let val2 = (num / div).re;
        let val3 = 2.0 * (x / 2.0).ln() / (x * x);
        prefactor * (val1 + val2 + val3)
    }

    /// `Re[arcsec(x) / sqrt(x² − 1)]`, the projected-mass kernel, with its
    /// removable singularity at `x = 1` filled by the analytic limit 1.
    fn projected_kernel(x: f64) -> f64 {
        if x == 1.0 {
            return 1.0;
        }
        let sqrt_x2m1 = Complex64::new(x * x - 1.0, 0.0).sqrt();
        (arcsec(x) / sqrt_x2m1).re
    }

    // ---- Profile evaluations ------------------------------------------------

    /// NFW density at radius `r`, M_sun/Mpc^3.
    ///
    /// Diverges physically as `r → 0`; the divergence propagates as an
    /// infinite value, not an error.
    pub fn density(&self, r: impl Into<UnitInput>) -> HaloResult<Quantity> {
        let g = self.geometry()?;
        let r = check_unit(r.into(), Unit::Megaparsec)?.value();
        Ok(Quantity::new(self.density_at(r, &g), Unit::SolarMassPerMpc3))
    }

    /// Mean density inside radius `r`, M_sun/Mpc^3.
    pub fn mean_density(&self, r: impl Into<UnitInput>) -> HaloResult<Quantity> {
        let g = self.geometry()?;
        let r = check_unit(r.into(), Unit::Megaparsec)?.value();
        Ok(Quantity::new(
            self.mean_density_at(r, &g),
            Unit::SolarMassPerMpc3,
        ))
    }

    /// Mass enclosed within radius `r`, M_sun.
    pub fn mass(&self, r: impl Into<UnitInput>) -> HaloResult<Quantity> {
        let g = self.geometry()?;
        let r = check_unit(r.into(), Unit::Megaparsec)?.value();
        Ok(Quantity::new(self.mass_at(r, &g), Unit::SolarMass))
    }

    /// Surface mass density Σ at projected radius `r`, M_sun/Mpc^2.
    ///
    /// Finite on both sides of the scale radius; exactly `r = r_s` returns
    /// the analytic limit `2·r_s·ρ_c·δ_c / 3`.
    pub fn sigma(&self, r: impl Into<UnitInput>) -> HaloResult<Quantity> {
        let g = self.geometry()?;
        let r = check_unit(r.into(), Unit::Megaparsec)?.value();
        Ok(Quantity::new(self.sigma_at(r, &g), Unit::SolarMassPerMpc2))
    }

    /// Differential surface density ΔΣ at projected radius `r`,
    /// M_sun/Mpc^2.
    ///
    /// Finite on both sides of the scale radius; exactly `r = r_s` returns
    /// the analytic limit `2·r_s·ρ_c·δ_c·(5/3 + 2·ln ½)`.
    pub fn delta_sigma(&self, r: impl Into<UnitInput>) -> HaloResult<Quantity> {
        let g = self.geometry()?;
        let r = check_unit(r.into(), Unit::Megaparsec)?.value();
        Ok(Quantity::new(
            self.delta_sigma_at(r, &g),
            Unit::SolarMassPerMpc2,
        ))
    }

    /// Mass inside an infinite cylinder of projected radius `r`, M_sun.
    ///
    /// Normalized by the overdensity mass at the construction threshold, so
    /// this evaluation performs one bracketed inversion.
    pub fn projected_mass(&self, r: impl Into<UnitInput>) -> HaloResult<Quantity> {
        let (g, cosmology) = self.snapshot()?;
        let r = check_unit(r.into(), Unit::Megaparsec)?.value();
        let x = r / g.r_s;
        let c = self.config.concentration;
        let f_c = (1.0 + c).ln() - c / (1.0 + c);
        let m_delta = self.mass_delta_at(
            &g,
            cosmology.as_ref(),
            self.config.overdensity,
            self.config.overdensity_type,
        )?;
        let m_proj = m_delta / f_c * ((x / 2.0).ln() + Self::projected_kernel(x));
        Ok(Quantity::new(m_proj, Unit::SolarMass))
    }

    // ---- Inversions ---------------------------------------------------------

    fn radius_delta_at(
        &self,
        g: &DerivedGeometry,
        cosmology: &dyn Cosmology,
        overdensity: f64,
        overdensity_type: OverdensityType,
    ) -> HaloResult<f64> {
        let overdensity = validate_overdensity_factor(overdensity)?;
        let rho_ref = reference_density(
            g.rho_c,
            overdensity_type,
            self.config.redshift,
            cosmology,
        );
        let target = overdensity * rho_ref;
        let root = find_root(
            |r| self.mean_density_at(r, g) - target,
            RADIUS_BRACKET,
            &BrentOptions::default(),
        )?;
        Ok(root)
    }

    fn mass_delta_at(
        &self,
        g: &DerivedGeometry,
        cosmology: &dyn Cosmology,
        overdensity: f64,
        overdensity_type: OverdensityType,
    ) -> HaloResult<f64> {
        let r = self.radius_delta_at(g, cosmology, overdensity, overdensity_type)?;
        Ok(self.mass_at(r, g))
    }

    /// Radius at which the mean enclosed density equals
    /// `overdensity · ρ_ref`, Mpc.
    ///
    /// Parameters
    /// ----------
    /// - `overdensity`: threshold Δ; must be finite and > 0.
    /// - `overdensity_type`: reference-density convention; defaults to the
    ///   halo's own when `None`.
    ///
    /// Errors
    /// ------
    /// - `HaloError::InvalidOverdensity` for an inadmissible threshold.
    /// - `HaloError::ConvergenceFailed` when the `(1e-6, 10)` Mpc bracket
    ///   contains no sign change or the 100-iteration budget is exhausted;
    ///   recoverable by the caller with a different threshold.
    pub fn radius_delta(
        &self,
        overdensity: f64,
        overdensity_type: Option<OverdensityType>,
    ) -> HaloResult<Quantity> {
        let (g, cosmology) = self.snapshot()?;
        let od_type = overdensity_type.unwrap_or(self.config.overdensity_type);
        let r = self.radius_delta_at(&g, cosmology.as_ref(), overdensity, od_type)?;
        Ok(Quantity::new(r, Unit::Megaparsec))
    }

    /// Mass enclosed within [`radius_delta`](Self::radius_delta), M_sun.
    pub fn mass_delta(
        &self,
        overdensity: f64,
        overdensity_type: Option<OverdensityType>,
    ) -> HaloResult<Quantity> {
        let (g, cosmology) = self.snapshot()?;
        let od_type = overdensity_type.unwrap_or(self.config.overdensity_type);
        let m = self.mass_delta_at(&g, cosmology.as_ref(), overdensity, od_type)?;
        Ok(Quantity::new(m, Unit::SolarMass))
    }

    /// Concentration at an arbitrary overdensity threshold.
    ///
    /// With both arguments `None` this returns the stored concentration.
    /// Otherwise it returns `radius_delta(Δ, type) / r_s` — the
    /// concentration the halo would have if redefined at that threshold. A
    /// missing `Δ` with a supplied type falls back to the construction
    /// threshold evaluated under the requested convention.
    pub fn concentration(
        &self,
        overdensity: Option<f64>,
        overdensity_type: Option<OverdensityType>,
    ) -> HaloResult<f64> {
        if overdensity.is_none() && overdensity_type.is_none() {
            return Ok(self.config.concentration);
        }
        let (g, cosmology) = self.snapshot()?;
        let delta = overdensity.unwrap_or(self.config.overdensity);
        let od_type = overdensity_type.unwrap_or(self.config.overdensity_type);
        let r = self.radius_delta_at(&g, cosmology.as_ref(), delta, od_type)?;
        Ok(r / g.r_s)
    }

    // ---- Vectorized evaluations ---------------------------------------------

    /// [`density`](Self::density) over an array of radii in Mpc.
    pub fn density_profile(&self, radii: ArrayView1<'_, f64>) -> HaloResult<Array1<f64>> {
        let g = self.geometry()?;
        Ok(radii.mapv(|r| self.density_at(r, &g)))
    }

    /// [`mean_density`](Self::mean_density) over an array of radii in Mpc.
    pub fn mean_density_profile(&self, radii: ArrayView1<'_, f64>) -> HaloResult<Array1<f64>> {
        let g = self.geometry()?;
        Ok(radii.mapv(|r| self.mean_density_at(r, &g)))
    }

    /// [`mass`](Self::mass) over an array of radii in Mpc.
    pub fn mass_profile(&self, radii: ArrayView1<'_, f64>) -> HaloResult<Array1<f64>> {
        let g = self.geometry()?;
        Ok(radii.mapv(|r| self.mass_at(r, &g)))
    }

    /// [`sigma`](Self::sigma) over an array of projected radii in Mpc.
    pub fn sigma_profile(&self, radii: ArrayView1<'_, f64>) -> HaloResult<Array1<f64>> {
        let g = self.geometry()?;
        Ok(radii.mapv(|r| self.sigma_at(r, &g)))
    }

    /// [`delta_sigma`](Self::delta_sigma) over an array of projected radii
    /// in Mpc.
    pub fn delta_sigma_profile(&self, radii: ArrayView1<'_, f64>) -> HaloResult<Array1<f64>> {
        let g = self.geometry()?;
        Ok(radii.mapv(|r| self.delta_sigma_at(r, &g)))
    }

    // ---- Diagnostics --------------------------------------------------------

    /// Human-readable report of masses and radii at Δ = 200, 500, 2500.
    ///
    /// Diagnostic only; the exact formatting is not part of the numeric
    /// contract.
    pub fn summary(&self) -> HaloResult<String> {
        let mut out = format!(
            "NFW halo with concentration {:.2} at redshift {:.2}:\n\n",
            self.config.concentration, self.config.redshift
        );
        for delta in [200.0, 500.0, 2500.0] {
            let mass = self.mass_delta(delta, None)?.value();
            let radius = self.radius_delta(delta, None)?.value();
            let _ = writeln!(
                out,
                "M_{delta:.0} = {mass:.2e} M_sun\tr_{delta:.0} = {radius:.2} Mpc"
            );
        }
        Ok(out)
    }
}

impl std::fmt::Display for NFWHalo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.summary() {
            Ok(report) => f.write_str(&report),
            Err(err) => write!(f, "NFW halo (diagnostics unavailable: {err})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmology::flat_lcdm::FlatLambdaCDM;
    use crate::cosmology::set_default;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Profile formulas against closed forms and known limits.
    // - Inversion round trips and monotonicity.
    // - The x = 1 limiting-value policy and finiteness across the scale
    //   radius.
    // - Fixed vs tracking cosmology semantics.
    //
    // Conventions
    // -----------
    // - Every value-asserting test pins its cosmology with `with_cosmology`
    //   so results do not depend on the process-wide default. The single
    //   test that mutates the default is `tracking_halo_follows_default_swap`;
    //   no other test in this binary calls `set_default`, so parallel test
    //   threads cannot race on the slot.
    // -------------------------------------------------------------------------

    fn make_cosmology() -> Arc<FlatLambdaCDM> {
        Arc::new(FlatLambdaCDM::new(70.0, 0.3).unwrap())
    }

    fn make_halo() -> NFWHalo {
        let config = HaloConfig::new(
            1e14,
            SizeType::Mass,
            5.0,
            0.3,
            200.0,
            OverdensityType::Critical,
        )
        .unwrap();
        NFWHalo::with_cosmology(config, make_cosmology()).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify the geometry invariant and the concrete construction scenario
    // against the closed cube-root form.
    //
    // Given
    // -----
    // - M = 1e14 M_sun, c = 5, z = 0.3, Δ₀ = 200 critical, fixed flat ΛCDM
    //   (H0 = 70, Ω_m0 = 0.3).
    //
    // Expect
    // ------
    // - r_200 = (3M / (4π·200·ρ_c(0.3)))^(1/3), inside a 0.5–1.5 Mpc
    //   sanity window, and r_s = r_200 / 5 with r_s·c = r_200.
    fn construction_scenario_matches_closed_form() {
        let halo = make_halo();
        let cosmo = make_cosmology();
        let rho_c = cosmo.critical_density(0.3).value();
        let expected_r200 = (3.0 * 1e14 / (4.0 * PI * 200.0 * rho_c)).cbrt();

        let r_delta = halo.r_delta().unwrap().value();
        let r_s = halo.r_s().unwrap().value();
        assert_relative_eq!(r_delta, expected_r200, max_relative = 1e-12);
        assert!(r_delta > 0.5 && r_delta < 1.5);
        assert_relative_eq!(r_s, r_delta / 5.0, max_relative = 1e-12);
        assert_relative_eq!(r_s * 5.0, r_delta, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify that δ_c matches its closed form and increases strictly with
    // concentration at fixed Δ₀.
    //
    // Given
    // -----
    // - Δ₀ = 200 and a grid of concentrations 1..15.
    //
    // Expect
    // ------
    // - δ_c(5, 200) matches a direct evaluation; δ_c is strictly
    //   increasing along the grid.
    fn characteristic_overdensity_is_monotone_in_concentration() {
        let direct = 200.0 / 3.0 * 125.0 / (6.0f64.ln() - 5.0 / 6.0);
        assert_relative_eq!(characteristic_overdensity(5.0, 200.0), direct, max_relative = 1e-12);

        let mut previous = 0.0;
        for i in 1..=15 {
            let c = f64::from(i);
            let value = characteristic_overdensity(c, 200.0);
            assert!(value > previous, "delta_c not increasing at c = {c}");
            previous = value;
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the mean-density inversion round trip at several thresholds
    // and the monotonicity of the recovered radii.
    //
    // Given
    // -----
    // - The reference halo; Δ in {200, 500, 2500} (critical).
    //
    // Expect
    // ------
    // - mean_density(radius_delta(Δ)) = Δ·ρ_c within 1e-6 relative error.
    // - r_200 > r_500 > r_2500.
    // - mass(radius_delta(Δ)) = mass_delta(Δ) to near machine precision.
    fn radius_inversion_round_trips() {
        let halo = make_halo();
        let rho_c = halo.rho_c().unwrap().value();

        let mut previous = f64::INFINITY;
        for delta in [200.0, 500.0, 2500.0] {
            let r = halo.radius_delta(delta, None).unwrap().value();
            assert!(r < previous, "radius_delta not decreasing at delta = {delta}");
            previous = r;

            let recovered = halo.mean_density(r).unwrap().value();
            assert_relative_eq!(recovered, delta * rho_c, max_relative = 1e-6);

            let mass_via_radius = halo.mass(r).unwrap().value();
            let mass_direct = halo.mass_delta(delta, None).unwrap().value();
            assert_relative_eq!(mass_via_radius, mass_direct, max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the halo recovers its own construction mass and that a
    // mean-typed query at the same threshold yields a larger radius.
    //
    // Given
    // -----
    // - The reference halo (defined at Δ₀ = 200 critical).
    //
    // Expect
    // ------
    // - mass_delta(200) = 1e14 within the root-finder tolerance.
    // - radius_delta(200) matches the r_delta accessor.
    // - radius_delta(200, Mean) > radius_delta(200, Critical).
    // - concentration() returns the stored c; concentration(500) < c.
    fn inversions_are_consistent_with_construction() {
        let halo = make_halo();
        assert_relative_eq!(
            halo.mass_delta(200.0, None).unwrap().value(),
            1e14,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            halo.radius_delta(200.0, None).unwrap().value(),
            halo.r_delta().unwrap().value(),
            max_relative = 1e-6
        );

        let r_mean = halo
            .radius_delta(200.0, Some(OverdensityType::Mean))
            .unwrap()
            .value();
        assert!(r_mean > halo.radius_delta(200.0, None).unwrap().value());

        assert_eq!(halo.concentration(None, None).unwrap(), 5.0);
        let c500 = halo.concentration(Some(500.0), None).unwrap();
        assert!(c500 > 0.0 && c500 < 5.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the density limits at both ends of the radial range.
    //
    // Given
    // -----
    // - The reference halo; r = 1e-8 Mpc and r = 1e4 Mpc.
    //
    // Expect
    // ------
    // - density(1e-8) > 1e18 (divergence toward r = 0).
    // - density(1e4) < 1e2 (decay at large radius).
    fn density_diverges_at_zero_and_decays_at_infinity() {
        let halo = make_halo();
        assert!(halo.density(1e-8).unwrap().value() > 1e18);
        assert!(halo.density(1e4).unwrap().value() < 1e2);
    }

    #[test]
    // Purpose
    // -------
    // Verify the projected quantities straddling the scale radius and the
    // x = 1 limiting-value policy.
    //
    // Given
    // -----
    // - The reference halo; r = 0.5·r_s, r_s, and 2·r_s.
    //
    // Expect
    // ------
    // - sigma and delta_sigma are finite and positive at x = 0.5 and
    //   x = 2.0 despite the intermediate complex arithmetic.
    // - sigma(r_s) equals the analytic limit 2·r_s·ρ_c·δ_c/3 and
    //   delta_sigma(r_s) equals 2·r_s·ρ_c·δ_c·(5/3 + 2 ln ½).
    // - The complex-branch values approach the limits as x -> 1 from both
    //   sides.
    fn projected_quantities_cross_the_scale_radius() {
        let halo = make_halo();
        let r_s = halo.r_s().unwrap().value();
        let prefactor = 2.0 * r_s * halo.rho_c().unwrap().value() * halo.delta_c();

        for &x in &[0.5, 2.0] {
            let sigma = halo.sigma(x * r_s).unwrap().value();
            let delta_sigma = halo.delta_sigma(x * r_s).unwrap().value();
            assert!(sigma.is_finite() && sigma > 0.0, "sigma at x = {x}");
            assert!(
                delta_sigma.is_finite() && delta_sigma > 0.0,
                "delta_sigma at x = {x}"
            );
        }

        let sigma_limit = prefactor / 3.0;
        let delta_sigma_limit = prefactor * (5.0 / 3.0 + 2.0 * 0.5f64.ln());
        assert_relative_eq!(halo.sigma(r_s).unwrap().value(), sigma_limit, max_relative = 1e-12);
        assert_relative_eq!(
            halo.delta_sigma(r_s).unwrap().value(),
            delta_sigma_limit,
            max_relative = 1e-12
        );

        for &x in &[1.0 - 1e-6, 1.0 + 1e-6] {
            assert_relative_eq!(
                halo.sigma(x * r_s).unwrap().value(),
                sigma_limit,
                max_relative = 1e-3
            );
            assert_relative_eq!(
                halo.delta_sigma(x * r_s).unwrap().value(),
                delta_sigma_limit,
                max_relative = 1e-3
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the projected (cylindrical) mass against its 3-D counterpart
    // and its x = 1 kernel limit.
    //
    // Given
    // -----
    // - The reference halo; projected radii r_200 and r_s.
    //
    // Expect
    // ------
    // - projected_mass(r_200) exceeds mass(r_200): the cylinder contains
    //   the sphere.
    // - projected_mass(r_s) = M_Δ/f_c · (1 + ln ½), finite and positive.
    fn projected_mass_exceeds_spherical_mass() {
        let halo = make_halo();
        let r200 = halo.radius_delta(200.0, None).unwrap().value();
        let m_sphere = halo.mass(r200).unwrap().value();
        let m_cyl = halo.projected_mass(r200).unwrap().value();
        assert!(m_cyl > m_sphere);

        let r_s = halo.r_s().unwrap().value();
        let c = halo.concentration_parameter();
        let f_c = (1.0 + c).ln() - c / (1.0 + c);
        let expected = halo.mass_delta(200.0, None).unwrap().value() / f_c * (1.0 + 0.5f64.ln());
        assert_relative_eq!(
            halo.projected_mass(r_s).unwrap().value(),
            expected,
            max_relative = 1e-9
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that tagged inputs in non-canonical units resolve to the same
    // values as raw canonical inputs, and that wrong dimensions fail.
    //
    // Given
    // -----
    // - The reference halo; r = 0.5 Mpc vs 500 kpc, and a mass-tagged
    //   radius argument.
    //
    // Expect
    // ------
    // - Identical density values for the two radii representations.
    // - `HaloError::UnitMismatch` for the mass-tagged argument.
    fn radius_inputs_accept_tagged_units() {
        let halo = make_halo();
        let raw = halo.density(0.5).unwrap().value();
        let tagged = halo
            .density(Quantity::new(500.0, Unit::Kiloparsec))
            .unwrap()
            .value();
        assert_relative_eq!(raw, tagged, max_relative = 1e-12);

        assert!(matches!(
            halo.density(Quantity::new(1.0, Unit::SolarMass)),
            Err(crate::halo::errors::HaloError::UnitMismatch { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify the vectorized evaluations agree with their scalar
    // counterparts elementwise.
    //
    // Given
    // -----
    // - The reference halo; radii [0.1, 0.5, 1.0] Mpc.
    //
    // Expect
    // ------
    // - density_profile and sigma_profile match scalar calls at every
    //   element.
    fn vectorized_profiles_match_scalar_calls() {
        let halo = make_halo();
        let radii = array![0.1, 0.5, 1.0];

        let densities = halo.density_profile(radii.view()).unwrap();
        let sigmas = halo.sigma_profile(radii.view()).unwrap();
        for (i, &r) in radii.iter().enumerate() {
            assert_relative_eq!(
                densities[i],
                halo.density(r).unwrap().value(),
                max_relative = 1e-15
            );
            assert_relative_eq!(sigmas[i], halo.sigma(r).unwrap().value(), max_relative = 1e-15);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the diagnostic summary lists the three conventional
    // thresholds.
    //
    // Given
    // -----
    // - The reference halo.
    //
    // Expect
    // ------
    // - The report names M_200, M_500, M_2500 and the matching radii, and
    //   `Display` produces the same text.
    fn summary_reports_conventional_thresholds() {
        let halo = make_halo();
        let report = halo.summary().unwrap();
        for needle in ["M_200", "M_500", "M_2500", "r_200", "r_500", "r_2500", "Mpc"] {
            assert!(report.contains(needle), "missing {needle} in:\n{report}");
        }
        assert_eq!(report, halo.to_string());
    }

    #[test]
    // Purpose
    // -------
    // Verify tracking semantics end to end. This is the only test in this
    // binary that mutates the process-wide default cosmology.
    //
    // Given
    // -----
    // - A tracking halo constructed after installing H0 = 70, and a fixed
    //   halo pinned to the same model.
    // - The default is then replaced with H0 = 60 (lower critical
    //   density).
    //
    // Expect
    // ------
    // - `set_default` bumps the registry version.
    // - The tracking halo's ρ_c drops and r_Δ grows on the next access,
    //   with c, z, and the geometry invariant preserved.
    // - The fixed halo's geometry is bit-identical before and after.
    fn tracking_halo_follows_default_swap() {
        let config = HaloConfig::new(
            1e14,
            SizeType::Mass,
            5.0,
            0.3,
            200.0,
            OverdensityType::Critical,
        )
        .unwrap();

        let before_version = set_default(Arc::new(FlatLambdaCDM::new(70.0, 0.3).unwrap()));
        let tracking = NFWHalo::new(config).unwrap();
        let fixed = NFWHalo::with_cosmology(config, make_cosmology()).unwrap();
        assert!(tracking.var_cosmology());
        assert!(!fixed.var_cosmology());

        let rho_before = tracking.rho_c().unwrap().value();
        let r_delta_before = tracking.r_delta().unwrap().value();
        let fixed_before = fixed.r_delta().unwrap().value();

        let after_version = set_default(Arc::new(FlatLambdaCDM::new(60.0, 0.3).unwrap()));
        assert!(after_version > before_version);

        let rho_after = tracking.rho_c().unwrap().value();
        let r_delta_after = tracking.r_delta().unwrap().value();
        let r_s_after = tracking.r_s().unwrap().value();

        assert!(rho_after < rho_before);
        assert!(r_delta_after > r_delta_before);
        assert_relative_eq!(r_s_after * 5.0, r_delta_after, max_relative = 1e-12);
        assert_eq!(tracking.concentration_parameter(), 5.0);
        assert_eq!(tracking.redshift(), 0.3);
        assert_eq!(tracking.overdensity_type(), OverdensityType::Critical);

        assert_eq!(fixed.r_delta().unwrap().value(), fixed_before);
    }
}
