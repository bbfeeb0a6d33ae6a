//! Adapter exposing a plain scalar closure to the `argmin` solver machinery.
//!
//! `argmin` drives problems through its [`CostFunction`] trait; the root
//! solver only ever needs a scalar `f(x)`, so this adapter wraps any
//! `Fn(f64) -> f64` without further ceremony. Objective evaluations are
//! infallible at this layer; finiteness at the bracket endpoints is checked
//! by the runner before the solver starts.
use argmin::core::{CostFunction, Error};

/// Wrap a scalar function as an argmin problem.
pub struct ScalarAdapter<F> {
    f: F,
}

impl<F> ScalarAdapter<F>
where
    F: Fn(f64) -> f64,
{
    /// Wrap `f` for consumption by an argmin solver.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> CostFunction for ScalarAdapter<F>
where
    F: Fn(f64) -> f64,
{
    type Param = f64;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, Error> {
        Ok((self.f)(*param))
    }
}
