//! Right-hand side `dy/dt = f(t, y)` as seen by the integrators.
use crate::error::PyrolysisError;
use RustedSciThe::symbolic::symbolic_engine::Expr;
use nalgebra::DVector;

pub trait OdeSystem {
    /// number of state variables
    fn ndim(&self) -> usize;

    /// names of the state variables in state-vector order
    fn variable_names(&self) -> Vec<String>;

    /// evaluates `f(t, y)` into `dydt`; may be called at any `t` inside the span
    fn rhs(&self, t: f64, y: &DVector<f64>, dydt: &mut DVector<f64>) -> Result<(), PyrolysisError>;

    /// fastest first-order rate constant at `t`, used by stability heuristics
    fn max_rate_constant(&self, _t: f64) -> Option<f64> {
        None
    }

    /// equations as symbolic expressions and the name of the time argument
    fn symbolic_rhs(&self) -> Result<(Vec<Expr>, String), PyrolysisError> {
        Err(PyrolysisError::invalid_configuration(
            "this system has no symbolic form",
        ))
    }
}

/// Adapter turning a closure into an [`OdeSystem`]
pub struct ClosureSystem<F>
where
    F: Fn(f64, &DVector<f64>) -> DVector<f64>,
{
    names: Vec<String>,
    f: F,
}

impl<F> ClosureSystem<F>
where
    F: Fn(f64, &DVector<f64>) -> DVector<f64>,
{
    pub fn new(names: Vec<String>, f: F) -> Self {
        Self { names, f }
    }
}

impl<F> OdeSystem for ClosureSystem<F>
where
    F: Fn(f64, &DVector<f64>) -> DVector<f64>,
{
    fn ndim(&self) -> usize {
        self.names.len()
    }

    fn variable_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn rhs(&self, t: f64, y: &DVector<f64>, dydt: &mut DVector<f64>) -> Result<(), PyrolysisError> {
        let value = (self.f)(t, y);
        if value.len() != dydt.len() {
            return Err(PyrolysisError::invalid_configuration(format!(
                "right-hand side returned {} values, expected {}",
                value.len(),
                dydt.len()
            )));
        }
        dydt.copy_from(&value);
        Ok(())
    }
}
