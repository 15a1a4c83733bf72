//! # Implicit integrators (RustedSciThe backend)
//!
//! Stiff runs (high temperature, fast wood decay next to slow tar cracking) can be handed to the
//! implicit solvers of RustedSciThe. The rate law is rendered as symbolic expressions, so the
//! backend builds its own analytic Jacobian.
//!
//! Solver parameters follow the RustedSciThe map convention:
//! `step_size`, `tolerance`, `max_iterations`, `rtol`, `atol`, `max_step`, ...
use super::integrators::{Integrator, check_problem};
use super::ode_system::OdeSystem;
use super::trajectory::Trajectory;
use crate::error::PyrolysisError;
use RustedSciThe::numerical::ODE_api2::{SolverParam, SolverType, UniversalODESolver};
use RustedSciThe::numerical::Radau::Radau_main::RadauOrder;
use log::info;
use nalgebra::DMatrix;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImplicitMethod {
    BDF,
    Radau,
    BackwardEuler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImplicitSolver {
    pub solver: ImplicitMethod,
    pub step_size: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
    pub rtol: f64,
    pub atol: f64,
    pub max_step: f64,
}

impl Default for ImplicitSolver {
    fn default() -> Self {
        Self {
            solver: ImplicitMethod::BDF,
            step_size: 1e-3,
            tolerance: 1e-4,
            max_iterations: 100_000,
            rtol: 1e-4,
            atol: 1e-7,
            max_step: 0.1,
        }
    }
}

impl ImplicitSolver {
    pub fn new(solver: ImplicitMethod) -> Self {
        Self {
            solver,
            ..Default::default()
        }
    }

    fn solver_type(&self) -> SolverType {
        match self.solver {
            ImplicitMethod::BDF => SolverType::BDF,
            ImplicitMethod::Radau => SolverType::Radau(RadauOrder::Order3),
            ImplicitMethod::BackwardEuler => SolverType::BackwardEuler,
        }
    }

    pub fn solver_params(&self) -> HashMap<String, SolverParam> {
        HashMap::from([
            ("step_size".to_owned(), SolverParam::Float(self.step_size)),
            ("tolerance".to_owned(), SolverParam::Float(self.tolerance)),
            (
                "max_iterations".to_owned(),
                SolverParam::Int(self.max_iterations as _),
            ),
            ("rtol".to_owned(), SolverParam::Float(self.rtol)),
            ("atol".to_owned(), SolverParam::Float(self.atol)),
            ("max_step".to_owned(), SolverParam::Float(self.max_step)),
            ("first_step".to_owned(), SolverParam::OptionalFloat(None)),
            ("vectorized".to_owned(), SolverParam::Bool(false)),
            ("jac_sparsity".to_owned(), SolverParam::OptionalMatrix(None)),
            ("parallel".to_owned(), SolverParam::Bool(false)),
        ])
    }
}

/// backend returns samples either as rows or as columns
fn orient(y: DMatrix<f64>, n_samples: usize, n_vars: usize) -> Result<DMatrix<f64>, PyrolysisError> {
    if y.nrows() == n_samples && y.ncols() == n_vars {
        Ok(y)
    } else if y.ncols() == n_samples && y.nrows() == n_vars {
        Ok(y.transpose())
    } else {
        Err(PyrolysisError::IntegrationFailure {
            t: 0.0,
            h: 0.0,
            reason: format!(
                "implicit solver returned a {}x{} matrix for {} samples of {} variables",
                y.nrows(),
                y.ncols(),
                n_samples,
                n_vars
            ),
        })
    }
}

impl Integrator for ImplicitSolver {
    fn integrate(
        &self,
        system: &dyn OdeSystem,
        y0: &DVector<f64>,
        t_span: (f64, f64),
    ) -> Result<Trajectory, PyrolysisError> {
        self.validate()?;
        check_problem(system, y0, t_span)?;
        let (equations, arg) = system.symbolic_rhs()?;
        let names = system.variable_names();
        let (t0, t_end) = t_span;

        let mut ode = UniversalODESolver::new(
            equations,
            names.clone(),
            arg,
            self.solver_type(),
            t0,
            y0.clone(),
            t_end,
        );
        ode.set_parameters(self.solver_params());
        ode.initialize();
        ode.solve();

        let (t, y) = ode.get_result();
        let failure = |reason: &str| PyrolysisError::IntegrationFailure {
            t: t0,
            h: self.step_size,
            reason: reason.to_string(),
        };
        let t = t.ok_or_else(|| failure("implicit solver returned no time mesh"))?;
        let y = y.ok_or_else(|| failure("implicit solver returned no solution"))?;
        if y.iter().any(|v| !v.is_finite()) {
            return Err(failure("implicit solver produced non-finite values"));
        }
        let y = orient(y, t.len(), names.len())?;
        info!(
            "{}: {} samples over [{}, {}]",
            self.method_name(),
            t.len(),
            t0,
            t_end
        );
        Trajectory::new(names, t, y)
    }

    fn validate(&self) -> Result<(), PyrolysisError> {
        for (name, value) in [
            ("step_size", self.step_size),
            ("tolerance", self.tolerance),
            ("rtol", self.rtol),
            ("atol", self.atol),
            ("max_step", self.max_step),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PyrolysisError::invalid_parameter(format!(
                    "{} must be finite and > 0, got {}",
                    name, value
                )));
            }
        }
        if self.max_iterations == 0 {
            return Err(PyrolysisError::invalid_parameter(
                "max_iterations must be > 0",
            ));
        }
        Ok(())
    }

    fn method_name(&self) -> String {
        format!("implicit {:?}", self.solver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orient_accepts_both_layouts() {
        let rows = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.5, 0.5, 0.2, 0.8]);
        assert_eq!(orient(rows.clone(), 3, 2).unwrap(), rows);
        assert_eq!(orient(rows.transpose(), 3, 2).unwrap(), rows);
        assert!(orient(rows, 4, 2).is_err());
    }

    #[test]
    fn test_solver_params_and_validation() {
        let solver = ImplicitSolver::new(ImplicitMethod::Radau);
        let params = solver.solver_params();
        assert!(params.contains_key("step_size"));
        assert!(params.contains_key("max_iterations"));
        assert!(solver.validate().is_ok());
        let mut bad = solver.clone();
        bad.rtol = 0.0;
        assert!(bad.validate().unwrap_err().is_invalid_parameter());
    }
}
