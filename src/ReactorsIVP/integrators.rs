//! # Interchangeable integrators
//!
//! Every time-stepping strategy implements [`Integrator`]:
//!
//! ```text
//! integrate(system, y0, (t0, t_end)) -> Trajectory
//! ```
//!
//! [`IntegratorEnum`] selects one of them by configuration, so the batch reactor and the tests do
//! not depend on a concrete stepper.
//!
//! | Variant | Method | Output times |
//! |---------|--------|--------------|
//! | `ForwardEuler` | explicit lagged Euler, constant `dt` | every `dt`, both ends included |
//! | `DormandPrince` | embedded RK 5(4) with step rejection | accepted steps |
//! | `Implicit` | BDF / Radau / Backward Euler from RustedSciThe | solver mesh |
use super::dormand_prince::DormandPrince45;
use super::forward_euler::ForwardEuler;
use super::implicit_solver::ImplicitSolver;
use super::ode_system::OdeSystem;
use super::trajectory::Trajectory;
use crate::error::PyrolysisError;
use enum_dispatch::enum_dispatch;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

#[enum_dispatch]
pub trait Integrator {
    /// integrates `system` from `y0` over `t_span`
    fn integrate(
        &self,
        system: &dyn OdeSystem,
        y0: &DVector<f64>,
        t_span: (f64, f64),
    ) -> Result<Trajectory, PyrolysisError>;
    /// checks the options of the integrator
    fn validate(&self) -> Result<(), PyrolysisError>;
    fn method_name(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[enum_dispatch(Integrator)]
#[serde(tag = "method")]
pub enum IntegratorEnum {
    ForwardEuler(ForwardEuler),
    DormandPrince(DormandPrince45),
    Implicit(ImplicitSolver),
}

impl Default for IntegratorEnum {
    fn default() -> Self {
        IntegratorEnum::DormandPrince(DormandPrince45::default())
    }
}

/// shape and span checks shared by all integrators
pub fn check_problem(
    system: &dyn OdeSystem,
    y0: &DVector<f64>,
    t_span: (f64, f64),
) -> Result<(), PyrolysisError> {
    if y0.len() != system.ndim() {
        return Err(PyrolysisError::invalid_configuration(format!(
            "initial state has {} entries, system has {}",
            y0.len(),
            system.ndim()
        )));
    }
    if y0.iter().any(|v| !v.is_finite()) {
        return Err(PyrolysisError::invalid_parameter(
            "initial state must be finite",
        ));
    }
    let (t0, t_end) = t_span;
    if !t0.is_finite() || !t_end.is_finite() {
        return Err(PyrolysisError::invalid_parameter(
            "time span must be finite",
        ));
    }
    if t_end <= t0 {
        return Err(PyrolysisError::invalid_parameter(format!(
            "time span must be increasing, got ({}, {})",
            t0, t_end
        )));
    }
    Ok(())
}
