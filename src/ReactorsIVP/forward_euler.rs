//! # Fixed-step explicit integrator
//!
//! Lagged forward difference: rates are taken at the previous sample and
//!
//! ```text
//! y[i] = y[i-1] + f(t[i-1], y[i-1]) * dt
//! ```
//!
//! The number of samples is `ceil((t_end - t0)/dt) + 1`; when the span is not a multiple of `dt`
//! the last step is shortened so the final sample lands exactly on `t_end`.
//!
//! First order and conditionally stable. `dt` comparable to `1/max(k)` gives oscillating or
//! negative concentrations; choosing `dt` is up to the caller. At `t0` the integrator evaluates
//! `dt * max(k)` and attaches a [`StabilityWarning`] (also logged) when it exceeds 1, the solve
//! itself goes on.
use super::integrators::{Integrator, check_problem};
use super::ode_system::OdeSystem;
use super::trajectory::{StabilityWarning, Trajectory};
use crate::error::PyrolysisError;
use log::{info, warn};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardEuler {
    /// time step [s]
    pub dt: f64,
}

impl Default for ForwardEuler {
    fn default() -> Self {
        Self { dt: 0.01 }
    }
}

impl ForwardEuler {
    pub fn new(dt: f64) -> Self {
        Self { dt }
    }

    /// number of steps covering `span`, tolerant to round-off in `span/dt`
    pub fn number_of_steps(&self, span: f64) -> usize {
        let raw = span / self.dt;
        let rounded = raw.round();
        if (raw - rounded).abs() <= 1e-9 * rounded.max(1.0) {
            rounded as usize
        } else {
            raw.ceil() as usize
        }
    }

    /// heuristic `dt * max(k) > 1` check at time `t`
    pub fn stability_check(&self, system: &dyn OdeSystem, t: f64) -> Option<StabilityWarning> {
        let k_max = system.max_rate_constant(t)?;
        let warning = StabilityWarning {
            dt: self.dt,
            max_rate_constant: k_max,
        };
        if warning.criterion() > 1.0 {
            Some(warning)
        } else {
            None
        }
    }
}

impl Integrator for ForwardEuler {
    fn integrate(
        &self,
        system: &dyn OdeSystem,
        y0: &DVector<f64>,
        t_span: (f64, f64),
    ) -> Result<Trajectory, PyrolysisError> {
        self.validate()?;
        check_problem(system, y0, t_span)?;
        let (t0, t_end) = t_span;
        let span = t_end - t0;
        let n_steps = self.number_of_steps(span).max(1);
        let n = system.ndim();

        let mut warnings = Vec::new();
        if let Some(warning) = self.stability_check(system, t0) {
            warn!("forward Euler: {}", warning);
            warnings.push(warning);
        }

        let mut t = DVector::zeros(n_steps + 1);
        let mut y = DMatrix::zeros(n_steps + 1, n);
        t[0] = t0;
        y.set_row(0, &y0.transpose());

        let mut state = y0.clone();
        let mut rate = DVector::zeros(n);
        for i in 1..=n_steps {
            let t_prev = t[i - 1];
            let t_next = if i == n_steps {
                t_end
            } else {
                t0 + i as f64 * self.dt
            };
            system.rhs(t_prev, &state, &mut rate)?;
            state.axpy(t_next - t_prev, &rate, 1.0);
            t[i] = t_next;
            y.set_row(i, &state.transpose());
        }
        info!(
            "forward Euler: {} steps of {:.3e} s over [{}, {}]",
            n_steps, self.dt, t0, t_end
        );
        Ok(Trajectory::new(system.variable_names(), t, y)?.with_warnings(warnings))
    }

    fn validate(&self) -> Result<(), PyrolysisError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(PyrolysisError::invalid_parameter(format!(
                "time step must be positive, got dt = {}",
                self.dt
            )));
        }
        Ok(())
    }

    fn method_name(&self) -> String {
        format!("forward Euler (dt = {:.3e} s)", self.dt)
    }
}
