//! # Adaptive Dormand–Prince 5(4) integrator
//!
//! Explicit embedded Runge–Kutta pair: the 5th-order solution advances the state (local
//! extrapolation), the difference to the embedded 4th-order solution estimates the local error.
//! A step is accepted when the scaled RMS error
//!
//! ```text
//! err = sqrt( mean_i ( e_i / (atol + rtol * max(|y_i|, |y_new_i|)) )^2 )
//! ```
//!
//! is at most 1; otherwise it is retried with a smaller step. The new step is
//! `h * clamp(0.9 * err^(-1/5), 0.2, 10)`, never growing right after a rejection.
//! The last stage is evaluated at the accepted point and reused as the first stage of the next
//! step (FSAL).
//!
//! The solve aborts with `IntegrationFailure` when the step would drop below `h_min`, when
//! `max_steps` attempts are used up before `t_end`, or when the state turns non-finite. No partial
//! trajectory is returned in that case.
//!
//! Defaults (`rtol = 1e-3`, `atol = 1e-6`) match the usual RK45 defaults of general-purpose
//! IVP libraries.
use super::integrators::{Integrator, check_problem};
use super::ode_system::OdeSystem;
use super::trajectory::Trajectory;
use crate::error::PyrolysisError;
use log::{debug, info};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

// nodes
const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// 5th-order weights
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// 5th minus embedded 4th-order weights
const E1: f64 = B1 - 5179.0 / 57600.0;
const E3: f64 = B3 - 7571.0 / 16695.0;
const E4: f64 = B4 - 393.0 / 640.0;
const E5: f64 = B5 - (-92097.0 / 339200.0);
const E6: f64 = B6 - 187.0 / 2100.0;
const E7: f64 = -1.0 / 40.0;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;
const ERROR_EXPONENT: f64 = -1.0 / 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DormandPrince45 {
    pub rtol: f64,
    pub atol: f64,
    /// initial step, chosen automatically when `None`
    pub first_step: Option<f64>,
    /// smallest step the controller may use before giving up
    pub h_min: f64,
    /// largest step, unbounded when `None`
    pub h_max: Option<f64>,
    /// upper bound on attempted (accepted + rejected) steps
    pub max_steps: usize,
}

impl Default for DormandPrince45 {
    fn default() -> Self {
        Self {
            rtol: 1e-3,
            atol: 1e-6,
            first_step: None,
            h_min: 1e-12,
            h_max: None,
            max_steps: 100_000,
        }
    }
}

fn rms_norm(v: &DVector<f64>, scale: &DVector<f64>) -> f64 {
    let n = v.len().max(1) as f64;
    (v.iter()
        .zip(scale.iter())
        .map(|(x, s)| (x / s) * (x / s))
        .sum::<f64>()
        / n)
        .sqrt()
}

impl DormandPrince45 {
    pub fn new(rtol: f64, atol: f64) -> Self {
        Self {
            rtol,
            atol,
            ..Default::default()
        }
    }

    pub fn with_step_bounds(mut self, h_min: f64, h_max: f64) -> Self {
        self.h_min = h_min;
        self.h_max = Some(h_max);
        self
    }

    pub fn with_first_step(mut self, first_step: f64) -> Self {
        self.first_step = Some(first_step);
        self
    }

    fn max_step(&self) -> f64 {
        self.h_max.unwrap_or(f64::INFINITY)
    }

    fn scale(&self, y: &DVector<f64>) -> DVector<f64> {
        y.map(|v| self.atol + self.rtol * v.abs())
    }

    /// starting step from the magnitudes of y0, f(y0) and a finite-difference second derivative
    fn initial_step(
        &self,
        system: &dyn OdeSystem,
        t0: f64,
        y0: &DVector<f64>,
        f0: &DVector<f64>,
        span: f64,
    ) -> Result<f64, PyrolysisError> {
        if let Some(h) = self.first_step {
            return Ok(h.min(span));
        }
        let scale = self.scale(y0);
        let d0 = rms_norm(y0, &scale);
        let d1 = rms_norm(f0, &scale);
        let h0 = if d0 < 1e-5 || d1 < 1e-5 {
            1e-6
        } else {
            0.01 * d0 / d1
        };
        let h0 = h0.min(span);
        let y1 = y0 + f0 * h0;
        let mut f1 = DVector::zeros(y0.len());
        system.rhs(t0 + h0, &y1, &mut f1)?;
        let d2 = rms_norm(&(&f1 - f0), &scale) / h0;
        let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
            (h0 * 1e-3).max(1e-6)
        } else {
            (0.01 / d1.max(d2)).powf(1.0 / 5.0)
        };
        Ok((100.0 * h0).min(h1).min(span).min(self.max_step()).max(self.h_min))
    }
}

impl Integrator for DormandPrince45 {
    fn integrate(
        &self,
        system: &dyn OdeSystem,
        y0: &DVector<f64>,
        t_span: (f64, f64),
    ) -> Result<Trajectory, PyrolysisError> {
        self.validate()?;
        check_problem(system, y0, t_span)?;
        let (t0, t_end) = t_span;
        let n = system.ndim();

        let mut t = t0;
        let mut y = y0.clone();
        let mut k1 = DVector::zeros(n);
        system.rhs(t, &y, &mut k1)?;
        let mut h = self.initial_step(system, t0, y0, &k1, t_end - t0)?;

        let mut times = vec![t0];
        let mut states = vec![y0.clone()];

        let mut k2 = DVector::zeros(n);
        let mut k3 = DVector::zeros(n);
        let mut k4 = DVector::zeros(n);
        let mut k5 = DVector::zeros(n);
        let mut k6 = DVector::zeros(n);
        let mut k7 = DVector::zeros(n);

        let mut attempts = 0usize;
        let mut rejected = 0usize;
        let mut step_rejected = false;
        while t < t_end {
            if attempts >= self.max_steps {
                return Err(PyrolysisError::IntegrationFailure {
                    t,
                    h,
                    reason: format!("max_steps = {} exceeded", self.max_steps),
                });
            }
            attempts += 1;

            h = h.min(self.max_step());
            if h < self.h_min {
                return Err(PyrolysisError::IntegrationFailure {
                    t,
                    h,
                    reason: format!(
                        "required step is below h_min = {:.3e} (rtol = {:.1e}, atol = {:.1e})",
                        self.h_min, self.rtol, self.atol
                    ),
                });
            }
            let last = t + h >= t_end;
            if last {
                h = t_end - t;
            }

            let y2 = &y + &k1 * (h * A21);
            system.rhs(t + C2 * h, &y2, &mut k2)?;
            let y3 = &y + (&k1 * A31 + &k2 * A32) * h;
            system.rhs(t + C3 * h, &y3, &mut k3)?;
            let y4 = &y + (&k1 * A41 + &k2 * A42 + &k3 * A43) * h;
            system.rhs(t + C4 * h, &y4, &mut k4)?;
            let y5 = &y + (&k1 * A51 + &k2 * A52 + &k3 * A53 + &k4 * A54) * h;
            system.rhs(t + C5 * h, &y5, &mut k5)?;
            let y6 = &y + (&k1 * A61 + &k2 * A62 + &k3 * A63 + &k4 * A64 + &k5 * A65) * h;
            system.rhs(t + h, &y6, &mut k6)?;
            let y_new = &y + (&k1 * B1 + &k3 * B3 + &k4 * B4 + &k5 * B5 + &k6 * B6) * h;
            system.rhs(t + h, &y_new, &mut k7)?;

            let local_error =
                (&k1 * E1 + &k3 * E3 + &k4 * E4 + &k5 * E5 + &k6 * E6 + &k7 * E7) * h;
            let scale = y.zip_map(&y_new, |a, b| self.atol + self.rtol * a.abs().max(b.abs()));
            let err = rms_norm(&local_error, &scale);

            if !err.is_finite() || y_new.iter().any(|v| !v.is_finite()) {
                return Err(PyrolysisError::IntegrationFailure {
                    t,
                    h,
                    reason: "state or error estimate is not finite".to_string(),
                });
            }

            if err <= 1.0 {
                let mut factor = if err == 0.0 {
                    MAX_FACTOR
                } else {
                    (SAFETY * err.powf(ERROR_EXPONENT)).min(MAX_FACTOR)
                };
                if step_rejected {
                    factor = factor.min(1.0);
                }
                t = if last { t_end } else { t + h };
                y = y_new;
                std::mem::swap(&mut k1, &mut k7);
                times.push(t);
                states.push(y.clone());
                h *= factor;
                step_rejected = false;
            } else {
                let factor = (SAFETY * err.powf(ERROR_EXPONENT)).max(MIN_FACTOR);
                debug!(
                    "Dormand-Prince: step h = {:.3e} at t = {:.6e} rejected (err = {:.3e})",
                    h, t, err
                );
                h *= factor;
                rejected += 1;
                step_rejected = true;
            }
        }
        info!(
            "Dormand-Prince: {} accepted, {} rejected steps over [{}, {}]",
            times.len() - 1,
            rejected,
            t0,
            t_end
        );
        Ok(Trajectory::from_samples(system.variable_names(), times, &states)?
            .with_rejected_steps(rejected))
    }

    fn validate(&self) -> Result<(), PyrolysisError> {
        if !self.rtol.is_finite() || self.rtol <= 0.0 {
            return Err(PyrolysisError::invalid_parameter("rtol must be finite and > 0"));
        }
        if !self.atol.is_finite() || self.atol <= 0.0 {
            return Err(PyrolysisError::invalid_parameter("atol must be finite and > 0"));
        }
        if !self.h_min.is_finite() || self.h_min < 0.0 {
            return Err(PyrolysisError::invalid_parameter("h_min must be finite and >= 0"));
        }
        if !(self.max_step() > self.h_min) {
            return Err(PyrolysisError::invalid_parameter("h_max must exceed h_min"));
        }
        if let Some(h) = self.first_step {
            if !h.is_finite() || h <= 0.0 {
                return Err(PyrolysisError::invalid_parameter("first_step must be > 0"));
            }
        }
        if self.max_steps == 0 {
            return Err(PyrolysisError::invalid_parameter("max_steps must be > 0"));
        }
        Ok(())
    }

    fn method_name(&self) -> String {
        format!(
            "Dormand-Prince 5(4) (rtol = {:.1e}, atol = {:.1e})",
            self.rtol, self.atol
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReactorsIVP::ode_system::ClosureSystem;
    use approx::assert_relative_eq;

    fn decay_chain() -> ClosureSystem<impl Fn(f64, &DVector<f64>) -> DVector<f64>> {
        // a -> b -> c with k1 = 2, k2 = 0.5
        ClosureSystem::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            |_t, y| DVector::from_vec(vec![-2.0 * y[0], 2.0 * y[0] - 0.5 * y[1], 0.5 * y[1]]),
        )
    }

    fn exact_chain(t: f64) -> (f64, f64) {
        let a = (-2.0 * t).exp();
        let b = 2.0 / (2.0 - 0.5) * ((-0.5 * t).exp() - (-2.0 * t).exp());
        (a, b)
    }

    #[test]
    fn test_matches_analytic_solution() {
        let solver = DormandPrince45::new(1e-8, 1e-10);
        let y0 = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let traj = solver.integrate(&decay_chain(), &y0, (0.0, 5.0)).unwrap();
        assert_eq!(traj.final_time(), 5.0);
        for (t, state) in traj.samples() {
            let (a, b) = exact_chain(t);
            assert_relative_eq!(state[0], a, epsilon = 1e-6);
            assert_relative_eq!(state[1], b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_times_strictly_increasing_and_total_conserved() {
        let solver = DormandPrince45::default();
        let y0 = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let traj = solver.integrate(&decay_chain(), &y0, (0.0, 10.0)).unwrap();
        assert!(traj.len() > 2);
        assert!(traj.t.as_slice().windows(2).all(|w| w[1] > w[0]));
        for (_, state) in traj.samples() {
            assert_relative_eq!(state.sum(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tighter_tolerance_takes_more_steps() {
        let y0 = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let coarse = DormandPrince45::new(1e-3, 1e-6)
            .integrate(&decay_chain(), &y0, (0.0, 5.0))
            .unwrap();
        let fine = DormandPrince45::new(1e-9, 1e-12)
            .integrate(&decay_chain(), &y0, (0.0, 5.0))
            .unwrap();
        assert!(fine.len() > coarse.len());
    }

    #[test]
    fn test_oversized_first_step_is_retried() {
        let solver = DormandPrince45::new(1e-8, 1e-10).with_first_step(4.0);
        let y0 = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let traj = solver.integrate(&decay_chain(), &y0, (0.0, 5.0)).unwrap();
        assert!(traj.rejected_steps > 0);
        assert_eq!(traj.t[0], 0.0);
        assert!(traj.t[1] < 4.0);
        assert_eq!(traj.final_time(), 5.0);
        for (t, state) in traj.samples() {
            let (a, b) = exact_chain(t);
            assert_relative_eq!(state[0], a, epsilon = 1e-6);
            assert_relative_eq!(state[1], b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_fails_when_step_falls_below_minimum() {
        let solver = DormandPrince45::new(1e-12, 1e-14).with_step_bounds(1.0, f64::INFINITY);
        let y0 = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let err = solver
            .integrate(&decay_chain(), &y0, (0.0, 20.0))
            .unwrap_err();
        assert!(err.is_integration_failure());
    }

    #[test]
    fn test_fails_when_step_budget_is_exhausted() {
        let mut solver = DormandPrince45::new(1e-10, 1e-12);
        solver.max_steps = 3;
        let y0 = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let err = solver
            .integrate(&decay_chain(), &y0, (0.0, 20.0))
            .unwrap_err();
        assert!(err.is_integration_failure());
    }

    #[test]
    fn test_invalid_options() {
        let y0 = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        assert!(
            DormandPrince45::new(0.0, 1e-6)
                .integrate(&decay_chain(), &y0, (0.0, 1.0))
                .unwrap_err()
                .is_invalid_parameter()
        );
        assert!(
            DormandPrince45::new(1e-3, -1.0)
                .integrate(&decay_chain(), &y0, (0.0, 1.0))
                .is_err()
        );
        assert!(
            DormandPrince45::default()
                .integrate(&decay_chain(), &y0, (2.0, 1.0))
                .is_err()
        );
    }

    #[test]
    fn test_evaluates_rhs_at_intermediate_times() {
        // dy/dt = cos(t) only integrates correctly if stages see their own t
        let system = ClosureSystem::new(vec!["y".to_string()], |t, _y| {
            DVector::from_vec(vec![t.cos()])
        });
        let y0 = DVector::from_vec(vec![0.0]);
        let traj = DormandPrince45::new(1e-9, 1e-12)
            .integrate(&system, &y0, (0.0, 3.0))
            .unwrap();
        assert_relative_eq!(traj.final_state()[0], 3.0_f64.sin(), epsilon = 1e-7);
    }
}
