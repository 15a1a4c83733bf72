//! # Pyrolysis task files
//!
//! A task is a JSON document describing one batch-reactor solve. Every field is optional and
//! falls back to the five-pathway run at 773 K:
//!
//! ```json
//! {
//!   "problem_name": "Liden 1988",
//!   "scheme": { "scheme": "TheoreticalYield",
//!               "parameters": [ {"A": 1.0e13, "E": 183.3}, {"A": 4.28e6, "E": 107.5} ],
//!               "phi_star": 0.703 },
//!   "temperature": { "profile": "Constant", "T": 773.15 },
//!   "initial_state": { "form": "WoodMassFraction" },
//!   "t_span": [0.0, 25.0],
//!   "integrator": { "method": "DormandPrince", "rtol": 1e-3, "atol": 1e-6 },
//!   "fixed_carbon": 0.14
//! }
//! ```
//! Temperature profiles: `Constant {T}`, `LinearRamp {T0, heating_rate}`.
//! Initial states: `WoodDensity {rho}`, `WoodMassFraction`, `Explicit {values}`.
//! Integrators: `ForwardEuler {dt}`, `DormandPrince {rtol, atol, first_step, h_min, h_max,
//! max_steps}`, `Implicit {solver, step_size, tolerance, max_iterations, rtol, atol, max_step}`.
use crate::Kinetics::arrhenius::R_KJ;
use crate::Kinetics::kinetic_schemes::KineticScheme;
use crate::Kinetics::rate_law::TemperatureProfile;
use crate::ReactorsIVP::batch_reactor::{InitialState, PyrolysisReactor};
use crate::ReactorsIVP::integrators::IntegratorEnum;
use crate::error::PyrolysisError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PyrolysisTask {
    pub problem_name: Option<String>,
    pub scheme: KineticScheme,
    pub temperature: TemperatureProfile,
    pub initial_state: InitialState,
    pub t_span: (f64, f64),
    pub integrator: IntegratorEnum,
    /// [kJ/(mol K)]
    pub gas_constant: f64,
    pub fixed_carbon: Option<f64>,
    pub conservation_tolerance: f64,
    /// rows of the printed trajectory tables
    pub print_rows: usize,
}

impl Default for PyrolysisTask {
    fn default() -> Self {
        Self {
            problem_name: None,
            scheme: KineticScheme::chan_blasi(),
            temperature: TemperatureProfile::constant(773.0),
            initial_state: InitialState::WoodDensity { rho: 700.0 },
            t_span: (0.0, 25.0),
            integrator: IntegratorEnum::default(),
            gas_constant: R_KJ,
            fixed_carbon: None,
            conservation_tolerance: 1e-6,
            print_rows: 20,
        }
    }
}

impl PyrolysisTask {
    pub fn from_json_str(json: &str) -> Result<Self, PyrolysisError> {
        let task: PyrolysisTask = serde_json::from_str(json)?;
        Ok(task)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PyrolysisError> {
        let path = path.as_ref();
        info!("reading pyrolysis task from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            warn!("cannot read task file {}: {}", path.display(), e);
            e
        })?;
        let task = Self::from_json_str(&content).map_err(|e| {
            warn!("task file {} is not a valid pyrolysis task: {}", path.display(), e);
            e
        })?;
        info!(
            "task {:?}: {} scheme over [{}, {}] s",
            task.problem_name,
            task.scheme.name(),
            task.t_span.0,
            task.t_span.1
        );
        Ok(task)
    }

    pub fn to_json_string(&self) -> Result<String, PyrolysisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PyrolysisError> {
        fs::write(path.as_ref(), self.to_json_string()?)?;
        info!("task written to {}", path.as_ref().display());
        Ok(())
    }

    /// configured, validated reactor ready for `solve()`
    pub fn into_reactor(self) -> Result<PyrolysisReactor, PyrolysisError> {
        let mut reactor = PyrolysisReactor::new(self.integrator);
        reactor.problem_name = self.problem_name;
        reactor.set_scheme(self.scheme);
        reactor.set_temperature(self.temperature);
        reactor.set_initial_state(self.initial_state);
        reactor.set_time_span(self.t_span.0, self.t_span.1)?;
        reactor.set_gas_constant(self.gas_constant)?;
        reactor.set_fixed_carbon(self.fixed_carbon);
        reactor.set_conservation_tolerance(self.conservation_tolerance)?;
        reactor.check_task()?;
        Ok(reactor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kinetics::kinetic_schemes::LIDEN_PHI_STAR;
    use crate::ReactorsIVP::forward_euler::ForwardEuler;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LIDEN_TASK: &str = r#"{
        "problem_name": "Liden 1988",
        "scheme": { "scheme": "TheoreticalYield",
                    "parameters": [ {"A": 1.0e13, "E": 183.3}, {"A": 4.28e6, "E": 107.5} ],
                    "phi_star": 0.703 },
        "temperature": { "profile": "Constant", "T": 773.15 },
        "initial_state": { "form": "WoodMassFraction" },
        "t_span": [0.0, 25.0],
        "integrator": { "method": "DormandPrince", "rtol": 1e-3, "atol": 1e-6 },
        "fixed_carbon": 0.14
    }"#;

    #[test]
    fn test_empty_task_uses_defaults() {
        let task = PyrolysisTask::from_json_str("{}").unwrap();
        assert_eq!(task, PyrolysisTask::default());
        assert_eq!(task.scheme, KineticScheme::chan_blasi());
    }

    #[test]
    fn test_liden_task_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LIDEN_TASK.as_bytes()).unwrap();
        let task = PyrolysisTask::from_file(file.path()).unwrap();
        assert_eq!(task.scheme, KineticScheme::liden_1988(LIDEN_PHI_STAR));
        assert_eq!(task.fixed_carbon, Some(0.14));
        assert_eq!(task.initial_state, InitialState::WoodMassFraction);
        match &task.integrator {
            IntegratorEnum::DormandPrince(dp) => {
                assert_eq!(dp.rtol, 1e-3);
                assert_eq!(dp.max_steps, 100_000);
            }
            other => panic!("unexpected integrator {:?}", other),
        }
        let mut reactor = task.into_reactor().unwrap();
        let result = reactor.solve().unwrap();
        assert!(result.conservation.passed);
        assert!(result.split.is_some());
    }

    #[test]
    fn test_save_and_reload() {
        let mut task = PyrolysisTask::default();
        task.integrator = ForwardEuler::new(0.05).into();
        task.temperature = TemperatureProfile::LinearRamp {
            T0: 300.0,
            heating_rate: 20.0,
        };
        let file = NamedTempFile::new().unwrap();
        task.save(file.path()).unwrap();
        let reloaded = PyrolysisTask::from_file(file.path()).unwrap();
        assert_eq!(reloaded, task);

        let file = NamedTempFile::new().unwrap();
        PyrolysisTask::default().save(file.path()).unwrap();
        assert_eq!(
            PyrolysisTask::from_file(file.path()).unwrap(),
            PyrolysisTask::default()
        );
    }

    #[test]
    fn test_bad_tasks() {
        assert!(matches!(
            PyrolysisTask::from_json_str("{\"t_span\": 3}"),
            Err(PyrolysisError::Serde(_))
        ));
        assert!(PyrolysisTask::from_json_str("{\"temprature\": 3}").is_err());
        assert!(matches!(
            PyrolysisTask::from_file("/nonexistent/dir/task.json"),
            Err(PyrolysisError::Io(_))
        ));
        let task = PyrolysisTask::from_json_str(r#"{"t_span": [10.0, 1.0]}"#).unwrap();
        assert!(task.into_reactor().unwrap_err().is_invalid_parameter());
        let task =
            PyrolysisTask::from_json_str(r#"{"temperature": {"profile": "Constant", "T": -1.0}}"#)
                .unwrap();
        assert!(task.into_reactor().is_err());
    }
}
