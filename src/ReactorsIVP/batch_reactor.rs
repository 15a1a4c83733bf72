//! # Batch reactor of wood pyrolysis
//!
//! Zero-dimensional, well-mixed reactor at a prescribed temperature. Orchestrates one solve:
//! scheme → reaction network → rate law → integrator → trajectory → post-processing.
//!
//! ## Usage Pattern
//! 1. `new()` with an integrator
//! 2. `set_scheme()`, `set_temperature()`, `set_initial_state()`, `set_time_span()`
//! 3. optional: `set_fixed_carbon()`, `set_gas_constant()`, `set_conservation_tolerance()`
//! 4. `solve()` (runs `check_task()` first)
//! 5. `result()` / `pretty_print_result()`
//!
//! ```rust, ignore
//! let mut reactor = PyrolysisReactor::new(ForwardEuler::new(0.01).into());
//! reactor.set_scheme(KineticScheme::chan_blasi());
//! reactor.set_temperature(TemperatureProfile::constant(773.0));
//! reactor.set_initial_state(InitialState::WoodDensity { rho: 700.0 });
//! reactor.set_time_span(0.0, 25.0)?;
//! let result = reactor.solve()?;
//! ```
//!
//! Every solve starts from the configured inputs only; a failed solve leaves no result behind.
use super::integrators::{Integrator, IntegratorEnum};
use super::post_processing::{
    ConservationReport, LumpedSplit, check_conservation, normalize, split_lumped, totals,
};
use super::trajectory::Trajectory;
use crate::Kinetics::arrhenius::{R_KJ, check_gas_constant};
use crate::Kinetics::kinetic_schemes::{CHAR, GAS, KineticScheme, WOOD};
use crate::Kinetics::rate_law::{RateLaw, TemperatureProfile};
use crate::error::PyrolysisError;
use log::info;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Composition at t = 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form")]
pub enum InitialState {
    /// density form: only wood, `rho` kg/m³
    WoodDensity { rho: f64 },
    /// mass-fraction form: only wood, fraction 1
    WoodMassFraction,
    /// explicit state vector in scheme species order
    Explicit { values: Vec<f64> },
}

impl InitialState {
    /// state vector for a scheme with `species` (wood first in every scheme)
    pub fn to_vector(&self, species: &[String]) -> Result<DVector<f64>, PyrolysisError> {
        let n = species.len();
        let wood_only = |amount: f64| -> Result<DVector<f64>, PyrolysisError> {
            let j = species.iter().position(|s| s == WOOD).ok_or_else(|| {
                PyrolysisError::invalid_configuration("scheme has no wood species")
            })?;
            let mut y0 = DVector::zeros(n);
            y0[j] = amount;
            Ok(y0)
        };
        let y0 = match self {
            InitialState::WoodDensity { rho } => {
                if !rho.is_finite() || *rho <= 0.0 {
                    return Err(PyrolysisError::invalid_parameter(format!(
                        "wood density must be positive, got {}",
                        rho
                    )));
                }
                wood_only(*rho)?
            }
            InitialState::WoodMassFraction => wood_only(1.0)?,
            InitialState::Explicit { values } => {
                if values.len() != n {
                    return Err(PyrolysisError::invalid_configuration(format!(
                        "initial state has {} entries, scheme has species {:?}",
                        values.len(),
                        species
                    )));
                }
                DVector::from_vec(values.clone())
            }
        };
        if y0.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(PyrolysisError::invalid_parameter(
                "initial state entries must be finite and non-negative",
            ));
        }
        if y0.sum() <= 0.0 {
            return Err(PyrolysisError::invalid_parameter(
                "initial state must contain some material",
            ));
        }
        Ok(y0)
    }
}

/// Everything one solve produces
#[derive(Debug, Clone, PartialEq)]
pub struct PyrolysisResult {
    /// raw integrator output, in the units of the initial state
    pub trajectory: Trajectory,
    /// trajectory divided by the initial total
    pub normalized: Trajectory,
    /// normalised trajectory with the lumped product split into gas and char
    pub split: Option<Trajectory>,
    /// sum over species at every sample of the raw trajectory
    pub totals: DVector<f64>,
    pub conservation: ConservationReport,
    pub split_conservation: Option<ConservationReport>,
}

impl PyrolysisResult {
    /// the most detailed dimensionless trajectory available
    pub fn fractions(&self) -> &Trajectory {
        self.split.as_ref().unwrap_or(&self.normalized)
    }
}

#[derive(Debug, Clone)]
pub struct PyrolysisReactor {
    pub problem_name: Option<String>,
    pub(crate) scheme: Option<KineticScheme>,
    pub(crate) temperature: Option<TemperatureProfile>,
    pub(crate) initial_state: Option<InitialState>,
    pub(crate) t_span: (f64, f64),
    /// gas constant for the Arrhenius exponent [kJ/(mol K)]
    pub(crate) gas_constant: f64,
    /// fixed-carbon fraction used to split the lumped product
    pub(crate) fixed_carbon: Option<f64>,
    /// relative tolerance of the mass-balance check
    pub(crate) conservation_tolerance: f64,
    pub(crate) integrator: IntegratorEnum,
    result: Option<PyrolysisResult>,
}

impl PyrolysisReactor {
    pub fn new(integrator: IntegratorEnum) -> Self {
        Self {
            problem_name: None,
            scheme: None,
            temperature: None,
            initial_state: None,
            t_span: (0.0, 0.0),
            gas_constant: R_KJ,
            fixed_carbon: None,
            conservation_tolerance: 1e-6,
            integrator,
            result: None,
        }
    }

    pub fn set_scheme(&mut self, scheme: KineticScheme) {
        self.scheme = Some(scheme);
        self.result = None;
    }

    pub fn set_temperature(&mut self, temperature: TemperatureProfile) {
        self.temperature = Some(temperature);
        self.result = None;
    }

    pub fn set_initial_state(&mut self, initial_state: InitialState) {
        self.initial_state = Some(initial_state);
        self.result = None;
    }

    pub fn set_time_span(&mut self, t0: f64, t_end: f64) -> Result<(), PyrolysisError> {
        if !t0.is_finite() || !t_end.is_finite() || t_end <= t0 {
            return Err(PyrolysisError::invalid_parameter(format!(
                "time span must be finite and increasing, got ({}, {})",
                t0, t_end
            )));
        }
        self.t_span = (t0, t_end);
        self.result = None;
        Ok(())
    }

    pub fn set_integrator(&mut self, integrator: IntegratorEnum) {
        self.integrator = integrator;
        self.result = None;
    }

    pub fn set_gas_constant(&mut self, gas_constant: f64) -> Result<(), PyrolysisError> {
        check_gas_constant(gas_constant)?;
        self.gas_constant = gas_constant;
        self.result = None;
        Ok(())
    }

    pub fn set_fixed_carbon(&mut self, fixed_carbon: Option<f64>) {
        self.fixed_carbon = fixed_carbon;
        self.result = None;
    }

    pub fn set_conservation_tolerance(&mut self, tolerance: f64) -> Result<(), PyrolysisError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(PyrolysisError::invalid_parameter(
                "conservation tolerance must be > 0",
            ));
        }
        self.conservation_tolerance = tolerance;
        self.result = None;
        Ok(())
    }

    pub fn integrator(&self) -> &IntegratorEnum {
        &self.integrator
    }

    pub fn scheme(&self) -> Option<&KineticScheme> {
        self.scheme.as_ref()
    }

    /// Validates that every piece of the task is set and physical.
    pub fn check_task(&self) -> Result<(), PyrolysisError> {
        let scheme = self
            .scheme
            .as_ref()
            .ok_or_else(|| PyrolysisError::invalid_configuration("kinetic scheme not set"))?;
        scheme.validate()?;
        let temperature = self
            .temperature
            .as_ref()
            .ok_or_else(|| PyrolysisError::invalid_configuration("temperature not set"))?;
        if self.t_span.1 <= self.t_span.0 {
            return Err(PyrolysisError::invalid_configuration("time span not set"));
        }
        temperature.validate_over(self.t_span)?;
        let initial_state = self
            .initial_state
            .as_ref()
            .ok_or_else(|| PyrolysisError::invalid_configuration("initial state not set"))?;
        initial_state.to_vector(&scheme.species())?;
        check_gas_constant(self.gas_constant)?;
        if self.fixed_carbon.is_some() && scheme.lumped_species().is_none() {
            return Err(PyrolysisError::invalid_configuration(format!(
                "fixed-carbon split requested but the {} scheme has no lumped product",
                scheme.name()
            )));
        }
        self.lumped_split()?;
        self.integrator.validate()?;
        Ok(())
    }

    /// rate law of the configured scheme and temperature, checked over the time span
    pub fn rate_law(&self) -> Result<RateLaw, PyrolysisError> {
        let scheme = self
            .scheme
            .as_ref()
            .ok_or_else(|| PyrolysisError::invalid_configuration("kinetic scheme not set"))?;
        let temperature = self
            .temperature
            .clone()
            .ok_or_else(|| PyrolysisError::invalid_configuration("temperature not set"))?;
        temperature.validate_over(self.t_span)?;
        RateLaw::new(scheme.build_network(self.gas_constant)?, temperature)
    }

    fn lumped_split(&self) -> Result<Option<LumpedSplit>, PyrolysisError> {
        match (
            self.fixed_carbon,
            self.scheme.as_ref().and_then(|s| s.phi_star()),
        ) {
            (Some(fc), Some(phi_star)) => Ok(Some(LumpedSplit::new(fc, phi_star)?)),
            _ => Ok(None),
        }
    }

    /// Runs the integrator and the post-processing. Failures leave no result behind.
    pub fn solve(&mut self) -> Result<&PyrolysisResult, PyrolysisError> {
        self.result = None;
        self.check_task()?;
        let scheme = self
            .scheme
            .as_ref()
            .ok_or_else(|| PyrolysisError::invalid_configuration("kinetic scheme not set"))?;
        let rate_law = self.rate_law()?;
        let y0 = self
            .initial_state
            .as_ref()
            .ok_or_else(|| PyrolysisError::invalid_configuration("initial state not set"))?
            .to_vector(&scheme.species())?;
        info!(
            "solving {} scheme with {} over [{}, {}] s",
            scheme.name(),
            self.integrator.method_name(),
            self.t_span.0,
            self.t_span.1
        );
        let trajectory = self.integrator.integrate(&rate_law, &y0, self.t_span)?;

        let normalized = normalize(&trajectory)?;
        let conservation = check_conservation(&trajectory, self.conservation_tolerance);
        let split = match (self.lumped_split()?, scheme.lumped_species()) {
            (Some(split), Some(lumped)) => {
                Some(split_lumped(&normalized, lumped, GAS, CHAR, &split)?)
            }
            _ => None,
        };
        let split_conservation = split
            .as_ref()
            .map(|s| check_conservation(s, self.conservation_tolerance));
        info!(
            "{} samples, final time {} s, mass balance {}",
            trajectory.len(),
            trajectory.final_time(),
            if conservation.passed { "closed" } else { "violated" }
        );
        let result = PyrolysisResult {
            totals: totals(&trajectory),
            trajectory,
            normalized,
            split,
            conservation,
            split_conservation,
        };
        Ok(self.result.insert(result))
    }

    pub fn result(&self) -> Option<&PyrolysisResult> {
        self.result.as_ref()
    }
}
