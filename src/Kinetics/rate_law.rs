//! # Rate-law evaluator
//!
//! Binds a [`ReactionNetwork`] to a temperature history and exposes it to the integrators as an
//! [`OdeSystem`]. For a constant temperature the rate constants are computed once, at
//! construction; for a heating ramp `T(t) = T0 + β*t` they are recomputed at every evaluation,
//! because adaptive steppers probe arbitrary intermediate times.
use super::arrhenius::check_temperature;
use super::reaction_network::ReactionNetwork;
use crate::ReactorsIVP::ode_system::OdeSystem;
use crate::error::PyrolysisError;
use RustedSciThe::symbolic::symbolic_engine::Expr;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Reactor temperature [K] as a function of time [s]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "profile")]
#[allow(non_snake_case)]
pub enum TemperatureProfile {
    Constant { T: f64 },
    /// T(t) = T0 + heating_rate * t
    LinearRamp { T0: f64, heating_rate: f64 },
}

impl TemperatureProfile {
    pub fn constant(T: f64) -> Self {
        TemperatureProfile::Constant { T }
    }

    pub fn at(&self, t: f64) -> f64 {
        match self {
            TemperatureProfile::Constant { T } => *T,
            TemperatureProfile::LinearRamp { T0, heating_rate } => T0 + heating_rate * t,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, TemperatureProfile::Constant { .. })
    }

    /// temperature must stay positive on the whole span; a ramp is linear so the ends suffice
    pub fn validate_over(&self, t_span: (f64, f64)) -> Result<(), PyrolysisError> {
        check_temperature(self.at(t_span.0))?;
        check_temperature(self.at(t_span.1))?;
        if let TemperatureProfile::LinearRamp { heating_rate, .. } = self {
            if !heating_rate.is_finite() {
                return Err(PyrolysisError::invalid_parameter(
                    "heating rate must be finite",
                ));
            }
        }
        Ok(())
    }

    /// temperature as a symbolic expression of the time variable `arg`
    pub fn symbolic(&self, arg: &str) -> Expr {
        match self {
            TemperatureProfile::Constant { T } => Expr::Const(*T),
            TemperatureProfile::LinearRamp { T0, heating_rate } => {
                Expr::Const(*T0) + Expr::Var(arg.to_owned()) * Expr::Const(*heating_rate)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RateLaw {
    network: ReactionNetwork,
    temperature: TemperatureProfile,
    /// rate constants for a constant temperature
    cached: Option<Vec<f64>>,
}

impl RateLaw {
    /// Fails with `InvalidParameter` on non-physical kinetics or a non-positive constant temperature.
    /// A ramp is only checked against a time span, see [`TemperatureProfile::validate_over`].
    pub fn new(
        network: ReactionNetwork,
        temperature: TemperatureProfile,
    ) -> Result<Self, PyrolysisError> {
        network.validate()?;
        let cached = match &temperature {
            TemperatureProfile::Constant { T } => Some(network.rate_constants(*T)?),
            TemperatureProfile::LinearRamp { .. } => None,
        };
        Ok(Self {
            network,
            temperature,
            cached,
        })
    }

    pub fn network(&self) -> &ReactionNetwork {
        &self.network
    }

    pub fn temperature(&self) -> &TemperatureProfile {
        &self.temperature
    }

    pub fn rate_constants_at(&self, t: f64) -> Result<Vec<f64>, PyrolysisError> {
        match &self.cached {
            Some(k) => Ok(k.clone()),
            None => self.network.rate_constants(self.temperature.at(t)),
        }
    }

    /// rates of every species at time `t` for the state `y`
    pub fn evaluate(&self, t: f64, y: &DVector<f64>) -> Result<DVector<f64>, PyrolysisError> {
        let mut dydt = DVector::zeros(self.network.n_species());
        self.rhs(t, y, &mut dydt)?;
        Ok(dydt)
    }
}

impl OdeSystem for RateLaw {
    fn ndim(&self) -> usize {
        self.network.n_species()
    }

    fn variable_names(&self) -> Vec<String> {
        self.network.species.clone()
    }

    fn rhs(&self, t: f64, y: &DVector<f64>, dydt: &mut DVector<f64>) -> Result<(), PyrolysisError> {
        if y.len() != self.ndim() || dydt.len() != self.ndim() {
            return Err(PyrolysisError::invalid_configuration(format!(
                "state has {} entries, network has {} species",
                y.len(),
                self.ndim()
            )));
        }
        match &self.cached {
            Some(k) => self.network.rates_with_constants(k, y, dydt),
            None => {
                let k = self.network.rate_constants(self.temperature.at(t))?;
                self.network.rates_with_constants(&k, y, dydt);
            }
        }
        Ok(())
    }

    fn max_rate_constant(&self, t: f64) -> Option<f64> {
        let k = self.rate_constants_at(t).ok()?;
        self.network
            .decay_constants(&k)
            .into_iter()
            .reduce(f64::max)
    }

    fn symbolic_rhs(&self) -> Result<(Vec<Expr>, String), PyrolysisError> {
        let arg = "t".to_owned();
        let T = self.temperature.symbolic(&arg);
        Ok((self.network.symbolic_rates(T), arg))
    }
}
