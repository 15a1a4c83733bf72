//! # Arrhenius rate constants
//!
//! First-order rate constant of a single pyrolysis pathway
//!
//! ```text
//! k = A * exp(-E/(R*T))
//! ```
//! with `A` in 1/s, `E` in kJ/mol and `R` in kJ/(mol K). The gas constant is passed in by the
//! caller (it is a field of the reaction network), so networks built with different unit
//! systems can live side by side.
use crate::error::PyrolysisError;
use RustedSciThe::symbolic::symbolic_engine::Expr;
use serde::{Deserialize, Serialize};

/// Universal gas constant in kJ/(mol·K)
pub const R_KJ: f64 = 0.008314;

/// Kinetic parameters of one pathway: pre-exponential factor [1/s] and activation energy [kJ/mol]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct ArrheniusParams {
    pub A: f64,
    pub E: f64,
}

#[allow(non_snake_case)]
impl ArrheniusParams {
    pub fn new(A: f64, E: f64) -> Self {
        Self { A, E }
    }

    /// A and E must be finite and strictly positive
    pub fn validate(&self) -> Result<(), PyrolysisError> {
        if !self.A.is_finite() || self.A <= 0.0 {
            return Err(PyrolysisError::invalid_parameter(format!(
                "pre-exponential factor must be positive, got A = {}",
                self.A
            )));
        }
        if !self.E.is_finite() || self.E <= 0.0 {
            return Err(PyrolysisError::invalid_parameter(format!(
                "activation energy must be positive, got E = {}",
                self.E
            )));
        }
        Ok(())
    }

    /// numerical value of the rate constant at temperature `Temp` [K]
    pub fn K_const(&self, Temp: f64, gas_constant: f64) -> f64 {
        self.A * f64::exp(-self.E / (gas_constant * Temp))
    }

    /// same as `K_const` but checks the parameters and the temperature first
    pub fn checked_K_const(&self, Temp: f64, gas_constant: f64) -> Result<f64, PyrolysisError> {
        self.validate()?;
        check_temperature(Temp)?;
        Ok(self.K_const(Temp, gas_constant))
    }

    /// symbolic rate constant, `T` may be a constant or an expression of time
    pub fn K_expr(&self, T: Expr, gas_constant: f64) -> Expr {
        let A = Expr::Const(self.A);
        let E = Expr::Const(self.E);
        let R_sym = Expr::Const(gas_constant);
        A * Expr::Exp(Box::new(-E / (R_sym * T)))
    }
}

/// absolute temperature must be finite and above zero
pub fn check_temperature(T: f64) -> Result<(), PyrolysisError> {
    if !T.is_finite() || T <= 0.0 {
        return Err(PyrolysisError::invalid_parameter(format!(
            "temperature must be positive, got T = {} K",
            T
        )));
    }
    Ok(())
}

pub fn check_gas_constant(gas_constant: f64) -> Result<(), PyrolysisError> {
    if !gas_constant.is_finite() || gas_constant <= 0.0 {
        return Err(PyrolysisError::invalid_parameter(format!(
            "gas constant must be positive, got R = {}",
            gas_constant
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rate_constant_matches_direct_formula() {
        let params = ArrheniusParams::new(1.3e8, 140.0);
        let k = params.K_const(773.0, R_KJ);
        let direct = 1.3e8 * (-140.0 / (0.008314 * 773.0_f64)).exp();
        assert_relative_eq!(k, direct, max_relative = 1e-10);
        assert_relative_eq!(k, 0.04500418484395022, max_relative = 1e-9);
    }

    #[test]
    fn test_rate_constant_is_positive_and_grows_with_temperature() {
        let params = ArrheniusParams::new(2e8, 133.0);
        let k_low = params.checked_K_const(600.0, R_KJ).unwrap();
        let k_high = params.checked_K_const(900.0, R_KJ).unwrap();
        assert!(k_low > 0.0);
        assert!(k_high > k_low);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(ArrheniusParams::new(0.0, 140.0).validate().is_err());
        assert!(ArrheniusParams::new(-1.0, 140.0).validate().is_err());
        assert!(ArrheniusParams::new(1e8, 0.0).validate().is_err());
        assert!(ArrheniusParams::new(1e8, f64::NAN).validate().is_err());
        let err = ArrheniusParams::new(1e8, 140.0)
            .checked_K_const(0.0, R_KJ)
            .unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(check_temperature(-10.0).is_err());
        assert!(check_gas_constant(0.0).is_err());
    }
}
