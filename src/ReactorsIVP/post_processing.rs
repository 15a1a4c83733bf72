//! # Post-processing and conservation diagnostics
//!
//! - normalisation of a density trajectory by the initial total density
//! - splitting the lumped `gaschar` product with a fixed-carbon assumption
//! - running total over species and the conservation report built from it
use super::trajectory::Trajectory;
use crate::error::PyrolysisError;
use log::warn;
use nalgebra::DVector;
use std::fmt;

/// sum over species at every sample
pub fn totals(traj: &Trajectory) -> DVector<f64> {
    DVector::from_iterator(traj.len(), traj.y.row_iter().map(|row| row.sum()))
}

/// divides every sample by `reference`
pub fn normalize_by(traj: &Trajectory, reference: f64) -> Result<Trajectory, PyrolysisError> {
    if !reference.is_finite() || reference <= 0.0 {
        return Err(PyrolysisError::invalid_parameter(format!(
            "normalisation reference must be positive, got {}",
            reference
        )));
    }
    let mut normalized = traj.clone();
    normalized.y /= reference;
    Ok(normalized)
}

/// divides every sample by the initial total, giving fractions that sum to ~1
pub fn normalize(traj: &Trajectory) -> Result<Trajectory, PyrolysisError> {
    normalize_by(traj, traj.initial_state().sum())
}

/// Partition of the lumped gas+char product:
/// `char_fraction = fixed_carbon / (1 - phi_star)`, `gas_fraction = 1 - char_fraction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumpedSplit {
    pub char_fraction: f64,
    pub gas_fraction: f64,
}

impl LumpedSplit {
    pub fn new(fixed_carbon: f64, phi_star: f64) -> Result<Self, PyrolysisError> {
        if !(phi_star > 0.0 && phi_star < 1.0) {
            return Err(PyrolysisError::invalid_parameter(format!(
                "theoretical tar yield must lie in (0, 1), got {}",
                phi_star
            )));
        }
        if !fixed_carbon.is_finite() || fixed_carbon < 0.0 {
            return Err(PyrolysisError::invalid_parameter(format!(
                "fixed carbon fraction must be non-negative, got {}",
                fixed_carbon
            )));
        }
        let char_fraction = fixed_carbon / (1.0 - phi_star);
        if char_fraction > 1.0 {
            return Err(PyrolysisError::invalid_parameter(format!(
                "fixed carbon {} exceeds the gas+char share 1 - phi* = {}",
                fixed_carbon,
                1.0 - phi_star
            )));
        }
        Ok(Self {
            char_fraction,
            gas_fraction: 1.0 - char_fraction,
        })
    }
}

/// Replaces the lumped column by char and adds its gas share to the gas column.
///
/// The output keeps the species order, with `lumped` renamed to `char_name`.
pub fn split_lumped(
    traj: &Trajectory,
    lumped: &str,
    gas: &str,
    char_name: &str,
    split: &LumpedSplit,
) -> Result<Trajectory, PyrolysisError> {
    let missing = |name: &str| {
        PyrolysisError::invalid_configuration(format!(
            "species '{}' not in trajectory {:?}",
            name, traj.species
        ))
    };
    let j_lumped = traj.species_index(lumped).ok_or_else(|| missing(lumped))?;
    let j_gas = traj.species_index(gas).ok_or_else(|| missing(gas))?;
    let mut out = traj.clone();
    for i in 0..out.len() {
        let lumped_value = traj.y[(i, j_lumped)];
        out.y[(i, j_gas)] += split.gas_fraction * lumped_value;
        out.y[(i, j_lumped)] = split.char_fraction * lumped_value;
    }
    out.species[j_lumped] = char_name.to_string();
    Ok(out)
}

/// Deviation of the running total from its initial value
#[derive(Debug, Clone, PartialEq)]
pub struct ConservationReport {
    pub initial_total: f64,
    pub max_abs_deviation: f64,
    pub max_rel_deviation: f64,
    /// sample with the largest deviation
    pub worst_sample: usize,
    pub tolerance: f64,
    pub passed: bool,
}

impl fmt::Display for ConservationReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "initial total {:.6}, max |deviation| {:.3e} (relative {:.3e}) at sample {}, tolerance {:.1e}: {}",
            self.initial_total,
            self.max_abs_deviation,
            self.max_rel_deviation,
            self.worst_sample,
            self.tolerance,
            if self.passed { "OK" } else { "VIOLATED" }
        )
    }
}

/// compares the relative deviation of the total at every sample with `tolerance`
pub fn check_conservation(traj: &Trajectory, tolerance: f64) -> ConservationReport {
    let total = totals(traj);
    let initial_total = total[0];
    let mut worst_sample = 0;
    let mut max_abs_deviation = 0.0;
    for (i, value) in total.iter().enumerate() {
        let deviation = (value - initial_total).abs();
        if deviation > max_abs_deviation {
            max_abs_deviation = deviation;
            worst_sample = i;
        }
    }
    let max_rel_deviation = if initial_total.abs() > 0.0 {
        max_abs_deviation / initial_total.abs()
    } else {
        max_abs_deviation
    };
    let passed = max_rel_deviation <= tolerance;
    let report = ConservationReport {
        initial_total,
        max_abs_deviation,
        max_rel_deviation,
        worst_sample,
        tolerance,
        passed,
    };
    if !passed {
        warn!("mass balance: {}", report);
    }
    report
}

/// final value of every species divided by the initial total
pub fn final_yields(traj: &Trajectory) -> Vec<(String, f64)> {
    let initial_total = traj.initial_state().sum();
    let last = traj.final_state();
    traj.species
        .iter()
        .cloned()
        .zip(last.iter().map(|v| v / initial_total))
        .collect()
}
