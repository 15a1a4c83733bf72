//! # Trajectory
//!
//! Time samples and the state matrix of one solve. `y` has one row per sample and one column per
//! species, in the order given by `species`. Sample times are strictly increasing and start at
//! the initial time.
use crate::error::PyrolysisError;
use nalgebra::{DMatrix, DVector};
use std::fmt;

/// Advisory raised by the fixed-step integrator when `dt * max(k)` exceeds 1.
///
/// Explicit stepping is conditionally stable; the warning does not stop the solve.
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityWarning {
    pub dt: f64,
    pub max_rate_constant: f64,
}

impl StabilityWarning {
    pub fn criterion(&self) -> f64 {
        self.dt * self.max_rate_constant
    }
}

impl fmt::Display for StabilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "dt * max(k) = {:.3} > 1 (dt = {:.3e} s, max k = {:.3e} 1/s): explicit steps may oscillate or go negative",
            self.criterion(),
            self.dt,
            self.max_rate_constant
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub species: Vec<String>,
    pub t: DVector<f64>,
    pub y: DMatrix<f64>,
    pub warnings: Vec<StabilityWarning>,
    /// steps discarded by an adaptive integrator
    pub rejected_steps: usize,
}

impl Trajectory {
    pub fn new(
        species: Vec<String>,
        t: DVector<f64>,
        y: DMatrix<f64>,
    ) -> Result<Self, PyrolysisError> {
        if t.is_empty() {
            return Err(PyrolysisError::invalid_configuration(
                "trajectory needs at least one sample",
            ));
        }
        if y.nrows() != t.len() || y.ncols() != species.len() {
            return Err(PyrolysisError::invalid_configuration(format!(
                "state matrix is {}x{}, expected {}x{}",
                y.nrows(),
                y.ncols(),
                t.len(),
                species.len()
            )));
        }
        if t.as_slice().windows(2).any(|w| w[1] <= w[0]) {
            return Err(PyrolysisError::invalid_configuration(
                "sample times must be strictly increasing",
            ));
        }
        Ok(Self {
            species,
            t,
            y,
            warnings: Vec::new(),
            rejected_steps: 0,
        })
    }

    /// assembles a trajectory from per-sample state vectors
    pub fn from_samples(
        species: Vec<String>,
        times: Vec<f64>,
        states: &[DVector<f64>],
    ) -> Result<Self, PyrolysisError> {
        let n = species.len();
        if states.len() != times.len() {
            return Err(PyrolysisError::invalid_configuration(format!(
                "{} sample times but {} states",
                times.len(),
                states.len()
            )));
        }
        if let Some(bad) = states.iter().find(|s| s.len() != n) {
            return Err(PyrolysisError::invalid_configuration(format!(
                "state of length {} in a trajectory of {} species",
                bad.len(),
                n
            )));
        }
        let y = DMatrix::from_fn(times.len(), n, |i, j| states[i][j]);
        Self::new(species, DVector::from_vec(times), y)
    }

    pub fn with_warnings(mut self, warnings: Vec<StabilityWarning>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn with_rejected_steps(mut self, rejected_steps: usize) -> Self {
        self.rejected_steps = rejected_steps;
        self
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn n_species(&self) -> usize {
        self.species.len()
    }

    pub fn species_index(&self, name: &str) -> Option<usize> {
        self.species.iter().position(|s| s == name)
    }

    /// state vector of sample `i`
    pub fn state(&self, i: usize) -> DVector<f64> {
        self.y.row(i).transpose()
    }

    pub fn initial_state(&self) -> DVector<f64> {
        self.state(0)
    }

    pub fn final_state(&self) -> DVector<f64> {
        self.state(self.len() - 1)
    }

    pub fn final_time(&self) -> f64 {
        self.t[self.len() - 1]
    }

    /// time series of one species
    pub fn column(&self, name: &str) -> Result<DVector<f64>, PyrolysisError> {
        let j = self.species_index(name).ok_or_else(|| {
            PyrolysisError::invalid_configuration(format!(
                "species '{}' not in trajectory {:?}",
                name, self.species
            ))
        })?;
        Ok(self.y.column(j).into_owned())
    }

    /// lazy `(t, state)` view; every call starts again from the first sample
    pub fn samples(&self) -> impl Iterator<Item = (f64, DVector<f64>)> + '_ {
        (0..self.len()).map(move |i| (self.t[i], self.state(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["wood".to_string(), "char".to_string()]
    }

    #[test]
    fn test_from_samples_layout() {
        let states = vec![
            DVector::from_vec(vec![1.0, 0.0]),
            DVector::from_vec(vec![0.6, 0.4]),
            DVector::from_vec(vec![0.2, 0.8]),
        ];
        let traj = Trajectory::from_samples(names(), vec![0.0, 0.5, 1.0], &states).unwrap();
        assert_eq!(traj.len(), 3);
        assert_eq!(traj.y.nrows(), 3);
        assert_eq!(traj.y.ncols(), 2);
        assert_eq!(traj.state(1), states[1]);
        assert_eq!(traj.final_time(), 1.0);
        assert_eq!(
            traj.column("char").unwrap(),
            DVector::from_vec(vec![0.0, 0.4, 0.8])
        );
        assert!(traj.column("tar").is_err());
    }

    #[test]
    fn test_rejects_non_increasing_times() {
        let states = vec![
            DVector::from_vec(vec![1.0, 0.0]),
            DVector::from_vec(vec![0.6, 0.4]),
        ];
        assert!(Trajectory::from_samples(names(), vec![0.0, 0.0], &states).is_err());
        assert!(Trajectory::from_samples(names(), vec![0.0], &states).is_err());
    }

    #[test]
    fn test_samples_iterator_restarts() {
        let states = vec![
            DVector::from_vec(vec![1.0, 0.0]),
            DVector::from_vec(vec![0.5, 0.5]),
        ];
        let traj = Trajectory::from_samples(names(), vec![0.0, 2.0], &states).unwrap();
        let first: Vec<f64> = traj.samples().map(|(t, _)| t).collect();
        let second: Vec<f64> = traj.samples().map(|(t, _)| t).collect();
        assert_eq!(first, vec![0.0, 2.0]);
        assert_eq!(first, second);
    }
}
