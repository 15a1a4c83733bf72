//! # Reaction network descriptor
//!
//! A pyrolysis scheme is a set of first-order pathways `reactant -> product`, each with its own
//! Arrhenius parameters and an optional branching fraction. Every rate in the system is derived
//! from that list:
//!
//! ```text
//! flux_p      = b_p * k_p(T) * y[reactant_p]
//! dy_i/dt     = Σ_{p: product_p = i} flux_p  -  Σ_{p: reactant_p = i} flux_p
//! ```
//!
//! so a species with several outgoing pathways (wood) decays with the sum of their constants and
//! each product collects the contributions of every pathway feeding it. Adding a pathway is one
//! more entry in the list, no rate expression is written by hand.
//!
//! Because every flux is subtracted from one species and added to another, the sum of all
//! rates is zero and the total over the state vector is conserved.
use super::arrhenius::{ArrheniusParams, check_gas_constant, check_temperature};
use crate::error::PyrolysisError;
use RustedSciThe::symbolic::symbolic_engine::Expr;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

fn unit_fraction() -> f64 {
    1.0
}

/// One directed first-order reaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pathway {
    /// index of the consumed species in the state vector
    pub reactant: usize,
    /// index of the produced species in the state vector
    pub product: usize,
    pub arrhenius: ArrheniusParams,
    /// share of the Arrhenius constant routed through this pathway, in (0, 1]
    #[serde(default = "unit_fraction")]
    pub branching: f64,
}

impl Pathway {
    pub fn new(reactant: usize, product: usize, arrhenius: ArrheniusParams) -> Self {
        Self {
            reactant,
            product,
            arrhenius,
            branching: 1.0,
        }
    }

    pub fn with_branching(mut self, branching: f64) -> Self {
        self.branching = branching;
        self
    }

    /// effective rate constant of the pathway [1/s]
    pub fn rate_constant(&self, T: f64, gas_constant: f64) -> f64 {
        self.branching * self.arrhenius.K_const(T, gas_constant)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionNetwork {
    /// ordered species names, defines the layout of the state vector
    pub species: Vec<String>,
    pub pathways: Vec<Pathway>,
    /// gas constant used in every Arrhenius exponent [kJ/(mol K)]
    pub gas_constant: f64,
}

impl ReactionNetwork {
    pub fn new(species: Vec<String>, gas_constant: f64) -> Self {
        Self {
            species,
            pathways: Vec::new(),
            gas_constant,
        }
    }

    pub fn n_species(&self) -> usize {
        self.species.len()
    }

    pub fn species_index(&self, name: &str) -> Option<usize> {
        self.species.iter().position(|s| s == name)
    }

    fn index_of(&self, name: &str) -> Result<usize, PyrolysisError> {
        self.species_index(name).ok_or_else(|| {
            PyrolysisError::invalid_configuration(format!(
                "species '{}' is not part of the network {:?}",
                name, self.species
            ))
        })
    }

    /// adds `reactant -> product` addressed by species names
    pub fn add_pathway(
        &mut self,
        reactant: &str,
        product: &str,
        arrhenius: ArrheniusParams,
        branching: f64,
    ) -> Result<(), PyrolysisError> {
        let pathway =
            Pathway::new(self.index_of(reactant)?, self.index_of(product)?, arrhenius)
                .with_branching(branching);
        self.pathways.push(pathway);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), PyrolysisError> {
        check_gas_constant(self.gas_constant)?;
        if self.species.is_empty() {
            return Err(PyrolysisError::invalid_configuration(
                "reaction network has no species",
            ));
        }
        if self.pathways.is_empty() {
            return Err(PyrolysisError::invalid_configuration(
                "reaction network has no pathways",
            ));
        }
        let n = self.n_species();
        for (i, p) in self.pathways.iter().enumerate() {
            p.arrhenius.validate().map_err(|e| {
                PyrolysisError::invalid_parameter(format!("pathway {}: {}", i, e))
            })?;
            if p.reactant >= n || p.product >= n {
                return Err(PyrolysisError::invalid_configuration(format!(
                    "pathway {} refers to species outside 0..{}",
                    i, n
                )));
            }
            if p.reactant == p.product {
                return Err(PyrolysisError::invalid_configuration(format!(
                    "pathway {} has identical reactant and product",
                    i
                )));
            }
            if !(p.branching > 0.0 && p.branching <= 1.0) {
                return Err(PyrolysisError::invalid_parameter(format!(
                    "pathway {} branching fraction must lie in (0, 1], got {}",
                    i, p.branching
                )));
            }
        }
        Ok(())
    }

    /// effective rate constants of every pathway at temperature `T`
    pub fn rate_constants(&self, T: f64) -> Result<Vec<f64>, PyrolysisError> {
        check_temperature(T)?;
        Ok(self
            .pathways
            .iter()
            .map(|p| p.rate_constant(T, self.gas_constant))
            .collect())
    }

    /// total first-order decay constant of every species (sum over its outgoing pathways)
    pub fn decay_constants(&self, k: &[f64]) -> Vec<f64> {
        let mut decay = vec![0.0; self.n_species()];
        for (p, k_p) in self.pathways.iter().zip(k) {
            decay[p.reactant] += k_p;
        }
        decay
    }

    /// rates for precomputed constants; `dydt` is overwritten
    pub fn rates_with_constants(&self, k: &[f64], y: &DVector<f64>, dydt: &mut DVector<f64>) {
        let decay = self.decay_constants(k);
        for i in 0..dydt.len() {
            dydt[i] = -decay[i] * y[i];
        }
        for (p, k_p) in self.pathways.iter().zip(k) {
            dydt[p.product] += k_p * y[p.reactant];
        }
    }

    /// instantaneous production/consumption rate of every species at temperature `T`
    pub fn rates(&self, y: &DVector<f64>, T: f64) -> Result<DVector<f64>, PyrolysisError> {
        if y.len() != self.n_species() {
            return Err(PyrolysisError::invalid_configuration(format!(
                "state has {} entries, network has {} species",
                y.len(),
                self.n_species()
            )));
        }
        let k = self.rate_constants(T)?;
        let mut dydt = DVector::zeros(y.len());
        self.rates_with_constants(&k, y, &mut dydt);
        Ok(dydt)
    }

    /// right-hand sides as symbolic expressions of the species variables and of `T`
    pub fn symbolic_rates(&self, T: Expr) -> Vec<Expr> {
        let vars: Vec<Expr> = self.species.iter().map(|s| Expr::Var(s.clone())).collect();
        let mut terms: Vec<Vec<Expr>> = vec![Vec::new(); self.n_species()];
        for p in &self.pathways {
            let k = Expr::Const(p.branching) * p.arrhenius.K_expr(T.clone(), self.gas_constant);
            let flux = k * vars[p.reactant].clone();
            terms[p.reactant].push(-flux.clone());
            terms[p.product].push(flux);
        }
        terms
            .into_iter()
            .map(|species_terms| {
                species_terms
                    .into_iter()
                    .reduce(|acc, term| acc + term)
                    .unwrap_or(Expr::Const(0.0))
            })
            .collect()
    }

    /// human readable equations, e.g. "wood => tar"
    pub fn equations(&self) -> Vec<String> {
        self.pathways
            .iter()
            .map(|p| format!("{} => {}", self.species[p.reactant], self.species[p.product]))
            .collect()
    }
}
