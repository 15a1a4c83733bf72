//! # Named kinetic schemes of wood pyrolysis
//!
//! | Scheme | Species order | Pathways (parameter order) |
//! |--------|---------------|----------------------------|
//! | `FivePathway` | wood, gas, tar, char | wood→gas, wood→tar, wood→char, tar→gas, tar→char |
//! | `TheoreticalYield` | wood, gas, tar, gaschar | wood decay (split φ* to tar, 1-φ* to gaschar), tar→gas |
//!
//! Reference parameter sets:
//! - Chan 1985 / Di Blasi 1993 for the five-pathway scheme
//! - Liden, Berruti and Scott 1988 for the theoretical-yield scheme (φ* = 0.703)
//!
//! In the theoretical-yield scheme the lumped `gaschar` product is split into gas and char only
//! after integration, see [`crate::ReactorsIVP::post_processing::LumpedSplit`].
use super::arrhenius::{ArrheniusParams, R_KJ};
use super::reaction_network::ReactionNetwork;
use crate::error::PyrolysisError;
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};

pub const WOOD: &str = "wood";
pub const GAS: &str = "gas";
pub const TAR: &str = "tar";
pub const CHAR: &str = "char";
pub const GASCHAR: &str = "gaschar";

/// (A [1/s], E [kJ/mol]) for wood→gas, wood→tar, wood→char, tar→gas, tar→char
pub const CHAN_BLASI_PARAMETERS: [(f64, f64); 5] = [
    (1.3e8, 140.0),
    (2e8, 133.0),
    (1.08e7, 121.0),
    (4.28e6, 108.0),
    (1e6, 108.0),
];
/// (A [1/s], E [kJ/mol]) for wood decay and tar→gas
pub const LIDEN_PARAMETERS: [(f64, f64); 2] = [(1.0e13, 183.3), (4.28e6, 107.5)];
/// maximum theoretical tar yield of the Liden scheme
pub const LIDEN_PHI_STAR: f64 = 0.703;
/// weight fraction of fixed carbon in wood used with the Liden scheme
pub const LIDEN_FIXED_CARBON: f64 = 0.14;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheme")]
pub enum KineticScheme {
    /// primary wood → {gas, tar, char} plus secondary tar → {gas, char}
    FivePathway { parameters: Vec<ArrheniusParams> },
    /// wood → tar and wood → (gas + char) sharing one decay constant, plus tar → gas
    TheoreticalYield {
        parameters: Vec<ArrheniusParams>,
        phi_star: f64,
    },
}

fn to_params(table: &[(f64, f64)]) -> Vec<ArrheniusParams> {
    table
        .iter()
        .map(|&(a, e)| ArrheniusParams::new(a, e))
        .collect()
}

impl KineticScheme {
    pub fn chan_blasi() -> Self {
        KineticScheme::FivePathway {
            parameters: to_params(&CHAN_BLASI_PARAMETERS),
        }
    }

    pub fn liden_1988(phi_star: f64) -> Self {
        KineticScheme::TheoreticalYield {
            parameters: to_params(&LIDEN_PARAMETERS),
            phi_star,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KineticScheme::FivePathway { .. } => "five-pathway wood/tar/gas/char",
            KineticScheme::TheoreticalYield { .. } => "three-pathway wood/tar/gas-char",
        }
    }

    pub fn species(&self) -> Vec<String> {
        let names = match self {
            KineticScheme::FivePathway { .. } => [WOOD, GAS, TAR, CHAR],
            KineticScheme::TheoreticalYield { .. } => [WOOD, GAS, TAR, GASCHAR],
        };
        names.iter().map(|s| s.to_string()).collect()
    }

    pub fn parameters(&self) -> &[ArrheniusParams] {
        match self {
            KineticScheme::FivePathway { parameters } => parameters,
            KineticScheme::TheoreticalYield { parameters, .. } => parameters,
        }
    }

    pub fn expected_parameter_count(&self) -> usize {
        match self {
            KineticScheme::FivePathway { .. } => 5,
            KineticScheme::TheoreticalYield { .. } => 2,
        }
    }

    pub fn phi_star(&self) -> Option<f64> {
        match self {
            KineticScheme::FivePathway { .. } => None,
            KineticScheme::TheoreticalYield { phi_star, .. } => Some(*phi_star),
        }
    }

    /// name of the lumped pseudo-species, if the scheme has one
    pub fn lumped_species(&self) -> Option<&'static str> {
        match self {
            KineticScheme::FivePathway { .. } => None,
            KineticScheme::TheoreticalYield { .. } => Some(GASCHAR),
        }
    }

    pub fn validate(&self) -> Result<(), PyrolysisError> {
        let params = self.parameters();
        if params.len() != self.expected_parameter_count() {
            return Err(PyrolysisError::invalid_configuration(format!(
                "{} scheme expects {} (A, E) pairs, got {}",
                self.name(),
                self.expected_parameter_count(),
                params.len()
            )));
        }
        for p in params {
            p.validate()?;
        }
        if let Some(phi_star) = self.phi_star() {
            if !(phi_star > 0.0 && phi_star < 1.0) {
                return Err(PyrolysisError::invalid_parameter(format!(
                    "theoretical tar yield must lie in (0, 1), got {}",
                    phi_star
                )));
            }
        }
        Ok(())
    }

    /// builds the pathway list of the scheme
    pub fn build_network(&self, gas_constant: f64) -> Result<ReactionNetwork, PyrolysisError> {
        self.validate()?;
        let mut network = ReactionNetwork::new(self.species(), gas_constant);
        match self {
            KineticScheme::FivePathway { parameters } => {
                network.add_pathway(WOOD, GAS, parameters[0], 1.0)?;
                network.add_pathway(WOOD, TAR, parameters[1], 1.0)?;
                network.add_pathway(WOOD, CHAR, parameters[2], 1.0)?;
                network.add_pathway(TAR, GAS, parameters[3], 1.0)?;
                network.add_pathway(TAR, CHAR, parameters[4], 1.0)?;
            }
            KineticScheme::TheoreticalYield {
                parameters,
                phi_star,
            } => {
                network.add_pathway(WOOD, TAR, parameters[0], *phi_star)?;
                network.add_pathway(TAR, GAS, parameters[1], 1.0)?;
                network.add_pathway(WOOD, GASCHAR, parameters[0], 1.0 - phi_star)?;
            }
        }
        network.validate()?;
        Ok(network)
    }

    pub fn build_default_network(&self) -> Result<ReactionNetwork, PyrolysisError> {
        self.build_network(R_KJ)
    }

    /// table of pathways with their parameters and rate constants at `T`
    pub fn pretty_print(&self, T: f64) -> Result<(), PyrolysisError> {
        let network = self.build_default_network()?;
        let k = network.rate_constants(T)?;
        println!("\nScheme: {}", self.name());
        if let Some(phi_star) = self.phi_star() {
            println!("theoretical tar yield phi* = {}", phi_star);
        }
        let mut table = Table::new();
        table.add_row(row!["Pathway", "A (1/s)", "E (kJ/mol)", "branching", "k (1/s)"]);
        for ((eq, p), k_p) in network.equations().iter().zip(&network.pathways).zip(&k) {
            table.add_row(row![
                eq,
                format!("{:.3e}", p.arrhenius.A),
                format!("{:.2}", p.arrhenius.E),
                format!("{:.3}", p.branching),
                format!("{:.4e}", k_p)
            ]);
        }
        table.printstd();
        Ok(())
    }
}
