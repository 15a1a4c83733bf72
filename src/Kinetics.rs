/// Arrhenius rate constants `k = A*exp(-E/(R*T))`, numeric and symbolic.
///
/// # Examples
/// ```
/// use PyroKin::Kinetics::arrhenius::{ArrheniusParams, R_KJ};
/// let wood_to_gas = ArrheniusParams::new(1.3e8, 140.0);
/// let k = wood_to_gas.K_const(773.0, R_KJ);
/// assert!((k - 0.0450042).abs() < 1e-6);
/// ```
pub mod arrhenius;
/// eng
/// Reaction network: species plus a list of first-order pathways `reactant -> product`.
/// The rates of all species are assembled from that list, so every flux leaves one species and
/// enters another and the total of the state vector is conserved by construction.
/// Branching fractions allow several pathways to share one Arrhenius constant.
pub mod reaction_network;
/// Ready-made pyrolysis schemes:
/// 1) five-pathway wood/gas/tar/char (Chan et al. 1985, Blasi 1993 parameters)
/// 2) three-pathway wood/tar/(gas+char) with a theoretical tar yield (Liden et al. 1988)
///
/// # Examples
/// ```
/// use PyroKin::Kinetics::kinetic_schemes::KineticScheme;
/// let scheme = KineticScheme::chan_blasi();
/// let network = scheme.build_default_network().unwrap();
/// assert_eq!(network.pathways.len(), 5);
/// println!("{:?}", network.equations());
/// ```
pub mod kinetic_schemes;
/// Rate-law evaluator: a reaction network at a constant or linearly ramped temperature,
/// exposed to the integrators as an ODE system.
pub mod rate_law;
mod kinetics_tests;
