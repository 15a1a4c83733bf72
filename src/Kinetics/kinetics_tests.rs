/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Kinetics::arrhenius::{ArrheniusParams, R_KJ};
    use crate::Kinetics::kinetic_schemes::{
        CHAN_BLASI_PARAMETERS, GASCHAR, KineticScheme, LIDEN_PHI_STAR, WOOD,
    };
    use crate::Kinetics::rate_law::{RateLaw, TemperatureProfile};
    use crate::Kinetics::reaction_network::{Pathway, ReactionNetwork};
    use crate::ReactorsIVP::ode_system::OdeSystem;
    use RustedSciThe::symbolic::symbolic_engine::Expr;
    use approx::assert_relative_eq;
    use nalgebra::DVector;

    const T_CHAN: f64 = 773.0;
    const T_LIDEN: f64 = 773.15;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_chan_blasi_rate_constants() {
        let network = KineticScheme::chan_blasi().build_default_network().unwrap();
        let k = network.rate_constants(T_CHAN).unwrap();
        let expected = [
            0.04500418484395022,
            0.2057662134888233,
            0.0718925933630324,
            0.21537577266098404,
            0.05032144221051029,
        ];
        for (k_p, e) in k.iter().zip(expected) {
            assert_relative_eq!(*k_p, e, max_relative = 1e-9);
        }
        assert_eq!(
            network.equations(),
            vec![
                "wood => gas",
                "wood => tar",
                "wood => char",
                "tar => gas",
                "tar => char"
            ]
        );
    }

    #[test]
    fn test_five_pathway_rates() {
        let network = KineticScheme::chan_blasi().build_default_network().unwrap();
        let k = network.rate_constants(T_CHAN).unwrap();
        let y = DVector::from_vec(vec![400.0, 150.0, 100.0, 50.0]);
        let dydt = network.rates(&y, T_CHAN).unwrap();
        let (wood, tar) = (y[0], y[2]);
        assert_relative_eq!(dydt[0], -(k[0] + k[1] + k[2]) * wood, max_relative = 1e-12);
        assert_relative_eq!(dydt[1], k[0] * wood + k[3] * tar, max_relative = 1e-12);
        assert_relative_eq!(
            dydt[2],
            k[1] * wood - (k[3] + k[4]) * tar,
            max_relative = 1e-12
        );
        assert_relative_eq!(dydt[3], k[2] * wood + k[4] * tar, max_relative = 1e-12);
        assert_relative_eq!(dydt.sum(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_theoretical_yield_rates_and_branching() {
        let network = KineticScheme::liden_1988(LIDEN_PHI_STAR)
            .build_default_network()
            .unwrap();
        let k = ArrheniusParams::new(1.0e13, 183.3).K_const(T_LIDEN, R_KJ);
        let k2 = ArrheniusParams::new(4.28e6, 107.5).K_const(T_LIDEN, R_KJ);
        assert_relative_eq!(k, 4.1272, max_relative = 1e-4);
        assert_relative_eq!(k2, 0.23356, max_relative = 1e-4);

        let y = DVector::from_vec(vec![0.6, 0.1, 0.2, 0.1]);
        let dydt = network.rates(&y, T_LIDEN).unwrap();
        assert_relative_eq!(dydt[0], -k * 0.6, max_relative = 1e-12);
        assert_relative_eq!(dydt[1], k2 * 0.2, max_relative = 1e-12);
        assert_relative_eq!(dydt[2], LIDEN_PHI_STAR * k * 0.6 - k2 * 0.2, max_relative = 1e-12);
        assert_relative_eq!(dydt[3], (1.0 - LIDEN_PHI_STAR) * k * 0.6, max_relative = 1e-12);

        let decay = network.decay_constants(&network.rate_constants(T_LIDEN).unwrap());
        assert_relative_eq!(decay[0], k, max_relative = 1e-12);
        assert_eq!(decay[3], 0.0);
    }

    #[test]
    fn test_new_pathway_is_one_more_entry() {
        let mut network = ReactionNetwork::new(names(&[WOOD, "tar", "char", "soot"]), R_KJ);
        network
            .add_pathway(WOOD, "tar", ArrheniusParams::new(2e8, 133.0), 1.0)
            .unwrap();
        network
            .add_pathway("tar", "soot", ArrheniusParams::new(1e6, 108.0), 1.0)
            .unwrap();
        network.validate().unwrap();
        let y = DVector::from_vec(vec![1.0, 0.5, 0.0, 0.0]);
        let dydt = network.rates(&y, 800.0).unwrap();
        assert!(dydt[3] > 0.0);
        assert_eq!(dydt[2], 0.0);
        assert_relative_eq!(dydt.sum(), 0.0, epsilon = 1e-12);
        assert!(
            network
                .add_pathway("tar", "ash", ArrheniusParams::new(1e6, 108.0), 1.0)
                .is_err()
        );
    }

    #[test]
    fn test_invalid_networks() {
        let mut network = ReactionNetwork::new(names(&["a", "b"]), R_KJ);
        assert!(network.validate().is_err());
        network
            .pathways
            .push(Pathway::new(0, 0, ArrheniusParams::new(1.0, 1.0)));
        assert!(network.validate().is_err());
        network.pathways[0] = Pathway::new(0, 5, ArrheniusParams::new(1.0, 1.0));
        assert!(network.validate().is_err());
        network.pathways[0] = Pathway::new(0, 1, ArrheniusParams::new(1.0, 1.0)).with_branching(1.5);
        assert!(network.validate().unwrap_err().is_invalid_parameter());
        network.pathways[0] = Pathway::new(0, 1, ArrheniusParams::new(-1.0, 1.0));
        assert!(network.validate().unwrap_err().is_invalid_parameter());
        network.pathways[0] = Pathway::new(0, 1, ArrheniusParams::new(1.0, 1.0));
        assert!(network.validate().is_ok());
        assert!(network.rate_constants(0.0).unwrap_err().is_invalid_parameter());
        assert!(network.rates(&DVector::zeros(3), 500.0).is_err());
        network.gas_constant = 0.0;
        assert!(network.validate().is_err());
    }

    #[test]
    fn test_scheme_validation() {
        assert!(KineticScheme::liden_1988(1.2).validate().is_err());
        assert!(KineticScheme::liden_1988(0.0).validate().is_err());
        let short = KineticScheme::FivePathway {
            parameters: vec![ArrheniusParams::new(1.3e8, 140.0)],
        };
        assert!(short.validate().is_err());
        assert_eq!(KineticScheme::chan_blasi().parameters().len(), CHAN_BLASI_PARAMETERS.len());
        assert_eq!(KineticScheme::liden_1988(0.7).lumped_species(), Some(GASCHAR));
        assert_eq!(KineticScheme::chan_blasi().lumped_species(), None);
    }

    #[test]
    fn test_scheme_from_json() {
        let json = r#"{"scheme": "TheoreticalYield",
                       "parameters": [{"A": 1.0e13, "E": 183.3}, {"A": 4.28e6, "E": 107.5}],
                       "phi_star": 0.703}"#;
        let scheme: KineticScheme = serde_json::from_str(json).unwrap();
        assert_eq!(scheme, KineticScheme::liden_1988(LIDEN_PHI_STAR));
        let back = serde_json::to_string(&KineticScheme::chan_blasi()).unwrap();
        assert!(back.contains("FivePathway"));
    }

    #[test]
    fn test_rate_law_constant_and_ramp() {
        let network = KineticScheme::chan_blasi().build_default_network().unwrap();
        let constant = RateLaw::new(network.clone(), TemperatureProfile::constant(T_CHAN)).unwrap();
        let ramp = RateLaw::new(
            network.clone(),
            TemperatureProfile::LinearRamp {
                T0: 573.0,
                heating_rate: 10.0,
            },
        )
        .unwrap();
        let y = DVector::from_vec(vec![1.0, 0.0, 0.0, 0.0]);
        // the ramp reaches 773 K at t = 20 s
        assert_relative_eq!(
            ramp.evaluate(20.0, &y).unwrap(),
            constant.evaluate(3.0, &y).unwrap(),
            max_relative = 1e-12
        );
        assert!(ramp.evaluate(0.0, &y).unwrap()[0] > constant.evaluate(0.0, &y).unwrap()[0]);
        assert_relative_eq!(
            constant.max_rate_constant(0.0).unwrap(),
            0.04500418484395022 + 0.2057662134888233 + 0.0718925933630324,
            max_relative = 1e-9
        );
        assert_eq!(constant.variable_names(), network.species);
        assert!(RateLaw::new(network.clone(), TemperatureProfile::constant(-5.0)).is_err());
        assert!(constant.evaluate(0.0, &DVector::zeros(2)).is_err());
    }

    #[test]
    fn test_symbolic_rates_cover_every_species() {
        let network = KineticScheme::liden_1988(LIDEN_PHI_STAR)
            .build_default_network()
            .unwrap();
        let rates = network.symbolic_rates(Expr::Const(T_LIDEN));
        assert_eq!(rates.len(), 4);
        assert!(format!("{}", rates[0]).contains("wood"));
        assert!(format!("{}", rates[1]).contains("tar"));

        let law = RateLaw::new(
            network,
            TemperatureProfile::LinearRamp {
                T0: 600.0,
                heating_rate: 5.0,
            },
        )
        .unwrap();
        let (eqs, arg) = law.symbolic_rhs().unwrap();
        assert_eq!(arg, "t");
        assert_eq!(eqs.len(), 4);
    }
}
