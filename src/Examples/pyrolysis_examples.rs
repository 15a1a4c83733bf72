use crate::Kinetics::arrhenius::{ArrheniusParams, R_KJ};
use crate::Kinetics::kinetic_schemes::{KineticScheme, LIDEN_FIXED_CARBON, LIDEN_PHI_STAR};
use crate::Kinetics::rate_law::{RateLaw, TemperatureProfile};
use crate::Kinetics::reaction_network::ReactionNetwork;
use crate::ReactorsIVP::batch_reactor::{InitialState, PyrolysisReactor};
use crate::ReactorsIVP::dormand_prince::DormandPrince45;
use crate::ReactorsIVP::forward_euler::ForwardEuler;
use crate::ReactorsIVP::implicit_solver::{ImplicitMethod, ImplicitSolver};
use crate::ReactorsIVP::integrators::{Integrator, IntegratorEnum};
use crate::ReactorsIVP::post_processing::{check_conservation, final_yields};
use crate::error::PyrolysisError;
use nalgebra::DVector;
use prettytable::{Table, row};

pub fn pyro_examples(task: usize) -> Result<(), PyrolysisError> {
    match task {
        0 => {
            // five-pathway scheme, 700 kg/m3 of wood at 773 K, lagged Euler with dt = 0.01 s
            let mut reactor = PyrolysisReactor::new(ForwardEuler::new(0.01).into());
            reactor.problem_name = Some("Chan/Blasi".to_string());
            reactor.set_scheme(KineticScheme::chan_blasi());
            reactor.set_temperature(TemperatureProfile::constant(773.0));
            reactor.set_initial_state(InitialState::WoodDensity { rho: 700.0 });
            reactor.set_time_span(0.0, 25.0)?;
            reactor.pretty_print_task()?;
            reactor.solve()?;
            reactor.pretty_print_result(26);
        }
        1 => {
            // Liden 1988: wood -> tar, tar -> gas, wood -> (gas + char); adaptive RK45,
            // then the lumped product is split with 14 % fixed carbon
            let mut reactor = PyrolysisReactor::new(DormandPrince45::default().into());
            reactor.problem_name = Some("Liden 1988".to_string());
            reactor.set_scheme(KineticScheme::liden_1988(LIDEN_PHI_STAR));
            reactor.set_temperature(TemperatureProfile::constant(773.15));
            reactor.set_initial_state(InitialState::WoodMassFraction);
            reactor.set_time_span(0.0, 25.0)?;
            reactor.set_fixed_carbon(Some(LIDEN_FIXED_CARBON));
            reactor.pretty_print_task()?;
            reactor.solve()?;
            reactor.pretty_print_result(50);
        }
        2 => {
            // the same task with every integrator
            let integrators: Vec<IntegratorEnum> = vec![
                ForwardEuler::new(0.01).into(),
                DormandPrince45::new(1e-6, 1e-9).into(),
                ImplicitSolver::new(ImplicitMethod::BDF).into(),
            ];
            let mut table = Table::new();
            table.add_row(row!["Integrator", "samples", "wood", "gas", "tar", "char", "max |dev|"]);
            for integrator in integrators {
                let name = integrator.method_name();
                let mut reactor = PyrolysisReactor::new(integrator);
                reactor.set_scheme(KineticScheme::chan_blasi());
                reactor.set_temperature(TemperatureProfile::constant(773.0));
                reactor.set_initial_state(InitialState::WoodMassFraction);
                reactor.set_time_span(0.0, 25.0)?;
                let result = reactor.solve()?;
                let last = result.normalized.final_state();
                table.add_row(row![
                    name,
                    result.trajectory.len(),
                    format!("{:.5}", last[0]),
                    format!("{:.5}", last[1]),
                    format!("{:.5}", last[2]),
                    format!("{:.5}", last[3]),
                    format!("{:.2e}", result.conservation.max_abs_deviation)
                ]);
            }
            table.printstd();
        }
        3 => {
            // heating from 300 K at 10 K/s: nothing happens until ~600 K
            let mut reactor = PyrolysisReactor::new(DormandPrince45::new(1e-6, 1e-9).into());
            reactor.set_scheme(KineticScheme::chan_blasi());
            reactor.set_temperature(TemperatureProfile::LinearRamp {
                T0: 300.0,
                heating_rate: 10.0,
            });
            reactor.set_initial_state(InitialState::WoodMassFraction);
            reactor.set_time_span(0.0, 60.0)?;
            reactor.solve()?;
            reactor.pretty_print_result(30);
        }
        4 => {
            // hand-made network driven through the integrator API, no reactor
            let species = ["wood", "active", "tar", "char"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            let mut network = ReactionNetwork::new(species, R_KJ);
            network.add_pathway("wood", "active", ArrheniusParams::new(2.8e19, 242.4), 1.0)?;
            network.add_pathway("active", "tar", ArrheniusParams::new(6.79e9, 140.2), 1.0)?;
            network.add_pathway("active", "char", ArrheniusParams::new(1.3e10, 150.5), 1.0)?;
            println!("{:#?}", network.equations());
            let rate_law = RateLaw::new(network, TemperatureProfile::constant(700.0))?;
            let y0 = DVector::from_vec(vec![1.0, 0.0, 0.0, 0.0]);
            let traj = DormandPrince45::default().integrate(&rate_law, &y0, (0.0, 10.0))?;
            for (t, y) in traj.samples().step_by(5) {
                println!("t = {:>8.4} s  {:?}", t, y.as_slice());
            }
            println!("{}", check_conservation(&traj, 1e-6));
            println!("{:?}", final_yields(&traj));
        }
        5 => {
            // dt * max(k) > 1: the explicit run goes on but attaches a stability warning
            let mut reactor = PyrolysisReactor::new(ForwardEuler::new(5.0).into());
            reactor.set_scheme(KineticScheme::chan_blasi());
            reactor.set_temperature(TemperatureProfile::constant(773.0));
            reactor.set_initial_state(InitialState::WoodDensity { rho: 700.0 });
            reactor.set_time_span(0.0, 25.0)?;
            let result = reactor.solve()?;
            for warning in &result.trajectory.warnings {
                println!("{}", warning);
            }
            result.pretty_print(10);
        }
        _ => {
            return Err(PyrolysisError::invalid_configuration(format!(
                "no pyrolysis example number {}",
                task
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_examples_run() {
        for task in 0..=5 {
            pyro_examples(task).unwrap();
        }
        assert!(pyro_examples(42).is_err());
    }
}
