/// The right-hand-side interface shared by the kinetic rate law and the integrators,
/// plus a closure-backed system for ad-hoc problems and tests.
pub mod ode_system;
/// Time samples and states of one solve, with the stability advisories raised on the way.
pub mod trajectory;
/// The [`integrators::Integrator`] trait and the configuration enum that selects a stepper.
pub mod integrators;
/// eng
/// Fixed-step lagged forward Euler. Both ends of the span are sampled; when the span is not a
/// multiple of `dt` the last step is shortened.
///
/// # Examples
/// ```
/// use PyroKin::ReactorsIVP::forward_euler::ForwardEuler;
/// use PyroKin::ReactorsIVP::integrators::Integrator;
/// use PyroKin::ReactorsIVP::ode_system::ClosureSystem;
/// use nalgebra::DVector;
/// let system = ClosureSystem::new(vec!["a".to_string(), "b".to_string()], |_t, y| {
///     DVector::from_vec(vec![-y[0], y[0]])
/// });
/// let y0 = DVector::from_vec(vec![1.0, 0.0]);
/// let traj = ForwardEuler::new(0.1).integrate(&system, &y0, (0.0, 1.0)).unwrap();
/// assert_eq!(traj.len(), 11);
/// ```
pub mod forward_euler;
/// Adaptive Dormand–Prince 5(4) with embedded error estimate, step rejection and
/// first-same-as-last reuse of the last stage.
pub mod dormand_prince;
/// Implicit stiff solvers (BDF, Radau, Backward Euler) through the RustedSciThe ODE API.
pub mod implicit_solver;
/// Normalisation, gas/char split of the lumped product, running totals and mass-balance report.
pub mod post_processing;
/// Batch pyrolysis reactor: scheme + temperature + initial state + integrator → result.
///
/// # Examples
/// ```
/// use PyroKin::Kinetics::kinetic_schemes::KineticScheme;
/// use PyroKin::Kinetics::rate_law::TemperatureProfile;
/// use PyroKin::ReactorsIVP::batch_reactor::{InitialState, PyrolysisReactor};
/// use PyroKin::ReactorsIVP::forward_euler::ForwardEuler;
/// let mut reactor = PyrolysisReactor::new(ForwardEuler::new(0.01).into());
/// reactor.set_scheme(KineticScheme::chan_blasi());
/// reactor.set_temperature(TemperatureProfile::constant(773.0));
/// reactor.set_initial_state(InitialState::WoodDensity { rho: 700.0 });
/// reactor.set_time_span(0.0, 25.0).unwrap();
/// let result = reactor.solve().unwrap();
/// assert!(result.conservation.passed);
/// ```
pub mod batch_reactor;
pub mod batch_reactor_output;
