/// Ready-to-run pyrolysis tasks: `pyro_examples(n)` with
/// 0) five-pathway scheme, forward Euler
/// 1) Liden 1988 scheme, adaptive RK45, gas/char split
/// 2) one task with every integrator
/// 3) linear heating ramp
/// 4) hand-made reaction network through the integrator API
/// 5) forward Euler beyond its stability limit
pub mod pyrolysis_examples;
