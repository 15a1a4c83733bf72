//! # PyroKin
//!
//! Lumped kinetics of wood pyrolysis in a zero-dimensional batch reactor.
//!
//! | Module | Content |
//! |--------|---------|
//! | [`Kinetics`] | Arrhenius constants, reaction networks, ready-made schemes, rate law |
//! | [`ReactorsIVP`] | integrators (forward Euler, Dormand–Prince, implicit), trajectory, post-processing, batch reactor |
//! | [`Utils`] | JSON task files, logging |
//! | [`cli`] | interactive menu |
//! | [`Examples`] | ready-to-run tasks |
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Kinetics;
#[allow(non_snake_case)]
pub mod ReactorsIVP;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod error;
