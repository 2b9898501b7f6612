#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]
//! Thermodynamic equilibria from equations of state and activity
//! coefficient models.
//!
//! The framework (root finding, mixtures, equilibrium search) lives in
//! [thermoeq_core]. This crate provides the models built on top of it:
//!
//! * [unifac]: the UNIFAC group-contribution activity coefficient model,
//! * [slv]: a quartic solid-liquid-vapor equation of state,
//! * [data]: built-in physical constants and UNIFAC parameter tables.

pub mod data;
pub mod slv;
pub mod unifac;

pub use thermoeq_core::*;
