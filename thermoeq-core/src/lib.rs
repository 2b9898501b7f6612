#![warn(clippy::all)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]
//! Core traits and functionalities of `thermoeq`.
//!
//! The crate contains everything that does not depend on a specific
//! activity model or a specific non-cubic equation of state:
//!
//! * root bracketing on polynomial equations of state and the
//!   fugacity based selection of stable phases,
//! * the cubic equations of state (van der Waals, Redlich-Kwong-Soave,
//!   Peng-Robinson) and the ideal gas,
//! * the [ActivityModel] trait,
//! * homogeneous mixtures and the tabulation of chemical potential curves,
//! * the curve-intersection search for multiphase equilibria.

/// Print messages with level `Verbosity::Iter` or higher.
#[macro_export]
macro_rules! log_iter {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Iter {
            println!($($arg)*);
        }
    }
}

/// Print messages with level `Verbosity::Result` or higher.
#[macro_export]
macro_rules! log_result {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Result {
            println!($($arg)*);
        }
    }
}

mod activity;
mod composition;
pub mod cubic;
mod equation_of_state;
mod errors;
pub mod interpolation;
mod mixture;
mod options;
pub mod parameter;
mod phase_equilibria;
mod species;

pub use activity::{ActivityModel, IdealActivity};
pub use composition::Composition;
pub use cubic::{Cubic, CubicForm};
pub use equation_of_state::polynomial::{self, Polynomial};
pub use equation_of_state::{
    critical_compressibility, fluid_roots, fluid_roots_in, label_fluid_roots,
    select_stable_phases, validate_state, EquationOfState, IdealGas, Phase, PhaseVolumes,
    RootOptions,
};
pub use errors::{EqError, EqResult};
pub use interpolation::{InterpolableTable, MemoizedTable, TableValue};
pub use mixture::{HomogeneousMixture, MixtureSample, MixtureSpecies};
pub use options::{SolverOptions, Verbosity};
pub use phase_equilibria::{
    BinaryPhaseDiagram, EquilibriumOptions, EquilibriumResult, EquilibriumScan,
    MultiphaseEquilibrium, PhaseCurves, StatePoint,
};
pub use species::{ConstantsTable, CriticalRecord, Species};

use quantity::{Pressure, BAR};

/// Standard pressure $p^\circ=1\\,\text{bar}$ of the ideal gas reference state.
///
/// Chemical potentials and molar Gibbs energies are departures from the pure
/// ideal gas at the system temperature and this pressure.
pub const STANDARD_PRESSURE: Pressure = BAR;
