use super::{EquilibriumResult, MultiphaseEquilibrium};
use crate::errors::EqResult;
use quantity::{Pressure, Temperature, KELVIN, PASCAL};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use std::fmt::Write;

/// Binary phase diagram from repeated equilibrium searches.
#[derive(Clone, Debug)]
pub struct BinaryPhaseDiagram {
    pub states: Vec<EquilibriumResult>,
}

impl BinaryPhaseDiagram {
    pub fn new(states: Vec<EquilibriumResult>) -> Self {
        Self { states }
    }

    fn solve(
        search: &MultiphaseEquilibrium,
        points: Vec<(Temperature, Pressure)>,
    ) -> EqResult<Self> {
        #[cfg(feature = "rayon")]
        let iter = points.into_par_iter();
        #[cfg(not(feature = "rayon"))]
        let iter = points.into_iter();
        let states: Vec<Vec<EquilibriumResult>> = iter
            .map(|(t, p)| search.find_phase_equilibria(t, p))
            .collect::<EqResult<_>>()?;
        Ok(Self::new(states.into_iter().flatten().collect()))
    }

    /// Phase diagram at constant pressure.
    pub fn isobaric(
        search: &MultiphaseEquilibrium,
        temperatures: &[Temperature],
        pressure: Pressure,
    ) -> EqResult<Self> {
        Self::solve(search, temperatures.iter().map(|&t| (t, pressure)).collect())
    }

    /// Phase diagram at constant temperature.
    pub fn isothermal(
        search: &MultiphaseEquilibrium,
        temperature: Temperature,
        pressures: &[Pressure],
    ) -> EqResult<Self> {
        Self::solve(search, pressures.iter().map(|&p| (temperature, p)).collect())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Plain-text dump with one row per equilibrium point: temperature in K,
    /// pressure in Pa, and the mole fractions of all species in all phases.
    pub fn to_delimited_string(&self, delimiter: &str) -> String {
        let mut out = String::new();
        let Some(first) = self.states.first() else {
            return out;
        };
        let mut header = vec![String::from("temperature"), String::from("pressure")];
        header.extend(first.iter().map(|((phase, species), _)| format!("x({phase}, {species})")));
        let _ = writeln!(out, "{}", header.join(delimiter));
        for state in &self.states {
            let mut row = vec![
                state.temperature().convert_into(KELVIN).to_string(),
                state.pressure().convert_into(PASCAL).to_string(),
            ];
            row.extend(state.iter().map(|(_, x)| x.to_string()));
            let _ = writeln!(out, "{}", row.join(delimiter));
        }
        out
    }
}
