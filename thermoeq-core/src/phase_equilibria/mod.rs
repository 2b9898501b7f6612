//! Multiphase equilibria from the intersection of chemical potential curves.
//!
//! For every candidate phase the chemical potentials of all species are
//! tabulated over a composition grid. A trial composition of the first
//! phase is accepted if the compositions of the second phase that match
//! the chemical potential of each species individually coincide within a
//! tolerance. The scan is a heuristic: depending on the grid and the
//! tolerance it can return no point, one point or several neighboring
//! points for the same equilibrium.
use crate::composition::Composition;
use crate::equation_of_state::Phase;
use crate::errors::{EqError, EqResult};
use crate::species::Species;
use crate::Verbosity;
use indexmap::IndexMap;
use itertools::Itertools;
use quantity::{Pressure, Temperature, KELVIN, PASCAL};
use std::fmt;

mod curves;
mod phase_diagram_binary;
mod search;

pub use curves::PhaseCurves;
pub use phase_diagram_binary::BinaryPhaseDiagram;
pub use search::{EquilibriumScan, MultiphaseEquilibrium};

/// Options of the curve tabulation and the equilibrium scan.
#[derive(Clone, Copy, Debug)]
pub struct EquilibriumOptions {
    /// Smallest mole fraction of the tabulated curves.
    pub curve_min: f64,
    /// Step size of the tabulated curves.
    pub curve_step: f64,
    /// Smallest trial mole fraction of the scan.
    pub scan_min: f64,
    /// Step size of the trial mole fractions.
    pub scan_step: f64,
    /// Largest difference between the compositions implied by the
    /// chemical potentials of the individual species.
    pub composition_tolerance: f64,
    /// Iteration output indicated by the [Verbosity] enum.
    pub verbosity: Verbosity,
}

impl Default for EquilibriumOptions {
    fn default() -> Self {
        Self {
            curve_min: 0.001,
            curve_step: 0.001,
            scan_min: 0.01,
            scan_step: 0.01,
            composition_tolerance: 0.008,
            verbosity: Verbosity::None,
        }
    }
}

impl EquilibriumOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn curve_grid(mut self, min: f64, step: f64) -> Self {
        self.curve_min = min;
        self.curve_step = step;
        self
    }

    pub fn scan_grid(mut self, min: f64, step: f64) -> Self {
        self.scan_min = min;
        self.scan_step = step;
        self
    }

    pub fn composition_tolerance(mut self, composition_tolerance: f64) -> Self {
        self.composition_tolerance = composition_tolerance;
        self
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}

/// Mole fractions `min, min + step, ...` up to one.
///
/// Grid points are computed as `min + k * step` so that rounding errors do
/// not accumulate.
pub(crate) fn composition_grid(min: f64, step: f64) -> EqResult<Vec<f64>> {
    if !(step > 0.0 && (0.0..=1.0).contains(&min)) {
        return Err(EqError::Error(format!(
            "Invalid composition grid (min = {min}, step = {step})."
        )));
    }
    let n = ((1.0 - min) / step + 1e-9).floor() as usize;
    Ok((0..=n).map(|k| (min + k as f64 * step).min(1.0)).collect())
}

/// Identification of a tabulated curve.
///
/// `species` is `None` for the molar Gibbs energy of the phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatePoint {
    pub phase: Phase,
    pub species: Option<Species>,
    pub temperature: Temperature,
    pub pressure: Pressure,
}

impl fmt::Display for StatePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.species {
            Some(species) => write!(f, "StatePoint({} {}", self.phase, species)?,
            None => write!(f, "StatePoint({}", self.phase)?,
        }
        write!(
            f,
            ", T = {} K, p = {} Pa)",
            self.temperature.convert_into(KELVIN),
            self.pressure.convert_into(PASCAL)
        )
    }
}

/// Mole fractions of all species in all coexisting phases.
#[derive(Clone, Debug)]
pub struct EquilibriumResult {
    temperature: Temperature,
    pressure: Pressure,
    mole_fractions: IndexMap<(Phase, Species), f64>,
}

impl EquilibriumResult {
    pub fn new(
        temperature: Temperature,
        pressure: Pressure,
        mole_fractions: IndexMap<(Phase, Species), f64>,
    ) -> Self {
        Self {
            temperature,
            pressure,
            mole_fractions,
        }
    }

    /// Result for two phases of a binary mixture from the mole fraction of
    /// the first species in each phase.
    pub(crate) fn binary(
        temperature: Temperature,
        pressure: Pressure,
        species: [Species; 2],
        phases: [(Phase, f64); 2],
    ) -> Self {
        let mut mole_fractions = IndexMap::with_capacity(4);
        for (phase, x0) in phases {
            mole_fractions.insert((phase, species[0]), x0);
            mole_fractions.insert((phase, species[1]), 1.0 - x0);
        }
        Self::new(temperature, pressure, mole_fractions)
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn pressure(&self) -> Pressure {
        self.pressure
    }

    pub fn mole_fraction(&self, phase: Phase, species: Species) -> Option<f64> {
        self.mole_fractions.get(&(phase, species)).copied()
    }

    /// The phases in the order of the search.
    pub fn phases(&self) -> Vec<Phase> {
        self.mole_fractions
            .keys()
            .map(|&(phase, _)| phase)
            .unique()
            .collect()
    }

    /// Composition of a phase in the order of the species.
    pub fn phase_composition(&self, phase: Phase) -> Option<Composition> {
        let x: Vec<f64> = self
            .mole_fractions
            .iter()
            .filter(|((p, _), _)| *p == phase)
            .map(|(_, &x)| x)
            .collect();
        (!x.is_empty()).then(|| Composition::from(x))
    }

    pub fn iter(&self) -> impl Iterator<Item = ((Phase, Species), f64)> + '_ {
        self.mole_fractions.iter().map(|(&k, &x)| (k, x))
    }
}

impl fmt::Display for EquilibriumResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EquilibriumResult(T = {} K, p = {} Pa",
            self.temperature.convert_into(KELVIN),
            self.pressure.convert_into(PASCAL)
        )?;
        for ((phase, species), x) in &self.mole_fractions {
            write!(f, ", x({phase}, {species}) = {x:.5}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quantity::BAR;

    #[test]
    fn grids() -> EqResult<()> {
        let grid = composition_grid(0.001, 0.001)?;
        assert_eq!(grid.len(), 1000);
        assert_relative_eq!(grid[999], 1.0, epsilon = 1e-12);
        assert_eq!(grid[499], 0.001 + 499.0 * 0.001);
        let scan = composition_grid(0.01, 0.01)?;
        assert_eq!(scan.len(), 100);
        assert!(composition_grid(0.01, 0.0).is_err());
        assert!(composition_grid(1.5, 0.1).is_err());
        Ok(())
    }

    #[test]
    fn binary_result() {
        let result = EquilibriumResult::binary(
            350.0 * KELVIN,
            BAR,
            [Species::Benzene, Species::Toluene],
            [(Phase::Vapor, 0.7), (Phase::Liquid, 0.5)],
        );
        assert_eq!(result.phases(), vec![Phase::Vapor, Phase::Liquid]);
        assert_eq!(result.mole_fraction(Phase::Liquid, Species::Benzene), Some(0.5));
        assert_relative_eq!(
            result.mole_fraction(Phase::Vapor, Species::Toluene).unwrap(),
            0.3,
            epsilon = 1e-15
        );
        let y = result.phase_composition(Phase::Vapor).unwrap();
        assert_relative_eq!(y.iter().sum::<f64>(), 1.0);
        assert!(result.phase_composition(Phase::Solid).is_none());
        assert_eq!(result.mole_fraction(Phase::Solid, Species::Benzene), None);
    }
}
