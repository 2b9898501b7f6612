use super::{composition_grid, EquilibriumOptions, EquilibriumResult, PhaseCurves};
use crate::equation_of_state::{validate_state, Phase};
use crate::errors::{EqError, EqResult};
use crate::interpolation::InterpolableTable;
use crate::mixture::HomogeneousMixture;
use crate::species::Species;
use crate::Verbosity;
use quantity::{MolarEnergy, Pressure, Temperature};

/// Search for coexisting phases of a set of candidate phases.
///
/// The first mixture is the trial phase whose composition is scanned, the
/// second mixture is the phase whose composition is recovered from the
/// inverted chemical potential curves. Currently limited to binary
/// mixtures and two phases.
#[derive(Clone)]
pub struct MultiphaseEquilibrium {
    mixtures: Vec<HomogeneousMixture>,
    options: EquilibriumOptions,
}

impl MultiphaseEquilibrium {
    pub fn new(mixtures: Vec<HomogeneousMixture>, options: EquilibriumOptions) -> EqResult<Self> {
        let Some(first) = mixtures.first() else {
            return Err(EqError::Error(String::from(
                "At least one candidate phase is required.",
            )));
        };
        let species = first.species();
        if mixtures.iter().any(|m| m.species() != species) {
            return Err(EqError::Error(String::from(
                "All candidate phases have to contain the same species in the same order.",
            )));
        }
        let mut phases: Vec<Phase> = mixtures.iter().map(|m| m.phase()).collect();
        phases.sort();
        phases.dedup();
        if phases.len() != mixtures.len() {
            return Err(EqError::Error(String::from(
                "Each candidate phase has to have a distinct phase label.",
            )));
        }
        Ok(Self { mixtures, options })
    }

    pub fn mixtures(&self) -> &[HomogeneousMixture] {
        &self.mixtures
    }

    pub fn options(&self) -> &EquilibriumOptions {
        &self.options
    }

    pub fn species(&self) -> Vec<Species> {
        self.mixtures[0].species()
    }

    fn check_supported(&self) -> EqResult<[Species; 2]> {
        let species = self.species();
        if self.mixtures.len() != 2 {
            return Err(EqError::NotImplemented(format!(
                "equilibria between {} phases",
                self.mixtures.len()
            )));
        }
        match species.as_slice() {
            &[s0, s1] => Ok([s0, s1]),
            _ => Err(EqError::NotImplemented(format!(
                "equilibria of mixtures with {} species",
                species.len()
            ))),
        }
    }

    /// Chemical potential curves of all candidate phases.
    pub fn curves(
        &self,
        temperature: Temperature,
        pressure: Pressure,
    ) -> EqResult<Vec<PhaseCurves>> {
        validate_state(temperature, pressure)?;
        self.mixtures
            .iter()
            .map(|m| PhaseCurves::tabulate(m, temperature, pressure, &self.options))
            .collect()
    }

    /// Tabulate the curves and prepare the scan over the trial compositions.
    ///
    /// The returned iterator evaluates one trial composition at a time and
    /// can be stopped at any point.
    pub fn scan(&self, temperature: Temperature, pressure: Pressure) -> EqResult<EquilibriumScan> {
        let species = self.check_supported()?;
        let grid = composition_grid(self.options.scan_min, self.options.scan_step)?;
        let mut curves = self.curves(temperature, pressure)?;
        let other = curves.pop().ok_or_else(|| EqError::Error(String::from("missing phase")))?;
        let trial = curves.pop().ok_or_else(|| EqError::Error(String::from("missing phase")))?;
        let inverted = other
            .chemical_potentials
            .iter()
            .map(|(_, table)| table.invert())
            .collect();
        Ok(EquilibriumScan {
            temperature,
            pressure,
            species,
            phases: [trial.phase(), other.phase()],
            trial: trial
                .chemical_potentials
                .into_iter()
                .map(|(_, table)| table)
                .collect(),
            inverted,
            grid: grid.into_iter(),
            tolerance: self.options.composition_tolerance,
            verbosity: self.options.verbosity,
        })
    }

    /// All accepted equilibrium points at the given temperature and pressure,
    /// ordered by the trial composition.
    pub fn find_phase_equilibria(
        &self,
        temperature: Temperature,
        pressure: Pressure,
    ) -> EqResult<Vec<EquilibriumResult>> {
        Ok(self.scan(temperature, pressure)?.collect())
    }
}

/// Lazy scan over the trial compositions of a [MultiphaseEquilibrium].
pub struct EquilibriumScan {
    temperature: Temperature,
    pressure: Pressure,
    species: [Species; 2],
    phases: [Phase; 2],
    trial: Vec<InterpolableTable<f64, MolarEnergy>>,
    inverted: Vec<InterpolableTable<MolarEnergy, f64>>,
    grid: std::vec::IntoIter<f64>,
    tolerance: f64,
    verbosity: Verbosity,
}

impl EquilibriumScan {
    /// The number of trial compositions that are not evaluated yet.
    pub fn remaining(&self) -> usize {
        self.grid.len()
    }

    fn evaluate(&self, x_trial: f64) -> Option<EquilibriumResult> {
        let candidates = self
            .trial
            .iter()
            .zip(&self.inverted)
            .map(|(mu, inverted)| inverted.value(mu.value(x_trial)?))
            .collect::<Option<Vec<f64>>>()?;
        let (x0, x1) = (candidates[0], candidates[1]);
        log_iter!(
            self.verbosity,
            " {:.4} | {:.6} | {:.6} | {:9.2e}",
            x_trial,
            x0,
            x1,
            (x0 - x1).abs()
        );
        if !((x0 - x1).abs() < self.tolerance) {
            return None;
        }
        let x_other = 0.5 * (x0 + x1);
        log_result!(
            self.verbosity,
            "Equilibrium: x({}) = {:.4}, x({}) = {:.4}",
            self.phases[0],
            x_trial,
            self.phases[1],
            x_other
        );
        Some(EquilibriumResult::binary(
            self.temperature,
            self.pressure,
            self.species,
            [(self.phases[0], x_trial), (self.phases[1], x_other)],
        ))
    }
}

impl Iterator for EquilibriumScan {
    type Item = EquilibriumResult;

    fn next(&mut self) -> Option<EquilibriumResult> {
        loop {
            let x = self.grid.next()?;
            if let Some(result) = self.evaluate(x) {
                return Some(result);
            }
        }
    }
}
