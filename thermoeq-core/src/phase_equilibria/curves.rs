use super::{composition_grid, EquilibriumOptions, StatePoint};
use crate::composition::Composition;
use crate::equation_of_state::Phase;
use crate::errors::{EqError, EqResult};
use crate::interpolation::InterpolableTable;
use crate::mixture::{HomogeneousMixture, MixtureSample};
use crate::species::Species;
use quantity::{MolarEnergy, Pressure, Temperature, KELVIN, PASCAL};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Chemical potential and Gibbs energy curves of one phase of a binary
/// mixture, keyed by the mole fraction of the first species.
#[derive(Clone, Debug)]
pub struct PhaseCurves {
    pub chemical_potentials: Vec<(StatePoint, InterpolableTable<f64, MolarEnergy>)>,
    pub gibbs_energy: (StatePoint, InterpolableTable<f64, MolarEnergy>),
}

impl PhaseCurves {
    /// Sample the mixture on the composition grid of the options.
    ///
    /// Compositions at which a value does not exist are skipped.
    pub fn tabulate(
        mixture: &HomogeneousMixture,
        temperature: Temperature,
        pressure: Pressure,
        options: &EquilibriumOptions,
    ) -> EqResult<Self> {
        let species = mixture.species();
        if species.len() != 2 {
            return Err(EqError::NotImplemented(format!(
                "chemical potential curves for {} species",
                species.len()
            )));
        }
        let phase = mixture.phase();
        let grid = composition_grid(options.curve_min, options.curve_step)?;
        let reference = mixture.reference_potentials(temperature, pressure)?;
        let sample = |&x: &f64| {
            let composition = Composition::binary(x);
            mixture.sample_with_reference(temperature, pressure, composition, &reference)
        };

        #[cfg(feature = "rayon")]
        let samples: Vec<MixtureSample> = grid.par_iter().map(sample).collect::<EqResult<_>>()?;
        #[cfg(not(feature = "rayon"))]
        let samples: Vec<MixtureSample> = grid.iter().map(sample).collect::<EqResult<_>>()?;

        let point = |species: Option<Species>| StatePoint {
            phase,
            species,
            temperature,
            pressure,
        };
        let mut chemical_potentials: Vec<_> = species
            .iter()
            .map(|&s| (point(Some(s)), InterpolableTable::new()))
            .collect();
        let mut gibbs_energy = (point(None), InterpolableTable::new());
        for s in &samples {
            let x0 = s.composition[0];
            for ((_, table), mu) in chemical_potentials.iter_mut().zip(&s.chemical_potentials) {
                if let Some(mu) = mu {
                    table.insert(x0, *mu);
                }
            }
            if let Some(g) = s.gibbs_energy {
                gibbs_energy.1.insert(x0, g);
            }
        }

        log_result!(
            options.verbosity,
            "Tabulated {} curves at T = {} K, p = {} Pa: {} points ({} with Gibbs energy)",
            phase,
            temperature.convert_into(KELVIN),
            pressure.convert_into(PASCAL),
            samples.len(),
            gibbs_energy.1.len()
        );

        Ok(Self {
            chemical_potentials,
            gibbs_energy,
        })
    }

    pub fn phase(&self) -> Phase {
        self.gibbs_energy.0.phase
    }

    /// Chemical potential curve of a species.
    pub fn chemical_potential(
        &self,
        species: Species,
    ) -> Option<&InterpolableTable<f64, MolarEnergy>> {
        self.chemical_potentials
            .iter()
            .find(|(point, _)| point.species == Some(species))
            .map(|(_, table)| table)
    }

    /// Plain-text dump of all curves of the phase.
    pub fn to_delimited_string(&self, delimiter: &str) -> String {
        self.chemical_potentials
            .iter()
            .chain(std::iter::once(&self.gibbs_energy))
            .map(|(point, table)| format!("# {}\n{}", point, table.to_delimited_string(delimiter)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
