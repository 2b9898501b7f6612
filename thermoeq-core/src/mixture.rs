use crate::activity::ActivityModel;
use crate::composition::Composition;
use crate::equation_of_state::{EquationOfState, Phase};
use crate::errors::{EqError, EqResult};
use crate::species::Species;
use crate::STANDARD_PRESSURE;
use quantity::{MolarEnergy, Pressure, Temperature, JOULE, MOL, RGAS};
use std::sync::Arc;

/// A species of a homogeneous mixture together with its pure-component
/// equation of state.
#[derive(Clone)]
pub struct MixtureSpecies {
    pub species: Species,
    pub eos: Arc<dyn EquationOfState>,
    pub phase: Phase,
}

/// A single candidate phase: species described by individual equations of
/// state and an activity model for the non-ideality of mixing.
///
/// Chemical potentials are departures from the pure ideal gas at the same
/// temperature and [STANDARD_PRESSURE].
#[derive(Clone)]
pub struct HomogeneousMixture {
    phase: Phase,
    components: Vec<MixtureSpecies>,
    activity: Arc<dyn ActivityModel>,
}

/// Chemical potentials and molar Gibbs energy of a mixture at a single
/// composition.
#[derive(Clone, Debug)]
pub struct MixtureSample {
    pub composition: Composition,
    /// `None` for species that are absent or whose phase does not exist.
    pub chemical_potentials: Vec<Option<MolarEnergy>>,
    pub gibbs_energy: Option<MolarEnergy>,
}

impl HomogeneousMixture {
    pub fn new(
        phase: Phase,
        components: Vec<(Species, Arc<dyn EquationOfState>)>,
        activity: Arc<dyn ActivityModel>,
    ) -> EqResult<Self> {
        let n = activity.species().len();
        if components.len() != n {
            return Err(EqError::IncompatibleComponents(n, components.len()));
        }
        if components
            .iter()
            .zip(activity.species())
            .any(|((s, _), a)| s != a)
        {
            return Err(EqError::Error(String::from(
                "The species of the mixture and of the activity model must be in the same order.",
            )));
        }
        let components = components
            .into_iter()
            .map(|(species, eos)| MixtureSpecies {
                species,
                eos,
                phase,
            })
            .collect();
        Ok(Self {
            phase,
            components,
            activity,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn components(&self) -> &[MixtureSpecies] {
        &self.components
    }

    pub fn species(&self) -> Vec<Species> {
        self.components.iter().map(|c| c.species).collect()
    }

    pub fn activity(&self) -> &Arc<dyn ActivityModel> {
        &self.activity
    }

    /// Chemical potentials $\mu_i^*=RT\ln\left(\varphi_i p/p^\circ\right)$ of the pure
    /// species in the phase of the mixture.
    ///
    /// The phase is located with `ignore_equilibrium`, so metastable roots are
    /// used. `None` if the equation of state has no root for the phase.
    pub fn reference_potentials(
        &self,
        temperature: Temperature,
        pressure: Pressure,
    ) -> EqResult<Vec<Option<MolarEnergy>>> {
        let rt = RGAS * temperature;
        let p_rel = (pressure / STANDARD_PRESSURE).into_value();
        self.components
            .iter()
            .map(|c| {
                let volumes = c.eos.phase_finder(temperature, pressure, true)?;
                let Some(v) = volumes.get(c.phase) else {
                    return Ok(None);
                };
                let phi = c.eos.fugacity_coefficient(temperature, pressure, v)?;
                Ok(Some(rt * (phi * p_rel).ln()))
            })
            .collect()
    }

    /// Chemical potentials and Gibbs energy at the given composition.
    pub fn sample(
        &self,
        temperature: Temperature,
        pressure: Pressure,
        composition: Composition,
    ) -> EqResult<MixtureSample> {
        let reference = self.reference_potentials(temperature, pressure)?;
        self.sample_with_reference(temperature, pressure, composition, &reference)
    }

    /// Same as [HomogeneousMixture::sample] with precomputed reference potentials.
    pub fn sample_with_reference(
        &self,
        temperature: Temperature,
        pressure: Pressure,
        composition: Composition,
        reference: &[Option<MolarEnergy>],
    ) -> EqResult<MixtureSample> {
        if reference.len() != self.components.len() {
            return Err(EqError::IncompatibleComponents(
                self.components.len(),
                reference.len(),
            ));
        }
        let ln_gamma = self
            .activity
            .ln_activity_coefficients(temperature, pressure, &composition)?;
        let rt = RGAS * temperature;

        let chemical_potentials: Vec<_> = composition
            .iter()
            .zip(ln_gamma.iter())
            .zip(reference)
            .map(|((&x, &ln_gamma), &mu_ref)| {
                let mu_ref = mu_ref?;
                let ln_a = x.ln() + ln_gamma;
                (x > 0.0 && ln_a.is_finite()).then(|| mu_ref + rt * ln_a)
            })
            .collect();

        let mut gibbs_energy = Some(0.0 * JOULE / MOL);
        for (&x, mu) in composition.iter().zip(&chemical_potentials) {
            if x > 0.0 {
                gibbs_energy = gibbs_energy.zip(*mu).map(|(g, mu)| g + x * mu);
            }
        }

        Ok(MixtureSample {
            composition,
            chemical_potentials,
            gibbs_energy,
        })
    }
}

impl std::fmt::Display for HomogeneousMixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let species: Vec<_> = self.components.iter().map(|c| c.species.name()).collect();
        write!(f, "HomogeneousMixture({}: {})", self.phase, species.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IdealActivity, IdealGas};
    use approx::assert_relative_eq;
    use quantity::{BAR, KELVIN};

    fn ideal_vapor() -> HomogeneousMixture {
        let species = vec![Species::Benzene, Species::Toluene];
        let eos: Arc<dyn EquationOfState> = Arc::new(IdealGas::new());
        HomogeneousMixture::new(
            Phase::Vapor,
            species.iter().map(|&s| (s, eos.clone())).collect(),
            Arc::new(IdealActivity::new(species)),
        )
        .unwrap()
    }

    #[test]
    fn ideal_gas_mixture() -> EqResult<()> {
        let mixture = ideal_vapor();
        let t = 350.0 * KELVIN;
        let p = 2.0 * BAR;
        let sample = mixture.sample(t, p, Composition::binary(0.25))?;
        let rt = (RGAS * t).convert_into(JOULE / MOL);
        let mu: Vec<f64> = sample
            .chemical_potentials
            .iter()
            .map(|mu| mu.unwrap().convert_into(JOULE / MOL))
            .collect();
        assert_relative_eq!(mu[0], rt * (0.25f64 * 2.0).ln(), max_relative = 1e-12);
        assert_relative_eq!(mu[1], rt * (0.75f64 * 2.0).ln(), max_relative = 1e-12);
        assert_relative_eq!(
            sample.gibbs_energy.unwrap().convert_into(JOULE / MOL),
            0.25 * mu[0] + 0.75 * mu[1],
            max_relative = 1e-12
        );
        Ok(())
    }

    #[test]
    fn absent_species() -> EqResult<()> {
        let mixture = ideal_vapor();
        let sample = mixture.sample(350.0 * KELVIN, BAR, Composition::binary(1.0))?;
        assert!(sample.chemical_potentials[0].is_some());
        assert!(sample.chemical_potentials[1].is_none());
        assert!(sample.gibbs_energy.is_some());
        Ok(())
    }

    #[test]
    fn species_order_is_checked() {
        let eos: Arc<dyn EquationOfState> = Arc::new(IdealGas::new());
        let activity = Arc::new(IdealActivity::new(vec![Species::Benzene, Species::Toluene]));
        let swapped = HomogeneousMixture::new(
            Phase::Vapor,
            vec![(Species::Toluene, eos.clone()), (Species::Benzene, eos.clone())],
            activity.clone(),
        );
        assert!(matches!(swapped, Err(EqError::Error(_))));
        let single =
            HomogeneousMixture::new(Phase::Vapor, vec![(Species::Benzene, eos)], activity);
        assert!(matches!(single, Err(EqError::IncompatibleComponents(2, 1))));
    }
}
