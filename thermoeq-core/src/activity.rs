use crate::composition::Composition;
use crate::errors::{EqError, EqResult};
use crate::species::Species;
use ndarray::Array1;
use quantity::{Pressure, Temperature};

/// Activity coefficient models of liquid mixtures.
pub trait ActivityModel: Send + Sync {
    /// The species of the mixture in the order used by compositions.
    fn species(&self) -> &[Species];

    /// Logarithms of the activity coefficients of all species.
    fn ln_activity_coefficients(
        &self,
        temperature: Temperature,
        pressure: Pressure,
        composition: &Composition,
    ) -> EqResult<Array1<f64>>;

    /// Activity coefficient $\gamma_i$ of a single species.
    fn species_activity_coefficient(
        &self,
        species: Species,
        temperature: Temperature,
        pressure: Pressure,
        composition: &Composition,
    ) -> EqResult<f64> {
        let i = self
            .species()
            .iter()
            .position(|&s| s == species)
            .ok_or_else(|| EqError::UnsupportedSpecies(species.to_string()))?;
        let ln_gamma = self.ln_activity_coefficients(temperature, pressure, composition)?;
        Ok(ln_gamma[i].exp())
    }

    /// Raise an error unless the composition has one entry per species.
    ///
    /// Normalization is not checked here, see [Composition::checked].
    fn validate(&self, composition: &Composition) -> EqResult<()> {
        let n = self.species().len();
        if composition.len() != n {
            return Err(EqError::IncompatibleComponents(n, composition.len()));
        }
        Ok(())
    }
}

/// The ideal solution with $\gamma_i=1$.
#[derive(Clone, Debug)]
pub struct IdealActivity {
    species: Vec<Species>,
}

impl IdealActivity {
    pub fn new(species: Vec<Species>) -> Self {
        Self { species }
    }
}

impl ActivityModel for IdealActivity {
    fn species(&self) -> &[Species] {
        &self.species
    }

    fn ln_activity_coefficients(
        &self,
        _temperature: Temperature,
        _pressure: Pressure,
        composition: &Composition,
    ) -> EqResult<Array1<f64>> {
        self.validate(composition)?;
        Ok(Array1::zeros(self.species.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantity::{BAR, KELVIN};

    #[test]
    fn ideal_solution() -> EqResult<()> {
        let model = IdealActivity::new(vec![Species::Benzene, Species::Toluene]);
        let x = Composition::binary(0.3);
        let gamma = model.species_activity_coefficient(Species::Toluene, 350.0 * KELVIN, BAR, &x)?;
        assert_eq!(gamma, 1.0);
        assert!(matches!(
            model.species_activity_coefficient(Species::Water, 350.0 * KELVIN, BAR, &x),
            Err(EqError::UnsupportedSpecies(_))
        ));
        assert!(matches!(
            model.ln_activity_coefficients(350.0 * KELVIN, BAR, &Composition::pure(3, 0)),
            Err(EqError::IncompatibleComponents(2, 3))
        ));
        Ok(())
    }
}
