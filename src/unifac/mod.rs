//! The UNIFAC group-contribution model for activity coefficients.
//!
//! The activity coefficient of every species is the sum of a combinatorial
//! contribution, which accounts for differences in size and shape of the
//! molecules, and a residual contribution from the interactions between
//! functional groups:
//!
//! $$\ln\gamma_i=\ln\gamma_i^C+\ln\gamma_i^R$$
//!
//! Parameters are taken from
//! [Hansen et al. (1991)](https://doi.org/10.1021/ie00056a050).
use ndarray::{Array1, Array2};
use quantity::{Pressure, Temperature, KELVIN};
use std::path::Path;
use std::sync::Arc;
use thermoeq_core::parameter::{BinaryRecord, ChemicalRecord, SegmentRecord};
use thermoeq_core::{ActivityModel, Composition, EqError, EqResult, Species};

mod parameters;
mod record;
pub use parameters::{UnifacBinaryRecord, UnifacGroupRecord, UnifacParameters};
pub use record::{UnifacInteraction, UnifacRecord};

/// Coordination number.
const Z: f64 = 10.0;

/// The UNIFAC activity coefficient model.
#[derive(Clone, Debug)]
pub struct Unifac {
    pub parameters: Arc<UnifacParameters>,
}

impl Unifac {
    pub fn new(parameters: Arc<UnifacParameters>) -> Self {
        Self { parameters }
    }

    /// Read the parameters of the given species from JSON files with
    /// chemical records, subgroup records and maingroup interactions.
    pub fn from_json<P: AsRef<Path>>(
        species: &[Species],
        substances: P,
        groups: P,
        interactions: P,
    ) -> EqResult<Self> {
        let chemical_records = ChemicalRecord::from_json(substances)?;
        let group_records = SegmentRecord::from_json(groups)?;
        let binary_records = BinaryRecord::from_json(interactions)?;
        let parameters =
            UnifacParameters::new(species, &chemical_records, &group_records, &binary_records)?;
        Ok(Self::new(Arc::new(parameters)))
    }

    /// Precompute all composition dependent quantities.
    pub fn state(&self, composition: &Composition) -> EqResult<UnifacState<'_>> {
        UnifacState::new(&self.parameters, composition)
    }
}

impl ActivityModel for Unifac {
    fn species(&self) -> &[Species] {
        &self.parameters.species
    }

    fn ln_activity_coefficients(
        &self,
        temperature: Temperature,
        _pressure: Pressure,
        composition: &Composition,
    ) -> EqResult<Array1<f64>> {
        let state = self.state(composition)?;
        Ok(state.ln_activity_coefficients(temperature))
    }
}

/// Group activity coefficients
/// $\ln\Gamma_k=Q_k\left(1-\ln\sum_m\Theta_m\psi_{mk}-\sum_m\frac{\Theta_m\psi_{km}}{\sum_n\Theta_n\psi_{nm}}\right)$.
fn ln_group_activity_coefficients(
    q: &Array1<f64>,
    theta: &Array1<f64>,
    psi: &Array2<f64>,
) -> Array1<f64> {
    let s = theta.dot(psi);
    let t = psi.dot(&(theta / &s));
    q * &(1.0 - s.mapv(f64::ln) - t)
}

/// Subgroup surface fractions from subgroup counts weighted with any
/// positive factors (mole fractions or a pure-species decomposition).
fn surface_fractions(counts: &Array1<f64>, q: &Array1<f64>) -> (Array1<f64>, Array1<f64>) {
    let x = counts / counts.sum();
    let qx = q * &x;
    let theta = &qx / qx.sum();
    (x, theta)
}

/// Composition dependent quantities of the UNIFAC model.
///
/// A state belongs to a single composition. A different composition needs a
/// new state.
#[derive(Clone, Debug)]
pub struct UnifacState<'a> {
    parameters: &'a UnifacParameters,
    composition: Composition,
    /// subgroup mole fractions
    pub x_group: Array1<f64>,
    /// subgroup surface fractions
    pub theta_group: Array1<f64>,
    pub r: Array1<f64>,
    pub q: Array1<f64>,
    /// volume fractions
    pub phi: Array1<f64>,
    /// surface fractions
    pub theta: Array1<f64>,
    pub l: Array1<f64>,
    /// $\varphi_i/x_i=r_i/\sum_jx_jr_j$, finite for vanishing mole fractions
    phi_over_x: Array1<f64>,
    /// $\theta_i/\varphi_i$
    theta_over_phi: Array1<f64>,
}

impl<'a> UnifacState<'a> {
    fn new(parameters: &'a UnifacParameters, composition: &Composition) -> EqResult<Self> {
        let n = parameters.species.len();
        if composition.len() != n {
            return Err(EqError::IncompatibleComponents(n, composition.len()));
        }
        let x = composition.molefracs();
        let (x_group, theta_group) = surface_fractions(&x.dot(&parameters.nu), &parameters.q);

        let r = parameters.r_species();
        let q = parameters.q_species();
        let xr = x.dot(&r);
        let xq = x.dot(&q);
        let phi_over_x = &r / xr;
        let theta_over_phi = (&q / xq) / &phi_over_x;
        let phi = x * &phi_over_x;
        let theta = x * &q / xq;
        let l = (&r - &q) * (0.5 * Z) - (&r - 1.0);

        Ok(Self {
            parameters,
            composition: composition.clone(),
            x_group,
            theta_group,
            r,
            q,
            phi,
            theta,
            l,
            phi_over_x,
            theta_over_phi,
        })
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Combinatorial contribution
    /// $\ln\gamma_i^C=\ln\frac{\varphi_i}{x_i}+\frac{z}{2}q_i\ln\frac{\theta_i}{\varphi_i}+l_i-\frac{\varphi_i}{x_i}\sum_jx_jl_j$.
    pub fn ln_gamma_combinatorial(&self) -> Array1<f64> {
        let xl = self.composition.molefracs().dot(&self.l);
        self.phi_over_x.mapv(f64::ln) + &self.q * &self.theta_over_phi.mapv(f64::ln) * (0.5 * Z)
            + &self.l
            - &self.phi_over_x * xl
    }

    /// Residual contribution
    /// $\ln\gamma_i^R=\sum_k\nu_{ki}\left(\ln\Gamma_k-\ln\Gamma_k^{(i)}\right)$.
    pub fn ln_gamma_residual(&self, temperature: Temperature) -> Array1<f64> {
        let p = self.parameters;
        let psi = p.psi(temperature.convert_into(KELVIN));
        let ln_gamma_mix = ln_group_activity_coefficients(&p.q, &self.theta_group, &psi);
        Array1::from_iter(p.nu.outer_iter().map(|nu_i| {
            let (_, theta_pure) = surface_fractions(&nu_i.to_owned(), &p.q);
            let ln_gamma_pure = ln_group_activity_coefficients(&p.q, &theta_pure, &psi);
            nu_i.iter()
                .zip(ln_gamma_mix.iter().zip(&ln_gamma_pure))
                .filter(|(nu, _)| **nu > 0.0)
                .map(|(&nu, (&mix, &pure))| nu * (mix - pure))
                .sum::<f64>()
        }))
    }

    pub fn ln_activity_coefficients(&self, temperature: Temperature) -> Array1<f64> {
        self.ln_gamma_combinatorial() + self.ln_gamma_residual(temperature)
    }

    /// Activity coefficient $\gamma_i=\exp\left(\ln\gamma_i^C+\ln\gamma_i^R\right)$ of a species.
    pub fn species_activity_coefficient(
        &self,
        species: Species,
        temperature: Temperature,
        _pressure: Pressure,
    ) -> EqResult<f64> {
        let i = self
            .parameters
            .species
            .iter()
            .position(|&s| s == species)
            .ok_or_else(|| EqError::UnsupportedSpecies(species.to_string()))?;
        Ok(self.ln_activity_coefficients(temperature)[i].exp())
    }
}
