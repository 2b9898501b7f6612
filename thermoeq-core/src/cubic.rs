//! Cubic equations of state for pure substances.
//!
//! The van der Waals, Redlich-Kwong-Soave and Peng-Robinson equations are
//! written as cubic polynomials in the compressibility factor $z=pV/RT$
//! with the dimensionless parameters $A=ap/(RT)^2$ and $B=bp/(RT)$.
//! The implementation closely follows the form of the equations given in
//! [this wikipedia article](https://en.wikipedia.org/wiki/Cubic_equations_of_state).
use crate::equation_of_state::polynomial::Polynomial;
use crate::equation_of_state::{
    critical_compressibility, fluid_roots, validate_state, EquationOfState, Phase, RootOptions,
};
use crate::errors::{EqError, EqResult};
use crate::species::CriticalRecord;
use quantity::{MolarVolume, Pressure, Temperature, JOULE, KELVIN, METER, MOL, PASCAL, RGAS};
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;
use std::fmt;

/// The cubic equations of state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubicForm {
    VanDerWaals,
    RedlichKwongSoave,
    PengRobinson,
}

impl CubicForm {
    /// Compressibility factor $Z_c=p_cV_c/(RT_c)$ at the critical point.
    pub fn critical_compressibility(&self) -> f64 {
        match self {
            CubicForm::VanDerWaals => 0.375,
            CubicForm::RedlichKwongSoave => 1.0 / 3.0,
            CubicForm::PengRobinson => 0.307401,
        }
    }
}

impl fmt::Display for CubicForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CubicForm::VanDerWaals => write!(f, "van der Waals"),
            CubicForm::RedlichKwongSoave => write!(f, "Redlich-Kwong-Soave"),
            CubicForm::PengRobinson => write!(f, "Peng-Robinson"),
        }
    }
}

/// Gas constant in J/(mol K).
pub(crate) fn rgas() -> f64 {
    RGAS.convert_into(JOULE / MOL / KELVIN)
}

/// Molar volume unit m³/mol.
pub(crate) fn m3_per_mol() -> MolarVolume {
    METER * METER * METER / MOL
}

/// Temperature dependence of the attraction parameter
/// $\alpha=\left(1+\kappa\left(1-\sqrt{T/T_c}\right)\right)^2$.
pub fn alpha(kappa: f64, tc: f64, t: f64) -> f64 {
    (1.0 + kappa * (1.0 - (t / tc).sqrt())).powi(2)
}

/// The $\kappa$ correlation of the Peng-Robinson equation of state.
pub fn kappa_peng_robinson(acentric_factor: f64) -> f64 {
    0.37464 + (1.54226 - 0.26992 * acentric_factor) * acentric_factor
}

/// The $\kappa$ correlation of the Redlich-Kwong-Soave equation of state.
pub fn kappa_redlich_kwong_soave(acentric_factor: f64) -> f64 {
    0.480 + (1.574 - 0.176 * acentric_factor) * acentric_factor
}

/// A cubic equation of state for a single substance.
///
/// The fitting constants are computed once from the critical constants.
#[derive(Clone, Debug)]
pub struct Cubic {
    form: CubicForm,
    record: CriticalRecord,
    /// attraction parameter at the critical temperature in J m³/mol²
    a: f64,
    /// co-volume in m³/mol
    b: f64,
    kappa: f64,
    options: RootOptions,
}

impl Cubic {
    pub fn new(form: CubicForm, record: CriticalRecord, options: RootOptions) -> Self {
        let r = rgas();
        let (tc, pc) = (record.tc, record.pc);
        let (a, b, kappa) = match form {
            CubicForm::VanDerWaals => (
                27.0 * (r * tc).powi(2) / (64.0 * pc),
                r * tc / (8.0 * pc),
                0.0,
            ),
            CubicForm::RedlichKwongSoave => (
                0.42748 * (r * tc).powi(2) / pc,
                0.08664 * r * tc / pc,
                kappa_redlich_kwong_soave(record.acentric_factor),
            ),
            CubicForm::PengRobinson => (
                0.45724 * (r * tc).powi(2) / pc,
                0.07780 * r * tc / pc,
                kappa_peng_robinson(record.acentric_factor),
            ),
        };
        Self {
            form,
            record,
            a,
            b,
            kappa,
            options,
        }
    }

    pub fn van_der_waals(record: CriticalRecord) -> Self {
        Self::new(CubicForm::VanDerWaals, record, RootOptions::default())
    }

    pub fn redlich_kwong_soave(record: CriticalRecord) -> Self {
        Self::new(CubicForm::RedlichKwongSoave, record, RootOptions::default())
    }

    pub fn peng_robinson(record: CriticalRecord) -> Self {
        Self::new(CubicForm::PengRobinson, record, RootOptions::default())
    }

    pub fn form(&self) -> CubicForm {
        self.form
    }

    pub fn record(&self) -> &CriticalRecord {
        &self.record
    }

    /// Critical volume $V_c=Z_cRT_c/p_c$ of the equation of state.
    pub fn critical_volume(&self) -> MolarVolume {
        self.form.critical_compressibility() * RGAS * self.record.critical_temperature()
            / self.record.critical_pressure()
    }

    /// Temperature dependent attraction parameter in J m³/mol².
    fn a_t(&self, t: f64) -> f64 {
        match self.form {
            CubicForm::VanDerWaals => self.a,
            _ => self.a * alpha(self.kappa, self.record.tc, t),
        }
    }

    /// Dimensionless parameters $A$ and $B$.
    fn reduced_parameters(&self, t: f64, p: f64) -> (f64, f64) {
        let rt = rgas() * t;
        (self.a_t(t) * p / (rt * rt), self.b * p / rt)
    }

    /// The cubic polynomial in the compressibility factor.
    pub fn polynomial(&self, temperature: Temperature, pressure: Pressure) -> Polynomial {
        let (a, b) = self.reduced_parameters(
            temperature.convert_into(KELVIN),
            pressure.convert_into(PASCAL),
        );
        let coefs = match self.form {
            CubicForm::VanDerWaals => vec![-a * b, a, -(1.0 + b), 1.0],
            CubicForm::RedlichKwongSoave => vec![-a * b, a - b - b * b, -1.0, 1.0],
            CubicForm::PengRobinson => vec![
                -(a * b - b * b - b * b * b),
                a - 3.0 * b * b - 2.0 * b,
                -(1.0 - b),
                1.0,
            ],
        };
        Polynomial::new(coefs)
    }

    /// Interval of compressibility factors searched for roots.
    ///
    /// The lower bound is the co-volume $B$, the upper bound corresponds to
    /// the largest molar volume of the root options but is at least $2(1+B)$.
    pub fn bounds(&self, temperature: Temperature, pressure: Pressure) -> (f64, f64) {
        let (t, p) = (temperature.convert_into(KELVIN), pressure.convert_into(PASCAL));
        let (_, b) = self.reduced_parameters(t, p);
        let v_max = self.options.max_molar_volume.convert_into(m3_per_mol());
        (b, (p * v_max / (rgas() * t)).max(2.0 * (1.0 + b)))
    }
}

impl fmt::Display for Cubic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.form, self.record)
    }
}

impl EquationOfState for Cubic {
    fn root_options(&self) -> &RootOptions {
        &self.options
    }

    fn pressure(&self, temperature: Temperature, molar_volume: MolarVolume) -> Pressure {
        let t = temperature.convert_into(KELVIN);
        let v = molar_volume.convert_into(m3_per_mol());
        let (a, b) = (self.a_t(t), self.b);
        let repulsion = rgas() * t / (v - b);
        let attraction = match self.form {
            CubicForm::VanDerWaals => a / (v * v),
            CubicForm::RedlichKwongSoave => a / (v * (v + b)),
            CubicForm::PengRobinson => a / (v * v + 2.0 * b * v - b * b),
        };
        (repulsion - attraction) * PASCAL
    }

    fn fugacity_coefficient(
        &self,
        temperature: Temperature,
        pressure: Pressure,
        molar_volume: MolarVolume,
    ) -> EqResult<f64> {
        let (t, p) = (temperature.convert_into(KELVIN), pressure.convert_into(PASCAL));
        let v = molar_volume.convert_into(m3_per_mol());
        let (a, b) = self.reduced_parameters(t, p);
        let z = p * v / (rgas() * t);
        if !(z > b) {
            return Err(EqError::InvalidState(
                String::from("fugacity_coefficient"),
                String::from("molar volume"),
                v,
            ));
        }
        let ln_phi = z - 1.0 - (z - b).ln()
            - match self.form {
                CubicForm::VanDerWaals => a / z,
                CubicForm::RedlichKwongSoave => a / b * (1.0 + b / z).ln(),
                CubicForm::PengRobinson => {
                    a / (2.0 * SQRT_2 * b)
                        * ((z + (1.0 + SQRT_2) * b) / (z + (1.0 - SQRT_2) * b)).ln()
                }
            };
        Ok(ln_phi.exp())
    }

    fn phase_candidates(
        &self,
        temperature: Temperature,
        pressure: Pressure,
    ) -> EqResult<Vec<(Phase, Option<MolarVolume>)>> {
        validate_state(temperature, pressure)?;
        let polynomial = self.polynomial(temperature, pressure);
        let (lo, hi) = self.bounds(temperature, pressure);
        let dense_below = critical_compressibility(
            temperature,
            pressure,
            self.record.critical_temperature(),
            self.critical_volume(),
        );
        let (liquid, vapor) = fluid_roots(&polynomial, lo, hi, dense_below, self.options.solver);
        let volume = |z: f64| z * RGAS * temperature / pressure;
        Ok(vec![
            (Phase::Liquid, liquid.map(volume)),
            (Phase::Vapor, vapor.map(volume)),
        ])
    }
}
