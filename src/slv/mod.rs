//! A modified van der Waals equation of state that describes solid, liquid
//! and vapor phases of a pure substance.
//!
//! $$p=\frac{RT(V-d)}{(V-b)(V-c)}-\frac{a(T)}{V^2}$$
//!
//! The additional pole at $V=c<d<b$ creates a dense branch that is
//! interpreted as the solid. Written in the compressibility factor the
//! equation of state is a quartic
//!
//! $$z^4-(B+C+1)z^3+(BC+D+A)z^2-A(B+C)z+ABC=0$$
//!
//! with $A=ap/(RT)^2$ and $B$, $C$, $D$ the volume parameters times $p/(RT)$.
//!
//! The fugacity coefficient has a closed form on the fluid branch $V>b$
//! only. The pole at $V=b$ separates the solid branch from the ideal gas
//! limit, so solid roots are reported as candidates but never take part
//! in the stability decision.
use quantity::{MolarVolume, Pressure, Temperature, JOULE, KELVIN, METER, MOL, PASCAL, RGAS};
use std::sync::Arc;
use thermoeq_core::cubic::alpha;
use thermoeq_core::polynomial::{bisect, monotonic_intervals, roots_in, Polynomial};
use thermoeq_core::{
    critical_compressibility, label_fluid_roots, log_iter, validate_state, CriticalRecord,
    EqError, EqResult, EquationOfState, Phase, RootOptions,
};

mod parameters;
pub use parameters::{ReducedCriticalPoint, SlvParameters, SlvRecord};

fn rgas() -> f64 {
    RGAS.convert_into(JOULE / MOL / KELVIN)
}

fn m3_per_mol() -> MolarVolume {
    METER * METER * METER / MOL
}

/// The solid-liquid-vapor equation of state.
#[derive(Clone, Debug)]
pub struct Slv {
    pub parameters: Arc<SlvParameters>,
    options: RootOptions,
}

impl Slv {
    /// Solid-liquid-vapor equation of state with default root options.
    pub fn new(parameters: Arc<SlvParameters>) -> Self {
        Self::with_options(parameters, RootOptions::default())
    }

    pub fn with_options(parameters: Arc<SlvParameters>, options: RootOptions) -> Self {
        Self {
            parameters,
            options,
        }
    }

    /// Fit the equation of state to the critical point of a substance
    /// using the default shape parameters.
    pub fn from_critical_record(critical: CriticalRecord) -> EqResult<Self> {
        let options = RootOptions::default();
        let parameters = SlvParameters::new(critical, SlvRecord::default(), options.solver)?;
        Ok(Self::with_options(Arc::new(parameters), options))
    }

    /// Temperature dependent attraction parameter in J m³/mol².
    fn a_t(&self, t: f64) -> f64 {
        let p = &self.parameters;
        p.a * alpha(p.kappa, p.critical.tc, t)
    }

    /// Dimensionless parameters $A$, $B$, $C$ and $D$.
    fn reduced_parameters(&self, t: f64, p: f64) -> [f64; 4] {
        let rt = rgas() * t;
        let s = p / rt;
        let params = &self.parameters;
        [self.a_t(t) * s / rt, params.b * s, params.c * s, params.d * s]
    }

    /// The quartic polynomial in the compressibility factor.
    pub fn polynomial(&self, temperature: Temperature, pressure: Pressure) -> Polynomial {
        let [a, b, c, d] = self.reduced_parameters(
            temperature.convert_into(KELVIN),
            pressure.convert_into(PASCAL),
        );
        Polynomial::new(vec![
            a * b * c,
            -a * (b + c),
            b * c + d + a,
            -(b + c + 1.0),
            1.0,
        ])
    }

    /// Interval of compressibility factors searched for roots.
    ///
    /// The lower bound is the solid pole $C$.
    pub fn bounds(&self, temperature: Temperature, pressure: Pressure) -> (f64, f64) {
        let (t, p) = (temperature.convert_into(KELVIN), pressure.convert_into(PASCAL));
        let [_, b, c, _] = self.reduced_parameters(t, p);
        let v_max = self.options.max_molar_volume.convert_into(m3_per_mol());
        (c, (p * v_max / (rgas() * t)).max(2.0 * (1.0 + b)))
    }

    /// Compressibility factors of the solid, liquid and vapor roots.
    ///
    /// The solid root is bracketed by $(C, D)$, where the quartic always
    /// changes its sign. The fluid roots are the roots above the pole $B$
    /// in the monotonic intervals of the quartic. The smallest one is the
    /// liquid and the largest one the vapor. A single fluid root below the
    /// critical temperature is the liquid if it lies on the dense side of
    /// the critical volume.
    pub fn roots(&self, temperature: Temperature, pressure: Pressure) -> [Option<f64>; 3] {
        let t = temperature.convert_into(KELVIN);
        let p = pressure.convert_into(PASCAL);
        let [_, b, c, d] = self.reduced_parameters(t, p);
        let polynomial = self.polynomial(temperature, pressure);
        let (lo, hi) = self.bounds(temperature, pressure);
        let solver = self.options.solver;

        let solid = bisect(|z| polynomial.eval(z), c, d, solver);
        let intervals = monotonic_intervals(&polynomial, lo, hi, solver);
        log_iter!(
            solver.verbosity,
            "SLV at T = {} K, p = {} Pa: {} monotonic intervals",
            t,
            p,
            intervals.len()
        );
        let fluid: Vec<f64> = roots_in(&polynomial, &intervals, solver)
            .into_iter()
            .flatten()
            .filter(|&z| z > b)
            .collect();
        let dense_below = critical_compressibility(
            temperature,
            pressure,
            self.parameters.critical.critical_temperature(),
            self.parameters.critical_volume() * m3_per_mol(),
        );
        let (liquid, vapor) = label_fluid_roots(&fluid, dense_below);
        [solid, liquid, vapor]
    }
}

impl std::fmt::Display for Slv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slv({}, {})", self.parameters.critical, self.parameters.record)
    }
}

impl EquationOfState for Slv {
    fn root_options(&self) -> &RootOptions {
        &self.options
    }

    fn pressure(&self, temperature: Temperature, molar_volume: MolarVolume) -> Pressure {
        let t = temperature.convert_into(KELVIN);
        let v = molar_volume.convert_into(m3_per_mol());
        let SlvParameters { b, c, d, .. } = *self.parameters;
        let p = rgas() * t * (v - d) / ((v - b) * (v - c)) - self.a_t(t) / (v * v);
        p * PASCAL
    }

    fn has_fugacity_coefficient(&self, phase: Phase) -> bool {
        phase != Phase::Solid
    }

    /// Fugacity coefficient of a fluid root.
    ///
    /// $\ln\varphi=z-1-\ln z-\alpha\ln(1-B/z)-\beta\ln(1-C/z)-A/z$.
    ///
    /// Molar volumes on the solid branch $c<V<b$ give
    /// [EqError::NotImplemented], volumes below $c$ are invalid.
    fn fugacity_coefficient(
        &self,
        temperature: Temperature,
        pressure: Pressure,
        molar_volume: MolarVolume,
    ) -> EqResult<f64> {
        let (t, p) = (temperature.convert_into(KELVIN), pressure.convert_into(PASCAL));
        let v = molar_volume.convert_into(m3_per_mol());
        let [a, b, c, _] = self.reduced_parameters(t, p);
        let (alpha, beta) = self.parameters.partial_fractions();
        let z = p * v / (rgas() * t);
        if !(z > c) {
            return Err(EqError::InvalidState(
                String::from("fugacity_coefficient"),
                String::from("molar volume"),
                v,
            ));
        }
        if !(z > b) {
            return Err(EqError::NotImplemented(String::from(
                "fugacity coefficient on the solid branch of the SLV equation of state",
            )));
        }
        let ln_phi =
            z - 1.0 - z.ln() - alpha * (1.0 - b / z).ln() - beta * (1.0 - c / z).ln() - a / z;
        Ok(ln_phi.exp())
    }

    fn phase_candidates(
        &self,
        temperature: Temperature,
        pressure: Pressure,
    ) -> EqResult<Vec<(Phase, Option<MolarVolume>)>> {
        validate_state(temperature, pressure)?;
        let [solid, liquid, vapor] = self.roots(temperature, pressure);
        let volume = |z: f64| z * RGAS * temperature / pressure;
        Ok(vec![
            (Phase::Solid, solid.map(volume)),
            (Phase::Liquid, liquid.map(volume)),
            (Phase::Vapor, vapor.map(volume)),
        ])
    }
}
