use quantity::{JOULE, KELVIN, MOL, RGAS};
use serde::{Deserialize, Serialize};
use thermoeq_core::parameter::ParameterError;
use thermoeq_core::polynomial::bisect;
use thermoeq_core::{CriticalRecord, EqError, EqResult, SolverOptions};

/// Bracket of the reduced critical volume $V_c/b$.
const V_CRITICAL_BRACKET: (f64, f64) = (1.0001, 100.0);

/// Shape parameters of the solid-liquid-vapor equation of state.
///
/// The volume parameters are $c=\gamma b$ and $d=\delta b$ with
/// $0<\gamma<\delta<1$.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SlvRecord {
    pub gamma: f64,
    pub delta: f64,
}

impl SlvRecord {
    pub fn new(gamma: f64, delta: f64) -> Self {
        Self { gamma, delta }
    }
}

impl Default for SlvRecord {
    fn default() -> Self {
        Self {
            gamma: 0.80,
            delta: 0.85,
        }
    }
}

impl std::fmt::Display for SlvRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SlvRecord(gamma={}, delta={})", self.gamma, self.delta)
    }
}

/// Critical point of the equation of state in reduced form.
///
/// With $v=V/b$ the repulsive part is
/// $f(v)=\frac{v-\delta}{(v-1)(v-\gamma)}=\frac{\alpha_1}{v-1}+\frac{\beta_1}{v-\gamma}$
/// and the reduced pressure is $\Pi=pb/(RT)=f(v)-\alpha/v^2$ with $\alpha=a/(bRT)$.
/// The critical conditions reduce to $f''(v_c)+3f'(v_c)/v_c=0$.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReducedCriticalPoint {
    /// reduced critical volume $v_c$
    pub volume: f64,
    /// reduced attraction $a_c/(bRT_c)$
    pub attraction: f64,
    /// reduced critical pressure $p_cb/(RT_c)$
    pub pressure: f64,
}

impl ReducedCriticalPoint {
    pub fn new(gamma: f64, delta: f64, options: SolverOptions) -> EqResult<Self> {
        let alpha1 = (1.0 - delta) / (1.0 - gamma);
        let beta1 = (delta - gamma) / (1.0 - gamma);
        let f = |v: f64| alpha1 / (v - 1.0) + beta1 / (v - gamma);
        let df = |v: f64| -alpha1 / (v - 1.0).powi(2) - beta1 / (v - gamma).powi(2);
        let d2f = |v: f64| 2.0 * alpha1 / (v - 1.0).powi(3) + 2.0 * beta1 / (v - gamma).powi(3);

        let (lo, hi) = V_CRITICAL_BRACKET;
        let volume = bisect(|v| d2f(v) + 3.0 * df(v) / v, lo, hi, options)
            .ok_or_else(|| EqError::NotConverged(String::from("SLV critical point")))?;
        let attraction = -0.5 * df(volume) * volume.powi(3);
        let pressure = f(volume) - attraction / (volume * volume);
        Ok(Self {
            volume,
            attraction,
            pressure,
        })
    }
}

/// Fitting constants of the solid-liquid-vapor equation of state for
/// a single substance.
#[derive(Clone, Debug)]
pub struct SlvParameters {
    pub critical: CriticalRecord,
    pub record: SlvRecord,
    /// attraction parameter at the critical temperature in J m³/mol²
    pub a: f64,
    /// volume parameters in m³/mol
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub kappa: f64,
    pub critical_point: ReducedCriticalPoint,
}

impl SlvParameters {
    pub fn new(
        critical: CriticalRecord,
        record: SlvRecord,
        options: SolverOptions,
    ) -> EqResult<Self> {
        let SlvRecord { gamma, delta } = record;
        if !(0.0 < gamma && gamma < delta && delta < 1.0) {
            return Err(ParameterError::IncompatibleParameters(format!(
                "SLV shape parameters require 0 < gamma < delta < 1, \
                 got gamma = {gamma}, delta = {delta}"
            ))
            .into());
        }
        let critical_point = ReducedCriticalPoint::new(gamma, delta, options)?;
        let rtc = RGAS.convert_into(JOULE / MOL / KELVIN) * critical.tc;
        let b = critical_point.pressure * rtc / critical.pc;
        Ok(Self {
            critical,
            record,
            a: critical_point.attraction * b * rtc,
            b,
            c: gamma * b,
            d: delta * b,
            kappa: thermoeq_core::cubic::kappa_peng_robinson(critical.acentric_factor),
            critical_point,
        })
    }

    /// Critical volume $V_c$ in m³/mol.
    pub fn critical_volume(&self) -> f64 {
        self.critical_point.volume * self.b
    }

    /// Coefficients of the partial fractions
    /// $\frac{V-d}{(V-b)(V-c)}=\frac{\alpha}{V-b}+\frac{\beta}{V-c}$.
    pub fn partial_fractions(&self) -> (f64, f64) {
        let (b, c, d) = (self.b, self.c, self.d);
        ((b - d) / (b - c), (d - c) / (b - c))
    }
}

impl std::fmt::Display for SlvParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SlvParameters(a={}, b={}", self.a, self.b)?;
        write!(f, ", c={}, d={}", self.c, self.d)?;
        write!(f, ", kappa={})", self.kappa)
    }
}
