use crate::errors::{EqError, EqResult};
use crate::{SolverOptions, Verbosity};
use indexmap::IndexMap;
use quantity::{MolarVolume, Pressure, Temperature, KELVIN, METER, MOL, PASCAL, RGAS};
use serde::{Deserialize, Serialize};
use std::fmt;

mod ideal_gas;
pub mod polynomial;

pub use ideal_gas::IdealGas;
use polynomial::{bisect, monotonic_intervals, Polynomial};

/// Label of a homogeneous phase.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    #[serde(rename = "solid")]
    Solid,
    #[serde(rename = "liquid")]
    Liquid,
    #[serde(rename = "vapor")]
    Vapor,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Solid => write!(f, "solid"),
            Phase::Liquid => write!(f, "liquid"),
            Phase::Vapor => write!(f, "vapor"),
        }
    }
}

/// Molar volumes of the phases modeled by an equation of state.
///
/// `None` marks a phase that is absent, either because no root exists in
/// its bracket or because it is thermodynamically unstable.
#[derive(Clone, Debug, Default)]
pub struct PhaseVolumes(IndexMap<Phase, Option<MolarVolume>>);

impl PhaseVolumes {
    /// Molar volume of `phase`, `None` if the phase is absent or not modeled.
    pub fn get(&self, phase: Phase) -> Option<MolarVolume> {
        self.0.get(&phase).copied().flatten()
    }

    /// Whether `phase` is modeled at all (present or absent).
    pub fn contains(&self, phase: Phase) -> bool {
        self.0.contains_key(&phase)
    }

    /// Phases that are present, in the order of the map.
    pub fn present(&self) -> Vec<Phase> {
        self.0
            .iter()
            .filter_map(|(&phase, v)| v.map(|_| phase))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Phase, Option<MolarVolume>)> + '_ {
        self.0.iter().map(|(&phase, &v)| (phase, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Phase, Option<MolarVolume>)> for PhaseVolumes {
    fn from_iter<I: IntoIterator<Item = (Phase, Option<MolarVolume>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for PhaseVolumes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .0
            .iter()
            .map(|(phase, v)| match v {
                Some(v) => {
                    let v = v.convert_into(METER * METER * METER / MOL);
                    format!("{}: {:e} m³/mol", phase, v)
                }
                None => format!("{}: absent", phase),
            })
            .collect();
        write!(f, "PhaseVolumes({})", entries.join(", "))
    }
}

/// Options of the root finding and the phase stability decision.
///
/// The options are owned by an equation of state and fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct RootOptions {
    /// Options of the bisections on the polynomial and its derivatives.
    pub solver: SolverOptions,
    /// Phases whose fugacity coefficients lie within this tolerance of the
    /// smallest fugacity coefficient are considered to coexist.
    pub fugacity_tolerance: f64,
    /// Largest molar volume considered for the vapor root.
    pub max_molar_volume: MolarVolume,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            solver: SolverOptions::default(),
            fugacity_tolerance: 0.1,
            max_molar_volume: METER * METER * METER / MOL,
        }
    }
}

impl RootOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solver(mut self, solver: SolverOptions) -> Self {
        self.solver = solver;
        self
    }

    pub fn fugacity_tolerance(mut self, fugacity_tolerance: f64) -> Self {
        self.fugacity_tolerance = fugacity_tolerance;
        self
    }

    pub fn max_molar_volume(mut self, max_molar_volume: MolarVolume) -> Self {
        self.max_molar_volume = max_molar_volume;
        self
    }

    pub fn verbosity(&self) -> Verbosity {
        self.solver.verbosity
    }
}

/// A pure-component equation of state that locates its phases by
/// root finding.
pub trait EquationOfState: Send + Sync {
    /// The options used for root finding and phase selection.
    fn root_options(&self) -> &RootOptions;

    /// Pressure from the closed form of the equation of state.
    fn pressure(&self, temperature: Temperature, molar_volume: MolarVolume) -> Pressure;

    /// Fugacity coefficient of the phase with the given molar volume.
    fn fugacity_coefficient(
        &self,
        temperature: Temperature,
        pressure: Pressure,
        molar_volume: MolarVolume,
    ) -> EqResult<f64>;

    /// Whether the fugacity coefficient of `phase` has a closed form.
    ///
    /// Phases without one never take part in the stability decision of
    /// [EquationOfState::phase_finder] and are reported absent there.
    fn has_fugacity_coefficient(&self, _phase: Phase) -> bool {
        true
    }

    /// Candidate molar volumes for every phase the model describes, without
    /// any stability decision.
    fn phase_candidates(
        &self,
        temperature: Temperature,
        pressure: Pressure,
    ) -> EqResult<Vec<(Phase, Option<MolarVolume>)>>;

    /// Molar volumes of the phases at the given temperature and pressure.
    ///
    /// Unless `ignore_equilibrium` is set, only the phases with the smallest
    /// fugacity coefficient (within the fugacity tolerance) are present.
    /// Non-stable phases are absent. So are phases without a fugacity
    /// coefficient, unless `ignore_equilibrium` is set.
    fn phase_finder(
        &self,
        temperature: Temperature,
        pressure: Pressure,
        ignore_equilibrium: bool,
    ) -> EqResult<PhaseVolumes> {
        validate_state(temperature, pressure)?;
        let candidates = self.phase_candidates(temperature, pressure)?;
        if ignore_equilibrium {
            return Ok(candidates.into_iter().collect());
        }
        let mut found = Vec::with_capacity(candidates.len());
        for &(phase, v) in &candidates {
            match v {
                Some(v) if self.has_fugacity_coefficient(phase) => {
                    found.push((phase, v, self.fugacity_coefficient(temperature, pressure, v)?))
                }
                _ => (),
            }
        }
        let options = self.root_options();
        let stable = select_stable_phases(&found, options.fugacity_tolerance);
        log_result!(
            options.verbosity(),
            "Phases at T = {} K, p = {} Pa: {}",
            temperature.convert_into(KELVIN),
            pressure.convert_into(PASCAL),
            stable
        );
        Ok(candidates
            .into_iter()
            .map(|(phase, _)| (phase, stable.get(phase)))
            .collect())
    }
}

/// Raise an error for non-positive (or non-finite) temperatures and pressures.
pub fn validate_state(temperature: Temperature, pressure: Pressure) -> EqResult<()> {
    let t = temperature.convert_into(KELVIN);
    if !(t.is_finite() && t > 0.0) {
        return Err(EqError::InvalidState(
            String::from("phase_finder"),
            String::from("temperature"),
            t,
        ));
    }
    let p = pressure.convert_into(PASCAL);
    if !(p.is_finite() && p > 0.0) {
        return Err(EqError::InvalidState(
            String::from("phase_finder"),
            String::from("pressure"),
            p,
        ));
    }
    Ok(())
}

/// Decide which of the candidate phases are stable.
///
/// Every candidate `(phase, molar volume, fugacity coefficient)` whose
/// fugacity coefficient lies within `tolerance` of the smallest one is
/// present, all others are absent.
pub fn select_stable_phases(
    candidates: &[(Phase, MolarVolume, f64)],
    tolerance: f64,
) -> PhaseVolumes {
    let phi_min = candidates
        .iter()
        .map(|&(_, _, phi)| phi)
        .filter(|phi| phi.is_finite())
        .fold(f64::INFINITY, f64::min);
    candidates
        .iter()
        .map(|&(phase, v, phi)| {
            let stable = phi.is_finite() && (phi == phi_min || phi - phi_min < tolerance);
            (phase, stable.then_some(v))
        })
        .collect()
}

/// Assign the roots of a polynomial in the compressibility factor to the
/// fluid phases.
///
/// The interval `[lo, hi]` is split into monotonic intervals. If there are
/// at least two, the root in the first interval is the liquid candidate and
/// the root in the last interval is the vapor candidate, while the middle
/// intervals are skipped. A single root is labelled by [label_fluid_roots].
///
/// The returned values are compressibility factors.
pub fn fluid_roots(
    polynomial: &Polynomial,
    lo: f64,
    hi: f64,
    dense_below: Option<f64>,
    options: SolverOptions,
) -> (Option<f64>, Option<f64>) {
    let intervals = monotonic_intervals(polynomial, lo, hi, options);
    fluid_roots_in(polynomial, &intervals, dense_below, options)
}

/// Same as [fluid_roots] for precomputed monotonic intervals.
pub fn fluid_roots_in(
    polynomial: &Polynomial,
    intervals: &[(f64, f64)],
    dense_below: Option<f64>,
    options: SolverOptions,
) -> (Option<f64>, Option<f64>) {
    let root = |&(a, b): &(f64, f64)| bisect(|z| polynomial.eval(z), a, b, options);
    let roots: Vec<f64> = match intervals {
        [] => Vec::new(),
        [single] => root(single).into_iter().collect(),
        [first, .., last] => root(first).into_iter().chain(root(last)).collect(),
    };
    label_fluid_roots(&roots, dense_below)
}

/// Liquid and vapor candidates from the sorted fluid roots.
///
/// The smallest root is the liquid and the largest root is the vapor.
/// A single root is the liquid if its compressibility factor lies below
/// `dense_below`, the compressibility factor of the critical volume at
/// the current state, and the vapor otherwise. Above the critical
/// temperature `dense_below` is `None` and a single root is always the
/// vapor.
pub fn label_fluid_roots(
    roots: &[f64],
    dense_below: Option<f64>,
) -> (Option<f64>, Option<f64>) {
    match *roots {
        [] => (None, None),
        [z] => match dense_below {
            Some(z_critical) if z < z_critical => (Some(z), None),
            _ => (None, Some(z)),
        },
        [liquid, .., vapor] => (Some(liquid), Some(vapor)),
    }
}

/// Compressibility factor $z=pV_c/(RT)$ of the critical volume below the
/// critical temperature, `None` otherwise.
pub fn critical_compressibility(
    temperature: Temperature,
    pressure: Pressure,
    critical_temperature: Temperature,
    critical_volume: MolarVolume,
) -> Option<f64> {
    (temperature < critical_temperature)
        .then(|| (pressure * critical_volume / (RGAS * temperature)).into_value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantity::JOULE;

    fn volumes() -> (MolarVolume, MolarVolume) {
        let unit = METER * METER * METER / MOL;
        (1e-4 * unit, 2e-2 * unit)
    }

    #[test]
    fn equal_fugacities_coexist() {
        let (vl, vv) = volumes();
        let phases =
            select_stable_phases(&[(Phase::Liquid, vl, 2.0), (Phase::Vapor, vv, 2.0)], 0.1);
        assert_eq!(phases.present(), vec![Phase::Liquid, Phase::Vapor]);
        assert_eq!(phases.get(Phase::Liquid), Some(vl));
        assert_eq!(phases.get(Phase::Vapor), Some(vv));
    }

    #[test]
    fn lower_fugacity_is_stable() {
        let (vl, vv) = volumes();
        let phases =
            select_stable_phases(&[(Phase::Liquid, vl, 2.0), (Phase::Vapor, vv, 5.0)], 0.1);
        assert_eq!(phases.present(), vec![Phase::Liquid]);
        assert!(phases.contains(Phase::Vapor));
        assert_eq!(phases.get(Phase::Vapor), None);
        assert_eq!(phases.len(), 2);
    }

    #[test]
    fn single_roots_are_labelled_by_the_critical_volume() {
        assert_eq!(label_fluid_roots(&[], Some(0.3)), (None, None));
        assert_eq!(label_fluid_roots(&[0.08], Some(0.3)), (Some(0.08), None));
        assert_eq!(label_fluid_roots(&[0.9], Some(0.3)), (None, Some(0.9)));
        assert_eq!(label_fluid_roots(&[0.08], None), (None, Some(0.08)));
        assert_eq!(
            label_fluid_roots(&[0.001, 0.01, 0.98], Some(0.003)),
            (Some(0.001), Some(0.98))
        );

        let (tc, vc) = (500.0 * KELVIN, 1e-4 * METER * METER * METER / MOL);
        let z = critical_compressibility(400.0 * KELVIN, 1e6 * PASCAL, tc, vc).unwrap();
        assert!((z - 100.0 / (RGAS * 400.0 * KELVIN).convert_into(JOULE / MOL)).abs() < 1e-12);
        assert_eq!(critical_compressibility(600.0 * KELVIN, 1e6 * PASCAL, tc, vc), None);
    }

    #[test]
    fn invalid_states() {
        let t = 300.0 * KELVIN;
        let p = 1e5 * PASCAL;
        assert!(validate_state(t, p).is_ok());
        assert!(matches!(
            validate_state(-1.0 * KELVIN, p),
            Err(EqError::InvalidState(_, _, _))
        ));
        assert!(validate_state(t, 0.0 * PASCAL).is_err());
    }
}
