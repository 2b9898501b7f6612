use super::{validate_state, EquationOfState, Phase, RootOptions};
use crate::errors::EqResult;
use quantity::{MolarVolume, Pressure, Temperature, RGAS};

/// The ideal gas $pV=RT$.
///
/// The only phase is the vapor and the fugacity coefficient is one.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdealGas {
    options: RootOptions,
}

impl IdealGas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RootOptions) -> Self {
        Self { options }
    }
}

impl EquationOfState for IdealGas {
    fn root_options(&self) -> &RootOptions {
        &self.options
    }

    fn pressure(&self, temperature: Temperature, molar_volume: MolarVolume) -> Pressure {
        RGAS * temperature / molar_volume
    }

    fn fugacity_coefficient(
        &self,
        _temperature: Temperature,
        _pressure: Pressure,
        _molar_volume: MolarVolume,
    ) -> EqResult<f64> {
        Ok(1.0)
    }

    fn phase_candidates(
        &self,
        temperature: Temperature,
        pressure: Pressure,
    ) -> EqResult<Vec<(Phase, Option<MolarVolume>)>> {
        validate_state(temperature, pressure)?;
        Ok(vec![(Phase::Vapor, Some(RGAS * temperature / pressure))])
    }
}
