use crate::parameter::{IdentifierOption, ParameterError, PureRecord};
use indexmap::IndexMap;
use quantity::{MolarWeight, Pressure, Temperature, GRAM, KELVIN, MOL, PASCAL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Chemical species known to the parameter tables.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    #[serde(rename = "water")]
    Water,
    #[serde(rename = "methanol")]
    Methanol,
    #[serde(rename = "ethanol")]
    Ethanol,
    #[serde(rename = "acetone")]
    Acetone,
    #[serde(rename = "benzene")]
    Benzene,
    #[serde(rename = "toluene")]
    Toluene,
    #[serde(rename = "n-hexane")]
    NHexane,
    #[serde(rename = "n-heptane")]
    NHeptane,
    #[serde(rename = "nitrogen")]
    Nitrogen,
    #[serde(rename = "carbon dioxide")]
    CarbonDioxide,
}

impl Species {
    pub const ALL: [Species; 10] = [
        Species::Water,
        Species::Methanol,
        Species::Ethanol,
        Species::Acetone,
        Species::Benzene,
        Species::Toluene,
        Species::NHexane,
        Species::NHeptane,
        Species::Nitrogen,
        Species::CarbonDioxide,
    ];

    /// The name used to identify the species in parameter files.
    pub fn name(&self) -> &'static str {
        match self {
            Species::Water => "water",
            Species::Methanol => "methanol",
            Species::Ethanol => "ethanol",
            Species::Acetone => "acetone",
            Species::Benzene => "benzene",
            Species::Toluene => "toluene",
            Species::NHexane => "n-hexane",
            Species::NHeptane => "n-heptane",
            Species::Nitrogen => "nitrogen",
            Species::CarbonDioxide => "carbon dioxide",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Species {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .into_iter()
            .find(|species| species.name() == s)
            .ok_or_else(|| ParameterError::ComponentsNotFound(s.to_string()))
    }
}

/// Physical constants of a pure substance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CriticalRecord {
    /// molar weight in units of g/mol
    pub molarweight: f64,
    /// critical temperature in units of K
    pub tc: f64,
    /// critical pressure in units of Pa
    pub pc: f64,
    /// acentric factor
    pub acentric_factor: f64,
    /// normal boiling temperature in units of K
    pub tb: f64,
}

impl CriticalRecord {
    pub fn new(molarweight: f64, tc: f64, pc: f64, acentric_factor: f64, tb: f64) -> Self {
        Self {
            molarweight,
            tc,
            pc,
            acentric_factor,
            tb,
        }
    }

    pub fn molar_weight(&self) -> MolarWeight {
        self.molarweight * GRAM / MOL
    }

    pub fn critical_temperature(&self) -> Temperature {
        self.tc * KELVIN
    }

    pub fn critical_pressure(&self) -> Pressure {
        self.pc * PASCAL
    }

    pub fn boiling_temperature(&self) -> Temperature {
        self.tb * KELVIN
    }
}

impl fmt::Display for CriticalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CriticalRecord(molarweight={}", self.molarweight)?;
        write!(f, ", tc={} K", self.tc)?;
        write!(f, ", pc={} Pa", self.pc)?;
        write!(f, ", acentric_factor={}", self.acentric_factor)?;
        write!(f, ", tb={} K)", self.tb)
    }
}

/// Read-only table of physical constants.
#[derive(Debug, Clone, Default)]
pub struct ConstantsTable {
    records: IndexMap<Species, CriticalRecord>,
}

impl ConstantsTable {
    /// Build the table from pure records.
    ///
    /// Records whose name is not a known [Species] are skipped.
    pub fn from_records(records: Vec<PureRecord<CriticalRecord>>) -> Self {
        let records = records
            .into_iter()
            .filter_map(|r| {
                let name = r.identifier.as_string(IdentifierOption::Name)?;
                let species = name.parse().ok()?;
                Some((species, r.model_record))
            })
            .collect();
        Self { records }
    }

    /// Read the records of `species` from a JSON file containing a list
    /// of pure records.
    ///
    /// Fails if one of the species is missing or queried twice.
    pub fn from_json<P>(species: &[Species], file: P) -> Result<Self, ParameterError>
    where
        P: AsRef<Path>,
    {
        let names = Self::names(species);
        let records = PureRecord::from_json(&names, file, IdentifierOption::Name)?;
        Ok(Self::from_records(records))
    }

    /// Same as [ConstantsTable::from_json] for a JSON string.
    pub fn from_json_str(species: &[Species], json: &str) -> Result<Self, ParameterError> {
        let names = Self::names(species);
        let records = PureRecord::from_json_str(&names, json, IdentifierOption::Name)?;
        Ok(Self::from_records(records))
    }

    fn names(species: &[Species]) -> Vec<&'static str> {
        species.iter().map(Species::name).collect()
    }

    pub fn get(&self, species: Species) -> Result<&CriticalRecord, ParameterError> {
        self.records
            .get(&species)
            .ok_or_else(|| ParameterError::ComponentsNotFound(species.to_string()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn species(&self) -> impl Iterator<Item = Species> + '_ {
        self.records.keys().copied()
    }
}
