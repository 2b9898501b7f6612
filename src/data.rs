//! Built-in parameter tables.
//!
//! The tables are shipped as JSON files in the `parameters` directory,
//! embedded into the binary and parsed once per process on first access.
use crate::unifac::{Unifac, UnifacBinaryRecord, UnifacGroupRecord, UnifacParameters};
use lazy_static::lazy_static;
use std::sync::Arc;
use thermoeq_core::parameter::ChemicalRecord;
use thermoeq_core::{ConstantsTable, CriticalRecord, EqError, EqResult, Species};

const CRITICAL: &str = include_str!("../parameters/critical.json");
const UNIFAC_GROUPS: &str = include_str!("../parameters/unifac/groups.json");
const UNIFAC_INTERACTIONS: &str = include_str!("../parameters/unifac/interactions.json");
const UNIFAC_SUBSTANCES: &str = include_str!("../parameters/unifac/substances.json");

lazy_static! {
    static ref CRITICAL_CONSTANTS: Result<ConstantsTable, String> =
        ConstantsTable::from_json_str(&Species::ALL, CRITICAL).map_err(|e| e.to_string());
    static ref GROUPS: Result<Vec<UnifacGroupRecord>, String> =
        serde_json::from_str(UNIFAC_GROUPS).map_err(|e| e.to_string());
    static ref INTERACTIONS: Result<Vec<UnifacBinaryRecord>, String> =
        serde_json::from_str(UNIFAC_INTERACTIONS).map_err(|e| e.to_string());
    static ref SUBSTANCES: Result<Vec<ChemicalRecord>, String> =
        serde_json::from_str(UNIFAC_SUBSTANCES).map_err(|e| e.to_string());
}

fn built_in<T>(table: &'static Result<T, String>, name: &str) -> EqResult<&'static T> {
    table
        .as_ref()
        .map_err(|e| EqError::Error(format!("built-in table `{name}` is corrupt: {e}")))
}

/// Physical constants of all supported species.
pub fn critical_constants() -> EqResult<&'static ConstantsTable> {
    built_in(&*CRITICAL_CONSTANTS, "critical.json")
}

/// Physical constants of a single species.
pub fn critical_record(species: Species) -> EqResult<CriticalRecord> {
    Ok(*critical_constants()?.get(species)?)
}

pub fn unifac_groups() -> EqResult<&'static [UnifacGroupRecord]> {
    built_in(&*GROUPS, "unifac/groups.json").map(Vec::as_slice)
}

pub fn unifac_interactions() -> EqResult<&'static [UnifacBinaryRecord]> {
    built_in(&*INTERACTIONS, "unifac/interactions.json").map(Vec::as_slice)
}

/// Group decompositions of the species supported by UNIFAC.
pub fn unifac_substances() -> EqResult<&'static [ChemicalRecord]> {
    built_in(&*SUBSTANCES, "unifac/substances.json").map(Vec::as_slice)
}

/// UNIFAC model for the given species from the built-in tables.
pub fn unifac(species: &[Species]) -> EqResult<Unifac> {
    let parameters = UnifacParameters::new(
        species,
        unifac_substances()?,
        unifac_groups()?,
        unifac_interactions()?,
    )?;
    Ok(Unifac::new(Arc::new(parameters)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_complete() -> EqResult<()> {
        let table = critical_constants()?;
        assert_eq!(table.len(), Species::ALL.len());
        assert_eq!(critical_record(Species::Water)?.tc, 647.096);
        assert_eq!(unifac_groups()?.len(), 8);
        assert_eq!(unifac_interactions()?.len(), 21);
        assert_eq!(unifac_substances()?.len(), 8);
        Ok(())
    }

    #[test]
    fn every_condensable_species_has_groups() -> EqResult<()> {
        let condensable: Vec<Species> = Species::ALL
            .into_iter()
            .filter(|s| !matches!(s, Species::Nitrogen | Species::CarbonDioxide))
            .collect();
        let model = unifac(&condensable)?;
        assert_eq!(model.parameters.subgroups.len(), 8);
        assert!(matches!(
            unifac(&[Species::Nitrogen, Species::Water, Species::CarbonDioxide]),
            Err(EqError::UnsupportedSpecies(s)) if s == "nitrogen, carbon dioxide"
        ));
        Ok(())
    }
}
