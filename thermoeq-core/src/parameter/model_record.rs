use super::identifier::Identifier;
use super::{IdentifierOption, ParameterError};
use indexmap::{IndexMap, IndexSet};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A collection of parameters of a pure substance.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PureRecord<M> {
    pub identifier: Identifier,
    pub model_record: M,
}

impl<M> PureRecord<M> {
    /// Create a new `PureRecord`.
    pub fn new(identifier: Identifier, model_record: M) -> Self {
        Self {
            identifier,
            model_record,
        }
    }

    /// Read all records of a json file.
    pub fn from_json_all<P: AsRef<Path>>(file: P) -> Result<Vec<Self>, ParameterError>
    where
        M: DeserializeOwned,
    {
        Ok(serde_json::from_reader(BufReader::new(File::open(file)?))?)
    }

    /// Create pure substance parameters from a json file.
    pub fn from_json<P>(
        substances: &[&str],
        file: P,
        identifier_option: IdentifierOption,
    ) -> Result<Vec<Self>, ParameterError>
    where
        P: AsRef<Path>,
        M: DeserializeOwned,
    {
        Self::select(substances, Self::from_json_all(file)?, identifier_option)
    }

    /// Create pure substance parameters from a json string.
    pub fn from_json_str(
        substances: &[&str],
        json: &str,
        identifier_option: IdentifierOption,
    ) -> Result<Vec<Self>, ParameterError>
    where
        M: DeserializeOwned,
    {
        Self::select(substances, serde_json::from_str(json)?, identifier_option)
    }

    /// Pick the queried substances from a list of records, in the queried order.
    pub fn select(
        substances: &[&str],
        records: Vec<Self>,
        identifier_option: IdentifierOption,
    ) -> Result<Vec<Self>, ParameterError> {
        let queried: IndexSet<String> = substances.iter().map(|s| s.to_string()).collect();
        // raise error on duplicate detection
        if queried.len() != substances.len() {
            return Err(ParameterError::IncompatibleParameters(
                "A substance was defined more than once.".to_string(),
            ));
        }

        let mut found: IndexMap<String, Self> = IndexMap::with_capacity(substances.len());
        for record in records {
            if let Some(id) = record.identifier.as_string(identifier_option) {
                if queried.contains(&id) {
                    found.insert(id, record);
                }
            }
            if found.len() == queried.len() {
                break;
            }
        }

        // report missing parameters
        let missing: Vec<&str> = queried
            .iter()
            .filter(|s| !found.contains_key(*s))
            .map(|s| s.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(ParameterError::ComponentsNotFound(missing.join(", ")));
        }

        // collect into vec in correct order
        Ok(queried
            .iter()
            .filter_map(|s| found.swap_remove(s))
            .collect())
    }
}

impl<M> std::fmt::Display for PureRecord<M>
where
    M: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PureRecord(")?;
        write!(f, "\n\tidentifier={},", self.identifier)?;
        write!(f, "\n\tmodel_record={},", self.model_record)?;
        write!(f, "\n)")
    }
}

/// A collection of parameters that model interactions between two
/// substances or segments.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BinaryRecord<I, B> {
    /// Identifier of the first component
    pub id1: I,
    /// Identifier of the second component
    pub id2: I,
    /// Binary interaction parameter(s)
    pub model_record: B,
}

impl<I, B> BinaryRecord<I, B> {
    /// Crates a new `BinaryRecord`.
    pub fn new(id1: I, id2: I, model_record: B) -> Self {
        Self {
            id1,
            id2,
            model_record,
        }
    }

    /// Read a list of `BinaryRecord`s from a JSON file.
    pub fn from_json<P: AsRef<Path>>(file: P) -> Result<Vec<Self>, ParameterError>
    where
        I: DeserializeOwned,
        B: DeserializeOwned,
    {
        Ok(serde_json::from_reader(BufReader::new(File::open(file)?))?)
    }
}

impl<I, B> std::fmt::Display for BinaryRecord<I, B>
where
    I: std::fmt::Display,
    B: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BinaryRecord(")?;
        write!(f, "\n\tid1={},", self.id1)?;
        write!(f, "\n\tid2={},", self.id2)?;
        write!(f, "\n\tmodel_record={},", self.model_record)?;
        write!(f, "\n)")
    }
}
