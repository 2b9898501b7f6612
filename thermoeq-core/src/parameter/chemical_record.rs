use super::{Identifier, ParameterError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Chemical information of a substance.
///
/// The molecule is represented by the list of its functional groups
/// (segments). The order of the segments is irrelevant for
/// group-contribution models without bond information.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ChemicalRecord {
    pub identifier: Identifier,
    pub segments: Vec<String>,
}

impl ChemicalRecord {
    /// Create a new `ChemicalRecord`.
    pub fn new(identifier: Identifier, segments: Vec<String>) -> ChemicalRecord {
        Self {
            identifier,
            segments,
        }
    }

    /// Read a list of `ChemicalRecord`s from a JSON file.
    pub fn from_json<P: AsRef<Path>>(file: P) -> Result<Vec<Self>, ParameterError> {
        Ok(serde_json::from_reader(BufReader::new(File::open(file)?))?)
    }

    /// Count the number of occurences of each individual segment identifier in the
    /// chemical record.
    ///
    /// The map contains the segment identifier as key and the count as value,
    /// in the order of first appearance.
    pub fn segment_count(&self) -> IndexMap<String, f64> {
        let mut counts = IndexMap::with_capacity(self.segments.len());
        for si in &self.segments {
            *counts.entry(si.clone()).or_insert(0.0) += 1.0;
        }
        counts
    }
}

impl std::fmt::Display for ChemicalRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChemicalRecord(")?;
        write!(f, "\n\tidentifier={},", self.identifier)?;
        write!(f, "\n\tsegments={:?}\n)", self.segments)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn count_segments() {
        let toluene = r#"
        {
            "identifier": {
                "cas": "108-88-3",
                "name": "toluene"
            },
            "segments": ["ACH", "ACH", "ACH", "ACH", "ACH", "ACCH3"]
        }"#;
        let record: ChemicalRecord = serde_json::from_str(toluene).unwrap();
        let counts = record.segment_count();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["ACH"], 5.0);
        assert_eq!(counts["ACCH3"], 1.0);
        assert_eq!(counts.get_index(0).map(|(k, _)| k.as_str()), Some("ACH"));
    }
}
