use serde::{Deserialize, Serialize};

/// UNIFAC subgroup parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UnifacRecord {
    /// Name of the maingroup the subgroup belongs to
    pub maingroup: String,
    /// Relative van der Waals volume
    pub r: f64,
    /// Relative van der Waals surface area
    pub q: f64,
}

impl UnifacRecord {
    pub fn new(maingroup: String, r: f64, q: f64) -> Self {
        Self { maingroup, r, q }
    }
}

impl std::fmt::Display for UnifacRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UnifacRecord(maingroup={}", self.maingroup)?;
        write!(f, ", r={}", self.r)?;
        write!(f, ", q={})", self.q)
    }
}

/// Interaction parameters between two maingroups in units of Kelvin.
///
/// `a12` describes the interaction of the first with the second maingroup,
/// `a21` the reverse. Both are needed because the interaction is asymmetric.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct UnifacInteraction {
    pub a12: f64,
    pub a21: f64,
}

impl UnifacInteraction {
    pub fn new(a12: f64, a21: f64) -> Self {
        Self { a12, a21 }
    }
}

impl std::fmt::Display for UnifacInteraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UnifacInteraction(a12={} K, a21={} K)", self.a12, self.a21)
    }
}
