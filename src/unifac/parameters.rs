use super::record::{UnifacInteraction, UnifacRecord};
use indexmap::IndexMap;
use itertools::Itertools;
use ndarray::{Array1, Array2};
use thermoeq_core::parameter::{
    BinaryRecord, ChemicalRecord, IdentifierOption, ParameterError, SegmentRecord,
};
use thermoeq_core::{EqError, EqResult, Species};

/// Subgroup parameters as read from parameter files.
pub type UnifacGroupRecord = SegmentRecord<UnifacRecord>;
/// Maingroup interaction parameters as read from parameter files.
pub type UnifacBinaryRecord = BinaryRecord<String, UnifacInteraction>;

/// Parameters of the UNIFAC model for a list of species.
///
/// Subgroups are indexed in the order of their first appearance in the
/// chemical records of the species.
#[derive(Clone, Debug)]
pub struct UnifacParameters {
    pub species: Vec<Species>,
    /// subgroup names
    pub subgroups: Vec<String>,
    /// maingroup of every subgroup
    pub maingroups: Vec<String>,
    /// subgroup volume parameters
    pub r: Array1<f64>,
    /// subgroup surface parameters
    pub q: Array1<f64>,
    /// number of subgroups `nu[[i, k]]` of type k in species i
    pub nu: Array2<f64>,
    /// interaction parameters `a[[m, n]]` between subgroups in K
    pub a: Array2<f64>,
}

impl UnifacParameters {
    pub fn new(
        species: &[Species],
        chemical_records: &[ChemicalRecord],
        group_records: &[UnifacGroupRecord],
        binary_records: &[UnifacBinaryRecord],
    ) -> EqResult<Self> {
        // decomposition of each species
        let mut segment_counts = Vec::with_capacity(species.len());
        let mut unsupported = Vec::new();
        for s in species {
            let record = chemical_records.iter().find(|cr| {
                cr.identifier.as_string(IdentifierOption::Name).as_deref() == Some(s.name())
            });
            match record {
                Some(record) => segment_counts.push(record.segment_count()),
                None => unsupported.push(s.name()),
            }
        }
        if !unsupported.is_empty() {
            return Err(EqError::UnsupportedSpecies(unsupported.join(", ")));
        }

        // subgroups
        let groups: IndexMap<&str, &UnifacRecord> = group_records
            .iter()
            .map(|g| (g.identifier.as_str(), &g.model_record))
            .collect();
        let mut subgroups: IndexMap<String, &UnifacRecord> = IndexMap::new();
        for counts in &segment_counts {
            for subgroup in counts.keys() {
                if subgroups.contains_key(subgroup) {
                    continue;
                }
                let record = groups.get(subgroup.as_str()).ok_or_else(|| {
                    ParameterError::MissingParameters(format!("UNIFAC subgroup `{subgroup}`"))
                })?;
                subgroups.insert(subgroup.clone(), record);
            }
        }

        let n = species.len();
        let ng = subgroups.len();
        let r = subgroups.values().map(|g| g.r).collect();
        let q = subgroups.values().map(|g| g.q).collect();
        let maingroups: Vec<String> = subgroups.values().map(|g| g.maingroup.clone()).collect();
        let mut nu = Array2::zeros([n, ng]);
        for (i, counts) in segment_counts.iter().enumerate() {
            for (subgroup, &count) in counts {
                if let Some(k) = subgroups.get_index_of(subgroup) {
                    nu[[i, k]] = count;
                }
            }
        }

        // maingroup interactions
        let interactions: IndexMap<(&str, &str), f64> = binary_records
            .iter()
            .flat_map(|br| {
                [
                    ((br.id1.as_str(), br.id2.as_str()), br.model_record.a12),
                    ((br.id2.as_str(), br.id1.as_str()), br.model_record.a21),
                ]
            })
            .collect();
        let mut a = Array2::zeros([ng, ng]);
        for m in 0..ng {
            for k in 0..ng {
                let (gm, gk) = (maingroups[m].as_str(), maingroups[k].as_str());
                if gm == gk {
                    continue;
                }
                a[[m, k]] = *interactions
                    .get(&(gm, gk))
                    .ok_or_else(|| EqError::UnsupportedInteraction(gm.into(), gk.into()))?;
            }
        }

        Ok(Self {
            species: species.to_vec(),
            subgroups: subgroups.into_keys().collect(),
            maingroups,
            r,
            q,
            nu,
            a,
        })
    }

    /// Segment volume $r_i=\sum_k\nu_{ki}R_k$ of each species.
    pub fn r_species(&self) -> Array1<f64> {
        self.nu.dot(&self.r)
    }

    /// Segment surface $q_i=\sum_k\nu_{ki}Q_k$ of each species.
    pub fn q_species(&self) -> Array1<f64> {
        self.nu.dot(&self.q)
    }

    /// Group interaction energies $\psi_{mn}=\exp(-a_{mn}/T)$ at temperature `t` in K.
    pub fn psi(&self, t: f64) -> Array2<f64> {
        self.a.mapv(|a| (-a / t).exp())
    }

    /// Table of the group decomposition of all species.
    pub fn to_markdown(&self) -> String {
        let mut output = format!("|species|{}|", self.subgroups.join("|"));
        output.push_str(&format!("\n|-|{}", "-|".repeat(self.subgroups.len())));
        for (species, nu) in self.species.iter().zip(self.nu.outer_iter()) {
            output.push_str(&format!("\n|{}|{}|", species, nu.iter().join("|")));
        }
        output
    }
}

impl std::fmt::Display for UnifacParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UnifacParameters(")?;
        write!(f, "\n\tspecies={:?}", self.species.iter().map(|s| s.name()).collect::<Vec<_>>())?;
        write!(f, "\n\tsubgroups={:?}", self.subgroups)?;
        write!(f, "\n\tmaingroups={:?}", self.maingroups)?;
        write!(f, "\n\tr={}", self.r)?;
        write!(f, "\n\tq={}", self.q)?;
        write!(f, "\n)")
    }
}
