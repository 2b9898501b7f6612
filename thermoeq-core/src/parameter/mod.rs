//! Structures that are used to build model parameters from JSON records.
use std::io;
use thiserror::Error;

mod chemical_record;
mod identifier;
mod model_record;
mod segment;

pub use chemical_record::ChemicalRecord;
pub use identifier::{Identifier, IdentifierOption};
pub use model_record::{BinaryRecord, PureRecord};
pub use segment::SegmentRecord;

/// Error type for incomplete parameter information and IO problems.
#[derive(Error, Debug)]
pub enum ParameterError {
    #[error(transparent)]
    FileIO(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("The following component(s) were not found: {0}")]
    ComponentsNotFound(String),
    #[error("Parameters are incompatible: {0}")]
    IncompatibleParameters(String),
    #[error("Missing parameters: {0}")]
    MissingParameters(String),
}
