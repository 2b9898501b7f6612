use crate::parameter::ParameterError;
use thiserror::Error;

/// Error type for unsupported inputs, improperly defined states and convergence problems.
#[derive(Error, Debug)]
pub enum EqError {
    #[error("{0}")]
    Error(String),
    #[error("`{0}` did not converge within the maximum number of iterations.")]
    NotConverged(String),
    #[error("Invalid state in {0}: {1} = {2}.")]
    InvalidState(String, String, f64),
    #[error("Model is initialized for {0} components while the input specifies {1} components.")]
    IncompatibleComponents(usize, usize),
    #[error("The following species are not supported: {0}")]
    UnsupportedSpecies(String),
    #[error("No interaction parameters between the maingroups `{0}` and `{1}`.")]
    UnsupportedInteraction(String, String),
    #[error("Not implemented: {0}")]
    NotImplemented(String),
    #[error(transparent)]
    ParameterError(#[from] ParameterError),
}

/// Convenience type for `Result<T, EqError>`.
pub type EqResult<T> = Result<T, EqError>;
