use thiserror::Error;

use crate::orchestrator::OrchestratorError;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Zero or more than one service matched the requested name.
    ///
    /// Both cases collapse into one error on purpose: an ambiguous name is
    /// never silently picked, and callers cannot probe which names exist.
    #[error("service {0:?} not found")]
    ServiceNotFound(String),

    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),
}
