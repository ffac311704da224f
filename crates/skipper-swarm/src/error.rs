use thiserror::Error;

use skipper_core::orchestrator::OrchestratorError;

#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("invalid docker host {0:?} (expected unix://<path> or tcp://<host:port>)")]
    InvalidHost(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] hyper::Error),

    #[error("request build error: {0}")]
    Request(#[from] hyper::http::Error),

    #[error("query encoding error: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("engine responded with status {status}: {message}")]
    Engine { status: u16, message: String },
}

pub type SwarmResult<T> = Result<T, SwarmError>;

impl From<SwarmError> for OrchestratorError {
    fn from(err: SwarmError) -> Self {
        match err {
            SwarmError::Engine { status, message } => OrchestratorError::Api { status, message },
            SwarmError::Codec(e) => OrchestratorError::Decode(e.to_string()),
            other => OrchestratorError::Transport(other.to_string()),
        }
    }
}
