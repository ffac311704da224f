use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
