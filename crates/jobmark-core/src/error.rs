use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid value for {key}: {value:?} (expected a non-negative integer)")]
    InvalidInterval { key: &'static str, value: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
