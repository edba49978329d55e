use crate::config::ConfigError;
use thiserror::Error;

pub type DimensionsResult<T> = std::result::Result<T, DimensionsError>;

#[derive(Debug, Error)]
pub enum DimensionsError {
    #[error(
        "dimensions must be used within a DimensionsProvider; make sure the caller was handed a context from an active provider"
    )]
    NotInitialized,
    #[error(transparent)]
    Config(#[from] ConfigError),
}
