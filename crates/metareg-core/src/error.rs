//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No entry for the key in the metadata center.
    #[error("KEY/{0}")]
    KeyNotFound(String),

    /// A construction or check hook rejected the supplied keywords.
    #[error("META/{0}")]
    ConstructionError(String),

    /// A subtype was defined under a parent the lineage has never seen.
    #[error("LINEAGE/{0}")]
    LineageError(String),

    #[error("CONFIG/{0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    pub fn key_not_found(key: &impl std::fmt::Debug) -> Self {
        Self::KeyNotFound(format!("{:?} is not registered", key))
    }

    pub fn construction(msg: impl Into<String>) -> Self {
        Self::ConstructionError(msg.into())
    }
}
