use std::path::PathBuf;

use thiserror::Error;

/// Structural invariant violations reported by [`FormState::validate`].
///
/// The gesture engine never produces these; they exist so hosts and tests can
/// check a state they assembled by hand.
///
/// [`FormState::validate`]: crate::model::FormState::validate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form has no rows")]
    NoRows,
    #[error("row {row_id} has no columns")]
    EmptyRow { row_id: String },
    #[error("id {id} is used more than once")]
    DuplicateId { id: String },
    #[error("id {id} collides with a reserved drop-zone id")]
    ReservedId { id: String },
}

/// Errors raised while loading a [`FormBuilderConfig`].
///
/// [`FormBuilderConfig`]: crate::config::FormBuilderConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("available field {index} has an empty name")]
    EmptyFieldName { index: usize },
    #[error("default field type must not be empty")]
    EmptyFieldType,
}
