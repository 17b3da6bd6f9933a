//! Startup configuration for a form builder session.
//!
//! The configuration only decides what the available pool starts with. It can
//! be built in code or read from a TOML file:
//!
//! ```toml
//! default_field_type = "text"
//! available_fields = ["Brand", "Brand Location", "Horn Status"]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Field names the available panel starts with when nothing else is given.
pub const DEFAULT_FIELD_NAMES: &[&str] = &[
    "AGA Herd Book?",
    "Alternate Idents",
    "Required",
    "Ancestral Code Enhancer",
    "Animal Breed Information",
    "Animal By AI ET Information",
    "Animal Main Pedigree Certificate Name",
    "Animal Pedigree Certificate Name",
    "Animal Status",
    "Brand",
    "Brand Location",
    "Breeder Description",
    "Colour 2",
    "Height Recorded?",
    "Horn Status",
    "Owner Description",
    "PH No. Location",
    "POIS",
    "POMS",
    "Subregister",
    "Tattoo Enhancer",
    "Test Label",
    "Template Add Animal Form Dup 3",
    "Default Form Create - Animal",
    "auto-generated",
    "By ET",
    "BreedPercents",
];

pub const DEFAULT_FIELD_TYPE: &str = "text";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormBuilderConfig {
    /// Names of the fields seeded into the available pool, in panel order.
    pub available_fields: Vec<String>,
    /// Type given to every seeded field.
    pub default_field_type: String,
}

impl Default for FormBuilderConfig {
    fn default() -> Self {
        Self {
            available_fields: DEFAULT_FIELD_NAMES.iter().map(|s| s.to_string()).collect(),
            default_field_type: DEFAULT_FIELD_TYPE.to_string(),
        }
    }
}

impl FormBuilderConfig {
    /// A configuration seeding the given names with the default type.
    pub fn with_fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available_fields: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_field_type.trim().is_empty() {
            return Err(ConfigError::EmptyFieldType);
        }
        if let Some(index) = self.available_fields.iter().position(|n| n.trim().is_empty()) {
            return Err(ConfigError::EmptyFieldName { index });
        }
        Ok(())
    }
}
