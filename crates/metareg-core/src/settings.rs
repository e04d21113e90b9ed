//! Registry Settings
//!
//! Per-registry configuration: a display name used in logs and an optional
//! fallback metadata substituted when a registration supplies no keywords.

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};
use crate::meta::Kwargs;
use crate::type_key::short_type_name;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Registry name (e.g., "toolbox")
    pub name: String,

    /// Keywords used in place of an empty registration
    #[serde(default)]
    pub fallback: Option<Kwargs>,
}

impl RegistrySettings {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Kwargs) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Load settings from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| RegistryError::ConfigError(e.to_string()))
    }

    /// The fallback when `kwargs` is empty and one is configured, else `kwargs`.
    pub fn apply_fallback(&self, kwargs: Kwargs) -> Kwargs {
        match &self.fallback {
            Some(fallback) if kwargs.is_empty() => fallback.clone(),
            _ => kwargs,
        }
    }
}

/// Settings named after the registry type, without fallback.
pub fn default_settings<R: ?Sized + 'static>() -> RegistrySettings {
    RegistrySettings::named(short_type_name(std::any::type_name::<R>()))
}
