//! Model configuration loaded from TOML.
//!
//! The first group of keys (`materialized`, `runtime_version`, `packages`)
//! describes how the surrounding pipeline should treat the model and is
//! carried through without interpretation. The remaining keys drive
//! training.
//!
//! ```toml
//! name = "titanic_survival"
//! materialized = "model"
//! runtime_version = "1.80"
//! packages = ["ndarray", "serde"]
//! label = "SURVIVED"
//!
//! [source]
//! root = "data"
//! table = "titanic3"
//!
//! [imputer]
//! max_iter = 10
//!
//! [classifier]
//! kind = "svc"
//! c = 1.0
//!
//! [registry]
//! root = "registry"
//! ```
//!
//! Relative paths in `[source]` and `[registry]` are resolved against the
//! directory containing the configuration file.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierKind;
use crate::preprocessing::IterativeImputer;

/// Errors that may occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// How the surrounding pipeline materializes the node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Materialization {
    #[default]
    Model,
    Table,
    View,
}

impl fmt::Display for Materialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Materialization::Model => "model",
            Materialization::Table => "table",
            Materialization::View => "view",
        })
    }
}

/// Where the training table comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory of `<table>.csv` files.
    pub root: PathBuf,
    pub table: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data"),
            table: "titanic3".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub root: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("registry"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Registered model name.
    pub name: String,
    pub materialized: Materialization,
    pub runtime_version: Option<String>,
    pub packages: Vec<String>,
    /// Label column, removed from the signature inputs.
    pub label: String,
    pub source: SourceConfig,
    pub imputer: IterativeImputer,
    pub classifier: ClassifierKind,
    pub registry: RegistryConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "titanic_survival".to_string(),
            materialized: Materialization::default(),
            runtime_version: None,
            packages: Vec::new(),
            label: "SURVIVED".to_string(),
            source: SourceConfig::default(),
            imputer: IterativeImputer::default(),
            classifier: ClassifierKind::default(),
            registry: RegistryConfig::default(),
        }
    }
}

impl ModelConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ModelConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config file, resolving relative paths against its directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        if self.source.root.is_relative() {
            self.source.root = base.join(&self.source.root);
        }
        if self.registry.root.is_relative() {
            self.registry.root = base.join(&self.registry.root);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("name must not be empty".to_string()));
        }
        if self.label.trim().is_empty() {
            return Err(ConfigError::Invalid("label must not be empty".to_string()));
        }
        if self.source.table.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "source.table must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
