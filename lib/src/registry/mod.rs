//! Model registries: where packaged models are stored and loaded from.
//!
//! [`ModelRegistry`] is the seam the training entry point hands its
//! [`ModelPackage`] to. [`FsRegistry`] keeps every version on the local
//! filesystem:
//!
//! ```text
//! <root>/<model>/<version>/model.bin      fitted artifacts (bincode)
//! <root>/<model>/<version>/manifest.json  signatures, metrics, comment
//! <root>/<model>/DEFAULT                  name of the default version
//! ```

mod error;
mod fs;

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use error::RegistryError;
pub use fs::FsRegistry;

use crate::model::{ModelPackage, ModelSignature, SurvivalModel};

/// Metadata stored next to the artifacts of a registered version.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub model: String,
    pub version: String,
    /// Classifier family of the stored artifacts.
    pub classifier: String,
    pub signatures: BTreeMap<String, ModelSignature>,
    pub metrics: BTreeMap<String, f64>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a successful registration.
#[derive(Clone, Debug, PartialEq)]
pub struct RegisteredVersion {
    pub name: String,
    pub version: String,
    pub location: PathBuf,
    pub is_default: bool,
}

pub trait ModelRegistry {
    /// Stores a package as a new version of `name`.
    ///
    /// Fails with [`RegistryError::VersionExists`] if the version name is
    /// taken. When `package.set_default` is true the new version becomes
    /// the default.
    fn register(&self, name: &str, package: &ModelPackage)
        -> Result<RegisteredVersion, RegistryError>;

    /// Registered version names, ascending.
    fn versions(&self, name: &str) -> Result<Vec<String>, RegistryError>;

    fn default_version(&self, name: &str) -> Result<Option<String>, RegistryError>;

    fn manifest(&self, name: &str, version: &str) -> Result<Manifest, RegistryError>;

    /// Loads a version for inference, or the default one when `version` is `None`.
    fn load(&self, name: &str, version: Option<&str>) -> Result<SurvivalModel, RegistryError>;
}

/// Accepts names that are safe to use as a single path component.
pub(crate) fn validate_name(name: &str) -> Result<(), RegistryError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(RegistryError::InvalidName(name.to_string()))
    }
}
