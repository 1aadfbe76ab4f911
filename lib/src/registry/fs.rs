use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use super::{validate_name, Manifest, ModelRegistry, RegisteredVersion, RegistryError};
use crate::model::{ModelContext, ModelContextParams, ModelPackage, SurvivalModel};
use crate::serialization::SerializableParams;

const ARTIFACT_FILE: &str = "model.bin";
const MANIFEST_FILE: &str = "manifest.json";
const DEFAULT_FILE: &str = "DEFAULT";

/// A registry rooted at a local directory.
#[derive(Clone, Debug)]
pub struct FsRegistry {
    root: PathBuf,
}

impl FsRegistry {
    /// Opens (and creates if needed) a registry at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn model_dir(&self, name: &str) -> Result<PathBuf, RegistryError> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }

    fn version_dir(&self, name: &str, version: &str) -> Result<PathBuf, RegistryError> {
        validate_name(version)?;
        Ok(self.model_dir(name)?.join(version))
    }

    fn existing_model_dir(&self, name: &str) -> Result<PathBuf, RegistryError> {
        let dir = self.model_dir(name)?;
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(RegistryError::UnknownModel(name.to_string()))
        }
    }

    fn existing_version_dir(&self, name: &str, version: &str) -> Result<PathBuf, RegistryError> {
        self.existing_model_dir(name)?;
        let dir = self.version_dir(name, version)?;
        if dir.join(MANIFEST_FILE).is_file() {
            Ok(dir)
        } else {
            Err(RegistryError::UnknownVersion {
                name: name.to_string(),
                version: version.to_string(),
            })
        }
    }

    fn set_default(&self, name: &str, version: &str) -> Result<(), RegistryError> {
        let dir = self.model_dir(name)?;
        let tmp = dir.join(format!(".{DEFAULT_FILE}.tmp"));
        fs::write(&tmp, version)?;
        fs::rename(&tmp, dir.join(DEFAULT_FILE))?;
        Ok(())
    }
}

impl ModelRegistry for FsRegistry {
    fn register(
        &self,
        name: &str,
        package: &ModelPackage,
    ) -> Result<RegisteredVersion, RegistryError> {
        let version = package.version_name.as_str();
        let model_dir = self.model_dir(name)?;
        let final_dir = self.version_dir(name, version)?;
        if final_dir.exists() {
            return Err(RegistryError::VersionExists {
                name: name.to_string(),
                version: version.to_string(),
            });
        }
        fs::create_dir_all(&model_dir)?;

        // Staged in a hidden directory so a failed write never looks like a version.
        let staging = model_dir.join(format!(".{version}.staging"));
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir(&staging)?;

        let bytes = package.model.context().extract_params().to_bytes()?;
        fs::write(staging.join(ARTIFACT_FILE), &bytes)?;

        let manifest = Manifest {
            model: name.to_string(),
            version: version.to_string(),
            classifier: package.model.context().classifier().kind_name().to_string(),
            signatures: package.signatures.clone(),
            metrics: package.metrics.clone(),
            comment: package.comment.clone(),
            created_at: Utc::now(),
        };
        fs::write(
            staging.join(MANIFEST_FILE),
            serde_json::to_vec_pretty(&manifest)?,
        )?;
        fs::rename(&staging, &final_dir)?;
        debug!(path = %final_dir.display(), bytes = bytes.len(), "Wrote model artifacts");

        if package.set_default {
            self.set_default(name, version)?;
        }
        info!(
            model = name,
            version,
            is_default = package.set_default,
            "Registered model version"
        );

        Ok(RegisteredVersion {
            name: name.to_string(),
            version: version.to_string(),
            location: final_dir,
            is_default: package.set_default,
        })
    }

    fn versions(&self, name: &str) -> Result<Vec<String>, RegistryError> {
        let dir = self.existing_model_dir(name)?;
        let mut versions = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let Ok(file_name) = entry.file_name().into_string() else {
                continue;
            };
            if file_name.starts_with('.') {
                continue;
            }
            if entry.path().join(MANIFEST_FILE).is_file() {
                versions.push(file_name);
            }
        }
        versions.sort();
        Ok(versions)
    }

    fn default_version(&self, name: &str) -> Result<Option<String>, RegistryError> {
        let path = self.existing_model_dir(name)?.join(DEFAULT_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let version = fs::read_to_string(path)?.trim().to_string();
        Ok((!version.is_empty()).then_some(version))
    }

    fn manifest(&self, name: &str, version: &str) -> Result<Manifest, RegistryError> {
        let dir = self.existing_version_dir(name, version)?;
        let bytes = fs::read(dir.join(MANIFEST_FILE))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn load(&self, name: &str, version: Option<&str>) -> Result<SurvivalModel, RegistryError> {
        let version = match version {
            Some(v) => v.to_string(),
            None => self
                .default_version(name)?
                .ok_or_else(|| RegistryError::NoDefault(name.to_string()))?,
        };
        let dir = self.existing_version_dir(name, &version)?;
        let bytes = fs::read(dir.join(ARTIFACT_FILE))?;
        let params = ModelContextParams::from_bytes(&bytes)?;
        let context = ModelContext::from_params(params)?;
        debug!(model = name, version = %version, "Loaded model version");
        Ok(SurvivalModel::new(context))
    }
}
