use super::{ModelVersion, RiskModel};
use crate::tables::{ReferenceTables, TableError};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown model `{0}`")]
    UnknownModel(String),
}

/// Loaded models keyed by version id (`2019_v23`).
#[derive(Debug, Default, Clone)]
pub struct ModelRegistry {
    models: BTreeMap<&'static str, Arc<RiskModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads tables for every built-in version found under `dir/{version id}`.
    /// Versions without a directory are skipped.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, TableError> {
        let dir = dir.as_ref();
        let mut registry = Self::new();

        for version in ModelVersion::builtin() {
            let version_dir = dir.join(version.id);
            if !version_dir.is_dir() {
                warn!(
                    model = version.id,
                    path = %version_dir.display(),
                    "reference tables not found; model disabled"
                );
                continue;
            }

            let tables = ReferenceTables::load_dir(&version_dir)?;
            info!(
                model = version.id,
                codes = tables.mapping.len(),
                coefficients = tables.coefficients.len(),
                "loaded reference tables"
            );
            registry.register(RiskModel::new(version, tables)?);
        }

        Ok(registry)
    }

    pub fn register(&mut self, model: RiskModel) {
        self.models.insert(model.id(), Arc::new(model));
    }

    pub fn get(&self, id: &str) -> Result<Arc<RiskModel>, RegistryError> {
        let id = id.trim();
        self.models
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(id))
            .map(|(_, model)| Arc::clone(model))
            .ok_or_else(|| RegistryError::UnknownModel(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.models.keys().copied()
    }

    pub fn models(&self) -> impl Iterator<Item = &Arc<RiskModel>> + '_ {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
