use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{RegistryError, Result};
use crate::store;

/// One registered project. A missing `path` is a first-class
/// "not configured" state at the registry level, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    projects: BTreeMap<String, ProjectEntry>,
}

/// JSON-backed project registry under a store root.
///
/// The registry file is re-read on every operation. Mutations take the
/// store lock and write atomically.
#[derive(Debug, Clone)]
pub struct ProjectRegistry {
    store_root: PathBuf,
}

impl ProjectRegistry {
    pub fn open(store_root: impl Into<PathBuf>) -> Self {
        Self {
            store_root: store_root.into(),
        }
    }

    /// Open the registry at the per-user default store root.
    pub fn open_default() -> Self {
        Self::open(store::default_store_root())
    }

    pub fn registry_file(&self) -> PathBuf {
        self.store_root.join("projects.json")
    }

    fn lock_path(&self) -> PathBuf {
        self.store_root.join("projects.lock")
    }

    /// A missing registry file is an empty registry, not an error.
    fn load_file(&self) -> Result<RegistryFile> {
        let path = self.registry_file();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(RegistryFile::default())
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content).map_err(|source| RegistryError::Malformed { path, source })
    }

    fn save_file(&self, file: &RegistryFile) -> Result<()> {
        let json = serde_json::to_string_pretty(file).map_err(std::io::Error::other)?;
        store::write_atomic(&self.registry_file(), json.as_bytes())?;
        Ok(())
    }

    /// List all registered projects, sorted by id.
    pub fn list(&self) -> Result<Vec<(String, ProjectEntry)>> {
        Ok(self.load_file()?.projects.into_iter().collect())
    }

    /// Look up a single project entry.
    pub fn get(&self, project_id: &str) -> Result<ProjectEntry> {
        let mut file = self.load_file()?;
        file.projects
            .remove(project_id)
            .ok_or_else(|| RegistryError::ProjectNotFound(project_id.to_string()))
    }

    /// Resolve a project's filesystem root.
    ///
    /// Unknown ids and entries without a configured path fail differently;
    /// the caller decides how to surface each. Touches nothing but the
    /// registry file.
    pub fn resolve_root(&self, project_id: &str) -> Result<PathBuf> {
        self.get(project_id)?
            .path
            .ok_or_else(|| RegistryError::ProjectPathNotFound(project_id.to_string()))
    }

    /// Register a project or update its path.
    pub fn set(&self, project_id: &str, path: Option<&Path>) -> Result<()> {
        let _lock = store::lock_file(&self.lock_path())?;
        let mut file = self.load_file()?;
        file.projects.insert(
            project_id.to_string(),
            ProjectEntry {
                path: path.map(Path::to_path_buf),
            },
        );
        self.save_file(&file)
    }

    /// Remove a project from the registry.
    pub fn remove(&self, project_id: &str) -> Result<()> {
        let _lock = store::lock_file(&self.lock_path())?;
        let mut file = self.load_file()?;
        if file.projects.remove(project_id).is_none() {
            return Err(RegistryError::ProjectNotFound(project_id.to_string()));
        }
        self.save_file(&file)
    }
}
