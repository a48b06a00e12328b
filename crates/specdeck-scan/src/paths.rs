use std::path::{Path, PathBuf};

use specdeck_core::Scope;

/// Document file names inside a change directory.
pub const PROPOSAL_MD: &str = "proposal.md";
pub const ARCHITECTURE_MD: &str = "architecture.md";
pub const DESIGN_MD: &str = "design.md";
pub const TASKS_MD: &str = "tasks.md";
pub const TESTS_MD: &str = "tests.md";
pub const SPECS_MD: &str = "specs.md";
pub const SPECS_DIR: &str = "specs";

/// The one entry under `changes/` that is not a change itself.
pub const ARCHIVE_DIR: &str = "archive";

/// All well-known paths under `<project>/openspec/`.
#[derive(Debug, Clone)]
pub struct OpenspecPaths {
    pub root: PathBuf,
    pub openspec_dir: PathBuf,
    pub changes_dir: PathBuf,
    pub archive_dir: PathBuf,
}

impl OpenspecPaths {
    /// Derive all paths from a project root. Pure computation, no I/O.
    pub fn discover(project_root: impl Into<PathBuf>) -> Self {
        let root = project_root.into();
        let openspec_dir = root.join("openspec");
        let changes_dir = openspec_dir.join("changes");
        Self {
            archive_dir: changes_dir.join(ARCHIVE_DIR),
            changes_dir,
            openspec_dir,
            root,
        }
    }

    /// Listing target for a scope.
    pub fn scope_dir(&self, scope: Scope) -> &Path {
        match scope {
            Scope::Active => &self.changes_dir,
            Scope::Archived => &self.archive_dir,
        }
    }

    /// Location of a named change in the active scope.
    pub fn change_dir(&self, name: &str) -> PathBuf {
        self.changes_dir.join(name)
    }

    /// Location of a named change in the archive scope.
    pub fn archived_change_dir(&self, name: &str) -> PathBuf {
        self.archive_dir.join(name)
    }
}
