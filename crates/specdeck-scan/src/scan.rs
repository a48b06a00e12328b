use std::io::ErrorKind;
use std::path::Path;

use specdeck_core::describe::extract_description;
use specdeck_core::status::infer_status;
use specdeck_core::{ChangeSummary, Scope};
use time::OffsetDateTime;

use crate::error::Result;
use crate::paths::{OpenspecPaths, ARCHIVE_DIR, PROPOSAL_MD, TASKS_MD};

/// List the changes of one scope, most recently modified first.
///
/// A project without the `openspec/changes` tree yields an empty list —
/// the normal state for projects that have not adopted the workflow. Any
/// other filesystem error propagates.
pub async fn list_changes(project_root: &Path, scope: Scope) -> Result<Vec<ChangeSummary>> {
    let paths = OpenspecPaths::discover(project_root);

    let mut entries = match tokio::fs::read_dir(paths.scope_dir(scope)).await {
        Ok(rd) => rd,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut changes = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if scope == Scope::Active && name == ARCHIVE_DIR {
            continue;
        }
        let meta = entry.metadata().await?;
        if !meta.is_dir() {
            continue;
        }

        let dir = entry.path();
        let tasks_exists = tokio::fs::try_exists(dir.join(TASKS_MD)).await?;

        // Descriptions come from proposals; archived listings skip the read.
        let description = if scope == Scope::Active {
            let proposal = read_optional(&dir.join(PROPOSAL_MD)).await?;
            extract_description(proposal.as_deref())
        } else {
            String::new()
        };

        changes.push(ChangeSummary {
            name,
            status: infer_status(tasks_exists, scope == Scope::Archived),
            description,
            updated_at: mtime_or_now(&meta),
        });
    }

    // Stable sort: ties keep the directory-listing order
    changes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(changes)
}

/// Read a document if it exists. A missing file is absence, not an error.
pub(crate) async fn read_optional(path: &Path) -> std::io::Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Modification time, falling back to "now" when the filesystem reports
/// none.
pub(crate) fn mtime_or_now(meta: &std::fs::Metadata) -> OffsetDateTime {
    meta.modified()
        .map(OffsetDateTime::from)
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
}
