use std::io::ErrorKind;
use std::path::Path;

use specdeck_core::describe::extract_description;
use specdeck_core::status::infer_status;
use specdeck_core::{ChangeDetails, SpecFile};
use tokio::task::JoinSet;

use crate::error::{Result, ScanError};
use crate::paths::{
    OpenspecPaths, ARCHITECTURE_MD, DESIGN_MD, PROPOSAL_MD, SPECS_DIR, SPECS_MD, TASKS_MD,
    TESTS_MD,
};
use crate::scan::{mtime_or_now, read_optional};

/// Upper bound on in-flight spec-file reads during one aggregation.
const SPEC_READ_LIMIT: usize = 16;

/// Assemble the full composite record for one change.
///
/// The active location is tried first, then the archive; which one matches
/// decides the archived flag. Document reads tolerate absence; every other
/// failure aborts the whole aggregation — no partial records.
pub async fn change_details(project_root: &Path, name: &str) -> Result<ChangeDetails> {
    let paths = OpenspecPaths::discover(project_root);

    let mut dir = paths.change_dir(name);
    let mut archived = false;
    if !is_dir(&dir).await? {
        let fallback = paths.archived_change_dir(name);
        if is_dir(&fallback).await? {
            dir = fallback;
            archived = true;
        } else {
            return Err(ScanError::ChangeNotFound {
                name: name.to_string(),
                path: dir,
            });
        }
    }

    let meta = tokio::fs::metadata(&dir).await?;

    let proposal_content = read_optional(&dir.join(PROPOSAL_MD)).await?;
    // architecture.md is the newer document name and wins when both exist
    let design_content = match read_optional(&dir.join(ARCHITECTURE_MD)).await? {
        Some(content) => Some(content),
        None => read_optional(&dir.join(DESIGN_MD)).await?,
    };
    let tasks_content = read_optional(&dir.join(TASKS_MD)).await?;
    let tests_content = read_optional(&dir.join(TESTS_MD)).await?;
    let specs_content = read_optional(&dir.join(SPECS_MD)).await?;

    let specs_dir = dir.join(SPECS_DIR);
    let spec_names = collect_spec_names(&specs_dir).await?;
    let spec_files = read_spec_files(&specs_dir, spec_names).await?;

    Ok(ChangeDetails {
        name: name.to_string(),
        status: infer_status(tasks_content.is_some(), archived),
        description: extract_description(proposal_content.as_deref()),
        updated_at: mtime_or_now(&meta),
        proposal_content,
        design_content,
        tasks_content,
        tests_content,
        specs_content,
        spec_files,
    })
}

async fn is_dir(path: &Path) -> std::io::Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Enumerate files under `specs/` recursively, as `/`-separated names
/// relative to it. Dot-entries are filtered at every listing step, so a
/// dot-directory is skipped whole and its children never visited.
async fn collect_spec_names(specs_dir: &Path) -> Result<Vec<String>> {
    let mut pending = vec![String::new()];
    let mut names = Vec::new();

    while let Some(prefix) = pending.pop() {
        let dir = if prefix.is_empty() {
            specs_dir.to_path_buf()
        } else {
            specs_dir.join(&prefix)
        };
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(rd) => rd,
            // A change without specs/ simply has no spec files
            Err(e) if e.kind() == ErrorKind::NotFound && prefix.is_empty() => return Ok(names),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if file_name.starts_with('.') {
                continue;
            }
            let rel = if prefix.is_empty() {
                file_name
            } else {
                format!("{prefix}/{file_name}")
            };
            if entry.file_type().await?.is_dir() {
                pending.push(rel);
            } else {
                names.push(rel);
            }
        }
    }
    Ok(names)
}

/// Read every enumerated spec file with a bounded concurrent fan-out.
/// All-or-nothing: the first failed read aborts the rest.
async fn read_spec_files(specs_dir: &Path, names: Vec<String>) -> Result<Vec<SpecFile>> {
    let mut queue = names.into_iter();
    let mut in_flight = JoinSet::new();
    let mut files = Vec::new();

    loop {
        while in_flight.len() < SPEC_READ_LIMIT {
            let Some(name) = queue.next() else { break };
            let path = specs_dir.join(&name);
            in_flight.spawn(async move {
                let content = tokio::fs::read_to_string(&path).await?;
                Ok::<_, std::io::Error>(SpecFile { name, content })
            });
        }
        match in_flight.join_next().await {
            Some(Ok(Ok(file))) => files.push(file),
            Some(Ok(Err(e))) => {
                in_flight.abort_all();
                return Err(e.into());
            }
            Some(Err(join_err)) => {
                in_flight.abort_all();
                return Err(std::io::Error::other(join_err).into());
            }
            None => break,
        }
    }
    Ok(files)
}
