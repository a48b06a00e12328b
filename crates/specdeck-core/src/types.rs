use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Workflow status of a change, as declared by the dashboard wire contract.
///
/// File-presence inference only ever produces `Draft`, `Implementing`, and
/// `Archived`. `Ready` and `Review` are reserved: the contract declares
/// them, but no filesystem signal maps to them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Draft,
    Ready,
    Implementing,
    Review,
    Archived,
}

impl ChangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeStatus::Draft => "draft",
            ChangeStatus::Ready => "ready",
            ChangeStatus::Implementing => "implementing",
            ChangeStatus::Review => "review",
            ChangeStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which change location a listing targets: `openspec/changes/` or
/// `openspec/changes/archive/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Active,
    Archived,
}

/// One listing entry per change directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSummary {
    /// Base name of the change directory. Never renamed.
    pub name: String,
    pub status: ChangeStatus,
    /// One-line description pulled from the proposal, or empty.
    pub description: String,
    /// Directory mtime; "now" when the filesystem reports none.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A spec fragment under a change's `specs/` subdirectory.
/// `name` is the `/`-separated path relative to `specs/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecFile {
    pub name: String,
    pub content: String,
}

/// Full composite record for a single change.
///
/// Document fields are absent (not empty strings) when the file does not
/// exist. `spec_files` carries no ordering guarantee: reads complete
/// concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeDetails {
    pub name: String,
    pub status: ChangeStatus,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal_content: Option<String>,
    /// `architecture.md` when present, else `design.md`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specs_content: Option<String>,
    pub spec_files: Vec<SpecFile>,
}
