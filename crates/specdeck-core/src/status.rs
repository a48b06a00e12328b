use crate::types::ChangeStatus;

/// Derive a change's workflow status from file-presence signals.
///
/// Archive location wins unconditionally; otherwise a tasks document means
/// implementation has started. Total and side-effect free.
pub fn infer_status(tasks_exists: bool, archived: bool) -> ChangeStatus {
    if archived {
        ChangeStatus::Archived
    } else if tasks_exists {
        ChangeStatus::Implementing
    } else {
        ChangeStatus::Draft
    }
}
