pub mod details;
pub mod error;
pub mod paths;
pub mod scan;

pub use details::change_details;
pub use error::{Result, ScanError};
pub use paths::OpenspecPaths;
pub use scan::list_changes;
