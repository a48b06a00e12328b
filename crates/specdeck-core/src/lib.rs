pub mod describe;
pub mod status;
pub mod types;

pub use types::*;
