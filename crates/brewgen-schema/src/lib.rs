//! Shared types for brewgen: release assets, their classification, archive
//! entries and the resolved package descriptor.

pub mod arch;
pub mod classify;
pub mod hash;
pub mod types;

// Re-exports
pub use arch::*;
pub use classify::{AssetClass, Format, classify};
pub use hash::*;
pub use types::*;
