//! Heuristic detectors over archive listings.

pub mod binary;
pub mod desktop;

pub use binary::{detect_binaries, select_best_binary};
pub use desktop::{detect_desktop_file, detect_icon};
