//! Reporter trait for dependency injection
//!
//! This trait allows the pipeline to report progress and status without
//! being coupled to a specific terminal implementation.

use brewgen_schema::ClassifiedAsset;

/// Receives progress events from a pipeline run.
pub trait Reporter: Send + Sync {
    /// Indicates a new stage has started (e.g. "selecting", "inspecting").
    fn section(&self, title: &str);

    /// An asset was chosen for the target.
    fn selected(&self, asset: &ClassifiedAsset);

    /// Updates the progress of a download.
    fn downloading(&self, name: &str, current: u64, total: Option<u64>);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn section(&self, title: &str) {
        (**self).section(title);
    }
    fn selected(&self, asset: &ClassifiedAsset) {
        (**self).selected(asset);
    }
    fn downloading(&self, name: &str, current: u64, total: Option<u64>) {
        (**self).downloading(name, current, total);
    }
    fn info(&self, msg: &str) {
        (**self).info(msg);
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg);
    }
}

/// A no-op reporter for silent operations (e.g., testing).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn section(&self, _: &str) {}
    fn selected(&self, _: &ClassifiedAsset) {}
    fn downloading(&self, _: &str, _: u64, _: Option<u64>) {}
    fn info(&self, _: &str) {}
    fn warning(&self, _: &str) {}
}
