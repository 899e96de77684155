//! Console reporter.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use brewgen_core::Reporter;
use brewgen_schema::ClassifiedAsset;
use crossterm::style::Stylize;

use super::format_size;

/// Writes progress to stderr so stdout stays machine-readable.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    /// A `\r`-updated progress line is on screen and needs a newline.
    progress_open: AtomicBool,
}

impl ConsoleReporter {
    /// New reporter.
    pub fn new() -> Self {
        Self::default()
    }

    fn close_progress(&self) {
        if self.progress_open.swap(false, Ordering::Relaxed) {
            eprintln!();
        }
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, title: &str) {
        self.close_progress();
        eprintln!("{}", title.bold());
    }

    fn selected(&self, asset: &ClassifiedAsset) {
        self.close_progress();
        eprintln!(
            "  {} {} {}",
            "selected".green(),
            asset.name().white().bold(),
            format!("({}, {}, {})", asset.platform, asset.arch, asset.format)
                .dark_grey()
        );
    }

    fn downloading(&self, name: &str, current: u64, total: Option<u64>) {
        let progress = match total {
            Some(t) if t > 0 => format!("{} / {}", format_size(current), format_size(t)),
            _ => format_size(current),
        };
        eprint!("\r  {} {name} {}", "↓".cyan(), progress.dark_grey());
        let _ = std::io::stderr().flush();
        self.progress_open.store(true, Ordering::Relaxed);
    }

    fn info(&self, msg: &str) {
        self.close_progress();
        eprintln!("  {msg}");
    }

    fn warning(&self, msg: &str) {
        self.close_progress();
        eprintln!("  {} {msg}", "warning:".yellow().bold());
    }
}
