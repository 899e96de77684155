//! brewgen - release assets to package descriptors

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use brewgen_cli::cmd;
use brewgen_cli::cmd::inspect::InspectArgs;
use brewgen_cli::cmd::resolve::ResolveArgs;
use brewgen_cli::config::Settings;
use brewgen_cli::ui::ConsoleReporter;
use brewgen_cli::{Cli, Commands};
use brewgen_core::{NullReporter, Reporter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins unless -v asks for debug output.
    let filter = if cli.verbose {
        EnvFilter::new("warn,brewgen_core=debug,brewgen_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load(cli.config.as_deref())?;
    let reporter: Arc<dyn Reporter> = if cli.quiet {
        Arc::new(NullReporter)
    } else {
        Arc::new(ConsoleReporter::new())
    };

    match cli.command {
        Commands::Resolve {
            release,
            name,
            target,
            no_verify,
            checksums,
            timeout_secs,
            max_bytes,
        } => {
            let args = ResolveArgs {
                release,
                name,
                target,
                no_verify,
                checksums,
                timeout_secs,
                max_bytes,
            };
            cmd::resolve::resolve(&args, &settings, reporter).await
        }
        Commands::Classify { names, target } => {
            cmd::classify::classify_names(&names, &target, &settings)
        }
        Commands::Inspect {
            path,
            name,
            entries,
            json,
            read,
        } => {
            let args = InspectArgs {
                path: &path,
                name: name.as_deref(),
                entries,
                json,
                read: read.as_deref(),
            };
            cmd::inspect::inspect(&args, &settings, reporter.as_ref())
        }
    }
}
