//! Run command implementation

use crate::cli::output::{format_json, format_summary};
use crate::cli::{GlobalArgs, OutputFormat, RunArgs};
use crate::config::{load_service_files, RunConfig};
use crate::factory::build_checks;
use crate::pool::{NoProgress, ProgressObserver, TerminalProgress, WorkerPool};
use std::sync::Arc;

/// Merge global and `run` flags into run settings
pub fn run_config(global: &GlobalArgs, args: &RunArgs) -> RunConfig {
    RunConfig {
        timeout_seconds: args.timeout,
        workers: args.workers,
        progress: !args.no_progress,
        ..global.run_config()
    }
}

/// Handle `svck run`
///
/// Configuration and construction errors are returned before any request is
/// made. Failing checks are part of the report, not an error.
pub async fn handle_run(
    global: &GlobalArgs,
    args: &RunArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let config = run_config(global, args);
    config.validate()?;

    let services = load_service_files(&args.files)?;
    let checks = build_checks(&services, &config)?;

    let progress: Arc<dyn ProgressObserver> = if config.progress {
        Arc::new(TerminalProgress::new())
    } else {
        Arc::new(NoProgress)
    };
    let checks = WorkerPool::new(config.workers).run(checks, progress).await;

    match global.output {
        OutputFormat::Json => Ok(format_json(&checks)?),
        OutputFormat::Default => Ok(format_summary(&checks)),
    }
}
