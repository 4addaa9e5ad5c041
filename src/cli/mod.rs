//! CLI module for svck
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `run` - Run all checks from the given service files
//! - `curl` - Print every check as a curl command
//! - `version` - Print version info
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Run checks with 10 workers against a server not yet in DNS
//! svck -a 203.0.113.7 run -w 10 services/*.yaml
//!
//! # Write a reproduction script
//! svck curl services/web.yaml > web.sh
//! ```

pub mod completions;
pub mod curl;
pub mod output;
pub mod run;

pub use completions::handle_completions;
pub use curl::handle_curl;
pub use run::handle_run;

use crate::config::{
    parse_component_level, LogFormat, LoggingConfig, RunConfig, DEFAULT_USER_AGENT,
};
use crate::pool::DEFAULT_WORKERS;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// svck - Runs http requests and checks the responses
#[derive(Parser, Debug)]
#[command(
    name = "svck",
    version,
    about = "Runs http requests and checks the responses"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run checks
    Run(RunArgs),
    /// Print all checks as curl commands
    Curl(CurlArgs),
    /// Print version info
    Version,
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Report format for `run`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Failed checks in detail plus a summary
    #[default]
    Default,
    /// All checks as a JSON array
    Json,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Fake address of server to test
    #[arg(short = 'a', long, global = true)]
    pub address: Option<String>,

    /// Fake protocol of server to test
    #[arg(short = 'p', long, global = true)]
    pub proto: Option<String>,

    /// User agent string to be sent in requests
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Default)]
    pub output: OutputFormat,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "SVCK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format (pretty, json)
    #[arg(long, global = true, env = "SVCK_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// Log level for one component, e.g. `pool=debug` (repeatable)
    #[arg(
        long = "log-component",
        global = true,
        env = "SVCK_LOG_COMPONENTS",
        value_delimiter = ',',
        value_parser = parse_component_level
    )]
    pub log_components: Vec<(String, String)>,
}

impl GlobalArgs {
    /// Logging settings for this invocation.
    pub fn logging_config(&self) -> LoggingConfig {
        let mut config = LoggingConfig {
            format: self.log_format,
            component_levels: self.log_components.iter().cloned().collect(),
            ..Default::default()
        };
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        config
    }

    /// Run settings shared by every command, before command-specific flags.
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            user_agent: self.user_agent.clone(),
            ..Default::default()
        }
        .with_fake_address(self.address.clone())
        .with_fake_proto(self.proto.clone())
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Service files to load
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Number of workers to execute requests concurrently
    #[arg(short, long, env = "SVCK_WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Number of seconds until a single request runs in a timeout
    #[arg(short, long, env = "SVCK_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,

    /// Do not display progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Args, Debug)]
pub struct CurlArgs {
    /// Service files to load
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Do not print bash comments
    #[arg(long)]
    pub no_bash_comments: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Handle `svck version`
pub fn handle_version() -> String {
    format!("svck {}", env!("CARGO_PKG_VERSION"))
}
