//! svck - synthetic HTTP check runner
//!
//! This library expands declarative service definitions into HTTP probes,
//! runs them with bounded concurrency and validates every response against
//! its expected status code, body patterns and headers.
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use svck::config::{load_service_files, RunConfig};
//! use svck::factory::build_checks;
//! use svck::pool::{NoProgress, WorkerPool};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let run = RunConfig::default();
//! let services = load_service_files(&[PathBuf::from("services.yaml")])?;
//! let checks = build_checks(&services, &run)?;
//! let checks = WorkerPool::new(run.workers).run(checks, Arc::new(NoProgress)).await;
//! let failed = checks.iter().filter(|c| !c.success()).count();
//! println!("{} of {} checks failed", failed, checks.len());
//! # Ok(())
//! # }
//! ```

pub mod check;
pub mod cli;
pub mod config;
pub mod factory;
pub mod logging;
pub mod pool;
