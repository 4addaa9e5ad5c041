//! Configuration module for svck
//!
//! Two kinds of configuration exist:
//!
//! 1. Service files (YAML), describing which endpoints should respond how
//! 2. [`RunConfig`], the per-invocation settings coming from the command line
//!
//! # Example
//!
//! ```rust
//! use svck::config::{parse_services, RunConfig};
//!
//! let yaml = r#"
//! web:
//!   addresses: ["10.0.0.1"]
//!   tests:
//!     home:
//!       status: 200
//!       resources:
//!         index:
//!           url: /
//!           contains: ["Welcome"]
//! "#;
//! let services = parse_services(yaml, std::path::Path::new("web.yaml")).unwrap();
//! assert_eq!(services["web"].addresses, vec!["10.0.0.1"]);
//!
//! let run = RunConfig::default();
//! assert_eq!(run.workers, 3);
//! ```

pub mod error;
pub mod logging;
pub mod run;
pub mod service;

pub use error::ConfigError;
pub use logging::{parse_component_level, LogFormat, LoggingConfig, LOG_COMPONENTS};
pub use run::{RunConfig, DEFAULT_USER_AGENT};
pub use service::{ResourceConfig, ServiceConfig, Services, TestConfig};

use std::path::{Path, PathBuf};

/// Parse the contents of one service file.
///
/// An empty document yields no services.
pub fn parse_services(content: &str, path: &Path) -> Result<Services, ConfigError> {
    if content.trim().is_empty() {
        return Ok(Services::new());
    }
    serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load one service file from disk.
pub fn load_service_file(path: &Path) -> Result<Services, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_services(&content, path)
}

/// Load and merge several service files.
///
/// Directories are skipped. When two files define the same service, the
/// later file wins. The merged result is validated before it is returned.
pub fn load_service_files(paths: &[PathBuf]) -> Result<Services, ConfigError> {
    let mut services = Services::new();

    for path in paths {
        if path.is_dir() {
            tracing::debug!(path = %path.display(), "Skipping directory");
            continue;
        }

        let loaded = load_service_file(path)?;
        tracing::debug!(
            path = %path.display(),
            services = loaded.len(),
            "Loaded service file"
        );
        for (name, service) in loaded {
            if services.insert(name.clone(), service).is_some() {
                tracing::warn!(
                    service = %name,
                    path = %path.display(),
                    "Service redefined, later definition wins"
                );
            }
        }
    }

    validate_services(&services)?;
    Ok(services)
}

/// Validate the shape of loaded services.
pub fn validate_services(services: &Services) -> Result<(), ConfigError> {
    for (service_name, service) in services {
        for (i, address) in service.addresses.iter().enumerate() {
            if address.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("{}.addresses[{}]", service_name, i),
                    message: "address cannot be empty".to_string(),
                });
            }
        }

        for (test_name, test) in &service.tests {
            if !(100..=599).contains(&test.status) {
                return Err(ConfigError::Validation {
                    field: format!("{}.tests.{}.status", service_name, test_name),
                    message: format!("{} is not an HTTP status code", test.status),
                });
            }
        }
    }

    Ok(())
}
