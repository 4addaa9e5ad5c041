//! Per-invocation run settings

use super::ConfigError;

/// Default user agent sent with every probe.
pub const DEFAULT_USER_AGENT: &str = "svck";

/// Settings shared by the check factory and the worker pool.
///
/// Built once per invocation from command-line arguments and passed by
/// reference; nothing in the library reads global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Connect to this address instead of the configured one
    pub fake_address: Option<String>,
    /// Use this scheme instead of the one implied by the test's `ssl` flag
    pub fake_proto: Option<String>,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Per-check request timeout; zero disables the timeout
    pub timeout_seconds: u64,
    /// Number of concurrent executors
    pub workers: usize,
    /// Render a progress counter while checks run
    pub progress: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            fake_address: None,
            fake_proto: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: 10,
            workers: 3,
            progress: true,
        }
    }
}

impl RunConfig {
    /// Set the fake address; an empty string means "no override".
    pub fn with_fake_address(mut self, address: Option<String>) -> Self {
        self.fake_address = address.filter(|a| !a.is_empty());
        self
    }

    /// Set the fake protocol; an empty string means "no override".
    pub fn with_fake_proto(mut self, proto: Option<String>) -> Self {
        self.fake_proto = proto.filter(|p| !p.is_empty());
        self
    }

    /// Validate run settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Validation {
                field: "workers".to_string(),
                message: "at least one worker is required".to_string(),
            });
        }
        if let Some(proto) = &self.fake_proto {
            if !proto.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
            {
                return Err(ConfigError::Validation {
                    field: "proto".to_string(),
                    message: format!("'{}' is not a valid URL scheme", proto),
                });
            }
        }
        Ok(())
    }
}
