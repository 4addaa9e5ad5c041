//! Logging settings for one invocation

use std::collections::BTreeMap;
use std::str::FromStr;

/// Modules whose log level can be raised or lowered on their own.
pub const LOG_COMPONENTS: &[&str] = &["check", "cli", "config", "factory", "pool"];

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Where log lines are meant to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Pretty)
        } else if s.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Err(format!("unknown log format '{}', expected pretty or json", s))
        }
    }
}

/// Logging settings built from the command line.
///
/// Logs always go to stderr; stdout is reserved for check reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Base level for everything not listed in `component_levels`
    pub level: String,
    pub format: LogFormat,
    /// Per-module overrides, e.g. `pool -> debug`
    pub component_levels: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            component_levels: BTreeMap::new(),
        }
    }
}

/// Parse a `component=level` pair such as `pool=debug`.
pub fn parse_component_level(s: &str) -> Result<(String, String), String> {
    let (component, level) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <component>=<level>, got '{}'", s))?;
    let component = component.trim();
    let level = level.trim().to_ascii_lowercase();

    if !LOG_COMPONENTS.contains(&component) {
        return Err(format!(
            "unknown component '{}', expected one of: {}",
            component,
            LOG_COMPONENTS.join(", ")
        ));
    }
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(format!("unknown log level '{}' for {}", level, component));
    }

    Ok((component.to_string(), level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.component_levels.is_empty());
    }

    #[test]
    fn test_log_format_is_case_insensitive() {
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert!("xml".parse::<LogFormat>().is_err());
        assert!("".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_parse_component_level() {
        assert_eq!(
            parse_component_level("pool=DEBUG"),
            Ok(("pool".to_string(), "debug".to_string()))
        );
        assert_eq!(
            parse_component_level(" check = trace "),
            Ok(("check".to_string(), "trace".to_string()))
        );
    }

    #[test]
    fn test_parse_component_level_rejects_bad_input() {
        assert!(parse_component_level("pool").is_err());
        assert!(parse_component_level("routing=debug").is_err());
        assert!(parse_component_level("pool=loud").is_err());
    }
}
