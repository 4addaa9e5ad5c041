//! Service definitions read from YAML service files

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All services known to one invocation, keyed by service name.
pub type Services = BTreeMap<String, ServiceConfig>;

/// A named collection of addresses sharing the same set of tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Host names or `host:port` pairs the tests run against
    pub addresses: Vec<String>,
    /// Tests keyed by name
    pub tests: BTreeMap<String, TestConfig>,
}

/// A validation scenario applied to one or more resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    /// Probe with `https` and announce it via `X-Forwarded-Proto`
    pub ssl: bool,
    /// Expected response status code
    pub status: u16,
    /// Headers added to every request of this test
    #[serde(rename = "req_headers")]
    pub request_headers: BTreeMap<String, String>,
    /// Response headers that must be present; each value is a regex that
    /// must match at least one received value
    pub expected_headers: BTreeMap<String, Vec<String>>,
    /// Resources keyed by name
    pub resources: BTreeMap<String, ResourceConfig>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            ssl: false,
            status: 200,
            request_headers: BTreeMap::new(),
            expected_headers: BTreeMap::new(),
            resources: BTreeMap::new(),
        }
    }
}

/// A URL path plus the content expected from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Regular expressions that must each match somewhere in the body
    pub contains: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_service() {
        let yaml = r#"
web:
  addresses: ["10.0.0.1", "10.0.0.2:8080"]
  tests:
    home:
      ssl: true
      status: 301
      req_headers:
        X-Debug: "1"
      expected_headers:
        Location: ["^https://"]
      resources:
        index:
          url: /
          content_type: text/html
          contains: ["Welcome"]
"#;
        let services: Services = serde_yaml::from_str(yaml).unwrap();
        let web = &services["web"];
        assert_eq!(web.addresses, vec!["10.0.0.1", "10.0.0.2:8080"]);

        let home = &web.tests["home"];
        assert!(home.ssl);
        assert_eq!(home.status, 301);
        assert_eq!(home.request_headers["X-Debug"], "1");
        assert_eq!(home.expected_headers["Location"], vec!["^https://"]);

        let index = &home.resources["index"];
        assert_eq!(index.url, "/");
        assert_eq!(index.content_type.as_deref(), Some("text/html"));
        assert_eq!(index.contains, vec!["Welcome"]);
    }

    #[test]
    fn test_parse_defaults() {
        let yaml = r#"
api:
  addresses: ["api.internal"]
  tests:
    ping:
      resources:
        health:
          url: /health
"#;
        let services: Services = serde_yaml::from_str(yaml).unwrap();
        let ping = &services["api"].tests["ping"];
        assert!(!ping.ssl);
        assert_eq!(ping.status, 200);
        assert!(ping.request_headers.is_empty());
        assert!(ping.expected_headers.is_empty());

        let health = &ping.resources["health"];
        assert!(health.content_type.is_none());
        assert!(health.contains.is_empty());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let yaml = r#"
web:
  addresses: "not-a-list"
"#;
        assert!(serde_yaml::from_str::<Services>(yaml).is_err());
    }
}
