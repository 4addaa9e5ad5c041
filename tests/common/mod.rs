//! Shared test utilities for svck integration tests.

#![allow(dead_code)]

use reqwest::Url;
use std::collections::BTreeMap;
use std::io::Write;
use svck::check::{Check, CheckId, Expectations, ProbeRequest};
use svck::config::{ResourceConfig, ServiceConfig, Services, TestConfig};

/// Create a check against `base` + `/r<i>` expecting `status`.
pub fn make_check(base: &str, i: usize, status: u16) -> Check {
    let url = Url::parse(&format!("{}/r{}", base, i)).unwrap();
    Check::new(
        CheckId {
            service: "svc".to_string(),
            address: base.to_string(),
            test: "t".to_string(),
            resource: format!("r{}", i),
        },
        ProbeRequest::new(url),
        5,
        Expectations {
            status,
            contains: vec![],
            headers: BTreeMap::new(),
        },
    )
}

/// A service with one test and the given resource paths.
pub fn make_service(addresses: &[&str], resources: &[&str]) -> ServiceConfig {
    let mut test = TestConfig::default();
    for path in resources {
        test.resources.insert(
            path.trim_start_matches('/').to_string(),
            ResourceConfig {
                url: path.to_string(),
                ..Default::default()
            },
        );
    }

    ServiceConfig {
        addresses: addresses.iter().map(|a| a.to_string()).collect(),
        tests: BTreeMap::from([("home".to_string(), test)]),
    }
}

/// Single-service map.
pub fn services(name: &str, service: ServiceConfig) -> Services {
    Services::from([(name.to_string(), service)])
}

/// Write a YAML service file to a temp location.
pub fn write_service_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}
