//! Expands service definitions into a flat list of checks.
//!
//! Every `(service, address, test, resource)` combination becomes one
//! [`Check`]. Services, tests and resources are iterated in name order and
//! addresses in declaration order, so the same configuration always yields
//! the same list.

mod error;

pub use error::FactoryError;

use crate::check::{Check, CheckId, Expectations, ProbeRequest};
use crate::config::{ResourceConfig, RunConfig, Services, TestConfig};
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE, HOST, USER_AGENT};
use reqwest::Url;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Build every check described by `services`.
///
/// Any construction error aborts the batch; no partial list is returned.
pub fn build_checks(services: &Services, run: &RunConfig) -> Result<Vec<Check>, FactoryError> {
    let mut checks = Vec::new();

    for (service_name, service) in services {
        for address in &service.addresses {
            for (test_name, test) in &service.tests {
                for (resource_name, resource) in &test.resources {
                    let id = CheckId {
                        service: service_name.clone(),
                        address: address.clone(),
                        test: test_name.clone(),
                        resource: resource_name.clone(),
                    };
                    checks.push(build_check(id, test, resource, run)?);
                }
            }
        }
    }

    tracing::debug!(checks = checks.len(), "Built checks");
    Ok(checks)
}

/// Build one check.
pub fn build_check(
    id: CheckId,
    test: &TestConfig,
    resource: &ResourceConfig,
    run: &RunConfig,
) -> Result<Check, FactoryError> {
    let url = resolve_url(&id, test, resource, run)?;
    let mut request = ProbeRequest::new(url);

    if let Some(content_type) = resource.content_type.as_deref().filter(|c| !c.is_empty()) {
        let value = header_value(&id, CONTENT_TYPE.as_str(), content_type)?;
        request.headers.insert(CONTENT_TYPE, value);
    }

    // The connection goes to the fake address, the server still sees its
    // real virtual host.
    if run.fake_address.is_some() {
        request.host_override = Some(id.address.clone());
    }

    let forwarded = if test.ssl { "https" } else { "http" };
    request.headers.insert(
        HeaderName::from_static(X_FORWARDED_PROTO),
        HeaderValue::from_static(forwarded),
    );

    for (name, value) in &test.request_headers {
        let header = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            FactoryError::InvalidHeader {
                check: id.name(),
                header: name.clone(),
                message: e.to_string(),
            }
        })?;
        // Host travels separately from the other headers.
        if header == HOST {
            request.host_override = Some(value.clone());
            continue;
        }
        let value = header_value(&id, name, value)?;
        request.headers.insert(header, value);
    }

    let user_agent = header_value(&id, USER_AGENT.as_str(), &run.user_agent)?;
    request.headers.insert(USER_AGENT, user_agent);

    let expectations = Expectations {
        status: test.status,
        contains: resource.contains.clone(),
        headers: test.expected_headers.clone(),
    };

    Ok(Check::new(id, request, run.timeout_seconds, expectations))
}

/// `<scheme>://<host>/<path>`
fn resolve_url(
    id: &CheckId,
    test: &TestConfig,
    resource: &ResourceConfig,
    run: &RunConfig,
) -> Result<Url, FactoryError> {
    let host = run.fake_address.as_deref().unwrap_or(&id.address);
    let path = resource.url.strip_prefix('/').unwrap_or(&resource.url);
    let scheme = match run.fake_proto.as_deref() {
        Some(proto) => proto,
        None if test.ssl => "https",
        None => "http",
    };

    let raw = format!("{}://{}/{}", scheme, host, path);
    let invalid = |source| FactoryError::InvalidUrl {
        check: id.name(),
        url: raw.clone(),
        source,
    };

    let url = Url::parse(&raw).map_err(invalid)?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(url::ParseError::EmptyHost));
    }
    Ok(url)
}

fn header_value(id: &CheckId, name: &str, value: &str) -> Result<HeaderValue, FactoryError> {
    HeaderValue::from_str(value).map_err(|e| FactoryError::InvalidHeader {
        check: id.name(),
        header: name.to_string(),
        message: e.to_string(),
    })
}
