//! The resolved HTTP request a check sends.

use reqwest::header::HeaderMap;
use reqwest::Url;
use std::collections::BTreeMap;

/// A fully resolved GET request.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    /// Connection target
    pub url: Url,
    /// Headers sent with the request (without `Host`)
    pub headers: HeaderMap,
    /// `Host` header override, set when the connection target is faked
    pub host_override: Option<String>,
}

impl ProbeRequest {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            headers: HeaderMap::new(),
            host_override: None,
        }
    }

    /// The `Host` the server under test sees.
    pub fn host(&self) -> String {
        if let Some(host) = &self.host_override {
            return host.clone();
        }
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// Request headers in display form, sorted by name.
    pub fn header_values(&self) -> BTreeMap<String, Vec<String>> {
        header_values(&self.headers)
    }
}

/// Collect a header map into `Canonical-Name -> [values]`, sorted by name.
///
/// Values keep the order in which they were received.
pub fn header_values(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        values
            .entry(canonical_header_name(name.as_str()))
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    values
}

/// `x-forwarded-proto` -> `X-Forwarded-Proto`
pub fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Render headers as `<prefix>"Name: value" ` pairs, one per value.
pub(crate) fn render_headers(values: &BTreeMap<String, Vec<String>>, prefix: &str) -> String {
    let mut rendered = String::new();
    for (name, list) in values {
        for value in list {
            rendered.push_str(&format!("{}\"{}: {}\" ", prefix, name, value));
        }
    }
    rendered
}
