//! A single HTTP probe and its verdict.
//!
//! A [`Check`] is built once by the factory, run exactly once by the worker
//! pool and then only read by reporters.

mod error;
mod request;
mod response;
mod validate;


pub use error::CheckError;
pub use request::{canonical_header_name, header_values, ProbeRequest};
pub use response::{CheckState, ResponseSnapshot};
pub use validate::Expectations;

use reqwest::header::HOST;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Identity of a check inside the service hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CheckId {
    pub service: String,
    pub address: String,
    pub test: String,
    pub resource: String,
}

impl CheckId {
    /// `service@address/test/resource`
    pub fn name(&self) -> String {
        format!(
            "{}@{}/{}/{}",
            self.service, self.address, self.test, self.resource
        )
    }
}

/// One HTTP probe: request, validation rules and result.
#[derive(Debug, Clone)]
pub struct Check {
    pub id: CheckId,
    pub request: ProbeRequest,
    /// Request timeout in seconds; zero disables it
    pub timeout: u64,
    pub expectations: Expectations,

    state: CheckState,
    response: Option<ResponseSnapshot>,
    duration: f64,
    success: bool,
    reason: Vec<String>,
}

impl Check {
    pub fn new(
        id: CheckId,
        request: ProbeRequest,
        timeout: u64,
        expectations: Expectations,
    ) -> Self {
        Self {
            id,
            request,
            timeout,
            expectations,
            state: CheckState::Pending,
            response: None,
            duration: 0.0,
            success: false,
            reason: Vec::new(),
        }
    }

    pub fn name(&self) -> String {
        self.id.name()
    }

    pub fn state(&self) -> CheckState {
        self.state
    }

    /// Response metadata, absent when the request never completed.
    pub fn response(&self) -> Option<&ResponseSnapshot> {
        self.response.as_ref()
    }

    /// Seconds until response headers arrived; zero on transport errors.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// Failure reasons in the order they were found; empty on success.
    pub fn reason(&self) -> &[String] {
        &self.reason
    }

    /// Perform the request and record the verdict.
    ///
    /// Only a pending check runs; calling this again is a no-op.
    pub async fn run(&mut self) {
        if self.state != CheckState::Pending {
            tracing::warn!(
                check = %self.name(),
                state = ?self.state,
                "Check already ran, ignoring"
            );
            return;
        }

        self.state = CheckState::Running;
        tracing::debug!(check = %self.name(), url = %self.request.url, "Running check");

        if let Err(e) = self.execute().await {
            self.reason.push(e.to_string());
        }

        self.success = self.reason.is_empty();
        self.state = if self.success {
            CheckState::Succeeded
        } else {
            CheckState::Failed
        };

        tracing::debug!(
            check = %self.name(),
            success = self.success,
            duration = self.duration,
            reasons = self.reason.len(),
            "Check finished"
        );
    }

    async fn execute(&mut self) -> Result<(), CheckError> {
        let url = self.request.url.to_string();

        let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
        if self.timeout > 0 {
            builder = builder.timeout(Duration::from_secs(self.timeout));
        }
        let client = builder
            .build()
            .map_err(|e| CheckError::request(&url, &e, self.timeout))?;

        let mut request = client
            .get(self.request.url.clone())
            .headers(self.request.headers.clone());
        if let Some(host) = &self.request.host_override {
            request = request.header(HOST, host);
        }

        let start = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                self.duration = 0.0;
                return Err(CheckError::request(&url, &e, self.timeout));
            }
        };
        self.duration = start.elapsed().as_secs_f64();

        let snapshot = ResponseSnapshot::from(&response);
        let status = snapshot.status_code;
        let headers = response.headers().clone();
        self.response = Some(snapshot);

        let body = if self.expectations.needs_body() {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| CheckError::read_body(&url, &e))?;
            String::from_utf8_lossy(&bytes).into_owned()
        } else {
            String::new()
        };

        self.expectations
            .validate(status, &body, &headers, &mut self.reason)
    }

    /// Request headers rendered as `<prefix>"Name: value"`, ending with `Host`.
    pub fn request_headers(&self, prefix: &str) -> String {
        let mut rendered = request::render_headers(&self.request.header_values(), prefix);
        rendered.push_str(&format!("{}\"Host: {}\"", prefix, self.request.host()));
        rendered
    }

    /// Response headers rendered as `<prefix>"Name: value"`; empty without a response.
    pub fn response_headers(&self, prefix: &str) -> String {
        match &self.response {
            Some(response) => request::render_headers(&response.headers, prefix),
            None => String::new(),
        }
    }

    /// A curl command line reproducing this check's request.
    pub fn as_curl(&self) -> String {
        format!(
            "curl -v {} '{}'",
            self.request_headers("-H "),
            self.request.url
        )
    }
}

#[derive(Serialize)]
struct RequestRecord {
    url: String,
    host: String,
    header: BTreeMap<String, Vec<String>>,
}

#[derive(Serialize)]
struct CheckRecord<'a> {
    name: String,
    service: &'a str,
    test: &'a str,
    resource: &'a str,
    address: &'a str,
    request: RequestRecord,
    timeout: u64,
    contains: &'a [String],
    status: u16,
    expected_headers: &'a BTreeMap<String, Vec<String>>,
    response: Option<&'a ResponseSnapshot>,
    duration: f64,
    success: bool,
    reason: &'a [String],
}

impl Serialize for Check {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CheckRecord {
            name: self.name(),
            service: &self.id.service,
            test: &self.id.test,
            resource: &self.id.resource,
            address: &self.id.address,
            request: RequestRecord {
                url: self.request.url.to_string(),
                host: self.request.host(),
                header: self.request.header_values(),
            },
            timeout: self.timeout,
            contains: &self.expectations.contains,
            status: self.expectations.status,
            expected_headers: &self.expectations.headers,
            response: self.response.as_ref(),
            duration: self.duration,
            success: self.success,
            reason: &self.reason,
        }
        .serialize(serializer)
    }
}
