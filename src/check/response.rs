//! Response metadata and check lifecycle state.

use super::request::header_values;
use serde::Serialize;
use std::collections::BTreeMap;

/// What a check keeps of the response it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseSnapshot {
    pub status_code: u16,
    /// Protocol version, e.g. `HTTP/1.1`
    pub proto: String,
    #[serde(rename = "header")]
    pub headers: BTreeMap<String, Vec<String>>,
    /// `None` when the server did not announce a length
    pub content_length: Option<u64>,
}

impl From<&reqwest::Response> for ResponseSnapshot {
    fn from(response: &reqwest::Response) -> Self {
        Self {
            status_code: response.status().as_u16(),
            proto: format!("{:?}", response.version()),
            headers: header_values(response.headers()),
            content_length: response.content_length(),
        }
    }
}

/// Lifecycle of a check.
///
/// `Pending -> Running -> {Succeeded, Failed}`; both end states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl CheckState {
    pub fn is_finished(self) -> bool {
        matches!(self, CheckState::Succeeded | CheckState::Failed)
    }
}
