//! Response validation rules.

use super::error::CheckError;
use regex::Regex;
use reqwest::header::HeaderMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// What a response must look like for a check to pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Expectations {
    /// Exact status code
    pub status: u16,
    /// Regular expressions that must each match somewhere in the body
    pub contains: Vec<String>,
    /// Header name -> value patterns; each pattern must match one received value
    pub headers: BTreeMap<String, Vec<String>>,
}

impl Expectations {
    /// The body is only read when there is something to look for in it.
    pub fn needs_body(&self) -> bool {
        !self.contains.is_empty()
    }

    /// Validate a response, appending one reason per mismatch.
    ///
    /// Mismatches accumulate. An invalid pattern stops validation and is
    /// returned as an error; reasons appended before it are kept.
    pub fn validate(
        &self,
        status: u16,
        body: &str,
        headers: &HeaderMap,
        reasons: &mut Vec<String>,
    ) -> Result<(), CheckError> {
        if status != self.status {
            reasons.push(format!("Expected {}, received {}", self.status, status));
        }

        for pattern in &self.contains {
            if !matches(pattern, body)? {
                reasons.push(format!("Content regexp '{}' not in body", pattern));
            }
        }

        for (name, patterns) in &self.headers {
            let received: Vec<String> = headers
                .get_all(name.as_str())
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect();

            if received.is_empty() {
                reasons.push(format!("No header '{}' received", name));
                continue;
            }

            for pattern in patterns {
                let mut found = false;
                for value in &received {
                    if matches(pattern, value)? {
                        found = true;
                        break;
                    }
                }
                if !found {
                    reasons.push(format!(
                        "No value '{}' found for header '{}'",
                        pattern, name
                    ));
                }
            }
        }

        Ok(())
    }
}

fn matches(pattern: &str, haystack: &str) -> Result<bool, CheckError> {
    let re = Regex::new(pattern).map_err(|e| CheckError::invalid_pattern(pattern, &e))?;
    Ok(re.is_match(haystack))
}
