//! Output formatting for check reports

use crate::check::Check;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;

/// Counts of successful and failed checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SummaryCounts {
    pub failed: usize,
    pub successful: usize,
}

impl SummaryCounts {
    pub fn from_checks(checks: &[Check]) -> Self {
        let failed = checks.iter().filter(|c| !c.success()).count();
        Self {
            failed,
            successful: checks.len() - failed,
        }
    }
}

/// Detail block for one failed check
fn format_failure(check: &Check) -> String {
    let mut output = String::new();

    writeln!(output, "{} {}", "Failed check:".red().bold(), check.name()).unwrap();
    writeln!(output, "\tURL: {}", check.request.url).unwrap();
    writeln!(output, "\tREQUEST_HEADERS: {}", check.request_headers("")).unwrap();
    writeln!(
        output,
        "\tRESPONSE_HEADERS: {}",
        check.response_headers("").trim_end()
    )
    .unwrap();
    writeln!(output, "\tREPRODUCE: {}", check.as_curl()).unwrap();
    writeln!(output, "\tREASON: [{}]", check.reason().join("; ")).unwrap();

    output
}

/// Failed checks in detail, followed by the counts
pub fn format_summary(checks: &[Check]) -> String {
    let mut output = String::new();

    for check in checks.iter().filter(|c| !c.success()) {
        writeln!(output, "{}", format_failure(check)).unwrap();
    }

    let counts = SummaryCounts::from_checks(checks);
    let failed = if counts.failed > 0 {
        counts.failed.to_string().red()
    } else {
        counts.failed.to_string().normal()
    };

    writeln!(output, "Summary:").unwrap();
    writeln!(output, "\tFailed: {}", failed).unwrap();
    writeln!(
        output,
        "\tSuccessful: {}",
        counts.successful.to_string().green()
    )
    .unwrap();

    output
}

/// All checks as a pretty-printed JSON array
pub fn format_json(checks: &[Check]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(checks)
}

/// One curl command per check, optionally as a commented bash script
pub fn format_curl_script(checks: &[Check], bash_comments: bool) -> String {
    let mut output = String::new();

    if bash_comments {
        writeln!(output, "#!/bin/bash").unwrap();
    }
    for check in checks {
        if bash_comments {
            writeln!(output).unwrap();
            writeln!(output, "# {}", check.name()).unwrap();
        }
        writeln!(output, "{}", check.as_curl()).unwrap();
    }

    output
}
