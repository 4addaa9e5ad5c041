//! Curl command implementation

use crate::cli::output::format_curl_script;
use crate::cli::{CurlArgs, GlobalArgs};
use crate::config::load_service_files;
use crate::factory::build_checks;

/// Handle `svck curl`
pub fn handle_curl(
    global: &GlobalArgs,
    args: &CurlArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let config = global.run_config();
    config.validate()?;

    let services = load_service_files(&args.files)?;
    let checks = build_checks(&services, &config)?;

    Ok(format_curl_script(&checks, !args.no_bash_comments))
}
