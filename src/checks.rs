//! Pre-flight checks with actionable messages

use crate::error::{ResolveError, Result};

const SERVICE_SID_PREFIX: &str = "ZS";

/// Ensure a usable service sid is present.
///
/// `command` is the full command line as invoked; the error message repeats
/// it with a `--service-sid` argument so the user can copy it.
pub fn check_for_valid_service_sid(command: &str, service_sid: Option<&str>) -> Result<String> {
    match service_sid {
        Some(sid) if sid.starts_with(SERVICE_SID_PREFIX) => Ok(sid.to_string()),
        other => {
            let problem = match other {
                Some(sid) => format!("The value \"{sid}\" is not a valid service SID."),
                None => "We could not determine which service to use.".to_string(),
            };
            let message = format!(
                "Missing service SID. {problem}\n\n\
                 Run the command again with a service SID:\n\n  \
                 {command} --service-sid {SERVICE_SID_PREFIX}...\n\n\
                 or set \"serviceSid\" in your config file."
            );
            Err(ResolveError::MissingServiceSid { message })
        }
    }
}
