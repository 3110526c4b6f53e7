//! Effective configuration of the `logs` command

use serde::Serialize;
use std::path::PathBuf;

use super::context::ResolveContext;
use super::credentials::resolve_credentials;
use super::env_file::read_local_env_file;
use super::external::ExternalCliOptions;
use super::loader::{read_specialized_config, SectionQuery, LOGS_SECTION};
use super::merge::merge_flags_and_config;
use super::options::{FlagSet, DEFAULT_ENVIRONMENT, LOGS_OPTIONS};
use crate::checks::check_for_valid_service_sid;
use crate::error::Result;

const FALLBACK_COMMAND: &str = "serverless-config logs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsConfig {
    pub cwd: PathBuf,
    pub account_sid: String,
    pub auth_token: String,
    pub environment: String,
    pub service_sid: String,
    pub output_format: Option<String>,
    pub filter_by_function: Option<String>,
    pub tail: bool,
    pub region: Option<String>,
    pub edge: Option<String>,
}

/// Resolve the `logs` configuration from flags, project files and the
/// optional caller context.
pub fn resolve_logs_config(
    mut flags: FlagSet,
    external: Option<&ExternalCliOptions>,
    ctx: &ResolveContext,
) -> Result<LogsConfig> {
    let cwd = ctx.resolve_cwd(&flags);
    ResolveContext::pin_cwd(&mut flags, &cwd);

    let environment = flags.string("environment").unwrap_or_else(|| DEFAULT_ENVIRONMENT.into());
    flags.set("environment", environment.as_str());

    let project_id =
        flags.string("accountSid").or_else(|| external.and_then(|e| e.account_sid.clone()));
    let section = read_specialized_config(
        &cwd,
        flags.str("config"),
        LOGS_SECTION,
        SectionQuery {
            project_id: project_id.as_deref(),
            environment_suffix: Some(environment.as_str()),
        },
    )?;

    let flags = merge_flags_and_config(&section, flags, LOGS_OPTIONS);
    let cwd = ctx.reresolve_cwd(&flags, cwd);
    let environment = flags.string("environment").unwrap_or(environment);

    let local_env = read_local_env_file(&cwd, &flags)?;
    let credentials = resolve_credentials(&flags, &local_env.vars, external);

    let command = ctx.command_line_or(FALLBACK_COMMAND);
    let service_sid = check_for_valid_service_sid(command, flags.str("serviceSid"))?;
    let output_format =
        flags.string("outputFormat").or_else(|| external.and_then(|e| e.output_format.clone()));

    Ok(LogsConfig {
        cwd,
        account_sid: credentials.account_sid,
        auth_token: credentials.auth_token,
        environment,
        service_sid,
        output_format,
        filter_by_function: flags.string("functionSid"),
        tail: flags.bool("tail"),
        region: flags.string("region"),
        edge: flags.string("edge"),
    })
}
