//! Logs command implementation

use anyhow::Result;
use clap::{ArgMatches, Args};

use super::utils::{mark_command_line_flags, print_config, set_opt};
use super::GlobalOptions;
use crate::config::options::{DEFAULT_CONFIG_FILE, DEFAULT_ENVIRONMENT};
use crate::config::{resolve_logs_config, FlagSet, LOGS_OPTIONS};

#[derive(Args)]
pub struct LogsArgs {
    /// Project directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<String>,

    /// Account SID or API key used to authenticate
    #[arg(short = 'u', long, value_name = "SID")]
    pub account_sid: Option<String>,

    /// Auth token or API secret used to authenticate
    #[arg(short = 'p', long, value_name = "TOKEN")]
    pub auth_token: Option<String>,

    /// Project config file, relative to the project directory
    #[arg(short = 'c', long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Env file to read, relative to the project directory
    #[arg(long, value_name = "FILE")]
    pub env: Option<String>,

    /// Environment suffix to read logs from
    #[arg(long, value_name = "SUFFIX", default_value = DEFAULT_ENVIRONMENT)]
    pub environment: String,

    /// Service to read logs from
    #[arg(long, value_name = "SID")]
    pub service_sid: Option<String>,

    /// Only show logs of this function
    #[arg(long, value_name = "SID")]
    pub function_sid: Option<String>,

    /// Keep streaming new log entries
    #[arg(long)]
    pub tail: bool,

    /// Output format of log entries (e.g. 'json')
    #[arg(short = 'o', long, value_name = "FORMAT", default_value = "")]
    pub output_format: String,

    /// Region of the API
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Edge location of the API
    #[arg(long, value_name = "EDGE")]
    pub edge: Option<String>,
}

impl LogsArgs {
    fn into_flags(self, matches: Option<&ArgMatches>) -> FlagSet {
        let mut flags = FlagSet::with_defaults(LOGS_OPTIONS);
        set_opt(&mut flags, "cwd", self.cwd);
        set_opt(&mut flags, "accountSid", self.account_sid);
        set_opt(&mut flags, "authToken", self.auth_token);
        flags.set("config", self.config);
        set_opt(&mut flags, "env", self.env);
        flags.set("environment", self.environment);
        set_opt(&mut flags, "serviceSid", self.service_sid);
        set_opt(&mut flags, "functionSid", self.function_sid);
        flags.set("tail", self.tail);
        flags.set("outputFormat", self.output_format);
        set_opt(&mut flags, "region", self.region);
        set_opt(&mut flags, "edge", self.edge);
        mark_command_line_flags(&mut flags, matches, LOGS_OPTIONS);
        flags
    }
}

pub(crate) fn run(
    args: LogsArgs,
    matches: Option<&ArgMatches>,
    global: &GlobalOptions,
) -> Result<()> {
    let flags = args.into_flags(matches);
    let config = resolve_logs_config(flags, global.external.as_ref(), &global.context)?;
    print_config(&config, global.show_secrets)
}
