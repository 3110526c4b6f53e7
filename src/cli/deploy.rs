//! Deploy command implementation

use anyhow::Result;
use clap::{ArgAction, ArgMatches, Args};

use super::utils::{mark_command_line_flags, print_config, set_opt};
use super::GlobalOptions;
use crate::config::options::{DEFAULT_CONFIG_FILE, DEFAULT_ENVIRONMENT};
use crate::config::{resolve_deploy_config, FlagSet, DEPLOY_OPTIONS};

#[derive(Args)]
pub struct DeployArgs {
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

    /// Environment suffix to deploy to
    #[arg(long, value_name = "SUFFIX", default_value = DEFAULT_ENVIRONMENT)]
    pub environment: String,

    /// Deprecated alias of --environment
    #[arg(long, value_name = "SUFFIX", hide = true)]
    pub functions_env: Option<String>,

    /// Deploy to production (no environment suffix)
    #[arg(long)]
    pub production: bool,

    /// Service to deploy to
    #[arg(long, value_name = "SID")]
    pub service_sid: Option<String>,

    /// Name of the service (defaults to the package.json name)
    #[arg(short = 'n', long, value_name = "NAME")]
    pub service_name: Option<String>,

    /// Deploy into an existing service with the same name
    #[arg(long)]
    pub override_existing_project: bool,

    /// Skip deployment safety checks
    #[arg(long)]
    pub force: bool,

    /// Skip uploading functions
    #[arg(long = "no-functions", action = ArgAction::SetFalse)]
    pub functions: bool,

    /// Skip uploading assets
    #[arg(long = "no-assets", action = ArgAction::SetFalse)]
    pub assets: bool,

    /// Folder containing assets
    #[arg(long, value_name = "DIR")]
    pub assets_folder: Option<String>,

    /// Folder containing functions
    #[arg(long, value_name = "DIR")]
    pub functions_folder: Option<String>,

    /// Region of the API
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Edge location of the API
    #[arg(long, value_name = "EDGE")]
    pub edge: Option<String>,
}

impl DeployArgs {
    fn into_flags(self, matches: Option<&ArgMatches>) -> FlagSet {
        let mut flags = FlagSet::with_defaults(DEPLOY_OPTIONS);
        set_opt(&mut flags, "cwd", self.cwd);
        set_opt(&mut flags, "accountSid", self.account_sid);
        set_opt(&mut flags, "authToken", self.auth_token);
        flags.set("config", self.config);
        set_opt(&mut flags, "env", self.env);
        flags.set("environment", self.environment);
        set_opt(&mut flags, "functionsEnv", self.functions_env);
        flags.set("production", self.production);
        set_opt(&mut flags, "serviceSid", self.service_sid);
        set_opt(&mut flags, "serviceName", self.service_name);
        flags.set("overrideExistingProject", self.override_existing_project);
        flags.set("force", self.force);
        flags.set("functions", self.functions);
        flags.set("assets", self.assets);
        set_opt(&mut flags, "assetsFolder", self.assets_folder);
        set_opt(&mut flags, "functionsFolder", self.functions_folder);
        set_opt(&mut flags, "region", self.region);
        set_opt(&mut flags, "edge", self.edge);
        mark_command_line_flags(&mut flags, matches, DEPLOY_OPTIONS);
        flags
    }
}

pub(crate) fn run(
    args: DeployArgs,
    matches: Option<&ArgMatches>,
    global: &GlobalOptions,
) -> Result<()> {
    let flags = args.into_flags(matches);
    let config = resolve_deploy_config(flags, global.external.as_ref(), &global.context)?;
    print_config(&config, global.show_secrets)
}
