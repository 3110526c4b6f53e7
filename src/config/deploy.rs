//! Effective configuration of the `deploy` command

use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

use super::context::ResolveContext;
use super::credentials::resolve_credentials;
use super::deploy_info::{find_service_sid, looks_like_account_sid};
use super::env_file::{filter_env_variables_for_deploy, read_local_env_file, EnvVariables};
use super::external::ExternalCliOptions;
use super::loader::{read_specialized_config, SectionQuery, DEPLOY_SECTION};
use super::manifest::{read_package_json, service_name_from};
use super::merge::merge_flags_and_config;
use super::options::{FlagSet, DEFAULT_ENVIRONMENT, DEPLOY_OPTIONS};
use crate::error::{ResolveError, Result};

/// Everything the deployment client needs, fully merged
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployConfig {
    pub cwd: PathBuf,
    pub env_path: Option<PathBuf>,
    pub account_sid: String,
    pub auth_token: String,
    pub env: EnvVariables,
    pub service_sid: Option<String>,
    pub pkg_json: Option<Value>,
    pub override_existing_service: bool,
    pub force: bool,
    pub service_name: String,
    pub functions_env: String,
    pub functions_folder_name: Option<String>,
    pub assets_folder_name: Option<String>,
    pub no_assets: bool,
    pub no_functions: bool,
    pub region: Option<String>,
    pub edge: Option<String>,
}

/// Adopt the deprecated `functionsEnv` alias into `environment`.
fn apply_functions_env_alias(flags: &mut FlagSet) {
    let Some(alias) = flags.remove("functionsEnv") else {
        return;
    };
    tracing::warn!(
        "The --functions-env flag is deprecated and will be removed. Use --environment instead."
    );
    if !flags.is_explicit("environment", DEPLOY_OPTIONS) {
        flags.set("environment", alias);
    }
}

/// Resolve the `deploy` configuration from flags, project files and the
/// optional caller context.
pub fn resolve_deploy_config(
    mut flags: FlagSet,
    external: Option<&ExternalCliOptions>,
    ctx: &ResolveContext,
) -> Result<DeployConfig> {
    let cwd = ctx.resolve_cwd(&flags);
    ResolveContext::pin_cwd(&mut flags, &cwd);

    apply_functions_env_alias(&mut flags);

    let project_id =
        flags.string("accountSid").or_else(|| external.and_then(|e| e.account_sid.clone()));
    let section = read_specialized_config(
        &cwd,
        flags.str("config"),
        DEPLOY_SECTION,
        SectionQuery {
            project_id: project_id.as_deref(),
            environment_suffix: flags.str("environment"),
        },
    )?;

    let mut flags = merge_flags_and_config(&section, flags, DEPLOY_OPTIONS);
    let cwd = ctx.reresolve_cwd(&flags, cwd);

    if flags.bool("production") {
        tracing::debug!("Production deploy, dropping environment suffix");
        flags.set("environment", "");
    }

    let local_env = read_local_env_file(&cwd, &flags)?;
    let credentials = resolve_credentials(&flags, &local_env.vars, external);
    let env = filter_env_variables_for_deploy(&local_env.vars);

    let service_sid = match flags.string("serviceSid") {
        Some(sid) => Some(sid),
        None => {
            let account_sid = flags
                .str("accountSid")
                .filter(|sid| looks_like_account_sid(sid))
                .map(str::to_string)
                .or_else(|| external.and_then(|e| e.account_sid.clone()));
            find_service_sid(&cwd, flags.str("config"), DEPLOY_SECTION, account_sid.as_deref())?
        }
    };

    let pkg_json = read_package_json(&cwd)?;
    let service_name =
        service_name_from(&flags, pkg_json.as_ref()).ok_or(ResolveError::MissingServiceName)?;

    let functions_env = match flags.get("environment") {
        Some(Value::String(environment)) => environment.clone(),
        _ => DEFAULT_ENVIRONMENT.to_string(),
    };

    Ok(DeployConfig {
        cwd,
        env_path: local_env.path,
        account_sid: credentials.account_sid,
        auth_token: credentials.auth_token,
        env,
        service_sid,
        pkg_json,
        override_existing_service: flags.bool("overrideExistingProject"),
        force: flags.bool("force"),
        service_name,
        functions_env,
        functions_folder_name: flags.string("functionsFolder"),
        assets_folder_name: flags.string("assetsFolder"),
        no_assets: !flags.bool_or_default("assets", DEPLOY_OPTIONS),
        no_functions: !flags.bool_or_default("functions", DEPLOY_OPTIONS),
        region: flags.string("region"),
        edge: flags.string("edge"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::deploy_info::DEPLOY_INFO_FILE;
    use crate::config::options::DEFAULT_CONFIG_FILE;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn project(name: Option<&str>) -> TempDir {
        let tmp = TempDir::new().expect("tmp");
        if let Some(name) = name {
            fs::write(
                tmp.path().join("package.json"),
                format!(r#"{{ "name": "{name}", "version": "1.0.0" }}"#),
            )
            .expect("write manifest");
        }
        tmp
    }

    fn write(dir: &Path, file: &str, content: &str) {
        fs::write(dir.join(file), content).expect("write");
    }

    fn defaults() -> FlagSet {
        FlagSet::with_defaults(DEPLOY_OPTIONS)
    }

    #[test]
    fn test_minimal_project_resolves() {
        let tmp = project(Some("demo"));
        let ctx = ResolveContext::new(tmp.path());

        let config = resolve_deploy_config(defaults(), None, &ctx).expect("config");
        assert_eq!(config.cwd, tmp.path());
        assert_eq!(config.service_name, "demo");
        assert_eq!(config.functions_env, "dev");
        assert_eq!(config.account_sid, "");
        assert_eq!(config.auth_token, "");
        assert!(config.service_sid.is_none());
        assert!(config.env_path.is_none());
        assert!(!config.no_assets);
        assert!(!config.no_functions);
        assert!(config.pkg_json.is_some());
    }

    #[test]
    fn test_missing_service_name_fails() {
        let tmp = project(None);
        let ctx = ResolveContext::new(tmp.path());
        let result = resolve_deploy_config(defaults(), None, &ctx);
        assert!(matches!(result, Err(ResolveError::MissingServiceName)));
    }

    #[test]
    fn test_manifest_without_name_fails() {
        let tmp = project(None);
        write(tmp.path(), "package.json", r#"{ "version": "1.0.0" }"#);
        let ctx = ResolveContext::new(tmp.path());
        let err = resolve_deploy_config(defaults(), None, &ctx).expect_err("no name");
        assert!(err.to_string().contains("--service-name"));
    }

    #[test]
    fn test_service_name_flag_without_manifest() {
        let tmp = project(None);
        let ctx = ResolveContext::new(tmp.path());
        let flags = defaults().with("serviceName", "flagged");
        let config = resolve_deploy_config(flags, None, &ctx).expect("config");
        assert_eq!(config.service_name, "flagged");
        assert!(config.pkg_json.is_none());
    }

    #[test]
    fn test_production_forces_empty_environment() {
        let tmp = project(Some("demo"));
        let ctx = ResolveContext::new(tmp.path());
        for environment in ["dev", "stage", ""] {
            let flags =
                defaults().with("production", true).with("environment", environment);
            let config = resolve_deploy_config(flags, None, &ctx).expect("config");
            assert_eq!(config.functions_env, "");
        }
    }

    #[test]
    fn test_production_from_config_file() {
        let tmp = project(Some("demo"));
        write(
            tmp.path(),
            DEFAULT_CONFIG_FILE,
            r#"{ "commands": { "deployConfig": { "production": true } } }"#,
        );
        let ctx = ResolveContext::new(tmp.path());
        let config = resolve_deploy_config(defaults(), None, &ctx).expect("config");
        assert_eq!(config.functions_env, "");
    }

    #[test]
    fn test_functions_env_alias_adopted_when_environment_defaulted() {
        let tmp = project(Some("demo"));
        let ctx = ResolveContext::new(tmp.path());
        let flags = defaults().with("functionsEnv", "stage");
        let config = resolve_deploy_config(flags, None, &ctx).expect("config");
        assert_eq!(config.functions_env, "stage");
    }

    #[test]
    fn test_functions_env_alias_ignored_when_environment_given() {
        let tmp = project(Some("demo"));
        let ctx = ResolveContext::new(tmp.path());
        let flags = defaults().with("functionsEnv", "stage").with("environment", "qa");
        let config = resolve_deploy_config(flags, None, &ctx).expect("config");
        assert_eq!(config.functions_env, "qa");
    }

    #[test]
    fn test_config_file_fills_defaulted_flags_only() {
        let tmp = project(Some("demo"));
        write(
            tmp.path(),
            DEFAULT_CONFIG_FILE,
            r#"{
                "commands": {
                    "deployConfig": {
                        "serviceName": "configured",
                        "force": true,
                        "assets": false,
                        "region": "ie1"
                    }
                }
            }"#,
        );
        let ctx = ResolveContext::new(tmp.path());
        let flags = defaults().with("region", "au1");

        let config = resolve_deploy_config(flags, None, &ctx).expect("config");
        assert_eq!(config.service_name, "configured");
        assert!(config.force);
        assert!(config.no_assets);
        assert_eq!(config.region.as_deref(), Some("au1"));
    }

    #[test]
    fn test_environment_section_uses_suffix() {
        let tmp = project(Some("demo"));
        write(
            tmp.path(),
            DEFAULT_CONFIG_FILE,
            r#"{ "environments": { "stage": { "edge": "dublin" } } }"#,
        );
        let ctx = ResolveContext::new(tmp.path());
        let flags = defaults().with("environment", "stage");
        let config = resolve_deploy_config(flags, None, &ctx).expect("config");
        assert_eq!(config.edge.as_deref(), Some("dublin"));
        assert_eq!(config.functions_env, "stage");
    }

    #[test]
    fn test_credentials_and_env_from_env_file() {
        let tmp = project(Some("demo"));
        write(tmp.path(), ".env", "ACCOUNT_SID=AC_ENV\nAUTH_TOKEN=T_ENV\nAPI_KEY=k\nEMPTY=\n");
        let ctx = ResolveContext::new(tmp.path());
        let external = ExternalCliOptions::ambient("AC_AMBIENT", "T_AMBIENT");

        let config = resolve_deploy_config(defaults(), Some(&external), &ctx).expect("config");
        assert_eq!(config.account_sid, "AC_ENV");
        assert_eq!(config.auth_token, "T_ENV");
        assert_eq!(config.env_path, Some(tmp.path().join(".env")));
        assert_eq!(config.env.len(), 1);
        assert_eq!(config.env.get("API_KEY").map(String::as_str), Some("k"));
    }

    #[test]
    fn test_service_sid_flag_wins_over_cache() {
        let tmp = project(Some("demo"));
        write(tmp.path(), DEPLOY_INFO_FILE, r#"{ "AC1": { "serviceSid": "ZSCACHED" } }"#);
        let ctx = ResolveContext::new(tmp.path());
        let flags = defaults().with("accountSid", "AC1").with("serviceSid", "ZSFLAG");
        let config = resolve_deploy_config(flags, None, &ctx).expect("config");
        assert_eq!(config.service_sid.as_deref(), Some("ZSFLAG"));
    }

    #[test]
    fn test_service_sid_from_cache_for_account_flag() {
        let tmp = project(Some("demo"));
        write(tmp.path(), DEPLOY_INFO_FILE, r#"{ "AC1": { "serviceSid": "ZSCACHED" } }"#);
        let ctx = ResolveContext::new(tmp.path());
        let flags = defaults().with("accountSid", "AC1");
        let config = resolve_deploy_config(flags, None, &ctx).expect("config");
        assert_eq!(config.service_sid.as_deref(), Some("ZSCACHED"));
    }

    #[test]
    fn test_non_account_sid_flag_falls_back_to_caller_account() {
        // An API key sid is not an account sid; the caller's account is used.
        let tmp = project(Some("demo"));
        write(tmp.path(), DEPLOY_INFO_FILE, r#"{ "AC2": { "serviceSid": "ZSCALLER" } }"#);
        let ctx = ResolveContext::new(tmp.path());
        let flags = defaults().with("accountSid", "SK123");
        let external = ExternalCliOptions::ambient("SK123", "secret").with_account_sid("AC2");

        let config = resolve_deploy_config(flags, Some(&external), &ctx).expect("config");
        assert_eq!(config.service_sid.as_deref(), Some("ZSCALLER"));
        assert_eq!(config.account_sid, "SK123");
    }

    #[test]
    fn test_relative_cwd_flag() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join("app")).expect("mkdir");
        write(&tmp.path().join("app"), "package.json", r#"{ "name": "nested" }"#);
        let ctx = ResolveContext::new(tmp.path());
        let flags = defaults().with("cwd", "./app");

        let config = resolve_deploy_config(flags, None, &ctx).expect("config");
        assert_eq!(config.cwd, tmp.path().join("app"));
        assert_eq!(config.service_name, "nested");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_working_dir_is_kept() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().expect("tmp");
        let dir = tmp.path().join(OsStr::from_bytes(b"proj\xff"));
        fs::create_dir(&dir).expect("mkdir");
        write(&dir, "package.json", r#"{ "name": "demo" }"#);
        write(&dir, ".env", "AUTH_TOKEN=T_ENV\n");
        let ctx = ResolveContext::new(&dir);

        let config = resolve_deploy_config(defaults(), None, &ctx).expect("config");
        assert_eq!(config.cwd, dir);
        assert_eq!(config.service_name, "demo");
        assert_eq!(config.auth_token, "T_ENV");
    }

    #[test]
    fn test_unreadable_config_aborts_with_read_error() {
        let tmp = project(Some("demo"));
        fs::create_dir(tmp.path().join(DEFAULT_CONFIG_FILE)).expect("mkdir");
        let ctx = ResolveContext::new(tmp.path());
        let result = resolve_deploy_config(defaults(), None, &ctx);
        assert!(matches!(result, Err(ResolveError::ConfigRead { .. })));
    }

    #[test]
    fn test_malformed_config_aborts() {
        let tmp = project(Some("demo"));
        write(tmp.path(), DEFAULT_CONFIG_FILE, "{");
        let ctx = ResolveContext::new(tmp.path());
        let result = resolve_deploy_config(defaults(), None, &ctx);
        assert!(matches!(result, Err(ResolveError::ConfigParse { .. })));
    }

    #[test]
    fn test_folder_and_toggle_pass_through() {
        let tmp = project(Some("demo"));
        let ctx = ResolveContext::new(tmp.path());
        let flags = defaults()
            .with("functionsFolder", "src/functions")
            .with("assetsFolder", "static")
            .with("functions", false)
            .with("overrideExistingProject", true);

        let config = resolve_deploy_config(flags, None, &ctx).expect("config");
        assert_eq!(config.functions_folder_name.as_deref(), Some("src/functions"));
        assert_eq!(config.assets_folder_name.as_deref(), Some("static"));
        assert!(config.no_functions);
        assert!(!config.no_assets);
        assert!(config.override_existing_service);
    }
}
