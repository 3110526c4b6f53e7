//! Local `.env` file loading

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::options::FlagSet;
use crate::error::{ResolveError, Result};
use crate::utils::{read_if_exists, resolve_against};

/// Key/value pairs read from the env file
pub type EnvVariables = BTreeMap<String, String>;

pub const DEFAULT_ENV_FILE: &str = ".env";

/// Env file content plus the path it was read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalEnv {
    pub vars: EnvVariables,
    pub path: Option<PathBuf>,
}

/// Read the env file named by the `env` flag, or `.env` in `cwd`.
///
/// A missing default file yields no variables. A missing file that was named
/// explicitly is an error, as is malformed content.
///
/// Values follow dotenv expansion rules: `$VAR` and `${VAR}` outside single
/// quotes are substituted, from the process environment first and then from
/// keys defined earlier in the file. Single-quoted values stay literal.
pub fn read_local_env_file(cwd: &Path, flags: &FlagSet) -> Result<LocalEnv> {
    let explicit = flags.str("env");
    let env_path = resolve_against(cwd, Path::new(explicit.unwrap_or(DEFAULT_ENV_FILE)));

    let read_err = |source| ResolveError::EnvFileRead { path: env_path.clone(), source };
    let content = if explicit.is_some() {
        fs::read_to_string(&env_path).map_err(read_err)?
    } else {
        match read_if_exists(&env_path).map_err(read_err)? {
            Some(content) => content,
            None => {
                tracing::debug!("No env file at {}", env_path.display());
                return Ok(LocalEnv::default());
            }
        }
    };

    let vars = parse_env_content(&content)
        .map_err(|message| ResolveError::EnvFile { path: env_path.clone(), message })?;
    tracing::debug!("Read {} variables from {}", vars.len(), env_path.display());
    Ok(LocalEnv { vars, path: Some(env_path) })
}

fn parse_env_content(content: &str) -> std::result::Result<EnvVariables, String> {
    let mut vars = EnvVariables::new();
    for item in dotenvy::from_read_iter(content.as_bytes()) {
        let (key, value) = item.map_err(|e| e.to_string())?;
        vars.insert(key, value);
    }
    Ok(vars)
}

/// Variables uploaded with a deployment: credentials and empty values are
/// dropped.
pub fn filter_env_variables_for_deploy(vars: &EnvVariables) -> EnvVariables {
    vars.iter()
        .filter(|(key, value)| {
            key.as_str() != super::credentials::ACCOUNT_SID_KEY
                && key.as_str() != super::credentials::AUTH_TOKEN_KEY
                && !value.is_empty()
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
