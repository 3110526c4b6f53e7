//! Config file loading

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::options::DEFAULT_CONFIG_FILE;
use crate::error::{ResolveError, Result};
use crate::utils::{read_if_exists, resolve_against};

/// Section of the config file holding `deploy` settings
pub const DEPLOY_SECTION: &str = "deployConfig";
/// Section of the config file holding `logs` settings
pub const LOGS_SECTION: &str = "logsConfig";

const COMMANDS_KEY: &str = "commands";
const ENVIRONMENTS_KEY: &str = "environments";
const PROJECTS_KEY: &str = "projects";
const ANY_ENVIRONMENT: &str = "*";

/// Identity used to pick the specialized parts of a config file
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionQuery<'a> {
    /// Account the settings are for, selects `projects.<id>`
    pub project_id: Option<&'a str>,
    /// Environment suffix, selects `environments.<suffix>`
    pub environment_suffix: Option<&'a str>,
}

/// Path of the config file for `cwd`, honouring a `config` flag value.
pub fn config_file_path(cwd: &Path, config_file: Option<&str>) -> PathBuf {
    resolve_against(cwd, Path::new(config_file.unwrap_or(DEFAULT_CONFIG_FILE)))
}

/// Read the settings for `command_section` from the project config file.
///
/// Layers are applied key by key, later ones winning: top-level keys, the
/// command section, the environment section, then the project section. A
/// missing file gives an empty map.
pub fn read_specialized_config(
    cwd: &Path,
    config_file: Option<&str>,
    command_section: &str,
    query: SectionQuery<'_>,
) -> Result<Map<String, Value>> {
    let path = config_file_path(cwd, config_file);
    let Some(mut root) = read_config_file(&path)? else {
        return Ok(Map::new());
    };

    let commands = root.remove(COMMANDS_KEY);
    let environments = root.remove(ENVIRONMENTS_KEY);
    let projects = root.remove(PROJECTS_KEY);

    let mut result = root;

    if let Some(section) = commands.as_ref().and_then(|c| c.get(command_section)) {
        tracing::debug!("Applying '{}' settings from {}", command_section, path.display());
        extend_from(&mut result, section);
    }

    if let Some(suffix) = query.environment_suffix.filter(|s| !s.is_empty()) {
        let section = environments
            .as_ref()
            .and_then(|envs| envs.get(suffix).or_else(|| envs.get(ANY_ENVIRONMENT)));
        if let Some(section) = section {
            tracing::debug!("Applying environment '{}' settings", suffix);
            extend_from(&mut result, section);
        }
    }

    if let Some(project_id) = query.project_id.filter(|s| !s.is_empty()) {
        if let Some(section) = projects.as_ref().and_then(|p| p.get(project_id)) {
            tracing::debug!("Applying project '{}' settings", project_id);
            extend_from(&mut result, section);
        }
    }

    Ok(result)
}

fn extend_from(target: &mut Map<String, Value>, section: &Value) {
    if let Value::Object(map) = section {
        for (key, value) in map {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// Parse a config file into a JSON object. `Ok(None)` when it does not exist.
///
/// The format follows the extension: `.toml`, `.yaml`/`.yml`, otherwise JSON.
pub fn read_config_file(path: &Path) -> Result<Option<Map<String, Value>>> {
    let content = read_if_exists(path)
        .map_err(|source| ResolveError::ConfigRead { path: path.to_path_buf(), source })?;
    let Some(content) = content else {
        tracing::debug!("No config file at {}", path.display());
        return Ok(None);
    };

    if content.trim().is_empty() {
        return Ok(Some(Map::new()));
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let parsed: std::result::Result<Value, String> = match ext.as_str() {
        "toml" => toml::from_str(&content).map_err(|e| e.to_string()),
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        _ => serde_json::from_str(&content).map_err(|e| e.to_string()),
    };

    match parsed {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(Value::Null) => Ok(Some(Map::new())),
        Ok(_) => Err(ResolveError::ConfigParse {
            path: path.to_path_buf(),
            message: "top-level value must be a table/object".to_string(),
        }),
        Err(message) => Err(ResolveError::ConfigParse { path: path.to_path_buf(), message }),
    }
}
