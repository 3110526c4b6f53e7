//! Lookup of previously deployed services
//!
//! After a deployment the service sid is remembered per account in a small
//! JSON cache next to the project:
//!
//! ```json
//! { "AC...": { "serviceSid": "ZS...", "latestBuild": "ZB..." } }
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use super::loader::{read_specialized_config, SectionQuery};
use crate::error::{ResolveError, Result};
use crate::utils::read_if_exists;

pub const DEPLOY_INFO_FILE: &str = ".serverless-deployinfo";

/// Cached result of one deployment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployInfo {
    pub service_sid: String,
    #[serde(default)]
    pub latest_build: Option<String>,
}

/// Whether `sid` has the shape of a live account sid
pub fn looks_like_account_sid(sid: &str) -> bool {
    sid.starts_with("AC")
}

/// Read the deploy info cache of `cwd`. Missing file gives an empty map.
pub fn read_deploy_info_cache(cwd: &Path) -> Result<BTreeMap<String, DeployInfo>> {
    let path = cwd.join(DEPLOY_INFO_FILE);
    let content = read_if_exists(&path)
        .map_err(|source| ResolveError::DeployInfoRead { path: path.clone(), source })?;
    let Some(content) = content else {
        return Ok(BTreeMap::new());
    };
    serde_json::from_str(&content)
        .map_err(|e| ResolveError::DeployInfo { path, message: e.to_string() })
}

/// Find the service sid previously used for `account_sid`.
///
/// The config file's project section wins over the deploy info cache.
pub fn find_service_sid(
    cwd: &Path,
    config_file: Option<&str>,
    command_section: &str,
    account_sid: Option<&str>,
) -> Result<Option<String>> {
    let section = read_specialized_config(
        cwd,
        config_file,
        command_section,
        SectionQuery { project_id: account_sid, environment_suffix: None },
    )?;
    let configured = section.get("serviceSid").and_then(Value::as_str).filter(|s| !s.is_empty());
    if let Some(sid) = configured {
        tracing::debug!("Using serviceSid from config file");
        return Ok(Some(sid.to_string()));
    }

    let Some(account_sid) = account_sid else {
        return Ok(None);
    };
    let cache = read_deploy_info_cache(cwd)?;
    let found = cache.get(account_sid).map(|info| info.service_sid.clone());
    if found.is_some() {
        tracing::debug!("Using serviceSid from {}", DEPLOY_INFO_FILE);
    }
    Ok(found)
}
