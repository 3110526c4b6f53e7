//! Project manifest (`package.json`) access

use serde_json::Value;
use std::path::Path;

use super::options::FlagSet;
use crate::error::{ResolveError, Result};
use crate::utils::read_if_exists;

pub const MANIFEST_FILE: &str = "package.json";

/// Read `package.json` from `cwd`. `Ok(None)` when the project has none.
pub fn read_package_json(cwd: &Path) -> Result<Option<Value>> {
    let path = cwd.join(MANIFEST_FILE);
    let content = read_if_exists(&path)
        .map_err(|source| ResolveError::ManifestRead { path: path.clone(), source })?;
    let Some(content) = content else {
        tracing::debug!("No project manifest at {}", path.display());
        return Ok(None);
    };

    let manifest: Value = serde_json::from_str(&content)
        .map_err(|e| ResolveError::Manifest { path: path.clone(), message: e.to_string() })?;

    if !manifest.is_object() {
        return Err(ResolveError::Manifest {
            path,
            message: "manifest must be a JSON object".to_string(),
        });
    }
    Ok(Some(manifest))
}

/// Service name from the `serviceName` flag, else the manifest `name` field.
pub fn service_name_from(flags: &FlagSet, manifest: Option<&Value>) -> Option<String> {
    flags.string("serviceName").or_else(|| {
        manifest
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    })
}
