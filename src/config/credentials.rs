//! Account credential resolution
//!
//! Layers, lowest to highest:
//! 1. ambient caller credentials (only without an explicit identity selection)
//! 2. `ACCOUNT_SID` / `AUTH_TOKEN` from the env file, per field
//! 3. credentials of an explicitly selected profile, both fields at once
//! 4. `accountSid` / `authToken` flags, per field

use serde::Serialize;

use super::env_file::EnvVariables;
use super::external::ExternalCliOptions;
use super::options::FlagSet;

pub const ACCOUNT_SID_KEY: &str = "ACCOUNT_SID";
pub const AUTH_TOKEN_KEY: &str = "AUTH_TOKEN";

/// Final credential pair. Fields are empty strings when no source supplies one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCredentials {
    pub account_sid: String,
    pub auth_token: String,
}

fn env_value<'a>(env: &'a EnvVariables, key: &str) -> Option<&'a str> {
    env.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

/// Resolve the credential pair for one invocation. Never fails.
pub fn resolve_credentials(
    flags: &FlagSet,
    env: &EnvVariables,
    external: Option<&ExternalCliOptions>,
) -> ResolvedCredentials {
    let mut creds = match external {
        Some(opts) if !opts.identity.is_explicit() => ResolvedCredentials {
            account_sid: opts.username.clone(),
            auth_token: opts.password.clone(),
        },
        _ => ResolvedCredentials::default(),
    };

    if let Some(account_sid) = env_value(env, ACCOUNT_SID_KEY) {
        tracing::debug!("Override accountSid with env file {} value", ACCOUNT_SID_KEY);
        creds.account_sid = account_sid.to_string();
    }
    if let Some(auth_token) = env_value(env, AUTH_TOKEN_KEY) {
        tracing::debug!("Override authToken with env file {} value", AUTH_TOKEN_KEY);
        creds.auth_token = auth_token.to_string();
    }

    if let Some(opts) = external.filter(|o| o.identity.is_explicit()) {
        tracing::debug!("Values read from explicit CLI profile {:?}", opts.identity);
        creds = ResolvedCredentials {
            account_sid: opts.username.clone(),
            auth_token: opts.password.clone(),
        };
    }

    if let Some(account_sid) = flags.str("accountSid") {
        tracing::debug!("Override accountSid with value from flag");
        creds.account_sid = account_sid.to_string();
    }
    if let Some(auth_token) = flags.str("authToken") {
        tracing::debug!("Override authToken with value from flag");
        creds.auth_token = auth_token.to_string();
    }

    creds
}
