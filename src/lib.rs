//! serverless-config: effective configuration for serverless `deploy` and `logs`
//!
//! Merges command-line flags, a per-environment project config file, a local
//! `.env` file and an optional embedding caller's context into one
//! configuration object per command.

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod utils;

pub use config::{
    resolve_deploy_config, resolve_logs_config, DeployConfig, ExternalCliOptions, FlagSet,
    LogsConfig, ResolveContext,
};
pub use error::{ResolveError, Result};
