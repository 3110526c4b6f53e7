//! Configuration loading and merging
//!
//! Resolves the effective `deploy` and `logs` configuration from command-line
//! flags, the project config file, the local env file and the caller context,
//! with precedence decided per option (see `merge`) and per credential field
//! (see `credentials`).

pub mod context;
pub mod credentials;
pub mod deploy;
pub mod deploy_info;
pub mod env_file;
pub mod external;
pub mod loader;
pub mod logs;
pub mod manifest;
pub mod merge;
pub mod options;

pub use context::ResolveContext;
pub use credentials::{resolve_credentials, ResolvedCredentials};
pub use deploy::{resolve_deploy_config, DeployConfig};
pub use env_file::EnvVariables;
pub use external::{ExternalCliOptions, IdentitySelection};
pub use loader::read_specialized_config;
pub use logs::{resolve_logs_config, LogsConfig};
pub use merge::merge_flags_and_config;
pub use options::{FlagSet, OptionDescriptor, DEPLOY_OPTIONS, LOGS_OPTIONS};
