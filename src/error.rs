//! Error types for configuration resolution

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for resolution steps
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors that abort a deploy or logs resolution.
///
/// Missing optional inputs never show up here; they fall back to empty values.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Neither `--service-name` nor a manifest `name` field was available
    #[error("Please pass --service-name or add a \"name\" field to your package.json")]
    MissingServiceName,

    /// No usable service sid for the logs command
    #[error("{message}")]
    MissingServiceSid { message: String },

    /// Config file exists but could not be read
    #[error("failed reading config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file content is malformed
    #[error("invalid config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Env file exists but could not be read, or was named explicitly and is missing
    #[error("failed reading env file {path}: {source}")]
    EnvFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Env file content is malformed
    #[error("invalid env file {path}: {message}")]
    EnvFile { path: PathBuf, message: String },

    /// Project manifest exists but could not be read
    #[error("failed reading project manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Project manifest content is malformed
    #[error("invalid project manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// Deploy info cache exists but could not be read
    #[error("failed reading deploy info file {path}: {source}")]
    DeployInfoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Deploy info cache content is malformed
    #[error("invalid deploy info file {path}: {message}")]
    DeployInfo { path: PathBuf, message: String },
}
