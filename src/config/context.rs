//! Process-level inputs of a resolution

use std::path::{Path, PathBuf};

use super::options::FlagSet;
use crate::utils::resolve_against;

/// Ambient state a resolution depends on, passed in explicitly so the
/// pipeline never looks up the current directory or arguments itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveContext {
    /// Directory relative paths are resolved against
    pub working_dir: PathBuf,
    /// Full command line as the user typed it, for error messages
    pub command_line: String,
}

impl ResolveContext {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self { working_dir: working_dir.into(), command_line: String::new() }
    }

    pub fn with_command_line(mut self, command_line: impl Into<String>) -> Self {
        self.command_line = command_line.into();
        self
    }

    /// Absolute project directory: the `cwd` flag resolved against the
    /// working directory, or the working directory itself.
    pub fn resolve_cwd(&self, flags: &FlagSet) -> PathBuf {
        match flags.str("cwd") {
            Some(dir) => resolve_against(&self.working_dir, Path::new(dir)),
            None => self.working_dir.clone(),
        }
    }

    /// Write the resolved project directory back into `flags`.
    pub fn pin_cwd(flags: &mut FlagSet, cwd: &Path) {
        flags.set("cwd", cwd.to_string_lossy().into_owned());
    }

    /// Project directory after a merge. `pinned` is kept unless the merged
    /// flags name a different directory than the one written by `pin_cwd`,
    /// so paths that are not valid UTF-8 survive the round trip.
    pub fn reresolve_cwd(&self, flags: &FlagSet, pinned: PathBuf) -> PathBuf {
        let unchanged = flags.str("cwd") == Some(pinned.to_string_lossy().as_ref());
        if unchanged {
            pinned
        } else {
            self.resolve_cwd(flags)
        }
    }

    /// The invoked command line, or `fallback` when none was recorded.
    pub fn command_line_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.command_line.is_empty() {
            fallback
        } else {
            &self.command_line
        }
    }
}
