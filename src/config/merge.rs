//! Merging config file values into command-line flags
//!
//! Precedence is: explicit flag > config file > declared default. The flag
//! parser does not report which flags the user actually typed, so a flag is
//! taken as explicit when its value differs from the declared default (or when
//! the parser marked it). Consequently an explicit flag that happens to equal
//! its default is overridden by the config file unless it carries a marker.

use serde_json::{Map, Value};

use super::options::{FlagSet, OptionDescriptor};

/// Merge `section` into `flags`.
///
/// Keys missing from `section` are left alone, so an empty section is an
/// identity merge. Applying the same section twice changes nothing further.
pub fn merge_flags_and_config(
    section: &Map<String, Value>,
    mut flags: FlagSet,
    descriptors: &[OptionDescriptor],
) -> FlagSet {
    for (name, config_value) in section {
        if flags.is_explicit(name, descriptors) {
            tracing::debug!("Keeping command-line value for '{}' over config file", name);
            continue;
        }
        tracing::debug!("Using config file value for '{}'", name);
        flags.set(name, config_value.clone());
    }
    flags
}
