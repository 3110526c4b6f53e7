//! Shared CLI utilities.

use anyhow::Result;
use clap::parser::ValueSource;
use clap::ArgMatches;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::config::{FlagSet, OptionDescriptor};
use crate::utils::mask_secret;

/// Convert a clap argument id (`service_sid`) into an option name (`serviceSid`).
pub fn to_camel_case(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut upper_next = false;
    for ch in id.chars() {
        if ch == '_' || ch == '-' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Mark every declared option that was typed on the command line as explicit.
pub fn mark_command_line_flags(
    flags: &mut FlagSet,
    matches: Option<&ArgMatches>,
    descriptors: &[OptionDescriptor],
) {
    let Some(matches) = matches else {
        return;
    };
    for id in matches.ids() {
        if matches.value_source(id.as_str()) != Some(ValueSource::CommandLine) {
            continue;
        }
        let name = to_camel_case(id.as_str());
        if descriptors.iter().any(|d| d.name == name) {
            flags.mark_explicit(&name);
        }
    }
}

/// Store an optional string flag, leaving the declared default when absent.
pub fn set_opt(flags: &mut FlagSet, name: &str, value: Option<String>) {
    if let Some(value) = value {
        flags.set(name, value);
    }
}

/// Rebuild the invoked command line, program name first.
pub fn full_command(args: impl IntoIterator<Item = String>) -> String {
    let mut parts = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        let arg = if i == 0 {
            Path::new(&arg)
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .unwrap_or(arg)
        } else {
            arg
        };
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            parts.push(format!("\"{}\"", arg.replace('"', "\\\"")));
        } else {
            parts.push(arg);
        }
    }
    parts.join(" ")
}

/// Print a resolved configuration as pretty JSON, masking the auth token.
pub fn print_config<T: Serialize>(config: &T, show_secrets: bool) -> Result<()> {
    let mut value = serde_json::to_value(config)?;
    if !show_secrets {
        if let Some(Value::String(token)) = value.get_mut("authToken") {
            *token = mask_secret(token);
        }
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
