//! Option declarations and the per-invocation flag set
//!
//! Every configurable option of a command is declared once in a static table
//! together with its default. The merger compares flag values against these
//! defaults to tell user-supplied flags apart from defaulted ones.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Value type of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Boolean,
}

/// Declared default of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    None,
    Str(&'static str),
    Bool(bool),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::None => Value::Null,
            DefaultValue::Str(s) => Value::String(s.to_string()),
            DefaultValue::Bool(b) => Value::Bool(b),
        }
    }
}

/// A configurable option with its declared default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDescriptor {
    pub name: &'static str,
    pub default: DefaultValue,
    pub kind: OptionKind,
}

const fn string(name: &'static str) -> OptionDescriptor {
    OptionDescriptor { name, default: DefaultValue::None, kind: OptionKind::String }
}

const fn string_or(name: &'static str, default: &'static str) -> OptionDescriptor {
    OptionDescriptor { name, default: DefaultValue::Str(default), kind: OptionKind::String }
}

const fn boolean(name: &'static str, default: bool) -> OptionDescriptor {
    OptionDescriptor { name, default: DefaultValue::Bool(default), kind: OptionKind::Boolean }
}

/// Default project config file name
pub const DEFAULT_CONFIG_FILE: &str = ".serverlessrc";

/// Default environment suffix for both commands
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Options of the `deploy` command
pub const DEPLOY_OPTIONS: &[OptionDescriptor] = &[
    string("cwd"),
    string("accountSid"),
    string("authToken"),
    string_or("config", DEFAULT_CONFIG_FILE),
    string("env"),
    string_or("environment", DEFAULT_ENVIRONMENT),
    string("functionsEnv"),
    boolean("production", false),
    string("serviceSid"),
    string("serviceName"),
    boolean("overrideExistingProject", false),
    boolean("force", false),
    boolean("functions", true),
    boolean("assets", true),
    string("assetsFolder"),
    string("functionsFolder"),
    string("region"),
    string("edge"),
];

/// Options of the `logs` command
pub const LOGS_OPTIONS: &[OptionDescriptor] = &[
    string("cwd"),
    string("accountSid"),
    string("authToken"),
    string_or("config", DEFAULT_CONFIG_FILE),
    string("env"),
    string_or("environment", DEFAULT_ENVIRONMENT),
    string("serviceSid"),
    string("functionSid"),
    boolean("tail", false),
    string_or("outputFormat", ""),
    string("region"),
    string("edge"),
];

/// Look up the declared default of `name`. Undeclared options default to `null`.
pub fn declared_default(descriptors: &[OptionDescriptor], name: &str) -> Value {
    descriptors
        .iter()
        .find(|d| d.name == name)
        .map(|d| d.default.to_value())
        .unwrap_or(Value::Null)
}

/// Flag values of one command invocation, keyed by camelCase option name.
///
/// Values are either explicit user input or declared defaults. Parsers that
/// know where a value came from may additionally mark it as explicit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagSet {
    values: BTreeMap<String, Value>,
    explicit: BTreeSet<String>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a flag set with every non-null declared default.
    pub fn with_defaults(descriptors: &[OptionDescriptor]) -> Self {
        let mut flags = Self::new();
        for descriptor in descriptors {
            let value = descriptor.default.to_value();
            if !value.is_null() {
                flags.values.insert(descriptor.name.to_string(), value);
            }
        }
        flags
    }

    /// Builder-style setter
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        if value.is_null() {
            self.values.remove(name);
        } else {
            self.values.insert(name.to_string(), value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.explicit.remove(name);
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Record that `name` was supplied on the command line.
    pub fn mark_explicit(&mut self, name: &str) {
        self.explicit.insert(name.to_string());
    }

    pub fn is_marked_explicit(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    /// Whether `name` holds a user-supplied value.
    ///
    /// Marked flags are explicit. Otherwise a non-null value counts as
    /// explicit only when it differs from the declared default. A value that
    /// was typed by the user but equals its default is indistinguishable from
    /// an unset flag here.
    pub fn is_explicit(&self, name: &str, descriptors: &[OptionDescriptor]) -> bool {
        if self.is_marked_explicit(name) {
            return true;
        }
        match self.values.get(name) {
            None | Some(Value::Null) => false,
            Some(value) => *value != declared_default(descriptors, name),
        }
    }

    /// Non-empty string value of `name`
    pub fn str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Owned variant of [`FlagSet::str`]
    pub fn string(&self, name: &str) -> Option<String> {
        self.str(name).map(str::to_string)
    }

    /// Boolean value of `name`; anything but `true` reads as `false`.
    pub fn bool(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Value::Bool(true)))
    }

    /// Boolean value of `name`, falling back to its declared default when the
    /// flag is not a boolean.
    pub fn bool_or_default(&self, name: &str, descriptors: &[OptionDescriptor]) -> bool {
        match self.values.get(name) {
            Some(Value::Bool(b)) => *b,
            _ => declared_default(descriptors, name).as_bool().unwrap_or(false),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_defaults_skips_null_defaults() {
        let flags = FlagSet::with_defaults(DEPLOY_OPTIONS);
        assert_eq!(flags.str("environment"), Some("dev"));
        assert!(flags.bool("functions"));
        assert!(!flags.bool("production"));
        assert!(!flags.contains("serviceSid"));
    }

    #[test]
    fn test_str_treats_empty_as_unset() {
        let flags = FlagSet::new().with("outputFormat", "");
        assert!(flags.contains("outputFormat"));
        assert_eq!(flags.str("outputFormat"), None);
    }

    #[test]
    fn test_setting_null_removes_value() {
        let mut flags = FlagSet::new().with("region", "au1");
        flags.set("region", Value::Null);
        assert!(!flags.contains("region"));
    }

    #[test]
    fn test_is_explicit_compares_against_declared_default() {
        let flags = FlagSet::with_defaults(DEPLOY_OPTIONS).with("force", true);
        assert!(flags.is_explicit("force", DEPLOY_OPTIONS));
        assert!(!flags.is_explicit("environment", DEPLOY_OPTIONS));
        assert!(!flags.is_explicit("serviceSid", DEPLOY_OPTIONS));
    }

    #[test]
    fn test_marker_makes_default_valued_flag_explicit() {
        let mut flags = FlagSet::with_defaults(DEPLOY_OPTIONS);
        flags.mark_explicit("environment");
        assert!(flags.is_explicit("environment", DEPLOY_OPTIONS));
    }

    #[test]
    fn test_undeclared_option_defaults_to_null() {
        assert_eq!(declared_default(LOGS_OPTIONS, "production"), Value::Null);
        assert_eq!(declared_default(LOGS_OPTIONS, "tail"), Value::Bool(false));
    }
}
