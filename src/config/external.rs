//! Context handed over by an embedding CLI
//!
//! An embedding shell may pass ambient credentials along with the identity the
//! operator picked. Whether an identity was picked changes how much weight the
//! credentials carry, so the selection is modelled explicitly.

use serde::Deserialize;

/// Which identity the embedding caller selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySelection {
    /// No explicit selection; credentials are ambient defaults
    Ambient,
    /// Operator selected a named profile
    Profile(String),
    /// Operator selected a project (older name for a profile)
    Project(String),
}

impl IdentitySelection {
    pub fn is_explicit(&self) -> bool {
        !matches!(self, IdentitySelection::Ambient)
    }
}

/// Options owned by the embedding caller. Absence of the whole context is
/// expressed as `Option::<&ExternalCliOptions>::None` at call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCliOptions {
    pub identity: IdentitySelection,
    pub username: String,
    pub password: String,
    pub account_sid: Option<String>,
    pub output_format: Option<String>,
}

impl ExternalCliOptions {
    /// Ambient credentials without an identity selection
    pub fn ambient(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identity: IdentitySelection::Ambient,
            username: username.into(),
            password: password.into(),
            account_sid: None,
            output_format: None,
        }
    }

    /// Credentials belonging to an explicitly selected profile
    pub fn profile(
        profile: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            identity: IdentitySelection::Profile(profile.into()),
            ..Self::ambient(username, password)
        }
    }

    pub fn with_account_sid(mut self, account_sid: impl Into<String>) -> Self {
        self.account_sid = Some(account_sid.into());
        self
    }

    pub fn with_output_format(mut self, output_format: impl Into<String>) -> Self {
        self.output_format = Some(output_format.into());
        self
    }
}

/// Loosely-typed wire shape of the caller context, as written by an embedding
/// shell. Empty strings count as unset.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExternalCliOptions {
    #[serde(default)]
    profile: Option<String>,
    #[serde(default)]
    project: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    account_sid: Option<String>,
    #[serde(default)]
    output_format: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl From<RawExternalCliOptions> for ExternalCliOptions {
    fn from(raw: RawExternalCliOptions) -> Self {
        // A profile wins over the legacy project field when both are set
        let identity = match (non_empty(raw.profile), non_empty(raw.project)) {
            (Some(profile), _) => IdentitySelection::Profile(profile),
            (None, Some(project)) => IdentitySelection::Project(project),
            (None, None) => IdentitySelection::Ambient,
        };
        Self {
            identity,
            username: raw.username.unwrap_or_default(),
            password: raw.password.unwrap_or_default(),
            account_sid: non_empty(raw.account_sid),
            output_format: non_empty(raw.output_format),
        }
    }
}

impl<'de> Deserialize<'de> for ExternalCliOptions {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        RawExternalCliOptions::deserialize(deserializer).map(Into::into)
    }
}
