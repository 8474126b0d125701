use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access tier required to view a lesson.
///
/// Tiers are totally ordered: `Free < Premium < Master`. A viewer may access
/// any lesson whose required tier is at or below their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Free,
    Premium,
    Master,
}

impl Role {
    /// Stable string form used for persistence.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Free => "free",
            Role::Premium => "premium",
            Role::Master => "master",
        }
    }

    /// Returns true when a viewer holding this tier may access content that
    /// requires the given tier.
    #[must_use]
    pub fn allows(&self, required: Role) -> bool {
        *self >= required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a role from its persisted string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    raw: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.raw)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Role::Free),
            "premium" => Ok(Role::Premium),
            "master" => Ok(Role::Master),
            _ => Err(ParseRoleError { raw: s.to_string() }),
        }
    }
}
