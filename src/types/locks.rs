//! Lock types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status filter for listing the caller's locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockListStatus {
    /// Running locks.
    #[default]
    Active,
    /// Archived locks.
    Archived,
    /// Both.
    All,
}

impl LockListStatus {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::All => "all",
        }
    }
}

impl fmt::Display for LockListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a lock, as used by keyholder searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockState {
    /// Currently locked.
    #[default]
    Locked,
    /// Unlocked.
    Unlocked,
    /// Abandoned by the wearer.
    Deserted,
    /// Archived.
    Archived,
}

impl LockState {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
            Self::Deserted => "deserted",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a lock history request. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockHistory {
    #[serde(skip_serializing_if = "Option::is_none")]
    extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_id: Option<String>,
}

impl LockHistory {
    /// Creates an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the history to one extension.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Sets the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Continues after the given history entry.
    pub fn last_id(mut self, last_id: impl Into<String>) -> Self {
        self.last_id = Some(last_id.into());
        self
    }

    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.extension.is_none() && self.limit.is_none() && self.last_id.is_none()
    }
}
