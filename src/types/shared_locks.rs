//! Shared lock types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::common::serialize_micros_opt;

/// Status filter for listing shared locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharedLockStatus {
    /// Shared locks open to new wearers.
    #[default]
    Active,
    /// Archived shared locks.
    Archived,
}

impl SharedLockStatus {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for SharedLockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body for creating or updating a shared lock.
///
/// Only the fields that were set are serialized. Dates are sent in UTC with
/// microsecond precision; durations are in seconds.
///
/// ```
/// use chaster_client::types::CreateSharedLock;
///
/// let body = CreateSharedLock::new().name("Weekend").min_duration(3600).max_duration(7200);
/// assert!(!body.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSharedLock {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_remaining_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hide_time_logs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit_lock_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_micros_opt")]
    max_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_micros_opt")]
    max_limit_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_limit_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_locked_users: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_micros_opt")]
    min_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    require_contact: Option<bool>,
}

impl CreateSharedLock {
    /// Creates an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Shows the remaining time to the wearer.
    pub fn display_remaining_time(mut self, display: bool) -> Self {
        self.display_remaining_time = Some(display);
        self
    }

    /// Hides time changes from the wearer's log.
    pub fn hide_time_logs(mut self, hide: bool) -> Self {
        self.hide_time_logs = Some(hide);
        self
    }

    /// Lists the shared lock publicly.
    pub fn is_public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    /// Caps the total lock time.
    pub fn limit_lock_time(mut self, limit: bool) -> Self {
        self.limit_lock_time = Some(limit);
        self
    }

    /// Latest possible end date.
    pub fn max_date(mut self, date: DateTime<Utc>) -> Self {
        self.max_date = Some(date);
        self
    }

    /// Maximum duration, in seconds.
    pub fn max_duration(mut self, seconds: u64) -> Self {
        self.max_duration = Some(seconds);
        self
    }

    /// Hard limit date.
    pub fn max_limit_date(mut self, date: DateTime<Utc>) -> Self {
        self.max_limit_date = Some(date);
        self
    }

    /// Hard limit duration, in seconds.
    pub fn max_limit_duration(mut self, seconds: u64) -> Self {
        self.max_limit_duration = Some(seconds);
        self
    }

    /// Maximum number of simultaneous wearers.
    pub fn max_locked_users(mut self, users: u32) -> Self {
        self.max_locked_users = Some(users);
        self
    }

    /// Earliest possible end date.
    pub fn min_date(mut self, date: DateTime<Utc>) -> Self {
        self.min_date = Some(date);
        self
    }

    /// Minimum duration, in seconds.
    pub fn min_duration(mut self, seconds: u64) -> Self {
        self.min_duration = Some(seconds);
        self
    }

    /// Sets the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Protects the shared lock with a password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the cover photo.
    pub fn photo_id(mut self, photo_id: impl Into<String>) -> Self {
        self.photo_id = Some(photo_id.into());
        self
    }

    /// Requires wearers to contact the keyholder first.
    pub fn require_contact(mut self, require: bool) -> Self {
        self.require_contact = Some(require);
        self
    }

    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
