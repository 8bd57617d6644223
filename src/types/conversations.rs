//! Conversation types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::common::format_millis;
use crate::options::RequestOptions;

/// Default page size when listing conversations.
pub const DEFAULT_CONVERSATIONS_LIMIT: u32 = 50;

/// Conversation status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    /// Awaiting approval.
    Pending,
    /// Approved.
    #[default]
    Approved,
    /// Ignored.
    Ignored,
}

impl ConversationStatus {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Ignored => "ignored",
        }
    }
}

impl fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query for listing conversations.
///
/// ```
/// use chaster_client::types::{ConversationStatus, ConversationsQuery};
///
/// let query = ConversationsQuery::new().limit(10).status(ConversationStatus::Pending);
/// assert_eq!(query.get_limit(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationsQuery {
    limit: u32,
    status: ConversationStatus,
    offset: Option<String>,
}

impl Default for ConversationsQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_CONVERSATIONS_LIMIT,
            status: ConversationStatus::default(),
            offset: None,
        }
    }
}

impl ConversationsQuery {
    /// Creates a query with the default limit and status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the status filter.
    pub fn status(mut self, status: ConversationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the offset from a timestamp, sent with millisecond precision.
    pub fn offset_at(mut self, offset: DateTime<Utc>) -> Self {
        self.offset = Some(format_millis(&offset));
        self
    }

    /// Sets a pre-formatted offset. An empty string clears it.
    pub fn offset(mut self, offset: impl Into<String>) -> Self {
        let offset = offset.into();
        self.offset = if offset.is_empty() { None } else { Some(offset) };
        self
    }

    /// Page size.
    pub fn get_limit(&self) -> u32 {
        self.limit
    }

    /// Status filter.
    pub fn get_status(&self) -> ConversationStatus {
        self.status
    }

    /// Offset, if any.
    pub fn get_offset(&self) -> Option<&str> {
        self.offset.as_deref()
    }

    pub(crate) fn to_options(&self) -> RequestOptions {
        let mut options = RequestOptions::new()
            .with_query("limit", self.limit)
            .with_query("status", self.status.as_str());
        if let Some(offset) = &self.offset {
            options.set_query_value("offset", offset.as_str());
        }
        options
    }
}
