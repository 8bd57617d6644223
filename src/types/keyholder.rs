//! Keyholder search types.

use serde::Serialize;

use super::locks::LockState;
use crate::errors::{ChasterError, ChasterResult};

/// Restricts a keyholder search to specific shared locks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedLocksCriteria {
    shared_lock_ids: Vec<String>,
    include_keyholder_locks: bool,
}

impl SharedLocksCriteria {
    /// Matches locks started from any of the given shared locks, plus locks
    /// where the caller is keyholder.
    pub fn new<I, S>(shared_lock_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            shared_lock_ids: shared_lock_ids.into_iter().map(Into::into).collect(),
            include_keyholder_locks: true,
        }
    }

    /// Whether locks held directly by the keyholder are included.
    pub fn include_keyholder_locks(mut self, include: bool) -> Self {
        self.include_keyholder_locks = include;
        self
    }
}

/// Search criteria. Serializes to `{}` when nothing is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    shared_locks: Option<SharedLocksCriteria>,
}

impl Criteria {
    /// Creates empty criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shared lock restriction.
    pub fn shared_locks(mut self, criteria: SharedLocksCriteria) -> Self {
        self.shared_locks = Some(criteria);
        self
    }
}

/// Body of a keyholder lock search.
///
/// Every field is always sent; an unset limit is sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchLocks {
    criteria: Criteria,
    status: LockState,
    search: String,
    page: u32,
    limit: Option<u32>,
}

impl Default for SearchLocks {
    fn default() -> Self {
        Self::new(LockState::default())
    }
}

impl SearchLocks {
    /// Searches locks in the given state, first page, no text filter.
    pub fn new(status: LockState) -> Self {
        Self {
            criteria: Criteria::default(),
            status,
            search: String::new(),
            page: 0,
            limit: None,
        }
    }

    /// Sets the criteria.
    pub fn criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Free-text filter.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Zero-based page index.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Page size. Must be at least 1.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Checks the paging arguments.
    pub fn validate(&self) -> ChasterResult<()> {
        if self.limit == Some(0) {
            return Err(ChasterError::invalid_argument(
                "Limit",
                "Limit must not be less than 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_search_body() {
        assert_eq!(
            serde_json::to_value(SearchLocks::new(LockState::Locked)).unwrap(),
            json!({
                "criteria": {},
                "status": "locked",
                "search": "",
                "page": 0,
                "limit": null
            })
        );
    }

    #[test]
    fn test_search_body_with_criteria() {
        let body = SearchLocks::new(LockState::Unlocked)
            .criteria(Criteria::new().shared_locks(
                SharedLocksCriteria::new(["sl-1", "sl-2"]).include_keyholder_locks(false),
            ))
            .search("alice")
            .page(2)
            .limit(25);

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "criteria": {
                    "sharedLocks": {
                        "sharedLockIds": ["sl-1", "sl-2"],
                        "includeKeyholderLocks": false
                    }
                },
                "status": "unlocked",
                "search": "alice",
                "page": 2,
                "limit": 25
            })
        );
    }

    #[test]
    fn test_validate_limit() {
        assert!(SearchLocks::default().validate().is_ok());
        assert!(SearchLocks::default().limit(1).validate().is_ok());

        let error = SearchLocks::default().limit(0).validate().unwrap_err();
        assert_eq!(error.to_string(), "Limit must not be less than 1");
    }
}
