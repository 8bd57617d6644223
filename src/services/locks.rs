//! Locks service.

use serde_json::Value;
use tracing::instrument;

use super::{json_body, typed_body};
use crate::errors::{ChasterError, ChasterResult};
use crate::options::RequestOptions;
use crate::request::{path_segment, validate_status, RequestCore};
use crate::response::ResponseEnvelope;
use crate::types::{LockHistory, LockListStatus};

/// Base route of the locks API.
pub const LOCKS_ROUTE: &str = "locks";

/// Locks service: the caller's own locks.
///
/// Errors: `InvalidArgument` for missing arguments (no request sent),
/// `Transport`, `UnexpectedStatus`.
#[derive(Debug, Clone)]
pub struct LocksService {
    core: RequestCore,
}

impl LocksService {
    /// Creates a new locks service.
    pub fn new(core: RequestCore) -> Self {
        Self { core }
    }

    /// Lists the caller's locks. Expects `200`.
    #[instrument(skip(self))]
    pub async fn list(&self, status: LockListStatus) -> ChasterResult<ResponseEnvelope> {
        let options = RequestOptions::new().with_query("status", status.as_str());
        validate_status(self.core.get("", options).await?, 200)
    }

    /// Adds or removes time. Expects `204`.
    #[instrument(skip(self, body))]
    pub async fn update_time(&self, lock_id: &str, body: &Value) -> ChasterResult<ResponseEnvelope> {
        let lock_id = path_segment(lock_id, "Lock ID")?;
        let options = json_body(body)?;
        let path = format!("{}/update-time", lock_id);
        validate_status(self.core.post(&path, options).await?, 204)
    }

    /// Freezes or unfreezes a lock. Expects `204`.
    #[instrument(skip(self, body))]
    pub async fn freeze(&self, lock_id: &str, body: &Value) -> ChasterResult<ResponseEnvelope> {
        let lock_id = path_segment(lock_id, "Lock ID")?;
        let options = json_body(body)?;
        let path = format!("{}/freeze", lock_id);
        validate_status(self.core.post(&path, options).await?, 204)
    }

    /// Fetches the history of a lock. Expects `201`.
    #[instrument(skip(self, body))]
    pub async fn history(&self, lock_id: &str, body: &LockHistory) -> ChasterResult<ResponseEnvelope> {
        let lock_id = path_segment(lock_id, "Lock ID")?;
        if body.is_empty() {
            return Err(ChasterError::mandatory("Body"));
        }
        let options = typed_body(body)?;
        let path = format!("{}/history", lock_id);
        validate_status(self.core.post(&path, options).await?, 201)
    }
}
