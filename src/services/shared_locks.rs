//! Shared locks service.

use serde_json::{json, Value};
use tracing::instrument;

use super::{json_body, typed_body};
use crate::errors::{ChasterError, ChasterResult};
use crate::options::RequestOptions;
use crate::request::{path_segment, validate_status, RequestCore};
use crate::response::ResponseEnvelope;
use crate::types::{CreateSharedLock, SharedLockStatus};

/// Default page size for favorite shared locks.
pub const DEFAULT_FAVORITES_LIMIT: u32 = 15;

/// Largest page size accepted for favorite shared locks.
pub const MAX_FAVORITES_LIMIT: u32 = 100;

/// Shared locks service.
///
/// Its endpoints live under two roots (`locks/shared-locks` and
/// `shared-locks`), so the service is bound to the API root.
///
/// Errors: `InvalidArgument` for missing or out-of-range arguments (no request
/// sent), `Transport`, `UnexpectedStatus`.
#[derive(Debug, Clone)]
pub struct SharedLocksService {
    core: RequestCore,
}

impl SharedLocksService {
    /// Creates a new shared locks service.
    pub fn new(core: RequestCore) -> Self {
        Self { core }
    }

    /// Lists the caller's shared locks. Expects `200`.
    #[instrument(skip(self))]
    pub async fn list(&self, status: SharedLockStatus) -> ChasterResult<ResponseEnvelope> {
        let options = RequestOptions::new().with_query("status", status.as_str());
        validate_status(self.core.get("locks/shared-locks", options).await?, 200)
    }

    /// Creates a shared lock. Expects `201`.
    #[instrument(skip(self, body))]
    pub async fn create(&self, body: &CreateSharedLock) -> ChasterResult<ResponseEnvelope> {
        let options = shared_lock_body(body)?;
        validate_status(self.core.post("locks/shared-locks", options).await?, 201)
    }

    /// Fetches a shared lock. Expects `200`.
    #[instrument(skip(self))]
    pub async fn find(&self, shared_lock_id: &str) -> ChasterResult<ResponseEnvelope> {
        let shared_lock_id = path_segment(shared_lock_id, "Shared lock ID")?;
        let path = format!("locks/shared-locks/{}", shared_lock_id);
        validate_status(self.core.get(&path, RequestOptions::new()).await?, 200)
    }

    /// Updates a shared lock. Expects `200`.
    #[instrument(skip(self, body))]
    pub async fn update(&self, shared_lock_id: &str, body: &CreateSharedLock) -> ChasterResult<ResponseEnvelope> {
        let shared_lock_id = path_segment(shared_lock_id, "Shared lock ID")?;
        let options = shared_lock_body(body)?;
        let path = format!("locks/shared-locks/{}", shared_lock_id);
        validate_status(self.core.put(&path, options).await?, 200)
    }

    /// Archives a shared lock. Expects `201`.
    #[instrument(skip(self))]
    pub async fn archive(&self, shared_lock_id: &str) -> ChasterResult<ResponseEnvelope> {
        let shared_lock_id = path_segment(shared_lock_id, "Shared lock ID")?;
        let path = format!("locks/shared-locks/{}/archive", shared_lock_id);
        validate_status(self.core.post(&path, RequestOptions::new()).await?, 201)
    }

    /// Sets the extensions of a shared lock. Expects `201`.
    #[instrument(skip(self, body))]
    pub async fn extensions(&self, shared_lock_id: &str, body: &Value) -> ChasterResult<ResponseEnvelope> {
        let shared_lock_id = path_segment(shared_lock_id, "Shared lock ID")?;
        let options = json_body(body)?;
        let path = format!("locks/shared-locks/{}/extensions", shared_lock_id);
        validate_status(self.core.post(&path, options).await?, 201)
    }

    /// Checks whether a shared lock is a favorite. Expects `200`.
    #[instrument(skip(self))]
    pub async fn is_favorite(&self, shared_lock_id: &str) -> ChasterResult<ResponseEnvelope> {
        let shared_lock_id = path_segment(shared_lock_id, "Shared lock ID")?;
        validate_status(
            self.core.get(&favorite_path(&shared_lock_id), RequestOptions::new()).await?,
            200,
        )
    }

    /// Marks a shared lock as favorite. Expects `200`.
    #[instrument(skip(self))]
    pub async fn add_favorite(&self, shared_lock_id: &str) -> ChasterResult<ResponseEnvelope> {
        let shared_lock_id = path_segment(shared_lock_id, "Shared lock ID")?;
        validate_status(
            self.core.put(&favorite_path(&shared_lock_id), RequestOptions::new()).await?,
            200,
        )
    }

    /// Removes a shared lock from favorites. Expects `200`.
    #[instrument(skip(self))]
    pub async fn remove_favorite(&self, shared_lock_id: &str) -> ChasterResult<ResponseEnvelope> {
        let shared_lock_id = path_segment(shared_lock_id, "Shared lock ID")?;
        validate_status(
            self.core.delete(&favorite_path(&shared_lock_id), RequestOptions::new()).await?,
            200,
        )
    }

    /// Lists favorite shared locks. `limit` must be within `1..=100`.
    /// Expects `201`.
    #[instrument(skip(self))]
    pub async fn favorites(&self, limit: u32, last_id: Option<&str>) -> ChasterResult<ResponseEnvelope> {
        if !(1..=MAX_FAVORITES_LIMIT).contains(&limit) {
            return Err(ChasterError::invalid_argument(
                "Limit of favorites",
                format!(
                    "Limit of favorites must be between 1 and {}, got {}",
                    MAX_FAVORITES_LIMIT, limit
                ),
            ));
        }

        let options = typed_body(&json!({
            "limit": limit,
            "lastId": last_id,
        }))?;
        validate_status(self.core.post("favorites/shared-locks", options).await?, 201)
    }
}

fn shared_lock_body(body: &CreateSharedLock) -> ChasterResult<RequestOptions> {
    if body.is_empty() {
        return Err(ChasterError::mandatory("Body"));
    }
    typed_body(body)
}

fn favorite_path(shared_lock_id: &str) -> String {
    format!("shared-locks/{}/favorite", shared_lock_id)
}
