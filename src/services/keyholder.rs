//! Keyholder service.

use serde_json::Value;
use tracing::instrument;

use super::{json_body, typed_body};
use crate::errors::ChasterResult;
use crate::request::{validate_status, RequestCore};
use crate::response::ResponseEnvelope;
use crate::types::SearchLocks;

/// Base route of the keyholder API.
pub const KEYHOLDER_ROUTE: &str = "keyholder";

/// Keyholder service: locks the caller holds the keys of.
#[derive(Debug, Clone)]
pub struct KeyholderService {
    core: RequestCore,
}

impl KeyholderService {
    /// Creates a new keyholder service.
    pub fn new(core: RequestCore) -> Self {
        Self { core }
    }

    /// Searches keyholder locks with a raw body. Expects `201`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty body, `Transport`, `UnexpectedStatus`.
    #[instrument(skip(self, body))]
    pub async fn search(&self, body: &Value) -> ChasterResult<ResponseEnvelope> {
        let options = json_body(body)?;
        validate_status(self.core.post("locks/search", options).await?, 201)
    }

    /// Searches keyholder locks. Expects `201`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the limit is zero, `Transport`,
    /// `UnexpectedStatus`.
    #[instrument(skip(self))]
    pub async fn search_locks(&self, search: &SearchLocks) -> ChasterResult<ResponseEnvelope> {
        search.validate()?;
        let options = typed_body(search)?;
        validate_status(self.core.post("locks/search", options).await?, 201)
    }
}
