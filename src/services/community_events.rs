//! Community events service.

use serde_json::Value;
use tracing::instrument;

use super::json_body;
use crate::errors::ChasterResult;
use crate::options::RequestOptions;
use crate::request::{validate_status, RequestCore};
use crate::response::ResponseEnvelope;

/// Base route of the community events API.
pub const COMMUNITY_EVENTS_ROUTE: &str = "community-event";

/// Community events service.
#[derive(Debug, Clone)]
pub struct CommunityEventsService {
    core: RequestCore,
}

impl CommunityEventsService {
    /// Creates a new community events service.
    pub fn new(core: RequestCore) -> Self {
        Self { core }
    }

    /// Lists event categories. Expects `200`.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> ChasterResult<ResponseEnvelope> {
        validate_status(self.core.get("categories", RequestOptions::new()).await?, 200)
    }

    /// Fetches event details for a period. Expects `200`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty body, `Transport`, `UnexpectedStatus`.
    #[instrument(skip(self, body))]
    pub async fn details(&self, body: &Value) -> ChasterResult<ResponseEnvelope> {
        let options = json_body(body)?;
        validate_status(self.core.post("details", options).await?, 200)
    }
}
