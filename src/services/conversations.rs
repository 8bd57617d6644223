//! Conversations service.

use serde_json::Value;
use tracing::instrument;

use super::json_body;
use crate::errors::ChasterResult;
use crate::options::RequestOptions;
use crate::request::{path_segment, validate_status, RequestCore};
use crate::response::ResponseEnvelope;
use crate::types::ConversationsQuery;

/// Base route of the conversations API.
pub const CONVERSATIONS_ROUTE: &str = "conversations";

/// Conversations service: listing, creating and messaging conversations.
///
/// Every method may fail with [`ChasterError::InvalidArgument`] before any
/// request is sent, [`ChasterError::Transport`] when the exchange fails and
/// [`ChasterError::UnexpectedStatus`] when the API answers with another
/// status than documented.
///
/// [`ChasterError::InvalidArgument`]: crate::ChasterError::InvalidArgument
/// [`ChasterError::Transport`]: crate::ChasterError::Transport
/// [`ChasterError::UnexpectedStatus`]: crate::ChasterError::UnexpectedStatus
#[derive(Debug, Clone)]
pub struct ConversationsService {
    core: RequestCore,
}

impl ConversationsService {
    /// Creates a new conversations service.
    pub fn new(core: RequestCore) -> Self {
        Self { core }
    }

    /// Lists the caller's conversations. Expects `200`.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ConversationsQuery) -> ChasterResult<ResponseEnvelope> {
        validate_status(self.core.get("", query.to_options()).await?, 200)
    }

    /// Starts a conversation. Expects `201`.
    #[instrument(skip(self, body))]
    pub async fn create(&self, body: &Value) -> ChasterResult<ResponseEnvelope> {
        let options = json_body(body)?;
        validate_status(self.core.post("", options).await?, 201)
    }

    /// Finds the conversation with a user. Expects `200`.
    #[instrument(skip(self))]
    pub async fn by_user(&self, user_id: &str) -> ChasterResult<ResponseEnvelope> {
        let user_id = path_segment(user_id, "User ID")?;
        let path = format!("by-user/{}", user_id);
        validate_status(self.core.get(&path, RequestOptions::new()).await?, 200)
    }

    /// Sends a message. Expects `201`.
    #[instrument(skip(self, body))]
    pub async fn send(&self, conversation_id: &str, body: &Value) -> ChasterResult<ResponseEnvelope> {
        let conversation_id = path_segment(conversation_id, "Conversation ID")?;
        let options = json_body(body)?;
        validate_status(self.core.post(&conversation_id, options).await?, 201)
    }

    /// Fetches one conversation. Expects `200`.
    #[instrument(skip(self))]
    pub async fn find(&self, conversation_id: &str) -> ChasterResult<ResponseEnvelope> {
        let conversation_id = path_segment(conversation_id, "Conversation ID")?;
        validate_status(self.core.get(&conversation_id, RequestOptions::new()).await?, 200)
    }

    /// Changes the status of a conversation. Expects `200`.
    #[instrument(skip(self, body))]
    pub async fn set_status(&self, conversation_id: &str, body: &Value) -> ChasterResult<ResponseEnvelope> {
        let conversation_id = path_segment(conversation_id, "Conversation ID")?;
        let options = json_body(body)?;
        let path = format!("{}/status", conversation_id);
        validate_status(self.core.put(&path, options).await?, 200)
    }

    /// Marks a conversation read or unread. Expects `200`.
    #[instrument(skip(self, body))]
    pub async fn set_unread(&self, conversation_id: &str, body: &Value) -> ChasterResult<ResponseEnvelope> {
        let conversation_id = path_segment(conversation_id, "Conversation ID")?;
        let options = json_body(body)?;
        let path = format!("{}/unread", conversation_id);
        validate_status(self.core.put(&path, options).await?, 200)
    }

    /// Lists messages of a conversation, newest first. Expects `200`.
    #[instrument(skip(self))]
    pub async fn messages(
        &self,
        conversation_id: &str,
        limit: u32,
        last_id: Option<&str>,
    ) -> ChasterResult<ResponseEnvelope> {
        let conversation_id = path_segment(conversation_id, "Conversation ID")?;

        let mut options = RequestOptions::new().with_query("limit", limit);
        if let Some(last_id) = last_id {
            options.set_query_value("lastId", last_id);
        }

        let path = format!("{}/messages", conversation_id);
        validate_status(self.core.get(&path, options).await?, 200)
    }
}
