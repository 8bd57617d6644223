//! Resource wrappers for the Chaster API.
//!
//! Each wrapper holds a [`RequestCore`](crate::request::RequestCore) bound to
//! its base route. Methods validate their arguments before any I/O, send one
//! request and check the status code against the one the endpoint documents.

mod community_events;
mod conversations;
mod files;
mod keyholder;
mod locks;
mod shared_locks;
mod users;
mod util;

pub use community_events::{CommunityEventsService, COMMUNITY_EVENTS_ROUTE};
pub use conversations::{ConversationsService, CONVERSATIONS_ROUTE};
pub use files::{FilesService, FILES_ROUTE};
pub use keyholder::{KeyholderService, KEYHOLDER_ROUTE};
pub use locks::{LocksService, LOCKS_ROUTE};
pub use shared_locks::{SharedLocksService, DEFAULT_FAVORITES_LIMIT, MAX_FAVORITES_LIMIT};
pub use users::{UsersService, USERS_ROUTE};
pub use util::UtilService;

use serde::Serialize;
use serde_json::Value;

use crate::errors::ChasterResult;
use crate::options::RequestOptions;
use crate::request::require_non_empty;

/// Options carrying a caller-supplied JSON object as body.
///
/// An empty or non-object body is rejected.
pub(crate) fn json_body(body: &Value) -> ChasterResult<RequestOptions> {
    require_non_empty(body, "Body")?;
    typed_body(body)
}

/// Options carrying a typed body serialized to a JSON object.
pub(crate) fn typed_body<T: Serialize + ?Sized>(body: &T) -> ChasterResult<RequestOptions> {
    let mut options = RequestOptions::new();
    options.set_json_body(body)?;
    Ok(options)
}
