//! Users service.

use tracing::instrument;

use crate::errors::ChasterResult;
use crate::options::RequestOptions;
use crate::request::{path_segment, validate_status, RequestCore};
use crate::response::ResponseEnvelope;

/// Base route of the users API.
pub const USERS_ROUTE: &str = "users";

/// Users service.
#[derive(Debug, Clone)]
pub struct UsersService {
    core: RequestCore,
}

impl UsersService {
    /// Creates a new users service.
    pub fn new(core: RequestCore) -> Self {
        Self { core }
    }

    /// Fetches a public profile. Expects `200`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty id or one that is `.` or `..`, `Transport`, `UnexpectedStatus`.
    #[instrument(skip(self))]
    pub async fn profile_by_id(&self, user_id: &str) -> ChasterResult<ResponseEnvelope> {
        let user_id = path_segment(user_id, "User ID")?;
        let path = format!("profile/by-id/{}", user_id);
        validate_status(self.core.get(&path, RequestOptions::new()).await?, 200)
    }
}
