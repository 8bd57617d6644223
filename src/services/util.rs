//! API availability check.

use tracing::instrument;

use crate::errors::ChasterResult;
use crate::options::RequestOptions;
use crate::request::{validate_status, RequestCore};

/// Utility endpoints bound to the API root.
#[derive(Debug, Clone)]
pub struct UtilService {
    core: RequestCore,
}

impl UtilService {
    /// Creates a new utility service.
    pub fn new(core: RequestCore) -> Self {
        Self { core }
    }

    /// Requests the API root and expects `200`.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> ChasterResult<()> {
        validate_status(self.core.get("", RequestOptions::new()).await?, 200)?;
        Ok(())
    }
}
