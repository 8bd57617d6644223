//! Files service.

use tracing::instrument;

use crate::errors::ChasterResult;
use crate::options::{MultipartField, RequestOptions};
use crate::request::{path_segment, require_non_empty, validate_status, RequestCore};
use crate::response::ResponseEnvelope;
use crate::types::{StorageFileType, UploadFiles};

/// Base route of the files API.
pub const FILES_ROUTE: &str = "files";

/// Files service: upload and retrieval of attachments.
#[derive(Debug, Clone)]
pub struct FilesService {
    core: RequestCore,
}

impl FilesService {
    /// Creates a new files service.
    pub fn new(core: RequestCore) -> Self {
        Self { core }
    }

    /// Resolves a file key. Expects `201`, as the API answers this GET
    /// with `201 Created`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty key or one that is `.` or `..`, `Transport`, `UnexpectedStatus`.
    #[instrument(skip(self))]
    pub async fn find(&self, file_key: &str) -> ChasterResult<ResponseEnvelope> {
        let file_key = path_segment(file_key, "File key")?;
        validate_status(self.core.get(&file_key, RequestOptions::new()).await?, 201)
    }

    /// Uploads files as a multipart form. Expects `201`.
    ///
    /// The form carries a `type` text field followed by one `files` part per
    /// file, in insertion order.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when no file is queued, `Transport`,
    /// `UnexpectedStatus`.
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub async fn upload(&self, files: &UploadFiles, file_type: StorageFileType) -> ChasterResult<ResponseEnvelope> {
        require_non_empty(files.files(), "Files")?;

        let mut options = RequestOptions::new();
        options.add_multipart_field(MultipartField::text("type", file_type.as_str())?);
        for field in files.to_fields()? {
            options.add_multipart_field(field);
        }

        validate_status(self.core.post("upload", options).await?, 201)
    }
}
