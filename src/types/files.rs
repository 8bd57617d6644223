//! File upload types.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::errors::{ChasterError, ChasterResult};
use crate::options::MultipartField;

/// Multipart field name carrying each uploaded file.
pub const FILES_FIELD: &str = "files";

/// Storage area a file is uploaded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum StorageFileType {
    /// Attachments sent in conversations.
    #[default]
    Messaging,
}

impl StorageFileType {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Messaging => "messaging",
        }
    }
}

impl fmt::Display for StorageFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file queued for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    filename: String,
    data: Bytes,
    content_type: Option<mime::Mime>,
}

impl UploadFile {
    /// File name sent to the API.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// File contents.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Explicit content type, if any.
    pub fn content_type(&self) -> Option<&mime::Mime> {
        self.content_type.as_ref()
    }

    fn to_field(&self) -> ChasterResult<MultipartField> {
        let field = MultipartField::file(FILES_FIELD, self.filename.clone(), self.data.clone())?;
        Ok(match &self.content_type {
            Some(content_type) => field.with_content_type(content_type.clone()),
            None => field,
        })
    }
}

/// Set of files for one upload, keyed by file name.
///
/// Adding a file under a name that is already present replaces it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadFiles {
    files: Vec<UploadFile>,
}

impl UploadFiles {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds in-memory file contents.
    pub fn add_file(&mut self, filename: impl Into<String>, data: impl Into<Bytes>) -> ChasterResult<&mut Self> {
        self.insert(filename.into(), data.into(), None)
    }

    /// Adds in-memory file contents with an explicit content type.
    pub fn add_file_with_type(
        &mut self,
        filename: impl Into<String>,
        data: impl Into<Bytes>,
        content_type: mime::Mime,
    ) -> ChasterResult<&mut Self> {
        self.insert(filename.into(), data.into(), Some(content_type))
    }

    /// Reads a file from disk and adds it under `filename`.
    ///
    /// Fails with [`ChasterError::InvalidArgument`] when the path does not
    /// exist or cannot be read.
    pub async fn add_file_from_path(
        &mut self,
        path: impl AsRef<Path>,
        filename: impl Into<String>,
    ) -> ChasterResult<&mut Self> {
        let path = path.as_ref();
        let filename = filename.into();
        if filename.is_empty() {
            return Err(ChasterError::mandatory("File name"));
        }

        let data = tokio::fs::read(path).await.map_err(|e| {
            let message = if e.kind() == std::io::ErrorKind::NotFound {
                format!("File does not exist: {}", path.display())
            } else {
                format!("File could not be read: {}: {}", path.display(), e)
            };
            ChasterError::invalid_argument("File", message)
        })?;

        self.insert(filename, Bytes::from(data), None)
    }

    /// Removes a file by name.
    pub fn remove_file(&mut self, filename: &str) -> Option<UploadFile> {
        let index = self.files.iter().position(|file| file.filename == filename)?;
        Some(self.files.remove(index))
    }

    /// Queued files, in insertion order.
    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    /// Number of queued files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true when no file is queued.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Multipart fields for the queued files, all named `files`.
    pub fn to_fields(&self) -> ChasterResult<Vec<MultipartField>> {
        self.files.iter().map(UploadFile::to_field).collect()
    }

    fn insert(
        &mut self,
        filename: String,
        data: Bytes,
        content_type: Option<mime::Mime>,
    ) -> ChasterResult<&mut Self> {
        if filename.is_empty() {
            return Err(ChasterError::mandatory("File name"));
        }

        let file = UploadFile {
            filename,
            data,
            content_type,
        };
        match self.files.iter_mut().find(|existing| existing.filename == file.filename) {
            Some(existing) => *existing = file,
            None => self.files.push(file),
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MultipartContents;

    #[test]
    fn test_storage_type_wire_value() {
        assert_eq!(StorageFileType::default().as_str(), "messaging");
        assert_eq!(serde_json::to_value(StorageFileType::Messaging).unwrap(), "messaging");
    }

    #[test]
    fn test_add_replace_and_remove() {
        let mut files = UploadFiles::new();
        files.add_file("a.png", vec![1u8, 2]).unwrap();
        files.add_file("b.png", vec![3u8]).unwrap();
        files.add_file("a.png", vec![9u8]).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files.files()[0].filename(), "a.png");
        assert_eq!(files.files()[0].data().as_ref(), &[9u8]);

        assert!(files.remove_file("a.png").is_some());
        assert!(files.remove_file("a.png").is_none());
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_empty_filename_rejected() {
        let mut files = UploadFiles::new();
        let error = files.add_file("", vec![1u8]).unwrap_err();
        assert!(error.is_invalid_argument());
        assert!(files.is_empty());
    }

    #[test]
    fn test_to_fields() {
        let mut files = UploadFiles::new();
        files.add_file("a.txt", "hello").unwrap();
        files
            .add_file_with_type("b.png", vec![0u8], mime::IMAGE_PNG)
            .unwrap();

        let fields = files.to_fields().unwrap();
        assert_eq!(fields.len(), 2);
        assert!(fields.iter().all(|field| field.name() == FILES_FIELD));
        assert_eq!(fields[0].filename(), Some("a.txt"));
        assert_eq!(fields[0].contents(), &MultipartContents::Bytes(Bytes::from("hello")));
        assert_eq!(fields[1].content_type(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_add_file_from_path() {
        let path = std::env::temp_dir().join(format!("chaster-upload-{}.txt", std::process::id()));
        tokio::fs::write(&path, b"from disk").await.unwrap();

        let mut files = UploadFiles::new();
        files.add_file_from_path(&path, "disk.txt").await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(files.files()[0].data().as_ref(), b"from disk");
    }

    #[tokio::test]
    async fn test_add_missing_file() {
        let mut files = UploadFiles::new();
        let error = files
            .add_file_from_path("/definitely/not/here.png", "here.png")
            .await
            .unwrap_err();

        assert!(error.is_invalid_argument());
        assert!(error.to_string().starts_with("File does not exist"));
    }
}
