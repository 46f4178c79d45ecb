//! Image store trait for per-request file storage.

use std::fmt;
use std::path::PathBuf;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Client-supplied file name; only its extension is ever used.
    pub file_name: Option<String>,
    /// Client-declared content type (informational).
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

impl Attachment {
    /// Creates an attachment from a client file name and its bytes.
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            content_type: None,
            data: data.into(),
        }
    }

    /// Whether the attachment carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A stored image opened for reading.
pub struct ImageResource {
    /// The stored (generated) file name.
    pub file_name: String,
    /// Content type sniffed from the file's leading bytes.
    pub content_type: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// File contents.
    pub stream: ByteStream,
}

impl fmt::Debug for ImageResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageResource")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

/// Storage for images attached to tire requests.
///
/// Files are laid out one directory per request id under a configured root.
/// Stored names are generated, so client-supplied names never reach the
/// filesystem.
#[async_trait]
pub trait ImageStore: Send + Sync + fmt::Debug + 'static {
    /// Validate and persist an attachment, returning the generated file name.
    async fn store(&self, attachment: &Attachment, request_id: &str) -> AppResult<String>;

    /// Compute the on-disk path of a stored file without touching the filesystem.
    fn load(&self, file_name: &str, request_id: &str) -> AppResult<PathBuf>;

    /// Open a stored file for reading.
    async fn load_as_resource(&self, file_name: &str, request_id: &str)
    -> AppResult<ImageResource>;

    /// Delete a stored file. Deleting a missing file succeeds.
    async fn delete(&self, file_name: &str, request_id: &str) -> AppResult<()>;

    /// Remove the request's whole directory. A missing directory is a no-op.
    async fn delete_all_for_request(&self, request_id: &str) -> AppResult<()>;
}
