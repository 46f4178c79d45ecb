//! Local filesystem image store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

use tirehub_core::error::{AppError, ErrorKind};
use tirehub_core::result::AppResult;
use tirehub_core::traits::storage::{Attachment, ImageResource, ImageStore};

use crate::path::{extension_of, generated_name, is_allowed_extension, normalize};

/// Bytes read from the head of a file to detect its image format.
const SNIFF_LEN: usize = 32;

/// Fallback content type when the format cannot be recognized.
const OCTET_STREAM: &str = "application/octet-stream";

/// Image store rooted at a directory on the local filesystem.
///
/// Layout: `root/<request id>/<uuid>.<ext>`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    /// Create the root directory if missing and open a store on it.
    ///
    /// A blank `upload_dir` is a configuration error.
    pub async fn new(upload_dir: &str) -> AppResult<Self> {
        if upload_dir.trim().is_empty() {
            return Err(AppError::configuration(
                "File upload directory path cannot be empty. Please set 'storage.upload_dir'.",
            ));
        }

        fs::create_dir_all(upload_dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Could not initialize storage location: {upload_dir}"),
                e,
            )
        })?;
        let root = fs::canonicalize(upload_dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Could not resolve storage location: {upload_dir}"),
                e,
            )
        })?;

        info!(root = %root.display(), "Image store initialized");
        Ok(Self { root })
    }

    /// The canonical upload root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve and guard the per-request directory.
    fn request_dir(&self, request_id: &str) -> AppResult<PathBuf> {
        let dir = normalize(&self.root.join(request_id));
        if !dir.starts_with(&self.root) || dir == self.root {
            warn!(request_id, "Rejected request directory outside upload root");
            return Err(AppError::validation(
                "Cannot store file outside of configured root upload directory.",
            ));
        }
        Ok(dir)
    }

    /// Resolve and guard a stored file's path inside its request directory.
    fn guarded_file(&self, file_name: &str, request_id: &str) -> AppResult<PathBuf> {
        if request_id.trim().is_empty() {
            return Err(AppError::validation(
                "TireRequest ID cannot be null or empty when loading a file.",
            ));
        }
        if file_name.trim().is_empty() {
            return Err(AppError::validation("Filename cannot be null or empty"));
        }
        let dir = self.request_dir(request_id)?;
        let file = normalize(&dir.join(file_name));
        if file.parent() != Some(dir.as_path()) {
            warn!(request_id, file_name, "Rejected file path outside request directory");
            return Err(AppError::validation(
                "Cannot access file outside current tire request directory structure.",
            ));
        }
        Ok(file)
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, attachment: &Attachment, request_id: &str) -> AppResult<String> {
        if attachment.is_empty() {
            return Err(AppError::validation("Failed to store empty file."));
        }
        if request_id.trim().is_empty() {
            return Err(AppError::validation(
                "TireRequest ID cannot be null or empty when storing a file.",
            ));
        }

        let original = attachment.file_name.as_deref().unwrap_or_default();
        let extension = extension_of(original);
        if !is_allowed_extension(extension) {
            return Err(AppError::validation(format!(
                "Invalid file type. Only PNG, JPG, JPEG, GIF images are allowed. Filename: {original}"
            )));
        }

        let dir = self.request_dir(request_id)?;
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!(
                    "Could not create directory for tire request: {}",
                    dir.display()
                ),
                e,
            )
        })?;

        let stored_name = generated_name(extension);
        let destination = dir.join(&stored_name);
        fs::write(&destination, &attachment.data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to store file {original}"),
                e,
            )
        })?;

        debug!(
            request_id,
            stored_name = %stored_name,
            bytes = attachment.data.len(),
            "Stored image"
        );
        Ok(stored_name)
    }

    fn load(&self, file_name: &str, request_id: &str) -> AppResult<PathBuf> {
        if request_id.trim().is_empty() {
            return Err(AppError::validation(
                "TireRequest ID cannot be null or empty when loading a file.",
            ));
        }
        Ok(self.root.join(request_id).join(file_name))
    }

    async fn load_as_resource(
        &self,
        file_name: &str,
        request_id: &str,
    ) -> AppResult<ImageResource> {
        let path = self.guarded_file(file_name, request_id)?;
        let unreadable = || {
            AppError::not_found(format!(
                "Could not read file: {file_name} for tire request {request_id}"
            ))
        };

        let mut file = fs::File::open(&path).await.map_err(|_| unreadable())?;
        let metadata = file.metadata().await.map_err(|_| unreadable())?;
        if !metadata.is_file() {
            return Err(unreadable());
        }

        let mut head = [0u8; SNIFF_LEN];
        let mut filled = 0;
        while filled < SNIFF_LEN {
            let n = file
                .read(&mut head[filled..])
                .await
                .map_err(|_| unreadable())?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        file.rewind().await.map_err(|_| unreadable())?;

        let content_type = image::guess_format(&head[..filled])
            .map(|format| format.to_mime_type())
            .unwrap_or(OCTET_STREAM)
            .to_string();

        Ok(ImageResource {
            file_name: file_name.to_string(),
            content_type,
            size_bytes: metadata.len(),
            stream: Box::pin(ReaderStream::new(file)),
        })
    }

    async fn delete(&self, file_name: &str, request_id: &str) -> AppResult<()> {
        let path = self.guarded_file(file_name, request_id)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(request_id, file_name, "Deleted image");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {file_name}"),
                e,
            )),
        }
    }

    async fn delete_all_for_request(&self, request_id: &str) -> AppResult<()> {
        if request_id.trim().is_empty() {
            return Ok(());
        }
        let dir = self.request_dir(request_id)?;
        match fs::metadata(&dir).await {
            Ok(meta) if meta.is_dir() => {}
            _ => return Ok(()),
        }

        fs::remove_dir_all(&dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Could not delete all files for tire request {request_id}"),
                e,
            )
        })?;
        debug!(request_id, "Deleted request image directory");
        Ok(())
    }
}
