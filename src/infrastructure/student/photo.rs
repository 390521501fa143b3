//! Filesystem storage for student photos

use std::fmt::Debug;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::domain::student::StudentId;
use crate::domain::DomainError;

/// Storage for uploaded student photos
#[async_trait]
pub trait PhotoStore: Send + Sync + Debug {
    /// Persist the uploaded bytes and return the media path to record on the
    /// student
    async fn save(
        &self,
        student_id: &StudentId,
        content_type: &str,
        data: Bytes,
    ) -> Result<String, DomainError>;

    /// Remove a previously stored photo
    async fn remove(&self, path: &str) -> Result<(), DomainError>;
}

/// Map an upload content type to the stored file extension
fn extension_for(content_type: &str) -> Result<&'static str, DomainError> {
    match content_type {
        "image/jpeg" => Ok("jpg"),
        "image/png" => Ok("png"),
        "image/webp" => Ok("webp"),
        "image/gif" => Ok("gif"),
        other => Err(DomainError::validation(format!(
            "Unsupported photo content type '{}'",
            other
        ))),
    }
}

/// Photo store backed by a directory on disk
#[derive(Debug, Clone)]
pub struct FsPhotoStore {
    root: PathBuf,
}

impl FsPhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl PhotoStore for FsPhotoStore {
    async fn save(
        &self,
        student_id: &StudentId,
        content_type: &str,
        data: Bytes,
    ) -> Result<String, DomainError> {
        let extension = extension_for(content_type)?;
        let file_name = format!("{}.{}", student_id, extension);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create media dir: {}", e)))?;

        let path = self.root.join(&file_name);
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to store photo: {}", e)))?;

        debug!(student_id = %student_id, path = %path.display(), "Stored photo");

        Ok(file_name)
    }

    async fn remove(&self, path: &str) -> Result<(), DomainError> {
        // Media paths are single file names produced by save; reject anything
        // that could escape the media dir.
        if path.contains('/') || path.contains("..") {
            return Err(DomainError::validation(format!(
                "Invalid media path '{}'",
                path
            )));
        }

        match tokio::fs::remove_file(self.root.join(path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to remove photo: {}",
                e
            ))),
        }
    }
}
