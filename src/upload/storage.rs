//! # Upload Directory

use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use super::errors::{UploadError, UploadResult};
use super::record::UploadDescriptor;

/// Writes uploaded file contents into a directory under random names
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist one file and describe it
    pub async fn persist(
        &self,
        fieldname: &str,
        originalname: &str,
        mimetype: &str,
        data: &[u8],
    ) -> UploadResult<UploadDescriptor> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| UploadError::IoError(e.to_string()))?;

        let full_path = self.root.join(Uuid::new_v4().simple().to_string());
        fs::write(&full_path, data)
            .await
            .map_err(|e| UploadError::IoError(e.to_string()))?;

        let path = full_path
            .to_str()
            .ok_or_else(|| UploadError::InvalidPath(full_path.display().to_string()))?
            .to_string();

        tracing::debug!(
            event = "UPLOAD_STORED",
            fieldname,
            originalname,
            path = %path,
            size = data.len()
        );

        Ok(UploadDescriptor {
            fieldname: fieldname.to_string(),
            originalname: originalname.to_string(),
            encoding: "7bit".to_string(),
            mimetype: mimetype.to_string(),
            path,
            size: data.len() as u64,
        })
    }
}
