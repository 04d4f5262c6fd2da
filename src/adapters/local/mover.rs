//! Filesystem file placement

use crate::adapters::host::FileMover;
use crate::domain::{AssetportError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Moves rendered files with `tokio::fs`
///
/// Destination folders are created as needed and existing files are
/// overwritten. Moves across filesystems fall back to copy and delete.
#[derive(Debug, Default, Clone)]
pub struct FsFileMover;

impl FsFileMover {
    pub fn new() -> Self {
        Self
    }

    async fn place(&self, temp: &Path, dest: &Path) -> Result<PathBuf> {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AssetportError::Placement(format!(
                    "cannot create folder {}: {e}",
                    parent.display()
                ))
            })?;
        }

        if tokio::fs::rename(temp, dest).await.is_err() {
            tokio::fs::copy(temp, dest).await.map_err(|e| {
                AssetportError::Placement(format!(
                    "cannot move {} to {}: {e}",
                    temp.display(),
                    dest.display()
                ))
            })?;
            if let Err(e) = tokio::fs::remove_file(temp).await {
                tracing::debug!(path = %temp.display(), error = %e, "Temp file left behind");
            }
        }

        let path = if dest.is_absolute() {
            dest.to_path_buf()
        } else {
            std::env::current_dir()?.join(dest)
        };
        tracing::debug!(path = %path.display(), "Placed exported file");
        Ok(path)
    }
}

#[async_trait]
impl FileMover for FsFileMover {
    async fn move_file_into(
        &self,
        temp: &Path,
        base_dir: &Path,
        file_name: &str,
    ) -> Result<PathBuf> {
        self.place(temp, &base_dir.join(file_name)).await
    }

    async fn move_file_absolute(&self, temp: &Path, dest: &Path) -> Result<PathBuf> {
        self.place(temp, dest).await
    }
}
