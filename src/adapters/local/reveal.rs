//! Folder reveal through the OS file browser

use crate::adapters::host::FolderRevealer;
use std::path::{Path, PathBuf};

/// Opens folders with the platform's default handler
#[derive(Debug, Default, Clone)]
pub struct OsFolderRevealer;

impl OsFolderRevealer {
    pub fn new() -> Self {
        Self
    }
}

impl FolderRevealer for OsFolderRevealer {
    fn reveal(&self, folder: &Path) {
        let folder = folder.to_path_buf();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || open_folder(folder));
            }
            Err(_) => {
                std::thread::spawn(move || open_folder(folder));
            }
        }
    }
}

fn open_folder(folder: PathBuf) {
    if let Err(e) = open::that(&folder) {
        tracing::warn!(folder = %folder.display(), error = %e, "Could not reveal export folder");
    }
}
