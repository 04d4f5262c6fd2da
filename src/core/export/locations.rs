//! Per-document output locations
//!
//! Every document gets one [`LocationHandle`] that knows where its assets go by
//! default. Handles are created on first use and kept current through the
//! document's change notifications, so "export next to the source file" stays
//! correct across save-as while the document is open.

use crate::adapters::host::{Document, DocumentChange, FileMover, Subscription};
use crate::config::ExportConfig;
use crate::domain::ids::DocumentId;
use crate::domain::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, Weak};

/// Derives a document's default asset folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationPolicy {
    asset_dir_suffix: String,
    unsaved_base_dir: PathBuf,
}

impl LocationPolicy {
    pub fn new(asset_dir_suffix: impl Into<String>, unsaved_base_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir_suffix: asset_dir_suffix.into(),
            unsaved_base_dir: unsaved_base_dir.into(),
        }
    }

    /// Builds the policy from export settings
    ///
    /// Unsaved documents go to `unsaved_base_dir`, else the desktop, else the
    /// system temp dir.
    pub fn from_config(config: &ExportConfig) -> Self {
        let unsaved_base_dir = config
            .unsaved_base_dir
            .as_ref()
            .map(PathBuf::from)
            .or_else(dirs::desktop_dir)
            .unwrap_or_else(std::env::temp_dir);
        Self::new(config.asset_dir_suffix.clone(), unsaved_base_dir)
    }

    /// `/dir/name.ext` maps to `/dir/name<suffix>`; unsaved documents map to
    /// `<unsaved_base_dir>/<name><suffix>`
    pub fn base_dir_for(&self, document_name: &str, file_path: Option<&Path>) -> PathBuf {
        match file_path {
            Some(path) => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| stem_of(document_name));
                let parent = path.parent().unwrap_or_else(|| Path::new("."));
                parent.join(format!("{stem}{}", self.asset_dir_suffix))
            }
            None => self
                .unsaved_base_dir
                .join(format!("{}{}", stem_of(document_name), self.asset_dir_suffix)),
        }
    }
}

fn stem_of(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Untitled".to_string())
}

/// File placement for one document
///
/// Cloning is cheap; clones share the same base directory.
#[derive(Clone)]
pub struct LocationHandle {
    document_id: DocumentId,
    base_dir: Arc<RwLock<PathBuf>>,
    retired: Arc<AtomicBool>,
    mover: Arc<dyn FileMover>,
}

impl LocationHandle {
    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    /// Current default output folder
    pub fn base_dir(&self) -> PathBuf {
        self.base_dir
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Whether the document was closed after this handle was created
    pub fn is_retired(&self) -> bool {
        self.retired.load(Ordering::SeqCst)
    }

    /// Moves a rendered file into the base directory under `file_name`
    pub async fn move_into(&self, temp: &Path, file_name: &str) -> Result<PathBuf> {
        let base_dir = self.base_dir();
        tracing::debug!(
            document_id = %self.document_id,
            base_dir = %base_dir.display(),
            file_name,
            "Placing export in document folder"
        );
        self.mover.move_file_into(temp, &base_dir, file_name).await
    }

    /// Moves a rendered file to an explicit destination, ignoring the base directory
    pub async fn move_to_absolute(&self, temp: &Path, dest: &Path) -> Result<PathBuf> {
        tracing::debug!(
            document_id = %self.document_id,
            dest = %dest.display(),
            "Placing export at explicit destination"
        );
        self.mover.move_file_absolute(temp, dest).await
    }
}

impl std::fmt::Debug for LocationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationHandle")
            .field("document_id", &self.document_id)
            .field("base_dir", &self.base_dir())
            .field("retired", &self.is_retired())
            .finish()
    }
}

type Entries = Mutex<HashMap<DocumentId, CacheEntry>>;

struct CacheEntry {
    handle: LocationHandle,
    /// The object the subscription was registered on
    document: Weak<dyn Document>,
    subscription: Subscription,
}

impl CacheEntry {
    fn is_for(&self, document: &Arc<dyn Document>) -> bool {
        std::ptr::addr_eq(self.document.as_ptr(), Arc::as_ptr(document))
    }

    /// Retires the handle and unsubscribes from the original document
    fn revoke(self) {
        self.handle.retired.store(true, Ordering::SeqCst);
        if let Some(document) = self.document.upgrade() {
            document.remove_listener(self.subscription);
        }
    }
}

/// Owner of every document's [`LocationHandle`]
///
/// One entry per open document. The first lookup subscribes to the document's
/// change notifications. The entry, and with it the subscription, goes away
/// when the document reports [`DocumentChange::Closed`] or on
/// [`LocationCache::release`]. A lookup with a different document object
/// under a known id replaces the old entry.
pub struct LocationCache {
    policy: LocationPolicy,
    mover: Arc<dyn FileMover>,
    entries: Arc<Entries>,
}

impl LocationCache {
    pub fn new(policy: LocationPolicy, mover: Arc<dyn FileMover>) -> Self {
        Self {
            policy,
            mover,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn policy(&self) -> &LocationPolicy {
        &self.policy
    }

    /// Returns the document's handle, creating and subscribing it on first use
    pub fn location_for(&self, document: &Arc<dyn Document>) -> LocationHandle {
        let id = document.id();
        let (handle, stale) = {
            let mut entries = lock_entries(&self.entries);

            if let Some(entry) = entries.get(&id) {
                if entry.is_for(document) && !entry.handle.is_retired() {
                    return entry.handle.clone();
                }
            }

            let stale = entries.remove(&id);
            let entry = self.create_entry(document);
            let handle = entry.handle.clone();
            entries.insert(id, entry);
            (handle, stale)
        };

        if let Some(stale) = stale {
            tracing::debug!(document_id = %id, "Replacing location of a reopened document");
            stale.revoke();
        }
        handle
    }

    /// Drops a document's entry and revokes its change subscription
    ///
    /// Returns `false` if the document had no entry.
    pub fn release(&self, document: &Arc<dyn Document>) -> bool {
        let removed = lock_entries(&self.entries).remove(&document.id());
        match removed {
            Some(entry) => {
                entry.revoke();
                tracing::debug!(document_id = %document.id(), "Released document location");
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        lock_entries(&self.entries).contains_key(&id)
    }

    pub fn len(&self) -> usize {
        lock_entries(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn create_entry(&self, document: &Arc<dyn Document>) -> CacheEntry {
        let id = document.id();
        let name = document.name();
        let base_dir = self.policy.base_dir_for(&name, document.file_path().as_deref());

        tracing::debug!(
            document_id = %id,
            base_dir = %base_dir.display(),
            "Created document location"
        );

        let handle = LocationHandle {
            document_id: id,
            base_dir: Arc::new(RwLock::new(base_dir)),
            retired: Arc::new(AtomicBool::new(false)),
            mover: self.mover.clone(),
        };

        let policy = self.policy.clone();
        let base_dir = handle.base_dir.clone();
        let retired = handle.retired.clone();
        let entries = Arc::downgrade(&self.entries);
        let subscription = document.on_change(Arc::new(move |change| match change {
            DocumentChange::File { path } => {
                let updated = policy.base_dir_for(&name, path.as_deref());
                tracing::debug!(
                    document_id = %id,
                    base_dir = %updated.display(),
                    "Document file changed, updating location"
                );
                *base_dir.write().unwrap_or_else(|e| e.into_inner()) = updated;
            }
            DocumentChange::Closed => {
                retired.store(true, Ordering::SeqCst);
                if let Some(entries) = entries.upgrade() {
                    remove_closed(&entries, id, &retired);
                }
            }
            DocumentChange::Layers => {}
        }));

        CacheEntry {
            handle,
            document: Arc::downgrade(document),
            subscription,
        }
    }
}

/// Removes `id`'s entry if it still belongs to the handle behind `retired`
fn remove_closed(entries: &Entries, id: DocumentId, retired: &Arc<AtomicBool>) {
    let removed = {
        let mut entries = lock_entries(entries);
        match entries.get(&id) {
            Some(entry) if Arc::ptr_eq(&entry.handle.retired, retired) => entries.remove(&id),
            _ => None,
        }
    };
    if let Some(entry) = removed {
        tracing::debug!(document_id = %id, "Document closed, dropping location");
        entry.revoke();
    }
}

fn lock_entries(entries: &Entries) -> MutexGuard<'_, HashMap<DocumentId, CacheEntry>> {
    entries.lock().unwrap_or_else(|e| e.into_inner())
}
