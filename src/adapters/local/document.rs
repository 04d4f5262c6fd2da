//! File-backed documents
//!
//! A local document is an image file on disk. Its layers are named rectangles
//! of that image, taken from the `[[host.documents]]` configuration.

use crate::adapters::host::{
    ChangeHandler, ChangeListeners, Document, DocumentChange, DocumentProvider, Subscription,
};
use crate::config::{DocumentConfig, HostConfig};
use crate::domain::ids::{DocumentId, LayerId};
use crate::domain::layer::{Layer, LayerBounds};
use crate::domain::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// An image file opened as a document
pub struct LocalDocument {
    id: DocumentId,
    name: String,
    path: RwLock<Option<PathBuf>>,
    layers: Vec<Layer>,
    listeners: ChangeListeners,
}

impl LocalDocument {
    pub fn new(
        id: impl Into<DocumentId>,
        name: impl Into<String>,
        path: Option<PathBuf>,
        layers: Vec<Layer>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: RwLock::new(path),
            layers,
            listeners: ChangeListeners::new(),
        }
    }

    /// Builds a document from its configuration entry
    ///
    /// The name defaults to the file name of `path`.
    pub fn from_config(config: &DocumentConfig) -> Self {
        let path = PathBuf::from(&config.path);
        let name = config.name.clone().unwrap_or_else(|| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("Document {}", config.id))
        });
        let layers = config
            .layers
            .iter()
            .map(|layer| {
                let [x, y, width, height] = layer.bounds;
                Layer::new(
                    LayerId::new(layer.id),
                    layer.name.clone(),
                    LayerBounds::new(x, y, width, height),
                )
            })
            .collect();

        Self::new(config.id, name, Some(path), layers)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Points the document at a new file and notifies listeners
    pub fn save_as(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        *self.path.write().unwrap_or_else(|e| e.into_inner()) = Some(path.clone());
        self.listeners
            .emit(&DocumentChange::File { path: Some(path) });
    }

    /// Notifies listeners that the document was closed
    pub fn close(&self) {
        self.listeners.emit(&DocumentChange::Closed);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Document for LocalDocument {
    fn id(&self) -> DocumentId {
        self.id
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn file_path(&self) -> Option<PathBuf> {
        self.path.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn find_layer(&self, id: LayerId) -> Option<Layer> {
        self.layers.iter().find(|layer| layer.id == id).cloned()
    }

    fn on_change(&self, handler: ChangeHandler) -> Subscription {
        self.listeners.subscribe(handler)
    }

    fn remove_listener(&self, subscription: Subscription) {
        self.listeners.unsubscribe(subscription)
    }
}

struct OpenDocuments {
    documents: Vec<Arc<LocalDocument>>,
    active: Option<DocumentId>,
}

/// Document provider over a set of local documents
///
/// The active document is the configured one, else the first open document.
pub struct LocalDocumentProvider {
    state: RwLock<OpenDocuments>,
}

impl LocalDocumentProvider {
    pub fn new(documents: Vec<Arc<LocalDocument>>, active: Option<DocumentId>) -> Self {
        Self {
            state: RwLock::new(OpenDocuments { documents, active }),
        }
    }

    pub fn from_config(config: &HostConfig) -> Self {
        let documents = config
            .documents
            .iter()
            .map(|doc| Arc::new(LocalDocument::from_config(doc)))
            .collect();
        Self::new(documents, config.active_document.map(DocumentId::new))
    }

    /// Concrete handle of an open document
    pub fn document(&self, id: DocumentId) -> Option<Arc<LocalDocument>> {
        self.read().documents.iter().find(|d| d.id == id).cloned()
    }

    pub fn documents(&self) -> Vec<Arc<LocalDocument>> {
        self.read().documents.clone()
    }

    /// Adds a document, replacing an open document with the same id
    pub fn open(&self, document: Arc<LocalDocument>) {
        let replaced = {
            let mut state = self.write();
            let replaced = state
                .documents
                .iter()
                .position(|d| d.id == document.id)
                .map(|index| state.documents.remove(index));
            state.documents.push(document);
            replaced
        };
        if let Some(old) = replaced {
            old.close();
        }
    }

    /// Closes a document; returns `false` if it was not open
    pub fn close(&self, id: DocumentId) -> bool {
        let removed = {
            let mut state = self.write();
            let removed = state
                .documents
                .iter()
                .position(|d| d.id == id)
                .map(|index| state.documents.remove(index));
            if state.active == Some(id) {
                state.active = None;
            }
            removed
        };
        match removed {
            Some(document) => {
                tracing::debug!(document_id = %id, "Closing document");
                document.close();
                true
            }
            None => false,
        }
    }

    pub fn set_active(&self, id: Option<DocumentId>) {
        self.write().active = id;
    }

    fn active(&self) -> Option<Arc<LocalDocument>> {
        let state = self.read();
        match state.active {
            Some(id) => state.documents.iter().find(|d| d.id == id).cloned(),
            None => state.documents.first().cloned(),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, OpenDocuments> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, OpenDocuments> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DocumentProvider for LocalDocumentProvider {
    async fn get_document(&self, id: DocumentId) -> Result<Option<Arc<dyn Document>>> {
        Ok(self.document(id).map(|d| d as Arc<dyn Document>))
    }

    async fn get_active_document(&self) -> Result<Option<Arc<dyn Document>>> {
        Ok(self.active().map(|d| d as Arc<dyn Document>))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayerConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config(id: i64, path: &str) -> DocumentConfig {
        DocumentConfig {
            id,
            path: path.to_string(),
            name: None,
            layers: vec![LayerConfig {
                id: 10,
                name: "title".to_string(),
                bounds: [1, 2, 30, 40],
            }],
        }
    }

    #[test]
    fn test_from_config() {
        let doc = LocalDocument::from_config(&config(1, "/art/poster.png"));
        assert_eq!(doc.name(), "poster.png");
        assert_eq!(doc.file_path(), Some(PathBuf::from("/art/poster.png")));

        let layer = doc.find_layer(LayerId::new(10)).unwrap();
        assert_eq!(layer.bounds, LayerBounds::new(1, 2, 30, 40));
        assert!(doc.find_layer(LayerId::new(11)).is_none());
    }

    #[test]
    fn test_save_as_notifies_listeners() {
        let doc = LocalDocument::new(1, "a", None, vec![]);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        doc.on_change(Arc::new(move |change| {
            if matches!(change, DocumentChange::File { path: Some(_) }) {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        }));

        doc.save_as("/art/a.png");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(doc.file_path(), Some(PathBuf::from("/art/a.png")));
    }

    #[tokio::test]
    async fn test_active_document_fallback() {
        let host = HostConfig {
            active_document: None,
            documents: vec![config(1, "/a.png"), config(2, "/b.png")],
        };
        let provider = LocalDocumentProvider::from_config(&host);

        let active = provider.get_active_document().await.unwrap().unwrap();
        assert_eq!(active.id(), DocumentId::new(1));

        provider.set_active(Some(DocumentId::new(2)));
        let active = provider.get_active_document().await.unwrap().unwrap();
        assert_eq!(active.id(), DocumentId::new(2));
    }

    #[tokio::test]
    async fn test_close_removes_document() {
        let provider = LocalDocumentProvider::new(
            vec![Arc::new(LocalDocument::from_config(&config(1, "/a.png")))],
            Some(DocumentId::new(1)),
        );

        assert!(provider.close(DocumentId::new(1)));
        assert!(!provider.close(DocumentId::new(1)));
        assert!(provider
            .get_document(DocumentId::new(1))
            .await
            .unwrap()
            .is_none());
        assert!(provider.get_active_document().await.unwrap().is_none());
    }
}
