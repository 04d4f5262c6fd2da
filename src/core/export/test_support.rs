//! In-memory collaborators for export unit tests

use crate::adapters::host::{
    BoundComponent, ChangeHandler, ChangeListeners, Document, DocumentChange, DocumentProvider,
    FileMover, FolderRevealer, RenderKind, RenderedFile, Renderer, RendererFactory, Subscription,
};
use crate::domain::ids::{DocumentId, LayerId};
use crate::domain::layer::Layer;
use crate::domain::{AssetportError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct MemoryDocument {
    pub id: DocumentId,
    pub name: String,
    pub path: Mutex<Option<PathBuf>>,
    pub layers: Vec<Layer>,
    pub listeners: ChangeListeners,
}

impl MemoryDocument {
    pub fn new(id: i64, path: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            id: DocumentId::new(id),
            name: format!("Doc {id}"),
            path: Mutex::new(path.map(PathBuf::from)),
            layers: Vec::new(),
            listeners: ChangeListeners::new(),
        })
    }

    pub fn save_as(&self, path: &str) {
        *self.path.lock().unwrap() = Some(PathBuf::from(path));
        self.listeners.emit(&DocumentChange::File {
            path: Some(PathBuf::from(path)),
        });
    }
}

impl Document for MemoryDocument {
    fn id(&self) -> DocumentId {
        self.id
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn file_path(&self) -> Option<PathBuf> {
        self.path.lock().unwrap().clone()
    }

    fn find_layer(&self, id: LayerId) -> Option<Layer> {
        self.layers.iter().find(|l| l.id == id).cloned()
    }

    fn on_change(&self, handler: ChangeHandler) -> Subscription {
        self.listeners.subscribe(handler)
    }

    fn remove_listener(&self, subscription: Subscription) {
        self.listeners.unsubscribe(subscription)
    }
}

#[derive(Default)]
pub struct MemoryProvider {
    pub documents: Vec<Arc<MemoryDocument>>,
    pub active: Option<DocumentId>,
}

#[async_trait]
impl DocumentProvider for MemoryProvider {
    async fn get_document(&self, id: DocumentId) -> Result<Option<Arc<dyn Document>>> {
        Ok(self
            .documents
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.clone() as Arc<dyn Document>))
    }

    async fn get_active_document(&self) -> Result<Option<Arc<dyn Document>>> {
        match self.active {
            Some(id) => self.get_document(id).await,
            None => Ok(None),
        }
    }
}

/// Renders to `/tmp/render/<file_name>`; behavior is keyed by file name
#[derive(Default, Clone)]
pub struct ScriptedRenderers {
    pub delays_ms: HashMap<String, u64>,
    pub failures: HashMap<String, String>,
    pub io_failures: HashMap<String, String>,
}

impl ScriptedRenderers {
    pub fn delay(mut self, file_name: &str, ms: u64) -> Self {
        self.delays_ms.insert(file_name.to_string(), ms);
        self
    }

    pub fn fail(mut self, file_name: &str, message: &str) -> Self {
        self.failures
            .insert(file_name.to_string(), message.to_string());
        self
    }

    /// Fails like a renderer whose temp folder cannot be written
    pub fn fail_io(mut self, file_name: &str, message: &str) -> Self {
        self.io_failures
            .insert(file_name.to_string(), message.to_string());
        self
    }
}

#[async_trait]
impl Renderer for ScriptedRenderers {
    async fn render(&self, component: &BoundComponent) -> Result<RenderedFile> {
        let name = component.description().file_name();
        if let Some(ms) = self.delays_ms.get(name) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        if let Some(message) = self.failures.get(name) {
            return Err(AssetportError::Render(message.clone()));
        }
        if let Some(message) = self.io_failures.get(name) {
            let error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, message.clone());
            return Err(error.into());
        }
        Ok(RenderedFile {
            path: PathBuf::from("/tmp/render").join(name),
        })
    }
}

impl RendererFactory for ScriptedRenderers {
    fn create(&self, _kind: RenderKind, _document: Arc<dyn Document>) -> Box<dyn Renderer> {
        Box::new(self.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveCall {
    Into { base_dir: PathBuf, file_name: String },
    Absolute { dest: PathBuf },
}

#[derive(Default)]
pub struct RecordingMover {
    pub calls: Mutex<Vec<MoveCall>>,
}

#[async_trait]
impl FileMover for RecordingMover {
    async fn move_file_into(
        &self,
        _temp: &Path,
        base_dir: &Path,
        file_name: &str,
    ) -> Result<PathBuf> {
        self.calls.lock().unwrap().push(MoveCall::Into {
            base_dir: base_dir.to_path_buf(),
            file_name: file_name.to_string(),
        });
        Ok(base_dir.join(file_name))
    }

    async fn move_file_absolute(&self, _temp: &Path, dest: &Path) -> Result<PathBuf> {
        self.calls.lock().unwrap().push(MoveCall::Absolute {
            dest: dest.to_path_buf(),
        });
        Ok(dest.to_path_buf())
    }
}

#[derive(Default)]
pub struct RecordingRevealer {
    pub folders: Mutex<Vec<PathBuf>>,
}

impl FolderRevealer for RecordingRevealer {
    fn reveal(&self, folder: &Path) {
        self.folders.lock().unwrap().push(folder.to_path_buf());
    }
}
