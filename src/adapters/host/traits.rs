//! Host collaborator traits
//!
//! This module defines the interfaces the export pipeline consumes from the
//! design-tool host: document lookup, rendering, file placement, folder reveal
//! and host scripting. The pipeline never reaches past these traits.

use crate::domain::component::ComponentDescription;
use crate::domain::ids::{DocumentId, LayerId};
use crate::domain::layer::Layer;
use crate::domain::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Change notification emitted by a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentChange {
    /// The document's file identity changed (save, save-as, relocation)
    ///
    /// `path` is the new file location, or `None` if the document has no file
    /// on disk anymore.
    File { path: Option<PathBuf> },

    /// Layer tree edits; irrelevant for output placement
    Layers,

    /// The document was closed in the host
    Closed,
}

/// Callback registered for document change notifications
pub type ChangeHandler = Arc<dyn Fn(&DocumentChange) + Send + Sync>;

/// Revocation token for a registered change handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl Subscription {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// An open document in the host
///
/// Documents are owned by the host. Holders keep an `Arc` only for the
/// duration of one export; long-lived state is keyed by [`DocumentId`].
pub trait Document: Send + Sync {
    fn id(&self) -> DocumentId;

    /// Display name, used for default output folders of unsaved documents
    fn name(&self) -> String;

    /// Current file location, `None` while the document is unsaved
    fn file_path(&self) -> Option<PathBuf>;

    /// Looks up a layer anywhere in the document's layer tree
    fn find_layer(&self, id: LayerId) -> Option<Layer>;

    /// Registers a change handler
    fn on_change(&self, handler: ChangeHandler) -> Subscription;

    /// Revokes a handler registered with [`Document::on_change`]
    ///
    /// Unknown subscriptions are ignored.
    fn remove_listener(&self, subscription: Subscription);
}

impl fmt::Debug for dyn Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id())
            .field("name", &self.name())
            .finish()
    }
}

/// Document lookup provided by the host
#[async_trait]
pub trait DocumentProvider: Send + Sync {
    /// Fetches an open document by id
    ///
    /// # Returns
    ///
    /// `Ok(None)` if no open document has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the host round-trip itself fails.
    async fn get_document(&self, id: DocumentId) -> Result<Option<Arc<dyn Document>>>;

    /// Fetches the host's active document, `Ok(None)` if nothing is open
    async fn get_active_document(&self) -> Result<Option<Arc<dyn Document>>>;
}

/// The two output kinds a host can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderKind {
    /// Vector output (`svg`)
    Vector,
    /// Pixel output (every other extension)
    Raster,
}

impl RenderKind {
    /// Picks the strategy for an output extension
    pub fn from_extension(extension: &str) -> Self {
        if extension.eq_ignore_ascii_case("svg") {
            RenderKind::Vector
        } else {
            RenderKind::Raster
        }
    }
}

/// A component whose document and layer references have been resolved
///
/// Created once by the component renderer and never modified afterwards.
#[derive(Debug, Clone)]
pub struct BoundComponent {
    description: ComponentDescription,
    document: Arc<dyn Document>,
    layer: Option<Layer>,
}

impl BoundComponent {
    pub(crate) fn new(
        description: ComponentDescription,
        document: Arc<dyn Document>,
        layer: Option<Layer>,
    ) -> Self {
        Self {
            description,
            document,
            layer,
        }
    }

    pub fn description(&self) -> &ComponentDescription {
        &self.description
    }

    pub fn document(&self) -> &Arc<dyn Document> {
        &self.document
    }

    pub fn layer(&self) -> Option<&Layer> {
        self.layer.as_ref()
    }

    pub fn into_description(self) -> ComponentDescription {
        self.description
    }
}

/// Temporary file produced by a renderer
///
/// The caller owns the file and must move or discard it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
}

/// Renders one component to a temporary file
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, component: &BoundComponent) -> Result<RenderedFile>;
}

/// Creates renderers for a document
pub trait RendererFactory: Send + Sync {
    fn create(&self, kind: RenderKind, document: Arc<dyn Document>) -> Box<dyn Renderer>;
}

/// Moves rendered files to their final location
#[async_trait]
pub trait FileMover: Send + Sync {
    /// Moves `temp` into `base_dir` under `file_name`, returning the final path
    async fn move_file_into(&self, temp: &Path, base_dir: &Path, file_name: &str)
        -> Result<PathBuf>;

    /// Moves `temp` to the fully qualified `dest`, returning the final path
    async fn move_file_absolute(&self, temp: &Path, dest: &Path) -> Result<PathBuf>;
}

/// Opens a folder in the OS file browser
///
/// Fire-and-forget: implementations must not block and swallow their own
/// failures.
pub trait FolderRevealer: Send + Sync {
    fn reveal(&self, folder: &Path);
}

/// Evaluates host-side scripts (ExtendScript/JSX)
#[async_trait]
pub trait ScriptHost: Send + Sync {
    async fn evaluate_jsx(&self, script: &str) -> Result<String>;
}
