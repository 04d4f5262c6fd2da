//! Host abstraction layer
//!
//! Trait-based seams between the export pipeline and the design-tool host.

pub mod listeners;
pub mod traits;

pub use listeners::ChangeListeners;
pub use traits::{
    BoundComponent, ChangeHandler, Document, DocumentChange, DocumentProvider, FileMover,
    FolderRevealer, RenderKind, RenderedFile, Renderer, RendererFactory, ScriptHost, Subscription,
};
