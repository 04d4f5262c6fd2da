//! Local host
//!
//! File-backed implementations of every host collaborator: image files as
//! documents, `image`-based renderers, filesystem placement and OS folder
//! reveal.

pub mod document;
pub mod mover;
pub mod renderer;
pub mod reveal;
pub mod script;

pub use document::{LocalDocument, LocalDocumentProvider};
pub use mover::FsFileMover;
pub use renderer::{LocalRendererFactory, RasterRenderer, SvgRenderer};
pub use reveal::OsFolderRevealer;
pub use script::UnavailableScriptHost;
