//! Export pipeline
//!
//! This module provides the core export logic for Assetport:
//! - Per-document output locations
//! - Component rendering against host renderers
//! - Single-component export coordination
//! - Concurrent batch export and outcome reporting

pub mod batch;
pub mod coordinator;
pub mod locations;
pub mod renderer;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_support;

pub use batch::BatchExporter;
pub use coordinator::ExportCoordinator;
pub use locations::{LocationCache, LocationHandle, LocationPolicy};
pub use renderer::ComponentRenderer;
pub use summary::{BatchExport, ExportErrorType, ExportedAsset, ItemFailure};
