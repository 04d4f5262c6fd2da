//! Export pipeline factory
//!
//! This module wires host collaborators into a ready-to-use export pipeline.

use crate::adapters::host::{
    Document, DocumentProvider, FileMover, FolderRevealer, RendererFactory, ScriptHost,
};
use crate::adapters::local::{
    FsFileMover, LocalDocumentProvider, LocalRendererFactory, OsFolderRevealer,
    UnavailableScriptHost,
};
use crate::config::{AssetportConfig, ExportConfig};
use crate::core::export::{
    BatchExporter, ComponentRenderer, ExportCoordinator, LocationCache, LocationPolicy,
};
use crate::domain::{AssetportError, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Collaborators and pipeline of a running host
pub struct HostServices {
    pub provider: Arc<LocalDocumentProvider>,
    pub exporter: Arc<BatchExporter>,
    pub scripts: Arc<dyn ScriptHost>,
}

/// Create a batch exporter over arbitrary host collaborators
///
/// # Arguments
///
/// * `provider` - Document lookup
/// * `renderers` - Renderer factory for vector and raster output
/// * `mover` - File placement
/// * `revealer` - Folder reveal after a batch's first success
/// * `config` - Export settings (folder policy, reveal switch)
pub fn create_exporter(
    provider: Arc<dyn DocumentProvider>,
    renderers: Arc<dyn RendererFactory>,
    mover: Arc<dyn FileMover>,
    revealer: Arc<dyn FolderRevealer>,
    config: &ExportConfig,
) -> Arc<BatchExporter> {
    let locations = Arc::new(LocationCache::new(
        LocationPolicy::from_config(config),
        mover,
    ));
    let coordinator = Arc::new(ExportCoordinator::new(
        provider,
        ComponentRenderer::new(renderers),
        locations,
    ));
    Arc::new(BatchExporter::new(
        coordinator,
        revealer,
        config.reveal_folder,
    ))
}

/// Create the file-backed local host from configuration
///
/// # Errors
///
/// Returns an error if the configuration is invalid
pub fn create_local_host(config: &AssetportConfig) -> Result<HostServices> {
    config
        .validate()
        .map_err(AssetportError::Configuration)?;

    let provider = Arc::new(LocalDocumentProvider::from_config(&config.host));
    for document in provider.documents() {
        if let Some(path) = document.file_path().filter(|p| !p.exists()) {
            tracing::warn!(
                document_id = %document.id(),
                path = %path.display(),
                "Document file does not exist"
            );
        }
    }

    let temp_dir = config
        .export
        .temp_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);

    tracing::info!(
        documents = config.host.documents.len(),
        temp_dir = %temp_dir.display(),
        "Creating local host"
    );

    let exporter = create_exporter(
        provider.clone(),
        Arc::new(
            LocalRendererFactory::new(temp_dir)
                .with_max_dimension(config.export.max_dimension),
        ),
        Arc::new(FsFileMover::new()),
        Arc::new(OsFolderRevealer::new()),
        &config.export,
    );

    Ok(HostServices {
        provider,
        exporter,
        scripts: Arc::new(UnavailableScriptHost),
    })
}
