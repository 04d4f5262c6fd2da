//! Export coordinator - runs one component through the export pipeline
//!
//! Resolve the document, render the component to a temp file, then move the
//! file to its destination. Every step is sequential within one component.

use crate::adapters::host::DocumentProvider;
use crate::core::export::locations::LocationCache;
use crate::core::export::renderer::ComponentRenderer;
use crate::core::export::summary::ExportedAsset;
use crate::domain::component::ComponentDescription;
use crate::domain::{AssetportError, Result};
use std::path::Path;
use std::sync::Arc;

/// Export coordinator
pub struct ExportCoordinator {
    provider: Arc<dyn DocumentProvider>,
    renderer: ComponentRenderer,
    locations: Arc<LocationCache>,
}

impl ExportCoordinator {
    /// Create a new export coordinator
    pub fn new(
        provider: Arc<dyn DocumentProvider>,
        renderer: ComponentRenderer,
        locations: Arc<LocationCache>,
    ) -> Self {
        Self {
            provider,
            renderer,
            locations,
        }
    }

    pub fn locations(&self) -> &Arc<LocationCache> {
        &self.locations
    }

    /// Exports one component
    ///
    /// Without a document id the host's active document is used and its id is
    /// written back into the returned description.
    ///
    /// # Errors
    ///
    /// - [`AssetportError::DocumentNotFound`] / [`AssetportError::NoActiveDocument`]
    /// - [`AssetportError::LayerNotFound`], unchanged from the renderer adapter
    /// - [`AssetportError::ComponentGeneration`] wrapping any other renderer
    ///   failure, I/O included
    /// - [`AssetportError::Placement`] if the file could not be moved
    pub async fn export_one(&self, mut component: ComponentDescription) -> Result<ExportedAsset> {
        let document = match component.document_id() {
            Some(id) => self
                .provider
                .get_document(id)
                .await?
                .ok_or(AssetportError::DocumentNotFound(id))?,
            None => {
                let document = self
                    .provider
                    .get_active_document()
                    .await?
                    .ok_or(AssetportError::NoActiveDocument)?;
                component.backfill_document_id(document.id());
                document
            }
        };
        let document_id = document.id();

        crate::log_export_start!(document_id, component.file_name());

        let (bound, rendered) = self
            .renderer
            .render(document.clone(), component)
            .await
            .map_err(component_generation_error)?;

        let location = self.locations.location_for(&document);
        let description = bound.into_description();

        let placed = match description.base_dir() {
            Some(base_dir) => {
                let dest = base_dir.join(description.file_name());
                location.move_to_absolute(&rendered.path, &dest).await
            }
            None => {
                location
                    .move_into(&rendered.path, description.file_name())
                    .await
            }
        };

        let path = match placed {
            Ok(path) => path,
            Err(e) => {
                discard_temp(&rendered.path).await;
                return Err(match e {
                    AssetportError::Placement(_) => e,
                    other => AssetportError::Placement(other.to_string()),
                });
            }
        };

        crate::log_export_complete!(document_id, path);

        Ok(ExportedAsset::new(description, path))
    }
}

/// Everything but an unknown layer is reported as a generation failure
fn component_generation_error(error: AssetportError) -> AssetportError {
    match error {
        AssetportError::LayerNotFound { .. } | AssetportError::ComponentGeneration(_) => error,
        AssetportError::Render(message) => AssetportError::ComponentGeneration(message),
        other => AssetportError::ComponentGeneration(other.to_string()),
    }
}

async fn discard_temp(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::debug!(path = %path.display(), error = %e, "Temp file not removed");
    }
}
