//! Component renderer adapter
//!
//! Binds a component description to its resolved document and layer, then
//! delegates to the host renderer for the requested output kind.

use crate::adapters::host::{BoundComponent, Document, RenderKind, RenderedFile, RendererFactory};
use crate::domain::component::ComponentDescription;
use crate::domain::{AssetportError, Result};
use std::sync::Arc;

/// Renders component descriptions to temporary files
pub struct ComponentRenderer {
    factory: Arc<dyn RendererFactory>,
}

impl ComponentRenderer {
    pub fn new(factory: Arc<dyn RendererFactory>) -> Self {
        Self { factory }
    }

    /// Renders one component of `document`
    ///
    /// The returned temp file belongs to the caller, who must move or discard
    /// it.
    ///
    /// # Errors
    ///
    /// - [`AssetportError::LayerNotFound`] if the description names a layer
    ///   the document does not contain
    /// - whatever the host renderer reports, usually [`AssetportError::Render`]
    pub async fn render(
        &self,
        document: Arc<dyn Document>,
        description: ComponentDescription,
    ) -> Result<(BoundComponent, RenderedFile)> {
        let layer = match description.layer_id() {
            Some(layer_id) => Some(document.find_layer(layer_id).ok_or(
                AssetportError::LayerNotFound {
                    document: document.id(),
                    layer: layer_id,
                },
            )?),
            None => None,
        };

        let kind = RenderKind::from_extension(description.extension());
        let bound = BoundComponent::new(description, document.clone(), layer);

        tracing::debug!(
            document_id = %document.id(),
            kind = ?kind,
            file_name = bound.description().file_name(),
            "Rendering component"
        );

        let renderer = self.factory.create(kind, document);
        let rendered = renderer.render(&bound).await?;
        Ok((bound, rendered))
    }
}
