//! Batch export orchestration
//!
//! Runs several components concurrently through the [`ExportCoordinator`] and
//! settles them into one [`BatchExport`].

use crate::adapters::host::FolderRevealer;
use crate::core::export::coordinator::ExportCoordinator;
use crate::core::export::summary::{BatchExport, ExportedAsset, ItemFailure};
use crate::domain::component::ComponentDescription;
use crate::domain::{AssetportError, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Exports batches of components
pub struct BatchExporter {
    coordinator: Arc<ExportCoordinator>,
    revealer: Arc<dyn FolderRevealer>,
    reveal_folder: bool,
}

impl BatchExporter {
    /// Create a new batch exporter
    ///
    /// With `reveal_folder` set, the folder of the first successful export of
    /// each batch is opened through `revealer`.
    pub fn new(
        coordinator: Arc<ExportCoordinator>,
        revealer: Arc<dyn FolderRevealer>,
        reveal_folder: bool,
    ) -> Self {
        Self {
            coordinator,
            revealer,
            reveal_folder,
        }
    }

    pub fn coordinator(&self) -> &Arc<ExportCoordinator> {
        &self.coordinator
    }

    /// Exports a single component as a batch of one
    pub async fn export_one_batch(&self, component: ComponentDescription) -> Result<BatchExport> {
        self.export_many(vec![component]).await
    }

    /// Exports every component concurrently and waits for all of them
    ///
    /// Items are independent: a failing item never cancels or alters its
    /// siblings. The batch succeeds when at least one item succeeds.
    ///
    /// # Errors
    ///
    /// - [`AssetportError::Validation`] for an empty batch
    /// - [`AssetportError::BatchAggregate`] when every item failed, carrying
    ///   each item's message in submission order
    pub async fn export_many(&self, components: Vec<ComponentDescription>) -> Result<BatchExport> {
        if components.is_empty() {
            return Err(AssetportError::Validation(
                "No components to export".to_string(),
            ));
        }

        let batch_id = Uuid::new_v4();
        let total = components.len();
        let start_time = Instant::now();

        tracing::info!(batch_id = %batch_id, total, "Starting batch export");

        let coordinator = &self.coordinator;
        let mut pending: FuturesUnordered<_> = components
            .into_iter()
            .enumerate()
            .map(|(index, component)| async move {
                (index, coordinator.export_one(component).await)
            })
            .collect();

        let mut settled: Vec<Option<Result<ExportedAsset>>> = (0..total).map(|_| None).collect();
        let mut revealed = false;

        while let Some((index, outcome)) = pending.next().await {
            match &outcome {
                Ok(asset) => {
                    tracing::debug!(batch_id = %batch_id, index, path = %asset.path.display(), "Batch item exported");
                    if !revealed {
                        revealed = true;
                        self.reveal_parent(&asset.path);
                    }
                }
                Err(e) => {
                    tracing::debug!(batch_id = %batch_id, index, error = %e, "Batch item failed");
                }
            }
            settled[index] = Some(outcome);
        }

        let mut exported = Vec::new();
        let mut failures = Vec::new();
        for (index, outcome) in settled.into_iter().enumerate() {
            match outcome {
                Some(Ok(asset)) => exported.push(asset),
                Some(Err(error)) => failures.push(ItemFailure { index, error }),
                None => {}
            }
        }

        let batch = BatchExport {
            batch_id,
            exported,
            failures,
            duration: start_time.elapsed(),
        };
        batch.log_summary();

        if batch.exported.is_empty() {
            let messages = batch
                .failures
                .iter()
                .map(|failure| failure.error.to_string())
                .collect();
            return Err(AssetportError::BatchAggregate { messages });
        }

        Ok(batch)
    }

    fn reveal_parent(&self, path: &Path) {
        if !self.reveal_folder {
            return;
        }
        if let Some(folder) = path.parent() {
            tracing::debug!(folder = %folder.display(), "Revealing export folder");
            self.revealer.reveal(folder);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::locations::{LocationCache, LocationPolicy};
    use crate::core::export::renderer::ComponentRenderer;
    use crate::core::export::test_support::*;
    use crate::domain::ComponentBuilder;
    use std::path::PathBuf;

    fn exporter(
        renderers: ScriptedRenderers,
        reveal_folder: bool,
    ) -> (BatchExporter, Arc<RecordingRevealer>) {
        let doc = MemoryDocument::new(1, Some("/art/poster.psd"));
        let provider = MemoryProvider {
            active: Some(doc.id),
            documents: vec![doc],
        };
        let locations = Arc::new(LocationCache::new(
            LocationPolicy::new("-assets", "/desktop"),
            Arc::new(RecordingMover::default()),
        ));
        let coordinator = Arc::new(ExportCoordinator::new(
            Arc::new(provider),
            ComponentRenderer::new(Arc::new(renderers)),
            locations,
        ));
        let revealer = Arc::new(RecordingRevealer::default());
        (
            BatchExporter::new(coordinator, revealer.clone(), reveal_folder),
            revealer,
        )
    }

    fn component(file_name: &str) -> ComponentDescription {
        ComponentBuilder::new().file_name(file_name).build().unwrap()
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let (exporter, revealer) = exporter(ScriptedRenderers::default(), true);

        let err = exporter.export_many(vec![]).await.unwrap_err();
        assert!(matches!(err, AssetportError::Validation(_)));
        assert!(revealer.folders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_single_component_batch() {
        let (exporter, revealer) = exporter(ScriptedRenderers::default(), true);

        let batch = exporter.export_one_batch(component("a.png")).await.unwrap();
        assert_eq!(batch.paths(), vec![PathBuf::from("/art/poster-assets/a.png")]);
        assert_eq!(
            *revealer.folders.lock().unwrap(),
            vec![PathBuf::from("/art/poster-assets")]
        );
    }

    #[tokio::test]
    async fn test_reveal_can_be_disabled() {
        let (exporter, revealer) = exporter(ScriptedRenderers::default(), false);

        exporter.export_one_batch(component("a.png")).await.unwrap();
        assert!(revealer.folders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_successes_keep_submission_order() {
        let renderers = ScriptedRenderers::default()
            .delay("first.png", 40)
            .delay("second.png", 5);
        let (exporter, _) = exporter(renderers, true);

        let batch = exporter
            .export_many(vec![component("first.png"), component("second.png")])
            .await
            .unwrap();

        let names: Vec<_> = batch
            .exported
            .iter()
            .map(|a| a.component.file_name().to_string())
            .collect();
        assert_eq!(names, vec!["first.png", "second.png"]);
    }

    #[tokio::test]
    async fn test_all_failures_aggregate() {
        let renderers = ScriptedRenderers::default()
            .fail("a.png", "bad a")
            .fail("b.png", "bad b");
        let (exporter, revealer) = exporter(renderers, true);

        let err = exporter
            .export_many(vec![component("a.png"), component("b.png")])
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to export components: Error generating component: bad a, Error generating component: bad b"
        );
        assert!(revealer.folders.lock().unwrap().is_empty());
    }
}
