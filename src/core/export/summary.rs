//! Export outcomes and reporting
//!
//! This module defines the per-item and per-batch results of an export.

use crate::domain::component::ComponentDescription;
use crate::domain::AssetportError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// A component that was rendered and placed successfully
#[derive(Debug, Clone)]
pub struct ExportedAsset {
    /// Description as exported, with the document id backfilled
    pub component: ComponentDescription,

    /// Final location of the asset
    pub path: PathBuf,

    pub exported_at: DateTime<Utc>,
}

impl ExportedAsset {
    pub fn new(component: ComponentDescription, path: PathBuf) -> Self {
        Self {
            component,
            path,
            exported_at: Utc::now(),
        }
    }
}

/// One failed item of a batch
#[derive(Debug)]
pub struct ItemFailure {
    /// Position of the item in the submitted batch
    pub index: usize,

    pub error: AssetportError,
}

impl ItemFailure {
    pub fn error_type(&self) -> ExportErrorType {
        ExportErrorType::from(&self.error)
    }
}

/// Outcome of a batch in which at least one item succeeded
#[derive(Debug)]
pub struct BatchExport {
    /// Identifier used in log lines for this batch
    pub batch_id: Uuid,

    /// Successful items, in submission order
    pub exported: Vec<ExportedAsset>,

    /// Failed items, in submission order
    pub failures: Vec<ItemFailure>,

    pub duration: Duration,
}

impl BatchExport {
    /// Final paths of the successful items
    pub fn paths(&self) -> Vec<PathBuf> {
        self.exported.iter().map(|asset| asset.path.clone()).collect()
    }

    /// Number of submitted items
    pub fn total(&self) -> usize {
        self.exported.len() + self.failures.len()
    }

    /// Whether every submitted item succeeded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            batch_id = %self.batch_id,
            total = self.total(),
            successful = self.exported.len(),
            failed = self.failures.len(),
            duration_ms = self.duration.as_millis() as u64,
            "Batch export completed"
        );

        for failure in &self.failures {
            tracing::warn!(
                batch_id = %self.batch_id,
                index = failure.index,
                error_type = ?failure.error_type(),
                error = %failure.error,
                "Batch item failed"
            );
        }
    }
}

/// Coarse classification of export failures for logs and exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Document or layer could not be resolved
    Resolution,
    /// Renderer failed
    Render,
    /// Moving the file into place failed
    Placement,
    /// Bad request or configuration
    Validation,
    /// Host round-trip failed
    Host,
    /// Unknown error
    Unknown,
}

impl From<&AssetportError> for ExportErrorType {
    fn from(error: &AssetportError) -> Self {
        match error {
            AssetportError::DocumentNotFound(_)
            | AssetportError::NoActiveDocument
            | AssetportError::LayerNotFound { .. } => ExportErrorType::Resolution,
            AssetportError::Render(_) | AssetportError::ComponentGeneration(_) => {
                ExportErrorType::Render
            }
            AssetportError::Placement(_) | AssetportError::Io(_) => ExportErrorType::Placement,
            AssetportError::Validation(_) | AssetportError::Configuration(_) => {
                ExportErrorType::Validation
            }
            AssetportError::Host(_) => ExportErrorType::Host,
            _ => ExportErrorType::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::DocumentId;
    use crate::domain::ComponentBuilder;

    fn asset(path: &str) -> ExportedAsset {
        let component = ComponentBuilder::new().file_name("a.png").build().unwrap();
        ExportedAsset::new(component, PathBuf::from(path))
    }

    #[test]
    fn test_batch_export_paths_and_counts() {
        let batch = BatchExport {
            batch_id: Uuid::new_v4(),
            exported: vec![asset("/out/a.png"), asset("/out/b.png")],
            failures: vec![ItemFailure {
                index: 1,
                error: AssetportError::NoActiveDocument,
            }],
            duration: Duration::from_millis(12),
        };

        assert_eq!(
            batch.paths(),
            vec![PathBuf::from("/out/a.png"), PathBuf::from("/out/b.png")]
        );
        assert_eq!(batch.total(), 3);
        assert!(!batch.is_complete());
    }

    #[test]
    fn test_error_type_classification() {
        assert_eq!(
            ExportErrorType::from(&AssetportError::DocumentNotFound(DocumentId::new(1))),
            ExportErrorType::Resolution
        );
        assert_eq!(
            ExportErrorType::from(&AssetportError::ComponentGeneration("x".to_string())),
            ExportErrorType::Render
        );
        assert_eq!(
            ExportErrorType::from(&AssetportError::Placement("x".to_string())),
            ExportErrorType::Placement
        );
        assert_eq!(
            ExportErrorType::from(&AssetportError::UserCancelled),
            ExportErrorType::Unknown
        );
    }
}
