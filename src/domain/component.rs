//! Component domain model
//!
//! A component description is the unit of work for one export: which document
//! (and optionally which layer) to render, in which format, under which file
//! name, and where to put the result.

use super::ids::{DocumentId, LayerId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parameters of one export job
///
/// Descriptions are immutable once built. The single exception is the
/// document id, which the export coordinator backfills exactly once when the
/// description relied on the active document.
///
/// Optional render parameters that were not given are left out of the
/// serialized form entirely, so renderers fall back to their own defaults.
///
/// # Examples
///
/// ```
/// use assetport::domain::component::ComponentBuilder;
///
/// let component = ComponentBuilder::new()
///     .document_id(7)
///     .extension("jpg")
///     .file_name("hero.jpg")
///     .quality(80)
///     .build()
///     .unwrap();
///
/// assert_eq!(component.extension(), "jpg");
/// assert_eq!(component.quality(), Some(80));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    document_id: Option<DocumentId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    layer_id: Option<LayerId>,

    extension: String,

    file_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    base_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<u8>,
}

impl ComponentDescription {
    /// Creates a new builder
    pub fn builder() -> ComponentBuilder {
        ComponentBuilder::default()
    }

    pub fn document_id(&self) -> Option<DocumentId> {
        self.document_id
    }

    pub fn layer_id(&self) -> Option<LayerId> {
        self.layer_id
    }

    /// Output format, e.g. `png`, `jpg` or `svg`
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Sanitized, extension-qualified file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Explicit destination directory, if any
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// For `png`, a quality of 8 asks for an 8-bit palette; for `jpg`, 0-100
    pub fn quality(&self) -> Option<u8> {
        self.quality
    }

    /// Records the document the active-document fallback resolved to
    ///
    /// Does nothing if the description already names a document.
    pub(crate) fn backfill_document_id(&mut self, id: DocumentId) {
        if self.document_id.is_none() {
            self.document_id = Some(id);
        }
    }
}

/// Builder for constructing ComponentDescription instances
#[derive(Debug, Default)]
pub struct ComponentBuilder {
    document_id: Option<DocumentId>,
    layer_id: Option<LayerId>,
    extension: Option<String>,
    file_name: Option<String>,
    base_dir: Option<PathBuf>,
    scale: Option<f64>,
    width: Option<u32>,
    height: Option<u32>,
    quality: Option<u8>,
}

impl ComponentBuilder {
    /// Creates a new ComponentBuilder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_id(mut self, id: impl Into<DocumentId>) -> Self {
        self.document_id = Some(id.into());
        self
    }

    pub fn layer_id(mut self, id: impl Into<LayerId>) -> Self {
        self.layer_id = Some(id.into());
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Builds the ComponentDescription
    ///
    /// The extension defaults to `png`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file name is missing or empty
    pub fn build(self) -> Result<ComponentDescription, String> {
        let file_name = self.file_name.ok_or("file_name is required")?;
        if file_name.trim().is_empty() {
            return Err("file_name cannot be empty".to_string());
        }

        Ok(ComponentDescription {
            document_id: self.document_id,
            layer_id: self.layer_id,
            extension: self.extension.unwrap_or_else(|| "png".to_string()),
            file_name,
            base_dir: self.base_dir,
            scale: self.scale,
            width: self.width,
            height: self.height,
            quality: self.quality,
        })
    }
}
