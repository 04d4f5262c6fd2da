//! Domain error types
//!
//! This module defines the error hierarchy for Assetport. Every failure in the
//! export pipeline ends up as an [`AssetportError`]; none of them abort the
//! process.

use super::ids::{DocumentId, LayerId};
use thiserror::Error;

/// Main Assetport error type
///
/// Per-item export errors are reported to the caller of that item only;
/// sibling items in the same batch are never affected.
#[derive(Debug, Error)]
pub enum AssetportError {
    /// Requested document does not exist or is not open
    #[error("Document with id {0} not found.")]
    DocumentNotFound(DocumentId),

    /// No document id was given and the host has no active document
    #[error("No active document.")]
    NoActiveDocument,

    /// Requested layer does not exist in the resolved document
    #[error("Layer with id {layer} not found.")]
    LayerNotFound {
        document: DocumentId,
        layer: LayerId,
    },

    /// Renderer-level failure
    #[error("{0}")]
    Render(String),

    /// Renderer failure as seen by the export coordinator
    #[error("Error generating component: {0}")]
    ComponentGeneration(String),

    /// Moving the rendered file into place failed
    #[error("Failed to place exported file: {0}")]
    Placement(String),

    /// Every item of a batch failed
    #[error("Failed to export components: {}", messages.join(", "))]
    BatchAggregate { messages: Vec<String> },

    /// The user dismissed the folder dialog
    #[error("cancel")]
    UserCancelled,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request payloads or arguments
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed command protocol messages
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Failures reported by the host (scripting, document lookup transport)
    #[error("Host error: {0}")]
    Host(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AssetportError {
    /// Messages of the failed items when this is a batch aggregate
    pub fn aggregated_messages(&self) -> Option<&[String]> {
        match self {
            AssetportError::BatchAggregate { messages } => Some(messages),
            _ => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for AssetportError {
    fn from(err: std::io::Error) -> Self {
        AssetportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AssetportError {
    fn from(err: serde_json::Error) -> Self {
        AssetportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AssetportError {
    fn from(err: toml::de::Error) -> Self {
        AssetportError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Image codec failures only happen inside renderers
impl From<image::ImageError> for AssetportError {
    fn from(err: image::ImageError) -> Self {
        AssetportError::Render(err.to_string())
    }
}
