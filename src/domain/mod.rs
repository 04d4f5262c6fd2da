//! Domain models and types for Assetport.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`DocumentId`], [`LayerId`])
//! - **Domain models** ([`ComponentDescription`], [`Layer`])
//! - **Error types** ([`AssetportError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Hosts hand out plain integers for both documents and layers. The newtypes
//! keep them from being mixed up:
//!
//! ```rust
//! use assetport::domain::{DocumentId, LayerId};
//!
//! let document = DocumentId::new(3);
//! let layer = LayerId::new(3);
//!
//! // This won't compile:
//! // let wrong: DocumentId = layer;
//! # let _ = (document, layer);
//! ```
//!
//! # Builder Pattern
//!
//! ```rust
//! use assetport::domain::ComponentBuilder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let component = ComponentBuilder::new()
//!     .document_id(3)
//!     .layer_id(12)
//!     .extension("svg")
//!     .file_name("logo.svg")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod component;
pub mod errors;
pub mod ids;
pub mod layer;
pub mod result;

// Re-export commonly used types for convenience
pub use component::{ComponentBuilder, ComponentDescription};
pub use errors::AssetportError;
pub use ids::{DocumentId, LayerId};
pub use layer::{Layer, LayerBounds};
pub use result::Result;
