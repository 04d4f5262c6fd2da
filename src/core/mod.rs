//! Core business logic for Assetport.
//!
//! # Modules
//!
//! - [`export`] - Export coordination, batch processing and output locations
//! - [`naming`] - File name sanitizing and script string escaping
//!
//! # Export Workflow
//!
//! For every component of a batch, concurrently:
//!
//! 1. **Resolve**: Look up the document (or the active document) and layer
//! 2. **Render**: Produce a temp file through the host renderer
//! 3. **Place**: Move the file into the document's asset folder or an explicit directory
//!
//! The folder of the first successful item is revealed, and the batch settles
//! once every item has finished.
//!
//! # Example
//!
//! ```rust,no_run
//! use assetport::adapters::create_local_host;
//! use assetport::config::load_config;
//! use assetport::domain::ComponentBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("assetport.toml")?;
//! let host = create_local_host(&config)?;
//!
//! let component = ComponentBuilder::new()
//!     .document_id(1)
//!     .file_name("hero.png")
//!     .build()?;
//!
//! let batch = host.exporter.export_one_batch(component).await?;
//! for path in batch.paths() {
//!     println!("Exported {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod naming;
