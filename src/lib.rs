// Assetport - design document asset export bridge
// Copyright (c) 2025 Assetport Contributors
// Licensed under the MIT License

//! # Assetport - asset export for design tool hosts
//!
//! Assetport turns requests like "export layer 12 of document 3 as a 2x PNG
//! named `logo`" into files on disk. It speaks a websocket command protocol
//! to the host and runs the render and placement steps through collaborator
//! traits, so any host can plug in.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Resolving** documents and layers, falling back to the active document
//! - **Rendering** components to temporary files (raster or vector)
//! - **Placing** files in per-document asset folders that follow save-as
//! - **Batching** concurrent exports with per-item error isolation
//!
//! ## Architecture
//!
//! Assetport follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`server`] - Websocket command server and request translation
//! - [`core`] - Business logic (export pipeline, naming)
//! - [`adapters`] - Host collaborator traits and the local file-backed host
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use assetport::adapters::create_local_host;
//! use assetport::config::load_config;
//! use assetport::server::{ExportPayload, WebHandler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("assetport.toml")?;
//!
//!     // Wire the local host
//!     let host = create_local_host(&config)?;
//!     let handler = WebHandler::new("assetport", "png", host.exporter, host.scripts);
//!
//!     // Export the active document
//!     let paths = handler
//!         .export(ExportPayload {
//!             file_name: Some("poster".to_string()),
//!             scale: Some(2.0),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     println!("Exported {:?}", paths);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Assetport uses the [`domain::AssetportError`] type for all library errors:
//!
//! ```rust,no_run
//! use assetport::domain::AssetportError;
//!
//! fn example() -> Result<(), AssetportError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = assetport::config::load_config("assetport.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Assetport uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting export");
//! warn!(document_id = 3, "Document file does not exist");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod server;
