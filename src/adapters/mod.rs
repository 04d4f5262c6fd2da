//! Host integrations for Assetport.
//!
//! This module provides:
//!
//! - [`host`] - Collaborator traits the export pipeline depends on
//! - [`local`] - File-backed implementation of every collaborator
//! - [`factory`] - Wiring of collaborators into an export pipeline
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate the design-tool host
//! and enable testing with in-memory implementations. A host integration
//! implements the traits in [`host`] and hands them to
//! [`factory::create_exporter`]:
//!
//! ```rust,no_run
//! use assetport::adapters::create_exporter;
//! use assetport::adapters::local::{
//!     FsFileMover, LocalDocumentProvider, LocalRendererFactory, OsFolderRevealer,
//! };
//! use assetport::config::{ExportConfig, HostConfig};
//! use std::sync::Arc;
//!
//! let exporter = create_exporter(
//!     Arc::new(LocalDocumentProvider::from_config(&HostConfig::default())),
//!     Arc::new(LocalRendererFactory::new(std::env::temp_dir())),
//!     Arc::new(FsFileMover::new()),
//!     Arc::new(OsFolderRevealer::new()),
//!     &ExportConfig::default(),
//! );
//! # let _ = exporter;
//! ```

pub mod factory;
pub mod host;
pub mod local;

pub use factory::{create_exporter, create_local_host, HostServices};
