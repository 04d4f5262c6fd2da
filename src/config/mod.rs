//! Configuration management for Assetport.
//!
//! # Overview
//!
//! Assetport uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ASSETPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use assetport::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("assetport.toml")?;
//!
//! println!("Listening on {}", config.server.bind_address());
//! println!("Default format: {}", config.export.default_format);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ServerConfig`] - Websocket bind address and command domain
//! - [`ExportConfig`] - Default format, folder reveal, output folders
//! - [`HostConfig`] - Documents served by the local host
//! - [`LoggingConfig`] - File logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [server]
//! port = 59596
//!
//! [export]
//! default_format = "png"
//! unsaved_base_dir = "${HOME}/Exports"
//!
//! [[host.documents]]
//! id = 1
//! path = "/Users/me/design/poster.png"
//!
//! [[host.documents.layers]]
//! id = 2
//! name = "headline"
//! bounds = [40, 40, 600, 120]
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str, load_config_or_default};
pub use schema::{
    ApplicationConfig, AssetportConfig, DocumentConfig, ExportConfig, HostConfig, LayerConfig,
    LoggingConfig, ServerConfig,
};
