//! Configuration schema types
//!
//! This module defines the configuration structure for Assetport.

use serde::{Deserialize, Serialize};

/// Main Assetport configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional in the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Command server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Export pipeline settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Local host documents
    #[serde(default)]
    pub host: HostConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AssetportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.export.validate()?;
        self.host.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Command server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Websocket port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Command domain name clients address
    #[serde(default = "default_domain")]
    pub domain: String,
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("server.host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("server.port must be > 0".to_string());
        }
        if self.domain.trim().is_empty() {
            return Err("server.domain cannot be empty".to_string());
        }
        Ok(())
    }

    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            domain: default_domain(),
        }
    }
}

/// Export pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Format used when a request names none
    #[serde(default = "default_format")]
    pub default_format: String,

    /// Open the output folder after the first successful export of a batch
    #[serde(default = "default_true")]
    pub reveal_folder: bool,

    /// Suffix appended to a document's name to form its asset folder
    #[serde(default = "default_asset_dir_suffix")]
    pub asset_dir_suffix: String,

    /// Parent folder for assets of unsaved documents (default: desktop)
    #[serde(default)]
    pub unsaved_base_dir: Option<String>,

    /// Folder for intermediate render output (default: system temp dir)
    #[serde(default)]
    pub temp_dir: Option<String>,

    /// Largest width or height, in pixels, the local renderer will produce
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        let format = self.default_format.trim();
        if format.is_empty() {
            return Err("export.default_format cannot be empty".to_string());
        }
        if format.contains(['/', '\\', '.']) {
            return Err(format!(
                "Invalid export.default_format '{}'. Use a bare extension such as 'png'",
                self.default_format
            ));
        }
        if self.max_dimension == 0 {
            return Err("export.max_dimension must be > 0".to_string());
        }
        if self.asset_dir_suffix.contains(['/', '\\']) {
            return Err("export.asset_dir_suffix cannot contain path separators".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            reveal_folder: true,
            asset_dir_suffix: default_asset_dir_suffix(),
            unsaved_base_dir: None,
            temp_dir: None,
            max_dimension: default_max_dimension(),
        }
    }
}

/// Documents served by the local host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Id of the document reported as active (default: first document)
    #[serde(default)]
    pub active_document: Option<i64>,

    /// Open documents
    #[serde(default)]
    pub documents: Vec<DocumentConfig>,
}

impl HostConfig {
    fn validate(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for document in &self.documents {
            document.validate()?;
            if !seen.insert(document.id) {
                return Err(format!("host.documents: duplicate document id {}", document.id));
            }
        }

        if let Some(active) = self.active_document {
            if !seen.contains(&active) {
                return Err(format!(
                    "host.active_document {active} does not match any configured document"
                ));
            }
        }
        Ok(())
    }
}

/// One image file opened as a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub id: i64,

    /// Path of the source image
    pub path: String,

    /// Display name (default: file name of `path`)
    #[serde(default)]
    pub name: Option<String>,

    /// Named regions exposed as layers
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
}

impl DocumentConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err(format!("host.documents[{}].path cannot be empty", self.id));
        }

        let mut seen = std::collections::HashSet::new();
        for layer in &self.layers {
            if !seen.insert(layer.id) {
                return Err(format!(
                    "host.documents[{}]: duplicate layer id {}",
                    self.id, layer.id
                ));
            }
            if layer.bounds[2] == 0 || layer.bounds[3] == 0 {
                return Err(format!(
                    "host.documents[{}].layers[{}]: bounds must have a non-zero size",
                    self.id, layer.id
                ));
            }
        }
        Ok(())
    }
}

/// A rectangular region of a document exposed as a layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerConfig {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    /// `[x, y, width, height]` in document pixels
    pub bounds: [u32; 4],
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    59596
}

fn default_domain() -> String {
    "assetport".to_string()
}

fn default_format() -> String {
    "png".to_string()
}

fn default_asset_dir_suffix() -> String {
    "-assets".to_string()
}

fn default_max_dimension() -> u32 {
    16_384
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
