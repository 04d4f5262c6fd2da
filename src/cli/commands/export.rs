//! Export command implementation
//!
//! This module implements the `export` command, a one-shot export of a
//! single component of a configured document.

use crate::adapters::create_local_host;
use crate::config::load_config;
use crate::server::{ExportPayload, WebHandler};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file name without extension
    #[arg(long)]
    pub file_name: String,

    /// Document id (default: the active document)
    #[arg(short, long)]
    pub document: Option<i64>,

    /// Layer id (default: the whole document)
    #[arg(short = 'L', long)]
    pub layer: Option<i64>,

    /// Output format: png, jpg or svg
    #[arg(short, long)]
    pub format: Option<String>,

    /// Scale factor
    #[arg(short, long)]
    pub scale: Option<f64>,

    /// Output quality (JPEG 1-100)
    #[arg(short, long)]
    pub quality: Option<u8>,

    /// Output width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Output folder (default: the document's asset folder)
    #[arg(short, long)]
    pub base_dir: Option<String>,

    /// Do not open the output folder afterwards
    #[arg(long)]
    pub no_reveal: bool,
}

impl ExportArgs {
    fn payload(&self) -> ExportPayload {
        ExportPayload {
            document_id: self.document,
            layer_id: self.layer,
            scale: self.scale,
            format: self.format.clone(),
            file_name: Some(self.file_name.clone()),
            base_dir: self.base_dir.clone(),
            quality: self.quality.map(f64::from),
            width: self.width,
            height: self.height,
        }
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if self.no_reveal {
            tracing::info!("Disabling folder reveal from CLI");
            config.export.reveal_folder = false;
        }

        let host = match create_local_host(&config) {
            Ok(h) => h,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create local host");
                eprintln!("Failed to initialize export: {e}");
                return Ok(2);
            }
        };

        let handler = WebHandler::new(
            config.server.domain.clone(),
            config.export.default_format.clone(),
            host.exporter,
            host.scripts,
        );

        println!("🚀 Starting export...");
        println!();

        match handler.export(self.payload()).await {
            Ok(paths) => {
                for path in &paths {
                    println!("  {}", path.display());
                }
                println!();
                println!("✅ Export completed successfully!");
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("❌ Export failed: {e}");
                Ok(1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_from_args() {
        let args = ExportArgs {
            file_name: "hero".to_string(),
            document: Some(1),
            layer: None,
            format: Some("jpg".to_string()),
            scale: Some(2.0),
            quality: None,
            width: None,
            height: None,
            base_dir: None,
            no_reveal: true,
        };

        let payload = args.payload();
        assert_eq!(payload.file_name.as_deref(), Some("hero"));
        assert_eq!(payload.document_id, Some(1));
        assert_eq!(payload.format.as_deref(), Some("jpg"));
        assert_eq!(payload.scale, Some(2.0));
        assert!(payload.quality.is_none());
    }

    #[tokio::test]
    async fn test_missing_config_is_configuration_error() {
        let args = ExportArgs {
            file_name: "hero".to_string(),
            document: None,
            layer: None,
            format: None,
            scale: None,
            quality: None,
            width: None,
            height: None,
            base_dir: None,
            no_reveal: true,
        };

        let code = args.execute("definitely-missing-assetport.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
