//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Assetport configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading validates as well
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Listen Address: ws://{}", config.server.bind_address());
        println!("  Domain: {}", config.server.domain);
        println!("  Default Format: {}", config.export.default_format);
        println!("  Reveal Folder: {}", config.export.reveal_folder);
        println!("  Asset Folder Suffix: {}", config.export.asset_dir_suffix);
        println!("  Documents: {}", config.host.documents.len());
        for document in &config.host.documents {
            println!(
                "    - {} {} ({} layers)",
                document.id,
                document.path,
                document.layers.len()
            );
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[server]\nport = 60001\n").unwrap();

        let code = ValidateArgs {}
            .execute(&file.path().to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[application]\nlog_level = \"loud\"\n").unwrap();

        let code = ValidateArgs {}
            .execute(&file.path().to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
