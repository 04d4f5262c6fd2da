//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "assetport.toml")]
    pub output: String,

    /// Include example documents and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Assetport configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Add the documents to serve under [[host.documents]]");
                println!("  2. Validate configuration: assetport validate-config");
                println!("  3. Start the server: assetport serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Assetport Configuration File

[application]
log_level = "info"

[server]
host = "127.0.0.1"
port = 59596
domain = "assetport"

[export]
default_format = "png"
reveal_folder = true
asset_dir_suffix = "-assets"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples
    fn generate_config_with_examples() -> String {
        r#"# Assetport Configuration File
#
# Environment variables can be referenced as ${VAR_NAME}. Any setting can
# also be overridden with ASSETPORT_<SECTION>_<KEY>, for example
# ASSETPORT_SERVER_PORT=60000.

[application]
# trace | debug | info | warn | error
log_level = "info"

[server]
host = "127.0.0.1"
port = 59596
# Command domain clients address in their requests
domain = "assetport"

[export]
# Format used when a request names none
default_format = "png"
# Open the output folder after the first successful export of a batch
reveal_folder = true
# poster.png exports land in poster-assets/ next to it
asset_dir_suffix = "-assets"
# Parent folder for assets of unsaved documents (default: desktop)
# unsaved_base_dir = "${HOME}/Exports"
# Folder for intermediate render output (default: system temp dir)
# temp_dir = "/tmp/assetport"
# Largest width or height of rendered output, in pixels
max_dimension = 16384

[host]
# Document reported as active (default: the first document)
active_document = 1

[[host.documents]]
id = 1
path = "./design/poster.png"
name = "Poster"

# Layers are named regions of the document image: [x, y, width, height]
[[host.documents.layers]]
id = 10
name = "headline"
bounds = [40, 40, 600, 120]

[[host.documents.layers]]
id = 11
name = "logo"
bounds = [20, 700, 128, 128]

[logging]
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;
    use tempfile::TempDir;

    #[test]
    fn test_generate_minimal_config() {
        let config = load_config_from_str(&InitArgs::generate_minimal_config()).unwrap();
        assert_eq!(config.server.port, 59596);
        assert!(config.host.documents.is_empty());
    }

    #[test]
    fn test_generate_config_with_examples() {
        let content = InitArgs::generate_config_with_examples();
        assert!(content.contains("# Assetport Configuration File"));

        let config = load_config_from_str(&content).unwrap();
        assert_eq!(config.host.active_document, Some(1));
        assert_eq!(config.host.documents[0].layers.len(), 2);
    }

    #[tokio::test]
    async fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("assetport.toml");
        fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing");
    }
}
