//! Serve command implementation
//!
//! Runs the websocket command server until a shutdown signal arrives.

use crate::adapters::create_local_host;
use crate::config::load_config_or_default;
use crate::server::{run_server, WebHandler};
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Override the port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        let host = match create_local_host(&config) {
            Ok(h) => h,
            Err(e) => {
                eprintln!("Failed to initialize host: {e}");
                return Ok(2);
            }
        };

        let handler = Arc::new(WebHandler::new(
            config.server.domain.clone(),
            config.export.default_format.clone(),
            host.exporter,
            host.scripts,
        ));

        println!(
            "🌐 Listening on ws://{} (domain '{}')",
            config.server.bind_address(),
            config.server.domain
        );
        println!("Press Ctrl+C to shutdown");

        match run_server(&config.server, handler, shutdown_signal).await {
            Ok(()) => {
                println!("✅ Server stopped");
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Server failed");
                eprintln!("Server failed: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}
