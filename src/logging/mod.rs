//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use assetport::logging::init_logging;
//! use assetport::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a component export
///
/// # Example
///
/// ```no_run
/// use assetport::log_export_start;
/// use assetport::domain::ids::DocumentId;
///
/// let document_id = DocumentId::new(3);
/// log_export_start!(document_id, "hero.png");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($document_id:expr, $file_name:expr) => {
        tracing::info!(
            document_id = %$document_id,
            file_name = %$file_name,
            "Starting export"
        );
    };
}

/// Log the completion of a component export
///
/// # Example
///
/// ```no_run
/// use assetport::log_export_complete;
/// use assetport::domain::ids::DocumentId;
/// use std::path::PathBuf;
///
/// let path = PathBuf::from("/art/poster-assets/hero.png");
/// log_export_complete!(DocumentId::new(3), path);
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($document_id:expr, $path:expr) => {
        tracing::info!(
            document_id = %$document_id,
            path = %$path.display(),
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use assetport::log_error_with_context;
/// use assetport::domain::AssetportError;
///
/// let error = AssetportError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
