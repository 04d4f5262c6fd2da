//! Request translation for the command domain
//!
//! Turns protocol payloads into component descriptions and folder prompts,
//! applying defaults and sanitizing names, then hands them to the export
//! pipeline or the script host.

use super::protocol::{Command, CommandReply, CommandRequest, ExportPayload, FolderPayload};
use crate::adapters::host::ScriptHost;
use crate::core::export::BatchExporter;
use crate::core::naming::{escape_js_string, sanitize_filename};
use crate::domain::component::{ComponentBuilder, ComponentDescription};
use crate::domain::{AssetportError, Result};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

/// Largest accepted `scale`
pub const MAX_SCALE: f64 = 100.0;

/// Largest accepted `width` or `height`
pub const MAX_REQUESTED_DIMENSION: u32 = 100_000;

/// Handles the commands of one domain
pub struct WebHandler {
    domain: String,
    default_format: String,
    exporter: Arc<BatchExporter>,
    scripts: Arc<dyn ScriptHost>,
}

impl WebHandler {
    pub fn new(
        domain: impl Into<String>,
        default_format: impl Into<String>,
        exporter: Arc<BatchExporter>,
        scripts: Arc<dyn ScriptHost>,
    ) -> Self {
        Self {
            domain: domain.into(),
            default_format: default_format.into(),
            exporter,
            scripts,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Builds the component description for an `export` payload
    ///
    /// - `format` falls back to the default format, loses a leading `.` and
    ///   is lowercased
    /// - the file name is `fileName.format`, sanitized
    /// - `scale` is 1 when absent or zero
    /// - `quality` is only carried when given and non-zero
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing or unusable file name, for
    /// a scale outside `(0, MAX_SCALE]`, for a quality that is not a whole
    /// number up to 100 and for a zero or oversized width or height.
    pub fn component_from_payload(&self, payload: ExportPayload) -> Result<ComponentDescription> {
        let format = payload
            .format
            .as_deref()
            .map(|f| f.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| self.default_format.to_ascii_lowercase());

        let requested = payload
            .file_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AssetportError::Validation("fileName is required".to_string()))?;

        let file_name = sanitize_filename(&format!("{requested}.{format}"));
        if file_name.is_empty() {
            return Err(AssetportError::Validation(format!(
                "fileName '{requested}' is not a usable file name"
            )));
        }

        let scale = match payload.scale {
            None => 1.0,
            Some(s) if s == 0.0 => 1.0,
            Some(s) if s.is_finite() && s > 0.0 && s <= MAX_SCALE => s,
            Some(s) => {
                return Err(AssetportError::Validation(format!(
                    "scale must be a positive number up to {MAX_SCALE}, got {s}"
                )))
            }
        };
        let quality = payload.quality.map(quality_percent).transpose()?.flatten();
        let width = payload.width.map(|w| checked_dimension("width", w)).transpose()?;
        let height = payload.height.map(|h| checked_dimension("height", h)).transpose()?;

        let mut builder = ComponentBuilder::new()
            .extension(format)
            .file_name(file_name)
            .scale(scale);
        if let Some(id) = payload.document_id {
            builder = builder.document_id(id);
        }
        if let Some(id) = payload.layer_id {
            builder = builder.layer_id(id);
        }
        if let Some(base_dir) = payload.base_dir.filter(|d| !d.is_empty()) {
            builder = builder.base_dir(base_dir);
        }
        if let Some(quality) = quality {
            builder = builder.quality(quality);
        }
        if let Some(width) = width {
            builder = builder.width(width);
        }
        if let Some(height) = height {
            builder = builder.height(height);
        }

        builder.build().map_err(AssetportError::Validation)
    }

    /// Exports the component an `export` payload describes
    ///
    /// Resolves with the final paths of the exported files.
    pub async fn export(&self, payload: ExportPayload) -> Result<Vec<PathBuf>> {
        let component = self.component_from_payload(payload)?;

        tracing::info!(
            component = %serde_json::to_string(&component)?,
            "Extracting component"
        );

        let batch = self.exporter.export_one_batch(component).await?;
        let paths = batch.paths();

        tracing::info!(
            batch_id = %batch.batch_id,
            paths = ?paths,
            "Component extracted"
        );

        Ok(paths)
    }

    /// Asks the host to show a folder picker
    ///
    /// # Errors
    ///
    /// [`AssetportError::UserCancelled`] when the dialog was dismissed, or the
    /// script host's own error.
    pub async fn prompt_for_folder(&self, payload: FolderPayload) -> Result<String> {
        let script = folder_prompt_script(payload.folder_path.as_deref().unwrap_or("/"));
        let selected = self.scripts.evaluate_jsx(&script).await?;

        if selected.is_empty() {
            return Err(AssetportError::UserCancelled);
        }
        Ok(selected)
    }

    /// Runs one request and produces its reply
    pub async fn dispatch(&self, request: CommandRequest) -> CommandReply {
        let id = request.id;

        if request.domain != self.domain {
            return CommandReply::error(id, format!("Unknown domain '{}'", request.domain));
        }

        let outcome = match Command::from_request(&request) {
            Ok(Command::Export(payload)) => self.export(payload).await.map(|paths| {
                Value::from(
                    paths
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>(),
                )
            }),
            Ok(Command::PromptForFolder(payload)) => {
                self.prompt_for_folder(payload).await.map(Value::from)
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(response) => CommandReply::CommandResponse { id, response },
            Err(e) => {
                if !matches!(e, AssetportError::UserCancelled) {
                    crate::log_error_with_context!(&e, request.command.as_str());
                }
                CommandReply::error(id, e.to_string())
            }
        }
    }

    /// Handles one raw text frame and returns the serialized reply
    pub async fn handle_text(&self, text: &str) -> String {
        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                return CommandReply::error(0, format!("Invalid request JSON: {e}")).to_json()
            }
        };
        let id = value.get("id").and_then(Value::as_u64).unwrap_or(0);

        let request: CommandRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => return CommandReply::error(id, format!("Invalid request: {e}")).to_json(),
        };

        tracing::debug!(id, command = %request.command, "Handling command");
        self.dispatch(request).await.to_json()
    }
}

/// JSX that opens a folder picker at `initial` and yields the chosen path or `""`
pub fn folder_prompt_script(initial: &str) -> String {
    format!(
        "var folderObj = Folder(\"{}\").selectDlg(); folderObj ? folderObj.fsName : \"\"",
        escape_js_string(initial)
    )
}

/// Whole-number quality in `1..=100`; zero means unset
fn quality_percent(quality: f64) -> Result<Option<u8>> {
    if quality == 0.0 {
        return Ok(None);
    }
    if !(quality.fract() == 0.0 && (1.0..=100.0).contains(&quality)) {
        return Err(AssetportError::Validation(format!(
            "quality must be a whole number between 1 and 100, got {quality}"
        )));
    }
    Ok(Some(quality as u8))
}

fn checked_dimension(name: &str, value: u32) -> Result<u32> {
    if value == 0 || value > MAX_REQUESTED_DIMENSION {
        return Err(AssetportError::Validation(format!(
            "{name} must be between 1 and {MAX_REQUESTED_DIMENSION}, got {value}"
        )));
    }
    Ok(value)
}
