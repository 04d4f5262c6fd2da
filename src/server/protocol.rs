//! Command protocol message types
//!
//! ## Protocol
//!
//! Requests are JSON text frames addressed to a command domain:
//!
//! ```json
//! {"id": 7, "domain": "assetport", "command": "export", "parameters": [{"fileName": "hero"}]}
//! ```
//!
//! Every request gets exactly one reply carrying the same id:
//!
//! ```json
//! {"type": "commandResponse", "id": 7, "response": ["/art/poster-assets/hero.png"]}
//! {"type": "commandError", "id": 7, "message": "Document with id 3 not found."}
//! ```

use crate::domain::{AssetportError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A command call from the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub id: u64,
    pub domain: String,
    pub command: String,
    #[serde(default)]
    pub parameters: Vec<Value>,
}

/// Reply to one [`CommandRequest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CommandReply {
    CommandResponse { id: u64, response: Value },
    CommandError { id: u64, message: String },
}

impl CommandReply {
    pub fn error(id: u64, message: impl Into<String>) -> Self {
        CommandReply::CommandError {
            id,
            message: message.into(),
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            CommandReply::CommandResponse { id, .. } | CommandReply::CommandError { id, .. } => *id,
        }
    }

    /// Serializes the reply for the wire
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"type":"commandError","id":{},"message":"Failed to serialize response: {}"}}"#,
                self.id(),
                e.to_string().replace(['"', '\\'], "'")
            )
        })
    }
}

/// Payload of the `export` command
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    #[serde(rename = "documentID", default)]
    pub document_id: Option<i64>,

    #[serde(rename = "layerID", default)]
    pub layer_id: Option<i64>,

    #[serde(default)]
    pub scale: Option<f64>,

    /// Output format, `png` when absent
    #[serde(default)]
    pub format: Option<String>,

    /// Desired file name without extension
    #[serde(default)]
    pub file_name: Option<String>,

    /// Explicit output folder
    #[serde(default)]
    pub base_dir: Option<String>,

    /// Output quality, 1-100; zero means unset
    #[serde(default)]
    pub quality: Option<f64>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,
}

/// Payload of the `promptForFolder` command
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderPayload {
    /// Folder the dialog opens in, `/` when absent
    #[serde(default)]
    pub folder_path: Option<String>,
}

/// A decoded command with its payload
#[derive(Debug, Clone)]
pub enum Command {
    Export(ExportPayload),
    PromptForFolder(FolderPayload),
}

impl Command {
    /// Decodes a request's command name and first parameter
    ///
    /// # Errors
    ///
    /// Returns a protocol error for unknown commands, a missing payload or a
    /// payload of the wrong shape.
    pub fn from_request(request: &CommandRequest) -> Result<Self> {
        let payload = || {
            request.parameters.first().cloned().ok_or_else(|| {
                AssetportError::Protocol(format!(
                    "Command '{}' requires a payload",
                    request.command
                ))
            })
        };

        match request.command.as_str() {
            "export" => Ok(Command::Export(decode(payload()?, "export")?)),
            "promptForFolder" => {
                let payload = match request.parameters.first() {
                    Some(Value::Null) | None => FolderPayload::default(),
                    Some(value) => decode(value.clone(), "promptForFolder")?,
                };
                Ok(Command::PromptForFolder(payload))
            }
            other => Err(AssetportError::Protocol(format!(
                "Unknown command '{other}'"
            ))),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value, command: &str) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| AssetportError::Protocol(format!("Invalid {command} payload: {e}")))
}
