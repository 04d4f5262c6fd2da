//! Integration tests for the websocket command protocol
//!
//! These tests verify that:
//! - Well-formed calls produce a `commandResponse` with the request id
//! - Unknown commands, unknown domains and malformed JSON produce `commandError`
//! - The server answers over a real websocket and stops on shutdown

use assetport::adapters::create_exporter;
use assetport::adapters::host::{
    BoundComponent, Document, FileMover, FolderRevealer, RenderKind, RenderedFile, Renderer,
    RendererFactory, ScriptHost,
};
use assetport::adapters::local::{LocalDocument, LocalDocumentProvider};
use assetport::config::ExportConfig;
use assetport::domain::Result;
use assetport::server::{bind, serve, CommandReply, WebHandler};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;

struct TempRenderer;

#[async_trait]
impl Renderer for TempRenderer {
    async fn render(&self, component: &BoundComponent) -> Result<RenderedFile> {
        Ok(RenderedFile {
            path: PathBuf::from("/tmp").join(component.description().file_name()),
        })
    }
}

struct TempRenderers;

impl RendererFactory for TempRenderers {
    fn create(&self, _kind: RenderKind, _document: Arc<dyn Document>) -> Box<dyn Renderer> {
        Box::new(TempRenderer)
    }
}

struct EchoMover;

#[async_trait]
impl FileMover for EchoMover {
    async fn move_file_into(
        &self,
        _temp: &Path,
        base_dir: &Path,
        file_name: &str,
    ) -> Result<PathBuf> {
        Ok(base_dir.join(file_name))
    }

    async fn move_file_absolute(&self, _temp: &Path, dest: &Path) -> Result<PathBuf> {
        Ok(dest.to_path_buf())
    }
}

struct SilentRevealer;

impl FolderRevealer for SilentRevealer {
    fn reveal(&self, _folder: &Path) {}
}

struct FixedFolder(&'static str);

#[async_trait]
impl ScriptHost for FixedFolder {
    async fn evaluate_jsx(&self, _script: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

fn handler() -> Arc<WebHandler> {
    let provider = Arc::new(LocalDocumentProvider::new(
        vec![Arc::new(LocalDocument::new(
            1,
            "poster.psd",
            Some(PathBuf::from("/art/poster.psd")),
            vec![],
        ))],
        None,
    ));
    let exporter = create_exporter(
        provider,
        Arc::new(TempRenderers),
        Arc::new(EchoMover),
        Arc::new(SilentRevealer),
        &ExportConfig::default(),
    );
    Arc::new(WebHandler::new(
        "assetport",
        "png",
        exporter,
        Arc::new(FixedFolder("/Users/me/Exports")),
    ))
}

fn parse(reply: &str) -> Value {
    serde_json::from_str(reply).unwrap()
}

#[tokio::test]
async fn test_export_call_returns_paths() {
    let request = json!({
        "id": 7,
        "domain": "assetport",
        "command": "export",
        "parameters": [{"documentID": 1, "fileName": "hero", "format": "jpg"}]
    });

    let reply = parse(&handler().handle_text(&request.to_string()).await);

    assert_eq!(
        reply,
        json!({
            "type": "commandResponse",
            "id": 7,
            "response": ["/art/poster-assets/hero.jpg"]
        })
    );
}

#[tokio::test]
async fn test_prompt_for_folder_call() {
    let request = json!({
        "id": 8,
        "domain": "assetport",
        "command": "promptForFolder",
        "parameters": [{"folderPath": "/Users/me"}]
    });

    let reply = parse(&handler().handle_text(&request.to_string()).await);

    assert_eq!(reply["type"], "commandResponse");
    assert_eq!(reply["response"], "/Users/me/Exports");
}

#[tokio::test]
async fn test_export_failure_is_command_error() {
    let request = json!({
        "id": 9,
        "domain": "assetport",
        "command": "export",
        "parameters": [{"documentID": 42, "fileName": "hero"}]
    });

    let reply = parse(&handler().handle_text(&request.to_string()).await);

    assert_eq!(
        reply,
        json!({
            "type": "commandError",
            "id": 9,
            "message": "Failed to export components: Document with id 42 not found."
        })
    );
}

#[tokio::test]
async fn test_out_of_range_quality_is_command_error() {
    let request = json!({
        "id": 10,
        "domain": "assetport",
        "command": "export",
        "parameters": [{"documentID": 1, "fileName": "hero", "format": "jpg", "quality": 300}]
    });

    let reply = parse(&handler().handle_text(&request.to_string()).await);

    assert_eq!(
        reply,
        json!({
            "type": "commandError",
            "id": 10,
            "message": "Validation error: quality must be a whole number between 1 and 100, got 300"
        })
    );
}

#[tokio::test]
async fn test_float_quality_on_the_wire() {
    let request = json!({
        "id": 12,
        "domain": "assetport",
        "command": "export",
        "parameters": [{"documentID": 1, "fileName": "hero", "format": "jpg", "quality": 80.0}]
    });

    let reply = parse(&handler().handle_text(&request.to_string()).await);

    assert_eq!(reply["type"], "commandResponse");
    assert_eq!(reply["response"], json!(["/art/poster-assets/hero.jpg"]));
}

#[tokio::test]
async fn test_unknown_command() {
    let request = json!({
        "id": 3,
        "domain": "assetport",
        "command": "explode",
        "parameters": []
    });

    let reply = parse(&handler().handle_text(&request.to_string()).await);

    assert_eq!(reply["type"], "commandError");
    assert_eq!(reply["id"], 3);
    assert!(reply["message"].as_str().unwrap().contains("explode"));
}

#[tokio::test]
async fn test_unknown_domain() {
    let request = json!({"id": 4, "domain": "other", "command": "export", "parameters": []});

    let reply = parse(&handler().handle_text(&request.to_string()).await);

    assert_eq!(reply["type"], "commandError");
    assert_eq!(reply["message"], "Unknown domain 'other'");
}

#[tokio::test]
async fn test_missing_export_payload() {
    let request = json!({"id": 5, "domain": "assetport", "command": "export"});

    let reply = parse(&handler().handle_text(&request.to_string()).await);

    assert_eq!(reply["type"], "commandError");
    assert_eq!(reply["id"], 5);
}

#[tokio::test]
async fn test_malformed_json() {
    let reply = parse(&handler().handle_text("{not json").await);

    assert_eq!(reply["type"], "commandError");
    assert_eq!(reply["id"], 0);
}

#[test]
fn test_reply_wire_format() {
    let reply = CommandReply::CommandResponse {
        id: 1,
        response: json!(["/a.png"]),
    };
    assert_eq!(
        reply.to_json(),
        r#"{"type":"commandResponse","id":1,"response":["/a.png"]}"#
    );
    assert_eq!(
        CommandReply::error(2, "cancel").to_json(),
        r#"{"type":"commandError","id":2,"message":"cancel"}"#
    );
}

#[tokio::test]
async fn test_websocket_round_trip_and_shutdown() {
    let listener = bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server = tokio::spawn(serve(listener, handler(), shutdown_rx));

    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .unwrap();

    let request = json!({
        "id": 11,
        "domain": "assetport",
        "command": "export",
        "parameters": [{"fileName": "icon", "format": "svg"}]
    });
    ws.send(Message::Text(request.to_string())).await.unwrap();

    let reply = loop {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => break parse(&text),
            Some(Ok(_)) => continue,
            other => panic!("unexpected websocket event: {other:?}"),
        }
    };
    assert_eq!(reply["id"], 11);
    assert_eq!(reply["response"], json!(["/art/poster-assets/icon.svg"]));

    shutdown_tx.send(true).unwrap();
    let stopped = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not stop");
    assert!(stopped.unwrap().is_ok());
}
