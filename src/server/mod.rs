//! Websocket command server
//!
//! Accepts websocket connections from the host and answers command requests
//! for one domain (`export`, `promptForFolder`). See [`protocol`] for the
//! message format.
//!
//! Each connection runs on its own task. Requests on one connection are
//! handled one at a time, in arrival order.

pub mod handler;
pub mod protocol;

pub use handler::{folder_prompt_script, WebHandler, MAX_REQUESTED_DIMENSION, MAX_SCALE};
pub use protocol::{Command, CommandReply, CommandRequest, ExportPayload, FolderPayload};

use crate::config::ServerConfig;
use crate::domain::{AssetportError, Result};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;

/// Binds the configured address and serves until shutdown
pub async fn run_server(
    config: &ServerConfig,
    handler: Arc<WebHandler>,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let listener = bind(&config.bind_address()).await?;
    serve(listener, handler, shutdown).await
}

/// Binds a listener for the command server
pub async fn bind(address: &str) -> Result<TcpListener> {
    TcpListener::bind(address).await.map_err(|e| {
        AssetportError::Configuration(format!("Failed to bind to {address}: {e}"))
    })
}

/// Accepts connections on `listener` until `shutdown` turns true
pub async fn serve(
    listener: TcpListener,
    handler: Arc<WebHandler>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let local_addr = listener.local_addr()?;
    tracing::info!(
        address = %local_addr,
        domain = handler.domain(),
        "Websocket server listening"
    );

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        tracing::debug!(peer = %peer_addr, "New connection");
                        tokio::spawn(handle_connection(
                            stream,
                            peer_addr,
                            handler.clone(),
                            shutdown.clone(),
                        ));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Accept error");
                    }
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    tracing::info!("Websocket server stopped");
    Ok(())
}

async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    handler: Arc<WebHandler>,
    mut shutdown: watch::Receiver<bool>,
) {
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            tracing::warn!(peer = %peer_addr, error = %e, "Websocket handshake failed");
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            msg_opt = read.next() => {
                match msg_opt {
                    Some(Ok(msg)) => {
                        if let Some(reply) = process_message(&handler, msg).await {
                            if let Err(e) = write.send(Message::Text(reply)).await {
                                tracing::warn!(peer = %peer_addr, error = %e, "Send error");
                                break;
                            }
                        }
                    }
                    Some(Err(e)) => {
                        tracing::warn!(peer = %peer_addr, error = %e, "Receive error");
                        break;
                    }
                    None => break,
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    let _ = write.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    }

    tracing::debug!(peer = %peer_addr, "Connection closed");
}

/// Turns one websocket message into a serialized reply, if it needs one
async fn process_message(handler: &WebHandler, msg: Message) -> Option<String> {
    match msg {
        Message::Text(text) => Some(handler.handle_text(&text).await),
        Message::Binary(data) => match String::from_utf8(data) {
            Ok(text) => Some(handler.handle_text(&text).await),
            Err(_) => Some(
                CommandReply::error(0, "Binary message must be valid UTF-8 JSON").to_json(),
            ),
        },
        Message::Ping(_) | Message::Pong(_) | Message::Close(_) | Message::Frame(_) => None,
    }
}
