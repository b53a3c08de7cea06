//! Newline-delimited JSON-RPC over stdin/stdout.
//!
//! Each request is served on its own task so a slow wallet call never
//! blocks other calls arriving on stdin; only the stdout writes are
//! serialized, through a single channel-fed writer.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

use crate::mcp::protocol::{error_codes, JsonRpcRequest, JsonRpcResponse};
use crate::mcp::tools::ToolRegistry;

pub async fn run_loop(registry: Arc<ToolRegistry>) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let (tx, mut rx) = mpsc::channel::<String>(64);

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(line) = rx.recv().await {
            if stdout.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            if stdout.write_all(b"\n").await.is_err() {
                break;
            }
            if stdout.flush().await.is_err() {
                break;
            }
        }
    });

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        let registry = Arc::clone(&registry);
        let tx = tx.clone();
        tokio::spawn(async move {
            let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(req) => crate::mcp::handle_request(&registry, req).await,
                Err(_) => Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    "Parse error",
                )),
            };
            if let Some(resp) = response {
                match serde_json::to_string(&resp) {
                    Ok(text) => {
                        let _ = tx.send(text).await;
                    }
                    Err(e) => warn!("Failed to serialize response: {}", e),
                }
            }
        });
    }

    // Pending request tasks hold their own senders; the writer drains them
    // before shutting down.
    drop(tx);
    let _ = writer.await;
    Ok(())
}
