//! In-process stand-in for the Node.js side of the bridge.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::bridge::{PlaywrightBridge, PlaywrightBridgeConfig};

/// What the fake peer does with one request.
pub enum Reply {
    Result(Value),
    Error(&'static str, &'static str),
    After(Duration, Value),
    Ignore,
    HangUp,
}

pub type Requests = Arc<Mutex<Vec<(String, Value)>>>;

/// Attach a bridge to a fake peer answering with `handler`.
pub async fn fake_bridge<F>(config: PlaywrightBridgeConfig, handler: F) -> (Arc<PlaywrightBridge>, Requests)
where
    F: Fn(&str, &Value) -> Reply + Send + 'static,
{
    let bridge = Arc::new(PlaywrightBridge::new(config));
    let requests: Requests = Arc::default();

    let (client, server) = tokio::io::duplex(64 * 1024);
    let (client_read, client_write) = tokio::io::split(client);
    let (server_read, server_write) = tokio::io::split(server);
    bridge.attach(client_read, client_write).await;

    let seen = requests.clone();
    tokio::spawn(async move {
        let writer = Arc::new(tokio::sync::Mutex::new(server_write));
        let mut lines = BufReader::new(server_read).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let request: Value = serde_json::from_str(&line).unwrap();
            let id = request["id"].clone();
            let method = request["method"].as_str().unwrap_or_default().to_string();
            let params = request["params"].clone();
            seen.lock().push((method.clone(), params.clone()));

            let (delay, response) = match handler(&method, &params) {
                Reply::Result(result) => (Duration::ZERO, json!({ "id": id, "result": result })),
                Reply::After(delay, result) => (delay, json!({ "id": id, "result": result })),
                Reply::Error(kind, message) => (
                    Duration::ZERO,
                    json!({ "id": id, "error": { "message": message, "kind": kind } }),
                ),
                Reply::Ignore => continue,
                Reply::HangUp => break,
            };

            let writer = writer.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let mut writer = writer.lock().await;
                writer
                    .write_all(format!("{}\n", response).as_bytes())
                    .await
                    .unwrap();
            });
        }
    });

    (bridge, requests)
}
