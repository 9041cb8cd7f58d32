//! Node.js Playwright bridge.
//!
//! Manages a Node.js child process running the embedded bridge script.
//! Communication is line-delimited JSON-RPC over stdin/stdout; responses are
//! matched to requests by id, so calls may be issued concurrently.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{Mutex, RwLock, oneshot};
use tracing::{debug, error, info, warn};

use super::bridge_script::write_bridge_script;
use super::error::PlaywrightError;

/// Bridge configuration.
#[derive(Debug, Clone)]
pub struct PlaywrightBridgeConfig {
    /// Path to Node.js executable.
    pub node_path: Option<PathBuf>,
    /// Custom bridge script; the embedded one is used if None.
    pub bridge_script_path: Option<PathBuf>,
    /// Timeout for bridge responses in milliseconds.
    pub response_timeout_ms: u64,
}

impl Default for PlaywrightBridgeConfig {
    fn default() -> Self {
        Self {
            node_path: None,
            bridge_script_path: None,
            response_timeout_ms: 60_000,
        }
    }
}

/// Request sent to the bridge.
#[derive(Debug, Serialize)]
struct BridgeRequest<'a> {
    id: u64,
    method: &'a str,
    params: Value,
}

/// Response from the bridge.
#[derive(Debug, Deserialize)]
struct BridgeResponse {
    id: u64,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<BridgeErrorResponse>,
}

#[derive(Debug, Deserialize)]
struct BridgeErrorResponse {
    message: String,
    #[serde(default)]
    kind: Option<String>,
}

type PendingRequests = HashMap<u64, oneshot::Sender<Result<Value, PlaywrightError>>>;
type BridgeWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Node.js Playwright bridge.
pub struct PlaywrightBridge {
    config: PlaywrightBridgeConfig,
    process: Mutex<Option<Child>>,
    stdin: Mutex<Option<BridgeWriter>>,
    request_id: AtomicU64,
    pending_requests: Arc<RwLock<PendingRequests>>,
}

impl PlaywrightBridge {
    /// Create a new, unstarted bridge.
    pub fn new(config: PlaywrightBridgeConfig) -> Self {
        Self {
            config,
            process: Mutex::new(None),
            stdin: Mutex::new(None),
            request_id: AtomicU64::new(1),
            pending_requests: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &PlaywrightBridgeConfig {
        &self.config
    }

    /// Spawn the bridge process and wait for it to answer a ping.
    pub async fn start(&self) -> Result<(), PlaywrightError> {
        let node_path = self.find_node()?;

        let script_path = match &self.config.bridge_script_path {
            Some(path) => path.clone(),
            None => write_bridge_script(&std::env::temp_dir()).await.map_err(|e| {
                PlaywrightError::BridgeStartFailed(format!("Failed to write bridge script: {}", e))
            })?,
        };

        info!("Starting Playwright bridge at {:?}", script_path);

        let mut child = Command::new(&node_path)
            .arg(&script_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PlaywrightError::BridgeStartFailed(e.to_string()))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| PlaywrightError::BridgeStartFailed("Failed to get stdin".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| PlaywrightError::BridgeStartFailed("Failed to get stdout".to_string()))?;

        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    warn!("[Playwright Bridge] {}", line);
                }
            });
        }

        *self.process.lock().await = Some(child);
        self.attach(stdout, stdin).await;

        let ready = self.call("ping", serde_json::json!({})).await?;
        if ready.as_str() != Some("pong") {
            return Err(PlaywrightError::BridgeStartFailed(
                "Bridge did not respond correctly to ping".to_string(),
            ));
        }

        info!("Playwright bridge started successfully");
        Ok(())
    }

    /// Wire the bridge to an already running peer.
    ///
    /// Spawns the response reader. When `reader` reaches end of input every
    /// outstanding call fails with [`PlaywrightError::BridgeDied`].
    pub async fn attach<R, W>(&self, reader: R, writer: W)
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let pending = self.pending_requests.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(reader).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if line.trim().is_empty() {
                    continue;
                }
                debug!("Bridge response: {}", truncate(&line));

                match serde_json::from_str::<BridgeResponse>(&line) {
                    Ok(response) => {
                        let sender = pending.write().await.remove(&response.id);
                        if let Some(sender) = sender {
                            let result = match response.error {
                                Some(err) => Err(PlaywrightError::remote(err.kind, err.message)),
                                None => Ok(response.result.unwrap_or(Value::Null)),
                            };
                            let _ = sender.send(result);
                        }
                    }
                    Err(e) => {
                        error!("Failed to parse bridge response: {} - {}", e, line);
                    }
                }
            }

            for (_, sender) in pending.write().await.drain() {
                let _ = sender.send(Err(PlaywrightError::BridgeDied(
                    "bridge closed its output".to_string(),
                )));
            }
        });

        *self.stdin.lock().await = Some(Box::new(writer));
    }

    /// Ask the bridge to shut down, then kill the process.
    pub async fn stop(&self) -> Result<(), PlaywrightError> {
        let _ = self
            .call_with_timeout("shutdown", serde_json::json!({}), Duration::from_secs(5))
            .await;
        self.stdin.lock().await.take();

        if let Some(mut child) = self.process.lock().await.take() {
            let _ = child.kill().await;
        }

        info!("Playwright bridge stopped");
        Ok(())
    }

    /// Call a bridge method with the configured response timeout.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, PlaywrightError> {
        let timeout = Duration::from_millis(self.config.response_timeout_ms);
        self.call_with_timeout(method, params, timeout).await
    }

    /// Call a bridge method, giving up after `timeout`.
    pub async fn call_with_timeout(
        &self,
        method: &str,
        params: Value,
        timeout: Duration,
    ) -> Result<Value, PlaywrightError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request_json = serde_json::to_string(&BridgeRequest { id, method, params })?;

        debug!("Bridge request: {}", truncate(&request_json));

        let (tx, rx) = oneshot::channel();
        self.pending_requests.write().await.insert(id, tx);

        let sent = async {
            let mut stdin_guard = self.stdin.lock().await;
            let stdin = stdin_guard.as_mut().ok_or(PlaywrightError::NotInitialized)?;
            stdin.write_all(request_json.as_bytes()).await?;
            stdin.write_all(b"\n").await?;
            stdin.flush().await?;
            Ok::<(), PlaywrightError>(())
        }
        .await;
        if let Err(e) = sent {
            self.pending_requests.write().await.remove(&id);
            return Err(e);
        }

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(PlaywrightError::CommunicationError(
                "Response channel closed".to_string(),
            )),
            Err(_) => {
                self.pending_requests.write().await.remove(&id);
                Err(PlaywrightError::Timeout(format!(
                    "Method {} timed out after {}ms",
                    method,
                    timeout.as_millis()
                )))
            }
        }
    }

    // ============================================================================
    // Internal
    // ============================================================================

    /// Find Node.js executable.
    fn find_node(&self) -> Result<PathBuf, PlaywrightError> {
        if let Some(ref path) = self.config.node_path {
            return Ok(path.clone());
        }

        let candidates = [
            "node",
            "/usr/local/bin/node",
            "/usr/bin/node",
            "/opt/homebrew/bin/node",
        ];

        candidates
            .into_iter()
            .find_map(|candidate| which::which(candidate).ok())
            .ok_or(PlaywrightError::NodeNotFound)
    }
}

fn truncate(line: &str) -> &str {
    match line.char_indices().nth(200) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
