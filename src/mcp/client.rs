//! Minimal MCP clients over stdio and HTTP.

use super::protocol::{JsonRpcRequest, JsonRpcResponse, ServerToolInfo, ToolsListResult};
use crate::error::{BylineError, Result};
use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::debug;

/// Client for an MCP server spawned as a subprocess (JSON-RPC over stdio).
pub struct StdioServerClient {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    timeout: Duration,
    next_id: u64,
}

impl StdioServerClient {
    /// Spawn the server process and run the initialize handshake.
    pub async fn connect(
        command: &str,
        args: &[String],
        envs: &HashMap<String, String>,
        timeout: Duration,
    ) -> Result<Self> {
        let mut child = Command::new(command)
            .args(args)
            .envs(envs)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BylineError::Mcp(format!("failed to spawn {}: {}", command, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BylineError::Mcp("server stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BylineError::Mcp("server stdout unavailable".to_string()))?;

        let mut client = Self {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            timeout,
            next_id: 0,
        };

        let id = client.next_id();
        client
            .roundtrip(JsonRpcRequest::initialize(id))
            .await?
            .into_result()
            .map_err(BylineError::Mcp)?;
        client
            .send(JsonRpcRequest::notification("notifications/initialized"))
            .await?;

        Ok(client)
    }

    /// Fetch the tools the server advertises.
    pub async fn list_tools(&mut self) -> Result<Vec<ServerToolInfo>> {
        let id = self.next_id();
        let result = self
            .roundtrip(JsonRpcRequest::tools_list(id))
            .await?
            .into_result()
            .map_err(BylineError::Mcp)?;
        let parsed: ToolsListResult = serde_json::from_value(result)?;
        Ok(parsed.tools)
    }

    /// Terminate the server process.
    pub async fn shutdown(mut self) {
        let _ = self.child.kill().await;
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    async fn send(&mut self, request: JsonRpcRequest) -> Result<()> {
        let line = serde_json::to_string(&request)?;
        debug!("mcp stdio -> {}", line);
        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    async fn roundtrip(&mut self, request: JsonRpcRequest) -> Result<JsonRpcResponse> {
        self.send(request).await?;

        // Skip notifications the server may emit before the reply.
        loop {
            let line = tokio::time::timeout(self.timeout, self.stdout.next_line())
                .await
                .map_err(|_| BylineError::Mcp("timed out waiting for server reply".to_string()))??
                .ok_or_else(|| BylineError::Mcp("server closed its stdout".to_string()))?;

            debug!("mcp stdio <- {}", line);
            let response: JsonRpcResponse = match serde_json::from_str(&line) {
                Ok(response) => response,
                Err(_) => continue,
            };
            if response.id.is_some() {
                return Ok(response);
            }
        }
    }
}

/// Client for a hosted MCP server reachable over HTTP.
pub struct HttpServerClient {
    url: String,
    auth_token: Option<String>,
    http: reqwest::Client,
    next_id: u64,
}

impl HttpServerClient {
    /// Build a client for the given endpoint; the URL is validated up front.
    pub fn new(url: &str, auth_token: Option<String>, timeout: Duration) -> Result<Self> {
        url::Url::parse(url)
            .map_err(|e| BylineError::Mcp(format!("invalid server URL {}: {}", url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BylineError::Mcp(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.to_string(),
            auth_token,
            http,
            next_id: 0,
        })
    }

    /// Run the initialize handshake.
    pub async fn initialize(&mut self) -> Result<()> {
        let id = self.next_id();
        self.roundtrip(JsonRpcRequest::initialize(id))
            .await?
            .into_result()
            .map_err(BylineError::Mcp)?;
        Ok(())
    }

    /// Fetch the tools the server advertises.
    pub async fn list_tools(&mut self) -> Result<Vec<ServerToolInfo>> {
        let id = self.next_id();
        let result = self
            .roundtrip(JsonRpcRequest::tools_list(id))
            .await?
            .into_result()
            .map_err(BylineError::Mcp)?;
        let parsed: ToolsListResult = serde_json::from_value(result)?;
        Ok(parsed.tools)
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    async fn roundtrip(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse> {
        let mut builder = self
            .http
            .post(&self.url)
            .header("Accept", "application/json")
            .json(&request);
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_rejects_bad_url() {
        let err = HttpServerClient::new("not a url", None, Duration::from_secs(5));
        assert!(matches!(err, Err(BylineError::Mcp(_))));
    }

    #[tokio::test]
    async fn test_stdio_connect_reports_missing_command() {
        let err = StdioServerClient::connect(
            "definitely-not-a-real-binary-9f2c",
            &[],
            &HashMap::new(),
            Duration::from_secs(1),
        )
        .await;
        assert!(matches!(err, Err(BylineError::Mcp(_))));
    }
}
