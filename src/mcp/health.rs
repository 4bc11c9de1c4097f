//! MCP tool-server health checks.
//!
//! Mirrors the doctor-style diagnostics: each configured server gets a
//! best-effort connection probe, and a missing credential is "not
//! configured" rather than a failure.

use super::client::{HttpServerClient, StdioServerClient};
use crate::config::Settings;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Connection status of one tool server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Failed,
    NotConfigured,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Failed => "failed",
            HealthStatus::NotConfigured => "not configured",
        };
        f.write_str(s)
    }
}

/// Result of a single server health check.
#[derive(Debug, Clone)]
pub struct HealthCheck {
    pub server_name: String,
    pub status: HealthStatus,
    pub response_time_ms: Option<f64>,
    pub error_message: Option<String>,
    pub tools_count: Option<usize>,
}

impl HealthCheck {
    fn not_configured(server_name: &str, message: &str) -> Self {
        Self {
            server_name: server_name.to_string(),
            status: HealthStatus::NotConfigured,
            response_time_ms: None,
            error_message: Some(message.to_string()),
            tools_count: None,
        }
    }

    fn failed(server_name: &str, message: String) -> Self {
        Self {
            server_name: server_name.to_string(),
            status: HealthStatus::Failed,
            response_time_ms: None,
            error_message: Some(message),
            tools_count: None,
        }
    }
}

/// Keys issued by the hosted search service carry this prefix; anything
/// else degrades the check rather than failing it.
fn search_key_shape_ok(key: &str) -> bool {
    key.starts_with("exa_")
}

/// Check the hosted search/crawl server.
///
/// Hosted MCP tools are invoked by the model provider, not by us, so
/// without a live call the best available probe is credential shape.
pub fn check_search_hosted() -> HealthCheck {
    let name = "exa-hosted";
    let api_key = match std::env::var("EXA_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => return HealthCheck::not_configured(name, "EXA_API_KEY not set"),
    };

    let start = Instant::now();
    if !search_key_shape_ok(&api_key) {
        return HealthCheck {
            server_name: name.to_string(),
            status: HealthStatus::Degraded,
            response_time_ms: Some(start.elapsed().as_secs_f64() * 1000.0),
            error_message: Some("API key format appears invalid".to_string()),
            tools_count: None,
        };
    }

    HealthCheck {
        server_name: name.to_string(),
        status: HealthStatus::Healthy,
        response_time_ms: Some(start.elapsed().as_secs_f64() * 1000.0),
        error_message: None,
        // web search + crawling are the tools the hosted server exposes
        tools_count: Some(2),
    }
}

/// Check the workspace server spawned over stdio.
pub async fn check_workspace_stdio(settings: &Settings) -> HealthCheck {
    let name = "notion-stdio";
    let token = match std::env::var("NOTION_TOKEN") {
        Ok(token) if !token.is_empty() => token,
        _ => return HealthCheck::not_configured(name, "NOTION_TOKEN not set"),
    };

    let timeout = Duration::from_secs(settings.mcp.health_timeout_seconds);
    let mut envs = HashMap::new();
    envs.insert("NOTION_TOKEN".to_string(), token);

    let start = Instant::now();
    let client = StdioServerClient::connect(
        &settings.mcp.workspace_command,
        &settings.mcp.workspace_args,
        &envs,
        timeout,
    )
    .await;

    match client {
        Ok(mut client) => {
            let result = client.list_tools().await;
            let elapsed = start.elapsed().as_secs_f64() * 1000.0;
            client.shutdown().await;

            match result {
                Ok(tools) => HealthCheck {
                    server_name: name.to_string(),
                    status: HealthStatus::Healthy,
                    response_time_ms: Some(elapsed),
                    error_message: None,
                    tools_count: Some(tools.len()),
                },
                Err(e) => HealthCheck::failed(name, e.to_string()),
            }
        }
        Err(e) => HealthCheck::failed(name, e.to_string()),
    }
}

/// Check the workspace server reachable over HTTP.
pub async fn check_workspace_http(settings: &Settings) -> HealthCheck {
    let name = "notion-http";
    let url = match std::env::var("NOTION_MCP_URL") {
        Ok(url) if !url.is_empty() => url,
        _ => return HealthCheck::not_configured(name, "NOTION_MCP_URL not set"),
    };
    let auth_token = std::env::var("NOTION_MCP_AUTH_TOKEN").ok().filter(|t| !t.is_empty());

    let timeout = Duration::from_secs(settings.mcp.health_timeout_seconds);
    let start = Instant::now();

    let mut client = match HttpServerClient::new(&url, auth_token, timeout) {
        Ok(client) => client,
        Err(e) => return HealthCheck::failed(name, e.to_string()),
    };

    if let Err(e) = client.initialize().await {
        return HealthCheck::failed(name, e.to_string());
    }

    match client.list_tools().await {
        Ok(tools) => HealthCheck {
            server_name: name.to_string(),
            status: HealthStatus::Healthy,
            response_time_ms: Some(start.elapsed().as_secs_f64() * 1000.0),
            error_message: None,
            tools_count: Some(tools.len()),
        },
        Err(e) => HealthCheck::failed(name, e.to_string()),
    }
}

/// Run health checks for all configured tool servers concurrently.
pub async fn run_all_health_checks(settings: &Settings) -> Vec<HealthCheck> {
    let (stdio, http) = futures::join!(
        check_workspace_stdio(settings),
        check_workspace_http(settings),
    );
    vec![check_search_hosted(), stdio, http]
}

/// Format health check results into a readable report.
pub fn format_health_report(checks: &[HealthCheck]) -> String {
    let mut report = vec!["=== MCP Health Check Report ===".to_string(), String::new()];

    let healthy = checks
        .iter()
        .filter(|c| c.status == HealthStatus::Healthy)
        .count();
    let configured = checks
        .iter()
        .filter(|c| c.status != HealthStatus::NotConfigured)
        .count();
    report.push(format!(
        "Overall Status: {}/{} servers healthy",
        healthy, configured
    ));
    report.push(String::new());

    for check in checks {
        let marker = match check.status {
            HealthStatus::Healthy => "[ok]",
            HealthStatus::Degraded => "[!!]",
            HealthStatus::Failed => "[xx]",
            HealthStatus::NotConfigured => "[--]",
        };
        report.push(format!("{} {}", marker, check.server_name));

        match check.status {
            HealthStatus::NotConfigured => {
                let reason = check.error_message.as_deref().unwrap_or("not configured");
                report.push(format!("   Status: Not configured ({})", reason));
            }
            HealthStatus::Healthy => {
                report.push("   Status: Healthy".to_string());
                if let Some(ms) = check.response_time_ms {
                    report.push(format!("   Response Time: {:.1}ms", ms));
                }
                if let Some(count) = check.tools_count {
                    report.push(format!("   Tools Available: {}", count));
                }
            }
            _ => {
                report.push(format!("   Status: {}", check.status));
                if let Some(message) = &check.error_message {
                    report.push(format!("   Error: {}", message));
                }
            }
        }
        report.push(String::new());
    }

    report.join("\n")
}

/// Actionable hints derived from health check results.
pub fn recommendations(checks: &[HealthCheck]) -> Vec<String> {
    let mut hints = Vec::new();

    for check in checks {
        match check.status {
            HealthStatus::NotConfigured => {
                if check.server_name == "exa-hosted" {
                    hints.push(
                        "Set EXA_API_KEY in .env to enable web search and crawling".to_string(),
                    );
                } else if check.server_name.contains("notion") {
                    hints.push(
                        "Set NOTION_TOKEN in .env to enable workspace integration".to_string(),
                    );
                }
            }
            HealthStatus::Failed => {
                if check.server_name == "notion-stdio" {
                    hints.push(
                        "Check that Node.js is installed and the workspace command works"
                            .to_string(),
                    );
                } else if check.server_name == "notion-http" {
                    hints.push(
                        "Verify NOTION_MCP_URL is reachable and the auth token is correct"
                            .to_string(),
                    );
                } else {
                    hints.push(format!(
                        "Investigate {} connection issues",
                        check.server_name
                    ));
                }
            }
            HealthStatus::Degraded => {
                hints.push(format!(
                    "Review {} configuration for potential issues",
                    check.server_name
                ));
            }
            HealthStatus::Healthy => {}
        }
    }

    if hints.is_empty() {
        hints.push("All configured MCP servers are healthy.".to_string());
    }

    hints.sort();
    hints.dedup();
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy(name: &str) -> HealthCheck {
        HealthCheck {
            server_name: name.to_string(),
            status: HealthStatus::Healthy,
            response_time_ms: Some(12.5),
            error_message: None,
            tools_count: Some(3),
        }
    }

    #[test]
    fn test_report_counts_configured_servers_only() {
        let checks = vec![
            healthy("exa-hosted"),
            HealthCheck::not_configured("notion-stdio", "NOTION_TOKEN not set"),
            HealthCheck::failed("notion-http", "connection refused".to_string()),
        ];
        let report = format_health_report(&checks);
        assert!(report.contains("Overall Status: 1/2 servers healthy"));
        assert!(report.contains("[--] notion-stdio"));
        assert!(report.contains("Error: connection refused"));
    }

    #[test]
    fn test_report_shows_tool_count_and_timing() {
        let report = format_health_report(&[healthy("notion-http")]);
        assert!(report.contains("Tools Available: 3"));
        assert!(report.contains("Response Time: 12.5ms"));
    }

    #[test]
    fn test_recommendations_for_missing_credentials() {
        let checks = vec![
            HealthCheck::not_configured("exa-hosted", "EXA_API_KEY not set"),
            HealthCheck::not_configured("notion-stdio", "NOTION_TOKEN not set"),
        ];
        let hints = recommendations(&checks);
        assert!(hints.iter().any(|h| h.contains("EXA_API_KEY")));
        assert!(hints.iter().any(|h| h.contains("NOTION_TOKEN")));
    }

    #[test]
    fn test_key_shape_degrades_unrecognized_prefixes() {
        assert!(search_key_shape_ok("exa_abc123"));
        assert!(!search_key_shape_ok("sk-looks-like-an-openai-key-1234567890"));
        assert!(!search_key_shape_ok("short"));
    }

    #[test]
    fn test_all_healthy_single_hint() {
        let hints = recommendations(&[healthy("exa-hosted")]);
        assert_eq!(hints.len(), 1);
        assert!(hints[0].contains("healthy"));
    }
}
