//! Configuration settings for Byline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub model: ModelSettings,
    pub guardrails: GuardrailSettings,
    pub mcp: McpSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Brand name substituted into agent instructions as {{brand}}.
    pub brand: String,
    /// Directory where markdown deliverables are written.
    pub output_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            brand: "The Byline Desk".to_string(),
            output_dir: "~/.byline/artifacts".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// LLM model settings shared by all agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Model used when no per-run override is given.
    pub default_model: String,
    /// Maximum tool-calling iterations per agent run.
    pub max_iterations: usize,
    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            default_model: "gpt-4o-mini".to_string(),
            max_iterations: 15,
            request_timeout_seconds: 300,
        }
    }
}

/// Guardrail validation policy.
///
/// The maximum topic length is policy, not a stable constant; the
/// validator reads it from here so documentation and behavior agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardrailSettings {
    /// Maximum allowed topic length in characters (after trimming).
    pub max_topic_chars: usize,
    /// Minimum number of numbered sources expected in a research brief.
    pub min_sources: usize,
    /// Minimum number of inline [S#] citations expected in outputs.
    pub min_citations: usize,
    /// Lower bound of the acceptable script word count.
    pub script_min_words: usize,
    /// Upper bound of the acceptable script word count.
    pub script_max_words: usize,
}

impl Default for GuardrailSettings {
    fn default() -> Self {
        Self {
            max_topic_chars: 500,
            min_sources: 5,
            min_citations: 3,
            script_min_words: 500,
            script_max_words: 1500,
        }
    }
}

/// MCP tool-server settings.
///
/// Credentials stay in the environment (EXA_API_KEY, NOTION_TOKEN,
/// NOTION_MCP_AUTH_TOKEN); this section only carries the non-secret
/// wiring for the workspace server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct McpSettings {
    /// Command used to launch the workspace server over stdio.
    pub workspace_command: String,
    /// Arguments for the stdio workspace server command.
    pub workspace_args: Vec<String>,
    /// Handshake timeout in seconds for health checks.
    pub health_timeout_seconds: u64,
}

impl Default for McpSettings {
    fn default() -> Self {
        Self {
            workspace_command: "npx".to_string(),
            workspace_args: vec!["-y".to_string(), "@notionhq/notion-mcp-server".to_string()],
            health_timeout_seconds: 15,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::BylineError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("byline")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded artifact output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_guardrail_policy() {
        let settings = Settings::default();
        assert_eq!(settings.guardrails.max_topic_chars, 500);
        assert_eq!(settings.guardrails.min_sources, 5);
        assert!(settings.guardrails.script_min_words < settings.guardrails.script_max_words);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let settings: Settings =
            toml::from_str("[guardrails]\nmax_topic_chars = 280\n").unwrap();
        assert_eq!(settings.guardrails.max_topic_chars, 280);
        assert_eq!(settings.guardrails.min_sources, 5);
        assert_eq!(settings.model.default_model, "gpt-4o-mini");
    }

    #[test]
    fn test_expand_path_tilde() {
        let expanded = Settings::expand_path("~/.byline/artifacts");
        assert!(!expanded.to_string_lossy().starts_with('~'));
    }
}
