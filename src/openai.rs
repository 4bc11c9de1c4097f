//! OpenAI client construction.

use crate::config::ModelSettings;
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create an OpenAI client honoring the configured request timeout.
///
/// The timeout caps every chat request so a hung API call cannot stall
/// an agent run indefinitely.
pub fn create_client(model: &ModelSettings) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(request_timeout(model))
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(OpenAIConfig::default()).with_http_client(http_client)
}

fn request_timeout(model: &ModelSettings) -> Duration {
    Duration::from_secs(model.request_timeout_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_comes_from_settings() {
        let model = ModelSettings {
            request_timeout_seconds: 5,
            ..Default::default()
        };
        assert_eq!(request_timeout(&model), Duration::from_secs(5));
    }

    #[test]
    fn test_client_builds_with_custom_timeout() {
        let model = ModelSettings {
            request_timeout_seconds: 1,
            ..Default::default()
        };
        let _client = create_client(&model);
    }
}
