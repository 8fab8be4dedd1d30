//! HTTP plumbing shared by both assistant API generations.

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::adapters::storage::DEFAULT_IDLE_TTL_SECS;
use crate::ports::AssistantError;

/// API version date sent with every request when none is configured.
pub const DEFAULT_API_VERSION_DATE: &str = "2021-06-14";

/// Connection settings for one assistant service instance.
#[derive(Debug, Clone)]
pub struct WatsonConfig {
    /// Name used in logs.
    pub name: String,
    /// Service instance URL, without trailing `/v1` or `/v2`.
    pub url: String,
    /// Workspace id (v1) or assistant id (v2).
    pub assistant_id: String,
    api_key: Secret<String>,
    /// API version date (`version` query parameter).
    pub version: String,
    pub timeout: Duration,
    /// How long a conversation's dialogue context survives without traffic.
    pub context_idle_timeout: chrono::Duration,
}

impl WatsonConfig {
    pub fn new(
        url: impl Into<String>,
        assistant_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            name: "assistant".to_string(),
            url: url.into(),
            assistant_id: assistant_id.into(),
            api_key: Secret::new(api_key.into()),
            version: DEFAULT_API_VERSION_DATE.to_string(),
            timeout: Duration::from_secs(30),
            context_idle_timeout: chrono::Duration::seconds(DEFAULT_IDLE_TTL_SECS),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_context_idle_timeout(mut self, idle_timeout: chrono::Duration) -> Self {
        self.context_idle_timeout = idle_timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Authenticated JSON client for one service instance.
#[derive(Debug)]
pub(super) struct WatsonClient {
    config: WatsonConfig,
    client: Client,
}

impl WatsonClient {
    pub fn new(config: WatsonConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssistantError::network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &WatsonConfig {
        &self.config
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.url.trim_end_matches('/'), path)
    }

    /// POSTs a JSON body and returns the JSON response.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value, AssistantError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        tracing::debug!(assistant = %self.config.name, %url, "Calling assistant");

        let response = self
            .client
            .post(&url)
            .query(&[("version", self.config.version.as_str())])
            .basic_auth("apikey", Some(self.config.api_key()))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    AssistantError::network(format!("Connection failed: {}", e))
                } else {
                    AssistantError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<Value>()
                .await
                .map_err(|e| AssistantError::parse(format!("Failed to parse response: {}", e)));
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(AssistantError::AuthenticationFailed),
            code => Err(AssistantError::status(code, error_body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = WatsonConfig::new("https://api.example.com/instances/1/", "ws-1", "secret")
            .with_name("wiki")
            .with_version("2020-04-01")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.name, "wiki");
        assert_eq!(config.version, "2020-04-01");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_key(), "secret");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = WatsonConfig::new("https://example.com", "id", "super-secret-key");
        assert!(!format!("{:?}", config).contains("super-secret-key"));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client =
            WatsonClient::new(WatsonConfig::new("https://example.com/inst/", "id", "k")).unwrap();
        assert_eq!(
            client.endpoint("v2/assistants/id/sessions"),
            "https://example.com/inst/v2/assistants/id/sessions"
        );
    }
}
