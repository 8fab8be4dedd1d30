//! Assistant Port - Interface for intent-classification services.
//!
//! Both protocol generations of the NLU service sit behind this trait, as does
//! the router that consults a secondary assistant when the primary is unsure.
//!
//! # Example
//!
//! ```ignore
//! let request = ClassifyRequest::text(conversation, "what's the weather");
//! let result = assistant.classify(request).await?;
//! if result.has_intent("weather") { /* ... */ }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::classification::{ClassificationResult, IntentTeaching};
use crate::domain::foundation::{ConversationId, ValidationError};

/// Port for intent-classification assistants.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Classifies an utterance, or a set of forced intents.
    ///
    /// An empty result (no output segments) is a successful classification.
    async fn classify(&self, request: ClassifyRequest) -> Result<ClassificationResult, AssistantError>;

    /// Teaches the assistant a new intent together with the reply it should give.
    ///
    /// Assistants without a teaching API return [`AssistantError::Unsupported`].
    async fn register_intent(&self, teaching: IntentTeaching) -> Result<(), AssistantError>;

    /// Describes this assistant.
    fn info(&self) -> AssistantInfo;
}

/// A single classification call.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyRequest {
    /// User utterance; absent when only forced intents are sent.
    pub text: Option<String>,
    /// Intents the assistant must treat as recognized with confidence 1.
    pub intents: Vec<String>,
    /// Skip fallback routing and return the primary result as-is.
    pub bypass: bool,
    /// Conversation the context belongs to.
    pub conversation: ConversationId,
}

impl ClassifyRequest {
    /// Creates a request for a user utterance.
    pub fn text(conversation: ConversationId, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            intents: Vec::new(),
            bypass: false,
            conversation,
        }
    }

    /// Marks the request as a multi-turn continuation.
    pub fn bypassing(mut self) -> Self {
        self.bypass = true;
        self
    }
}

/// Protocol generation of an assistant service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ApiVersion {
    /// Workspace API with intent teaching.
    V1,
    /// Assistant API with sessions.
    V2,
}

impl ApiVersion {
    pub fn as_u8(&self) -> u8 {
        match self {
            ApiVersion::V1 => 1,
            ApiVersion::V2 => 2,
        }
    }
}

impl TryFrom<u8> for ApiVersion {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ApiVersion::V1),
            2 => Ok(ApiVersion::V2),
            other => Err(format!("unsupported assistant api version {}", other)),
        }
    }
}

impl From<ApiVersion> for u8 {
    fn from(version: ApiVersion) -> Self {
        version.as_u8()
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.as_u8())
    }
}

/// Assistant identification and capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantInfo {
    /// Human-readable name used in logs.
    pub name: String,
    pub api_version: ApiVersion,
    pub supports_teaching: bool,
}

impl AssistantInfo {
    pub fn new(name: impl Into<String>, api_version: ApiVersion) -> Self {
        Self {
            name: name.into(),
            api_version,
            supports_teaching: api_version == ApiVersion::V1,
        }
    }
}

/// Assistant errors.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Service answered with an unexpected status.
    #[error("assistant returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Failed to parse the service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Operation not offered by this assistant.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Input rejected before sending.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl AssistantError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported(operation.into())
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}
