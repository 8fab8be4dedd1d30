//! Mock Assistant for testing.
//!
//! Provides a configurable mock implementation of the Assistant port,
//! allowing tests to run without calling a real NLU service.
//!
//! # Example
//!
//! ```ignore
//! let assistant = MockAssistant::new()
//!     .with_result(classified("Where are you?", "weather", 0.98));
//!
//! let result = assistant.classify(request).await?;
//! assert_eq!(result.intent(), Some("weather"));
//! assert_eq!(assistant.call_count(), 1);
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::classification::{ClassificationResult, Entity, IntentTeaching, RecognizedIntent};
use crate::ports::{ApiVersion, Assistant, AssistantError, AssistantInfo, ClassifyRequest};

/// Mock assistant for testing.
///
/// Returns queued results in order, then empty results once the queue runs dry.
#[derive(Debug, Clone)]
pub struct MockAssistant {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: AssistantInfo,
    calls: Arc<Mutex<Vec<ClassifyRequest>>>,
    taught: Arc<Mutex<Vec<IntentTeaching>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Result(ClassificationResult),
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    AuthenticationFailed,
    Network { message: String },
    Status { status: u16 },
}

impl From<MockError> for AssistantError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::AuthenticationFailed => AssistantError::AuthenticationFailed,
            MockError::Network { message } => AssistantError::network(message),
            MockError::Status { status } => AssistantError::status(status, "mock failure"),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for MockAssistant {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAssistant {
    /// Creates a v2-style mock that rejects teaching.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: AssistantInfo::new("mock", ApiVersion::V2),
            calls: Arc::new(Mutex::new(Vec::new())),
            taught: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a v1-style mock that accepts teaching.
    pub fn teachable() -> Self {
        Self::new().with_info(AssistantInfo::new("mock-teachable", ApiVersion::V1))
    }

    /// Adds a result to the queue.
    pub fn with_result(self, result: ClassificationResult) -> Self {
        lock(&self.responses).push_back(MockResponse::Result(result));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    pub fn with_info(mut self, info: AssistantInfo) -> Self {
        self.info = info;
        self
    }

    /// Returns the number of classify calls made.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded classify requests.
    pub fn calls(&self) -> Vec<ClassifyRequest> {
        lock(&self.calls).clone()
    }

    /// Returns every intent registered so far.
    pub fn taught(&self) -> Vec<IntentTeaching> {
        lock(&self.taught).clone()
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Result(ClassificationResult::empty(Value::Null)))
    }
}

#[async_trait]
impl Assistant for MockAssistant {
    async fn classify(&self, request: ClassifyRequest) -> Result<ClassificationResult, AssistantError> {
        lock(&self.calls).push(request);

        match self.next_response() {
            MockResponse::Result(result) => Ok(result),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    async fn register_intent(&self, teaching: IntentTeaching) -> Result<(), AssistantError> {
        if !self.info.supports_teaching {
            return Err(AssistantError::unsupported("intent registration"));
        }
        lock(&self.taught).push(teaching);
        Ok(())
    }

    fn info(&self) -> AssistantInfo {
        self.info.clone()
    }
}

/// One reply segment with an intent.
pub fn classified(text: &str, intent: &str, confidence: f64) -> ClassificationResult {
    classified_with_entities(text, intent, confidence, &[])
}

/// One reply segment with an intent and `(group, value)` entities.
pub fn classified_with_entities(
    text: &str,
    intent: &str,
    confidence: f64,
    entities: &[(&str, &str)],
) -> ClassificationResult {
    ClassificationResult::normalize(
        vec![text.to_string()],
        vec![RecognizedIntent::new(intent, confidence)],
        entities
            .iter()
            .map(|(group, value)| Entity::new(*group, *value))
            .collect(),
        Value::Null,
    )
}

/// One reply segment without any recognized intent.
pub fn unrecognized(text: &str) -> ClassificationResult {
    ClassificationResult::normalize(vec![text.to_string()], Vec::new(), Vec::new(), Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ConversationId;

    fn request(text: &str) -> ClassifyRequest {
        ClassifyRequest::text(ConversationId::shared(), text)
    }

    #[tokio::test]
    async fn returns_results_in_order_then_empty() {
        let assistant = MockAssistant::new()
            .with_result(classified("first", "greeting", 0.99))
            .with_result(unrecognized("second"));

        let r1 = assistant.classify(request("a")).await.unwrap();
        let r2 = assistant.classify(request("b")).await.unwrap();
        let r3 = assistant.classify(request("c")).await.unwrap();

        assert_eq!(r1.intent(), Some("greeting"));
        assert_eq!(r2.intent(), None);
        assert!(r3.is_empty());
        assert_eq!(assistant.call_count(), 3);
        assert_eq!(assistant.calls()[1].text.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let assistant = MockAssistant::new().with_error(MockError::AuthenticationFailed);
        let err = assistant.classify(request("a")).await.unwrap_err();
        assert!(matches!(err, AssistantError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn teaching_depends_on_api_version() {
        let teaching = IntentTeaching::new("hello", None, "Hi.").unwrap();

        assert!(MockAssistant::new().register_intent(teaching.clone()).await.is_err());

        let teachable = MockAssistant::teachable();
        teachable.register_intent(teaching).await.unwrap();
        assert_eq!(teachable.taught().len(), 1);
    }
}
