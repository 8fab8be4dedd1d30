//! HandleMessageHandler - Answer one chat message
//!
//! Routes an utterance through the assistant and, depending on what it
//! recognized, through the weather dialogue, the joke service or the
//! encyclopedia fallback.

use std::sync::Arc;

use crate::config::DialogueConfig;
use crate::domain::classification::{clean_input, split_lines, ClassificationResult, IntentTeaching};
use crate::domain::dialogue::ConversationState;
use crate::domain::foundation::{ConversationId, ValidationError};
use crate::ports::{
    Assistant, AssistantError, ClassifyRequest, DialogueStore, Encyclopedia, JokeService,
    ServiceError,
};

use super::reply::Reply;
use super::weather_dialogue::{WeatherDialogue, WeatherOutcome};

pub const WEATHER_INTENT: &str = "weather";
pub const JOKE_INTENT: &str = "chuck_norris";

/// Jokes told when the user did not ask for just one.
const DEFAULT_JOKE_COUNT: usize = 3;

/// Command to answer a chat message
#[derive(Debug, Clone)]
pub struct HandleMessageCommand {
    pub conversation: ConversationId,
    pub text: String,
}

impl HandleMessageCommand {
    pub fn new(conversation: ConversationId, text: impl Into<String>) -> Self {
        Self {
            conversation,
            text: text.into(),
        }
    }
}

/// Error type for answering messages
#[derive(Debug)]
pub enum HandleMessageError {
    /// Assistant call failed
    Assistant(AssistantError),
    /// Weather, joke or encyclopedia call failed
    Service(ServiceError),
    /// Domain rule violated
    Domain(ValidationError),
}

impl HandleMessageError {
    /// True when a remote service, not this process, is at fault.
    pub fn is_upstream(&self) -> bool {
        matches!(self, HandleMessageError::Assistant(_) | HandleMessageError::Service(_))
    }
}

impl std::fmt::Display for HandleMessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandleMessageError::Assistant(err) => write!(f, "Assistant error: {}", err),
            HandleMessageError::Service(err) => write!(f, "Service error: {}", err),
            HandleMessageError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for HandleMessageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HandleMessageError::Assistant(err) => Some(err),
            HandleMessageError::Service(err) => Some(err),
            HandleMessageError::Domain(err) => Some(err),
        }
    }
}

impl From<AssistantError> for HandleMessageError {
    fn from(err: AssistantError) -> Self {
        HandleMessageError::Assistant(err)
    }
}

impl From<ServiceError> for HandleMessageError {
    fn from(err: ServiceError) -> Self {
        HandleMessageError::Service(err)
    }
}

impl From<ValidationError> for HandleMessageError {
    fn from(err: ValidationError) -> Self {
        HandleMessageError::Domain(err)
    }
}

/// Ports the message engine talks to.
pub struct ChatServices {
    /// Classifies every utterance; usually a fallback router.
    pub assistant: Arc<dyn Assistant>,
    /// Assistant taught encyclopedia answers, when one is configured.
    pub knowledge_base: Option<Arc<dyn Assistant>>,
    pub store: Arc<dyn DialogueStore>,
    pub weather: WeatherDialogue,
    pub jokes: Arc<dyn JokeService>,
    pub encyclopedia: Arc<dyn Encyclopedia>,
}

/// Handler for answering chat messages
pub struct HandleMessageHandler {
    services: ChatServices,
    config: DialogueConfig,
}

impl HandleMessageHandler {
    pub fn new(services: ChatServices, config: DialogueConfig) -> Self {
        Self { services, config }
    }

    pub async fn handle(&self, cmd: HandleMessageCommand) -> Result<Reply, HandleMessageError> {
        let text = clean_input(&cmd.text);
        if text.is_empty() {
            return Ok(Reply::Lines(self.config.welcome.clone()));
        }

        let mut state = self.services.store.load(cmd.conversation).await;
        if state.pending().is_some() {
            return self.continue_weather(cmd.conversation, state, &text).await;
        }

        let result = self
            .services
            .assistant
            .classify(ClassifyRequest::text(cmd.conversation, text.clone()))
            .await?;

        if result.is_empty() {
            tracing::warn!(conversation = %cmd.conversation, "Assistant returned no output");
            return Ok(Reply::NotFound(result.raw().clone()));
        }

        if !result.is_confident(self.config.accept_threshold) {
            tracing::debug!(
                intent = ?result.intent(),
                confidence = ?result.confidence(),
                "Low confidence, consulting encyclopedia"
            );
            return self.answer_from_encyclopedia(&text).await;
        }

        if result.has_intent(WEATHER_INTENT) {
            let outcome = self.services.weather.start(&mut state, &result).await;
            self.services.store.save(cmd.conversation, &state).await;
            return Ok(self.weather_reply(outcome?));
        }

        if result.has_intent(JOKE_INTENT) {
            return self.tell_jokes(&result).await;
        }

        Ok(Reply::Lines(result.text()))
    }

    /// Second turn of a weather question: the utterance is either a
    /// location or a confident change of subject.
    async fn continue_weather(
        &self,
        conversation: ConversationId,
        mut state: ConversationState,
        text: &str,
    ) -> Result<Reply, HandleMessageError> {
        let result = self
            .services
            .assistant
            .classify(ClassifyRequest::text(conversation, text).bypassing())
            .await?;

        if result.is_confident(self.config.accept_threshold) && !result.has_intent(WEATHER_INTENT) {
            tracing::info!(
                conversation = %conversation,
                intent = ?result.intent(),
                "Weather dialogue aborted"
            );
            state.finish();
            self.services.store.save(conversation, &state).await;
            return Ok(Reply::Lines(result.text()));
        }

        let outcome = self.services.weather.complete(&mut state, text).await;
        self.services.store.save(conversation, &state).await;
        Ok(self.weather_reply(outcome?))
    }

    async fn answer_from_encyclopedia(&self, text: &str) -> Result<Reply, HandleMessageError> {
        let snippet = match self.services.encyclopedia.snippet(text).await? {
            Some(snippet) => snippet,
            None => return Ok(self.retry()),
        };

        if let Some(knowledge_base) = &self.services.knowledge_base {
            if knowledge_base.info().supports_teaching {
                match IntentTeaching::new(text, Some(snippet.caption().to_string()), snippet.text()) {
                    Ok(teaching) => {
                        knowledge_base.register_intent(teaching).await?;
                        tracing::info!(caption = snippet.caption(), "Taught encyclopedia answer");
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Encyclopedia answer not teachable");
                    }
                }
            }
        }

        Ok(Reply::Lines(split_lines(snippet.text())))
    }

    async fn tell_jokes(&self, result: &ClassificationResult) -> Result<Reply, HandleMessageError> {
        let entities = result.entities();

        if entities.contains("notion", "categories") {
            let categories = self.services.jokes.categories().await?;
            return Ok(Reply::Lines(vec![categories.join(", ")]));
        }

        let category = entities.latest("domain").map(|e| e.value.as_str());
        let count = if entities.contains("notion", "joke") {
            1
        } else {
            DEFAULT_JOKE_COUNT
        };

        let jokes = self.services.jokes.random_jokes(category, count).await?;
        if jokes.is_empty() {
            return Ok(self.retry());
        }
        Ok(Reply::Lines(jokes))
    }

    fn weather_reply(&self, outcome: WeatherOutcome) -> Reply {
        match outcome {
            WeatherOutcome::Prompt(lines) | WeatherOutcome::Answer(lines) => Reply::Lines(lines),
            WeatherOutcome::Retry => self.retry(),
        }
    }

    fn retry(&self) -> Reply {
        Reply::Lines(self.config.retry.clone())
    }
}
