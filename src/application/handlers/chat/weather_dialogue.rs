//! WeatherDialogue - slot-filling coordinator for weather questions.
//!
//! A weather question without a place parks its notions on the conversation
//! until the next turn names one. Every resolution attempt, successful or not,
//! leaves the conversation idle.

use std::sync::Arc;

use crate::domain::classification::ClassificationResult;
use crate::domain::dialogue::{ConversationState, LocationRequest};
use crate::domain::weather::{compose_answer, Coordinates, NotionSet, UnitSystem};
use crate::ports::WeatherService;

use super::handle_message::HandleMessageError;

/// Result of one weather turn.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherOutcome {
    /// Ask the user for a location with these lines.
    Prompt(Vec<String>),
    /// Answer lines built from an observation.
    Answer(Vec<String>),
    /// Nothing could be answered; reply with the retry text.
    Retry,
}

/// Coordinates weather lookups for the message engine.
pub struct WeatherDialogue {
    service: Arc<dyn WeatherService>,
    units: UnitSystem,
    default_location: Option<String>,
}

impl WeatherDialogue {
    pub fn new(service: Arc<dyn WeatherService>, units: UnitSystem) -> Self {
        Self {
            service,
            units,
            default_location: None,
        }
    }

    /// Place used when a conversation has never named one.
    pub fn with_default_location(mut self, location: Option<String>) -> Self {
        self.default_location = location.filter(|l| !l.trim().is_empty());
        self
    }

    /// Handles a fresh weather classification from an idle conversation.
    pub async fn start(
        &self,
        state: &mut ConversationState,
        result: &ClassificationResult,
    ) -> Result<WeatherOutcome, HandleMessageError> {
        let request = LocationRequest::from_classification(result);

        match request.location {
            Some(location) => self.resolve(state, &request.notions, Some(&location)).await,
            None if self.knows_location(state) => self.resolve(state, &request.notions, None).await,
            None => {
                state.await_location(request.notions)?;
                tracing::info!("Weather dialogue awaiting location");
                Ok(WeatherOutcome::Prompt(result.text()))
            }
        }
    }

    /// Treats `utterance` as the location the pending question waited for.
    ///
    /// The conversation is idle afterwards whatever the outcome.
    pub async fn complete(
        &self,
        state: &mut ConversationState,
        utterance: &str,
    ) -> Result<WeatherOutcome, HandleMessageError> {
        let notions = state.finish().map(|p| p.notions).unwrap_or_default();
        tracing::info!(location = utterance, "Weather dialogue received location");
        self.resolve(state, &notions, Some(utterance)).await
    }

    fn knows_location(&self, state: &ConversationState) -> bool {
        state.location().is_some() || self.default_location.is_some()
    }

    async fn resolve(
        &self,
        state: &mut ConversationState,
        notions: &NotionSet,
        location: Option<&str>,
    ) -> Result<WeatherOutcome, HandleMessageError> {
        let coordinates = match location {
            Some(query) => match self.lookup(query).await? {
                Some(coordinates) => {
                    state.remember_location(coordinates);
                    coordinates
                }
                None => return Ok(WeatherOutcome::Retry),
            },
            None => match (state.location(), &self.default_location) {
                (Some(known), _) => known,
                (None, Some(default)) => match self.lookup(default).await? {
                    Some(coordinates) => coordinates,
                    None => return Ok(WeatherOutcome::Retry),
                },
                (None, None) => return Ok(WeatherOutcome::Retry),
            },
        };

        let observation = match self.service.current_conditions(&coordinates, self.units).await? {
            Some(observation) => observation,
            None => {
                tracing::warn!(location = %coordinates, "No current conditions");
                return Ok(WeatherOutcome::Retry);
            }
        };

        let lines = compose_answer(&observation, notions);
        if lines.is_empty() {
            return Ok(WeatherOutcome::Retry);
        }
        Ok(WeatherOutcome::Answer(lines))
    }

    async fn lookup(&self, query: &str) -> Result<Option<Coordinates>, HandleMessageError> {
        let found = self.service.resolve_location(query).await?;
        if found.is_none() {
            tracing::warn!(query, "Location not found");
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::assistant::mock_assistant::classified_with_entities;
    use crate::adapters::weather::MockWeatherService;
    use crate::domain::dialogue::DialoguePhase;
    use crate::domain::weather::{Notion, Observation, Precipitation, Temperature, Wind};

    fn observation() -> Observation {
        Observation {
            phrase: Some("Light Rain".to_string()),
            temperature: Some(Temperature {
                value: 11.0,
                feels_like: 9.0,
                units: UnitSystem::Metric,
            }),
            wind: Some(Wind {
                speed: 22.0,
                direction: "WSW".to_string(),
                units: UnitSystem::Metric,
            }),
            precipitation: Precipitation::default(),
            pressure: None,
            visibility: None,
            units: UnitSystem::Metric,
        }
    }

    fn paris() -> Coordinates {
        Coordinates::new(48.86, 2.34)
    }

    fn service() -> MockWeatherService {
        MockWeatherService::new()
            .with_place("Paris", paris())
            .with_observation(observation())
    }

    fn dialogue(service: &MockWeatherService) -> WeatherDialogue {
        WeatherDialogue::new(Arc::new(service.clone()), UnitSystem::Metric)
    }

    #[tokio::test]
    async fn question_without_place_waits_for_location() {
        let service = service();
        let mut state = ConversationState::new();
        let result = classified_with_entities("Where?", "weather", 0.98, &[("notion", "temperature")]);

        let outcome = dialogue(&service).start(&mut state, &result).await.unwrap();

        assert_eq!(outcome, WeatherOutcome::Prompt(vec!["Where?".to_string()]));
        assert_eq!(state.phase(), DialoguePhase::AwaitingLocation);
        assert!(state.pending().unwrap().notions.contains(Notion::Temperature));
        assert!(service.lookups().is_empty());
    }

    #[tokio::test]
    async fn question_with_place_answers_at_once() {
        let service = service();
        let mut state = ConversationState::new();
        let result = classified_with_entities(
            "",
            "weather",
            0.98,
            &[("notion", "weather"), ("notion", "Paris")],
        );

        let outcome = dialogue(&service).start(&mut state, &result).await.unwrap();

        assert_eq!(
            outcome,
            WeatherOutcome::Answer(vec![
                "Light Rain".to_string(),
                "temperature: 11°C (feels like: 9°C)".to_string(),
                "wind: WSW 22 km/h".to_string(),
            ])
        );
        assert_eq!(state.phase(), DialoguePhase::Idle);
        assert_eq!(state.location(), Some(paris()));
    }

    #[tokio::test]
    async fn completion_uses_pending_notions() {
        let service = service();
        let mut state = ConversationState::new();
        state
            .await_location([Notion::WindSpeed].into_iter().collect())
            .unwrap();

        let outcome = dialogue(&service).complete(&mut state, "Paris").await.unwrap();

        assert_eq!(
            outcome,
            WeatherOutcome::Answer(vec!["Light Rain".to_string(), "wind: WSW 22 km/h".to_string()])
        );
        assert_eq!(state.phase(), DialoguePhase::Idle);
        assert_eq!(service.lookups(), vec!["Paris".to_string()]);
    }

    #[tokio::test]
    async fn unknown_place_retries_and_goes_idle() {
        let service = service();
        let mut state = ConversationState::new();
        state.await_location(NotionSet::new()).unwrap();

        let outcome = dialogue(&service).complete(&mut state, "Atlantis").await.unwrap();

        assert_eq!(outcome, WeatherOutcome::Retry);
        assert_eq!(state.phase(), DialoguePhase::Idle);
        assert!(service.observed().is_empty());
    }

    #[tokio::test]
    async fn remembered_location_skips_prompt() {
        let service = service();
        let mut state = ConversationState::new();
        state.remember_location(paris());
        let result = classified_with_entities("Where?", "weather", 0.98, &[("notion", "temperature")]);

        let outcome = dialogue(&service).start(&mut state, &result).await.unwrap();

        assert!(matches!(outcome, WeatherOutcome::Answer(_)));
        assert_eq!(service.observed(), vec![(paris(), UnitSystem::Metric)]);
    }

    #[tokio::test]
    async fn default_location_skips_prompt() {
        let service = service();
        let mut state = ConversationState::new();
        let result = classified_with_entities("Where?", "weather", 0.98, &[("notion", "weather")]);

        let outcome = dialogue(&service)
            .with_default_location(Some("Paris".to_string()))
            .start(&mut state, &result)
            .await
            .unwrap();

        assert!(matches!(outcome, WeatherOutcome::Answer(_)));
        assert_eq!(state.phase(), DialoguePhase::Idle);
        assert!(state.location().is_none());
    }

    #[tokio::test]
    async fn nothing_requested_and_no_phrase_retries() {
        let mut quiet = observation();
        quiet.phrase = None;
        let service = MockWeatherService::new()
            .with_place("Paris", paris())
            .with_observation(quiet);
        let mut state = ConversationState::new();
        state.await_location(NotionSet::new()).unwrap();

        let outcome = dialogue(&service).complete(&mut state, "Paris").await.unwrap();

        assert_eq!(outcome, WeatherOutcome::Retry);
    }

    #[tokio::test]
    async fn missing_observation_retries() {
        let service = MockWeatherService::new().with_place("Paris", paris());
        let mut state = ConversationState::new();
        state.await_location(NotionSet::new()).unwrap();

        let outcome = dialogue(&service).complete(&mut state, "Paris").await.unwrap();
        assert_eq!(outcome, WeatherOutcome::Retry);
    }

    #[tokio::test]
    async fn service_failure_propagates_but_state_is_idle() {
        let service = service().failing(500);
        let mut state = ConversationState::new();
        state.await_location(NotionSet::new()).unwrap();

        let err = dialogue(&service).complete(&mut state, "Paris").await.unwrap_err();

        assert!(matches!(err, HandleMessageError::Service(_)));
        assert_eq!(state.phase(), DialoguePhase::Idle);
    }
}
