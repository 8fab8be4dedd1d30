//! Integration tests for the message engine across turns.
//!
//! Exercises the engine through its public API with a real fallback router
//! in front of mock assistants.

use std::sync::Arc;

use concierge::adapters::assistant::mock_assistant::{classified, classified_with_entities, unrecognized};
use concierge::adapters::assistant::{FallbackRouter, MockAssistant};
use concierge::adapters::{InMemoryDialogueStore, MockEncyclopedia, MockJokeService, MockWeatherService};
use concierge::application::{
    ChatServices, HandleMessageCommand, HandleMessageHandler, Reply, WeatherDialogue,
};
use concierge::config::DialogueConfig;
use concierge::domain::dialogue::DialoguePhase;
use concierge::domain::fallback::FallbackThreshold;
use concierge::domain::foundation::ConversationId;
use concierge::domain::weather::{Coordinates, Observation, Precipitation, Temperature, UnitSystem, Wind};
use concierge::ports::DialogueStore;

fn observation() -> Observation {
    Observation {
        phrase: Some("Overcast".to_string()),
        temperature: Some(Temperature {
            value: 50.0,
            feels_like: 47.0,
            units: UnitSystem::Imperial,
        }),
        wind: Some(Wind {
            speed: 12.0,
            direction: "SW".to_string(),
            units: UnitSystem::Imperial,
        }),
        precipitation: Precipitation::default(),
        pressure: Some(1012.0),
        visibility: Some(10.0),
        units: UnitSystem::Imperial,
    }
}

struct Engine {
    handler: HandleMessageHandler,
    store: InMemoryDialogueStore,
    weather: MockWeatherService,
    primary: MockAssistant,
    secondary: MockAssistant,
}

fn engine(primary: MockAssistant, secondary: MockAssistant, encyclopedia: MockEncyclopedia) -> Engine {
    let store = InMemoryDialogueStore::new();
    let weather = MockWeatherService::new()
        .with_place("Seattle", Coordinates::new(47.61, -122.33))
        .with_observation(observation());

    let router = FallbackRouter::new(Arc::new(primary.clone()))
        .with_fallback(Arc::new(secondary.clone()), FallbackThreshold::default());

    let services = ChatServices {
        assistant: Arc::new(router),
        knowledge_base: Some(Arc::new(secondary.clone())),
        store: Arc::new(store.clone()),
        weather: WeatherDialogue::new(Arc::new(weather.clone()), UnitSystem::Imperial),
        jokes: Arc::new(MockJokeService::new()),
        encyclopedia: Arc::new(encyclopedia),
    };

    Engine {
        handler: HandleMessageHandler::new(services, DialogueConfig::default()),
        store,
        weather,
        primary,
        secondary,
    }
}

fn lines(reply: Reply) -> Vec<String> {
    match reply {
        Reply::Lines(lines) => lines,
        Reply::NotFound(raw) => panic!("unexpected not-found reply: {raw}"),
    }
}

#[tokio::test]
async fn location_turn_bypasses_fallback() {
    let primary = MockAssistant::new()
        .with_result(classified_with_entities(
            "Which city?",
            "weather",
            0.97,
            &[("notion", "temperature")],
        ))
        .with_result(unrecognized("I didn't get that."));
    let engine = engine(primary, MockAssistant::teachable(), MockEncyclopedia::new());
    let conversation = ConversationId::new();

    let first = engine
        .handler
        .handle(HandleMessageCommand::new(conversation, "how cold is it"))
        .await
        .unwrap();
    assert_eq!(lines(first), vec!["Which city?"]);

    let second = engine
        .handler
        .handle(HandleMessageCommand::new(conversation, "  Seattle \n"))
        .await
        .unwrap();
    assert_eq!(
        lines(second),
        vec!["Overcast", "temperature: 50°F (feels like: 47°F)"]
    );

    assert_eq!(engine.primary.call_count(), 2);
    assert_eq!(engine.secondary.call_count(), 0);
    assert_eq!(engine.weather.lookups(), vec!["Seattle".to_string()]);

    let state = engine.store.load(conversation).await;
    assert_eq!(state.phase(), DialoguePhase::Idle);
    assert_eq!(state.location(), Some(Coordinates::new(47.61, -122.33)));
}

#[tokio::test]
async fn remembered_location_answers_in_one_turn() {
    let primary = MockAssistant::new()
        .with_result(classified_with_entities("Where?", "weather", 0.97, &[("notion", "Seattle")]))
        .with_result(classified_with_entities("Where?", "weather", 0.97, &[("notion", "wind speed")]));
    let engine = engine(primary, MockAssistant::teachable(), MockEncyclopedia::new());
    let conversation = ConversationId::new();

    engine
        .handler
        .handle(HandleMessageCommand::new(conversation, "weather in seattle"))
        .await
        .unwrap();
    let reply = engine
        .handler
        .handle(HandleMessageCommand::new(conversation, "and the wind?"))
        .await
        .unwrap();

    assert_eq!(lines(reply), vec!["Overcast", "wind: SW 12 mph"]);
    assert_eq!(engine.weather.lookups().len(), 1);
}

#[tokio::test]
async fn low_confidence_reaches_secondary_once() {
    let primary = MockAssistant::new().with_result(classified("Maybe?", "general", 0.85));
    let secondary = MockAssistant::teachable().with_result(classified("Known answer.", "kb_42", 0.96));
    let engine = engine(primary, secondary, MockEncyclopedia::new());

    let reply = engine
        .handler
        .handle(HandleMessageCommand::new(ConversationId::new(), "obscure question"))
        .await
        .unwrap();

    assert_eq!(lines(reply), vec!["Known answer."]);
    assert_eq!(engine.secondary.call_count(), 1);
}

#[tokio::test]
async fn unknown_everywhere_is_learned_from_encyclopedia() {
    let primary = MockAssistant::new().with_result(unrecognized("?"));
    let secondary = MockAssistant::teachable().with_result(unrecognized("??"));
    let encyclopedia = MockEncyclopedia::new().with_hit(
        "Space Needle",
        "The <span class=\"searchmatch\">Space Needle</span> is an observation tower in Seattle.",
    );
    let engine = engine(primary, secondary, encyclopedia);

    let reply = engine
        .handler
        .handle(HandleMessageCommand::new(ConversationId::new(), "space needle"))
        .await
        .unwrap();

    assert_eq!(
        lines(reply),
        vec!["The Space Needle is an observation tower in Seattle."]
    );
    let taught = engine.secondary.taught();
    assert_eq!(taught.len(), 1);
    assert_eq!(taught[0].description.as_deref(), Some("Space Needle"));
    assert_eq!(
        taught[0].reply.as_str(),
        "The Space Needle is an observation tower in Seattle."
    );
}
