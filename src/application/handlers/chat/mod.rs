//! Chat handlers - the message engine.

mod handle_message;
mod reply;
mod weather_dialogue;

pub use handle_message::{
    ChatServices, HandleMessageCommand, HandleMessageError, HandleMessageHandler, JOKE_INTENT,
    WEATHER_INTENT,
};
pub use reply::Reply;
pub use weather_dialogue::{WeatherDialogue, WeatherOutcome};
