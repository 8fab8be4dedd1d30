//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Classification
//!
//! - `Assistant` - Intent classification and intent teaching
//!
//! ## Domain Services
//!
//! - `WeatherService` - Location lookup and current conditions
//! - `JokeService` - Joke categories and random jokes
//! - `Encyclopedia` - Relevance search with snippets
//!
//! ## State
//!
//! - `DialogueStore` - Per-conversation dialogue state

mod assistant;
mod dialogue_store;
mod encyclopedia;
mod joke_service;
mod service_error;
mod weather_service;

pub use assistant::{ApiVersion, Assistant, AssistantError, AssistantInfo, ClassifyRequest};
pub use dialogue_store::DialogueStore;
pub use encyclopedia::Encyclopedia;
pub use joke_service::JokeService;
pub use service_error::ServiceError;
pub use weather_service::WeatherService;
