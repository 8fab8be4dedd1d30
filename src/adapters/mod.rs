//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `assistant` - NLU assistants (Watson v1/v2, fallback router, mock)
//! - `weather` - Weather Company Data API
//! - `jokes` - Chuck Norris joke API
//! - `encyclopedia` - Wikipedia search
//! - `storage` - Dialogue state storage
//! - `concurrency` - Bounded fan-out for independent remote calls
//! - `http` - REST API

pub mod assistant;
pub mod concurrency;
pub mod encyclopedia;
pub mod http;
pub mod jokes;
pub mod storage;
pub mod weather;

pub use assistant::{AssistantStack, FallbackRouter, MockAssistant};
pub use encyclopedia::{MockEncyclopedia, WikipediaSearch};
pub use jokes::{ChuckNorrisJokes, MockJokeService};
pub use storage::InMemoryDialogueStore;
pub use weather::{MockWeatherService, WeatherCompanyService};
