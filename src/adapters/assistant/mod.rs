//! Assistant adapters - implementations of the Assistant port.
//!
//! ## Available Adapters
//!
//! - **WatsonV2Assistant** - session-based v2 API (classification only)
//! - **WatsonV1Assistant** - workspace v1 API (classification and teaching)
//! - **FallbackRouter** - wraps a primary with a confidence-gated secondary
//! - **MockAssistant** - queued results for testing

mod client;
mod factory;
mod fallback_router;
pub mod mock_assistant;
mod watson_v1;
mod watson_v2;
mod wire;

pub use client::{WatsonConfig, DEFAULT_API_VERSION_DATE};
pub use factory::{build_assistant, AssistantStack};
pub use fallback_router::{FallbackLink, FallbackRouter};
pub use mock_assistant::{MockAssistant, MockError};
pub use watson_v1::WatsonV1Assistant;
pub use watson_v2::WatsonV2Assistant;
