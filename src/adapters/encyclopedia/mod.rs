//! Encyclopedia adapters - implementations of the Encyclopedia port.

mod mock;
mod wikipedia;

pub use mock::MockEncyclopedia;
pub use wikipedia::WikipediaSearch;
