//! Joke adapters - implementations of the JokeService port.

mod chuck_norris;
mod mock;

pub use chuck_norris::ChuckNorrisJokes;
pub use mock::MockJokeService;
