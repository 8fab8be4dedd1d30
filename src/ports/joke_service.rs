//! Joke Service Port.

use async_trait::async_trait;

use super::ServiceError;

/// Port for a random-joke provider.
#[async_trait]
pub trait JokeService: Send + Sync {
    /// Lists the categories jokes can be drawn from.
    async fn categories(&self) -> Result<Vec<String>, ServiceError>;

    /// Draws `count` random jokes, optionally restricted to a category.
    ///
    /// Jokes come back in request order.
    async fn random_jokes(
        &self,
        category: Option<&str>,
        count: usize,
    ) -> Result<Vec<String>, ServiceError>;
}
