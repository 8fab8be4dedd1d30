//! Mock joke service for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{JokeService, ServiceError};

/// Joke service answering from fixed lists.
#[derive(Debug, Clone, Default)]
pub struct MockJokeService {
    categories: Vec<String>,
    jokes: Vec<String>,
    requests: Arc<Mutex<Vec<(Option<String>, usize)>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockJokeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Jokes handed out in a cycle.
    pub fn with_jokes(mut self, jokes: &[&str]) -> Self {
        self.jokes = jokes.iter().map(|j| j.to_string()).collect();
        self
    }

    /// `(category, count)` of every `random_jokes` call.
    pub fn requests(&self) -> Vec<(Option<String>, usize)> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl JokeService for MockJokeService {
    async fn categories(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.categories.clone())
    }

    async fn random_jokes(
        &self,
        category: Option<&str>,
        count: usize,
    ) -> Result<Vec<String>, ServiceError> {
        lock(&self.requests).push((category.map(str::to_string), count));
        if self.jokes.is_empty() {
            return Err(ServiceError::status("jokes", 404));
        }
        Ok(self.jokes.iter().cycle().take(count).cloned().collect())
    }
}
