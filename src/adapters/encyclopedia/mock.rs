//! Mock encyclopedia for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::knowledge::SearchHit;
use crate::ports::{Encyclopedia, ServiceError};

/// Encyclopedia returning the same hits for every query.
#[derive(Debug, Clone, Default)]
pub struct MockEncyclopedia {
    hits: Vec<SearchHit>,
    queries: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockEncyclopedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hit(mut self, title: &str, snippet: &str) -> Self {
        self.hits.push(SearchHit::new(title, snippet));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        lock(&self.queries).clone()
    }
}

#[async_trait]
impl Encyclopedia for MockEncyclopedia {
    async fn search(&self, query: &str, limit: Option<u32>) -> Result<Vec<SearchHit>, ServiceError> {
        lock(&self.queries).push(query.to_string());
        let limit = limit.map(|l| l as usize).unwrap_or(self.hits.len());
        Ok(self.hits.iter().take(limit).cloned().collect())
    }
}
