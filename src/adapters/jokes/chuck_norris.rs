//! Chuck Norris jokes adapter.
//!
//! `GET {base}/categories` lists categories; `GET {base}/random[?category=..]`
//! returns one joke. Several jokes are fetched concurrently through [`FanOut`].

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::adapters::concurrency::FanOut;
use crate::config::JokesConfig;
use crate::ports::{JokeService, ServiceError};

const SERVICE: &str = "jokes";

/// Jokes API client.
#[derive(Debug, Clone)]
pub struct ChuckNorrisJokes {
    client: Client,
    base_url: String,
    timeout: Duration,
    fan_out: FanOut,
}

impl ChuckNorrisJokes {
    pub fn new(base_url: impl Into<String>, timeout: Duration, max_concurrency: usize) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::network(SERVICE, e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            fan_out: FanOut::new(max_concurrency, timeout),
        })
    }

    pub fn from_config(config: &JokesConfig) -> Result<Self, ServiceError> {
        Self::new(config.base_url.clone(), config.timeout(), config.max_concurrency)
    }

    fn categories_url(&self) -> String {
        format!("{}/categories", self.base_url)
    }

    fn random_url(&self) -> String {
        format!("{}/random", self.base_url)
    }
}

async fn fetch_random(
    client: Client,
    url: String,
    category: Option<String>,
    timeout_secs: u64,
) -> Result<String, ServiceError> {
    let mut request = client.get(&url);
    if let Some(category) = &category {
        request = request.query(&[("category", category.as_str())]);
    }

    let response = request
        .send()
        .await
        .map_err(|e| ServiceError::from_reqwest(SERVICE, e, timeout_secs))?;

    if !response.status().is_success() {
        return Err(ServiceError::status(SERVICE, response.status().as_u16()));
    }

    let joke: RandomJoke = response
        .json()
        .await
        .map_err(|e| ServiceError::parse(SERVICE, e.to_string()))?;
    Ok(joke.value)
}

#[async_trait]
impl JokeService for ChuckNorrisJokes {
    async fn categories(&self) -> Result<Vec<String>, ServiceError> {
        tracing::debug!(url = %self.categories_url(), "Fetching joke categories");

        let response = self
            .client
            .get(self.categories_url())
            .send()
            .await
            .map_err(|e| ServiceError::from_reqwest(SERVICE, e, self.timeout.as_secs()))?;

        if !response.status().is_success() {
            return Err(ServiceError::status(SERVICE, response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ServiceError::parse(SERVICE, e.to_string()))
    }

    async fn random_jokes(
        &self,
        category: Option<&str>,
        count: usize,
    ) -> Result<Vec<String>, ServiceError> {
        tracing::debug!(?category, count, "Fetching random jokes");
        let timeout_secs = self.timeout.as_secs();
        let category = category.map(str::to_string);

        if count == 1 {
            let joke = fetch_random(self.client.clone(), self.random_url(), category, timeout_secs).await?;
            return Ok(vec![joke]);
        }

        let url = self.random_url();
        self.fan_out
            .run(SERVICE, count, |_| {
                fetch_random(self.client.clone(), url.clone(), category.clone(), timeout_secs)
            })
            .await
    }
}

#[derive(Debug, Deserialize)]
struct RandomJoke {
    value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jokes() -> ChuckNorrisJokes {
        ChuckNorrisJokes::new("https://api.chucknorris.io/jokes/", Duration::from_secs(5), 3).unwrap()
    }

    #[test]
    fn urls_follow_the_api_layout() {
        let jokes = jokes();
        assert_eq!(jokes.categories_url(), "https://api.chucknorris.io/jokes/categories");
        assert_eq!(jokes.random_url(), "https://api.chucknorris.io/jokes/random");
    }

    #[test]
    fn fan_out_uses_configured_bound() {
        let jokes = ChuckNorrisJokes::from_config(&JokesConfig {
            max_concurrency: 2,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(jokes.fan_out.max_concurrency(), 2);
    }

    #[test]
    fn random_joke_body_parses() {
        let joke: RandomJoke = serde_json::from_str(
            r#"{"categories":["dev"],"id":"x1","url":"https://api.chucknorris.io/jokes/x1","value":"Chuck Norris writes code that optimizes itself."}"#,
        )
        .unwrap();
        assert_eq!(joke.value, "Chuck Norris writes code that optimizes itself.");
    }

    #[tokio::test]
    async fn zero_jokes_makes_no_request() {
        let jokes = ChuckNorrisJokes::new("http://127.0.0.1:9", Duration::from_secs(1), 2).unwrap();
        assert!(jokes.random_jokes(None, 0).await.unwrap().is_empty());
    }
}
