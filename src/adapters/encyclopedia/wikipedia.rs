//! Wikipedia search adapter (MediaWiki `action=query&list=search`).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::EncyclopediaConfig;
use crate::domain::knowledge::SearchHit;
use crate::ports::{Encyclopedia, ServiceError};

const SERVICE: &str = "encyclopedia";

/// MediaWiki search client.
#[derive(Debug, Clone)]
pub struct WikipediaSearch {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl WikipediaSearch {
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ServiceError::network(SERVICE, e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn from_config(config: &EncyclopediaConfig) -> Result<Self, ServiceError> {
        Self::new(config.base_url.clone(), &config.user_agent, config.timeout())
    }

    fn search_params(query: &str, limit: Option<u32>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("list", "search".to_string()),
            ("srsort", "relevance".to_string()),
            ("srenablerewrites", "on".to_string()),
            ("srprop", "snippet".to_string()),
            ("srsearch", query.to_string()),
        ];
        if let Some(limit) = limit {
            params.push(("srlimit", limit.to_string()));
        }
        params
    }
}

#[async_trait]
impl Encyclopedia for WikipediaSearch {
    async fn search(&self, query: &str, limit: Option<u32>) -> Result<Vec<SearchHit>, ServiceError> {
        tracing::debug!(query, ?limit, "Searching encyclopedia");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&Self::search_params(query, limit))
            .send()
            .await
            .map_err(|e| ServiceError::from_reqwest(SERVICE, e, self.timeout.as_secs()))?;

        if !response.status().is_success() {
            tracing::warn!(status = response.status().as_u16(), "Encyclopedia search failed");
            return Ok(Vec::new());
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::parse(SERVICE, e.to_string()))?;

        Ok(body.query.map(|q| q.search).unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_request_relevance_sorted_snippets() {
        let params = WikipediaSearch::search_params("rust language", Some(1));
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("action"), Some("query"));
        assert_eq!(get("list"), Some("search"));
        assert_eq!(get("srsort"), Some("relevance"));
        assert_eq!(get("srprop"), Some("snippet"));
        assert_eq!(get("srsearch"), Some("rust language"));
        assert_eq!(get("srlimit"), Some("1"));
    }

    #[test]
    fn no_limit_leaves_srlimit_out() {
        let params = WikipediaSearch::search_params("x", None);
        assert!(params.iter().all(|(k, _)| *k != "srlimit"));
    }

    #[test]
    fn response_parses_hits() {
        let body: SearchResponse = serde_json::from_str(
            r#"{"batchcomplete":"","query":{"searchinfo":{"totalhits":2},"search":[
                {"ns":0,"title":"Rust (programming language)","pageid":1,"snippet":"<span class=\"searchmatch\">Rust</span> is a"}
            ]}}"#,
        )
        .unwrap();
        let hits = body.query.unwrap().search;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Rust (programming language)");
    }

    #[test]
    fn error_body_has_no_hits() {
        let body: SearchResponse =
            serde_json::from_str(r#"{"error":{"code":"nosrsearch"}}"#).unwrap();
        assert!(body.query.is_none());
    }
}
