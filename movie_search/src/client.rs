use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::HashSet;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::*;

/// The two calls the page makes against the movie backend.
///
/// `None` for a model falls back to the implementation's configured default.
#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn search(
        &self,
        query: &str,
        top_k: TopK,
        model_name: Option<&str>,
    ) -> Result<SearchResponse>;

    async fn ask(
        &self,
        question: &str,
        query: &str,
        top_k: TopK,
        model_name: Option<&str>,
        llm_model: Option<&str>,
    ) -> Result<QAResponse>;
}

pub struct SearchClient {
    client: Client,
    config: ClientConfig,
}

impl SearchClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.client.get(self.config.endpoint("health")).send().await?;
        read_json(response, "health").await
    }
}

#[async_trait]
impl MovieApi for SearchClient {
    async fn search(
        &self,
        query: &str,
        top_k: TopK,
        model_name: Option<&str>,
    ) -> Result<SearchResponse> {
        let request = SearchRequest {
            query,
            top_k,
            model_name: model_name.unwrap_or(&self.config.model_name),
        };

        log::info!("Searching movies: {:?} (top_k={})", query, top_k);

        let response = self
            .client
            .post(self.config.endpoint("search"))
            .json(&request)
            .send()
            .await?;

        let search: SearchResponse = read_json(response, "search").await?;
        validate_search(&search, top_k)?;

        log::info!(
            "Search returned {} of {} documents",
            search.results.len(),
            search.num_docs
        );
        Ok(search)
    }

    async fn ask(
        &self,
        question: &str,
        query: &str,
        top_k: TopK,
        model_name: Option<&str>,
        llm_model: Option<&str>,
    ) -> Result<QAResponse> {
        let request = QARequest {
            question,
            query,
            top_k,
            model_name: model_name.unwrap_or(&self.config.model_name),
            llm_model: llm_model.unwrap_or(&self.config.llm_model),
        };

        log::info!("Asking {:?} over query {:?} (top_k={})", question, query, top_k);

        let response = self
            .client
            .post(self.config.endpoint("qa"))
            .json(&request)
            .send()
            .await?;

        let answer: QAResponse = read_json(response, "qa").await?;
        validate_answer(&answer)?;

        log::info!("Answer received with {} citations", answer.citations.len());
        Ok(answer)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, endpoint: &'static str) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        log::warn!("{} request failed with status {}", endpoint, status);
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let value: serde_json::Value =
        serde_json::from_str(&body).map_err(|source| ClientError::Decode { endpoint, source })?;

    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
        return Err(ClientError::Backend(message.to_string()));
    }

    serde_json::from_value(value).map_err(|source| ClientError::Decode { endpoint, source })
}

fn validate_search(search: &SearchResponse, requested: TopK) -> Result<()> {
    if search.results.len() > requested.get() as usize {
        return Err(ClientError::Invalid {
            endpoint: "search",
            reason: format!(
                "{} results returned for top_k={}",
                search.results.len(),
                requested
            ),
        });
    }

    if let Some(result) = search.results.iter().find(|r| !r.score.is_finite()) {
        return Err(ClientError::Invalid {
            endpoint: "search",
            reason: format!("non-finite score for {}", result.doc_id),
        });
    }

    Ok(())
}

fn validate_answer(answer: &QAResponse) -> Result<()> {
    let used: HashSet<i64> = answer
        .results_used
        .iter()
        .filter_map(|r| r.get("movie_id").and_then(|id| id.as_i64()))
        .collect();

    // Older backends omit ids from results_used; nothing to check against then.
    if used.is_empty() {
        return Ok(());
    }

    match answer.citations.iter().find(|c| !used.contains(&c.movie_id)) {
        Some(citation) => Err(ClientError::Invalid {
            endpoint: "qa",
            reason: format!(
                "citation {} refers to movie {} which was not used as evidence",
                citation.reference, citation.movie_id
            ),
        }),
        None => Ok(()),
    }
}
