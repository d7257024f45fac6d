use crate::domain::model::{CardLookupResult, ScryfallCard};
use crate::domain::ports::{CardLookup, ConfigProvider};
use crate::utils::error::Result;
use crate::utils::validation::MAX_LOOKUP_CHUNK_SIZE;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.scryfall.com";
pub const DEFAULT_USER_AGENT: &str = concat!("deck-validator/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 2;

#[derive(Debug, Serialize)]
struct CardIdentifier<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct CollectionRequest<'a> {
    identifiers: Vec<CardIdentifier<'a>>,
}

#[derive(Debug, Deserialize)]
struct NotFoundIdentifier {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct CollectionResponse {
    #[serde(default)]
    data: Vec<ScryfallCard>,
    #[serde(default)]
    not_found: Vec<NotFoundIdentifier>,
}

/// Card lookup against Scryfall's `/cards/collection` endpoint.
pub struct ScryfallClient {
    client: Client,
    endpoint: String,
    chunk_size: usize,
    concurrent_requests: usize,
}

impl ScryfallClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::build(
            endpoint.into(),
            MAX_LOOKUP_CHUNK_SIZE,
            DEFAULT_CONCURRENT_REQUESTS,
            DEFAULT_TIMEOUT_SECONDS,
            DEFAULT_USER_AGENT,
        )
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::build(
            config.api_endpoint().to_string(),
            config.chunk_size(),
            config.concurrent_requests(),
            config.timeout_seconds(),
            config.user_agent(),
        )
    }

    fn build(
        endpoint: String,
        chunk_size: usize,
        concurrent_requests: usize,
        timeout_seconds: u64,
        user_agent: &str,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            chunk_size: chunk_size.clamp(1, MAX_LOOKUP_CHUNK_SIZE),
            concurrent_requests: concurrent_requests.max(1),
        })
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.clamp(1, MAX_LOOKUP_CHUNK_SIZE);
        self
    }

    async fn request_chunk(&self, chunk: &[String]) -> Result<Vec<CardLookupResult>> {
        let url = format!("{}/cards/collection", self.endpoint);
        let body = CollectionRequest {
            identifiers: chunk
                .iter()
                .map(|name| CardIdentifier { name: name.trim() })
                .collect(),
        };

        tracing::debug!("POST {} with {} identifiers", url, chunk.len());
        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: CollectionResponse = response.json().await?;
        tracing::debug!(
            "Collection response: {} found, {} not found",
            payload.data.len(),
            payload.not_found.len()
        );

        let found = payload.data.into_iter().map(CardLookupResult::found);
        let missing = payload
            .not_found
            .into_iter()
            .map(|identifier| CardLookupResult::not_found(identifier.name));

        Ok(found.chain(missing).collect())
    }

    /// One chunk, with any failure degraded to "not found" for every name in it.
    async fn lookup_chunk(&self, chunk: Vec<String>) -> Vec<CardLookupResult> {
        match self.request_chunk(&chunk).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(
                    "Card lookup failed for a chunk of {} names, marking them not found: {}",
                    chunk.len(),
                    e
                );
                chunk.into_iter().map(CardLookupResult::not_found).collect()
            }
        }
    }
}

#[async_trait]
impl CardLookup for ScryfallClient {
    async fn fetch_card_data(&self, card_names: &[String]) -> Result<Vec<CardLookupResult>> {
        let chunks: Vec<Vec<String>> = card_names
            .chunks(self.chunk_size)
            .map(<[String]>::to_vec)
            .collect();
        tracing::debug!(
            "Fetching {} names in {} chunks of up to {}",
            card_names.len(),
            chunks.len(),
            self.chunk_size
        );

        let per_chunk: Vec<Vec<CardLookupResult>> = stream::iter(chunks)
            .map(|chunk| self.lookup_chunk(chunk))
            .buffered(self.concurrent_requests)
            .collect()
            .await;

        Ok(per_chunk.into_iter().flatten().collect())
    }
}
