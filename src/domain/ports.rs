use crate::domain::model::{CardLookupResult, DeckReport, ValidationRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn chunk_size(&self) -> usize;
    fn concurrent_requests(&self) -> usize;
    fn timeout_seconds(&self) -> u64;
    fn user_agent(&self) -> &str;
    /// Format used when neither the request nor inference supplies one.
    fn default_format(&self) -> &str;
    fn include_commanders(&self) -> bool;
    fn output_path(&self) -> &str;
}

/// Card database capability: resolve names to card records.
///
/// Implementations degrade transport failures to "not found" results rather
/// than returning an error.
#[async_trait]
pub trait CardLookup: Send + Sync {
    async fn fetch_card_data(&self, card_names: &[String]) -> Result<Vec<CardLookupResult>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ValidationRequest>;
    async fn transform(&self, request: ValidationRequest) -> Result<DeckReport>;
    async fn load(&self, report: &DeckReport) -> Result<String>;
}
