// Data source trait - the ingestion collaborator
use crate::domain::sample::Batch;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the samples available for the current polling period.
    /// An empty batch means no data is available yet.
    async fn fetch(&self, interval: Duration) -> anyhow::Result<Batch>;
}
