// HTTP data source - polls the ingestion endpoint
use crate::application::data_source::DataSource;
use crate::domain::sample::Batch;
use crate::infrastructure::payload::WirePayload;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    keys: Option<String>,
}

impl HttpSource {
    pub fn new(url: String, keys: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            keys,
        })
    }

    fn build_url(&self) -> String {
        match &self.keys {
            Some(keys) => format!("{}?keys={}", self.url, urlencoding::encode(keys)),
            None => self.url.clone(),
        }
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, interval: Duration) -> Result<Batch> {
        let url = self.build_url();
        tracing::debug!("Fetching samples from {} (interval {:?})", url, interval);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to ingestion endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Ingestion endpoint answered {}: {}", status, body);
        }

        let payload = response
            .json::<WirePayload>()
            .await
            .context("Failed to parse ingestion payload")?;

        Ok(payload.into_batch())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_keys() {
        let source = HttpSource::new(
            "http://127.0.0.1:5000/get/sink/logger/".to_string(),
            Some("\"log\"".to_string()),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            source.build_url(),
            "http://127.0.0.1:5000/get/sink/logger?keys=%22log%22"
        );
    }

    #[test]
    fn test_build_url_without_keys() {
        let source = HttpSource::new(
            "http://127.0.0.1:5000/data".to_string(),
            None,
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(source.build_url(), "http://127.0.0.1:5000/data");
    }
}
