use crate::core::decode::decode_text;
use crate::core::fetcher::ContentFetcher;
use crate::core::rewriter::rewrite_lines;
use crate::core::{ConfigProvider, DecodedText, Pipeline, RewriteOutcome, Storage};
use crate::utils::error::{ConvertError, Result};
use std::time::Duration;

/// Fetches a subscription (or reads already decoded text from a local file),
/// rewrites it and saves the result through `Storage`.
pub struct SubscriptionPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    fetcher: ContentFetcher,
}

impl<S: Storage, C: ConfigProvider> SubscriptionPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let fetcher = ContentFetcher::with_headers(
            Duration::from_secs(config.timeout_seconds()),
            config.user_agent(),
            &config.headers(),
        )?;
        Ok(Self {
            storage,
            config,
            fetcher,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SubscriptionPipeline<S, C> {
    async fn extract(&self) -> Result<DecodedText> {
        // 本地檔案視為已解碼的文字，不再經過 base64
        if let Some(path) = self.config.input_path() {
            tracing::debug!("Reading decoded text from: {}", path);
            let bytes = tokio::fs::read(path).await?;
            return Ok(decode_text(bytes));
        }

        match self.config.source_url() {
            Some(url) => self.fetcher.fetch(url).await,
            None => Err(ConvertError::MissingConfigError {
                field: "url".to_string(),
            }),
        }
    }

    fn transform(&self, input: &DecodedText) -> RewriteOutcome {
        rewrite_lines(&input.text)
    }

    async fn load(&self, outcome: &RewriteOutcome, filename: &str) -> Result<String> {
        let text = outcome.to_text();
        tracing::debug!("Writing {} bytes to {}", text.len(), filename);
        self.storage.write_file(filename, text.as_bytes()).await?;
        Ok(self.storage.resolve(filename))
    }
}
