use crate::domain::model::{DecodedText, RewriteOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Where `path` ends up, for reporting.
    fn resolve(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> Option<&str>;
    fn input_path(&self) -> Option<&str>;
    fn output_dir(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn user_agent(&self) -> Option<&str>;
    fn headers(&self) -> HashMap<String, String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<DecodedText>;
    fn transform(&self, input: &DecodedText) -> RewriteOutcome;
    async fn load(&self, outcome: &RewriteOutcome, filename: &str) -> Result<String>;
}
