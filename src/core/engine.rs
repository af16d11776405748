use crate::core::{Pipeline, RewriteOutcome};
use crate::utils::error::Result;

pub struct ConvertEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ConvertEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract and transform. Saving is a separate, optional step.
    pub async fn run(&self) -> Result<RewriteOutcome> {
        tracing::info!("Fetching subscription...");
        let input = self.pipeline.extract().await?;
        tracing::info!(
            "Got {} lines of {} text",
            input.text.trim().lines().count(),
            input.encoding
        );

        let outcome = self.pipeline.transform(&input);
        tracing::info!(
            "Rewrote {} links ({} malformed, {} passed through)",
            outcome.forwarded(),
            outcome.malformed(),
            outcome.passthrough()
        );
        if outcome.malformed() > 0 {
            tracing::warn!("{} trojan lines could not be parsed", outcome.malformed());
        }

        Ok(outcome)
    }

    pub async fn save(&self, outcome: &RewriteOutcome, filename: &str) -> Result<String> {
        let path = self.pipeline.load(outcome, filename).await?;
        tracing::info!("Output saved to: {}", path);
        Ok(path)
    }
}
