use crate::app::prompt::Prompter;
use crate::core::engine::ConvertEngine;
use crate::core::{Pipeline, RewriteOutcome};
use crate::utils::error::Result;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavePolicy {
    Ask,
    To(String),
    Skip,
}

#[derive(Debug)]
pub struct SessionReport {
    pub outcome: RewriteOutcome,
    pub saved_to: Option<String>,
}

/// Fetch, rewrite and print, then save according to `policy`.
/// Fetch and decode failures are returned untouched for the caller to print.
pub async fn run_session<P, R, W>(
    engine: &ConvertEngine<P>,
    prompter: &mut Prompter<R, W>,
    policy: SavePolicy,
) -> Result<SessionReport>
where
    P: Pipeline,
    R: BufRead,
    W: Write,
{
    let outcome = engine.run().await?;

    prompter.say("\n转换后的内容:")?;
    prompter.say(&outcome.to_text())?;

    let filename = match policy {
        SavePolicy::Skip => None,
        SavePolicy::To(name) => Some(name),
        SavePolicy::Ask => {
            if prompter.confirm_save()? {
                Some(prompter.ask_filename()?)
            } else {
                None
            }
        }
    };

    let saved_to = match filename {
        Some(name) => {
            let path = engine.save(&outcome, &name).await?;
            prompter.say(&format!("内容已保存到文件: {}", path))?;
            Some(path)
        }
        None => None,
    };

    Ok(SessionReport { outcome, saved_to })
}
