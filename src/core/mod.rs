pub mod decode;
pub mod engine;
pub mod fetcher;
pub mod pipeline;
pub mod rewriter;

pub use crate::domain::model::{DecodedText, RewriteOutcome, RewrittenLine, TextEncoding};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
