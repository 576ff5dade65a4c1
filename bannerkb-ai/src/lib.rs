//! OpenAI-backed helpers: tag suggestion for banner images and trend
//! summaries over search results.

mod client;
mod prompt;
mod types;

pub use client::{AiClient, AiConfig, AiError};
pub use prompt::{TAGGING_SYSTEM_PROMPT, TREND_SYSTEM_PROMPT};
