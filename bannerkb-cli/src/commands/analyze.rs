//! AI trend summary over the top CTR hits for a search.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::commands::search::{FilterArgs, build_filter};
use crate::config::AppConfig;
use crate::error::CliError;

/// Search with the given filter, take the top hits, and ask the model for a
/// proposal-ready summary of why they performed.
pub(crate) fn run_analyze(config: &AppConfig, args: FilterArgs) -> Result<(), CliError> {
    let conn = bannerkb_db::open_database(&config.db_path)?;
    let mut filter = build_filter(&conn, &args)?;
    if filter.limit.is_none() {
        filter.limit = Some(10);
    }

    let hits = bannerkb_db::search_banners(&conn, &filter)?;
    if hits.is_empty() {
        println!("No banners matched; nothing to analyze.");
        return Ok(());
    }

    let client = bannerkb_ai::AiClient::new(config.require_ai()?)?;
    println!("Analyzing {} banners...", hits.len());
    let summary = client.summarize_trends(&filter, &hits)?;

    println!();
    println!(
        "{}",
        "Trend summary".if_supports_color(Stdout, |t| t.bold())
    );
    println!();
    println!("{summary}");
    Ok(())
}
