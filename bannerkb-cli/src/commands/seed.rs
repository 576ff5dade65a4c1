use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::config::AppConfig;
use crate::error::CliError;

/// Seed (or re-seed) the reference dictionaries. Idempotent: existing codes
/// get their names and ordering refreshed, nothing is deleted.
pub(crate) fn run_seed(config: &AppConfig) -> Result<(), CliError> {
    let conn = bannerkb_db::open_database(&config.db_path)?;
    let stats = bannerkb_db::seed_dictionaries(&conn)?;

    println!(
        "{}",
        "Dictionaries seeded".if_supports_color(Stdout, |t| t.green())
    );
    println!("  employment types: {}", stats.employment_types);
    println!("  areas:            {}", stats.areas);
    println!("  main appeals:     {}", stats.main_appeals);
    println!("  visual types:     {}", stats.visual_types);
    println!("  main colors:      {}", stats.main_colors);
    println!("  atmospheres:      {}", stats.atmospheres);
    Ok(())
}
