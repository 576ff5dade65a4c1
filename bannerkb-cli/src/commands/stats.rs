use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bannerkb_model::DictionaryKind;

use crate::config::AppConfig;
use crate::error::CliError;

pub(crate) fn run_stats(config: &AppConfig) -> Result<(), CliError> {
    let conn = bannerkb_db::open_database(&config.db_path)?;
    let stats = bannerkb_db::knowledge_stats(&conn)?;

    println!(
        "{}",
        "Knowledge base".if_supports_color(Stdout, |t| t.bold())
    );
    println!("  banners:          {}", stats.banners);
    println!("  with image:       {}", stats.with_image);
    println!("  appeal links:     {}", stats.main_appeal_rows);
    println!("  import runs:      {}", stats.imports);
    println!("  average CTR:      {:.2}%", stats.avg_ctr);
    println!();
    println!("{}", "Dictionaries".if_supports_color(Stdout, |t| t.bold()));
    for kind in [
        DictionaryKind::EmploymentTypes,
        DictionaryKind::Areas,
        DictionaryKind::MainAppeals,
        DictionaryKind::VisualTypes,
        DictionaryKind::Atmospheres,
    ] {
        let count = bannerkb_db::list_dictionary(&conn, kind)?.len();
        println!("  {:<18} {}", kind.table(), count);
    }
    println!(
        "  {:<18} {}",
        DictionaryKind::MainColors.table(),
        bannerkb_db::list_main_colors(&conn)?.len(),
    );
    println!();
    println!("  database: {}", config.db_path.display());
    if let Some(path) = crate::config::config_path() {
        println!("  config:   {}", path.display());
    }
    Ok(())
}

pub(crate) fn run_logs(config: &AppConfig, limit: Option<u32>) -> Result<(), CliError> {
    let conn = bannerkb_db::open_database(&config.db_path)?;
    let logs = bannerkb_db::list_import_logs(&conn, limit)?;

    if logs.is_empty() {
        println!("No imports recorded yet.");
        return Ok(());
    }

    for log in logs {
        println!(
            "  {}  {:<5} {:<30} +{} ~{} !{}",
            log.imported_at,
            log.source_type,
            log.source_name,
            log.records_created,
            log.records_updated,
            log.records_failed,
        );
    }
    Ok(())
}
