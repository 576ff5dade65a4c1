use std::io::Write;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bannerkb_model::ImportReport;

use crate::config::AppConfig;
use crate::error::CliError;
use crate::progress::BarProgress;

/// Import a local CSV file, upserting by reference number.
pub(crate) fn run_import(config: &AppConfig, path: PathBuf) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&path)?;
    let source_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("import.csv")
        .to_string();

    let conn = bannerkb_db::open_database(&config.db_path)?;
    let rows = bannerkb_import::parse_csv(&text)?;
    let maps = bannerkb_db::load_resolver_maps(&conn)?;
    let drafts = bannerkb_import::map_rows(&rows, &maps);

    println!(
        "Importing {} ({} rows, {} with a reference number)",
        source_name,
        rows.len(),
        drafts.len(),
    );

    let bar = BarProgress::new(drafts.len());
    let report = bannerkb_import::import_banners(&conn, &drafts, Some(&bar))?;
    bar.finish();

    bannerkb_import::log_import(&conn, "csv", &source_name, &report)?;
    print_report(&report);
    Ok(())
}

/// Replace the entire store with the configured spreadsheet's current
/// contents. Destructive, so it refuses to run without `--yes`.
pub(crate) fn run_sync(config: &AppConfig, yes: bool) -> Result<(), CliError> {
    let sheet = config.require_sheet()?;

    if !yes {
        print!(
            "{} this deletes every stored record and rebuilds from the spreadsheet. Continue? [y/N] ",
            "WARNING:".if_supports_color(Stdout, |t| t.yellow()),
        );
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Fetching spreadsheet {}", sheet.spreadsheet_id);
    let client = bannerkb_sheets::SheetClient::new()?;
    let text = client.fetch_sheet_csv(&sheet)?;

    let conn = bannerkb_db::open_database(&config.db_path)?;
    let rows = bannerkb_import::parse_csv(&text)?;
    let maps = bannerkb_db::load_resolver_maps(&conn)?;
    let drafts = bannerkb_import::map_rows(&rows, &maps);

    let bar = BarProgress::new(drafts.len());
    let report = bannerkb_import::resync_banners(&conn, &drafts, Some(&bar))?;
    bar.finish();

    bannerkb_import::log_import(&conn, "sheet", &sheet.spreadsheet_id, &report)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &ImportReport) {
    println!();
    println!(
        "{} {} created, {} updated, {} failed",
        "Done:".if_supports_color(Stdout, |t| t.green()),
        report.created,
        report.updated,
        report.failed(),
    );
    for failure in &report.failures {
        println!(
            "  {} row {} ({}): {}",
            "failed".if_supports_color(Stdout, |t| t.red()),
            failure.row + 1,
            if failure.image_id.is_empty() {
                "-"
            } else {
                &failure.image_id
            },
            failure.message,
        );
    }
}
