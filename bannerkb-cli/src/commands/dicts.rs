use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bannerkb_model::DictionaryKind;

use crate::config::AppConfig;
use crate::error::CliError;

const KINDS: &[(&str, DictionaryKind)] = &[
    ("employment-types", DictionaryKind::EmploymentTypes),
    ("areas", DictionaryKind::Areas),
    ("main-appeals", DictionaryKind::MainAppeals),
    ("visual-types", DictionaryKind::VisualTypes),
    ("main-colors", DictionaryKind::MainColors),
    ("atmospheres", DictionaryKind::Atmospheres),
];

/// List the reference dictionaries, or one dictionary's entries.
pub(crate) fn run_dicts(config: &AppConfig, name: Option<String>) -> Result<(), CliError> {
    let conn = bannerkb_db::open_database(&config.db_path)?;

    let Some(name) = name else {
        for (label, kind) in KINDS {
            let count = match kind {
                DictionaryKind::MainColors => bannerkb_db::list_main_colors(&conn)?.len(),
                _ => bannerkb_db::list_dictionary(&conn, *kind)?.len(),
            };
            println!("  {label:<18} {count} entries");
        }
        return Ok(());
    };

    let kind = KINDS
        .iter()
        .find(|(label, _)| *label == name)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| {
            CliError::other(format!(
                "unknown dictionary '{}'. One of: {}",
                name,
                KINDS
                    .iter()
                    .map(|(l, _)| *l)
                    .collect::<Vec<_>>()
                    .join(", "),
            ))
        })?;

    if kind == DictionaryKind::MainColors {
        for color in bannerkb_db::list_main_colors(&conn)? {
            println!(
                "  {:<22} {}  {}",
                color.code.if_supports_color(Stdout, |t| t.cyan()),
                color.name,
                color.hex_color.as_deref().unwrap_or(""),
            );
        }
        return Ok(());
    }

    for item in bannerkb_db::list_dictionary(&conn, kind)? {
        println!(
            "  {:<22} {}",
            item.code.if_supports_color(Stdout, |t| t.cyan()),
            item.name,
        );
    }
    Ok(())
}
