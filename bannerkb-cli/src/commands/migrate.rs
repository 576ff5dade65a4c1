//! Migrate externally hosted banner images into local media storage.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bannerkb_import::{is_external_storage_url, normalize_image_url};
use bannerkb_model::{MigrationStats, SearchFilter};

use crate::config::AppConfig;
use crate::error::CliError;

/// Download every banner image still hosted on Google Drive or Dropbox and
/// repoint the record at the local copy. Failures keep the original URL so
/// the run can be repeated.
pub(crate) fn run_migrate_images(config: &AppConfig) -> Result<(), CliError> {
    let conn = bannerkb_db::open_database(&config.db_path)?;
    let banners = bannerkb_db::search_banners(&conn, &SearchFilter::default())?;
    let client = bannerkb_sheets::SheetClient::new()?;

    let mut stats = MigrationStats::default();
    for banner in &banners {
        let Some(url) = banner.banner_image_url.as_deref() else {
            stats.skipped += 1;
            continue;
        };
        if !is_external_storage_url(url) {
            stats.skipped += 1;
            continue;
        }

        let fetch_url = normalize_image_url(url);
        match client.download_image(&fetch_url) {
            Ok((bytes, content_type)) => {
                let ext = extension_for(&content_type);
                let key = format!("banners/{}.{ext}", banner.knowledge_id);
                let target = config
                    .media_dir
                    .join("banners")
                    .join(format!("{}.{ext}", banner.knowledge_id));
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&target, &bytes)?;
                bannerkb_db::update_image_url(
                    &conn,
                    &banner.knowledge_id,
                    Some(&key),
                    &target.display().to_string(),
                )?;
                stats.migrated += 1;
                println!(
                    "  {} {} ({} bytes)",
                    "migrated".if_supports_color(Stdout, |t| t.green()),
                    banner.knowledge_id,
                    bytes.len(),
                );
            }
            Err(e) => {
                stats.failed += 1;
                log::warn!("image migration failed for {}: {}", banner.knowledge_id, e);
                println!(
                    "  {} {} ({})",
                    "failed".if_supports_color(Stdout, |t| t.red()),
                    banner.knowledge_id,
                    e,
                );
            }
        }
    }

    println!();
    println!(
        "{} {} migrated, {} failed, {} skipped",
        "Done:".if_supports_color(Stdout, |t| t.green()),
        stats.migrated,
        stats.failed,
        stats.skipped,
    );
    Ok(())
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type.split(';').next().unwrap_or("").trim() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        _ => "png",
    }
}
