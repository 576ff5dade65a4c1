//! Batch reconciliation against the store by reference number.
//!
//! Each incoming draft is either NEW (no stored record shares its
//! `image_id`) or EXISTING. NEW drafts get a fresh `knowledge_id`;
//! EXISTING records keep theirs forever. Updates overwrite scalars,
//! fall back to stored values for optionals the draft does not carry
//! (notably the banner image URL), and rewrite both appeal sets whole.
//!
//! There is no batch-level transaction: each record's writes commit inside
//! their own transaction, rows already committed stay committed if a later
//! row fails, and a per-row store error is recorded rather than aborting
//! the batch. Duplicate `image_id`s within one batch are the caller's
//! problem; the second occurrence simply updates the first.

use bannerkb_model::types::{BannerDraft, ImportLog, ImportReport, RowFailure};
use bannerkb_db::operations::{self, OperationError};
use rusqlite::Connection;
use thiserror::Error;

use crate::progress::ImportProgress;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

enum Outcome {
    Created,
    Updated,
}

/// Reconcile a batch of mapped drafts against the store (upsert).
///
/// Existing records are matched by `image_id`. Returns disjoint tallies:
/// created + updated + failures = drafts passed in.
pub fn import_banners(
    conn: &Connection,
    drafts: &[BannerDraft],
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportReport, ImportError> {
    let mut report = ImportReport::default();

    for (index, draft) in drafts.iter().enumerate() {
        // The mapper already filtered keyless rows; a draft built some
        // other way can still arrive without one.
        if draft.image_id.trim().is_empty() {
            report.failures.push(RowFailure {
                row: index,
                image_id: String::new(),
                message: "missing reference number (参照番号)".to_string(),
            });
            continue;
        }

        match upsert_one(conn, draft) {
            Ok(Outcome::Created) => report.created += 1,
            Ok(Outcome::Updated) => report.updated += 1,
            Err(e) => {
                log::warn!("row {} ({}): {}", index, draft.image_id, e);
                report.failures.push(RowFailure {
                    row: index,
                    image_id: draft.image_id.clone(),
                    message: e.to_string(),
                });
            }
        }

        if let Some(p) = progress {
            p.on_row(index + 1, drafts.len(), &draft.image_id);
        }
    }

    Ok(report)
}

/// Full resync from an authoritative sheet export.
///
/// Destructive: clears the entire store first, then creates every draft as
/// NEW. Nothing is merged or preserved because nothing survives the clear.
pub fn resync_banners(
    conn: &Connection,
    drafts: &[BannerDraft],
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportReport, ImportError> {
    let removed = operations::delete_all_banners(conn)?;
    log::info!("resync: cleared {} existing records", removed);

    let mut report = ImportReport::default();

    for (index, draft) in drafts.iter().enumerate() {
        if draft.image_id.trim().is_empty() {
            report.failures.push(RowFailure {
                row: index,
                image_id: String::new(),
                message: "missing reference number (参照番号)".to_string(),
            });
            continue;
        }

        match create_one(conn, draft) {
            Ok(()) => report.created += 1,
            Err(e) => {
                log::warn!("row {} ({}): {}", index, draft.image_id, e);
                report.failures.push(RowFailure {
                    row: index,
                    image_id: draft.image_id.clone(),
                    message: e.to_string(),
                });
            }
        }

        if let Some(p) = progress {
            p.on_row(index + 1, drafts.len(), &draft.image_id);
        }
    }

    Ok(report)
}

/// Create-or-update one record inside its own transaction, so a failure
/// cannot leave scalars and appeal sets half-rewritten.
fn upsert_one(conn: &Connection, draft: &BannerDraft) -> Result<Outcome, ImportError> {
    let tx = conn.unchecked_transaction()?;

    let outcome = match operations::find_by_image_id(&tx, &draft.image_id)? {
        Some(existing) => {
            operations::update_banner(&tx, &existing, draft)?;
            operations::replace_main_appeals(&tx, &existing.knowledge_id, &draft.main_appeals)?;
            operations::replace_sub_appeals(&tx, &existing.knowledge_id, &draft.sub_appeals)?;
            Outcome::Updated
        }
        None => {
            insert_fresh(&tx, draft)?;
            Outcome::Created
        }
    };

    tx.commit()?;
    Ok(outcome)
}

fn create_one(conn: &Connection, draft: &BannerDraft) -> Result<(), ImportError> {
    let tx = conn.unchecked_transaction()?;
    insert_fresh(&tx, draft)?;
    tx.commit()?;
    Ok(())
}

fn insert_fresh(conn: &Connection, draft: &BannerDraft) -> Result<(), ImportError> {
    let knowledge_id = generate_knowledge_id(&draft.image_id);
    operations::insert_banner(conn, &knowledge_id, draft, None)?;
    operations::replace_main_appeals(conn, &knowledge_id, &draft.main_appeals)?;
    operations::replace_sub_appeals(conn, &knowledge_id, &draft.sub_appeals)?;
    Ok(())
}

/// Generate a fresh knowledge ID: "BK" + unix millis + a short digest
/// suffix so two records created in the same millisecond stay distinct.
pub fn generate_knowledge_id(image_id: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let digest = md5::compute(format!("{image_id}:{millis}"));
    let hex = format!("{digest:x}");
    format!("BK{millis}{}", &hex[..9])
}

/// Log an import run in the import_log table.
pub fn log_import(
    conn: &Connection,
    source_type: &str,
    source_name: &str,
    report: &ImportReport,
) -> Result<i64, ImportError> {
    let entry = ImportLog {
        id: 0,
        source_type: source_type.to_string(),
        source_name: source_name.to_string(),
        imported_at: chrono::Utc::now().to_rfc3339(),
        records_created: report.created as i64,
        records_updated: report.updated as i64,
        records_failed: report.failed() as i64,
    };
    let id = operations::insert_import_log(conn, &entry)?;
    Ok(id)
}
