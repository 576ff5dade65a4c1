//! CRUD operations for banner knowledge records.

use bannerkb_model::types::{BannerDraft, BannerRecord, ImportLog};
use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

// ── Banner Record Operations ────────────────────────────────────────────────

/// Insert a new banner record with a caller-assigned knowledge ID.
///
/// Appeal sets are written separately via [`replace_main_appeals`] and
/// [`replace_sub_appeals`].
pub fn insert_banner(
    conn: &Connection,
    knowledge_id: &str,
    draft: &BannerDraft,
    image_key: Option<&str>,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO banner_knowledge (
             knowledge_id, image_id, company_name, job_title, employment_type,
             area, impressions, clicks, ctr, visual_type, main_color,
             atmosphere, extracted_text, notes, banner_image_key, banner_image_url
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            knowledge_id,
            draft.image_id,
            draft.company_name,
            draft.job_title,
            draft.employment_type,
            draft.area,
            draft.impressions,
            draft.clicks,
            draft.ctr,
            draft.visual_type,
            draft.main_color,
            draft.atmosphere,
            draft.extracted_text,
            draft.notes,
            image_key,
            draft.banner_image_url,
        ],
    )?;
    Ok(())
}

/// Update an existing record with an incoming draft, preserving stored
/// values for optional fields the draft does not supply.
///
/// Metrics (impressions, clicks, ctr) always take the incoming values;
/// `banner_image_key` is never touched by imports. `updated_at` is
/// refreshed.
pub fn update_banner(
    conn: &Connection,
    existing: &BannerRecord,
    draft: &BannerDraft,
) -> Result<(), OperationError> {
    let merge = |incoming: &Option<String>, stored: &Option<String>| -> Option<String> {
        incoming.clone().or_else(|| stored.clone())
    };

    let changed = conn.execute(
        "UPDATE banner_knowledge SET
             company_name = ?2, job_title = ?3, employment_type = ?4, area = ?5,
             impressions = ?6, clicks = ?7, ctr = ?8, visual_type = ?9,
             main_color = ?10, atmosphere = ?11, extracted_text = ?12,
             notes = ?13, banner_image_url = ?14, updated_at = datetime('now')
         WHERE knowledge_id = ?1",
        params![
            existing.knowledge_id,
            merge(&draft.company_name, &existing.company_name),
            merge(&draft.job_title, &existing.job_title),
            merge(&draft.employment_type, &existing.employment_type),
            merge(&draft.area, &existing.area),
            draft.impressions,
            draft.clicks,
            draft.ctr,
            merge(&draft.visual_type, &existing.visual_type),
            merge(&draft.main_color, &existing.main_color),
            merge(&draft.atmosphere, &existing.atmosphere),
            merge(&draft.extracted_text, &existing.extracted_text),
            merge(&draft.notes, &existing.notes),
            merge(&draft.banner_image_url, &existing.banner_image_url),
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "banner".to_string(),
            id: existing.knowledge_id.clone(),
        });
    }
    Ok(())
}

/// Narrow update for the banner image reference only.
pub fn update_image_url(
    conn: &Connection,
    knowledge_id: &str,
    image_key: Option<&str>,
    image_url: &str,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE banner_knowledge
         SET banner_image_key = ?2, banner_image_url = ?3, updated_at = datetime('now')
         WHERE knowledge_id = ?1",
        params![knowledge_id, image_key, image_url],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "banner".to_string(),
            id: knowledge_id.to_string(),
        });
    }
    Ok(())
}

/// Find a record by its business key (the reference number), with appeal
/// sets merged on.
pub fn find_by_image_id(
    conn: &Connection,
    image_id: &str,
) -> Result<Option<BannerRecord>, OperationError> {
    find_one(conn, "image_id", image_id)
}

/// Find a record by its knowledge ID, with appeal sets merged on.
pub fn find_by_knowledge_id(
    conn: &Connection,
    knowledge_id: &str,
) -> Result<Option<BannerRecord>, OperationError> {
    find_one(conn, "knowledge_id", knowledge_id)
}

fn find_one(
    conn: &Connection,
    key_column: &str,
    key: &str,
) -> Result<Option<BannerRecord>, OperationError> {
    let sql = format!("{} WHERE {} = ?1", SELECT_BANNER, key_column);
    let mut stmt = conn.prepare(&sql)?;
    let result = stmt.query_row(params![key], row_to_banner);
    match result {
        Ok(mut record) => {
            attach_appeals(conn, &mut record)?;
            Ok(Some(record))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Delete a record (appeal rows cascade). Errors if the ID is unknown.
pub fn delete_banner(conn: &Connection, knowledge_id: &str) -> Result<(), OperationError> {
    let changed = conn.execute(
        "DELETE FROM banner_knowledge WHERE knowledge_id = ?1",
        params![knowledge_id],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "banner".to_string(),
            id: knowledge_id.to_string(),
        });
    }
    Ok(())
}

/// Delete every banner record and its appeal rows. Returns the number of
/// records removed. Destructive; used only by the full-resync flow.
pub fn delete_all_banners(conn: &Connection) -> Result<usize, OperationError> {
    conn.execute("DELETE FROM banner_sub_appeals", [])?;
    conn.execute("DELETE FROM banner_main_appeals", [])?;
    let removed = conn.execute("DELETE FROM banner_knowledge", [])?;
    Ok(removed)
}

// ── Appeal Set Operations ───────────────────────────────────────────────────

/// Replace the main-appeal set for one record: delete all prior rows, then
/// reinsert in the given order. No diffing.
pub fn replace_main_appeals(
    conn: &Connection,
    knowledge_id: &str,
    appeals: &[String],
) -> Result<(), OperationError> {
    conn.execute(
        "DELETE FROM banner_main_appeals WHERE knowledge_id = ?1",
        params![knowledge_id],
    )?;
    for appeal in appeals {
        conn.execute(
            "INSERT INTO banner_main_appeals (knowledge_id, appeal_code) VALUES (?1, ?2)",
            params![knowledge_id, appeal],
        )?;
    }
    Ok(())
}

/// Replace the sub-appeal set for one record. Same policy as
/// [`replace_main_appeals`].
pub fn replace_sub_appeals(
    conn: &Connection,
    knowledge_id: &str,
    appeals: &[String],
) -> Result<(), OperationError> {
    conn.execute(
        "DELETE FROM banner_sub_appeals WHERE knowledge_id = ?1",
        params![knowledge_id],
    )?;
    for appeal in appeals {
        conn.execute(
            "INSERT INTO banner_sub_appeals (knowledge_id, appeal_text) VALUES (?1, ?2)",
            params![knowledge_id, appeal],
        )?;
    }
    Ok(())
}

/// Load both appeal sets onto a record.
pub(crate) fn attach_appeals(
    conn: &Connection,
    record: &mut BannerRecord,
) -> Result<(), OperationError> {
    let mut stmt = conn.prepare(
        "SELECT appeal_code FROM banner_main_appeals WHERE knowledge_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![record.knowledge_id], |row| row.get::<_, String>(0))?;
    record.main_appeals = rows.collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT appeal_text FROM banner_sub_appeals WHERE knowledge_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![record.knowledge_id], |row| row.get::<_, String>(0))?;
    record.sub_appeals = rows.collect::<Result<Vec<_>, _>>()?;

    Ok(())
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Insert an import log entry. Returns the generated ID.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (source_type, source_name, imported_at,
             records_created, records_updated, records_failed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            log.source_type,
            log.source_name,
            log.imported_at,
            log.records_created,
            log.records_updated,
            log.records_failed,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Row Mapping ─────────────────────────────────────────────────────────────

pub(crate) const SELECT_BANNER: &str = "SELECT knowledge_id, image_id, company_name, job_title, employment_type,
        area, impressions, clicks, ctr, visual_type, main_color, atmosphere,
        extracted_text, notes, banner_image_key, banner_image_url,
        created_at, updated_at
 FROM banner_knowledge";

pub(crate) fn row_to_banner(row: &rusqlite::Row<'_>) -> rusqlite::Result<BannerRecord> {
    Ok(BannerRecord {
        knowledge_id: row.get(0)?,
        image_id: row.get(1)?,
        company_name: row.get(2)?,
        job_title: row.get(3)?,
        employment_type: row.get(4)?,
        area: row.get(5)?,
        impressions: row.get(6)?,
        clicks: row.get(7)?,
        ctr: row.get(8)?,
        visual_type: row.get(9)?,
        main_color: row.get(10)?,
        atmosphere: row.get(11)?,
        extracted_text: row.get(12)?,
        notes: row.get(13)?,
        banner_image_key: row.get(14)?,
        banner_image_url: row.get(15)?,
        main_appeals: Vec::new(),
        sub_appeals: Vec::new(),
        created_at: row.get(16)?,
        updated_at: row.get(17)?,
    })
}
