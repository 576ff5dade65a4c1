//! Read queries for the banner knowledge base.
//!
//! Provides filtered search, dictionary listing, and summary statistics.

use bannerkb_model::dict::{DictionaryMap, ResolverMaps};
use bannerkb_model::types::{
    BannerRecord, DictionaryItem, DictionaryKind, ImportLog, MainColor, SearchFilter,
};
use rusqlite::Connection;

use crate::operations::{OperationError, attach_appeals, row_to_banner};

// ── Banner Search ───────────────────────────────────────────────────────────

/// Search banner records, ordered by CTR descending.
///
/// All filter dimensions are optional and combine with AND. Appeal-set
/// membership joins through `banner_main_appeals`; each hit comes back with
/// both appeal sets merged on.
pub fn search_banners(
    conn: &Connection,
    filter: &SearchFilter,
) -> Result<Vec<BannerRecord>, OperationError> {
    let mut sql = String::from(
        "SELECT DISTINCT bk.knowledge_id, bk.image_id, bk.company_name, bk.job_title,
                bk.employment_type, bk.area, bk.impressions, bk.clicks, bk.ctr,
                bk.visual_type, bk.main_color, bk.atmosphere, bk.extracted_text,
                bk.notes, bk.banner_image_key, bk.banner_image_url,
                bk.created_at, bk.updated_at
         FROM banner_knowledge bk",
    );
    let mut conditions: Vec<String> = Vec::new();
    let mut bindings: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if !filter.main_appeals.is_empty() {
        sql.push_str(" INNER JOIN banner_main_appeals bma ON bk.knowledge_id = bma.knowledge_id");
        conditions.push(format!(
            "bma.appeal_code IN ({})",
            placeholders(bindings.len(), filter.main_appeals.len())
        ));
        for appeal in &filter.main_appeals {
            bindings.push(Box::new(appeal.clone()));
        }
    }

    if let Some(ref company) = filter.company_name {
        conditions.push(format!("bk.company_name LIKE ?{}", bindings.len() + 1));
        bindings.push(Box::new(format!("%{company}%")));
    }

    if let Some(ref job_title) = filter.job_title {
        conditions.push(format!("bk.job_title LIKE ?{}", bindings.len() + 1));
        bindings.push(Box::new(format!("%{job_title}%")));
    }

    if !filter.employment_types.is_empty() {
        conditions.push(format!(
            "bk.employment_type IN ({})",
            placeholders(bindings.len(), filter.employment_types.len())
        ));
        for et in &filter.employment_types {
            bindings.push(Box::new(et.clone()));
        }
    }

    if !filter.areas.is_empty() {
        conditions.push(format!(
            "bk.area IN ({})",
            placeholders(bindings.len(), filter.areas.len())
        ));
        for area in &filter.areas {
            bindings.push(Box::new(area.clone()));
        }
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    sql.push_str(" ORDER BY bk.ctr DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::types::ToSql> = bindings.iter().map(|v| v.as_ref()).collect();
    let rows = stmt.query_map(params.as_slice(), row_to_banner)?;
    let mut records = rows.collect::<Result<Vec<_>, _>>()?;

    for record in &mut records {
        attach_appeals(conn, record)?;
    }

    Ok(records)
}

/// Build `?N,?N+1,...` for an IN clause, continuing from `offset` bound
/// parameters.
fn placeholders(offset: usize, count: usize) -> String {
    (0..count)
        .map(|i| format!("?{}", offset + i + 1))
        .collect::<Vec<_>>()
        .join(",")
}

// ── Dictionary Queries ──────────────────────────────────────────────────────

/// List one dictionary, ordered for display.
pub fn list_dictionary(
    conn: &Connection,
    kind: DictionaryKind,
) -> Result<Vec<DictionaryItem>, OperationError> {
    let sql = format!(
        "SELECT id, code, name, display_order, created_at FROM {} ORDER BY display_order",
        kind.table()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(DictionaryItem {
            id: row.get(0)?,
            code: row.get(1)?,
            name: row.get(2)?,
            display_order: row.get(3)?,
            created_at: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List the main-color dictionary with hex values.
pub fn list_main_colors(conn: &Connection) -> Result<Vec<MainColor>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, code, name, hex_color, display_order, created_at
         FROM main_colors ORDER BY display_order",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(MainColor {
            id: row.get(0)?,
            code: row.get(1)?,
            name: row.get(2)?,
            hex_color: row.get(3)?,
            display_order: row.get(4)?,
            created_at: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Build the {display name → code} maps the row mapper resolves against.
pub fn load_resolver_maps(conn: &Connection) -> Result<ResolverMaps, OperationError> {
    Ok(ResolverMaps {
        employment_types: DictionaryMap::from_items(&list_dictionary(
            conn,
            DictionaryKind::EmploymentTypes,
        )?),
        areas: DictionaryMap::from_items(&list_dictionary(conn, DictionaryKind::Areas)?),
        main_appeals: DictionaryMap::from_items(&list_dictionary(
            conn,
            DictionaryKind::MainAppeals,
        )?),
        visual_types: DictionaryMap::from_items(&list_dictionary(
            conn,
            DictionaryKind::VisualTypes,
        )?),
    })
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall knowledge base statistics.
pub fn knowledge_stats(conn: &Connection) -> Result<KnowledgeStats, OperationError> {
    let banners: i64 = conn.query_row("SELECT COUNT(*) FROM banner_knowledge", [], |r| r.get(0))?;
    let with_image: i64 = conn.query_row(
        "SELECT COUNT(*) FROM banner_knowledge WHERE banner_image_url IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let main_appeals: i64 =
        conn.query_row("SELECT COUNT(*) FROM banner_main_appeals", [], |r| r.get(0))?;
    let imports: i64 = conn.query_row("SELECT COUNT(*) FROM import_log", [], |r| r.get(0))?;
    let avg_ctr: f64 = conn.query_row(
        "SELECT COALESCE(AVG(ctr), 0) FROM banner_knowledge",
        [],
        |r| r.get(0),
    )?;

    Ok(KnowledgeStats {
        banners,
        with_image,
        main_appeal_rows: main_appeals,
        imports,
        avg_ctr,
    })
}

/// Summary statistics for the knowledge base.
#[derive(Debug)]
pub struct KnowledgeStats {
    pub banners: i64,
    pub with_image: i64,
    pub main_appeal_rows: i64,
    pub imports: i64,
    pub avg_ctr: f64,
}

// ── Import Log Queries ──────────────────────────────────────────────────────

/// List recent import logs.
pub fn list_import_logs(
    conn: &Connection,
    limit: Option<u32>,
) -> Result<Vec<ImportLog>, OperationError> {
    let limit = limit.unwrap_or(20);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, source_type, source_name, imported_at,
                records_created, records_updated, records_failed
         FROM import_log ORDER BY imported_at DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            source_type: row.get(1)?,
            source_name: row.get(2)?,
            imported_at: row.get(3)?,
            records_created: row.get(4)?,
            records_updated: row.get(5)?,
            records_failed: row.get(6)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
