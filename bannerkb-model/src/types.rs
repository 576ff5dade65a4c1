//! Data model types for the banner knowledge base.
//!
//! These types represent the persistent schema: banner records with their
//! appeal sets, the reference dictionaries, and the report types produced
//! by import and migration runs.

use serde::{Deserialize, Serialize};

// ── Banner Record ───────────────────────────────────────────────────────────

/// A stored banner with its performance metrics and classification tags.
///
/// `image_id` is the externally assigned reference number and the natural
/// key for reconciliation: two records sharing an `image_id` are the same
/// logical banner across re-imports. `knowledge_id` is generated once at
/// creation and never changes.
///
/// Fields typed as dictionary codes (`employment_type`, `area`,
/// `visual_type`, appeal entries) may legitimately hold free text when the
/// source label had no dictionary match; display logic must render unknown
/// codes as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerRecord {
    pub knowledge_id: String,
    pub image_id: String,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub employment_type: Option<String>,
    /// Single optional area code. Historically a many-to-many relation that
    /// only ever held one row per record.
    pub area: Option<String>,
    pub impressions: i64,
    pub clicks: i64,
    /// Click-through rate in percent units.
    pub ctr: f64,
    pub visual_type: Option<String>,
    pub main_color: Option<String>,
    pub atmosphere: Option<String>,
    pub extracted_text: Option<String>,
    pub notes: Option<String>,
    pub banner_image_key: Option<String>,
    pub banner_image_url: Option<String>,
    pub main_appeals: Vec<String>,
    pub sub_appeals: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A candidate record mapped from one tabular row, before reconciliation.
///
/// Optional fields are `None` when the source cell was empty so the
/// reconciler can preserve previously stored values; `Some("")` is never
/// produced by the mapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BannerDraft {
    pub image_id: String,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub employment_type: Option<String>,
    pub area: Option<String>,
    pub impressions: i64,
    pub clicks: i64,
    pub ctr: f64,
    pub visual_type: Option<String>,
    pub main_color: Option<String>,
    pub atmosphere: Option<String>,
    pub extracted_text: Option<String>,
    pub notes: Option<String>,
    pub banner_image_url: Option<String>,
    pub main_appeals: Vec<String>,
    pub sub_appeals: Vec<String>,
}

// ── Dictionaries ────────────────────────────────────────────────────────────

/// One entry of a reference dictionary: {code, display name, sort order}.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryItem {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub display_order: i64,
    pub created_at: String,
}

/// A main-color dictionary entry, which additionally carries a hex value
/// for swatch display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainColor {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub hex_color: Option<String>,
    pub display_order: i64,
    pub created_at: String,
}

/// Names of the six reference dictionaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryKind {
    EmploymentTypes,
    Areas,
    MainAppeals,
    VisualTypes,
    MainColors,
    Atmospheres,
}

impl DictionaryKind {
    pub fn table(&self) -> &'static str {
        match self {
            Self::EmploymentTypes => "employment_types",
            Self::Areas => "areas",
            Self::MainAppeals => "main_appeals",
            Self::VisualTypes => "visual_types",
            Self::MainColors => "main_colors",
            Self::Atmospheres => "atmospheres",
        }
    }
}

// ── Search ──────────────────────────────────────────────────────────────────

/// Filter for banner searches. Empty vectors and `None` fields mean
/// "no constraint". Results come back ordered by CTR descending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Substring match on company name.
    pub company_name: Option<String>,
    /// Substring match on job title.
    pub job_title: Option<String>,
    pub employment_types: Vec<String>,
    pub areas: Vec<String>,
    pub main_appeals: Vec<String>,
    pub limit: Option<u32>,
}

// ── Import Reporting ────────────────────────────────────────────────────────

/// One row that failed during reconciliation, paired with enough of the
/// offending payload to identify it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowFailure {
    /// Position within the batch of mapped drafts (0-based).
    pub row: usize,
    pub image_id: String,
    pub message: String,
}

/// Tallies from one import batch. `created + updated + failures.len()`
/// equals the number of rows that passed the mapper's business-key filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub created: u64,
    pub updated: u64,
    pub failures: Vec<RowFailure>,
}

impl ImportReport {
    pub fn failed(&self) -> u64 {
        self.failures.len() as u64
    }

    pub fn total(&self) -> u64 {
        self.created + self.updated + self.failed()
    }
}

/// Tallies from an external-image migration pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MigrationStats {
    pub migrated: u64,
    pub failed: u64,
    pub skipped: u64,
}

/// Log entry for an import run.
#[derive(Debug, Clone)]
pub struct ImportLog {
    pub id: i64,
    /// "csv" or "sheet".
    pub source_type: String,
    pub source_name: String,
    pub imported_at: String,
    pub records_created: i64,
    pub records_updated: i64,
    pub records_failed: i64,
}

// ── AI Tags ─────────────────────────────────────────────────────────────────

/// Tag set suggested by the AI collaborator for one banner image.
///
/// Values use the dictionary display names, not codes; callers resolve them
/// before storing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerTags {
    pub visual_type: Option<String>,
    pub main_color: Option<String>,
    pub atmosphere: Option<String>,
    #[serde(default)]
    pub main_appeal: Vec<String>,
}
