//! CSV and spreadsheet ingestion for the banner knowledge base.
//!
//! This crate owns all ETL logic: parsing delimited text into rows, mapping
//! rows to candidate records through the dictionary and metric normalizers,
//! and reconciling batches against the store by reference number.

pub mod csv;
pub mod image_url;
pub mod mapper;
pub mod metrics;
pub mod progress;
pub mod reconcile;

pub use csv::{CsvError, CsvRow, escape_field, parse_csv, serialize_row};
pub use image_url::{is_external_storage_url, normalize_image_url};
pub use mapper::{map_row, map_rows};
pub use metrics::{parse_count, parse_ctr};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use reconcile::{
    ImportError, generate_knowledge_id, import_banners, log_import, resync_banners,
};
