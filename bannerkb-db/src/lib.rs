//! SQLite persistence layer for the banner knowledge base.
//!
//! Provides schema creation, CRUD operations, search queries, and
//! dictionary seeding backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;
pub mod seed;

pub use rusqlite::Connection;

pub use operations::{
    OperationError, delete_all_banners, delete_banner, find_by_image_id, find_by_knowledge_id,
    insert_banner, insert_import_log, replace_main_appeals, replace_sub_appeals, update_banner,
    update_image_url,
};
pub use queries::{
    KnowledgeStats, knowledge_stats, list_dictionary, list_import_logs, list_main_colors,
    load_resolver_maps, search_banners,
};
pub use schema::{open_database, open_memory};
pub use seed::seed_dictionaries;
