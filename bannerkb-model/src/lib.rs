//! Banner knowledge data model types and dictionary resolution.
//!
//! This crate defines the persistent data model for the banner knowledge
//! base without any database dependencies. Consumers can use these types
//! directly for serialization, display, or passing to `bannerkb-db` for
//! persistence.

pub mod dict;
pub mod types;

pub use dict::{DictionaryMap, ResolverMaps, split_list};
pub use types::*;
