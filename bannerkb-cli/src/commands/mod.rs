pub(crate) mod analyze;
pub(crate) mod dicts;
pub(crate) mod import;
pub(crate) mod migrate;
pub(crate) mod record;
pub(crate) mod search;
pub(crate) mod seed;
pub(crate) mod stats;
pub(crate) mod tags;
