//! Free-text label resolution against the reference dictionaries.
//!
//! Import sources carry Japanese display names ("正社員", "未経験歓迎");
//! the store keeps canonical codes. Resolution is fallback-preserving: a
//! label with no dictionary match is returned unchanged rather than dropped,
//! because unresolved labels may be valid free text the domain allows
//! (sub-appeals are intentionally not dictionary-constrained).

use std::collections::HashMap;

use crate::types::{DictionaryItem, MainColor};

/// A {display name → code} lookup built from one dictionary.
#[derive(Debug, Clone, Default)]
pub struct DictionaryMap {
    by_name: HashMap<String, String>,
}

impl DictionaryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: &[DictionaryItem]) -> Self {
        let by_name = items
            .iter()
            .map(|i| (i.name.clone(), i.code.clone()))
            .collect();
        Self { by_name }
    }

    pub fn from_colors(items: &[MainColor]) -> Self {
        let by_name = items
            .iter()
            .map(|i| (i.name.clone(), i.code.clone()))
            .collect();
        Self { by_name }
    }

    pub fn insert(&mut self, name: &str, code: &str) {
        self.by_name.insert(name.to_string(), code.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Resolve one label to its code on an exact trimmed match, otherwise
    /// return the trimmed label itself. Never fails, never drops the value.
    pub fn resolve(&self, label: &str) -> String {
        let trimmed = label.trim();
        match self.by_name.get(trimmed) {
            Some(code) => code.clone(),
            None => trimmed.to_string(),
        }
    }

    /// Resolve a comma-separated list of labels independently per item,
    /// preserving order and dropping items that are empty after trimming.
    pub fn resolve_list(&self, raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| self.resolve(s))
            .collect()
    }

    /// Look up a code without the free-text fallback.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.by_name.get(label.trim()).map(String::as_str)
    }
}

/// Split a comma-separated cell into trimmed items, dropping empties, with
/// no dictionary lookup. Used for fields that are free text by design.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// The full set of lookup tables the row mapper needs.
#[derive(Debug, Clone, Default)]
pub struct ResolverMaps {
    pub employment_types: DictionaryMap,
    pub areas: DictionaryMap,
    pub main_appeals: DictionaryMap,
    pub visual_types: DictionaryMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area_map() -> DictionaryMap {
        let mut map = DictionaryMap::new();
        map.insert("東京都", "tokyo");
        map.insert("大阪府", "osaka");
        map
    }

    #[test]
    fn resolves_exact_trimmed_match() {
        let map = area_map();
        assert_eq!(map.resolve("東京都"), "tokyo");
        assert_eq!(map.resolve("  東京都  "), "tokyo");
    }

    #[test]
    fn unresolved_label_passes_through() {
        let map = area_map();
        assert_eq!(map.resolve("那覇市"), "那覇市");
        // Same label, same answer both times.
        assert_eq!(map.resolve("那覇市"), "那覇市");
    }

    #[test]
    fn resolution_is_idempotent() {
        let map = area_map();
        assert_eq!(map.resolve("大阪府"), map.resolve("大阪府"));
    }

    #[test]
    fn list_resolution_preserves_order_and_drops_empties() {
        let mut map = DictionaryMap::new();
        map.insert("未経験歓迎", "no_experience");
        map.insert("高収入・高時給", "high_income");

        let items = map.resolve_list("未経験歓迎, 高収入・高時給, ,駅チカ");
        assert_eq!(items, vec!["no_experience", "high_income", "駅チカ"]);
    }

    #[test]
    fn empty_input_yields_no_items() {
        let map = area_map();
        assert!(map.resolve_list("").is_empty());
        assert!(map.resolve_list(" , ,").is_empty());
    }
}
