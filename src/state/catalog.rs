use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::models::MenuItem;

/// Minimum Jaro-Winkler score for a fuzzy name match.
const FUZZY_THRESHOLD: f64 = 0.7;

/// Read-only lookup over a loaded catalog.
pub struct CatalogIndex {
    items: Vec<MenuItem>,
    by_id: HashMap<String, usize>,
}

impl CatalogIndex {
    pub fn new(items: Vec<MenuItem>) -> Self {
        let by_id = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.id.clone(), idx))
            .collect();
        Self { items, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    /// Exact clean-name match, case-insensitive.
    pub fn find_by_name(&self, name: &str) -> Option<&MenuItem> {
        let wanted = name.trim().to_lowercase();
        self.items
            .iter()
            .find(|item| item.clean_name().to_lowercase() == wanted)
    }

    /// Items whose clean name resembles `query`, best first.
    pub fn fuzzy_matches<'a>(&'a self, query: &str, limit: usize) -> Vec<(&'a MenuItem, f64)> {
        let query = query.trim().to_lowercase();
        let mut candidates: Vec<(&MenuItem, f64)> = self
            .items
            .iter()
            .map(|item| (item, jaro_winkler(&item.clean_name().to_lowercase(), &query)))
            .filter(|(_, score)| *score > FUZZY_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates.truncate(limit);
        candidates
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }
}
