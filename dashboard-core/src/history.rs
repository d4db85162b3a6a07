//! Recent-search history: most-recent-first, unique, capped.

use serde::{Deserialize, Serialize};

pub const MAX_RECENT_SEARCHES: usize = 20;

/// Move `name` to the front of `history`, dropping any earlier copy and
/// anything beyond [`MAX_RECENT_SEARCHES`].
pub fn record_search(history: &[String], name: &str) -> Vec<String> {
    std::iter::once(name.to_string())
        .chain(history.iter().filter(|s| s.as_str() != name).cloned())
        .take(MAX_RECENT_SEARCHES)
        .collect()
}

/// Drop every entry equal to `name`, keeping the rest in order.
pub fn remove_search(history: &[String], name: &str) -> Vec<String> {
    history.iter().filter(|s| s.as_str() != name).cloned().collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RecentSearches(Vec<String>);

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str) {
        self.0 = record_search(&self.0, name);
    }

    pub fn remove(&mut self, name: &str) {
        self.0 = remove_search(&self.0, name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|s| s == name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Persisted lists may have been edited by hand; restore the invariants on load.
impl From<Vec<String>> for RecentSearches {
    fn from(list: Vec<String>) -> Self {
        let mut out = RecentSearches::new();
        for name in list.iter().rev() {
            out.record(name);
        }
        out
    }
}

impl From<RecentSearches> for Vec<String> {
    fn from(recent: RecentSearches) -> Self {
        recent.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn record_prepends_new_names() {
        let h = record_search(&[], "Paris");
        let h = record_search(&h, "Oslo");
        assert_eq!(h, names(&["Oslo", "Paris"]));
    }

    #[test]
    fn record_moves_existing_name_to_front() {
        let h = names(&["Oslo", "Paris", "Rome"]);
        let h = record_search(&h, "Rome");
        assert_eq!(h, names(&["Rome", "Oslo", "Paris"]));

        let h = record_search(&h, "Rome");
        assert_eq!(h[0], "Rome");
        assert_eq!(h.iter().filter(|s| *s == "Rome").count(), 1);
    }

    #[test]
    fn record_is_case_sensitive() {
        let h = record_search(&names(&["paris"]), "Paris");
        assert_eq!(h, names(&["Paris", "paris"]));
    }

    #[test]
    fn record_caps_length_and_drops_oldest() {
        let mut h: Vec<String> = Vec::new();
        for i in 0..30 {
            h = record_search(&h, &format!("city-{i}"));
        }

        assert_eq!(h.len(), MAX_RECENT_SEARCHES);
        assert_eq!(h[0], "city-29");
        assert_eq!(h[MAX_RECENT_SEARCHES - 1], "city-10");
    }

    #[test]
    fn arbitrary_sequences_keep_invariants() {
        let cities = ["A", "B", "C", "D", "E", "F", "G"];
        let mut h: Vec<String> = Vec::new();

        for step in 0..200usize {
            let city = cities[(step * 7 + step / 3) % cities.len()];
            h = record_search(&h, city);

            let mut seen = std::collections::HashSet::new();
            assert!(h.iter().all(|s| seen.insert(s.clone())), "duplicate in {h:?}");
            assert!(h.len() <= MAX_RECENT_SEARCHES);
            assert_eq!(h[0], city);
        }
    }

    #[test]
    fn remove_filters_all_copies_and_keeps_order() {
        let h = names(&["A", "B", "A", "C"]);
        assert_eq!(remove_search(&h, "A"), names(&["B", "C"]));
        assert_eq!(remove_search(&h, "Z"), h);
    }

    #[test]
    fn recent_searches_from_list_restores_invariants() {
        let recent = RecentSearches::from(names(&["A", "B", "A"]));
        assert_eq!(recent.as_slice(), names(&["A", "B"]).as_slice());

        let long: Vec<String> = (0..25).map(|i| i.to_string()).collect();
        let recent = RecentSearches::from(long);
        assert_eq!(recent.len(), MAX_RECENT_SEARCHES);
        assert_eq!(recent.as_slice()[0], "0");
    }

    #[test]
    fn recent_searches_methods() {
        let mut recent = RecentSearches::new();
        assert!(recent.is_empty());

        recent.record("Paris");
        recent.record("Oslo");
        assert!(recent.contains("Paris"));
        assert_eq!(recent.iter().collect::<Vec<_>>(), vec!["Oslo", "Paris"]);

        recent.remove("Paris");
        assert!(!recent.contains("Paris"));
        assert_eq!(recent.len(), 1);
    }
}
