use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::menu::{Category, clean_menu_name};
use crate::models::plan::Cycle;
use crate::planner::constants::{LONG_LOOKBACK_DAYS, SHORT_LOOKBACK_DAYS};

/// History lookback window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    Long,
    Short,
}

impl Lookback {
    pub fn days(&self) -> i64 {
        match self {
            Lookback::Long => LONG_LOOKBACK_DAYS,
            Lookback::Short => SHORT_LOOKBACK_DAYS,
        }
    }
}

/// Soups and mains stay out of rotation longer than sides.
pub fn lookback_for(category: Category) -> Lookback {
    match category {
        Category::Soup | Category::Main => Lookback::Long,
        Category::Side | Category::Other => Lookback::Short,
    }
}

/// A past distribution, as recorded by the history store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalServing {
    pub cycle: Cycle,

    #[serde(rename = "servedOn")]
    pub served_on: NaiveDate,

    #[serde(rename = "menuNames")]
    pub menu_names: Vec<String>,
}

/// Recently used clean names for one cycle.
#[derive(Debug, Clone, Default)]
struct CycleHistory {
    long_window: HashSet<String>,
    short_window: HashSet<String>,
    last_used: HashMap<String, NaiveDate>,
}

/// Caller-owned record of recent repeats, keyed by cycle.
#[derive(Debug, Clone, Default)]
pub struct ExclusionState {
    cycles: HashMap<Cycle, CycleHistory>,
}

impl ExclusionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build windows from past servings relative to `today`.
    pub fn from_history(servings: &[HistoricalServing], today: NaiveDate) -> Self {
        let mut state = Self::new();
        for serving in servings {
            for name in &serving.menu_names {
                state.record(serving.cycle, name, serving.served_on, today);
            }
        }
        state
    }

    /// Record one use of `name` on `served_on`.
    ///
    /// Dates after `today` or older than the long window are ignored.
    pub fn record(&mut self, cycle: Cycle, name: &str, served_on: NaiveDate, today: NaiveDate) {
        let age = (today - served_on).num_days();
        if !(0..=Lookback::Long.days()).contains(&age) {
            return;
        }

        let clean = clean_menu_name(name);
        let history = self.cycles.entry(cycle).or_default();
        history.long_window.insert(clean.clone());
        if age <= Lookback::Short.days() {
            history.short_window.insert(clean.clone());
        }

        let last = history.last_used.entry(clean).or_insert(served_on);
        if served_on > *last {
            *last = served_on;
        }
    }

    /// Whether `clean_name` was used within the lookback for `category`.
    pub fn is_excluded(&self, cycle: Cycle, category: Category, clean_name: &str) -> bool {
        let Some(history) = self.cycles.get(&cycle) else {
            return false;
        };
        match lookback_for(category) {
            Lookback::Long => history.long_window.contains(clean_name),
            Lookback::Short => history.short_window.contains(clean_name),
        }
    }

    pub fn last_used(&self, cycle: Cycle, clean_name: &str) -> Option<NaiveDate> {
        self.cycles
            .get(&cycle)
            .and_then(|h| h.last_used.get(clean_name).copied())
    }

    pub fn days_since_last_use(&self, cycle: Cycle, clean_name: &str, today: NaiveDate) -> Option<i64> {
        self.last_used(cycle, clean_name)
            .map(|date| (today - date).num_days())
    }
}

/// Ingredient classifiers other profiles already committed, keyed by week.
pub type IngredientHints = BTreeMap<u8, Vec<String>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_windows_from_history() {
        let today = date("2026-10-01");
        let servings = vec![
            HistoricalServing {
                cycle: Cycle::MonThu,
                served_on: date("2026-09-20"),
                menu_names: vec!["[new] Radish Soup".to_string(), "Spinach Salad".to_string()],
            },
            HistoricalServing {
                cycle: Cycle::MonThu,
                served_on: date("2026-08-20"),
                menu_names: vec!["Beef Bulgogi".to_string(), "Bean Sprouts".to_string()],
            },
            HistoricalServing {
                cycle: Cycle::TueFri,
                served_on: date("2026-09-29"),
                menu_names: vec!["Egg Roll".to_string()],
            },
        ];

        let state = ExclusionState::from_history(&servings, today);

        assert!(state.is_excluded(Cycle::MonThu, Category::Soup, "Radish Soup"));
        assert!(state.is_excluded(Cycle::MonThu, Category::Main, "Beef Bulgogi"));
        assert!(state.is_excluded(Cycle::MonThu, Category::Side, "Spinach Salad"));
        // 42 days old: outside the short window used for sides
        assert!(!state.is_excluded(Cycle::MonThu, Category::Side, "Bean Sprouts"));
        assert!(!state.is_excluded(Cycle::MonThu, Category::Side, "Egg Roll"));
        assert!(state.is_excluded(Cycle::TueFri, Category::Side, "Egg Roll"));
    }

    #[test]
    fn test_last_used_keeps_latest() {
        let today = date("2026-10-01");
        let mut state = ExclusionState::new();
        state.record(Cycle::MonThu, "Egg Roll", date("2026-09-01"), today);
        state.record(Cycle::MonThu, "Egg Roll", date("2026-09-25"), today);
        state.record(Cycle::MonThu, "Egg Roll", date("2026-09-10"), today);

        assert_eq!(state.last_used(Cycle::MonThu, "Egg Roll"), Some(date("2026-09-25")));
        assert_eq!(state.days_since_last_use(Cycle::MonThu, "Egg Roll", today), Some(6));
        assert_eq!(state.days_since_last_use(Cycle::TueFri, "Egg Roll", today), None);
    }

    #[test]
    fn test_record_ignores_future_and_stale_dates() {
        let today = date("2026-10-01");
        let mut state = ExclusionState::new();
        state.record(Cycle::MonThu, "Egg Roll", date("2026-10-05"), today);
        state.record(Cycle::MonThu, "Beef Bulgogi", date("2026-07-01"), today);

        assert!(!state.is_excluded(Cycle::MonThu, Category::Side, "Egg Roll"));
        assert!(!state.is_excluded(Cycle::MonThu, Category::Main, "Egg Roll"));
        assert!(!state.is_excluded(Cycle::MonThu, Category::Main, "Beef Bulgogi"));
        assert_eq!(state.last_used(Cycle::MonThu, "Egg Roll"), None);

        // window edges are inclusive
        state.record(Cycle::MonThu, "Radish Soup", date("2026-08-02"), today);
        state.record(Cycle::MonThu, "Spinach Salad", date("2026-09-01"), today);
        assert!(state.is_excluded(Cycle::MonThu, Category::Soup, "Radish Soup"));
        assert!(state.is_excluded(Cycle::MonThu, Category::Side, "Spinach Salad"));
    }
}
