use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::models::menu::{Category, MenuItem};
use crate::models::profile::TargetProfile;

/// Weekday grouping the business distributes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cycle {
    #[serde(rename = "mon-thu")]
    MonThu,
    #[serde(rename = "tue-fri")]
    TueFri,
}

impl Cycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cycle::MonThu => "mon-thu",
            Cycle::TueFri => "tue-fri",
        }
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cycle {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mon-thu" | "monthu" => Ok(Cycle::MonThu),
            "tue-fri" | "tuefri" => Ok(Cycle::TueFri),
            other => Err(PlanError::InvalidInput(format!("unknown cycle: {}", other))),
        }
    }
}

/// One week's selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyCyclePlan {
    /// Week index, 1..=4.
    pub week: u8,

    /// Selected items, grouped by category in composition order.
    pub items: Vec<MenuItem>,

    #[serde(rename = "totalCost")]
    pub total_cost: f64,

    #[serde(rename = "totalPrice")]
    pub total_price: f64,

    #[serde(rename = "isValid")]
    pub is_valid: bool,

    pub warnings: Vec<String>,
}

impl WeeklyCyclePlan {
    pub fn items_in(&self, category: Category) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    pub fn count_of(&self, category: Category) -> usize {
        self.items_in(category).count()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }
}

/// A generated four-week plan for one profile and cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyMealPlan {
    pub id: String,

    #[serde(rename = "monthLabel")]
    pub month_label: String,

    pub cycle: Cycle,

    pub profile: TargetProfile,

    pub weeks: Vec<WeeklyCyclePlan>,
}

impl MonthlyMealPlan {
    pub fn week(&self, week: u8) -> Option<&WeeklyCyclePlan> {
        self.weeks.iter().find(|w| w.week == week)
    }

    pub fn week_mut(&mut self, week: u8) -> Option<&mut WeeklyCyclePlan> {
        self.weeks.iter_mut().find(|w| w.week == week)
    }

    /// Every item id used in any week.
    pub fn used_ids(&self) -> std::collections::HashSet<String> {
        self.weeks
            .iter()
            .flat_map(|w| w.items.iter().map(|item| item.id.clone()))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.weeks.iter().all(|w| w.is_valid)
    }

    pub fn warning_count(&self) -> usize {
        self.weeks.iter().map(|w| w.warnings.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_parse() {
        assert_eq!("mon-thu".parse::<Cycle>().unwrap(), Cycle::MonThu);
        assert_eq!("TUE-FRI".parse::<Cycle>().unwrap(), Cycle::TueFri);
        assert!("sat-sun".parse::<Cycle>().is_err());
    }

    #[test]
    fn test_cycle_serde_matches_display() {
        let json = serde_json::to_string(&Cycle::TueFri).unwrap();
        assert_eq!(json, format!("\"{}\"", Cycle::TueFri));
    }
}
