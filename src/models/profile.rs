use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::menu::{Category, TagSet};

/// Named selection policy for one audience segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetProfile {
    pub name: String,

    /// Selling price of one weekly box.
    pub price: f64,

    /// Share of `price` that may be spent on cost.
    #[serde(rename = "costRatio")]
    pub cost_ratio: f64,

    /// Floor for the summed recommended price of a week.
    #[serde(rename = "targetPrice")]
    pub target_price: f64,

    /// Required item count per category for one week.
    pub composition: BTreeMap<Category, usize>,

    #[serde(rename = "bannedTags", default)]
    pub banned_tags: TagSet,

    #[serde(rename = "requiredTags", default)]
    pub required_tags: TagSet,

    /// Kids-oriented profiles never receive spicy items.
    #[serde(rename = "childSafe", default)]
    pub child_safe: bool,

    /// Parent profile this one is projected from.
    #[serde(default)]
    pub parent: Option<String>,
}

impl TargetProfile {
    pub fn budget_cap(&self) -> f64 {
        self.price * self.cost_ratio
    }

    pub fn count_for(&self, category: Category) -> usize {
        self.composition.get(&category).copied().unwrap_or(0)
    }

    pub fn total_items(&self) -> usize {
        self.composition.values().sum()
    }

    /// Summary for listings, e.g. `soup 1 / main 1 / side 3`.
    pub fn composition_string(&self) -> String {
        self.composition
            .iter()
            .map(|(category, count)| format!("{} {}", category, count))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Validated set of target profiles with one-level parent inheritance.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, TargetProfile>,
}

impl ProfileRegistry {
    /// Build a registry, rejecting inconsistent hierarchies.
    pub fn new(profiles: Vec<TargetProfile>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for profile in profiles {
            if profile.total_items() == 0 {
                return Err(PlanError::InvalidProfile(format!(
                    "{} has an empty composition",
                    profile.name
                )));
            }
            let name = profile.name.clone();
            if map.insert(name.clone(), profile).is_some() {
                return Err(PlanError::InvalidProfile(format!(
                    "duplicate profile name {}",
                    name
                )));
            }
        }

        let registry = Self { profiles: map };
        for profile in registry.profiles.values() {
            registry.validate_parent(profile)?;
        }
        Ok(registry)
    }

    fn validate_parent(&self, child: &TargetProfile) -> Result<()> {
        let Some(parent_name) = child.parent.as_deref() else {
            return Ok(());
        };

        let parent = self.profiles.get(parent_name).ok_or_else(|| {
            PlanError::InvalidProfile(format!(
                "{} refers to unknown parent {}",
                child.name, parent_name
            ))
        })?;

        if parent.parent.is_some() {
            return Err(PlanError::InvalidProfile(format!(
                "{} inherits from {}, which is itself a child profile",
                child.name, parent.name
            )));
        }

        // The child receives the parent's picks, so it cannot be stricter.
        if child.child_safe && !parent.child_safe {
            return Err(PlanError::InvalidProfile(format!(
                "{} is child-safe but parent {} is not",
                child.name, parent.name
            )));
        }
        if !child.banned_tags.is_subset(&parent.banned_tags) {
            let extra: Vec<&str> = child
                .banned_tags
                .iter()
                .filter(|tag| !parent.banned_tags.contains(tag))
                .collect();
            return Err(PlanError::InvalidProfile(format!(
                "{} bans tags its parent {} allows: {}",
                child.name,
                parent.name,
                extra.join(", ")
            )));
        }

        for (&category, &count) in &child.composition {
            let available = parent.count_for(category);
            if count > available {
                return Err(PlanError::InvalidProfile(format!(
                    "{} needs {} {} items but parent {} only selects {}",
                    child.name, count, category, parent.name, available
                )));
            }
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&TargetProfile> {
        self.profiles
            .get(name)
            .ok_or_else(|| PlanError::ProfileNotFound(name.to_string()))
    }

    pub fn resolve_parent(&self, profile: &TargetProfile) -> Option<&TargetProfile> {
        profile
            .parent
            .as_deref()
            .and_then(|name| self.profiles.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &TargetProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
