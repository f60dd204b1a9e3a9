use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::planner::constants::VEGETABLE_INGREDIENT;

/// Menu category. Composition maps are processed in this declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Soup,
    Main,
    Side,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Soup => "soup",
            Category::Main => "main",
            Category::Side => "side",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive set of tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: &str) {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() {
            self.0.insert(tag);
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(&tag.trim().to_lowercase())
    }

    /// True if the two sets share at least one tag.
    pub fn intersects(&self, other: &TagSet) -> bool {
        self.0.iter().any(|t| other.0.contains(t))
    }

    /// True if every tag of `self` is also in `other`.
    pub fn is_subset(&self, other: &TagSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<String> {
    fn from(tags: TagSet) -> Self {
        tags.0.into_iter().collect()
    }
}

/// A catalog menu item. Read-only to the planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,

    pub name: String,

    pub category: Category,

    pub cost: f64,

    #[serde(rename = "recommendedPrice")]
    pub recommended_price: f64,

    #[serde(rename = "tasteTags", default)]
    pub taste_tags: TagSet,

    #[serde(default)]
    pub season: Option<String>,

    #[serde(default)]
    pub tags: TagSet,

    #[serde(default)]
    pub spicy: bool,

    /// Main-ingredient classifier, e.g. "beef" or "vegetable".
    #[serde(rename = "mainIngredient", default)]
    pub main_ingredient: String,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub weight: Option<f64>,

    #[serde(rename = "processId", default)]
    pub process_id: Option<String>,

    #[serde(default)]
    pub unused: bool,

    #[serde(rename = "launchDate", default)]
    pub launch_date: Option<NaiveDate>,
}

impl MenuItem {
    /// Display name without leading bracketed annotations such as `[new]` or `(L)`.
    pub fn clean_name(&self) -> String {
        clean_menu_name(&self.name)
    }

    /// Lower-cased ingredient classifier, or `None` for vegetables and blanks.
    ///
    /// Vegetables never count towards ingredient repetition limits.
    pub fn counted_ingredient(&self) -> Option<String> {
        let ingredient = self.main_ingredient.trim().to_lowercase();
        if ingredient.is_empty() || ingredient == VEGETABLE_INGREDIENT {
            None
        } else {
            Some(ingredient)
        }
    }

    pub fn has_any_tag(&self, tags: &TagSet) -> bool {
        self.tags.intersects(tags)
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} [{}] {}: cost {:.0}, price {:.0}, ingredient {}{}",
            self.id,
            self.category,
            self.name,
            self.cost,
            self.recommended_price,
            self.main_ingredient,
            if self.spicy { ", spicy" } else { "" }
        )
    }
}

impl PartialEq for MenuItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MenuItem {}

impl std::hash::Hash for MenuItem {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Strip leading `[..]` / `(..)` annotations and surrounding whitespace.
pub fn clean_menu_name(name: &str) -> String {
    let mut rest = name.trim();
    loop {
        let close = match rest.chars().next() {
            Some('[') => ']',
            Some('(') => ')',
            _ => break,
        };
        match rest.find(close) {
            Some(end) => rest = rest[end + 1..].trim_start(),
            None => break,
        }
    }
    rest.trim().to_string()
}
