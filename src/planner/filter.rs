use std::collections::HashSet;

use crate::models::{Category, MenuItem, TargetProfile};

/// Tag and spice rules of a profile, independent of history.
///
/// Rejects items carrying a banned tag, spicy items for child-safe
/// profiles, and items flagged as unused.
pub fn respects_profile(item: &MenuItem, profile: &TargetProfile) -> bool {
    !item.unused
        && !item.has_any_tag(&profile.banned_tags)
        && !(profile.child_safe && item.spicy)
}

/// Narrow the catalog to items a profile may select.
///
/// `used_ids` is only enforced when `duplication_check` is set. An empty
/// result is not an error; selection reports the shortfall as a warning.
pub fn filter_catalog<'a>(
    catalog: &'a [MenuItem],
    profile: &TargetProfile,
    used_ids: &HashSet<String>,
    duplication_check: bool,
) -> Vec<&'a MenuItem> {
    catalog
        .iter()
        .filter(|item| !(duplication_check && used_ids.contains(&item.id)))
        .filter(|item| respects_profile(item, profile))
        .collect()
}

/// Eligible pool restricted to one category, in catalog order.
pub fn category_pool<'a>(eligible: &[&'a MenuItem], category: Category) -> Vec<&'a MenuItem> {
    eligible
        .iter()
        .copied()
        .filter(|item| item.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagSet;

    fn item(id: &str, category: Category, tags: &[&str], spicy: bool) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            category,
            cost: 1000.0,
            recommended_price: 3000.0,
            taste_tags: TagSet::new(),
            season: None,
            tags: tags.iter().collect(),
            spicy,
            main_ingredient: "vegetable".to_string(),
            code: None,
            weight: None,
            process_id: None,
            unused: false,
            launch_date: None,
        }
    }

    fn profile(child_safe: bool) -> TargetProfile {
        TargetProfile {
            name: "kids".to_string(),
            price: 20000.0,
            cost_ratio: 0.4,
            target_price: 10000.0,
            composition: [(Category::Side, 2)].into_iter().collect(),
            banned_tags: ["spicy"].into_iter().collect(),
            required_tags: TagSet::new(),
            child_safe,
            parent: None,
        }
    }

    fn catalog() -> Vec<MenuItem> {
        vec![
            item("a", Category::Side, &[], false),
            item("b", Category::Side, &["Spicy"], false),
            item("c", Category::Side, &[], true),
            item("d", Category::Main, &[], false),
        ]
    }

    fn ids(items: &[&MenuItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_banned_tags_and_child_safe() {
        let catalog = catalog();
        let used = HashSet::new();

        let kids = filter_catalog(&catalog, &profile(true), &used, true);
        assert_eq!(ids(&kids), vec!["a", "d"]);

        let adults = filter_catalog(&catalog, &profile(false), &used, true);
        assert_eq!(ids(&adults), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_used_ids_only_with_duplication_check() {
        let catalog = catalog();
        let used: HashSet<String> = ["a".to_string()].into_iter().collect();

        let checked = filter_catalog(&catalog, &profile(true), &used, true);
        assert_eq!(ids(&checked), vec!["d"]);

        let unchecked = filter_catalog(&catalog, &profile(true), &used, false);
        assert_eq!(ids(&unchecked), vec!["a", "d"]);
    }

    #[test]
    fn test_empty_result_is_fine() {
        let catalog: Vec<MenuItem> = Vec::new();
        let filtered = filter_catalog(&catalog, &profile(true), &HashSet::new(), true);
        assert!(filtered.is_empty());
        assert!(category_pool(&filtered, Category::Side).is_empty());
    }

    #[test]
    fn test_category_pool() {
        let catalog = catalog();
        let all: Vec<&MenuItem> = catalog.iter().collect();
        assert_eq!(ids(&category_pool(&all, Category::Side)), vec!["a", "b", "c"]);
    }
}
