use std::collections::HashSet;

use tracing::debug;

use crate::error::{PlanError, Result};
use crate::models::{MenuItem, MonthlyMealPlan};
use crate::planner::evaluation::{PriceCheck, evaluate_week};
use crate::planner::filter::respects_profile;

/// Counted ingredients of the week before `week`; empty for week 1.
fn previous_week_ingredients(plan: &MonthlyMealPlan, week: u8) -> HashSet<String> {
    week.checked_sub(1)
        .and_then(|prev| plan.week(prev))
        .map(|prev| {
            prev.items
                .iter()
                .filter_map(MenuItem::counted_ingredient)
                .collect()
        })
        .unwrap_or_default()
}

/// Catalog items that may replace `original` in `week` of `plan`.
///
/// Candidates share the original's category, are unused anywhere in the
/// plan, pass the profile's tag and spice rules, and avoid the previous
/// week's non-vegetable ingredients. Returned in catalog order, unranked.
pub fn swap_candidates<'a>(
    plan: &MonthlyMealPlan,
    original: &MenuItem,
    week: u8,
    catalog: &'a [MenuItem],
) -> Vec<&'a MenuItem> {
    let used_ids = plan.used_ids();
    let previous = previous_week_ingredients(plan, week);

    let candidates: Vec<&MenuItem> = catalog
        .iter()
        .filter(|item| item.id != original.id)
        .filter(|item| item.category == original.category)
        .filter(|item| !used_ids.contains(&item.id))
        .filter(|item| respects_profile(item, &plan.profile))
        .filter(|item| {
            item.counted_ingredient()
                .is_none_or(|ing| !previous.contains(&ing))
        })
        .collect();

    debug!(
        week,
        original = %original.id,
        candidates = candidates.len(),
        "swap candidates"
    );
    candidates
}

/// Replace `original_id` with `replacement` in `week` and re-evaluate it.
pub fn apply_swap(
    plan: &mut MonthlyMealPlan,
    week: u8,
    original_id: &str,
    replacement: MenuItem,
) -> Result<()> {
    let profile = plan.profile.clone();
    let target = plan.week_mut(week).ok_or(PlanError::WeekOutOfRange(week))?;
    let slot = target
        .items
        .iter()
        .position(|item| item.id == original_id)
        .ok_or_else(|| PlanError::ItemNotFound(original_id.to_string()))?;

    if target.items[slot].category != replacement.category {
        return Err(PlanError::InvalidInput(format!(
            "{} is a {} item, {} is a {} item",
            original_id, target.items[slot].category, replacement.id, replacement.category
        )));
    }

    let mut items = std::mem::take(&mut target.items);
    items[slot] = replacement;
    *target = evaluate_week(week, items, &profile, price_check_for(&profile));
    Ok(())
}

/// Child profiles are not held to a price floor.
pub fn price_check_for(profile: &crate::models::TargetProfile) -> PriceCheck {
    if profile.parent.is_some() {
        PriceCheck::Skip
    } else {
        PriceCheck::Enforce
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Cycle, TagSet, TargetProfile, WeeklyCyclePlan};

    fn item(id: &str, category: Category, ingredient: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: id.to_string(),
            category,
            cost: 1000.0,
            recommended_price: 3000.0,
            taste_tags: TagSet::new(),
            season: None,
            tags: TagSet::new(),
            spicy: false,
            main_ingredient: ingredient.to_string(),
            code: None,
            weight: None,
            process_id: None,
            unused: false,
            launch_date: None,
        }
    }

    fn plan() -> MonthlyMealPlan {
        let profile = TargetProfile {
            name: "kids".to_string(),
            price: 20000.0,
            cost_ratio: 0.5,
            target_price: 0.0,
            composition: [(Category::Main, 1), (Category::Side, 1)].into_iter().collect(),
            banned_tags: ["spicy"].into_iter().collect(),
            required_tags: TagSet::new(),
            child_safe: true,
            parent: None,
        };
        let week = |w: u8, main: MenuItem, side: MenuItem| WeeklyCyclePlan {
            week: w,
            items: vec![main, side],
            total_cost: 2000.0,
            total_price: 6000.0,
            is_valid: true,
            warnings: Vec::new(),
        };
        MonthlyMealPlan {
            id: "p".to_string(),
            month_label: "2026-11".to_string(),
            cycle: Cycle::MonThu,
            profile,
            weeks: vec![
                week(1, item("m1", Category::Main, "beef"), item("s1", Category::Side, "vegetable")),
                week(2, item("m2", Category::Main, "pork"), item("s2", Category::Side, "vegetable")),
            ],
        }
    }

    fn catalog() -> Vec<MenuItem> {
        let mut hot = item("m-hot", Category::Main, "chicken");
        hot.spicy = true;
        let mut tagged = item("m-tag", Category::Main, "chicken");
        tagged.tags.insert("spicy");
        vec![
            item("m1", Category::Main, "beef"),
            item("m2", Category::Main, "pork"),
            item("m3", Category::Main, "beef"),
            item("m4", Category::Main, "chicken"),
            item("m5", Category::Main, "vegetable"),
            item("s3", Category::Side, "vegetable"),
            hot,
            tagged,
        ]
    }

    #[test]
    fn test_candidates_for_week_two_main() {
        let plan = plan();
        let catalog = catalog();
        let original = plan.weeks[1].items[0].clone();

        let ids: Vec<&str> = swap_candidates(&plan, &original, 2, &catalog)
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();
        // m3 shares beef with week 1
        assert_eq!(ids, vec!["m4", "m5"]);
    }

    #[test]
    fn test_week_one_has_no_previous_ingredients() {
        let plan = plan();
        let catalog = catalog();
        let original = plan.weeks[0].items[0].clone();

        let candidates = swap_candidates(&plan, &original, 1, &catalog);
        assert!(candidates.iter().all(|c| c.id != original.id));
        assert!(candidates.iter().all(|c| c.category == original.category));
        assert!(candidates.iter().any(|c| c.id == "m3"));
    }

    #[test]
    fn test_apply_swap() {
        let mut plan = plan();
        let catalog = catalog();
        apply_swap(&mut plan, 2, "m2", catalog[3].clone()).unwrap();
        assert!(plan.weeks[1].contains_id("m4"));
        assert!(!plan.weeks[1].contains_id("m2"));
        assert!(plan.weeks[1].is_valid);

        let err = apply_swap(&mut plan, 2, "s2", catalog[4].clone()).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)));
        assert!(matches!(
            apply_swap(&mut plan, 9, "m4", catalog[4].clone()),
            Err(PlanError::WeekOutOfRange(9))
        ));
    }
}
