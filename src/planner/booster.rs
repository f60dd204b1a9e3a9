use std::collections::HashSet;

use tracing::{debug, info};

use crate::models::{MenuItem, TargetProfile, WeeklyCyclePlan};
use crate::planner::evaluation::{PriceCheck, evaluate_week, total_price};
use crate::planner::filter::respects_profile;

/// Highest-priced same-category replacement that beats `current`.
fn best_replacement<'a>(
    current: &MenuItem,
    catalog: &'a [MenuItem],
    profile: &TargetProfile,
    taken: &HashSet<String>,
) -> Option<&'a MenuItem> {
    catalog
        .iter()
        .filter(|item| item.category == current.category)
        .filter(|item| !taken.contains(&item.id))
        .filter(|item| item.recommended_price > current.recommended_price)
        .filter(|item| respects_profile(item, profile))
        .max_by(|a, b| {
            a.recommended_price
                .partial_cmp(&b.recommended_price)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Raise a week's summed price towards the profile's target.
///
/// Slots are visited cheapest first, at most once each. Every visited slot is
/// swapped for the priciest same-category item not already used in the plan
/// (`plan_used_ids`) or this week. Stops as soon as the target is met. The
/// returned week is re-evaluated from scratch; category counts never change
/// and the total price never decreases.
pub fn boost_price(
    week: &WeeklyCyclePlan,
    profile: &TargetProfile,
    catalog: &[MenuItem],
    plan_used_ids: &HashSet<String>,
) -> WeeklyCyclePlan {
    let mut items = week.items.clone();
    let mut taken: HashSet<String> = plan_used_ids.clone();
    taken.extend(items.iter().map(|item| item.id.clone()));

    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        items[a]
            .recommended_price
            .partial_cmp(&items[b].recommended_price)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let before = total_price(&items);
    let mut swaps = 0;

    for idx in order {
        if total_price(&items) >= profile.target_price {
            break;
        }
        let Some(replacement) = best_replacement(&items[idx], catalog, profile, &taken) else {
            continue;
        };
        debug!(
            week = week.week,
            from = %items[idx].debug_string(),
            to = %replacement.debug_string(),
            "price boost swap"
        );
        taken.insert(replacement.id.clone());
        items[idx] = replacement.clone();
        swaps += 1;
    }

    let boosted = evaluate_week(week.week, items, profile, PriceCheck::Enforce);
    info!(
        profile = %profile.name,
        week = week.week,
        swaps,
        before,
        after = boosted.total_price,
        target = profile.target_price,
        "price boost finished"
    );
    boosted
}
