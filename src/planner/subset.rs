use tracing::warn;

use crate::models::{MenuItem, MonthlyMealPlan, TargetProfile, WeeklyCyclePlan};
use crate::planner::evaluation::{PriceCheck, evaluate_week};
use crate::planner::filter::respects_profile;

/// Take the first N parent items of each category for one week.
///
/// Parent items the child's own tag and spice rules reject are skipped.
pub fn project_week(parent_week: &WeeklyCyclePlan, child: &TargetProfile) -> WeeklyCyclePlan {
    let mut items: Vec<MenuItem> = Vec::with_capacity(child.total_items());

    for (&category, &count) in &child.composition {
        let before = items.len();
        items.extend(
            parent_week
                .items_in(category)
                .filter(|item| respects_profile(item, child))
                .take(count)
                .cloned(),
        );
        let got = items.len() - before;
        if got < count {
            warn!(
                profile = %child.name,
                week = parent_week.week,
                %category,
                got,
                count,
                "parent week has too few items for subset"
            );
        }
    }

    // The child's price floor is not re-checked; truncation still surfaces
    // as a shortage warning.
    evaluate_week(parent_week.week, items, child, PriceCheck::Skip)
}

/// Derive a child profile's plan from its parent's generated plan.
///
/// Every week keeps the parent's selection order; the child gets its own id
/// and its own budget-cap warnings.
pub fn project_subset(parent_plan: &MonthlyMealPlan, child: &TargetProfile) -> MonthlyMealPlan {
    MonthlyMealPlan {
        id: uuid::Uuid::new_v4().to_string(),
        month_label: parent_plan.month_label.clone(),
        cycle: parent_plan.cycle,
        profile: child.clone(),
        weeks: parent_plan
            .weeks
            .iter()
            .map(|week| project_week(week, child))
            .collect(),
    }
}
