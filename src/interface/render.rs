use chrono::NaiveDate;

use crate::models::{Cycle, ExclusionState, MenuItem, MonthlyMealPlan, ProfileRegistry};

/// Display a monthly plan, one block per week.
pub fn display_plan(plan: &MonthlyMealPlan) {
    let profile = &plan.profile;

    println!();
    println!(
        "=== {} / {} / {} ===",
        profile.name, plan.month_label, plan.cycle
    );
    println!(
        "plan {} | budget cap {:.0} | target price {:.0} | {}",
        plan.id,
        profile.budget_cap(),
        profile.target_price,
        profile.composition_string()
    );

    let max_name_len = plan
        .weeks
        .iter()
        .flat_map(|w| w.items.iter().map(|i| i.name.len()))
        .max()
        .unwrap_or(10);

    for week in &plan.weeks {
        println!();
        let status = if week.is_valid { "ok" } else { "CHECK" };
        println!(
            "--- Week {} [{}] cost {:.0} | price {:.0} ---",
            week.week, status, week.total_cost, week.total_price
        );

        for item in &week.items {
            println!(
                "  {:<6} {:<width$}  {:>7.0} {:>7.0}  {}{}",
                item.category.as_str(),
                item.name,
                item.cost,
                item.recommended_price,
                item.main_ingredient,
                if item.spicy { " (spicy)" } else { "" },
                width = max_name_len
            );
        }

        for warning in &week.warnings {
            println!("  ! {}", warning);
        }
    }

    println!();
    println!("--- Summary ---");
    println!("Weeks: {}", plan.weeks.len());
    println!("Warnings: {}", plan.warning_count());
    println!("Valid: {}", if plan.is_valid() { "yes" } else { "no" });
    println!();
}

/// Display swap candidates with how long ago each was last served.
pub fn display_swap_candidates(
    original: &MenuItem,
    candidates: &[&MenuItem],
    history: Option<(&ExclusionState, Cycle, NaiveDate)>,
) {
    println!();
    println!(
        "=== Replacements for {} ({} candidates) ===",
        original.name,
        candidates.len()
    );

    if candidates.is_empty() {
        println!("  (none)");
        println!();
        return;
    }

    for item in candidates {
        let last_served = history
            .and_then(|(state, cycle, today)| {
                state.days_since_last_use(cycle, &item.clean_name(), today)
            })
            .map(|days| format!("  last served {} days ago", days))
            .unwrap_or_default();

        println!(
            "  {} {} - price {:.0}, cost {:.0}, {}{}",
            item.id, item.name, item.recommended_price, item.cost, item.main_ingredient, last_served
        );
    }
    println!();
}

/// Display the validated profile registry.
pub fn display_profiles(registry: &ProfileRegistry) {
    println!();
    println!("=== Profiles ({}) ===", registry.len());
    println!();

    for profile in registry.profiles() {
        let parent = registry
            .resolve_parent(profile)
            .map(|p| format!(" <- {}", p.name))
            .unwrap_or_default();
        let banned = if profile.banned_tags.is_empty() {
            String::new()
        } else {
            format!(" | bans {}", profile.banned_tags.iter().collect::<Vec<_>>().join(", "))
        };
        println!(
            "  {}{}: {} | cap {:.0} | target {:.0}{}{}",
            profile.name,
            parent,
            profile.composition_string(),
            profile.budget_cap(),
            profile.target_price,
            banned,
            if profile.child_safe { " | child-safe" } else { "" }
        );
    }
    println!();
}
