use tracing::warn;

use crate::models::{MenuItem, TargetProfile, WeeklyCyclePlan};

/// Whether the price-floor rule is applied when evaluating a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceCheck {
    Enforce,
    Skip,
}

pub fn cost_warning(total_cost: f64) -> String {
    format!("cost over budget: {:.0}", total_cost)
}

pub fn price_warning(total_price: f64, target: f64) -> String {
    format!("price below target: {:.0} < {:.0}", total_price, target)
}

pub fn shortage_warning(category: impl std::fmt::Display, got: usize, need: usize) -> String {
    format!("not enough candidates for {}: {} < {}", category, got, need)
}

pub fn total_cost(items: &[MenuItem]) -> f64 {
    items.iter().map(|item| item.cost).sum()
}

pub fn total_price(items: &[MenuItem]) -> f64 {
    items.iter().map(|item| item.recommended_price).sum()
}

/// Build a week from its items, deriving totals and warnings from scratch.
///
/// Warnings cover unfilled categories, cost above the profile's budget cap
/// and, with [`PriceCheck::Enforce`], price below the profile's target.
pub fn evaluate_week(
    week: u8,
    items: Vec<MenuItem>,
    profile: &TargetProfile,
    price_check: PriceCheck,
) -> WeeklyCyclePlan {
    let total_cost = total_cost(&items);
    let total_price = total_price(&items);
    let mut warnings = Vec::new();

    for (&category, &need) in &profile.composition {
        let got = items.iter().filter(|item| item.category == category).count();
        if got < need {
            warnings.push(shortage_warning(category, got, need));
        }
    }

    if total_cost > profile.budget_cap() {
        warnings.push(cost_warning(total_cost));
    }

    if price_check == PriceCheck::Enforce && total_price < profile.target_price {
        warnings.push(price_warning(total_price, profile.target_price));
    }

    if !warnings.is_empty() {
        warn!(
            profile = %profile.name,
            week,
            warnings = ?warnings,
            "week did not satisfy all constraints"
        );
    }

    WeeklyCyclePlan {
        week,
        items,
        total_cost,
        total_price,
        is_valid: warnings.is_empty(),
        warnings,
    }
}
