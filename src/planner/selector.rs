use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::models::{Category, MenuItem, TargetProfile, WeeklyCyclePlan};
use crate::planner::constants::{MAX_INGREDIENT_PER_WEEK, TOP_WINDOW_EXTRA, TOP_WINDOW_FACTOR};
use crate::planner::evaluation::{PriceCheck, evaluate_week};
use crate::planner::filter::{category_pool, filter_catalog};
use crate::planner::similarity::is_similar_to_any;

/// Rolling state a week is selected against.
#[derive(Debug, Clone, Copy)]
pub struct WeekContext<'a> {
    /// Week index, 1..=4.
    pub week: u8,
    /// Ids already taken by earlier weeks or history.
    pub used_ids: &'a HashSet<String>,
    /// Counted (non-vegetable) ingredient classifiers of the previous week.
    pub previous_ingredients: &'a HashSet<String>,
    /// Clean names of the previous week's items.
    pub previous_names: &'a [String],
    pub duplication_check: bool,
    /// Classifiers other profiles committed for this week. Only lowers sort priority.
    pub hinted_ingredients: &'a HashSet<String>,
}

impl WeekContext<'_> {
    fn repeats_ingredient(&self, item: &MenuItem) -> bool {
        item.counted_ingredient()
            .is_some_and(|ing| self.previous_ingredients.contains(&ing))
    }

    fn is_penalized(&self, item: &MenuItem) -> bool {
        item.counted_ingredient().is_some_and(|ing| {
            self.previous_ingredients.contains(&ing) || self.hinted_ingredients.contains(&ing)
        })
    }
}

/// Keep `narrowed` if it still covers `count`, otherwise fall back to `pool`.
fn prefer<'a>(narrowed: Vec<&'a MenuItem>, pool: Vec<&'a MenuItem>, count: usize) -> Vec<&'a MenuItem> {
    if narrowed.len() >= count { narrowed } else { pool }
}

/// Size of the top-price window the final pick is shuffled from.
pub fn top_window_size(count: usize, pool_size: usize) -> usize {
    (count * TOP_WINDOW_FACTOR)
        .max(pool_size.min(count + TOP_WINDOW_EXTRA))
        .min(pool_size)
}

/// Pick `count` items of one category.
///
/// Narrowing stages each fall back to the previous pool when they would
/// leave fewer than `count` candidates:
/// 1. Sort by (repeats last week's ingredient, lacks a required tag).
/// 2. Drop names similar to last week's.
/// 3. Drop ingredients used last week.
/// 4. Cap non-vegetable ingredients at [`MAX_INGREDIENT_PER_WEEK`] per week.
/// 5. Shuffle the top-price window and take `count`.
pub fn select_category<'a, R: Rng + ?Sized>(
    category: Category,
    count: usize,
    eligible: &[&'a MenuItem],
    ctx: &WeekContext<'_>,
    profile: &TargetProfile,
    week_tally: &HashMap<String, usize>,
    rng: &mut R,
) -> Vec<&'a MenuItem> {
    let mut prioritized = category_pool(eligible, category);
    prioritized.sort_by_key(|item| {
        (
            ctx.is_penalized(item),
            !item.has_any_tag(&profile.required_tags),
        )
    });
    let pool_size = prioritized.len();

    let dissimilar: Vec<&MenuItem> = prioritized
        .iter()
        .copied()
        .filter(|item| !is_similar_to_any(&item.clean_name(), ctx.previous_names))
        .collect();
    let pool = prefer(dissimilar, prioritized, count);

    let fresh: Vec<&MenuItem> = pool
        .iter()
        .copied()
        .filter(|item| !ctx.repeats_ingredient(item))
        .collect();
    let pool = prefer(fresh, pool, count);

    let capped: Vec<&MenuItem> = pool
        .iter()
        .copied()
        .filter(|item| match item.counted_ingredient() {
            Some(ing) => week_tally.get(&ing).copied().unwrap_or(0) < MAX_INGREDIENT_PER_WEEK,
            None => true,
        })
        .collect();
    let mut pool = prefer(capped, pool, count);

    pool.sort_by(|a, b| {
        b.recommended_price
            .partial_cmp(&a.recommended_price)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let window_size = top_window_size(count, pool.len());
    let mut window: Vec<&MenuItem> = pool.into_iter().take(window_size).collect();
    window.shuffle(rng);
    window.truncate(count);

    debug!(
        week = ctx.week,
        %category,
        count,
        pool_size,
        window_size,
        picked = ?window.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
        "selected category"
    );

    window
}

/// Select one week for a profile.
///
/// Categories are processed in composition order; the per-week ingredient
/// tally carries across categories. The result is evaluated with the price
/// floor enforced.
pub fn select_week<R: Rng + ?Sized>(
    ctx: &WeekContext<'_>,
    profile: &TargetProfile,
    catalog: &[MenuItem],
    rng: &mut R,
) -> WeeklyCyclePlan {
    let eligible = filter_catalog(catalog, profile, ctx.used_ids, ctx.duplication_check);
    let mut week_tally: HashMap<String, usize> = HashMap::new();
    let mut items: Vec<MenuItem> = Vec::with_capacity(profile.total_items());

    for (&category, &count) in &profile.composition {
        if count == 0 {
            continue;
        }
        let picked = select_category(category, count, &eligible, ctx, profile, &week_tally, rng);
        for item in &picked {
            if let Some(ing) = item.counted_ingredient() {
                *week_tally.entry(ing).or_insert(0) += 1;
            }
        }
        items.extend(picked.into_iter().cloned());
    }

    evaluate_week(ctx.week, items, profile, PriceCheck::Enforce)
}
