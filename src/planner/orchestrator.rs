use std::collections::HashSet;

use rand::Rng;
use tracing::info;

use crate::error::{PlanError, Result};
use crate::models::{
    Cycle, ExclusionState, IngredientHints, MenuItem, MonthlyMealPlan, ProfileRegistry,
    TargetProfile,
};
use crate::planner::booster::boost_price;
use crate::planner::constants::WEEKS_PER_PLAN;
use crate::planner::selector::{WeekContext, select_week};
use crate::planner::subset::project_subset;

/// Inputs for one monthly generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    pub month_label: String,
    pub cycle: Cycle,
    pub duplication_check: bool,
    /// Recent history for the cycle; only applied with `duplication_check`.
    pub exclusions: Option<&'a ExclusionState>,
    /// Ingredients other profiles committed this month, by week.
    pub ingredient_hints: Option<&'a IngredientHints>,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(month_label: impl Into<String>, cycle: Cycle) -> Self {
        Self {
            month_label: month_label.into(),
            cycle,
            duplication_check: true,
            exclusions: None,
            ingredient_hints: None,
        }
    }

    pub fn with_duplication_check(mut self, enabled: bool) -> Self {
        self.duplication_check = enabled;
        self
    }

    pub fn with_exclusions(mut self, exclusions: &'a ExclusionState) -> Self {
        self.exclusions = Some(exclusions);
        self
    }

    pub fn with_ingredient_hints(mut self, hints: &'a IngredientHints) -> Self {
        self.ingredient_hints = Some(hints);
        self
    }
}

/// Drives month generation for profiles of one registry over one catalog.
pub struct PlanGenerator<'a> {
    registry: &'a ProfileRegistry,
    catalog: &'a [MenuItem],
}

impl<'a> PlanGenerator<'a> {
    pub fn new(registry: &'a ProfileRegistry, catalog: &'a [MenuItem]) -> Self {
        Self { registry, catalog }
    }

    /// Generate a month for the named profile.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        profile_name: &str,
        request: &GenerationRequest<'_>,
        rng: &mut R,
    ) -> Result<MonthlyMealPlan> {
        let profile = self.registry.get(profile_name)?;
        self.generate_for(profile, request, rng)
    }

    /// Generate a month for `profile`.
    ///
    /// Child profiles never select on their own: the parent's month is
    /// generated and projected down.
    pub fn generate_for<R: Rng + ?Sized>(
        &self,
        profile: &TargetProfile,
        request: &GenerationRequest<'_>,
        rng: &mut R,
    ) -> Result<MonthlyMealPlan> {
        if let Some(parent_name) = profile.parent.as_deref() {
            let parent = self
                .registry
                .resolve_parent(profile)
                .ok_or_else(|| PlanError::ProfileNotFound(parent_name.to_string()))?;
            info!(profile = %profile.name, parent = %parent.name, "projecting from parent plan");
            let parent_plan = self.generate_for(parent, request, rng)?;
            return Ok(project_subset(&parent_plan, profile));
        }

        Ok(self.generate_weeks(profile, request, rng))
    }

    /// Ids of catalog items whose clean name falls in the history window.
    pub fn history_ids(&self, cycle: Cycle, exclusions: &ExclusionState) -> HashSet<String> {
        self.catalog
            .iter()
            .filter(|item| exclusions.is_excluded(cycle, item.category, &item.clean_name()))
            .map(|item| item.id.clone())
            .collect()
    }

    fn generate_weeks<R: Rng + ?Sized>(
        &self,
        profile: &TargetProfile,
        request: &GenerationRequest<'_>,
        rng: &mut R,
    ) -> MonthlyMealPlan {
        let mut used_ids: HashSet<String> = match (request.duplication_check, request.exclusions) {
            (true, Some(exclusions)) => self.history_ids(request.cycle, exclusions),
            _ => HashSet::new(),
        };
        let mut previous_ingredients: HashSet<String> = HashSet::new();
        let mut previous_names: Vec<String> = Vec::new();
        let mut weeks = Vec::with_capacity(WEEKS_PER_PLAN as usize);

        info!(
            profile = %profile.name,
            month = %request.month_label,
            cycle = %request.cycle,
            history_excluded = used_ids.len(),
            "generating monthly plan"
        );

        for week in 1..=WEEKS_PER_PLAN {
            let hinted: HashSet<String> = request
                .ingredient_hints
                .and_then(|hints| hints.get(&week))
                .map(|list| list.iter().map(|ing| ing.trim().to_lowercase()).collect())
                .unwrap_or_default();

            let ctx = WeekContext {
                week,
                used_ids: &used_ids,
                previous_ingredients: &previous_ingredients,
                previous_names: &previous_names,
                duplication_check: request.duplication_check,
                hinted_ingredients: &hinted,
            };

            let mut selected = select_week(&ctx, profile, self.catalog, rng);
            if selected.total_price < profile.target_price {
                selected = boost_price(&selected, profile, self.catalog, &used_ids);
            }

            info!(
                profile = %profile.name,
                week,
                items = selected.items.len(),
                total_cost = selected.total_cost,
                total_price = selected.total_price,
                valid = selected.is_valid,
                "week selected"
            );

            used_ids.extend(selected.items.iter().map(|item| item.id.clone()));
            previous_ingredients = selected
                .items
                .iter()
                .filter_map(MenuItem::counted_ingredient)
                .collect();
            previous_names = selected.items.iter().map(MenuItem::clean_name).collect();
            weeks.push(selected);
        }

        MonthlyMealPlan {
            id: uuid::Uuid::new_v4().to_string(),
            month_label: request.month_label.clone(),
            cycle: request.cycle,
            profile: profile.clone(),
            weeks,
        }
    }
}
