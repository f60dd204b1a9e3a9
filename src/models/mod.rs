pub mod exclusion;
pub mod menu;
pub mod plan;
pub mod profile;

pub use exclusion::{ExclusionState, HistoricalServing, IngredientHints, Lookback, lookback_for};
pub use menu::{Category, MenuItem, TagSet, clean_menu_name};
pub use plan::{Cycle, MonthlyMealPlan, WeeklyCyclePlan};
pub use profile::{ProfileRegistry, TargetProfile};
