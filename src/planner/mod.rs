pub mod booster;
pub mod constants;
pub mod evaluation;
pub mod filter;
pub mod orchestrator;
pub mod selector;
pub mod similarity;
pub mod subset;
pub mod swap;

pub use booster::boost_price;
pub use constants::*;
pub use evaluation::{PriceCheck, evaluate_week};
pub use filter::{filter_catalog, respects_profile};
pub use orchestrator::{GenerationRequest, PlanGenerator};
pub use selector::{WeekContext, select_week};
pub use similarity::{is_similar, is_similar_to_any};
pub use subset::{project_subset, project_week};
pub use swap::{apply_swap, swap_candidates};
